use crate::unify::scope::ScopeTarget;
use crate::world::position::Position;
use std::fmt;

pub const PERFORMANCE_WARNING: &str =
    "This may take a while and cause lag, the operation scales with the number of containers";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportTarget {
    Player(String),
    Storage(Position),
}

impl fmt::Display for ReportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportTarget::Player(name) => f.write_str(name),
            ReportTarget::Storage(position) => write!(f, "{position}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCount {
    pub target: ReportTarget,
    pub count: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UnifyReport {
    pub total: usize,
    pub breakdown: Vec<TargetCount>,
    pub chunks_visited: usize,
}

impl UnifyReport {
    pub fn record(&mut self, target: ReportTarget, count: usize) {
        self.total += count;
        self.breakdown.push(TargetCount { target, count });
    }
}

/// User-facing lines for a finished run. A zero total produces no summary.
pub fn render_report(target: &ScopeTarget, report: &UnifyReport) -> Vec<String> {
    let mut lines = Vec::new();
    match target {
        ScopeTarget::SingleInventory { .. } => {
            if report.total > 0 {
                lines.push(format!("Unified {} items", report.total));
            }
        }
        ScopeTarget::DimensionPopulation { dimension } => {
            if report.total > 0 {
                lines.push(format!("Unified {} items in {}", report.total, dimension));
            }
        }
        ScopeTarget::SpatialRange { .. } => {
            for entry in &report.breakdown {
                lines.push(format!("Unified {} items at {}", entry.count, entry.target));
            }
            if report.total > 0 {
                lines.push(format!("Unified {} items", report.total));
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::player::PlayerId;
    use crate::world::dimension::DimensionId;
    use crate::world::position::ChunkPos;

    #[test]
    fn record_sums_total() {
        let mut report = UnifyReport::default();
        report.record(ReportTarget::Player("Alex".to_string()), 3);
        report.record(ReportTarget::Player("Steve".to_string()), 0);
        assert_eq!(report.total, 3);
        assert_eq!(report.breakdown.len(), 2);
    }

    #[test]
    fn zero_total_is_silent_for_inventory_and_population() {
        let report = UnifyReport::default();
        assert!(render_report(&ScopeTarget::SingleInventory { player: PlayerId(1) }, &report)
            .is_empty());
        assert!(render_report(
            &ScopeTarget::DimensionPopulation {
                dimension: DimensionId::overworld()
            },
            &report
        )
        .is_empty());
    }

    #[test]
    fn spatial_report_lists_each_container() {
        let mut report = UnifyReport::default();
        report.record(ReportTarget::Storage(Position::new(1, 64, 2)), 4);
        report.record(ReportTarget::Storage(Position::new(-3, 12, 7)), 0);
        let lines = render_report(
            &ScopeTarget::SpatialRange {
                dimension: DimensionId::overworld(),
                origin: ChunkPos::new(0, 0),
                radius: 2,
            },
            &report,
        );
        assert_eq!(
            lines,
            vec![
                "Unified 4 items at 1, 64, 2".to_string(),
                "Unified 0 items at -3, 12, 7".to_string(),
                "Unified 4 items".to_string(),
            ]
        );
    }

    #[test]
    fn population_summary_names_dimension() {
        let mut report = UnifyReport::default();
        report.record(ReportTarget::Player("Alex".to_string()), 2);
        let lines = render_report(
            &ScopeTarget::DimensionPopulation {
                dimension: DimensionId::parse("the_nether").unwrap(),
            },
            &report,
        );
        assert_eq!(lines, vec!["Unified 2 items in minecraft:the_nether".to_string()]);
    }
}
