use crate::entities::item::ItemKind;
use crate::unify::error::UnifyError;
use lru::LruCache;
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::debug;

/// The replacement function: maps an item kind to its canonical kind, or
/// `None` when the kind has no replacement.
pub trait Resolver {
    fn resolve(&self, kind: &ItemKind) -> Option<ItemKind>;
}

impl<F> Resolver for F
where
    F: Fn(&ItemKind) -> Option<ItemKind>,
{
    fn resolve(&self, kind: &ItemKind) -> Option<ItemKind> {
        self(kind)
    }
}

#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    replacements: BTreeMap<ItemKind, ItemKind>,
}

/// Fixed replacement table, usually loaded from YAML:
///
/// ```yaml
/// replacements:
///   othermod:copper_ingot: minecraft:copper_ingot
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementTable {
    replacements: HashMap<ItemKind, ItemKind>,
}

impl ReplacementTable {
    /// Rejects tables whose targets are themselves replaced by something else.
    pub fn new<I>(entries: I) -> Result<Self, UnifyError>
    where
        I: IntoIterator<Item = (ItemKind, ItemKind)>,
    {
        let replacements: HashMap<ItemKind, ItemKind> = entries.into_iter().collect();
        for (from, to) in &replacements {
            if let Some(next) = replacements.get(to) {
                if next != to {
                    return Err(UnifyError::ReplacementChain {
                        from: from.clone(),
                        to: to.clone(),
                        next: next.clone(),
                    });
                }
            }
        }
        Ok(Self { replacements })
    }

    pub fn load(path: &Path) -> Result<Self, UnifyError> {
        let content = std::fs::read_to_string(path).map_err(|source| UnifyError::TableRead {
            path: path.to_path_buf(),
            source,
        })?;
        let file: TableFile =
            serde_yaml::from_str(&content).map_err(|source| UnifyError::TableParse {
                path: path.to_path_buf(),
                source,
            })?;
        let table = Self::new(file.replacements)?;
        debug!(path = %path.display(), entries = table.len(), "replacement table loaded");
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }
}

impl Resolver for ReplacementTable {
    fn resolve(&self, kind: &ItemKind) -> Option<ItemKind> {
        self.replacements.get(kind).cloned()
    }
}

/// Memoises an inner resolver in an LRU cache. A capacity of zero disables
/// caching.
///
/// Not `Sync`; it lives on the thread that owns the world.
pub struct CachedResolver<R> {
    inner: R,
    cache: Option<RefCell<LruCache<ItemKind, Option<ItemKind>>>>,
}

impl<R: Resolver> CachedResolver<R> {
    pub fn new(inner: R, capacity: usize) -> Self {
        Self {
            inner,
            cache: NonZeroUsize::new(capacity).map(|capacity| RefCell::new(LruCache::new(capacity))),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: Resolver> Resolver for CachedResolver<R> {
    fn resolve(&self, kind: &ItemKind) -> Option<ItemKind> {
        let Some(cache) = &self.cache else {
            return self.inner.resolve(kind);
        };
        if let Some(hit) = cache.borrow_mut().get(kind) {
            return hit.clone();
        }
        let resolved = self.inner.resolve(kind);
        cache.borrow_mut().put(kind.clone(), resolved.clone());
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn kind(id: &str) -> ItemKind {
        ItemKind::new(id)
    }

    #[test]
    fn closures_are_resolvers() {
        let resolver = |kind: &ItemKind| (kind.as_str() == "a:x").then(|| ItemKind::new("b:x"));
        assert_eq!(resolver.resolve(&kind("a:x")), Some(kind("b:x")));
        assert_eq!(resolver.resolve(&kind("c:x")), None);
    }

    #[test]
    fn table_rejects_chains() {
        let err = ReplacementTable::new([
            (kind("a:ingot"), kind("b:ingot")),
            (kind("b:ingot"), kind("c:ingot")),
        ])
        .expect_err("chain");
        assert!(matches!(err, UnifyError::ReplacementChain { .. }));
    }

    #[test]
    fn table_accepts_self_mapping() {
        let table = ReplacementTable::new([
            (kind("a:ingot"), kind("b:ingot")),
            (kind("b:ingot"), kind("b:ingot")),
        ])
        .expect("self mapping is canonical");
        assert_eq!(table.resolve(&kind("a:ingot")), Some(kind("b:ingot")));
        assert_eq!(table.resolve(&kind("b:ingot")), Some(kind("b:ingot")));
    }

    #[test]
    fn table_loads_from_yaml() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("item-unify-table-test-{suffix}"));
        std::fs::create_dir_all(&dir).expect("create dir");
        let path = dir.join("replacements.yaml");
        std::fs::write(
            &path,
            "replacements:\n  othermod:copper_ingot: minecraft:copper_ingot\n  thirdmod:copper_ingot: minecraft:copper_ingot\n",
        )
        .expect("write table");

        let table = ReplacementTable::load(&path).expect("load table");
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.resolve(&kind("thirdmod:copper_ingot")),
            Some(kind("minecraft:copper_ingot"))
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn table_load_reports_missing_file() {
        let err = ReplacementTable::load(Path::new("/nonexistent/item-unify/replacements.yaml"))
            .expect_err("missing file");
        assert!(matches!(err, UnifyError::TableRead { .. }));
    }

    struct CountingResolver {
        calls: Cell<usize>,
    }

    impl Resolver for CountingResolver {
        fn resolve(&self, kind: &ItemKind) -> Option<ItemKind> {
            self.calls.set(self.calls.get() + 1);
            (kind.as_str() == "a:dust").then(|| ItemKind::new("b:dust"))
        }
    }

    #[test]
    fn cached_resolver_hits_cache_for_hits_and_misses() {
        let cached = CachedResolver::new(
            CountingResolver {
                calls: Cell::new(0),
            },
            8,
        );
        for _ in 0..3 {
            assert_eq!(cached.resolve(&kind("a:dust")), Some(kind("b:dust")));
            assert_eq!(cached.resolve(&kind("z:dust")), None);
        }
        assert_eq!(cached.inner().calls.get(), 2);
    }

    #[test]
    fn cached_resolver_with_zero_capacity_passes_through() {
        let cached = CachedResolver::new(
            CountingResolver {
                calls: Cell::new(0),
            },
            0,
        );
        cached.resolve(&kind("a:dust"));
        cached.resolve(&kind("a:dust"));
        assert_eq!(cached.inner().calls.get(), 2);
    }
}
