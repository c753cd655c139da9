use crate::world::dimension::DimensionId;

/// Largest accepted `!unify all` radius in chunks, matching the widest view
/// distance a server can be configured for.
pub const MAX_UNIFY_RADIUS: u32 = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyCommand {
    /// The caller's own inventory.
    Inventory,
    PlayersIn { dimension: DimensionId },
    All { radius: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    Unify(UnifyCommand),
    Loot { table: String, seed: Option<u64> },
    Unknown(String),
}

pub fn parse_admin_command(message: &str) -> Result<Option<AdminCommand>, String> {
    let trimmed = message.trim();
    let Some(body) = trimmed.strip_prefix('!') else {
        return Ok(None);
    };

    let mut parts = body.split_whitespace();
    let command = parts
        .next()
        .ok_or_else(|| "admin command missing name".to_string())?;
    let command = command.to_ascii_lowercase();
    let parsed = match command.as_str() {
        "unify" => AdminCommand::Unify(parse_unify(&mut parts)?),
        "loot" => {
            let table = parts
                .next()
                .ok_or_else(|| "loot command missing table name".to_string())?
                .to_string();
            let seed = parts
                .next()
                .map(|value| {
                    value
                        .parse::<u64>()
                        .map_err(|_| format!("loot seed expected u64, got '{value}'"))
                })
                .transpose()?;
            AdminCommand::Loot { table, seed }
        }
        _ => AdminCommand::Unknown(command),
    };
    if let Some(extra) = parts.next() {
        return Err(format!("unexpected argument '{extra}'"));
    }
    Ok(Some(parsed))
}

fn parse_unify<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<UnifyCommand, String> {
    let Some(verb) = parts.next() else {
        return Ok(UnifyCommand::Inventory);
    };
    match verb.to_ascii_lowercase().as_str() {
        "playersin" => {
            let value = parts
                .next()
                .ok_or_else(|| "unify playersin missing dimension".to_string())?;
            Ok(UnifyCommand::PlayersIn {
                dimension: DimensionId::parse(value)?,
            })
        }
        "all" => Ok(UnifyCommand::All {
            radius: parse_radius(parts.next())?,
        }),
        other => Err(format!("unknown unify scope '{other}'")),
    }
}

fn parse_radius(value: Option<&str>) -> Result<u32, String> {
    let value = value.ok_or_else(|| "unify all missing radius in chunks".to_string())?;
    let radius = value
        .parse::<i64>()
        .map_err(|_| format!("radius expected an integer, got '{value}'"))?;
    if radius < 0 {
        return Err(format!("radius must not be negative, got {radius}"));
    }
    match u32::try_from(radius) {
        Ok(radius) if radius <= MAX_UNIFY_RADIUS => Ok(radius),
        _ => Err(format!(
            "radius {radius} is too large, at most {MAX_UNIFY_RADIUS} chunks"
        )),
    }
}
