use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_NAMESPACE: &str = "minecraft";

/// Namespaced dimension id such as `minecraft:the_nether`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DimensionId(String);

impl DimensionId {
    /// Accepts `namespace:path` or a bare path, which lands in the default
    /// namespace.
    pub fn parse(value: &str) -> Result<Self, String> {
        let (namespace, path) = match value.split_once(':') {
            Some((namespace, path)) => (namespace, path),
            None => (DEFAULT_NAMESPACE, value),
        };
        if namespace.is_empty() || !namespace.chars().all(is_namespace_char) {
            return Err(format!("invalid dimension namespace in '{value}'"));
        }
        if path.is_empty() || !path.chars().all(|ch| is_namespace_char(ch) || ch == '/') {
            return Err(format!("invalid dimension path in '{value}'"));
        }
        Ok(DimensionId(format!("{namespace}:{path}")))
    }

    pub fn overworld() -> Self {
        DimensionId(format!("{DEFAULT_NAMESPACE}:overworld"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_namespace_char(ch: char) -> bool {
    matches!(ch, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
}

impl TryFrom<String> for DimensionId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DimensionId::parse(&value)
    }
}

impl From<DimensionId> for String {
    fn from(id: DimensionId) -> Self {
        id.0
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
