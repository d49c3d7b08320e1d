use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Nested positional token tree as written in template configuration.
///
/// Leaves are literal integers or arithmetic expressions kept as text; JSON numbers and strings
/// both become [`PosTokens::Scalar`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PosTokens {
    /// One coordinate token.
    Scalar(String),
    /// An ordered group of nested tokens.
    List(Vec<PosTokens>),
}

impl PosTokens {
    /// Build a list node.
    pub fn list(items: impl IntoIterator<Item = PosTokens>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Build a flat list of scalar tokens.
    pub fn scalars<S: ToString>(items: impl IntoIterator<Item = S>) -> Self {
        Self::List(
            items
                .into_iter()
                .map(|s| Self::Scalar(s.to_string()))
                .collect(),
        )
    }

    /// Child nodes, or `None` for a scalar.
    pub fn as_list(&self) -> Option<&[PosTokens]> {
        match self {
            Self::List(v) => Some(v),
            Self::Scalar(_) => None,
        }
    }

    /// Scalar text, or `None` for a list.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Return `true` when this node is a list whose every child is a scalar.
    pub fn is_flat_list(&self) -> bool {
        self.as_list()
            .is_some_and(|v| v.iter().all(|t| matches!(t, Self::Scalar(_))))
    }

    /// Nesting depth along the first child: scalar = 0, `[1]` = 1, `[[1]]` = 2.
    pub fn leading_depth(&self) -> usize {
        match self {
            Self::Scalar(_) => 0,
            Self::List(v) => 1 + v.first().map_or(0, Self::leading_depth),
        }
    }

    /// Convert a JSON value. Numbers and strings become scalars; arrays become lists.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, String> {
        match value {
            serde_json::Value::String(s) => Ok(Self::Scalar(s.clone())),
            serde_json::Value::Number(n) => Ok(Self::Scalar(n.to_string())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            other => Err(format!(
                "position tokens must be numbers, strings or arrays, got {other}"
            )),
        }
    }
}

impl From<&str> for PosTokens {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_owned())
    }
}

impl From<i32> for PosTokens {
    fn from(v: i32) -> Self {
        Self::Scalar(v.to_string())
    }
}

impl<'de> Deserialize<'de> for PosTokens {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

impl Serialize for PosTokens {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(s) => match s.parse::<i64>() {
                Ok(v) => serializer.serialize_i64(v),
                Err(_) => serializer.serialize_str(s),
            },
            Self::List(v) => v.serialize(serializer),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/tokens.rs"]
mod tests;
