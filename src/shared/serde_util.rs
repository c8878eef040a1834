//! Custom serde helpers for the API's loose JSON.
//!
//! The API is not strict about its own types: amounts arrive as strings or
//! numbers, and optional text fields arrive as `null`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_to_string<E: serde::de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(E::custom(format!("expected string or number, got {}", other))),
    }
}

/// Deserializes a string, number or `null` into a `String` (`null` becomes `""`).
pub mod lenient_string {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value_to_string::<D::Error>(value)?.unwrap_or_default())
    }
}

/// Deserializes a string, number or `null` into an `Option<String>`.
///
/// Empty strings become `None`.
pub mod lenient_opt_string {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value_to_string::<D::Error>(value)?.filter(|s| !s.is_empty()))
    }
}

/// Deserializes an integer that may also arrive as a numeric string or `null`.
pub mod lenient_i64 {
    use super::*;
    use serde::de::Error as _;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(0),
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| D::Error::custom(format!("integer out of range: {}", n))),
            Value::String(s) if s.trim().is_empty() => Ok(0),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| D::Error::custom(format!("invalid integer: {}", s))),
            other => Err(D::Error::custom(format!("expected integer, got {}", other))),
        }
    }
}
