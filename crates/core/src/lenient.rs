//! Tolerant deserializers for documents written by the model.
//!
//! The model is asked for a schema but does not always honour it: numbers
//! arrive as strings, lists as a single string, records as bare names. Each
//! helper here reads the raw JSON value and coerces it, falling back to the
//! field's empty value instead of failing the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Any scalar as text. Nested values keep their JSON form.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(value_to_text))
}

/// [`text`] for fields that are plain strings, empty when absent.
pub fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.unwrap_or_default())
}

/// An integer, a float (truncated) or a numeric string.
pub fn ordinal<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|n| i32::try_from(n).ok()),
        Some(Value::String(s)) => leading_number(&s).and_then(|f| i32::try_from(f as i64).ok()),
        _ => None,
    })
}

/// `true`, `"yes"`, `"true"` or a non-zero number.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        _ => false,
    })
}

/// A list of strings, or a single string taken as a one-item list.
pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.into_iter().filter_map(value_to_text).collect(),
        Some(other) => value_to_text(other).into_iter().collect(),
        None => Vec::new(),
    })
}

/// A list of records where each entry may also be a bare string.
///
/// The result always has one element per array entry, so counts taken on it
/// match the array the model wrote.
pub fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + From<String> + Default,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(items_from_value).unwrap_or_default())
}

/// [`items`] over an already parsed value. Non-array values give no items.
pub fn items_from_value<T>(value: Value) -> Vec<T>
where
    T: DeserializeOwned + From<String> + Default,
{
    match value {
        Value::Array(entries) => entries.into_iter().map(item_from_value).collect(),
        _ => Vec::new(),
    }
}

fn item_from_value<T>(value: Value) -> T
where
    T: DeserializeOwned + From<String> + Default,
{
    match value {
        Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
        Value::Null => T::default(),
        other => value_to_text(other).map(T::from).unwrap_or_default(),
    }
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        nested => Some(nested.to_string()),
    }
}

/// Parse the number a string starts with: `"7/10"` is 7, `" 3.5 pts"` is 3.5.
pub fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map_or(s.len(), |(i, _)| i);
    s[..end].parse().ok()
}
