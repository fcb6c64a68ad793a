//! Raw minute values as they arrive from forms and API payloads.

use serde::{Deserialize, Serialize};

/// A break-minutes field before normalization.
///
/// The backend and the forms send the same quantity as a JSON number, an
/// `H:MM` string, an `H:MM:SS` string, an ISO-8601 duration or a numeric
/// string. `null` is represented by the surrounding `Option`.
///
/// # Example
///
/// ```
/// use kintai_core::models::MinutesValue;
///
/// let number: MinutesValue = serde_json::from_str("45").unwrap();
/// let text: MinutesValue = serde_json::from_str("\"PT1H\"").unwrap();
/// assert_eq!(number, MinutesValue::Number(45.0));
/// assert_eq!(text, MinutesValue::Text("PT1H".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MinutesValue {
    /// A numeric minute count, possibly fractional.
    Number(f64),
    /// A textual encoding.
    Text(String),
}

impl From<f64> for MinutesValue {
    fn from(value: f64) -> Self {
        MinutesValue::Number(value)
    }
}

impl From<i64> for MinutesValue {
    fn from(value: i64) -> Self {
        MinutesValue::Number(value as f64)
    }
}

impl From<&str> for MinutesValue {
    fn from(value: &str) -> Self {
        MinutesValue::Text(value.to_string())
    }
}

impl From<String> for MinutesValue {
    fn from(value: String) -> Self {
        MinutesValue::Text(value)
    }
}
