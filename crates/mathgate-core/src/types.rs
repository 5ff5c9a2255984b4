//! Operation inputs as they arrive on the wire and the results returned for them

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// An operand before numeric validation
///
/// Query parameters always arrive as text; JSON bodies may carry numbers,
/// numeric strings, or values of the wrong type entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum RawOperand {
    /// The input was not supplied
    Missing,
    /// A JSON number
    Number(f64),
    /// Text to be parsed as a floating-point number
    Text(String),
    /// Any other JSON value (bool, array, object)
    Other,
}

impl RawOperand {
    /// Parse into a finite number.
    ///
    /// Text is trimmed and must parse completely; `NaN` and infinities are
    /// rejected along with everything that is not numeric.
    pub fn to_finite(&self) -> Option<f64> {
        let value = match self {
            RawOperand::Number(n) => *n,
            RawOperand::Text(s) => s.trim().parse::<f64>().ok()?,
            RawOperand::Missing | RawOperand::Other => return None,
        };

        value.is_finite().then_some(value)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RawOperand::Missing)
    }
}

impl From<Option<String>> for RawOperand {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(text) => RawOperand::Text(text),
            None => RawOperand::Missing,
        }
    }
}

impl From<&serde_json::Value> for RawOperand {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawOperand::Missing,
            serde_json::Value::Number(n) => n.as_f64().map_or(RawOperand::Other, RawOperand::Number),
            serde_json::Value::String(s) => RawOperand::Text(s.clone()),
            _ => RawOperand::Other,
        }
    }
}

impl From<Option<&serde_json::Value>> for RawOperand {
    fn from(value: Option<&serde_json::Value>) -> Self {
        value.map_or(RawOperand::Missing, RawOperand::from)
    }
}

/// Echo of the two scalar operands
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Operands {
    pub a: f64,
    pub b: f64,
}

/// Result of a binary scalar operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryOutcome {
    /// Operation name as supplied by the caller
    pub operation: String,
    pub operands: Operands,
    pub result: f64,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Result of an aggregate over a sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateOutcome {
    /// Operation name as supplied by the caller
    pub operation: String,
    /// The validated sequence, in request order
    pub numbers: Vec<f64>,
    pub result: f64,
    pub count: usize,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Result of base^exponent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerOutcome {
    pub operation: &'static str,
    pub base: f64,
    pub exponent: f64,
    pub result: f64,
    /// `"<base>^<exponent>"`
    pub expression: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Result of n!
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorialOutcome {
    pub operation: &'static str,
    pub input: u32,
    pub result: f64,
    /// `"<n>!"`
    pub expression: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`
pub fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_text_operand_parsing() {
        assert_eq!(RawOperand::Text("5".into()).to_finite(), Some(5.0));
        assert_eq!(RawOperand::Text(" -2.5 ".into()).to_finite(), Some(-2.5));
        assert_eq!(RawOperand::Text("1e3".into()).to_finite(), Some(1000.0));
        assert_eq!(RawOperand::Text("abc".into()).to_finite(), None);
        assert_eq!(RawOperand::Text("5abc".into()).to_finite(), None);
        assert_eq!(RawOperand::Text("".into()).to_finite(), None);
    }

    #[test]
    fn test_non_finite_text_rejected() {
        assert_eq!(RawOperand::Text("NaN".into()).to_finite(), None);
        assert_eq!(RawOperand::Text("inf".into()).to_finite(), None);
        assert_eq!(RawOperand::Text("-Infinity".into()).to_finite(), None);
    }

    #[test]
    fn test_json_operands() {
        let json = serde_json::json!({"n": 2, "s": "3.5", "b": true, "z": null});
        assert_eq!(RawOperand::from(json.get("n")).to_finite(), Some(2.0));
        assert_eq!(RawOperand::from(json.get("s")).to_finite(), Some(3.5));
        assert_eq!(RawOperand::from(json.get("b")), RawOperand::Other);
        assert!(RawOperand::from(json.get("z")).is_missing());
        assert!(RawOperand::from(json.get("absent")).is_missing());
    }

    #[test]
    fn test_timestamp_format() {
        let outcome = FactorialOutcome {
            operation: "factorial",
            input: 3,
            result: 6.0,
            expression: "3!".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["timestamp"], "2024-05-01T12:00:00.000Z");
        assert_eq!(json["expression"], "3!");
    }
}
