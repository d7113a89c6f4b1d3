//! Loose conversion of untyped edit payloads and imported YAML into typed record fields.

use crate::errors::CoerceError;

/// The shape of an untyped value, independent of whether it came from JSON or YAML.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Missing,
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(&'a str),
    Nested,
}

impl<'a> From<Option<&'a serde_json::Value>> for Scalar<'a> {
    fn from(value: Option<&'a serde_json::Value>) -> Self {
        use serde_json::Value;
        match value {
            None => Scalar::Missing,
            Some(Value::Null) => Scalar::Null,
            Some(Value::Bool(b)) => Scalar::Bool(*b),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => Scalar::Integer(i),
                None => n.as_f64().map_or(Scalar::Nested, Scalar::Number),
            },
            Some(Value::String(s)) => Scalar::Text(s),
            Some(Value::Array(_) | Value::Object(_)) => Scalar::Nested,
        }
    }
}

impl<'a> From<Option<&'a serde_yaml::Value>> for Scalar<'a> {
    fn from(value: Option<&'a serde_yaml::Value>) -> Self {
        use serde_yaml::Value;
        match value {
            None => Scalar::Missing,
            Some(Value::Null) => Scalar::Null,
            Some(Value::Bool(b)) => Scalar::Bool(*b),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => Scalar::Integer(i),
                None => n.as_f64().map_or(Scalar::Nested, Scalar::Number),
            },
            Some(Value::String(s)) => Scalar::Text(s),
            Some(Value::Tagged(tagged)) => Scalar::from(Some(&tagged.value)),
            Some(Value::Sequence(_) | Value::Mapping(_)) => Scalar::Nested,
        }
    }
}

impl Scalar<'_> {
    fn describe(&self) -> String {
        match self {
            Scalar::Missing => "nothing".to_string(),
            Scalar::Null => "null".to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Integer(i) => i.to_string(),
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => format!("{s:?}"),
            Scalar::Nested => "a list or mapping".to_string(),
        }
    }
}

/// Blank or null means unrated. No range check here; out-of-range values are
/// reported by the aggregator.
pub fn scale(value: Scalar<'_>) -> Result<Option<i64>, CoerceError> {
    let number = match value {
        Scalar::Missing | Scalar::Null => return Ok(None),
        Scalar::Text(s) if s.trim().is_empty() => return Ok(None),
        Scalar::Integer(i) => return Ok(Some(i)),
        Scalar::Text(s) => match s.trim().parse::<i64>() {
            Ok(i) => return Ok(Some(i)),
            Err(_) => s.trim().parse::<f64>().ok(),
        },
        Scalar::Number(n) => Some(n),
        Scalar::Bool(_) | Scalar::Nested => None,
    };

    match number {
        Some(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
            Ok(Some(n as i64))
        }
        _ => Err(CoerceError::Scale(value.describe())),
    }
}

/// Never fails: values that are not finite numbers become NaN and drop out of
/// aggregation.
pub fn importance(value: Scalar<'_>) -> f64 {
    let number = match value {
        Scalar::Missing | Scalar::Null => 0.0,
        Scalar::Bool(b) => f64::from(u8::from(b)),
        Scalar::Integer(i) => i as f64,
        Scalar::Number(n) => n,
        Scalar::Text(s) if s.trim().is_empty() => 0.0,
        Scalar::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
        Scalar::Nested => f64::NAN,
    };
    if number.is_finite() { number } else { f64::NAN }
}

pub fn activity(value: Scalar<'_>) -> Result<String, CoerceError> {
    match value {
        Scalar::Missing | Scalar::Null => Ok(String::new()),
        Scalar::Text(s) => Ok(s.to_string()),
        Scalar::Bool(b) => Ok(b.to_string()),
        Scalar::Integer(i) => Ok(i.to_string()),
        Scalar::Number(n) => Ok(n.to_string()),
        Scalar::Nested => Err(CoerceError::Activity(value.describe())),
    }
}
