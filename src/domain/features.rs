// src/domain/features.rs

use serde_json::{Map, Value};
use thiserror::Error;

/// Column order the model was fitted with.
pub const FEATURES: [&str; 7] = [
    "bedrooms",
    "bathrooms",
    "sqft_living",
    "sqft_lot",
    "floors",
    "waterfront",
    "condition",
];

#[derive(Debug, Error, PartialEq)]
pub enum FeatureError {
    #[error("Missing required keys: {}", quoted_list(.0))]
    Missing(Vec<&'static str>),
    #[error("invalid integer value for '{feature}': {value}")]
    NotAnInteger { feature: &'static str, value: String },
    #[error("value for '{feature}' is out of integer range: {value}")]
    OutOfRange { feature: &'static str, value: String },
    #[error("value for '{feature}' must be a string or a number, not {kind}")]
    Unsupported {
        feature: &'static str,
        kind: &'static str,
    },
}

/// Renders `['a', 'b']`, the format clients already parse.
fn quoted_list(keys: &[&'static str]) -> String {
    let inner = keys
        .iter()
        .map(|k| format!("'{k}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{inner}]")
}

/// One house, as handed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureRecord {
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub sqft_living: i64,
    pub sqft_lot: i64,
    pub floors: i64,
    pub waterfront: i64,
    pub condition: i64,
}

impl FeatureRecord {
    /// Builds a record from a decoded request body.
    ///
    /// Presence of every key is checked before any value is coerced, so a
    /// request that is both incomplete and malformed reports the missing keys.
    pub fn from_json(body: &Value) -> Result<Self, FeatureError> {
        let empty = Map::new();
        let fields = body.as_object().unwrap_or(&empty);

        let missing: Vec<&'static str> = FEATURES
            .iter()
            .copied()
            .filter(|key| !fields.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(FeatureError::Missing(missing));
        }

        let mut values = [0i64; FEATURES.len()];
        for (slot, key) in values.iter_mut().zip(FEATURES) {
            *slot = coerce_int(key, &fields[key])?;
        }
        Ok(Self::from_values(values))
    }

    pub fn from_values(values: [i64; 7]) -> Self {
        let [bedrooms, bathrooms, sqft_living, sqft_lot, floors, waterfront, condition] = values;
        Self {
            bedrooms,
            bathrooms,
            sqft_living,
            sqft_lot,
            floors,
            waterfront,
            condition,
        }
    }

    /// Values in `FEATURES` order.
    pub fn values(&self) -> [i64; 7] {
        [
            self.bedrooms,
            self.bathrooms,
            self.sqft_living,
            self.sqft_lot,
            self.floors,
            self.waterfront,
            self.condition,
        ]
    }
}

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// Coerce a JSON value to an integer.
///
/// Floats truncate toward zero, booleans map to 1/0 and strings are parsed as
/// base-10 integers after trimming whitespace.
pub fn coerce_int(feature: &'static str, value: &Value) -> Result<i64, FeatureError> {
    match value {
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            if n.is_u64() {
                return Err(FeatureError::OutOfRange {
                    feature,
                    value: n.to_string(),
                });
            }
            let truncated = n.as_f64().unwrap_or(f64::NAN).trunc();
            // i64::MAX is not representable as f64; compare against 2^63.
            if !truncated.is_finite() || truncated < -TWO_POW_63 || truncated >= TWO_POW_63 {
                return Err(FeatureError::OutOfRange {
                    feature,
                    value: n.to_string(),
                });
            }
            Ok(truncated as i64)
        }
        Value::String(s) => parse_int_literal(feature, s),
        Value::Null => Err(FeatureError::Unsupported { feature, kind: "null" }),
        Value::Array(_) => Err(FeatureError::Unsupported { feature, kind: "an array" }),
        Value::Object(_) => Err(FeatureError::Unsupported { feature, kind: "an object" }),
    }
}

fn parse_int_literal(feature: &'static str, raw: &str) -> Result<i64, FeatureError> {
    let invalid = || FeatureError::NotAnInteger {
        feature,
        value: format!("{raw:?}"),
    };

    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    // Underscores may only separate digits: no leading, trailing or doubled ones.
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
        || !digits.bytes().all(|b| b.is_ascii_digit() || b == b'_')
    {
        return Err(invalid());
    }

    let mut cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if negative {
        cleaned.insert(0, '-');
    }
    cleaned.parse::<i64>().map_err(|_| FeatureError::OutOfRange {
        feature,
        value: format!("{raw:?}"),
    })
}
