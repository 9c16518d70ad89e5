//! Parameter values and the coercion rules for raw edits.
//!
//! The canvas does not know what a parameter means. It only decides how a
//! raw string typed into a node's inline editor is stored:
//!
//! 1. names in the shape-like category (containing `Shape`) become numeric
//!    sequences, split on commas, with non-numeric tokens dropped;
//! 2. a string that is entirely numeric becomes a number;
//! 3. `true`/`false` stay flags when the parameter already holds a flag;
//! 4. anything else is stored verbatim as text.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Parameter bag of a node, keyed by parameter name.
pub type Parameters = BTreeMap<String, ParamValue>;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Number(f64),
    Text(String),
    Sequence(Vec<f64>),
}

impl ParamValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[f64]> {
        match self {
            ParamValue::Sequence(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ParamValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    /// Renders the value the way an inline editor shows it; sequences are
    /// comma-separated so the text round-trips through [`coerce_raw`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Flag(flag) => write!(f, "{}", flag),
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Text(text) => f.write_str(text),
            ParamValue::Sequence(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                f.write_str(&parts.join(", "))
            }
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Flag(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<Vec<f64>> for ParamValue {
    fn from(values: Vec<f64>) -> Self {
        ParamValue::Sequence(values)
    }
}

/// Whether a parameter name belongs to the shape-like category.
pub fn is_shape_like(name: &str) -> bool {
    name.contains("Shape")
}

/// Parse `raw` as a finite number, ignoring surrounding whitespace.
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerce a raw edit for parameter `name`.
///
/// `current` is the value the parameter holds before the edit, if any.
pub fn coerce_raw(name: &str, raw: &str, current: Option<&ParamValue>) -> ParamValue {
    if is_shape_like(name) {
        return ParamValue::Sequence(raw.split(',').filter_map(parse_number).collect());
    }
    if let Some(n) = parse_number(raw) {
        return ParamValue::Number(n);
    }
    if matches!(current, Some(ParamValue::Flag(_))) {
        match raw.trim() {
            "true" => return ParamValue::Flag(true),
            "false" => return ParamValue::Flag(false),
            _ => {}
        }
    }
    ParamValue::Text(raw.to_string())
}
