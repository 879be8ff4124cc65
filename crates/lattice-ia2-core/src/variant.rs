//! Dynamically typed values exchanged with value facets.

use std::fmt;

/// A dynamically typed value.
///
/// This is the provider-side counterpart of the protocol's `VARIANT`. Only
/// the shapes that value facets actually produce are represented.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Variant {
    /// No value.
    #[default]
    Empty,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Double(f64),
    /// A string.
    String(String),
}

impl Variant {
    /// Whether this is [`Variant::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Coerce to `f64` the way `VariantChangeType(VT_R8)` does.
    ///
    /// Booleans become `-1.0`/`0.0` (VARIANT_TRUE is -1); strings must parse
    /// as a number. Returns `None` for [`Variant::Empty`] and unparsable
    /// strings.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Empty => None,
            Self::Bool(b) => Some(if *b { -1.0 } else { 0.0 }),
            Self::Int(i) => Some(*i as f64),
            Self::Double(d) => Some(*d),
            Self::String(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Variant {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<i64> for Variant {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Variant {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
