//! Scalar code values and their kind tags.
//!
//! Every code in a coding carries one [`Value`]. Within a coding all
//! non-missing values must belong to the same kind family; integers and
//! floats form a single numeric family.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar code value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Whole number.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Text value.
    String(String),
    /// Logical value.
    Boolean(bool),
    /// Missing/unknown sentinel (`NA`).
    Missing,
}

/// Kind tag for a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValueKind {
    Integer,
    Float,
    String,
    Boolean,
    Missing,
}

impl ValueKind {
    /// Returns the display name used in error messages.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "numeric",
            Self::String => "character",
            Self::Boolean => "logical",
            Self::Missing => "missing",
        }
    }

    /// Returns true for integer and float kinds.
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Returns true if values of both kinds may share a coding.
    pub fn is_compatible_with(&self, other: ValueKind) -> bool {
        *self == other || (self.is_numeric() && other.is_numeric())
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Returns the kind tag of this value.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Missing => ValueKind::Missing,
        }
    }

    /// Returns true for the missing sentinel.
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Returns the numeric magnitude for integer and float values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the text for string values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the flag for boolean values.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Renders this value as a literal of the textual coding syntax.
    ///
    /// Integers are widened to the generic numeric form so the literal carries
    /// no type suffix. Integers a float cannot hold exactly keep the `L`
    /// suffix instead.
    pub fn to_literal(&self) -> String {
        match self {
            Self::Integer(v) if float_equals_integer(*v as f64, *v) => format_number(*v as f64),
            Self::Integer(v) => format!("{v}L"),
            Self::Float(v) => format_number(*v),
            Self::String(s) => quote_string(s),
            Self::Boolean(true) => "TRUE".to_string(),
            Self::Boolean(false) => "FALSE".to_string(),
            Self::Missing => "NA".to_string(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Missing, Self::Missing) => true,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::Integer(i), Self::Float(f)) | (Self::Float(f), Self::Integer(i)) => {
                float_equals_integer(*f, *i)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    /// Human-facing form: strings unquoted, missing shown as `NA`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            other => f.write_str(&other.to_literal()),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Missing, Into::into)
    }
}

/// Exact comparison: true only if `f` is integral, within `i64` range, and
/// equal to `i`.
fn float_equals_integer(f: f64, i: i64) -> bool {
    // 2^63; `i64::MAX as f64` rounds up to it.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) && f as i64 == i
}

/// Formats a number in the shortest form that reads back to the same value.
fn format_number(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        let inf = if v > 0.0 { "Inf" } else { "-Inf" };
        inf.to_string()
    } else {
        format!("{v}")
    }
}

/// Double-quotes a string, escaping anything that would break a single line.
pub(crate) fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_values_compare_by_magnitude() {
        assert_eq!(Value::Integer(1), Value::Float(1.0));
        assert_ne!(Value::Integer(1), Value::Float(1.5));
        assert_ne!(Value::Integer(1), Value::from("1"));
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    }

    #[test]
    fn integer_float_equality_is_exact() {
        let big = 1_i64 << 53;
        assert_eq!(Value::Integer(big), Value::Float(big as f64));
        assert_ne!(Value::Integer(big + 1), Value::Float(big as f64));
        assert_ne!(Value::Integer(big + 1), Value::Integer(big));
        assert_ne!(Value::Integer(i64::MAX), Value::Float(i64::MAX as f64));
        assert_eq!(Value::Integer(i64::MIN), Value::Float(i64::MIN as f64));
        assert_ne!(Value::Integer(1), Value::Float(f64::NAN));
        assert_ne!(Value::Integer(0), Value::Float(f64::INFINITY));
    }

    #[test]
    fn unwidenable_integers_keep_suffix() {
        assert_eq!(Value::Integer(1 << 53).to_literal(), "9007199254740992");
        assert_eq!(Value::Integer((1 << 53) + 1).to_literal(), "9007199254740993L");
        assert_eq!(Value::Integer(i64::MAX).to_literal(), "9223372036854775807L");
        assert_eq!(Value::Integer(i64::MIN).to_literal(), "-9223372036854775808");
    }

    #[test]
    fn literal_forms() {
        assert_eq!(Value::Integer(3).to_literal(), "3");
        assert_eq!(Value::Float(0.25).to_literal(), "0.25");
        assert_eq!(Value::Float(-2.0).to_literal(), "-2");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_literal(), "-Inf");
        assert_eq!(Value::Boolean(true).to_literal(), "TRUE");
        assert_eq!(Value::Missing.to_literal(), "NA");
        assert_eq!(
            Value::from("say \"hi\"\nthen\\go").to_literal(),
            r#""say \"hi\"\nthen\\go""#
        );
    }

    #[test]
    fn option_maps_none_to_missing() {
        assert_eq!(Value::from(None::<i32>), Value::Missing);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn kind_compatibility() {
        assert!(ValueKind::Integer.is_compatible_with(ValueKind::Float));
        assert!(!ValueKind::Integer.is_compatible_with(ValueKind::String));
        assert!(ValueKind::Boolean.is_compatible_with(ValueKind::Boolean));
    }
}
