//! Raw cell values and per-field cleaning outcomes.

use serde::{Deserialize, Serialize};

/// A single untyped cell from a raw batch.
///
/// Structured sources (JSON, typed columns) can hand over numbers directly;
/// everything else arrives as text. Nulls and blank strings are `Absent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum RawValue {
    Absent,
    Numeric(f64),
    Text(String),
}

impl RawValue {
    /// Build a text value, folding blank strings into `Absent`.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Self::Absent
        } else {
            Self::Text(value)
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Borrow the text payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render the value as text the way a string column would hold it.
    ///
    /// Integral numbers render without a fractional part (`42.0` -> `"42"`).
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Absent => None,
            Self::Text(s) => Some(s.clone()),
            Self::Numeric(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                Some(format!("{}", *v as i64))
            }
            Self::Numeric(v) => Some(v.to_string()),
        }
    }

    /// Character length of the textual form, `None` when absent.
    pub fn char_len(&self) -> Option<usize> {
        self.to_text().map(|s| s.chars().count())
    }
}

/// Result of normalizing one field of one record.
///
/// `Absent` and `Invalid` both end up as a null cell, but callers and reports
/// can tell a missing field apart from one that failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome<T> {
    Absent,
    Invalid,
    Value(T),
}

impl<T> FieldOutcome<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldOutcome<U> {
        match self {
            Self::Absent => FieldOutcome::Absent,
            Self::Invalid => FieldOutcome::Invalid,
            Self::Value(v) => FieldOutcome::Value(f(v)),
        }
    }
}

impl<T> From<Option<T>> for FieldOutcome<T> {
    /// `None` means the value was present but could not be used.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::Invalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(RawValue::text("   "), RawValue::Absent);
        assert_eq!(RawValue::text("x"), RawValue::Text("x".into()));
    }

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(RawValue::Numeric(123.0).to_text().as_deref(), Some("123"));
        assert_eq!(RawValue::Numeric(1.5).to_text().as_deref(), Some("1.5"));
        assert_eq!(RawValue::Absent.to_text(), None);
    }

    #[test]
    fn char_len_counts_characters() {
        assert_eq!(RawValue::text("12/25").char_len(), Some(5));
        assert_eq!(RawValue::Absent.char_len(), None);
    }

    #[test]
    fn outcome_from_option() {
        assert_eq!(FieldOutcome::from(Some(1)), FieldOutcome::Value(1));
        assert!(FieldOutcome::<i32>::from(None).is_invalid());
    }
}
