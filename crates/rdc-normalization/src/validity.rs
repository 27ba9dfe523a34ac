//! Row-shape predicates.
//!
//! These decide whether a record survives; they never change a value.

use rdc_model::{FieldRule, RawValue};

/// Whether `value` satisfies a row-shape rule. Rules that are not row-shape
/// checks always pass. Absent values fail length checks.
pub fn row_passes(rule: &FieldRule, value: &RawValue) -> bool {
    match rule {
        FieldRule::ExactLength(len) => value.char_len() == Some(*len),
        FieldRule::MaxLength(max) => value.char_len().is_some_and(|len| len <= *max),
        FieldRule::RejectLiteral(literal) => value.to_text().as_deref() != Some(literal.as_str()),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_length() {
        let rule = FieldRule::ExactLength(5);
        assert!(row_passes(&rule, &RawValue::text("12/25")));
        assert!(!row_passes(&rule, &RawValue::text("NB71VBAHJE")));
        assert!(!row_passes(&rule, &RawValue::Absent));
    }

    #[test]
    fn test_max_length() {
        let rule = FieldRule::MaxLength(2);
        assert!(row_passes(&rule, &RawValue::text("9")));
        assert!(row_passes(&rule, &RawValue::Numeric(12.0)));
        assert!(!row_passes(&rule, &RawValue::text("NULL")));
        assert!(!row_passes(&rule, &RawValue::Absent));
    }

    #[test]
    fn test_reject_literal() {
        let rule = FieldRule::RejectLiteral("NULL".to_string());
        assert!(!row_passes(&rule, &RawValue::text("NULL")));
        assert!(row_passes(&rule, &RawValue::text("4971858637664481")));
        assert!(row_passes(&rule, &RawValue::Absent));
    }

    #[test]
    fn test_non_shape_rules_pass() {
        assert!(row_passes(&FieldRule::Weight, &RawValue::Absent));
    }
}
