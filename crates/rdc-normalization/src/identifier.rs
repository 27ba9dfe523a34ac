//! Fixed-width numeric identifiers (EAN product codes and similar).

use rdc_model::{FieldOutcome, RawValue};

/// Left-pad with `0` to `width`, then keep the last `width` characters.
///
/// Over-long inputs are truncated from the left rather than rejected.
///
/// ```
/// use rdc_normalization::pad_identifier;
///
/// assert_eq!(pad_identifier("123", 13), "0000000000123");
/// assert_eq!(pad_identifier("123456789012345", 13), "3456789012345");
/// ```
pub fn pad_identifier(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        value.chars().skip(len - width).collect()
    } else {
        let mut padded = "0".repeat(width - len);
        padded.push_str(value);
        padded
    }
}

/// Normalize one raw identifier cell. Numbers are rendered as integers first.
///
/// Blank cells are absent, not empty identifiers, so they are never padded.
pub fn normalize_identifier(value: &RawValue, width: usize) -> FieldOutcome<String> {
    match value.to_text() {
        None => FieldOutcome::Absent,
        Some(text) => FieldOutcome::Value(pad_identifier(&text, width)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_width_unchanged() {
        assert_eq!(pad_identifier("1234567890123", 13), "1234567890123");
    }

    #[test]
    fn test_empty_pads_fully() {
        assert_eq!(pad_identifier("", 4), "0000");
    }

    #[test]
    fn test_numeric_raw_value() {
        assert_eq!(
            normalize_identifier(&RawValue::Numeric(123.0), 5),
            FieldOutcome::Value("00123".to_string())
        );
        assert_eq!(normalize_identifier(&RawValue::Absent, 5), FieldOutcome::Absent);
    }

    #[test]
    fn test_blank_cell_stays_absent() {
        assert_eq!(normalize_identifier(&RawValue::text("   "), 5), FieldOutcome::Absent);
    }
}
