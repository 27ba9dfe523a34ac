//! Categorical value repair and validation.

use rdc_model::{CategoryRule, FieldOutcome, RawValue};

/// Apply the literal correction for `raw` (if any), then require exact
/// membership in the valid set.
///
/// ```
/// use rdc_model::CategoryRule;
/// use rdc_normalization::resolve_category;
///
/// let rule = CategoryRule::new(["Europe", "America"]).with_correction("Eeurope", "Europe");
/// assert_eq!(resolve_category(&rule, "Eeurope").as_deref(), Some("Europe"));
/// assert_eq!(resolve_category(&rule, "Mars"), None);
/// ```
pub fn resolve_category(rule: &CategoryRule, raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let corrected = rule.correction(trimmed).unwrap_or(trimmed);
    rule.is_valid(corrected).then(|| corrected.to_string())
}

/// Normalize one raw categorical cell.
pub fn normalize_category(rule: &CategoryRule, value: &RawValue) -> FieldOutcome<String> {
    match value.to_text() {
        None => FieldOutcome::Absent,
        Some(text) => resolve_category(rule, &text).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn continents() -> CategoryRule {
        CategoryRule::new(["Europe", "America"])
            .with_correction("eeEurope", "Europe")
            .with_correction("eeAmerica", "America")
    }

    #[test]
    fn test_valid_values_pass_unchanged() {
        assert_eq!(resolve_category(&continents(), "America").as_deref(), Some("America"));
        assert_eq!(resolve_category(&continents(), " Europe ").as_deref(), Some("Europe"));
    }

    #[test]
    fn test_corrections() {
        assert_eq!(resolve_category(&continents(), "eeAmerica").as_deref(), Some("America"));
    }

    #[test]
    fn test_no_fuzzy_matching() {
        assert_eq!(resolve_category(&continents(), "europe"), None);
        assert_eq!(resolve_category(&continents(), "Europa"), None);
        assert_eq!(resolve_category(&continents(), "QMAVR5H3LD"), None);
    }

    #[test]
    fn test_absent() {
        assert_eq!(normalize_category(&continents(), &RawValue::Absent), FieldOutcome::Absent);
        assert!(normalize_category(&continents(), &RawValue::text("Mars")).is_invalid());
    }
}
