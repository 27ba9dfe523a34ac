//! Phone number normalization.
//!
//! Numbers are reduced to their national significant digits. The decision to
//! re-add a leading `0` uses only the record's own country code and digits.

use rdc_model::{CleaningOptions, FieldOutcome, RawValue};

/// A normalized phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumber {
    /// Full national number, zero-prefixed where the country requires it.
    National(String),
    /// Fewer digits than a national number. Kept as stripped digits, or as
    /// the trimmed input when it holds no digits at all.
    Short(String),
}

impl PhoneNumber {
    pub fn as_str(&self) -> &str {
        match self {
            Self::National(s) | Self::Short(s) => s,
        }
    }

    pub fn is_short(&self) -> bool {
        matches!(self, Self::Short(_))
    }

    pub fn into_string(self) -> String {
        match self {
            Self::National(s) | Self::Short(s) => s,
        }
    }
}

/// Replace a known country code misspelling with the ISO code.
///
/// ```
/// use rdc_model::CleaningOptions;
/// use rdc_normalization::correct_country_code;
///
/// let options = CleaningOptions::default();
/// assert_eq!(correct_country_code("GGB", &options), "GB");
/// assert_eq!(correct_country_code("DE", &options), "DE");
/// ```
pub fn correct_country_code(code: &str, options: &CleaningOptions) -> String {
    let trimmed = code.trim();
    options
        .country_code_corrections
        .get(trimmed)
        .cloned()
        .unwrap_or_else(|| trimmed.to_string())
}

/// Cut an extension (`ext`, `x`) and everything after it.
fn strip_extension(raw: &str) -> &str {
    // ASCII lowercasing keeps byte offsets aligned with `raw`.
    let lower = raw.to_ascii_lowercase();
    match lower.find("ext").or_else(|| lower.find('x')) {
        Some(idx) => &raw[..idx],
        None => raw,
    }
}

/// Normalize one phone number for a record whose (corrected) country is
/// `country`.
///
/// Never fails: a value without enough digits comes back as
/// [`PhoneNumber::Short`].
pub fn normalize_phone(raw: &str, country: Option<&str>, options: &CleaningOptions) -> PhoneNumber {
    let digits: String = strip_extension(raw)
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return PhoneNumber::Short(raw.trim().to_string());
    }
    if digits.len() < options.phone_digits {
        return PhoneNumber::Short(digits);
    }

    let national = &digits[digits.len() - options.phone_digits..];
    let leading_zero = country.is_some_and(|code| options.leading_zero_countries.contains(code));
    if leading_zero {
        PhoneNumber::National(format!("0{national}"))
    } else {
        PhoneNumber::National(national.to_string())
    }
}

/// Normalize one raw phone cell.
pub fn normalize_phone_value(
    value: &RawValue,
    country: Option<&str>,
    options: &CleaningOptions,
) -> FieldOutcome<PhoneNumber> {
    match value.to_text() {
        None => FieldOutcome::Absent,
        Some(text) => FieldOutcome::Value(normalize_phone(&text, country, options)),
    }
}
