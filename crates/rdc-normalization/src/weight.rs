//! Free-text weight parsing.
//!
//! Product weights arrive as strings such as `100g`, `3 x 100g`, `1.5kg`,
//! `400ml` or `16oz`. They are converted to kilograms rounded to one decimal.
//!
//! Unit markers are matched case-sensitively in priority order (kilogram,
//! gram/millilitre, ounce). A marker whose first occurrence is at the very
//! start of the string does not count.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use rdc_model::{FieldOutcome, RawValue};
use regex::Regex;

const OUNCES_PER_KILOGRAM: f64 = 35.274;

/// Unit of a parsed weight expression. Millilitres are treated as grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassUnit {
    Kilogram,
    Gram,
    Ounce,
}

impl MassUnit {
    pub fn to_kilograms(self, amount: f64) -> f64 {
        match self {
            Self::Kilogram => amount,
            Self::Gram => amount / 1000.0,
            Self::Ounce => amount / OUNCES_PER_KILOGRAM,
        }
    }
}

struct WeightPatterns {
    /// Units in priority order, each with its markers.
    units: Vec<(MassUnit, Vec<Regex>)>,
    number: Regex,
    multiplication: Regex,
}

impl WeightPatterns {
    fn instance() -> &'static Self {
        static PATTERNS: OnceLock<WeightPatterns> = OnceLock::new();
        PATTERNS.get_or_init(Self::compile)
    }

    fn compile() -> Self {
        let marker = |pattern: &str| Regex::new(pattern).expect("valid unit marker");
        Self {
            units: vec![
                (MassUnit::Kilogram, vec![marker("kg")]),
                (MassUnit::Gram, vec![marker("g"), marker("ml")]),
                (MassUnit::Ounce, vec![marker("oz")]),
            ],
            number: Regex::new(r"-?\d+\.?\d*").expect("valid number pattern"),
            multiplication: Regex::new(r"\d\s*[xX×]\s*\d").expect("valid multiplication pattern"),
        }
    }
}

/// Locate the unit of a weight expression.
///
/// ```
/// use rdc_normalization::{MassUnit, detect_unit};
///
/// assert_eq!(detect_unit("1.5kg"), Some(MassUnit::Kilogram));
/// assert_eq!(detect_unit("400ml"), Some(MassUnit::Gram));
/// assert_eq!(detect_unit("16oz"), Some(MassUnit::Ounce));
/// // A marker at position zero is ignored.
/// assert_eq!(detect_unit("g100"), None);
/// ```
pub fn detect_unit(value: &str) -> Option<MassUnit> {
    WeightPatterns::instance()
        .units
        .iter()
        .find(|(_, markers)| {
            markers
                .iter()
                .any(|marker| marker.find(value).is_some_and(|m| m.start() > 0))
        })
        .map(|(unit, _)| *unit)
}

/// Round half away from zero to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    // Avoid emitting -0.0 for tiny negative inputs.
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Parse a weight expression to kilograms with one decimal place.
///
/// `corrections` are literal substring replacements applied first.
pub fn parse_weight_kg(raw: &str, corrections: &BTreeMap<String, String>) -> Option<f64> {
    let mut value = raw.trim().to_string();
    for (from, to) in corrections {
        if !from.is_empty() && value.contains(from.as_str()) {
            value = value.replace(from.as_str(), to);
        }
    }
    if value.is_empty() {
        return None;
    }

    let patterns = WeightPatterns::instance();
    let Some(unit) = detect_unit(&value) else {
        // A bare number is already in kilograms.
        return value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(round_to_tenth);
    };

    let numbers: Vec<f64> = patterns
        .number
        .find_iter(&value)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect();
    let amount = match numbers.as_slice() {
        [first, second, ..] if patterns.multiplication.is_match(&value) => first * second,
        [first, ..] => *first,
        [] => return None,
    };

    let kilograms = unit.to_kilograms(amount);
    kilograms.is_finite().then(|| round_to_tenth(kilograms))
}

/// Normalize one raw weight cell.
///
/// Numbers from typed sources are treated as kilograms already, which keeps
/// the transform stable when run over its own output.
pub fn normalize_weight(
    value: &RawValue,
    corrections: &BTreeMap<String, String>,
) -> FieldOutcome<f64> {
    match value {
        RawValue::Absent => FieldOutcome::Absent,
        RawValue::Text(text) => parse_weight_kg(text, corrections).into(),
        RawValue::Numeric(v) if v.is_finite() => FieldOutcome::Value(round_to_tenth(*v)),
        RawValue::Numeric(_) => FieldOutcome::Invalid,
    }
}
