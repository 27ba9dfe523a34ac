//! Polars AnyValue utility functions.

use polars::prelude::*;
use rdc_model::RawValue;

/// Converts a Polars `AnyValue` into a tagged raw cell.
///
/// Nulls and blank strings become `Absent`, numeric dtypes become `Numeric`,
/// and everything else is rendered as text.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use rdc_common::any_to_raw;
/// use rdc_model::RawValue;
///
/// assert_eq!(any_to_raw(AnyValue::Null), RawValue::Absent);
/// assert_eq!(any_to_raw(AnyValue::Int64(7)), RawValue::Numeric(7.0));
/// assert_eq!(any_to_raw(AnyValue::String("  ")), RawValue::Absent);
/// ```
pub fn any_to_raw(value: AnyValue<'_>) -> RawValue {
    match value {
        AnyValue::Null => RawValue::Absent,
        AnyValue::Int8(v) => RawValue::Numeric(f64::from(v)),
        AnyValue::Int16(v) => RawValue::Numeric(f64::from(v)),
        AnyValue::Int32(v) => RawValue::Numeric(f64::from(v)),
        AnyValue::Int64(v) => RawValue::Numeric(v as f64),
        AnyValue::UInt8(v) => RawValue::Numeric(f64::from(v)),
        AnyValue::UInt16(v) => RawValue::Numeric(f64::from(v)),
        AnyValue::UInt32(v) => RawValue::Numeric(f64::from(v)),
        AnyValue::UInt64(v) => RawValue::Numeric(v as f64),
        AnyValue::Float32(v) => RawValue::Numeric(f64::from(v)),
        AnyValue::Float64(v) => RawValue::Numeric(v),
        AnyValue::String(s) => RawValue::text(s),
        AnyValue::StringOwned(s) => RawValue::text(s.as_str()),
        other => RawValue::text(other.to_string()),
    }
}

/// Converts a Polars `AnyValue` to a `String`; empty for `Null`.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Reads every cell of a column as a raw value.
pub fn column_raw_values(column: &Column) -> PolarsResult<Vec<RawValue>> {
    let mut values = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        values.push(any_to_raw(column.get(idx)?));
    }
    Ok(values)
}

/// Formats a floating-point number without trailing zeros.
///
/// ```
/// use rdc_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(0.5), "0.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
