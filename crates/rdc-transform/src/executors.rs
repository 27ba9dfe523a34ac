//! Column executors.
//!
//! Each function lifts one field normalizer over a column of the batch and
//! returns what it did. Column names are resolved case-insensitively; when
//! the batch has no such column the executor returns `Ok(None)` and leaves
//! the batch untouched.
//!
//! Filters build a boolean mask and apply it in one pass, so surviving rows
//! keep their relative order.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use polars::prelude::{BooleanChunked, DataFrame, NamedFrom, NewChunkedArray, Series};
use rdc_common::{column_raw_values, format_numeric};
use rdc_model::{
    CaseInsensitiveSet, CategoryRule, CleaningOptions, DateOrder, FieldOutcome, FieldRule,
    RawValue,
};
use rdc_normalization::{
    correct_country_code, digits_only, format_iso_date, normalize_category, normalize_date,
    normalize_identifier, normalize_phone_value, normalize_weight, replace_literal, row_passes,
};
use tracing::{debug, trace};

use crate::error::Result;
use crate::report::StepCounts;

fn resolve_column(df: &DataFrame, field: &str) -> Option<String> {
    CaseInsensitiveSet::new(df.get_column_names_owned())
        .get(field)
        .map(str::to_string)
}

fn read_raw(df: &DataFrame, column: &str) -> Result<Vec<RawValue>> {
    Ok(column_raw_values(df.column(column)?)?)
}

/// Keep only rows whose mask entry is `true`. Returns the number removed.
fn retain_rows(df: &mut DataFrame, keep: &[bool]) -> Result<usize> {
    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped > 0 {
        let mask = BooleanChunked::from_slice("keep".into(), keep);
        *df = df.filter(&mask)?;
    }
    Ok(dropped)
}

fn set_string_column(df: &mut DataFrame, name: &str, values: Vec<Option<String>>) -> Result<()> {
    df.with_column(Series::new(name.into(), values))?;
    Ok(())
}

/// Whether the canonical text differs from what the cell held.
fn changed(raw: &RawValue, canonical: &str) -> bool {
    raw.to_text().as_deref() != Some(canonical)
}

/// Lift a per-value string normalizer over a column, writing a string column.
fn rewrite_text_column<F>(
    df: &mut DataFrame,
    field: &str,
    mut normalize: F,
) -> Result<Option<StepCounts>>
where
    F: FnMut(&RawValue) -> FieldOutcome<String>,
{
    let Some(column) = resolve_column(df, field) else {
        return Ok(None);
    };
    let raw = read_raw(df, &column)?;
    let mut counts = StepCounts::default();
    let mut values = Vec::with_capacity(raw.len());
    for value in &raw {
        match normalize(value) {
            FieldOutcome::Value(text) => {
                if changed(value, &text) {
                    counts.rewritten += 1;
                }
                values.push(Some(text));
            }
            FieldOutcome::Invalid => {
                counts.nulled += 1;
                values.push(None);
            }
            FieldOutcome::Absent => values.push(None),
        }
    }
    set_string_column(df, &column, values)?;
    Ok(Some(counts))
}

/// Drop rows that fail a row-shape rule (`ExactLength`, `MaxLength`,
/// `RejectLiteral`). Values are not modified.
pub fn filter_rows(
    df: &mut DataFrame,
    field: &str,
    rule: &FieldRule,
) -> Result<Option<StepCounts>> {
    let Some(column) = resolve_column(df, field) else {
        return Ok(None);
    };
    let keep: Vec<bool> = read_raw(df, &column)?
        .iter()
        .map(|value| row_passes(rule, value))
        .collect();
    let dropped = retain_rows(df, &keep)?;
    Ok(Some(StepCounts {
        dropped,
        ..StepCounts::default()
    }))
}

/// Replace a column with a `Date` column. Unparseable values become null;
/// rows are never dropped here.
pub fn apply_calendar_dates(
    df: &mut DataFrame,
    field: &str,
    order: DateOrder,
) -> Result<Option<StepCounts>> {
    let Some(column) = resolve_column(df, field) else {
        return Ok(None);
    };
    let raw = read_raw(df, &column)?;
    let mut counts = StepCounts::default();
    let mut dates: Vec<Option<NaiveDate>> = Vec::with_capacity(raw.len());
    for value in &raw {
        match normalize_date(value, order) {
            FieldOutcome::Value(date) => {
                if changed(value, &format_iso_date(date)) {
                    counts.rewritten += 1;
                }
                dates.push(Some(date));
            }
            FieldOutcome::Invalid => {
                trace!(column = %column, "unparseable date");
                counts.nulled += 1;
                dates.push(None);
            }
            FieldOutcome::Absent => dates.push(None),
        }
    }
    df.with_column(Series::new(column.as_str().into(), dates))?;
    Ok(Some(counts))
}

/// Normalize phone numbers using each row's own country code.
///
/// The country column is corrected first and written back; its
/// corrections count as rewrites. Short numbers are kept and flagged.
pub fn apply_phone_numbers(
    df: &mut DataFrame,
    field: &str,
    country_field: &str,
    options: &CleaningOptions,
) -> Result<Option<StepCounts>> {
    let Some(column) = resolve_column(df, field) else {
        return Ok(None);
    };
    let mut counts = StepCounts::default();

    let countries: Vec<Option<String>> = match resolve_column(df, country_field) {
        Some(country_column) => {
            let raw = read_raw(df, &country_column)?;
            let corrected: Vec<Option<String>> = raw
                .iter()
                .map(|value| {
                    value
                        .to_text()
                        .map(|code| correct_country_code(&code, options))
                })
                .collect();
            let fixed = raw
                .iter()
                .zip(&corrected)
                .filter(|(value, code)| code.as_deref().is_some_and(|code| changed(value, code)))
                .count();
            if fixed > 0 {
                debug!(column = %country_column, fixed, "corrected country codes");
                counts.rewritten += fixed;
                set_string_column(df, &country_column, corrected.clone())?;
            }
            corrected
        }
        None => vec![None; df.height()],
    };

    let raw = read_raw(df, &column)?;
    let mut values = Vec::with_capacity(raw.len());
    for (value, country) in raw.iter().zip(&countries) {
        match normalize_phone_value(value, country.as_deref(), options) {
            FieldOutcome::Value(phone) => {
                if phone.is_short() {
                    counts.flagged += 1;
                }
                if changed(value, phone.as_str()) {
                    counts.rewritten += 1;
                }
                values.push(Some(phone.into_string()));
            }
            FieldOutcome::Invalid => {
                counts.nulled += 1;
                values.push(None);
            }
            FieldOutcome::Absent => values.push(None),
        }
    }
    set_string_column(df, &column, values)?;
    Ok(Some(counts))
}

/// Replace a weight column with kilograms (`Float64`, one decimal).
pub fn apply_weights(
    df: &mut DataFrame,
    field: &str,
    corrections: &BTreeMap<String, String>,
) -> Result<Option<StepCounts>> {
    let Some(column) = resolve_column(df, field) else {
        return Ok(None);
    };
    let raw = read_raw(df, &column)?;
    let mut counts = StepCounts::default();
    let mut values: Vec<Option<f64>> = Vec::with_capacity(raw.len());
    for value in &raw {
        match normalize_weight(value, corrections) {
            FieldOutcome::Value(kg) => {
                if changed(value, &format_numeric(kg)) {
                    counts.rewritten += 1;
                }
                values.push(Some(kg));
            }
            FieldOutcome::Invalid => {
                trace!(column = %column, "unparseable weight");
                counts.nulled += 1;
                values.push(None);
            }
            FieldOutcome::Absent => values.push(None),
        }
    }
    df.with_column(Series::new(column.as_str().into(), values))?;
    Ok(Some(counts))
}

/// Left-pad and truncate identifiers to `width`.
pub fn apply_identifier_padding(
    df: &mut DataFrame,
    field: &str,
    width: usize,
) -> Result<Option<StepCounts>> {
    rewrite_text_column(df, field, |value| normalize_identifier(value, width))
}

/// Correct categorical values, then drop rows outside the valid set.
/// Absent values are not members and are dropped too.
pub fn apply_categorical_filter(
    df: &mut DataFrame,
    field: &str,
    rule: &CategoryRule,
) -> Result<Option<StepCounts>> {
    let Some(column) = resolve_column(df, field) else {
        return Ok(None);
    };
    let raw = read_raw(df, &column)?;
    let mut counts = StepCounts::default();
    let mut keep = Vec::with_capacity(raw.len());
    let mut values = Vec::with_capacity(raw.len());
    for value in &raw {
        match normalize_category(rule, value) {
            FieldOutcome::Value(category) => {
                if changed(value, &category) {
                    counts.rewritten += 1;
                }
                keep.push(true);
                values.push(Some(category));
            }
            FieldOutcome::Invalid | FieldOutcome::Absent => {
                keep.push(false);
                values.push(None);
            }
        }
    }
    set_string_column(df, &column, values)?;
    counts.dropped = retain_rows(df, &keep)?;
    Ok(Some(counts))
}

/// Replace every occurrence of `from` with `to`.
pub fn apply_literal_replace(
    df: &mut DataFrame,
    field: &str,
    from: &str,
    to: &str,
) -> Result<Option<StepCounts>> {
    rewrite_text_column(df, field, |value| match value.to_text() {
        None => FieldOutcome::Absent,
        Some(text) => {
            let replaced = replace_literal(&text, from, to);
            if replaced.is_empty() {
                FieldOutcome::Invalid
            } else {
                FieldOutcome::Value(replaced)
            }
        }
    })
}

/// Remove non-digit characters. Values with no digits at all become null.
pub fn apply_digits_only(df: &mut DataFrame, field: &str) -> Result<Option<StepCounts>> {
    rewrite_text_column(df, field, |value| match value.to_text() {
        None => FieldOutcome::Absent,
        Some(text) => {
            let digits = digits_only(&text);
            if digits.is_empty() {
                FieldOutcome::Invalid
            } else {
                FieldOutcome::Value(digits)
            }
        }
    })
}

/// Drop rows whose value is null after earlier stages.
pub fn require_non_null(df: &mut DataFrame, field: &str) -> Result<Option<StepCounts>> {
    let Some(column) = resolve_column(df, field) else {
        return Ok(None);
    };
    let keep: Vec<bool> = read_raw(df, &column)?
        .iter()
        .map(|value| !value.is_absent())
        .collect();
    let dropped = retain_rows(df, &keep)?;
    Ok(Some(StepCounts {
        dropped,
        ..StepCounts::default()
    }))
}

/// Remove the named columns. Returns the batch spellings that were present.
pub fn drop_columns(df: &mut DataFrame, names: &[String]) -> Result<Vec<String>> {
    let mut dropped = Vec::new();
    for name in names {
        if let Some(column) = resolve_column(df, name) {
            df.drop_in_place(&column)?;
            dropped.push(column);
        }
    }
    Ok(dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, DataType};

    fn frame(name: &str, values: Vec<Option<&str>>) -> DataFrame {
        DataFrame::new(vec![Column::new(name.into(), values)]).unwrap()
    }

    fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        df.column(name)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn test_filter_rows_exact_length() {
        let mut df = frame("expiry_date", vec![Some("12/25"), Some("NB71VBAHJE"), Some("01/30"), None]);
        let counts = filter_rows(&mut df, "expiry_date", &FieldRule::ExactLength(5))
            .unwrap()
            .unwrap();
        assert_eq!(counts.dropped, 2);
        assert_eq!(
            strings(&df, "expiry_date"),
            vec![Some("12/25".to_string()), Some("01/30".to_string())]
        );
    }

    #[test]
    fn test_missing_column_is_skipped() {
        let mut df = frame("other", vec![Some("x")]);
        assert!(filter_rows(&mut df, "expiry_date", &FieldRule::ExactLength(5)).unwrap().is_none());
        assert!(apply_weights(&mut df, "weight", &BTreeMap::new()).unwrap().is_none());
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn test_calendar_dates_become_date_column() {
        let mut df = frame(
            "join_date",
            vec![Some("March 3rd, 1990"), Some("1990-03-03"), Some("not a date"), None],
        );
        let counts = apply_calendar_dates(&mut df, "join_date", DateOrder::MonthFirst)
            .unwrap()
            .unwrap();
        assert_eq!(counts.nulled, 1);
        assert_eq!(counts.rewritten, 1);
        assert_eq!(counts.dropped, 0);
        assert_eq!(df.column("join_date").unwrap().dtype(), &DataType::Date);
        let rendered = df.column("join_date").unwrap().cast(&DataType::String).unwrap();
        let rendered: Vec<Option<String>> = rendered
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();
        assert_eq!(
            rendered,
            vec![
                Some("1990-03-03".to_string()),
                Some("1990-03-03".to_string()),
                None,
                None
            ]
        );
    }

    #[test]
    fn test_dates_count_days_from_unix_epoch() {
        let mut df = frame("day", vec![Some("1970-01-01"), Some("1970-01-02"), Some("1969-12-31")]);
        apply_calendar_dates(&mut df, "day", DateOrder::MonthFirst).unwrap();
        let days: Vec<Option<i32>> = df
            .column("day")
            .unwrap()
            .cast(&DataType::Int32)
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(days, vec![Some(0), Some(1), Some(-1)]);
    }

    #[test]
    fn test_phone_uses_corrected_country() {
        let mut df = DataFrame::new(vec![
            Column::new(
                "phone_number".into(),
                vec!["+44 (0)20-1234-5678", "(212) 555-0147 x12", "12345"],
            ),
            Column::new("country_code".into(), vec!["GGB", "US", "DE"]),
        ])
        .unwrap();
        let counts = apply_phone_numbers(
            &mut df,
            "phone_number",
            "country_code",
            &CleaningOptions::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            strings(&df, "phone_number"),
            vec![
                Some("02012345678".to_string()),
                Some("2125550147".to_string()),
                Some("12345".to_string())
            ]
        );
        assert_eq!(
            strings(&df, "country_code"),
            vec![Some("GB".to_string()), Some("US".to_string()), Some("DE".to_string())]
        );
        assert_eq!(counts.flagged, 1);
        assert_eq!(counts.dropped, 0);
    }

    #[test]
    fn test_weights_to_kilograms() {
        let options = CleaningOptions::default();
        let mut df = frame("weight", vec![Some("100g"), Some("3 x 100g"), Some("heavy"), None]);
        let counts = apply_weights(&mut df, "weight", &options.weight_corrections)
            .unwrap()
            .unwrap();
        assert_eq!(counts.nulled, 1);
        let kg: Vec<Option<f64>> = df.column("weight").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(kg, vec![Some(0.1), Some(0.3), None, None]);
    }

    #[test]
    fn test_categorical_filter_keeps_order() {
        let rule = CleaningOptions::default().continent;
        let mut df = frame(
            "continent",
            vec![Some("Europe"), Some("Mars"), Some("Eeurope"), None, Some("America")],
        );
        let counts = apply_categorical_filter(&mut df, "continent", &rule).unwrap().unwrap();
        assert_eq!(counts.dropped, 2);
        assert_eq!(counts.rewritten, 1);
        assert_eq!(
            strings(&df, "continent"),
            vec![
                Some("Europe".to_string()),
                Some("Europe".to_string()),
                Some("America".to_string())
            ]
        );
    }

    #[test]
    fn test_identifier_and_digits() {
        let mut df = frame("EAN", vec![Some("123"), Some("123456789012345")]);
        apply_identifier_padding(&mut df, "ean", 13).unwrap().unwrap();
        assert_eq!(
            strings(&df, "EAN"),
            vec![Some("0000000000123".to_string()), Some("3456789012345".to_string())]
        );

        let mut df = frame("staff_numbers", vec![Some("J78"), Some("abc")]);
        let counts = apply_digits_only(&mut df, "staff_numbers").unwrap().unwrap();
        assert_eq!(counts.nulled, 1);
        assert_eq!(strings(&df, "staff_numbers"), vec![Some("78".to_string()), None]);
    }

    #[test]
    fn test_require_non_null_and_drop_columns() {
        let mut df = DataFrame::new(vec![
            Column::new("weight".into(), vec![Some(0.1), None, Some(2.0)]),
            Column::new("first_name".into(), vec!["a", "b", "c"]),
        ])
        .unwrap();
        let counts = require_non_null(&mut df, "weight").unwrap().unwrap();
        assert_eq!(counts.dropped, 1);
        assert_eq!(df.height(), 2);

        let dropped = drop_columns(&mut df, &["first_name".to_string(), "1".to_string()]).unwrap();
        assert_eq!(dropped, vec!["first_name".to_string()]);
        assert_eq!(df.width(), 1);
    }
}
