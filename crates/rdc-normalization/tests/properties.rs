//! Property tests: every normalizer is stable when applied to its own output.

use chrono::NaiveDate;
use proptest::prelude::*;
use rdc_model::{CleaningOptions, DateOrder, FieldOutcome, FieldRule, RawValue};
use rdc_normalization::{
    format_iso_date, normalize_phone, normalize_weight, pad_identifier, parse_calendar_date,
    parse_weight_kg, resolve_category, row_passes,
};

fn country() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["GB", "US", "DE"]).prop_map(str::to_string)
}

proptest! {
    #[test]
    fn identifier_padding_is_idempotent(raw in "[0-9A-Z]{0,20}", width in 1usize..20) {
        let once = pad_identifier(&raw, width);
        prop_assert_eq!(once.chars().count(), width);
        prop_assert_eq!(pad_identifier(&once, width), once);
    }

    #[test]
    fn phone_normalization_is_idempotent(raw in r"[0-9 ()+.\-]{0,24}", country in country()) {
        let options = CleaningOptions::default();
        let once = normalize_phone(&raw, Some(&country), &options);
        if raw.chars().any(|c| c.is_ascii_digit()) {
            prop_assert!(once.as_str().chars().all(|c| c.is_ascii_digit()));
        }
        let twice = normalize_phone(once.as_str(), Some(&country), &options);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn weight_output_is_stable(amount in 1u32..5000, unit in prop::sample::select(vec!["g", "kg", "ml", "oz"])) {
        let options = CleaningOptions::default();
        let raw = format!("{amount}{unit}");
        if let Some(kg) = parse_weight_kg(&raw, &options.weight_corrections) {
            prop_assert!(kg >= 0.0);
            prop_assert_eq!(
                normalize_weight(&RawValue::Numeric(kg), &options.weight_corrections),
                FieldOutcome::Value(kg)
            );
        }
    }

    #[test]
    fn iso_dates_parse_back(days in 0i64..80_000) {
        let base = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        let date = base + chrono::Duration::days(days);
        let text = format_iso_date(date);
        prop_assert_eq!(parse_calendar_date(&text, DateOrder::MonthFirst), Some(date));
        prop_assert_eq!(parse_calendar_date(&text, DateOrder::DayFirst), Some(date));
    }

    #[test]
    fn category_resolution_is_idempotent(raw in prop::sample::select(vec![
        "Europe", "America", "eeEurope", "eeAmerica", "Eeurope", "Asia", "europe", "",
    ])) {
        let rule = CleaningOptions::default().continent;
        if let Some(once) = resolve_category(&rule, raw) {
            prop_assert!(rule.is_valid(&once));
            prop_assert_eq!(resolve_category(&rule, &once), Some(once));
        }
    }

    #[test]
    fn exact_length_matches_char_count(raw in "[a-z0-9/]{1,12}", len in 1usize..12) {
        let value = RawValue::text(raw.clone());
        prop_assert_eq!(row_passes(&FieldRule::ExactLength(len), &value), raw.chars().count() == len);
    }
}
