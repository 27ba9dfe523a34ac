//! Tests for rdc-model types.

use rdc_model::{
    CleaningOptions, DateOrder, FieldRule, RawValue, Stage, TableKind, TableSchema,
};

#[test]
fn every_table_has_a_schema() {
    let options = CleaningOptions::default();
    for kind in TableKind::ALL {
        let schema = TableSchema::for_table(kind, &options);
        assert_eq!(schema.kind, kind);
    }
}

#[test]
fn users_contract_filters_uuid_first() {
    let schema = TableSchema::for_table(TableKind::Users, &CleaningOptions::default());
    let uuid = schema.field("user_uuid").unwrap();
    assert_eq!(uuid.rules, vec![FieldRule::ExactLength(36)]);
    assert_eq!(uuid.rules[0].stage(), Stage::RowShape);
}

#[test]
fn options_roundtrip_through_json_with_defaults() {
    let json = r#"{ "identifier_width": 8, "date_order": "day_first" }"#;
    let options: CleaningOptions = serde_json::from_str(json).expect("deserialize options");
    assert_eq!(options.identifier_width, 8);
    assert_eq!(options.date_order, DateOrder::DayFirst);
    // Fields missing from the file keep their defaults.
    assert_eq!(options.phone_digits, 10);
    assert_eq!(
        options.country_code_corrections.get("GGB").map(String::as_str),
        Some("GB")
    );
}

#[test]
fn raw_value_serializes_tagged() {
    let json = serde_json::to_string(&RawValue::Text("1160g".into())).unwrap();
    assert_eq!(json, r#"{"kind":"Text","value":"1160g"}"#);
}
