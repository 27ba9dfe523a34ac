use std::fs;

use polars::prelude::*;
use rdc_ingest::{IngestError, read_batch, write_csv_batch};
use tempfile::TempDir;

#[test]
fn csv_columns_are_read_as_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.csv");
    fs::write(&path, "product_name,weight,EAN\ntea,100g,00123\nsalt,1.5,7\n").unwrap();

    let df = read_batch(&path).unwrap();

    assert_eq!(df.height(), 2);
    for column in df.get_columns() {
        assert_eq!(column.dtype(), &DataType::String, "{}", column.name());
    }
    let ean: Vec<Option<&str>> = df.column("EAN").unwrap().str().unwrap().into_iter().collect();
    assert_eq!(ean, vec![Some("00123"), Some("7")]);
}

#[test]
fn json_records_are_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("date_details.json");
    fs::write(
        &path,
        r#"[{"month": "9", "year": "2012"}, {"month": "NULL", "year": "2000"}]"#,
    )
    .unwrap();

    let df = read_batch(&path).unwrap();
    assert_eq!(df.shape(), (2, 2));
}

#[test]
fn missing_input_is_reported_with_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.csv");
    let err = read_batch(&path).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { path: p } if p == path));
}

#[test]
fn written_csv_has_header_and_iso_dates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out/nested/users.clean.csv");
    let dates = Series::new("join_date".into(), vec![Some(0i32), None])
        .cast(&DataType::Date)
        .unwrap();
    let mut df = DataFrame::new(vec![
        Column::new("user_uuid".into(), vec!["a", "b"]),
        dates.into(),
    ])
    .unwrap();

    write_csv_batch(&mut df, &path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines, vec!["user_uuid,join_date", "a,1970-01-01", "b,"]);
}
