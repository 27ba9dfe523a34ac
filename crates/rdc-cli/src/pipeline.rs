//! File-to-file cleaning runs.
//!
//! Reads a raw batch, cleans it with [`RecordCleaner`], and writes the result
//! unless asked not to. Kept in the library so it can be tested without the
//! binary.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use rdc_common::any_to_string;
use rdc_ingest::{default_output_path, read_batch, write_csv_batch};
use rdc_model::CleaningOptions;
use rdc_transform::{CleanedBatch, RecordCleaner};
use tracing::{info, info_span, trace};

use crate::logging::redact_value;

/// One `clean` invocation.
#[derive(Debug, Clone)]
pub struct CleanRequest {
    pub table: String,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub dry_run: bool,
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub input: PathBuf,
    /// `None` for dry runs.
    pub output: Option<PathBuf>,
    pub batch: CleanedBatch,
}

/// Load cleaning options from a JSON file, or the defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> Result<CleaningOptions> {
    let Some(path) = path else {
        return Ok(CleaningOptions::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let options: CleaningOptions = serde_json::from_str(&text)
        .with_context(|| format!("parse config {}", path.display()))?;
    options
        .validate()
        .with_context(|| format!("validate config {}", path.display()))?;
    Ok(options)
}

pub fn run_clean(request: &CleanRequest) -> Result<CleanOutcome> {
    let span = info_span!(
        "run_clean",
        table = %request.table,
        input = %request.input.display()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let options = load_options(request.config.as_deref())?;
    let cleaner = RecordCleaner::new(options).context("build cleaner")?;
    let raw = read_batch(&request.input)
        .with_context(|| format!("read {}", request.input.display()))?;
    let mut batch = cleaner
        .clean_named(&request.table, raw)
        .with_context(|| format!("clean {}", request.input.display()))?;
    log_first_record(&batch.data);

    let output = if request.dry_run {
        None
    } else {
        let path = request
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&request.input));
        write_csv_batch(&mut batch.data, &path)
            .with_context(|| format!("write {}", path.display()))?;
        Some(path)
    };

    info!(
        destination = batch.destination(),
        records = batch.record_count(),
        dry_run = request.dry_run,
        duration_ms = start.elapsed().as_millis(),
        "clean complete"
    );

    Ok(CleanOutcome {
        input: request.input.clone(),
        output,
        batch,
    })
}

fn log_first_record(df: &DataFrame) {
    if df.height() == 0 {
        return;
    }
    let values: Vec<String> = df
        .get_columns()
        .iter()
        .map(|column| {
            let value = column.get(0).map(any_to_string).unwrap_or_default();
            format!("{}={}", column.name(), value)
        })
        .collect();
    trace!(record = redact_value(&values.join(", ")), "first cleaned record");
}
