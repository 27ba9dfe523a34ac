//! The record cleaner: runs the fixed pipeline for a table over a batch.

use polars::prelude::DataFrame;
use rdc_model::{CleaningOptions, FieldRule, TableKind, TableSchema};
use tracing::{debug, info, info_span, warn};

use crate::error::{Result, TransformError};
use crate::executors::{
    apply_calendar_dates, apply_categorical_filter, apply_digits_only, apply_identifier_padding,
    apply_literal_replace, apply_phone_numbers, apply_weights, drop_columns, filter_rows,
    require_non_null,
};
use crate::pipeline::{PipelineStep, TablePipeline};
use crate::report::{CleaningReport, StepCounts, StepReport};

/// A cleaned batch together with what was done to it.
#[derive(Debug, Clone)]
pub struct CleanedBatch {
    pub table: TableKind,
    pub data: DataFrame,
    pub report: CleaningReport,
}

impl CleanedBatch {
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    /// Destination table name for loading.
    pub fn destination(&self) -> &'static str {
        self.table.destination()
    }
}

/// Cleans raw batches with a fixed set of options.
///
/// Holds no state between batches and can be reused.
#[derive(Debug, Clone, Default)]
pub struct RecordCleaner {
    options: CleaningOptions,
}

impl RecordCleaner {
    pub fn new(options: CleaningOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &CleaningOptions {
        &self.options
    }

    pub fn schema(&self, table: TableKind) -> TableSchema {
        TableSchema::for_table(table, &self.options)
    }

    pub fn pipeline(&self, table: TableKind) -> TablePipeline {
        TablePipeline::from_schema(&self.schema(table))
    }

    /// Clean a batch for a table given by name (`users`, `dim_products`, ...).
    pub fn clean_named(&self, table: &str, data: DataFrame) -> Result<CleanedBatch> {
        let kind: TableKind = table.parse()?;
        self.clean(kind, data)
    }

    pub fn clean(&self, table: TableKind, mut data: DataFrame) -> Result<CleanedBatch> {
        let span = info_span!("clean", table = %table);
        let _guard = span.enter();

        let pipeline = self.pipeline(table);
        let mut report = CleaningReport::new(table, data.height());

        for step in &pipeline.steps {
            let rows_in = data.height();
            let outcome = self.run_step(&mut data, step)?;
            let skipped = outcome.is_none();
            let counts = outcome.unwrap_or_default();
            if skipped {
                warn!(field = %step.field, rule = %step.rule, "column missing, step skipped");
            } else {
                info!(
                    stage = step.stage.display_name(),
                    field = %step.field,
                    rule = %step.rule,
                    dropped = counts.dropped,
                    nulled = counts.nulled,
                    rewritten = counts.rewritten,
                    flagged = counts.flagged,
                    "step complete"
                );
            }
            report.steps.push(StepReport {
                stage: step.stage,
                field: step.field.clone(),
                rule: step.rule.to_string(),
                rows_in,
                counts,
                skipped,
            });
        }

        report.dropped_columns = drop_columns(&mut data, &pipeline.dropped_columns)?;
        if !report.dropped_columns.is_empty() {
            debug!(columns = ?report.dropped_columns, "dropped columns");
        }
        report.output_rows = data.height();

        info!(
            input_rows = report.input_rows,
            output_rows = report.output_rows,
            rows_dropped = report.rows_dropped(),
            values_nulled = report.values_nulled(),
            "table cleaned"
        );

        Ok(CleanedBatch {
            table,
            data,
            report,
        })
    }

    fn run_step(&self, data: &mut DataFrame, step: &PipelineStep) -> Result<Option<StepCounts>> {
        let field = step.field.as_str();
        match &step.rule {
            FieldRule::ExactLength(_) | FieldRule::MaxLength(_) | FieldRule::RejectLiteral(_) => {
                filter_rows(data, field, &step.rule)
            }
            FieldRule::CalendarDate => apply_calendar_dates(data, field, self.options.date_order),
            FieldRule::Categorical(rule) => apply_categorical_filter(data, field, rule),
            FieldRule::Phone { country_field } => {
                apply_phone_numbers(data, field, country_field, &self.options)
            }
            FieldRule::Weight => apply_weights(data, field, &self.options.weight_corrections),
            FieldRule::Identifier { width } => apply_identifier_padding(data, field, *width),
            FieldRule::ReplaceLiteral { from, to } => apply_literal_replace(data, field, from, to),
            FieldRule::DigitsOnly => apply_digits_only(data, field),
            FieldRule::RequireNumeric => require_non_null(data, field),
        }
    }
}

impl TryFrom<CleaningOptions> for RecordCleaner {
    type Error = TransformError;

    fn try_from(options: CleaningOptions) -> Result<Self> {
        Self::new(options)
    }
}
