//! Contract-driven table pipelines.
//!
//! A [`TablePipeline`] is derived from a [`TableSchema`]: every rule of every
//! field contract becomes one step, and steps are ordered by [`Stage`]
//! (row shape, dates, categorical, values, numeric validity). Within a stage
//! the contract order is kept. Column drops run last.
//!
//! ```
//! use rdc_model::{CleaningOptions, Stage, TableKind, TableSchema};
//! use rdc_transform::TablePipeline;
//!
//! let schema = TableSchema::for_table(TableKind::Products, &CleaningOptions::default());
//! let pipeline = TablePipeline::from_schema(&schema);
//! assert_eq!(pipeline.steps.last().map(|s| s.stage), Some(Stage::NumericValidity));
//! ```

use std::fmt::Write as _;

use rdc_model::{FieldRule, Stage, TableKind, TableSchema};
use serde::Serialize;

/// One rule applied to one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineStep {
    pub stage: Stage,
    pub field: String,
    pub rule: FieldRule,
}

/// Ordered steps for one logical table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePipeline {
    pub table: TableKind,
    pub steps: Vec<PipelineStep>,
    pub dropped_columns: Vec<String>,
}

impl TablePipeline {
    pub fn from_schema(schema: &TableSchema) -> Self {
        let mut steps: Vec<PipelineStep> = schema
            .fields
            .iter()
            .flat_map(|field| {
                field.rules.iter().map(|rule| PipelineStep {
                    stage: rule.stage(),
                    field: field.name.clone(),
                    rule: rule.clone(),
                })
            })
            .collect();
        // Stable: contract order survives within a stage.
        steps.sort_by_key(|step| step.stage);

        Self {
            table: schema.kind,
            steps,
            dropped_columns: schema.dropped_columns.clone(),
        }
    }

    /// Fields the pipeline reads, in first-use order.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for step in &self.steps {
            if !fields.contains(&step.field.as_str()) {
                fields.push(&step.field);
            }
        }
        fields
    }

    /// Human-readable plan, one line per step.
    pub fn describe(&self) -> String {
        let mut out = format!("{} -> {}", self.table, self.table.destination());
        for (idx, step) in self.steps.iter().enumerate() {
            let _ = write!(
                out,
                "\n  {}. [{}] {}: {}",
                idx + 1,
                step.stage.display_name(),
                step.field,
                step.rule
            );
        }
        if !self.dropped_columns.is_empty() {
            let _ = write!(out, "\n  drop columns: {}", self.dropped_columns.join(", "));
        }
        out
    }

    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            total_steps: self.steps.len(),
            filter_steps: self.steps.iter().filter(|s| s.rule.is_filter()).count(),
            date_steps: self
                .steps
                .iter()
                .filter(|s| s.stage == Stage::Dates)
                .count(),
            value_steps: self
                .steps
                .iter()
                .filter(|s| s.stage == Stage::Values)
                .count(),
            dropped_columns: self.dropped_columns.len(),
        }
    }
}

/// Statistics about a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub total_steps: usize,
    pub filter_steps: usize,
    pub date_steps: usize,
    pub value_steps: usize,
    pub dropped_columns: usize,
}
