//! Per-batch cleaning reports.

use rdc_model::{Stage, TableKind};
use serde::Serialize;

/// Counts produced by one executor run over one column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StepCounts {
    /// Rows removed from the batch.
    pub dropped: usize,
    /// Present values that could not be normalized and became null.
    pub nulled: usize,
    /// Values whose text changed.
    pub rewritten: usize,
    /// Values kept but marked as suspicious (short phone numbers).
    pub flagged: usize,
}

/// What one pipeline step did to the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub stage: Stage,
    pub field: String,
    /// Rendered rule, e.g. `length == 36`.
    pub rule: String,
    pub rows_in: usize,
    #[serde(flatten)]
    pub counts: StepCounts,
    /// The batch had no column for this field.
    pub skipped: bool,
}

impl StepReport {
    pub fn rows_out(&self) -> usize {
        self.rows_in - self.counts.dropped
    }
}

/// Summary of one `clean` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub table: TableKind,
    pub input_rows: usize,
    pub output_rows: usize,
    pub steps: Vec<StepReport>,
    /// Columns that were present and removed.
    pub dropped_columns: Vec<String>,
}

impl CleaningReport {
    pub fn new(table: TableKind, input_rows: usize) -> Self {
        Self {
            table,
            input_rows,
            output_rows: input_rows,
            steps: Vec::new(),
            dropped_columns: Vec::new(),
        }
    }

    pub fn rows_dropped(&self) -> usize {
        self.steps.iter().map(|step| step.counts.dropped).sum()
    }

    pub fn values_nulled(&self) -> usize {
        self.steps.iter().map(|step| step.counts.nulled).sum()
    }

    pub fn values_rewritten(&self) -> usize {
        self.steps.iter().map(|step| step.counts.rewritten).sum()
    }

    pub fn values_flagged(&self) -> usize {
        self.steps.iter().map(|step| step.counts.flagged).sum()
    }

    pub fn skipped_steps(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|step| step.skipped)
    }

    /// Per-stage totals in pipeline order, for summaries.
    pub fn by_stage(&self) -> Vec<(Stage, StepCounts)> {
        let mut totals: Vec<(Stage, StepCounts)> = Vec::new();
        for step in &self.steps {
            match totals.last_mut() {
                Some((stage, counts)) if *stage == step.stage => {
                    counts.dropped += step.counts.dropped;
                    counts.nulled += step.counts.nulled;
                    counts.rewritten += step.counts.rewritten;
                    counts.flagged += step.counts.flagged;
                }
                _ => totals.push((step.stage, step.counts)),
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(stage: Stage, dropped: usize, nulled: usize) -> StepReport {
        StepReport {
            stage,
            field: "f".to_string(),
            rule: "r".to_string(),
            rows_in: 10,
            counts: StepCounts {
                dropped,
                nulled,
                ..StepCounts::default()
            },
            skipped: false,
        }
    }

    #[test]
    fn test_totals_and_stage_grouping() {
        let mut report = CleaningReport::new(TableKind::Products, 10);
        report.steps.push(step(Stage::RowShape, 1, 0));
        report.steps.push(step(Stage::RowShape, 2, 0));
        report.steps.push(step(Stage::Values, 0, 3));

        assert_eq!(report.rows_dropped(), 3);
        assert_eq!(report.values_nulled(), 3);
        let stages = report.by_stage();
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0].1.dropped, 3);
        assert_eq!(report.steps[0].rows_out(), 9);
    }
}
