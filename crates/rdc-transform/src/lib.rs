//! Batch cleaning for retail record tables.
//!
//! - **pipeline**: ordered steps derived from a table's field contracts
//! - **executors**: column-level executors lifting the field normalizers over a batch
//! - **cleaner**: [`RecordCleaner`], which runs a pipeline and reports on it
//! - **report**: per-step and per-batch counts

pub mod cleaner;
pub mod error;
pub mod executors;
pub mod pipeline;
pub mod report;

pub use cleaner::{CleanedBatch, RecordCleaner};
pub use error::{Result, TransformError};
pub use pipeline::{PipelineStats, PipelineStep, TablePipeline};
pub use report::{CleaningReport, StepCounts, StepReport};
