//! File adapters for raw and cleaned batches.
//!
//! This crate only moves data between files and Polars frames. It makes no
//! cleaning decisions.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{IngestError, Result};
pub use reader::{
    InputFormat, default_output_path, read_batch, read_csv_batch, read_json_batch,
};
pub use writer::write_csv_batch;
