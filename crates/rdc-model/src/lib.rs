//! Data model for the retail record normalization engine.
//!
//! - **table**: the logical tables the engine knows how to clean
//! - **value**: tagged raw cell values and per-field outcomes
//! - **contract**: per-field cleaning contracts, grouped into table schemas
//! - **options**: tunable correction tables and widths
//! - **lookup**: case-insensitive column name lookup

pub mod contract;
pub mod error;
pub mod lookup;
pub mod options;
pub mod table;
pub mod value;

pub use contract::{CategoryRule, FieldContract, FieldRule, Stage, TableSchema, TargetType};
pub use error::{ModelError, Result};
pub use lookup::CaseInsensitiveSet;
pub use options::{CleaningOptions, DateOrder};
pub use table::TableKind;
pub use value::{FieldOutcome, RawValue};
