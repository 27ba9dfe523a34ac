//! Shared utilities for the retail data centralisation crates.
//!
//! Converts Polars cells into the engine's tagged [`RawValue`] so that the
//! normalizers never inspect column dtypes themselves.
//!
//! [`RawValue`]: rdc_model::RawValue

pub mod polars;

pub use self::polars::{any_to_raw, any_to_string, column_raw_values, format_numeric};
