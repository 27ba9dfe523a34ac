//! Field-level normalization functions.
//!
//! Every function here is pure and works on a single value: nothing looks at
//! other rows. The transform crate lifts them over whole columns.
//!
//! - **date**: free-text calendar dates
//! - **phone**: digit-only national phone numbers
//! - **weight**: free-text weights and volumes to kilograms
//! - **identifier**: fixed-width numeric identifiers
//! - **categorical**: typo correction and membership checks
//! - **text**: literal replacements and digit stripping
//! - **validity**: row-shape predicates

pub mod categorical;
pub mod date;
pub mod identifier;
pub mod phone;
pub mod text;
pub mod validity;
pub mod weight;

pub use categorical::{normalize_category, resolve_category};
pub use date::{format_iso_date, normalize_date, parse_calendar_date};
pub use identifier::{normalize_identifier, pad_identifier};
pub use phone::{PhoneNumber, correct_country_code, normalize_phone, normalize_phone_value};
pub use text::{digits_only, replace_literal};
pub use validity::row_passes;
pub use weight::{MassUnit, detect_unit, normalize_weight, parse_weight_kg, round_to_tenth};
