//! Field contracts for each logical table.
//!
//! A contract names a column, the canonical type it ends up as, and the rules
//! applied to it. Contracts are plain data; the transform crate derives its
//! ordered pipeline from them.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::options::CleaningOptions;
use crate::table::TableKind;

/// Pipeline stage a rule belongs to. Stages run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Drop rows whose raw shape is wrong (fixed lengths, sentinel strings).
    RowShape,
    /// Parse calendar dates.
    Dates,
    /// Repair and filter categorical values.
    Categorical,
    /// Canonicalize numeric, identifier and text values.
    Values,
    /// Drop rows whose numeric fields could not be derived.
    NumericValidity,
}

impl Stage {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::RowShape => "Row shape",
            Self::Dates => "Dates",
            Self::Categorical => "Categorical",
            Self::Values => "Values",
            Self::NumericValidity => "Numeric validity",
        }
    }
}

/// Canonical type of a cleaned column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetType {
    Text,
    Date,
    Phone,
    Kilograms,
    Identifier,
    Category,
}

impl TargetType {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Phone => "phone",
            Self::Kilograms => "kg",
            Self::Identifier => "identifier",
            Self::Category => "category",
        }
    }
}

/// Finite set of canonical values plus literal typo corrections.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryRule {
    pub valid: BTreeSet<String>,
    #[serde(default)]
    pub corrections: BTreeMap<String, String>,
}

impl CategoryRule {
    pub fn new<I, S>(valid: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            valid: valid.into_iter().map(Into::into).collect(),
            corrections: BTreeMap::new(),
        }
    }

    pub fn with_correction(mut self, raw: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.corrections.insert(raw.into(), canonical.into());
        self
    }

    /// Exact membership check against the canonical set.
    pub fn is_valid(&self, value: &str) -> bool {
        self.valid.contains(value)
    }

    /// The literal correction registered for `raw`, if any.
    pub fn correction(&self, raw: &str) -> Option<&str> {
        self.corrections.get(raw).map(String::as_str)
    }
}

/// A single cleaning rule attached to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldRule {
    /// Keep rows whose value has exactly this many characters.
    ExactLength(usize),
    /// Keep rows whose value has at most this many characters.
    MaxLength(usize),
    /// Drop rows whose value equals this sentinel.
    RejectLiteral(String),
    /// Parse to a calendar date; unparseable values become null.
    CalendarDate,
    /// Correct typos, then drop rows outside the valid set.
    Categorical(CategoryRule),
    /// Normalize to a digit-only national number using the row's country.
    Phone { country_field: String },
    /// Parse a free-text weight into kilograms.
    Weight,
    /// Left-pad and truncate to a fixed width.
    Identifier { width: usize },
    /// Replace every occurrence of `from` with `to`.
    ReplaceLiteral { from: String, to: String },
    /// Remove every non-digit character.
    DigitsOnly,
    /// Drop rows where the value is null after earlier stages.
    RequireNumeric,
}

impl FieldRule {
    pub fn stage(&self) -> Stage {
        match self {
            Self::ExactLength(_) | Self::MaxLength(_) | Self::RejectLiteral(_) => Stage::RowShape,
            Self::CalendarDate => Stage::Dates,
            Self::Categorical(_) => Stage::Categorical,
            Self::Phone { .. }
            | Self::Weight
            | Self::Identifier { .. }
            | Self::ReplaceLiteral { .. }
            | Self::DigitsOnly => Stage::Values,
            Self::RequireNumeric => Stage::NumericValidity,
        }
    }

    /// Whether this rule can remove rows from the batch.
    pub fn is_filter(&self) -> bool {
        matches!(
            self,
            Self::ExactLength(_)
                | Self::MaxLength(_)
                | Self::RejectLiteral(_)
                | Self::Categorical(_)
                | Self::RequireNumeric
        )
    }
}

impl fmt::Display for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactLength(n) => write!(f, "length == {n}"),
            Self::MaxLength(n) => write!(f, "length <= {n}"),
            Self::RejectLiteral(s) => write!(f, "reject '{s}'"),
            Self::CalendarDate => f.write_str("calendar date"),
            Self::Categorical(rule) => {
                let valid: Vec<&str> = rule.valid.iter().map(String::as_str).collect();
                write!(f, "one of [{}]", valid.join(", "))
            }
            Self::Phone { country_field } => write!(f, "phone by {country_field}"),
            Self::Weight => f.write_str("weight in kg"),
            Self::Identifier { width } => write!(f, "pad to {width}"),
            Self::ReplaceLiteral { from, to } => write!(f, "replace '{from}' -> '{to}'"),
            Self::DigitsOnly => f.write_str("digits only"),
            Self::RequireNumeric => f.write_str("require numeric"),
        }
    }
}

/// Contract for one named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldContract {
    pub name: String,
    pub target: TargetType,
    pub rules: Vec<FieldRule>,
}

impl FieldContract {
    pub fn new(name: impl Into<String>, target: TargetType) -> Self {
        Self {
            name: name.into(),
            target,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// All field contracts for one logical table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub kind: TableKind,
    pub fields: Vec<FieldContract>,
    /// Columns removed from the cleaned batch.
    pub dropped_columns: Vec<String>,
}

impl TableSchema {
    /// The fixed contract set for `kind`, parameterized by `options`.
    pub fn for_table(kind: TableKind, options: &CleaningOptions) -> Self {
        let fields = match kind {
            TableKind::Users => vec![
                FieldContract::new("user_uuid", TargetType::Text).rule(FieldRule::ExactLength(36)),
                FieldContract::new("date_of_birth", TargetType::Date).rule(FieldRule::CalendarDate),
                FieldContract::new("join_date", TargetType::Date).rule(FieldRule::CalendarDate),
                FieldContract::new("phone_number", TargetType::Phone).rule(FieldRule::Phone {
                    country_field: "country_code".to_string(),
                }),
                FieldContract::new("email_address", TargetType::Text).rule(
                    FieldRule::ReplaceLiteral {
                        from: "@@".to_string(),
                        to: "@".to_string(),
                    },
                ),
            ],
            TableKind::Cards => vec![
                FieldContract::new("card_number", TargetType::Text)
                    .rule(FieldRule::RejectLiteral("NULL".to_string()))
                    .rule(FieldRule::ReplaceLiteral {
                        from: "?".to_string(),
                        to: String::new(),
                    }),
                FieldContract::new("expiry_date", TargetType::Text).rule(FieldRule::ExactLength(5)),
                FieldContract::new("date_payment_confirmed", TargetType::Date)
                    .rule(FieldRule::CalendarDate),
            ],
            TableKind::Stores => vec![
                FieldContract::new("continent", TargetType::Category)
                    .rule(FieldRule::Categorical(options.continent.clone())),
                FieldContract::new("opening_date", TargetType::Date).rule(FieldRule::CalendarDate),
                FieldContract::new("staff_numbers", TargetType::Text).rule(FieldRule::DigitsOnly),
            ],
            TableKind::Products => vec![
                FieldContract::new("weight", TargetType::Kilograms)
                    .rule(FieldRule::Weight)
                    .rule(FieldRule::RequireNumeric),
                FieldContract::new("EAN", TargetType::Identifier).rule(FieldRule::Identifier {
                    width: options.identifier_width,
                }),
                FieldContract::new("date_added", TargetType::Date).rule(FieldRule::CalendarDate),
            ],
            TableKind::Orders => Vec::new(),
            TableKind::DateTimes => vec![
                FieldContract::new("month", TargetType::Text).rule(FieldRule::MaxLength(2)),
            ],
        };
        let dropped_columns = match kind {
            TableKind::Orders => vec![
                "first_name".to_string(),
                "last_name".to_string(),
                "1".to_string(),
            ],
            _ => Vec::new(),
        };
        Self {
            kind,
            fields,
            dropped_columns,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldContract> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }
}
