//! Configuration options for record cleaning.
//!
//! Every correction table the cleaner applies lives here so that a deployment
//! can extend them from a JSON file without touching the pipelines.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::contract::CategoryRule;
use crate::error::{ModelError, Result};

/// How to read numeric dates where both day and month could be either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `03/04/1990` is March 4th.
    #[default]
    MonthFirst,
    /// `03/04/1990` is April 3rd.
    DayFirst,
}

/// Options controlling how raw batches are cleaned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    /// Fixed width for numeric identifiers such as product EANs.
    pub identifier_width: usize,

    /// Number of trailing digits kept as the national significant number.
    pub phone_digits: usize,

    /// Countries whose national numbers carry a leading `0`.
    pub leading_zero_countries: BTreeSet<String>,

    /// Known country code misspellings (raw -> ISO code).
    pub country_code_corrections: BTreeMap<String, String>,

    /// Known mislabeled weights, applied as literal substring replacements.
    pub weight_corrections: BTreeMap<String, String>,

    /// Valid continents and their literal typo corrections.
    pub continent: CategoryRule,

    /// Resolution for ambiguous numeric dates.
    pub date_order: DateOrder,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            identifier_width: 13,
            phone_digits: 10,
            leading_zero_countries: BTreeSet::from(["GB".to_string()]),
            country_code_corrections: BTreeMap::from([("GGB".to_string(), "GB".to_string())]),
            weight_corrections: BTreeMap::from([("1160kg".to_string(), "1160g".to_string())]),
            continent: CategoryRule::new(["Europe", "America"])
                .with_correction("eeEurope", "Europe")
                .with_correction("eeAmerica", "America")
                .with_correction("Eeurope", "Europe"),
            date_order: DateOrder::default(),
        }
    }
}

impl CleaningOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identifier_width(mut self, width: usize) -> Self {
        self.identifier_width = width;
        self
    }

    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    pub fn with_country_correction(mut self, raw: impl Into<String>, code: impl Into<String>) -> Self {
        self.country_code_corrections.insert(raw.into(), code.into());
        self
    }

    pub fn with_weight_correction(mut self, raw: impl Into<String>, fixed: impl Into<String>) -> Self {
        self.weight_corrections.insert(raw.into(), fixed.into());
        self
    }

    /// Reject option sets that would make every row fail or every value empty.
    pub fn validate(&self) -> Result<()> {
        if self.identifier_width == 0 {
            return Err(ModelError::InvalidOptions(
                "identifier_width must be at least 1".to_string(),
            ));
        }
        if self.phone_digits == 0 {
            return Err(ModelError::InvalidOptions(
                "phone_digits must be at least 1".to_string(),
            ));
        }
        if self.continent.valid.is_empty() {
            return Err(ModelError::InvalidOptions(
                "continent rule needs at least one valid value".to_string(),
            ));
        }
        if self.weight_corrections.keys().any(String::is_empty) {
            return Err(ModelError::InvalidOptions(
                "weight corrections cannot replace an empty string".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let options = CleaningOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.identifier_width, 13);
        assert!(options.leading_zero_countries.contains("GB"));
    }

    #[test]
    fn zero_width_is_rejected() {
        let options = CleaningOptions::default().with_identifier_width(0);
        assert!(matches!(options.validate(), Err(ModelError::InvalidOptions(_))));
    }
}
