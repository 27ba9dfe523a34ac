//! Logical tables handled by the cleaner.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Identifier selecting which fixed pipeline runs over a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Users,
    Cards,
    Stores,
    Products,
    Orders,
    DateTimes,
}

impl TableKind {
    /// Every known table, in load order.
    pub const ALL: [TableKind; 6] = [
        TableKind::Users,
        TableKind::Cards,
        TableKind::Stores,
        TableKind::Products,
        TableKind::Orders,
        TableKind::DateTimes,
    ];

    /// The identifier used on the command line and in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Cards => "cards",
            Self::Stores => "stores",
            Self::Products => "products",
            Self::Orders => "orders",
            Self::DateTimes => "date_times",
        }
    }

    /// Where the raw batch originally comes from.
    pub fn source(self) -> &'static str {
        match self {
            Self::Users => "legacy_users",
            Self::Cards => "card_details.pdf",
            Self::Stores => "store_details API",
            Self::Products => "products.csv",
            Self::Orders => "orders_table",
            Self::DateTimes => "date_details.json",
        }
    }

    /// Destination table name in the analytical store.
    pub fn destination(self) -> &'static str {
        match self {
            Self::Users => "dim_users",
            Self::Cards => "dim_card_details",
            Self::Stores => "dim_store_details",
            Self::Products => "dim_products",
            Self::Orders => "orders_table",
            Self::DateTimes => "dim_date_times",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == key || kind.destination() == key)
            .ok_or_else(|| ModelError::UnknownTable(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_identifiers_and_destinations() {
        assert_eq!("users".parse::<TableKind>().unwrap(), TableKind::Users);
        assert_eq!(" Products ".parse::<TableKind>().unwrap(), TableKind::Products);
        assert_eq!("date-times".parse::<TableKind>().unwrap(), TableKind::DateTimes);
        assert_eq!("dim_card_details".parse::<TableKind>().unwrap(), TableKind::Cards);
    }

    #[test]
    fn unknown_identifier_is_an_error() {
        let err = "customers".parse::<TableKind>().unwrap_err();
        assert!(matches!(err, ModelError::UnknownTable(ref name) if name == "customers"));
    }

    #[test]
    fn display_matches_identifier() {
        for kind in TableKind::ALL {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }
}
