use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown table '{0}' (expected one of: users, cards, stores, products, orders, date_times)")]
    UnknownTable(String),
    #[error("invalid cleaning options: {0}")]
    InvalidOptions(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
