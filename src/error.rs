//! Tracker error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Node fetch failed: {0}")]
    Fetch(String),

    #[error("Missing field `{field}` in {context}")]
    FieldMissing {
        field: &'static str,
        context: &'static str,
    },

    #[error("Telegram delivery failed: {0}")]
    Delivery(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn field_missing(field: &'static str, context: &'static str) -> Self {
        Error::FieldMissing { field, context }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
