//! Shared error types for the blood bank alert workflow

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SharedError {
    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Unknown {kind}: {input}")]
    UnknownValue { kind: String, input: String },
}

impl SharedError {
    pub fn invalid_config(field: &str, value: impl ToString) -> Self {
        Self::InvalidConfig {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn unknown_value(kind: &str, input: &str) -> Self {
        Self::UnknownValue {
            kind: kind.to_string(),
            input: input.to_string(),
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
