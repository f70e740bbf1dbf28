//! Dispatcher error types

use thiserror::Error;
use shared::{RecipientId, RequestStatus, SharedError};

/// Result type for dispatcher operations
pub type DispatcherResult<T> = Result<T, DispatcherError>;

/// Dispatcher error types
#[derive(Error, Debug)]
pub enum DispatcherError {
    #[error("Recipient list fetch failed: {message}")]
    FetchFailed { message: String },

    #[error("Request submission to {recipient} failed: {message}")]
    SubmissionFailed { recipient: RecipientId, message: String },

    #[error("Fallback data malformed at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Recipient {recipient} has already been requested")]
    AlreadyRequested { recipient: RecipientId },

    #[error("Unknown recipient: {recipient}")]
    UnknownRecipient { recipient: RecipientId },

    #[error("Recipient {recipient} cannot move from {from:?} to {to}")]
    InvalidTransition {
        recipient: RecipientId,
        from: Option<RequestStatus>,
        to: RequestStatus,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DispatcherError {
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::FetchFailed { message: message.into() }
    }

    pub fn submission(recipient: &RecipientId, message: impl Into<String>) -> Self {
        Self::SubmissionFailed {
            recipient: recipient.clone(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError { message: message.into() }
    }
}
