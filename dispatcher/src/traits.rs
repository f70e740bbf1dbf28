//! Dispatcher trait definitions for dependency injection

use async_trait::async_trait;

use shared::{BloodRequestPayload, Recipient, RecipientId, ResponseOutcome, SubmissionAck};
use crate::error::DispatcherResult;

/// Source of candidate recipients
#[mockall::automock]
#[async_trait]
pub trait RecipientSource: Send + Sync {
    /// Fetch the full recipient list with identities already resolved
    async fn fetch_recipients(&self) -> DispatcherResult<Vec<Recipient>>;

    /// Short description used in logs and warnings
    fn describe(&self) -> String;
}

/// External submission operation for a single request
#[mockall::automock]
#[async_trait]
pub trait RequestSubmitter: Send + Sync {
    /// Submit one request; transport and HTTP failures come back as `Err`
    async fn submit(&self, payload: BloodRequestPayload) -> DispatcherResult<SubmissionAck>;
}

/// Chooses how a bank answers once a request reached it
#[mockall::automock]
pub trait OutcomeSelector: Send + Sync {
    fn select(&self, recipient: &RecipientId) -> ResponseOutcome;
}
