//! Per-recipient dispatch and status tracking
//!
//! A dispatch writes `Pending` immediately, then runs on its own task:
//! submit, map the acknowledgement to `Sent` or `Failed`, and for `Sent`
//! wait out the resolution delay before writing the bank's reply. Tasks never
//! wait on each other, and each one only touches its own recipient's entry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use shared::{
    BloodRequestPayload, Recipient, RecipientId, RequestConfig, RequestStatus, ResponseOutcome, recipient_debug,
    recipient_error, recipient_info, recipient_warn,
};
use crate::error::{DispatcherError, DispatcherResult};
use crate::state::StatusBoard;
use crate::traits::{OutcomeSelector, RequestSubmitter};
use crate::types::{StatusChange, DEFAULT_RESOLUTION_DELAY};

/// Owns the status map and performs dispatches
pub struct StatusTracker<S, O>
where
    S: RequestSubmitter + 'static,
    O: OutcomeSelector + 'static,
{
    board: StatusBoard,
    submitter: Arc<S>,
    selector: Arc<O>,
    resolution_delay: Duration,
}

impl<S, O> StatusTracker<S, O>
where
    S: RequestSubmitter + 'static,
    O: OutcomeSelector + 'static,
{
    pub fn new(submitter: S, selector: O) -> Self {
        Self::with_delay(submitter, selector, DEFAULT_RESOLUTION_DELAY)
    }

    pub fn with_delay(submitter: S, selector: O, resolution_delay: Duration) -> Self {
        Self {
            board: StatusBoard::new(),
            submitter: Arc::new(submitter),
            selector: Arc::new(selector),
            resolution_delay,
        }
    }

    pub fn resolution_delay(&self) -> Duration {
        self.resolution_delay
    }

    /// Start a dispatch to one recipient.
    ///
    /// The payload targets the recipient's served `bank_id`; the status is kept
    /// under its session identity. `Pending` is recorded before this returns.
    /// The handle completes with the recipient's status once the dispatch has
    /// nothing left to do. A recipient that already has any status is refused
    /// with `AlreadyRequested`.
    pub async fn dispatch(
        &self,
        recipient: &Recipient,
        config: &RequestConfig,
    ) -> DispatcherResult<JoinHandle<RequestStatus>> {
        let payload = BloodRequestPayload::new(recipient, config);
        let recipient = recipient.id.clone();

        self.board.begin(&recipient).await?;
        recipient_info!(recipient, "⏳ Dispatching: {}", payload.message);

        let job = DispatchJob {
            recipient,
            payload,
            board: self.board.clone(),
            submitter: Arc::clone(&self.submitter),
            selector: Arc::clone(&self.selector),
            resolution_delay: self.resolution_delay,
        };

        Ok(tokio::spawn(job.run()))
    }

    /// Apply a reply that arrived from the bank itself.
    ///
    /// Only a `Sent` request accepts a reply; the simulated resolution for that
    /// recipient then has no effect.
    pub async fn record_reply(&self, recipient: &RecipientId, outcome: ResponseOutcome) -> DispatcherResult<()> {
        self.board
            .transition(recipient, RequestStatus::Sent, outcome.into())
            .await?;
        recipient_info!(recipient, "📨 Bank replied: {}", outcome);
        Ok(())
    }

    pub async fn status(&self, recipient: &RecipientId) -> Option<RequestStatus> {
        self.board.get(recipient).await
    }

    pub async fn snapshot(&self) -> HashMap<RecipientId, RequestStatus> {
        self.board.snapshot().await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StatusChange> {
        self.board.subscribe()
    }
}

/// Everything one dispatch task needs, moved onto the task
struct DispatchJob<S, O> {
    recipient: RecipientId,
    payload: BloodRequestPayload,
    board: StatusBoard,
    submitter: Arc<S>,
    selector: Arc<O>,
    resolution_delay: Duration,
}

impl<S, O> DispatchJob<S, O>
where
    S: RequestSubmitter,
    O: OutcomeSelector,
{
    async fn run(self) -> RequestStatus {
        let next = match self.submitter.submit(self.payload.clone()).await {
            Ok(ack) => {
                let next = ack.resulting_status();
                if next == RequestStatus::Failed {
                    recipient_warn!(
                        self.recipient,
                        "⚠️ Request not accepted, acknowledgement status {:?}",
                        ack.status
                    );
                }
                next
            }
            Err(e) => {
                recipient_error!(self.recipient, error = %e, "❌ Request submission failed");
                RequestStatus::Failed
            }
        };

        if let Err(e) = self.board.transition(&self.recipient, RequestStatus::Pending, next).await {
            // Only this task moves an entry out of Pending
            recipient_error!(self.recipient, error = %e, "Status out of step with dispatch");
            return self.current_status().await;
        }

        if next != RequestStatus::Sent {
            return next;
        }

        recipient_info!(self.recipient, "📤 Request sent, awaiting reply");
        tokio::time::sleep(self.resolution_delay).await;

        let outcome = self.selector.select(&self.recipient);
        match self
            .board
            .transition(&self.recipient, RequestStatus::Sent, outcome.into())
            .await
        {
            Ok(()) => {
                recipient_info!(self.recipient, "✅ Resolved as {}", outcome);
                outcome.into()
            }
            Err(DispatcherError::InvalidTransition { from, .. }) => {
                recipient_debug!(self.recipient, "Simulated reply skipped, status already {:?}", from);
                self.current_status().await
            }
            Err(e) => {
                recipient_error!(self.recipient, error = %e, "Simulated reply could not be applied");
                self.current_status().await
            }
        }
    }

    async fn current_status(&self) -> RequestStatus {
        self.board
            .get(&self.recipient)
            .await
            .unwrap_or(RequestStatus::Failed)
    }
}
