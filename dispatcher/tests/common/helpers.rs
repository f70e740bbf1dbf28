//! Test helpers and builder patterns for dispatcher tests

use std::time::Duration;
use tokio::sync::broadcast;

use dispatcher::*;
use shared::{Recipient, ResponseOutcome, SubmissionAck};

pub type TestSession =
    AlertSession<MockRecipientSource, MockRecipientSource, MockRequestSubmitter, MockOutcomeSelector>;

pub type TestTracker = StatusTracker<MockRequestSubmitter, MockOutcomeSelector>;

/// Builder for sessions wired to mocks
pub struct SessionBuilder {
    primary: MockRecipientSource,
    fallback: MockRecipientSource,
    submitter: MockRequestSubmitter,
    selector: MockOutcomeSelector,
    resolution_delay: Duration,
}

impl SessionBuilder {
    /// Defaults: empty recipient lists, every submission acknowledged,
    /// every reply `Available`, one second resolution delay
    pub fn new() -> Self {
        let mut primary = MockRecipientSource::new();
        let mut fallback = MockRecipientSource::new();
        primary.expect_describe().returning(|| "mock primary".to_string()).times(0..);
        fallback.expect_describe().returning(|| "mock fallback".to_string()).times(0..);

        Self {
            primary,
            fallback,
            submitter: MockRequestSubmitter::new(),
            selector: MockOutcomeSelector::new(),
            resolution_delay: Duration::from_secs(1),
        }
    }

    /// Primary source answering with these recipients
    pub fn with_recipients(mut self, recipients: Vec<Recipient>) -> Self {
        self.primary
            .expect_fetch_recipients()
            .returning(move || Ok(recipients.clone()));
        self
    }

    pub fn with_primary<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockRecipientSource),
    {
        setup(&mut self.primary);
        self
    }

    pub fn with_fallback<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockRecipientSource),
    {
        setup(&mut self.fallback);
        self
    }

    pub fn with_submitter<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockRequestSubmitter),
    {
        setup(&mut self.submitter);
        self
    }

    pub fn with_selector<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockOutcomeSelector),
    {
        setup(&mut self.selector);
        self
    }

    /// Every submission acknowledged with `success`
    pub fn accepting_all(self) -> Self {
        self.with_submitter(|submitter| {
            submitter
                .expect_submit()
                .returning(|_| Ok(SubmissionAck::success()));
        })
    }

    /// Every simulated reply is `outcome`
    pub fn replying(self, outcome: ResponseOutcome) -> Self {
        self.with_selector(move |selector| {
            selector.expect_select().returning(move |_| outcome);
        })
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.resolution_delay = delay;
        self
    }

    pub fn build_tracker(self) -> TestTracker {
        StatusTracker::with_delay(self.submitter, self.selector, self.resolution_delay)
    }

    pub fn build(self) -> TestSession {
        let store = RecipientStore::new(self.primary, self.fallback);
        let tracker = StatusTracker::with_delay(self.submitter, self.selector, self.resolution_delay);
        AlertSession::new(store, tracker)
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Receive the next `count` status changes
pub async fn collect_changes(rx: &mut broadcast::Receiver<StatusChange>, count: usize) -> Vec<StatusChange> {
    let mut changes = Vec::with_capacity(count);
    for _ in 0..count {
        changes.push(rx.recv().await.expect("status change"));
    }
    changes
}
