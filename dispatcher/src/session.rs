//! Alert session: request configuration, recipients and their statuses
//!
//! The session is the unit of lifetime for the status map. Dropping it (or the
//! runtime) drops any resolution still waiting on its delay.

use std::collections::HashMap;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use shared::{Recipient, RecipientId, RequestConfig, RequestStatus, ResponseOutcome, SharedResult};
use crate::error::{DispatcherError, DispatcherResult};
use crate::recipient_store::RecipientStore;
use crate::services::{ApiRecipientSource, ApiRequestSubmitter, CsvRecipientSource};
use crate::tracker::StatusTracker;
use crate::traits::{OutcomeSelector, RecipientSource, RequestSubmitter};
use crate::types::{DispatcherConfig, LoadReport, StatusChange};

/// A started dispatch: which recipient, and the task resolving it
pub type Dispatched = (RecipientId, JoinHandle<RequestStatus>);

/// One operator session with dependency-injected services
pub struct AlertSession<P, F, S, O>
where
    P: RecipientSource,
    F: RecipientSource,
    S: RequestSubmitter + 'static,
    O: OutcomeSelector + 'static,
{
    store: RecipientStore<P, F>,
    tracker: StatusTracker<S, O>,
    config: RwLock<RequestConfig>,
}

impl<P, F, S, O> AlertSession<P, F, S, O>
where
    P: RecipientSource,
    F: RecipientSource,
    S: RequestSubmitter + 'static,
    O: OutcomeSelector + 'static,
{
    pub fn new(store: RecipientStore<P, F>, tracker: StatusTracker<S, O>) -> Self {
        Self {
            store,
            tracker,
            config: RwLock::new(RequestConfig::default()),
        }
    }

    pub fn store(&self) -> &RecipientStore<P, F> {
        &self.store
    }

    pub fn tracker(&self) -> &StatusTracker<S, O> {
        &self.tracker
    }

    pub async fn load(&self) -> LoadReport {
        self.store.load().await
    }

    /// Copy of the configuration the next dispatch will use
    pub async fn request_config(&self) -> RequestConfig {
        self.config.read().await.clone()
    }

    pub async fn set_request_config(&self, config: RequestConfig) {
        *self.config.write().await = config;
    }

    /// Edit the configuration in place; a failed edit leaves it untouched
    pub async fn update_request_config<E>(&self, edit: E) -> DispatcherResult<RequestConfig>
    where
        E: FnOnce(&mut RequestConfig) -> SharedResult<()>,
    {
        let mut config = self.config.write().await;
        let mut edited = config.clone();
        edit(&mut edited)?;
        *config = edited.clone();
        Ok(edited)
    }

    /// Dispatch the current configuration to one loaded recipient
    pub async fn dispatch(&self, recipient: &RecipientId) -> DispatcherResult<JoinHandle<RequestStatus>> {
        let Some(target) = self.store.get(recipient).await else {
            return Err(DispatcherError::UnknownRecipient {
                recipient: recipient.clone(),
            });
        };

        let config = self.request_config().await;
        self.tracker.dispatch(&target, &config).await
    }

    /// Dispatch to every recipient that has no status yet.
    ///
    /// Recipients already pending or resolved are skipped, so calling this
    /// again only reaches recipients loaded or left untouched since.
    pub async fn dispatch_all(&self) -> Vec<Dispatched> {
        let config = self.request_config().await;
        let mut dispatched = Vec::new();

        for recipient in self.store.recipients().await {
            if self.tracker.status(&recipient.id).await.is_some() {
                continue;
            }

            match self.tracker.dispatch(&recipient, &config).await {
                Ok(handle) => dispatched.push((recipient.id, handle)),
                Err(DispatcherError::AlreadyRequested { .. }) => {
                    debug!("Skipping {}, requested concurrently", recipient.id);
                }
                Err(e) => {
                    shared::logging::log_error(&format!("Dispatch to {}", recipient.id), &e);
                }
            }
        }

        info!("📣 Dispatched {} request(s)", dispatched.len());
        dispatched
    }

    pub async fn record_reply(&self, recipient: &RecipientId, outcome: ResponseOutcome) -> DispatcherResult<()> {
        self.tracker.record_reply(recipient, outcome).await
    }

    pub async fn status(&self, recipient: &RecipientId) -> Option<RequestStatus> {
        self.tracker.status(recipient).await
    }

    /// Every loaded recipient with its status, in load order
    pub async fn rows(&self) -> Vec<(Recipient, Option<RequestStatus>)> {
        let statuses: HashMap<RecipientId, RequestStatus> = self.tracker.snapshot().await;
        self.store
            .recipients()
            .await
            .into_iter()
            .map(|recipient| {
                let status = statuses.get(&recipient.id).copied();
                (recipient, status)
            })
            .collect()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StatusChange> {
        self.tracker.subscribe()
    }
}

impl<O> AlertSession<ApiRecipientSource, CsvRecipientSource, ApiRequestSubmitter, O>
where
    O: OutcomeSelector + 'static,
{
    /// Session wired to the HTTP API with the CSV file as fallback
    pub fn from_config(config: &DispatcherConfig, selector: O) -> Self {
        let client = reqwest::Client::new();
        let store = RecipientStore::new(
            ApiRecipientSource::with_client(client.clone(), config),
            CsvRecipientSource::new(config.fallback_csv_path.clone()),
        );
        let tracker = StatusTracker::with_delay(
            ApiRequestSubmitter::with_client(client, config),
            selector,
            config.resolution_delay,
        );
        Self::new(store, tracker)
    }
}
