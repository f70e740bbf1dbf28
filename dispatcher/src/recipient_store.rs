//! Recipient store: primary source with a static fallback

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use shared::{Recipient, RecipientId, logging};
use crate::traits::RecipientSource;
use crate::types::{LoadReport, LoadSource};

/// Holds the candidate recipients for the session
pub struct RecipientStore<P, F>
where
    P: RecipientSource,
    F: RecipientSource,
{
    primary: P,
    fallback: F,
    recipients: Arc<RwLock<Vec<Recipient>>>,
    last_error: Arc<RwLock<Option<String>>>,
}

impl<P, F> RecipientStore<P, F>
where
    P: RecipientSource,
    F: RecipientSource,
{
    pub fn new(primary: P, fallback: F) -> Self {
        Self {
            primary,
            fallback,
            recipients: Arc::new(RwLock::new(Vec::new())),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Load from the primary source, falling back to the static source.
    ///
    /// Never fails: a primary failure is kept as the store's error and a
    /// fallback failure is logged and leaves the list empty.
    pub async fn load(&self) -> LoadReport {
        match self.primary.fetch_recipients().await {
            Ok(recipients) => {
                let recipients = dedupe(recipients);
                let count = recipients.len();
                *self.recipients.write().await = recipients;
                *self.last_error.write().await = None;

                info!("🏥 Loaded {} blood banks from {}", count, self.primary.describe());
                LoadReport {
                    source: LoadSource::Primary,
                    recipients: count,
                    warning: None,
                }
            }
            Err(e) => {
                let warning = format!("Backend connection failed: {e}");
                warn!("⚠️ {}; using {}", warning, self.fallback.describe());
                *self.last_error.write().await = Some(warning.clone());

                let recipients = match self.fallback.fetch_recipients().await {
                    Ok(recipients) => dedupe(recipients),
                    Err(e) => {
                        logging::log_error("Loading fallback data", &e);
                        Vec::new()
                    }
                };
                let count = recipients.len();
                *self.recipients.write().await = recipients;

                info!("🏥 Loaded {} blood banks from {}", count, self.fallback.describe());
                LoadReport {
                    source: LoadSource::Fallback,
                    recipients: count,
                    warning: Some(warning),
                }
            }
        }
    }

    pub async fn recipients(&self) -> Vec<Recipient> {
        self.recipients.read().await.clone()
    }

    pub async fn get(&self, id: &RecipientId) -> Option<Recipient> {
        self.recipients.read().await.iter().find(|r| &r.id == id).cloned()
    }

    pub async fn contains(&self, id: &RecipientId) -> bool {
        self.recipients.read().await.iter().any(|r| &r.id == id)
    }

    pub async fn len(&self) -> usize {
        self.recipients.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.recipients.read().await.is_empty()
    }

    /// Why the last load had to use the fallback source
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }
}

/// Keep the first recipient for each identity so status keys stay unique
fn dedupe(recipients: Vec<Recipient>) -> Vec<Recipient> {
    let mut seen = HashSet::new();
    recipients
        .into_iter()
        .filter(|recipient| {
            let fresh = seen.insert(recipient.id.clone());
            if !fresh {
                warn!("Dropping duplicate blood bank identity {}", recipient.id);
            }
            fresh
        })
        .collect()
}
