//! Primary recipient source backed by `GET /api/bloodbanks`

use async_trait::async_trait;
use tracing::debug;

use shared::{BloodBankList, Recipient};
use crate::error::{DispatcherError, DispatcherResult};
use crate::traits::RecipientSource;
use crate::types::DispatcherConfig;

pub const BLOODBANKS_PATH: &str = "/api/bloodbanks";

/// Fetches the blood bank list from the hospital API
#[derive(Clone)]
pub struct ApiRecipientSource {
    client: reqwest::Client,
    url: String,
}

impl ApiRecipientSource {
    pub fn new(config: &DispatcherConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &DispatcherConfig) -> Self {
        Self {
            client,
            url: config.endpoint(BLOODBANKS_PATH),
        }
    }
}

#[async_trait]
impl RecipientSource for ApiRecipientSource {
    async fn fetch_recipients(&self) -> DispatcherResult<Vec<Recipient>> {
        debug!("Fetching blood banks from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DispatcherError::fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatcherError::fetch(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let list: BloodBankList = response
            .json()
            .await
            .map_err(|e| DispatcherError::fetch(format!("invalid blood bank list: {e}")))?;

        Ok(list
            .bloodbanks
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.into_recipient(index))
            .collect())
    }

    fn describe(&self) -> String {
        format!("API {}", self.url)
    }
}
