//! Request submission backed by `POST /api/bloodbanks/request`

use async_trait::async_trait;

use shared::{BloodRequestPayload, SubmissionAck, recipient_debug};
use crate::error::{DispatcherError, DispatcherResult};
use crate::traits::RequestSubmitter;
use crate::types::DispatcherConfig;

pub const REQUEST_PATH: &str = "/api/bloodbanks/request";

/// Submits blood requests to the hospital API.
///
/// No timeout is set: a submission waits until the transport resolves or fails.
#[derive(Clone)]
pub struct ApiRequestSubmitter {
    client: reqwest::Client,
    url: String,
}

impl ApiRequestSubmitter {
    pub fn new(config: &DispatcherConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &DispatcherConfig) -> Self {
        Self {
            client,
            url: config.endpoint(REQUEST_PATH),
        }
    }
}

#[async_trait]
impl RequestSubmitter for ApiRequestSubmitter {
    async fn submit(&self, payload: BloodRequestPayload) -> DispatcherResult<SubmissionAck> {
        let recipient = payload.recipient();
        recipient_debug!(recipient, "📤 POST {}: {}", self.url, payload.message);

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| DispatcherError::submission(&recipient, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatcherError::submission(
                &recipient,
                format!("HTTP {}", status.as_u16()),
            ));
        }

        response
            .json::<SubmissionAck>()
            .await
            .map_err(|e| DispatcherError::submission(&recipient, format!("invalid acknowledgement: {e}")))
    }
}
