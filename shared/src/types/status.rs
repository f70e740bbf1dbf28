//! Per-recipient request lifecycle

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SharedError;

/// Status of the request sent to one recipient.
///
/// `Pending -> {Sent | Failed}`, `Sent -> {Available | Unavailable | Partial}`.
/// A recipient with no status has not been requested yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Sent,
    Failed,
    Available,
    Unavailable,
    Partial,
}

impl RequestStatus {
    /// No transition leaves a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::Failed
                | RequestStatus::Available
                | RequestStatus::Unavailable
                | RequestStatus::Partial
        )
    }

    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        match self {
            RequestStatus::Pending => matches!(next, RequestStatus::Sent | RequestStatus::Failed),
            RequestStatus::Sent => ResponseOutcome::from_status(next).is_some(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Sent => "sent",
            RequestStatus::Failed => "failed",
            RequestStatus::Available => "available",
            RequestStatus::Unavailable => "unavailable",
            RequestStatus::Partial => "partial",
        }
    }

    /// Operator-facing text for an optional status
    pub fn label(status: Option<RequestStatus>) -> &'static str {
        match status {
            None => "Not Sent",
            Some(RequestStatus::Pending) => "Sending...",
            Some(RequestStatus::Sent) => "Sent",
            Some(RequestStatus::Failed) => "Failed",
            Some(RequestStatus::Available) => "Available",
            Some(RequestStatus::Unavailable) => "Unavailable",
            Some(RequestStatus::Partial) => "Partial",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bank's reply to a request that reached it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseOutcome {
    Available,
    Unavailable,
    Partial,
}

impl ResponseOutcome {
    pub const ALL: [ResponseOutcome; 3] = [
        ResponseOutcome::Available,
        ResponseOutcome::Unavailable,
        ResponseOutcome::Partial,
    ];

    fn from_status(status: RequestStatus) -> Option<Self> {
        match status {
            RequestStatus::Available => Some(ResponseOutcome::Available),
            RequestStatus::Unavailable => Some(ResponseOutcome::Unavailable),
            RequestStatus::Partial => Some(ResponseOutcome::Partial),
            _ => None,
        }
    }
}

impl fmt::Display for ResponseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        RequestStatus::from(*self).fmt(f)
    }
}

impl FromStr for ResponseOutcome {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ResponseOutcome::ALL
            .into_iter()
            .find(|outcome| outcome.to_string() == wanted)
            .ok_or_else(|| SharedError::unknown_value("response outcome", s))
    }
}

impl From<ResponseOutcome> for RequestStatus {
    fn from(outcome: ResponseOutcome) -> Self {
        match outcome {
            ResponseOutcome::Available => RequestStatus::Available,
            ResponseOutcome::Unavailable => RequestStatus::Unavailable,
            ResponseOutcome::Partial => RequestStatus::Partial,
        }
    }
}
