//! Blood bank recipients and their session-stable identity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Latitude used when a bank record carries none (Bengaluru city centre)
pub const DEFAULT_LATITUDE: f64 = 12.9716;

/// Longitude used when a bank record carries none
pub const DEFAULT_LONGITUDE: f64 = 77.5946;

pub const DEFAULT_CITY: &str = "City";

pub const DEFAULT_PHONE: &str = "Phone not available";

pub const DEFAULT_BLOOD_TYPES: &str = "A+,B+,O+,AB+";

/// Identity of a recipient, resolved once at load time.
///
/// The same value keys the status map and targets the request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientId(String);

impl RecipientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identity synthesised for a fallback row that has no id column
    pub fn synthesized(index: usize) -> Self {
        Self(format!("bank_{index}"))
    }

    /// Identity for a primary-source record that carries no id at all
    pub fn positional(index: usize) -> Self {
        Self(index.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipientId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Bank identifier in the form the data source handed it out.
///
/// The API serves ids as strings or numbers; requests echo the same form back.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum RawBankId {
    Text(String),
    Number(serde_json::Number),
}

impl RawBankId {
    /// Non-empty string form, `None` when the id is blank
    pub fn resolve(&self) -> Option<String> {
        match self {
            RawBankId::Text(text) if text.trim().is_empty() => None,
            RawBankId::Text(text) => Some(text.trim().to_string()),
            RawBankId::Number(number) => Some(number.to_string()),
        }
    }

    /// Session identity for this id; blank text keys as the empty string
    pub fn to_recipient_id(&self) -> RecipientId {
        RecipientId::new(self.resolve().unwrap_or_default())
    }
}

impl From<&str> for RawBankId {
    fn from(id: &str) -> Self {
        RawBankId::Text(id.to_string())
    }
}

impl From<usize> for RawBankId {
    fn from(index: usize) -> Self {
        RawBankId::Number(index.into())
    }
}

impl fmt::Display for RawBankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawBankId::Text(text) => f.write_str(text),
            RawBankId::Number(number) => write!(f, "{number}"),
        }
    }
}

/// A blood bank that can receive a request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: RecipientId,
    /// Sent back as `bank_id` when requesting this bank
    pub bank_id: RawBankId,
    pub name: String,
    pub phone: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: Option<f64>,
    /// Informational only; requests are never filtered against it
    pub blood_types_available: Vec<String>,
}

impl Recipient {
    /// Recipient with the documented defaults for every optional field
    pub fn with_defaults(id: RecipientId, name: impl Into<String>) -> Self {
        Self {
            bank_id: RawBankId::Text(id.as_str().to_string()),
            id,
            name: name.into(),
            phone: DEFAULT_PHONE.to_string(),
            city: DEFAULT_CITY.to_string(),
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            distance_km: None,
            blood_types_available: split_blood_types(DEFAULT_BLOOD_TYPES),
        }
    }

    /// Distance as shown to the operator
    pub fn distance_label(&self) -> String {
        match self.distance_km {
            Some(km) => format!("{km} km"),
            None => "N/A".to_string(),
        }
    }
}

/// Split a comma-joined blood type list, dropping blanks
pub fn split_blood_types(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
