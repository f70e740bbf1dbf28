//! Wire types for the blood bank HTTP API
//!
//! `GET {base}/api/bloodbanks` answers with a [`BloodBankList`];
//! `POST {base}/api/bloodbanks/request` takes a [`BloodRequestPayload`] and
//! answers with a [`SubmissionAck`].

use serde::{Deserialize, Serialize};

use crate::types::{
    split_blood_types, BloodGroup, BloodProduct, RawBankId, Recipient, RecipientId, RequestConfig, RequestStatus,
    Urgency,
};

/// Acknowledgement value that marks a request as delivered
pub const ACK_SUCCESS: &str = "success";

/// Body of `GET /api/bloodbanks`
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct BloodBankList {
    #[serde(default)]
    pub bloodbanks: Vec<BloodBankRecord>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum BloodTypes {
    List(Vec<String>),
    Joined(String),
}

/// One bank as served by the API; every field is optional on the wire
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct BloodBankRecord {
    #[serde(default)]
    pub bank_id: Option<RawBankId>,
    #[serde(default)]
    pub id: Option<RawBankId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, alias = "latitude")]
    pub lat: Option<f64>,
    #[serde(default, alias = "longitude")]
    pub lon: Option<f64>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub blood_types_available: Option<BloodTypes>,
}

impl BloodBankRecord {
    /// The id the API knows this bank by: canonical bank id, then plain id
    fn served_id(&self) -> Option<&RawBankId> {
        [self.bank_id.as_ref(), self.id.as_ref()]
            .into_iter()
            .flatten()
            .find(|raw| raw.resolve().is_some())
    }

    /// Resolve the session identity: served id, then position
    pub fn identity(&self, index: usize) -> RecipientId {
        self.served_id()
            .map(RawBankId::to_recipient_id)
            .unwrap_or_else(|| RecipientId::positional(index))
    }

    pub fn into_recipient(self, index: usize) -> Recipient {
        let id = self.identity(index);
        let bank_id = self.served_id().cloned().unwrap_or_else(|| RawBankId::from(index));
        let name = non_blank(self.name).unwrap_or_else(|| format!("Blood Bank {}", index + 1));
        let mut recipient = Recipient::with_defaults(id, name);
        recipient.bank_id = bank_id;

        if let Some(phone) = non_blank(self.phone) {
            recipient.phone = phone;
        }
        if let Some(city) = non_blank(self.city) {
            recipient.city = city;
        }
        if let Some(lat) = self.lat {
            recipient.latitude = lat;
        }
        if let Some(lon) = self.lon {
            recipient.longitude = lon;
        }
        recipient.distance_km = self.distance_km;

        match self.blood_types_available {
            Some(BloodTypes::List(types)) if !types.is_empty() => recipient.blood_types_available = types,
            Some(BloodTypes::Joined(joined)) if !joined.trim().is_empty() => {
                recipient.blood_types_available = split_blood_types(&joined)
            }
            _ => {}
        }

        recipient
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Body of `POST /api/bloodbanks/request`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BloodRequestPayload {
    pub bank_id: RawBankId,
    pub blood_group: BloodGroup,
    pub products: Vec<BloodProduct>,
    pub units_needed: u32,
    pub urgency: Urgency,
    pub message: String,
}

impl BloodRequestPayload {
    pub fn new(recipient: &Recipient, config: &RequestConfig) -> Self {
        Self {
            bank_id: recipient.bank_id.clone(),
            blood_group: config.blood_group(),
            products: config.products().to_vec(),
            units_needed: config.units_needed(),
            urgency: config.urgency(),
            message: config.compose_message(),
        }
    }

    /// Session identity of the bank this payload targets
    pub fn recipient(&self) -> RecipientId {
        self.bank_id.to_recipient_id()
    }
}

/// Server reply to a submitted request
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SubmissionAck {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SubmissionAck {
    pub fn success() -> Self {
        Self {
            status: Some(ACK_SUCCESS.to_string()),
            message: None,
        }
    }

    pub fn with_status(status: &str) -> Self {
        Self {
            status: Some(status.to_string()),
            message: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(ACK_SUCCESS)
    }

    /// Status the recipient moves to once this acknowledgement arrives
    pub fn resulting_status(&self) -> RequestStatus {
        if self.is_success() {
            RequestStatus::Sent
        } else {
            RequestStatus::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_LATITUDE;

    #[test]
    fn test_identity_resolution_order() {
        let list: BloodBankList = serde_json::from_str(
            r#"{"bloodbanks": [
                {"bank_id": "BB-1", "id": 99, "name": "Central"},
                {"id": 42, "name": "North"},
                {"bank_id": "", "id": "  ", "name": "Nameless id"},
                {}
            ]}"#,
        )
        .unwrap();

        let ids: Vec<String> = list
            .bloodbanks
            .into_iter()
            .enumerate()
            .map(|(i, record)| record.into_recipient(i).id.to_string())
            .collect();

        assert_eq!(ids, vec!["BB-1", "42", "2", "3"]);
    }

    #[test]
    fn test_missing_list_is_empty() {
        let list: BloodBankList = serde_json::from_str("{}").unwrap();
        assert!(list.bloodbanks.is_empty());
    }

    #[test]
    fn test_record_defaults() {
        let record: BloodBankRecord =
            serde_json::from_str(r#"{"bank_id": 7, "blood_types_available": ["O-", "AB+"], "distance_km": 3.2}"#)
                .unwrap();
        let recipient = record.into_recipient(4);

        assert_eq!(recipient.id.as_str(), "7");
        assert_eq!(recipient.name, "Blood Bank 5");
        assert_eq!(recipient.latitude, DEFAULT_LATITUDE);
        assert_eq!(recipient.distance_km, Some(3.2));
        assert_eq!(recipient.blood_types_available, vec!["O-", "AB+"]);
    }

    #[test]
    fn test_payload_shape() {
        let config = RequestConfig::new(BloodGroup::ONegative, vec![BloodProduct::WholeBlood], Urgency::Critical, 2)
            .unwrap();
        let recipient = Recipient::with_defaults(RecipientId::new("bank_3"), "Bank 3");
        let payload = BloodRequestPayload::new(&recipient, &config);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "bank_id": "bank_3",
                "blood_group": "O-",
                "products": ["Whole Blood"],
                "units_needed": 2,
                "urgency": "Critical",
                "message": "Urgent blood request: 2 units of O- (Whole Blood) - Priority: Critical"
            })
        );
    }

    #[test]
    fn test_payload_echoes_served_id_form() {
        let list: BloodBankList = serde_json::from_str(
            r#"{"bloodbanks": [{"id": 7, "name": "Numeric"}, {"bank_id": "BB-1"}, {"name": "No id"}]}"#,
        )
        .unwrap();
        let config = RequestConfig::default();

        let bank_ids: Vec<serde_json::Value> = list
            .bloodbanks
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                let payload = BloodRequestPayload::new(&record.into_recipient(i), &config);
                serde_json::to_value(&payload).unwrap()["bank_id"].clone()
            })
            .collect();

        assert_eq!(
            bank_ids,
            vec![serde_json::json!(7), serde_json::json!("BB-1"), serde_json::json!(2)]
        );
    }

    #[test]
    fn test_payload_recipient_matches_identity() {
        let record: BloodBankRecord = serde_json::from_str(r#"{"bank_id": 17}"#).unwrap();
        let recipient = record.into_recipient(0);
        let payload = BloodRequestPayload::new(&recipient, &RequestConfig::default());

        assert_eq!(payload.recipient(), recipient.id);
    }

    #[test]
    fn test_ack_mapping() {
        assert_eq!(SubmissionAck::success().resulting_status(), RequestStatus::Sent);
        assert_eq!(SubmissionAck::with_status("queued").resulting_status(), RequestStatus::Failed);

        let ack: SubmissionAck = serde_json::from_str(r#"{"message": "ok"}"#).unwrap();
        assert_eq!(ack.resulting_status(), RequestStatus::Failed);
    }
}
