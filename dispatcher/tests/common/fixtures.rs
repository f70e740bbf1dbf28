//! Test fixtures for dispatcher tests

use shared::{BloodGroup, BloodProduct, Recipient, RecipientId, RequestConfig, Urgency};

pub struct TestFixtures;

impl TestFixtures {
    pub const CRITICAL_MESSAGE: &'static str =
        "Urgent blood request: 2 units of O- (Whole Blood) - Priority: Critical";

    /// `count` recipients with synthesized identities `bank_0..`
    pub fn recipients(count: usize) -> Vec<Recipient> {
        (0..count)
            .map(|i| Self::recipient(&format!("bank_{i}")))
            .collect()
    }

    pub fn recipient(id: &str) -> Recipient {
        let mut recipient = Recipient::with_defaults(RecipientId::new(id), format!("Blood Bank {id}"));
        recipient.phone = "080-0000000".to_string();
        recipient.distance_km = Some(1.5);
        recipient
    }

    pub fn id(id: &str) -> RecipientId {
        RecipientId::new(id)
    }

    pub fn critical_config() -> RequestConfig {
        RequestConfig::new(BloodGroup::ONegative, vec![BloodProduct::WholeBlood], Urgency::Critical, 2)
            .expect("valid config")
    }
}
