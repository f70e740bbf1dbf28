//! Core types used throughout the alert workflow

pub mod blood;
pub mod config;
pub mod recipient;
pub mod status;

pub use blood::{BloodGroup, BloodProduct, Urgency};
pub use config::{RequestConfig, MAX_UNITS, MIN_UNITS};
pub use recipient::{
    split_blood_types, RawBankId, Recipient, RecipientId, DEFAULT_BLOOD_TYPES, DEFAULT_CITY, DEFAULT_LATITUDE, DEFAULT_LONGITUDE,
    DEFAULT_PHONE,
};
pub use status::{RequestStatus, ResponseOutcome};
