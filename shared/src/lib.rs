//! Shared types for the blood bank alert workflow
//!
//! Contains the domain vocabulary (blood groups, products, urgency, request
//! configuration, recipients, request status) and the JSON messages exchanged
//! with the blood bank API.

pub mod types;
pub mod errors;
pub mod messages;
pub mod logging;

pub use types::*;
pub use errors::*;

pub use messages::{
    // GET /api/bloodbanks
    BloodBankList, BloodBankRecord,

    // POST /api/bloodbanks/request
    BloodRequestPayload, SubmissionAck,
};
