//! Dispatcher service implementations

pub mod api_recipient_source;
pub mod csv_recipient_source;
pub mod api_request_submitter;
pub mod outcome_selector;

#[cfg(test)]
pub mod tests;

pub use api_recipient_source::*;
pub use csv_recipient_source::*;
pub use api_request_submitter::*;
pub use outcome_selector::*;
