//! Blood request dispatcher
//!
//! Broadcasts a hospital's blood request to nearby blood banks and tracks
//! each bank's response independently: load recipients (API first, CSV
//! fallback), dispatch one request per recipient, and follow each status from
//! `pending` to its final outcome.

pub mod error;
pub mod types;
pub mod traits;
pub mod state;
pub mod recipient_store;
pub mod tracker;
pub mod session;
pub mod services;

// Re-export main types
pub use error::{DispatcherError, DispatcherResult};
pub use types::*;
pub use traits::*;
pub use state::StatusBoard;
pub use recipient_store::RecipientStore;
pub use tracker::StatusTracker;
pub use session::{AlertSession, Dispatched};
pub use services::*;
