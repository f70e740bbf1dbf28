//! JSON messages exchanged with the blood bank API

pub mod api;

pub use api::*;
