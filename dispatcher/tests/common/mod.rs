//! Common test utilities and infrastructure
//!
//! Shared fixtures and a session builder with sensible mock defaults.

#![allow(dead_code)] // Not every suite uses every helper

pub mod fixtures;
pub mod helpers;

pub use fixtures::TestFixtures;
pub use helpers::{SessionBuilder, TestSession, TestTracker, collect_changes};
