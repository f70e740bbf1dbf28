//! Tests for dispatcher services
//!
//! HTTP services run against a local wiremock server; the CSV source runs
//! against temporary files.


use crate::types::DispatcherConfig;

/// Config pointing at a mock server
pub fn config_for(base: &str) -> DispatcherConfig {
    DispatcherConfig {
        api_base_url: base.to_string(),
        ..DispatcherConfig::default()
    }
}

/// Base URL nothing listens on
pub const UNREACHABLE_BASE: &str = "http://127.0.0.1:1";
