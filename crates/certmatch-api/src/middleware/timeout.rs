//! Request timeout layer.

use std::time::Duration;

use tower_http::timeout::TimeoutLayer;

use certmatch_core::config::ServerConfig;

/// Builds a layer that answers `408 Request Timeout` once a request runs
/// longer than the configured limit.
pub fn build_timeout_layer(config: &ServerConfig) -> TimeoutLayer {
    TimeoutLayer::new(Duration::from_secs(config.request_timeout_seconds.max(1)))
}
