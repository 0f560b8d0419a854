//! Server configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the snapshot server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address; port 0 picks a free port
    pub bind: String,

    /// How long to wait for open connections on shutdown
    #[serde(rename = "shutdown-timeout-ms")]
    pub shutdown_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:0".to_string(),
            shutdown_timeout_ms: 5000,
        }
    }
}

impl ServerConfig {
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind, "0.0.0.0:0");
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(5));
    }
}
