//! Coordinator configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Coordinator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Capacity of the inbound sample queue
    #[serde(rename = "channel-buffer", default = "default_channel_buffer")]
    pub channel_buffer: usize,

    /// Time given to viewers to fetch the final snapshot before the bus closes
    #[serde(rename = "settle-delay-ms", default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Maximum points of each class handed to the renderer for drawing
    #[serde(rename = "draw-cap", default = "default_draw_cap")]
    pub draw_cap: usize,

    /// Initial capacity reserved for each classified set
    #[serde(rename = "initial-capacity", default = "default_initial_capacity")]
    pub initial_capacity: usize,
}

fn default_channel_buffer() -> usize {
    debug!("default_channel_buffer: called");
    1024
}

fn default_settle_delay_ms() -> u64 {
    debug!("default_settle_delay_ms: called");
    1000
}

fn default_draw_cap() -> usize {
    1_000_000
}

fn default_initial_capacity() -> usize {
    1024
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 1024,
            settle_delay_ms: 1000,
            draw_cap: 1_000_000,
            initial_capacity: 1024,
        }
    }
}

impl CoordinatorConfig {
    /// Get the settle delay as a Duration
    pub fn settle_delay(&self) -> Duration {
        debug!(settle_delay_ms = %self.settle_delay_ms, "CoordinatorConfig::settle_delay: called");
        Duration::from_millis(self.settle_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CoordinatorConfig::default();
        assert_eq!(config.channel_buffer, 1024);
        assert_eq!(config.settle_delay_ms, 1000);
        assert_eq!(config.draw_cap, 1_000_000);
        assert_eq!(config.initial_capacity, 1024);
    }

    #[test]
    fn test_settle_delay_duration() {
        let config = CoordinatorConfig {
            settle_delay_ms: 250,
            ..Default::default()
        };
        assert_eq!(config.settle_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: CoordinatorConfig = serde_yaml::from_str("settle-delay-ms: 0\n").unwrap();
        assert_eq!(config.settle_delay_ms, 0);
        assert_eq!(config.channel_buffer, 1024);
        assert_eq!(config.draw_cap, 1_000_000);
    }
}
