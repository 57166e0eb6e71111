//! Runtime configuration for the chat core.

use serde::{Deserialize, Serialize};

/// Default simulated response delay in milliseconds.
pub const DEFAULT_RESPONSE_DELAY_MS: u64 = 1500;

/// Chat core configuration, loaded from `{data_dir}/config.toml`.
///
/// Every field has a default so a partial (or absent) file still yields a
/// usable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Delay before the bot reply is produced, simulating response latency.
    pub response_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: DEFAULT_RESPONSE_DELAY_MS,
        }
    }
}
