//! Bridge configuration

use crate::LogLevel;
use crate::error::BridgeResult;
use serde::{Deserialize, Serialize};

/// Configuration for the HTTP bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Initial log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Upper bound on a response body read from the host client
    ///
    /// Bodies larger than this become a `ResponseTooLarge` failure.
    #[serde(default)]
    pub max_response_body_bytes: Option<usize>,

    /// Prefix of the native core's exported symbols
    /// (`<prefix>_initialize`, `<prefix>_alloc_bytebuffer`, `<prefix>_destroy_bytebuffer`)
    #[serde(default = "default_symbol_prefix")]
    pub native_symbol_prefix: String,

    /// Worker threads for the async client adapter (default: number of CPU cores)
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_symbol_prefix() -> String {
    "hostfetch_native".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            max_response_body_bytes: None,
            native_symbol_prefix: default_symbol_prefix(),
            worker_threads: None,
        }
    }
}

impl BridgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    pub fn with_max_response_body_bytes(mut self, limit: usize) -> Self {
        self.max_response_body_bytes = Some(limit);
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Parsed log level
    pub fn log_level(&self) -> BridgeResult<LogLevel> {
        self.log_level.parse()
    }
}
