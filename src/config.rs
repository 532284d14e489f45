use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::account::PropertyMap;

pub const DEFAULT_SIGNAL_CAPACITY: usize = 64;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct MockConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub script: ScriptConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_signal_capacity")]
    pub signal_capacity: usize,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_rpc_port() -> u16 {
    9000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_signal_capacity() -> usize {
    DEFAULT_SIGNAL_CAPACITY
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            rpc_port: default_rpc_port(),
            log_level: default_log_level(),
            signal_capacity: default_signal_capacity(),
        }
    }
}

/// Replies and accounts a fresh instance starts with. Everything empty
/// keeps the deny-all default.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ScriptConfig {
    #[serde(default)]
    pub request_access_reply: PropertyMap,
    #[serde(default)]
    pub authentication_reply: PropertyMap,
    #[serde(default)]
    pub authentication_error: String,
    #[serde(default)]
    pub accounts: Vec<PropertyMap>,
}

impl MockConfig {
    pub fn load_or_default(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            match std::fs::read_to_string(path) {
                Ok(s) => match toml::from_str(&s) {
                    Ok(c) => {
                        info!("Config loaded from {}", path);
                        c
                    }
                    Err(e) => {
                        warn!("Error parsing config: {}. Using defaults.", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    warn!("Error reading config: {}. Using defaults.", e);
                    Self::default()
                }
            }
        } else {
            info!("Config file not found at '{}'. Creating default.", path);
            let config = Self::default();
            if let Ok(s) = toml::to_string_pretty(&config) {
                if let Err(e) = std::fs::write(path, s) {
                    warn!("Could not write default config to {}: {}", path, e);
                }
            }
            config
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.rpc_port)
    }
}
