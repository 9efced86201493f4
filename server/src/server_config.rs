use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use common::config::Validate;

pub const DEFAULT_CONFIG_PATH: &str = "snake_server.yaml";

const GRID_DIMENSION_RANGE: std::ops::RangeInclusive<i32> = 5..=100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// `host:port`; the host may be a name such as `localhost`.
    pub bind_address: String,
    pub grid_width: i32,
    pub grid_height: i32,
    pub static_files_path: PathBuf,
    pub cleanup_interval_secs: u64,
    pub session_timeout_secs: u64,
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            grid_width: 20,
            grid_height: 20,
            static_files_path: PathBuf::from("static"),
            cleanup_interval_secs: 300,
            session_timeout_secs: 3600,
            max_sessions: 1000,
        }
    }
}

impl ServerConfig {
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_secs)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if !is_host_port(&self.bind_address) {
            return Err(format!("Invalid bind address: {}", self.bind_address));
        }
        if !GRID_DIMENSION_RANGE.contains(&self.grid_width) {
            return Err("Grid width must be between 5 and 100".to_string());
        }
        if !GRID_DIMENSION_RANGE.contains(&self.grid_height) {
            return Err("Grid height must be between 5 and 100".to_string());
        }
        if self.cleanup_interval_secs == 0 {
            return Err("Cleanup interval must be at least 1 second".to_string());
        }
        if self.session_timeout_secs == 0 {
            return Err("Session timeout must be at least 1 second".to_string());
        }
        if self.max_sessions == 0 {
            return Err("Max sessions must be at least 1".to_string());
        }
        Ok(())
    }
}

fn is_host_port(address: &str) -> bool {
    match address.rsplit_once(':') {
        Some((host, port)) => !host.trim().is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}
