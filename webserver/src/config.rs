//! Validated server configuration
//!
//! Built by the binary from command line arguments and environment
//! variables; tests construct it directly.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::core::ScoreThresholds;
use crate::error::{WebServerError, WebServerResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Directory for the persistent store; in-memory when absent
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
    pub thresholds: ScoreThresholds,
    /// Load the demo dataset into an empty store at startup
    pub seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 5000,
            data_dir: None,
            log_level: "info".to_string(),
            thresholds: ScoreThresholds::default(),
            seed: false,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn validate(self) -> WebServerResult<Self> {
        let ScoreThresholds { good, warning } = self.thresholds;
        if good > 100 {
            return Err(WebServerError::Config(format!("good threshold {good} exceeds 100")));
        }
        if warning >= good {
            return Err(WebServerError::Config(format!(
                "warning threshold {warning} must be below good threshold {good}"
            )));
        }
        if !matches!(
            self.log_level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            return Err(WebServerError::Config(format!("unknown log level '{}'", self.log_level)));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default().validate().unwrap();
        assert_eq!(config.bind_address().port(), 5000);
        assert_eq!(config.thresholds, ScoreThresholds { good: 80, warning: 60 });
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let config = ServerConfig {
            thresholds: ScoreThresholds { good: 60, warning: 80 },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(WebServerError::Config(_))));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let config = ServerConfig {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
