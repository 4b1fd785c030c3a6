use crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Server connection settings, stored under the `[qcs]` section of the
/// config file.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct QcsConfig {
    /// Hostname or IP address of the QCS server. Required for automatic
    /// base URL resolution; leave unset only when clients are built with an
    /// explicit URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Server port. When unset the scheme's default port is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Whether the server is published over https. Defaults to false.
    #[serde(default)]
    pub https: bool,
    /// Username for the token endpoint. Defaults to the server's
    /// administrative account when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Password for the token endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Configuration structure for the client and CLI.
/// Handles loading, saving, and managing connection settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Server connection settings.
    #[serde(default)]
    pub qcs: QcsConfig,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            qcs: QcsConfig::default(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// A missing config file yields the default configuration; a client
    /// built from it will fail at construction unless environment variables
    /// or an explicit URL supply a target server.
    ///
    /// # Environment Variables
    /// - `QCS_HOSTNAME` - Override server hostname
    /// - `QCS_PORT` - Override server port
    /// - `QCS_HTTPS` - Override the https flag (`true`/`false`)
    /// - `QCS_USERNAME` - Override username for the token endpoint
    /// - `QCS_PASSWORD` - Override password for the token endpoint
    /// - `QCS_LOG_FILE` - Override log file path
    /// - `QCS_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(ApiError)` - Error occurred during load or validation
    ///
    /// # Notes
    /// - Config file is stored in platform-specific config directory
    /// - Environment variables take precedence over config file values
    pub async fn load() -> Result<Self, ApiError> {
        let config_path = get_config_path();

        let mut config: Config = if Path::new(&config_path).exists() {
            let content = fs::read_to_string(&config_path).await?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // Override with environment variables if present
        if let Ok(hostname) = std::env::var("QCS_HOSTNAME") {
            config.qcs.hostname = Some(hostname);
        }

        if let Some(port) = std::env::var("QCS_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
        {
            config.qcs.port = Some(port);
        }

        if let Ok(https) = std::env::var("QCS_HTTPS") {
            config.qcs.https = matches!(https.to_lowercase().as_str(), "true" | "1" | "yes");
        }

        if let Ok(username) = std::env::var("QCS_USERNAME") {
            config.qcs.username = Some(username);
        }

        if let Ok(password) = std::env::var("QCS_PASSWORD") {
            config.qcs.password = Some(password);
        }

        if let Ok(log_file_path) = std::env::var("QCS_LOG_FILE") {
            config.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var("QCS_HTTP_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.http_timeout_seconds = timeout;
        }

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration settings
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is valid
    /// * `Err(ApiError)` - Configuration validation failed
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_config(&self.qcs, &self.log_file_path)
    }

    /// Saves current configuration to the default config file location.
    ///
    /// # Returns
    /// * `Ok(())` - Successfully saved configuration
    /// * `Err(ApiError)` - Error occurred during save
    ///
    /// # Notes
    /// - Creates config directory if it doesn't exist
    /// - Uses TOML format for storage
    pub async fn save(&self) -> Result<(), ApiError> {
        let config_path = get_config_path();
        let config_dir = Path::new(&config_path)
            .parent()
            .ok_or_else(|| ApiError::config_error("Invalid config file path"))?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }

        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(&config_path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    /// Returns the platform-specific path for the config file
    pub fn get_config_path() -> String {
        get_config_path()
    }

    /// Returns the platform-specific path for the log directory
    pub fn get_log_dir_path() -> String {
        get_log_dir_path()
    }

    /// Displays current configuration to stdout, or a notice when no config
    /// file exists yet.
    pub async fn display() -> Result<(), ApiError> {
        let config_path = get_config_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("Hostname: {}", config.qcs.hostname.as_deref().unwrap_or("<unset>"));
            match config.qcs.port {
                Some(port) => println!("Port: {port}"),
                None => println!("Port: <scheme default>"),
            }
            println!("Https: {}", config.qcs.https);
            println!(
                "Username: {}",
                config.qcs.username.as_deref().unwrap_or("<default>")
            );
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_qcs_env() {
        for key in [
            "QCS_HOSTNAME",
            "QCS_PORT",
            "QCS_HTTPS",
            "QCS_USERNAME",
            "QCS_PASSWORD",
            "QCS_LOG_FILE",
            "QCS_HTTP_TIMEOUT",
        ] {
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    fn test_parse_full_config() {
        let content = r#"
            http_timeout_seconds = 10

            [qcs]
            hostname = "qcs.example.com"
            port = 8443
            https = true
            username = "qe"
            password = "hunter2"
        "#;
        let config: Config = toml::from_str(content).unwrap();
        assert_eq!(config.qcs.hostname.as_deref(), Some("qcs.example.com"));
        assert_eq!(config.qcs.port, Some(8443));
        assert!(config.qcs.https);
        assert_eq!(config.qcs.username.as_deref(), Some("qe"));
        assert_eq!(config.qcs.password.as_deref(), Some("hunter2"));
        assert_eq!(config.http_timeout_seconds, 10);
    }

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let content = r#"
            [qcs]
            hostname = "10.0.0.5"
        "#;
        let config: Config = toml::from_str(content).unwrap();
        assert_eq!(config.qcs.hostname.as_deref(), Some("10.0.0.5"));
        assert_eq!(config.qcs.port, None);
        assert!(!config.qcs.https);
        assert_eq!(config.qcs.username, None);
        assert_eq!(config.http_timeout_seconds, DEFAULT_HTTP_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_empty_config_parses() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.qcs.hostname, None);
        assert!(!config.qcs.https);
    }

    #[tokio::test]
    #[serial]
    async fn test_env_overrides_take_precedence() {
        clear_qcs_env();
        unsafe {
            std::env::set_var("QCS_HOSTNAME", "env-host");
            std::env::set_var("QCS_PORT", "9000");
            std::env::set_var("QCS_HTTPS", "true");
            std::env::set_var("QCS_USERNAME", "env-user");
            std::env::set_var("QCS_HTTP_TIMEOUT", "5");
        }

        let config = Config::load().await.unwrap();
        assert_eq!(config.qcs.hostname.as_deref(), Some("env-host"));
        assert_eq!(config.qcs.port, Some(9000));
        assert!(config.qcs.https);
        assert_eq!(config.qcs.username.as_deref(), Some("env-user"));
        assert_eq!(config.http_timeout_seconds, 5);

        clear_qcs_env();
    }

    #[tokio::test]
    #[serial]
    async fn test_invalid_env_port_is_ignored() {
        clear_qcs_env();
        unsafe {
            std::env::set_var("QCS_HOSTNAME", "env-host");
            std::env::set_var("QCS_PORT", "not-a-port");
        }

        let config = Config::load().await.unwrap();
        assert_eq!(config.qcs.port, None);

        clear_qcs_env();
    }

    #[test]
    fn test_round_trip_serialization() {
        let config = Config {
            qcs: QcsConfig {
                hostname: Some("qcs.example.com".to_string()),
                port: Some(443),
                https: true,
                username: Some("admin".to_string()),
                password: Some("pass".to_string()),
            },
            log_file_path: None,
            http_timeout_seconds: 30,
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.qcs.hostname, config.qcs.hostname);
        assert_eq!(parsed.qcs.port, config.qcs.port);
        assert_eq!(parsed.qcs.https, config.qcs.https);
    }
}
