use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding `backend.project_id`
pub const ENV_PROJECT_ID: &str = "HRDESK_PROJECT_ID";
/// Environment variable overriding `backend.public_key`
pub const ENV_PUBLIC_KEY: &str = "HRDESK_PUBLIC_KEY";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Server address (e.g., "0.0.0.0:8080")
    #[serde(default = "default_addr")]
    pub addr: String,
    /// Identity recorded on leave request approvals and rejections
    #[serde(default = "default_approver")]
    pub approver: String,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
    /// Record backend configuration
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which transport the record gateway talks through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Hosted record platform over HTTPS
    Http,
    /// In-process tables, optionally seeded from a JSON file
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_kind")]
    pub kind: BackendKind,
    /// Base URL of the record API
    #[serde(default)]
    pub base_url: String,
    /// Project identifier (opaque credential)
    #[serde(default)]
    pub project_id: String,
    /// Public access key (opaque credential)
    #[serde(default)]
    pub public_key: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Seed file for the memory backend
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

// Default value functions
fn default_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_approver() -> String {
    "HR Admin".to_string()
}

fn default_backend_kind() -> BackendKind {
    BackendKind::Memory
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            approver: default_approver(),
            log: LogConfig::default(),
            backend: BackendConfig::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: default_backend_kind(),
            base_url: String::new(),
            project_id: String::new(),
            public_key: String::new(),
            timeout_secs: default_timeout_secs(),
            seed_path: None,
        }
    }
}

impl BackendConfig {
    /// Check that an HTTP backend has everything it needs to connect
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.kind != BackendKind::Http {
            return Ok(());
        }
        if self.base_url.trim().is_empty() {
            anyhow::bail!("backend.base_url is required for the http backend");
        }
        if self.project_id.trim().is_empty() {
            anyhow::bail!("project id missing: set backend.project_id or {}", ENV_PROJECT_ID);
        }
        if self.public_key.trim().is_empty() {
            anyhow::bail!("public key missing: set backend.public_key or {}", ENV_PUBLIC_KEY);
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply the credential overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENV_PROJECT_ID).ok(),
            std::env::var(ENV_PUBLIC_KEY).ok(),
        );
    }

    fn apply_overrides(&mut self, project_id: Option<String>, public_key: Option<String>) {
        if let Some(id) = project_id.filter(|v| !v.trim().is_empty()) {
            self.backend.project_id = id;
        }
        if let Some(key) = public_key.filter(|v| !v.trim().is_empty()) {
            self.backend.public_key = key;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.addr, "0.0.0.0:8080");
        assert_eq!(config.approver, "HR Admin");
        assert_eq!(config.backend.kind, BackendKind::Memory);
        assert!(config.backend.validate().is_ok());
    }

    #[test]
    fn test_toml_parse() {
        let toml_str = r#"
            addr = "127.0.0.1:9000"
            approver = "People Ops"

            [backend]
            kind = "http"
            base_url = "https://records.example.com/v1"
            project_id = "proj-1"
            public_key = "pk-1"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.addr, "127.0.0.1:9000");
        assert_eq!(config.approver, "People Ops");
        assert_eq!(config.backend.kind, BackendKind::Http);
        assert_eq!(config.backend.timeout_secs, 30);
        assert!(config.backend.validate().is_ok());
    }

    #[test]
    fn test_http_backend_requires_credentials() {
        let mut config = Config::default();
        config.backend.kind = BackendKind::Http;
        config.backend.base_url = "https://records.example.com".to_string();
        assert!(config.backend.validate().is_err());

        config.apply_overrides(Some("proj".to_string()), Some("key".to_string()));
        assert_eq!(config.backend.project_id, "proj");
        assert_eq!(config.backend.public_key, "key");
        assert!(config.backend.validate().is_ok());
    }

    #[test]
    fn test_blank_env_does_not_override() {
        let mut config = Config::default();
        config.backend.project_id = "from-file".to_string();
        config.apply_overrides(Some("  ".to_string()), None);
        assert_eq!(config.backend.project_id, "from-file");
    }
}
