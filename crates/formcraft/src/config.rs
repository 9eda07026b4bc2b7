// File: src/config.rs
// Purpose: Configuration parsing from formcraft.toml plus environment overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "formcraft.toml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub site: SiteConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Form backend connection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    /// Base URL of the REST API (default: "http://localhost:5000/api")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Static bearer token sent with every backend call
    #[serde(default)]
    pub token: Option<String>,
}

/// Public site settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Absolute origin used for share links (e.g. "https://forms.example.com")
    #[serde(default)]
    pub public_url: Option<String>,
}

// Default values
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_title() -> String {
    "Formcraft".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            public_url: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Apply `FORMCRAFT_*` overrides from the process environment
    pub fn with_env(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("FORMCRAFT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("FORMCRAFT_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("FORMCRAFT_PORT is not a valid port: {:?}", port))?;
        }
        if let Some(url) = get("FORMCRAFT_BACKEND_URL") {
            self.backend.base_url = url;
        }
        if let Some(token) = get("FORMCRAFT_API_TOKEN") {
            self.backend.token = Some(token);
        }

        Ok(self)
    }

    /// `host:port` for binding the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.backend.base_url, "http://localhost:5000/api");
        assert_eq!(config.backend.token, None);
        assert_eq!(config.site.title, "Formcraft");
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_sections() {
        let toml = r#"
            [backend]
            base_url = "https://api.example.com"

            [site]
            public_url = "https://forms.example.com"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.backend.base_url, "https://api.example.com");
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.site.public_url.as_deref(), Some("https://forms.example.com"));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load("does/not/exist/formcraft.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("FORMCRAFT_PORT", "8080"),
            ("FORMCRAFT_BACKEND_URL", "http://backend:5000/api"),
            ("FORMCRAFT_API_TOKEN", "secret"),
            ("FORMCRAFT_HOST", " "),
        ]
        .into_iter()
        .collect();

        let config = Config::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.backend.base_url, "http://backend:5000/api");
        assert_eq!(config.backend.token.as_deref(), Some("secret"));
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_bad_port_override() {
        let result = Config::default().with_overrides(|key| {
            (key == "FORMCRAFT_PORT").then(|| "eighty".to_string())
        });
        assert!(result.is_err());
    }
}
