//! Configuration types.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

/// Default port for the API server.
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind host for the API server.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

/// Settings for `tasky serve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host (default: 127.0.0.1).
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port (default: 5000).
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("invalid server host '{}'", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Settings for the client commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root (default: http://localhost:5000/api/v1).
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_api_url() -> String {
    format!("http://localhost:{}/api/v1", DEFAULT_PORT)
}

impl Config {
    /// Load configuration from a single file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        // An empty or comment-only file parses as null.
        let config: Option<Config> = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.client.api_url, "http://localhost:5000/api/v1");
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("server:\n  port: 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.client, ClientConfig::default());
    }

    #[test]
    fn bind_addr_rejects_hostnames() {
        let server = ServerConfig {
            host: "localhost".into(),
            port: 1,
        };
        assert!(server.bind_addr().is_err());

        let server = ServerConfig {
            host: "0.0.0.0".into(),
            port: 5000,
        };
        assert_eq!(server.bind_addr().unwrap().to_string(), "0.0.0.0:5000");
    }
}
