use crate::errors::{Error, Result};
use serde::Deserialize;
use std::fs;

const DEFAULT_API_HOST: &str = "127.0.0.1";
const DEFAULT_API_PORT: u16 = 1234;

/// Model for a Bacalhau API connection configuration
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct BacalhauConfig {
    #[serde(default = "default_api_host")]
    pub api_host: String,
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    #[serde(default)]
    pub tls: bool,
    pub auth_token: Option<String>,
    pub namespace: Option<String>,
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_owned()
}

fn default_api_port() -> u16 {
    DEFAULT_API_PORT
}

impl Default for BacalhauConfig {
    fn default() -> Self {
        BacalhauConfig {
            api_host: default_api_host(),
            api_port: default_api_port(),
            tls: false,
            auth_token: None,
            namespace: None,
        }
    }
}

impl BacalhauConfig {
    /// Reads a Bacalhau connection configuration from a JSON file
    ///
    /// # Arguments
    ///
    /// * `path` - String slice that holds the path to the JSON config file
    pub fn from_file(path: &str) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(data.as_str()).map_err(|source| Error::ConfigParse {
            path: path.to_owned(),
            source,
        })
    }

    /// Applies values given on the command line or through the environment.
    pub fn with_overrides(
        mut self,
        api_host: Option<String>,
        api_port: Option<u16>,
        namespace: Option<String>,
    ) -> Self {
        if let Some(host) = api_host {
            self.api_host = host;
        }
        if let Some(port) = api_port {
            self.api_port = port;
        }
        if namespace.is_some() {
            self.namespace = namespace;
        }
        self
    }

    /// Base URL of the API, e.g. `http://127.0.0.1:1234`
    pub fn base_url(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.api_host, self.api_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_config_file() {
        let config = BacalhauConfig::from_file("test/test_config.json").unwrap();

        assert_eq!(config.api_host, "bootstrap.production.bacalhau.org");
        assert_eq!(config.api_port, 443);
        assert!(config.tls);
        assert_eq!(config.auth_token.as_deref(), Some("token-from-file"));
        assert_eq!(config.base_url(), "https://bootstrap.production.bacalhau.org:443");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: BacalhauConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config, BacalhauConfig::default());
        assert_eq!(config.base_url(), "http://127.0.0.1:1234");
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let err = BacalhauConfig::from_file("test/does_not_exist.json").unwrap_err();

        assert!(err.to_string().contains("test/does_not_exist.json"));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let config = BacalhauConfig::default().with_overrides(
            Some("10.0.0.5".to_owned()),
            None,
            Some("team-a".to_owned()),
        );

        assert_eq!(config.base_url(), "http://10.0.0.5:1234");
        assert_eq!(config.namespace.as_deref(), Some("team-a"));
    }
}
