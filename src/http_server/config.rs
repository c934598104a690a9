//! Listener settings

use std::io;
use std::net::{IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};

/// Listen on every interface unless told otherwise
pub const DEFAULT_HOST: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 8080;

/// Where the read API listens. Both fields may be omitted from the
/// `http` section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    /// IP literal; host names are not resolved
    pub host: String,
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl HttpServerConfig {
    /// Default host on `port`
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port`, as written in logs
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Checks the listener can be bound as written
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("http.port must be > 0".to_string());
        }
        self.host
            .parse::<IpAddr>()
            .map(|_| ())
            .map_err(|_| format!("http.host '{}' is not an IP address", self.host))
    }

    /// Listen address for the server socket
    pub fn resolve(&self) -> io::Result<SocketAddr> {
        let ip: IpAddr = self.host.parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid listen address {}: {}", self.bind_address(), e),
            )
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_partial_section() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 3001}"#).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, 3001);

        let config: HttpServerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, HttpServerConfig::default());
    }

    #[test]
    fn test_resolve() {
        let addr = HttpServerConfig::with_port(9000).resolve().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:9000");

        let v6 = HttpServerConfig {
            host: "::1".into(),
            port: 8080,
        };
        assert_eq!(v6.resolve().unwrap().to_string(), "[::1]:8080");
    }

    #[test]
    fn test_validate() {
        assert!(HttpServerConfig::default().validate().is_ok());
        assert!(HttpServerConfig::with_port(0).validate().is_err());

        let named = HttpServerConfig {
            host: "localhost".into(),
            port: 8080,
        };
        assert_eq!(
            named.validate().unwrap_err(),
            "http.host 'localhost' is not an IP address"
        );
        assert!(named.resolve().is_err());
    }
}
