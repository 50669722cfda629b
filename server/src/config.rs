//! Server configuration module.
//!
//! This module provides configuration loading for the dataset server from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `DATASET_SERVER_LISTEN_ADDRESS`: IP address to bind (default: `127.0.0.1`)
//! - `DATASET_SERVER_LISTEN_PORT`: Port to listen on (default: `3000`)
//!
//! # Invariants
//!
//! - `listen_address` is always a parsed IP address
//! - `listen_port` is always a valid port number

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Name of the listen address variable.
pub const LISTEN_ADDRESS_VAR: &str = "DATASET_SERVER_LISTEN_ADDRESS";
/// Name of the listen port variable.
pub const LISTEN_PORT_VAR: &str = "DATASET_SERVER_LISTEN_PORT";

/// Server configuration.
#[derive(Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub listen_address: IpAddr,
    /// Port to listen on for HTTP requests.
    pub listen_port: u16,
}

/// Error returned when loading configuration fails.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: Self::DEFAULT_ADDRESS,
            listen_port: Self::DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Default port for the server.
    pub const DEFAULT_PORT: u16 = 3000;
    /// Default bind address.
    pub const DEFAULT_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `from_env` is this with `std::env::var`; tests pass a closure so they
    /// never touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let listen_address = match lookup(LISTEN_ADDRESS_VAR) {
            Some(value) => value
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: LISTEN_ADDRESS_VAR.to_string(),
                    message: format!("'{value}' is not a valid IP address"),
                })?,
            None => Self::DEFAULT_ADDRESS,
        };

        let listen_port = match lookup(LISTEN_PORT_VAR) {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: LISTEN_PORT_VAR.to_string(),
                message: format!("'{value}' is not a valid port number (must be 0-65535)"),
            })?,
            None => Self::DEFAULT_PORT,
        };

        Ok(Self {
            listen_address,
            listen_port,
        })
    }

    /// The socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_address, self.listen_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let owned: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| {
            owned
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.to_owned())
        }
    }

    #[test]
    fn test_default_values() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            (LISTEN_ADDRESS_VAR, "0.0.0.0"),
            (LISTEN_PORT_VAR, "8080"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup_from(&[(LISTEN_PORT_VAR, "70000")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for DATASET_SERVER_LISTEN_PORT: '70000' is not a valid port number (must be 0-65535)"
        );
    }

    #[test]
    fn test_invalid_address() {
        let err = ServerConfig::from_lookup(lookup_from(&[(LISTEN_ADDRESS_VAR, "localhost")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == LISTEN_ADDRESS_VAR));
    }
}
