//! Process configuration read from the environment.

use std::net::{Ipv4Addr, SocketAddr};

/// Port the server listens on when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8000;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// `PORT` is set but is not a valid port number.
    #[error("invalid PORT value '{0}'")]
    InvalidPort(String),
}

/// Runtime settings. Empty variables count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// `DATABASE_URL`: document store connection string.
    pub database_url: Option<String>,
    /// `DATABASE_NAME`: database to use within the store.
    pub database_name: Option<String>,
    /// `GOOGLE_SHEETS_WEBHOOK_URL`: where registrations are forwarded.
    pub forward_url: Option<String>,
    /// `PORT`: listening port.
    pub port: u16,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidPort`] if `PORT` does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidPort`] if `PORT` does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        Ok(Self {
            database_url: get("DATABASE_URL"),
            database_name: get("DATABASE_NAME"),
            forward_url: get("GOOGLE_SHEETS_WEBHOOK_URL"),
            port,
        })
    }

    /// Address to bind: all interfaces on the configured port.
    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn config_defaults_when_environment_is_empty() {
        let config = match Config::from_lookup(lookup(&[])) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.database_url.is_none());
        assert!(config.forward_url.is_none());
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn config_treats_empty_values_as_unset() {
        let config = Config::from_lookup(lookup(&[
            ("GOOGLE_SHEETS_WEBHOOK_URL", ""),
            ("DATABASE_NAME", "handcrafted"),
            ("PORT", "9100"),
        ]));
        assert!(config.is_ok_and(|c| c.forward_url.is_none()
            && c.database_name.as_deref() == Some("handcrafted")
            && c.port == 9100));
    }

    #[test]
    fn config_rejects_bad_port() {
        let result = Config::from_lookup(lookup(&[("PORT", "eighty")]));
        assert!(matches!(result, Err(ConfigError::InvalidPort(p)) if p == "eighty"));
    }
}
