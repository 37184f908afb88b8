//! Process settings for the HTTP server.
//!
//! Settings are read from environment variables. Lookup is injected so the
//! parsing can be tested without touching the real environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{EngineError, EngineResult};

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Statutory tables directory used when `PAYROLL_CONFIG_DIR` is unset.
pub const DEFAULT_CONFIG_DIR: &str = "./config/ke_2025";

/// Server settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// TCP port to listen on (`PORT`).
    pub port: u16,
    /// Directory holding the statutory YAML tables (`PAYROLL_CONFIG_DIR`).
    pub config_dir: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
        }
    }
}

impl ServerSettings {
    /// Reads settings from the process environment.
    pub fn from_env() -> EngineResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match read("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| EngineError::InvalidConfig {
                    field: "PORT".to_string(),
                    message: format!("'{}' is not a valid port: {}", raw, e),
                })?,
            None => DEFAULT_PORT,
        };

        let config_dir = read("PAYROLL_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));

        Ok(Self { port, config_dir })
    }

    /// Address to bind, on all interfaces.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = ServerSettings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings, ServerSettings::default());
        assert_eq!(settings.port, 3000);
    }

    #[test]
    fn test_reads_port_and_config_dir() {
        let settings = ServerSettings::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("PAYROLL_CONFIG_DIR", "/etc/payroll"),
        ]))
        .unwrap();

        assert_eq!(settings.port, 8080);
        assert_eq!(settings.config_dir, PathBuf::from("/etc/payroll"));
        assert_eq!(settings.bind_addr().port(), 8080);
    }

    #[test]
    fn test_blank_port_falls_back_to_default() {
        let settings = ServerSettings::from_lookup(lookup_from(&[("PORT", "  ")])).unwrap();
        assert_eq!(settings.port, DEFAULT_PORT);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = ServerSettings::from_lookup(lookup_from(&[("PORT", "eighty")]));

        match result {
            Err(EngineError::InvalidConfig { field, message }) => {
                assert_eq!(field, "PORT");
                assert!(message.contains("eighty"));
            }
            _ => panic!("Expected InvalidConfig error"),
        }
    }
}
