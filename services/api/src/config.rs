//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use axum::http::{HeaderValue, Uri};
use script_studio_core::Plan;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// How long the simulated generator takes to produce a script.
    pub generation_delay: Duration,
    pub initial_plan: Plan,
    pub initial_scripts_generated: u32,
    /// The single browser origin allowed by CORS, e.g. `http://localhost:5173`.
    pub cors_origin: HeaderValue,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_level: Level::INFO,
            generation_delay: Duration::from_millis(2000),
            initial_plan: Plan::Free,
            initial_scripts_generated: 3,
            cors_origin: HeaderValue::from_static("http://localhost:5173"),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Unset
    /// variables fall back to [`Config::default`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // --- Server Settings ---
        let bind_address = match lookup("BIND_ADDRESS") {
            Some(value) => value.parse::<SocketAddr>().map_err(|e| {
                ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
            })?,
            None => defaults.bind_address,
        };

        let log_level = match lookup("RUST_LOG") {
            Some(value) => value.parse::<Level>().map_err(|_| {
                ConfigError::InvalidValue(
                    "RUST_LOG".to_string(),
                    format!("'{}' is not a valid log level", value),
                )
            })?,
            None => defaults.log_level,
        };

        let cors_origin = match lookup("CORS_ORIGIN") {
            Some(value) => parse_origin(&value).map_err(|reason| {
                ConfigError::InvalidValue("CORS_ORIGIN".to_string(), reason)
            })?,
            None => defaults.cors_origin,
        };

        // --- Session Settings ---
        let generation_delay = match lookup("GENERATION_DELAY_MS") {
            Some(value) => value
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| {
                    ConfigError::InvalidValue("GENERATION_DELAY_MS".to_string(), e.to_string())
                })?,
            None => defaults.generation_delay,
        };

        let initial_plan = match lookup("INITIAL_PLAN") {
            Some(value) => value.parse::<Plan>().map_err(|e| {
                ConfigError::InvalidValue("INITIAL_PLAN".to_string(), e.to_string())
            })?,
            None => defaults.initial_plan,
        };

        let initial_scripts_generated = match lookup("INITIAL_SCRIPTS_GENERATED") {
            Some(value) => value.parse::<u32>().map_err(|e| {
                ConfigError::InvalidValue("INITIAL_SCRIPTS_GENERATED".to_string(), e.to_string())
            })?,
            None => defaults.initial_scripts_generated,
        };

        Ok(Self {
            bind_address,
            log_level,
            generation_delay,
            initial_plan,
            initial_scripts_generated,
            cors_origin,
        })
    }
}

/// Accepts `scheme://host[:port]` with nothing after the authority.
fn parse_origin(value: &str) -> Result<HeaderValue, String> {
    let uri = value.parse::<Uri>().map_err(|e| e.to_string())?;
    let has_path = uri.path_and_query().is_some_and(|pq| pq.as_str() != "/");
    if uri.scheme().is_none() || uri.authority().is_none() || has_path {
        return Err(format!("'{}' is not an origin", value));
    }
    HeaderValue::from_str(value.trim_end_matches('/')).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.generation_delay, Duration::from_millis(2000));
        assert_eq!(config.initial_plan, Plan::Free);
        assert_eq!(config.initial_scripts_generated, 3);
        assert_eq!(config.cors_origin, "http://localhost:5173");
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("RUST_LOG", "debug"),
            ("GENERATION_DELAY_MS", "0"),
            ("INITIAL_PLAN", "monthly"),
            ("INITIAL_SCRIPTS_GENERATED", "0"),
            ("CORS_ORIGIN", "https://studio.example.com"),
        ])
        .unwrap();
        assert_eq!(config.bind_address.port(), 8080);
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.generation_delay, Duration::ZERO);
        assert_eq!(config.initial_plan, Plan::Monthly);
        assert_eq!(config.initial_scripts_generated, 0);
        assert_eq!(config.cors_origin, "https://studio.example.com");
    }

    #[test]
    fn invalid_values_are_rejected() {
        for (key, value) in [
            ("BIND_ADDRESS", "not-an-address"),
            ("RUST_LOG", "chatty"),
            ("GENERATION_DELAY_MS", "-5"),
            ("INITIAL_PLAN", "enterprise"),
            ("INITIAL_SCRIPTS_GENERATED", "lots"),
            ("CORS_ORIGIN", "not an origin"),
            ("CORS_ORIGIN", "localhost:5173"),
            ("CORS_ORIGIN", "http://localhost:5173/app"),
        ] {
            match load(&[(key, value)]) {
                Err(ConfigError::InvalidValue(var, _)) => assert_eq!(var, key),
                other => panic!("expected InvalidValue for {}, got {:?}", key, other),
            }
        }
    }
}
