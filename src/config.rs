//! Runtime configuration from environment variables.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Read config from the environment. Every variable has a default except
    /// DATABASE_URL, which falls back to a local dev database.
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/pen_catalog".into()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into()),
            max_connections: env_parsed("MAX_CONNECTIONS", 5),
            request_timeout: Duration::from_secs(env_parsed("REQUEST_TIMEOUT_SECS", 30)),
        }
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = AppConfig::from_env();
        assert!(cfg.max_connections >= 1);
        assert!(cfg.request_timeout >= Duration::from_secs(1));
        assert!(!cfg.bind_addr.is_empty());
    }

    #[test]
    fn garbage_values_fall_back_to_default() {
        assert_eq!(env_parsed::<u32>("PEN_CATALOG_UNSET_VAR", 7), 7);
    }
}
