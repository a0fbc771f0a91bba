//! Server Configuration

use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 15;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen address; `BIND_ADDR`, else `0.0.0.0:$PORT`
    pub bind_addr: String,

    /// Allowed browser origin; any origin when unset
    pub cors_origin: Option<String>,

    /// Bound on each model call before falling back
    pub model_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            cors_origin: None,
            model_timeout: Duration::from_secs(DEFAULT_MODEL_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            bind_addr: non_empty("BIND_ADDR")
                .or_else(|| {
                    non_empty("PORT")
                        .and_then(|p| p.parse::<u16>().ok())
                        .map(|port| format!("0.0.0.0:{port}"))
                })
                .unwrap_or(defaults.bind_addr),
            cors_origin: non_empty("CORS_ORIGIN"),
            model_timeout: non_empty("MODEL_TIMEOUT_SECS")
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map_or(defaults.model_timeout, Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(|_: &str| None);
        assert_eq!(config.bind_addr, "0.0.0.0:5000");
        assert!(config.cors_origin.is_none());
        assert_eq!(config.model_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(|key: &str| match key {
            "BIND_ADDR" => Some("127.0.0.1:8080".into()),
            "CORS_ORIGIN" => Some("http://localhost:3000".into()),
            "MODEL_TIMEOUT_SECS" => Some("4".into()),
            _ => None,
        });
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:3000"));
        assert_eq!(config.model_timeout, Duration::from_secs(4));
    }

    #[test]
    fn test_port_used_when_bind_addr_unset() {
        let config = ServerConfig::from_lookup(|key: &str| (key == "PORT").then(|| "8081".to_string()));
        assert_eq!(config.bind_addr, "0.0.0.0:8081");

        let config = ServerConfig::from_lookup(|key: &str| match key {
            "PORT" => Some("8081".into()),
            "BIND_ADDR" => Some("127.0.0.1:9000".into()),
            _ => None,
        });
        assert_eq!(config.bind_addr, "127.0.0.1:9000");

        let config = ServerConfig::from_lookup(|key: &str| (key == "PORT").then(|| "http".to_string()));
        assert_eq!(config.bind_addr, "0.0.0.0:5000");
    }

    #[test]
    fn test_invalid_timeout_falls_back_to_default() {
        for raw in ["zero", "0", "-3", ""] {
            let config = ServerConfig::from_lookup(|key: &str| {
                (key == "MODEL_TIMEOUT_SECS").then(|| raw.to_string())
            });
            assert_eq!(config.model_timeout, Duration::from_secs(15), "input {raw:?}");
        }
    }
}
