use std::{env, time::Duration};

use reqwest::Url;

use crate::errors::ConfigError;

pub const DEFAULT_SERVER_URL: &str = "127.0.0.1:8080";
pub const DEFAULT_RPC_URL: &str = "https://testnet-rpc.irys.xyz/v1/execution-rpc";
pub const DEFAULT_EXPLORER_URL: &str = "https://testnet-explorer.irys.xyz";
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub server_url: String,
    pub rpc_url: Url,
    pub explorer_url: Url,
    pub session_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            rpc_url: Url::parse(DEFAULT_RPC_URL).expect("default RPC URL is valid"),
            explorer_url: Url::parse(DEFAULT_EXPLORER_URL).expect("default explorer URL is valid"),
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key/value source, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server_url = lookup("SERVER_URL").unwrap_or(defaults.server_url);
        let rpc_url = match lookup("RPC_URL") {
            Some(value) => parse_url("RPC_URL", &value)?,
            None => defaults.rpc_url,
        };
        let explorer_url = match lookup("EXPLORER_URL") {
            Some(value) => parse_url("EXPLORER_URL", &value)?,
            None => defaults.explorer_url,
        };
        let session_ttl = match lookup("SESSION_TTL_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        name: "SESSION_TTL_SECS",
                        value,
                    });
                }
            },
            None => defaults.session_ttl,
        };

        Ok(Self {
            server_url,
            rpc_url,
            explorer_url,
            session_ttl,
        })
    }

    /// Explorer page for `address`, e.g. `https://testnet-explorer.irys.xyz/address/0x...`.
    pub fn explorer_address_url(&self, address: &str) -> String {
        explorer_address_url(&self.explorer_url, address)
    }
}

pub fn explorer_address_url(explorer_url: &Url, address: &str) -> String {
    format!(
        "{}/address/{address}",
        explorer_url.as_str().trim_end_matches('/')
    )
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|e| ConfigError::InvalidUrl {
        name,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.rpc_url.as_str(), DEFAULT_RPC_URL);
        assert_eq!(
            config.explorer_address_url("0xabc"),
            "https://testnet-explorer.irys.xyz/address/0xabc"
        );
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_URL", "0.0.0.0:9000"),
            ("RPC_URL", "http://localhost:8545"),
            ("EXPLORER_URL", "https://explorer.example/"),
            ("SESSION_TTL_SECS", "60"),
        ]))
        .unwrap();

        assert_eq!(config.server_url, "0.0.0.0:9000");
        assert_eq!(config.rpc_url.as_str(), "http://localhost:8545/");
        assert_eq!(config.session_ttl, Duration::from_secs(60));
        assert_eq!(
            config.explorer_address_url("0x1"),
            "https://explorer.example/address/0x1"
        );
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_lookup(lookup_from(&[("RPC_URL", "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { name: "RPC_URL", .. }));

        let err = Config::from_lookup(lookup_from(&[("SESSION_TTL_SECS", "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                name: "SESSION_TTL_SECS",
                ..
            }
        ));
    }
}
