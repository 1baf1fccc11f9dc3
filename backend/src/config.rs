//! Server configuration.
//!
//! Values are read once at startup from environment variables. Missing
//! variables use the defaults below; unparsable ones are logged and ignored.
//!
//! | Variable                  | Default     |
//! |---------------------------|-------------|
//! | `TEMPLATER_HOST`          | `127.0.0.1` |
//! | `TEMPLATER_PORT`          | `8080`      |
//! | `TEMPLATER_OPEN_BROWSER`  | `true`      |
//! | `TEMPLATER_MAX_UPLOAD_MB` | `20`        |

use log::warn;
use std::str::FromStr;

const HOST_VAR: &str = "TEMPLATER_HOST";
const PORT_VAR: &str = "TEMPLATER_PORT";
const OPEN_BROWSER_VAR: &str = "TEMPLATER_OPEN_BROWSER";
const MAX_UPLOAD_VAR: &str = "TEMPLATER_MAX_UPLOAD_MB";

const MEGABYTE: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Open the UI in the default browser once the server is up.
    pub open_browser: bool,
    /// Upper bound for the combined size of all fields of one form upload.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            open_browser: true,
            max_upload_bytes: 20 * MEGABYTE,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup(HOST_VAR)
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port: parse_var(&lookup, PORT_VAR).unwrap_or(defaults.port),
            open_browser: lookup(OPEN_BROWSER_VAR)
                .and_then(|v| parse_flag(OPEN_BROWSER_VAR, &v))
                .unwrap_or(defaults.open_browser),
            max_upload_bytes: parse_var::<usize>(&lookup, MAX_UPLOAD_VAR)
                .and_then(|mb| mb.checked_mul(MEGABYTE))
                .unwrap_or(defaults.max_upload_bytes),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value {:?} for {}", raw, key);
            None
        }
    }
}

fn parse_flag(key: &str, raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!("Ignoring invalid value {:?} for {}", raw, key);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(config(&[]), ServerConfig::default());
        assert_eq!(ServerConfig::default().url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn reads_every_variable() {
        let config = config(&[
            ("TEMPLATER_HOST", "0.0.0.0"),
            ("TEMPLATER_PORT", "3000"),
            ("TEMPLATER_OPEN_BROWSER", "off"),
            ("TEMPLATER_MAX_UPLOAD_MB", "2"),
        ]);
        assert_eq!(
            config,
            ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                open_browser: false,
                max_upload_bytes: 2 * MEGABYTE,
            }
        );
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = config(&[
            ("TEMPLATER_HOST", "  "),
            ("TEMPLATER_PORT", "eighty"),
            ("TEMPLATER_OPEN_BROWSER", "maybe"),
            ("TEMPLATER_MAX_UPLOAD_MB", "-1"),
        ]);
        assert_eq!(config, ServerConfig::default());
    }
}
