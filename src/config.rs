//! Runtime configuration and shared constants.
//!
//! Values come from compiled-in defaults, optionally overridden by
//! environment variables (a `.env` file is honoured via `dotenv`).

use std::env;

/// Default number of addresses materialised when enumerating a subnet.
pub const HOST_LIST_LIMIT: u64 = 1000;

/// Hard ceiling for a configured host list limit (one /16).
pub const MAX_HOST_LIST_LIMIT: u64 = 65_536;

/// Counts with at most this many host bits are displayed as exact integers.
pub const EXACT_DISPLAY_BITS: u8 = 32;

/// Default log4rs configuration file.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

const ENV_HOST_LIMIT: &str = "SUBNET_CALC_HOST_LIMIT";
const ENV_LOG_CONFIG: &str = "SUBNET_CALC_LOG_CONFIG";

/// Settings resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Display ceiling for host enumeration.
    pub host_list_limit: u64,
    /// Path of the log4rs configuration file.
    pub log_config_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host_list_limit: HOST_LIST_LIMIT,
            log_config_file: LOG_CONFIG_FILE.to_string(),
        }
    }
}

impl Settings {
    /// Build settings from the process environment (after loading `.env`).
    pub fn from_env() -> Settings {
        dotenv::dotenv().ok();
        Settings::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    ///
    /// Unparseable values are ignored with a warning and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Settings
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings {
            log_config_file: log_config_from_lookup(&lookup),
            ..Settings::default()
        };

        if let Some(raw) = lookup(ENV_HOST_LIMIT) {
            match raw.trim().parse::<u64>() {
                Ok(limit) => settings.set_host_list_limit(limit),
                Err(e) => log::warn!("Ignoring {ENV_HOST_LIMIT}={raw:?}: {e}"),
            }
        }

        settings
    }

    /// Set the host list limit, capped at [`MAX_HOST_LIST_LIMIT`].
    pub fn set_host_list_limit(&mut self, limit: u64) {
        if limit > MAX_HOST_LIST_LIMIT {
            log::warn!("Host list limit {limit} capped at {MAX_HOST_LIST_LIMIT}");
        }
        self.host_list_limit = limit.min(MAX_HOST_LIST_LIMIT);
    }
}

/// Path of the log4rs configuration file, read before logging is up.
pub fn log_config_from_env() -> String {
    dotenv::dotenv().ok();
    log_config_from_lookup(&|key: &str| env::var(key).ok())
}

fn log_config_from_lookup<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(ENV_LOG_CONFIG)
        .map(|path| path.trim().to_string())
        .filter(|path| !path.is_empty())
        .unwrap_or_else(|| LOG_CONFIG_FILE.to_string())
}
