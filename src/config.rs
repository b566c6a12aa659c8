//! Runtime configuration read from the environment.

use crate::error::{Error, Result};
use crate::output::OutputFormat;
use crate::processing::MissingCapacityPolicy;
use std::path::PathBuf;

/// Control-channel command served by this crate.
pub const COMMAND_NAME: &str = "free-addresses";
/// The only daemon whose state the command may run against.
pub const EXPECTED_PROCESS: &str = "kea-dhcp4";
pub const COLUMN_LABELS: [&str; 2] = ["subnet-id", "free-addresses"];
pub const DEFAULT_SNAPSHOT: &str = "kea-state.json";

pub const ENV_SNAPSHOT: &str = "FREE_ADDRESSES_SNAPSHOT";
pub const ENV_COMMAND: &str = "FREE_ADDRESSES_COMMAND";
pub const ENV_OUTPUT: &str = "FREE_ADDRESSES_OUTPUT";
pub const ENV_ON_MISSING_CAPACITY: &str = "FREE_ADDRESSES_ON_MISSING_CAPACITY";
pub const ENV_DERIVE_CAPACITY: &str = "FREE_ADDRESSES_DERIVE_CAPACITY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the server state export.
    pub snapshot: PathBuf,
    pub command: String,
    pub output: OutputFormat,
    pub on_missing_capacity: MissingCapacityPolicy,
    /// Fill absent `total-addresses` from pool sizes before computing.
    pub derive_capacity: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            snapshot: PathBuf::from(DEFAULT_SNAPSHOT),
            command: COMMAND_NAME.to_string(),
            output: OutputFormat::default(),
            on_missing_capacity: MissingCapacityPolicy::default(),
            derive_capacity: false,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(Error::InvalidConfig {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(snapshot) = lookup(ENV_SNAPSHOT) {
            config.snapshot = PathBuf::from(snapshot);
        }
        if let Some(command) = lookup(ENV_COMMAND) {
            config.command = command;
        }
        if let Some(output) = lookup(ENV_OUTPUT) {
            config.output = output.parse()?;
        }
        if let Some(policy) = lookup(ENV_ON_MISSING_CAPACITY) {
            config.on_missing_capacity = policy.parse()?;
        }
        if let Some(derive) = lookup(ENV_DERIVE_CAPACITY) {
            config.derive_capacity = parse_bool(ENV_DERIVE_CAPACITY, &derive)?;
        }
        log::debug!("config: {config:?}");
        Ok(config)
    }
}
