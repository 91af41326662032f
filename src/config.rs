use std::path::PathBuf;

use crate::error::ConfigError;

/// Upper bound for `PS_MAX_PROCS`, the largest `pid_max` on 64-bit Linux.
pub const MAX_CAPACITY: usize = 4_194_304;

pub const PROC_ROOT_ENV: &str = "PS_PROC_ROOT";
pub const MAX_PROCS_ENV: &str = "PS_MAX_PROCS";

/// Startup settings. The command line carries no options, so everything
/// comes from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub proc_root: PathBuf,
    /// Fixed snapshot capacity. `None` lets the process table size it.
    pub capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            proc_root: PathBuf::from("/proc"),
            capacity: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(root) = lookup(PROC_ROOT_ENV).filter(|r| !r.is_empty()) {
            config.proc_root = PathBuf::from(root);
        }

        if let Some(value) = lookup(MAX_PROCS_ENV) {
            config.capacity = match value.trim().parse::<usize>() {
                Ok(n) if (1..=MAX_CAPACITY).contains(&n) => Some(n),
                _ => {
                    return Err(ConfigError::InvalidCapacity {
                        var: MAX_PROCS_ENV,
                        value,
                        max: MAX_CAPACITY,
                    })
                }
            };
        }

        Ok(config)
    }
}
