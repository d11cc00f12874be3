//! Configuration management for the todo store.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::reducer::TodoEnvironment;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;
use todo_store_runtime::StoreConfig;

/// Errors from loading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed
    #[error("Invalid value {value:?} for {key}: expected {expected}")]
    Invalid {
        /// Variable name
        key: &'static str,
        /// Value found
        value: String,
        /// What would have been accepted
        expected: &'static str,
    },
}

/// How ids for new todos are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// 1, 2, 3, ...
    #[default]
    Sequential,
    /// Random 64-bit ids, re-drawn on collision
    Random,
}

impl FromStr for IdStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "random" => Ok(Self::Random),
            _ => Err(ConfigError::Invalid {
                key: "TODO_ID_STRATEGY",
                value: s.to_string(),
                expected: "`sequential` or `random`",
            }),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Id generation scheme (`TODO_ID_STRATEGY`, default `sequential`)
    pub id_strategy: IdStrategy,
    /// Shared store queue capacity (`TODO_QUEUE_CAPACITY`, default 64)
    pub queue_capacity: usize,
    /// Log filter directives (`RUST_LOG`)
    pub log_filter: String,
}

impl Config {
    /// Default log filter when `RUST_LOG` is unset
    pub const DEFAULT_LOG_FILTER: &'static str = "todo=info,todo_store_runtime=info";

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a key is present but unparseable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let id_strategy = lookup("TODO_ID_STRATEGY")
            .map(|value| value.parse::<IdStrategy>())
            .transpose()?
            .unwrap_or_default();

        let queue_capacity = match lookup("TODO_QUEUE_CAPACITY") {
            Some(value) => value.trim().parse::<usize>().map_err(|_| ConfigError::Invalid {
                key: "TODO_QUEUE_CAPACITY",
                value,
                expected: "a non-negative integer",
            })?,
            None => StoreConfig::DEFAULT_QUEUE_CAPACITY,
        };

        let log_filter =
            lookup("RUST_LOG").unwrap_or_else(|| Self::DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            id_strategy,
            queue_capacity,
            log_filter,
        })
    }

    /// Reducer environment matching the configured id strategy
    #[must_use]
    pub fn environment(&self) -> TodoEnvironment {
        match self.id_strategy {
            IdStrategy::Sequential => TodoEnvironment::sequential(),
            IdStrategy::Random => TodoEnvironment::random(),
        }
    }

    /// Runtime configuration for a shared store
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.queue_capacity)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::default(),
            queue_capacity: StoreConfig::DEFAULT_QUEUE_CAPACITY,
            log_filter: Self::DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
