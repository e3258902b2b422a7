//! Listener configuration.
//!
//! ```toml
//! warm_up = ["app::tickets::Ticket"]
//!
//! [cache]
//! backend = "bounded"
//! max_capacity = 1024
//! ```

use crate::cache::{BoundedCache, EnumFieldCache, MemoryCache};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid enumhook config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("bounded cache requires max_capacity")]
    MissingCapacity,

    #[error("bounded cache max_capacity must be greater than zero")]
    ZeroCapacity,

    #[error("max_capacity is only valid for the bounded cache backend")]
    UnexpectedCapacity,
}

///
/// EnumHookConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EnumHookConfig {
    pub cache: CacheConfig,
    /// Record types to resolve eagerly at startup.
    pub warm_up: Vec<String>,
}

impl EnumHookConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cache.validate()
    }

    /// Instantiate the configured cache backend.
    pub fn build_cache(&self) -> Result<Arc<dyn EnumFieldCache>, ConfigError> {
        self.validate()?;

        let cache: Arc<dyn EnumFieldCache> = match (self.cache.backend, self.cache.max_capacity) {
            (CacheBackend::Bounded, Some(capacity)) => Arc::new(BoundedCache::new(capacity)),
            (CacheBackend::Bounded, None) => return Err(ConfigError::MissingCapacity),
            (CacheBackend::Memory, _) => Arc::new(MemoryCache::new()),
        };

        Ok(cache)
    }
}

///
/// CacheConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub max_capacity: Option<u64>,
}

impl CacheConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.backend, self.max_capacity) {
            (CacheBackend::Bounded, None) => Err(ConfigError::MissingCapacity),
            (CacheBackend::Bounded, Some(0)) => Err(ConfigError::ZeroCapacity),
            (CacheBackend::Memory, Some(_)) => Err(ConfigError::UnexpectedCapacity),
            _ => Ok(()),
        }
    }
}

///
/// CacheBackend
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackend {
    #[default]
    Memory,
    Bounded,
}

///
/// TESTS
///
