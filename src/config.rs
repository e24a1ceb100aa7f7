//! Store configuration

use anyhow::{bail, Context, Result};

/// Default upper bound on vertex payload length, in bytes
pub const DEFAULT_MAX_DATA_LEN: usize = 500;

/// Environment variable overriding [`StoreConfig::max_data_len`]
pub const ENV_MAX_DATA_LEN: &str = "GRAPHSTORE_MAX_DATA_LEN";

/// Tunables for a [`GraphStore`](crate::GraphStore)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum vertex payload length in bytes (inclusive)
    pub max_data_len: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_data_len: DEFAULT_MAX_DATA_LEN,
        }
    }
}

impl StoreConfig {
    /// Set the payload bound
    #[must_use]
    pub const fn with_max_data_len(mut self, max_data_len: usize) -> Self {
        self.max_data_len = max_data_len;
        self
    }

    /// Build a config from defaults overridden by the process environment
    ///
    /// # Errors
    ///
    /// Returns error if an override is set but is not a valid value
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from defaults overridden by `lookup`
    ///
    /// # Errors
    ///
    /// Returns error if an override is set but is not a valid value
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_MAX_DATA_LEN) {
            config.max_data_len = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_MAX_DATA_LEN}={raw:?} is not a valid length"))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the config is usable
    ///
    /// # Errors
    ///
    /// Returns error if `max_data_len` is zero (no payload could ever be stored)
    pub fn validate(&self) -> Result<()> {
        if self.max_data_len == 0 {
            bail!("max_data_len must be greater than zero");
        }
        Ok(())
    }
}
