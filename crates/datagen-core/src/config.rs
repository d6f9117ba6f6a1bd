//! Factory configuration

use crate::error::ConfigError;
use datagen_supplier::DEFAULT_STRING_LENGTH;
use serde::{Deserialize, Serialize};

/// Default minimum container size (inclusive)
pub const DEFAULT_MIN_SIZE: usize = 1;

/// Default maximum container size (exclusive)
pub const DEFAULT_MAX_SIZE: usize = 11;

/// Serializable factory configuration
///
/// Every field is optional in the TOML form:
///
/// ```toml
/// seed = 42
/// min_size = 2
/// max_size = 5
/// string_length = 12
/// basic_suppliers = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Seed for the factory's random source; entropy when absent
    pub seed: Option<u64>,
    /// Minimum container size (inclusive)
    pub min_size: usize,
    /// Maximum container size (exclusive)
    pub max_size: usize,
    /// Length of generated strings
    pub string_length: usize,
    /// Whether to register the basic leaf suppliers
    pub basic_suppliers: bool,
}

impl FactoryConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With seed
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// With container size bounds
    #[inline]
    #[must_use]
    pub fn with_size_range(mut self, min: usize, max: usize) -> Self {
        self.min_size = min;
        self.max_size = max;
        self
    }

    /// With string length
    #[inline]
    #[must_use]
    pub fn with_string_length(mut self, length: usize) -> Self {
        self.string_length = length;
        self
    }

    /// Without the basic leaf suppliers
    #[inline]
    #[must_use]
    pub fn without_basic_suppliers(mut self) -> Self {
        self.basic_suppliers = false;
        self
    }

    /// Check invariants
    ///
    /// # Errors
    /// Empty size range or zero string length
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_size >= self.max_size {
            return Err(ConfigError::EmptySizeRange {
                min: self.min_size,
                max: self.max_size,
            });
        }
        if self.string_length == 0 {
            return Err(ConfigError::ZeroStringLength);
        }
        Ok(())
    }

    /// Parse and validate TOML configuration
    ///
    /// # Errors
    /// Malformed TOML or invalid values
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            seed: None,
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            string_length: DEFAULT_STRING_LENGTH,
            basic_suppliers: true,
        }
    }
}
