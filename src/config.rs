//! Engine configuration.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::csv::{CatalogError, read_catalog};
use crate::format::NonFinitePolicy;
use crate::model::{DEFAULT_TARIFF, TariffCatalogEntry, default_catalog};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("default tariff must be positive, got {0}")]
    InvalidDefaultTariff(f64),

    #[error("catalog entry '{0}' has non-positive tariff {1}")]
    InvalidCatalogEntry(String, f64),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Immutable settings shared by every calculation event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tariff used when a request does not name one.
    pub default_tariff: f64,
    /// Tariffs compared side by side, in display order.
    pub catalog: Vec<TariffCatalogEntry>,
    pub non_finite: NonFinitePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_tariff: DEFAULT_TARIFF,
            catalog: default_catalog(),
            non_finite: NonFinitePolicy::default(),
        }
    }
}

impl Config {
    /// Replace the catalog with one read from a csv file.
    pub fn with_catalog_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        self.catalog = read_catalog(path)?;
        Ok(self)
    }

    pub fn with_non_finite(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = policy;
        self
    }

    /// Check tariffs are usable as divisors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.default_tariff.is_finite() && self.default_tariff > 0.0) {
            return Err(ConfigError::InvalidDefaultTariff(self.default_tariff));
        }
        for entry in &self.catalog {
            if !(entry.tariff_per_unit.is_finite() && entry.tariff_per_unit > 0.0) {
                return Err(ConfigError::InvalidCatalogEntry(
                    entry.label.clone(),
                    entry.tariff_per_unit,
                ));
            }
        }
        Ok(())
    }
}
