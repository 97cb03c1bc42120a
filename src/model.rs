//! Core domain types for token purchase calculations.

use serde::{Deserialize, Serialize};

/// Tariff applied when the purchase form leaves the tariff blank.
pub const DEFAULT_TARIFF: f64 = 1467.28;

/// Share of the purchase amount taken as administrative fee.
pub const ADMIN_FEE_RATIO: f64 = 0.06;

/// Share of the purchase amount converted to energy.
pub const NET_RATIO: f64 = 0.94;

/// Power classes shown in the comparison table, in display order.
pub const POWER_TARIFFS: [(&str, f64); 4] = [
    ("450 VA", 1352.00),
    ("900 VA", 1467.28),
    ("1300 VA", 1467.28),
    ("2200 VA", 1699.53),
];

/// A validated purchase.
///
/// Only the validation boundary builds these (see [`crate::engine::validate`]),
/// so both numeric fields are always finite and strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseRequest {
    pub(crate) meter_number: String,
    pub(crate) purchase_amount: f64,
    pub(crate) tariff_per_unit: f64,
}

impl PurchaseRequest {
    pub fn meter_number(&self) -> &str {
        &self.meter_number
    }

    pub fn purchase_amount(&self) -> f64 {
        self.purchase_amount
    }

    pub fn tariff_per_unit(&self) -> f64 {
        self.tariff_per_unit
    }
}

/// Derived values of one calculation event. Full precision, no rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub admin_fee: f64,
    pub net_amount: f64,
    pub energy_quantity: f64,
    /// Equal to the purchase amount: the fee is already inside it.
    pub total_paid: f64,
}

/// One tier of the tariff catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffCatalogEntry {
    pub label: String,
    #[serde(alias = "tariff")]
    pub tariff_per_unit: f64,
}

impl TariffCatalogEntry {
    pub fn new(label: impl Into<String>, tariff_per_unit: f64) -> Self {
        Self {
            label: label.into(),
            tariff_per_unit,
        }
    }
}

/// The built-in catalog, built from [`POWER_TARIFFS`].
pub fn default_catalog() -> Vec<TariffCatalogEntry> {
    POWER_TARIFFS
        .iter()
        .map(|(label, tariff)| TariffCatalogEntry::new(*label, *tariff))
        .collect()
}

/// Energy obtainable at one catalog tariff for the same net amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub label: String,
    pub tariff_per_unit: f64,
    pub energy_quantity: f64,
}
