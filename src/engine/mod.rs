//! Token purchase engine.
//!
//! The pure building blocks are [`calculate`] and [`compare`]. [`Engine`]
//! strings them together with receipt assembly for one purchase and logs the
//! outcome. Clock and randomness are always passed in.

use chrono::{DateTime, FixedOffset, Local};
use rand::Rng;
use tracing::{debug, info};

use crate::config::{Config, ConfigError};
use crate::format::Formatter;
use crate::model::{
    ADMIN_FEE_RATIO, CalculationResult, ComparisonRow, NET_RATIO, PurchaseRequest,
    TariffCatalogEntry,
};
use crate::receipt::{self, ComparisonLine, Receipt, Summary, txid};

mod error;
pub mod validate;

pub use error::{EngineError, FormatError, ValidationError};
pub use validate::parse_request;

/// Split a purchase into fee and net amount and convert the net amount to energy.
///
/// Both arguments must be finite and strictly positive; [`PurchaseRequest`]
/// guarantees this.
pub fn calculate(purchase_amount: f64, tariff_per_unit: f64) -> CalculationResult {
    debug_assert!(purchase_amount.is_finite() && purchase_amount > 0.0);
    debug_assert!(tariff_per_unit.is_finite() && tariff_per_unit > 0.0);

    let net_amount = purchase_amount * NET_RATIO;
    CalculationResult {
        admin_fee: purchase_amount * ADMIN_FEE_RATIO,
        net_amount,
        energy_quantity: net_amount / tariff_per_unit,
        total_paid: purchase_amount,
    }
}

/// Energy obtainable from `net_amount` at each catalog tariff, in catalog order.
pub fn compare(net_amount: f64, catalog: &[TariffCatalogEntry]) -> Vec<ComparisonRow> {
    catalog
        .iter()
        .map(|entry| ComparisonRow {
            label: entry.label.clone(),
            tariff_per_unit: entry.tariff_per_unit,
            energy_quantity: net_amount / entry.tariff_per_unit,
        })
        .collect()
}

/// Everything produced by one calculation event.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub request: PurchaseRequest,
    pub result: CalculationResult,
    /// Present only when comparison was requested.
    pub comparison: Option<Vec<ComparisonRow>>,
    pub receipt: Receipt,
}

/// Runs calculation events against a fixed [`Config`].
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: Config,
    formatter: Formatter,
}

/// Public API
impl Engine {
    /// Build an engine, rejecting configs whose tariffs cannot be divided by.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let formatter = Formatter::new(config.non_finite);
        Ok(Self { config, formatter })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validate raw form fields, using the configured default tariff.
    pub fn parse(
        &self,
        meter_number: &str,
        purchase_amount: &str,
        tariff_per_unit: &str,
    ) -> Result<PurchaseRequest, ValidationError> {
        parse_request(
            meter_number,
            purchase_amount,
            tariff_per_unit,
            self.config.default_tariff,
        )
    }

    /// Calculate without producing a receipt.
    pub fn quote(&self, request: &PurchaseRequest) -> CalculationResult {
        calculate(request.purchase_amount(), request.tariff_per_unit())
    }

    /// Compare a finished calculation across the configured catalog.
    pub fn compare(&self, result: &CalculationResult) -> Vec<ComparisonRow> {
        compare(result.net_amount, &self.config.catalog)
    }

    /// Run one purchase: calculate, optionally compare, and issue a receipt stamped `now`.
    pub fn purchase<R: Rng + ?Sized>(
        &self,
        request: PurchaseRequest,
        with_comparison: bool,
        now: DateTime<FixedOffset>,
        rng: &mut R,
    ) -> Purchase {
        let result = self.quote(&request);
        let comparison = with_comparison.then(|| self.compare(&result));

        // pre-epoch clocks collapse to zero
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
        let transaction_id = txid::generate(millis, rng);

        info!(
            meter = %request.meter_number(),
            amount = request.purchase_amount(),
            tariff = request.tariff_per_unit(),
            energy = result.energy_quantity,
            tx = %transaction_id,
            "purchase calculated"
        );
        if let Some(rows) = &comparison {
            debug!(rows = rows.len(), "comparison table built");
        }

        let receipt = receipt::format(&request, &result, transaction_id, now);
        Purchase {
            request,
            result,
            comparison,
            receipt,
        }
    }

    /// [`Engine::purchase`] stamped with the local clock.
    pub fn purchase_now<R: Rng + ?Sized>(
        &self,
        request: PurchaseRequest,
        with_comparison: bool,
        rng: &mut R,
    ) -> Purchase {
        self.purchase(request, with_comparison, Local::now().fixed_offset(), rng)
    }

    /// Plain-text receipt, honoring the configured non-finite policy.
    pub fn render_receipt(&self, receipt: &Receipt) -> Result<String, FormatError> {
        receipt.render(&self.formatter)
    }

    /// Result card strings for a purchase.
    pub fn summary(&self, purchase: &Purchase) -> Result<Summary, FormatError> {
        Summary::render(&purchase.request, &purchase.result, &self.formatter)
    }

    /// Comparison table strings for a purchase; empty when no comparison was requested.
    pub fn comparison_lines(&self, purchase: &Purchase) -> Result<Vec<ComparisonLine>, FormatError> {
        match &purchase.comparison {
            Some(rows) => ComparisonLine::render_all(rows, &self.formatter),
            None => Ok(Vec::new()),
        }
    }

    /// Parse, purchase and render in one step, as a form submission does.
    pub fn submit<R: Rng + ?Sized>(
        &self,
        meter_number: &str,
        purchase_amount: &str,
        tariff_per_unit: &str,
        with_comparison: bool,
        now: DateTime<FixedOffset>,
        rng: &mut R,
    ) -> Result<(Purchase, String), EngineError> {
        let request = self.parse(meter_number, purchase_amount, tariff_per_unit)?;
        let purchase = self.purchase(request, with_comparison, now, rng);
        let text = self.render_receipt(&purchase.receipt)?;
        Ok((purchase, text))
    }
}
