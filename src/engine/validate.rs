//! Validation boundary: the only way to obtain a [`PurchaseRequest`].

use tracing::debug;

use super::ValidationError;
use crate::model::{DEFAULT_TARIFF, PurchaseRequest};

impl PurchaseRequest {
    /// Build a request, falling back to [`DEFAULT_TARIFF`] when no tariff is given.
    pub fn new(
        meter_number: impl Into<String>,
        purchase_amount: f64,
        tariff_per_unit: Option<f64>,
    ) -> Result<Self, ValidationError> {
        Self::with_default_tariff(meter_number, purchase_amount, tariff_per_unit, DEFAULT_TARIFF)
    }

    /// Build a request, falling back to `default_tariff` when no tariff is given.
    pub fn with_default_tariff(
        meter_number: impl Into<String>,
        purchase_amount: f64,
        tariff_per_unit: Option<f64>,
        default_tariff: f64,
    ) -> Result<Self, ValidationError> {
        let meter_number = meter_number.into().trim().to_string();
        let result = check(&meter_number, purchase_amount, tariff_per_unit, default_tariff);
        if let Err(e) = &result {
            debug!(meter = %meter_number, reason = %e, "purchase rejected");
        }
        let tariff_per_unit = result?;

        Ok(Self {
            meter_number,
            purchase_amount,
            tariff_per_unit,
        })
    }
}

/// Parse raw form fields into a request.
///
/// A blank or non-numeric tariff means "use the default"; a numeric tariff
/// that is zero or negative is rejected.
pub fn parse_request(
    meter_number: &str,
    purchase_amount: &str,
    tariff_per_unit: &str,
    default_tariff: f64,
) -> Result<PurchaseRequest, ValidationError> {
    if meter_number.trim().is_empty() {
        return Err(ValidationError::EmptyMeterNumber);
    }

    let purchase_amount = purchase_amount.trim();
    if purchase_amount.is_empty() {
        return Err(ValidationError::MissingAmount);
    }
    let amount: f64 = purchase_amount
        .parse()
        .map_err(|_| ValidationError::InvalidAmount(purchase_amount.to_string()))?;

    let tariff = tariff_per_unit
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|t| !t.is_nan());

    PurchaseRequest::with_default_tariff(meter_number, amount, tariff, default_tariff)
}

/// Returns the tariff to use.
fn check(
    meter_number: &str,
    purchase_amount: f64,
    tariff_per_unit: Option<f64>,
    default_tariff: f64,
) -> Result<f64, ValidationError> {
    if meter_number.is_empty() {
        return Err(ValidationError::EmptyMeterNumber);
    }
    if !purchase_amount.is_finite() {
        return Err(ValidationError::InvalidAmount(purchase_amount.to_string()));
    }
    if purchase_amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount(purchase_amount));
    }

    let tariff = tariff_per_unit.unwrap_or(default_tariff);
    if !tariff.is_finite() || tariff <= 0.0 {
        return Err(ValidationError::InvalidTariff(tariff));
    }
    Ok(tariff)
}
