use serde::Serialize;

use crate::engine::FormatError;
use crate::format::Formatter;
use crate::model::{CalculationResult, ComparisonRow, PurchaseRequest};

/// Display strings for the result card shown next to the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub meter_number: String,
    pub purchase_amount: String,
    pub admin_fee: String,
    pub net_amount: String,
    pub tariff_per_unit: String,
    pub energy_quantity: String,
    pub total_paid: String,
}

impl Summary {
    pub fn render(
        request: &PurchaseRequest,
        result: &CalculationResult,
        fmt: &Formatter,
    ) -> Result<Self, FormatError> {
        Ok(Self {
            meter_number: request.meter_number().to_string(),
            purchase_amount: fmt.currency(request.purchase_amount(), "purchase amount")?,
            admin_fee: fmt.currency(result.admin_fee, "admin fee")?,
            net_amount: fmt.currency(result.net_amount, "net amount")?,
            tariff_per_unit: fmt.tariff(request.tariff_per_unit(), "tariff")?,
            energy_quantity: fmt.energy(result.energy_quantity, "energy quantity")?,
            total_paid: fmt.currency(result.total_paid, "total paid")?,
        })
    }
}

/// Display strings for one row of the comparison table.
///
/// The tariff column carries no unit suffix; the table header names it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonLine {
    pub label: String,
    pub tariff_per_unit: String,
    pub energy_quantity: String,
}

impl ComparisonLine {
    pub fn render(row: &ComparisonRow, fmt: &Formatter) -> Result<Self, FormatError> {
        Ok(Self {
            label: row.label.clone(),
            tariff_per_unit: fmt.tariff_number(row.tariff_per_unit, "tariff")?,
            energy_quantity: fmt.energy(row.energy_quantity, "energy quantity")?,
        })
    }

    /// Render a whole table, stopping at the first failure.
    pub fn render_all(rows: &[ComparisonRow], fmt: &Formatter) -> Result<Vec<Self>, FormatError> {
        rows.iter().map(|row| Self::render(row, fmt)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{calculate, compare};
    use crate::model::TariffCatalogEntry;

    #[test]
    fn summary_for_default_tariff() {
        let request = PurchaseRequest::new("5001", 50_000.0, None).unwrap();
        let result = calculate(request.purchase_amount(), request.tariff_per_unit());
        let summary = Summary::render(&request, &result, &Formatter::default()).unwrap();

        assert_eq!(summary.meter_number, "5001");
        assert_eq!(summary.purchase_amount, "Rp\u{a0}50.000");
        assert_eq!(summary.admin_fee, "Rp\u{a0}3.000");
        assert_eq!(summary.net_amount, "Rp\u{a0}47.000");
        assert_eq!(summary.tariff_per_unit, "1.467,28 / kWh");
        assert_eq!(summary.energy_quantity, "32,032 kWh");
        assert_eq!(summary.total_paid, "Rp\u{a0}50.000");
    }

    #[test]
    fn comparison_lines_follow_rows() {
        let catalog = vec![
            TariffCatalogEntry::new("450 VA", 1352.00),
            TariffCatalogEntry::new("900 VA", 1467.28),
        ];
        let rows = compare(94_000.0, &catalog);
        let lines = ComparisonLine::render_all(&rows, &Formatter::default()).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].label, "450 VA");
        assert_eq!(lines[0].tariff_per_unit, "1.352");
        assert_eq!(lines[0].energy_quantity, "69,527 kWh");
        assert_eq!(lines[1].label, "900 VA");
        assert_eq!(lines[1].tariff_per_unit, "1.467,28");
        assert_eq!(lines[1].energy_quantity, "64,064 kWh");
    }

    #[test]
    fn comparison_line_fails_on_nan() {
        let row = ComparisonRow {
            label: "x".to_string(),
            tariff_per_unit: 1.0,
            energy_quantity: f64::NAN,
        };
        assert!(ComparisonLine::render(&row, &Formatter::default()).is_err());
    }
}
