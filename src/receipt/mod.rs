//! Receipts: the record of one completed purchase and its plain-text form.
//!
//! The plain-text layout is consumed by clipboard and print collaborators and
//! must stay byte-for-byte stable.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::engine::FormatError;
use crate::format::{self, Formatter};
use crate::model::{CalculationResult, PurchaseRequest};

mod summary;
pub mod txid;

pub use summary::{ComparisonLine, Summary};
pub use txid::TransactionId;

const HEADER: &str = "STRUK TOKEN PLN";
const SEPARATOR: &str = "--------------------------";
const FOOTER: &str = "Terima kasih — PLN";

/// Immutable record of one calculation event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub meter_number: String,
    pub purchase_amount: f64,
    pub admin_fee: f64,
    pub net_amount: f64,
    pub tariff_per_unit: f64,
    pub energy_quantity: f64,
    pub total_paid: f64,
    pub timestamp: DateTime<FixedOffset>,
    pub transaction_id: TransactionId,
}

/// Assemble a receipt. Timestamp and id are supplied by the caller.
pub fn format(
    request: &PurchaseRequest,
    result: &CalculationResult,
    transaction_id: TransactionId,
    timestamp: DateTime<FixedOffset>,
) -> Receipt {
    Receipt {
        meter_number: request.meter_number().to_string(),
        purchase_amount: request.purchase_amount(),
        admin_fee: result.admin_fee,
        net_amount: result.net_amount,
        tariff_per_unit: request.tariff_per_unit(),
        energy_quantity: result.energy_quantity,
        total_paid: result.total_paid,
        timestamp,
        transaction_id,
    }
}

/// Plain-text receipt, rejecting non-finite values.
pub fn to_plain_text(receipt: &Receipt) -> Result<String, FormatError> {
    receipt.render(&Formatter::default())
}

impl Receipt {
    /// Plain-text receipt using the given formatter's non-finite policy.
    pub fn render(&self, fmt: &Formatter) -> Result<String, FormatError> {
        let lines = [
            HEADER.to_string(),
            SEPARATOR.to_string(),
            format!("Nomor Meteran: {}", self.meter_number),
            format!("Nominal: {}", fmt.currency(self.purchase_amount, "purchase amount")?),
            format!("Biaya Admin: {}", fmt.currency(self.admin_fee, "admin fee")?),
            format!("Harga Dasar: {}", fmt.currency(self.net_amount, "net amount")?),
            format!("Tarif: {}", fmt.tariff(self.tariff_per_unit, "tariff")?),
            format!("Daya (kWh): {}", fmt.energy(self.energy_quantity, "energy quantity")?),
            format!("Total Dibayar: {}", fmt.currency(self.total_paid, "total paid")?),
            SEPARATOR.to_string(),
            format!("Waktu: {}", format::timestamp(&self.timestamp.naive_local())),
            format!("ID: {}", self.transaction_id),
            String::new(),
            FOOTER.to_string(),
        ];
        Ok(lines.join("\n"))
    }
}
