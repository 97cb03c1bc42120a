pub mod amount;
pub mod config;
pub mod csv;
pub mod engine;
pub mod format;
pub mod model;
pub mod receipt;

pub use amount::Amount;
pub use config::Config;
pub use engine::{Engine, Purchase, calculate, compare};
pub use model::{CalculationResult, ComparisonRow, PurchaseRequest, TariffCatalogEntry};
pub use receipt::{Receipt, TransactionId, to_plain_text};
