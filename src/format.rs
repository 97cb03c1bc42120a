//! Display formatting for currency, energy, tariffs and timestamps.
//!
//! Follows the Indonesian locale: `Rp` prefix, `.` thousands separator,
//! `,` decimal separator.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::Amount;
use crate::engine::FormatError;

/// Currency symbol, followed by a no-break space.
pub const CURRENCY_PREFIX: &str = "Rp\u{a0}";

/// Unit suffix of energy quantities.
pub const ENERGY_SUFFIX: &str = " kWh";

/// Unit suffix of tariffs.
pub const TARIFF_SUFFIX: &str = " / kWh";

const TIMESTAMP_FORMAT: &str = "%-d/%-m/%Y, %H.%M.%S";

/// What to show for a NaN or infinite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonFinitePolicy {
    /// Fail with [`FormatError::NonFinite`].
    #[default]
    Reject,
    /// Render the value as zero and log a warning.
    DisplayZero,
}

/// Formats values according to a [`NonFinitePolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Formatter {
    policy: NonFinitePolicy,
}

impl Formatter {
    pub fn new(policy: NonFinitePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> NonFinitePolicy {
        self.policy
    }

    /// Integer-rounded currency, e.g. `Rp 100.000`.
    pub fn currency(&self, value: f64, field: &'static str) -> Result<String, FormatError> {
        let amount = self.round(value, 0, field)?;
        let sign = if amount.is_negative() { "-" } else { "" };
        Ok(format!("{sign}{CURRENCY_PREFIX}{}", amount.unsigned()))
    }

    /// Energy with exactly three decimals, e.g. `64,064 kWh`.
    pub fn energy(&self, value: f64, field: &'static str) -> Result<String, FormatError> {
        let amount = self.round(value, 3, field)?;
        Ok(format!("{amount}{ENERGY_SUFFIX}"))
    }

    /// Tariff number with up to two decimals, e.g. `1.467,28`.
    pub fn tariff_number(&self, value: f64, field: &'static str) -> Result<String, FormatError> {
        Ok(self.round(value, 2, field)?.trimmed().to_string())
    }

    /// Tariff with unit suffix, e.g. `1.352 / kWh`.
    pub fn tariff(&self, value: f64, field: &'static str) -> Result<String, FormatError> {
        Ok(format!("{}{TARIFF_SUFFIX}", self.tariff_number(value, field)?))
    }

    fn round(&self, value: f64, decimals: u32, field: &'static str) -> Result<Amount, FormatError> {
        match (Amount::round(value, decimals, field), self.policy) {
            (Err(FormatError::NonFinite { .. }), NonFinitePolicy::DisplayZero) => {
                warn!(field, value = %value, "non-finite value displayed as zero");
                Ok(Amount::from_scaled(0, decimals))
            }
            (result, _) => result,
        }
    }
}

/// Local wall-clock time as printed on receipts, e.g. `16/10/2026, 14.05.09`.
pub fn timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reject() -> Formatter {
        Formatter::new(NonFinitePolicy::Reject)
    }

    #[test]
    fn currency_has_no_decimals() {
        let f = reject();
        assert_eq!(f.currency(100_000.0, "x").unwrap(), "Rp\u{a0}100.000");
        assert_eq!(f.currency(6_000.0, "x").unwrap(), "Rp\u{a0}6.000");
        assert_eq!(f.currency(94_000.0, "x").unwrap(), "Rp\u{a0}94.000");
        assert_eq!(f.currency(1_234.5, "x").unwrap(), "Rp\u{a0}1.235");
        assert_eq!(f.currency(0.4, "x").unwrap(), "Rp\u{a0}0");
    }

    #[test]
    fn currency_places_sign_before_symbol() {
        assert_eq!(reject().currency(-5_000.0, "x").unwrap(), "-Rp\u{a0}5.000");
    }

    #[test]
    fn energy_has_three_decimals() {
        let f = reject();
        assert_eq!(f.energy(94_000.0 / 1467.28, "x").unwrap(), "64,064 kWh");
        assert_eq!(f.energy(94_000.0 / 1352.0, "x").unwrap(), "69,527 kWh");
        assert_eq!(f.energy(2.0, "x").unwrap(), "2,000 kWh");
        assert_eq!(f.energy(1_234.5, "x").unwrap(), "1.234,500 kWh");
    }

    #[test]
    fn tariff_has_up_to_two_decimals() {
        let f = reject();
        assert_eq!(f.tariff(1467.28, "x").unwrap(), "1.467,28 / kWh");
        assert_eq!(f.tariff(1352.0, "x").unwrap(), "1.352 / kWh");
        assert_eq!(f.tariff(1699.5, "x").unwrap(), "1.699,5 / kWh");
        assert_eq!(f.tariff_number(1699.53, "x").unwrap(), "1.699,53");
    }

    #[test]
    fn tariff_rounds_typed_half_way_values_up() {
        let f = reject();
        assert_eq!(f.tariff(1024.215, "x").unwrap(), "1.024,22 / kWh");
        assert_eq!(f.tariff_number(1.005, "x").unwrap(), "1,01");
        assert_eq!(f.energy(0.0005, "x").unwrap(), "0,001 kWh");
    }

    #[test]
    fn reject_policy_fails_on_nan() {
        let f = reject();
        assert_eq!(
            f.currency(f64::NAN, "admin fee"),
            Err(FormatError::NonFinite { field: "admin fee" })
        );
        assert_eq!(
            f.energy(f64::INFINITY, "energy"),
            Err(FormatError::NonFinite { field: "energy" })
        );
    }

    #[test]
    fn display_zero_policy_renders_zero() {
        let f = Formatter::new(NonFinitePolicy::DisplayZero);
        assert_eq!(f.currency(f64::NAN, "x").unwrap(), "Rp\u{a0}0");
        assert_eq!(f.energy(f64::NAN, "x").unwrap(), "0,000 kWh");
        assert_eq!(f.tariff(f64::NEG_INFINITY, "x").unwrap(), "0 / kWh");
    }

    #[test]
    fn display_zero_policy_still_rejects_out_of_range() {
        let f = Formatter::new(NonFinitePolicy::DisplayZero);
        assert_eq!(f.currency(1e300, "x"), Err(FormatError::OutOfRange { field: "x" }));
    }

    #[test]
    fn default_policy_is_reject() {
        assert_eq!(Formatter::default().policy(), NonFinitePolicy::Reject);
    }

    #[test]
    fn timestamp_uses_local_layout() {
        let at = NaiveDate::from_ymd_opt(2026, 10, 6)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap();
        assert_eq!(timestamp(&at), "6/10/2026, 09.05.03");
    }
}
