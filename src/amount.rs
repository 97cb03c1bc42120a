use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::engine::FormatError;

/// A value rounded to a fixed number of decimal places, stored as a scaled integer.
///
/// `Display` renders it the Indonesian way: `.` groups thousands and `,`
/// separates the fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Amount {
    scaled: i64,
    decimals: u32,
}

impl Amount {
    /// Decimal places beyond this are clamped so the scale fits a `u64`.
    pub const MAX_DECIMALS: u32 = 18;

    /// Round `value` half away from zero to `decimals` places.
    ///
    /// Rounding works on the shortest decimal that reads back as `value`
    /// (`1.005` rounds up to `1.01`), not on its binary expansion.
    pub fn round(value: f64, decimals: u32, field: &'static str) -> Result<Self, FormatError> {
        if !value.is_finite() {
            return Err(FormatError::NonFinite { field });
        }
        let decimals = decimals.min(Self::MAX_DECIMALS);
        let exact =
            Decimal::from_str(&value.to_string()).map_err(|_| FormatError::OutOfRange { field })?;
        let mut rounded =
            exact.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(decimals);
        if rounded.scale() != decimals {
            return Err(FormatError::OutOfRange { field });
        }
        let scaled =
            i64::try_from(rounded.mantissa()).map_err(|_| FormatError::OutOfRange { field })?;
        Ok(Amount { scaled, decimals })
    }

    /// `decimals` is clamped to [`Amount::MAX_DECIMALS`].
    pub fn from_scaled(scaled: i64, decimals: u32) -> Self {
        Amount {
            scaled,
            decimals: decimals.min(Self::MAX_DECIMALS),
        }
    }

    /// Drop trailing zero decimals, as a "maximum fraction digits" format does.
    pub fn trimmed(self) -> Self {
        let mut out = self;
        while out.decimals > 0 && out.scaled % 10 == 0 {
            out.scaled /= 10;
            out.decimals -= 1;
        }
        out
    }

    pub fn is_negative(&self) -> bool {
        self.scaled < 0
    }

    /// Digits only, without sign.
    fn write_abs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = 10u64.pow(self.decimals);
        let abs = self.scaled.unsigned_abs();
        let whole = (abs / scale).to_string();
        let frac = abs % scale;

        for (idx, digit) in whole.chars().enumerate() {
            if idx > 0 && (whole.len() - idx) % 3 == 0 {
                f.write_str(".")?;
            }
            write!(f, "{digit}")?;
        }
        if self.decimals > 0 {
            write!(f, ",{frac:0width$}", width = self.decimals as usize)?;
        }
        Ok(())
    }

    /// Render without the sign; callers place it themselves (e.g. before a currency symbol).
    pub fn unsigned(&self) -> impl fmt::Display + '_ {
        Unsigned(self)
    }
}

struct Unsigned<'a>(&'a Amount);

impl fmt::Display for Unsigned<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_abs(f)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        self.write_abs(f)
    }
}
