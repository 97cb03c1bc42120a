use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Range of the random suffix.
pub const SUFFIX_RANGE: RangeInclusive<u16> = 1000..=9999;

/// Reference printed on a receipt: `TX`, the last 8 digits of the epoch
/// millisecond clock, then a 4 digit random suffix.
///
/// Unique on a best-effort basis only; it is a display token, not a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    const MILLIS_MODULUS: u64 = 100_000_000;

    /// Build an id from its two components. Clocks shorter than 8 digits are
    /// zero-padded; suffixes outside [`SUFFIX_RANGE`] are clamped into it.
    pub fn from_parts(now_epoch_millis: u64, suffix: u16) -> Self {
        let millis = now_epoch_millis % Self::MILLIS_MODULUS;
        let suffix = suffix.clamp(*SUFFIX_RANGE.start(), *SUFFIX_RANGE.end());
        TransactionId(format!("TX{millis:08}{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate an id from an injected clock reading and random source.
pub fn generate<R: Rng + ?Sized>(now_epoch_millis: u64, rng: &mut R) -> TransactionId {
    TransactionId::from_parts(now_epoch_millis, rng.random_range(SUFFIX_RANGE))
}
