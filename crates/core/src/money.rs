//! Currency amounts in minor units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg};

/// Display currency for every amount the statement API returns.
pub const CURRENCY: &str = "UAH";

/// Signed amount in minor currency units (kopiykas).
/// Kept as an integer so display never goes through floating point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnits(pub i64);

impl MinorUnits {
    /// Minor units per major unit.
    pub const SCALE: i64 = 100;

    pub const ZERO: MinorUnits = MinorUnits(0);

    /// Convert to major units (for logging only).
    pub fn to_major(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for MinorUnits {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Neg for MinorUnits {
    type Output = Self;
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

/// Major units with exactly two decimals, e.g. `-1550` -> `-15.50`.
impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = Self::SCALE as u64;
        write!(f, "{}{}.{:02}", sign, abs / scale, abs % scale)
    }
}
