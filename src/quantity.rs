//! Unit-tagged numeric helpers for tariff arithmetic.
//!
//! Tariff constants mix sen/kWh and RM/kWh, and user-facing percentages are
//! on the 0–100 scale rather than fractions. Keeping the conversions behind
//! explicit types prevents silent unit mismatches inside the calculators.

use serde::Deserialize;

/// A per-kWh rate expressed in sen (1 RM = 100 sen).
///
/// Published TNB rate sheets quote energy, capacity, and network rates in
/// sen/kWh; all bill arithmetic happens in RM, so every use site must go
/// through [`SenPerKwh::as_rm`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SenPerKwh(pub f64);

impl SenPerKwh {
    /// Converts the rate to RM/kWh.
    pub fn as_rm(self) -> f64 {
        self.0 / 100.0
    }
}

/// A percentage on the 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    /// Converts the percentage to a 0.0–1.0 fraction.
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }

    /// Converts to a fraction clamped to [0.0, 1.0].
    ///
    /// Used where an out-of-range input must degrade gracefully instead of
    /// amplifying a quantity (e.g. self-consumption share of generation).
    pub fn clamped_fraction(self) -> f64 {
        self.fraction().clamp(0.0, 1.0)
    }
}

/// Rounds a monetary amount to 2 decimal places (whole sen).
///
/// TNB statements round the KWTBB levy and SST line items to whole sen
/// before summing them into the grand total.
pub fn round_rm(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
