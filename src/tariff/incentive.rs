//! Energy efficiency incentive table: ordered usage bands mapped to RM/kWh rates.

use serde::Deserialize;

/// A single incentive band covering `min_kwh..=max_kwh` of monthly usage.
///
/// Rates are RM/kWh; negative values are discounts.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IncentiveBand {
    /// Lower usage bound, inclusive (kWh).
    pub min_kwh: f64,
    /// Upper usage bound, inclusive (kWh).
    pub max_kwh: f64,
    /// Incentive rate applied to the whole usage (RM/kWh, negative = discount).
    pub rate_rm_per_kwh: f64,
}

/// Ordered, disjoint incentive bands covering 1–1000 kWh.
///
/// Usage outside every band resolves to a zero rate; that is a defined
/// default, not an error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct IncentiveTable {
    bands: Vec<IncentiveBand>,
}

impl Default for IncentiveTable {
    fn default() -> Self {
        Self::tnb_domestic()
    }
}

impl IncentiveTable {
    /// Returns the published TNB domestic incentive table.
    pub fn tnb_domestic() -> Self {
        let bands = [
            (1.0, 200.0, -0.25),
            (201.0, 250.0, -0.245),
            (251.0, 300.0, -0.225),
            (301.0, 350.0, -0.21),
            (351.0, 400.0, -0.17),
            (401.0, 450.0, -0.145),
            (451.0, 500.0, -0.12),
            (501.0, 550.0, -0.105),
            (551.0, 600.0, -0.09),
            (601.0, 650.0, -0.075),
            (651.0, 700.0, -0.055),
            (701.0, 750.0, -0.045),
            (751.0, 800.0, -0.04),
            (801.0, 850.0, -0.025),
            (851.0, 900.0, -0.01),
            (901.0, 1000.0, -0.005),
        ];
        Self {
            bands: bands
                .iter()
                .map(|&(min_kwh, max_kwh, rate_rm_per_kwh)| IncentiveBand {
                    min_kwh,
                    max_kwh,
                    rate_rm_per_kwh,
                })
                .collect(),
        }
    }

    /// Builds a table from explicit bands (must satisfy [`IncentiveTable::validate`]).
    pub fn from_bands(bands: Vec<IncentiveBand>) -> Self {
        Self { bands }
    }

    /// The configured bands, in ascending order.
    pub fn bands(&self) -> &[IncentiveBand] {
        &self.bands
    }

    /// Looks up the incentive rate for a monthly usage total.
    ///
    /// Linear scan of the ordered bands; returns the rate of the first band
    /// with `min_kwh <= usage <= max_kwh`, or `0.0` when no band matches
    /// (usage <= 0, beyond the covered range, or inside a gap).
    pub fn rate_for(&self, usage_kwh: f64) -> f64 {
        for band in &self.bands {
            if usage_kwh >= band.min_kwh && usage_kwh <= band.max_kwh {
                return band.rate_rm_per_kwh;
            }
        }
        0.0
    }

    /// Checks that the bands are sorted ascending and non-overlapping.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated constraint.
    pub fn validate(&self) -> Result<(), String> {
        for (i, band) in self.bands.iter().enumerate() {
            if band.min_kwh > band.max_kwh {
                return Err(format!(
                    "band {i}: min_kwh {} exceeds max_kwh {}",
                    band.min_kwh, band.max_kwh
                ));
            }
            if let Some(prev) = i.checked_sub(1).and_then(|p| self.bands.get(p)) {
                if band.min_kwh <= prev.max_kwh {
                    return Err(format!(
                        "band {i}: min_kwh {} overlaps previous band ending at {}",
                        band.min_kwh, prev.max_kwh
                    ));
                }
            }
        }
        Ok(())
    }
}
