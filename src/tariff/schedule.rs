//! TNB domestic tariff constants and blended-rate helpers.

use serde::Deserialize;

use crate::quantity::{Percent, SenPerKwh};
use crate::tariff::incentive::IncentiveTable;

/// Immutable tiered-rate schedule for a domestic TNB account.
///
/// All constants default to the published domestic tariff; a TOML `[tariff]`
/// section may override individual values. Changing them is a data update,
/// not a logic change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffSchedule {
    /// Energy rate for monthly usage up to the tier threshold (sen/kWh).
    pub energy_low: SenPerKwh,
    /// Energy rate when monthly usage exceeds the tier threshold (sen/kWh).
    pub energy_high: SenPerKwh,
    /// Flat capacity rate (sen/kWh).
    pub capacity: SenPerKwh,
    /// Flat network rate (sen/kWh).
    pub network: SenPerKwh,
    /// Fixed retail surcharge applied whenever excess usage exists (RM).
    pub retail_charge_rm: f64,
    /// Non-service block size: usage up to this is billed without service taxes (kWh).
    pub base_block_kwh: f64,
    /// Usage above this switches the energy rate to the high tier (kWh).
    pub energy_tier_threshold_kwh: f64,
    /// KWTBB levy percentage of core energy-related charges.
    pub kwtbb: Percent,
    /// KWTBB applies only when monthly usage exceeds this (kWh).
    pub kwtbb_threshold_kwh: f64,
    /// SST percentage applied to the service subtotal.
    pub sst: Percent,
    /// Blended retail rate for the low tier (RM/kWh), used in bill↔kWh conversions.
    pub retail_blended_low_rm: f64,
    /// Blended retail rate for the high tier (RM/kWh).
    pub retail_blended_high_rm: f64,
    /// Bill amount above which a bill is assumed to sit on the high blended tier (RM).
    pub bill_tier_threshold_rm: f64,
    /// Energy efficiency incentive bands.
    pub incentive: IncentiveTable,
}

impl Default for TariffSchedule {
    fn default() -> Self {
        Self::tnb_domestic()
    }
}

impl TariffSchedule {
    /// Returns the published TNB domestic schedule.
    ///
    /// Blended retail rates are (energy + capacity + network) / 100:
    /// low (27.03 + 4.55 + 12.85) / 100 = 0.4443, high 0.5443.
    pub fn tnb_domestic() -> Self {
        Self {
            energy_low: SenPerKwh(27.03),
            energy_high: SenPerKwh(37.03),
            capacity: SenPerKwh(4.55),
            network: SenPerKwh(12.85),
            retail_charge_rm: 10.0,
            base_block_kwh: 600.0,
            energy_tier_threshold_kwh: 1500.0,
            kwtbb: Percent(1.6),
            kwtbb_threshold_kwh: 300.0,
            sst: Percent(8.0),
            retail_blended_low_rm: 0.4443,
            retail_blended_high_rm: 0.5443,
            bill_tier_threshold_rm: 664.5,
            incentive: IncentiveTable::tnb_domestic(),
        }
    }

    /// Energy rate in RM/kWh for a monthly usage total.
    ///
    /// Tier selection is usage-total-based: the high rate applies uniformly
    /// to the whole month once usage exceeds the threshold, never per-block.
    pub fn energy_rate_rm(&self, usage_kwh: f64) -> f64 {
        if usage_kwh > self.energy_tier_threshold_kwh {
            self.energy_high.as_rm()
        } else {
            self.energy_low.as_rm()
        }
    }

    /// Blended retail rate (RM/kWh) for simplified bill/kWh conversions.
    ///
    /// Not used by the itemized calculation.
    pub fn blended_retail_rate(&self, monthly_usage_kwh: f64) -> f64 {
        if monthly_usage_kwh > self.energy_tier_threshold_kwh {
            self.retail_blended_high_rm
        } else {
            self.retail_blended_low_rm
        }
    }

    /// Estimates which blended tier a bill amount sits on.
    pub fn blended_rate_from_bill(&self, bill_rm: f64) -> f64 {
        if bill_rm <= self.bill_tier_threshold_rm {
            self.retail_blended_low_rm
        } else {
            self.retail_blended_high_rm
        }
    }

    /// Converts a bill amount to an estimated monthly usage (kWh).
    pub fn estimate_usage_from_bill(&self, bill_rm: f64) -> f64 {
        bill_rm / self.blended_rate_from_bill(bill_rm)
    }

    /// Converts a monthly usage to an estimated bill amount (RM).
    pub fn estimate_bill_from_usage(&self, usage_kwh: f64) -> f64 {
        usage_kwh * self.blended_retail_rate(usage_kwh)
    }
}
