//! Fully itemized bill record produced by the bill calculator.

use std::fmt;

/// An itemized monthly grid bill.
///
/// Every charge is split into a non-service portion (the first
/// `base_block_kwh` of usage) and a service portion (usage beyond it).
/// The split controls surcharge and tax applicability only; the same
/// per-kWh rates apply to both portions.
///
/// Created fresh per calculation call and immutable once returned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BillBreakdown {
    /// Usage billed at non-service terms (kWh).
    pub usage_non_service_kwh: f64,
    /// Usage billed at service terms (kWh).
    pub usage_service_kwh: f64,
    /// Total metered usage (kWh).
    pub usage_total_kwh: f64,

    /// Energy charge on the non-service portion (RM).
    pub energy_non_service_rm: f64,
    /// Energy charge on the service portion (RM).
    pub energy_service_rm: f64,
    /// Total energy charge (RM).
    pub energy_total_rm: f64,

    /// Capacity charge on the non-service portion (RM).
    pub capacity_non_service_rm: f64,
    /// Capacity charge on the service portion (RM).
    pub capacity_service_rm: f64,
    /// Total capacity charge (RM).
    pub capacity_total_rm: f64,

    /// Network charge on the non-service portion (RM).
    pub network_non_service_rm: f64,
    /// Network charge on the service portion (RM).
    pub network_service_rm: f64,
    /// Total network charge (RM).
    pub network_total_rm: f64,

    /// AFA fuel-cost adjustment on the non-service portion (RM).
    pub afa_non_service_rm: f64,
    /// AFA fuel-cost adjustment on the service portion (RM).
    pub afa_service_rm: f64,
    /// Total AFA charge (RM).
    pub afa_total_rm: f64,

    /// Efficiency incentive on the non-service portion (RM, usually negative).
    pub incentive_non_service_rm: f64,
    /// Efficiency incentive on the service portion (RM, usually negative).
    pub incentive_service_rm: f64,
    /// Total efficiency incentive (RM).
    pub incentive_total_rm: f64,

    /// Fixed retail surcharge, service portion only (RM).
    pub retail_service_rm: f64,

    /// Non-service usage-charge subtotal (RM).
    pub usage_charge_non_service_rm: f64,
    /// Service usage-charge subtotal, including the retail surcharge (RM).
    pub usage_charge_service_rm: f64,
    /// Current monthly usage charge before KWTBB and SST (RM).
    pub usage_charge_total_rm: f64,

    /// KWTBB levy, rounded to whole sen (RM).
    pub kwtbb_rm: f64,
    /// SST on the service subtotal, rounded to whole sen (RM).
    pub sst_rm: f64,
    /// Grand total: usage charge + KWTBB + SST (RM).
    pub total_rm: f64,
}

impl BillBreakdown {
    /// Effective incentive rate of this bill (RM/kWh).
    ///
    /// Incentive total divided by usage total; `0.0` for a zero-usage bill.
    pub fn incentive_unit_cost_rm(&self) -> f64 {
        if self.usage_total_kwh > 0.0 {
            self.incentive_total_rm / self.usage_total_kwh
        } else {
            0.0
        }
    }
}

impl fmt::Display for BillBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<14} {:>12} {:>12} {:>12}",
            "item", "non-service", "service", "total"
        )?;
        writeln!(
            f,
            "{:<14} {:>12.2} {:>12.2} {:>12.2}",
            "usage kWh", self.usage_non_service_kwh, self.usage_service_kwh, self.usage_total_kwh
        )?;
        writeln!(
            f,
            "{:<14} {:>12.2} {:>12.2} {:>12.2}",
            "energy RM", self.energy_non_service_rm, self.energy_service_rm, self.energy_total_rm
        )?;
        writeln!(
            f,
            "{:<14} {:>12.2} {:>12.2} {:>12.2}",
            "capacity RM",
            self.capacity_non_service_rm,
            self.capacity_service_rm,
            self.capacity_total_rm
        )?;
        writeln!(
            f,
            "{:<14} {:>12.2} {:>12.2} {:>12.2}",
            "network RM", self.network_non_service_rm, self.network_service_rm, self.network_total_rm
        )?;
        writeln!(
            f,
            "{:<14} {:>12.2} {:>12.2} {:>12.2}",
            "AFA RM", self.afa_non_service_rm, self.afa_service_rm, self.afa_total_rm
        )?;
        writeln!(
            f,
            "{:<14} {:>12.2} {:>12.2} {:>12.2}",
            "incentive RM",
            self.incentive_non_service_rm,
            self.incentive_service_rm,
            self.incentive_total_rm
        )?;
        writeln!(
            f,
            "{:<14} {:>12} {:>12.2} {:>12.2}",
            "retail RM", "-", self.retail_service_rm, self.retail_service_rm
        )?;
        writeln!(
            f,
            "{:<14} {:>12.2} {:>12.2} {:>12.2}",
            "usage charge",
            self.usage_charge_non_service_rm,
            self.usage_charge_service_rm,
            self.usage_charge_total_rm
        )?;
        writeln!(f, "{:<14} {:>38.2}", "KWTBB RM", self.kwtbb_rm)?;
        writeln!(f, "{:<14} {:>38.2}", "SST RM", self.sst_rm)?;
        write!(f, "{:<14} {:>38.2}", "total RM", self.total_rm)
    }
}
