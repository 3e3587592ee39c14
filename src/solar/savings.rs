//! ATAP savings path: blends two bill computations with export credits.

use std::fmt;

use crate::billing::{BillBreakdown, compute_bill};
use crate::quantity::{Percent, SenPerKwh};
use crate::tariff::TariffSchedule;

/// Inputs to the ATAP savings computation.
///
/// Energy quantities are monthly; the battery figure is the energy routed
/// through storage over the month, already derived by the planner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarSavingsInput {
    /// Monthly grid usage before solar (kWh).
    pub monthly_usage_kwh: f64,
    /// Monthly solar generation (kWh).
    pub monthly_generation_kwh: f64,
    /// Share of generation consumed directly on-site (0–100).
    pub self_consumption: Percent,
    /// Export (SMP) rate (RM/kWh).
    pub export_rate_rm_per_kwh: f64,
    /// AFA adjustment rate (sen/kWh).
    pub afa_rate: SenPerKwh,
    /// Monthly energy stored in the battery (kWh).
    pub battery_storage_kwh: f64,
}

/// Savings figures derived from the before/after bill pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarSavingsResult {
    /// Itemized bill at the original usage.
    pub bill_without_solar: BillBreakdown,
    /// Itemized bill at the usage remaining after self-consumption.
    pub bill_with_solar: BillBreakdown,
    /// After-solar bill net of the export credit, floored at zero (RM).
    pub final_bill_rm: f64,

    /// Generation consumed directly on-site (kWh).
    pub self_consumption_kwh: f64,
    /// Generation routed through the battery (kWh).
    pub battery_storage_kwh: f64,
    /// Generation exported to the grid (kWh).
    pub exported_kwh: f64,

    /// Bill reduction from self-consumption (RM).
    pub direct_savings_rm: f64,
    /// Value of stored energy at the low-tier blended rate (RM).
    pub battery_savings_rm: f64,
    /// Export credit at the SMP rate (RM).
    pub export_credit_rm: f64,
    /// Direct + battery + export savings (RM).
    pub total_savings_rm: f64,
    /// Total savings as a share of the original bill (0 for a zero bill).
    pub savings_pct: f64,
}

/// Computes ATAP savings for a month of usage and generation.
///
/// Two bill invocations anchor the result: one at the original usage and one
/// at the grid usage remaining after self-consumption. Battery savings are
/// valued at the low-tier blended rate regardless of usage level; that is an
/// intentional simplification, not tier-aware. The final bill never goes
/// negative; surplus export credit is forfeited, not paid out.
pub fn compute_savings(tariff: &TariffSchedule, input: &SolarSavingsInput) -> SolarSavingsResult {
    let generation = input.monthly_generation_kwh;
    let self_consumption_kwh = generation * input.self_consumption.clamped_fraction();
    let exported_kwh =
        (generation - self_consumption_kwh - input.battery_storage_kwh).max(0.0);

    let bill_without_solar = compute_bill(tariff, input.monthly_usage_kwh, input.afa_rate);
    let grid_usage_after_kwh = (input.monthly_usage_kwh - self_consumption_kwh).max(0.0);
    let bill_with_solar = compute_bill(tariff, grid_usage_after_kwh, input.afa_rate);

    let direct_savings_rm = bill_without_solar.total_rm - bill_with_solar.total_rm;
    let battery_savings_rm = input.battery_storage_kwh * tariff.retail_blended_low_rm;
    let export_credit_rm = exported_kwh * input.export_rate_rm_per_kwh;
    let total_savings_rm = direct_savings_rm + battery_savings_rm + export_credit_rm;

    let final_bill_rm = (bill_with_solar.total_rm - export_credit_rm).max(0.0);
    let savings_pct = if bill_without_solar.total_rm == 0.0 {
        0.0
    } else {
        total_savings_rm / bill_without_solar.total_rm * 100.0
    };

    SolarSavingsResult {
        bill_without_solar,
        bill_with_solar,
        final_bill_rm,
        self_consumption_kwh,
        battery_storage_kwh: input.battery_storage_kwh,
        exported_kwh,
        direct_savings_rm,
        battery_savings_rm,
        export_credit_rm,
        total_savings_rm,
        savings_pct,
    }
}

impl fmt::Display for SolarSavingsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- ATAP Savings ---")?;
        writeln!(
            f,
            "Bill without solar:   RM {:.2}",
            self.bill_without_solar.total_rm
        )?;
        writeln!(
            f,
            "Bill with solar:      RM {:.2}",
            self.bill_with_solar.total_rm
        )?;
        writeln!(f, "Self-consumption:     {:.2} kWh", self.self_consumption_kwh)?;
        writeln!(f, "Battery storage:      {:.2} kWh", self.battery_storage_kwh)?;
        writeln!(f, "Exported:             {:.2} kWh", self.exported_kwh)?;
        writeln!(f, "Direct savings:       RM {:.2}", self.direct_savings_rm)?;
        writeln!(f, "Battery savings:      RM {:.2}", self.battery_savings_rm)?;
        writeln!(f, "Export credit:        RM {:.2}", self.export_credit_rm)?;
        writeln!(
            f,
            "Total savings:        RM {:.2} ({:.1}%)",
            self.total_savings_rm, self.savings_pct
        )?;
        write!(f, "Final bill:           RM {:.2}", self.final_bill_rm)
    }
}
