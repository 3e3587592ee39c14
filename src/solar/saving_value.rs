//! Saving-value decomposition: storage, export, and incentive valued at
//! their own unit rates.
//!
//! This is a second, independently defined savings figure, not a restatement
//! of the ATAP path. The two paths use different formulas on purpose (the
//! ATAP path differences two bills; this one prices energy flows directly
//! against a night-usage-only residual bill) and both are exposed as named
//! outputs.

use std::fmt;

use crate::billing::BillBreakdown;
use crate::tariff::TariffSchedule;

/// Line items of the saving-value table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingValueTable {
    /// Generation left after daytime consumption (kWh; can be negative when
    /// daytime usage exceeds generation).
    pub surplus_kwh: f64,

    /// Monthly energy stored in the BESS (kWh).
    pub stored_kwh: f64,
    /// Blended rate valuing stored energy, tiered by the stored quantity (RM/kWh).
    pub stored_unit_cost_rm: f64,
    /// Value of stored energy (RM).
    pub stored_value_rm: f64,

    /// Surplus exported after storage (kWh).
    pub exported_kwh: f64,
    /// Export (SMP) rate (RM/kWh).
    pub export_unit_cost_rm: f64,
    /// Value of exported energy (RM).
    pub exported_value_rm: f64,

    /// Effective incentive rate of the after-solar bill (RM/kWh).
    pub incentive_unit_cost_rm: f64,
    /// Incentive attributed to the exported energy (RM).
    pub incentive_value_rm: f64,

    /// Stored + exported + incentive value (RM).
    pub generation_value_rm: f64,
    /// After-solar bill net of the generation value, floored at zero (RM).
    pub residual_bill_rm: f64,
    /// Before-solar bill minus the residual bill (RM).
    pub saving_value_total_rm: f64,
}

impl SavingValueTable {
    /// Computes the saving-value table.
    ///
    /// `bill_after_solar` is the bill for the usage remaining after the
    /// daytime share is served by solar (night usage only); its effective
    /// incentive rate prices the incentive line.
    pub fn compute(
        tariff: &TariffSchedule,
        bill_before_solar: &BillBreakdown,
        bill_after_solar: &BillBreakdown,
        monthly_generation_kwh: f64,
        daytime_monthly_usage_kwh: f64,
        stored_kwh: f64,
        export_rate_rm_per_kwh: f64,
    ) -> Self {
        let surplus_kwh = monthly_generation_kwh - daytime_monthly_usage_kwh;

        let stored_unit_cost_rm = tariff.blended_retail_rate(stored_kwh);
        let stored_value_rm = stored_kwh * stored_unit_cost_rm;

        let exported_kwh = (surplus_kwh - stored_kwh).max(0.0);
        let exported_value_rm = exported_kwh * export_rate_rm_per_kwh;

        let incentive_unit_cost_rm = bill_after_solar.incentive_unit_cost_rm();
        let incentive_value_rm = exported_kwh * incentive_unit_cost_rm;

        let generation_value_rm = stored_value_rm + exported_value_rm + incentive_value_rm;
        let residual_bill_rm = (bill_after_solar.total_rm - generation_value_rm).max(0.0);
        let saving_value_total_rm = bill_before_solar.total_rm - residual_bill_rm;

        Self {
            surplus_kwh,
            stored_kwh,
            stored_unit_cost_rm,
            stored_value_rm,
            exported_kwh,
            export_unit_cost_rm: export_rate_rm_per_kwh,
            exported_value_rm,
            incentive_unit_cost_rm,
            incentive_value_rm,
            generation_value_rm,
            residual_bill_rm,
            saving_value_total_rm,
        }
    }
}

impl fmt::Display for SavingValueTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Saving Value ---")?;
        writeln!(f, "Surplus:             {:.2} kWh", self.surplus_kwh)?;
        writeln!(
            f,
            "Stored in BESS:      {:.2} kWh @ RM {:.4}/kWh = RM {:.2}",
            self.stored_kwh, self.stored_unit_cost_rm, self.stored_value_rm
        )?;
        writeln!(
            f,
            "Exported to grid:    {:.2} kWh @ RM {:.2}/kWh = RM {:.2}",
            self.exported_kwh, self.export_unit_cost_rm, self.exported_value_rm
        )?;
        writeln!(
            f,
            "Incentive:           {:.2} kWh @ RM {:.4}/kWh = RM {:.2}",
            self.exported_kwh, self.incentive_unit_cost_rm, self.incentive_value_rm
        )?;
        writeln!(f, "Generation value:    RM {:.2}", self.generation_value_rm)?;
        writeln!(f, "Residual bill:       RM {:.2}", self.residual_bill_rm)?;
        write!(f, "Saving value total:  RM {:.2}", self.saving_value_total_rm)
    }
}

/// Generation valued without any battery: direct consumption plus export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationValueNoBess {
    /// Total monthly generation (kWh).
    pub generation_kwh: f64,
    /// Daytime usage served directly (kWh).
    pub direct_kwh: f64,
    /// Blended rate valuing direct consumption, tiered by the direct quantity (RM/kWh).
    pub direct_unit_cost_rm: f64,
    /// Value of direct consumption (RM).
    pub direct_value_rm: f64,
    /// Remaining generation exported (kWh).
    pub exported_kwh: f64,
    /// Value of exported energy at the SMP rate (RM).
    pub exported_value_rm: f64,
    /// Direct + exported value (RM).
    pub total_value_rm: f64,
}

impl GenerationValueNoBess {
    /// Values a month of generation with all surplus exported.
    pub fn compute(
        tariff: &TariffSchedule,
        monthly_generation_kwh: f64,
        daytime_monthly_usage_kwh: f64,
        export_rate_rm_per_kwh: f64,
    ) -> Self {
        let direct_kwh = daytime_monthly_usage_kwh;
        let direct_unit_cost_rm = tariff.blended_retail_rate(direct_kwh);
        let direct_value_rm = direct_kwh * direct_unit_cost_rm;

        let exported_kwh = monthly_generation_kwh - direct_kwh;
        let exported_value_rm = exported_kwh * export_rate_rm_per_kwh;

        Self {
            generation_kwh: monthly_generation_kwh,
            direct_kwh,
            direct_unit_cost_rm,
            direct_value_rm,
            exported_kwh,
            exported_value_rm,
            total_value_rm: direct_value_rm + exported_value_rm,
        }
    }
}

impl fmt::Display for GenerationValueNoBess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Generation Value (no BESS) ---")?;
        writeln!(f, "Generation:          {:.2} kWh", self.generation_kwh)?;
        writeln!(
            f,
            "Direct consumption:  {:.2} kWh @ RM {:.4}/kWh = RM {:.2}",
            self.direct_kwh, self.direct_unit_cost_rm, self.direct_value_rm
        )?;
        writeln!(
            f,
            "Exported to grid:    {:.2} kWh = RM {:.2}",
            self.exported_kwh, self.exported_value_rm
        )?;
        write!(f, "Total value:         RM {:.2}", self.total_value_rm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::compute_bill;
    use crate::quantity::SenPerKwh;

    const EPS: f64 = 1e-9;

    fn tariff() -> TariffSchedule {
        TariffSchedule::tnb_domestic()
    }

    fn table() -> SavingValueTable {
        let t = tariff();
        let before = compute_bill(&t, 900.0, SenPerKwh(0.0));
        // 40% daytime share served by solar leaves the night usage on the grid
        let after = compute_bill(&t, 540.0, SenPerKwh(0.0));
        SavingValueTable::compute(&t, &before, &after, 1100.0, 360.0, 150.0, 0.20)
    }

    #[test]
    fn surplus_and_export_split() {
        let sv = table();
        assert!((sv.surplus_kwh - 740.0).abs() < EPS);
        assert!((sv.exported_kwh - 590.0).abs() < EPS);
    }

    #[test]
    fn stored_energy_priced_on_low_tier() {
        let sv = table();
        assert_eq!(sv.stored_unit_cost_rm, 0.4443);
        assert!((sv.stored_value_rm - 150.0 * 0.4443).abs() < EPS);
    }

    #[test]
    fn incentive_uses_after_solar_unit_cost() {
        let t = tariff();
        let after = compute_bill(&t, 540.0, SenPerKwh(0.0));
        let sv = table();
        assert!((sv.incentive_unit_cost_rm - after.incentive_unit_cost_rm()).abs() < EPS);
        // 540 kWh sits in the -0.105 band, applied to the full usage
        assert!((sv.incentive_unit_cost_rm - (-0.105)).abs() < EPS);
        assert!((sv.incentive_value_rm - sv.exported_kwh * -0.105).abs() < EPS);
    }

    #[test]
    fn residual_bill_floors_at_zero() {
        let t = tariff();
        let before = compute_bill(&t, 400.0, SenPerKwh(0.0));
        let after = compute_bill(&t, 100.0, SenPerKwh(0.0));
        // enormous generation drives the generation value far past the bill
        let sv = SavingValueTable::compute(&t, &before, &after, 5000.0, 300.0, 100.0, 0.20);
        assert_eq!(sv.residual_bill_rm, 0.0);
        assert!((sv.saving_value_total_rm - before.total_rm).abs() < EPS);
    }

    #[test]
    fn export_never_negative_when_storage_exceeds_surplus() {
        let t = tariff();
        let before = compute_bill(&t, 900.0, SenPerKwh(0.0));
        let after = compute_bill(&t, 540.0, SenPerKwh(0.0));
        let sv = SavingValueTable::compute(&t, &before, &after, 400.0, 360.0, 150.0, 0.20);
        assert_eq!(sv.exported_kwh, 0.0);
        assert_eq!(sv.exported_value_rm, 0.0);
    }

    #[test]
    fn no_bess_value_sums_direct_and_export() {
        let gv = GenerationValueNoBess::compute(&tariff(), 1100.0, 360.0, 0.20);
        assert!((gv.direct_value_rm - 360.0 * 0.4443).abs() < EPS);
        assert!((gv.exported_kwh - 740.0).abs() < EPS);
        assert!((gv.exported_value_rm - 148.0).abs() < EPS);
        assert!((gv.total_value_rm - (gv.direct_value_rm + gv.exported_value_rm)).abs() < EPS);
    }

    #[test]
    fn no_bess_export_can_go_negative_when_daytime_usage_exceeds_generation() {
        // the table reports the raw difference; callers decide how to present it
        let gv = GenerationValueNoBess::compute(&tariff(), 200.0, 360.0, 0.20);
        assert!(gv.exported_kwh < 0.0);
    }
}
