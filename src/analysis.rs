//! Full-scenario orchestration: runs every calculator in dependency order.

use crate::billing::{BillBreakdown, compute_bill};
use crate::config::ScenarioConfig;
use crate::quantity::{Percent, SenPerKwh};
use crate::roi::{RoiEstimate, estimate_roi};
use crate::solar::{
    BatteryBank, GenerationPlan, GenerationValueNoBess, SavingValueTable, SolarSavingsInput,
    SolarSavingsResult, SystemRecommendation, SystemSizing, UsageSplit, compute_savings,
    planner::recommend_system,
};

/// Complete engine output for one scenario.
///
/// Recomputed from scratch on every call; holds no state between runs.
/// Both savings paths are carried side by side: the ATAP figures and the
/// independently defined saving-value table. The payback estimate consumes
/// the saving-value total, matching the published ROI table.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Monthly usage after resolving the bill-amount input (kWh).
    pub monthly_usage_kwh: f64,
    /// Sizing and energy-flow plan.
    pub plan: GenerationPlan,
    /// Panel/battery recommendation for the target saving.
    pub recommendation: SystemRecommendation,
    /// ATAP savings path.
    pub atap: SolarSavingsResult,
    /// Bill for the night-only usage backing the saving-value path.
    pub bill_night_only: BillBreakdown,
    /// Saving-value decomposition.
    pub saving_value: SavingValueTable,
    /// Generation valued without any battery.
    pub generation_value: GenerationValueNoBess,
    /// Payback estimate fed from the saving-value total.
    pub roi: RoiEstimate,
}

impl Analysis {
    /// Runs the whole pipeline: planner → bills → savings paths → payback.
    pub fn compute(cfg: &ScenarioConfig) -> Self {
        let monthly_usage_kwh = cfg.effective_monthly_usage_kwh();
        let afa_rate = SenPerKwh(cfg.usage.afa_rate_sen_per_kwh);
        let daytime_split = Percent(cfg.usage.daytime_split_pct);
        let export_rate = cfg.finance.export_rate_rm_per_kwh;

        let sizing = SystemSizing::from_panels(
            cfg.solar.panel_wattage_w,
            cfg.solar.panel_count,
            cfg.solar.peak_sun_hours,
        );
        let battery = BatteryBank::new(
            cfg.battery.unit_capacity_kwh,
            cfg.battery.unit_count,
            Percent(cfg.battery.discharge_depth_pct),
        );
        let split = UsageSplit::new(monthly_usage_kwh, daytime_split);
        let plan = GenerationPlan::derive(sizing, battery, split);

        let recommendation = recommend_system(
            monthly_usage_kwh,
            plan.split.night_daily_kwh,
            Percent(cfg.finance.target_saving_pct),
        );

        // Daytime share doubles as the self-consumption percentage, the
        // same simplifying assumption the sliders encode.
        let atap = compute_savings(
            &cfg.tariff,
            &SolarSavingsInput {
                monthly_usage_kwh,
                monthly_generation_kwh: plan.sizing.monthly_generation_kwh,
                self_consumption: daytime_split,
                export_rate_rm_per_kwh: export_rate,
                afa_rate,
                battery_storage_kwh: plan.stored_solar_monthly_kwh,
            },
        );

        let bill_night_only = compute_bill(&cfg.tariff, plan.split.night_monthly_kwh, afa_rate);
        let saving_value = SavingValueTable::compute(
            &cfg.tariff,
            &atap.bill_without_solar,
            &bill_night_only,
            plan.sizing.monthly_generation_kwh,
            plan.split.daytime_monthly_kwh,
            plan.stored_solar_monthly_kwh,
            export_rate,
        );
        let generation_value = GenerationValueNoBess::compute(
            &cfg.tariff,
            plan.sizing.monthly_generation_kwh,
            plan.split.daytime_monthly_kwh,
            export_rate,
        );

        let roi = estimate_roi(
            cfg.finance.system_price_rm,
            saving_value.saving_value_total_rm,
        );

        Self {
            monthly_usage_kwh,
            plan,
            recommendation,
            atap,
            bill_night_only,
            saving_value,
            generation_value,
            roi,
        }
    }
}
