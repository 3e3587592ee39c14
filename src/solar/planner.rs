//! Derives system sizing, battery capacity, and daily energy-flow splits.
//!
//! All quantities are recomputed from scratch whenever a sizing input
//! changes; nothing here holds state between invocations.

use crate::quantity::Percent;

/// Days assumed per billing month.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Monthly kWh one panel is sized to offset in the recommendation heuristic.
const PANEL_SIZING_KWH: f64 = 50.0;

/// Roof-area cap on the recommended panel count.
const MAX_PANEL_COUNT: u32 = 38;

/// Nominal capacity of one battery unit in the recommendation heuristic (kWh).
const BATTERY_UNIT_SIZING_KWH: f64 = 7.0;

/// Saving percentage the base heuristic is calibrated against.
const SIZING_BASELINE_PCT: f64 = 80.0;

/// Share of daily generation available for direct daytime consumption.
const DIRECT_USE_CAP: f64 = 0.3;

/// Array capacity and expected generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemSizing {
    /// Installed capacity (kWp).
    pub capacity_kwp: f64,
    /// Expected daily generation (kWh).
    pub daily_generation_kwh: f64,
    /// Expected monthly generation (kWh).
    pub monthly_generation_kwh: f64,
}

impl SystemSizing {
    /// Sizes an array from panel wattage, count, and site peak sun hours.
    pub fn from_panels(panel_wattage_w: f64, panel_count: u32, peak_sun_hours: f64) -> Self {
        let capacity_kwp = panel_wattage_w * f64::from(panel_count) / 1000.0;
        let daily_generation_kwh = capacity_kwp * peak_sun_hours;
        Self {
            capacity_kwp,
            daily_generation_kwh,
            monthly_generation_kwh: daily_generation_kwh * DAYS_PER_MONTH,
        }
    }
}

/// Battery bank capacity figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryBank {
    /// Nameplate capacity across all units (kWh).
    pub total_capacity_kwh: f64,
    /// Capacity usable within the configured discharge depth (kWh).
    pub usable_capacity_kwh: f64,
}

impl BatteryBank {
    /// Builds a bank from per-unit capacity, unit count, and discharge depth.
    pub fn new(unit_capacity_kwh: f64, unit_count: u32, discharge_depth: Percent) -> Self {
        let total_capacity_kwh = unit_capacity_kwh * f64::from(unit_count);
        Self {
            total_capacity_kwh,
            usable_capacity_kwh: total_capacity_kwh * discharge_depth.fraction(),
        }
    }
}

/// Monthly usage split into daytime and night portions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageSplit {
    /// Average daily usage (kWh).
    pub daily_kwh: f64,
    /// Daytime usage per day (kWh).
    pub daytime_daily_kwh: f64,
    /// Night usage per day (kWh).
    pub night_daily_kwh: f64,
    /// Daytime usage per month (kWh).
    pub daytime_monthly_kwh: f64,
    /// Night usage per month (kWh).
    pub night_monthly_kwh: f64,
    /// Daytime share of usage.
    pub daytime_split: Percent,
}

impl UsageSplit {
    /// Splits a monthly usage by the daytime percentage (0–100).
    pub fn new(monthly_usage_kwh: f64, daytime_split: Percent) -> Self {
        let daily_kwh = monthly_usage_kwh / DAYS_PER_MONTH;
        let day_frac = daytime_split.fraction();
        let night_frac = 1.0 - day_frac;
        Self {
            daily_kwh,
            daytime_daily_kwh: daily_kwh * day_frac,
            night_daily_kwh: daily_kwh * night_frac,
            daytime_monthly_kwh: monthly_usage_kwh * day_frac,
            night_monthly_kwh: monthly_usage_kwh * night_frac,
            daytime_split,
        }
    }
}

/// Daily distribution of generated energy across self-use, storage, and export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyEnergyFlow {
    /// Generation consumed directly during the day (kWh).
    pub self_use_kwh: f64,
    /// Generation routed into the battery (kWh).
    pub stored_kwh: f64,
    /// Generation exported to the grid (kWh).
    pub exported_kwh: f64,
}

/// Derived sizing and energy-flow quantities consumed by the savings paths.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPlan {
    /// Array sizing and generation.
    pub sizing: SystemSizing,
    /// Battery bank capacities.
    pub battery: BatteryBank,
    /// Daytime/night usage split.
    pub split: UsageSplit,
    /// Share of night usage the battery can cover (0–100).
    pub night_coverage_pct: f64,
    /// Solar energy stored per day, bounded by usable capacity and night usage (kWh).
    pub stored_solar_daily_kwh: f64,
    /// Stored solar per month (kWh).
    pub stored_solar_monthly_kwh: f64,
    /// Daily energy-flow distribution.
    pub flow: DailyEnergyFlow,
}

impl GenerationPlan {
    /// Derives all planner quantities from sizing, battery, and usage split.
    pub fn derive(sizing: SystemSizing, battery: BatteryBank, split: UsageSplit) -> Self {
        // A bank trivially covers a household with no night usage.
        let night_coverage_pct = if split.night_daily_kwh > 0.0 {
            (battery.usable_capacity_kwh / split.night_daily_kwh * 100.0).min(100.0)
        } else {
            100.0
        };

        let stored_solar_daily_kwh = battery.usable_capacity_kwh.min(split.night_daily_kwh);

        let self_use_kwh = split
            .daytime_daily_kwh
            .min(sizing.daily_generation_kwh * DIRECT_USE_CAP);
        let remaining_kwh = (sizing.daily_generation_kwh - self_use_kwh).max(0.0);
        let stored_kwh = remaining_kwh.min(stored_solar_daily_kwh);
        let flow = DailyEnergyFlow {
            self_use_kwh,
            stored_kwh,
            exported_kwh: remaining_kwh - stored_kwh,
        };

        Self {
            sizing,
            battery,
            split,
            night_coverage_pct,
            stored_solar_daily_kwh,
            stored_solar_monthly_kwh: stored_solar_daily_kwh * DAYS_PER_MONTH,
            flow,
        }
    }
}

/// Recommended system size for a savings target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemRecommendation {
    /// Panel count, capped by roof area.
    pub panel_count: u32,
    /// Battery unit count.
    pub battery_units: u32,
}

/// Sizes panels and battery units for a target saving percentage.
///
/// One panel per 50 kWh of monthly usage reaches roughly an 80 % saving;
/// the count scales linearly with the target and is capped at 38 panels.
/// Battery units are sized against nightly usage at 7 kWh per unit.
pub fn recommend_system(
    monthly_usage_kwh: f64,
    night_daily_usage_kwh: f64,
    target_saving: Percent,
) -> SystemRecommendation {
    let scale = target_saving.0 / SIZING_BASELINE_PCT;

    let base_panels = (monthly_usage_kwh / PANEL_SIZING_KWH).ceil().max(0.0);
    let panel_count = ((base_panels * scale).ceil() as u32).min(MAX_PANEL_COUNT);

    let base_units = (night_daily_usage_kwh / BATTERY_UNIT_SIZING_KWH)
        .ceil()
        .max(0.0);
    let battery_units = (base_units * scale).ceil() as u32;

    SystemRecommendation {
        panel_count,
        battery_units,
    }
}
