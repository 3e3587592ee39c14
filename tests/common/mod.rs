//! Shared test fixtures for integration tests.

use nem_calc::config::ScenarioConfig;
use nem_calc::tariff::TariffSchedule;

/// Published domestic tariff schedule.
pub fn tariff() -> TariffSchedule {
    TariffSchedule::tnb_domestic()
}

/// Baseline scenario (500 kWh/month, 12 panels, 2 battery units).
pub fn baseline_config() -> ScenarioConfig {
    ScenarioConfig::baseline()
}

/// A complete scenario document in TOML form, exercising every section.
pub fn toml_scenario() -> &'static str {
    r#"
[usage]
monthly_kwh = 750.0
afa_rate_sen_per_kwh = 3.0
daytime_split_pct = 45.0

[solar]
panel_wattage_w = 600.0
panel_count = 16
peak_sun_hours = 3.4

[battery]
unit_capacity_kwh = 5.0
unit_count = 3
discharge_depth_pct = 85.0

[finance]
export_rate_rm_per_kwh = 0.20
system_price_rm = 42000.0
target_saving_pct = 90.0
"#
}
