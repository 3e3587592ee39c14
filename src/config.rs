//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::tariff::TariffSchedule;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Household usage and billing inputs.
    #[serde(default)]
    pub usage: UsageConfig,
    /// Solar array parameters.
    #[serde(default)]
    pub solar: SolarConfig,
    /// Battery bank parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Pricing and investment parameters.
    #[serde(default)]
    pub finance: FinanceConfig,
    /// Tariff constant overrides.
    #[serde(default)]
    pub tariff: TariffSchedule,
}

/// Household usage and billing inputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UsageConfig {
    /// Monthly grid usage (kWh).
    pub monthly_kwh: f64,
    /// Monthly bill amount (RM); when set, usage is estimated from it via
    /// the blended retail rate and `monthly_kwh` is ignored.
    pub monthly_bill_rm: Option<f64>,
    /// AFA adjustment rate (sen/kWh).
    pub afa_rate_sen_per_kwh: f64,
    /// Daytime share of usage (0–100).
    pub daytime_split_pct: f64,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            monthly_kwh: 500.0,
            monthly_bill_rm: None,
            afa_rate_sen_per_kwh: 0.0,
            daytime_split_pct: 40.0,
        }
    }
}

/// Solar array parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Nameplate wattage per panel (W).
    pub panel_wattage_w: f64,
    /// Number of panels.
    pub panel_count: u32,
    /// Site peak sun hours per day.
    pub peak_sun_hours: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            panel_wattage_w: 550.0,
            panel_count: 12,
            peak_sun_hours: 3.5,
        }
    }
}

/// Battery bank parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Capacity per battery unit (kWh).
    pub unit_capacity_kwh: f64,
    /// Number of battery units.
    pub unit_count: u32,
    /// Usable discharge depth (0–100).
    pub discharge_depth_pct: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            unit_capacity_kwh: 7.0,
            unit_count: 2,
            discharge_depth_pct: 80.0,
        }
    }
}

/// Pricing and investment parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinanceConfig {
    /// Export (SMP) rate paid for energy fed to the grid (RM/kWh).
    pub export_rate_rm_per_kwh: f64,
    /// Installed system price used for the payback estimate (RM).
    pub system_price_rm: f64,
    /// Target saving percentage for the sizing recommendation (0–100).
    pub target_saving_pct: f64,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            export_rate_rm_per_kwh: 0.20,
            system_price_rm: 30000.0,
            target_saving_pct: 100.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"usage.monthly_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: a 500 kWh/month household with a
    /// 6.6 kWp array and a two-unit battery bank.
    pub fn baseline() -> Self {
        Self {
            usage: UsageConfig::default(),
            solar: SolarConfig::default(),
            battery: BatteryConfig::default(),
            finance: FinanceConfig::default(),
            tariff: TariffSchedule::tnb_domestic(),
        }
    }

    /// Returns the high-usage preset: a household on the high energy tier
    /// with a non-zero AFA rate and a full-size array.
    pub fn high_usage() -> Self {
        Self {
            usage: UsageConfig {
                monthly_kwh: 1800.0,
                afa_rate_sen_per_kwh: 3.0,
                ..UsageConfig::default()
            },
            solar: SolarConfig {
                panel_count: 38,
                ..SolarConfig::default()
            },
            battery: BatteryConfig {
                unit_count: 4,
                ..BatteryConfig::default()
            },
            finance: FinanceConfig {
                system_price_rm: 85000.0,
                ..FinanceConfig::default()
            },
            tariff: TariffSchedule::tnb_domestic(),
        }
    }

    /// Returns the battery-heavy preset: night-dominated usage with a
    /// deep-discharge bank sized to cover it.
    pub fn battery_heavy() -> Self {
        Self {
            usage: UsageConfig {
                monthly_kwh: 900.0,
                daytime_split_pct: 25.0,
                ..UsageConfig::default()
            },
            solar: SolarConfig {
                panel_count: 18,
                ..SolarConfig::default()
            },
            battery: BatteryConfig {
                unit_capacity_kwh: 10.0,
                unit_count: 3,
                discharge_depth_pct: 90.0,
            },
            finance: FinanceConfig {
                system_price_rm: 60000.0,
                ..FinanceConfig::default()
            },
            tariff: TariffSchedule::tnb_domestic(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "high_usage", "battery_heavy"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "high_usage" => Ok(Self::high_usage()),
            "battery_heavy" => Ok(Self::battery_heavy()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Monthly usage after resolving the bill-amount alternative input.
    pub fn effective_monthly_usage_kwh(&self) -> f64 {
        match self.usage.monthly_bill_rm {
            Some(bill_rm) => self.tariff.estimate_usage_from_bill(bill_rm),
            None => self.usage.monthly_kwh,
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let u = &self.usage;
        if u.monthly_kwh < 0.0 {
            errors.push(ConfigError {
                field: "usage.monthly_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if let Some(bill) = u.monthly_bill_rm {
            if bill < 0.0 {
                errors.push(ConfigError {
                    field: "usage.monthly_bill_rm".into(),
                    message: "must be >= 0".into(),
                });
            }
        }
        if u.afa_rate_sen_per_kwh < 0.0 {
            errors.push(ConfigError {
                field: "usage.afa_rate_sen_per_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if !(0.0..=100.0).contains(&u.daytime_split_pct) {
            errors.push(ConfigError {
                field: "usage.daytime_split_pct".into(),
                message: "must be in [0, 100]".into(),
            });
        }

        let s = &self.solar;
        if s.panel_wattage_w < 0.0 {
            errors.push(ConfigError {
                field: "solar.panel_wattage_w".into(),
                message: "must be >= 0".into(),
            });
        }
        if s.peak_sun_hours < 0.0 {
            errors.push(ConfigError {
                field: "solar.peak_sun_hours".into(),
                message: "must be >= 0".into(),
            });
        }

        let b = &self.battery;
        if b.unit_capacity_kwh < 0.0 {
            errors.push(ConfigError {
                field: "battery.unit_capacity_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if !(0.0..=100.0).contains(&b.discharge_depth_pct) {
            errors.push(ConfigError {
                field: "battery.discharge_depth_pct".into(),
                message: "must be in [0, 100]".into(),
            });
        }

        let f = &self.finance;
        if f.export_rate_rm_per_kwh < 0.0 {
            errors.push(ConfigError {
                field: "finance.export_rate_rm_per_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if f.system_price_rm < 0.0 {
            errors.push(ConfigError {
                field: "finance.system_price_rm".into(),
                message: "must be >= 0".into(),
            });
        }
        if !(0.0..=100.0).contains(&f.target_saving_pct) {
            errors.push(ConfigError {
                field: "finance.target_saving_pct".into(),
                message: "must be in [0, 100]".into(),
            });
        }

        if let Err(msg) = self.tariff.incentive.validate() {
            errors.push(ConfigError {
                field: "tariff.incentive".into(),
                message: msg,
            });
        }
        if self.tariff.base_block_kwh <= 0.0 {
            errors.push(ConfigError {
                field: "tariff.base_block_kwh".into(),
                message: "must be > 0".into(),
            });
        }
        if self.tariff.energy_tier_threshold_kwh <= 0.0 {
            errors.push(ConfigError {
                field: "tariff.energy_tier_threshold_kwh".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[usage]
monthly_kwh = 750.0
afa_rate_sen_per_kwh = 3.0
daytime_split_pct = 50.0

[solar]
panel_wattage_w = 620.0
panel_count = 16
peak_sun_hours = 3.8

[battery]
unit_capacity_kwh = 10.0
unit_count = 1
discharge_depth_pct = 90.0

[finance]
export_rate_rm_per_kwh = 0.25
system_price_rm = 42000.0
target_saving_pct = 80.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.usage.monthly_kwh), Some(750.0));
        assert_eq!(cfg.as_ref().map(|c| c.solar.panel_count), Some(16));
        assert_eq!(
            cfg.as_ref().map(|c| c.finance.export_rate_rm_per_kwh),
            Some(0.25)
        );
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[usage]
monthly_kwh = 620.0
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        // usage overridden
        assert_eq!(cfg.as_ref().map(|c| c.usage.monthly_kwh), Some(620.0));
        // solar kept default
        assert_eq!(cfg.as_ref().map(|c| c.solar.panel_count), Some(12));
        // tariff kept default
        assert_eq!(
            cfg.as_ref().map(|c| c.tariff.retail_blended_low_rm),
            Some(0.4443)
        );
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[usage]
monthly_kwh = 500.0
bogus_field = true
"#;
        let result = ScenarioConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn tariff_override_from_toml() {
        let toml = r#"
[tariff]
retail_charge_rm = 12.5
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "tariff override should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.tariff.retail_charge_rm), Some(12.5));
        // untouched constants keep their published values
        assert_eq!(cfg.as_ref().map(|c| c.tariff.energy_low.0), Some(27.03));
    }

    #[test]
    fn validation_catches_negative_usage() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.usage.monthly_kwh = -10.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "usage.monthly_kwh"));
    }

    #[test]
    fn validation_catches_split_out_of_range() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.usage.daytime_split_pct = 120.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "usage.daytime_split_pct"));
    }

    #[test]
    fn validation_catches_bad_discharge_depth() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.battery.discharge_depth_pct = -5.0;
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "battery.discharge_depth_pct")
        );
    }

    #[test]
    fn bill_amount_overrides_usage() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.usage.monthly_bill_rm = Some(222.15);
        let usage = cfg.effective_monthly_usage_kwh();
        assert!((usage - 500.0).abs() < 1e-9);
    }

    #[test]
    fn effective_usage_without_bill_is_monthly_kwh() {
        let cfg = ScenarioConfig::baseline();
        assert_eq!(cfg.effective_monthly_usage_kwh(), 500.0);
    }
}
