//! Solar system sizing, energy-flow planning, and savings estimation.

/// System/battery sizing and daytime-night energy splits.
pub mod planner;
/// Alternate saving-value decomposition and generation-value tables.
pub mod saving_value;
/// ATAP savings path combining two bill computations.
pub mod savings;

pub use planner::{
    BatteryBank, DailyEnergyFlow, GenerationPlan, SystemRecommendation, SystemSizing, UsageSplit,
};
pub use saving_value::{GenerationValueNoBess, SavingValueTable};
pub use savings::{SolarSavingsInput, SolarSavingsResult, compute_savings};
