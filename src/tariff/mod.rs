//! Tariff data: tiered rate constants and the efficiency-incentive table.

/// Energy efficiency incentive bands and lookup.
pub mod incentive;
/// Tiered rate schedule constants.
pub mod schedule;

pub use incentive::{IncentiveBand, IncentiveTable};
pub use schedule::TariffSchedule;
