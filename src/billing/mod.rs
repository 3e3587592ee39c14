//! Itemized grid-bill computation under the tiered tariff.

/// Itemized bill output record.
pub mod breakdown;
/// Bill computation from usage and AFA inputs.
pub mod calculator;

pub use breakdown::BillBreakdown;
pub use calculator::compute_bill;
