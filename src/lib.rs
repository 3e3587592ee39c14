//! Tiered-tariff bill and solar savings calculation engine.

pub mod analysis;
pub mod billing;
pub mod config;
pub mod io;
pub mod quantity;
pub mod report;
pub mod roi;
/// Sizing, energy-flow, and savings modules.
pub mod solar;
pub mod tariff;
