//! File output adapters.

/// CSV export of the before/after bill comparison.
pub mod export;
