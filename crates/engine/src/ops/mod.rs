//! `Engine` operations, one module per endpoint family.

mod catalog;
mod spending;
mod transactions;

/// Trend window used when the caller does not ask for one.
pub const DEFAULT_TREND_MONTHS: i64 = 12;
pub const MAX_TREND_MONTHS: i64 = 24;
