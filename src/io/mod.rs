//! File output for quote artifacts.

/// CSV export of the per-year projection schedule.
pub mod export;
