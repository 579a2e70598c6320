//! Residential solar/battery savings and incentive estimator.
//!
//! Two independent calculation cores feed a sales quote: an escalating
//! utility-cost projector and a battery demand-response incentive
//! estimator. Both are pure, synchronous, and never fail on malformed
//! input; invalid values degrade to configured defaults.

/// Battery model and incentive program catalogs.
pub mod catalog;
/// TOML-backed business constants and rate-sheet configuration.
pub mod config;
pub mod escalation;
pub mod incentive;
/// Parse-with-default combinators for raw input values.
pub mod input;
/// File output for quote artifacts.
pub mod io;
pub mod money;
/// Adapter-facing request/report records.
pub mod quote;
