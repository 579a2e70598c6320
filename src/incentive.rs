//! Battery demand-response incentive estimator.
//!
//! A single pure derivation pipeline: resolve battery/quantity, resolve
//! performance, compute fleet capacity figures, optionally auto-suggest the
//! committed event power from peak demand, resolve committed power, derive
//! credited kW, then price it under the selected program's payout terms.
//! The whole pipeline re-runs on every input change; nothing is cached
//! between calls.
//!
//! Malformed input never produces an error: missing or invalid numbers take
//! their field defaults, out-of-range values clamp, unknown ids fall back to
//! the first catalog entry.

use crate::catalog::{BatteryModel, Catalog, ProgramTerms};
use crate::input;
use crate::money::money0;

/// Quantity bounds for a battery fleet.
pub const QTY_MIN: i64 = 1;
/// Quantity bounds for a battery fleet.
pub const QTY_MAX: i64 = 99;

/// Upper clamp for committed kW per unit.
pub const COMMIT_KW_MAX: f64 = 1e6;

/// Field defaults and business constants for the estimator.
///
/// These are approximate, marketing-derived figures; they live in
/// configuration rather than code so a rate-sheet change never requires a
/// rebuild.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IncentiveDefaults {
    /// Default performance derating factor, in (0, 1].
    pub performance: f64,
    /// Default committed event power per battery (kW).
    pub commit_kw_per_unit: f64,
    /// Conservative conversion from peak demand to average event power.
    pub event_avg_factor: f64,
}

impl Default for IncentiveDefaults {
    fn default() -> Self {
        Self {
            performance: 0.85,
            commit_kw_per_unit: 4.5,
            event_avg_factor: 0.60,
        }
    }
}

/// Raw inputs to one incentive estimate.
///
/// Optional fields model blank form entries; `None` resolves to the field
/// default during the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct IncentiveInputs {
    /// Selected program id, resolved with first-entry fallback.
    pub program_id: String,
    /// Selected battery id, resolved with first-entry fallback.
    pub battery_id: String,
    /// Number of batteries, clamped to `[1, 99]`.
    pub quantity: i64,
    /// Site peak demand (kW); feeds auto-suggest when positive.
    pub peak_demand_kw: f64,
    /// Derive committed power from peak demand instead of the entered value.
    pub auto_suggest_commit: bool,
    /// Committed event power per battery (kW); `None` means blank.
    pub commit_kw_per_unit: Option<f64>,
    /// Performance factor override; `None` means blank.
    pub performance: Option<f64>,
}

impl Default for IncentiveInputs {
    fn default() -> Self {
        Self {
            program_id: String::new(),
            battery_id: String::new(),
            quantity: 1,
            peak_demand_kw: 0.0,
            auto_suggest_commit: false,
            commit_kw_per_unit: None,
            performance: None,
        }
    }
}

/// Fully derived incentive estimate.
///
/// Carries the effective (resolved, write-back) input values alongside the
/// payout so an adapter can refresh its derived form fields from one record.
#[derive(Debug, Clone, PartialEq)]
pub struct IncentiveEstimate {
    /// Resolved battery model.
    pub battery: BatteryModel,
    /// Resolved quantity.
    pub quantity: u32,
    /// Effective performance factor actually used.
    pub performance: f64,
    /// Effective committed kW per battery actually used.
    pub commit_kw_per_unit: f64,
    /// Fleet usable energy after derating (kWh).
    pub usable_capacity_kwh: f64,
    /// Fleet nameplate power (kW).
    pub max_power_kw: f64,
    /// Credited power counted by the program (kW).
    pub credited_kw: f64,
    /// Credited share of derated fleet maximum; cap-structured programs only.
    pub utilization: Option<f64>,
    /// Fleet annual payout cap (dollars); cap-structured programs only.
    pub annual_cap: Option<f64>,
    /// Estimated annual payout (dollars).
    pub annual: f64,
    /// Estimated monthly payout (dollars).
    pub monthly: f64,
    /// Human-readable derivation summary; diagnostic only.
    pub note: String,
}

/// Suggested committed kW per battery, derived from site peak demand.
///
/// Returns `None` when `peak_demand_kw` is zero, negative, or NaN; the
/// caller then leaves the entered commit value untouched. A positive peak
/// is converted with the configured average-event factor, split across the
/// fleet, and clamped to what one battery can deliver.
pub fn suggest_commit_kw_per_unit(
    peak_demand_kw: f64,
    event_avg_factor: f64,
    quantity: u32,
    battery_power_kw: f64,
) -> Option<f64> {
    if !(peak_demand_kw > 0.0) {
        return None;
    }
    let suggested_total = peak_demand_kw * event_avg_factor;
    let suggested_per_unit = suggested_total / f64::from(quantity.max(1));
    Some(input::clamp(suggested_per_unit, 0.0, battery_power_kw))
}

/// Runs the full derivation pipeline and prices the result under the
/// selected program.
///
/// Never fails: every invalid input degrades to its stated default and the
/// returned figures are always finite.
pub fn estimate(
    inputs: &IncentiveInputs,
    catalog: &Catalog,
    defaults: &IncentiveDefaults,
) -> IncentiveEstimate {
    // 1. Resolve battery and quantity.
    let battery = catalog.battery(&inputs.battery_id).clone();
    let quantity = inputs.quantity.clamp(QTY_MIN, QTY_MAX) as u32;
    let qty_f = f64::from(quantity);

    // 2. Resolve performance. A non-positive result (blank, zero, or
    // negative entry) takes the default so the effective value is usable.
    let mut performance = input::field_or(inputs.performance, defaults.performance, 0.0, 1.0);
    if !(performance > 0.0) {
        performance = defaults.performance;
    }

    // 3. Fleet capacity figures.
    let max_power_kw = battery.power_kw * qty_f;
    let usable_capacity_kwh = battery.usable_kwh * qty_f * performance;

    // 4-5. Committed power per battery: auto-suggestion overrides the
    // entered value only when peak demand is known.
    let suggestion = if inputs.auto_suggest_commit {
        suggest_commit_kw_per_unit(
            inputs.peak_demand_kw,
            defaults.event_avg_factor,
            quantity,
            battery.power_kw,
        )
    } else {
        None
    };
    let commit_kw_per_unit = match suggestion {
        Some(kw) => kw,
        None => input::field_or(
            inputs.commit_kw_per_unit,
            defaults.commit_kw_per_unit,
            0.0,
            COMMIT_KW_MAX,
        ),
    };

    // 6. Credited power includes performance and can never exceed the
    // derated fleet maximum.
    let credited_raw = commit_kw_per_unit * qty_f * performance;
    let max_creditable = max_power_kw * performance;
    let credited_kw = credited_raw.min(max_creditable);

    // 7. Program payout.
    let program = catalog.program(&inputs.program_id);
    let (annual, utilization, annual_cap) = match program.terms {
        ProgramTerms::Rate {
            rate_per_kw_season,
            seasons_per_year,
        } => {
            let rate_per_kw_year = rate_per_kw_season * f64::from(seasons_per_year);
            (credited_kw * rate_per_kw_year, None, None)
        }
        ProgramTerms::Cap {
            cap_per_battery_year,
        } => {
            let cap = cap_per_battery_year * qty_f;
            let utilization = if max_creditable > 0.0 {
                input::clamp(credited_kw / max_creditable, 0.0, 1.0)
            } else {
                0.0
            };
            (cap * utilization, Some(utilization), Some(cap))
        }
    };
    let monthly = annual / 12.0;

    // 8. Derivation note.
    let mut note = format!(
        "{} Battery: {}. Qty: {}. Perf: {}%. Avg event kW per battery: {:.1}. Credited kW: {:.2}.",
        program.note,
        battery.label,
        quantity,
        (performance * 100.0).round(),
        commit_kw_per_unit,
        credited_kw,
    );
    if let Some(cap) = annual_cap {
        note.push_str(&format!(" Annual cap: {}.", money0(cap)));
    }

    IncentiveEstimate {
        battery,
        quantity,
        performance,
        commit_kw_per_unit,
        usable_capacity_kwh,
        max_power_kw,
        credited_kw,
        utilization,
        annual_cap,
        annual,
        monthly,
        note,
    }
}
