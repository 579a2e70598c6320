//! Adapter-facing record types: plain input records in, plain result
//! records out. All mutable field state lives with the caller; every call
//! here recomputes the full view from scratch.

use std::fmt;

use crate::escalation;
use crate::incentive::IncentiveEstimate;
use crate::money::{money0, money2};

/// Inputs for the utility-savings projection view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsRequest {
    /// Current monthly utility bill (dollars).
    pub monthly_bill: f64,
    /// Annual escalation rate (fractional).
    pub annual_rate: f64,
    /// Projection term in years.
    pub years: u32,
}

/// Computed utility-savings view for one projection term.
///
/// No solar payment is modeled anywhere, so projected savings equal the
/// projected utility cost. The snapshot fields describe the last month of
/// the selected (final) year.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsView {
    /// Effective projection term after clamping (years).
    pub years: u32,
    /// Total projected utility spend over the term.
    pub utility_total: f64,
    /// Projected savings over the term (equals `utility_total`).
    pub savings_total: f64,
    /// Projected monthly utility bill at the snapshot year.
    pub monthly_utility_at_year: f64,
    /// Projected monthly savings at the snapshot year.
    pub monthly_savings_at_year: f64,
    /// Projected annual savings at the snapshot year (monthly × 12).
    pub annual_savings_at_year: f64,
}

/// Computes the savings view for a request.
///
/// Pure and infallible; inputs are clamped by the escalation projector.
pub fn savings_view(req: &SavingsRequest) -> SavingsView {
    let years = req
        .years
        .clamp(escalation::YEARS_MIN, escalation::YEARS_MAX);
    let utility_total = escalation::project_series(req.monthly_bill, req.annual_rate, years);
    let monthly = escalation::value_at_year(req.monthly_bill, req.annual_rate, years);

    SavingsView {
        years,
        utility_total,
        savings_total: utility_total,
        monthly_utility_at_year: monthly,
        monthly_savings_at_year: monthly,
        annual_savings_at_year: monthly * 12.0,
    }
}

/// A complete customer quote: savings projection plus incentive estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteReport {
    /// Utility-savings projection view.
    pub savings: SavingsView,
    /// Battery incentive estimate.
    pub incentive: IncentiveEstimate,
}

impl fmt::Display for QuoteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.savings;
        writeln!(f, "--- Utility Savings Projection ---")?;
        writeln!(f, "Term:                    {} years", s.years)?;
        writeln!(
            f,
            "Projected utility cost:  {}",
            money0(s.utility_total)
        )?;
        writeln!(f, "Projected savings:       {}", money0(s.savings_total))?;
        writeln!(
            f,
            "Year {:>2} monthly utility: {}",
            s.years,
            money2(s.monthly_utility_at_year)
        )?;
        writeln!(
            f,
            "Year {:>2} monthly savings: {}",
            s.years,
            money2(s.monthly_savings_at_year)
        )?;
        writeln!(
            f,
            "Year {:>2} annual savings:  {}",
            s.years,
            money2(s.annual_savings_at_year)
        )?;
        writeln!(f)?;

        let i = &self.incentive;
        writeln!(f, "--- Battery Incentive Estimate ---")?;
        writeln!(f, "Battery:            {} x {}", i.battery.label, i.quantity)?;
        writeln!(f, "Usable capacity:    {:.1} kWh", i.usable_capacity_kwh)?;
        writeln!(f, "Max power:          {:.1} kW", i.max_power_kw)?;
        writeln!(f, "Performance:        {}%", (i.performance * 100.0).round())?;
        writeln!(f, "Commit per battery: {:.1} kW", i.commit_kw_per_unit)?;
        writeln!(f, "Credited power:     {:.2} kW", i.credited_kw)?;
        writeln!(f, "Annual credit:      {}", money0(i.annual))?;
        writeln!(f, "Monthly credit:     {}", money0(i.monthly))?;
        write!(f, "Note: {}", i.note)
    }
}
