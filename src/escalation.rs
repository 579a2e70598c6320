//! Escalating-series projector for multi-decade utility-cost totals.
//!
//! An annually quoted escalation rate is converted to an effective monthly
//! rate, `(1 + r)^(1/12) - 1`, so the series compounds smoothly on the
//! monthly billing cycle rather than stepping once per year. This matches
//! how the projection is quoted to customers and is intentional; do not
//! replace it with annual stepping.

/// Largest accepted starting monthly amount (dollars).
pub const MONTHLY_MAX: f64 = 1e9;

/// Projection term bounds (years).
pub const YEARS_MIN: u32 = 1;
/// Projection term bounds (years).
pub const YEARS_MAX: u32 = 30;

/// Converts an annual escalation rate to the effective monthly rate.
///
/// A zero or non-finite rate yields exactly `0.0`, so a flat series
/// multiplies by exactly 1 each month.
pub fn annual_to_monthly_rate(annual_rate: f64) -> f64 {
    if annual_rate == 0.0 || !annual_rate.is_finite() {
        return 0.0;
    }
    (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
}

fn clamp_monthly0(monthly0: f64) -> f64 {
    if monthly0.is_nan() {
        return 0.0;
    }
    monthly0.clamp(0.0, MONTHLY_MAX)
}

fn clamp_years(years: u32) -> u32 {
    years.clamp(YEARS_MIN, YEARS_MAX)
}

/// Total nominal dollars paid over `years` of monthly bills starting at
/// `monthly0` and escalating at `annual_rate` per year, undiscounted.
///
/// Sums `years * 12` terms, each term `(1 + monthly_rate)` times the
/// previous. A zero rate short-circuits to `monthly0 * years * 12` exactly.
///
/// Inputs are clamped: `monthly0` to `[0, 1e9]`, `years` to `[1, 30]`.
pub fn project_series(monthly0: f64, annual_rate: f64, years: u32) -> f64 {
    let m0 = clamp_monthly0(monthly0);
    let months = clamp_years(years) * 12;
    let rm = annual_to_monthly_rate(annual_rate);

    if rm == 0.0 {
        return m0 * f64::from(months);
    }

    let mut total = 0.0;
    let mut m = m0;
    for _ in 0..months {
        total += m;
        m *= 1.0 + rm;
    }
    total
}

/// Projected monthly amount at the *last* month of `year`.
///
/// Year 1 returns the value after 11 months of compounding
/// (`monthly0 * (1 + monthly_rate)^11`), not the starting amount.
pub fn value_at_year(monthly0: f64, annual_rate: f64, year: u32) -> f64 {
    let m0 = clamp_monthly0(monthly0);
    let y = clamp_years(year);
    let rm = annual_to_monthly_rate(annual_rate);
    let months = y * 12 - 1;
    m0 * (1.0 + rm).powi(months as i32)
}

/// One projected year of the escalating series.
#[derive(Debug, Clone, PartialEq)]
pub struct YearRow {
    /// Year index, 1-based.
    pub year: u32,
    /// Monthly amount at the last month of the year.
    pub monthly_end: f64,
    /// Dollars paid during this year (sum of its 12 monthly terms).
    pub paid_in_year: f64,
    /// Running total paid through the end of this year.
    pub cumulative: f64,
}

/// Full per-year schedule of the escalating series.
///
/// The last row's `cumulative` equals [`project_series`] for the same
/// inputs, and each row's `monthly_end` equals [`value_at_year`].
pub fn project_schedule(monthly0: f64, annual_rate: f64, years: u32) -> Vec<YearRow> {
    let m0 = clamp_monthly0(monthly0);
    let y = clamp_years(years);
    let rm = annual_to_monthly_rate(annual_rate);

    let mut rows = Vec::with_capacity(y as usize);
    let mut cumulative = 0.0;
    let mut m = m0;

    for year in 1..=y {
        let mut paid = 0.0;
        let mut monthly_end = m;
        for _ in 0..12 {
            paid += m;
            monthly_end = m;
            m *= 1.0 + rm;
        }
        if rm == 0.0 {
            // keep the flat-series exactness guarantee for yearly sums too
            paid = m0 * 12.0;
        }
        cumulative += paid;
        rows.push(YearRow {
            year,
            monthly_end,
            paid_in_year: paid,
            cumulative,
        });
    }

    if rm == 0.0 {
        for (i, row) in rows.iter_mut().enumerate() {
            row.cumulative = m0 * 12.0 * (i as f64 + 1.0);
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_is_exact() {
        for years in 1..=30 {
            let total = project_series(137.25, 0.0, years);
            assert_eq!(total, 137.25 * f64::from(years) * 12.0);
        }
    }

    #[test]
    fn monthly_rate_of_nine_percent_annual() {
        let rm = annual_to_monthly_rate(0.09);
        // (1.09)^(1/12) - 1 ≈ 0.0072073
        assert!((rm - 0.007_207_3).abs() < 1e-6);
    }

    #[test]
    fn non_finite_rate_treated_as_zero() {
        assert_eq!(annual_to_monthly_rate(f64::NAN), 0.0);
        assert_eq!(annual_to_monthly_rate(f64::INFINITY), 0.0);
    }

    #[test]
    fn series_monotone_in_years() {
        let mut prev = 0.0;
        for years in 1..=30 {
            let total = project_series(200.0, 0.09, years);
            assert!(total > prev, "total must grow with term length");
            prev = total;
        }
    }

    #[test]
    fn series_monotone_in_starting_bill() {
        let low = project_series(100.0, 0.09, 25);
        let high = project_series(150.0, 0.09, 25);
        assert!(high > low);
    }

    #[test]
    fn example_bill_200_nine_percent_25_years() {
        // Direct loop reference, independently of the production code path.
        let rm = (1.09_f64).powf(1.0 / 12.0) - 1.0;
        let mut expected = 0.0;
        let mut m = 200.0;
        for _ in 0..300 {
            expected += m;
            m *= 1.0 + rm;
        }

        let total = project_series(200.0, 0.09, 25);
        assert!((total - expected).abs() < 1e-6);
        assert!(
            (193_000.0..200_000.0).contains(&total),
            "25-year total out of expected band: {total}"
        );
    }

    #[test]
    fn value_at_year_one_is_eleven_months_compounded() {
        let rm = annual_to_monthly_rate(0.09);
        let v = value_at_year(200.0, 0.09, 1);
        assert!((v - 200.0 * (1.0 + rm).powi(11)).abs() < 1e-9);
    }

    #[test]
    fn value_at_year_flat_series_is_constant() {
        assert_eq!(value_at_year(200.0, 0.0, 1), 200.0);
        assert_eq!(value_at_year(200.0, 0.0, 30), 200.0);
    }

    #[test]
    fn inputs_are_clamped() {
        // Negative bill floors at zero; oversized term caps at 30 years.
        assert_eq!(project_series(-50.0, 0.09, 25), 0.0);
        assert_eq!(
            project_series(100.0, 0.05, 99),
            project_series(100.0, 0.05, 30)
        );
        assert_eq!(project_series(100.0, 0.0, 0), 100.0 * 12.0);
    }

    #[test]
    fn oversized_bill_caps_at_bound() {
        assert_eq!(project_series(1e12, 0.0, 1), MONTHLY_MAX * 12.0);
    }

    #[test]
    fn schedule_agrees_with_series_and_value() {
        let rows = project_schedule(200.0, 0.09, 25);
        assert_eq!(rows.len(), 25);

        let last = rows.last().unwrap();
        assert!((last.cumulative - project_series(200.0, 0.09, 25)).abs() < 1e-6);

        for row in &rows {
            let v = value_at_year(200.0, 0.09, row.year);
            assert!(
                (row.monthly_end - v).abs() < 1e-6,
                "year {} monthly mismatch",
                row.year
            );
        }
    }

    #[test]
    fn schedule_flat_series_years_are_equal() {
        let rows = project_schedule(150.0, 0.0, 10);
        for row in &rows {
            assert_eq!(row.paid_in_year, 150.0 * 12.0);
            assert_eq!(row.monthly_end, 150.0);
        }
        assert_eq!(rows[9].cumulative, 150.0 * 120.0);
    }

    #[test]
    fn schedule_cumulative_is_increasing() {
        let rows = project_schedule(80.0, 0.04, 15);
        for pair in rows.windows(2) {
            assert!(pair[1].cumulative > pair[0].cumulative);
        }
    }
}
