//! USD display formatting for report output.
//!
//! Whole-dollar and cent-precision variants with en-US digit grouping.
//! Non-finite amounts render as zero so a display cell never shows NaN.

/// Groups an unsigned integer string with commas every three digits.
fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}

fn sanitize(n: f64) -> f64 {
    if n.is_finite() { n } else { 0.0 }
}

/// Formats a dollar amount rounded to whole dollars, e.g. `$193,407`.
pub fn money0(n: f64) -> String {
    let n = sanitize(n);
    let rounded = n.abs().round();
    let sign = if n < 0.0 && rounded > 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(&format!("{rounded:.0}")))
}

/// Formats a dollar amount with cents, e.g. `$841.50`.
pub fn money2(n: f64) -> String {
    let n = sanitize(n);
    let cents = (n.abs() * 100.0).round();
    let sign = if n < 0.0 && cents > 0.0 { "-" } else { "" };
    let whole = (cents / 100.0).trunc();
    let frac = (cents - whole * 100.0) as u32;
    format!(
        "{sign}${}.{frac:02}",
        group_thousands(&format!("{whole:.0}"))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_dollars_grouped() {
        assert_eq!(money0(193407.2), "$193,407");
        assert_eq!(money0(1200.0), "$1,200");
        assert_eq!(money0(600.0), "$600");
        assert_eq!(money0(0.0), "$0");
    }

    #[test]
    fn whole_dollars_round_not_truncate() {
        assert_eq!(money0(470.77), "$471");
        assert_eq!(money0(999.5), "$1,000");
    }

    #[test]
    fn cents_variant() {
        assert_eq!(money2(841.5), "$841.50");
        assert_eq!(money2(70.125), "$70.13");
        assert_eq!(money2(1234567.891), "$1,234,567.89");
        assert_eq!(money2(0.0), "$0.00");
    }

    #[test]
    fn non_finite_renders_zero() {
        assert_eq!(money0(f64::NAN), "$0");
        assert_eq!(money0(f64::INFINITY), "$0");
        assert_eq!(money2(f64::NAN), "$0.00");
    }

    #[test]
    fn negative_amounts_keep_sign() {
        assert_eq!(money0(-1500.0), "-$1,500");
        assert_eq!(money2(-12.345), "-$12.35");
        // rounds to zero: no stray sign
        assert_eq!(money0(-0.2), "$0");
    }
}
