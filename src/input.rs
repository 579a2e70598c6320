//! Parse-with-default combinators for raw form/CLI values.
//!
//! Every numeric boundary of the estimator goes through these helpers: a
//! missing, malformed, or out-of-range value is replaced by its field
//! default or clamped to the nearest bound, never surfaced as an error.
//! Keeping the substitution in one place keeps the never-throw guarantee
//! auditable.

/// Parses a raw string as `f64`, substituting `fallback` when the value is
/// absent, unparseable, or non-finite.
pub fn num_or(raw: Option<&str>, fallback: f64) -> f64 {
    match raw {
        Some(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => fallback,
        },
        None => fallback,
    }
}

/// Parses a raw string as an integer clamped to `[min, max]`, substituting
/// `fallback` (itself clamped) when absent or unparseable.
///
/// Fractional input is truncated toward zero before clamping, matching
/// `parseInt`-style form handling.
pub fn int_in(raw: Option<&str>, fallback: i64, min: i64, max: i64) -> i64 {
    let n = match raw {
        Some(s) => {
            let t = s.trim();
            match t.parse::<i64>() {
                Ok(n) => n,
                // "12.7" style input: take the integral part
                Err(_) => match t.parse::<f64>() {
                    Ok(f) if f.is_finite() => f.trunc() as i64,
                    _ => fallback,
                },
            }
        }
        None => fallback,
    };
    n.clamp(min, max)
}

/// Clamps `n` to `[min, max]`, mapping NaN to `min`.
pub fn clamp(n: f64, min: f64, max: f64) -> f64 {
    if n.is_nan() {
        return min;
    }
    n.clamp(min, max)
}

/// Resolves an optional numeric field: `None` or non-finite takes the
/// default, anything else is clamped to `[min, max]`.
pub fn field_or(value: Option<f64>, fallback: f64, min: f64, max: f64) -> f64 {
    match value {
        Some(n) if n.is_finite() => clamp(n, min, max),
        _ => clamp(fallback, min, max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_or_parses_plain_numbers() {
        assert_eq!(num_or(Some("42.5"), 0.0), 42.5);
        assert_eq!(num_or(Some(" 7 "), 0.0), 7.0);
    }

    #[test]
    fn num_or_falls_back_on_garbage() {
        assert_eq!(num_or(Some("abc"), 1.5), 1.5);
        assert_eq!(num_or(Some(""), 1.5), 1.5);
        assert_eq!(num_or(None, 1.5), 1.5);
    }

    #[test]
    fn num_or_rejects_non_finite() {
        assert_eq!(num_or(Some("inf"), 9.0), 9.0);
        assert_eq!(num_or(Some("NaN"), 9.0), 9.0);
    }

    #[test]
    fn int_in_clamps_to_range() {
        assert_eq!(int_in(Some("150"), 1, 1, 99), 99);
        assert_eq!(int_in(Some("0"), 1, 1, 99), 1);
        assert_eq!(int_in(Some("-3"), 1, 1, 99), 1);
    }

    #[test]
    fn int_in_truncates_fractional_input() {
        assert_eq!(int_in(Some("12.7"), 1, 1, 99), 12);
    }

    #[test]
    fn int_in_falls_back_then_clamps() {
        assert_eq!(int_in(Some("xyz"), 25, 1, 30), 25);
        assert_eq!(int_in(None, 40, 1, 30), 30);
    }

    #[test]
    fn clamp_maps_nan_to_min() {
        assert_eq!(clamp(f64::NAN, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
    }

    #[test]
    fn field_or_takes_default_when_absent() {
        assert_eq!(field_or(None, 4.5, 0.0, 1e6), 4.5);
        assert_eq!(field_or(Some(f64::NAN), 4.5, 0.0, 1e6), 4.5);
        assert_eq!(field_or(Some(2.0), 4.5, 0.0, 1e6), 2.0);
        assert_eq!(field_or(Some(-1.0), 4.5, 0.0, 1e6), 0.0);
    }
}
