//! Precision-aware floating point helpers.
//!
//! Unit ranges and tick positions are compared with a tolerance relative to
//! the magnitude involved, so values like `999.9999999999999` still fall in
//! the range starting at `1000`.

/// Absolute tolerance used when no precision is given.
pub const DEFAULT_PRECISION: f64 = 0.0001;

/// Significant digits kept by [`remove_decimal_noise`].
pub const NOISE_FREE_DIGITS: i32 = 15;

/// `10^exp`, exact for every exponent a double can represent as a power of ten.
pub fn pow10(exp: i32) -> f64 {
    if exp >= 0 {
        10f64.powi(exp)
    } else {
        1.0 / 10f64.powi(-exp)
    }
}

/// `floor(log10(|x|))`, corrected for rounding in `log10` near powers of ten.
///
/// Returns 0 for zero and non-finite input.
pub fn log10_floor(x: f64) -> i32 {
    let x = x.abs();
    if x == 0.0 || !x.is_finite() {
        return 0;
    }
    let mut exp = x.log10().floor() as i32;
    if pow10(exp) > x {
        exp -= 1;
    } else if pow10(exp + 1) <= x {
        exp += 1;
    }
    exp
}

/// The absolute precision that keeps `digits` significant digits of `x`
/// (`10^(floor(log10|x|) - digits)`).
///
/// `None` for zero and non-finite values.
pub fn get_precision(x: f64, digits: i32) -> Option<f64> {
    if x == 0.0 || !x.is_finite() {
        return None;
    }
    Some(pow10(log10_floor(x) - digits))
}

pub fn equal_with_precision(x: f64, y: f64, precision: f64) -> bool {
    x == y || (x - y).abs() < precision
}

pub fn greater_or_equal_with_precision(x: f64, y: f64, precision: f64) -> bool {
    x > y || equal_with_precision(x, y, precision)
}

pub fn less_with_precision(x: f64, y: f64, precision: f64) -> bool {
    x < y && !equal_with_precision(x, y, precision)
}

/// Round `x` to a multiple of `precision`.
///
/// Fractional precisions are re-rounded through their decimal digits so the
/// result carries no binary noise (`0.1 + 0.2` stays `0.3`).
pub fn round_to_precision(x: f64, precision: f64) -> f64 {
    if precision == 0.0 || !precision.is_finite() || !x.is_finite() {
        return x;
    }
    let result = (x / precision).round() * precision;
    let decimals = -log10_floor(precision);
    if decimals > 0 && decimals < 16 {
        format!("{:.*}", decimals as usize, result)
            .parse()
            .unwrap_or(result)
    } else {
        result
    }
}

/// Round `x` to `digits` significant digits.
pub fn round_to_significant(x: f64, digits: i32) -> f64 {
    match get_precision(x, digits - 1) {
        Some(precision) => round_to_precision(x, precision),
        None => x,
    }
}

/// Drop binary noise past the digits a double reliably carries.
pub fn remove_decimal_noise(x: f64) -> f64 {
    round_to_significant(x, NOISE_FREE_DIGITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log10_floor() {
        assert_eq!(log10_floor(1000.0), 3);
        assert_eq!(log10_floor(999.999), 2);
        assert_eq!(log10_floor(0.001), -3);
        assert_eq!(log10_floor(-2.5e7), 7);
        assert_eq!(log10_floor(0.0), 0);
    }

    #[test]
    fn test_get_precision() {
        assert_eq!(get_precision(1234.0, 3), Some(1.0));
        assert_eq!(get_precision(0.0, 3), None);
        assert_eq!(get_precision(f64::NAN, 3), None);
    }

    #[test]
    fn test_comparisons_tolerate_noise() {
        let precision = get_precision(1000.0, 3).unwrap();
        assert!(greater_or_equal_with_precision(999.9999999, 1000.0, precision));
        assert!(!less_with_precision(999.9999999, 1000.0, precision));
        assert!(less_with_precision(990.0, 1000.0, precision));
    }

    #[test]
    fn test_round_to_significant() {
        assert_eq!(round_to_significant(123456.0, 3), 123000.0);
        assert_eq!(round_to_significant(0.000123456, 2), 0.00012);
        assert_eq!(round_to_significant(0.0, 2), 0.0);
    }

    #[test]
    fn test_remove_decimal_noise() {
        assert_eq!(remove_decimal_noise(0.1 + 0.2), 0.3);
        assert_eq!(remove_decimal_noise(4.56e7 / 1e6), 45.6);
    }
}
