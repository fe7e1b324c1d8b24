//! Decimal digit strings for finite values.
//!
//! Values are expanded from their shortest round-trip representation, limited
//! to [`MAX_SIGNIFICANT_DIGITS`] and rounded half away from zero on the decimal
//! digits themselves. Requested precision beyond the available digits is
//! filled with zeros, so magnitudes far outside the native digit range still
//! render exactly the digits that are known.

/// Significant digits kept before any requested rounding.
pub(crate) const MAX_SIGNIFICANT_DIGITS: usize = 16;

/// The decimal digits of a non-negative value.
///
/// `value = 0.d1d2...dn × 10^point`, i.e. `point` digits sit before the
/// decimal point. No leading zeros; empty `digits` means zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Digits {
    digits: Vec<u8>,
    point: i32,
}

/// A fixed-point rendering: integer digits without leading zeros (empty for
/// values below one) and exactly `precision` fraction digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FixedDigits {
    pub integer: String,
    pub fraction: String,
}

/// A scientific rendering: one integer digit, the fraction and the exponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExponentialDigits {
    pub mantissa: FixedDigits,
    pub exponent: i32,
}

impl Digits {
    /// Shortest round-trip digits of `|value|`. `value` must be finite.
    pub(crate) fn exact(value: f64) -> Self {
        let value = value.abs();
        if value == 0.0 {
            return Digits {
                digits: Vec::new(),
                point: 0,
            };
        }

        let repr = format!("{value:e}");
        let (mantissa, exponent) = repr.split_once('e').unwrap_or((&repr, "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let mut digits: Vec<u8> = mantissa
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        while digits.last() == Some(&0) {
            digits.pop();
        }

        Digits {
            digits,
            point: exponent + 1,
        }
    }

    /// Digits of `|value|` limited to the significant digits a double holds.
    pub(crate) fn new(value: f64) -> Self {
        let mut digits = Self::exact(value);
        digits.round_significant(MAX_SIGNIFICANT_DIGITS);
        digits
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Decimal exponent of the leading digit (`d.ddd × 10^exponent`).
    pub(crate) fn exponent(&self) -> i32 {
        self.point - 1
    }

    /// Keep `places` digits after the decimal point.
    pub(crate) fn round_decimal_places(&mut self, places: u32) {
        let keep = i64::from(self.point) + i64::from(places);
        self.round_at(keep);
    }

    /// Keep `count` significant digits.
    pub(crate) fn round_significant(&mut self, count: usize) {
        self.round_at(count as i64);
    }

    /// Keep the first `keep` digits, rounding half away from zero.
    fn round_at(&mut self, keep: i64) {
        if keep < 0 {
            self.digits.clear();
            return;
        }
        let keep = keep as usize;
        if keep >= self.digits.len() {
            return;
        }

        let round_up = self.digits[keep] >= 5;
        self.digits.truncate(keep);
        if round_up {
            let mut carry = true;
            for digit in self.digits.iter_mut().rev() {
                if *digit == 9 {
                    *digit = 0;
                } else {
                    *digit += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                self.digits.insert(0, 1);
                self.point += 1;
            }
        }
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
        if self.digits.is_empty() {
            self.point = 0;
        }
    }

    fn digit_at(&self, index: i64) -> char {
        if index < 0 {
            return '0';
        }
        self.digits
            .get(index as usize)
            .map_or('0', |d| char::from(b'0' + d))
    }

    /// Split into integer and fraction digits with `places` fraction digits.
    pub(crate) fn to_fixed_parts(&self, places: u32) -> FixedDigits {
        let point = i64::from(self.point);
        let integer = (0..point.max(0)).map(|i| self.digit_at(i)).collect();
        let fraction = (0..i64::from(places))
            .map(|i| self.digit_at(point + i))
            .collect();
        FixedDigits { integer, fraction }
    }

    /// All significant digits as a plain digit string.
    pub(crate) fn significant(&self) -> String {
        self.digits.iter().map(|d| char::from(b'0' + d)).collect()
    }
}

/// Fixed-point digits of `|value|` rounded to `precision` decimal places.
pub(crate) fn to_fixed(value: f64, precision: u32) -> FixedDigits {
    let mut digits = Digits::new(value);
    digits.round_decimal_places(precision);
    digits.to_fixed_parts(precision)
}

/// Scientific digits of `|value|` with `precision` mantissa fraction digits.
pub(crate) fn to_exponential(value: f64, precision: u32) -> ExponentialDigits {
    let mut digits = Digits::new(value);
    digits.round_significant(precision as usize + 1);
    if digits.is_zero() {
        return ExponentialDigits {
            mantissa: FixedDigits {
                integer: "0".to_string(),
                fraction: "0".repeat(precision as usize),
            },
            exponent: 0,
        };
    }

    let exponent = digits.exponent();
    let significant = digits.significant();
    let (integer, rest) = significant.split_at(1);
    let mut fraction = rest.to_string();
    fraction.extend(std::iter::repeat('0').take((precision as usize).saturating_sub(rest.len())));

    ExponentialDigits {
        mantissa: FixedDigits {
            integer: integer.to_string(),
            fraction,
        },
        exponent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(value: f64, precision: u32) -> (String, String) {
        let digits = to_fixed(value, precision);
        (digits.integer, digits.fraction)
    }

    #[test]
    fn test_fixed_rounds_half_away_from_zero() {
        assert_eq!(fixed(12345.6789, 0), ("12346".into(), "".into()));
        assert_eq!(fixed(12345.6789, 3), ("12345".into(), "679".into()));
        assert_eq!(fixed(2.5, 0), ("3".into(), "".into()));
        assert_eq!(fixed(1.005, 2), ("1".into(), "01".into()));
    }

    #[test]
    fn test_fixed_carry_adds_digit() {
        assert_eq!(fixed(9.996, 2), ("10".into(), "00".into()));
        assert_eq!(fixed(0.6, 0), ("1".into(), "".into()));
        assert_eq!(fixed(0.06, 1), ("".into(), "1".into()));
    }

    #[test]
    fn test_fixed_small_values() {
        assert_eq!(fixed(0.0004, 3), ("".into(), "000".into()));
        assert_eq!(fixed(0.0, 2), ("".into(), "00".into()));
    }

    #[test]
    fn test_fixed_beyond_native_digits() {
        let (integer, fraction) = fixed(1e30, 2);
        assert_eq!(integer, format!("1{}", "0".repeat(30)));
        assert_eq!(fraction, "00");

        let (integer, _) = fixed(123456789012345678.0, 0);
        assert_eq!(integer, "123456789012345700");
    }

    #[test]
    fn test_fixed_removes_float_noise() {
        assert_eq!(fixed(0.1 + 0.2, 17), ("".into(), "30000000000000000".into()));
    }

    #[test]
    fn test_exponential() {
        let e = to_exponential(12345.0, 2);
        assert_eq!(e.mantissa.integer, "1");
        assert_eq!(e.mantissa.fraction, "23");
        assert_eq!(e.exponent, 4);

        let e = to_exponential(0.000999, 1);
        assert_eq!((e.mantissa.integer.as_str(), e.exponent), ("1", -3));
        assert_eq!(e.mantissa.fraction, "0");

        let e = to_exponential(0.0, 3);
        assert_eq!(e.mantissa.fraction, "000");
        assert_eq!(e.exponent, 0);
    }
}
