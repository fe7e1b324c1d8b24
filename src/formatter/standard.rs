//! Standard single-letter formats (C, D, E, F, G, N, P, R, X).

use crate::ast::{StandardCode, StandardFormat};
use crate::culture::Culture;

use super::decimal::{to_exponential, to_fixed, Digits, FixedDigits};

/// Default precision of the fixed-point codes (C, F, N, P).
const DEFAULT_FIXED_PRECISION: u32 = 2;
/// Default mantissa digits of `E`.
const DEFAULT_EXPONENTIAL_PRECISION: u32 = 6;
/// Default significant digits of `G`.
const DEFAULT_GENERAL_PRECISION: u32 = 15;
/// `R` switches to scientific notation from this decimal exponent.
const ROUND_TRIP_EXPONENT_LIMIT: i32 = 15;

/// Format a finite value with a standard format.
pub(crate) fn format_standard(format: &StandardFormat, value: f64, culture: &Culture) -> String {
    let negative = value < 0.0;
    let upper = !format.is_lowercase();

    match format.code {
        StandardCode::Currency => {
            let precision = format.precision.unwrap_or(DEFAULT_FIXED_PRECISION);
            let digits = to_fixed(value, precision);
            let number = fixed_number(&digits, true, culture);
            let pattern = if negative && !is_zero(&digits) {
                &culture.currency_negative_pattern
            } else {
                &culture.currency_positive_pattern
            };
            apply_pattern(pattern, &number, culture)
        }
        StandardCode::Decimal => {
            let digits = to_fixed(value, 0);
            let width = format.precision.unwrap_or(0) as usize;
            let integer = if digits.integer.is_empty() {
                "0"
            } else {
                digits.integer.as_str()
            };
            let padded = format!("{integer:0>width$}");
            signed(negative && !is_zero(&digits), padded, culture)
        }
        StandardCode::Exponential => {
            let precision = format.precision.unwrap_or(DEFAULT_EXPONENTIAL_PRECISION);
            let exp = to_exponential(value, precision);
            let mut text = exp.mantissa.integer.clone();
            if !exp.mantissa.fraction.is_empty() {
                text.push(culture.decimal_separator);
                text.push_str(&exp.mantissa.fraction);
            }
            text.push_str(&exponent_suffix(exp.exponent, upper, 3, culture));
            signed(negative, text, culture)
        }
        StandardCode::FixedPoint => {
            let precision = format.precision.unwrap_or(DEFAULT_FIXED_PRECISION);
            let digits = to_fixed(value, precision);
            let number = fixed_number(&digits, false, culture);
            signed(negative && !is_zero(&digits), number, culture)
        }
        StandardCode::Number => {
            let precision = format.precision.unwrap_or(DEFAULT_FIXED_PRECISION);
            let digits = to_fixed(value, precision);
            let number = fixed_number(&digits, true, culture);
            if negative && !is_zero(&digits) {
                apply_pattern(&culture.number_negative_pattern, &number, culture)
            } else {
                number
            }
        }
        StandardCode::Percent => {
            let precision = format.precision.unwrap_or(DEFAULT_FIXED_PRECISION);
            let digits = to_fixed(value * 100.0, precision);
            let number = fixed_number(&digits, true, culture);
            let pattern = if negative && !is_zero(&digits) {
                &culture.percent_negative_pattern
            } else {
                &culture.percent_positive_pattern
            };
            apply_pattern(pattern, &number, culture)
        }
        StandardCode::General => {
            let precision = match format.precision {
                None | Some(0) => DEFAULT_GENERAL_PRECISION,
                Some(p) => p,
            };
            let mut digits = Digits::new(value);
            digits.round_significant(precision as usize);
            let text = general(&digits, precision as i32, upper, culture);
            signed(negative && !digits.is_zero(), text, culture)
        }
        StandardCode::RoundTrip => {
            let digits = Digits::exact(value);
            let text = general(&digits, ROUND_TRIP_EXPONENT_LIMIT, upper, culture);
            signed(negative && !digits.is_zero(), text, culture)
        }
        StandardCode::Hexadecimal => {
            let magnitude = value.abs().round();
            // Saturates above u64::MAX.
            let integer = magnitude as u64;
            let width = format.precision.unwrap_or(0) as usize;
            let hex = if upper {
                format!("{integer:0width$X}")
            } else {
                format!("{integer:0width$x}")
            };
            signed(negative && integer != 0, hex, culture)
        }
    }
}

fn is_zero(digits: &FixedDigits) -> bool {
    digits.integer.bytes().all(|b| b == b'0') && digits.fraction.bytes().all(|b| b == b'0')
}

fn signed(negative: bool, text: String, culture: &Culture) -> String {
    if negative {
        format!("{}{}", culture.negative_sign, text)
    } else {
        text
    }
}

/// Integer part (grouped if asked), then the fraction if there is one.
fn fixed_number(digits: &FixedDigits, grouping: bool, culture: &Culture) -> String {
    let integer = if digits.integer.is_empty() {
        "0".to_string()
    } else if grouping {
        culture.group_digits(&digits.integer)
    } else {
        digits.integer.clone()
    };

    if digits.fraction.is_empty() {
        integer
    } else {
        format!("{integer}{}{}", culture.decimal_separator, digits.fraction)
    }
}

/// Substitute a culture pattern: `n` number, `$` currency, `%` percent,
/// `-` negative sign.
fn apply_pattern(pattern: &str, number: &str, culture: &Culture) -> String {
    let mut out = String::with_capacity(pattern.len() + number.len());
    for ch in pattern.chars() {
        match ch {
            'n' => out.push_str(number),
            '$' => out.push_str(&culture.currency_symbol),
            '%' => out.push_str(&culture.percent_symbol),
            '-' => out.push_str(&culture.negative_sign),
            _ => out.push(ch),
        }
    }
    out
}

fn exponent_suffix(exponent: i32, upper: bool, min_digits: usize, culture: &Culture) -> String {
    let letter = if upper { 'E' } else { 'e' };
    let sign = if exponent < 0 {
        culture.negative_sign.as_str()
    } else {
        "+"
    };
    let digits = exponent.unsigned_abs();
    format!("{letter}{sign}{digits:0min_digits$}")
}

/// Plain notation when `-5 < exponent < limit`, scientific otherwise.
fn general(digits: &Digits, limit: i32, upper: bool, culture: &Culture) -> String {
    if digits.is_zero() {
        return "0".to_string();
    }

    let significant = digits.significant();
    let exponent = digits.exponent();

    if (-4..limit).contains(&exponent) {
        let point = exponent + 1;
        if point <= 0 {
            let zeros = "0".repeat(point.unsigned_abs() as usize);
            return format!("0{}{zeros}{significant}", culture.decimal_separator);
        }
        let point = point as usize;
        if point >= significant.len() {
            return format!("{significant}{}", "0".repeat(point - significant.len()));
        }
        let (integer, fraction) = significant.split_at(point);
        return format!("{integer}{}{fraction}", culture.decimal_separator);
    }

    let (lead, rest) = significant.split_at(1);
    let mut text = lead.to_string();
    if !rest.is_empty() {
        text.push(culture.decimal_separator);
        text.push_str(rest);
    }
    text.push_str(&exponent_suffix(exponent, upper, 2, culture));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NumberFormat;

    fn fmt_in(value: f64, code: &str, culture: &Culture) -> String {
        match NumberFormat::parse(code) {
            Ok(NumberFormat::Standard(format)) => format_standard(&format, value, culture),
            other => panic!("expected standard format, got {other:?}"),
        }
    }

    fn fmt(value: f64, code: &str) -> String {
        fmt_in(value, code, &Culture::en_us())
    }

    #[test]
    fn test_general() {
        assert_eq!(fmt(1234.5, "G"), "1234.5");
        assert_eq!(fmt(0.0001, "G"), "0.0001");
        assert_eq!(fmt(0.00001, "G"), "1E-05");
        assert_eq!(fmt(1e15, "G"), "1E+15");
        assert_eq!(fmt(1.5e-7, "g"), "1.5e-07");
        assert_eq!(fmt(123456.0, "G3"), "1.23E+05");
        assert_eq!(fmt(0.1 + 0.2, "G"), "0.3");
    }

    #[test]
    fn test_round_trip() {
        assert_eq!(fmt(0.1 + 0.2, "R"), "0.30000000000000004");
        assert_eq!(fmt(-2.5, "R"), "-2.5");
    }

    #[test]
    fn test_fixed_codes() {
        assert_eq!(fmt(1234.567, "F"), "1234.57");
        assert_eq!(fmt(1234.567, "N1"), "1,234.6");
        assert_eq!(fmt(-1234.567, "N0"), "-1,235");
        assert_eq!(fmt(-0.001, "F2"), "0.00");
    }

    #[test]
    fn test_currency_patterns() {
        assert_eq!(fmt(1234.5, "C"), "$1,234.50");
        assert_eq!(fmt(-1234.5, "C0"), "($1,235)");
        assert_eq!(fmt_in(1234.5, "C", &Culture::de_de()), "1.234,50 €");
    }

    #[test]
    fn test_percent() {
        assert_eq!(fmt(0.256, "P1"), "25.6 %");
        assert_eq!(fmt(-0.5, "P0"), "-50 %");
    }

    #[test]
    fn test_exponential() {
        assert_eq!(fmt(12345.678, "E"), "1.234568E+004");
        assert_eq!(fmt(-0.00012, "e2"), "-1.20e-004");
    }

    #[test]
    fn test_decimal_and_hex() {
        assert_eq!(fmt(42.0, "D5"), "00042");
        assert_eq!(fmt(-42.0, "D"), "-42");
        assert_eq!(fmt(255.0, "X"), "FF");
        assert_eq!(fmt(255.0, "x4"), "00ff");
        assert_eq!(fmt(-255.0, "X"), "-FF");
    }
}
