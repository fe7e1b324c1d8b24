//! Custom format rendering (placeholders, grouping, scaling, scientific notation)

use crate::ast::{CustomFormat, DigitPlaceholder, FormatItem, Section};
use crate::culture::{Culture, GroupBoundaries};

use super::decimal::{to_exponential, to_fixed};

/// Text of a rendered section split around its numeric region.
///
/// `middle` spans the first to the last numeric item so an override template
/// can wrap just the number, leaving leading and trailing literals outside.
#[derive(Debug, Default)]
struct Rendered {
    prefix: String,
    middle: String,
    suffix: String,
    /// True if every digit of the rounded value is zero.
    is_zero: bool,
    /// False for sections made only of literals.
    has_number: bool,
}

impl Rendered {
    fn fuse(self, override_format: Option<&str>) -> String {
        match override_format.filter(|_| self.has_number) {
            Some(template) => {
                let middle = template.replace("{0}", &self.middle);
                format!("{}{}{}", self.prefix, middle, self.suffix)
            }
            None => format!("{}{}{}", self.prefix, self.middle, self.suffix),
        }
    }
}

/// Numeric structure of a section: which placeholders sit on which side of
/// the decimal point.
#[derive(Debug)]
struct Layout {
    integer: Vec<DigitPlaceholder>,
    fraction: Vec<DigitPlaceholder>,
    first_numeric: Option<usize>,
    last_numeric: Option<usize>,
    scientific: Option<usize>,
}

impl Layout {
    fn of(section: &Section, allow_scientific: bool) -> Self {
        let scientific = section.scientific_index().filter(|_| allow_scientific);
        let end = scientific.unwrap_or(section.items.len());
        let mut layout = Layout {
            integer: Vec::new(),
            fraction: Vec::new(),
            first_numeric: None,
            last_numeric: None,
            scientific,
        };

        let mut after_point = false;
        for (index, item) in section.items[..end].iter().enumerate() {
            if item.is_numeric() {
                layout.first_numeric.get_or_insert(index);
                layout.last_numeric = Some(index);
            }
            match item {
                FormatItem::DecimalPoint => after_point = true,
                FormatItem::Digit(p) if after_point => layout.fraction.push(*p),
                FormatItem::Digit(p) => layout.integer.push(*p),
                _ => {}
            }
        }
        layout
    }

    /// Integer digits that must be shown: everything from the leftmost `0`
    /// placeholder to the decimal point.
    fn min_integer_digits(&self) -> usize {
        self.integer
            .iter()
            .position(DigitPlaceholder::is_required)
            .map_or(0, |leftmost| self.integer.len() - leftmost)
    }

    /// Fraction digits kept: trailing zeros are dropped back to the last `0`
    /// placeholder.
    fn trim_fraction(&self, digits: &str) -> String {
        let required = self
            .fraction
            .iter()
            .rposition(DigitPlaceholder::is_required)
            .map_or(0, |last| last + 1);
        let significant = digits.trim_end_matches('0').len();
        digits[..significant.max(required)].to_string()
    }

    fn region(&self, index: usize) -> Region {
        match (self.first_numeric, self.last_numeric) {
            (Some(first), _) if index < first => Region::Prefix,
            (_, Some(last)) if index > last => Region::Suffix,
            (Some(_), Some(_)) => Region::Middle,
            _ => Region::Prefix,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Prefix,
    Middle,
    Suffix,
}

impl Rendered {
    fn push(&mut self, region: Region, text: &str) {
        match region {
            Region::Prefix => self.prefix.push_str(text),
            Region::Middle => self.middle.push_str(text),
            Region::Suffix => self.suffix.push_str(text),
        }
    }
}

/// Format a finite value with a custom format.
///
/// `override_format` replaces the numeric region with the template, its `{0}`
/// receiving the rendered digits.
pub(crate) fn format_custom(
    format: &CustomFormat,
    value: f64,
    culture: &Culture,
    override_format: Option<&str>,
) -> String {
    let section = format.select_section(value);
    let rendered = render_section(section, value.abs(), culture, override_format);

    // A nonzero value that rounds to zero is shown by the zero section.
    if value != 0.0 && rendered.is_zero && format.has_zero_section() {
        let zero = render_section(format.select_section(0.0), 0.0, culture, override_format);
        return zero.fuse(override_format);
    }

    let needs_sign = value < 0.0 && !format.has_explicit_negative() && !rendered.is_zero;
    let text = rendered.fuse(override_format);
    if needs_sign {
        format!("{}{}", culture.negative_sign, text)
    } else {
        text
    }
}

fn render_section(
    section: &Section,
    magnitude: f64,
    culture: &Culture,
    override_format: Option<&str>,
) -> Rendered {
    let layout = Layout::of(section, override_format.is_none());
    let scaled = magnitude * section.metadata.scale.unwrap_or(1.0);

    match layout.scientific {
        Some(marker) => render_scientific(section, &layout, marker, scaled, culture),
        None => render_fixed(section, &layout, scaled, culture),
    }
}

fn render_fixed(section: &Section, layout: &Layout, value: f64, culture: &Culture) -> Rendered {
    let fixed = to_fixed(value, layout.fraction.len() as u32);
    let is_zero = fixed.integer.bytes().all(|b| b == b'0')
        && fixed.fraction.bytes().all(|b| b == b'0');
    let fraction = layout.trim_fraction(&fixed.fraction);
    let integer = integer_chunks(&fixed.integer, layout, section.uses_grouping(), culture);

    let mut out = Rendered {
        is_zero,
        has_number: layout.first_numeric.is_some(),
        ..Rendered::default()
    };
    let mut integer_index = 0;
    let mut fraction_index = 0;
    let mut after_point = false;

    for (index, item) in section.items.iter().enumerate() {
        let region = layout.region(index);
        match item {
            FormatItem::Literal(text) => out.push(region, text),
            FormatItem::Percent => out.push(region, &culture.percent_symbol),
            FormatItem::Permille => out.push(region, &culture.permille_symbol),
            FormatItem::GroupSeparator | FormatItem::Scientific { .. } => {}
            FormatItem::DecimalPoint => {
                after_point = true;
                if layout.integer.is_empty() {
                    out.push(region, &integer.leading);
                }
                if !fraction.is_empty() {
                    out.push(region, culture.decimal_separator.encode_utf8(&mut [0; 4]));
                }
            }
            FormatItem::Digit(_) if after_point => {
                if let Some(ch) = fraction.chars().nth(fraction_index) {
                    out.push(region, ch.encode_utf8(&mut [0; 4]));
                }
                fraction_index += 1;
            }
            FormatItem::Digit(_) => {
                if let Some(chunk) = integer.chunks.get(integer_index) {
                    out.push(region, chunk);
                }
                integer_index += 1;
            }
        }
    }
    out
}

/// Integer digits distributed over the integer placeholders.
#[derive(Debug)]
struct IntegerChunks {
    /// One entry per integer placeholder, left to right.
    chunks: Vec<String>,
    /// Digits shown at the decimal point when the format has no integer
    /// placeholders.
    leading: String,
}

/// Assign digits to placeholders from the right. The leftmost placeholder
/// takes every remaining digit; placeholders right of the leftmost `0` show
/// a zero when the value has no digit for them.
fn integer_chunks(
    digits: &str,
    layout: &Layout,
    grouping: bool,
    culture: &Culture,
) -> IntegerChunks {
    let digits = digits.trim_start_matches('0');
    if layout.integer.is_empty() {
        return IntegerChunks {
            chunks: Vec::new(),
            leading: digits.to_string(),
        };
    }

    let width = digits.len().max(layout.min_integer_digits());
    let padded: Vec<char> = std::iter::repeat('0')
        .take(width - digits.len())
        .chain(digits.chars())
        .collect();

    let placeholders = layout.integer.len();
    let mut boundaries = GroupBoundaries::new(&culture.group_sizes);
    let mut chunks = vec![String::new(); placeholders];
    let mut count = 0;

    for (from_right, ch) in padded.iter().rev().enumerate() {
        let slot = placeholders.saturating_sub(from_right + 1);
        if grouping && boundaries.is_boundary(count) {
            chunks[slot].push(culture.group_separator);
        }
        chunks[slot].push(*ch);
        count += 1;
    }
    for chunk in &mut chunks {
        *chunk = chunk.chars().rev().collect();
    }

    IntegerChunks {
        chunks,
        leading: String::new(),
    }
}

fn render_scientific(
    section: &Section,
    layout: &Layout,
    marker: usize,
    value: f64,
    culture: &Culture,
) -> Rendered {
    let exp = to_exponential(value, layout.fraction.len() as u32);
    let is_zero = exp.mantissa.integer == "0" && exp.mantissa.fraction.bytes().all(|b| b == b'0');
    let fraction = layout.trim_fraction(&exp.mantissa.fraction);

    let mut out = Rendered {
        is_zero,
        has_number: layout.first_numeric.is_some(),
        ..Rendered::default()
    };
    let mut integer_emitted = false;
    let mut fraction_index = 0;
    let mut after_point = false;

    for (index, item) in section.items.iter().enumerate() {
        let region = layout.region(index);
        match item {
            FormatItem::Literal(text) => out.push(region, text),
            FormatItem::Percent => out.push(region, &culture.percent_symbol),
            FormatItem::Permille => out.push(region, &culture.permille_symbol),
            FormatItem::GroupSeparator => {}
            FormatItem::DecimalPoint => {
                after_point = true;
                if !integer_emitted {
                    out.push(region, &exp.mantissa.integer);
                    integer_emitted = true;
                }
                if !fraction.is_empty() {
                    out.push(region, culture.decimal_separator.encode_utf8(&mut [0; 4]));
                }
            }
            FormatItem::Digit(_) if index > marker => {}
            FormatItem::Digit(_) if after_point => {
                if let Some(ch) = fraction.chars().nth(fraction_index) {
                    out.push(region, ch.encode_utf8(&mut [0; 4]));
                }
                fraction_index += 1;
            }
            FormatItem::Digit(_) => {
                if !integer_emitted {
                    out.push(region, &exp.mantissa.integer);
                    integer_emitted = true;
                }
            }
            FormatItem::Scientific {
                upper,
                show_plus,
                min_digits,
            } => {
                if !integer_emitted {
                    out.push(region, &exp.mantissa.integer);
                    integer_emitted = true;
                }
                let exponent = if is_zero { 0 } else { exp.exponent };
                let sign = match (exponent < 0, show_plus) {
                    (true, _) => culture.negative_sign.as_str(),
                    (false, true) => "+",
                    (false, false) => "",
                };
                let letter = if *upper { 'E' } else { 'e' };
                let digits = exponent.unsigned_abs();
                out.push(
                    Region::Suffix,
                    &format!("{letter}{sign}{digits:0width$}", width = *min_digits),
                );
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NumberFormat;

    fn custom(format: &str) -> CustomFormat {
        match NumberFormat::parse(format) {
            Ok(NumberFormat::Custom(fmt)) => fmt,
            other => panic!("expected custom format, got {other:?}"),
        }
    }

    fn fmt(value: f64, format: &str) -> String {
        format_custom(&custom(format), value, &Culture::en_us(), None)
    }

    #[test]
    fn test_integer_padding_and_overflow() {
        assert_eq!(fmt(5.0, "000"), "005");
        assert_eq!(fmt(12345.0, "00"), "12345");
        assert_eq!(fmt(0.0, "#"), "");
        assert_eq!(fmt(5.0, "0#"), "05");
    }

    #[test]
    fn test_interleaved_literals() {
        assert_eq!(fmt(5551234.0, "000-0000"), "555-1234");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(fmt(1234567.0, "#,0"), "1,234,567");
        assert_eq!(fmt(123.0, "#,0"), "123");
        assert_eq!(fmt(1234567.0, "0"), "1234567");
    }

    #[test]
    fn test_fraction_trimming() {
        assert_eq!(fmt(1.5, "0.0#"), "1.5");
        assert_eq!(fmt(1.0, "0.##"), "1");
        assert_eq!(fmt(1.256, "0.0#"), "1.26");
        assert_eq!(fmt(0.5, ".00"), ".50");
        assert_eq!(fmt(12.5, ".00"), "12.50");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(fmt(12345.0, "0.00E+00"), "1.23E+04");
        assert_eq!(fmt(0.00012, "0.0e0"), "1.2e-4");
        assert_eq!(fmt(0.0, "0.0E+0"), "0.0E+0");
    }

    #[test]
    fn test_override_wraps_numeric_region() {
        let format = custom("$#,0.0 'total'");
        let text = format_custom(&format, 1234.5, &Culture::en_us(), Some("{0}K"));
        assert_eq!(text, "$1,234.5K total");
    }

    #[test]
    fn test_override_suppresses_exponent() {
        let format = custom("0.0E+0");
        let text = format_custom(&format, 45.6, &Culture::en_us(), Some("{0}M"));
        assert_eq!(text, "45.6M");
    }

    #[test]
    fn test_override_skips_literal_sections() {
        let format = custom("0;(0);'-'");
        let text = format_custom(&format, 0.0, &Culture::en_us(), Some("{0}K"));
        assert_eq!(text, "-");
    }
}
