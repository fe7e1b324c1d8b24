//! Parser for standard and custom number format strings.
//!
//! Custom formats are split into sections on unescaped `;` using the token
//! stream, so separators inside quotes or after a backslash stay literal.

pub mod lexer;
pub mod tokens;

use log::debug;

use crate::ast::{
    CustomFormat, DigitPlaceholder, FormatComponents, FormatItem, NumberFormat, Section,
    StandardCode, StandardFormat,
};
use crate::error::FormatError;
use crate::metadata::{custom_format_metadata, MetadataRequest};
use lexer::Lexer;
use tokens::{SpannedToken, Token};

/// Maximum number of sign-based sections in a custom format.
const MAX_SECTIONS: usize = 3;

/// Parse a format string into a NumberFormat.
///
/// An empty format is the general format `G`.
pub fn parse(format_code: &str) -> Result<NumberFormat, FormatError> {
    if format_code.is_empty() {
        return Ok(NumberFormat::Standard(StandardFormat {
            code: StandardCode::General,
            letter: 'G',
            precision: None,
        }));
    }

    if is_standard_format(format_code) {
        return parse_standard(format_code).map(NumberFormat::Standard);
    }

    Ok(NumberFormat::Custom(parse_custom(format_code)))
}

/// Returns true if `format` is a single letter optionally followed by up to
/// two precision digits.
pub fn is_standard_format(format: &str) -> bool {
    let mut chars = format.chars();
    match chars.next() {
        Some(letter) if letter.is_ascii_alphabetic() => {
            let rest = chars.as_str();
            rest.len() <= 2 && rest.bytes().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}

fn parse_standard(format_code: &str) -> Result<StandardFormat, FormatError> {
    let mut chars = format_code.chars();
    let letter = chars.next().unwrap_or('G');
    let code = StandardCode::from_letter(letter).ok_or_else(|| {
        debug!("rejecting unknown standard format {format_code:?}");
        FormatError::UnknownStandardFormat {
            code: format_code.to_string(),
        }
    })?;
    let digits = chars.as_str();
    let precision = if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    };
    Ok(StandardFormat {
        code,
        letter,
        precision,
    })
}

fn parse_custom(format_code: &str) -> CustomFormat {
    let sections = split_sections(format_code);
    let section_count = sections.len().min(MAX_SECTIONS);
    let explicit_negative = section_count >= 2 && !sections[1].is_empty();
    let components = components(format_code);

    CustomFormat {
        positive: parse_section(&components.positive),
        negative: parse_section(&components.negative),
        zero: parse_section(&components.zero),
        components,
        section_count,
        explicit_negative,
    }
}

/// Split a format string on unescaped `;`.
///
/// Always returns at least one (possibly empty) section.
pub fn split_sections(format: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut start = 0;
    for token in Lexer::new(format).tokenize() {
        if matches!(token.token, Token::SectionSep) {
            sections.push(&format[start..token.start]);
            start = token.end;
        }
    }
    sections.push(&format[start..]);
    sections
}

/// Derive the positive/negative/zero components of a format string.
///
/// Empty negative or zero sections fall back to the positive one; sections
/// beyond the third are ignored.
pub fn components(format: &str) -> FormatComponents {
    let sections = split_sections(format);
    let positive = sections[0].to_string();
    let pick = |index: usize| {
        sections
            .get(index)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .unwrap_or_else(|| positive.clone())
    };

    FormatComponents {
        negative: pick(1),
        zero: pick(2),
        has_negative: sections.len() >= 2,
        positive,
    }
}

/// Parse one section into its items and metadata.
pub(crate) fn parse_section(source: &str) -> Section {
    let mut items: Vec<FormatItem> = Vec::new();
    let mut seen_decimal = false;
    let mut seen_exponent = false;

    for SpannedToken { token, start, end } in Lexer::new(source).tokenize() {
        match token {
            Token::Eof => break,
            Token::Literal(ch) | Token::EscapedChar(ch) => {
                push_literal(&mut items, ch.encode_utf8(&mut [0; 4]))
            }
            Token::QuotedString(text) => push_literal(&mut items, &text),
            Token::SectionSep => push_literal(&mut items, ";"),
            Token::Zero => items.push(FormatItem::Digit(DigitPlaceholder::Zero)),
            Token::Hash => items.push(FormatItem::Digit(DigitPlaceholder::Hash)),
            Token::DecimalPoint => {
                // Only the first point before an exponent counts; later ones are dropped.
                if !seen_decimal && !seen_exponent {
                    seen_decimal = true;
                    items.push(FormatItem::DecimalPoint);
                }
            }
            Token::GroupSep => items.push(FormatItem::GroupSeparator),
            Token::Percent => items.push(FormatItem::Percent),
            Token::Permille => items.push(FormatItem::Permille),
            Token::Exponent {
                upper,
                show_plus,
                min_digits,
            } => {
                if seen_exponent {
                    push_literal(&mut items, &source[start..end]);
                } else {
                    seen_exponent = true;
                    items.push(FormatItem::Scientific {
                        upper,
                        show_plus,
                        min_digits,
                    });
                }
            }
        }
    }

    Section {
        source: source.to_string(),
        items,
        metadata: custom_format_metadata(source, MetadataRequest::ALL),
    }
}

fn push_literal(items: &mut Vec<FormatItem>, text: &str) {
    if let Some(FormatItem::Literal(prev)) = items.last_mut() {
        prev.push_str(text);
    } else {
        items.push(FormatItem::Literal(text.to_string()));
    }
}

/// Replace the fractional part of every section with `decimals` placeholders.
///
/// `trailing_zeros` selects `0` (forced) over `#` (optional) placeholders.
/// Standard codes get the count appended as their precision specifier.
/// `None` leaves the format unchanged.
pub fn add_decimals_to_format(format: &str, decimals: Option<i32>, trailing_zeros: bool) -> String {
    let Some(decimals) = decimals else {
        return format.to_string();
    };
    let count = decimals.unsigned_abs() as usize;
    let format = if format.is_empty() { "0" } else { format };

    if is_standard_format(format) {
        let letter = format.chars().next().unwrap_or('G');
        return match StandardCode::from_letter(letter) {
            Some(StandardCode::RoundTrip) | None => format.to_string(),
            Some(_) => format!("{letter}{}", count.min(99)),
        };
    }

    let placeholder = if trailing_zeros { "0" } else { "#" };
    let fraction = if count == 0 {
        String::new()
    } else {
        format!(".{}", placeholder.repeat(count))
    };
    map_sections(format, |section| {
        rewrite_fraction(section, |_| fraction.clone())
    })
}

/// Append `extra` optional digits to the fraction of every custom section,
/// keeping the placeholders already there.
pub fn widen_fraction(format: &str, extra: usize) -> String {
    if extra == 0 || format.is_empty() || is_standard_format(format) {
        return format.to_string();
    }
    map_sections(format, |section| {
        rewrite_fraction(section, |existing| format!(".{existing}{}", "#".repeat(extra)))
    })
}

/// The digit-placeholder skeleton of the section `value` would select, e.g.
/// `#,0.00` from `$#,0.00;($#,0.00)`.
///
/// Returns `None` for standard formats and for sections without digits.
pub fn numeric_format(value: f64, format: &str) -> Option<String> {
    if format.is_empty() || is_standard_format(format) {
        return None;
    }
    let comps = components(format);
    let section = comps.select(value);
    let skeleton: String = Lexer::new(section)
        .tokenize()
        .iter()
        .take_while(|t| !matches!(t.token, Token::Exponent { .. }))
        .filter(|t| {
            matches!(
                t.token,
                Token::Zero | Token::Hash | Token::DecimalPoint | Token::GroupSep
            )
        })
        .map(|t| &section[t.start..t.end])
        .collect();

    if skeleton.chars().any(|c| c == '0' || c == '#') {
        Some(skeleton)
    } else {
        None
    }
}

fn map_sections(format: &str, rewrite: impl Fn(&str) -> String) -> String {
    split_sections(format)
        .into_iter()
        .map(rewrite)
        .collect::<Vec<_>>()
        .join(";")
}

/// Remove the decimal point and fraction placeholders of a section and put
/// `fraction(existing_placeholders)` right after the integer placeholders
/// (and any trailing scaling commas). Sections without digits are returned
/// unchanged.
fn rewrite_fraction(section: &str, fraction: impl FnOnce(&str) -> String) -> String {
    let tokens = Lexer::new(section).tokenize();
    let eof = tokens.len() - 1;
    let exponent = tokens
        .iter()
        .position(|t| matches!(t.token, Token::Exponent { .. }))
        .unwrap_or(eof);
    let dot = tokens[..exponent]
        .iter()
        .position(|t| matches!(t.token, Token::DecimalPoint));
    let integer_end = dot.unwrap_or(exponent);

    let last_integer_digit = tokens[..integer_end]
        .iter()
        .rposition(|t| t.token.is_digit_placeholder());
    let insert_at = match (last_integer_digit, dot) {
        (Some(last), _) => {
            let mut index = last + 1;
            while index < integer_end && matches!(tokens[index].token, Token::GroupSep) {
                index += 1;
            }
            index
        }
        (None, Some(dot)) => dot,
        (None, None) => return section.to_string(),
    };

    let is_dropped = |index: usize| match dot {
        Some(dot) => {
            index == dot
                || (index > dot
                    && index < exponent
                    && tokens[index].token.is_digit_placeholder())
        }
        None => false,
    };

    let existing: String = (0..eof)
        .filter(|&i| is_dropped(i) && i != dot.unwrap_or(usize::MAX))
        .map(|i| &section[tokens[i].start..tokens[i].end])
        .collect();
    let replacement = fraction(&existing);

    let mut out = String::with_capacity(section.len() + replacement.len());
    for (index, token) in tokens[..eof].iter().enumerate() {
        if index == insert_at {
            out.push_str(&replacement);
        }
        if !is_dropped(index) {
            out.push_str(&section[token.start..token.end]);
        }
    }
    if insert_at == eof {
        out.push_str(&replacement);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_standard_format() {
        assert!(is_standard_format("N"));
        assert!(is_standard_format("n2"));
        assert!(is_standard_format("X10"));
        assert!(!is_standard_format("N100"));
        assert!(!is_standard_format("0.00"));
        assert!(!is_standard_format(""));
        assert!(!is_standard_format("NN"));
    }

    #[test]
    fn test_parse_standard_precision() {
        let fmt = parse("E3").unwrap();
        assert_eq!(
            fmt,
            NumberFormat::Standard(StandardFormat {
                code: StandardCode::Exponential,
                letter: 'E',
                precision: Some(3),
            })
        );
    }

    #[test]
    fn test_rewrite_fraction_keeps_suffix() {
        assert_eq!(add_decimals_to_format("0.00 %", Some(3), true), "0.000 %");
        assert_eq!(add_decimals_to_format("#,0", Some(2), false), "#,0.##");
        assert_eq!(add_decimals_to_format("#,0.00", Some(0), true), "#,0");
        assert_eq!(add_decimals_to_format("#,0,,", Some(1), true), "#,0,,.0");
    }

    #[test]
    fn test_widen_keeps_forced_digits() {
        assert_eq!(widen_fraction("0.0", 3), "0.0###");
        assert_eq!(widen_fraction("0", 2), "0.##");
        assert_eq!(widen_fraction("'zero'", 2), "'zero'");
    }

    #[test]
    fn test_sections_ignore_quoted_separator() {
        assert_eq!(split_sections("0';'0;-0"), vec!["0';'0", "-0"]);
        assert_eq!(split_sections("0\\;0"), vec!["0\\;0"]);
    }
}
