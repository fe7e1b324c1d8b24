//! AST types for parsed format strings.

use crate::metadata::FormatMetadata;

/// Digit placeholder type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitPlaceholder {
    /// `0` - Display digit or zero
    Zero,
    /// `#` - Display digit or nothing
    Hash,
}

impl DigitPlaceholder {
    /// Returns true if this placeholder requires a digit (shows 0 for missing).
    pub fn is_required(&self) -> bool {
        matches!(self, DigitPlaceholder::Zero)
    }
}

/// A single item of a custom format section.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatItem {
    /// Text copied through verbatim (unescaped characters, quoted strings
    /// and escaped characters alike)
    Literal(String),
    /// Digit placeholder (0 or #)
    Digit(DigitPlaceholder),
    /// The first `.` of a section
    DecimalPoint,
    /// `,` - grouping between digit placeholders, scaling when trailing
    GroupSeparator,
    /// `%` - rendered as the culture percent symbol
    Percent,
    /// `‰` - rendered as the culture permille symbol
    Permille,
    /// Scientific notation marker (E+0, e-00, E0, ...)
    Scientific {
        /// True for uppercase E, false for lowercase e
        upper: bool,
        /// True to always show the exponent sign, false for minus only
        show_plus: bool,
        /// Minimum number of exponent digits
        min_digits: usize,
    },
}

impl FormatItem {
    /// Returns true for items that are part of the rendered number itself.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FormatItem::Digit(_) | FormatItem::DecimalPoint | FormatItem::GroupSeparator
        )
    }
}

/// A single section of a custom format string.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// The section's source text
    pub source: String,
    /// The items that make up this section
    pub items: Vec<FormatItem>,
    /// Pre-computed metadata to avoid repeated scanning
    pub metadata: FormatMetadata,
}

impl Section {
    /// Returns the index of the scientific marker, if any.
    pub fn scientific_index(&self) -> Option<usize> {
        self.items
            .iter()
            .position(|item| matches!(item, FormatItem::Scientific { .. }))
    }

    /// Returns true if a `,` sits between two integer digit placeholders.
    pub fn uses_grouping(&self) -> bool {
        let end = self
            .items
            .iter()
            .position(|item| {
                matches!(
                    item,
                    FormatItem::DecimalPoint | FormatItem::Scientific { .. }
                )
            })
            .unwrap_or(self.items.len());
        let integer = &self.items[..end];
        integer.iter().enumerate().any(|(i, item)| {
            matches!(item, FormatItem::GroupSeparator)
                && integer[..i]
                    .iter()
                    .any(|p| matches!(p, FormatItem::Digit(_)))
                && integer[i + 1..]
                    .iter()
                    .any(|p| matches!(p, FormatItem::Digit(_)))
        })
    }
}

/// The positive, negative and zero sub-strings of a format string.
///
/// If fewer than three sections exist, `zero` falls back to `positive`, and
/// `negative` falls back to `positive` unless a negative section is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatComponents {
    pub positive: String,
    pub negative: String,
    pub zero: String,
    pub has_negative: bool,
}

impl FormatComponents {
    /// Select the component for a value by its sign.
    pub fn select(&self, value: f64) -> &str {
        if value > 0.0 {
            &self.positive
        } else if value < 0.0 {
            &self.negative
        } else {
            &self.zero
        }
    }
}

/// Standard single-letter format codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardCode {
    /// `C` - currency
    Currency,
    /// `D` - zero-padded integer
    Decimal,
    /// `E` - fixed exponential digits
    Exponential,
    /// `F` - fixed point without grouping
    FixedPoint,
    /// `G` - general
    General,
    /// `N` - fixed point with grouping
    Number,
    /// `P` - percent
    Percent,
    /// `R` - round trip
    RoundTrip,
    /// `X` - hexadecimal
    Hexadecimal,
}

impl StandardCode {
    /// Map a format letter to its code, ignoring case.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'C' => Some(StandardCode::Currency),
            'D' => Some(StandardCode::Decimal),
            'E' => Some(StandardCode::Exponential),
            'F' => Some(StandardCode::FixedPoint),
            'G' => Some(StandardCode::General),
            'N' => Some(StandardCode::Number),
            'P' => Some(StandardCode::Percent),
            'R' => Some(StandardCode::RoundTrip),
            'X' => Some(StandardCode::Hexadecimal),
            _ => None,
        }
    }
}

/// A parsed standard format such as `N2` or `x8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardFormat {
    pub code: StandardCode,
    /// The letter as written; case selects `e`/`E` and hex digit case.
    pub letter: char,
    pub precision: Option<u32>,
}

impl StandardFormat {
    pub fn is_lowercase(&self) -> bool {
        self.letter.is_ascii_lowercase()
    }
}

/// A parsed custom format string.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomFormat {
    pub(crate) components: FormatComponents,
    pub(crate) positive: Section,
    pub(crate) negative: Section,
    pub(crate) zero: Section,
    pub(crate) section_count: usize,
    pub(crate) explicit_negative: bool,
}

impl CustomFormat {
    /// The raw positive/negative/zero sub-strings.
    pub fn components(&self) -> &FormatComponents {
        &self.components
    }

    /// Number of `;`-delimited sections actually used (1 to 3).
    pub fn section_count(&self) -> usize {
        self.section_count
    }

    /// True when negative values render through their own non-empty
    /// section, so no minus sign is added.
    pub fn has_explicit_negative(&self) -> bool {
        self.explicit_negative
    }

    /// True when a third section handles zero.
    pub fn has_zero_section(&self) -> bool {
        self.section_count >= 3
    }

    /// Select the section for a value by its sign.
    pub fn select_section(&self, value: f64) -> &Section {
        if value > 0.0 {
            &self.positive
        } else if value < 0.0 {
            if self.has_explicit_negative() {
                &self.negative
            } else {
                &self.positive
            }
        } else {
            &self.zero
        }
    }
}

/// A parsed number format.
///
/// This is the main type returned by parsing. It can be reused to format
/// multiple values efficiently.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberFormat {
    Standard(StandardFormat),
    Custom(CustomFormat),
}

impl NumberFormat {
    /// Parse a format string into a NumberFormat.
    ///
    /// Only an unknown standard code fails; custom formats always parse.
    pub fn parse(format_code: &str) -> Result<NumberFormat, crate::FormatError> {
        crate::parser::parse(format_code)
    }
}
