//! Culture data consumed by the renderers.
//!
//! The crate does not negotiate locales; a `Culture` is supplied by the caller
//! (or one of the built-in tables is used) and only read.

mod builtin;

use chrono::Weekday;

/// Locale-specific separators, symbols and patterns.
///
/// Patterns use `n` for the number, `$` for the currency symbol, `%` for the
/// percent symbol and `-` for the negative sign.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Culture {
    pub name: String,
    pub decimal_separator: char,
    pub group_separator: char,
    /// Digit group sizes from the decimal point outwards. The last size
    /// repeats; a size of `0` stops grouping.
    pub group_sizes: Vec<usize>,
    pub negative_sign: String,
    pub percent_symbol: String,
    pub permille_symbol: String,
    pub currency_symbol: String,
    pub currency_positive_pattern: String,
    pub currency_negative_pattern: String,
    pub percent_positive_pattern: String,
    pub percent_negative_pattern: String,
    pub number_negative_pattern: String,
    pub nan_symbol: String,
    pub positive_infinity_symbol: String,
    pub negative_infinity_symbol: String,
    pub first_day_of_week: Weekday,
    /// Day names, Sunday first.
    pub day_names: Vec<String>,
    pub abbreviated_day_names: Vec<String>,
    /// Month names, January first.
    pub month_names: Vec<String>,
    pub abbreviated_month_names: Vec<String>,
}

impl Culture {
    /// Look up a built-in culture by name (case-insensitive).
    pub fn builtin(name: &str) -> Option<Culture> {
        match name.to_ascii_lowercase().as_str() {
            "en-us" | "en" => Some(Culture::en_us()),
            "de-de" | "de" => Some(Culture::de_de()),
            "fr-fr" | "fr" => Some(Culture::fr_fr()),
            "en-in" => Some(Culture::en_in()),
            _ => None,
        }
    }

    pub fn day_name(&self, day: Weekday) -> Option<&str> {
        name_at(&self.day_names, day.num_days_from_sunday())
    }

    pub fn abbreviated_day_name(&self, day: Weekday) -> Option<&str> {
        name_at(&self.abbreviated_day_names, day.num_days_from_sunday())
    }

    /// Name of a month numbered from 1.
    pub fn month_name(&self, month: u32) -> Option<&str> {
        name_at(&self.month_names, month.checked_sub(1)?)
    }

    pub fn abbreviated_month_name(&self, month: u32) -> Option<&str> {
        name_at(&self.abbreviated_month_names, month.checked_sub(1)?)
    }

    /// The symbol shown for NaN or an infinity; `None` for finite values.
    pub(crate) fn non_finite_symbol(&self, value: f64) -> Option<&str> {
        if value.is_nan() {
            Some(&self.nan_symbol)
        } else if value == f64::INFINITY {
            Some(&self.positive_infinity_symbol)
        } else if value == f64::NEG_INFINITY {
            Some(&self.negative_infinity_symbol)
        } else {
            None
        }
    }

    /// Insert group separators into a run of integer digits.
    pub(crate) fn group_digits(&self, digits: &str) -> String {
        let chars: Vec<char> = digits.chars().collect();
        let mut out = Vec::with_capacity(chars.len() + chars.len() / 3);
        let mut boundaries = GroupBoundaries::new(&self.group_sizes);
        for (count, ch) in chars.iter().rev().enumerate() {
            if boundaries.is_boundary(count) {
                out.push(self.group_separator);
            }
            out.push(*ch);
        }
        out.iter().rev().collect()
    }
}

fn name_at(names: &[String], index: u32) -> Option<&str> {
    names.get(index as usize).map(String::as_str)
}

/// Walks the culture's group sizes, answering whether a separator belongs
/// before the digit at a given distance from the decimal point.
#[derive(Debug)]
pub(crate) struct GroupBoundaries<'a> {
    sizes: &'a [usize],
    index: usize,
    next: Option<usize>,
}

impl<'a> GroupBoundaries<'a> {
    pub(crate) fn new(sizes: &'a [usize]) -> Self {
        let next = sizes.first().copied().filter(|&s| s > 0);
        Self {
            sizes,
            index: 0,
            next,
        }
    }

    /// `count` is the number of integer digits already emitted to the right.
    /// Must be called with increasing `count`.
    pub(crate) fn is_boundary(&mut self, count: usize) -> bool {
        match self.next {
            Some(boundary) if count == boundary => {
                if self.index + 1 < self.sizes.len() {
                    self.index += 1;
                }
                let size = self.sizes[self.index];
                self.next = if size > 0 { Some(boundary + size) } else { None };
                true
            }
            _ => false,
        }
    }
}
