//! Formatting options and configuration.

use crate::culture::Culture;

/// Verbose model formats that `beautify` rewrites into compact equivalents.
const BEAUTIFIED_FORMATS: [(&str, &str); 2] = [
    ("0.00 %;-0.00 %;0.00 %", "0.##%"),
    ("0.0 %;-0.0 %;0.0 %", "0.#%"),
];

/// Options for formatting values.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatOptions {
    /// The culture used for separators, symbols and patterns.
    pub culture: Culture,
    /// Rewrite verbose percentage formats into compact ones (`100%` rather
    /// than `100.00 %`).
    pub beautify: bool,
}

impl FormatOptions {
    /// Options for the given culture, without beautification.
    pub fn with_culture(culture: Culture) -> Self {
        Self {
            culture,
            beautify: false,
        }
    }

    /// Returns the format code that should actually be rendered.
    pub fn effective_format<'a>(&self, format: &'a str) -> &'a str {
        if !self.beautify {
            return format;
        }
        BEAUTIFIED_FORMATS
            .iter()
            .find(|(verbose, _)| *verbose == format)
            .map(|(_, compact)| *compact)
            .unwrap_or(format)
    }
}
