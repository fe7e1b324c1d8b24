//! Rendering of parsed formats

pub(crate) mod decimal;
mod number;
mod standard;

use crate::ast::NumberFormat;
use crate::options::FormatOptions;

impl NumberFormat {
    /// Format a numeric value using this format.
    ///
    /// Formatting is infallible once a format has parsed. NaN and the
    /// infinities render as the culture's symbols regardless of the format.
    pub fn format(&self, value: f64, opts: &FormatOptions) -> String {
        self.format_with_override(value, None, opts)
    }

    /// Format a value, substituting the rendered number for `{0}` in
    /// `override_format`.
    ///
    /// For custom formats only the numeric region is substituted, so literals
    /// before the first and after the last placeholder stay where they are,
    /// and exponent markers are ignored. Standard formats substitute their
    /// whole output.
    pub fn format_with_override(
        &self,
        value: f64,
        override_format: Option<&str>,
        opts: &FormatOptions,
    ) -> String {
        let culture = &opts.culture;
        if let Some(symbol) = culture.non_finite_symbol(value) {
            return symbol.to_string();
        }

        match self {
            NumberFormat::Standard(fmt) => {
                let text = standard::format_standard(fmt, value, culture);
                match override_format {
                    Some(template) => template.replace("{0}", &text),
                    None => text,
                }
            }
            NumberFormat::Custom(fmt) => {
                number::format_custom(fmt, value, culture, override_format)
            }
        }
    }
}
