//! axisfmt - .NET-style number formats, display units and axis ticks
//!
//! This crate renders numbers with .NET custom and standard format strings,
//! abbreviates magnitudes with display units (`45.6M`) and generates evenly
//! spaced numeric and date/time ticks for chart axes.

pub mod ast;
pub mod calendar;
pub mod culture;
pub mod display_units;
pub mod double;
pub mod error;
pub mod metadata;
pub mod options;
pub mod parser;
pub mod sequence;

mod cache;
mod formatter;

pub use ast::{CustomFormat, FormatComponents, NumberFormat, Section, StandardCode, StandardFormat};
pub use culture::Culture;
pub use display_units::{
    DefaultUnitNames, DisplayUnit, DisplayUnitSystem, DisplayUnitSystemKind, UnitNames,
    UnitNaming, UnitTableCache,
};
pub use error::FormatError;
pub use metadata::{custom_format_metadata, FormatMetadata, MetadataCache, MetadataRequest};
pub use options::FormatOptions;
pub use parser::is_standard_format;
pub use sequence::{DateTimeSequence, DateTimeUnit, NumericSequence};

/// Format a value with a format string.
///
/// Parsed formats are cached, so repeated calls with the same format string
/// only parse once.
pub fn format(value: f64, format_code: &str, opts: &FormatOptions) -> Result<String, FormatError> {
    let fmt = cache::get_or_parse(opts.effective_format(format_code))?;
    Ok(fmt.format(value, opts))
}

/// Format a value with the default (en-US) options.
pub fn format_default(value: f64, format_code: &str) -> Result<String, FormatError> {
    format(value, format_code, &FormatOptions::default())
}

/// Format a value, substituting its numeric part for `{0}` in
/// `override_format` (e.g. `"{0}K"`).
pub fn format_with_override(
    value: f64,
    format_code: &str,
    override_format: Option<&str>,
    opts: &FormatOptions,
) -> Result<String, FormatError> {
    let fmt = cache::get_or_parse(opts.effective_format(format_code))?;
    Ok(fmt.format_with_override(value, override_format, opts))
}
