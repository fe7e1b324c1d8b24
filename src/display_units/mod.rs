//! Display unit systems.
//!
//! A display unit system picks a magnitude abbreviation (K, M, bn, T) for an
//! axis or a single value and renders values scaled into it. Values far
//! outside the readable range fall back to scientific notation instead.

mod unit;

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;

pub use unit::{DefaultUnitNames, DisplayUnit, UnitNames, UnitNaming};

use crate::ast::StandardCode;
use crate::cache;
use crate::double::round_to_significant;
use crate::error::FormatError;
use crate::metadata::{FormatMetadata, MetadataCache, MetadataRequest};
use crate::options::FormatOptions;
use crate::parser::{add_decimals_to_format, is_standard_format, numeric_format, widen_fraction};
use unit::{add_unit_if_non_empty, create_display_units, AdjustMin, AUTO_EXPONENT, NONE_EXPONENT};

/// Magnitudes at or above this render in scientific notation.
const SCIENTIFIC_UPPER_THRESHOLD: f64 = 1e15;
/// Non-zero magnitudes below this render in scientific notation.
const SCIENTIFIC_LOWER_THRESHOLD: f64 = 1e-4;
/// Significant digits a single value keeps when it picks its own unit.
const SINGLE_VALUE_DIGITS: i32 = 8;

/// The available unit table presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayUnitSystemKind {
    /// K, M, bn, T, switching to the next unit a decade early.
    Default,
    /// K, M, bn, T, never showing a fraction of a unit (no `0.9M`).
    WholeUnits,
    /// No units; values are never scaled.
    Verbose,
    /// "Auto" and "None" entries followed by the whole units.
    DataLabels,
}

impl DisplayUnitSystemKind {
    fn build_units(self, naming: &dyn UnitNaming) -> Vec<DisplayUnit> {
        match self {
            DisplayUnitSystemKind::Default => {
                create_display_units(Vec::new(), naming, AdjustMin::EarlySwitch)
            }
            DisplayUnitSystemKind::WholeUnits => {
                create_display_units(Vec::new(), naming, AdjustMin::Never)
            }
            DisplayUnitSystemKind::Verbose => Vec::new(),
            DisplayUnitSystemKind::DataLabels => {
                let adjust = AdjustMin::SentinelGuarded;
                let mut units = Vec::new();
                for (exponent, value) in [(AUTO_EXPONENT, 0.0), (NONE_EXPONENT, 1.0)] {
                    if let Some(names) = naming.names(exponent) {
                        add_unit_if_non_empty(&mut units, value, names, adjust);
                    }
                }
                create_display_units(units, naming, adjust)
            }
        }
    }
}

/// Lazily built unit tables, one per system kind, sharing a naming lookup.
///
/// Tables are never rebuilt on their own. Call [`UnitTableCache::reset`]
/// after the naming lookup starts answering differently.
pub struct UnitTableCache {
    naming: Box<dyn UnitNaming>,
    tables: Mutex<HashMap<DisplayUnitSystemKind, Arc<[DisplayUnit]>>>,
}

impl fmt::Debug for UnitTableCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitTableCache").finish_non_exhaustive()
    }
}

impl Default for UnitTableCache {
    fn default() -> Self {
        Self::new(DefaultUnitNames)
    }
}

impl UnitTableCache {
    pub fn new(naming: impl UnitNaming + 'static) -> Self {
        Self {
            naming: Box::new(naming),
            tables: Mutex::new(HashMap::new()),
        }
    }

    /// The unit table of `kind`, building it on first use.
    pub fn units(&self, kind: DisplayUnitSystemKind) -> Arc<[DisplayUnit]> {
        let mut tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        tables
            .entry(kind)
            .or_insert_with(|| {
                let units = kind.build_units(self.naming.as_ref());
                debug!("built {kind:?} display unit table with {} units", units.len());
                units.into()
            })
            .clone()
    }

    /// Drop every built table.
    pub fn reset(&self) {
        debug!("resetting display unit tables");
        self.tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Selects a display unit for a magnitude and formats values in it.
#[derive(Debug)]
pub struct DisplayUnitSystem {
    kind: DisplayUnitSystemKind,
    units: Arc<[DisplayUnit]>,
    display_unit: Option<usize>,
    unit_base_value: Option<f64>,
    metadata: MetadataCache,
}

impl DisplayUnitSystem {
    /// A system of `kind` using the table held by `tables`.
    pub fn new(kind: DisplayUnitSystemKind, tables: &UnitTableCache) -> Self {
        Self {
            kind,
            units: tables.units(kind),
            display_unit: None,
            unit_base_value: None,
            metadata: MetadataCache::new(),
        }
    }

    pub fn kind(&self) -> DisplayUnitSystemKind {
        self.kind
    }

    /// The unit table, ascending by value.
    pub fn units(&self) -> &[DisplayUnit] {
        &self.units
    }

    /// The unit picked by the last [`update`](Self::update), if any.
    pub fn display_unit(&self) -> Option<&DisplayUnit> {
        self.display_unit.and_then(|index| self.units.get(index))
    }

    /// The value the current unit was picked for.
    pub fn unit_base_value(&self) -> Option<f64> {
        self.unit_base_value
    }

    /// Title of the current unit, or an empty string.
    pub fn title(&self) -> &str {
        self.display_unit().map_or("", |unit| unit.title.as_str())
    }

    /// True if the current unit scales values.
    pub fn is_scaling_unit(&self) -> bool {
        self.display_unit().is_some_and(DisplayUnit::is_scaling)
    }

    /// Pick the first unit whose range contains `|value|`.
    pub fn update(&mut self, value: f64) -> &mut Self {
        self.unit_base_value = Some(value);
        self.display_unit = self.units.iter().position(|unit| unit.is_applicable_to(value));
        self
    }

    /// Format `value` in the current unit.
    ///
    /// `decimals` forces that many fraction digits (as `0`s when
    /// `trailing_zeros`, `#`s otherwise). Without it, a scaled custom format
    /// gains enough optional digits to keep the precision of the unscaled
    /// value.
    pub fn format(
        &self,
        value: f64,
        format: &str,
        decimals: Option<i32>,
        trailing_zeros: bool,
        opts: &FormatOptions,
    ) -> Result<String, FormatError> {
        let format = self.scientific_format(
            value,
            opts.effective_format(format),
            decimals,
            trailing_zeros,
        );

        let scaling = self
            .display_unit()
            .filter(|unit| unit.is_scaling())
            .filter(|_| self.is_format_supported(&format) && !self.has_scientific_format(&format));

        match scaling {
            Some(unit) => {
                let format = match decimals {
                    Some(_) => format,
                    None => Cow::Owned(widen_fraction(&format, unit.exponent() as usize)),
                };
                let label = Some(unit.label_format.as_str()).filter(|l| !l.is_empty());
                format_helper(unit.project(value), &format, label, decimals, trailing_zeros, opts)
            }
            None => format_helper(value, &format, None, decimals, trailing_zeros, opts),
        }
    }

    /// Pick the unit for `value` itself rather than a shared axis magnitude,
    /// then format it.
    pub fn format_single_value(
        &mut self,
        value: f64,
        format: &str,
        decimals: Option<i32>,
        trailing_zeros: bool,
        opts: &FormatOptions,
    ) -> Result<String, FormatError> {
        self.update(round_to_significant(value, SINGLE_VALUE_DIGITS));
        self.format(value, format, decimals, trailing_zeros, opts)
    }

    /// True if this system can scale values rendered with `format`.
    ///
    /// Percentages and exponential codes never scale; data labels only
    /// reject exponential codes.
    pub fn is_format_supported(&self, format: &str) -> bool {
        let code = standard_code(format);
        match self.kind {
            DisplayUnitSystemKind::DataLabels => code != Some(StandardCode::Exponential),
            _ => match code {
                Some(StandardCode::Percent | StandardCode::Exponential) => false,
                Some(_) => true,
                None => !self.flags(format).has_percent,
            },
        }
    }

    fn has_scientific_format(&self, format: &str) -> bool {
        match standard_code(format) {
            Some(code) => code == StandardCode::Exponential,
            None => !is_standard_format(format) && self.flags(format).has_e,
        }
    }

    fn flags(&self, format: &str) -> FormatMetadata {
        self.metadata.get_or_compute(format, MetadataRequest::FLAGS)
    }

    /// True if `value` should render in scientific notation under `format`.
    pub fn should_fallback_to_scientific(&self, value: f64, format: &str) -> bool {
        self.kind != DisplayUnitSystemKind::Verbose
            && self.is_format_supported(format)
            && !self.has_scientific_format(format)
            && is_scientific(value)
    }

    /// The format to render `value` with: `format` itself, or its digit
    /// skeleton with an `E+0` exponent when the value needs scientific
    /// notation.
    pub fn scientific_format<'a>(
        &self,
        value: f64,
        format: &'a str,
        decimals: Option<i32>,
        trailing_zeros: bool,
    ) -> Cow<'a, str> {
        if !self.should_fallback_to_scientific(value, format) {
            return Cow::Borrowed(format);
        }

        let skeleton = numeric_format(value, format).map(|s| s.replace(',', ""));
        let decimals = decimals.map(i32::abs);
        let mantissa = match (skeleton, decimals) {
            (Some(skeleton), Some(_)) => {
                add_decimals_to_format(&skeleton, decimals, trailing_zeros)
            }
            (Some(skeleton), None) => skeleton,
            (None, Some(_)) => add_decimals_to_format("0", decimals, trailing_zeros),
            (None, None) => "0.##".to_string(),
        };
        debug!("falling back to scientific notation for {value} with {format:?}");
        Cow::Owned(format!("{mantissa}E+0"))
    }
}

fn standard_code(format: &str) -> Option<StandardCode> {
    if is_standard_format(format) {
        format.chars().next().and_then(StandardCode::from_letter)
    } else {
        None
    }
}

fn is_scientific(value: f64) -> bool {
    let magnitude = value.abs();
    magnitude >= SCIENTIFIC_UPPER_THRESHOLD
        || (value != 0.0 && magnitude < SCIENTIFIC_LOWER_THRESHOLD)
}

/// Apply decimals and render, wrapping the number in `label` when given.
fn format_helper(
    value: f64,
    format: &str,
    label: Option<&str>,
    decimals: Option<i32>,
    trailing_zeros: bool,
    opts: &FormatOptions,
) -> Result<String, FormatError> {
    let format = if decimals.is_some() && (format == "G" || format == "g") {
        "#,0.00"
    } else {
        format
    };
    let format = add_decimals_to_format(format, decimals, trailing_zeros);
    let parsed = cache::get_or_parse(&format)?;
    Ok(parsed.format_with_override(value, label, opts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system(kind: DisplayUnitSystemKind) -> DisplayUnitSystem {
        DisplayUnitSystem::new(kind, &UnitTableCache::default())
    }

    #[test]
    fn test_update_picks_unit() {
        let mut units = system(DisplayUnitSystemKind::Default);
        units.update(1e6);
        assert_eq!(units.title(), "Millions");
        units.update(500.0);
        assert!(units.display_unit().is_none());
        assert_eq!(units.title(), "");
    }

    #[test]
    fn test_format_scaled_value() {
        let mut units = system(DisplayUnitSystemKind::Default);
        let opts = FormatOptions::default();
        let text = units.update(1e6).format(4.56e7, "0", None, false, &opts).unwrap();
        assert_eq!(text, "45.6M");
    }

    #[test]
    fn test_percent_is_not_scaled() {
        let mut units = system(DisplayUnitSystemKind::Default);
        let opts = FormatOptions::default();
        let text = units.update(1e6).format(2e6, "0%", None, false, &opts).unwrap();
        assert_eq!(text, "200000000%");
    }

    #[test]
    fn test_verbose_never_scales() {
        let mut units = system(DisplayUnitSystemKind::Verbose);
        let opts = FormatOptions::default();
        assert!(units.units().is_empty());
        let text = units.update(1e6).format(2e6, "#,0", None, false, &opts).unwrap();
        assert_eq!(text, "2,000,000");
    }

    #[test]
    fn test_scientific_fallback() {
        let units = system(DisplayUnitSystemKind::Default);
        assert_eq!(units.scientific_format(1e16, "#,0.00", None, false), "#0.00E+0");
        assert_eq!(units.scientific_format(0.00001, "G", Some(2), true), "0.00E+0");
        assert_eq!(units.scientific_format(123.0, "#,0", None, false), "#,0");
        assert_eq!(units.scientific_format(1e16, "0.0E+00", None, false), "0.0E+00");
    }
}
