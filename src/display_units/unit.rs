//! Display units and unit table construction.

use crate::double::{
    get_precision, greater_or_equal_with_precision, less_with_precision, log10_floor, pow10,
    remove_decimal_noise, DEFAULT_PRECISION,
};

/// Smallest and largest exponents offered to the naming lookup.
const MIN_UNIT_EXPONENT: i32 = 3;
const MAX_UNIT_EXPONENT: i32 = 23;

/// Exponents the naming lookup uses for the synthetic data-label units.
pub(crate) const AUTO_EXPONENT: i32 = -1;
pub(crate) const NONE_EXPONENT: i32 = 0;

/// Title and label template for one magnitude, e.g. `("Millions", "{0}M")`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitNames {
    pub title: String,
    pub label_format: String,
}

impl UnitNames {
    pub fn new(title: impl Into<String>, label_format: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            label_format: label_format.into(),
        }
    }
}

/// Looks up the names of the unit for a power-of-ten exponent.
///
/// Exponents 3 to 23 name the scaling units. `-1` and `0` name the "Auto"
/// and "None" entries of data-label tables.
pub trait UnitNaming: Send + Sync {
    fn names(&self, exponent: i32) -> Option<UnitNames>;
}

impl<F> UnitNaming for F
where
    F: Fn(i32) -> Option<UnitNames> + Send + Sync,
{
    fn names(&self, exponent: i32) -> Option<UnitNames> {
        self(exponent)
    }
}

/// English unit names: K, M, bn and T.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultUnitNames;

impl UnitNaming for DefaultUnitNames {
    fn names(&self, exponent: i32) -> Option<UnitNames> {
        let (title, label_format) = match exponent {
            AUTO_EXPONENT => ("Auto", ""),
            NONE_EXPONENT => ("None", ""),
            3 => ("Thousands", "{0}K"),
            6 => ("Millions", "{0}M"),
            9 => ("Billions", "{0}bn"),
            12 => ("Trillions", "{0}T"),
            _ => return None,
        };
        Some(UnitNames::new(title, label_format))
    }
}

/// A magnitude abbreviation and the absolute values it applies to.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayUnit {
    /// The divisor, `10^exponent` (0 and 1 for the data-label entries).
    pub value: f64,
    pub title: String,
    pub label_format: String,
    pub applicable_range_min: f64,
    pub applicable_range_max: f64,
}

impl DisplayUnit {
    /// Scale a value into this unit.
    pub fn project(&self, value: f64) -> f64 {
        if self.value == 0.0 {
            value
        } else {
            remove_decimal_noise(value / self.value)
        }
    }

    /// True if `|value|` lies in `[min, max)`, tolerating noise at about
    /// three significant digits.
    pub fn is_applicable_to(&self, value: f64) -> bool {
        let value = value.abs();
        let precision = get_precision(value, 3).unwrap_or(DEFAULT_PRECISION);
        greater_or_equal_with_precision(value, self.applicable_range_min, precision)
            && less_with_precision(value, self.applicable_range_max, precision)
    }

    /// True if projecting actually changes the value.
    pub fn is_scaling(&self) -> bool {
        self.value > 1.0
    }

    /// Power of ten of the divisor (0 for non-scaling units).
    pub fn exponent(&self) -> i32 {
        if self.is_scaling() {
            log10_floor(self.value)
        } else {
            0
        }
    }
}

/// How a unit's minimum reacts to the unit before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AdjustMin {
    /// Ranges start at the unit's own value.
    Never,
    /// A unit more than 1000 above the previous one switches on a decade early
    /// (`100,000` shows as `0.1M`).
    EarlySwitch,
    /// The early switch behind a `value == -1` guard. Unit values are
    /// powers of ten, 0 or 1, so the guard never holds and ranges start at
    /// the unit's own value.
    SentinelGuarded,
}

impl AdjustMin {
    fn apply(self, value: f64, previous_value: f64, min: f64) -> f64 {
        let early = |value: f64| {
            if value - previous_value >= 1000.0 {
                value / 10.0
            } else {
                min
            }
        };
        match self {
            AdjustMin::Never => min,
            AdjustMin::EarlySwitch => early(value),
            AdjustMin::SentinelGuarded if value == -1.0 => early(value),
            AdjustMin::SentinelGuarded => min,
        }
    }
}

/// Append a unit unless both its names are empty. The previous unit's range
/// is closed at the new unit's (possibly adjusted) minimum.
pub(crate) fn add_unit_if_non_empty(
    units: &mut Vec<DisplayUnit>,
    value: f64,
    names: UnitNames,
    adjust: AdjustMin,
) {
    if names.title.is_empty() && names.label_format.is_empty() {
        return;
    }

    let mut min = value;
    if let Some(previous) = units.last_mut() {
        min = adjust.apply(value, previous.value, min);
        previous.applicable_range_max = min;
    }

    units.push(DisplayUnit {
        value,
        title: names.title,
        label_format: names.label_format,
        applicable_range_min: min,
        applicable_range_max: min * 1000.0,
    });
}

/// Units for exponents 3 to 23 that `naming` has names for, appended to
/// `units`. The last unit's range is open-ended.
pub(crate) fn create_display_units(
    mut units: Vec<DisplayUnit>,
    naming: &dyn UnitNaming,
    adjust: AdjustMin,
) -> Vec<DisplayUnit> {
    for exponent in MIN_UNIT_EXPONENT..=MAX_UNIT_EXPONENT {
        if let Some(names) = naming.names(exponent) {
            add_unit_if_non_empty(&mut units, pow10(exponent), names, adjust);
        }
    }
    if let Some(last) = units.last_mut() {
        last.applicable_range_max = f64::INFINITY;
    }
    units
}
