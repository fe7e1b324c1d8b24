//! Date/time tick sequences.
//!
//! Each unit measures the range as whole units from an epoch at the start of
//! the enclosing coarser period (the year of `min` for months, its day for
//! hours, ...), picks a step from that unit's curated list and maps the
//! integer ticks back onto the calendar.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use log::trace;

use super::numeric::NumericSequence;
use crate::calendar;
use crate::culture::Culture;

const YEAR_STEPS: &[i64] = &[1, 2, 5, 10, 20, 50, 100, 200, 500, 1000];
const MONTH_STEPS: &[i64] = &[1, 2, 3, 6, 12];
const WEEK_STEPS: &[i64] = &[1, 2, 4, 8];
const DAY_STEPS: &[i64] = &[1, 2, 3, 7, 14];
const HOUR_STEPS: &[i64] = &[1, 2, 3, 6, 12, 24];
const MINUTE_STEPS: &[i64] = &[1, 2, 5, 10, 15, 30, 60, 120, 180, 360, 720, 1440];
const SECOND_STEPS: &[i64] = &[1, 2, 5, 10, 15, 30, 60, 120, 300, 600, 900, 1800, 3600];
const MILLISECOND_STEPS: &[i64] = &[1, 2, 5, 10, 20, 50, 100, 200, 500, 1000];

const MILLIS_PER_SECOND: i64 = 1000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;

/// The calendar unit ticks are spaced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateTimeUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl DateTimeUnit {
    /// Interval sizes tried for this unit, smallest first.
    pub fn steps(self) -> &'static [i64] {
        match self {
            DateTimeUnit::Year => YEAR_STEPS,
            DateTimeUnit::Month => MONTH_STEPS,
            DateTimeUnit::Week => WEEK_STEPS,
            DateTimeUnit::Day => DAY_STEPS,
            DateTimeUnit::Hour => HOUR_STEPS,
            DateTimeUnit::Minute => MINUTE_STEPS,
            DateTimeUnit::Second => SECOND_STEPS,
            DateTimeUnit::Millisecond => MILLISECOND_STEPS,
        }
    }

    /// Length in milliseconds of the units that have a fixed length.
    fn fixed_millis(self) -> Option<i64> {
        match self {
            DateTimeUnit::Year | DateTimeUnit::Month => None,
            DateTimeUnit::Week => Some(MILLIS_PER_WEEK),
            DateTimeUnit::Day => Some(MILLIS_PER_DAY),
            DateTimeUnit::Hour => Some(MILLIS_PER_HOUR),
            DateTimeUnit::Minute => Some(MILLIS_PER_MINUTE),
            DateTimeUnit::Second => Some(MILLIS_PER_SECOND),
            DateTimeUnit::Millisecond => Some(1),
        }
    }
}

/// Evenly spaced date ticks covering a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeSequence {
    /// First tick.
    pub min: NaiveDateTime,
    /// Last tick.
    pub max: NaiveDateTime,
    pub unit: DateTimeUnit,
    /// Units between consecutive ticks.
    pub interval: i64,
    /// First tick minus the requested minimum, in units (never positive).
    pub interval_offset: i64,
    pub sequence: Vec<NaiveDateTime>,
}

impl DateTimeSequence {
    /// Ticks covering `[min, max]` with about `expected_count` intervals.
    ///
    /// The unit is inferred from the range unless given. Weeks start on
    /// Sunday. A reversed range is swapped.
    pub fn calculate(
        min: NaiveDateTime,
        max: NaiveDateTime,
        expected_count: usize,
        unit: Option<DateTimeUnit>,
    ) -> DateTimeSequence {
        Self::calculate_with_week_start(min, max, expected_count, unit, Weekday::Sun)
    }

    /// Like [`calculate`](Self::calculate), starting weeks on the culture's
    /// first day of the week.
    pub fn calculate_for_culture(
        min: NaiveDateTime,
        max: NaiveDateTime,
        expected_count: usize,
        unit: Option<DateTimeUnit>,
        culture: &Culture,
    ) -> DateTimeSequence {
        Self::calculate_with_week_start(min, max, expected_count, unit, culture.first_day_of_week)
    }

    fn calculate_with_week_start(
        min: NaiveDateTime,
        max: NaiveDateTime,
        expected_count: usize,
        unit: Option<DateTimeUnit>,
        first_day: Weekday,
    ) -> DateTimeSequence {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let unit = unit.unwrap_or_else(|| Self::get_interval_unit(min, max, expected_count as f64));

        let sequence = match unit {
            DateTimeUnit::Year => Self::calculate_years(min, max, expected_count),
            DateTimeUnit::Month => Self::calculate_months(min, max, expected_count),
            DateTimeUnit::Week => Self::calculate_weeks(min, max, expected_count, first_day),
            DateTimeUnit::Day => Self::calculate_days(min, max, expected_count),
            DateTimeUnit::Hour => Self::calculate_hours(min, max, expected_count),
            DateTimeUnit::Minute => Self::calculate_minutes(min, max, expected_count),
            DateTimeUnit::Second => Self::calculate_seconds(min, max, expected_count),
            DateTimeUnit::Millisecond => Self::calculate_milliseconds(min, max, expected_count),
        };
        trace!(
            "{} {:?} ticks every {} from {}",
            sequence.sequence.len(),
            sequence.unit,
            sequence.interval,
            sequence.min
        );
        sequence
    }

    /// Year ticks on January 1, aligned to absolute year numbers.
    pub fn calculate_years(
        min: NaiveDateTime,
        max: NaiveDateTime,
        expected_count: usize,
    ) -> DateTimeSequence {
        let min_year = i64::from(min.year());
        let max_year = i64::from(max.year()) + i64::from(max > start_of_year(max));
        let ticks =
            NumericSequence::calculate_units(min_year, max_year, expected_count, YEAR_STEPS);
        let epoch = start_of_year(min);
        from_numeric(DateTimeUnit::Year, ticks, |year| {
            calendar::add_years(epoch, year - min_year)
        })
    }

    /// Month ticks on the first of the month, counted from January of `min`.
    pub fn calculate_months(
        min: NaiveDateTime,
        max: NaiveDateTime,
        expected_count: usize,
    ) -> DateTimeSequence {
        let epoch = start_of_year(min);
        let min_offset = i64::from(min.month0());
        let max_offset = i64::from(max.year() - min.year()) * 12
            + i64::from(max.month0())
            + i64::from(max > start_of_month(max));
        let ticks =
            NumericSequence::calculate_units(min_offset, max_offset, expected_count, MONTH_STEPS);
        from_numeric(DateTimeUnit::Month, ticks, |months| calendar::add_months(epoch, months))
    }

    /// Week ticks at midnight on `first_day`, starting with the week of `min`.
    pub fn calculate_weeks(
        min: NaiveDateTime,
        max: NaiveDateTime,
        expected_count: usize,
        first_day: Weekday,
    ) -> DateTimeSequence {
        let into_week =
            (7 + min.weekday().num_days_from_sunday() - first_day.num_days_from_sunday()) % 7;
        let epoch = calendar::add_days(midnight(min), -i64::from(into_week));
        calculate_fixed(DateTimeUnit::Week, epoch, 0, max, expected_count)
    }

    /// Day ticks at midnight, starting with the day of `min`.
    pub fn calculate_days(
        min: NaiveDateTime,
        max: NaiveDateTime,
        expected_count: usize,
    ) -> DateTimeSequence {
        calculate_fixed(DateTimeUnit::Day, midnight(min), 0, max, expected_count)
    }

    /// Hour ticks counted from midnight of `min`'s day.
    pub fn calculate_hours(
        min: NaiveDateTime,
        max: NaiveDateTime,
        expected_count: usize,
    ) -> DateTimeSequence {
        let offset = i64::from(min.hour());
        calculate_fixed(DateTimeUnit::Hour, midnight(min), offset, max, expected_count)
    }

    /// Minute ticks counted from the start of `min`'s hour.
    pub fn calculate_minutes(
        min: NaiveDateTime,
        max: NaiveDateTime,
        expected_count: usize,
    ) -> DateTimeSequence {
        let epoch = truncate(min, min.hour(), 0, 0);
        let offset = i64::from(min.minute());
        calculate_fixed(DateTimeUnit::Minute, epoch, offset, max, expected_count)
    }

    /// Second ticks counted from the start of `min`'s minute.
    pub fn calculate_seconds(
        min: NaiveDateTime,
        max: NaiveDateTime,
        expected_count: usize,
    ) -> DateTimeSequence {
        let epoch = truncate(min, min.hour(), min.minute(), 0);
        let offset = i64::from(min.second());
        calculate_fixed(DateTimeUnit::Second, epoch, offset, max, expected_count)
    }

    /// Millisecond ticks counted from the start of `min`'s second.
    pub fn calculate_milliseconds(
        min: NaiveDateTime,
        max: NaiveDateTime,
        expected_count: usize,
    ) -> DateTimeSequence {
        let epoch = truncate(min, min.hour(), min.minute(), min.second());
        let offset = i64::from(min.nanosecond() / 1_000_000);
        calculate_fixed(DateTimeUnit::Millisecond, epoch, offset, max, expected_count)
    }

    /// The unit a range of this length reads best in with about
    /// `max_count` ticks.
    ///
    /// An empty range picks the finest field of `min` that is set.
    pub fn get_interval_unit(
        min: NaiveDateTime,
        max: NaiveDateTime,
        max_count: f64,
    ) -> DateTimeUnit {
        let count = max_count.floor().max(2.0);
        let millis = (max - min).num_milliseconds().abs() as f64;
        let seconds = millis / MILLIS_PER_SECOND as f64;
        let minutes = seconds / 60.0;
        let hours = minutes / 60.0;
        let days = hours / 24.0;

        if days > 356.0 && days >= 180.0 * count {
            DateTimeUnit::Year
        } else if days > 60.0 && days > 7.0 * count {
            DateTimeUnit::Month
        } else if days > 14.0 && days > 2.0 * count {
            DateTimeUnit::Week
        } else if days > 2.0 && hours > 12.0 * count {
            DateTimeUnit::Day
        } else if hours >= 24.0 && hours >= count {
            DateTimeUnit::Hour
        } else if minutes > 2.0 && minutes >= count {
            DateTimeUnit::Minute
        } else if seconds > 2.0 && seconds >= 0.8 * count {
            DateTimeUnit::Second
        } else if millis > 0.0 {
            DateTimeUnit::Millisecond
        } else if min.nanosecond() / 1_000_000 != 0 {
            DateTimeUnit::Millisecond
        } else if min.second() != 0 {
            DateTimeUnit::Second
        } else if min.minute() != 0 {
            DateTimeUnit::Minute
        } else if min.hour() != 0 {
            DateTimeUnit::Hour
        } else if min.day() != 1 {
            DateTimeUnit::Day
        } else if min.month() != 1 {
            DateTimeUnit::Month
        } else {
            DateTimeUnit::Year
        }
    }

    /// Add `interval` units to `date`, rounding `interval` to a whole number.
    pub fn add_interval(date: NaiveDateTime, interval: f64, unit: DateTimeUnit) -> NaiveDateTime {
        add_units(date, interval.round() as i64, unit)
    }

    /// Units of this sequence between `min` and `max`. Years and months
    /// count calendar fields; the other units divide the elapsed time.
    pub fn get_delta(&self, min: NaiveDateTime, max: NaiveDateTime) -> f64 {
        let years = i64::from(max.year() - min.year());
        match self.unit {
            DateTimeUnit::Year => years as f64,
            DateTimeUnit::Month => {
                (years * 12 + i64::from(max.month0()) - i64::from(min.month0())) as f64
            }
            unit => {
                let millis = (max - min).num_milliseconds() as f64;
                millis / unit.fixed_millis().unwrap_or(1) as f64
            }
        }
    }

    /// Grow the sequence one interval at a time at either end until it
    /// covers `[min, max]`. Existing ticks are kept.
    pub fn extend_to_cover(&mut self, min: NaiveDateTime, max: NaiveDateTime) {
        let interval = self.interval as f64;
        while self.min > min {
            let previous = Self::add_interval(self.min, -interval, self.unit);
            if previous >= self.min {
                break;
            }
            self.sequence.insert(0, previous);
            self.min = previous;
        }
        while self.max < max {
            let next = Self::add_interval(self.max, interval, self.unit);
            if next <= self.max {
                break;
            }
            self.sequence.push(next);
            self.max = next;
        }
    }

    /// Re-anchor the sequence on the interval boundary at or before `min`
    /// and rebuild it forward until `max` is covered. Existing ticks are
    /// discarded.
    pub fn move_to_cover(&mut self, min: NaiveDateTime, max: NaiveDateTime) {
        let interval = self.interval.max(1) as f64;
        let unit = self.unit;
        let count = (self.get_delta(self.min, min) / interval).floor();
        let mut start = Self::add_interval(self.min, count * interval, unit);

        while start > min {
            let previous = Self::add_interval(start, -interval, unit);
            if previous >= start {
                break;
            }
            start = previous;
        }
        loop {
            let next = Self::add_interval(start, interval, unit);
            if next > min || next <= start {
                break;
            }
            start = next;
        }

        let mut sequence = vec![start];
        let mut tick = start;
        while tick < max {
            let next = Self::add_interval(tick, interval, unit);
            if next <= tick {
                break;
            }
            tick = next;
            sequence.push(tick);
        }

        self.min = start;
        self.max = tick;
        self.sequence = sequence;
    }
}

fn add_units(date: NaiveDateTime, amount: i64, unit: DateTimeUnit) -> NaiveDateTime {
    match unit {
        DateTimeUnit::Year => calendar::add_years(date, amount),
        DateTimeUnit::Month => calendar::add_months(date, amount),
        DateTimeUnit::Week => calendar::add_weeks(date, amount),
        DateTimeUnit::Day => calendar::add_days(date, amount),
        DateTimeUnit::Hour => calendar::add_hours(date, amount),
        DateTimeUnit::Minute => calendar::add_minutes(date, amount),
        DateTimeUnit::Second => calendar::add_seconds(date, amount),
        DateTimeUnit::Millisecond => calendar::add_milliseconds(date, amount),
    }
}

/// Ticks of a fixed-length unit counted from `epoch`.
fn calculate_fixed(
    unit: DateTimeUnit,
    epoch: NaiveDateTime,
    min_offset: i64,
    max: NaiveDateTime,
    expected_count: usize,
) -> DateTimeSequence {
    let unit_millis = unit.fixed_millis().unwrap_or(1);
    let elapsed = (max - epoch).num_milliseconds();
    let max_offset =
        elapsed.div_euclid(unit_millis) + i64::from(elapsed.rem_euclid(unit_millis) != 0);
    let ticks =
        NumericSequence::calculate_units(min_offset, max_offset, expected_count, unit.steps());
    from_numeric(unit, ticks, |offset| add_units(epoch, offset, unit))
}

fn from_numeric(
    unit: DateTimeUnit,
    ticks: NumericSequence,
    to_date: impl Fn(i64) -> NaiveDateTime,
) -> DateTimeSequence {
    let mut sequence: Vec<NaiveDateTime> =
        ticks.sequence.iter().map(|&tick| to_date(tick)).collect();
    // Ticks saturated at the ends of the calendar collapse.
    sequence.dedup();

    let first = to_date(ticks.min);
    DateTimeSequence {
        min: sequence.first().copied().unwrap_or(first),
        max: sequence.last().copied().unwrap_or(first),
        unit,
        interval: ticks.interval,
        interval_offset: ticks.interval_offset,
        sequence,
    }
}

fn midnight(date: NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN)
}

fn truncate(date: NaiveDateTime, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    date.date().and_hms_opt(hour, minute, second).unwrap_or(date)
}

fn start_of_month(date: NaiveDateTime) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .map_or(date, |day| day.and_time(NaiveTime::MIN))
}

fn start_of_year(date: NaiveDateTime) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).map_or(date, |day| day.and_time(NaiveTime::MIN))
}
