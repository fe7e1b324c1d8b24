//! Evenly spaced integer sequences over curated step sizes.

/// An ascending run of integer ticks spaced `interval` apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericSequence {
    /// First tick, at or below the requested minimum.
    pub min: i64,
    /// Last tick, at or above the requested maximum.
    pub max: i64,
    pub interval: i64,
    /// First tick minus the requested minimum (never positive).
    pub interval_offset: i64,
    pub sequence: Vec<i64>,
}

impl NumericSequence {
    /// Cover `[min, max]` with at most `max_count` intervals, using the first
    /// of `steps` that fits.
    ///
    /// When no curated step fits, larger steps continue in a 1-2-5 progression.
    /// An empty range is widened to one unit.
    pub fn calculate_units(min: i64, max: i64, max_count: usize, steps: &[i64]) -> NumericSequence {
        let (min, mut max) = if min <= max { (min, max) } else { (max, min) };
        if min == max {
            max = min.saturating_add(1);
        }
        let max_count = max_count.max(1) as i64;

        let step = candidate_steps(steps)
            .find(|&step| interval_count(min, max, step) <= max_count)
            .unwrap_or(i64::MAX);

        let start = floor_div(min, step).saturating_mul(step);
        let mut sequence = vec![start];
        let mut tick = start;
        while tick < max {
            match tick.checked_add(step) {
                Some(next) => {
                    tick = next;
                    sequence.push(tick);
                }
                None => break,
            }
        }

        NumericSequence {
            min: start,
            max: tick,
            interval: step,
            interval_offset: start - min,
            sequence,
        }
    }
}

/// The curated steps in order, then `1, 2, 5 × 10^k` beyond the largest.
fn candidate_steps(steps: &[i64]) -> impl Iterator<Item = i64> + '_ {
    let largest = steps.iter().copied().filter(|&s| s > 0).max().unwrap_or(0);
    let progression = (0..19u32)
        .flat_map(|power| [1i64, 2, 5].map(move |m| m.checked_mul(10i64.pow(power))))
        .map_while(|step| step)
        .filter(move |&step| step > largest);
    steps.iter().copied().filter(|&s| s > 0).chain(progression)
}

fn interval_count(min: i64, max: i64, step: i64) -> i64 {
    ceil_div(max, step) - floor_div(min, step)
}

fn floor_div(value: i64, step: i64) -> i64 {
    value.div_euclid(step)
}

fn ceil_div(value: i64, step: i64) -> i64 {
    let quotient = value.div_euclid(step);
    if value.rem_euclid(step) == 0 {
        quotient
    } else {
        quotient + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_fitting_step() {
        let seq = NumericSequence::calculate_units(0, 12, 5, &[1, 2, 3, 6, 12]);
        assert_eq!(seq.interval, 3);
        assert_eq!(seq.sequence, vec![0, 3, 6, 9, 12]);
        assert_eq!(seq.interval_offset, 0);
    }

    #[test]
    fn test_start_floors_to_step() {
        let seq = NumericSequence::calculate_units(7, 20, 3, &[1, 2, 5, 10]);
        assert_eq!(seq.interval, 5);
        assert_eq!(seq.sequence, vec![5, 10, 15, 20]);
        assert_eq!(seq.interval_offset, -2);
    }

    #[test]
    fn test_progression_beyond_curated_steps() {
        let seq = NumericSequence::calculate_units(0, 1000, 4, &[1, 2, 3]);
        assert_eq!(seq.interval, 500);
        assert_eq!(seq.sequence, vec![0, 500, 1000]);
    }

    #[test]
    fn test_empty_range_widens() {
        let seq = NumericSequence::calculate_units(5, 5, 10, &[1, 2]);
        assert_eq!(seq.sequence, vec![5, 6]);
    }

    #[test]
    fn test_negative_range() {
        let seq = NumericSequence::calculate_units(-7, 3, 2, &[1, 2, 5, 10]);
        assert_eq!(seq.interval, 10);
        assert_eq!(seq.sequence, vec![-10, 0, 10]);
    }
}
