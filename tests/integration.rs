//! End-to-end axis labeling: pick ticks, pick a display unit from the
//! largest tick, then label every tick.

use axisfmt::{
    format, Culture, DateTimeSequence, DisplayUnitSystem, DisplayUnitSystemKind, FormatOptions,
    NumericSequence, UnitTableCache,
};
use chrono::{Datelike, NaiveDate};

fn label_axis(
    ticks: &[f64],
    kind: DisplayUnitSystemKind,
    format: &str,
    opts: &FormatOptions,
) -> Vec<String> {
    let tables = UnitTableCache::default();
    let mut units = DisplayUnitSystem::new(kind, &tables);
    let largest = ticks.iter().fold(0.0f64, |acc, t| acc.max(t.abs()));
    units.update(largest);
    ticks
        .iter()
        .map(|&tick| units.format(tick, format, None, false, opts).unwrap())
        .collect()
}

#[test]
fn test_revenue_axis_in_millions() {
    let seq = NumericSequence::calculate_units(0, 4_300_000, 5, &[1_000_000, 2_000_000]);
    let ticks: Vec<f64> = seq.sequence.iter().map(|&t| t as f64).collect();
    assert_eq!(ticks, vec![0.0, 1e6, 2e6, 3e6, 4e6, 5e6]);

    let opts = FormatOptions::default();
    let labels = label_axis(&ticks, DisplayUnitSystemKind::Default, "$#,0", &opts);
    assert_eq!(labels, vec!["$0M", "$1M", "$2M", "$3M", "$4M", "$5M"]);
}

#[test]
fn test_axis_with_fractional_units() {
    let ticks = [0.0, 250_000.0, 500_000.0, 750_000.0];
    let opts = FormatOptions::default();
    let labels = label_axis(&ticks, DisplayUnitSystemKind::Default, "#,0", &opts);
    assert_eq!(labels, vec!["0M", "0.25M", "0.5M", "0.75M"]);

    let labels = label_axis(&ticks, DisplayUnitSystemKind::WholeUnits, "#,0", &opts);
    assert_eq!(labels, vec!["0K", "250K", "500K", "750K"]);
}

#[test]
fn test_negative_axis_uses_negative_section() {
    let ticks = [-2e9, -1e9, 0.0, 1e9];
    let labels = label_axis(
        &ticks,
        DisplayUnitSystemKind::Default,
        "#,0;(#,0);'-'",
        &FormatOptions::default(),
    );
    assert_eq!(labels, vec!["(2bn)", "(1bn)", "-", "1bn"]);
}

#[test]
fn test_axis_in_german() {
    let opts = FormatOptions::with_culture(Culture::de_de());
    let ticks = [1.5e6, 2.25e6];
    let labels = label_axis(&ticks, DisplayUnitSystemKind::Default, "#,0", &opts);
    assert_eq!(labels, vec!["1,5M", "2,25M"]);
}

fn month_labels(seq: &DateTimeSequence, culture: &Culture) -> Vec<String> {
    seq.sequence
        .iter()
        .map(|d| {
            let month = culture.abbreviated_month_name(d.month()).unwrap_or("?");
            format!("{month} {}", d.year())
        })
        .collect()
}

#[test]
fn test_date_axis_labels() {
    let min = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let max = NaiveDate::from_ymd_opt(2017, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let seq = DateTimeSequence::calculate(min, max, 5, None);
    assert_eq!(
        month_labels(&seq, &Culture::en_us()),
        vec!["Jan 2016", "Apr 2016", "Jul 2016", "Oct 2016", "Jan 2017", "Apr 2017"]
    );
    assert_eq!(
        month_labels(&seq, &Culture::de_de()),
        vec!["Jan 2016", "Apr 2016", "Jul 2016", "Okt 2016", "Jan 2017", "Apr 2017"]
    );
}

#[test]
fn test_tooltip_value_formats() {
    let opts = FormatOptions::default();
    assert_eq!(format(12345.6789, "$#,0;($#,0);0", &opts).unwrap(), "$12,346");
    assert_eq!(format(-0.1234, "0.0%;(0.0%)", &opts).unwrap(), "(12.3%)");
    assert_eq!(format(0.0, "0.0%;(0.0%);'n/a'", &opts).unwrap(), "n/a");
}
