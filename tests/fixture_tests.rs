//! Table-driven checks of custom and standard formats against
//! `fixtures/number_formats.json`.
//!
//! Each entry is `[value, format, expected]`.

use axisfmt::format_default;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct FormatCase(f64, String, String);

fn load_test_cases() -> Vec<FormatCase> {
    let json_data = include_str!("fixtures/number_formats.json");
    serde_json::from_str(json_data).expect("Failed to parse number_formats.json")
}

#[test]
fn test_fixture_formats() {
    let cases = load_test_cases();
    assert!(!cases.is_empty());

    let mut failures = Vec::new();
    for FormatCase(value, format, expected) in &cases {
        match format_default(*value, format) {
            Ok(actual) if actual == *expected => {}
            Ok(actual) => failures.push(format!(
                "value={value}, format={format:?}: expected {expected:?}, got {actual:?}"
            )),
            Err(e) => failures.push(format!("value={value}, format={format:?}: error {e}")),
        }
    }

    assert!(
        failures.is_empty(),
        "{} of {} cases failed:\n{}",
        failures.len(),
        cases.len(),
        failures.join("\n")
    );
}
