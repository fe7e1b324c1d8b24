use axisfmt::{format, format_default, format_with_override, FormatOptions};

#[test]
fn test_format_convenience() {
    let opts = FormatOptions::default();
    let result = format(1234.5, "#,##0.00", &opts).unwrap();
    assert_eq!(result, "1,234.50");
}

#[test]
fn test_format_default_convenience() {
    let result = format_default(0.42, "0%").unwrap();
    assert_eq!(result, "42%");
}

#[test]
fn test_format_empty_code_is_general() {
    assert_eq!(format_default(1234.5, "").unwrap(), "1234.5");
}

#[test]
fn test_format_invalid_standard_code() {
    assert!(format_default(42.0, "Q").is_err());
    assert!(format_default(42.0, "Z2").is_err());
}

#[test]
fn test_format_with_override_convenience() {
    let opts = FormatOptions::default();
    let result = format_with_override(1.5, "#,0.0", Some("{0}bn"), &opts).unwrap();
    assert_eq!(result, "1.5bn");
}

#[test]
fn test_repeated_calls_agree() {
    let opts = FormatOptions::default();
    let first = format(98.765, "0.0", &opts).unwrap();
    let second = format(98.765, "0.0", &opts).unwrap();
    assert_eq!(first, "98.8");
    assert_eq!(first, second);
}
