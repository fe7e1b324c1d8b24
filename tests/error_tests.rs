use axisfmt::{format_default, FormatError, NumberFormat};

#[test]
fn test_unknown_standard_format_display() {
    let err = FormatError::UnknownStandardFormat {
        code: "Q".to_string(),
    };
    assert_eq!(err.to_string(), "unknown standard format specifier 'Q'");
}

#[test]
fn test_parse_reports_full_code() {
    let err = NumberFormat::parse("Y12").unwrap_err();
    assert_eq!(
        err,
        FormatError::UnknownStandardFormat {
            code: "Y12".to_string()
        }
    );
}

#[test]
fn test_format_propagates_error() {
    let err = format_default(1.0, "K").unwrap_err();
    assert!(err.to_string().contains("'K'"));
}

#[test]
fn test_custom_formats_never_fail() {
    for code in ["'unterminated", "\\", "0.0.0", "E+", ";;;;", "KK", "Q123"] {
        assert!(NumberFormat::parse(code).is_ok(), "{code}");
    }
}
