use axisfmt::ast::{DigitPlaceholder, FormatItem};
use axisfmt::{NumberFormat, StandardCode};

fn custom(format: &str) -> axisfmt::CustomFormat {
    match NumberFormat::parse(format).unwrap() {
        NumberFormat::Custom(fmt) => fmt,
        other => panic!("expected custom format, got {other:?}"),
    }
}

#[test]
fn test_standard_and_custom_variants() {
    assert!(matches!(
        NumberFormat::parse("p2").unwrap(),
        NumberFormat::Standard(fmt) if fmt.code == StandardCode::Percent
    ));
    let fmt = custom("0.00E+00");
    assert!(fmt.select_section(1.0).scientific_index().is_some());
}

#[test]
fn test_standard_code_from_letter() {
    assert_eq!(StandardCode::from_letter('x'), Some(StandardCode::Hexadecimal));
    assert_eq!(StandardCode::from_letter('R'), Some(StandardCode::RoundTrip));
    assert_eq!(StandardCode::from_letter('Z'), None);
}

#[test]
fn test_section_metadata() {
    let fmt = custom("#,0.0%");
    let section = fmt.select_section(1.0);
    assert!(section.uses_grouping());
    assert_eq!(section.metadata.precision, Some(1));
    assert_eq!(section.metadata.scale, Some(100.0));

    let fmt = custom("'n/a'");
    assert!(!fmt.select_section(1.0).uses_grouping());
}

#[test]
fn test_scaling_commas_are_not_grouping() {
    let fmt = custom("0,,");
    let section = fmt.select_section(1.0);
    assert!(!section.uses_grouping());
    assert_eq!(section.metadata.scale, Some(1e-6));
}

#[test]
fn test_section_items() {
    let fmt = custom("$#0.0E+0");
    let section = fmt.select_section(1.0);
    assert_eq!(section.scientific_index(), Some(5));
    assert_eq!(section.items[0], FormatItem::Literal("$".to_string()));
    assert_eq!(section.items[1], FormatItem::Digit(DigitPlaceholder::Hash));
    assert!(section.items[2].is_numeric());
    assert!(!section.items[0].is_numeric());
    assert!(DigitPlaceholder::Zero.is_required());
    assert!(!DigitPlaceholder::Hash.is_required());
}

#[test]
fn test_components_kept_on_format() {
    let fmt = custom("0;(0)");
    assert_eq!(fmt.components().negative, "(0)");
    assert_eq!(fmt.components().zero, "0");
    assert!(fmt.has_explicit_negative());
    assert!(!fmt.has_zero_section());
}
