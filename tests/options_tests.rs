use axisfmt::{format, Culture, FormatOptions};

#[test]
fn test_default_options() {
    let opts = FormatOptions::default();
    assert_eq!(opts.culture.name, "en-US");
    assert!(!opts.beautify);
}

#[test]
fn test_beautify_compacts_percent_formats() {
    let opts = FormatOptions {
        beautify: true,
        ..FormatOptions::default()
    };
    assert_eq!(format(1.0, "0.00 %;-0.00 %;0.00 %", &opts).unwrap(), "100%");
    assert_eq!(format(0.1234, "0.0 %;-0.0 %;0.0 %", &opts).unwrap(), "12.3%");
    assert_eq!(opts.effective_format("0.00"), "0.00");
}

#[test]
fn test_without_beautify_format_is_kept() {
    let opts = FormatOptions::default();
    assert_eq!(format(1.0, "0.00 %;-0.00 %;0.00 %", &opts).unwrap(), "100.00 %");
}

#[test]
fn test_builtin_culture_lookup() {
    assert_eq!(Culture::builtin("DE-de"), Some(Culture::de_de()));
    assert_eq!(Culture::builtin("en"), Some(Culture::en_us()));
    assert_eq!(Culture::builtin("xx-XX"), None);
}

#[test]
fn test_custom_culture() {
    let culture = Culture {
        name: "custom".to_string(),
        decimal_separator: '·',
        group_separator: '\'',
        ..Culture::en_us()
    };
    let opts = FormatOptions::with_culture(culture);
    assert_eq!(format(12345.5, "#,0.0", &opts).unwrap(), "12'345·5");
}

#[cfg(feature = "serde")]
#[test]
fn test_culture_serde_round_trip() {
    let culture = Culture::fr_fr();
    let json = serde_json::to_string(&culture).unwrap();
    let back: Culture = serde_json::from_str(&json).unwrap();
    assert_eq!(back, culture);
}
