//! Structural metadata of custom format strings.
//!
//! Metadata classifies a format without rendering anything: which special
//! characters appear outside literals, how many fractional digits the
//! positive section asks for, and the factor the value is scaled by.

use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

use log::trace;
use lru::LruCache;

use crate::parser::lexer::Lexer;
use crate::parser::tokens::Token;

/// Upper bound on the fractional digits a format can request.
pub const MAX_PRECISION: u32 = 19;

/// Structural flags and derived numbers of a custom format string.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatMetadata {
    pub format: String,
    pub has_literals: bool,
    pub has_e: bool,
    pub has_commas: bool,
    pub has_dots: bool,
    pub has_percent: bool,
    pub has_permille: bool,
    /// Digit placeholders after the first `.` of the positive section.
    pub precision: Option<u32>,
    /// `parts_per_scale` divided by 1000 per trailing scaling comma.
    pub scale: Option<f64>,
    /// 100 per `%` and 1000 per `‰` of the positive section.
    pub parts_per_scale: Option<f64>,
}

/// Which derived numbers to compute alongside the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetadataRequest {
    pub precision: bool,
    pub scale: bool,
    pub parts_per_scale: bool,
}

impl MetadataRequest {
    /// Flags only.
    pub const FLAGS: MetadataRequest = MetadataRequest {
        precision: false,
        scale: false,
        parts_per_scale: false,
    };

    /// Flags and every derived number.
    pub const ALL: MetadataRequest = MetadataRequest {
        precision: true,
        scale: true,
        parts_per_scale: true,
    };
}

/// Compute the metadata of a custom format string.
pub fn custom_format_metadata(format: &str, request: MetadataRequest) -> FormatMetadata {
    let tokens: Vec<Token> = Lexer::new(format)
        .tokenize()
        .into_iter()
        .map(|t| t.token)
        .collect();

    let mut meta = FormatMetadata {
        format: format.to_string(),
        has_literals: false,
        has_e: false,
        has_commas: false,
        has_dots: false,
        has_percent: false,
        has_permille: false,
        precision: None,
        scale: None,
        parts_per_scale: None,
    };

    for token in &tokens {
        match token {
            Token::QuotedString(_) | Token::EscapedChar(_) => meta.has_literals = true,
            Token::Literal('e' | 'E') | Token::Exponent { .. } => meta.has_e = true,
            Token::GroupSep => meta.has_commas = true,
            Token::DecimalPoint => meta.has_dots = true,
            Token::Percent => meta.has_percent = true,
            Token::Permille => meta.has_permille = true,
            _ => {}
        }
    }

    let positive_end = tokens
        .iter()
        .position(|t| matches!(t, Token::SectionSep | Token::Eof))
        .unwrap_or(tokens.len());
    let positive = &tokens[..positive_end];

    if request.precision {
        meta.precision = Some(precision_of(positive));
    }
    if request.scale || request.parts_per_scale {
        let parts = parts_per_scale_of(positive);
        if request.parts_per_scale {
            meta.parts_per_scale = Some(parts);
        }
        if request.scale {
            let divisor = 1000f64.powi(trailing_commas(positive) as i32);
            meta.scale = Some(parts / divisor);
        }
    }

    meta
}

/// Count of placeholders after the first `.`, stopping at an exponent marker.
fn precision_of(tokens: &[Token]) -> u32 {
    let Some(dot) = tokens.iter().position(|t| matches!(t, Token::DecimalPoint)) else {
        return 0;
    };
    let count = tokens[dot + 1..]
        .iter()
        .take_while(|t| !matches!(t, Token::Exponent { .. }))
        .filter(|t| t.is_digit_placeholder())
        .count();
    (count as u32).min(MAX_PRECISION)
}

fn parts_per_scale_of(tokens: &[Token]) -> f64 {
    tokens.iter().fold(1.0, |parts, token| match token {
        Token::Percent => parts * 100.0,
        Token::Permille => parts * 1000.0,
        _ => parts,
    })
}

/// Commas directly after the last integer placeholder, i.e. immediately
/// before the (explicit or implicit) decimal point.
fn trailing_commas(tokens: &[Token]) -> usize {
    let integer_end = tokens
        .iter()
        .position(|t| matches!(t, Token::DecimalPoint | Token::Exponent { .. }))
        .unwrap_or(tokens.len());
    let integer = &tokens[..integer_end];
    match integer.iter().rposition(Token::is_digit_placeholder) {
        Some(last) => integer[last + 1..]
            .iter()
            .take_while(|t| matches!(t, Token::GroupSep))
            .count(),
        None => 0,
    }
}

/// Memoizes format metadata by exact format string.
///
/// The default capacity of one keeps only the most recently computed entry,
/// so a different format string evicts it.
#[derive(Debug)]
pub struct MetadataCache {
    entries: Mutex<LruCache<String, FormatMetadata>>,
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataCache {
    /// A single-slot cache.
    pub fn new() -> Self {
        Self::with_capacity(NonZeroUsize::MIN)
    }

    /// A cache keeping up to `capacity` distinct format strings.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Get the metadata for `format`, computing it on a miss.
    ///
    /// Only the requested derived numbers are populated in the result.
    pub fn get_or_compute(&self, format: &str, request: MetadataRequest) -> FormatMetadata {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        let full = if let Some(meta) = entries.get(format).cloned() {
            meta
        } else {
            trace!("format metadata cache miss for {format:?}");
            let meta = custom_format_metadata(format, MetadataRequest::ALL);
            entries.put(format.to_string(), meta.clone());
            meta
        };

        FormatMetadata {
            precision: full.precision.filter(|_| request.precision),
            scale: full.scale.filter(|_| request.scale),
            parts_per_scale: full.parts_per_scale.filter(|_| request.parts_per_scale),
            ..full
        }
    }

    /// Returns true if `format` is currently cached.
    pub fn contains(&self, format: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(format)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_ignore_literals() {
        let meta = custom_format_metadata("'%e,.'0", MetadataRequest::FLAGS);
        assert!(meta.has_literals);
        assert!(!meta.has_percent);
        assert!(!meta.has_e);
        assert!(!meta.has_commas);
        assert!(!meta.has_dots);
        assert_eq!(meta.precision, None);
    }

    #[test]
    fn test_precision_stops_at_exponent() {
        let meta = custom_format_metadata("0.00E+000", MetadataRequest::ALL);
        assert_eq!(meta.precision, Some(2));
        assert!(meta.has_e);
    }

    #[test]
    fn test_precision_capped() {
        let format = format!("0.{}", "0".repeat(25));
        let meta = custom_format_metadata(&format, MetadataRequest::ALL);
        assert_eq!(meta.precision, Some(MAX_PRECISION));
    }

    #[test]
    fn test_precision_uses_positive_section() {
        let meta = custom_format_metadata("0.0;0.000", MetadataRequest::ALL);
        assert_eq!(meta.precision, Some(1));
    }

    #[test]
    fn test_scale_with_percent_and_commas() {
        let meta = custom_format_metadata("0%", MetadataRequest::ALL);
        assert_eq!(meta.scale, Some(100.0));
        assert_eq!(meta.parts_per_scale, Some(100.0));

        let meta = custom_format_metadata("#,##0,,", MetadataRequest::ALL);
        assert_eq!(meta.scale, Some(1e-6));

        let meta = custom_format_metadata("0,.00‰", MetadataRequest::ALL);
        assert_eq!(meta.scale, Some(1.0));
        assert_eq!(meta.parts_per_scale, Some(1000.0));
    }

    #[test]
    fn test_cache_keeps_single_entry() {
        let cache = MetadataCache::new();
        cache.get_or_compute("0.00", MetadataRequest::ALL);
        assert!(cache.contains("0.00"));
        cache.get_or_compute("#,0", MetadataRequest::ALL);
        assert!(!cache.contains("0.00"));
        assert!(cache.contains("#,0"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_larger_cache_keeps_recent_entries() {
        let cache = MetadataCache::with_capacity(NonZeroUsize::new(2).unwrap());
        cache.get_or_compute("0.00", MetadataRequest::FLAGS);
        cache.get_or_compute("#,0", MetadataRequest::FLAGS);
        assert!(cache.contains("0.00"));
        cache.get_or_compute("0%", MetadataRequest::FLAGS);
        assert!(!cache.contains("0.00"));
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_masks_unrequested_fields() {
        let cache = MetadataCache::new();
        let meta = cache.get_or_compute("0.00%", MetadataRequest::FLAGS);
        assert_eq!(meta.precision, None);
        let meta = cache.get_or_compute(
            "0.00%",
            MetadataRequest {
                precision: true,
                ..MetadataRequest::FLAGS
            },
        );
        assert_eq!(meta.precision, Some(2));
        assert_eq!(meta.scale, None);
    }
}
