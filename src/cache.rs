//! Format code caching.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

use log::trace;

use crate::ast::NumberFormat;
use crate::error::FormatError;

/// Global cache for parsed format codes.
static CACHE: Mutex<Option<LruCache<String, NumberFormat>>> = Mutex::new(None);

const CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Get or parse a format code, using the cache.
///
/// Failed parses are not cached.
pub fn get_or_parse(format_code: &str) -> Result<NumberFormat, FormatError> {
    let mut cache_guard = CACHE.lock().unwrap_or_else(PoisonError::into_inner);

    let cache = cache_guard.get_or_insert_with(|| LruCache::new(CACHE_SIZE));

    if let Some(fmt) = cache.get(format_code) {
        return Ok(fmt.clone());
    }

    trace!("parsing uncached format code {format_code:?}");
    let fmt = NumberFormat::parse(format_code)?;
    cache.put(format_code.to_string(), fmt.clone());
    Ok(fmt)
}
