//! Requirement parsing cache - parsed ASTs and compiled regexes keyed by their source

use crate::condition::ast::RootNode;
use crate::condition::parser;
use crate::error::Result;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::Regex;
use std::sync::Arc;

/// Entries past this count are parsed but not cached
const CACHE_CAPACITY: usize = 2048;

/// Global requirement cache with fast hashing (ahash)
static REQUIREMENT_CACHE: Lazy<RwLock<AHashMap<String, Arc<RootNode>>>> = Lazy::new(|| {
    let map = AHashMap::with_capacity(256);
    RwLock::new(map)
});

static REGEX_CACHE: Lazy<RwLock<AHashMap<String, Regex>>> = Lazy::new(|| {
    let map = AHashMap::with_capacity(64);
    RwLock::new(map)
});

/// Get or parse a requirement string, using cache for repeated requirements
///
/// Racing callers may both parse the same string; either result is kept.
#[inline]
pub fn get_or_parse(requirement: &str) -> Result<Arc<RootNode>> {
    // Fast path: check read lock first
    {
        let cache = REQUIREMENT_CACHE.read();
        if let Some(root) = cache.get(requirement) {
            tracing::trace!(requirement, "requirement cache hit");
            return Ok(Arc::clone(root));
        }
    }

    // Slow path: parse outside the lock, then cache
    tracing::trace!(requirement, "requirement cache miss");
    let root = Arc::new(parser::parse(requirement)?);

    {
        let mut cache = REQUIREMENT_CACHE.write();
        if cache.len() < CACHE_CAPACITY {
            cache
                .entry(requirement.to_string())
                .or_insert_with(|| Arc::clone(&root));
        }
    }

    Ok(root)
}

/// Get or compile a regex pattern
#[inline]
pub fn get_or_compile_regex(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    {
        let cache = REGEX_CACHE.read();
        if let Some(re) = cache.get(pattern) {
            return Ok(re.clone());
        }
    }

    let re = Regex::new(pattern)?;

    {
        let mut cache = REGEX_CACHE.write();
        if cache.len() < CACHE_CAPACITY {
            cache.insert(pattern.to_string(), re.clone());
        }
    }

    Ok(re)
}

/// Whether a requirement is currently cached
pub fn is_cached(requirement: &str) -> bool {
    REQUIREMENT_CACHE.read().contains_key(requirement)
}

/// Clear both caches
pub fn clear_cache() {
    REQUIREMENT_CACHE.write().clear();
    REGEX_CACHE.write().clear();
}

/// Get cache statistics: (requirements, regexes)
pub fn cache_size() -> (usize, usize) {
    (REQUIREMENT_CACHE.read().len(), REGEX_CACHE.read().len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit_returns_same_ast() {
        let requirement = "min2 max9 || equ'cache-hit-test'";

        // First call - cache miss
        let first = get_or_parse(requirement).unwrap();
        assert!(is_cached(requirement));

        // Second call - cache hit
        let second = get_or_parse(requirement).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_parse_errors_are_not_cached() {
        let requirement = "min3 && && cache-error-test";
        assert!(get_or_parse(requirement).is_err());
        assert!(!is_cached(requirement));
    }

    #[test]
    fn test_regex_cache() {
        let re = get_or_compile_regex("^cache-[0-9]+$").unwrap();
        assert!(re.is_match("cache-42"));
        assert!(get_or_compile_regex("^cache-[0-9]+$").unwrap().is_match("cache-7"));
        assert!(get_or_compile_regex("(unclosed").is_err());
    }

    #[test]
    fn test_concurrent_population() {
        let requirement = "min1 max4 equ'concurrent'";
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(move || get_or_parse(requirement).map(|r| r.to_string())))
            .collect();
        for handle in handles {
            assert_eq!(
                handle.join().unwrap().unwrap(),
                "min'1' max'4' equ'concurrent'"
            );
        }
    }
}
