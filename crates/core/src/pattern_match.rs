//! Case-insensitive substring matching.
//!
//! Provides a single, canonical implementation used by both free-text search
//! and the column filter, ensuring identical semantics across both.
//!
//! Matching folds both sides with Unicode lowercase mapping and then looks
//! for the needle anywhere in the haystack. An empty needle matches
//! everything.

use alloc::string::String;

/// Lowercases `s` once so the result can be reused across many haystacks.
///
/// ```
/// use tabula_core::pattern_match::fold;
/// assert_eq!(fold("ALIce"), "alice");
/// ```
pub fn fold(s: &str) -> String {
    s.to_lowercase()
}

/// Returns true if `haystack` contains the already folded `needle`,
/// ignoring case.
///
/// ```
/// use tabula_core::pattern_match::{contains_folded, fold};
/// let needle = fold("ALI");
/// assert!(contains_folded("Alice", &needle));
/// assert!(!contains_folded("bob", &needle));
/// ```
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    // Fast path: pure ASCII haystacks need no allocation when they already
    // contain no uppercase letters.
    if haystack.is_ascii() && !haystack.bytes().any(|b| b.is_ascii_uppercase()) {
        return haystack.contains(needle);
    }
    haystack.to_lowercase().contains(needle)
}

/// Returns true if `haystack` contains `needle`, ignoring case.
///
/// ```
/// use tabula_core::pattern_match::contains_ignore_case;
/// assert!(contains_ignore_case("Engineering", "NEER"));
/// ```
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    contains_folded(haystack, &fold(needle))
}
