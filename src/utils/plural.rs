//! Pluralization utilities.

/// Pick the singular or plural form for `n`
///
/// # Examples
///
/// - `plural(0, "entry", "entries")` -> `"entries"`
/// - `plural(1, "entry", "entries")` -> `"entry"`
#[inline]
pub fn plural<'a>(n: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if n == 1 { singular } else { plural }
}

/// Format count with noun, handling pluralization
///
/// # Examples
///
/// - `plural_count(0, "entry", "entries")` -> `"0 entries"`
/// - `plural_count(1, "entry", "entries")` -> `"1 entry"`
#[inline]
pub fn plural_count(count: usize, singular: &str, plural_form: &str) -> String {
    format!("{} {}", count, plural(count, singular, plural_form))
}
