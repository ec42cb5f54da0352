//! Date helpers for sitemap `<lastmod>` values.
//!
//! # Features
//!
//! - Today's date in the local timezone, formatted as `YYYY-MM-DD`
//! - W3C Datetime validation for existing `<lastmod>` values
//!
//! # Examples
//!
//! ```ignore
//! let date = format_ymd(today());          // "2024-06-15"
//! assert!(is_w3c_datetime("2024-06-15"));
//! assert!(is_w3c_datetime("2024-06-15T14:30:45+02:00"));
//! assert!(!is_w3c_datetime("15/06/2024"));
//! ```

use chrono::{DateTime, Local, NaiveDate};

/// Current date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format as `YYYY-MM-DD`, the form written into every `<lastmod>`.
pub fn format_ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Check whether `s` is one of the W3C Datetime forms the sitemap protocol
/// accepts for `<lastmod>`:
///
/// - `YYYY`
/// - `YYYY-MM`
/// - `YYYY-MM-DD`
/// - `YYYY-MM-DDThh:mmTZD`
/// - `YYYY-MM-DDThh:mm:ss[.s+]TZD`
///
/// where `TZD` is `Z` or `+hh:mm` / `-hh:mm`.
pub fn is_w3c_datetime(s: &str) -> bool {
    let s = s.trim();
    let bytes = s.as_bytes();

    match bytes.len() {
        4 => parse_u16(bytes).is_some(),
        7 => {
            bytes[4] == b'-'
                && parse_u16(&bytes[0..4]).is_some()
                && parse_u8(&bytes[5..7]).is_some_and(|m| (1..=12).contains(&m))
        }
        10 => bytes[4] == b'-' && bytes[7] == b'-' && parse_date(s).is_some(),
        len if len > 10 && bytes[10] == b'T' => parse_datetime(s),
        _ => false,
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn parse_datetime(s: &str) -> bool {
    // chrono's `%:z` does not take `Z`, normalize it to an explicit offset
    let normalized = match s.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => s.to_string(),
    };

    if DateTime::parse_from_rfc3339(&normalized).is_ok() {
        return true;
    }

    // Minute precision: `YYYY-MM-DDThh:mm+hh:mm`
    DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M%:z").is_ok()
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}
