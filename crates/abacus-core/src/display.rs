//! # Display Text
//!
//! Converts between `f64` values and the text shown on the calculator
//! display.
//!
//! ## Number Formatting Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Digits are the SHORTEST decimal string that round-trips to the f64.    │
//! │  n = position of the decimal point relative to the first digit.         │
//! │                                                                         │
//! │  Range                       Example value      Display                 │
//! │  ─────────────────────────   ────────────────   ─────────────────────   │
//! │  integer, n <= 21            99980001.0         "99980001"              │
//! │  fraction, 0 < n <= 21       123.456            "123.456"               │
//! │  small, -6 < n <= 0          0.000001           "0.000001"              │
//! │  otherwise                   1e21, 1.5e-7       "1e+21", "1.5e-7"       │
//! │                                                                         │
//! │  Special values:  -0 → "0"   ∞ → "Infinity"   NaN → "NaN"               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! These are the rules of ECMAScript `Number.prototype.toString`, which is
//! what users of pocket calculator widgets are used to seeing.
//!
//! ## Parsing
//! [`parse_display`] is the inverse and is lenient in the same way
//! `parseFloat` is: it reads the longest numeric prefix and returns `NaN`
//! when there is none. It never fails.

/// Formats a value for the display.
///
/// ## Example
/// ```rust
/// use abacus_core::format_number;
///
/// assert_eq!(format_number(9999.0 * 9999.0), "99980001");
/// assert_eq!(format_number(1.0 / 3.0), "0.3333333333333333");
/// assert_eq!(format_number(1.0 / 0.0), "Infinity");
/// assert_eq!(format_number(1e21), "1e+21");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value < 0.0 {
        return format!("-{}", format_number(-value));
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "9.9980001e7"
    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (whole, fraction) = digits.split_at(n as usize);
        format!("{}.{}", whole, fraction)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let sign = if e >= 0 { '+' } else { '-' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, e.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, e.abs())
        }
    }
}

/// Parses display text into a value.
///
/// ## Rules
/// - Leading whitespace is skipped
/// - An optional sign followed by `Infinity` gives ±∞
/// - Otherwise the longest `digits[.digits][e[±]digits]` prefix is parsed
/// - No numeric prefix at all gives `NaN` (including the text `"NaN"`)
///
/// ## Example
/// ```rust
/// use abacus_core::parse_display;
///
/// assert_eq!(parse_display("123"), 123.0);
/// assert_eq!(parse_display("-Infinity"), f64::NEG_INFINITY);
/// assert!(parse_display("NaN").is_nan());
/// ```
pub fn parse_display(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let len = bytes.len();
    let is_digit = |i: usize| i < len && bytes[i].is_ascii_digit();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if text[end..].starts_with("Infinity") {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let integer_start = end;
    while is_digit(end) {
        end += 1;
    }
    let mut mantissa_digits = end - integer_start;

    if end < len && bytes[end] == b'.' {
        let mut fraction_end = end + 1;
        while is_digit(fraction_end) {
            fraction_end += 1;
        }
        mantissa_digits += fraction_end - (end + 1);
        if mantissa_digits > 0 {
            end = fraction_end;
        }
    }

    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exponent_end = end + 1;
        if exponent_end < len && (bytes[exponent_end] == b'+' || bytes[exponent_end] == b'-') {
            exponent_end += 1;
        }
        let exponent_digits_start = exponent_end;
        while is_digit(exponent_end) {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }

    text[..end].parse::<f64>().unwrap_or(f64::NAN)
}

// =============================================================================
// Unit Tests
// =============================================================================
