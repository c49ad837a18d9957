//! Number parsing and rendering with ECMA-262 semantics.
//!
//! Formatting directives promise the exact numeric text of the ECMAScript
//! `Number` conversions, so this module reimplements them on top of Rust's
//! float formatting:
//!
//! - [`number_to_string`] - `Number::toString` (shortest round-trip digits)
//! - [`to_fixed`], [`to_exponential`], [`to_precision`] - rounding renderers
//! - [`parse_int`], [`parse_float`], [`string_to_number`] - text to number
//! - [`to_uint32`], [`to_uint16`] - modular integer conversions
//!
//! # Rounding
//!
//! The rounding renderers work on the exact decimal expansion of the binary
//! value and round ties away from zero. For example `2.5` renders as `"3"`
//! with zero fraction digits, while `1.005` renders as `"1.00"` with two,
//! because the nearest double to `1.005` is slightly below it.

/// Fraction digits needed to print any finite `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Significant digits needed to print any finite `f64` exactly.
const EXACT_SIGNIFICANT_DIGITS: usize = 800;

// =============================================================================
// Rendering
// =============================================================================

/// Render a number the way `Number.prototype.toString()` does.
///
/// # Examples
///
/// ```
/// use quill_core::number::number_to_string;
///
/// assert_eq!(number_to_string(100.0), "100");
/// assert_eq!(number_to_string(0.5), "0.5");
/// assert_eq!(number_to_string(1e21), "1e+21");
/// assert_eq!(number_to_string(-0.0), "0");
/// ```
pub fn number_to_string(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }
    if x < 0.0 {
        return format!("-{}", number_to_string(-x));
    }
    if x.is_infinite() {
        return "Infinity".to_string();
    }

    let (digits, n) = shortest_digits(x);
    let k = digits.len() as i32;

    if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        exponential_text(&digits, n - 1)
    }
}

/// Render a number with a fixed number of fraction digits
/// (`Number.prototype.toFixed`).
///
/// Magnitudes of `1e21` and above fall back to [`number_to_string`].
pub fn to_fixed(x: f64, fraction_digits: usize) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.abs() >= 1e21 {
        return number_to_string(x);
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, x.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let digits: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();

    let (rounded, _) = round_digits(&digits, int_part.len() + fraction_digits);
    let int_len = rounded.len() - fraction_digits;
    let int_text = digits_to_string(&rounded[..int_len]);
    let int_text = match int_text.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };

    let mut out = String::with_capacity(int_len + fraction_digits + 2);
    if x < 0.0 {
        out.push('-');
    }
    out.push_str(int_text);
    if fraction_digits > 0 {
        out.push('.');
        out.push_str(&digits_to_string(&rounded[int_len..]));
    }
    out
}

/// Render a number in exponential notation (`Number.prototype.toExponential`).
///
/// With `None`, as many digits as needed to represent the value uniquely are
/// used; with `Some(n)`, exactly `n` digits follow the decimal point.
pub fn to_exponential(x: f64, fraction_digits: Option<usize>) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x < 0.0 {
        return format!("-{}", to_exponential(-x, fraction_digits));
    }
    if x.is_infinite() {
        return "Infinity".to_string();
    }
    if x == 0.0 {
        return match fraction_digits {
            Some(f) if f > 0 => format!("0.{}e+0", "0".repeat(f)),
            _ => "0e+0".to_string(),
        };
    }

    let (digits, exponent) = match fraction_digits {
        None => {
            let (digits, n) = shortest_digits(x);
            (digits, n - 1)
        }
        Some(f) => exact_significant(x, f + 1),
    };
    exponential_text(&digits, exponent)
}

/// Render a number with `precision` significant digits
/// (`Number.prototype.toPrecision`).
///
/// A precision of zero is treated as one.
pub fn to_precision(x: f64, precision: usize) -> String {
    let p = precision.max(1);

    if x.is_nan() {
        return "NaN".to_string();
    }
    if x < 0.0 {
        return format!("-{}", to_precision(-x, p));
    }
    if x.is_infinite() {
        return "Infinity".to_string();
    }
    if x == 0.0 {
        return if p > 1 {
            format!("0.{}", "0".repeat(p - 1))
        } else {
            "0".to_string()
        };
    }

    let (digits, e) = exact_significant(x, p);
    if e < -6 || e >= p as i32 {
        return exponential_text(&digits, e);
    }
    if e == p as i32 - 1 {
        return digits;
    }
    if e >= 0 {
        let (int_part, frac_part) = digits.split_at(e as usize + 1);
        format!("{int_part}.{frac_part}")
    } else {
        format!("0.{}{digits}", "0".repeat((-(e + 1)) as usize))
    }
}

/// Render the integral part of a number in base 2.
///
/// Values beyond the `u64` range are rendered exactly from their binary
/// mantissa.
pub fn to_binary_string(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x < 0.0 {
        return format!("-{}", to_binary_string(-x));
    }
    if x.is_infinite() {
        return "Infinity".to_string();
    }

    let int = x.trunc();
    if int < 18_446_744_073_709_551_616.0 {
        return format!("{:b}", int as u64);
    }

    let bits = int.to_bits();
    let shift = ((bits >> 52) & 0x7ff) as i64 - 1075;
    let mantissa = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);
    format!("{mantissa:b}{}", "0".repeat(shift.max(0) as usize))
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse the leading decimal integer of `text` (`parseInt(text, 10)`).
///
/// Leading whitespace and one sign are accepted; parsing stops at the first
/// non-digit. Returns NaN when no digit is found.
///
/// # Examples
///
/// ```
/// use quill_core::number::parse_int;
///
/// assert_eq!(parse_int("  -17px"), -17.0);
/// assert_eq!(parse_int("3.9"), 3.0);
/// assert!(parse_int("px").is_nan());
/// ```
pub fn parse_int(text: &str) -> f64 {
    let (negative, rest) = strip_sign(text.trim_start_matches(is_whitespace));
    let len = count_digits(rest.as_bytes(), 0);
    if len == 0 {
        return f64::NAN;
    }

    let value: f64 = rest[..len].parse().unwrap_or(f64::NAN);
    if negative { -value } else { value }
}

/// Parse the leading decimal literal of `text` (`parseFloat(text)`).
pub fn parse_float(text: &str) -> f64 {
    let (negative, rest) = strip_sign(text.trim_start_matches(is_whitespace));
    let value = if rest.starts_with("Infinity") {
        f64::INFINITY
    } else {
        let len = decimal_prefix_len(rest);
        if len == 0 {
            return f64::NAN;
        }
        rest[..len].parse().unwrap_or(f64::NAN)
    };
    if negative { -value } else { value }
}

/// Convert a whole string to a number (`Number(text)`).
///
/// Surrounding whitespace is ignored, an empty string is zero, `0x`, `0o`
/// and `0b` prefixes select a radix, and any trailing garbage yields NaN.
pub fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim_matches(is_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix_literal = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| trimmed.strip_prefix(prefix).map(|digits| (digits, radix)));
    if let Some((digits, radix)) = radix_literal {
        return parse_radix_digits(digits, radix);
    }

    let (negative, rest) = strip_sign(trimmed);
    let value = if rest == "Infinity" {
        f64::INFINITY
    } else if !rest.is_empty() && decimal_prefix_len(rest) == rest.len() {
        rest.parse().unwrap_or(f64::NAN)
    } else {
        return f64::NAN;
    };
    if negative { -value } else { value }
}

// =============================================================================
// Integer conversions
// =============================================================================

/// Wrap a number into the unsigned 32-bit range (`ToUint32`).
///
/// NaN and infinities map to zero, fractions are truncated and negative
/// values wrap around in two's complement.
pub fn to_uint32(x: f64) -> u32 {
    if !x.is_finite() {
        return 0;
    }
    x.trunc().rem_euclid(4_294_967_296.0) as u32
}

/// Wrap a number into the unsigned 16-bit range (`ToUint16`).
pub fn to_uint16(x: f64) -> u16 {
    if !x.is_finite() {
        return 0;
    }
    x.trunc().rem_euclid(65_536.0) as u16
}

// =============================================================================
// Helpers
// =============================================================================

/// ECMAScript `WhiteSpace` and `LineTerminator` code points.
///
/// Differs from [`char::is_whitespace`]: U+0085 is excluded and U+FEFF is
/// included.
fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{9}'..='\u{D}'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn strip_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else {
        (false, text.strip_prefix('+').unwrap_or(text))
    }
}

fn count_digits(bytes: &[u8], from: usize) -> usize {
    bytes
        .iter()
        .skip(from)
        .take_while(|b| b.is_ascii_digit())
        .count()
}

/// Length of the longest unsigned decimal literal (`1`, `1.`, `.5`, `1.5e-3`)
/// at the start of `text`, or zero if there is none.
fn decimal_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let int_digits = count_digits(bytes, 0);
    let mut len = int_digits;

    let mut frac_digits = 0;
    if bytes.get(len) == Some(&b'.') {
        frac_digits = count_digits(bytes, len + 1);
        if int_digits > 0 || frac_digits > 0 {
            len += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(len), Some(b'e' | b'E')) {
        let mut exp_start = len + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_digits = count_digits(bytes, exp_start);
        if exp_digits > 0 {
            len = exp_start + exp_digits;
        }
    }
    len
}

fn parse_radix_digits(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

/// Split Rust's `{:e}` output into its digit string and the exponent `n`
/// such that the value is `0.digits * 10^n`.
fn split_scientific(text: &str) -> (String, i32) {
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text, "0"));
    let digits = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    (digits, exponent + 1)
}

/// Shortest round-trip digits of a positive finite number.
fn shortest_digits(x: f64) -> (String, i32) {
    split_scientific(&format!("{x:e}"))
}

/// Exactly `count` significant digits of a positive finite number, rounded
/// half away from zero, with the decimal exponent of the first digit.
fn exact_significant(x: f64, count: usize) -> (String, i32) {
    let exact = format!("{:.*e}", EXACT_SIGNIFICANT_DIGITS, x);
    let (digits, n) = split_scientific(&exact);
    let (mut rounded, carried) = round_digits(digits.as_bytes(), count);

    let mut exponent = n - 1;
    if carried {
        exponent += 1;
        rounded.truncate(count);
    }
    (digits_to_string(&rounded), exponent)
}

/// Keep the first `keep` ASCII digits, rounding up when the first dropped
/// digit is 5 or more. Short inputs are padded with zeros.
///
/// Returns the digits and whether the carry grew the digit count by one.
fn round_digits(digits: &[u8], keep: usize) -> (Vec<u8>, bool) {
    if keep >= digits.len() {
        let mut padded = digits.to_vec();
        padded.resize(keep, b'0');
        return (padded, false);
    }

    let mut kept = digits[..keep].to_vec();
    if digits[keep] < b'5' {
        return (kept, false);
    }

    for digit in kept.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return (kept, false);
        }
    }
    kept.insert(0, b'1');
    (kept, true)
}

fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().copied().map(char::from).collect()
}

fn exponential_text(digits: &str, exponent: i32) -> String {
    let (first, rest) = digits.split_at(1.min(digits.len()));
    let sign = if exponent < 0 { '-' } else { '+' };
    if rest.is_empty() {
        format!("{first}e{sign}{}", exponent.unsigned_abs())
    } else {
        format!("{first}.{rest}e{sign}{}", exponent.unsigned_abs())
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn finite_f64_strategy() -> impl Strategy<Value = f64> {
        proptest::num::f64::NORMAL | proptest::num::f64::SUBNORMAL | proptest::num::f64::ZERO
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Integers render as their plain decimal text.
    fn check_integers_render_plainly(n: i64) -> Result<(), TestCaseError> {
        let rendered = number_to_string(n as f64);
        prop_assert_eq!(rendered, (n as f64 as i128).to_string());
        Ok(())
    }

    /// Rendering is lossless: parsing the text yields the same double.
    fn check_render_round_trips(x: f64) -> Result<(), TestCaseError> {
        let rendered = number_to_string(x);
        let parsed: f64 = rendered
            .parse()
            .map_err(|err| TestCaseError::fail(format!("`{rendered}` does not parse: {err}")))?;
        prop_assert_eq!(parsed, x, "`{}` did not round trip", rendered);
        Ok(())
    }

    /// Fixed rendering stays within half a unit of the last digit.
    fn check_to_fixed_is_close(x: f64, digits: usize) -> Result<(), TestCaseError> {
        let rendered = to_fixed(x, digits);
        let parsed: f64 = rendered.parse().unwrap_or(f64::NAN);
        let tolerance = 0.5 * 10f64.powi(-(digits as i32)) + x.abs() * 1e-12;
        prop_assert!(
            (parsed - x).abs() <= tolerance,
            "to_fixed({x}, {digits}) = `{rendered}` is too far from the input"
        );
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn integers_render_plainly(n in -(1i64 << 53)..(1i64 << 53)) {
            check_integers_render_plainly(n)?;
        }

        #[test]
        fn render_round_trips(x in finite_f64_strategy()) {
            check_render_round_trips(x)?;
        }

        #[test]
        fn to_fixed_is_close(x in -1e12f64..1e12, digits in 0usize..8) {
            check_to_fixed_is_close(x, digits)?;
        }
    }
}
