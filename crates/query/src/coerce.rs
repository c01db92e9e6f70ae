//! Best-effort conversion of cell values to text and numbers.
//!
//! Search, filter, lexical sort and group labels all go through [`render`];
//! numeric sort and aggregation go through [`to_number`]. Null stands in for
//! a missing key, so both functions treat it as the empty/zero default.

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use core::cmp::Ordering;
use tabula_core::Value;

/// Nonzero floats outside `[PLAIN_FLOAT_MIN, PLAIN_FLOAT_MAX)` render in
/// exponent form.
const PLAIN_FLOAT_MIN: f64 = 1e-4;
const PLAIN_FLOAT_MAX: f64 = 1e16;

/// Renders a value as display text.
///
/// Integers render without a fractional part, integral floats keep a trailing
/// `.0` (very large or small ones use `1e+16` style exponents), booleans render as `True`/`False`, null renders as the empty string.
pub fn render(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::Boolean(true) => Cow::Borrowed("True"),
        Value::Boolean(false) => Cow::Borrowed("False"),
        Value::Int64(i) => Cow::Owned(format!("{}", i)),
        Value::Float64(f) => Cow::Owned(render_float(*f)),
        Value::String(s) => Cow::Borrowed(s.as_str()),
    }
}

fn render_float(f: f64) -> String {
    if f.is_nan() {
        return String::from("nan");
    }
    if f.is_infinite() {
        return String::from(if f > 0.0 { "inf" } else { "-inf" });
    }
    let magnitude = libm::fabs(f);
    if magnitude != 0.0 && !(PLAIN_FLOAT_MIN..PLAIN_FLOAT_MAX).contains(&magnitude) {
        return render_exponent(f);
    }
    if libm::trunc(f) == f {
        format!("{:.1}", f)
    } else {
        format!("{}", f)
    }
}

/// `1.5e-7` becomes `1.5e-07`: explicit sign, at least two exponent digits.
fn render_exponent(f: f64) -> String {
    let text = format!("{:e}", f);
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

/// Interprets a value as a number.
///
/// Null, `false` and the empty string are 0, `true` is 1, strings are parsed
/// after trimming surrounding whitespace. Returns `None` when a non-empty
/// string does not parse.
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Int64(i) => Some(*i as f64),
        Value::Float64(f) => Some(*f),
        Value::String(s) if s.is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok(),
    }
}

/// Orders two floats, placing NaN after every other value and treating
/// `-0.0` and `0.0` as equal.
#[inline]
pub fn cmp_f64(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ord) => ord,
        None => a.is_nan().cmp(&b.is_nan()),
    }
}
