//! Lenient value readings used by the validator.
//!
//! Payloads arrive as untyped JSON. A value satisfies a numeric or boolean
//! field either natively or through its string form, so `"42"` is an
//! acceptable INTEGER and `"TRUE"` an acceptable BOOLEAN.

use serde_json::Value;

/// Reads a native integer, or a string that parses as a 32-bit one.
///
/// Native literals keep the full `i64` range; the string form does not.
pub fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse::<i32>().ok().map(i64::from),
        _ => None,
    }
}

/// Reads any native number, or a string that parses as a float.
///
/// Surrounding whitespace and control characters are tolerated in the
/// string form. The only accepted non-numeric spellings are `NaN` and
/// `Infinity`, optionally signed and in exactly that case.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float(s),
        _ => None,
    }
}

fn parse_float(s: &str) -> Option<f64> {
    let text = trim_control(s);
    let unsigned = text.strip_prefix(&['+', '-'][..]).unwrap_or(text);

    // `str::parse` also takes "inf", "infinity" and "nan" in any case
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic())
        && unsigned != "NaN"
        && unsigned != "Infinity"
    {
        return None;
    }

    text.parse().ok()
}

/// Strips every leading and trailing char at or below U+0020.
fn trim_control(s: &str) -> &str {
    s.trim_matches(|c: char| c <= ' ')
}

/// Reads a native boolean, or the strings "true"/"false" in any case.
pub fn as_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// True for values the required rule treats as missing: null, or a string
/// made only of chars at or below U+0020. Numbers, booleans and containers
/// always have a non-empty textual form.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => trim_control(s).is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_readings() {
        assert_eq!(as_integer(&json!(7)), Some(7));
        assert_eq!(as_integer(&json!("-12")), Some(-12));
        assert_eq!(as_integer(&json!(7.5)), None);
        assert_eq!(as_integer(&json!("7.0")), None);
        assert_eq!(as_integer(&json!(true)), None);
    }

    #[test]
    fn test_integer_strings_are_32_bit() {
        assert_eq!(as_integer(&json!("2147483647")), Some(i32::MAX as i64));
        assert_eq!(as_integer(&json!("-2147483648")), Some(i32::MIN as i64));
        assert_eq!(as_integer(&json!("3000000000")), None);
        assert_eq!(as_integer(&json!(3_000_000_000_i64)), Some(3_000_000_000));
    }

    #[test]
    fn test_number_readings() {
        assert_eq!(as_number(&json!(3)), Some(3.0));
        assert_eq!(as_number(&json!(2.5)), Some(2.5));
        assert_eq!(as_number(&json!(" 1e3 ")), Some(1000.0));
        assert_eq!(as_number(&json!("not-a-number")), None);
        assert_eq!(as_number(&json!([1])), None);
    }

    #[test]
    fn test_number_special_spellings() {
        assert_eq!(as_number(&json!("Infinity")), Some(f64::INFINITY));
        assert_eq!(as_number(&json!("-Infinity")), Some(f64::NEG_INFINITY));
        assert!(as_number(&json!("NaN")).is_some_and(f64::is_nan));
        assert_eq!(as_number(&json!("1e400")), Some(f64::INFINITY));

        assert_eq!(as_number(&json!("inf")), None);
        assert_eq!(as_number(&json!("-inf")), None);
        assert_eq!(as_number(&json!("infinity")), None);
        assert_eq!(as_number(&json!("nan")), None);
        assert_eq!(as_number(&json!("NAN")), None);
    }

    #[test]
    fn test_boolean_readings() {
        assert_eq!(as_boolean(&json!(false)), Some(false));
        assert_eq!(as_boolean(&json!("TRUE")), Some(true));
        assert_eq!(as_boolean(&json!("yes")), None);
        assert_eq!(as_boolean(&json!(1)), None);
    }

    #[test]
    fn test_blank_values() {
        assert!(is_blank(&Value::Null));
        assert!(is_blank(&json!("   ")));
        assert!(!is_blank(&json!(0)));
        assert!(!is_blank(&json!([])));
        assert!(!is_blank(&json!({})));
    }

    #[test]
    fn test_blank_uses_control_char_trim() {
        assert!(is_blank(&json!("\u{0001}\t\u{001f} ")));
        assert!(!is_blank(&json!("\u{00a0}")));
        assert!(!is_blank(&json!("\u{2003}")));
    }
}
