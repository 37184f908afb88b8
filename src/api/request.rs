//! Request types for the payroll engine API.
//!
//! The `/api/payroll` body is parsed leniently: `gross` may be a JSON number
//! or a string starting with a number (`"50000"`, `"50000 KES"`), and
//! anything else (absent, `null`, text, booleans, objects) counts as zero
//! rather than failing the request.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Request body for the `/api/payroll` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// Monthly gross salary in currency units.
    #[serde(
        default,
        deserialize_with = "deserialize_gross",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub gross: Decimal,
}

impl PayrollRequest {
    /// Creates a request for the given gross salary.
    pub fn new(gross: Decimal) -> Self {
        Self { gross }
    }
}

/// Interprets a JSON value as a gross salary.
///
/// Numbers are taken as-is. Strings are read like a browser's `parseFloat`:
/// leading whitespace is skipped and the longest leading decimal literal
/// (optional sign, digits, fraction, exponent) is used, so `"50000abc"` is
/// 50000. Every other value, and numbers outside the decimal range, yield
/// zero. Negative amounts are returned as-is and clamped by the calculator.
///
/// # Examples
///
/// ```
/// use payroll_engine::api::parse_gross;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// assert_eq!(parse_gross(&json!(50000)), Decimal::from(50000));
/// assert_eq!(parse_gross(&json!(" 50000 ")), Decimal::from(50000));
/// assert_eq!(parse_gross(&json!("50000abc")), Decimal::from(50000));
/// assert_eq!(parse_gross(&json!("fifty")), Decimal::ZERO);
/// assert_eq!(parse_gross(&json!(null)), Decimal::ZERO);
/// ```
pub fn parse_gross(value: &serde_json::Value) -> Decimal {
    match value {
        serde_json::Value::Number(number) => {
            if let Some(i) = number.as_i64() {
                Decimal::from(i)
            } else if let Some(u) = number.as_u64() {
                Decimal::from(u)
            } else {
                parse_leading_decimal(&number.to_string()).unwrap_or(Decimal::ZERO)
            }
        }
        serde_json::Value::String(text) => {
            parse_leading_decimal(text.trim_start()).unwrap_or(Decimal::ZERO)
        }
        _ => Decimal::ZERO,
    }
}

/// Parses the longest decimal literal at the start of `text`.
///
/// Returns `None` when `text` does not start with a number or the number
/// does not fit in a `Decimal`.
fn parse_leading_decimal(text: &str) -> Option<Decimal> {
    let bytes = text.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos = 1;
            true
        }
        Some(b'+') => {
            pos = 1;
            false
        }
        _ => false,
    };

    let integer = digits_at(text, pos);
    pos += integer.len();

    let mut fraction = "";
    if bytes.get(pos) == Some(&b'.') {
        fraction = digits_at(text, pos + 1);
        if !integer.is_empty() || !fraction.is_empty() {
            pos += 1 + fraction.len();
        }
    }
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut mantissa = String::with_capacity(pos + 1);
    if negative {
        mantissa.push('-');
    }
    mantissa.push_str(if integer.is_empty() { "0" } else { integer });
    if !fraction.is_empty() {
        mantissa.push('.');
        mantissa.push_str(fraction);
    }

    // An exponent only counts when at least one digit follows the marker.
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        let exp_negative = match bytes.get(exp_pos) {
            Some(b'-') => {
                exp_pos += 1;
                true
            }
            Some(b'+') => {
                exp_pos += 1;
                false
            }
            _ => false,
        };
        let exponent = digits_at(text, exp_pos);
        if !exponent.is_empty() {
            let sign = if exp_negative { "-" } else { "" };
            return Decimal::from_scientific(&format!("{}e{}{}", mantissa, sign, exponent)).ok();
        }
    }

    Decimal::from_str(&mantissa).ok()
}

/// Returns the run of ASCII digits starting at byte offset `start`.
fn digits_at(text: &str, start: usize) -> &str {
    let rest = text.get(start..).unwrap_or("");
    let len = rest.bytes().take_while(u8::is_ascii_digit).count();
    &rest[..len]
}

fn deserialize_gross<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(parse_gross(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_numeric_gross() {
        let request: PayrollRequest = serde_json::from_str(r#"{"gross": 50000}"#).unwrap();
        assert_eq!(request.gross, dec("50000"));
    }

    #[test]
    fn test_deserialize_fractional_gross() {
        let request: PayrollRequest = serde_json::from_str(r#"{"gross": 12345.67}"#).unwrap();
        assert_eq!(request.gross, dec("12345.67"));
    }

    #[test]
    fn test_deserialize_string_gross() {
        let request: PayrollRequest = serde_json::from_str(r#"{"gross": "75000.50"}"#).unwrap();
        assert_eq!(request.gross, dec("75000.50"));
    }

    #[test]
    fn test_missing_gross_defaults_to_zero() {
        let request: PayrollRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.gross, Decimal::ZERO);
    }

    #[test]
    fn test_non_numeric_gross_defaults_to_zero() {
        for body in [
            r#"{"gross": null}"#,
            r#"{"gross": "abc"}"#,
            r#"{"gross": true}"#,
            r#"{"gross": [1, 2]}"#,
            r#"{"gross": {"amount": 5}}"#,
        ] {
            let request: PayrollRequest = serde_json::from_str(body).unwrap();
            assert_eq!(request.gross, Decimal::ZERO, "body: {}", body);
        }
    }

    #[test]
    fn test_negative_gross_is_passed_through() {
        let request: PayrollRequest = serde_json::from_str(r#"{"gross": -100}"#).unwrap();
        assert_eq!(request.gross, dec("-100"));
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(parse_gross(&json!("5e4")), dec("50000"));
        assert_eq!(parse_gross(&json!(5e4)), dec("50000"));
    }

    #[test]
    fn test_string_with_trailing_text_uses_leading_number() {
        assert_eq!(parse_gross(&json!("50000abc")), dec("50000"));
        assert_eq!(parse_gross(&json!("  12.5 thousand")), dec("12.5"));
        assert_eq!(parse_gross(&json!("1e3x")), dec("1000"));
        assert_eq!(parse_gross(&json!("45000.75.20")), dec("45000.75"));
    }

    #[test]
    fn test_partial_literals() {
        assert_eq!(parse_gross(&json!(".5")), dec("0.5"));
        assert_eq!(parse_gross(&json!("5.")), dec("5"));
        assert_eq!(parse_gross(&json!("+250")), dec("250"));
        assert_eq!(parse_gross(&json!("-250kg")), dec("-250"));
        assert_eq!(parse_gross(&json!("7e")), dec("7"));
        assert_eq!(parse_gross(&json!("7e-")), dec("7"));
        assert_eq!(parse_gross(&json!("2.5E-1")), dec("0.25"));
    }

    #[test]
    fn test_strings_without_leading_number_default_to_zero() {
        for text in ["", "   ", "abc50000", "KES 50000", ".", "-", "+.", "e5", "Infinity", "NaN"] {
            assert_eq!(parse_gross(&json!(text)), Decimal::ZERO, "text: {:?}", text);
        }
    }

    #[test]
    fn test_out_of_range_number_defaults_to_zero() {
        assert_eq!(parse_gross(&json!(1e300)), Decimal::ZERO);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let request: PayrollRequest =
            serde_json::from_str(r#"{"gross": 1000, "currency": "KES"}"#).unwrap();
        assert_eq!(request.gross, dec("1000"));
    }

    #[test]
    fn test_serializes_gross_as_number() {
        let json = serde_json::to_value(PayrollRequest::new(dec("50000"))).unwrap();
        assert_eq!(json["gross"].as_f64().unwrap(), 50000.0);
    }
}
