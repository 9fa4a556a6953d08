use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric display input as handed over by the backend or a form field:
/// either an already-typed number or raw text that still has to be parsed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BalanceInput {
    Number(f64),
    Text(String),
}

impl BalanceInput {
    /// Reads the input as a finite decimal.
    ///
    /// Text is read the lenient way a webview reads user input: leading
    /// whitespace is skipped and the longest numeric prefix is taken, so
    /// `"12.5 HEMP"` reads as `12.5`. Anything that ends up infinite or NaN is
    /// rejected.
    pub fn parse(&self) -> Result<f64, ParseError> {
        match self {
            BalanceInput::Number(n) if n.is_nan() => {
                Err(ParseError::NotANumber(number_to_string(*n)))
            }
            BalanceInput::Number(n) if n.is_infinite() => {
                Err(ParseError::NonFinite(number_to_string(*n)))
            }
            BalanceInput::Number(n) => Ok(*n),
            BalanceInput::Text(s) => parse_decimal_prefix(s),
        }
    }
}

impl fmt::Display for BalanceInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceInput::Number(n) => write!(f, "{}", number_to_string(*n)),
            BalanceInput::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for BalanceInput {
    fn from(s: &str) -> Self {
        BalanceInput::Text(s.to_string())
    }
}

impl From<String> for BalanceInput {
    fn from(s: String) -> Self {
        BalanceInput::Text(s)
    }
}

impl From<&String> for BalanceInput {
    fn from(s: &String) -> Self {
        BalanceInput::Text(s.clone())
    }
}

impl From<f64> for BalanceInput {
    fn from(n: f64) -> Self {
        BalanceInput::Number(n)
    }
}

impl From<u64> for BalanceInput {
    fn from(n: u64) -> Self {
        BalanceInput::Number(n as f64)
    }
}

impl From<i64> for BalanceInput {
    fn from(n: i64) -> Self {
        BalanceInput::Number(n as f64)
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn parse_decimal_prefix(raw: &str) -> Result<f64, ParseError> {
    let s = raw.trim_start();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }

    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return Err(ParseError::NonFinite(raw.to_string()));
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return Err(ParseError::NotANumber(raw.to_string()));
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let value: f64 = s[..end]
        .parse()
        .map_err(|_| ParseError::NotANumber(raw.to_string()))?;

    if !value.is_finite() {
        return Err(ParseError::NonFinite(raw.to_string()));
    }
    Ok(value)
}

/// Shortest round-trip rendering of a number, switching to exponent form
/// outside `[1e-6, 1e21)` the way the webview prints numbers.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{}", n);
    }

    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(BalanceInput::from("12345").parse(), Ok(12345.0));
        assert_eq!(BalanceInput::from("-0.5").parse(), Ok(-0.5));
        assert_eq!(BalanceInput::from(".25").parse(), Ok(0.25));
        assert_eq!(BalanceInput::from("1e3").parse(), Ok(1000.0));
        assert_eq!(BalanceInput::from(42u64).parse(), Ok(42.0));
    }

    #[test]
    fn test_parse_takes_numeric_prefix() {
        assert_eq!(BalanceInput::from("  12.5 HEMP").parse(), Ok(12.5));
        assert_eq!(BalanceInput::from("7.").parse(), Ok(7.0));
        assert_eq!(BalanceInput::from("3e").parse(), Ok(3.0));
        assert_eq!(BalanceInput::from("3e+x").parse(), Ok(3.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(BalanceInput::from("").parse(), Err(ParseError::Empty));
        assert_eq!(BalanceInput::from("   ").parse(), Err(ParseError::Empty));
        assert!(matches!(
            BalanceInput::from("abc").parse(),
            Err(ParseError::NotANumber(_))
        ));
        assert!(matches!(
            BalanceInput::from("--").parse(),
            Err(ParseError::NotANumber(_))
        ));
        assert!(matches!(
            BalanceInput::from(".").parse(),
            Err(ParseError::NotANumber(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert!(matches!(
            BalanceInput::from("Infinity").parse(),
            Err(ParseError::NonFinite(_))
        ));
        assert!(matches!(
            BalanceInput::from("-Infinity").parse(),
            Err(ParseError::NonFinite(_))
        ));
        assert!(matches!(
            BalanceInput::from("1e400").parse(),
            Err(ParseError::NonFinite(_))
        ));
        assert!(matches!(
            BalanceInput::from(f64::NAN).parse(),
            Err(ParseError::NotANumber(_))
        ));
    }

    #[test]
    fn test_number_to_string() {
        assert_eq!(number_to_string(1.0), "1");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(1.5), "1.5");
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1e-7), "1e-7");
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
        assert_eq!(number_to_string(f64::NAN), "NaN");
    }

    #[test]
    fn test_display_echoes_text() {
        assert_eq!(BalanceInput::from("abc").to_string(), "abc");
        assert_eq!(BalanceInput::from(2.5).to_string(), "2.5");
    }
}
