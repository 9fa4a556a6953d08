//! Display formatting for balances, amounts and sizes.
//!
//! Every function here is pure. Unparseable input never surfaces as an error
//! from the public formatters: [`format_balance`] echoes the input back and
//! [`format_amount`] falls back to `"0.00"`. The `try_` variants expose the
//! underlying [`ParseError`] for callers that want to know.

use crate::error::ParseError;
use crate::input::{number_to_string, BalanceInput};

const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;
const COMPACT_FLOOR: f64 = 10_000.0;

/// Fallback rendering for amounts that cannot be read as numbers.
pub const AMOUNT_FALLBACK: &str = "0.00";

/// Compact balance display.
///
/// - below 10,000: full value at 8 decimals
/// - 10,000 up to 1M: thousands with 1 decimal and a `K` suffix
/// - 1M up to 1B: millions with 2 decimals and an `M` suffix
/// - 1B and above: billions with 2 decimals and a `B` suffix
///
/// Trailing zeros (and a dangling decimal point) are stripped in every branch.
pub fn format_balance(balance: impl Into<BalanceInput>) -> String {
    let input = balance.into();
    try_format_balance(&input).unwrap_or_else(|_| input.to_string())
}

pub fn try_format_balance(input: &BalanceInput) -> Result<String, ParseError> {
    let num = input.parse()?;
    let abs = num.abs();

    let formatted = if abs >= BILLION {
        format!("{}B", strip_trailing_zeros(&to_fixed(num / BILLION, 2)))
    } else if abs >= MILLION {
        format!("{}M", strip_trailing_zeros(&to_fixed(num / MILLION, 2)))
    } else if abs >= COMPACT_FLOOR {
        format!("{}K", strip_trailing_zeros(&to_fixed(num / THOUSAND, 1)))
    } else {
        strip_trailing_zeros(&to_fixed(num, 8)).to_string()
    };
    Ok(formatted)
}

/// Full amount display with `,` thousands grouping and between 2 and 8
/// fractional digits.
pub fn format_amount(amount: impl Into<BalanceInput>) -> String {
    try_format_amount(&amount.into()).unwrap_or_else(|_| AMOUNT_FALLBACK.to_string())
}

pub fn try_format_amount(input: &BalanceInput) -> Result<String, ParseError> {
    let num = input.parse()?;
    Ok(format_grouped(num, 2, 8))
}

/// Human readable byte count, 1024 based.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

pub fn format_difficulty(difficulty: f64) -> String {
    format!("{:.4}", difficulty)
}

/// Transaction page under the explorer at `base`, e.g. [`EXPLORER_URL`].
///
/// [`EXPLORER_URL`]: crate::constants::EXPLORER_URL
pub fn explorer_tx_url(base: &str, txid: &str) -> String {
    format!("{}/tx/{}", base.trim_end_matches('/'), txid)
}

pub fn explorer_address_url(base: &str, address: &str) -> String {
    format!("{}/address/{}", base.trim_end_matches('/'), address)
}

/// Removes a trailing run of zeros, and the decimal point if the run
/// directly follows it.
pub fn strip_trailing_zeros(s: &str) -> &str {
    let trimmed = s.trim_end_matches('0');
    if trimmed.len() == s.len() {
        return s;
    }
    trimmed.strip_suffix('.').unwrap_or(trimmed)
}

/// Fixed-point rendering with exact halves rounded away from zero.
fn to_fixed(value: f64, digits: usize) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    if value.abs() >= 1e21 {
        return number_to_string(value);
    }

    let scale = 10f64.powi(digits as i32);
    let scaled = value * scale;
    // mul_add recovers the rounding error of the product; zero means `scaled` is exact
    if scaled.fract().abs() == 0.5 && value.mul_add(scale, -scaled) == 0.0 {
        let rounded = scaled.trunc() + scaled.signum();
        return format!("{:.*}", digits, rounded / scale);
    }
    format!("{:.*}", digits, value)
}

fn format_grouped(value: f64, min_frac: usize, max_frac: usize) -> String {
    let negative = value.is_sign_negative();
    let repr = format!("{}", value.abs());
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut int_digits: Vec<u8> = int_part.bytes().map(|b| b - b'0').collect();
    let mut frac_digits: Vec<u8> = frac_part.bytes().map(|b| b - b'0').collect();

    if frac_digits.len() > max_frac {
        let round_up = frac_digits[max_frac] >= 5;
        frac_digits.truncate(max_frac);
        if round_up && increment(&mut frac_digits) && increment(&mut int_digits) {
            int_digits.insert(0, 1);
        }
    }
    while frac_digits.len() > min_frac && frac_digits.last() == Some(&0) {
        frac_digits.pop();
    }
    frac_digits.resize(frac_digits.len().max(min_frac), 0);

    let mut out = String::with_capacity(int_digits.len() * 4 / 3 + frac_digits.len() + 2);
    if negative {
        out.push('-');
    }
    let len = int_digits.len();
    for (i, d) in int_digits.iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(char::from(b'0' + d));
    }
    out.push('.');
    out.extend(frac_digits.iter().map(|d| char::from(b'0' + d)));
    out
}

/// Adds one unit in the last place. Returns true when the carry runs off the
/// front.
fn increment(digits: &mut [u8]) -> bool {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return false;
        }
    }
    true
}
