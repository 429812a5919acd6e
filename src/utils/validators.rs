//! CPF and phone masking and validation
//!
//! Input masks are progressive: separators only appear once enough digits
//! exist for the segment they close. Every function strips non-digits first,
//! so formatting an already formatted value is a no-op.

use std::sync::OnceLock;
use regex::Regex;

/// Number of digits in a CPF
pub const CPF_LENGTH: usize = 11;

/// Maximum number of digits kept by the phone mask
pub const PHONE_MAX_DIGITS: usize = 11;

/// Minimum number of digits for a phone number to be accepted
pub const PHONE_MIN_DIGITS: usize = 10;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Keep only ASCII digits
pub fn only_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn truncated_digits(value: &str, max: usize) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).take(max).collect()
}

/// Mask a CPF as `000.000.000-00`
pub fn format_cpf(value: &str) -> String {
    let digits = truncated_digits(value, CPF_LENGTH);

    // Digits are ASCII, so byte slicing is char slicing here.
    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("{}.{}", &digits[..3], &digits[3..]),
        7..=9 => format!("{}.{}.{}", &digits[..3], &digits[3..6], &digits[6..]),
        _ => format!(
            "{}.{}.{}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..]
        ),
    }
}

/// Mask a phone number as `(99) 99999-0000`
pub fn format_phone(value: &str) -> String {
    let digits = truncated_digits(value, PHONE_MAX_DIGITS);

    match digits.len() {
        0 => String::new(),
        1..=2 => format!("({}", digits),
        3..=7 => format!("({}) {}", &digits[..2], &digits[2..]),
        _ => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
    }
}

/// Weighted-sum mod-11 check digit, weights counting down from `first_weight`
fn check_digit(digits: &[u32], first_weight: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (first_weight - i as u32))
        .sum();

    let rest = (sum * 10) % 11;
    if rest == 10 { 0 } else { rest }
}

/// Validate a Brazilian CPF, including both check digits
pub fn validate_cpf(value: &str) -> bool {
    let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != CPF_LENGTH {
        return false;
    }

    // 000.000.000-00, 111.111.111-11, ... pass the checksum but are never issued
    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    if check_digit(&digits[..9], 10) != digits[9] {
        return false;
    }

    check_digit(&digits[..10], 11) == digits[10]
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

/// Validate the `local@domain.tld` shape
pub fn validate_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Whether a phone input carries enough digits
pub fn validate_phone(value: &str) -> bool {
    only_digits(value).len() >= PHONE_MIN_DIGITS
}
