use thiserror::Error;

/// Money is represented as integer cents to avoid floating-point drift.
/// 1 unit = 100 cents, so Rs. 50.00 = 5000 cents.
pub type Cents = i64;

/// Format cents as a plain decimal string with two places.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Parse a decimal string into cents.
///
/// Accepts an optional leading `-`, whole units and up to any number of
/// decimals. Anything past the second decimal rounds half away from zero:
/// "12.345" -> 1235, "12.344" -> 1234.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };

    let (units_str, decimal_str) = match digits.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (digits, ""),
    };

    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }
    if !units_str.bytes().all(|b| b.is_ascii_digit())
        || !decimal_str.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str.parse().map_err(|_| ParseCentsError::Overflow)?
    };

    let mut fraction = decimal_str.bytes().map(|b| i64::from(b - b'0'));
    let tens = fraction.next().unwrap_or(0);
    let ones = fraction.next().unwrap_or(0);
    let round_up = fraction.next().is_some_and(|d| d >= 5);

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(tens * 10 + ones + i64::from(round_up)))
        .ok_or(ParseCentsError::Overflow)?;

    Ok(if negative { -cents } else { cents })
}

/// Sum amounts without wrapping. `None` when the total leaves the `Cents` range.
pub fn checked_total(amounts: impl IntoIterator<Item = Cents>) -> Option<Cents> {
    amounts
        .into_iter()
        .try_fold(0 as Cents, |total, amount| total.checked_add(amount))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCentsError {
    #[error("invalid money format")]
    InvalidFormat,

    #[error("amount is too large")]
    Overflow,
}
