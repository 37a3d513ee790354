//! Digit filtering and the range check for the chosen number.
//!
//! These are plain functions over `&str` with no terminal or state
//! dependencies, so the reducer in `start.rs` and the tests can call them
//! directly.

use thiserror::Error;

/// Smallest number the player may choose.
pub const MIN_NUMBER: u32 = 1;
/// Largest number the player may choose.
pub const MAX_NUMBER: u32 = 99;

/// Why a buffer was not accepted as a number.
///
/// Every variant ends up as the same "Invalid number!" alert. The variants
/// exist so the log records what actually went wrong.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidNumber {
    #[error("no number was entered")]
    Empty,
    #[error("`{0}` is not a base-10 integer")]
    Unparseable(String),
    #[error("{0} is outside {}..={}", MIN_NUMBER, MAX_NUMBER)]
    OutOfRange(u64),
}

/// Keep only the ASCII digits of `raw`, in their original order.
///
/// Total over any input: letters, signs, whitespace and non-ASCII digits
/// (e.g. `'٣'`) are all dropped.
pub fn filter_digits(raw: &str) -> String {
    // `char::is_ascii_digit` matches exactly '0'..='9'. `is_numeric` would
    // also let through other scripts' digits, which `u32::from_str` rejects.
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Parse the input buffer as the player's choice.
///
/// Accepts exactly the integers in `MIN_NUMBER..=MAX_NUMBER`. Leading zeros
/// are fine ("07" is 7); "0", "00" and anything above 99 are not.
pub fn parse_choice(buffer: &str) -> Result<u32, InvalidNumber> {
    if buffer.is_empty() {
        return Err(InvalidNumber::Empty);
    }
    // Parse into `u64` first so "123" is reported as out of range rather than
    // as a parse failure. Only absurdly long buffers overflow `u64`.
    let value: u64 = buffer
        .parse()
        .map_err(|_| InvalidNumber::Unparseable(buffer.to_string()))?;

    if value < u64::from(MIN_NUMBER) || value > u64::from(MAX_NUMBER) {
        return Err(InvalidNumber::OutOfRange(value));
    }
    // The range check above guarantees this fits.
    Ok(value as u32)
}
