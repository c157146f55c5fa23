//! Cell address parsing and formatting.
//!
//! Converts between spreadsheet-style addresses (e.g., "A1", "B2", "AA100")
//! and 1-based column/row numbers.
//!
//! # Examples
//!
//! ```ignore
//! let addr = Address::parse("B3").unwrap();
//! assert_eq!(addr.col, 2);
//! assert_eq!(addr.row, 3);
//! assert_eq!(addr.to_string(), "B3");
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::error::GridError;

/// Matches a well-formed address. Uppercase letters only; lookups are exact.
fn address_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Z]+)(?<numbers>[0-9]+)$").expect("address regex must compile")
    })
}

/// A cell address: column number derived from the letters and the row number,
/// both 1-based.
///
/// A parsed address may still name a position outside any grid (`A0`,
/// `ZZ999`); resolving it is the grid's job.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Address {
    pub row: usize,
    pub col: usize,
}

impl Address {
    pub fn new(col: usize, row: usize) -> Address {
        Address { row, col }
    }

    /// Parse an address matching `^[A-Z]+[0-9]+$`.
    /// Returns None if the input is malformed or does not fit in `usize`.
    pub fn parse(name: &str) -> Option<Address> {
        let caps = address_re().captures(name)?;
        let col = Self::letters_to_col(&caps["letters"])?;
        let row = caps["numbers"].parse::<usize>().ok()?;
        Some(Address::new(col, row))
    }

    /// Column letters for the column number (1 -> A, 26 -> Z, 27 -> AA).
    /// Column 0 has no letters and yields an empty string.
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }

    /// Column number for uppercase letters (A -> 1, AA -> 27).
    pub fn letters_to_col(letters: &str) -> Option<usize> {
        if letters.is_empty() {
            return None;
        }
        let mut acc = 0usize;
        for c in letters.bytes() {
            if !c.is_ascii_uppercase() {
                return None;
            }
            let digit = (c - b'A') as usize + 1;
            acc = acc.checked_mul(26)?.checked_add(digit)?;
        }
        Some(acc)
    }
}

impl std::str::FromStr for Address {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| GridError::InvalidAddress(s.to_string()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Address::col_to_letters(self.col), self.row)
    }
}
