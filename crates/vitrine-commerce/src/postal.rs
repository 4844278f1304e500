//! Brazilian postal codes (CEP).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of digits in a complete CEP.
pub const POSTAL_CODE_DIGITS: usize = 8;

/// Length of the `DDDDD` prefix shown before the dash.
const PREFIX_DIGITS: usize = 5;

/// Errors from parsing a postal code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostalCodeError {
    /// The input did not contain exactly eight digits.
    #[error("CEP deve conter 8 dígitos")]
    WrongLength {
        /// How many digits were found.
        digits: usize,
    },
}

/// Keep only the ASCII digits of `input`.
pub fn postal_code_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Format free-form input as the user types it.
///
/// Non-digits are stripped. Up to five digits are returned as-is; longer
/// input becomes `DDDDD-DDD` and anything past the eighth digit is dropped.
///
/// ```
/// use vitrine_commerce::format_postal_code;
/// assert_eq!(format_postal_code("0131"), "0131");
/// assert_eq!(format_postal_code("01310100"), "01310-100");
/// assert_eq!(format_postal_code("013101009"), "01310-100");
/// ```
pub fn format_postal_code(input: &str) -> String {
    let digits = postal_code_digits(input);
    if digits.len() <= PREFIX_DIGITS {
        return digits;
    }
    let end = digits.len().min(POSTAL_CODE_DIGITS);
    format!("{}-{}", &digits[..PREFIX_DIGITS], &digits[PREFIX_DIGITS..end])
}

/// A validated eight-digit CEP, stored without punctuation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Parse any input that contains exactly eight digits.
    pub fn parse(input: &str) -> Result<Self, PostalCodeError> {
        let digits = postal_code_digits(input);
        if digits.len() != POSTAL_CODE_DIGITS {
            return Err(PostalCodeError::WrongLength {
                digits: digits.len(),
            });
        }
        Ok(Self(digits))
    }

    /// The eight digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `DDDDD-DDD` form.
    pub fn formatted(&self) -> String {
        format_postal_code(&self.0)
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for PostalCode {
    type Err = PostalCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PostalCode {
    type Error = PostalCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PostalCode> for String {
    fn from(code: PostalCode) -> Self {
        code.0
    }
}
