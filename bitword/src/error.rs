//! Basic error reporting.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use super::width::Width;

/// Represents a request for a word width which the inspector does
/// not support.  The payload is the requested number of bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BadWidth(pub u8);

impl Error for BadWidth {}

impl Display for BadWidth {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "word width of {} bytes is not supported (it must be between {} and {})",
            self.0,
            Width::MIN.bytes(),
            Width::MAX.bytes()
        )
    }
}

/// Represents a failure to parse a complete numeral.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The text contains a character which is not a digit in the
    /// radix being parsed.
    InvalidDigit { ch: char, radix: u32 },
    /// The text has a leading minus sign but negative numbers are
    /// not acceptable here (non-decimal bases, or unsigned decimal).
    UnexpectedSign,
}

impl Error for ParseError {}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ParseError::InvalidDigit { ch, radix } => {
                write!(f, "{ch:?} is not a valid base-{radix} digit")
            }
            ParseError::UnexpectedSign => f.write_str("a negative value is not allowed here"),
        }
    }
}

/// Represents a failure to look up a field or operation by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

impl Display for UnknownName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "unknown {} name '{}'", self.kind, self.name)
    }
}

impl Error for UnknownName {}
