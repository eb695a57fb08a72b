use std::error::Error;
use std::fmt::{self, Display, Formatter};

use bitword::prelude::*;

/// Something the user did to the inspector.  The presentation layer
/// turns widget notifications into these and hands them to
/// [`crate::Inspector::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The text of one of the representation fields changed.
    TextEdited { field: Base, text: String },
    /// The text of the shift amount field changed.
    ShiftAmountEdited { text: String },
    /// The user clicked on one of the 64 bit slots.
    BitToggled { index: usize },
    /// The user picked a new word width.
    WidthSelected { bytes: u8 },
    /// The user switched decimal display between signed and unsigned.
    SignModeToggled { signed: bool },
    /// The user asked for an operation.  When `amount` is `None`, the
    /// current contents of the shift amount field are used.
    OperationInvoked { op: Operation, amount: Option<i64> },
}

/// What became of an [`InputEvent`].
#[derive(Debug, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event was applied and the representations updated.
    Applied,
    /// The edit was kept as text but is incomplete, so the value is
    /// unchanged (e.g. a lone minus sign in signed decimal).
    Pending,
    /// The event was valid but had no effect (e.g. clicking an
    /// inactive bit, or a negative shift amount).
    Ignored,
    /// The event arrived while the inspector was itself updating the
    /// view, and so was dropped.
    Suppressed,
    /// The event was refused; the previous state is retained.
    Rejected(Rejection),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The text is not a plausible partial numeral for the field.
    InvalidText { field: Base, text: String },
    /// The text looked plausible but could not be parsed.
    Unparseable { field: Base, error: ParseError },
    /// The shift amount field may only contain decimal digits.
    InvalidAmount(String),
    /// There are only 64 bit slots.
    BitOutOfRange(usize),
    BadWidth(BadWidth),
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Rejection::InvalidText { field, text } => {
                write!(f, "{text:?} is not acceptable in the {field} field")
            }
            Rejection::Unparseable { field, error } => {
                write!(f, "cannot parse the {field} field: {error}")
            }
            Rejection::InvalidAmount(text) => {
                write!(f, "{text:?} is not a valid shift amount")
            }
            Rejection::BitOutOfRange(index) => {
                write!(f, "there is no bit {index}")
            }
            Rejection::BadWidth(e) => e.fmt(f),
        }
    }
}

impl Error for Rejection {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Rejection::Unparseable { error, .. } => Some(error),
            Rejection::BadWidth(e) => Some(e),
            _ => None,
        }
    }
}
