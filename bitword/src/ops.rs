//! Bitwise transformations of the stored value.
//!
//! Each function takes a value which is already masked to `width`
//! bits, the width itself (in bits, 0 to 64) and, where relevant,
//! an amount.  The result is always masked to `width`.  Shift
//! amounts of any size are accepted and saturate; rotation amounts
//! are reduced modulo the width.
use std::fmt::{self, Display, Formatter};

#[cfg(test)]
use test_strategy::Arbitrary;

use super::error::UnknownName;
use super::width::mask;


// The native shift operators panic (in debug builds) when the amount
// is the full width of the operand or more.
fn shl(value: u64, amount: u32) -> u64 {
    value.checked_shl(amount).unwrap_or(0)
}

fn shr(value: u64, amount: u32) -> u64 {
    value.checked_shr(amount).unwrap_or(0)
}

pub fn shift_left(value: u64, width: u32, amount: u32) -> u64 {
    shl(value, amount) & mask(width)
}

pub fn shift_right_logical(value: u64, width: u32, amount: u32) -> u64 {
    shr(value, amount) & mask(width)
}

/// Shifts right, filling the vacated bits with copies of the top
/// active bit.  Shifting a negative value by `width` or more yields
/// all ones.
pub fn shift_right_arithmetic(value: u64, width: u32, amount: u32) -> u64 {
    if width == 0 {
        return 0;
    }
    let m = mask(width);
    let value = value & m;
    if shr(value, width - 1) & 1 == 0 {
        return shift_right_logical(value, width, amount);
    }
    if amount >= width {
        m
    } else {
        shr(value, amount) | (m & !shr(m, amount))
    }
}

pub fn rotate_left(value: u64, width: u32, amount: u32) -> u64 {
    if width == 0 {
        return value;
    }
    let m = mask(width);
    let value = value & m;
    match amount % width {
        0 => value,
        k => (shl(value, k) | shr(value, width - k)) & m,
    }
}

pub fn rotate_right(value: u64, width: u32, amount: u32) -> u64 {
    if width == 0 {
        return value;
    }
    let m = mask(width);
    let value = value & m;
    match amount % width {
        0 => value,
        k => (shr(value, k) | shl(value, width - k)) & m,
    }
}

pub fn invert(value: u64, width: u32) -> u64 {
    !value & mask(width)
}

/// Mirrors the active bits: bit `j` of the result is bit
/// `width - 1 - j` of `value`.
pub fn reverse(value: u64, width: u32) -> u64 {
    if width == 0 {
        return 0;
    }
    shr((value & mask(width)).reverse_bits(), u64::BITS - width.min(u64::BITS))
}

pub fn clear() -> u64 {
    0
}

/// The operations a user can invoke on the stored value.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Shift left, filling with zeroes.
    Shl,
    /// Logical shift right, filling with zeroes.
    Lsr,
    /// Arithmetic shift right, filling with the sign bit.
    Asr,
    /// Rotate left.
    Rol,
    /// Rotate right.
    Ror,
    Invert,
    Reverse,
    Clear,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::Shl,
        Operation::Lsr,
        Operation::Asr,
        Operation::Rol,
        Operation::Ror,
        Operation::Invert,
        Operation::Reverse,
        Operation::Clear,
    ];

    /// Indicates whether the shift amount means anything to this
    /// operation.
    pub const fn takes_amount(&self) -> bool {
        matches!(
            self,
            Operation::Shl | Operation::Lsr | Operation::Asr | Operation::Rol | Operation::Ror
        )
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Operation::Shl => "shl",
            Operation::Lsr => "lsr",
            Operation::Asr => "asr",
            Operation::Rol => "rol",
            Operation::Ror => "ror",
            Operation::Invert => "invert",
            Operation::Reverse => "reverse",
            Operation::Clear => "clear",
        }
    }

    /// Applies the operation.  `amount` is ignored by operations
    /// which don't take one.
    #[must_use]
    pub fn apply(&self, value: u64, width: u32, amount: u32) -> u64 {
        match self {
            Operation::Shl => shift_left(value, width, amount),
            Operation::Lsr => shift_right_logical(value, width, amount),
            Operation::Asr => shift_right_arithmetic(value, width, amount),
            Operation::Rol => rotate_left(value, width, amount),
            Operation::Ror => rotate_right(value, width, amount),
            Operation::Invert => invert(value, width),
            Operation::Reverse => reverse(value, width),
            Operation::Clear => clear(),
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for Operation {
    type Error = UnknownName;
    fn try_from(s: &str) -> Result<Operation, UnknownName> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| UnknownName {
                kind: "operation",
                name: s.to_owned(),
            })
    }
}
