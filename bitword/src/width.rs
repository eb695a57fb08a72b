//! The inspector works on words between one and eight bytes wide.
//! The stored value always lives in a `u64`; the [`Width`] says how
//! many of those bits are active.
use std::fmt::{self, Display, Formatter};

#[cfg(test)]
use test_strategy::Arbitrary;

use super::error::BadWidth;

/// The number of bit slots we report, whatever the active width.
pub const MAX_BITS: usize = 64;

/// Returns 2^bits - 1.  `bits` may be anything from 0 to 64
/// inclusive; larger values are treated as 64.
pub const fn mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1_u64 << bits) - 1
    }
}

/// The number of active bits in the word.  Always a whole number of
/// bytes, from 8 to 64 bits.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Width {
    #[cfg_attr(test, strategy(1u8..=8))]
    bytes: u8,
}

impl Width {
    pub const MIN: Width = Width { bytes: 1 };
    pub const MAX: Width = Width { bytes: 8 };

    pub const fn try_from_bytes(bytes: u8) -> Result<Width, BadWidth> {
        if bytes < Width::MIN.bytes || bytes > Width::MAX.bytes {
            Err(BadWidth(bytes))
        } else {
            Ok(Width { bytes })
        }
    }

    pub const fn bytes(&self) -> u8 {
        self.bytes
    }

    pub const fn bits(&self) -> u32 {
        self.bytes as u32 * 8
    }

    pub const fn mask(&self) -> u64 {
        mask(self.bits())
    }

    /// The most significant active bit, which is the sign bit when
    /// the value is interpreted as two's complement.
    pub const fn sign_bit(&self) -> u64 {
        1_u64 << (self.bits() - 1)
    }

    /// Bit `index` is active iff it is below the width.
    pub const fn is_active(&self, index: usize) -> bool {
        index < self.bits() as usize
    }
}

impl Default for Width {
    fn default() -> Width {
        Width { bytes: 4 }
    }
}

impl TryFrom<u8> for Width {
    type Error = BadWidth;
    fn try_from(bytes: u8) -> Result<Width, BadWidth> {
        Width::try_from_bytes(bytes)
    }
}

impl Display for Width {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} bits", self.bits())
    }
}
