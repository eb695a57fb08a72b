//! Conversion between the stored value and its textual
//! representations.
//!
//! The stored value is always an unsigned magnitude.  Signedness is
//! purely a convention applied when reading or writing decimal text:
//! in [`SignMode::Signed`] a value whose top active bit is set is
//! displayed as the negative two's-complement number it encodes.
use std::fmt::{self, Display, Formatter};

use serde::{Serialize, Serializer};
#[cfg(test)]
use test_strategy::Arbitrary;

use super::error::{ParseError, UnknownName};
use super::width::{Width, MAX_BITS};


/// The textual bases in which the value is shown.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Base {
    Hex,
    Dec,
    Oct,
    Bin,
}

impl Base {
    pub const ALL: [Base; 4] = [Base::Hex, Base::Dec, Base::Oct, Base::Bin];

    pub const fn radix(&self) -> u32 {
        match self {
            Base::Hex => 16,
            Base::Dec => 10,
            Base::Oct => 8,
            Base::Bin => 2,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Base::Hex => "hex",
            Base::Dec => "dec",
            Base::Oct => "oct",
            Base::Bin => "bin",
        }
    }
}

impl Display for Base {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for Base {
    type Error = UnknownName;
    fn try_from(s: &str) -> Result<Base, UnknownName> {
        match s {
            "hex" => Ok(Base::Hex),
            "dec" => Ok(Base::Dec),
            "oct" => Ok(Base::Oct),
            "bin" => Ok(Base::Bin),
            _ => Err(UnknownName {
                kind: "field",
                name: s.to_owned(),
            }),
        }
    }
}

/// How decimal text is interpreted and produced.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum SignMode {
    #[default]
    Unsigned,
    Signed,
}

impl SignMode {
    pub const fn is_signed(&self) -> bool {
        matches!(self, SignMode::Signed)
    }
}

impl From<bool> for SignMode {
    fn from(signed: bool) -> SignMode {
        if signed {
            SignMode::Signed
        } else {
            SignMode::Unsigned
        }
    }
}

/// The displayed state of one bit slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct BitState {
    /// The slot lies inside the current width.  Inactive slots
    /// should be shown disabled.
    pub active: bool,
    /// The bit is one.  Never true for an inactive slot.
    pub set: bool,
}

/// Every representation of a value, as produced by [`format`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Representations {
    pub hex: String,
    pub dec: String,
    pub oct: String,
    pub bin: String,
    /// Indexed by bit number; `bits[0]` is the least significant bit.
    #[serde(serialize_with = "serialize_bit_states")]
    pub bits: [BitState; MAX_BITS],
}

impl Representations {
    pub fn text(&self, base: Base) -> &str {
        match base {
            Base::Hex => &self.hex,
            Base::Dec => &self.dec,
            Base::Oct => &self.oct,
            Base::Bin => &self.bin,
        }
    }
}

// serde only implements Serialize for arrays of up to 32 elements.
fn serialize_bit_states<S>(bits: &[BitState; MAX_BITS], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(bits.iter())
}

// Yields the magnitude modulo 2^64.  Widths never exceed 64 bits,
// so the bits lost to wrapping are ones that masking would discard
// anyway.
fn parse_magnitude(digits: &str, radix: u32) -> Result<u64, ParseError> {
    digits.chars().try_fold(0_u64, |acc, ch| {
        let digit = ch
            .to_digit(radix)
            .ok_or(ParseError::InvalidDigit { ch, radix })?;
        Ok(acc
            .wrapping_mul(u64::from(radix))
            .wrapping_add(u64::from(digit)))
    })
}

/// Parses a complete numeral.
///
/// Empty text means zero.  Only signed decimal text may carry a
/// leading minus sign; a lone `"-"` is an incomplete signed numeral
/// and also yields zero.
///
/// Hexadecimal, octal, binary and unsigned decimal text yields the
/// plain magnitude (modulo 2^64), which the caller masks to the
/// width when storing it.  Signed decimal text is converted to the two's-complement bit
/// pattern for `width`.  Values outside the range representable in
/// `width`, however large, are not rejected: they are truncated to
/// `width` bits.
pub fn parse(text: &str, base: Base, sign_mode: SignMode, width: Width) -> Result<u64, ParseError> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let signed_decimal = base == Base::Dec && sign_mode.is_signed();
    if negative && !signed_decimal {
        return Err(ParseError::UnexpectedSign);
    }
    if digits.is_empty() {
        return Ok(0);
    }
    let magnitude = parse_magnitude(digits, base.radix())?;
    if !signed_decimal {
        return Ok(magnitude);
    }
    // Values outside the signed range of `width` are truncated to
    // the low `width` bits of their two's complement.
    if negative {
        Ok(magnitude.wrapping_neg() & width.mask())
    } else {
        Ok(magnitude & width.mask())
    }
}

/// Interprets `value` (already masked to `width`) as a
/// two's-complement number.
pub fn sign_extend(value: u64, width: Width) -> i64 {
    let shift = u64::BITS - width.bits();
    ((value << shift) as i64) >> shift
}

/// Formats `value` in every representation.
pub fn format(value: u64, width: Width, sign_mode: SignMode) -> Representations {
    let value = value & width.mask();
    let dec = match sign_mode {
        SignMode::Unsigned => value.to_string(),
        SignMode::Signed => sign_extend(value, width).to_string(),
    };
    let mut bits = [BitState::default(); MAX_BITS];
    for (i, slot) in bits.iter_mut().enumerate() {
        let active = width.is_active(i);
        *slot = BitState {
            active,
            set: active && (value >> i) & 1 != 0,
        };
    }
    Representations {
        hex: format!("{value:X}"),
        dec,
        oct: format!("{value:o}"),
        bin: format!("{value:b}"),
        bits,
    }
}
