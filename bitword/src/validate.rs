//! Predicates deciding whether a partially-typed field is worth
//! keeping.
//!
//! These do not check that the text is a complete, in-range
//! numeral; only that the user could plausibly be on the way to
//! typing one.  An edit which fails these checks should be discarded
//! and the field left as it was.

use super::codec::{Base, SignMode};

fn all_digits(text: &str, radix: u32) -> bool {
    text.chars().all(|ch| ch.is_digit(radix))
}

/// Decides whether `text` is an acceptable intermediate state for a
/// representation field.  Only signed decimal may carry a leading
/// minus sign, and it may consist of nothing else.
pub fn is_acceptable(text: &str, base: Base, sign_mode: SignMode) -> bool {
    match (base, sign_mode) {
        (Base::Dec, SignMode::Signed) => {
            all_digits(text.strip_prefix('-').unwrap_or(text), base.radix())
        }
        _ => all_digits(text, base.radix()),
    }
}

/// Decides whether `text` is acceptable for the shift amount field.
/// An empty field is allowed while typing; otherwise it must be a
/// non-negative decimal integer.
pub fn is_acceptable_amount(text: &str) -> bool {
    all_digits(text, 10)
}
