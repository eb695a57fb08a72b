//! The `bitword` crate holds the pieces of the bit inspector which
//! have real semantic content: a fixed-width value, conversion
//! between that value and its textual representations, the bitwise
//! operations which can be applied to it, and the predicates which
//! decide whether a partially-typed numeral is worth keeping.
//!
//! Nothing in here knows about windows, terminals or files.  The
//! `inspector` crate builds the stateful event pipeline on top of
//! this one.

mod error;
mod store;
mod width;

pub mod codec;
pub mod ops;
pub mod prelude;
pub mod validate;

pub use crate::error::*;
pub use crate::store::ValueStore;
pub use crate::width::{mask, Width, MAX_BITS};
