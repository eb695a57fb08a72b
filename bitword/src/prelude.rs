//! The prelude exports the types which a user of the bit inspector
//! core will almost always need.
pub use super::codec::{format, parse, Base, BitState, Representations, SignMode};
pub use super::error::*;
pub use super::ops::Operation;
pub use super::store::ValueStore;
pub use super::width::{mask, Width};
