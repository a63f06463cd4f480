//! Guess the next number in a sequence.
//!
//! The guesser searches for a reverse-Polish formula for `S(i)` in terms of
//! the position `i`, small integer constants and earlier values `S(i-k)`,
//! trying short formulas with few operators before longer ones. The first
//! formula that reproduces every known value is used to predict `S(n)`.

pub mod error;
pub mod ir;
pub mod search;
pub mod semantics;
pub mod sequence;

pub use error::{Error, Result};
