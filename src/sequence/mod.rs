//! Numeric sequences supplied by the user

pub mod input;
pub mod samples;

pub use input::{Request, parse_request, parse_sequence};
pub use samples::{SAMPLES, Sample};

use crate::error::{Error, Result};
use std::fmt;

/// Minimum number of known values needed before guessing makes sense
pub const MIN_SEQUENCE_LEN: usize = 2;

/// An immutable list of known values `S(0) .. S(n-1)`
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    values: Vec<f64>,
}

impl Sequence {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.len() < MIN_SEQUENCE_LEN {
            return Err(Error::SequenceTooShort(values.len()));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Known value at position `i`; `None` past the end
    pub fn get(&self, i: usize) -> Option<f64> {
        self.values.get(i).copied()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, value) in self.values.iter().enumerate() {
            if n > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", format_value(*value))?;
        }
        Ok(())
    }
}

/// Format a value without a trailing `.0` when it is integral
pub fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
