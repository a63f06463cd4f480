//! Semantics of candidate formulas: evaluation against a known sequence

pub mod concrete;

// Re-export main functionality
pub use concrete::{Evaluator, Verdict, evaluate};
