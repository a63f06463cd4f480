//! Intermediate representation for candidate formulas

pub mod expression;
pub mod types;

// Re-export commonly used types
pub use expression::{Expression, MAX_ITEMS_IN_EXPRESSION};
pub use types::{Item, OperatorKind};
