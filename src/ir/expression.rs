//! Postfix expressions built from [`Item`]s

use crate::ir::types::{Item, OperatorKind};
use std::fmt;

/// Hard ceiling on expression length. Anything longer would take far too
/// long to enumerate.
pub const MAX_ITEMS_IN_EXPRESSION: usize = 20;

/// A reverse-Polish formula for `S(i)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Expression {
    items: Vec<Item>,
}

impl Expression {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn from_slice(items: &[Item]) -> Self {
        Self {
            items: items.to_vec(),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Stack height after executing every item, or `None` if some operator
    /// would pop from an empty stack
    pub fn stack_height(&self) -> Option<i32> {
        let mut height = 0i32;
        for item in &self.items {
            if let Some(op) = item.operator() {
                if height < op.arity() as i32 {
                    return None;
                }
            }
            height += item.stack_delta();
        }
        Some(height)
    }

    /// A complete formula leaves exactly one value on the stack
    pub fn is_complete(&self) -> bool {
        self.stack_height() == Some(1)
    }

    /// Render the formula in conventional infix notation with every binary
    /// operation parenthesised. Returns `None` for incomplete expressions.
    pub fn to_infix(&self) -> Option<String> {
        if !self.is_complete() {
            return None;
        }

        // Each entry carries whether it needs brackets when nested
        let mut stack: Vec<(String, bool)> = Vec::with_capacity(self.items.len());
        for item in &self.items {
            match item {
                Item::Operator(op) if op.arity() == 1 => {
                    let (operand, compound) = stack.pop()?;
                    let rendered = match op {
                        OperatorKind::SquareRoot => format!("sqrt({})", operand),
                        _ if compound => format!("({}){}", operand, op.symbol()),
                        _ => format!("{}{}", operand, op.symbol()),
                    };
                    stack.push((rendered, false));
                }
                Item::Operator(op) => {
                    let (rhs, rhs_compound) = stack.pop()?;
                    let (lhs, lhs_compound) = stack.pop()?;
                    let rhs = if rhs_compound { format!("({})", rhs) } else { rhs };
                    let lhs = if lhs_compound { format!("({})", lhs) } else { lhs };
                    stack.push((format!("{} {} {}", lhs, op.symbol(), rhs), true));
                }
                operand => stack.push((operand.to_string(), false)),
            }
        }
        stack.pop().map(|(text, _)| text)
    }
}

impl From<Vec<Item>> for Expression {
    fn from(items: Vec<Item>) -> Self {
        Self::new(items)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, item) in self.items.iter().enumerate() {
            if n > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}
