//! Concrete interpreter that checks a candidate formula against a sequence

use crate::ir::{Item, MAX_ITEMS_IN_EXPRESSION};
use crate::sequence::Sequence;

/// Outcome of checking one formula against the known values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Every known position matched (or could not be evaluated); carries the
    /// value the formula produces one step past the end
    Matched(f64),
    /// Some known position came out different
    Mismatched,
    /// No known position disagreed, but the formula lacks the history it
    /// needs to produce a prediction
    Inapplicable,
}

impl Verdict {
    pub fn prediction(&self) -> Option<f64> {
        match self {
            Verdict::Matched(value) => Some(*value),
            _ => None,
        }
    }
}

/// Reusable evaluator. Holds the operand stack so that checking millions of
/// candidates does not allocate.
#[derive(Debug)]
pub struct Evaluator {
    stack: Vec<f64>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            stack: Vec::with_capacity(MAX_ITEMS_IN_EXPRESSION),
        }
    }

    /// Run `items` as a postfix program for position `i`.
    ///
    /// Returns `None` when the position is inapplicable, i.e. the formula
    /// refers further back than the sequence reaches at `i`. The caller must
    /// pass a complete formula (stack height ends at exactly 1).
    pub fn value_at(&mut self, items: &[Item], sequence: &Sequence, i: usize) -> Option<f64> {
        self.stack.clear();
        for item in items {
            let value = match *item {
                Item::Constant(k) => k as f64 + 1.0,
                Item::Index => i as f64,
                Item::PriorValue(d) => {
                    let back = d as usize + 1;
                    if i < back {
                        return None;
                    }
                    sequence.get(i - back)?
                }
                Item::Operator(op) => {
                    let b = self.stack.pop()?;
                    let a = if op.arity() == 2 {
                        self.stack.pop()?
                    } else {
                        0.0
                    };
                    op.apply(a, b)
                }
            };
            self.stack.push(value);
        }
        debug_assert_eq!(self.stack.len(), 1, "evaluated an incomplete formula");
        self.stack.last().copied()
    }

    /// Check a complete formula against every known position and, if none
    /// disagree, evaluate it at the first unknown position.
    ///
    /// Comparison is exact `f64` equality. Non-finite intermediate results
    /// simply fail to match.
    pub fn evaluate(&mut self, items: &[Item], sequence: &Sequence) -> Verdict {
        for i in 0..=sequence.len() {
            let Some(value) = self.value_at(items, sequence, i) else {
                continue;
            };
            match sequence.get(i) {
                Some(known) if value != known => return Verdict::Mismatched,
                Some(_) => {}
                None => return Verdict::Matched(value),
            }
        }
        Verdict::Inapplicable
    }
}

/// Convenience wrapper around [`Evaluator::evaluate`] for one-off checks
pub fn evaluate(items: &[Item], sequence: &Sequence) -> Verdict {
    Evaluator::new().evaluate(items, sequence)
}
