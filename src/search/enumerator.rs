//! Depth-first enumeration of postfix expressions.
//!
//! The expression under construction behaves like an odometer. Each position
//! holds an item; advancing a position steps through the constants, then the
//! back-references, then `i`, then the active operators, and carries into the
//! previous position once the operators are used up. Whenever the last item
//! is accepted and the budget allows, a new position is appended holding the
//! smallest operand, so every prefix is explored before its successors.
//!
//! A placed item is accepted when:
//! - for an operand, the stack is not already too tall to come back down to
//!   one value in the remaining positions,
//! - for an operator, there are enough operands for it and no pruning rule
//!   in [`crate::search::pruning`] rejects it.
//!
//! Every accepted expression with exactly one value on the stack is a
//! candidate formula.

use crate::ir::{Expression, Item};
use crate::search::config::ComplexityProfile;
use crate::search::pruning::operator_allowed;

/// Lazily walks every candidate formula a profile allows
#[derive(Debug)]
pub struct Enumerator<'a> {
    profile: &'a ComplexityProfile,
    items: Vec<Item>,
    /// Logical stack height after executing `items`
    height: i32,
    /// Whether the last item in `items` passed its checks
    accepted: bool,
    exhausted: bool,
}

impl<'a> Enumerator<'a> {
    /// A profile without operators yields only its single operands
    pub fn new(profile: &'a ComplexityProfile) -> Self {
        Self {
            profile,
            items: Vec::with_capacity(profile.max_items),
            height: 0,
            accepted: true,
            exhausted: false,
        }
    }

    /// Start again from the first candidate
    pub fn reset(&mut self) {
        self.items.clear();
        self.height = 0;
        self.accepted = true;
        self.exhausted = false;
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Move to the next candidate and borrow it.
    ///
    /// Returns `None` once the space is exhausted; further calls keep
    /// returning `None` until [`reset`](Self::reset).
    pub fn advance(&mut self) -> Option<&[Item]> {
        loop {
            if self.exhausted {
                return None;
            }
            if self.accepted && self.items.len() < self.profile.max_items {
                self.push(self.first_operand());
            } else if !self.step() {
                self.exhausted = true;
                return None;
            }
            self.accepted = self.check_last();
            if self.accepted && self.height == 1 {
                return Some(self.items.as_slice());
            }
        }
    }

    fn push(&mut self, item: Item) {
        self.height += item.stack_delta();
        self.items.push(item);
    }

    fn pop(&mut self) -> Option<Item> {
        let item = self.items.pop()?;
        self.height -= item.stack_delta();
        Some(item)
    }

    /// Advance the last position, carrying into earlier ones as needed.
    /// Returns false once the first position has run out of items.
    fn step(&mut self) -> bool {
        while let Some(last) = self.pop() {
            if let Some(next) = self.successor(last) {
                self.push(next);
                return true;
            }
        }
        false
    }

    fn check_last(&mut self) -> bool {
        let Some(last) = self.items.last().copied() else {
            return false;
        };
        if last.is_operand() {
            let remaining = (self.profile.max_items - self.items.len()) as i32;
            let max_reduction = remaining * (self.profile.max_arity() as i32 - 1);
            if self.height - max_reduction <= 1 {
                return true;
            }
            // Every other operand would leave the stack just as tall, so
            // skip straight to the operators.
            self.pop();
            let Some(op) = self.first_operator() else {
                return false;
            };
            self.push(op);
        }
        self.operator_fits()
    }

    fn operator_fits(&self) -> bool {
        let Some(op) = self.items.last().and_then(Item::operator) else {
            return false;
        };
        let before = self.height - op.stack_delta();
        before >= op.arity() as i32 && operator_allowed(&self.items, self.profile)
    }

    fn first_operand(&self) -> Item {
        if self.profile.constants > 0 {
            Item::Constant(0)
        } else if self.profile.max_back_reference > 0 {
            Item::PriorValue(0)
        } else {
            Item::Index
        }
    }

    fn first_operator(&self) -> Option<Item> {
        self.profile.operators.first().copied().map(Item::Operator)
    }

    /// The next item in enumeration order, or `None` after the last operator
    fn successor(&self, item: Item) -> Option<Item> {
        let profile = self.profile;
        match item {
            Item::Constant(k) if (k as usize) + 1 < profile.constants as usize => {
                Some(Item::Constant(k + 1))
            }
            Item::Constant(_) if profile.max_back_reference > 0 => Some(Item::PriorValue(0)),
            Item::Constant(_) => Some(Item::Index),
            Item::PriorValue(d) if (d as usize) + 1 < profile.max_back_reference as usize => {
                Some(Item::PriorValue(d + 1))
            }
            Item::PriorValue(_) => Some(Item::Index),
            Item::Index => self.first_operator(),
            Item::Operator(op) => {
                let position = profile.operators.iter().position(|&o| o == op)?;
                profile.operators.get(position + 1).copied().map(Item::Operator)
            }
        }
    }
}

impl Iterator for Enumerator<'_> {
    type Item = Expression;

    fn next(&mut self) -> Option<Expression> {
        self.advance().map(Expression::from_slice)
    }
}
