//! Canonicalization rules for operator placement.
//!
//! Each rule looks at the last few items of a partial expression whose final
//! item is the operator just placed, and reports whether that placement
//! produces a shape that is equivalent to some other expression the
//! enumerator visits anyway. Operands are compared structurally (kind and
//! parameter), never by value.
//!
//! Adding or removing a rule changes which of several equivalent formulas
//! gets reported first.

use crate::ir::{Item, OperatorKind};
use crate::search::config::ComplexityProfile;

use OperatorKind::{Add, Divide, Multiply, Square, SquareRoot, Subtract};

/// Returns true if the operator at the end of `items` may stay there
pub fn operator_allowed(items: &[Item], profile: &ComplexityProfile) -> bool {
    !(same_class_chain(items)
        || doubled_operand(items, profile)
        || constant_arithmetic(items, profile)
        || self_division(items)
        || commutative_out_of_order(items)
        || cancelling_pair(items)
        || square_root_inverse(items))
}

fn last_operator(items: &[Item]) -> Option<OperatorKind> {
    items.last().and_then(Item::operator)
}

/// The two items just before the final operator, if there are two
fn operand_pair(items: &[Item]) -> Option<(Item, Item)> {
    match items {
        [.., a, b, _] => Some((*a, *b)),
        _ => None,
    }
}

/// `op1 x op2` with both operators from the same class.
///
/// `+x+` = `x++`, `-x-` = `x+-`, `+x-` = `x-+`, `-x+` = `x--`, and likewise
/// for `*` and `/`, so only the second ordering is explored.
pub fn same_class_chain(items: &[Item]) -> bool {
    let [.., Item::Operator(first), middle, Item::Operator(second)] = items else {
        return false;
    };
    middle.is_operand()
        && ((first.is_additive() && second.is_additive())
            || (first.is_multiplicative() && second.is_multiplicative()))
}

/// `x x +` is `x 2 *` when multiply and the constant 2 are available;
/// `x x *` is `x ^2` when square is active.
pub fn doubled_operand(items: &[Item], profile: &ComplexityProfile) -> bool {
    let covered = match last_operator(items) {
        Some(Add) => profile.has_operator(Multiply) && profile.constants >= 2,
        Some(Multiply) => profile.has_operator(Square),
        _ => false,
    };
    covered && matches!(operand_pair(items), Some((a, b)) if a.is_operand() && a == b)
}

/// Two constants combined by `+`, `-` or `*` whose result is itself one of
/// the profile's constants.
pub fn constant_arithmetic(items: &[Item], profile: &ComplexityProfile) -> bool {
    let Some(op @ (Add | Subtract | Multiply)) = last_operator(items) else {
        return false;
    };
    let Some((Item::Constant(a), Item::Constant(b))) = operand_pair(items) else {
        return false;
    };
    let value = op.apply(a as f64 + 1.0, b as f64 + 1.0);
    (1.0..=profile.constants as f64).contains(&value)
}

/// `x x /` is always 1.
pub fn self_division(items: &[Item]) -> bool {
    last_operator(items) == Some(Divide)
        && matches!(operand_pair(items), Some((a, b)) if a.is_operand() && a == b)
}

/// Of `a b +` and `b a +` (and `*`) only the ordering with `a <= b` is kept.
/// The enumerator reaches `a b` before `b a`, so the kept form has already
/// been tried by the time the other turns up.
pub fn commutative_out_of_order(items: &[Item]) -> bool {
    matches!(last_operator(items), Some(Add | Multiply))
        && matches!(operand_pair(items), Some((a, b)) if a.is_operand() && b.is_operand() && a > b)
}

/// `a + a -`, `a - a +`, `a * a /` and `a / a *` leave the stack as it was.
pub fn cancelling_pair(items: &[Item]) -> bool {
    let [.., a, Item::Operator(first), b, Item::Operator(second)] = items else {
        return false;
    };
    a.is_operand()
        && a == b
        && matches!(
            (first, second),
            (Add, Subtract) | (Subtract, Add) | (Multiply, Divide) | (Divide, Multiply)
        )
}

/// `sqrt` straight after `^2`, or `^2` straight after `sqrt`.
pub fn square_root_inverse(items: &[Item]) -> bool {
    matches!(
        items,
        [.., Item::Operator(Square), Item::Operator(SquareRoot)]
            | [.., Item::Operator(SquareRoot), Item::Operator(Square)]
    )
}
