//! Core types for the postfix expression representation

use std::fmt;

/// Arithmetic operators understood by the evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperatorKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    Square,
    Cube,
    SquareRoot,
    /// Decimal digit of `a` at position `b`, counted from the units digit
    DigitFromRight,
    /// Decimal digit of `a` at position `b`, counted from the leading digit
    DigitFromLeft,
    Modulo,
}

impl OperatorKind {
    /// Every operator the registry knows about, in canonical order
    pub const ALL: [OperatorKind; 10] = [
        OperatorKind::Add,
        OperatorKind::Subtract,
        OperatorKind::Multiply,
        OperatorKind::Divide,
        OperatorKind::Square,
        OperatorKind::Cube,
        OperatorKind::SquareRoot,
        OperatorKind::DigitFromRight,
        OperatorKind::DigitFromLeft,
        OperatorKind::Modulo,
    ];

    /// Number of values popped from the stack
    pub fn arity(&self) -> usize {
        match self {
            OperatorKind::Square | OperatorKind::Cube | OperatorKind::SquareRoot => 1,
            _ => 2,
        }
    }

    /// Net change in stack height when this operator executes
    pub fn stack_delta(&self) -> i32 {
        1 - self.arity() as i32
    }

    /// Display token used in reverse-Polish output
    pub fn symbol(&self) -> &'static str {
        match self {
            OperatorKind::Add => "+",
            OperatorKind::Subtract => "-",
            OperatorKind::Multiply => "*",
            OperatorKind::Divide => "/",
            OperatorKind::Square => "^2",
            OperatorKind::Cube => "^3",
            OperatorKind::SquareRoot => "sqrt",
            OperatorKind::DigitFromRight => "rdigit",
            OperatorKind::DigitFromLeft => "ldigit",
            OperatorKind::Modulo => "mod",
        }
    }

    /// Apply the operator. `a` is the deeper operand, `b` the top of stack;
    /// unary operators ignore `a`.
    ///
    /// Domain errors are not trapped: division by zero, square roots of
    /// negatives and logarithms of non-positive values come back as
    /// infinities or NaN, which never compare equal to a sequence value.
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            OperatorKind::Add => a + b,
            OperatorKind::Subtract => a - b,
            OperatorKind::Multiply => a * b,
            OperatorKind::Divide => a / b,
            OperatorKind::Square => b * b,
            OperatorKind::Cube => b * b * b,
            OperatorKind::SquareRoot => b.sqrt(),
            OperatorKind::DigitFromRight => digit_from_right(a, b),
            OperatorKind::DigitFromLeft => digit_from_right(a, a.log10().floor() - b),
            OperatorKind::Modulo => a % b,
        }
    }

    /// Whether this operator is `+` or `-`
    pub fn is_additive(&self) -> bool {
        matches!(self, OperatorKind::Add | OperatorKind::Subtract)
    }

    /// Whether this operator is `*` or `/`
    pub fn is_multiplicative(&self) -> bool {
        matches!(self, OperatorKind::Multiply | OperatorKind::Divide)
    }
}

// Digit 0 is the units digit. Truncation matches an integer cast, so the
// digits of a negative number come back negative.
fn digit_from_right(a: f64, position: f64) -> f64 {
    (a / 10f64.powf(position)).trunc() % 10.0
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::str::FromStr for OperatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "+" | "add" | "plus" => Ok(OperatorKind::Add),
            "-" | "sub" | "subtract" | "minus" => Ok(OperatorKind::Subtract),
            "*" | "mul" | "multiply" | "times" => Ok(OperatorKind::Multiply),
            "/" | "div" | "divide" => Ok(OperatorKind::Divide),
            "^2" | "sq" | "square" => Ok(OperatorKind::Square),
            "^3" | "cube" => Ok(OperatorKind::Cube),
            "sqrt" | "root" => Ok(OperatorKind::SquareRoot),
            "rdigit" | "digit-from-right" => Ok(OperatorKind::DigitFromRight),
            "ldigit" | "digit-from-left" => Ok(OperatorKind::DigitFromLeft),
            "mod" | "%" | "modulo" => Ok(OperatorKind::Modulo),
            _ => Err(format!(
                "Unknown operator: '{}'. Valid options: + - * / ^2 ^3 sqrt rdigit ldigit mod",
                s
            )),
        }
    }
}

/// One symbol of a postfix expression.
///
/// Variant order is significant: the derived `Ord` sorts by kind first
/// (`Constant < PriorValue < Index < Operator`) and then by parameter, which
/// is the order the enumerator counts in and the order the commutative
/// pruning rule relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Item {
    /// Pushes the literal `k + 1`
    Constant(u8),
    /// Pushes `S(i - d - 1)`
    PriorValue(u8),
    /// Pushes the current position `i`
    Index,
    /// Pops `arity` values and pushes the result
    Operator(OperatorKind),
}

impl Item {
    pub fn is_operator(&self) -> bool {
        matches!(self, Item::Operator(_))
    }

    pub fn is_operand(&self) -> bool {
        !self.is_operator()
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Item::Constant(_))
    }

    /// The operator carried by this item, if any
    pub fn operator(&self) -> Option<OperatorKind> {
        match self {
            Item::Operator(op) => Some(*op),
            _ => None,
        }
    }

    /// Net change in stack height when this item executes
    pub fn stack_delta(&self) -> i32 {
        match self {
            Item::Operator(op) => op.stack_delta(),
            _ => 1,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Constant(k) => write!(f, "{}", *k as u32 + 1),
            Item::PriorValue(d) => write!(f, "S(i-{})", *d as u32 + 1),
            Item::Index => write!(f, "i"),
            Item::Operator(op) => write!(f, "{}", op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_arity() {
        assert_eq!(OperatorKind::Add.arity(), 2);
        assert_eq!(OperatorKind::Square.arity(), 1);
        assert_eq!(OperatorKind::SquareRoot.arity(), 1);
        assert_eq!(OperatorKind::DigitFromLeft.arity(), 2);
        assert_eq!(OperatorKind::Cube.stack_delta(), 0);
        assert_eq!(OperatorKind::Divide.stack_delta(), -1);
    }

    #[test]
    fn test_binary_arithmetic() {
        assert_eq!(OperatorKind::Add.apply(3.0, 4.0), 7.0);
        assert_eq!(OperatorKind::Subtract.apply(3.0, 4.0), -1.0);
        assert_eq!(OperatorKind::Multiply.apply(3.0, 4.0), 12.0);
        assert_eq!(OperatorKind::Divide.apply(3.0, 4.0), 0.75);
        assert_eq!(OperatorKind::Modulo.apply(17.0, 5.0), 2.0);
    }

    #[test]
    fn test_unary_ignores_first_operand() {
        assert_eq!(OperatorKind::Square.apply(100.0, 3.0), 9.0);
        assert_eq!(OperatorKind::Cube.apply(-7.0, 2.0), 8.0);
        assert_eq!(OperatorKind::SquareRoot.apply(0.0, 49.0), 7.0);
    }

    #[test]
    fn test_domain_errors_are_not_trapped() {
        assert!(OperatorKind::Divide.apply(1.0, 0.0).is_infinite());
        assert!(OperatorKind::Divide.apply(0.0, 0.0).is_nan());
        assert!(OperatorKind::SquareRoot.apply(0.0, -4.0).is_nan());
        assert!(OperatorKind::Modulo.apply(3.0, 0.0).is_nan());
        assert!(OperatorKind::DigitFromLeft.apply(-5.0, 0.0).is_nan());
    }

    #[test]
    fn test_digit_from_right() {
        assert_eq!(OperatorKind::DigitFromRight.apply(4321.0, 0.0), 1.0);
        assert_eq!(OperatorKind::DigitFromRight.apply(4321.0, 1.0), 2.0);
        assert_eq!(OperatorKind::DigitFromRight.apply(4321.0, 3.0), 4.0);
        assert_eq!(OperatorKind::DigitFromRight.apply(4321.0, 4.0), 0.0);
    }

    #[test]
    fn test_digit_from_left() {
        assert_eq!(OperatorKind::DigitFromLeft.apply(4321.0, 0.0), 4.0);
        assert_eq!(OperatorKind::DigitFromLeft.apply(4321.0, 1.0), 3.0);
        assert_eq!(OperatorKind::DigitFromLeft.apply(4321.0, 3.0), 1.0);
        assert_eq!(OperatorKind::DigitFromLeft.apply(7.0, 0.0), 7.0);
    }

    #[test]
    fn test_operator_from_str() {
        assert_eq!("+".parse::<OperatorKind>().unwrap(), OperatorKind::Add);
        assert_eq!("sub".parse::<OperatorKind>().unwrap(), OperatorKind::Subtract);
        assert_eq!("^2".parse::<OperatorKind>().unwrap(), OperatorKind::Square);
        assert_eq!("SQRT".parse::<OperatorKind>().unwrap(), OperatorKind::SquareRoot);
        assert_eq!("ldigit".parse::<OperatorKind>().unwrap(), OperatorKind::DigitFromLeft);
        assert!("pow".parse::<OperatorKind>().is_err());
    }

    #[test]
    fn test_symbol_round_trips_through_from_str() {
        for op in OperatorKind::ALL {
            assert_eq!(op.symbol().parse::<OperatorKind>().unwrap(), op);
        }
    }

    #[test]
    fn test_item_kind_order() {
        assert!(Item::Constant(8) < Item::PriorValue(0));
        assert!(Item::PriorValue(4) < Item::Index);
        assert!(Item::Index < Item::Operator(OperatorKind::Add));
        assert!(Item::PriorValue(0) < Item::PriorValue(1));
        assert!(Item::Constant(0) < Item::Constant(1));
    }

    #[test]
    fn test_item_display() {
        assert_eq!(format!("{}", Item::Constant(0)), "1");
        assert_eq!(format!("{}", Item::Constant(8)), "9");
        assert_eq!(format!("{}", Item::PriorValue(0)), "S(i-1)");
        assert_eq!(format!("{}", Item::Index), "i");
        assert_eq!(format!("{}", Item::Operator(OperatorKind::Cube)), "^3");
    }

    #[test]
    fn test_item_stack_delta() {
        assert_eq!(Item::Constant(3).stack_delta(), 1);
        assert_eq!(Item::Index.stack_delta(), 1);
        assert_eq!(Item::Operator(OperatorKind::Multiply).stack_delta(), -1);
        assert_eq!(Item::Operator(OperatorKind::SquareRoot).stack_delta(), 0);
    }
}
