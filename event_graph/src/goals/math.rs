//! Goal arithmetic.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{checked, Operands};
use crate::error::GoalError;

/// Named arithmetic operations applied to a goal counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Reverse divide: `value / counter`.
    Rdiv,
    Mod,
    Pow,
    Neg,
    Abs,
    /// Clamp into `[min(value, value2), max(value, value2)]`.
    Clamp,
    Max,
    Min,
    Set,
    /// Restore the counter's initial value.
    Reset,
}

impl GoalOp {
    pub const ALL: &'static [GoalOp] = &[
        GoalOp::Add,
        GoalOp::Sub,
        GoalOp::Mul,
        GoalOp::Div,
        GoalOp::Rdiv,
        GoalOp::Mod,
        GoalOp::Pow,
        GoalOp::Neg,
        GoalOp::Abs,
        GoalOp::Clamp,
        GoalOp::Max,
        GoalOp::Min,
        GoalOp::Set,
        GoalOp::Reset,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GoalOp::Add => "add",
            GoalOp::Sub => "sub",
            GoalOp::Mul => "mul",
            GoalOp::Div => "div",
            GoalOp::Rdiv => "rdiv",
            GoalOp::Mod => "mod",
            GoalOp::Pow => "pow",
            GoalOp::Neg => "neg",
            GoalOp::Abs => "abs",
            GoalOp::Clamp => "clamp",
            GoalOp::Max => "max",
            GoalOp::Min => "min",
            GoalOp::Set => "set",
            GoalOp::Reset => "reset",
        }
    }

    /// Compute the new counter value.
    pub fn apply(&self, count: i32, initial: i32, operands: Operands) -> Result<i32, GoalError> {
        let value = operands.value;
        match self {
            GoalOp::Add => checked(count.checked_add(value)),
            GoalOp::Sub => checked(count.checked_sub(value)),
            GoalOp::Mul => checked(count.checked_mul(value)),
            GoalOp::Div => {
                if value == 0 {
                    return Err(GoalError::DivideByZero);
                }
                checked(count.checked_div(value))
            }
            GoalOp::Rdiv => {
                if count == 0 {
                    return Err(GoalError::DivideByZero);
                }
                checked(value.checked_div(count))
            }
            GoalOp::Mod => {
                if value == 0 {
                    return Err(GoalError::DivideByZero);
                }
                checked(count.checked_rem(value))
            }
            GoalOp::Pow => {
                let exponent =
                    u32::try_from(value).map_err(|_| GoalError::NegativeExponent(value))?;
                checked(count.checked_pow(exponent))
            }
            GoalOp::Neg => checked(count.checked_neg()),
            GoalOp::Abs => checked(count.checked_abs()),
            GoalOp::Clamp => {
                let (low, high) = operands.range();
                Ok(count.clamp(low, high))
            }
            GoalOp::Max => Ok(count.max(value)),
            GoalOp::Min => Ok(count.min(value)),
            GoalOp::Set => Ok(value),
            GoalOp::Reset => Ok(initial),
        }
    }
}

impl FromStr for GoalOp {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        GoalOp::ALL
            .iter()
            .copied()
            .find(|op| op.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GoalError::UnknownOperation(s.to_string()))
    }
}

impl std::fmt::Display for GoalOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(value: i32) -> Operands {
        Operands::new(value, None)
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(GoalOp::Add.apply(5, 0, ops(3)), Ok(8));
        assert_eq!(GoalOp::Sub.apply(5, 0, ops(7)), Ok(-2));
        assert_eq!(GoalOp::Mul.apply(5, 0, ops(-3)), Ok(-15));
        assert_eq!(GoalOp::Div.apply(17, 0, ops(5)), Ok(3));
        assert_eq!(GoalOp::Rdiv.apply(4, 0, ops(20)), Ok(5));
        assert_eq!(GoalOp::Mod.apply(17, 0, ops(5)), Ok(2));
        assert_eq!(GoalOp::Pow.apply(3, 0, ops(4)), Ok(81));
        assert_eq!(GoalOp::Pow.apply(3, 0, ops(0)), Ok(1));
    }

    #[test]
    fn test_unary_and_selection() {
        assert_eq!(GoalOp::Neg.apply(5, 0, ops(0)), Ok(-5));
        assert_eq!(GoalOp::Abs.apply(-9, 0, ops(0)), Ok(9));
        assert_eq!(GoalOp::Max.apply(2, 0, ops(6)), Ok(6));
        assert_eq!(GoalOp::Min.apply(2, 0, ops(6)), Ok(2));
        assert_eq!(GoalOp::Set.apply(2, 0, ops(6)), Ok(6));
        assert_eq!(GoalOp::Reset.apply(42, 7, ops(6)), Ok(7));
    }

    #[test]
    fn test_clamp_uses_both_operands() {
        assert_eq!(GoalOp::Clamp.apply(15, 0, Operands::new(0, Some(10))), Ok(10));
        assert_eq!(GoalOp::Clamp.apply(-3, 0, Operands::new(10, Some(0))), Ok(0));
        assert_eq!(GoalOp::Clamp.apply(4, 0, Operands::new(0, Some(10))), Ok(4));
    }

    #[test]
    fn test_refusals() {
        assert_eq!(GoalOp::Div.apply(5, 0, ops(0)), Err(GoalError::DivideByZero));
        assert_eq!(GoalOp::Mod.apply(5, 0, ops(0)), Err(GoalError::DivideByZero));
        assert_eq!(GoalOp::Rdiv.apply(0, 0, ops(5)), Err(GoalError::DivideByZero));
        assert_eq!(GoalOp::Pow.apply(2, 0, ops(-1)), Err(GoalError::NegativeExponent(-1)));
        assert_eq!(GoalOp::Add.apply(i32::MAX, 0, ops(1)), Err(GoalError::Overflow));
        assert_eq!(GoalOp::Neg.apply(i32::MIN, 0, ops(0)), Err(GoalError::Overflow));
        assert_eq!(GoalOp::Div.apply(i32::MIN, 0, ops(-1)), Err(GoalError::Overflow));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("add".parse::<GoalOp>(), Ok(GoalOp::Add));
        assert_eq!("RDIV".parse::<GoalOp>(), Ok(GoalOp::Rdiv));
        assert_eq!(
            "sqrt".parse::<GoalOp>(),
            Err(GoalError::UnknownOperation("sqrt".into()))
        );
    }
}
