//! Goal evaluator - pure arithmetic operations and comparison tests over an
//! integer goal counter and its recorded initial value.
//!
//! Every function here is stateless. Refusals (division by zero, negative
//! exponents, overflow) are returned as [`GoalError`] and the caller keeps the
//! counter unchanged.

mod compare;
mod math;

pub use compare::*;
pub use math::*;

use crate::error::GoalError;

/// Operands for one goal operation or test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operands {
    pub value: i32,
    /// Second operand, used by range-style operations.
    pub value2: i32,
}

impl Operands {
    /// `value2` defaults to `value` when not configured.
    pub fn new(value: i32, value2: Option<i32>) -> Self {
        Self {
            value,
            value2: value2.unwrap_or(value),
        }
    }

    /// Both operands ordered as `(low, high)`.
    pub fn range(&self) -> (i32, i32) {
        if self.value <= self.value2 {
            (self.value, self.value2)
        } else {
            (self.value2, self.value)
        }
    }
}

pub(crate) fn checked(result: Option<i32>) -> Result<i32, GoalError> {
    result.ok_or(GoalError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value2_defaults_to_value() {
        let ops = Operands::new(4, None);
        assert_eq!(ops.value2, 4);
    }

    #[test]
    fn test_range_is_ordered() {
        assert_eq!(Operands::new(8, Some(2)).range(), (2, 8));
        assert_eq!(Operands::new(2, Some(8)).range(), (2, 8));
    }
}
