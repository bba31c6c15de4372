//! Goal comparison tests.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Operands;
use crate::error::GoalError;

/// Named comparisons of a goal counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalTest {
    Equal,
    Nequal,
    Gt,
    Lt,
    Geq,
    Leq,
    /// Inclusive range check.
    Between,
    Odd,
    Even,
    Divisible,
    Ltinit,
    Gtinit,
    Leinit,
    Geinit,
    Eqinit,
}

impl GoalTest {
    pub const ALL: &'static [GoalTest] = &[
        GoalTest::Equal,
        GoalTest::Nequal,
        GoalTest::Gt,
        GoalTest::Lt,
        GoalTest::Geq,
        GoalTest::Leq,
        GoalTest::Between,
        GoalTest::Odd,
        GoalTest::Even,
        GoalTest::Divisible,
        GoalTest::Ltinit,
        GoalTest::Gtinit,
        GoalTest::Leinit,
        GoalTest::Geinit,
        GoalTest::Eqinit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GoalTest::Equal => "equal",
            GoalTest::Nequal => "nequal",
            GoalTest::Gt => "gt",
            GoalTest::Lt => "lt",
            GoalTest::Geq => "geq",
            GoalTest::Leq => "leq",
            GoalTest::Between => "between",
            GoalTest::Odd => "odd",
            GoalTest::Even => "even",
            GoalTest::Divisible => "divisible",
            GoalTest::Ltinit => "ltinit",
            GoalTest::Gtinit => "gtinit",
            GoalTest::Leinit => "leinit",
            GoalTest::Geinit => "geinit",
            GoalTest::Eqinit => "eqinit",
        }
    }

    /// Evaluate the comparison. `Err` means the test was refused.
    pub fn evaluate(
        &self,
        count: i32,
        initial: i32,
        operands: Operands,
    ) -> Result<bool, GoalError> {
        let value = operands.value;
        let passed = match self {
            GoalTest::Equal => count == value,
            GoalTest::Nequal => count != value,
            GoalTest::Gt => count > value,
            GoalTest::Lt => count < value,
            GoalTest::Geq => count >= value,
            GoalTest::Leq => count <= value,
            GoalTest::Between => {
                let (low, high) = operands.range();
                (low..=high).contains(&count)
            }
            GoalTest::Odd => count % 2 != 0,
            GoalTest::Even => count % 2 == 0,
            GoalTest::Divisible => {
                if value == 0 {
                    return Err(GoalError::DivideByZero);
                }
                count.wrapping_rem(value) == 0
            }
            GoalTest::Ltinit => count < initial,
            GoalTest::Gtinit => count > initial,
            GoalTest::Leinit => count <= initial,
            GoalTest::Geinit => count >= initial,
            GoalTest::Eqinit => count == initial,
        };
        Ok(passed)
    }

    /// Evaluate, treating a refusal as a failed test.
    pub fn passes(&self, count: i32, initial: i32, operands: Operands) -> bool {
        match self.evaluate(count, initial, operands) {
            Ok(passed) => passed,
            Err(err) => {
                tracing::warn!(test = self.name(), count, error = %err, "goal test refused");
                false
            }
        }
    }
}

impl FromStr for GoalTest {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        GoalTest::ALL
            .iter()
            .copied()
            .find(|test| test.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GoalError::UnknownTest(s.to_string()))
    }
}

impl std::fmt::Display for GoalTest {
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
    fn test_comparisons() {
        assert!(GoalTest::Equal.passes(3, 0, ops(3)));
        assert!(GoalTest::Nequal.passes(3, 0, ops(4)));
        assert!(GoalTest::Gt.passes(5, 0, ops(4)));
        assert!(!GoalTest::Gt.passes(4, 0, ops(4)));
        assert!(GoalTest::Lt.passes(3, 0, ops(4)));
        assert!(GoalTest::Geq.passes(4, 0, ops(4)));
        assert!(GoalTest::Leq.passes(4, 0, ops(4)));
    }

    #[test]
    fn test_between_is_inclusive() {
        let range = Operands::new(2, Some(8));
        assert!(GoalTest::Between.passes(2, 0, range));
        assert!(GoalTest::Between.passes(5, 0, range));
        assert!(GoalTest::Between.passes(8, 0, range));
        assert!(!GoalTest::Between.passes(1, 0, range));
        assert!(!GoalTest::Between.passes(9, 0, range));
    }

    #[test]
    fn test_parity_and_divisibility() {
        assert!(GoalTest::Odd.passes(-3, 0, ops(0)));
        assert!(GoalTest::Even.passes(-4, 0, ops(0)));
        assert!(GoalTest::Divisible.passes(12, 0, ops(4)));
        assert!(!GoalTest::Divisible.passes(13, 0, ops(4)));
        assert!(GoalTest::Divisible.passes(i32::MIN, 0, ops(-1)));
    }

    #[test]
    fn test_divisible_by_zero_fails() {
        assert_eq!(GoalTest::Divisible.evaluate(10, 0, ops(0)), Err(GoalError::DivideByZero));
        assert!(!GoalTest::Divisible.passes(10, 0, ops(0)));
    }

    #[test]
    fn test_relative_to_initial() {
        assert!(GoalTest::Ltinit.passes(2, 5, ops(0)));
        assert!(GoalTest::Gtinit.passes(6, 5, ops(0)));
        assert!(GoalTest::Leinit.passes(5, 5, ops(0)));
        assert!(GoalTest::Geinit.passes(5, 5, ops(0)));
        assert!(GoalTest::Eqinit.passes(5, 5, ops(0)));
        assert!(!GoalTest::Eqinit.passes(4, 5, ops(0)));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("between".parse::<GoalTest>(), Ok(GoalTest::Between));
        assert_eq!("GeInit".parse::<GoalTest>(), Ok(GoalTest::Geinit));
        assert!("approx".parse::<GoalTest>().is_err());
    }
}
