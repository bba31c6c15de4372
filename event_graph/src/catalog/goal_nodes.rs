//! Goal kinds: arithmetic on named goal counters and tests against them.

use super::{default_process, noop, Behavior};
use crate::error::{GoalError, VarError};
use crate::goals::{GoalOp, GoalTest, Operands};
use crate::graph::LevelLogic;
use crate::node::{NodeIndex, VarHandlers, VarType};

/// Configuration shared by `GoalMath` and `GoalGate`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoalNodeState {
    pub goal: String,
    pub operation: Option<GoalOp>,
    pub test: Option<GoalTest>,
    pub value: i32,
    /// Defaults to `value` when unset.
    pub value2: Option<i32>,
}

impl GoalNodeState {
    pub fn operands(&self) -> Operands {
        Operands::new(self.value, self.value2)
    }
}

fn unknown_variant(what: &'static str) -> impl Fn(GoalError) -> VarError {
    move |err| {
        let value = match err {
            GoalError::UnknownOperation(value) | GoalError::UnknownTest(value) => value,
            other => other.to_string(),
        };
        VarError::UnknownVariant { what, value }
    }
}

fn register_operands(handlers: &mut VarHandlers) {
    handlers.register("goal", VarType::Str, |node, value| {
        node.payload_mut::<GoalNodeState>()?.goal = value.into_string()?;
        Ok(())
    });
    handlers.register("value", VarType::Int, |node, value| {
        node.payload_mut::<GoalNodeState>()?.value = value.as_int()?;
        Ok(())
    });
    handlers.register("value2", VarType::Int, |node, value| {
        node.payload_mut::<GoalNodeState>()?.value2 = Some(value.as_int()?);
        Ok(())
    });
}

// --- GoalMath ---------------------------------------------------------------

pub const GOAL_MATH: Behavior = Behavior {
    turn_on: goal_math_turn_on,
    turn_off: noop,
    process: default_process,
    register_handlers: goal_math_handlers,
};

fn goal_math_handlers(handlers: &mut VarHandlers) {
    register_operands(handlers);
    handlers.register("operation", VarType::Enum("operation"), |node, value| {
        let op = value
            .into_string()?
            .parse::<GoalOp>()
            .map_err(unknown_variant("operation"))?;
        node.payload_mut::<GoalNodeState>()?.operation = Some(op);
        Ok(())
    });
}

fn goal_math_turn_on(logic: &mut LevelLogic, index: NodeIndex) {
    let node = logic.graph.node(index);
    let uid = node.uid;
    let Some(state) = node.payload::<GoalNodeState>() else {
        return;
    };
    let Some(op) = state.operation else {
        tracing::error!(uid = uid.0, goal = %state.goal, "GoalMath has no valid operation");
        return;
    };
    let goal = state.goal.clone();
    let operands = state.operands();

    let goals = &mut logic.world.goals;
    let mut found = false;

    if let Some(level_goal) = goals.find_level_goal_mut(&goal) {
        found = true;
        match op.apply(level_goal.count, level_goal.initial_value, operands) {
            Ok(count) => {
                tracing::debug!(
                    uid = uid.0,
                    %goal,
                    %op,
                    from = level_goal.count,
                    to = count,
                    "level goal updated"
                );
                level_goal.count = count;
            }
            Err(err) => {
                tracing::error!(
                    uid = uid.0,
                    %goal,
                    %op,
                    count = level_goal.count,
                    error = %err,
                    "level goal operation refused"
                );
            }
        }
    }

    if let Some(persistent) = goals.find_persistent_goal_mut(&goal) {
        found = true;
        match op.apply(persistent.count, persistent.initial_count, operands) {
            Ok(count) => {
                tracing::debug!(
                    uid = uid.0,
                    %goal,
                    %op,
                    from = persistent.count,
                    to = count,
                    "persistent goal updated"
                );
                persistent.count = count;
            }
            Err(err) => {
                tracing::error!(
                    uid = uid.0,
                    %goal,
                    %op,
                    count = persistent.count,
                    error = %err,
                    "persistent goal operation refused"
                );
            }
        }
    }

    if !found {
        let err = GoalError::MissingGoal(goal);
        tracing::warn!(uid = uid.0, error = %err, "GoalMath skipped");
    }
}

// --- GoalGate ---------------------------------------------------------------

pub const GOAL_GATE: Behavior = Behavior {
    turn_on: goal_gate_turn_on,
    turn_off: noop,
    process: default_process,
    register_handlers: goal_gate_handlers,
};

fn goal_gate_handlers(handlers: &mut VarHandlers) {
    register_operands(handlers);
    handlers.register("test_type", VarType::Enum("test_type"), |node, value| {
        let test = value
            .into_string()?
            .parse::<GoalTest>()
            .map_err(unknown_variant("test_type"))?;
        node.payload_mut::<GoalNodeState>()?.test = Some(test);
        Ok(())
    });
}

fn goal_gate_turn_on(logic: &mut LevelLogic, index: NodeIndex) {
    let node = logic.graph.node(index);
    let uid = node.uid;
    let Some(state) = node.payload::<GoalNodeState>() else {
        return;
    };
    let Some(test) = state.test else {
        tracing::error!(uid = uid.0, goal = %state.goal, "GoalGate has no valid test_type");
        return;
    };

    let goals = &logic.world.goals;
    let counter = goals
        .find_level_goal(&state.goal)
        .map(|g| (g.count, g.initial_value))
        .or_else(|| {
            goals
                .find_persistent_goal(&state.goal)
                .map(|g| (g.count, g.initial_count))
        });
    let Some((count, initial)) = counter else {
        let err = GoalError::MissingGoal(state.goal.clone());
        tracing::warn!(uid = uid.0, error = %err, "GoalGate skipped");
        return;
    };

    let passed = test.passes(count, initial, state.operands());
    tracing::debug!(uid = uid.0, goal = %state.goal, %test, count, passed, "goal test evaluated");
    if passed {
        logic.propagate(index, true);
    }
}
