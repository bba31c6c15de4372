//! Gates: kinds that forward their signal to their links only when a test
//! on the level passes.

use level_world::{Difficulty, ObjectRef, Uid};
use std::str::FromStr;

use super::{default_process, noop, Behavior};
use crate::error::VarError;
use crate::graph::LevelLogic;
use crate::node::{NodeIndex, VarHandlers, VarType};

/// Forward `on` to the node's links if `test` passes.
fn gate(
    logic: &mut LevelLogic,
    index: NodeIndex,
    on: bool,
    test: fn(&LevelLogic, NodeIndex) -> bool,
) {
    let passed = test(logic, index);
    let node = logic.graph.node(index);
    tracing::debug!(uid = node.uid.0, kind = node.event_type.name(), on, passed, "gate checked");
    if passed {
        logic.propagate(index, on);
    }
}

// --- DifficultyGate ---------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DifficultyGateState {
    pub difficulty: Difficulty,
}

pub const DIFFICULTY_GATE: Behavior = Behavior {
    turn_on: difficulty_gate_turn_on,
    turn_off: difficulty_gate_turn_off,
    process: default_process,
    register_handlers: difficulty_gate_handlers,
};

fn difficulty_gate_turn_on(logic: &mut LevelLogic, index: NodeIndex) {
    gate(logic, index, true, difficulty_matches);
}

fn difficulty_gate_turn_off(logic: &mut LevelLogic, index: NodeIndex) {
    gate(logic, index, false, difficulty_matches);
}

fn difficulty_gate_handlers(handlers: &mut VarHandlers) {
    handlers.register("difficulty", VarType::Int, |node, value| {
        let raw = value.as_int()?;
        let difficulty = Difficulty::from_index(raw).ok_or(VarError::UnknownVariant {
            what: "difficulty",
            value: raw.to_string(),
        })?;
        node.payload_mut::<DifficultyGateState>()?.difficulty = difficulty;
        Ok(())
    });
}

fn difficulty_matches(logic: &LevelLogic, index: NodeIndex) -> bool {
    logic
        .graph
        .node(index)
        .payload::<DifficultyGateState>()
        .is_some_and(|s| s.difficulty == logic.world.settings.difficulty)
}

// --- ValidGate --------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidGateState {
    pub check_uid: Option<i32>,
}

pub const VALID_GATE: Behavior = Behavior {
    turn_on: valid_gate_turn_on,
    turn_off: valid_gate_turn_off,
    process: default_process,
    register_handlers: valid_gate_handlers,
};

fn valid_gate_turn_on(logic: &mut LevelLogic, index: NodeIndex) {
    gate(logic, index, true, object_is_valid);
}

fn valid_gate_turn_off(logic: &mut LevelLogic, index: NodeIndex) {
    gate(logic, index, false, object_is_valid);
}

fn valid_gate_handlers(handlers: &mut VarHandlers) {
    handlers.register("check_uid", VarType::Int, |node, value| {
        node.payload_mut::<ValidGateState>()?.check_uid = Some(value.as_int()?);
        Ok(())
    });
}

fn object_is_valid(logic: &LevelLogic, index: NodeIndex) -> bool {
    let node = logic.graph.node(index);
    let Some(check_uid) = node.payload::<ValidGateState>().and_then(|s| s.check_uid) else {
        tracing::warn!(uid = node.uid.0, "ValidGate has no check_uid");
        return false;
    };
    match logic.world.objects.resolve_uid(Uid(check_uid)) {
        None | Some(ObjectRef::Corpse(_)) => false,
        Some(ObjectRef::Entity(entity)) => entity.is_alive(),
        Some(_) => true,
    }
}

// --- EnvironmentGate --------------------------------------------------------

/// Runtime topology an environment gate tests for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentTest {
    Multi,
    Single,
    /// Listen or dedicated server.
    Server,
    Dedicated,
    Client,
}

impl FromStr for EnvironmentTest {
    type Err = VarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "multi" => Ok(EnvironmentTest::Multi),
            "single" => Ok(EnvironmentTest::Single),
            "server" => Ok(EnvironmentTest::Server),
            "dedicated" => Ok(EnvironmentTest::Dedicated),
            "client" => Ok(EnvironmentTest::Client),
            _ => Err(VarError::UnknownVariant {
                what: "environment",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnvironmentGateState {
    pub environment: Option<EnvironmentTest>,
}

pub const ENVIRONMENT_GATE: Behavior = Behavior {
    turn_on: environment_gate_turn_on,
    turn_off: noop,
    process: default_process,
    register_handlers: environment_gate_handlers,
};

fn environment_gate_turn_on(logic: &mut LevelLogic, index: NodeIndex) {
    gate(logic, index, true, environment_matches);
}

fn environment_gate_handlers(handlers: &mut VarHandlers) {
    handlers.register("environment", VarType::Enum("environment"), |node, value| {
        let environment = value.into_string()?.parse::<EnvironmentTest>()?;
        node.payload_mut::<EnvironmentGateState>()?.environment = Some(environment);
        Ok(())
    });
}

fn environment_matches(logic: &LevelLogic, index: NodeIndex) -> bool {
    let node = logic.graph.node(index);
    let environment = node.payload::<EnvironmentGateState>().and_then(|s| s.environment);
    let Some(environment) = environment else {
        tracing::warn!(uid = node.uid.0, "EnvironmentGate has no environment configured");
        return false;
    };
    let topology = logic.world.settings.topology;
    match environment {
        EnvironmentTest::Multi => topology.is_multiplayer(),
        EnvironmentTest::Single => !topology.is_multiplayer(),
        EnvironmentTest::Server => topology.is_server(),
        EnvironmentTest::Dedicated => topology.is_dedicated(),
        EnvironmentTest::Client => topology.is_client(),
    }
}

// --- InsideGate -------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InsideGateState {
    /// Trigger volume or room to test against.
    pub check_uid: Option<i32>,
    /// Object to test; the triggering object when unset.
    pub test_uid: Option<i32>,
}

pub const INSIDE_GATE: Behavior = Behavior {
    turn_on: inside_gate_turn_on,
    turn_off: inside_gate_turn_off,
    process: default_process,
    register_handlers: inside_gate_handlers,
};

fn inside_gate_turn_on(logic: &mut LevelLogic, index: NodeIndex) {
    gate(logic, index, true, object_is_inside);
}

fn inside_gate_turn_off(logic: &mut LevelLogic, index: NodeIndex) {
    gate(logic, index, false, object_is_inside);
}

fn inside_gate_handlers(handlers: &mut VarHandlers) {
    handlers.register("check_uid", VarType::Int, |node, value| {
        node.payload_mut::<InsideGateState>()?.check_uid = Some(value.as_int()?);
        Ok(())
    });
    handlers.register("test_uid", VarType::Int, |node, value| {
        node.payload_mut::<InsideGateState>()?.test_uid = Some(value.as_int()?);
        Ok(())
    });
}

fn object_is_inside(logic: &LevelLogic, index: NodeIndex) -> bool {
    let node = logic.graph.node(index);
    let uid = node.uid;
    let Some(state) = node.payload::<InsideGateState>() else {
        return false;
    };
    let Some(check_uid) = state.check_uid else {
        tracing::warn!(uid = uid.0, "InsideGate has no check_uid");
        return false;
    };

    let objects = &logic.world.objects;
    let tested = match state.test_uid {
        Some(test_uid) => objects.resolve_uid(Uid(test_uid)),
        None => objects.resolve(node.triggered_by_handle),
    };
    let Some(tested) = tested else {
        tracing::debug!(uid = uid.0, "InsideGate has no object to test");
        return false;
    };

    match objects.resolve_uid(Uid(check_uid)) {
        Some(ObjectRef::Trigger(trigger)) => {
            tested.position().is_some_and(|p| trigger.contains(&p))
        }
        Some(ObjectRef::Room(room)) => tested.room() == Some(room.uid),
        Some(other) => {
            tracing::warn!(
                uid = uid.0,
                check_uid,
                kind = ?other.kind(),
                "InsideGate region is not a trigger or room"
            );
            false
        }
        None => {
            tracing::warn!(uid = uid.0, check_uid, "InsideGate region does not exist");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_names() {
        assert_eq!("Multi".parse::<EnvironmentTest>(), Ok(EnvironmentTest::Multi));
        assert_eq!(" dedicated ".parse::<EnvironmentTest>(), Ok(EnvironmentTest::Dedicated));
        assert!(matches!(
            "lan".parse::<EnvironmentTest>(),
            Err(VarError::UnknownVariant { what: "environment", .. })
        ));
    }
}
