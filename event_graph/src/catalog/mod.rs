//! Node-kind catalog.
//!
//! Each kind is a [`Behavior`]: a set of plain functions for `turn_on`,
//! `turn_off`, `process` and property registration. [`behavior`] maps every
//! [`EventType`] to its entry; the match is exhaustive, so a new kind cannot be
//! added without deciding its behaviour. Per-kind configuration lives in the
//! node's [`NodeState`] payload.

mod effects;
mod gates;
mod goal_nodes;
mod relay;

pub use effects::*;
pub use gates::*;
pub use goal_nodes::*;
pub use relay::*;

use crate::graph::LevelLogic;
use crate::node::{EventType, NodeIndex, VarHandlers};

/// Kind-specific configuration and state carried by a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeState {
    /// Kinds with nothing to configure.
    Empty,
    SetVar(SetVarState),
    DifficultyGate(DifficultyGateState),
    HudMessage(HudMessageState),
    PlayVideo(PlayVideoState),
    SetLevelHardness(LevelHardnessState),
    Sequence(SequenceState),
    RemoveLink(RemoveLinkState),
    ValidGate(ValidGateState),
    GoalMath(GoalNodeState),
    GoalGate(GoalNodeState),
    EnvironmentGate(EnvironmentGateState),
    InsideGate(InsideGateState),
}

impl NodeState {
    /// Default payload for a kind.
    pub fn for_type(event_type: EventType) -> Self {
        match event_type {
            EventType::SetVar => NodeState::SetVar(SetVarState::default()),
            EventType::DifficultyGate => NodeState::DifficultyGate(DifficultyGateState::default()),
            EventType::HudMessage => NodeState::HudMessage(HudMessageState::default()),
            EventType::PlayVideo => NodeState::PlayVideo(PlayVideoState::default()),
            EventType::SetLevelHardness => {
                NodeState::SetLevelHardness(LevelHardnessState::default())
            }
            EventType::Sequence => NodeState::Sequence(SequenceState::default()),
            EventType::RemoveLink => NodeState::RemoveLink(RemoveLinkState::default()),
            EventType::ValidGate => NodeState::ValidGate(ValidGateState::default()),
            EventType::GoalMath => NodeState::GoalMath(GoalNodeState::default()),
            EventType::GoalGate => NodeState::GoalGate(GoalNodeState::default()),
            EventType::EnvironmentGate => {
                NodeState::EnvironmentGate(EnvironmentGateState::default())
            }
            EventType::InsideGate => NodeState::InsideGate(InsideGateState::default()),
            EventType::Stock(_)
            | EventType::CloneEntity
            | EventType::SetCollisionPlayer
            | EventType::SwitchRandom
            | EventType::ClearQueued
            | EventType::FixedDelay
            | EventType::AddLink => NodeState::Empty,
        }
    }
}

/// Typed access to one variant of [`NodeState`].
pub trait NodePayload: Sized {
    fn from_state(state: &NodeState) -> Option<&Self>;
    fn from_state_mut(state: &mut NodeState) -> Option<&mut Self>;
}

macro_rules! node_payload {
    ($($ty:ty => $($variant:ident)|+;)*) => {
        $(
            impl NodePayload for $ty {
                fn from_state(state: &NodeState) -> Option<&Self> {
                    match state {
                        $(NodeState::$variant(s) => Some(s),)+
                        _ => None,
                    }
                }

                fn from_state_mut(state: &mut NodeState) -> Option<&mut Self> {
                    match state {
                        $(NodeState::$variant(s) => Some(s),)+
                        _ => None,
                    }
                }
            }
        )*
    };
}

node_payload! {
    SetVarState => SetVar;
    DifficultyGateState => DifficultyGate;
    HudMessageState => HudMessage;
    PlayVideoState => PlayVideo;
    LevelHardnessState => SetLevelHardness;
    SequenceState => Sequence;
    RemoveLinkState => RemoveLink;
    ValidGateState => ValidGate;
    GoalNodeState => GoalMath | GoalGate;
    EnvironmentGateState => EnvironmentGate;
    InsideGateState => InsideGate;
}

/// Signal handler of a kind.
pub type SignalFn = fn(&mut LevelLogic, NodeIndex);

/// Dispatch entry for one kind.
pub struct Behavior {
    pub turn_on: SignalFn,
    pub turn_off: SignalFn,
    /// Called every tick while the node has delayed work; returns whether a
    /// signal was delivered.
    pub process: fn(&mut LevelLogic, NodeIndex) -> bool,
    /// Kind-specific property handlers, registered after the base ones.
    pub register_handlers: fn(&mut VarHandlers),
}

pub(crate) fn noop(_: &mut LevelLogic, _: NodeIndex) {}

pub(crate) fn no_handlers(_: &mut VarHandlers) {}

pub(crate) fn default_process(logic: &mut LevelLogic, index: NodeIndex) -> bool {
    logic.process_delay(index)
}

fn stock_turn_on(logic: &mut LevelLogic, index: NodeIndex) {
    logic.apply_stock(index, true);
}

fn stock_turn_off(logic: &mut LevelLogic, index: NodeIndex) {
    logic.apply_stock(index, false);
}

const STOCK: Behavior = Behavior {
    turn_on: stock_turn_on,
    turn_off: stock_turn_off,
    process: default_process,
    register_handlers: no_handlers,
};

/// Look up the dispatch entry for a kind.
pub fn behavior(event_type: EventType) -> &'static Behavior {
    match event_type {
        EventType::Stock(_) => &STOCK,
        EventType::SetVar => &SET_VAR,
        EventType::CloneEntity => &CLONE_ENTITY,
        EventType::SetCollisionPlayer => &SET_COLLISION_PLAYER,
        EventType::SwitchRandom => &SWITCH_RANDOM,
        EventType::DifficultyGate => &DIFFICULTY_GATE,
        EventType::HudMessage => &HUD_MESSAGE,
        EventType::PlayVideo => &PLAY_VIDEO,
        EventType::SetLevelHardness => &SET_LEVEL_HARDNESS,
        EventType::Sequence => &SEQUENCE,
        EventType::ClearQueued => &CLEAR_QUEUED,
        EventType::RemoveLink => &REMOVE_LINK,
        EventType::FixedDelay => &FIXED_DELAY,
        EventType::AddLink => &ADD_LINK,
        EventType::ValidGate => &VALID_GATE,
        EventType::GoalMath => &GOAL_MATH,
        EventType::GoalGate => &GOAL_GATE,
        EventType::EnvironmentGate => &ENVIRONMENT_GATE,
        EventType::InsideGate => &INSIDE_GATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::StockKind;

    #[test]
    fn test_every_kind_has_state_matching_payload() {
        assert!(matches!(NodeState::for_type(EventType::Sequence), NodeState::Sequence(_)));
        assert!(matches!(NodeState::for_type(EventType::GoalGate), NodeState::GoalGate(_)));
        assert_eq!(
            NodeState::for_type(EventType::Stock(StockKind::Explode)),
            NodeState::Empty
        );
    }

    #[test]
    fn test_goal_payload_shared_by_math_and_gate() {
        let math = NodeState::for_type(EventType::GoalMath);
        let gate = NodeState::for_type(EventType::GoalGate);
        assert!(GoalNodeState::from_state(&math).is_some());
        assert!(GoalNodeState::from_state(&gate).is_some());
        assert!(SequenceState::from_state(&math).is_none());
    }

    #[test]
    fn test_handler_registration_per_kind() {
        let mut handlers = VarHandlers::new();
        (behavior(EventType::GoalMath).register_handlers)(&mut handlers);
        let names: Vec<_> = handlers.names().collect();
        assert_eq!(names, vec!["goal", "operation", "value", "value2"]);

        let mut handlers = VarHandlers::new();
        (behavior(EventType::FixedDelay).register_handlers)(&mut handlers);
        assert!(handlers.is_empty());
    }
}
