//! Event nodes - the vertices of the level logic graph.
//!
//! A node owns its identity, its ordered outgoing links, its delay state and
//! the per-kind payload. Behaviour is not stored on the node: the node's
//! [`EventType`] selects an entry in the catalog's dispatch table.

mod kind;
mod vars;

pub use kind::*;
pub use vars::*;

use level_world::{GameClock, ObjectHandle, Timestamp, Uid};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, NodePayload, NodeState};
use crate::error::VarError;

/// Position of a node in its graph, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    pub fn get(&self) -> usize {
        self.0
    }
}

/// Outstanding deferred activation of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DelayState {
    pub timestamp: Timestamp,
    /// Signal to deliver when the timestamp elapses.
    pub pending: Option<bool>,
}

impl DelayState {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some() && self.timestamp.valid()
    }

    /// Schedule a deferred signal. Returns true if it replaced one already pending.
    pub fn schedule(&mut self, clock: &GameClock, delay_ms: u64, on: bool) -> bool {
        let replaced = self.is_pending();
        self.timestamp.set(clock, delay_ms);
        self.pending = Some(on);
        replaced
    }

    /// Drop any pending signal; an already scheduled callback will not fire.
    pub fn cancel(&mut self) {
        self.timestamp.invalidate();
        self.pending = None;
    }

    /// Take the pending signal if its countdown has elapsed.
    pub fn take_due(&mut self, clock: &GameClock) -> Option<bool> {
        if !self.timestamp.elapsed(clock) {
            return None;
        }
        let on = self.pending.take();
        self.timestamp.invalidate();
        on
    }
}

/// One vertex of the event graph.
#[derive(Debug, Clone)]
pub struct EventNode {
    pub handle: ObjectHandle,
    pub uid: Uid,
    pub name: String,
    pub event_type: EventType,

    /// Outgoing links, in authored order. Duplicates are allowed.
    pub links: Vec<ObjectHandle>,

    pub delay_seconds: f32,
    pub delay: DelayState,

    /// Object that caused the last activation.
    pub triggered_by_handle: ObjectHandle,
    /// Trigger the last activation originated from.
    pub trigger_handle: ObjectHandle,

    /// Last signal delivered to the node.
    pub on_state: bool,

    pub state: NodeState,
    handlers: VarHandlers,
    pub(crate) creation_index: u64,
}

impl EventNode {
    /// Create a node with the default payload for its kind. Handlers are not
    /// registered until [`EventNode::initialize`] runs.
    pub fn new(uid: Uid, event_type: EventType) -> Self {
        Self {
            handle: ObjectHandle::new(),
            uid,
            name: String::new(),
            event_type,
            links: Vec::new(),
            delay_seconds: 0.0,
            delay: DelayState::default(),
            triggered_by_handle: ObjectHandle::nil(),
            trigger_handle: ObjectHandle::nil(),
            on_state: false,
            state: NodeState::for_type(event_type),
            handlers: VarHandlers::new(),
            creation_index: 0,
        }
    }

    /// Builder: set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// (Re)build the property handler table: base handlers first, then the
    /// kind's own. Safe to call more than once.
    pub fn initialize(&mut self) {
        let mut handlers = VarHandlers::new();
        register_base_handlers(&mut handlers);
        (catalog::behavior(self.event_type).register_handlers)(&mut handlers);
        self.handlers = handlers;
    }

    /// Property handler table built by [`EventNode::initialize`].
    pub fn handlers(&self) -> &VarHandlers {
        &self.handlers
    }

    /// Apply one named property from its raw string value.
    ///
    /// Failures are reported and leave the node unchanged; they never affect
    /// other nodes.
    pub fn apply_var(&mut self, name: &str, value: &str) -> Result<(), VarError> {
        let result = match self.handlers.get(name) {
            Some(handler) => VarValue::parse(handler.ty, name, value)
                .and_then(|parsed| (handler.set)(self, parsed)),
            None => Err(VarError::UnknownProperty {
                name: name.to_string(),
                kind: self.event_type.name(),
            }),
        };

        match &result {
            Ok(()) => {}
            Err(err @ VarError::UnknownProperty { .. }) => {
                tracing::warn!(uid = self.uid.0, var_name = name, "apply_var: {err}");
            }
            Err(err) => {
                tracing::error!(
                    uid = self.uid.0,
                    var_name = name,
                    value,
                    "apply_var: failed to set property: {err}"
                );
            }
        }
        result
    }

    /// Configured delay in whole milliseconds.
    pub fn delay_ms(&self) -> u64 {
        (self.delay_seconds * 1000.0).round() as u64
    }

    /// Kind-specific state, if the node carries a payload of type `T`.
    pub fn payload<T: NodePayload>(&self) -> Option<&T> {
        T::from_state(&self.state)
    }

    /// Mutable payload access for property setters.
    pub fn payload_mut<T: NodePayload>(&mut self) -> Result<&mut T, VarError> {
        let kind = self.event_type.name();
        T::from_state_mut(&mut self.state).ok_or(VarError::KindMismatch { kind })
    }

    /// Creation order; breaks ties between delays that expire together.
    pub fn creation_index(&self) -> u64 {
        self.creation_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SequenceState;

    fn sequence_node() -> EventNode {
        let mut node = EventNode::new(Uid(1), EventType::Sequence);
        node.initialize();
        node
    }

    #[test]
    fn test_initialize_registers_base_and_kind_handlers() {
        let node = sequence_node();
        assert!(node.handlers().contains("delay"));
        assert!(node.handlers().contains("last_link_index"));
    }

    #[test]
    fn test_initialize_twice_is_harmless() {
        let mut node = sequence_node();
        node.apply_var("last_link_index", "3").unwrap();
        let count = node.handlers().len();

        node.initialize();

        assert_eq!(node.handlers().len(), count);
        assert_eq!(node.payload::<SequenceState>().unwrap().last_link_index, 3);
    }

    #[test]
    fn test_apply_delay() {
        let mut node = sequence_node();
        node.apply_var("delay", "1.25").unwrap();
        assert!((node.delay_seconds - 1.25).abs() < f32::EPSILON);
        assert_eq!(node.delay_ms(), 1250);
    }

    #[test]
    fn test_negative_delay_rejected() {
        let mut node = sequence_node();
        let result = node.apply_var("delay", "-2");
        assert!(matches!(result, Err(VarError::OutOfRange { .. })));
        assert_eq!(node.delay_seconds, 0.0);
    }

    #[test]
    fn test_unknown_property_leaves_fields_unchanged() {
        let mut node = sequence_node();
        node.apply_var("delay", "2").unwrap();
        node.apply_var("last_link_index", "1").unwrap();

        let result = node.apply_var("speed", "9");

        assert!(matches!(result, Err(VarError::UnknownProperty { .. })));
        assert!((node.delay_seconds - 2.0).abs() < f32::EPSILON);
        assert_eq!(node.payload::<SequenceState>().unwrap().last_link_index, 1);
    }

    #[test]
    fn test_malformed_value_keeps_default() {
        let mut node = sequence_node();
        let result = node.apply_var("last_link_index", "two");
        assert!(matches!(result, Err(VarError::Malformed { .. })));
        assert_eq!(node.payload::<SequenceState>().unwrap().last_link_index, -1);
    }

    #[test]
    fn test_uninitialized_node_has_no_handlers() {
        let mut node = EventNode::new(Uid(2), EventType::FixedDelay);
        assert!(node.handlers().is_empty());
        assert!(node.apply_var("delay", "1").is_err());
    }

    #[test]
    fn test_delay_state_schedule_and_cancel() {
        let mut clock = GameClock::new();
        let mut delay = DelayState::default();

        assert!(!delay.schedule(&clock, 100, true));
        assert!(delay.is_pending());
        assert!(delay.schedule(&clock, 200, false));

        clock.advance(150);
        assert_eq!(delay.take_due(&clock), None);

        delay.cancel();
        clock.advance(100);
        assert_eq!(delay.take_due(&clock), None);
        assert!(!delay.is_pending());
    }

    #[test]
    fn test_delay_state_fires_once() {
        let mut clock = GameClock::new();
        let mut delay = DelayState::default();
        delay.schedule(&clock, 50, false);

        clock.advance(50);
        assert_eq!(delay.take_due(&clock), Some(false));
        assert_eq!(delay.take_due(&clock), None);
    }
}
