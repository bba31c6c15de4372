//! Kinds that route signals or rewrite the link graph.

use super::{default_process, no_handlers, noop, Behavior};
use crate::graph::LevelLogic;
use crate::node::{NodeIndex, VarHandlers, VarType};

// --- SetVar -----------------------------------------------------------------

/// Property assignment pushed to every linked event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetVarState {
    pub var_name: String,
    pub var_value: Option<String>,
}

pub const SET_VAR: Behavior = Behavior {
    turn_on: set_var_turn_on,
    turn_off: noop,
    process: default_process,
    register_handlers: set_var_handlers,
};

fn set_var_handlers(handlers: &mut VarHandlers) {
    handlers.register("var_name", VarType::Str, |node, value| {
        node.payload_mut::<SetVarState>()?.var_name = value.into_string()?;
        Ok(())
    });
    handlers.register("var_value", VarType::Str, |node, value| {
        node.payload_mut::<SetVarState>()?.var_value = Some(value.into_string()?);
        Ok(())
    });
}

fn set_var_turn_on(logic: &mut LevelLogic, index: NodeIndex) {
    let node = logic.graph.node(index);
    let uid = node.uid;
    let Some(state) = node.payload::<SetVarState>() else {
        return;
    };
    if state.var_name.is_empty() {
        tracing::error!(uid = uid.0, "SetVar event has no var_name defined");
        return;
    }
    let var_name = state.var_name.clone();
    let value = state.var_value.clone().unwrap_or_default();
    let links = node.links.clone();

    tracing::info!(uid = uid.0, %var_name, %value, "applying variable to linked events");
    for link in links {
        match logic.graph.get_mut(link) {
            // Failures are reported by the target and do not stop the others.
            Some(target) => {
                let _ = target.apply_var(&var_name, &value);
            }
            None => tracing::debug!(uid = uid.0, %link, "SetVar link is not an event"),
        }
    }
}

// --- SwitchRandom -----------------------------------------------------------

pub const SWITCH_RANDOM: Behavior = Behavior {
    turn_on: switch_random_turn_on,
    turn_off: noop,
    process: default_process,
    register_handlers: no_handlers,
};

fn switch_random_turn_on(logic: &mut LevelLogic, index: NodeIndex) {
    let node = logic.graph.node(index);
    let uid = node.uid;
    if node.links.is_empty() {
        tracing::warn!(uid = uid.0, "event has no links to turn on");
        return;
    }
    let len = node.links.len();
    let pick = logic.pick_index(len);
    let link = logic.graph.node(index).links[pick];

    match logic.graph.index_of(link) {
        Some(target) => {
            tracing::debug!(
                uid = uid.0,
                pick,
                target = logic.graph.node(target).uid.0,
                "randomly selected event"
            );
            logic.deliver(target, true);
        }
        None => tracing::debug!(uid = uid.0, pick, %link, "random pick is not a live event"),
    }
}

// --- Sequence ---------------------------------------------------------------

/// Cyclic cursor over the node's links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceState {
    /// Index fired last; -1 fires index 0 next.
    pub last_link_index: i32,
}

impl Default for SequenceState {
    fn default() -> Self {
        Self { last_link_index: -1 }
    }
}

impl SequenceState {
    /// Move to the next link, wrapping at `len`. An out-of-range cursor
    /// restarts at 0.
    pub fn advance(&mut self, len: usize) -> usize {
        let in_range = usize::try_from(self.last_link_index)
            .ok()
            .filter(|last| *last < len);
        let next = match in_range {
            Some(last) => (last + 1) % len,
            None => 0,
        };
        self.last_link_index = i32::try_from(next).unwrap_or(0);
        next
    }
}

pub const SEQUENCE: Behavior = Behavior {
    turn_on: sequence_turn_on,
    turn_off: noop,
    process: default_process,
    register_handlers: sequence_handlers,
};

fn sequence_handlers(handlers: &mut VarHandlers) {
    handlers.register("last_link_index", VarType::Int, |node, value| {
        node.payload_mut::<SequenceState>()?.last_link_index = value.as_int()?;
        Ok(())
    });
}

fn sequence_turn_on(logic: &mut LevelLogic, index: NodeIndex) {
    let node = logic.graph.node_mut(index);
    let uid = node.uid;
    let len = node.links.len();
    if len == 0 {
        tracing::warn!(uid = uid.0, "event has no links to turn on");
        return;
    }
    let Ok(state) = node.payload_mut::<SequenceState>() else {
        return;
    };
    let next = state.advance(len);
    let link = node.links[next];

    match logic.graph.index_of(link) {
        Some(target) => {
            tracing::debug!(
                uid = uid.0,
                index = next,
                target = logic.graph.node(target).uid.0,
                "sequence step"
            );
            logic.deliver(target, true);
        }
        None => {
            tracing::debug!(uid = uid.0, index = next, %link, "sequence step is not a live event")
        }
    }
}

// --- ClearQueued ------------------------------------------------------------

pub const CLEAR_QUEUED: Behavior = Behavior {
    turn_on: clear_queued_turn_on,
    turn_off: noop,
    process: default_process,
    register_handlers: no_handlers,
};

fn clear_queued_turn_on(logic: &mut LevelLogic, index: NodeIndex) {
    let links = logic.graph.node(index).links.clone();
    for (i, link) in links.into_iter().enumerate() {
        if let Some(target) = logic.graph.get_mut(link) {
            target.delay.cancel();
            tracing::debug!(uid = target.uid.0, index = i, "cleared queued activation");
        }
    }
}

// --- RemoveLink -------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemoveLinkState {
    /// Clear every link of each target instead of only shared ones.
    pub remove_all: bool,
}

pub const REMOVE_LINK: Behavior = Behavior {
    turn_on: remove_link_turn_on,
    turn_off: noop,
    process: default_process,
    register_handlers: remove_link_handlers,
};

fn remove_link_handlers(handlers: &mut VarHandlers) {
    handlers.register("remove_all", VarType::Bool, |node, value| {
        node.payload_mut::<RemoveLinkState>()?.remove_all = value.as_bool()?;
        Ok(())
    });
}

fn remove_link_turn_on(logic: &mut LevelLogic, index: NodeIndex) {
    let node = logic.graph.node(index);
    let uid = node.uid;
    let remove_all = node.payload::<RemoveLinkState>().is_some_and(|s| s.remove_all);
    let own_links = node.links.clone();

    for (i, link) in own_links.iter().enumerate() {
        let Some(target) = logic.graph.get_mut(*link) else {
            tracing::warn!(uid = uid.0, index = i, "invalid or non-event object at link index");
            continue;
        };
        if remove_all {
            target.links.clear();
            tracing::debug!(uid = uid.0, target = target.uid.0, "removed all links");
        } else {
            target.links.retain(|inner| !own_links.contains(inner));
            tracing::debug!(uid = uid.0, target = target.uid.0, "removed shared links");
        }
    }
}

// --- FixedDelay -------------------------------------------------------------

/// Pass-through: the base delay does the work, the signal is then relayed.
pub const FIXED_DELAY: Behavior = Behavior {
    turn_on: relay_on,
    turn_off: relay_off,
    process: default_process,
    register_handlers: no_handlers,
};

fn relay_on(logic: &mut LevelLogic, index: NodeIndex) {
    logic.propagate(index, true);
}

fn relay_off(logic: &mut LevelLogic, index: NodeIndex) {
    logic.propagate(index, false);
}

// --- AddLink ----------------------------------------------------------------

pub const ADD_LINK: Behavior = Behavior {
    turn_on: add_link_turn_on,
    turn_off: noop,
    process: default_process,
    register_handlers: no_handlers,
};

fn add_link_turn_on(logic: &mut LevelLogic, index: NodeIndex) {
    let node = logic.graph.node(index);
    let uid = node.uid;
    let Some((&source, targets)) = node.links.split_first() else {
        tracing::warn!(uid = uid.0, "event has no links to process");
        return;
    };
    let targets = targets.to_vec();

    if !logic.graph.contains(source) {
        tracing::warn!(uid = uid.0, %source, "AddLink source is not an event");
        return;
    }
    for target in targets {
        logic.graph.add_link(source, target);
        tracing::debug!(uid = uid.0, %source, %target, "added link");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_cycles_from_default() {
        let mut state = SequenceState::default();
        let order: Vec<_> = (0..5).map(|_| state.advance(3)).collect();
        assert_eq!(order, vec![0, 1, 2, 0, 1]);
    }

    #[test]
    fn test_sequence_out_of_range_restarts() {
        let mut state = SequenceState { last_link_index: 7 };
        assert_eq!(state.advance(3), 0);

        let mut state = SequenceState { last_link_index: -5 };
        assert_eq!(state.advance(3), 0);
        assert_eq!(state.advance(3), 1);
    }

    #[test]
    fn test_sequence_wraps_from_last() {
        let mut state = SequenceState { last_link_index: 2 };
        assert_eq!(state.advance(3), 0);
        assert_eq!(state.last_link_index, 0);
    }
}
