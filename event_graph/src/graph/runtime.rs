//! Level logic runtime - activation, signal delivery and link propagation.

use level_world::{LevelWorld, ObjectHandle, Uid};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::propagation::Propagation;
use super::{
    EventGraph, GraphConfig, RandomSource, RelayStockEffects, StockEffects, StockInvocation,
};
use crate::catalog;
use crate::error::{GraphError, LevelError, VarError};
use crate::node::{EventNode, EventType, NodeIndex};

/// The event graph together with the level world it acts on.
pub struct LevelLogic {
    pub world: LevelWorld,
    pub graph: EventGraph,
    config: GraphConfig,
    rng: Box<dyn RandomSource>,
    stock: Box<dyn StockEffects>,
    stock_log: Vec<StockInvocation>,
    pub(crate) pass: Propagation,
}

impl std::fmt::Debug for LevelLogic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelLogic")
            .field("world", &self.world)
            .field("graph", &self.graph)
            .field("config", &self.config)
            .field("stock_log", &self.stock_log)
            .finish_non_exhaustive()
    }
}

impl LevelLogic {
    /// Create a runtime over a world with an empty graph.
    pub fn new(world: LevelWorld, config: GraphConfig) -> Self {
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_os_rng()),
        };
        Self {
            world,
            graph: EventGraph::new(),
            config,
            rng,
            stock: Box::new(RelayStockEffects),
            stock_log: Vec::new(),
            pass: Propagation::default(),
        }
    }

    /// Replace the random source.
    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Replace the stock effect table.
    pub fn with_stock_effects(mut self, stock: impl StockEffects + 'static) -> Self {
        self.stock = Box::new(stock);
        self
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Every stock effect invoked so far, in order.
    pub fn stock_invocations(&self) -> &[StockInvocation] {
        &self.stock_log
    }

    /// Create, register and initialize a node with no links or properties.
    pub fn spawn_node(
        &mut self,
        uid: Uid,
        event_type: EventType,
        name: impl Into<String>,
    ) -> Result<ObjectHandle, LevelError> {
        if self.world.objects.handle_from_uid(uid).is_some() {
            return Err(LevelError::DuplicateUid(uid));
        }

        let mut node = EventNode::new(uid, event_type).with_name(name);
        node.initialize();
        let handle = node.handle;

        self.world.objects.register_event(handle, uid);
        self.graph.insert(node);
        tracing::debug!(uid = uid.0, kind = event_type.name(), "constructed event");
        Ok(handle)
    }

    /// Apply a named property to a node.
    pub fn apply_var(
        &mut self,
        handle: ObjectHandle,
        name: &str,
        value: &str,
    ) -> Result<(), VarError> {
        match self.graph.get_mut(handle) {
            Some(node) => node.apply_var(name, value),
            None => {
                tracing::warn!(%handle, var_name = name, "apply_var: no such event");
                Err(VarError::UnknownNode(handle))
            }
        }
    }

    /// Deliver an activation to a node. This is the runtime entry point used
    /// by triggers and other game logic.
    pub fn activate(
        &mut self,
        handle: ObjectHandle,
        trigger_handle: ObjectHandle,
        triggered_by_handle: ObjectHandle,
        on: bool,
    ) -> Result<(), GraphError> {
        let index = self
            .graph
            .index_of(handle)
            .ok_or(GraphError::UnknownNode(handle))?;
        self.activate_index(index, trigger_handle, triggered_by_handle, on);
        Ok(())
    }

    /// Activate a node by uid, attributing it to the local player.
    pub fn activate_uid(&mut self, uid: Uid, on: bool) -> Result<(), GraphError> {
        let index = self.graph.index_of_uid(uid).ok_or(GraphError::UnknownUid(uid))?;
        let player = self.world.player_handle();
        self.activate_index(index, ObjectHandle::nil(), player, on);
        Ok(())
    }

    /// Send a signal to every link of a node.
    pub fn activate_links(
        &mut self,
        handle: ObjectHandle,
        trigger_handle: ObjectHandle,
        triggered_by_handle: ObjectHandle,
        on: bool,
    ) -> Result<(), GraphError> {
        let index = self
            .graph
            .index_of(handle)
            .ok_or(GraphError::UnknownNode(handle))?;
        self.activate_links_index(index, trigger_handle, triggered_by_handle, on);
        Ok(())
    }

    /// Record provenance, then either schedule the signal behind the node's
    /// delay or deliver it now.
    pub(crate) fn activate_index(
        &mut self,
        index: NodeIndex,
        trigger_handle: ObjectHandle,
        triggered_by_handle: ObjectHandle,
        on: bool,
    ) {
        let clock = self.world.clock;
        let node = self.graph.node_mut(index);
        node.trigger_handle = trigger_handle;
        node.triggered_by_handle = triggered_by_handle;

        let delay_ms = node.delay_ms();
        if node.delay_seconds > 0.0 {
            if node.delay.schedule(&clock, delay_ms, on) {
                tracing::debug!(uid = node.uid.0, on, "replaced pending delayed activation");
            } else {
                tracing::debug!(uid = node.uid.0, on, delay_ms, "scheduled delayed activation");
            }
            return;
        }

        self.deliver(index, on);
    }

    pub(crate) fn activate_links_index(
        &mut self,
        index: NodeIndex,
        trigger_handle: ObjectHandle,
        triggered_by_handle: ObjectHandle,
        on: bool,
    ) {
        let links = self.graph.node(index).links.clone();
        for link in links {
            match self.graph.index_of(link) {
                Some(target) => {
                    self.activate_index(target, trigger_handle, triggered_by_handle, on)
                }
                None => tracing::debug!(
                    uid = self.graph.node(index).uid.0,
                    %link,
                    "skipping link that is not a live event"
                ),
            }
        }
    }

    /// Forward a signal to a node's links with its recorded provenance.
    pub(crate) fn propagate(&mut self, index: NodeIndex, on: bool) {
        let node = self.graph.node(index);
        let (trigger, triggered_by) = (node.trigger_handle, node.triggered_by_handle);
        self.activate_links_index(index, trigger, triggered_by, on);
    }

    /// Run the node's `turn_on`/`turn_off` under the propagation budget.
    pub(crate) fn deliver(&mut self, index: NodeIndex, on: bool) {
        let uid = self.graph.node(index).uid;
        let node_count = self.graph.len();
        if let Err(err) = self.pass.enter(index, uid, &self.config, node_count) {
            tracing::warn!(uid = uid.0, on, "signal dropped: {err}");
            return;
        }

        tracing::trace!(uid = uid.0, on, depth = self.pass.depth(), "delivering signal");
        let node = self.graph.node_mut(index);
        node.on_state = on;
        let behavior = catalog::behavior(node.event_type);
        if on {
            (behavior.turn_on)(self, index);
        } else {
            (behavior.turn_off)(self, index);
        }

        self.pass.leave();
    }

    /// Call into the stock effect table for a built-in kind.
    pub(crate) fn apply_stock(&mut self, index: NodeIndex, on: bool) {
        let node = self.graph.node(index);
        let EventType::Stock(kind) = node.event_type else {
            return;
        };
        let invocation = StockInvocation {
            uid: node.uid,
            handle: node.handle,
            kind,
            on,
        };
        self.stock_log.push(invocation);

        if let Some(signal) = self.stock.apply(&mut self.world, &invocation) {
            self.propagate(index, signal);
        }
    }

    pub(crate) fn pick_index(&mut self, len: usize) -> usize {
        self.rng.pick_index(len)
    }

    /// Destroy every node and level-scoped object (level unload).
    pub fn unload(&mut self) {
        self.graph.clear();
        self.world.objects = Default::default();
        self.world.goals.clear_level_goals();
        self.stock_log.clear();
        self.pass = Propagation::default();
        tracing::info!("level unloaded");
    }
}
