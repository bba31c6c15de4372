//! Event graph storage and the runtime that drives it.
//!
//! - **EventGraph**: node arena in creation order, indexed by handle and uid
//! - **LevelLogic**: owns the graph and the level world; activation, link
//!   propagation and the per-tick driver
//! - **Propagation**: per-activation visit budget that bounds cyclic graphs

mod config;
mod driver;
mod propagation;
mod random;
mod runtime;
mod stock;

pub use config::*;
pub use random::*;
pub use runtime::*;
pub use stock::*;

use level_world::{ObjectHandle, Uid};
use std::collections::HashMap;

use crate::node::{EventNode, NodeIndex};

/// All event nodes of the loaded level.
#[derive(Debug, Clone, Default)]
pub struct EventGraph {
    nodes: Vec<EventNode>,

    /// Index: handle -> node.
    by_handle: HashMap<ObjectHandle, NodeIndex>,

    /// Index: uid -> node.
    by_uid: HashMap<Uid, NodeIndex>,
}

impl EventGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Its creation index is its position in the graph.
    pub fn insert(&mut self, mut node: EventNode) -> NodeIndex {
        let index = NodeIndex(self.nodes.len());
        node.creation_index = index.0 as u64;
        self.by_handle.insert(node.handle, index);
        self.by_uid.insert(node.uid, index);
        self.nodes.push(node);
        index
    }

    /// Index of the event node behind a handle.
    pub fn index_of(&self, handle: ObjectHandle) -> Option<NodeIndex> {
        self.by_handle.get(&handle).copied()
    }

    /// Index of the event node with a level uid.
    pub fn index_of_uid(&self, uid: Uid) -> Option<NodeIndex> {
        self.by_uid.get(&uid).copied()
    }

    /// Node at an index handed out by this graph.
    pub fn node(&self, index: NodeIndex) -> &EventNode {
        &self.nodes[index.0]
    }

    /// Mutable node at an index handed out by this graph.
    pub fn node_mut(&mut self, index: NodeIndex) -> &mut EventNode {
        &mut self.nodes[index.0]
    }

    /// Node behind a handle, if it is an event node.
    pub fn get(&self, handle: ObjectHandle) -> Option<&EventNode> {
        self.index_of(handle).map(|i| self.node(i))
    }

    /// Mutable node behind a handle.
    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut EventNode> {
        self.index_of(handle).map(|i| &mut self.nodes[i.0])
    }

    /// Node by level uid.
    pub fn get_by_uid(&self, uid: Uid) -> Option<&EventNode> {
        self.index_of_uid(uid).map(|i| self.node(i))
    }

    /// True if the handle names an event node of this graph.
    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.by_handle.contains_key(&handle)
    }

    /// Number of event nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &EventNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeIndex(i), n))
    }

    /// Append a link from an event node to any object.
    ///
    /// Returns false if the source is not an event node.
    pub fn add_link(&mut self, source: ObjectHandle, target: ObjectHandle) -> bool {
        match self.get_mut(source) {
            Some(node) => {
                node.links.push(target);
                true
            }
            None => false,
        }
    }

    /// Drop every node (level unload).
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.by_handle.clear();
        self.by_uid.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::EventType;

    #[test]
    fn test_insert_and_lookup() {
        let mut graph = EventGraph::new();
        let a = graph.insert(EventNode::new(Uid(1), EventType::Sequence));
        let b = graph.insert(EventNode::new(Uid(2), EventType::FixedDelay));

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.node(a).creation_index(), 0);
        assert_eq!(graph.node(b).creation_index(), 1);
        assert_eq!(graph.index_of_uid(Uid(2)), Some(b));

        let handle = graph.node(a).handle;
        assert_eq!(graph.get(handle).map(|n| n.uid), Some(Uid(1)));
    }

    #[test]
    fn test_add_link() {
        let mut graph = EventGraph::new();
        let a = graph.insert(EventNode::new(Uid(1), EventType::AddLink));
        let source = graph.node(a).handle;
        let target = ObjectHandle::new();

        assert!(graph.add_link(source, target));
        assert!(graph.add_link(source, target));
        assert_eq!(graph.node(a).links, vec![target, target]);

        assert!(!graph.add_link(ObjectHandle::new(), target));
    }

    #[test]
    fn test_clear() {
        let mut graph = EventGraph::new();
        graph.insert(EventNode::new(Uid(1), EventType::AddLink));
        graph.clear();
        assert!(graph.is_empty());
        assert!(graph.get_by_uid(Uid(1)).is_none());
    }
}
