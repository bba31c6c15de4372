//! Visit budget for one originating activation.
//!
//! Signal delivery is synchronous and depth-first, and link graphs may be
//! cyclic. Each delivery enters the budget; a node that has already been
//! entered `max_visits_per_node` times in the current pass, or a delivery
//! nested deeper than the pass's depth limit, is refused. The limit is fixed
//! when the pass starts, from the graph order unless configured. The pass
//! ends when the outermost delivery leaves.

use std::collections::HashMap;

use level_world::Uid;

use super::GraphConfig;
use crate::error::GraphError;
use crate::node::NodeIndex;

#[derive(Debug, Clone, Default)]
pub(crate) struct Propagation {
    depth: u32,
    depth_limit: u32,
    visits: HashMap<NodeIndex, u32>,
}

impl Propagation {
    pub(crate) fn enter(
        &mut self,
        index: NodeIndex,
        uid: Uid,
        config: &GraphConfig,
        node_count: usize,
    ) -> Result<(), GraphError> {
        if self.depth == 0 {
            self.visits.clear();
            self.depth_limit = config.depth_limit(node_count);
        }
        if self.depth >= self.depth_limit {
            return Err(GraphError::DepthLimit(self.depth_limit));
        }

        let visits = self.visits.entry(index).or_insert(0);
        if *visits >= config.max_visits_per_node {
            return Err(GraphError::VisitLimit {
                uid,
                limit: config.max_visits_per_node,
            });
        }
        *visits += 1;
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn depth(&self) -> u32 {
        self.depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(visits: u32, depth: u32) -> GraphConfig {
        GraphConfig {
            max_visits_per_node: visits,
            max_depth: Some(depth),
            seed: None,
        }
    }

    #[test]
    fn test_visit_limit() {
        let cfg = config(2, 10);
        let mut pass = Propagation::default();
        let node = NodeIndex(0);

        assert!(pass.enter(node, Uid(1), &cfg, 8).is_ok());
        assert!(pass.enter(node, Uid(1), &cfg, 8).is_ok());
        assert_eq!(
            pass.enter(node, Uid(1), &cfg, 8),
            Err(GraphError::VisitLimit { uid: Uid(1), limit: 2 })
        );
    }

    #[test]
    fn test_depth_limit() {
        let cfg = config(10, 2);
        let mut pass = Propagation::default();

        assert!(pass.enter(NodeIndex(0), Uid(1), &cfg, 8).is_ok());
        assert!(pass.enter(NodeIndex(1), Uid(2), &cfg, 8).is_ok());
        assert_eq!(
            pass.enter(NodeIndex(2), Uid(3), &cfg, 8),
            Err(GraphError::DepthLimit(2))
        );
        assert_eq!(pass.depth(), 2);
    }

    #[test]
    fn test_unset_depth_allows_long_chains() {
        let cfg = GraphConfig::default();
        let mut pass = Propagation::default();

        for i in 0..300 {
            assert!(pass.enter(NodeIndex(i), Uid(i as i32), &cfg, 300).is_ok());
        }
        assert_eq!(pass.depth(), 300);
    }

    #[test]
    fn test_new_pass_resets_visits() {
        let cfg = config(1, 10);
        let mut pass = Propagation::default();
        let node = NodeIndex(3);

        assert!(pass.enter(node, Uid(1), &cfg, 8).is_ok());
        pass.leave();
        assert_eq!(pass.depth(), 0);

        assert!(pass.enter(node, Uid(1), &cfg, 8).is_ok());
    }
}
