//! Per-tick driver: advances the clock and resolves delayed activations.

use super::LevelLogic;
use crate::catalog;
use crate::node::NodeIndex;

impl LevelLogic {
    /// Advance the level clock by one frame and process every node with
    /// delayed work, earliest expiry first, ties in creation order.
    ///
    /// Returns the number of delayed signals delivered.
    pub fn tick(&mut self, delta_ms: u64) -> usize {
        self.world.clock.advance(delta_ms);

        let mut waiting: Vec<(u64, u64, NodeIndex)> = self
            .graph
            .iter()
            .filter(|(_, node)| node.delay.is_pending())
            .filter_map(|(index, node)| {
                node.delay
                    .timestamp
                    .expires_at_ms()
                    .map(|expires| (expires, node.creation_index(), index))
            })
            .collect();
        waiting.sort_unstable();

        let mut fired = 0;
        for (_, _, index) in waiting {
            let process = catalog::behavior(self.graph.node(index).event_type).process;
            if process(self, index) {
                fired += 1;
            }
        }
        fired
    }

    /// Default processing: deliver the pending signal once its delay has
    /// elapsed. A pending signal cancelled earlier in the same tick is gone
    /// and does not fire.
    pub(crate) fn process_delay(&mut self, index: NodeIndex) -> bool {
        let clock = self.world.clock;
        let node = self.graph.node_mut(index);
        let Some(on) = node.delay.take_due(&clock) else {
            return false;
        };
        tracing::debug!(uid = node.uid.0, on, "delayed activation due");
        self.deliver(index, on);
        true
    }
}
