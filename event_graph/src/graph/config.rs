//! Graph runtime configuration.

use serde::{Deserialize, Serialize};

/// Limits and seeding for the graph runtime.
///
/// Propagation is bounded per originating activation. A node receives at
/// most `max_visits_per_node` signals in one pass, so cyclic links end after
/// a few rounds. The same cap applies to repeated links: a relay linking the
/// same `GoalMath` node five times moves its counter only
/// `max_visits_per_node` times in one pass. Raise the cap for levels that
/// rely on duplicate links as a multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// How many times one node may receive a signal during a single
    /// originating activation.
    #[serde(default = "default_max_visits")]
    pub max_visits_per_node: u32,

    /// Hard cap on nested synchronous delivery. When unset the cap is
    /// `max_visits_per_node` times the node count, which every pass already
    /// respects, so acyclic chains of any length run to the end. Set it on
    /// hosts with small thread stacks.
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Seed for the random source; entropy from the OS when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_visits() -> u32 {
    4
}

impl GraphConfig {
    /// Nesting limit for a pass over a graph of `node_count` nodes.
    pub fn depth_limit(&self, node_count: usize) -> u32 {
        match self.max_depth {
            Some(depth) => depth,
            None => u32::try_from(node_count)
                .unwrap_or(u32::MAX)
                .saturating_mul(self.max_visits_per_node)
                .max(1),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_visits_per_node: default_max_visits(),
            max_depth: None,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: GraphConfig = toml::from_str("").unwrap();
        assert_eq!(config, GraphConfig::default());
        assert_eq!(config.max_visits_per_node, 4);
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_depth_limit_follows_graph_order() {
        let config = GraphConfig::default();
        assert_eq!(config.depth_limit(100), 400);
        assert_eq!(config.depth_limit(0), 1);

        let capped = GraphConfig {
            max_depth: Some(32),
            ..Default::default()
        };
        assert_eq!(capped.depth_limit(100), 32);
    }

    #[test]
    fn test_partial_override() {
        let config: GraphConfig = toml::from_str("max_depth = 8\nseed = 7").unwrap();
        assert_eq!(config.max_depth, Some(8));
        assert_eq!(config.max_visits_per_node, 4);
        assert_eq!(config.seed, Some(7));
    }
}
