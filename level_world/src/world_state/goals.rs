//! Goal counters: level-scoped goals and campaign-persistent goals.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named counter scoped to the current level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelGoal {
    pub name: String,
    #[serde(default)]
    pub initial_value: i32,
    #[serde(default)]
    pub count: i32,
}

impl LevelGoal {
    /// A goal whose counter starts at its initial value.
    pub fn new(name: impl Into<String>, initial_value: i32) -> Self {
        Self {
            name: name.into(),
            initial_value,
            count: initial_value,
        }
    }
}

/// A named counter that survives across the levels of a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistentGoal {
    pub name: String,
    #[serde(default)]
    pub initial_count: i32,
    #[serde(default)]
    pub count: i32,
}

impl PersistentGoal {
    pub fn new(name: impl Into<String>, initial_count: i32) -> Self {
        Self {
            name: name.into(),
            initial_count,
            count: initial_count,
        }
    }
}

/// Goal names are matched case-insensitively.
fn goal_key(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Both goal stores, keyed by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalStore {
    level: HashMap<String, LevelGoal>,
    persistent: HashMap<String, PersistentGoal>,
}

impl GoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_level_goal(&mut self, goal: LevelGoal) {
        self.level.insert(goal_key(&goal.name), goal);
    }

    pub fn add_persistent_goal(&mut self, goal: PersistentGoal) {
        self.persistent.insert(goal_key(&goal.name), goal);
    }

    pub fn find_level_goal(&self, name: &str) -> Option<&LevelGoal> {
        self.level.get(&goal_key(name))
    }

    pub fn find_level_goal_mut(&mut self, name: &str) -> Option<&mut LevelGoal> {
        self.level.get_mut(&goal_key(name))
    }

    pub fn find_persistent_goal(&self, name: &str) -> Option<&PersistentGoal> {
        self.persistent.get(&goal_key(name))
    }

    pub fn find_persistent_goal_mut(&mut self, name: &str) -> Option<&mut PersistentGoal> {
        self.persistent.get_mut(&goal_key(name))
    }

    /// Drop level-scoped goals at level unload; persistent goals are kept.
    pub fn clear_level_goals(&mut self) {
        self.level.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_goal_starts_at_initial() {
        let goal = LevelGoal::new("switches", 3);
        assert_eq!(goal.count, 3);
        assert_eq!(goal.initial_value, 3);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let mut store = GoalStore::new();
        store.add_level_goal(LevelGoal::new("Reactor_Cores", 0));
        store.add_persistent_goal(PersistentGoal::new("KILLS", 0));

        assert!(store.find_level_goal("reactor_cores").is_some());
        assert!(store.find_persistent_goal("kills").is_some());
        assert!(store.find_level_goal("kills").is_none());
    }

    #[test]
    fn test_clear_level_goals_keeps_persistent() {
        let mut store = GoalStore::new();
        store.add_level_goal(LevelGoal::new("a", 0));
        store.add_persistent_goal(PersistentGoal::new("a", 0));

        store.clear_level_goals();

        assert!(store.find_level_goal("a").is_none());
        assert!(store.find_persistent_goal("a").is_some());
    }
}
