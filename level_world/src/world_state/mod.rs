//! Level world state - the central structure holding everything event nodes touch.

mod directory;
mod goals;

pub use directory::*;
pub use goals::*;

use serde::{Deserialize, Serialize};

use crate::entities::ObjectHandle;
use crate::mechanics::{Difficulty, NetTopology};
use crate::timer::GameClock;

/// Level-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSettings {
    /// Default hardness of destructible rock, 0-100.
    #[serde(default = "default_rock_hardness")]
    pub default_rock_hardness: i32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub topology: NetTopology,
}

fn default_rock_hardness() -> i32 {
    50
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            default_rock_hardness: default_rock_hardness(),
            difficulty: Difficulty::default(),
            topology: NetTopology::default(),
        }
    }
}

impl LevelSettings {
    /// Set rock hardness, clamped to 0-100.
    pub fn set_rock_hardness(&mut self, hardness: i32) {
        self.default_rock_hardness = hardness.clamp(0, 100);
    }
}

/// The local player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalPlayer {
    /// Entity the player controls, if spawned.
    pub entity: Option<ObjectHandle>,
    pub collides_with_world: bool,
}

impl Default for LocalPlayer {
    fn default() -> Self {
        Self {
            entity: None,
            collides_with_world: true,
        }
    }
}

/// HUD message line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Hud {
    pub message: Option<String>,
    pub duration_ms: i32,
}

impl Hud {
    pub fn show(&mut self, message: impl Into<String>, duration_ms: i32) {
        self.message = Some(message.into());
        self.duration_ms = duration_ms;
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.duration_ms = 0;
    }
}

/// Full-screen videos requested for playback, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MediaQueue {
    pub played: Vec<String>,
}

impl MediaQueue {
    pub fn play_video(&mut self, filename: impl Into<String>) {
        let filename = filename.into();
        tracing::info!(%filename, "playing video");
        self.played.push(filename);
    }
}

/// Everything in the loaded level that event nodes observe or change.
#[derive(Debug, Clone, Default)]
pub struct LevelWorld {
    pub clock: GameClock,
    pub settings: LevelSettings,
    pub player: LocalPlayer,
    pub hud: Hud,
    pub media: MediaQueue,
    pub goals: GoalStore,
    pub objects: ObjectDirectory,
}

impl LevelWorld {
    /// Create a new empty level world.
    pub fn new() -> Self {
        Self::default()
    }

    /// The player's entity handle, or nil when no player is spawned.
    pub fn player_handle(&self) -> ObjectHandle {
        self.player.entity.unwrap_or_else(ObjectHandle::nil)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rock_hardness_clamped() {
        let mut settings = LevelSettings::default();
        settings.set_rock_hardness(250);
        assert_eq!(settings.default_rock_hardness, 100);
        settings.set_rock_hardness(-4);
        assert_eq!(settings.default_rock_hardness, 0);
    }

    #[test]
    fn test_hud_show_and_clear() {
        let mut hud = Hud::default();
        hud.show("Door unlocked", 3000);
        assert_eq!(hud.message.as_deref(), Some("Door unlocked"));
        assert_eq!(hud.duration_ms, 3000);

        hud.clear();
        assert!(hud.message.is_none());
    }

    #[test]
    fn test_player_defaults() {
        let world = LevelWorld::new();
        assert!(world.player.collides_with_world);
        assert!(world.player_handle().is_nil());
    }
}
