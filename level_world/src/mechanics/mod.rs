//! Level mechanics: difficulty, network topology, trigger volumes and rooms.

use serde::{Deserialize, Serialize};

use crate::entities::{ObjectHandle, Uid, Vec3};

/// Game difficulty levels, in their authored integer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Impossible,
}

impl Difficulty {
    /// Map the authored integer value to a difficulty.
    pub fn from_index(value: i32) -> Option<Self> {
        match value {
            0 => Some(Difficulty::Easy),
            1 => Some(Difficulty::Medium),
            2 => Some(Difficulty::Hard),
            3 => Some(Difficulty::Impossible),
            _ => None,
        }
    }

    pub fn index(&self) -> i32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
            Difficulty::Impossible => 3,
        }
    }
}

/// How the running game is connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NetTopology {
    #[default]
    Single,
    /// Listen server (hosting player).
    Server,
    DedicatedServer,
    Client,
}

impl NetTopology {
    pub fn is_multiplayer(&self) -> bool {
        !matches!(self, NetTopology::Single)
    }

    /// True for both listen and dedicated servers.
    pub fn is_server(&self) -> bool {
        matches!(self, NetTopology::Server | NetTopology::DedicatedServer)
    }

    pub fn is_dedicated(&self) -> bool {
        matches!(self, NetTopology::DedicatedServer)
    }

    pub fn is_client(&self) -> bool {
        matches!(self, NetTopology::Client)
    }
}

/// Shape of a trigger volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TriggerShape {
    Sphere { radius: f32 },
    /// Axis-aligned box; `extents` are full edge lengths.
    Box { extents: Vec3 },
}

/// A trigger volume placed in the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(skip, default = "ObjectHandle::new")]
    pub handle: ObjectHandle,
    pub uid: Uid,
    #[serde(default)]
    pub name: String,
    pub pos: Vec3,
    #[serde(flatten)]
    pub shape: TriggerShape,
}

impl Trigger {
    pub fn sphere(uid: Uid, pos: Vec3, radius: f32) -> Self {
        Self {
            handle: ObjectHandle::new(),
            uid,
            name: String::new(),
            pos,
            shape: TriggerShape::Sphere { radius },
        }
    }

    pub fn cuboid(uid: Uid, pos: Vec3, extents: Vec3) -> Self {
        Self {
            handle: ObjectHandle::new(),
            uid,
            name: String::new(),
            pos,
            shape: TriggerShape::Box { extents },
        }
    }

    /// Check whether a point lies within the volume (boundary inclusive).
    pub fn contains(&self, point: &Vec3) -> bool {
        match self.shape {
            TriggerShape::Sphere { radius } => {
                self.pos.distance_squared(point) <= radius * radius
            }
            TriggerShape::Box { extents } => {
                (point.x - self.pos.x).abs() <= extents.x / 2.0
                    && (point.y - self.pos.y).abs() <= extents.y / 2.0
                    && (point.z - self.pos.z).abs() <= extents.z / 2.0
            }
        }
    }
}

/// A room of the level geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(skip, default = "ObjectHandle::new")]
    pub handle: ObjectHandle,
    pub uid: Uid,
    #[serde(default)]
    pub name: String,
}

impl Room {
    pub fn new(uid: Uid, name: impl Into<String>) -> Self {
        Self {
            handle: ObjectHandle::new(),
            uid,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_index_round_trip() {
        assert_eq!(Difficulty::from_index(2), Some(Difficulty::Hard));
        assert_eq!(Difficulty::Impossible.index(), 3);
        assert_eq!(Difficulty::from_index(7), None);
    }

    #[test]
    fn test_topology_queries() {
        assert!(!NetTopology::Single.is_multiplayer());
        assert!(NetTopology::Client.is_multiplayer());
        assert!(NetTopology::DedicatedServer.is_server());
        assert!(NetTopology::Server.is_server());
        assert!(!NetTopology::Server.is_dedicated());
    }

    #[test]
    fn test_sphere_contains() {
        let trigger = Trigger::sphere(Uid(1), Vec3::new(0.0, 0.0, 0.0), 2.0);
        assert!(trigger.contains(&Vec3::new(1.0, 1.0, 0.0)));
        assert!(trigger.contains(&Vec3::new(2.0, 0.0, 0.0)));
        assert!(!trigger.contains(&Vec3::new(2.0, 1.0, 0.0)));
    }

    #[test]
    fn test_box_contains() {
        let trigger = Trigger::cuboid(Uid(2), Vec3::new(10.0, 0.0, 0.0), Vec3::new(4.0, 2.0, 2.0));
        assert!(trigger.contains(&Vec3::new(11.5, 0.5, -1.0)));
        assert!(!trigger.contains(&Vec3::new(12.5, 0.0, 0.0)));
    }
}
