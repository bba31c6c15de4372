//! Object identity and the non-event objects living in a level.

mod components;
mod entity;

pub use components::*;
pub use entity::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Runtime handle of any object in the level (entities, triggers, rooms, events).
///
/// Handles are allocated when an object is created and are never reused while
/// the level is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectHandle(pub Uuid);

impl ObjectHandle {
    /// Allocate a fresh handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The "no object" handle.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for ObjectHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Level-authored unique id, as written by the level editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(pub i32);

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dynamic kind of an object as reported by the object directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Entity,
    Trigger,
    Room,
    Event,
    Corpse,
    Item,
    Clutter,
}

/// A point or direction in level space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance_squared(&self, other: &Vec3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}

/// Row-major orientation basis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            right: Vec3::new(1.0, 0.0, 0.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            forward: Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let a = ObjectHandle::new();
        let b = ObjectHandle::new();
        assert_ne!(a, b);
        assert!(!a.is_nil());
        assert!(ObjectHandle::nil().is_nil());
    }

    #[test]
    fn test_distance_squared() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 6.0, 3.0);
        assert!((a.distance_squared(&b) - 25.0).abs() < 0.001);
    }
}
