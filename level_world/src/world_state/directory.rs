//! Object directory - resolves handles and uids to live level objects.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entities::{Entity, ObjectHandle, ObjectKind, Uid, Vec3};
use crate::mechanics::{Room, Trigger};

/// Remains of a dead entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corpse {
    #[serde(skip, default = "ObjectHandle::new")]
    pub handle: ObjectHandle,
    pub uid: Uid,
    pub name: String,
    #[serde(default)]
    pub pos: Vec3,
    #[serde(default)]
    pub room: Option<Uid>,
}

/// Borrowed view of a resolved object.
#[derive(Debug, Clone, Copy)]
pub enum ObjectRef<'a> {
    Entity(&'a Entity),
    Corpse(&'a Corpse),
    Trigger(&'a Trigger),
    Room(&'a Room),
    /// Event nodes live in the event graph; the directory only knows they exist.
    Event(ObjectHandle),
}

impl ObjectRef<'_> {
    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectRef::Entity(_) => ObjectKind::Entity,
            ObjectRef::Corpse(_) => ObjectKind::Corpse,
            ObjectRef::Trigger(_) => ObjectKind::Trigger,
            ObjectRef::Room(_) => ObjectKind::Room,
            ObjectRef::Event(_) => ObjectKind::Event,
        }
    }

    /// World position, for objects that have one.
    pub fn position(&self) -> Option<Vec3> {
        match self {
            ObjectRef::Entity(e) => Some(e.pos),
            ObjectRef::Corpse(c) => Some(c.pos),
            ObjectRef::Trigger(t) => Some(t.pos),
            ObjectRef::Room(_) | ObjectRef::Event(_) => None,
        }
    }

    /// Room the object is in, for objects that track one.
    pub fn room(&self) -> Option<Uid> {
        match self {
            ObjectRef::Entity(e) => e.room,
            ObjectRef::Corpse(c) => c.room,
            _ => None,
        }
    }
}

/// Storage and lookup for every object in the loaded level.
#[derive(Debug, Clone, Default)]
pub struct ObjectDirectory {
    entities: HashMap<ObjectHandle, Entity>,
    corpses: HashMap<ObjectHandle, Corpse>,
    triggers: HashMap<ObjectHandle, Trigger>,
    rooms: HashMap<ObjectHandle, Room>,
    events: HashMap<ObjectHandle, Uid>,

    /// Index: uid -> handle, across all object kinds.
    by_uid: HashMap<Uid, ObjectHandle>,

    /// Highest uid seen so far; new uids are allocated above it.
    max_uid: i32,
}

impl ObjectDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(&mut self, uid: Uid, handle: ObjectHandle) {
        if self.by_uid.insert(uid, handle).is_some() {
            tracing::warn!(uid = uid.0, "uid reused; the newest object shadows the previous one");
        }
        self.max_uid = self.max_uid.max(uid.0);
    }

    pub fn insert_entity(&mut self, entity: Entity) -> ObjectHandle {
        let handle = entity.handle;
        self.index(entity.uid, handle);
        self.entities.insert(handle, entity);
        handle
    }

    pub fn insert_corpse(&mut self, corpse: Corpse) -> ObjectHandle {
        let handle = corpse.handle;
        self.index(corpse.uid, handle);
        self.corpses.insert(handle, corpse);
        handle
    }

    pub fn insert_trigger(&mut self, trigger: Trigger) -> ObjectHandle {
        let handle = trigger.handle;
        self.index(trigger.uid, handle);
        self.triggers.insert(handle, trigger);
        handle
    }

    pub fn insert_room(&mut self, room: Room) -> ObjectHandle {
        let handle = room.handle;
        self.index(room.uid, handle);
        self.rooms.insert(handle, room);
        handle
    }

    /// Record that an event node with this handle and uid exists.
    pub fn register_event(&mut self, handle: ObjectHandle, uid: Uid) {
        self.index(uid, handle);
        self.events.insert(handle, uid);
    }

    /// Destroy an object. Returns whether anything was removed.
    pub fn remove(&mut self, handle: ObjectHandle) -> bool {
        let uid = if let Some(e) = self.entities.remove(&handle) {
            e.uid
        } else if let Some(c) = self.corpses.remove(&handle) {
            c.uid
        } else if let Some(t) = self.triggers.remove(&handle) {
            t.uid
        } else if let Some(r) = self.rooms.remove(&handle) {
            r.uid
        } else if let Some(uid) = self.events.remove(&handle) {
            uid
        } else {
            return false;
        };

        if self.by_uid.get(&uid) == Some(&handle) {
            self.by_uid.remove(&uid);
        }
        true
    }

    /// Turn a living entity into a corpse under the same handle and uid.
    pub fn kill_entity(&mut self, handle: ObjectHandle) -> bool {
        match self.entities.remove(&handle) {
            Some(entity) => {
                self.corpses.insert(
                    handle,
                    Corpse {
                        handle,
                        uid: entity.uid,
                        name: entity.name,
                        pos: entity.pos,
                        room: entity.room,
                    },
                );
                true
            }
            None => false,
        }
    }

    pub fn handle_from_uid(&self, uid: Uid) -> Option<ObjectHandle> {
        self.by_uid.get(&uid).copied()
    }

    pub fn resolve(&self, handle: ObjectHandle) -> Option<ObjectRef<'_>> {
        if let Some(e) = self.entities.get(&handle) {
            return Some(ObjectRef::Entity(e));
        }
        if let Some(c) = self.corpses.get(&handle) {
            return Some(ObjectRef::Corpse(c));
        }
        if let Some(t) = self.triggers.get(&handle) {
            return Some(ObjectRef::Trigger(t));
        }
        if let Some(r) = self.rooms.get(&handle) {
            return Some(ObjectRef::Room(r));
        }
        self.events.contains_key(&handle).then_some(ObjectRef::Event(handle))
    }

    pub fn resolve_uid(&self, uid: Uid) -> Option<ObjectRef<'_>> {
        self.handle_from_uid(uid).and_then(|h| self.resolve(h))
    }

    pub fn kind_of(&self, handle: ObjectHandle) -> Option<ObjectKind> {
        self.resolve(handle).map(|obj| obj.kind())
    }

    pub fn entity(&self, handle: ObjectHandle) -> Option<&Entity> {
        self.entities.get(&handle)
    }

    pub fn entity_mut(&mut self, handle: ObjectHandle) -> Option<&mut Entity> {
        self.entities.get_mut(&handle)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Allocate a uid above every uid in the level.
    pub fn allocate_uid(&mut self) -> Uid {
        self.max_uid = self.max_uid.saturating_add(1);
        Uid(self.max_uid)
    }

    /// Duplicate an entity, registering the copy under a fresh handle and uid.
    pub fn clone_entity(&mut self, source: ObjectHandle) -> Option<ObjectHandle> {
        let original = self.entities.get(&source)?.clone();
        let uid = self.allocate_uid();
        let copy = original.duplicate(uid);
        tracing::debug!(source_uid = original.uid.0, clone_uid = uid.0, name = %copy.name, "cloned entity");
        Some(self.insert_entity(copy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_handle_and_uid() {
        let mut dir = ObjectDirectory::new();
        let handle = dir.insert_entity(Entity::new(Uid(5), "Miner", "miner"));

        assert_eq!(dir.kind_of(handle), Some(ObjectKind::Entity));
        assert_eq!(dir.handle_from_uid(Uid(5)), Some(handle));
        assert!(matches!(dir.resolve_uid(Uid(5)), Some(ObjectRef::Entity(e)) if e.name == "Miner"));
    }

    #[test]
    fn test_remove_object() {
        let mut dir = ObjectDirectory::new();
        let handle = dir.insert_room(Room::new(Uid(9), "Hangar"));
        assert!(dir.remove(handle));
        assert!(dir.resolve(handle).is_none());
        assert!(dir.handle_from_uid(Uid(9)).is_none());
        assert!(!dir.remove(handle));
    }

    #[test]
    fn test_kill_entity_leaves_corpse() {
        let mut dir = ObjectDirectory::new();
        let handle = dir.insert_entity(Entity::new(Uid(2), "Guard", "merc").in_room(Uid(30)));

        assert!(dir.kill_entity(handle));
        assert_eq!(dir.kind_of(handle), Some(ObjectKind::Corpse));
        assert_eq!(dir.resolve(handle).and_then(|o| o.room()), Some(Uid(30)));
    }

    #[test]
    fn test_event_registration() {
        let mut dir = ObjectDirectory::new();
        let handle = ObjectHandle::new();
        dir.register_event(handle, Uid(100));
        assert_eq!(dir.kind_of(handle), Some(ObjectKind::Event));
        assert!(dir.resolve(handle).and_then(|o| o.position()).is_none());
    }

    #[test]
    fn test_clone_entity_allocates_new_uid() {
        let mut dir = ObjectDirectory::new();
        let source = dir.insert_entity(Entity::new(Uid(12), "Guard", "merc"));
        dir.register_event(ObjectHandle::new(), Uid(50));

        let copy = dir.clone_entity(source);
        assert!(copy.is_some());
        let copy = copy.unwrap();
        assert_ne!(copy, source);
        assert_eq!(dir.entity(copy).unwrap().uid, Uid(51));
        assert_eq!(dir.entity_count(), 2);
    }

    #[test]
    fn test_clone_missing_entity() {
        let mut dir = ObjectDirectory::new();
        assert!(dir.clone_entity(ObjectHandle::new()).is_none());
    }
}
