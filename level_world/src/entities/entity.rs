//! Entity definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{AiComponent, InventoryComponent, ObjectHandle, Orientation, Uid, Vec3};

/// A living (or once living) actor in the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(skip, default = "ObjectHandle::new")]
    pub handle: ObjectHandle,
    pub uid: Uid,
    pub name: String,
    /// Entity class from the level's entity table.
    pub class_name: String,
    #[serde(default)]
    pub pos: Vec3,
    #[serde(default)]
    pub orient: Orientation,
    #[serde(default)]
    pub entity_flags: u32,
    #[serde(default)]
    pub entity_flags2: u32,
    #[serde(default)]
    pub obj_flags: u32,
    #[serde(default)]
    pub drop_item_class: Option<String>,
    #[serde(default = "default_health")]
    pub health: f32,
    /// Room the entity currently stands in.
    #[serde(default)]
    pub room: Option<Uid>,
    #[serde(default)]
    pub inventory: InventoryComponent,
    #[serde(default)]
    pub ai: AiComponent,
    /// Host-specific components carried through unchanged.
    #[serde(default)]
    pub extra_components: HashMap<String, serde_json::Value>,
}

fn default_health() -> f32 {
    100.0
}

impl Entity {
    /// Create a new entity with the given uid, name and class.
    pub fn new(uid: Uid, name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            handle: ObjectHandle::new(),
            uid,
            name: name.into(),
            class_name: class_name.into(),
            pos: Vec3::default(),
            orient: Orientation::default(),
            entity_flags: 0,
            entity_flags2: 0,
            obj_flags: 0,
            drop_item_class: None,
            health: default_health(),
            room: None,
            inventory: InventoryComponent::default(),
            ai: AiComponent::default(),
            extra_components: HashMap::new(),
        }
    }

    /// Builder: place the entity.
    pub fn at(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    /// Builder: set the entity's room.
    pub fn in_room(mut self, room: Uid) -> Self {
        self.room = Some(room);
        self
    }

    /// Builder: set the entity's health.
    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Build a duplicate of this entity under a new handle and uid.
    ///
    /// Copies placement, flags, drop item, inventory and the AI targeting and
    /// armament state. Health is reset to the class default.
    pub fn duplicate(&self, uid: Uid) -> Self {
        let mut copy = Entity::new(uid, self.name.clone(), self.class_name.clone());
        copy.pos = self.pos;
        copy.orient = self.orient;
        copy.entity_flags = self.entity_flags;
        copy.entity_flags2 = self.entity_flags2;
        copy.obj_flags = self.obj_flags;
        copy.drop_item_class = self.drop_item_class.clone();
        copy.room = self.room;
        copy.inventory = self.inventory.clone();
        copy.ai.custom_attack_range = self.ai.custom_attack_range;
        copy.ai.use_custom_attack_range = self.ai.use_custom_attack_range;
        copy.ai.attack_style = self.ai.attack_style;
        copy.ai.cooperation = self.ai.cooperation;
        copy.ai.cover_style = self.ai.cover_style;
        copy.ai.copy_armament_from(&self.ai);
        copy.extra_components = self.extra_components.clone();
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AttackStyle, ItemStack};

    #[test]
    fn test_new_entity() {
        let entity = Entity::new(Uid(7), "Guard", "merc_grunt");
        assert_eq!(entity.name, "Guard");
        assert!(entity.is_alive());
        assert!(entity.room.is_none());
    }

    #[test]
    fn test_extra_components_from_json() {
        let entity: Entity = serde_json::from_str(
            r#"{ "uid": 9, "name": "Drone", "class_name": "drone", "extra_components": { "hover_height": 2.5 } }"#,
        )
        .unwrap();
        assert_eq!(entity.extra_components["hover_height"], serde_json::json!(2.5));
        assert_eq!(entity.duplicate(Uid(10)).extra_components, entity.extra_components);
    }

    #[test]
    fn test_entity_death() {
        let entity = Entity::new(Uid(1), "Doomed", "miner").with_health(0.0);
        assert!(!entity.is_alive());
    }

    #[test]
    fn test_duplicate_copies_fields() {
        let mut original = Entity::new(Uid(3), "Sniper", "merc_sniper")
            .at(Vec3::new(4.0, 1.0, -2.0))
            .in_room(Uid(40))
            .with_health(35.0);
        original.entity_flags = 0x10;
        original.entity_flags2 = 0x4;
        original.ai.attack_style = AttackStyle::StandGround;
        original.ai.has_weapon[5] = true;
        original.inventory.items.push(ItemStack {
            item_class: "medkit".into(),
            quantity: 2,
        });

        let copy = original.duplicate(Uid(900));

        assert_ne!(copy.handle, original.handle);
        assert_eq!(copy.uid, Uid(900));
        assert_eq!(copy.pos, original.pos);
        assert_eq!(copy.room, Some(Uid(40)));
        assert_eq!(copy.entity_flags, 0x10);
        assert_eq!(copy.entity_flags2, 0x4);
        assert_eq!(copy.ai.attack_style, AttackStyle::StandGround);
        assert!(copy.ai.has_weapon[5]);
        assert_eq!(copy.inventory, original.inventory);
        assert!((copy.health - 100.0).abs() < f32::EPSILON);
    }
}
