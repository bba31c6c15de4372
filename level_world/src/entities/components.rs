//! Component definitions for entities.

use serde::{Deserialize, Serialize};

/// Number of weapon slots tracked by the AI.
pub const WEAPON_SLOTS: usize = 64;

/// Number of ammo types tracked by the AI.
pub const AMMO_TYPES: usize = 32;

/// Inventory component for entities that carry items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InventoryComponent {
    pub items: Vec<ItemStack>,
}

/// A stack of items in inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item_class: String,
    pub quantity: u32,
}

/// How an AI engages targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AttackStyle {
    #[default]
    Default,
    Evasive,
    StandGround,
    Direct,
}

/// How an AI cooperates with the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Cooperation {
    #[default]
    Uncooperative,
    Species,
    Cooperative,
}

/// AI targeting and armament state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiComponent {
    pub custom_attack_range: f32,
    pub use_custom_attack_range: bool,
    pub attack_style: AttackStyle,
    pub cooperation: Cooperation,
    pub cover_style: i32,
    pub has_weapon: Vec<bool>,
    pub clip_ammo: Vec<i32>,
    pub ammo: Vec<i32>,
    pub current_primary_weapon: i32,
    pub current_secondary_weapon: i32,
}

impl Default for AiComponent {
    fn default() -> Self {
        Self {
            custom_attack_range: 0.0,
            use_custom_attack_range: false,
            attack_style: AttackStyle::Default,
            cooperation: Cooperation::Uncooperative,
            cover_style: 0,
            has_weapon: vec![false; WEAPON_SLOTS],
            clip_ammo: vec![0; WEAPON_SLOTS],
            ammo: vec![0; AMMO_TYPES],
            current_primary_weapon: -1,
            current_secondary_weapon: -1,
        }
    }
}

impl AiComponent {
    /// Copy the per-slot weapon and ammo tables from another AI.
    pub fn copy_armament_from(&mut self, other: &AiComponent) {
        self.has_weapon = other.has_weapon.clone();
        self.clip_ammo = other.clip_ammo.clone();
        self.ammo = other.ammo.clone();
        self.current_primary_weapon = other.current_primary_weapon;
        self.current_secondary_weapon = other.current_secondary_weapon;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ai_tables() {
        let ai = AiComponent::default();
        assert_eq!(ai.has_weapon.len(), WEAPON_SLOTS);
        assert_eq!(ai.clip_ammo.len(), WEAPON_SLOTS);
        assert_eq!(ai.ammo.len(), AMMO_TYPES);
        assert_eq!(ai.current_primary_weapon, -1);
    }

    #[test]
    fn test_copy_armament() {
        let mut source = AiComponent::default();
        source.has_weapon[3] = true;
        source.clip_ammo[3] = 12;
        source.ammo[1] = 40;
        source.current_primary_weapon = 3;

        let mut target = AiComponent::default();
        target.copy_armament_from(&source);

        assert!(target.has_weapon[3]);
        assert_eq!(target.clip_ammo[3], 12);
        assert_eq!(target.ammo[1], 40);
        assert_eq!(target.current_primary_weapon, 3);
    }
}
