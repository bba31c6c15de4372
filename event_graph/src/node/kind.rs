//! Event type enumeration: the stock kinds handled by the host's built-in
//! effect table and the extended kinds implemented by this crate.

use serde::{Deserialize, Serialize};

/// Names are matched ignoring case, spaces and underscores.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != ' ')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

macro_rules! stock_kinds {
    ($($variant:ident = $id:literal => $name:literal,)*) => {
        /// Built-in event kinds whose effects live in the host's stock table.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum StockKind {
            $($variant,)*
        }

        impl StockKind {
            /// Every stock kind in id order.
            pub const ALL: &'static [StockKind] = &[$(StockKind::$variant,)*];

            pub fn id(&self) -> i32 {
                match self {
                    $(StockKind::$variant => $id,)*
                }
            }

            /// Authored name, as written in level files.
            pub fn name(&self) -> &'static str {
                match self {
                    $(StockKind::$variant => $name,)*
                }
            }

            pub fn from_id(id: i32) -> Option<Self> {
                match id {
                    $($id => Some(StockKind::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

stock_kinds! {
    Attack = 1 => "Attack",
    BoltState = 2 => "Bolt_State",
    ContinuousDamage = 3 => "Continuous_Damage",
    CyclicTimer = 4 => "Cyclic_Timer",
    DropPointMarker = 5 => "Drop_Point_Marker",
    Explode = 6 => "Explode",
    FollowPlayer = 7 => "Follow_Player",
    FollowWaypoints = 8 => "Follow_Waypoints",
    GiveItemToPlayer = 9 => "Give_Item_To_Player",
    GoalCreate = 10 => "Goal_Create",
    GoalCheck = 11 => "Goal_Check",
    GoalSet = 12 => "Goal_Set",
    Goto = 13 => "Goto",
    GotoPlayer = 14 => "Goto_Player",
    Heal = 15 => "Heal",
    Invert = 16 => "Invert",
    LoadLevel = 17 => "Load_Level",
    LookAt = 18 => "Look_At",
    MakeInvulnerable = 19 => "Make_Invulnerable",
    MakeFly = 20 => "Make_Fly",
    MakeWalk = 21 => "Make_Walk",
    Message = 22 => "Message",
    MusicStart = 23 => "Music_Start",
    MusicStop = 24 => "Music_Stop",
    ParticleState = 25 => "Particle_State",
    PlayAnimation = 26 => "Play_Animation",
    PlaySound = 27 => "Play_Sound",
    SlayObject = 28 => "Slay_Object",
    RemoveObject = 29 => "Remove_Object",
    SetAIMode = 30 => "Set_AI_Mode",
    SetLightState = 31 => "Set_Light_State",
    SetLiquidDepth = 32 => "Set_Liquid_Depth",
    SetFriendliness = 33 => "Set_Friendliness",
    ShakePlayer = 34 => "Shake_Player",
    ShootAt = 35 => "Shoot_At",
    ShootOnce = 36 => "Shoot_Once",
    Armor = 37 => "Armor",
    SpawnObject = 38 => "Spawn_Object",
    SwapTextures = 39 => "Swap_Textures",
    Switch = 40 => "Switch",
    SwitchModel = 41 => "Switch_Model",
    Teleport = 42 => "Teleport",
    WhenDead = 43 => "When_Dead",
    SetGravity = 44 => "Set_Gravity",
    Alarm = 45 => "Alarm",
    AlarmSiren = 46 => "Alarm_Siren",
    GoUndercover = 47 => "Go_Undercover",
    Delay = 48 => "Delay",
    MonitorState = 49 => "Monitor_State",
    Unhide = 50 => "UnHide",
    PushRegionState = 51 => "Push_Region_State",
    WhenHit = 52 => "When_Hit",
    HeadlampState = 53 => "Headlamp_State",
    ItemPickupState = 54 => "Item_Pickup_State",
    Cutscene = 55 => "Cutscene",
    StripPlayerWeapons = 56 => "Strip_Player_Weapons",
    FogState = 57 => "Fog_State",
    Detach = 58 => "Detach",
    SkyboxState = 59 => "Skybox_State",
    ForceMonitorUpdate = 60 => "Force_Monitor_Update",
    BlackOutPlayer = 61 => "Black_Out_Player",
    TurnOffPhysics = 62 => "Turn_Off_Physics",
    TeleportPlayer = 63 => "Teleport_Player",
    HolsterWeapon = 64 => "Holster_Weapon",
    HolsterPlayerWeapon = 65 => "Holster_Player_Weapon",
    ModifyRotatingMover = 66 => "Modify_Rotating_Mover",
    ClearEndgameIfKilled = 67 => "Clear_Endgame_If_Killed",
    WinPs2Demo = 68 => "Win_PS2_Demo",
    EnableNavpoint = 69 => "Enable_Navpoint",
    PlayVclip = 70 => "Play_Vclip",
    Endgame = 71 => "Endgame",
    MoverPause = 72 => "Mover_Pause",
    CountdownBegin = 73 => "Countdown_Begin",
    CountdownEnd = 74 => "Countdown_End",
    WhenCountdownOver = 75 => "When_Countdown_Over",
    ActivateCapekShield = 76 => "Activate_Capek_Shield",
    WhenEnterVehicle = 77 => "When_Enter_Vehicle",
    WhenTryExitVehicle = 78 => "When_Try_Exit_Vehicle",
    FireWeaponNoAnim = 79 => "Fire_Weapon_No_Anim",
    NeverLeaveVehicle = 80 => "Never_Leave_Vehicle",
    DropWeapon = 81 => "Drop_Weapon",
    IgniteEntity = 82 => "Ignite_Entity",
    WhenCutsceneOver = 83 => "When_Cutscene_Over",
    WhenCountdownReaches = 84 => "When_Countdown_Reaches",
    DisplayFullscreenImage = 85 => "Display_Fullscreen_Image",
    DefuseNuke = 86 => "Defuse_Nuke",
    WhenLifeReaches = 87 => "When_Life_Reaches",
    WhenArmorReaches = 88 => "When_Armor_Reaches",
    ReverseMover = 89 => "Reverse_Mover",
}

macro_rules! extended_kinds {
    ($($variant:ident = $id:literal => $name:literal,)*) => {
        /// Every event kind a node can have.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum EventType {
            Stock(StockKind),
            $($variant,)*
        }

        impl EventType {
            /// Extended kinds in id order.
            pub const EXTENDED: &'static [EventType] = &[$(EventType::$variant,)*];

            pub fn id(&self) -> i32 {
                match self {
                    EventType::Stock(kind) => kind.id(),
                    $(EventType::$variant => $id,)*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    EventType::Stock(kind) => kind.name(),
                    $(EventType::$variant => $name,)*
                }
            }

            pub fn from_id(id: i32) -> Option<Self> {
                match id {
                    $($id => Some(EventType::$variant),)*
                    _ => StockKind::from_id(id).map(EventType::Stock),
                }
            }
        }
    };
}

extended_kinds! {
    SetVar = 90 => "SetVar",
    CloneEntity = 91 => "Clone_Entity",
    SetCollisionPlayer = 92 => "Set_Player_World_Collide",
    SwitchRandom = 93 => "Switch_Random",
    DifficultyGate = 94 => "Difficulty_Gate",
    HudMessage = 95 => "HUD_Message",
    PlayVideo = 96 => "Play_Video",
    SetLevelHardness = 97 => "Set_Level_Hardness",
    Sequence = 98 => "Sequence",
    ClearQueued = 99 => "Clear_Queued",
    RemoveLink = 100 => "Remove_Link",
    FixedDelay = 101 => "Fixed_Delay",
    AddLink = 102 => "Add_Link",
    ValidGate = 103 => "Valid_Gate",
    GoalMath = 104 => "Goal_Math",
    GoalGate = 105 => "Goal_Gate",
    EnvironmentGate = 106 => "Environment_Gate",
    InsideGate = 107 => "Inside_Gate",
}

impl EventType {
    /// Look up a kind by its authored name.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize(name);
        if wanted == "setcollisionplayer" {
            return Some(EventType::SetCollisionPlayer);
        }
        EventType::EXTENDED
            .iter()
            .copied()
            .chain(StockKind::ALL.iter().copied().map(EventType::Stock))
            .find(|kind| normalize(kind.name()) == wanted)
    }

    pub fn is_stock(&self) -> bool {
        matches!(self, EventType::Stock(_))
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_ids_are_contiguous() {
        assert_eq!(StockKind::ALL.len(), 89);
        for (i, kind) in StockKind::ALL.iter().enumerate() {
            assert_eq!(kind.id(), i as i32 + 1);
        }
    }

    #[test]
    fn test_extended_ids() {
        assert_eq!(EventType::SetVar.id(), 90);
        assert_eq!(EventType::AddLink.id(), 102);
        assert_eq!(EventType::from_id(98), Some(EventType::Sequence));
        assert_eq!(EventType::from_id(48), Some(EventType::Stock(StockKind::Delay)));
        assert_eq!(EventType::from_id(0), None);
        assert_eq!(EventType::from_id(500), None);
    }

    #[test]
    fn test_from_name_variants() {
        assert_eq!(EventType::from_name("Switch_Random"), Some(EventType::SwitchRandom));
        assert_eq!(EventType::from_name("switchrandom"), Some(EventType::SwitchRandom));
        assert_eq!(EventType::from_name("HUD Message"), Some(EventType::HudMessage));
        assert_eq!(EventType::from_name("SetCollisionPlayer"), Some(EventType::SetCollisionPlayer));
        assert_eq!(
            EventType::from_name("Goal_Create"),
            Some(EventType::Stock(StockKind::GoalCreate))
        );
        assert_eq!(EventType::from_name("Not_A_Kind"), None);
    }
}
