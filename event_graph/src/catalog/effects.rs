//! Kinds with a direct effect on the level world.

use super::{default_process, no_handlers, noop, Behavior};
use crate::graph::LevelLogic;
use crate::node::{NodeIndex, VarHandlers, VarType};

// --- CloneEntity ------------------------------------------------------------

pub const CLONE_ENTITY: Behavior = Behavior {
    turn_on: clone_entity_turn_on,
    turn_off: noop,
    process: default_process,
    register_handlers: no_handlers,
};

fn clone_entity_turn_on(logic: &mut LevelLogic, index: NodeIndex) {
    let node = logic.graph.node(index);
    let uid = node.uid;
    let links = node.links.clone();

    for link in links {
        match logic.world.objects.clone_entity(link) {
            Some(copy) => {
                tracing::debug!(uid = uid.0, source = %link, %copy, "cloned linked entity")
            }
            None => tracing::warn!(uid = uid.0, %link, "CloneEntity link is not an entity"),
        }
    }
}

// --- SetCollisionPlayer -----------------------------------------------------

pub const SET_COLLISION_PLAYER: Behavior = Behavior {
    turn_on: enable_player_collision,
    turn_off: disable_player_collision,
    process: default_process,
    register_handlers: no_handlers,
};

fn enable_player_collision(logic: &mut LevelLogic, index: NodeIndex) {
    set_player_collision(logic, index, true);
}

fn disable_player_collision(logic: &mut LevelLogic, index: NodeIndex) {
    set_player_collision(logic, index, false);
}

fn set_player_collision(logic: &mut LevelLogic, index: NodeIndex, collides: bool) {
    let uid = logic.graph.node(index).uid;
    tracing::debug!(uid = uid.0, collides, "setting player world collision");
    logic.world.player.collides_with_world = collides;
}

// --- HUDMessage -------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HudMessageState {
    pub message: String,
    /// Display time in milliseconds.
    pub duration: Option<i32>,
}

pub const HUD_MESSAGE: Behavior = Behavior {
    turn_on: hud_message_turn_on,
    turn_off: hud_message_turn_off,
    process: default_process,
    register_handlers: hud_message_handlers,
};

fn hud_message_handlers(handlers: &mut VarHandlers) {
    handlers.register("message", VarType::Str, |node, value| {
        node.payload_mut::<HudMessageState>()?.message = value.into_string()?;
        Ok(())
    });
    handlers.register("duration", VarType::Int, |node, value| {
        node.payload_mut::<HudMessageState>()?.duration = Some(value.as_int()?);
        Ok(())
    });
}

fn hud_message_turn_on(logic: &mut LevelLogic, index: NodeIndex) {
    let Some(state) = logic.graph.node(index).payload::<HudMessageState>() else {
        return;
    };
    let (message, duration) = (state.message.clone(), state.duration.unwrap_or(0));
    logic.world.hud.show(message, duration);
}

fn hud_message_turn_off(logic: &mut LevelLogic, _: NodeIndex) {
    logic.world.hud.clear();
}

// --- PlayVideo --------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayVideoState {
    pub filename: Option<String>,
}

pub const PLAY_VIDEO: Behavior = Behavior {
    turn_on: play_video_turn_on,
    turn_off: noop,
    process: default_process,
    register_handlers: play_video_handlers,
};

fn play_video_handlers(handlers: &mut VarHandlers) {
    handlers.register("filename", VarType::Str, |node, value| {
        node.payload_mut::<PlayVideoState>()?.filename = Some(value.into_string()?);
        Ok(())
    });
}

fn play_video_turn_on(logic: &mut LevelLogic, index: NodeIndex) {
    let node = logic.graph.node(index);
    match node.payload::<PlayVideoState>().and_then(|s| s.filename.clone()) {
        Some(filename) => logic.world.media.play_video(filename),
        None => tracing::error!(uid = node.uid.0, "PlayVideo event has no filename"),
    }
}

// --- SetLevelHardness -------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelHardnessState {
    /// Rock hardness, 0-100.
    pub hardness: i32,
}

pub const SET_LEVEL_HARDNESS: Behavior = Behavior {
    turn_on: level_hardness_turn_on,
    turn_off: noop,
    process: default_process,
    register_handlers: level_hardness_handlers,
};

fn level_hardness_handlers(handlers: &mut VarHandlers) {
    handlers.register("hardness", VarType::Int, |node, value| {
        node.payload_mut::<LevelHardnessState>()?.hardness = value.as_int()?.clamp(0, 100);
        Ok(())
    });
}

fn level_hardness_turn_on(logic: &mut LevelLogic, index: NodeIndex) {
    let Some(hardness) = logic
        .graph
        .node(index)
        .payload::<LevelHardnessState>()
        .map(|s| s.hardness)
    else {
        return;
    };
    tracing::info!(
        from = logic.world.settings.default_rock_hardness,
        to = hardness,
        "setting level hardness"
    );
    logic.world.settings.set_rock_hardness(hardness);
}
