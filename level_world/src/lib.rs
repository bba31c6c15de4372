//! # Level World
//!
//! The host side of the level logic engine: every collaborator the event graph
//! consumes at its boundary. Objects and their handles, trigger volumes and
//! rooms, countdown timestamps, level settings, the local player, HUD and
//! video sinks, and the goal counters that puzzle logic reads and mutates.
//!
//! This crate holds no graph logic. It is the single source of truth for the
//! state that event nodes observe and change.

pub mod entities;
pub mod mechanics;
pub mod timer;
pub mod world_state;

pub use entities::*;
pub use mechanics::*;
pub use timer::*;
pub use world_state::*;
