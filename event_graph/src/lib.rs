//! # Event Graph
//!
//! Level logic as a directed graph of event nodes. Doors, goals, scripted
//! sequences and conditional gates are all nodes; activating one runs its
//! kind's `turn_on`/`turn_off` and usually forwards the signal along its links.
//!
//! ## Core Components
//!
//! - **node**: event nodes, kinds and the string-keyed property protocol
//! - **catalog**: per-kind behaviour and configuration
//! - **goals**: arithmetic and comparison over named goal counters
//! - **graph**: graph storage, activation, propagation and the tick driver
//! - **level**: level definitions loaded from TOML or JSON
//!
//! The graph is single-threaded. All mutation happens inside
//! [`LevelLogic`] calls made by one driver.

pub mod catalog;
pub mod error;
pub mod goals;
pub mod graph;
pub mod level;
pub mod node;

pub use catalog::{behavior, Behavior, NodeState};
pub use error::*;
pub use goals::*;
pub use graph::*;
pub use level::*;
pub use node::*;
