//! Boundary to the host's table of stock event effects.

use level_world::{LevelWorld, ObjectHandle, Uid};
use serde::{Deserialize, Serialize};

use crate::node::StockKind;

/// One call into the stock effect table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInvocation {
    pub uid: Uid,
    pub handle: ObjectHandle,
    pub kind: StockKind,
    pub on: bool,
}

/// Effects of the built-in event kinds, provided by the host.
pub trait StockEffects {
    /// Apply the effect. Returning `Some(signal)` forwards that signal to
    /// the node's links.
    fn apply(&mut self, world: &mut LevelWorld, invocation: &StockInvocation) -> Option<bool>;
}

/// Minimal stock table: relay kinds forward their signal, everything else
/// is observed only.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelayStockEffects;

impl StockEffects for RelayStockEffects {
    fn apply(&mut self, _world: &mut LevelWorld, invocation: &StockInvocation) -> Option<bool> {
        match invocation.kind {
            StockKind::Delay | StockKind::Switch => Some(invocation.on),
            StockKind::Invert => Some(!invocation.on),
            _ => {
                tracing::debug!(
                    uid = invocation.uid.0,
                    kind = invocation.kind.name(),
                    on = invocation.on,
                    "stock effect"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation(kind: StockKind, on: bool) -> StockInvocation {
        StockInvocation {
            uid: Uid(1),
            handle: ObjectHandle::nil(),
            kind,
            on,
        }
    }

    #[test]
    fn test_relay_kinds_forward() {
        let mut world = LevelWorld::new();
        let mut stock = RelayStockEffects;

        assert_eq!(stock.apply(&mut world, &invocation(StockKind::Delay, true)), Some(true));
        assert_eq!(stock.apply(&mut world, &invocation(StockKind::Switch, false)), Some(false));
        assert_eq!(stock.apply(&mut world, &invocation(StockKind::Invert, true)), Some(false));
        assert_eq!(stock.apply(&mut world, &invocation(StockKind::Explode, true)), None);
    }
}
