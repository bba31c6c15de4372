//! Error types for property application, goal logic, graph propagation and
//! level loading. None of these is fatal: each is reported where it is
//! absorbed and the affected node degrades to a no-op.

use level_world::Uid;
use thiserror::Error;

/// Configuration errors raised while applying a property to a node.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VarError {
    #[error("unsupported property '{name}' for {kind} events")]
    UnknownProperty { name: String, kind: &'static str },

    #[error("malformed value '{value}' for property '{name}': {reason}")]
    Malformed {
        name: String,
        value: String,
        reason: String,
    },

    #[error("'{value}' is not a valid {what}")]
    UnknownVariant { what: &'static str, value: String },

    #[error("value {value} for property '{name}' is out of range")]
    OutOfRange { name: String, value: String },

    #[error("property handler does not match the node's {kind} state")]
    KindMismatch { kind: &'static str },

    #[error("no event with handle {0}")]
    UnknownNode(level_world::ObjectHandle),
}

/// Refusals from the goal evaluator. The counter is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoalError {
    #[error("division by zero")]
    DivideByZero,

    #[error("negative exponent {0}")]
    NegativeExponent(i32),

    #[error("arithmetic overflow")]
    Overflow,

    #[error("no level or persistent goal named '{0}'")]
    MissingGoal(String),

    #[error("unknown goal operation '{0}'")]
    UnknownOperation(String),

    #[error("unknown goal test '{0}'")]
    UnknownTest(String),
}

/// Graph-resolution errors hit during propagation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("no event node with uid {0}")]
    UnknownUid(Uid),

    #[error("no event node with handle {0}")]
    UnknownNode(level_world::ObjectHandle),

    #[error("node {uid} reached its visit limit of {limit} for this activation")]
    VisitLimit { uid: Uid, limit: u32 },

    #[error("propagation depth limit of {0} reached")]
    DepthLimit(u32),
}

/// Errors raised while loading a level definition.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse level TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse level JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported level file extension '{0}'")]
    UnsupportedFormat(String),

    #[error("event {uid} has unknown kind '{kind}'")]
    UnknownKind { uid: Uid, kind: String },

    #[error("uid {0} is already used by another object")]
    DuplicateUid(Uid),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = VarError::UnknownProperty {
            name: "speed".into(),
            kind: "Sequence",
        };
        assert_eq!(err.to_string(), "unsupported property 'speed' for Sequence events");

        assert_eq!(GoalError::NegativeExponent(-2).to_string(), "negative exponent -2");
        assert_eq!(
            LevelError::UnknownKind {
                uid: Uid(4),
                kind: "Teleport_Everyone".into()
            }
            .to_string(),
            "event 4 has unknown kind 'Teleport_Everyone'"
        );
    }
}
