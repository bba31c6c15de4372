//! Variable handler registry - the typed property setters each node carries.
//!
//! Level files configure nodes with string key/value pairs. Every node owns a
//! table from property name to a typed setter; the raw string is parsed once
//! according to the declared [`VarType`] before the setter sees it.

use std::collections::BTreeMap;

use super::EventNode;
use crate::error::VarError;

/// Declared type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Int,
    Float,
    Bool,
    Str,
    /// A named choice; the setter validates the trimmed string.
    Enum(&'static str),
}

/// A parsed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum VarValue {
    Int(i32),
    Float(f32),
    Bool(bool),
    Str(String),
}

impl VarValue {
    /// Parse a raw property string as `ty`. `name` is only used in errors.
    pub fn parse(ty: VarType, name: &str, raw: &str) -> Result<Self, VarError> {
        let malformed = |reason: String| VarError::Malformed {
            name: name.to_string(),
            value: raw.to_string(),
            reason,
        };
        match ty {
            VarType::Int => raw
                .trim()
                .parse::<i32>()
                .map(VarValue::Int)
                .map_err(|e| malformed(e.to_string())),
            VarType::Float => {
                let value = raw.trim().parse::<f32>().map_err(|e| malformed(e.to_string()))?;
                if !value.is_finite() {
                    return Err(malformed("not a finite number".into()));
                }
                Ok(VarValue::Float(value))
            }
            VarType::Bool => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(VarValue::Bool(true)),
                "false" | "0" => Ok(VarValue::Bool(false)),
                _ => Err(malformed("expected true or false".into())),
            },
            VarType::Str => Ok(VarValue::Str(raw.to_string())),
            VarType::Enum(_) => Ok(VarValue::Str(raw.trim().to_string())),
        }
    }

    /// The value as an integer, or a type mismatch.
    pub fn as_int(&self) -> Result<i32, VarError> {
        match self {
            VarValue::Int(v) => Ok(*v),
            other => Err(mismatch("int", other)),
        }
    }

    /// The value as a float. Integers widen.
    pub fn as_float(&self) -> Result<f32, VarError> {
        match self {
            VarValue::Float(v) => Ok(*v),
            VarValue::Int(v) => Ok(*v as f32),
            other => Err(mismatch("float", other)),
        }
    }

    /// The value as a flag.
    pub fn as_bool(&self) -> Result<bool, VarError> {
        match self {
            VarValue::Bool(v) => Ok(*v),
            other => Err(mismatch("bool", other)),
        }
    }

    /// Take the value as a string. Enum choices count as strings.
    pub fn into_string(self) -> Result<String, VarError> {
        match self {
            VarValue::Str(v) => Ok(v),
            other => Err(mismatch("string", &other)),
        }
    }
}

fn mismatch(expected: &'static str, value: &VarValue) -> VarError {
    VarError::Malformed {
        name: String::new(),
        value: format!("{value:?}"),
        reason: format!("expected {expected}"),
    }
}

/// Setter invoked with an already parsed value.
pub type VarSetter = fn(&mut EventNode, VarValue) -> Result<(), VarError>;

/// One registered property.
#[derive(Debug, Clone, Copy)]
pub struct VarHandler {
    pub ty: VarType,
    pub set: VarSetter,
}

/// Per-node table of property handlers.
#[derive(Debug, Clone, Default)]
pub struct VarHandlers {
    handlers: BTreeMap<&'static str, VarHandler>,
}

impl VarHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. A later registration under the same name replaces
    /// the earlier one.
    pub fn register(&mut self, name: &'static str, ty: VarType, set: VarSetter) {
        self.handlers.insert(name, VarHandler { ty, set });
    }

    /// Handler registered under `name`.
    pub fn get(&self, name: &str) -> Option<VarHandler> {
        self.handlers.get(name).copied()
    }

    /// True if a handler is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered property names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    /// Number of registered properties.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Register the handlers every node kind shares.
pub fn register_base_handlers(handlers: &mut VarHandlers) {
    handlers.register("delay", VarType::Float, set_delay);
}

fn set_delay(node: &mut EventNode, value: VarValue) -> Result<(), VarError> {
    let seconds = value.as_float()?;
    if seconds < 0.0 {
        return Err(VarError::OutOfRange {
            name: "delay".into(),
            value: seconds.to_string(),
        });
    }
    node.delay_seconds = seconds;
    tracing::debug!(uid = node.uid.0, delay = seconds, "apply_var: delay set");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(VarValue::parse(VarType::Int, "n", " 42 "), Ok(VarValue::Int(42)));
        assert!(matches!(
            VarValue::parse(VarType::Int, "n", "forty"),
            Err(VarError::Malformed { .. })
        ));
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(VarValue::parse(VarType::Float, "d", "1.5"), Ok(VarValue::Float(1.5)));
        assert!(VarValue::parse(VarType::Float, "d", "NaN").is_err());
        assert!(VarValue::parse(VarType::Float, "d", "soon").is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(VarValue::parse(VarType::Bool, "b", "TRUE"), Ok(VarValue::Bool(true)));
        assert_eq!(VarValue::parse(VarType::Bool, "b", "0"), Ok(VarValue::Bool(false)));
        assert!(VarValue::parse(VarType::Bool, "b", "maybe").is_err());
    }

    #[test]
    fn test_string_keeps_raw_value() {
        assert_eq!(
            VarValue::parse(VarType::Str, "message", "  Hello  "),
            Ok(VarValue::Str("  Hello  ".into()))
        );
        assert_eq!(
            VarValue::parse(VarType::Enum("operation"), "operation", " add "),
            Ok(VarValue::Str("add".into()))
        );
    }

    #[test]
    fn test_last_registration_wins() {
        fn first(_: &mut EventNode, _: VarValue) -> Result<(), VarError> {
            Ok(())
        }
        fn second(_: &mut EventNode, _: VarValue) -> Result<(), VarError> {
            Err(VarError::KindMismatch { kind: "test" })
        }

        let mut handlers = VarHandlers::new();
        handlers.register("x", VarType::Int, first);
        handlers.register("x", VarType::Str, second);

        assert_eq!(handlers.len(), 1);
        assert_eq!(handlers.get("x").map(|h| h.ty), Some(VarType::Str));
    }

    #[test]
    fn test_base_handlers() {
        let mut handlers = VarHandlers::new();
        register_base_handlers(&mut handlers);
        assert!(handlers.contains("delay"));
        assert_eq!(handlers.names().collect::<Vec<_>>(), vec!["delay"]);
    }
}
