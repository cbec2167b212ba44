//! Value classification.
//!
//! [`classify`] maps every [`Value`] to exactly one [`ValueKind`]. Host
//! window and node kinds are only reported when the caller supplies an
//! [`EnvironmentProbe`]; without one those checks are skipped and host
//! objects classify as plain `object`s.

use crate::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of semantic kinds the serializer distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    Undefined,
    Null,
    String,
    Number,
    Boolean,
    Function,
    Symbol,
    #[serde(rename = "bigint")]
    BigInt,
    Object,
    Array,
    Date,
    Error,
    #[serde(rename = "regexp")]
    RegExp,
    #[serde(alias = "node")]
    HostNode,
    #[serde(alias = "window")]
    HostWindowRoot,
}

impl ValueKind {
    /// Every kind, in declaration order.
    pub const ALL: [ValueKind; 15] = [
        ValueKind::Undefined,
        ValueKind::Null,
        ValueKind::String,
        ValueKind::Number,
        ValueKind::Boolean,
        ValueKind::Function,
        ValueKind::Symbol,
        ValueKind::BigInt,
        ValueKind::Object,
        ValueKind::Array,
        ValueKind::Date,
        ValueKind::Error,
        ValueKind::RegExp,
        ValueKind::HostNode,
        ValueKind::HostWindowRoot,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Function => "function",
            ValueKind::Symbol => "symbol",
            ValueKind::BigInt => "bigint",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::Date => "date",
            ValueKind::Error => "error",
            ValueKind::RegExp => "regexp",
            ValueKind::HostNode => "host-node",
            ValueKind::HostWindowRoot => "host-window-root",
        }
    }

    /// Kinds the transformer walks member by member.
    #[inline]
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, ValueKind::Object | ValueKind::Array)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognises values that belong to a graphical host environment.
///
/// The embedding application supplies a probe when it has such an
/// environment. Probes must be pure and must not fail; anything they do not
/// recognise is treated as an ordinary value.
///
/// # Examples
///
/// ```rust
/// use safe_stringify::{classify, EnvironmentProbe, Value, ValueKind};
///
/// struct EverythingIsAWindow;
///
/// impl EnvironmentProbe for EverythingIsAWindow {
///     fn is_window_root(&self, _value: &Value) -> bool {
///         true
///     }
///     fn is_node(&self, _value: &Value) -> bool {
///         false
///     }
/// }
///
/// let value = Value::from(1);
/// assert_eq!(classify(&value, None), ValueKind::Number);
/// assert_eq!(classify(&value, Some(&EverythingIsAWindow)), ValueKind::HostWindowRoot);
/// ```
pub trait EnvironmentProbe {
    /// Whether `value` is the environment's global root object.
    fn is_window_root(&self, value: &Value) -> bool;

    /// Whether `value` is a document node.
    fn is_node(&self, value: &Value) -> bool;

    /// The node name used in the `[<name>]` marker. `None` renders as `[Node]`.
    fn node_name(&self, _value: &Value) -> Option<String> {
        None
    }
}

/// Classifies a value. Total and side-effect free.
#[must_use]
pub fn classify(value: &Value, probe: Option<&dyn EnvironmentProbe>) -> ValueKind {
    match value {
        Value::Null => return ValueKind::Null,
        Value::Undefined => return ValueKind::Undefined,
        _ => {}
    }

    if let Some(probe) = probe {
        if probe.is_window_root(value) {
            return ValueKind::HostWindowRoot;
        }
        if probe.is_node(value) {
            return ValueKind::HostNode;
        }
    }

    match value {
        Value::Error(_) => ValueKind::Error,
        Value::Date(_) => ValueKind::Date,
        Value::RegExp(_) => ValueKind::RegExp,
        Value::Array(_) => ValueKind::Array,
        Value::String(_) => ValueKind::String,
        Value::Number(_) => ValueKind::Number,
        Value::Bool(_) => ValueKind::Boolean,
        Value::Function(_) => ValueKind::Function,
        Value::Symbol(_) => ValueKind::Symbol,
        Value::BigInt(_) => ValueKind::BigInt,
        Value::Object(_) | Value::Host(_) => ValueKind::Object,
        Value::Null => ValueKind::Null,
        Value::Undefined => ValueKind::Undefined,
    }
}
