//! The cycle-free intermediate tree.
//!
//! [`Rendered`] is what the transformer produces and the renderer consumes.
//! Every special runtime value has already been reduced to a string
//! substitute, so a `Rendered` tree is plain JSON data: it is finite, it holds
//! no shared references, and it implements [`Serialize`] so it can be handed
//! to any serde format.
//!
//! ```rust
//! use safe_stringify::{to_rendered, Object, Rendered, StringifyOptions};
//!
//! let obj = Object::new();
//! obj.set("me", obj.clone());
//!
//! let tree = to_rendered(&obj.into(), &StringifyOptions::default()).unwrap();
//! let me = tree.as_object().and_then(|m| m.get("me"));
//! assert_eq!(me.and_then(Rendered::as_str), Some("[Circular]"));
//! ```

use crate::RenderedMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// 2^53, the bound below which every integer is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A depth- and cycle-safe rendered node.
///
/// `Number` only ever holds finite values; non-finite numbers are turned into
/// `String` substitutes before they reach this tree.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Rendered {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Rendered>),
    Object(RenderedMap),
}

impl Rendered {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Rendered::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Rendered::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Rendered::Array(_) | Rendered::Object(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Rendered::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Rendered::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Rendered::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Rendered>> {
        match self {
            Rendered::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&RenderedMap> {
        match self {
            Rendered::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

/// Compact JSON text.
impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::render::render(self, 0).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Serialize for Rendered {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Rendered::Null => serializer.serialize_unit(),
            Rendered::Bool(b) => serializer.serialize_bool(*b),
            // integral values print without a fraction in every format
            Rendered::Number(n) if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Rendered::Number(n) => serializer.serialize_f64(*n),
            Rendered::String(s) => serializer.serialize_str(s),
            Rendered::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Rendered::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl From<bool> for Rendered {
    fn from(value: bool) -> Self {
        Rendered::Bool(value)
    }
}

impl From<f64> for Rendered {
    fn from(value: f64) -> Self {
        Rendered::Number(value)
    }
}

impl From<String> for Rendered {
    fn from(value: String) -> Self {
        Rendered::String(value)
    }
}

impl From<&str> for Rendered {
    fn from(value: &str) -> Self {
        Rendered::String(value.to_string())
    }
}

impl From<Vec<Rendered>> for Rendered {
    fn from(value: Vec<Rendered>) -> Self {
        Rendered::Array(value)
    }
}

impl From<RenderedMap> for Rendered {
    fn from(value: RenderedMap) -> Self {
        Rendered::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert!(Rendered::Null.is_null());
        assert_eq!(Rendered::from(true).as_bool(), Some(true));
        assert_eq!(Rendered::from(1.5).as_f64(), Some(1.5));
        assert_eq!(Rendered::from("x").as_str(), Some("x"));
        assert!(Rendered::from(vec![]).is_composite());
        assert!(!Rendered::from("x").is_composite());
    }

    #[test]
    fn test_display_is_compact_json() {
        let mut map = RenderedMap::new();
        map.insert("a".to_string(), Rendered::from(1.0));
        map.insert(
            "b".to_string(),
            Rendered::from(vec![Rendered::Null, Rendered::from("x")]),
        );
        assert_eq!(Rendered::from(map).to_string(), r#"{"a":1,"b":[null,"x"]}"#);
    }

    #[test]
    fn test_serialize_writes_integral_numbers_as_integers() {
        let tree = Rendered::from(vec![Rendered::from(3.0), Rendered::from(2.5)]);
        assert_eq!(serde_json::to_string(&tree).unwrap(), "[3,2.5]");
    }
}
