//! Text rendering of [`Rendered`] trees.
//!
//! The layout matches what a JSON pretty-printer produces for the same
//! indentation: one member per line, `indent` spaces per nesting level,
//! `": "` between keys and values, and empty composites kept on one line.
//! An indentation of `0` yields compact output with no inserted whitespace.
//!
//! ```rust
//! use safe_stringify::{render, Rendered, RenderedMap};
//!
//! let mut map = RenderedMap::new();
//! map.insert("a".to_string(), Rendered::from(vec![Rendered::from(1.0)]));
//! map.insert("b".to_string(), Rendered::from(vec![]));
//! let tree = Rendered::from(map);
//!
//! assert_eq!(render(&tree, 0).unwrap(), r#"{"a":[1],"b":[]}"#);
//! assert_eq!(render(&tree, 2).unwrap(), "{\n  \"a\": [\n    1\n  ],\n  \"b\": []\n}");
//! ```

use crate::error::{Error, Result};
use crate::Rendered;
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::ser::PrettyFormatter;
use serde_json::value::RawValue;

/// Indentation widths above this are clamped.
pub const MAX_INDENT: usize = 10;

/// Renders a tree with `indent` spaces per nesting level.
///
/// # Errors
///
/// Fails only if the JSON writer reports an error.
pub fn render(node: &Rendered, indent: usize) -> Result<String> {
    let indent = indent.min(MAX_INDENT);
    if indent == 0 {
        return serde_json::to_string(&JsText(node)).map_err(Error::custom);
    }

    let spaces = b" ".repeat(indent);
    let mut output = Vec::with_capacity(256);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut output, PrettyFormatter::with_indent(&spaces));
    JsText(node)
        .serialize(&mut serializer)
        .map_err(Error::custom)?;
    String::from_utf8(output).map_err(Error::custom)
}

/// Formats a finite number the way a JavaScript runtime prints it.
///
/// Negative zero prints as `0`; magnitudes of at least `1e21` or below `1e-6`
/// use exponent notation with an explicit sign (`1e+21`, `1.5e-7`).
#[must_use]
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let text = format!("{:e}", n);
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => text,
        }
    } else {
        n.to_string()
    }
}

/// Serializes a tree with numbers written as JavaScript number text.
struct JsText<'a>(&'a Rendered);

impl Serialize for JsText<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Rendered::Number(n) if !n.is_finite() => serializer.serialize_unit(),
            Rendered::Number(n) => RawValue::from_string(format_number(*n))
                .map_err(S::Error::custom)?
                .serialize(serializer),
            Rendered::Array(elements) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    seq.serialize_element(&JsText(element))?;
                }
                seq.end()
            }
            Rendered::Object(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (key, value) in members.iter() {
                    map.serialize_entry(key, &JsText(value))?;
                }
                map.end()
            }
            scalar => scalar.serialize(serializer),
        }
    }
}
