//! # safe_stringify
//!
//! Turns arbitrary runtime values into readable, JSON-shaped text without
//! ever failing on the input.
//!
//! Plain JSON encoders give up on the values debugging output needs most:
//! self-referencing graphs, errors, functions, dates, big integers, `NaN`,
//! or objects whose getters throw. This crate walks a [`Value`] graph and
//! reduces every one of those to something printable.
//!
//! ## Key Features
//!
//! - **Cycle safe**: a composite seen earlier in the same call renders as `"[Circular]"`
//! - **Depth bounded**: anything nested past `max_depth` renders as `"[Max depth exceeded]"`
//! - **Failure contained**: a failing property becomes `"[Error extracting property: ...]"`
//!   and its siblings still render
//! - **Extensible**: per-kind handlers replace the built-in rendering
//! - **Sinks included**: console ([`Logger`]), HTML ([`HtmlLogger`]) and future
//!   results ([`log_async`])
//!
//! ## Quick Start
//!
//! ```rust
//! use safe_stringify::{serialize, Array, Object, Value};
//!
//! let user = Object::new();
//! user.set("name", "Alice");
//! user.set("scores", Array::from(vec![Value::from(1), Value::from(f64::NAN)]));
//! user.set("me", user.clone());
//!
//! let text = serialize(&user.into());
//! assert_eq!(
//!     text,
//!     "{\n  \"name\": \"Alice\",\n  \"scores\": [\n    1,\n    \"NaN\"\n  ],\n  \"me\": \"[Circular]\"\n}"
//! );
//! ```
//!
//! ### Typed data
//!
//! Anything implementing `Serialize` converts with [`to_value`]:
//!
//! ```rust
//! use safe_stringify::{serialize_compact, to_value, StringifyOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = to_value(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(serialize_compact(&value, &StringifyOptions::default()), r#"{"x":1,"y":2}"#);
//! ```
//!
//! ### Dynamic values with the `value!` macro
//!
//! ```rust
//! use safe_stringify::{serialize_compact, value, StringifyOptions};
//!
//! let data = value!({
//!     "name": "Alice",
//!     "tags": ["rust", "debug"],
//!     "manager": null
//! });
//! assert_eq!(
//!     serialize_compact(&data, &StringifyOptions::default()),
//!     r#"{"name":"Alice","tags":["rust","debug"],"manager":null}"#
//! );
//! ```
//!
//! ## Pipeline
//!
//! 1. [`classify`] assigns each value a [`ValueKind`]
//! 2. a per-call [`Tracker`] enforces the depth ceiling and remembers visited composites
//! 3. the [`Transformer`] builds a finite [`Rendered`] tree
//! 4. [`render`] lays the tree out as text
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - The `serialize*` functions never panic on user data and never return an error
//! - Output always terminates, whatever the shape of the input graph

pub mod async_log;
pub mod error;
pub mod html;
pub mod kind;
pub mod logger;
pub mod macros;
pub mod map;
pub mod options;
pub mod render;
pub mod rendered;
pub mod ser;
pub mod tracker;
pub mod transform;
pub mod value;

pub use async_log::{log_async, log_async_to_element, AsyncLogger};
pub use error::{Error, Result};
pub use html::{
    escape_html, highlight, log_to_element, HtmlBuffer, HtmlContainer, HtmlLogger,
    HtmlLoggerOptions, STYLESHEET, STYLE_ID,
};
pub use kind::{classify, EnvironmentProbe, ValueKind};
pub use logger::{
    log, CaptureWriter, ConsoleWriter, LogMethod, Logger, LoggerOptions, StdoutWriter,
    TracingWriter,
};
pub use map::RenderedMap;
pub use options::{DateFormat, KindHandler, StringifyOptions};
pub use render::{format_number, render};
pub use rendered::Rendered;
pub use ser::{to_value, ValueSerializer};
pub use tracker::{Entry, Tracker};
pub use transform::{Transformer, CIRCULAR_MARKER, MAX_DEPTH_MARKER, WINDOW_MARKER};
pub use value::{
    Array, Date, ErrorValue, Function, Getter, HostObject, HostRef, Object, Property,
    RegExpValue, Symbol, Value,
};

use std::io;
use tracing::warn;

/// Serializes a value with default options.
///
/// # Examples
///
/// ```rust
/// use safe_stringify::{serialize, Value};
///
/// assert_eq!(serialize(&Value::Null), "null");
/// assert_eq!(serialize(&Value::Undefined), "\"undefined\"");
/// assert_eq!(serialize(&Value::from(f64::INFINITY)), "\"Infinity\"");
/// ```
#[must_use]
pub fn serialize(value: &Value) -> String {
    serialize_with_options(value, &StringifyOptions::default())
}

/// Serializes a value with custom options.
///
/// Never fails: if the root value itself cannot be reduced the result is the
/// single marker `[Stringify Error: <reason>]`.
///
/// # Examples
///
/// ```rust
/// use safe_stringify::{serialize_with_options, Date, StringifyOptions};
///
/// let options = StringifyOptions::default();
/// assert_eq!(
///     serialize_with_options(&Date::invalid().into(), &options),
///     "[Stringify Error: Invalid time value]"
/// );
/// ```
#[must_use]
pub fn serialize_with_options(value: &Value, options: &StringifyOptions) -> String {
    match to_rendered(value, options).and_then(|tree| render(&tree, options.indent)) {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "value could not be serialized");
            format!("[Stringify Error: {}]", err)
        }
    }
}

/// Serializes a value on a single line, ignoring `options.indent`.
#[must_use]
pub fn serialize_compact(value: &Value, options: &StringifyOptions) -> String {
    serialize_with_options(value, &options.compact())
}

/// Builds the intermediate tree without rendering it.
///
/// Useful when the caller wants to inspect or post-process the safe
/// representation rather than print it.
///
/// # Errors
///
/// Returns the root failure that [`serialize_with_options`] would turn into
/// a `[Stringify Error: ...]` marker.
pub fn to_rendered(value: &Value, options: &StringifyOptions) -> Result<Rendered> {
    Transformer::new(options).transform(value, 0)
}

/// Serializes a value into a writer.
///
/// # Examples
///
/// ```rust
/// use safe_stringify::{to_writer, StringifyOptions, Value};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Value::from("hi"), &StringifyOptions::default()).unwrap();
/// assert_eq!(buffer, b"\"hi\"");
/// ```
///
/// # Errors
///
/// Returns an error only if writing to the writer fails.
pub fn to_writer<W>(mut writer: W, value: &Value, options: &StringifyOptions) -> Result<()>
where
    W: io::Write,
{
    let text = serialize_with_options(value, options);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_failure_is_a_bare_marker() {
        let text = serialize(&Date::invalid().into());
        assert_eq!(text, "[Stringify Error: Invalid time value]");
    }

    #[test]
    fn test_compact_ignores_indent() {
        let arr = Array::from(vec![Value::from(1), Value::from(2)]);
        let options = StringifyOptions::new().with_indent(8);
        assert_eq!(serialize_compact(&arr.into(), &options), "[1,2]");
    }

    #[test]
    fn test_to_rendered_exposes_tree() {
        let obj = Object::new();
        obj.set("me", obj.clone());
        let tree = to_rendered(&obj.into(), &StringifyOptions::default()).unwrap();
        assert_eq!(
            tree.as_object().and_then(|m| m.get("me")).and_then(Rendered::as_str),
            Some(CIRCULAR_MARKER)
        );
    }

    #[test]
    fn test_to_writer_reports_io_failure() {
        struct Broken;

        impl io::Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk full"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = to_writer(Broken, &Value::Null, &StringifyOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
