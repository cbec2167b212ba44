//! Configuration options for serialization.
//!
//! - [`StringifyOptions`]: the per-call configuration
//! - [`DateFormat`]: how dates are rendered
//!
//! Options are immutable during a call and built with consuming `with_*`
//! methods:
//!
//! ```rust
//! use safe_stringify::{DateFormat, StringifyOptions, ValueKind};
//!
//! let options = StringifyOptions::new()
//!     .with_max_depth(3)
//!     .with_indent(4)
//!     .with_date_format(DateFormat::EpochMillis)
//!     .with_handler(ValueKind::Symbol, |_| "<symbol>".to_string());
//!
//! assert_eq!(options.max_depth, 3);
//! assert!(options.handler(ValueKind::Symbol).is_some());
//! ```

use crate::kind::EnvironmentProbe;
use crate::{Value, ValueKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Rendering choice for date values.
///
/// Deserializes from `"iso"`, `"locale"` and `"epoch-millis"` (alias
/// `"timestamp"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateFormat {
    /// `2023-01-01T00:00:00.000Z`
    #[default]
    Iso,
    /// `1/1/2023, 12:00:00 AM` (UTC)
    Locale,
    /// `1672531200000`
    #[serde(alias = "timestamp")]
    EpochMillis,
}

/// A custom renderer for one value kind. Its result becomes a string scalar.
pub type KindHandler = Rc<dyn Fn(&Value) -> String>;

/// Configuration for one serialization call.
///
/// # Examples
///
/// ```rust
/// use safe_stringify::StringifyOptions;
///
/// let options = StringifyOptions::default();
/// assert_eq!(options.max_depth, 10);
/// assert_eq!(options.indent, 2);
/// assert!(options.show_function_bodies);
///
/// let compact = options.compact();
/// assert_eq!(compact.indent, 0);
/// ```
#[derive(Clone)]
pub struct StringifyOptions {
    /// Deepest level rendered structurally; the root is depth 0.
    pub max_depth: usize,
    /// Spaces per nesting level; 0 renders compactly. Values above 10 are clamped.
    pub indent: usize,
    /// Append function source text after the `[Function: name]` marker.
    pub show_function_bodies: bool,
    pub date_format: DateFormat,
    handlers: IndexMap<ValueKind, KindHandler>,
    environment: Option<Rc<dyn EnvironmentProbe>>,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        StringifyOptions {
            max_depth: 10,
            indent: 2,
            show_function_bodies: true,
            date_format: DateFormat::default(),
            handlers: IndexMap::new(),
            environment: None,
        }
    }
}

impl fmt::Debug for StringifyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringifyOptions")
            .field("max_depth", &self.max_depth)
            .field("indent", &self.indent)
            .field("show_function_bodies", &self.show_function_bodies)
            .field("date_format", &self.date_format)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("environment", &self.environment.is_some())
            .finish()
    }
}

impl StringifyOptions {
    /// Creates default options (depth 10, 2-space indent, function bodies shown, ISO dates).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with indentation turned off.
    #[must_use]
    pub fn compact(&self) -> Self {
        self.clone().with_indent(0)
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_stringify::StringifyOptions;
    ///
    /// let options = StringifyOptions::new().with_indent(4);
    /// assert_eq!(options.indent, 4);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_function_bodies(mut self, show: bool) -> Self {
        self.show_function_bodies = show;
        self
    }

    #[must_use]
    pub fn with_date_format(mut self, date_format: DateFormat) -> Self {
        self.date_format = date_format;
        self
    }

    /// Registers a custom renderer for a kind, replacing any previous one.
    ///
    /// Handlers take precedence over built-in handling, including the
    /// structural walk of objects and arrays.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_stringify::{serialize_with_options, StringifyOptions, Value, ValueKind};
    ///
    /// let options = StringifyOptions::new()
    ///     .with_handler(ValueKind::Function, |_| "fn".to_string());
    /// let text = serialize_with_options(&Value::function("run"), &options);
    /// assert_eq!(text, r#""fn""#);
    /// ```
    #[must_use]
    pub fn with_handler<F>(mut self, kind: ValueKind, handler: F) -> Self
    where
        F: Fn(&Value) -> String + 'static,
    {
        self.handlers.insert(kind, Rc::new(handler));
        self
    }

    /// Installs the probe used to recognise host window and node values.
    #[must_use]
    pub fn with_environment<P: EnvironmentProbe + 'static>(mut self, probe: P) -> Self {
        self.environment = Some(Rc::new(probe));
        self
    }

    /// Installs an already shared probe.
    #[must_use]
    pub fn with_shared_environment(mut self, probe: Rc<dyn EnvironmentProbe>) -> Self {
        self.environment = Some(probe);
        self
    }

    #[must_use]
    pub fn handler(&self, kind: ValueKind) -> Option<&KindHandler> {
        self.handlers.get(&kind)
    }

    pub fn clear_handlers(&mut self) {
        self.handlers.clear();
    }

    #[must_use]
    pub fn environment(&self) -> Option<&dyn EnvironmentProbe> {
        self.environment.as_deref()
    }
}
