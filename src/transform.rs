//! Value transformation.
//!
//! The [`Transformer`] walks a [`Value`] graph and produces a finite
//! [`Rendered`] tree. It consults [`classify`] for every value and a
//! per-call [`Tracker`] for every composite, so cycles and runaway nesting
//! turn into marker strings instead of unbounded recursion.
//!
//! ## Failure containment
//!
//! - a property whose read or transformation fails becomes
//!   `"[Error extracting property: <reason>]"` and its siblings still render
//! - a composite whose members cannot be listed becomes
//!   `"[Error iterating: <reason>]"`
//! - nesting past [`MAX_NESTING`] composites aborts the whole call with
//!   [`Error::RecursionLimit`], even when `max_depth` is higher
//! - anything else propagates as `Err` to the caller, which
//!   [`serialize`](crate::serialize) turns into `[Stringify Error: <reason>]`

use crate::error::{Error, Result};
use crate::kind::classify;
use crate::tracker::{Entry, Tracker};
use crate::value::{Date, ErrorValue, Function};
use crate::{DateFormat, Rendered, RenderedMap, StringifyOptions, Value, ValueKind};
use tracing::{debug, trace};

/// Substitute for a composite that was already entered in this call.
pub const CIRCULAR_MARKER: &str = "[Circular]";

/// Substitute for any value nested deeper than the configured maximum.
pub const MAX_DEPTH_MARKER: &str = "[Max depth exceeded]";

/// Substitute for the host environment's global root.
pub const WINDOW_MARKER: &str = "[Window]";

/// Deepest composite nesting the transformer will recurse into.
pub const MAX_NESTING: usize = 128;

/// Turns runtime values into rendered trees for one top-level call.
///
/// # Examples
///
/// ```rust
/// use safe_stringify::{Object, Rendered, StringifyOptions, Transformer};
///
/// let options = StringifyOptions::default();
/// let obj = Object::new();
/// obj.set("a", 1);
///
/// let mut transformer = Transformer::new(&options);
/// let tree = transformer.transform(&obj.into(), 0).unwrap();
/// assert_eq!(tree.as_object().and_then(|m| m.get("a")), Some(&Rendered::Number(1.0)));
/// ```
pub struct Transformer<'a> {
    options: &'a StringifyOptions,
    tracker: Tracker,
}

impl<'a> Transformer<'a> {
    #[must_use]
    pub fn new(options: &'a StringifyOptions) -> Self {
        Transformer {
            options,
            tracker: Tracker::new(options.max_depth),
        }
    }

    /// Transforms `value`, found at `depth` below the root.
    ///
    /// # Errors
    ///
    /// Fails when `value` itself cannot be reduced (for example an invalid
    /// date under [`DateFormat::Iso`]) or when composites nest deeper than
    /// [`MAX_NESTING`]. Other failures inside composites are contained as
    /// markers.
    pub fn transform(&mut self, value: &Value, depth: usize) -> Result<Rendered> {
        let options = self.options;
        let environment = options.environment();
        let kind = classify(value, environment);
        let handler = options.handler(kind);

        if kind.is_composite() && handler.is_none() {
            return self.transform_composite(value, depth);
        }
        if self.tracker.exceeds(depth) {
            trace!(depth, "depth ceiling reached");
            return Ok(Rendered::from(MAX_DEPTH_MARKER));
        }
        if let Some(handler) = handler {
            return Ok(Rendered::String(handler(value)));
        }

        let rendered = match (kind, value) {
            (ValueKind::HostWindowRoot, _) => Rendered::from(WINDOW_MARKER),
            (ValueKind::HostNode, _) => {
                let name = environment
                    .and_then(|p| p.node_name(value))
                    .unwrap_or_else(|| "Node".to_string());
                Rendered::String(format!("[{}]", name))
            }
            (ValueKind::Undefined, _) => Rendered::from("undefined"),
            (ValueKind::Null, _) => Rendered::Null,
            (ValueKind::Boolean, Value::Bool(b)) => Rendered::Bool(*b),
            (ValueKind::Number, Value::Number(n)) => number_substitute(*n),
            (ValueKind::String, Value::String(s)) => Rendered::String(s.clone()),
            (ValueKind::BigInt, Value::BigInt(n)) => Rendered::String(format!("{}n", n)),
            (ValueKind::Symbol, Value::Symbol(symbol)) => Rendered::String(symbol.to_string()),
            (ValueKind::Function, Value::Function(function)) => {
                Rendered::String(self.function_text(function))
            }
            (ValueKind::Date, Value::Date(date)) => Rendered::String(self.date_text(date)?),
            (ValueKind::Error, Value::Error(err)) => Rendered::String(error_text(err)),
            (ValueKind::RegExp, Value::RegExp(regexp)) => Rendered::String(regexp.to_string()),
            (kind, _) => {
                return Err(Error::custom(format!(
                    "value does not match its {} classification",
                    kind
                )))
            }
        };
        Ok(rendered)
    }

    fn transform_composite(&mut self, value: &Value, depth: usize) -> Result<Rendered> {
        match self.tracker.enter(value, depth) {
            Entry::Proceed => {}
            Entry::DepthExceeded => {
                trace!(depth, "depth ceiling reached");
                return Ok(Rendered::from(MAX_DEPTH_MARKER));
            }
            Entry::AlreadyVisited => {
                trace!(depth, "composite already visited");
                return Ok(Rendered::from(CIRCULAR_MARKER));
            }
        }
        if depth >= MAX_NESTING {
            return Err(Error::RecursionLimit);
        }

        let child_depth = depth + 1;
        match value {
            Value::Array(arr) => {
                let elements = match arr.elements() {
                    Ok(elements) => elements,
                    Err(err) => return Ok(iteration_failure(&err)),
                };
                let mut out = Vec::with_capacity(elements.len());
                for (index, element) in elements.into_iter().enumerate() {
                    out.push(self.member(&index.to_string(), Ok(element), child_depth)?);
                }
                Ok(Rendered::Array(out))
            }
            Value::Object(obj) => {
                let entries = match obj.entries() {
                    Ok(entries) => entries,
                    Err(err) => return Ok(iteration_failure(&err)),
                };
                let mut out = RenderedMap::with_capacity(entries.len());
                for (key, property) in entries {
                    let rendered = self.member(&key, property.read(), child_depth)?;
                    out.insert(key, rendered);
                }
                Ok(Rendered::Object(out))
            }
            Value::Host(host) => {
                let keys = match host.own_keys() {
                    Ok(keys) => keys,
                    Err(err) => return Ok(iteration_failure(&err)),
                };
                let mut out = RenderedMap::with_capacity(keys.len());
                for key in keys {
                    let rendered = self.member(&key, host.get(&key), child_depth)?;
                    out.insert(key, rendered);
                }
                Ok(Rendered::Object(out))
            }
            _ => Err(Error::custom("value has no members to enumerate")),
        }
    }

    /// Transforms one member, containing every failure except the nesting limit.
    fn member(&mut self, key: &str, read: Result<Value>, depth: usize) -> Result<Rendered> {
        match read.and_then(|value| self.transform(&value, depth)) {
            Ok(rendered) => Ok(rendered),
            Err(Error::RecursionLimit) => Err(Error::RecursionLimit),
            Err(err) => {
                debug!(key, error = %err, "property replaced with marker");
                Ok(Rendered::String(format!(
                    "[Error extracting property: {}]",
                    err
                )))
            }
        }
    }

    fn function_text(&self, function: &Function) -> String {
        let name = match function.name() {
            "" => "anonymous",
            name => name,
        };
        let mut text = format!("[Function: {}]", name);
        if self.options.show_function_bodies {
            if let Some(source) = function.source().filter(|s| s.contains('{')) {
                text.push('\n');
                text.push_str(source);
            }
        }
        text
    }

    fn date_text(&self, date: &Date) -> Result<String> {
        match self.options.date_format {
            DateFormat::Iso => date.to_iso_string(),
            DateFormat::Locale => Ok(date.to_locale_string()),
            DateFormat::EpochMillis => Ok(date.to_millis_string()),
        }
    }
}

fn number_substitute(n: f64) -> Rendered {
    if n.is_nan() {
        Rendered::from("NaN")
    } else if n.is_infinite() {
        Rendered::from(if n < 0.0 { "-Infinity" } else { "Infinity" })
    } else {
        Rendered::Number(n)
    }
}

fn error_text(err: &ErrorValue) -> String {
    format!(
        "{}: {}\n{}",
        err.name(),
        err.message(),
        err.stack().unwrap_or("undefined")
    )
}

fn iteration_failure(err: &Error) -> Rendered {
    debug!(error = %err, "composite replaced with marker");
    Rendered::String(format!("[Error iterating: {}]", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Array, Object};

    fn transform(value: &Value, options: &StringifyOptions) -> Rendered {
        Transformer::new(options).transform(value, 0).unwrap()
    }

    #[test]
    fn test_numbers() {
        let options = StringifyOptions::default();
        assert_eq!(transform(&Value::from(f64::NAN), &options), Rendered::from("NaN"));
        assert_eq!(
            transform(&Value::from(f64::INFINITY), &options),
            Rendered::from("Infinity")
        );
        assert_eq!(
            transform(&Value::from(f64::NEG_INFINITY), &options),
            Rendered::from("-Infinity")
        );
        assert_eq!(transform(&Value::from(2.5), &options), Rendered::Number(2.5));
    }

    #[test]
    fn test_function_bodies() {
        let function = Function::new("add").with_source("function add(a, b) { return a + b; }");
        let value = Value::from(function);

        let shown = transform(&value, &StringifyOptions::default());
        assert_eq!(
            shown.as_str(),
            Some("[Function: add]\nfunction add(a, b) { return a + b; }")
        );

        let hidden = transform(&value, &StringifyOptions::new().with_function_bodies(false));
        assert_eq!(hidden.as_str(), Some("[Function: add]"));
    }

    #[test]
    fn test_function_without_body_delimiter() {
        let arrow = Function::new("").with_source("x => x");
        let rendered = transform(&arrow.into(), &StringifyOptions::default());
        assert_eq!(rendered.as_str(), Some("[Function: anonymous]"));
    }

    #[test]
    fn test_error_text() {
        let err = ErrorValue::new("TypeError", "bad").with_stack("TypeError: bad\n    at main");
        let rendered = transform(&err.into(), &StringifyOptions::default());
        assert_eq!(
            rendered.as_str(),
            Some("TypeError: bad\nTypeError: bad\n    at main")
        );

        let bare = transform(&Value::error("Error", "x"), &StringifyOptions::default());
        assert_eq!(bare.as_str(), Some("Error: x\nundefined"));
    }

    #[test]
    fn test_pre_order_marking_catches_self_reference() {
        let arr = Array::new();
        arr.push(1);
        arr.push(arr.clone());
        let rendered = transform(&arr.into(), &StringifyOptions::default());
        assert_eq!(
            rendered,
            Rendered::Array(vec![Rendered::Number(1.0), Rendered::from(CIRCULAR_MARKER)])
        );
    }

    #[test]
    fn test_handler_bypasses_walk() {
        let obj = Object::new();
        obj.set("me", obj.clone());
        let options = StringifyOptions::new().with_handler(ValueKind::Object, |_| "obj".into());
        assert_eq!(transform(&obj.into(), &options), Rendered::from("obj"));
    }

    #[test]
    fn test_depth_marker_applies_to_scalars() {
        let arr = Array::from(vec![Value::from("deep")]);
        let options = StringifyOptions::new().with_max_depth(0);
        assert_eq!(
            transform(&arr.into(), &options),
            Rendered::Array(vec![Rendered::from(MAX_DEPTH_MARKER)])
        );
    }

    #[test]
    fn test_depth_marker_applies_to_composites() {
        let inner = Object::new();
        inner.set("x", 1);
        let outer = Array::from(vec![Value::from(inner)]);
        let options = StringifyOptions::new().with_max_depth(0);
        assert_eq!(
            transform(&outer.into(), &options),
            Rendered::Array(vec![Rendered::from(MAX_DEPTH_MARKER)])
        );
    }

    #[test]
    fn test_depth_marker_wins_over_handler() {
        let arr = Array::from(vec![Value::from(Object::new())]);
        let options = StringifyOptions::new()
            .with_max_depth(0)
            .with_handler(ValueKind::Object, |_| "obj".into());
        assert_eq!(
            transform(&arr.into(), &options),
            Rendered::Array(vec![Rendered::from(MAX_DEPTH_MARKER)])
        );
    }

    #[test]
    fn test_nesting_limit_aborts_the_call() {
        let root = Array::new();
        let mut current = root.clone();
        for _ in 0..MAX_NESTING + 5 {
            let next = Array::new();
            current.push(next.clone());
            current = next;
        }
        let options = StringifyOptions::new().with_max_depth(usize::MAX);
        let mut transformer = Transformer::new(&options);
        assert_eq!(
            transformer.transform(&root.into(), 0),
            Err(Error::RecursionLimit)
        );
    }

    #[test]
    fn test_nesting_limit_not_hit_under_depth_ceiling() {
        let root = Array::new();
        let mut current = root.clone();
        for _ in 0..MAX_NESTING * 2 {
            let next = Array::new();
            current.push(next.clone());
            current = next;
        }
        let rendered = transform(&root.into(), &StringifyOptions::new().with_max_depth(3));
        let mut node = &rendered;
        for _ in 0..4 {
            node = &node.as_array().unwrap()[0];
        }
        assert_eq!(node.as_str(), Some(MAX_DEPTH_MARKER));
    }

    #[test]
    fn test_invalid_date_fails_at_root_only() {
        let options = StringifyOptions::default();
        let mut transformer = Transformer::new(&options);
        assert_eq!(
            transformer.transform(&Date::invalid().into(), 0),
            Err(Error::InvalidDate)
        );

        let obj = Object::new();
        obj.set("when", Date::invalid());
        assert_eq!(
            transform(&obj.into(), &options)
                .as_object()
                .and_then(|m| m.get("when"))
                .and_then(Rendered::as_str),
            Some("[Error extracting property: Invalid time value]")
        );
    }
}
