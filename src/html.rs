//! HTML sink.
//!
//! [`HtmlLogger`] serializes a value, escapes it, optionally wraps tokens in
//! highlighting spans and writes the result into an [`HtmlContainer`].
//!
//! ```rust
//! use safe_stringify::{HtmlBuffer, HtmlContainer, HtmlLogger, HtmlLoggerOptions, Value};
//!
//! let logger = HtmlLogger::new(HtmlLoggerOptions::default().with_highlight(false));
//! let mut page = HtmlBuffer::new();
//!
//! logger.log(&Value::from("<b>"), &mut page, Some("tag"));
//! assert_eq!(
//!     page.inner_html(),
//!     "<div class=\"safe-stringify-output\"><div><strong>tag:</strong></div>\"&lt;b&gt;\"</div>"
//! );
//! ```

use crate::{serialize_with_options, StringifyOptions, Value};
use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Id under which [`STYLESHEET`] is registered in a container.
pub const STYLE_ID: &str = "safe-stringify-styles";

/// Styles for the highlighting classes.
pub const STYLESHEET: &str = "\
.safe-stringify-output {
  font-family: monospace;
  white-space: pre-wrap;
  background-color: #f5f5f5;
  border: 1px solid #ddd;
  border-radius: 4px;
  padding: 10px;
  overflow: auto;
  max-height: 600px;
}
.safe-stringify-output .json-key { color: #881391; }
.safe-stringify-output .json-string { color: #C41A16; }
.safe-stringify-output .json-number { color: #1C00CF; }
.safe-stringify-output .json-boolean { color: #0000FF; }
.safe-stringify-output .json-null { color: #808080; }
.safe-stringify-output .json-special { color: #FF6B00; font-style: italic; }
";

const OUTPUT_CLASS: &str = "safe-stringify-output";

/// Quoted strings that stand in for values with no JSON form.
const NULL_LIKE: [&str; 4] = ["undefined", "NaN", "Infinity", "-Infinity"];

/// Prefixes of quoted marker strings.
const SPECIAL_PREFIXES: [&str; 6] = [
    "[Function",
    "[Circular]",
    "[Max depth exceeded]",
    "[Error",
    "[Window]",
    "[Node",
];

static TOKEN_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn token_pattern() -> Option<&'static Regex> {
    TOKEN_PATTERN
        .get_or_init(|| {
            Regex::new(
                r#""(?:\\u[a-zA-Z0-9]{4}|\\[^u]|[^\\"])*"(?:\s*:)?|\b(?:true|false|null)\b|-?\d+(?:\.\d*)?(?:[eE][+\-]?\d+)?|\[(?:Stringify Error|Function|Circular|Max depth exceeded|Error|Window|Node)[^\]]*\]"#,
            )
            .ok()
        })
        .as_ref()
}

/// Configuration for an [`HtmlLogger`].
#[derive(Clone, Debug)]
pub struct HtmlLoggerOptions {
    pub stringify: StringifyOptions,
    /// Wrap tokens in highlighting spans and inject [`STYLESHEET`].
    pub highlight: bool,
    /// Extra class added to the output wrapper.
    pub class_name: Option<String>,
    /// Append to the container instead of replacing its content.
    pub append: bool,
}

impl Default for HtmlLoggerOptions {
    fn default() -> Self {
        HtmlLoggerOptions {
            stringify: StringifyOptions::default(),
            highlight: true,
            class_name: None,
            append: false,
        }
    }
}

impl HtmlLoggerOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_stringify(mut self, stringify: StringifyOptions) -> Self {
        self.stringify = stringify;
        self
    }

    #[must_use]
    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }
}

/// An element that can receive HTML output.
pub trait HtmlContainer {
    fn set_inner_html(&mut self, html: &str);

    fn append_html(&mut self, html: &str);

    fn inner_html(&self) -> String;

    /// Registers a stylesheet under `id` unless one is already present.
    fn ensure_style(&mut self, id: &str, css: &str);
}

/// In-memory [`HtmlContainer`], for tests and for building reports.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HtmlBuffer {
    body: String,
    styles: IndexMap<String, String>,
}

impl HtmlBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_style(&self, id: &str) -> bool {
        self.styles.contains_key(id)
    }

    #[must_use]
    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    /// Renders a standalone page with the registered styles in `<head>`.
    #[must_use]
    pub fn to_document(&self) -> String {
        let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        for (id, css) in &self.styles {
            html.push_str(&format!("<style id=\"{}\">\n{}</style>\n", escape_html(id), css));
        }
        html.push_str("</head>\n<body>\n");
        html.push_str(&self.body);
        html.push_str("\n</body>\n</html>\n");
        html
    }
}

impl HtmlContainer for HtmlBuffer {
    fn set_inner_html(&mut self, html: &str) {
        self.body = html.to_string();
    }

    fn append_html(&mut self, html: &str) {
        self.body.push_str(html);
    }

    fn inner_html(&self) -> String {
        self.body.clone()
    }

    fn ensure_style(&mut self, id: &str, css: &str) {
        if !self.styles.contains_key(id) {
            self.styles.insert(id.to_string(), css.to_string());
        }
    }
}

/// Escapes the characters that would otherwise start markup or entities.
///
/// Quotes are left alone so highlighting can still find string tokens.
#[must_use]
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Wraps the tokens of escaped serializer output in `<span class="json-*">`.
///
/// Object keys lose their quotes. Quoted `undefined`, `NaN` and infinities
/// are classed `json-null`; marker strings are classed `json-special`.
///
/// ```rust
/// use safe_stringify::highlight;
///
/// assert_eq!(
///     highlight(r#"{"a": true}"#),
///     r#"{<span class="json-key">a:</span> <span class="json-boolean">true</span>}"#
/// );
/// ```
#[must_use]
pub fn highlight(escaped: &str) -> String {
    let Some(pattern) = token_pattern() else {
        return escaped.to_string();
    };
    pattern
        .replace_all(escaped, |caps: &Captures<'_>| {
            let token = &caps[0];
            let (class, text) = classify_token(token);
            format!("<span class=\"{}\">{}</span>", class, text)
        })
        .into_owned()
}

fn classify_token(token: &str) -> (&'static str, String) {
    if let Some(quoted) = token.strip_prefix('"') {
        if token.ends_with(':') {
            return ("json-key", token.replacen('"', "", 2));
        }
        let content = quoted.strip_suffix('"').unwrap_or(quoted);
        let class = if NULL_LIKE.contains(&content) {
            "json-null"
        } else if SPECIAL_PREFIXES.iter().any(|p| content.starts_with(p)) {
            "json-special"
        } else {
            "json-string"
        };
        return (class, token.to_string());
    }
    let class = match token {
        "true" | "false" => "json-boolean",
        "null" => "json-null",
        _ if token.starts_with('[') => "json-special",
        _ => "json-number",
    };
    (class, token.to_string())
}

/// Serializes values into HTML containers.
#[derive(Clone, Debug, Default)]
pub struct HtmlLogger {
    options: HtmlLoggerOptions,
}

impl HtmlLogger {
    #[must_use]
    pub fn new(options: HtmlLoggerOptions) -> Self {
        HtmlLogger { options }
    }

    #[must_use]
    pub fn options(&self) -> &HtmlLoggerOptions {
        &self.options
    }

    /// Produces the wrapped HTML fragment for `value` without writing it anywhere.
    #[must_use]
    pub fn format(&self, value: &Value, label: Option<&str>) -> String {
        let text = escape_html(&serialize_with_options(value, &self.options.stringify));
        let body = if self.options.highlight {
            highlight(&text)
        } else {
            text
        };

        let mut class = OUTPUT_CLASS.to_string();
        if let Some(extra) = self.options.class_name.as_deref().filter(|c| !c.is_empty()) {
            class.push(' ');
            class.push_str(&escape_html(extra).replace('"', "&quot;"));
        }

        match label {
            Some(label) => format!(
                "<div class=\"{}\"><div><strong>{}:</strong></div>{}</div>",
                class,
                escape_html(label),
                body
            ),
            None => format!("<div class=\"{}\">{}</div>", class, body),
        }
    }

    pub fn log<C>(&self, value: &Value, container: &mut C, label: Option<&str>)
    where
        C: HtmlContainer + ?Sized,
    {
        if self.options.highlight {
            container.ensure_style(STYLE_ID, STYLESHEET);
        }
        let fragment = self.format(value, label);
        if self.options.append {
            container.append_html(&fragment);
        } else {
            container.set_inner_html(&fragment);
        }
    }

    pub fn clear<C: HtmlContainer + ?Sized>(&self, container: &mut C) {
        container.set_inner_html("");
    }

    pub fn set_options(&mut self, options: HtmlLoggerOptions) {
        self.options = options;
    }

    pub fn update_options<F: FnOnce(&mut HtmlLoggerOptions)>(&mut self, update: F) {
        update(&mut self.options);
    }
}

/// Logs a value into a container with default options.
pub fn log_to_element<C>(value: &Value, container: &mut C, label: Option<&str>)
where
    C: HtmlContainer + ?Sized,
{
    HtmlLogger::default().log(value, container, label);
}
