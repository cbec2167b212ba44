//! Console sink.
//!
//! A [`Logger`] serializes a value and hands the text to a [`ConsoleWriter`].
//! Labels are printed either inline (`"label: text"`) or, when
//! [`LoggerOptions::group_labels`] is set, as a group wrapping the text.
//!
//! ```rust
//! use safe_stringify::{CaptureWriter, LogMethod, Logger, LoggerOptions, Value};
//!
//! let capture = CaptureWriter::new();
//! let logger = Logger::with_writer(LoggerOptions::default(), capture.clone());
//!
//! logger.log(&Value::from(42), Some("answer"));
//! assert_eq!(capture.lines(), vec!["[log] answer: 42".to_string()]);
//! ```

use crate::{serialize_with_options, StringifyOptions, Value};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Console channel a message is written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogMethod {
    #[default]
    Log,
    Info,
    Warn,
    Error,
    Debug,
}

impl LogMethod {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogMethod::Log => "log",
            LogMethod::Info => "info",
            LogMethod::Warn => "warn",
            LogMethod::Error => "error",
            LogMethod::Debug => "debug",
        }
    }
}

impl fmt::Display for LogMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a [`Logger`].
#[derive(Clone, Debug, Default)]
pub struct LoggerOptions {
    pub stringify: StringifyOptions,
    pub method: LogMethod,
    /// Wrap labelled output in a group instead of prefixing it.
    pub group_labels: bool,
}

impl LoggerOptions {
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
    pub fn with_method(mut self, method: LogMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_group_labels(mut self, group_labels: bool) -> Self {
        self.group_labels = group_labels;
        self
    }
}

/// Destination for console output.
pub trait ConsoleWriter {
    /// Writes one message on the given channel.
    fn write(&self, method: LogMethod, message: &str);

    /// Opens a labelled group. Writers without grouping print the label.
    fn group(&self, label: &str) {
        self.write(LogMethod::Log, label);
    }

    fn group_end(&self) {}

    /// Clears the console, if the destination supports it.
    fn clear(&self) {}
}

/// Prints to stdout, or stderr for warnings and errors. Groups indent by two spaces.
#[derive(Debug, Default)]
pub struct StdoutWriter {
    depth: Cell<usize>,
}

impl StdoutWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn indented(&self, message: &str) -> String {
        let pad = "  ".repeat(self.depth.get());
        if pad.is_empty() {
            return message.to_string();
        }
        message
            .lines()
            .map(|line| format!("{}{}", pad, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ConsoleWriter for StdoutWriter {
    fn write(&self, method: LogMethod, message: &str) {
        let text = self.indented(message);
        match method {
            LogMethod::Warn | LogMethod::Error => eprintln!("{}", text),
            _ => println!("{}", text),
        }
    }

    fn group(&self, label: &str) {
        println!("{}", self.indented(label));
        self.depth.set(self.depth.get() + 1);
    }

    fn group_end(&self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }

    fn clear(&self) {
        // ANSI: clear screen, cursor home
        print!("\x1B[2J\x1B[H");
    }
}

/// Emits each message as a `tracing` event at the matching level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingWriter;

impl ConsoleWriter for TracingWriter {
    fn write(&self, method: LogMethod, message: &str) {
        match method {
            LogMethod::Log | LogMethod::Info => tracing::info!(target: "safe_stringify", "{}", message),
            LogMethod::Warn => tracing::warn!(target: "safe_stringify", "{}", message),
            LogMethod::Error => tracing::error!(target: "safe_stringify", "{}", message),
            LogMethod::Debug => tracing::debug!(target: "safe_stringify", "{}", message),
        }
    }
}

/// Collects output lines in a shared buffer.
///
/// Each message is stored as `"[method] message"`; groups are stored as
/// `"group: label"` and `"group end"`.
#[derive(Debug, Default, Clone)]
pub struct CaptureWriter {
    output: Rc<RefCell<Vec<String>>>,
}

impl CaptureWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shares an existing buffer.
    #[must_use]
    pub fn with_output(output: Rc<RefCell<Vec<String>>>) -> Self {
        CaptureWriter { output }
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.output.borrow().clone()
    }
}

impl ConsoleWriter for CaptureWriter {
    fn write(&self, method: LogMethod, message: &str) {
        self.output
            .borrow_mut()
            .push(format!("[{}] {}", method, message));
    }

    fn group(&self, label: &str) {
        self.output.borrow_mut().push(format!("group: {}", label));
    }

    fn group_end(&self) {
        self.output.borrow_mut().push("group end".to_string());
    }

    fn clear(&self) {
        self.output.borrow_mut().clear();
    }
}

/// Serializes values and writes them to a console.
pub struct Logger {
    options: LoggerOptions,
    writer: Box<dyn ConsoleWriter>,
}

impl Logger {
    /// Creates a logger writing to stdout.
    #[must_use]
    pub fn new(options: LoggerOptions) -> Self {
        Self::with_writer(options, StdoutWriter::new())
    }

    #[must_use]
    pub fn with_writer<W: ConsoleWriter + 'static>(options: LoggerOptions, writer: W) -> Self {
        Logger {
            options,
            writer: Box::new(writer),
        }
    }

    #[must_use]
    pub fn options(&self) -> &LoggerOptions {
        &self.options
    }

    pub fn log(&self, value: &Value, label: Option<&str>) {
        self.log_with_method(value, label, self.options.method);
    }

    /// Logs on an explicit channel, ignoring the configured method.
    pub fn log_with_method(&self, value: &Value, label: Option<&str>, method: LogMethod) {
        let text = serialize_with_options(value, &self.options.stringify);
        match label {
            Some(label) if self.options.group_labels => {
                self.writer.group(label);
                self.writer.write(method, &text);
                self.writer.group_end();
            }
            Some(label) => self.writer.write(method, &format!("{}: {}", label, text)),
            None => self.writer.write(method, &text),
        }
    }

    pub fn clear(&self) {
        self.writer.clear();
    }

    pub fn set_options(&mut self, options: LoggerOptions) {
        self.options = options;
    }

    /// Changes some options in place, keeping the rest.
    pub fn update_options<F: FnOnce(&mut LoggerOptions)>(&mut self, update: F) {
        update(&mut self.options);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggerOptions::default())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Logs a value to stdout with default options.
pub fn log(value: &Value, label: Option<&str>) {
    Logger::default().log(value, label);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Object;

    fn capture(options: LoggerOptions) -> (Logger, CaptureWriter) {
        let writer = CaptureWriter::new();
        (Logger::with_writer(options, writer.clone()), writer)
    }

    #[test]
    fn test_unlabelled_output() {
        let (logger, writer) = capture(LoggerOptions::default());
        logger.log(&Value::from("hi"), None);
        assert_eq!(writer.lines(), vec!["[log] \"hi\"".to_string()]);
    }

    #[test]
    fn test_grouped_label() {
        let (logger, writer) = capture(LoggerOptions::new().with_group_labels(true));
        logger.log(&Value::Null, Some("state"));
        assert_eq!(
            writer.lines(),
            vec![
                "group: state".to_string(),
                "[log] null".to_string(),
                "group end".to_string()
            ]
        );
    }

    #[test]
    fn test_method_and_options_update() {
        let (mut logger, writer) = capture(LoggerOptions::new().with_method(LogMethod::Warn));
        let obj = Object::new();
        obj.set("a", 1);
        let value = Value::from(obj);

        logger.log(&value, None);
        logger.update_options(|o| o.stringify = o.stringify.compact());
        logger.log(&value, None);

        assert_eq!(
            writer.lines(),
            vec!["[warn] {\n  \"a\": 1\n}".to_string(), "[warn] {\"a\":1}".to_string()]
        );
    }

    #[test]
    fn test_clear_empties_capture() {
        let (logger, writer) = capture(LoggerOptions::default());
        logger.log(&Value::from(1), None);
        logger.clear();
        assert!(writer.lines().is_empty());
    }

    #[test]
    fn test_method_names_round_trip_through_serde() {
        let method: LogMethod = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(method, LogMethod::Error);
        assert_eq!(serde_json::to_string(&LogMethod::Debug).unwrap(), "\"debug\"");
    }
}
