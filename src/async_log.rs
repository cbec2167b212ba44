//! Logging for the outcome of futures.
//!
//! The adapters await a `Result`-producing future, log whichever side it
//! settles on, and hand the outcome back unchanged. Failures are logged as
//! error values on the [`LogMethod::Error`] channel under `"<label> (Error)"`,
//! or `"Error"` when no label was given.

use crate::html::{HtmlContainer, HtmlLogger, HtmlLoggerOptions};
use crate::logger::{ConsoleWriter, LogMethod, Logger, LoggerOptions};
use crate::{to_value, ErrorValue, Value};
use serde::Serialize;
use std::error::Error as StdError;
use std::future::Future;
use tracing::warn;

fn error_label(label: Option<&str>) -> String {
    match label {
        Some(label) => format!("{} (Error)", label),
        None => "Error".to_string(),
    }
}

fn success_value<T: Serialize>(result: &T) -> Value {
    match to_value(result) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "future result could not be converted");
            ErrorValue::from_error(&err).into()
        }
    }
}

fn failure_value<E: StdError + 'static>(err: &E) -> Value {
    ErrorValue::from_error(err).into()
}

/// Awaits `future` and logs its outcome to the console sink.
///
/// ```rust
/// use futures::executor::block_on;
/// use safe_stringify::{log_async, CaptureWriter, Logger, LoggerOptions};
///
/// let capture = CaptureWriter::new();
/// let logger = Logger::with_writer(LoggerOptions::default(), capture.clone());
///
/// let out = block_on(log_async(
///     async { Ok::<_, std::io::Error>(5) },
///     &logger,
///     Some("count"),
/// ));
/// assert_eq!(out.unwrap(), 5);
/// assert_eq!(capture.lines(), vec!["[log] count: 5".to_string()]);
/// ```
pub async fn log_async<F, T, E>(
    future: F,
    logger: &Logger,
    label: Option<&str>,
) -> std::result::Result<T, E>
where
    F: Future<Output = std::result::Result<T, E>>,
    T: Serialize,
    E: StdError + 'static,
{
    let outcome = future.await;
    match &outcome {
        Ok(result) => logger.log(&success_value(result), label),
        Err(err) => logger.log_with_method(
            &failure_value(err),
            Some(&error_label(label)),
            LogMethod::Error,
        ),
    }
    outcome
}

/// Awaits `future` and logs its outcome into an HTML container.
pub async fn log_async_to_element<F, T, E, C>(
    future: F,
    logger: &HtmlLogger,
    container: &mut C,
    label: Option<&str>,
) -> std::result::Result<T, E>
where
    F: Future<Output = std::result::Result<T, E>>,
    T: Serialize,
    E: StdError + 'static,
    C: HtmlContainer + ?Sized,
{
    let outcome = future.await;
    match &outcome {
        Ok(result) => logger.log(&success_value(result), container, label),
        Err(err) => logger.log(&failure_value(err), container, Some(&error_label(label))),
    }
    outcome
}

/// Holds logger options and applies them to every future it observes.
#[derive(Debug, Default)]
pub struct AsyncLogger {
    logger: Logger,
}

impl AsyncLogger {
    #[must_use]
    pub fn new(options: LoggerOptions) -> Self {
        AsyncLogger {
            logger: Logger::new(options),
        }
    }

    #[must_use]
    pub fn with_writer<W: ConsoleWriter + 'static>(options: LoggerOptions, writer: W) -> Self {
        AsyncLogger {
            logger: Logger::with_writer(options, writer),
        }
    }

    pub async fn log<F, T, E>(&self, future: F, label: Option<&str>) -> std::result::Result<T, E>
    where
        F: Future<Output = std::result::Result<T, E>>,
        T: Serialize,
        E: StdError + 'static,
    {
        log_async(future, &self.logger, label).await
    }

    /// Like [`log`](Self::log) but writes into an HTML container, reusing the
    /// stringify options.
    pub async fn to_element<F, T, E, C>(
        &self,
        future: F,
        container: &mut C,
        label: Option<&str>,
    ) -> std::result::Result<T, E>
    where
        F: Future<Output = std::result::Result<T, E>>,
        T: Serialize,
        E: StdError + 'static,
        C: HtmlContainer + ?Sized,
    {
        let html = HtmlLogger::new(
            HtmlLoggerOptions::default().with_stringify(self.logger.options().stringify.clone()),
        );
        log_async_to_element(future, &html, container, label).await
    }

    pub fn set_options(&mut self, options: LoggerOptions) {
        self.logger.set_options(options);
    }

    pub fn update_options<F: FnOnce(&mut LoggerOptions)>(&mut self, update: F) {
        self.logger.update_options(update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CaptureWriter, HtmlBuffer, StringifyOptions};
    use futures::executor::block_on;
    use futures::future::ready;
    use std::fmt;

    #[derive(Debug, PartialEq)]
    struct Timeout;

    impl fmt::Display for Timeout {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("timed out")
        }
    }

    impl StdError for Timeout {}

    fn capture() -> (Logger, CaptureWriter) {
        let writer = CaptureWriter::new();
        let options = LoggerOptions::new().with_stringify(StringifyOptions::new().with_indent(0));
        (Logger::with_writer(options, writer.clone()), writer)
    }

    #[test]
    fn test_failure_is_logged_and_returned() {
        let (logger, writer) = capture();
        let out = block_on(log_async(ready(Err::<u8, _>(Timeout)), &logger, Some("fetch")));
        assert_eq!(out, Err(Timeout));

        let lines = writer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[error] fetch (Error): \"Error: timed out\\n"));
    }

    #[test]
    fn test_unlabelled_failure() {
        let (logger, writer) = capture();
        let _ = block_on(log_async(ready(Err::<u8, _>(Timeout)), &logger, None));
        assert!(writer.lines()[0].starts_with("[error] Error: "));
    }

    #[test]
    fn test_success_value_is_serialized() {
        let (logger, writer) = capture();
        let out = block_on(log_async(
            ready(Ok::<_, Timeout>(vec!["a", "b"])),
            &logger,
            None,
        ));
        assert_eq!(out, Ok(vec!["a", "b"]));
        assert_eq!(writer.lines(), vec![r#"[log] ["a","b"]"#.to_string()]);
    }

    #[test]
    fn test_async_logger_to_element() {
        let logger = AsyncLogger::with_writer(
            LoggerOptions::new().with_stringify(StringifyOptions::new().with_indent(0)),
            CaptureWriter::new(),
        );
        let mut page = HtmlBuffer::new();
        let out = block_on(logger.to_element(ready(Ok::<_, Timeout>(7)), &mut page, Some("n")));
        assert_eq!(out, Ok(7));
        assert!(page
            .inner_html()
            .contains("<strong>n:</strong></div><span class=\"json-number\">7</span>"));
    }
}
