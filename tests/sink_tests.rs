use futures::executor::block_on;
use futures::future::ready;
use safe_stringify::{
    log_async, log_async_to_element, value, AsyncLogger, CaptureWriter, DateFormat, Date,
    HtmlBuffer, HtmlContainer, HtmlLogger, HtmlLoggerOptions, LogMethod, Logger, LoggerOptions,
    Object, StringifyOptions, STYLE_ID,
};
use std::cell::RefCell;
use std::rc::Rc;

fn compact_logger(output: Rc<RefCell<Vec<String>>>) -> Logger {
    Logger::with_writer(
        LoggerOptions::new().with_stringify(StringifyOptions::new().with_indent(0)),
        CaptureWriter::with_output(output),
    )
}

#[test]
fn test_console_labels_and_methods() {
    let output = Rc::new(RefCell::new(Vec::new()));
    let mut logger = compact_logger(output.clone());

    let obj = Object::new();
    obj.set("me", obj.clone());
    logger.log(&obj.into(), Some("cycle"));

    logger.update_options(|o| {
        o.method = LogMethod::Info;
        o.group_labels = true;
    });
    logger.log(&value!([1, 2]), Some("list"));

    assert_eq!(
        *output.borrow(),
        vec![
            r#"[log] cycle: {"me":"[Circular]"}"#.to_string(),
            "group: list".to_string(),
            "[info] [1,2]".to_string(),
            "group end".to_string(),
        ]
    );
}

#[test]
fn test_console_set_options_replaces_everything() {
    let output = Rc::new(RefCell::new(Vec::new()));
    let mut logger = compact_logger(output.clone());
    logger.set_options(
        LoggerOptions::new().with_stringify(
            StringifyOptions::new()
                .with_indent(0)
                .with_date_format(DateFormat::EpochMillis),
        ),
    );
    logger.log(&Date::from_millis(42).into(), None);
    assert_eq!(*output.borrow(), vec![r#"[log] "42""#.to_string()]);
}

#[test]
fn test_html_report_accumulates() {
    let mut page = HtmlBuffer::new();
    let logger = HtmlLogger::new(
        HtmlLoggerOptions::new()
            .with_append(true)
            .with_stringify(StringifyOptions::new().with_indent(0)),
    );

    logger.log(&value!({"ok": true}), &mut page, Some("first"));
    logger.log(&value!("<script>"), &mut page, None);

    let html = page.inner_html();
    assert_eq!(html.matches("class=\"safe-stringify-output\"").count(), 2);
    assert!(html.contains("<strong>first:</strong>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
    assert!(page.has_style(STYLE_ID));
    assert!(page.to_document().contains("<style id=\"safe-stringify-styles\">"));
}

#[test]
fn test_async_outcomes_are_returned_unchanged() {
    let output = Rc::new(RefCell::new(Vec::new()));
    let logger = compact_logger(output.clone());

    let ok = block_on(log_async(
        ready(Ok::<_, std::io::Error>("done")),
        &logger,
        Some("job"),
    ));
    assert_eq!(ok.unwrap(), "done");

    let err = block_on(log_async(
        ready(Err::<(), _>(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ))),
        &logger,
        Some("job"),
    ));
    assert_eq!(err.unwrap_err().kind(), std::io::ErrorKind::NotFound);

    let lines = output.borrow();
    assert_eq!(lines[0], r#"[log] job: "done""#);
    assert!(lines[1].starts_with("[error] job (Error): \"Error: missing\\n"));
}

#[test]
fn test_async_to_element_failure_label() {
    let mut page = HtmlBuffer::new();
    let logger = HtmlLogger::new(HtmlLoggerOptions::new().with_highlight(false));
    let out = block_on(log_async_to_element(
        ready(Err::<u8, _>(std::fmt::Error)),
        &logger,
        &mut page,
        None,
    ));
    assert!(out.is_err());
    assert!(page.inner_html().contains("<strong>Error:</strong>"));
}

#[test]
fn test_async_logger_uses_its_options() {
    let output = Rc::new(RefCell::new(Vec::new()));
    let mut logger = AsyncLogger::with_writer(
        LoggerOptions::default(),
        CaptureWriter::with_output(output.clone()),
    );
    logger.update_options(|o| o.stringify = o.stringify.compact());

    let out = block_on(logger.log(ready(Ok::<_, std::fmt::Error>(vec![1, 2])), None));
    assert_eq!(out, Ok(vec![1, 2]));
    assert_eq!(*output.borrow(), vec!["[log] [1,2]".to_string()]);
}
