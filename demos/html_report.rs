//! Writing highlighted output into an HTML page.
//!
//! Run with: cargo run --example html_report > report.html

use safe_stringify::{
    value, HtmlBuffer, HtmlLogger, HtmlLoggerOptions, Object, RegExpValue, Symbol, Value,
};

fn main() {
    let mut page = HtmlBuffer::new();
    let logger = HtmlLogger::new(
        HtmlLoggerOptions::new()
            .with_append(true)
            .with_class_name("report"),
    );

    let config = value!({
        "name": "<service>",
        "replicas": 3,
        "enabled": true,
        "owner": null,
        "timeout": undefined
    });
    logger.log(&config, &mut page, Some("config"));

    let node = Object::new();
    node.set("id", Symbol::new("node"));
    node.set("pattern", RegExpValue::new("^a+$", "i"));
    node.set("parent", node.clone());
    logger.log(&Value::from(node), &mut page, Some("graph"));

    logger.log(&Value::from(f64::INFINITY), &mut page, None);

    print!("{}", page.to_document());
}
