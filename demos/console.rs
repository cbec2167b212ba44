//! Logging awkward values to the console.
//!
//! Run with: cargo run --example console

use safe_stringify::{
    log, value, Array, Date, DateFormat, Error, ErrorValue, Function, LogMethod, Logger,
    LoggerOptions, Object, StringifyOptions, Value, ValueKind,
};

fn main() {
    let user = Object::new();
    user.set("name", "Alice");
    user.set("joined", Date::from_millis(1_672_531_200_000));
    user.set("score", f64::NAN);
    user.set("greet", Function::new("greet").with_source("function greet() { return 'hi'; }"));
    user.set("friends", Array::from(vec![Value::from(user.clone())]));
    user.define_getter("secret", || Err(Error::message("not allowed")));

    let value = Value::from(user);

    // Defaults: 2-space indent, ISO dates, function bodies shown
    log(&value, Some("user"));

    let mut logger = Logger::new(
        LoggerOptions::new()
            .with_group_labels(true)
            .with_stringify(
                StringifyOptions::new()
                    .with_indent(4)
                    .with_date_format(DateFormat::Locale)
                    .with_function_bodies(false),
            ),
    );
    logger.log(&value, Some("user (grouped)"));

    logger.update_options(|o| {
        o.method = LogMethod::Error;
        o.stringify = o
            .stringify
            .compact()
            .with_handler(ValueKind::Error, |v| match v {
                Value::Error(err) => format!("<{}>", err.message()),
                _ => String::new(),
            });
    });
    logger.log(&ErrorValue::new("TypeError", "x is undefined").into(), Some("failure"));

    let deep = value!({"a": {"b": {"c": {"d": "bottom"}}}});
    logger.update_options(|o| {
        o.method = LogMethod::Log;
        o.stringify = o.stringify.clone().with_max_depth(2);
    });
    logger.log(&deep, Some("depth 2"));
}
