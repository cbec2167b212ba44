//! Runtime value model.
//!
//! [`Value`] is the dynamic value graph the serializer walks. It behaves like
//! a value in a dynamic language runtime: composites ([`Object`], [`Array`],
//! host objects) are shared handles with reference identity, so a graph may
//! alias and even contain itself.
//!
//! ## Building values
//!
//! ```rust
//! use safe_stringify::{Array, Object, Value};
//!
//! let user = Object::new();
//! user.set("name", "Alice");
//! user.set("tags", Array::from(vec![Value::from("admin")]));
//! user.set("self", user.clone()); // cycles are allowed
//!
//! assert_eq!(user.len(), 3);
//! ```
//!
//! ## Accessors
//!
//! Properties may be computed by a fallible getter. A failing getter only
//! affects the property it belongs to:
//!
//! ```rust
//! use safe_stringify::{serialize_compact, Error, Object, StringifyOptions};
//!
//! let obj = Object::new();
//! obj.set("ok", 1);
//! obj.define_getter("broken", || Err(Error::message("nope")));
//!
//! let text = serialize_compact(&obj.into(), &StringifyOptions::default());
//! assert_eq!(text, r#"{"ok":1,"broken":"[Error extracting property: nope]"}"#);
//! ```

use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use indexmap::IndexMap;
use num_bigint::BigInt;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Largest timestamp magnitude a date can hold, in milliseconds (±100,000,000 days).
const MAX_TIME_MILLIS: i64 = 8_640_000_000_000_000;

/// A dynamically-typed runtime value.
///
/// Scalars are stored inline. Objects, arrays and host objects are shared
/// handles: cloning a `Value` clones the handle, not the contents, and two
/// clones are the same composite for cycle detection.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(BigInt),
    String(String),
    Symbol(Symbol),
    Function(Rc<Function>),
    Object(Object),
    Array(Array),
    Date(Date),
    Error(Rc<ErrorValue>),
    RegExp(Rc<RegExpValue>),
    Host(HostRef),
}

impl Value {
    /// Returns the identity of a composite value, or `None` for everything else.
    ///
    /// Identity is the address of the shared allocation, so it is stable for
    /// as long as any handle to the composite is alive.
    #[must_use]
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Object(obj) => Some(obj.identity()),
            Value::Array(arr) => Some(arr.identity()),
            Value::Host(host) => Some(Rc::as_ptr(host) as *const () as usize),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// If the value is a string, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a number, returns it.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is a host object, returns the handle.
    #[inline]
    #[must_use]
    pub fn as_host(&self) -> Option<&HostRef> {
        match self {
            Value::Host(host) => Some(host),
            _ => None,
        }
    }

    /// Creates a function value with the given name and no source text.
    pub fn function(name: impl Into<String>) -> Self {
        Value::Function(Rc::new(Function::new(name)))
    }

    /// Creates an error value with the given name and message and no stack.
    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Value::Error(Rc::new(ErrorValue::new(name, message)))
    }

    /// Creates a regular-expression value from its source and flags.
    pub fn regexp(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Value::RegExp(Rc::new(RegExpValue::new(source, flags)))
    }

    /// Wraps an embedding-application object.
    pub fn host<H: HostObject + 'static>(host: H) -> Self {
        Value::Host(Rc::new(host))
    }
}

/// Composites compare by identity; everything else compares by value.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::RegExp(a), Value::RegExp(b)) => a == b,
            (Value::Object(_), Value::Object(_))
            | (Value::Array(_), Value::Array(_))
            | (Value::Host(_), Value::Host(_)) => self.identity() == other.identity(),
            _ => false,
        }
    }
}

/// A symbol with an optional description.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Symbol {
    description: Option<String>,
}

impl Symbol {
    pub fn new(description: impl Into<String>) -> Self {
        Symbol {
            description: Some(description.into()),
        }
    }

    /// A symbol created without a description.
    pub fn anonymous() -> Self {
        Symbol { description: None }
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description.as_deref().unwrap_or(""))
    }
}

/// A callable value, described by its name and (optionally) its source text.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Function {
    name: String,
    source: Option<String>,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Function {
            name: name.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The function name; empty for anonymous functions.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// An error value with a name, a message and an optional stack trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorValue {
    name: String,
    message: String,
    stack: Option<String>,
}

impl ErrorValue {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorValue {
            name: name.into(),
            message: message.into(),
            stack: None,
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Captures a Rust error. The source chain becomes the stack text.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let message = err.to_string();
        let mut stack = format!("Error: {}", message);
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }
        ErrorValue::new("Error", message).with_stack(stack)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }
}

/// A regular-expression literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegExpValue {
    source: String,
    flags: String,
}

impl RegExpValue {
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Self {
        RegExpValue {
            source: source.into(),
            flags: flags.into(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn flags(&self) -> &str {
        &self.flags
    }
}

impl fmt::Display for RegExpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = if self.source.is_empty() {
            "(?:)"
        } else {
            &self.source
        };
        write!(f, "/{}/{}", source, self.flags)
    }
}

/// A point in time with millisecond precision, or an invalid date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Date(Option<DateTime<Utc>>);

impl Date {
    /// Creates a date from milliseconds since the Unix epoch.
    ///
    /// Timestamps outside the representable range produce an invalid date.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        if !(-MAX_TIME_MILLIS..=MAX_TIME_MILLIS).contains(&millis) {
            return Date(None);
        }
        Date(Utc.timestamp_millis_opt(millis).single())
    }

    #[must_use]
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Date::from_millis(datetime.timestamp_millis())
    }

    /// A date that holds no timestamp.
    #[must_use]
    pub const fn invalid() -> Self {
        Date(None)
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        self.0.as_ref()
    }

    /// ISO-8601 text with millisecond precision, e.g. `2023-01-01T00:00:00.000Z`.
    ///
    /// Years outside `0..=9999` use the six-digit signed form (`+012345-...`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`] for an invalid date.
    pub fn to_iso_string(&self) -> Result<String> {
        let dt = self.0.ok_or(Error::InvalidDate)?;
        let year = dt.year();
        let year_text = if (0..=9999).contains(&year) {
            format!("{:04}", year)
        } else {
            let sign = if year < 0 { '-' } else { '+' };
            format!("{}{:06}", sign, year.unsigned_abs())
        };
        Ok(format!(
            "{}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            year_text,
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second(),
            dt.timestamp_subsec_millis()
        ))
    }

    /// Locale-style text in UTC, e.g. `1/1/2023, 12:00:00 AM`.
    #[must_use]
    pub fn to_locale_string(&self) -> String {
        match self.0 {
            Some(dt) => {
                let (is_pm, hour) = dt.hour12();
                format!(
                    "{}/{}/{}, {}:{:02}:{:02} {}",
                    dt.month(),
                    dt.day(),
                    dt.year(),
                    hour,
                    dt.minute(),
                    dt.second(),
                    if is_pm { "PM" } else { "AM" }
                )
            }
            None => "Invalid Date".to_string(),
        }
    }

    /// Milliseconds since the epoch as decimal digits, or `NaN` for an invalid date.
    #[must_use]
    pub fn to_millis_string(&self) -> String {
        match self.0 {
            Some(dt) => dt.timestamp_millis().to_string(),
            None => "NaN".to_string(),
        }
    }
}

/// A property slot: either a stored value or a fallible getter.
#[derive(Clone)]
pub enum Property {
    Data(Value),
    Accessor(Getter),
}

/// A computed property. Returning `Err` marks just that property as failed.
pub type Getter = Rc<dyn Fn() -> Result<Value>>;

impl Property {
    /// Reads the property, running the getter for accessors.
    ///
    /// # Errors
    ///
    /// Propagates the getter's failure.
    pub fn read(&self) -> Result<Value> {
        match self {
            Property::Data(value) => Ok(value.clone()),
            Property::Accessor(getter) => getter(),
        }
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Data(value) => f.debug_tuple("Data").field(value).finish(),
            Property::Accessor(_) => write!(f, "Accessor(..)"),
        }
    }
}

/// A shared, mutable, insertion-ordered object.
///
/// Cloning produces another handle to the same object.
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<IndexMap<String, Property>>>);

impl Object {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a data property, replacing any existing property with the same key.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.0
            .borrow_mut()
            .insert(key.into(), Property::Data(value.into()));
    }

    /// Stores a computed property.
    pub fn define_getter<F>(&self, key: impl Into<String>, getter: F)
    where
        F: Fn() -> Result<Value> + 'static,
    {
        self.0
            .borrow_mut()
            .insert(key.into(), Property::Accessor(Rc::new(getter)));
    }

    /// Reads a property. Missing keys read as `undefined`.
    ///
    /// # Errors
    ///
    /// Fails when the property's getter fails.
    pub fn get(&self, key: &str) -> Result<Value> {
        let property = self.0.borrow().get(key).cloned();
        match property {
            Some(property) => property.read(),
            None => Ok(Value::Undefined),
        }
    }

    pub fn remove(&self, key: &str) -> Option<Property> {
        self.0.borrow_mut().shift_remove(key)
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Copies the property slots out so they can be read without holding a borrow.
    ///
    /// # Errors
    ///
    /// Fails if the object is currently mutably borrowed.
    pub fn entries(&self) -> Result<Vec<(String, Property)>> {
        let properties = self
            .0
            .try_borrow()
            .map_err(|_| Error::BorrowConflict("object"))?;
        Ok(properties
            .iter()
            .map(|(k, p)| (k.clone(), p.clone()))
            .collect())
    }

    #[must_use]
    pub fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(properties) => f
                .debug_struct("Object")
                .field("keys", &properties.keys().collect::<Vec<_>>())
                .finish(),
            Err(_) => write!(f, "Object(<borrowed>)"),
        }
    }
}

/// A shared, mutable, indexed sequence.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

impl Array {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    /// Reads an element. Out-of-range indices read as `undefined`.
    #[must_use]
    pub fn get(&self, index: usize) -> Value {
        self.0.borrow().get(index).cloned().unwrap_or_default()
    }

    /// Writes an element, padding with `undefined` when writing past the end.
    pub fn set(&self, index: usize, value: impl Into<Value>) {
        let mut elements = self.0.borrow_mut();
        if index >= elements.len() {
            elements.resize(index + 1, Value::Undefined);
        }
        elements[index] = value.into();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Copies the element handles out so they can be visited without holding a borrow.
    ///
    /// # Errors
    ///
    /// Fails if the array is currently mutably borrowed.
    pub fn elements(&self) -> Result<Vec<Value>> {
        self.0
            .try_borrow()
            .map(|elements| elements.clone())
            .map_err(|_| Error::BorrowConflict("array"))
    }

    #[must_use]
    pub fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Array) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(elements) => write!(f, "Array(len={})", elements.len()),
            Err(_) => write!(f, "Array(<borrowed>)"),
        }
    }
}

impl From<Vec<Value>> for Array {
    fn from(elements: Vec<Value>) -> Self {
        Array(Rc::new(RefCell::new(elements)))
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Array::from(iter.into_iter().collect::<Vec<_>>())
    }
}

/// An object owned by the embedding application (a DOM node, a window, a
/// proxy around native state, ...).
///
/// Host objects are walked like plain objects unless an
/// [`EnvironmentProbe`](crate::EnvironmentProbe) recognises them. Both
/// enumeration and property reads may fail.
pub trait HostObject: fmt::Debug {
    /// Lists the enumerable keys, in order.
    ///
    /// # Errors
    ///
    /// A failure collapses the whole object to an `[Error iterating: ...]` marker.
    fn own_keys(&self) -> Result<Vec<String>>;

    /// Reads one property.
    ///
    /// # Errors
    ///
    /// A failure replaces just this property with an `[Error extracting property: ...]` marker.
    fn get(&self, key: &str) -> Result<Value>;

    /// Lets environment probes downcast to the concrete host type.
    fn as_any(&self) -> &dyn Any;
}

pub type HostRef = Rc<dyn HostObject>;

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(value)
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Value::Symbol(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(Rc::new(value))
    }
}

impl From<ErrorValue> for Value {
    fn from(value: ErrorValue) -> Self {
        Value::Error(Rc::new(value))
    }
}

impl From<RegExpValue> for Value {
    fn from(value: RegExpValue) -> Self {
        Value::RegExp(Rc::new(value))
    }
}

impl From<Date> for Value {
    fn from(value: Date) -> Self {
        Value::Date(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(Date::from_datetime(value))
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(Array::from(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
