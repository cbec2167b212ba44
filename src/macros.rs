/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Objects and arrays become fresh shared composites. Any other expression
/// goes through `Value::from`, so existing handles can be spliced in to
/// build aliased or cyclic graphs.
///
/// ```rust
/// use safe_stringify::{value, Value};
///
/// let tags = value!(["a", "b"]);
/// let data = value!({
///     "id": 7,
///     "tags": (tags.clone()),
///     "missing": undefined
/// });
///
/// let obj = data.as_object().unwrap();
/// assert_eq!(obj.get("tags").unwrap(), tags);
/// assert!(obj.get("missing").unwrap().is_undefined());
/// ```
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::Value::Null
    };

    (undefined) => {
        $crate::Value::Undefined
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array($crate::Array::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array($crate::Array::from(vec![$($crate::value!($elem)),*]))
    };

    ({}) => {
        $crate::Value::Object($crate::Object::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let object = $crate::Object::new();
        $(
            object.set($key, $crate::value!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($e:expr) => {
        $crate::Value::from($e)
    };
}
