//! Dynamic cell values and the attribute-read contract for row objects.

use compact_str::CompactString;
use core::fmt;
use hashbrown::HashMap;
use std::sync::Arc;

/// A row object whose attributes and relations can be read by name.
///
/// `attribute` returns `None` when the object has no attribute called `name`;
/// a relation that exists but is unset is `Some(Value::Null)`.
pub trait Record: fmt::Debug + Send + Sync {
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Text shown when the object itself is the value of a cell.
    fn display(&self) -> String {
        format!("{self:?}")
    }
}

/// A value read from a row or one of its related objects.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(CompactString),
    List(Vec<Value>),
    Record(Arc<dyn Record>),
}

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the related object if this value is one.
    pub fn as_record(&self) -> Option<&dyn Record> {
        match self {
            Self::Record(record) => Some(record.as_ref()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Wraps a related object.
    pub fn record<R: Record + 'static>(record: R) -> Self {
        Self::Record(Arc::new(record))
    }
}

// Related objects compare by identity; everything else by value.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::List(values) => {
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
            Self::Record(record) => f.write_str(&record.display()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Text(value) => serializer.serialize_str(value),
            Self::List(values) => serializer.collect_seq(values),
            Self::Record(record) => serializer.serialize_str(&record.display()),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Converts a borrowed attribute into a [`Value`].
///
/// Used by `#[derive(Record)]` to expose struct fields; relations are held as
/// `Arc<T>` or `Option<Arc<T>>` so they can be shared into the value.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

macro_rules! impl_to_value_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToValue for $ty {
                #[inline]
                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }
            }

            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_to_value_int!(i8, i16, i32, i64, u8, u16, u32);

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(CompactString::from(self))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(CompactString::from(self.as_str()))
    }
}

impl ToValue for CompactString {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: Record + 'static> ToValue for Arc<T> {
    fn to_value(&self) -> Value {
        Value::Record(self.clone())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(CompactString::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(CompactString::from(value))
    }
}

impl From<CompactString> for Value {
    fn from(value: CompactString) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Arc<dyn Record>> for Value {
    fn from(value: Arc<dyn Record>) -> Self {
        Self::Record(value)
    }
}

// =============================================================================
// Object
// =============================================================================

/// A dynamically built row object, for hosts that materialize rows as maps.
///
/// ```ignore
/// let room = Object::new("Room").with("name", "Hall A");
/// let event = Object::new("Event").with("room", Value::record(room));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Object {
    model: CompactString,
    display: Option<CompactString>,
    attributes: HashMap<CompactString, Value>,
}

impl Object {
    pub fn new(model: impl Into<CompactString>) -> Self {
        Self {
            model: model.into(),
            display: None,
            attributes: HashMap::new(),
        }
    }

    /// Sets an attribute, replacing any previous value.
    pub fn with(mut self, name: impl Into<CompactString>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the text shown when this object is a cell value.
    pub fn with_display(mut self, display: impl Into<CompactString>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Record for Object {
    fn attribute(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).cloned()
    }

    fn display(&self) -> String {
        match &self.display {
            Some(display) => display.to_string(),
            None => format!("{} object", self.model),
        }
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::record(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_cell_rendering() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(3i32).to_string(), "3");
        assert_eq!(Value::from("Hall A").to_string(), "Hall A");
        assert_eq!(
            Value::List(vec![Value::from(1i32), Value::from("b")]).to_string(),
            "1, b"
        );

        let room = Object::new("Room").with_display("Hall A");
        assert_eq!(Value::from(room).to_string(), "Hall A");
        assert_eq!(Value::from(Object::new("Room")).to_string(), "Room object");
    }

    #[test]
    fn records_compare_by_identity() {
        let room: Arc<dyn Record> = Arc::new(Object::new("Room"));
        let a = Value::Record(room.clone());
        let b = Value::Record(room);
        let c = Value::from(Object::new("Room"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn object_reads_attributes_by_name() {
        let event = Object::new("Event").with("date", "2024-05-01").with("room", None::<&str>);
        assert_eq!(event.attribute("date"), Some(Value::from("2024-05-01")));
        assert_eq!(event.attribute("room"), Some(Value::Null));
        assert_eq!(event.attribute("missing"), None);
    }

    #[test]
    fn to_value_handles_options_and_shared_records() {
        let room = Arc::new(Object::new("Room").with_display("Hall A"));
        let some = Some(room.clone()).to_value();
        assert!(some.as_record().is_some());
        assert_eq!(None::<Arc<Object>>.to_value(), Value::Null);
        assert_eq!(vec![1i32, 2].to_value(), Value::List(vec![1i32.into(), 2i32.into()]));
        assert_eq!("x".to_value(), Value::from("x"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_records_as_their_display() {
        let room = Object::new("Room").with_display("Hall A");
        let cells = vec![Value::Null, Value::from(7i64), Value::from(room)];
        assert_eq!(
            serde_json::to_string(&cells).unwrap(),
            r#"[null,7,"Hall A"]"#
        );
    }

    #[test]
    fn object_display_falls_back_to_model_name() {
        let room = Object::new("Room").with("name", "Hall A").with("name", "Annex");
        assert_eq!(room.model(), "Room");
        assert_eq!(room.display(), "Room object");
        assert_eq!(room.attribute("name"), Some(Value::from("Annex")));
    }
}
