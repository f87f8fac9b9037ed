// crates/slotframe-core/src/value.rs
use glam::Vec2;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::{ElementId, LayoutError, Result};

/// A single event argument. The engine never interprets these; conditions
/// and effects pick out the variant they expect.
#[derive(Clone)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f32),
    Bool(bool),
    Point(Vec2),
    Element(ElementId),
    /// Anything else the application wants to pass along.
    Opaque(Rc<dyn Any>),
}

impl Value {
    pub fn opaque<T: Any>(value: T) -> Self {
        Value::Opaque(Rc::new(value))
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f32),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Vec2> {
        match self {
            Value::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<ElementId> {
        match self {
            Value::Element(id) => Some(*id),
            _ => None,
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Opaque(any) => any.downcast_ref::<T>(),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Point(_) => "point",
            Value::Element(_) => "element",
            Value::Opaque(_) => "opaque",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Point(p) => f.debug_tuple("Point").field(p).finish(),
            Value::Element(id) => f.debug_tuple("Element").field(id).finish(),
            Value::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Point(a), Value::Point(b)) => a == b,
            (Value::Element(a), Value::Element(b)) => a == b,
            (Value::Opaque(a), Value::Opaque(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec2> for Value {
    fn from(value: Vec2) -> Self {
        Value::Point(value)
    }
}

/// String-keyed argument map handed to event conditions and effects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventArgs {
    values: HashMap<String, Value>,
}

impl EventArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fills in every default whose key is not already present. Values
    /// already in `self` win.
    pub fn merge_defaults(&mut self, defaults: &EventArgs) {
        for (key, value) in &defaults.values {
            self.values
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }

    pub fn merged_with(mut self, defaults: &EventArgs) -> Self {
        self.merge_defaults(defaults);
        self
    }

    pub fn require(&self, key: &str) -> Result<&Value> {
        self.values
            .get(key)
            .ok_or_else(|| LayoutError::MissingArgument(key.to_string()))
    }

    pub fn float(&self, key: &str) -> Result<f32> {
        let value = self.require(key)?;
        value.as_float().ok_or_else(|| type_error(key, "float", value))
    }

    pub fn element(&self, key: &str) -> Result<ElementId> {
        let value = self.require(key)?;
        value.as_element().ok_or_else(|| type_error(key, "element", value))
    }

    pub fn point(&self, key: &str) -> Result<Vec2> {
        let value = self.require(key)?;
        value.as_point().ok_or_else(|| type_error(key, "point", value))
    }

    pub fn string(&self, key: &str) -> Result<&str> {
        let value = self.require(key)?;
        value.as_string().ok_or_else(|| type_error(key, "string", value))
    }
}

fn type_error(key: &str, expected: &'static str, found: &Value) -> LayoutError {
    tracing::trace!("argument '{}' holds a {}, wanted {}", key, found.kind(), expected);
    LayoutError::ArgumentType {
        key: key.to_string(),
        expected,
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for EventArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::from(3).as_float(), Some(3.0));
        assert_eq!(Value::from(2.5f32).as_int(), None);
        assert_eq!(Value::from("x").as_string(), Some("x"));
        assert_eq!(Value::Element(7).as_element(), Some(7));
        assert_eq!(Value::from(true).as_bool(), Some(true));
    }

    #[test]
    fn test_opaque_downcast() {
        let value = Value::opaque(vec![1u8, 2, 3]);
        assert_eq!(value.downcast_ref::<Vec<u8>>(), Some(&vec![1u8, 2, 3]));
        assert!(value.downcast_ref::<String>().is_none());
    }

    #[test]
    fn test_explicit_arguments_win_over_defaults() {
        let defaults = EventArgs::new().with("x", "default").with("y", 2);
        let args = EventArgs::new().with("x", "explicit").merged_with(&defaults);

        assert_eq!(args.get("x"), Some(&Value::from("explicit")));
        assert_eq!(args.get("y"), Some(&Value::Int(2)));
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_require_reports_missing_and_mistyped() {
        let args = EventArgs::new().with("posX", "left");
        assert_eq!(
            args.float("posY"),
            Err(LayoutError::MissingArgument("posY".to_string()))
        );
        assert!(matches!(
            args.float("posX"),
            Err(LayoutError::ArgumentType { expected: "float", .. })
        ));
    }
}
