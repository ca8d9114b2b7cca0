use crate::{GameError, GameResult};
use std::any::Any;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

/// The entity kind a property is attached to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyScope {
    Vertex,
    Edge,
    Graph,
}

/// Value type of a declared property.
///
/// The textual names (used by [`FromStr`] and [`Display`]) are `bool`, `int`, `float`,
/// `string` and `object`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyType {
    Bool,
    Int,
    Float,
    String,
    Opaque,
}

/// A reference-counted value of arbitrary type, or nothing.
///
/// Two opaque values are equal when both are empty or both point to the same allocation.
#[derive(Clone, Default)]
pub struct Opaque(Option<Arc<dyn Any + Send + Sync>>);

/// A typed property value.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Opaque(Opaque),
}

impl Display for PropertyScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyScope::Vertex => write!(f, "vertex"),
            PropertyScope::Edge => write!(f, "edge"),
            PropertyScope::Graph => write!(f, "graph"),
        }
    }
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::Bool,
        PropertyType::Int,
        PropertyType::Float,
        PropertyType::String,
        PropertyType::Opaque,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PropertyType::Bool => "bool",
            PropertyType::Int => "int",
            PropertyType::Float => "float",
            PropertyType::String => "string",
            PropertyType::Opaque => "object",
        }
    }

    /// The value every entity holds before the property is explicitly set.
    pub fn default_value(&self) -> PropertyValue {
        match self {
            PropertyType::Bool => PropertyValue::Bool(false),
            PropertyType::Int => PropertyValue::Int(0),
            PropertyType::Float => PropertyValue::Float(0.0),
            PropertyType::String => PropertyValue::String(String::new()),
            PropertyType::Opaque => PropertyValue::Opaque(Opaque::none()),
        }
    }
}

impl Display for PropertyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PropertyType {
    type Err = GameError;

    fn from_str(s: &str) -> GameResult<Self> {
        PropertyType::ALL
            .into_iter()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| GameError::InvalidPropertyType { tag: s.to_string() })
    }
}

impl Opaque {
    pub fn none() -> Opaque {
        Opaque(None)
    }

    pub fn new<T: Any + Send + Sync>(value: T) -> Opaque {
        Opaque(Some(Arc::new(value)))
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Borrow the wrapped value if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_deref()?.downcast_ref::<T>()
    }
}

impl Debug for Opaque {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            None => write!(f, "Opaque(None)"),
            Some(_) => write!(f, "Opaque(..)"),
        }
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{b}"),
            PropertyValue::Int(i) => write!(f, "{i}"),
            PropertyValue::Float(x) => write!(f, "{x}"),
            PropertyValue::String(s) => write!(f, "{s:?}"),
            PropertyValue::Opaque(o) if o.is_none() => write!(f, "none"),
            PropertyValue::Opaque(_) => write!(f, "<object>"),
        }
    }
}

impl PropertyValue {
    pub fn value_type(&self) -> PropertyType {
        match self {
            PropertyValue::Bool(_) => PropertyType::Bool,
            PropertyValue::Int(_) => PropertyType::Int,
            PropertyValue::Float(_) => PropertyType::Float,
            PropertyValue::String(_) => PropertyType::String,
            PropertyValue::Opaque(_) => PropertyType::Opaque,
        }
    }

    /// Convert this value to `target`, or return the type of the value that could not
    /// be converted.
    ///
    /// Accepted conversions besides the identity: `bool -> int` (0/1), integral
    /// `float -> int`, `int -> float`, and anything into `object`. Scalars stored as `object` are
    /// wrapped as their Rust type (`bool`, `i64`, `f64` or `String`).
    pub fn coerce(self, target: PropertyType) -> Result<PropertyValue, PropertyType> {
        match (target, self) {
            (PropertyType::Bool, value @ PropertyValue::Bool(_)) => Ok(value),
            (PropertyType::Int, value @ PropertyValue::Int(_)) => Ok(value),
            (PropertyType::Int, PropertyValue::Bool(b)) => Ok(PropertyValue::Int(i64::from(b))),
            (PropertyType::Int, PropertyValue::Float(x))
                if x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 =>
            {
                Ok(PropertyValue::Int(x as i64))
            }
            (PropertyType::Float, value @ PropertyValue::Float(_)) => Ok(value),
            (PropertyType::Float, PropertyValue::Int(i)) => Ok(PropertyValue::Float(i as f64)),
            (PropertyType::String, value @ PropertyValue::String(_)) => Ok(value),
            (PropertyType::Opaque, value @ PropertyValue::Opaque(_)) => Ok(value),
            (PropertyType::Opaque, PropertyValue::Bool(b)) => Ok(Opaque::new(b).into()),
            (PropertyType::Opaque, PropertyValue::Int(i)) => Ok(Opaque::new(i).into()),
            (PropertyType::Opaque, PropertyValue::Float(x)) => Ok(Opaque::new(x).into()),
            (PropertyType::Opaque, PropertyValue::String(s)) => Ok(Opaque::new(s).into()),
            (_, value) => Err(value.value_type()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            PropertyValue::Opaque(o) => Some(o),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        PropertyValue::Int(i64::from(v))
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Int(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Float(v)
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::String(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_string())
    }
}

impl From<Opaque> for PropertyValue {
    fn from(v: Opaque) -> Self {
        PropertyValue::Opaque(v)
    }
}
