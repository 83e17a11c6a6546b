//! Runtime values
//!
//! Instances handed to the validator are dynamic trees. Every non-null value
//! reports a runtime class, which is what extractor resolution and bean
//! metadata lookup key on.

use std::fmt;

use crate::reflect::{names, ClassName};

/// Shared null, returned by reads that find nothing
pub static NULL: Value = Value::Null;

// ============================================================================
// Value Enum
// ============================================================================

/// Runtime value that can be validated
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    /// Primitive or object array
    Array(ArrayValue),
    /// Ordered, indexable collection (`List` or a subclass)
    List { class: ClassName, items: Vec<Value> },
    /// Unordered collection (`Set` or any other iterable)
    Set { class: ClassName, items: Vec<Value> },
    /// Keyed collection, entries in insertion order
    Map {
        class: ClassName,
        entries: Vec<(Value, Value)>,
    },
    /// Single-valued wrapper, `None` when empty
    Optional(Option<Box<Value>>),
    /// Any other object, including user-defined containers
    Bean(BeanValue),
}

impl Value {
    /// Get human-readable type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Byte(_) | Self::Short(_) | Self::Int(_) | Self::Long(_) => "integer",
            Self::Float(_) | Self::Double(_) => "float",
            Self::Char(_) => "char",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::List { .. } => "list",
            Self::Set { .. } => "set",
            Self::Map { .. } => "map",
            Self::Optional(_) => "optional",
            Self::Bean(_) => "bean",
        }
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Class of the value at runtime, `None` for null
    pub fn runtime_class(&self) -> Option<ClassName> {
        let name = match self {
            Self::Null => return None,
            Self::Bool(_) => names::BOOLEAN,
            Self::Byte(_) => names::BYTE,
            Self::Short(_) => names::SHORT,
            Self::Int(_) => names::INTEGER,
            Self::Long(_) => names::LONG,
            Self::Float(_) => names::FLOAT,
            Self::Double(_) => names::DOUBLE,
            Self::Char(_) => names::CHARACTER,
            Self::String(_) => names::STRING,
            Self::Array(array) => return Some(array.class()),
            Self::List { class, .. } | Self::Set { class, .. } | Self::Map { class, .. } => {
                return Some(class.clone())
            }
            Self::Optional(_) => names::OPTIONAL,
            Self::Bean(bean) => return Some(bean.class.clone()),
        };
        Some(ClassName::new(name))
    }

    pub fn as_bean(&self) -> Option<&BeanValue> {
        match self {
            Self::Bean(bean) => Some(bean),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integral view of numeric values
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Byte(v) => Some(i64::from(*v)),
            Self::Short(v) => Some(i64::from(*v)),
            Self::Int(v) => Some(i64::from(*v)),
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Floating view of numeric values
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(f64::from(*v)),
            Self::Double(v) => Some(*v),
            other => other.as_i64().map(|v| v as f64),
        }
    }

    /// Element count for sized values (strings count characters)
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::String(s) => Some(s.chars().count()),
            Self::Array(array) => Some(array.len()),
            Self::List { items, .. } | Self::Set { items, .. } => Some(items.len()),
            Self::Map { entries, .. } => Some(entries.len()),
            _ => None,
        }
    }

    /// `List` value of the default list class
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::List {
            class: ClassName::new(names::ARRAY_LIST),
            items: items.into_iter().collect(),
        }
    }

    /// `Set` value of the default set class
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Set {
            class: ClassName::new(names::HASH_SET),
            items: items.into_iter().collect(),
        }
    }

    /// `Map` value of the default map class
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Self::Map {
            class: ClassName::new(names::HASH_MAP),
            entries: entries.into_iter().collect(),
        }
    }

    pub fn optional(value: Option<Value>) -> Self {
        Self::Optional(value.map(Box::new))
    }

    /// Object array with the given component class
    pub fn object_array(component: impl Into<ClassName>, items: impl IntoIterator<Item = Value>) -> Self {
        Self::Array(ArrayValue::Object {
            component: component.into(),
            items: items.into_iter().collect(),
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Byte(v) => write!(f, "{}", v),
            Self::Short(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Long(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::Char(v) => write!(f, "{}", v),
            Self::String(v) => f.write_str(v),
            Self::Array(array) => write!(f, "{}[{}]", array.class(), array.len()),
            Self::List { items, .. } | Self::Set { items, .. } => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Self::Map { entries, .. } => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                f.write_str("}")
            }
            Self::Optional(None) => f.write_str("Optional.empty"),
            Self::Optional(Some(inner)) => write!(f, "Optional[{}]", inner),
            Self::Bean(bean) => write!(f, "{}", bean.class),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<BeanValue> for Value {
    fn from(value: BeanValue) -> Self {
        Self::Bean(value)
    }
}

impl From<ArrayValue> for Value {
    fn from(value: ArrayValue) -> Self {
        Self::Array(value)
    }
}

// ============================================================================
// Arrays
// ============================================================================

/// Array value, one variant per primitive component plus object arrays
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayValue {
    Boolean(Vec<bool>),
    Byte(Vec<i8>),
    Short(Vec<i16>),
    Int(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Char(Vec<char>),
    Object { component: ClassName, items: Vec<Value> },
}

impl ArrayValue {
    pub fn len(&self) -> usize {
        match self {
            Self::Boolean(v) => v.len(),
            Self::Byte(v) => v.len(),
            Self::Short(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Long(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Double(v) => v.len(),
            Self::Char(v) => v.len(),
            Self::Object { items, .. } => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn class(&self) -> ClassName {
        match self {
            Self::Boolean(_) => ClassName::new("boolean[]"),
            Self::Byte(_) => ClassName::new("byte[]"),
            Self::Short(_) => ClassName::new("short[]"),
            Self::Int(_) => ClassName::new("int[]"),
            Self::Long(_) => ClassName::new("long[]"),
            Self::Float(_) => ClassName::new("float[]"),
            Self::Double(_) => ClassName::new("double[]"),
            Self::Char(_) => ClassName::new("char[]"),
            Self::Object { component, .. } => ClassName::array_of(component),
        }
    }
}

// ============================================================================
// Beans
// ============================================================================

/// An object with named properties
#[derive(Debug, Clone, PartialEq)]
pub struct BeanValue {
    pub class: ClassName,
    pub properties: Vec<(String, Value)>,
}

impl BeanValue {
    pub fn new(class: impl Into<ClassName>) -> Self {
        Self {
            class: class.into(),
            properties: Vec::new(),
        }
    }

    /// Set a property, replacing an earlier value of the same name
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.properties.push((name, value)),
        }
        self
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }
}
