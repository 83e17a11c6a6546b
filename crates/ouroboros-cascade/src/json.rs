//! JSON rendering of values and violation reports

use serde::Serialize;

use crate::errors::{ConstraintViolation, ConstraintViolations};
use crate::types::{ArrayValue, Value};

// ============================================================================
// Conversions
// ============================================================================

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Byte(v) => serde_json::Value::Number((*v).into()),
            Value::Short(v) => serde_json::Value::Number((*v).into()),
            Value::Int(v) => serde_json::Value::Number((*v).into()),
            Value::Long(v) => serde_json::Value::Number((*v).into()),
            Value::Float(v) => float(f64::from(*v)),
            Value::Double(v) => float(*v),
            Value::Char(c) => serde_json::Value::String(c.to_string()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(array) => array_to_json(array),
            Value::List { items, .. } | Value::Set { items, .. } => {
                serde_json::Value::Array(items.iter().map(Into::into).collect())
            }
            // Keys are rendered with their display form
            Value::Map { entries, .. } => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.into()))
                    .collect(),
            ),
            Value::Optional(inner) => inner
                .as_deref()
                .map(Into::into)
                .unwrap_or(serde_json::Value::Null),
            Value::Bean(bean) => serde_json::Value::Object(
                bean.properties
                    .iter()
                    .map(|(name, value)| (name.clone(), value.into()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        (&value).into()
    }
}

fn float(v: f64) -> serde_json::Value {
    serde_json::Number::from_f64(v)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

fn array_to_json(array: &ArrayValue) -> serde_json::Value {
    let items: Vec<serde_json::Value> = match array {
        ArrayValue::Boolean(v) => v.iter().map(|b| serde_json::Value::Bool(*b)).collect(),
        ArrayValue::Byte(v) => v.iter().map(|n| (*n).into()).collect(),
        ArrayValue::Short(v) => v.iter().map(|n| (*n).into()).collect(),
        ArrayValue::Int(v) => v.iter().map(|n| (*n).into()).collect(),
        ArrayValue::Long(v) => v.iter().map(|n| (*n).into()).collect(),
        ArrayValue::Float(v) => v.iter().map(|n| float(f64::from(*n))).collect(),
        ArrayValue::Double(v) => v.iter().map(|n| float(*n)).collect(),
        ArrayValue::Char(v) => v.iter().map(|c| serde_json::Value::String(c.to_string())).collect(),
        ArrayValue::Object { items, .. } => items.iter().map(Into::into).collect(),
    };
    serde_json::Value::Array(items)
}

// ============================================================================
// Violation Reports
// ============================================================================

/// Serializable form of a [`ConstraintViolation`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolationReport {
    pub path: String,
    pub constraint: String,
    pub message: String,
    pub invalid_value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_bean_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaf_bean_class: Option<String>,
}

impl ConstraintViolation {
    pub fn to_report(&self) -> ViolationReport {
        ViolationReport {
            path: self.property_path.to_string(),
            constraint: self.constraint.clone(),
            message: self.message.clone(),
            invalid_value: (&self.invalid_value).into(),
            root_bean_class: self.root_bean_class.as_ref().map(ToString::to_string),
            leaf_bean_class: self.leaf_bean_class.as_ref().map(ToString::to_string),
        }
    }
}

impl ConstraintViolations {
    /// Reports in discovery order
    pub fn to_reports(&self) -> Vec<ViolationReport> {
        self.iter().map(ConstraintViolation::to_report).collect()
    }

    /// JSON array of reports
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.to_reports()).unwrap_or(serde_json::Value::Null)
    }
}
