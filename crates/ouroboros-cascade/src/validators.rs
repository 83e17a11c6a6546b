//! Validator routines and their resolution
//!
//! Each constraint is paired with a routine once, while metadata is built,
//! based on the boxed erased type of the value it will see.
//! [`resolve_validator`] fails with `NoValidatorForType` when the constraint
//! cannot handle that type, so walks never meet an unsupported pairing.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::constraints::ConstraintKind;
use crate::errors::{ConfigResult, ConfigurationError};
use crate::formats::{compile_full_match, is_valid_email};
use crate::reflect::{names, ClassName, TypeRegistry};
use crate::types::Value;

// ============================================================================
// Validator Trait
// ============================================================================

/// A check on a single value
///
/// Null values reach custom routines unchanged; by convention they are
/// valid unless the routine exists to reject them.
pub trait ConstraintValidator: Send + Sync + fmt::Debug {
    /// Constraint name reported with violations
    fn name(&self) -> &str;

    /// Classes the routine accepts; a target matches when assignable to one
    fn supported_types(&self) -> Vec<ClassName> {
        vec![ClassName::new(names::OBJECT)]
    }

    fn message(&self) -> String {
        format!("must satisfy {}", self.name())
    }

    fn is_valid(&self, value: &Value) -> bool;
}

// ============================================================================
// Resolution
// ============================================================================

/// Pick the routine for `kind` validating values of class `target`
///
/// `target` must already be boxed; primitives never reach a validator.
pub fn resolve_validator(
    registry: &TypeRegistry,
    kind: &ConstraintKind,
    target: &ClassName,
) -> ConfigResult<Arc<dyn ConstraintValidator>> {
    let no_validator = || ConfigurationError::NoValidatorForType {
        constraint: kind.name().to_string(),
        target: target.to_string(),
    };

    if let ConstraintKind::Custom(validator) = kind {
        let supported = validator
            .supported_types()
            .iter()
            .any(|ty| registry.is_assignable(ty, target));
        return if supported {
            Ok(Arc::clone(validator))
        } else {
            Err(no_validator())
        };
    }

    if !supports(registry, kind, target) {
        return Err(no_validator());
    }

    let builtin = match kind {
        ConstraintKind::NotNull => Builtin::NotNull,
        ConstraintKind::Null => Builtin::Null,
        ConstraintKind::NotEmpty => Builtin::NotEmpty,
        ConstraintKind::NotBlank => Builtin::NotBlank,
        ConstraintKind::Size { min, max } => Builtin::Size {
            min: *min,
            max: *max,
        },
        ConstraintKind::Min(min) => Builtin::Range {
            name: "Min",
            min: Some(*min),
            max: None,
        },
        ConstraintKind::Max(max) => Builtin::Range {
            name: "Max",
            min: None,
            max: Some(*max),
        },
        ConstraintKind::Range { min, max } => Builtin::Range {
            name: "Range",
            min: Some(*min),
            max: Some(*max),
        },
        ConstraintKind::Positive => Builtin::Sign { positive: true },
        ConstraintKind::Negative => Builtin::Sign { positive: false },
        ConstraintKind::Pattern(regex) => Builtin::Pattern(compile_full_match(regex)?),
        ConstraintKind::Email => Builtin::Email,
        ConstraintKind::AssertTrue => Builtin::Assert(true),
        ConstraintKind::AssertFalse => Builtin::Assert(false),
        ConstraintKind::Custom(_) => return Err(no_validator()),
    };
    Ok(Arc::new(builtin))
}

/// Whether a built-in kind has a routine for `target`
fn supports(registry: &TypeRegistry, kind: &ConstraintKind, target: &ClassName) -> bool {
    let assignable = |name: &str| registry.is_assignable(&ClassName::new(name), target);
    let sized = || {
        target.is_array()
            || assignable(names::CHAR_SEQUENCE)
            || assignable(names::COLLECTION)
            || assignable(names::MAP)
    };

    match kind {
        ConstraintKind::NotNull | ConstraintKind::Null => true,
        ConstraintKind::NotEmpty | ConstraintKind::Size { .. } => sized(),
        ConstraintKind::NotBlank | ConstraintKind::Pattern(_) | ConstraintKind::Email => {
            assignable(names::CHAR_SEQUENCE)
        }
        ConstraintKind::Min(_)
        | ConstraintKind::Max(_)
        | ConstraintKind::Range { .. }
        | ConstraintKind::Positive
        | ConstraintKind::Negative => assignable(names::NUMBER),
        ConstraintKind::AssertTrue | ConstraintKind::AssertFalse => assignable(names::BOOLEAN),
        ConstraintKind::Custom(_) => false,
    }
}

// ============================================================================
// Built-in Routines
// ============================================================================

#[derive(Debug)]
enum Builtin {
    NotNull,
    Null,
    NotEmpty,
    NotBlank,
    Size { min: usize, max: usize },
    Range {
        name: &'static str,
        min: Option<i64>,
        max: Option<i64>,
    },
    Sign { positive: bool },
    Pattern(Regex),
    Email,
    Assert(bool),
}

impl ConstraintValidator for Builtin {
    fn name(&self) -> &str {
        match self {
            Self::NotNull => "NotNull",
            Self::Null => "Null",
            Self::NotEmpty => "NotEmpty",
            Self::NotBlank => "NotBlank",
            Self::Size { .. } => "Size",
            Self::Range { name, .. } => *name,
            Self::Sign { positive: true } => "Positive",
            Self::Sign { positive: false } => "Negative",
            Self::Pattern(_) => "Pattern",
            Self::Email => "Email",
            Self::Assert(true) => "AssertTrue",
            Self::Assert(false) => "AssertFalse",
        }
    }

    fn is_valid(&self, value: &Value) -> bool {
        match self {
            Self::NotNull => !value.is_null(),
            Self::Null => value.is_null(),
            Self::NotEmpty => value.size().map(|size| size > 0).unwrap_or(false),
            Self::NotBlank => value
                .as_str()
                .map(|s| !s.trim().is_empty())
                .unwrap_or(false),
            _ if value.is_null() => true,
            Self::Size { min, max } => value
                .size()
                .map(|size| size >= *min && size <= *max)
                .unwrap_or(false),
            Self::Range { min, max, .. } => within(value, *min, *max),
            Self::Sign { positive } => value
                .as_f64()
                .map(|v| if *positive { v > 0.0 } else { v < 0.0 })
                .unwrap_or(false),
            Self::Pattern(regex) => value.as_str().map(|s| regex.is_match(s)).unwrap_or(false),
            Self::Email => value.as_str().map(is_valid_email).unwrap_or(false),
            Self::Assert(expected) => matches!(value, Value::Bool(b) if b == expected),
        }
    }
}

/// Inclusive bounds check, exact for integral values
fn within(value: &Value, min: Option<i64>, max: Option<i64>) -> bool {
    if let Some(v) = value.as_i64() {
        return min.map_or(true, |min| v >= min) && max.map_or(true, |max| v <= max);
    }
    match value.as_f64() {
        Some(v) if !v.is_nan() => {
            min.map_or(true, |min| v >= min as f64) && max.map_or(true, |max| v <= max as f64)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArrayValue;

    fn resolve(kind: ConstraintKind, target: &str) -> ConfigResult<Arc<dyn ConstraintValidator>> {
        resolve_validator(&TypeRegistry::new(), &kind, &ClassName::new(target))
    }

    #[test]
    fn test_resolution_by_target_type() {
        assert!(resolve(ConstraintKind::NotBlank, "String").is_ok());
        assert!(resolve(ConstraintKind::Min(1), "Integer").is_ok());
        assert!(resolve(ConstraintKind::size(0, 2), "ArrayList").is_ok());
        assert!(resolve(ConstraintKind::size(0, 2), "HashMap").is_ok());
        assert!(resolve(ConstraintKind::NotEmpty, "int[]").is_ok());
        assert!(resolve(ConstraintKind::NotNull, "Object").is_ok());

        let err = resolve(ConstraintKind::NotBlank, "Integer").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::NoValidatorForType {
                constraint: "NotBlank".to_string(),
                target: "Integer".to_string(),
            }
        );
        assert!(resolve(ConstraintKind::Positive, "String").is_err());
        assert!(resolve(ConstraintKind::AssertTrue, "Object").is_err());
    }

    #[test]
    fn test_invalid_pattern_is_configuration_error() {
        assert!(matches!(
            resolve(ConstraintKind::pattern("[a-"), "String"),
            Err(ConfigurationError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_null_handling() {
        let null = Value::Null;
        assert!(!resolve(ConstraintKind::NotNull, "String").unwrap().is_valid(&null));
        assert!(!resolve(ConstraintKind::NotBlank, "String").unwrap().is_valid(&null));
        assert!(!resolve(ConstraintKind::NotEmpty, "String").unwrap().is_valid(&null));
        assert!(resolve(ConstraintKind::Null, "String").unwrap().is_valid(&null));
        assert!(resolve(ConstraintKind::size(1, 2), "String").unwrap().is_valid(&null));
        assert!(resolve(ConstraintKind::Email, "String").unwrap().is_valid(&null));
        assert!(resolve(ConstraintKind::Positive, "Integer").unwrap().is_valid(&null));
    }

    #[test]
    fn test_builtin_checks() {
        let blank = resolve(ConstraintKind::NotBlank, "String").unwrap();
        assert!(!blank.is_valid(&Value::from("  ")));
        assert!(blank.is_valid(&Value::from(" x ")));

        let size = resolve(ConstraintKind::size(1, 2), "List").unwrap();
        assert!(size.is_valid(&Value::list(vec![Value::from(1)])));
        assert!(!size.is_valid(&Value::list(vec![])));

        let empty = resolve(ConstraintKind::NotEmpty, "int[]").unwrap();
        assert!(!empty.is_valid(&Value::Array(ArrayValue::Int(vec![]))));

        let range = resolve(ConstraintKind::range(1, 10), "Double").unwrap();
        assert!(range.is_valid(&Value::from(10.0)));
        assert!(!range.is_valid(&Value::from(10.5)));
        assert!(!range.is_valid(&Value::from(f64::NAN)));

        let max = resolve(ConstraintKind::Max(i64::MAX), "Long").unwrap();
        assert!(max.is_valid(&Value::from(i64::MAX)));

        let negative = resolve(ConstraintKind::Negative, "Integer").unwrap();
        assert!(negative.is_valid(&Value::from(-1)));
        assert!(!negative.is_valid(&Value::from(0)));

        let pattern = resolve(ConstraintKind::pattern("[a-z]+"), "String").unwrap();
        assert!(pattern.is_valid(&Value::from("abc")));
        assert!(!pattern.is_valid(&Value::from("abc1")));

        let assert_true = resolve(ConstraintKind::AssertTrue, "Boolean").unwrap();
        assert!(assert_true.is_valid(&Value::from(true)));
        assert!(!assert_true.is_valid(&Value::from(false)));
    }

    #[derive(Debug)]
    struct EvenNumber;

    impl ConstraintValidator for EvenNumber {
        fn name(&self) -> &str {
            "Even"
        }

        fn supported_types(&self) -> Vec<ClassName> {
            vec![ClassName::new("Integer"), ClassName::new("Long")]
        }

        fn is_valid(&self, value: &Value) -> bool {
            value.as_i64().map_or(true, |v| v % 2 == 0)
        }
    }

    #[test]
    fn test_custom_validator() {
        let kind = ConstraintKind::custom(EvenNumber);
        let registry = TypeRegistry::new();
        let routine = resolve_validator(&registry, &kind, &ClassName::new("Integer")).unwrap();
        assert_eq!(routine.name(), "Even");
        assert_eq!(routine.message(), "must satisfy Even");
        assert!(routine.is_valid(&Value::from(4)));
        assert!(!routine.is_valid(&Value::from(3)));
        assert!(resolve_validator(&registry, &kind, &ClassName::new("String")).is_err());
    }
}
