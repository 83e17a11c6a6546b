//! Error and violation types
//!
//! Two families live here. [`ConfigurationError`] and [`Error`] are raised
//! while a validator factory is being built (or, rarely, when a deferred
//! configuration defect surfaces during a walk). [`ConstraintViolation`] is
//! not an error at all: it is the expected product of a validation call and
//! is accumulated into [`ConstraintViolations`].

use std::fmt;

use thiserror::Error;

use crate::path::PropertyPath;
use crate::reflect::{ClassName, TypeParameterSlot};
use crate::types::Value;

// ============================================================================
// Result Aliases
// ============================================================================

/// Result type for factory and validation calls
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for metadata construction
pub type ConfigResult<T> = std::result::Result<T, ConfigurationError>;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Defects in the declared metadata, detected while building a factory
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Unable to get the most specific value extractor for type {container} as several most specific value extractors are declared: {candidates:?}")]
    AmbiguousValueExtractors {
        container: String,
        candidates: Vec<String>,
    },

    #[error("No value extractor found for type parameter '{type_parameter}' of type {container}")]
    NoValueExtractorFound {
        container: String,
        type_parameter: String,
    },

    #[error("Found group conversions for non-cascading element: {element}")]
    GroupConversionOnNonCascadingElement { element: String },

    #[error("Group sequence {group} cannot be used as the source of a group conversion on {element}")]
    GroupConversionForSequence { group: String, element: String },

    #[error("Multiple group conversions defined for the same source group {source_group}: {targets:?}")]
    MultipleGroupConversionsForSameSource {
        source_group: String,
        targets: Vec<String>,
    },

    #[error("Unable to merge cascading metadata for {left} and {right}")]
    IncompatibleCascadingMetaData { left: String, right: String },

    #[error("Type {class} does not declare a member '{member}'")]
    MemberNotFound { class: String, member: String },

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Type argument index {index} is out of bounds for {type_name}")]
    TypeArgumentOutOfBounds { type_name: String, index: usize },

    #[error("Invalid type expression '{expression}': {reason}")]
    InvalidTypeExpression { expression: String, reason: String },

    #[error("Invalid value extractor {name}: {reason}")]
    InvalidValueExtractor { name: String, reason: String },

    #[error("No validator could be found for constraint {constraint} validating type {target}")]
    NoValidatorForType { constraint: String, target: String },

    #[error("Invalid regular expression '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Type argument constraint on {element} requires a cascade marker")]
    TypeArgumentConstraintWithoutCascade { element: String },

    #[error("Parameter constraints of {method} in {class} must not be declared on an overriding method")]
    ParameterConstraintsOnOverride { class: String, method: String },
}

impl ConfigurationError {
    /// Ambiguity raised by the extractor resolver
    pub(crate) fn ambiguous<'a>(
        container: &ClassName,
        candidates: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::AmbiguousValueExtractors {
            container: container.to_string(),
            candidates: candidates.into_iter().map(str::to_string).collect(),
        }
    }

    pub(crate) fn no_value_extractor(container: &ClassName, slot: &TypeParameterSlot) -> Self {
        Self::NoValueExtractorFound {
            container: container.to_string(),
            type_parameter: slot.to_string(),
        }
    }

    pub(crate) fn member_not_found(class: &ClassName, member: impl Into<String>) -> Self {
        Self::MemberNotFound {
            class: class.to_string(),
            member: member.into(),
        }
    }
}

// ============================================================================
// Top-level Error
// ============================================================================

/// Error returned by factory construction and validation calls
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Expected a bean instance, got {0}")]
    NotABean(String),

    #[error("Unknown property '{property}' on {class}")]
    UnknownProperty { class: String, property: String },

    #[error("Unknown method '{method}' on {class}")]
    UnknownMethod { class: String, method: String },

    #[error("Method {method} expects {expected} argument(s), got {actual}")]
    ParameterCountMismatch {
        method: String,
        expected: usize,
        actual: usize,
    },
}

// ============================================================================
// Constraint Violations Collection
// ============================================================================

/// Violations produced by one validation call
#[derive(Debug, Clone, Default)]
pub struct ConstraintViolations {
    /// Violations in discovery order
    pub violations: Vec<ConstraintViolation>,
}

impl ConstraintViolations {
    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    /// Check if there are any violations
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Add a violation
    pub fn add(&mut self, violation: ConstraintViolation) {
        self.violations.push(violation);
    }

    /// Merge another collection into this one
    pub fn merge(&mut self, other: ConstraintViolations) {
        self.violations.extend(other.violations);
    }

    /// Violations as a slice
    pub fn as_slice(&self) -> &[ConstraintViolation] {
        &self.violations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConstraintViolation> {
        self.violations.iter()
    }

    /// String form of every property path, in discovery order
    pub fn paths(&self) -> Vec<String> {
        self.violations
            .iter()
            .map(|v| v.property_path.to_string())
            .collect()
    }

    /// `Ok` if nothing was violated
    pub fn into_result(self) -> std::result::Result<(), ConstraintViolations> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl IntoIterator for ConstraintViolations {
    type Item = ConstraintViolation;
    type IntoIter = std::vec::IntoIter<ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConstraintViolations {
    type Item = &'a ConstraintViolation;
    type IntoIter = std::slice::Iter<'a, ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for ConstraintViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} constraint violation(s)", self.violations.len())
    }
}

impl std::error::Error for ConstraintViolations {}

// ============================================================================
// Single Constraint Violation
// ============================================================================

/// A single failed constraint
#[derive(Debug, Clone)]
pub struct ConstraintViolation {
    /// Rendered message
    pub message: String,

    /// Name of the violated constraint (e.g. "NotBlank")
    pub constraint: String,

    /// Path from the validated root to the offending value
    pub property_path: PropertyPath,

    /// The value that failed the check
    pub invalid_value: Value,

    /// Class of the object passed to the validation call
    pub root_bean_class: Option<ClassName>,

    /// Class of the bean holding the constraint, if any
    pub leaf_bean_class: Option<ClassName>,
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}]",
            self.property_path, self.message, self.constraint
        )
    }
}
