//! Constraint declarations
//!
//! A [`ConstraintDescriptor`] is what a constrained element declares: the
//! kind of check, the groups it belongs to, an optional message override and
//! how it treats wrapper types. Binding a descriptor to a location and an
//! extraction path happens in [`crate::metaconstraint`].

use std::fmt;
use std::sync::Arc;

use crate::reflect::{names, ClassName, TypeRegistry};
use crate::validators::ConstraintValidator;

// ============================================================================
// Constraint Kinds
// ============================================================================

/// The check a constraint performs
#[derive(Debug, Clone)]
pub enum ConstraintKind {
    NotNull,
    Null,
    NotEmpty,
    NotBlank,
    /// Inclusive bounds on the element count (strings count characters)
    Size { min: usize, max: usize },
    /// Inclusive lower bound
    Min(i64),
    /// Inclusive upper bound
    Max(i64),
    /// Inclusive bounds
    Range { min: i64, max: i64 },
    Positive,
    Negative,
    /// Regular expression the whole string must match
    Pattern(String),
    Email,
    AssertTrue,
    AssertFalse,
    /// User-supplied routine
    Custom(Arc<dyn ConstraintValidator>),
}

impl ConstraintKind {
    pub fn size(min: usize, max: usize) -> Self {
        Self::Size { min, max }
    }

    pub fn range(min: i64, max: i64) -> Self {
        Self::Range { min, max }
    }

    pub fn pattern(regex: impl Into<String>) -> Self {
        Self::Pattern(regex.into())
    }

    pub fn custom(validator: impl ConstraintValidator + 'static) -> Self {
        Self::Custom(Arc::new(validator))
    }

    /// Constraint name reported with violations
    pub fn name(&self) -> &str {
        match self {
            Self::NotNull => "NotNull",
            Self::Null => "Null",
            Self::NotEmpty => "NotEmpty",
            Self::NotBlank => "NotBlank",
            Self::Size { .. } => "Size",
            Self::Min(_) => "Min",
            Self::Max(_) => "Max",
            Self::Range { .. } => "Range",
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Pattern(_) => "Pattern",
            Self::Email => "Email",
            Self::AssertTrue => "AssertTrue",
            Self::AssertFalse => "AssertFalse",
            Self::Custom(validator) => validator.name(),
        }
    }

    pub fn default_message(&self) -> String {
        match self {
            Self::NotNull => "must not be null".to_string(),
            Self::Null => "must be null".to_string(),
            Self::NotEmpty => "must not be empty".to_string(),
            Self::NotBlank => "must not be blank".to_string(),
            Self::Size { min, max } => format!("size must be between {} and {}", min, max),
            Self::Min(min) => format!("must be greater than or equal to {}", min),
            Self::Max(max) => format!("must be less than or equal to {}", max),
            Self::Range { min, max } => format!("must be between {} and {}", min, max),
            Self::Positive => "must be greater than 0".to_string(),
            Self::Negative => "must be less than 0".to_string(),
            Self::Pattern(regex) => format!("must match \"{}\"", regex),
            Self::Email => "must be a well-formed email address".to_string(),
            Self::AssertTrue => "must be true".to_string(),
            Self::AssertFalse => "must be false".to_string(),
            Self::Custom(validator) => validator.message(),
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Unwrapping
// ============================================================================

/// Whether a constraint on a wrapper applies to the wrapped value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidateUnwrappedValue {
    /// Unwrap when the wrapper's extractor is marked `unwrap_by_default`
    #[default]
    Default,
    Unwrap,
    Skip,
}

// ============================================================================
// Constraint Descriptor
// ============================================================================

/// A declared constraint
#[derive(Debug, Clone)]
pub struct ConstraintDescriptor {
    kind: ConstraintKind,
    groups: Vec<ClassName>,
    message: Option<String>,
    validate_unwrapped_value: ValidateUnwrappedValue,
}

impl ConstraintDescriptor {
    /// Descriptor in the `Default` group
    pub fn new(kind: ConstraintKind) -> Self {
        Self {
            kind,
            groups: vec![ClassName::new(names::DEFAULT_GROUP)],
            message: None,
            validate_unwrapped_value: ValidateUnwrappedValue::Default,
        }
    }

    /// Replace the groups; an empty list means `Default`
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ClassName>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        if self.groups.is_empty() {
            self.groups.push(ClassName::new(names::DEFAULT_GROUP));
        }
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_validate_unwrapped_value(mut self, policy: ValidateUnwrappedValue) -> Self {
        self.validate_unwrapped_value = policy;
        self
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    pub fn groups(&self) -> &[ClassName] {
        &self.groups
    }

    /// Message override, or the kind's default message
    pub fn message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| self.kind.default_message())
    }

    pub fn validate_unwrapped_value(&self) -> ValidateUnwrappedValue {
        self.validate_unwrapped_value
    }

    /// Whether validating `group` evaluates this constraint
    ///
    /// A group also covers every group it extends.
    pub fn is_in_group(&self, registry: &TypeRegistry, group: &ClassName) -> bool {
        self.groups
            .iter()
            .any(|declared| registry.is_assignable(declared, group))
    }
}

impl From<ConstraintKind> for ConstraintDescriptor {
    fn from(kind: ConstraintKind) -> Self {
        Self::new(kind)
    }
}
