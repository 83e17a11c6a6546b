//! Where a constraint or cascade marker was declared
//!
//! A location knows how to extend a property path with its own segment and
//! how to read the value it denotes from its parent. Both operations are
//! pure; the engine calls them once per validated instance.
//!
//! Type argument locations wrap the location of their container. Nested
//! generics form a chain (`Map<String, List<@NotBlank String>>` yields two
//! links around the field location) whose base is cached as the outer
//! delegate.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::errors::{ConfigResult, ConfigurationError};
use crate::path::PropertyPath;
use crate::reflect::{names, ClassName, GenericType, TypeParameterSlot, TypeRegistry};
use crate::types::{ArrayValue, Value, NULL};

/// Kind of a [`ConstraintLocation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintLocationKind {
    Type,
    Field,
    Getter,
    Parameter,
    CrossParameter,
    ReturnValue,
    TypeArgument,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstraintLocation {
    Bean {
        class: ClassName,
        ty: GenericType,
    },
    Field {
        declaring_class: ClassName,
        name: String,
        ty: GenericType,
    },
    Getter {
        declaring_class: ClassName,
        method: String,
        property: String,
        ty: GenericType,
    },
    Parameter {
        declaring_class: ClassName,
        method: String,
        index: usize,
        name: String,
        ty: GenericType,
    },
    CrossParameter {
        declaring_class: ClassName,
        method: String,
    },
    ReturnValue {
        declaring_class: ClassName,
        method: String,
        ty: GenericType,
    },
    TypeArgument(TypeArgumentLocation),
}

impl ConstraintLocation {
    // ------------------------------------------------------------------------
    // Constructors
    // ------------------------------------------------------------------------

    pub fn for_bean(registry: &TypeRegistry, class: &ClassName) -> ConfigResult<Self> {
        let def = registry.class(class)?;
        Ok(Self::Bean {
            class: class.clone(),
            ty: def.as_generic_type(),
        })
    }

    pub fn for_field(registry: &TypeRegistry, class: &ClassName, name: &str) -> ConfigResult<Self> {
        let field = registry
            .class(class)?
            .field(name)
            .ok_or_else(|| ConfigurationError::member_not_found(class, name))?;
        Ok(Self::Field {
            declaring_class: class.clone(),
            name: name.to_string(),
            ty: field.ty.clone(),
        })
    }

    /// Location of a `getX`/`isX` accessor, reported under its property name
    pub fn for_getter(registry: &TypeRegistry, class: &ClassName, method: &str) -> ConfigResult<Self> {
        let def = registry.class(class)?;
        let (property, ty) = def
            .method(method)
            .and_then(|m| Some((m.property_name()?, m.return_type.clone()?)))
            .ok_or_else(|| ConfigurationError::member_not_found(class, method))?;
        Ok(Self::Getter {
            declaring_class: class.clone(),
            method: method.to_string(),
            property,
            ty,
        })
    }

    pub fn for_parameter(
        registry: &TypeRegistry,
        class: &ClassName,
        method: &str,
        index: usize,
    ) -> ConfigResult<Self> {
        let parameter = registry
            .class(class)?
            .method(method)
            .and_then(|m| m.parameters.get(index))
            .ok_or_else(|| {
                ConfigurationError::member_not_found(class, format!("{}#{}", method, index))
            })?;
        Ok(Self::Parameter {
            declaring_class: class.clone(),
            method: method.to_string(),
            index,
            name: parameter.name.clone(),
            ty: parameter.ty.clone(),
        })
    }

    pub fn for_cross_parameter(
        registry: &TypeRegistry,
        class: &ClassName,
        method: &str,
    ) -> ConfigResult<Self> {
        registry
            .class(class)?
            .method(method)
            .ok_or_else(|| ConfigurationError::member_not_found(class, method))?;
        Ok(Self::CrossParameter {
            declaring_class: class.clone(),
            method: method.to_string(),
        })
    }

    pub fn for_return_value(
        registry: &TypeRegistry,
        class: &ClassName,
        method: &str,
    ) -> ConfigResult<Self> {
        let ty = registry
            .class(class)?
            .method(method)
            .and_then(|m| m.return_type.clone())
            .ok_or_else(|| ConfigurationError::member_not_found(class, method))?;
        Ok(Self::ReturnValue {
            declaring_class: class.clone(),
            method: method.to_string(),
            ty,
        })
    }

    /// Location of the `index`-th type argument of the type at `delegate`
    pub fn for_type_argument(
        delegate: Arc<ConstraintLocation>,
        registry: &TypeRegistry,
        index: usize,
    ) -> ConfigResult<Self> {
        let container = delegate.generic_type();
        let (slot, argument) = registry.resolve_type_argument(&container, index)?;
        let outer_delegate = match delegate.as_ref() {
            Self::TypeArgument(location) => Arc::clone(&location.outer_delegate),
            _ => Arc::clone(&delegate),
        };
        Ok(Self::TypeArgument(TypeArgumentLocation {
            type_for_validator_resolution: argument.boxed_erasure(),
            container_class: container.erasure(),
            generic_type: argument,
            slot,
            delegate,
            outer_delegate,
        }))
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn kind(&self) -> ConstraintLocationKind {
        match self {
            Self::Bean { .. } => ConstraintLocationKind::Type,
            Self::Field { .. } => ConstraintLocationKind::Field,
            Self::Getter { .. } => ConstraintLocationKind::Getter,
            Self::Parameter { .. } => ConstraintLocationKind::Parameter,
            Self::CrossParameter { .. } => ConstraintLocationKind::CrossParameter,
            Self::ReturnValue { .. } => ConstraintLocationKind::ReturnValue,
            Self::TypeArgument(_) => ConstraintLocationKind::TypeArgument,
        }
    }

    pub fn declaring_class(&self) -> &ClassName {
        match self {
            Self::Bean { class, .. } => class,
            Self::Field { declaring_class, .. }
            | Self::Getter { declaring_class, .. }
            | Self::Parameter { declaring_class, .. }
            | Self::CrossParameter { declaring_class, .. }
            | Self::ReturnValue { declaring_class, .. } => declaring_class,
            Self::TypeArgument(location) => location.delegate.declaring_class(),
        }
    }

    /// Declared type of the value at this location
    ///
    /// Cross-parameter constraints see the argument array.
    pub fn generic_type(&self) -> GenericType {
        match self {
            Self::Bean { ty, .. }
            | Self::Field { ty, .. }
            | Self::Getter { ty, .. }
            | Self::Parameter { ty, .. }
            | Self::ReturnValue { ty, .. } => ty.clone(),
            Self::CrossParameter { .. } => GenericType::Array(Box::new(GenericType::object())),
            Self::TypeArgument(location) => location.generic_type.clone(),
        }
    }

    /// Boxed erased type used to pick a validator routine
    pub fn type_for_validator_resolution(&self) -> ClassName {
        match self {
            Self::TypeArgument(location) => location.type_for_validator_resolution.clone(),
            Self::CrossParameter { .. } => ClassName::new(names::OBJECT_ARRAY),
            other => other.generic_type().boxed_erasure(),
        }
    }

    /// First location of the chain that is not a type argument
    pub fn outer_delegate(&self) -> &ConstraintLocation {
        match self {
            Self::TypeArgument(location) => &location.outer_delegate,
            other => other,
        }
    }

    pub fn as_type_argument(&self) -> Option<&TypeArgumentLocation> {
        match self {
            Self::TypeArgument(location) => Some(location),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Path and value access
    // ------------------------------------------------------------------------

    /// Extend `path` with this location's segment
    ///
    /// Type arguments contribute no segment of their own; the extractor adds
    /// the index or key while the container is walked.
    pub fn append_to(&self, path: &mut PropertyPath) {
        match self {
            Self::Bean { .. } => path.add_bean_node(),
            Self::Field { name, .. } => path.add_property_node(name.as_str()),
            Self::Getter { property, .. } => path.add_property_node(property.as_str()),
            Self::Parameter { name, index, .. } => path.add_parameter_node(name.as_str(), *index),
            Self::CrossParameter { .. } => path.add_cross_parameter_node(),
            Self::ReturnValue { .. } => path.add_return_value_node(),
            Self::TypeArgument(location) => location.delegate.append_to(path),
        }
    }

    /// Value denoted by this location within `parent`
    ///
    /// `parent` is the bean for bean members, the argument array for
    /// parameters, and the value itself for beans, return values and
    /// cross-parameter locations. Missing members read as null.
    pub fn get_value<'a>(&self, parent: &'a Value) -> &'a Value {
        match self {
            Self::Bean { .. } | Self::CrossParameter { .. } | Self::ReturnValue { .. } => parent,
            Self::Field { name, .. } => property(parent, name),
            Self::Getter { property: name, .. } => property(parent, name),
            Self::Parameter { index, .. } => argument(parent, *index),
            Self::TypeArgument(location) => location.outer_delegate.get_value(parent),
        }
    }
}

fn property<'a>(parent: &'a Value, name: &str) -> &'a Value {
    parent
        .as_bean()
        .and_then(|bean| bean.property(name))
        .unwrap_or(&NULL)
}

fn argument(arguments: &Value, index: usize) -> &Value {
    match arguments {
        Value::Array(ArrayValue::Object { items, .. }) | Value::List { items, .. } => {
            items.get(index).unwrap_or(&NULL)
        }
        _ => &NULL,
    }
}

impl fmt::Display for ConstraintLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bean { class, .. } => write!(f, "{}", class),
            Self::Field {
                declaring_class,
                name,
                ..
            } => write!(f, "{}.{}", declaring_class, name),
            Self::Getter {
                declaring_class,
                method,
                ..
            } => write!(f, "{}.{}()", declaring_class, method),
            Self::Parameter {
                declaring_class,
                method,
                index,
                ..
            } => write!(f, "{}.{}(#{})", declaring_class, method, index),
            Self::CrossParameter {
                declaring_class,
                method,
            } => write!(f, "{}.{}(<cross-parameter>)", declaring_class, method),
            Self::ReturnValue {
                declaring_class,
                method,
                ..
            } => write!(f, "{}.{}(<return value>)", declaring_class, method),
            Self::TypeArgument(location) => {
                write!(f, "{} {}", location.delegate, location.slot)
            }
        }
    }
}

// ============================================================================
// Type Argument Location
// ============================================================================

/// A type argument of the type found at another location
///
/// Equality and hashing only consider the delegate and the slot, so the same
/// slot declared through different parameterizations merges.
#[derive(Debug, Clone)]
pub struct TypeArgumentLocation {
    delegate: Arc<ConstraintLocation>,
    slot: TypeParameterSlot,
    type_for_validator_resolution: ClassName,
    container_class: ClassName,
    generic_type: GenericType,
    outer_delegate: Arc<ConstraintLocation>,
}

impl TypeArgumentLocation {
    pub fn delegate(&self) -> &Arc<ConstraintLocation> {
        &self.delegate
    }

    pub fn slot(&self) -> &TypeParameterSlot {
        &self.slot
    }

    /// Erased type of the container holding this argument
    pub fn container_class(&self) -> &ClassName {
        &self.container_class
    }

    pub fn outer_delegate(&self) -> &Arc<ConstraintLocation> {
        &self.outer_delegate
    }
}

impl PartialEq for TypeArgumentLocation {
    fn eq(&self, other: &Self) -> bool {
        self.delegate == other.delegate && self.slot == other.slot
    }
}

impl Eq for TypeArgumentLocation {}

impl Hash for TypeArgumentLocation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.delegate.hash(state);
        self.slot.hash(state);
    }
}
