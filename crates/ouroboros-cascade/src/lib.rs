//! Ouroboros Cascade
//!
//! Constraint metadata, value extraction and cascaded validation over an
//! explicit type model.
//!
//! Classes, their type parameters, supertypes and members are described in a
//! [`TypeRegistry`]. Constraints and cascade markers are declared per member
//! as [`ConstrainedElement`] records. A [`ValidatorFactory`] resolves all of
//! it once: value extractors per container slot, validator routines per
//! constraint and target type, and cascading metadata merged across each
//! class hierarchy. Validation then walks [`Value`] trees and reports
//! violations with property paths such as `items[0].name` or
//! `tags[home].<collection element>`.
//!
//! # Features
//!
//! - **Default**: metadata, extraction and validation
//! - **serde**: JSON conversion of values and violation reports, JSON
//!   configuration with `serde_json`
//!
//! # Example
//!
//! ```rust
//! use ouroboros_cascade::{
//!     BeanValue, ClassDef, ConstrainedElement, ConstraintKind, TypeRegistry, ValidatorFactory,
//!     Value,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = TypeRegistry::new();
//! registry.define(ClassDef::builder("Item").field("name", "String"))?;
//! registry.define(ClassDef::builder("Order").field("items", "List<Item>"))?;
//!
//! let factory = ValidatorFactory::builder(registry)
//!     .element(ConstrainedElement::field("Item", "name").constraint(ConstraintKind::NotBlank))
//!     .element(ConstrainedElement::field("Order", "items").cascade_type_argument(&[0]))
//!     .build()?;
//!
//! let order = Value::from(BeanValue::new("Order").with(
//!     "items",
//!     Value::list(vec![Value::from(BeanValue::new("Item").with("name", ""))]),
//! ));
//! let violations = factory.validator().validate(&order, &[])?;
//! assert_eq!(violations.paths(), vec!["items[0].name".to_string()]);
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod cascading;
pub mod config;
pub mod constraints;
pub mod engine;
pub mod errors;
pub mod extraction;
pub mod factory;
pub mod formats;
pub mod location;
pub mod metaconstraint;
pub mod metadata;
pub mod path;
pub mod reflect;
pub mod types;
pub mod validators;

// JSON conversion (feature-gated)
#[cfg(feature = "serde")]
pub mod json;

// Re-export commonly used types
pub use cascading::{
    CascadingMetaData, CascadingMetaDataBuilder, ContainerCascadingMetaData, GroupConversions,
};
pub use config::ValidationConfig;
pub use constraints::{ConstraintDescriptor, ConstraintKind, ValidateUnwrappedValue};
pub use engine::Validator;
pub use errors::{
    ConfigResult, ConfigurationError, ConstraintViolation, ConstraintViolations, Error, Result,
};
pub use extraction::{
    ExtractorProvider, ValueExtractor, ValueExtractorDescriptor, ValueExtractorManager,
    ValueReceiver,
};
pub use factory::{ValidatorFactory, ValidatorFactoryBuilder};
pub use location::{ConstraintLocation, ConstraintLocationKind};
pub use metaconstraint::MetaConstraint;
pub use metadata::{BeanMetaData, ConstrainedElement, ConstrainedElementKind};
pub use path::{PathNode, PropertyPath};
pub use reflect::{ClassDef, ClassName, GenericType, TypeParameter, TypeParameterSlot, TypeRegistry};
pub use types::{ArrayValue, BeanValue, Value};
pub use validators::ConstraintValidator;

#[cfg(feature = "serde")]
pub use json::ViolationReport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
