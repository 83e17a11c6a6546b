//! Registry entry describing one value extractor

use std::fmt;
use std::sync::Arc;

use crate::errors::{ConfigResult, ConfigurationError};
use crate::reflect::{ClassName, TypeParameterSlot, TypeRegistry};
use crate::types::Value;

use super::{ValueExtractor, ValueReceiver};

/// Registry key: the container class and the slot the extractor reads
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtractorKey {
    pub container: ClassName,
    pub slot: TypeParameterSlot,
}

impl fmt::Display for ExtractorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.container, self.slot)
    }
}

/// A value extractor together with the container slot it serves
///
/// Two descriptors are equal when their keys are equal; registering a second
/// descriptor for the same key replaces the first.
#[derive(Clone)]
pub struct ValueExtractorDescriptor {
    name: String,
    key: ExtractorKey,
    extractor: Arc<dyn ValueExtractor>,
    unwrap_by_default: bool,
    implicit_cascade: bool,
}

impl ValueExtractorDescriptor {
    pub fn new(
        name: impl Into<String>,
        container: impl Into<ClassName>,
        slot: TypeParameterSlot,
        extractor: impl ValueExtractor + 'static,
    ) -> Self {
        Self::from_arc(name, container, slot, Arc::new(extractor))
    }

    pub fn from_arc(
        name: impl Into<String>,
        container: impl Into<ClassName>,
        slot: TypeParameterSlot,
        extractor: Arc<dyn ValueExtractor>,
    ) -> Self {
        Self {
            name: name.into(),
            key: ExtractorKey {
                container: container.into(),
                slot,
            },
            extractor,
            unwrap_by_default: false,
            implicit_cascade: true,
        }
    }

    /// Validate the unwrapped value instead of the container by default
    pub fn with_unwrap_by_default(mut self, unwrap: bool) -> Self {
        self.unwrap_by_default = unwrap;
        self
    }

    /// Whether a cascade marker on the whole container reaches this slot
    pub fn with_implicit_cascade(mut self, implicit: bool) -> Self {
        self.implicit_cascade = implicit;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &ExtractorKey {
        &self.key
    }

    pub fn container_type(&self) -> &ClassName {
        &self.key.container
    }

    pub fn extracted_type_parameter(&self) -> &TypeParameterSlot {
        &self.key.slot
    }

    pub fn unwrap_by_default(&self) -> bool {
        self.unwrap_by_default
    }

    pub fn implicit_cascade(&self) -> bool {
        self.implicit_cascade
    }

    pub fn extractor(&self) -> &Arc<dyn ValueExtractor> {
        &self.extractor
    }

    pub fn extract_values(&self, container: &Value, receiver: &mut dyn ValueReceiver) {
        self.extractor.extract_values(container, receiver);
    }

    /// Check the key against the registry
    pub(crate) fn validate(&self, registry: &TypeRegistry) -> ConfigResult<()> {
        let invalid = |reason: String| ConfigurationError::InvalidValueExtractor {
            name: self.name.clone(),
            reason,
        };
        let container = &self.key.container;
        if !registry.contains(container) {
            return Err(invalid(format!("unknown container type {}", container)));
        }
        match &self.key.slot {
            TypeParameterSlot::AnnotatedObject => Ok(()),
            TypeParameterSlot::ArrayElement if container.is_array() => Ok(()),
            TypeParameterSlot::ArrayElement => Err(invalid(format!(
                "array element extracted from non-array type {}",
                container
            ))),
            TypeParameterSlot::Declared(parameter) => {
                let def = registry.class(container)?;
                if &parameter.declaring == container && def.type_params.contains(parameter) {
                    Ok(())
                } else {
                    Err(invalid(format!(
                        "{} is not a type parameter of {}",
                        parameter, container
                    )))
                }
            }
        }
    }
}

impl PartialEq for ValueExtractorDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ValueExtractorDescriptor {}

impl fmt::Debug for ValueExtractorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueExtractorDescriptor")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("unwrap_by_default", &self.unwrap_by_default)
            .field("implicit_cascade", &self.implicit_cascade)
            .finish()
    }
}
