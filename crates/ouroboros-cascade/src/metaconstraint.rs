//! Constraints bound to a location and a value extraction path

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::constraints::{ConstraintDescriptor, ValidateUnwrappedValue};
use crate::errors::{ConfigResult, ConfigurationError};
use crate::extraction::{ValueExtractorDescriptor, ValueExtractorManager, ValueReceiver};
use crate::location::{ConstraintLocation, ConstraintLocationKind};
use crate::path::{PropertyPath, COLLECTION_ELEMENT_NODE_NAME};
use crate::reflect::{GenericType, TypeParameterSlot};
use crate::types::Value;
use crate::validators::{resolve_validator, ConstraintValidator};

/// One level of container traversal
#[derive(Debug, Clone)]
pub struct ValueExtractionStep {
    slot: TypeParameterSlot,
    extractor: Arc<ValueExtractorDescriptor>,
}

impl ValueExtractionStep {
    pub fn slot(&self) -> &TypeParameterSlot {
        &self.slot
    }

    pub fn extractor(&self) -> &Arc<ValueExtractorDescriptor> {
        &self.extractor
    }
}

/// A constraint ready to be evaluated
///
/// The extraction path leads from the value at the location (outermost
/// container first) to the values the validator sees. It is empty for a
/// constraint on the value itself.
#[derive(Debug, Clone)]
pub struct MetaConstraint {
    descriptor: ConstraintDescriptor,
    location: Arc<ConstraintLocation>,
    validator: Arc<dyn ConstraintValidator>,
    value_extraction_path: Vec<ValueExtractionStep>,
}

impl MetaConstraint {
    /// Resolve the extraction path and the validator routine
    pub fn new(
        manager: &ValueExtractorManager,
        descriptor: ConstraintDescriptor,
        location: Arc<ConstraintLocation>,
    ) -> ConfigResult<Self> {
        let mut path = type_argument_path(manager, &location)?;

        let mut validated_type = location.generic_type();
        if location.kind() != ConstraintLocationKind::CrossParameter {
            if let Some(step) = unwrap_step(manager, &descriptor, &validated_type)? {
                validated_type = manager
                    .registry()
                    .type_argument_for_slot(&validated_type, &step.slot);
                path.push(step);
            }
        }

        let target = validated_type.boxed_erasure();
        let validator = resolve_validator(manager.registry(), descriptor.kind(), &target)?;

        trace!(
            constraint = descriptor.name(),
            location = %location,
            steps = path.len(),
            "meta constraint built"
        );
        Ok(Self {
            descriptor,
            location,
            validator,
            value_extraction_path: path,
        })
    }

    pub fn descriptor(&self) -> &ConstraintDescriptor {
        &self.descriptor
    }

    pub fn location(&self) -> &Arc<ConstraintLocation> {
        &self.location
    }

    pub fn validator(&self) -> &Arc<dyn ConstraintValidator> {
        &self.validator
    }

    pub fn value_extraction_path(&self) -> &[ValueExtractionStep] {
        &self.value_extraction_path
    }

    /// Call `sink` with every value the validator must check
    ///
    /// `path` must already end at the location. Containers are walked along
    /// the extraction path, extending `path` per element and restoring it
    /// afterwards. A null container yields nothing.
    pub fn for_each_target(
        &self,
        value: &Value,
        path: &mut PropertyPath,
        sink: &mut dyn FnMut(&PropertyPath, &Value),
    ) {
        walk(&self.value_extraction_path, value, path, sink);
    }
}

impl fmt::Display for MetaConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.descriptor.name(), self.location)
    }
}

/// Extraction steps from the outer delegate down to a type argument
fn type_argument_path(
    manager: &ValueExtractorManager,
    location: &ConstraintLocation,
) -> ConfigResult<Vec<ValueExtractionStep>> {
    let mut links = Vec::new();
    let mut current = location;
    while let Some(argument) = current.as_type_argument() {
        links.push(argument);
        current = argument.delegate();
    }

    links
        .into_iter()
        .rev()
        .map(|argument| {
            let container = argument.delegate().generic_type();
            let extractor = manager
                .resolve_by_type_and_parameter(&container, argument.slot())?
                .ok_or_else(|| {
                    ConfigurationError::no_value_extractor(&container.erasure(), argument.slot())
                })?;
            Ok(ValueExtractionStep {
                slot: argument.slot().clone(),
                extractor,
            })
        })
        .collect()
}

/// Extra step applying a constraint to the wrapped value
fn unwrap_step(
    manager: &ValueExtractorManager,
    descriptor: &ConstraintDescriptor,
    declared: &GenericType,
) -> ConfigResult<Option<ValueExtractionStep>> {
    let policy = descriptor.validate_unwrapped_value();
    if policy == ValidateUnwrappedValue::Skip {
        return Ok(None);
    }
    let erased = declared.erasure();
    let extractor = manager.resolve_by_type(&erased)?;
    match (policy, extractor) {
        (ValidateUnwrappedValue::Unwrap, None) => Err(ConfigurationError::no_value_extractor(
            &erased,
            &TypeParameterSlot::AnnotatedObject,
        )),
        (ValidateUnwrappedValue::Default, Some(extractor)) if !extractor.unwrap_by_default() => {
            Ok(None)
        }
        (_, Some(extractor)) => Ok(Some(ValueExtractionStep {
            slot: extractor.extracted_type_parameter().clone(),
            extractor,
        })),
        (_, None) => Ok(None),
    }
}

// ============================================================================
// Extraction Walk
// ============================================================================

fn walk(
    steps: &[ValueExtractionStep],
    value: &Value,
    path: &mut PropertyPath,
    sink: &mut dyn FnMut(&PropertyPath, &Value),
) {
    let Some((step, rest)) = steps.split_first() else {
        sink(path, value);
        return;
    };
    if value.is_null() {
        return;
    }
    let mut receiver = StepReceiver {
        remaining: rest,
        path,
        sink,
    };
    step.extractor.extract_values(value, &mut receiver);
}

enum Position<'v> {
    Wrapped,
    Iterable,
    Indexed(usize),
    Keyed(&'v Value),
}

struct StepReceiver<'a, 'p> {
    remaining: &'a [ValueExtractionStep],
    path: &'p mut PropertyPath,
    sink: &'p mut dyn FnMut(&PropertyPath, &Value),
}

impl StepReceiver<'_, '_> {
    fn descend(&mut self, position: Position<'_>, node_name: Option<&str>, value: &Value) {
        let checkpoint = self.path.checkpoint();
        let node_name = match position {
            Position::Wrapped => node_name,
            Position::Iterable => {
                self.path.make_leaf_iterable();
                node_name.or(Some(COLLECTION_ELEMENT_NODE_NAME))
            }
            Position::Indexed(index) => {
                self.path.make_leaf_iterable_and_set_index(index);
                node_name.or(Some(COLLECTION_ELEMENT_NODE_NAME))
            }
            Position::Keyed(key) => {
                self.path.make_leaf_iterable_and_set_key(key.clone());
                node_name.or(Some(COLLECTION_ELEMENT_NODE_NAME))
            }
        };
        if let Some(name) = node_name {
            self.path.add_container_element_node(name);
        }
        walk(self.remaining, value, self.path, self.sink);
        self.path.restore(&checkpoint);
    }
}

impl ValueReceiver for StepReceiver<'_, '_> {
    fn value(&mut self, node_name: Option<&str>, value: &Value) {
        self.descend(Position::Wrapped, node_name, value);
    }

    fn iterable_value(&mut self, node_name: Option<&str>, value: &Value) {
        self.descend(Position::Iterable, node_name, value);
    }

    fn indexed_value(&mut self, node_name: Option<&str>, index: usize, value: &Value) {
        self.descend(Position::Indexed(index), node_name, value);
    }

    fn keyed_value(&mut self, node_name: Option<&str>, key: &Value, value: &Value) {
        self.descend(Position::Keyed(key), node_name, value);
    }
}
