//! Mergeable cascading declarations of one constrained element

use std::collections::BTreeMap;

use tracing::debug;

use crate::errors::{ConfigResult, ConfigurationError};
use crate::extraction::{ValueExtractorDescriptor, ValueExtractorManager};
use crate::reflect::{ClassName, GenericType, TypeParameterSlot, TypeRegistry};

use super::group_conversion::GroupConversions;
use super::metadata::{
    CascadingMetaData, ContainerCascadingMetaData, NonContainerCascadingMetaData,
    PotentiallyContainerCascadingMetaData,
};

/// Cascade marker, group conversions and nested type argument declarations
///
/// The top-level builder of an element uses the
/// [`TypeParameterSlot::AnnotatedObject`] slot and carries the element's
/// declared type. Nested builders carry the container type as enclosing type
/// and the slot of the type argument they describe.
///
/// Equality ignores the enclosing type: the same slot reached through two
/// parameterizations of a generic type compares equal.
#[derive(Debug, Clone)]
pub struct CascadingMetaDataBuilder {
    enclosing_type: Option<GenericType>,
    slot: TypeParameterSlot,
    cascading: bool,
    group_conversions: GroupConversions,
    container_elements: BTreeMap<TypeParameterSlot, CascadingMetaDataBuilder>,
    has_container_elements_marked_for_cascading: bool,
    has_group_conversions_anywhere: bool,
}

impl Default for CascadingMetaDataBuilder {
    fn default() -> Self {
        Self::non_cascading()
    }
}

impl PartialEq for CascadingMetaDataBuilder {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
            && self.cascading == other.cascading
            && self.group_conversions == other.group_conversions
            && self.container_elements == other.container_elements
    }
}

impl CascadingMetaDataBuilder {
    fn new(enclosing_type: Option<GenericType>, slot: TypeParameterSlot) -> Self {
        Self {
            enclosing_type,
            slot,
            cascading: false,
            group_conversions: GroupConversions::new(),
            container_elements: BTreeMap::new(),
            has_container_elements_marked_for_cascading: false,
            has_group_conversions_anywhere: false,
        }
    }

    /// Identity of [`merge`](Self::merge)
    pub fn non_cascading() -> Self {
        Self::new(None, TypeParameterSlot::AnnotatedObject)
    }

    /// Builder for a whole element declared with type `declared`
    pub fn annotated_object(declared: GenericType) -> Self {
        Self::new(Some(declared), TypeParameterSlot::AnnotatedObject)
    }

    /// Builder for the type argument in `slot` of `container`
    pub fn type_argument(container: GenericType, slot: TypeParameterSlot) -> Self {
        Self::new(Some(container), slot)
    }

    pub fn cascading(mut self, cascading: bool) -> Self {
        self.cascading = cascading;
        self
    }

    pub fn group_conversion(mut self, from: impl Into<ClassName>, to: impl Into<ClassName>) -> Self {
        self.group_conversions.insert(from, to);
        self.refresh()
    }

    pub fn with_group_conversions(mut self, conversions: GroupConversions) -> Self {
        self.group_conversions = conversions;
        self.refresh()
    }

    /// Attach a nested builder, replacing one for the same slot
    pub fn container_element(mut self, element: CascadingMetaDataBuilder) -> Self {
        self.container_elements.insert(element.slot.clone(), element);
        self.refresh()
    }

    /// Apply `update` to the type argument reached by `path`
    ///
    /// Each entry of `path` is a type argument index into the type held by
    /// the previous level, so `[1, 0]` on `Map<String, List<Foo>>` reaches
    /// `Foo`. Missing nested builders are created on the way.
    pub fn update_type_argument(
        mut self,
        registry: &TypeRegistry,
        path: &[usize],
        update: impl FnOnce(Self) -> Self,
    ) -> ConfigResult<Self> {
        let Some((&index, rest)) = path.split_first() else {
            return Ok(update(self));
        };
        let container = self.value_type(registry);
        let (slot, _) = registry.resolve_type_argument(&container, index)?;
        let child = self
            .container_elements
            .remove(&slot)
            .unwrap_or_else(|| Self::type_argument(container, slot.clone()));
        let child = child.update_type_argument(registry, rest, update)?;
        self.container_elements.insert(slot, child);
        Ok(self.refresh())
    }

    /// Mark the type argument reached by `path` for cascading
    pub fn cascade_type_argument(self, registry: &TypeRegistry, path: &[usize]) -> ConfigResult<Self> {
        self.update_type_argument(registry, path, |element| element.cascading(true))
    }

    pub fn enclosing_type(&self) -> Option<&GenericType> {
        self.enclosing_type.as_ref()
    }

    pub fn slot(&self) -> &TypeParameterSlot {
        &self.slot
    }

    pub fn is_cascading(&self) -> bool {
        self.cascading
    }

    pub fn group_conversions(&self) -> &GroupConversions {
        &self.group_conversions
    }

    pub fn container_elements(&self) -> &BTreeMap<TypeParameterSlot, CascadingMetaDataBuilder> {
        &self.container_elements
    }

    pub fn has_container_elements_marked_for_cascading(&self) -> bool {
        self.has_container_elements_marked_for_cascading
    }

    pub fn is_marked_for_cascading_on_annotated_object_or_container_elements(&self) -> bool {
        self.cascading || self.has_container_elements_marked_for_cascading
    }

    pub fn has_group_conversions_on_annotated_object_or_container_elements(&self) -> bool {
        self.has_group_conversions_anywhere
    }

    /// Declared type of the value this builder describes
    pub fn value_type(&self, registry: &TypeRegistry) -> GenericType {
        match &self.enclosing_type {
            Some(enclosing) => registry.type_argument_for_slot(enclosing, &self.slot),
            None => GenericType::object(),
        }
    }

    fn is_inert(&self) -> bool {
        !self.cascading && self.group_conversions.is_empty() && self.container_elements.is_empty()
    }

    // ------------------------------------------------------------------------
    // Merge
    // ------------------------------------------------------------------------

    /// Combine two declarations of the same element
    ///
    /// Cascade flags are OR-ed, group conversions united and nested slots
    /// merged recursively.
    pub fn merge(mut self, other: CascadingMetaDataBuilder) -> ConfigResult<Self> {
        if other.is_inert() {
            if self.enclosing_type.is_none() {
                self.enclosing_type = other.enclosing_type;
            }
            return Ok(self);
        }
        if self.is_inert() {
            let mut other = other;
            if other.enclosing_type.is_none() {
                other.enclosing_type = self.enclosing_type;
            }
            return Ok(other);
        }
        if self.slot != other.slot {
            return Err(ConfigurationError::IncompatibleCascadingMetaData {
                left: self.slot.to_string(),
                right: other.slot.to_string(),
            });
        }

        self.cascading |= other.cascading;
        self.group_conversions = self.group_conversions.merge(&other.group_conversions)?;
        if self.enclosing_type.is_none() {
            self.enclosing_type = other.enclosing_type;
        }
        for (slot, element) in other.container_elements {
            let merged = match self.container_elements.remove(&slot) {
                Some(existing) => existing.merge(element)?,
                None => element,
            };
            self.container_elements.insert(slot, merged);
        }
        Ok(self.refresh())
    }

    // ------------------------------------------------------------------------
    // Build
    // ------------------------------------------------------------------------

    /// Freeze into immutable metadata, deciding the element's container shape
    ///
    /// Group conversions are checked once the slots implied by a whole-element
    /// cascade marker are in place. `element` names the constrained element in
    /// error messages.
    pub fn build(
        &self,
        manager: &ValueExtractorManager,
        element: &str,
    ) -> ConfigResult<CascadingMetaData> {
        let mut builder = self.clone();
        if builder.cascading && builder.slot == TypeParameterSlot::AnnotatedObject {
            if let Some(declared) = builder.enclosing_type.clone() {
                let erased = declared.erasure();
                let detected = manager.maximally_specific_container_extractors(&erased);
                match detected.as_slice() {
                    [] => {
                        if !builder.has_container_elements_marked_for_cascading {
                            let candidates = manager.potential_container_extractors(&erased);
                            if !candidates.is_empty() {
                                builder.validate_group_conversions(manager.registry(), element)?;
                                debug!(
                                    element,
                                    candidates = candidates.len(),
                                    "element is potentially a container"
                                );
                                return Ok(CascadingMetaData::PotentiallyContainer(
                                    PotentiallyContainerCascadingMetaData::new(
                                        builder.group_conversions,
                                        candidates,
                                    ),
                                ));
                            }
                        }
                    }
                    [extractor] => {
                        debug!(element, extractor = extractor.name(), "element is a container");
                        builder = builder.with_implied_container_element(manager.registry(), extractor);
                    }
                    several => {
                        return Err(ConfigurationError::ambiguous(
                            &erased,
                            several.iter().map(|d| d.name()),
                        ))
                    }
                }
            }
        }

        builder.validate_group_conversions(manager.registry(), element)?;

        if builder.container_elements.is_empty() {
            Ok(CascadingMetaData::NonContainer(NonContainerCascadingMetaData::new(
                builder.cascading,
                builder.group_conversions,
            )))
        } else {
            Ok(CascadingMetaData::Container(ContainerCascadingMetaData::from_builder(
                manager, &builder,
            )?))
        }
    }

    fn validate_group_conversions(&self, registry: &TypeRegistry, element: &str) -> ConfigResult<()> {
        self.group_conversions
            .validate(registry, self.cascading, element)?;
        for (slot, nested) in &self.container_elements {
            nested.validate_group_conversions(registry, &format!("{} {}", element, slot))?;
        }
        Ok(())
    }

    /// Mark the slot read by `extractor` as cascading, as a whole-element
    /// cascade marker on a container implies
    fn with_implied_container_element(
        mut self,
        registry: &TypeRegistry,
        extractor: &ValueExtractorDescriptor,
    ) -> Self {
        let declared = self
            .enclosing_type
            .clone()
            .unwrap_or_else(GenericType::object);
        let slot = match extractor.extracted_type_parameter() {
            TypeParameterSlot::Declared(parameter) => registry
                .type_variable_bindings(&declared.erasure())
                .reverse_bind(&parameter.declaring, parameter)
                .cloned()
                .map(TypeParameterSlot::Declared)
                .unwrap_or_else(|| TypeParameterSlot::Declared(parameter.clone())),
            sentinel => sentinel.clone(),
        };

        let element = match self.container_elements.remove(&slot) {
            Some(existing) => existing.make_cascading(&self.group_conversions),
            None => Self::type_argument(declared, slot.clone())
                .cascading(true)
                .with_group_conversions(self.group_conversions.clone()),
        };
        self.container_elements.insert(slot, element);
        self.refresh()
    }

    fn make_cascading(mut self, conversions: &GroupConversions) -> Self {
        self.cascading = true;
        if self.group_conversions.is_empty() {
            self.group_conversions = conversions.clone();
        }
        self.refresh()
    }

    fn refresh(mut self) -> Self {
        self.has_container_elements_marked_for_cascading = self
            .container_elements
            .values()
            .any(|e| e.cascading || e.has_container_elements_marked_for_cascading);
        self.has_group_conversions_anywhere = !self.group_conversions.is_empty()
            || self
                .container_elements
                .values()
                .any(|e| e.has_group_conversions_anywhere);
        self
    }
}
