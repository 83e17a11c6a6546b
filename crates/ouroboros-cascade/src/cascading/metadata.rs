//! Immutable cascading metadata

use std::sync::Arc;

use crate::errors::{ConfigResult, ConfigurationError};
use crate::extraction::{ValueExtractorDescriptor, ValueExtractorManager};
use crate::reflect::{ClassName, GenericType, TypeParameterSlot};

use super::builder::CascadingMetaDataBuilder;
use super::group_conversion::GroupConversions;

type Descriptor = Arc<ValueExtractorDescriptor>;

/// Built cascading metadata of one constrained element
#[derive(Debug, Clone)]
pub enum CascadingMetaData {
    /// Plain value or bean
    NonContainer(NonContainerCascadingMetaData),
    /// Container whose cascading elements are known from the declared type
    Container(ContainerCascadingMetaData),
    /// Declared type says nothing; the runtime class decides
    PotentiallyContainer(PotentiallyContainerCascadingMetaData),
}

impl CascadingMetaData {
    /// Metadata of an element without any cascade marker
    pub fn non_cascading() -> Self {
        Self::NonContainer(NonContainerCascadingMetaData::new(false, GroupConversions::new()))
    }

    pub fn is_cascading(&self) -> bool {
        match self {
            Self::NonContainer(meta) => meta.cascading,
            Self::Container(meta) => meta.cascading,
            Self::PotentiallyContainer(_) => true,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container(_))
    }

    pub fn group_conversions(&self) -> &GroupConversions {
        match self {
            Self::NonContainer(meta) => &meta.group_conversions,
            Self::Container(meta) => &meta.group_conversions,
            Self::PotentiallyContainer(meta) => &meta.group_conversions,
        }
    }

    pub fn convert_group(&self, group: &ClassName) -> ClassName {
        self.group_conversions().convert(group)
    }

    /// Nested element metadata; empty unless this is a container
    pub fn container_element_metadata(&self) -> &[ContainerCascadingMetaData] {
        match self {
            Self::Container(meta) => &meta.container_elements,
            _ => &[],
        }
    }

    pub fn as_container(&self) -> Option<&ContainerCascadingMetaData> {
        match self {
            Self::Container(meta) => Some(meta),
            _ => None,
        }
    }

    pub fn is_marked_for_cascading_on_annotated_object_or_container_elements(&self) -> bool {
        match self {
            Self::NonContainer(meta) => meta.cascading,
            Self::Container(meta) => meta.is_marked_for_cascading_on_annotated_object_or_container_elements(),
            Self::PotentiallyContainer(_) => true,
        }
    }

    /// Container metadata for a value whose runtime class is `runtime`
    ///
    /// A potential container resolves among its candidates. A cascaded plain
    /// element falls back to the legacy extractors when `legacy` is set.
    /// `Ok(None)` means the value is walked as a plain bean.
    pub fn runtime_container(
        &self,
        manager: &ValueExtractorManager,
        runtime: &ClassName,
        legacy: bool,
    ) -> ConfigResult<Option<ContainerCascadingMetaData>> {
        let extractor = match self {
            Self::PotentiallyContainer(meta) => {
                manager.resolve_for_all_container_elements(runtime, &meta.candidates)?
            }
            Self::NonContainer(meta) if meta.cascading && legacy => {
                manager.legacy_extractor_for(runtime)?
            }
            _ => None,
        };
        Ok(extractor.map(|extractor| {
            ContainerCascadingMetaData::runtime(runtime, extractor, self.group_conversions())
        }))
    }
}

// ============================================================================
// Non Container
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonContainerCascadingMetaData {
    cascading: bool,
    group_conversions: GroupConversions,
}

impl NonContainerCascadingMetaData {
    pub(crate) fn new(cascading: bool, group_conversions: GroupConversions) -> Self {
        Self {
            cascading,
            group_conversions,
        }
    }

    pub fn is_cascading(&self) -> bool {
        self.cascading
    }
}

// ============================================================================
// Potentially Container
// ============================================================================

/// Cascaded element whose declared type could hold a container at runtime
#[derive(Debug, Clone)]
pub struct PotentiallyContainerCascadingMetaData {
    group_conversions: GroupConversions,
    candidates: Vec<Descriptor>,
}

impl PotentiallyContainerCascadingMetaData {
    pub(crate) fn new(group_conversions: GroupConversions, candidates: Vec<Descriptor>) -> Self {
        Self {
            group_conversions,
            candidates,
        }
    }

    /// Extractors whose container class the runtime value might have
    pub fn value_extractor_candidates(&self) -> &[Descriptor] {
        &self.candidates
    }
}

// ============================================================================
// Container
// ============================================================================

/// Cascading metadata of a container or of one of its type arguments
#[derive(Debug, Clone)]
pub struct ContainerCascadingMetaData {
    enclosing_type: GenericType,
    type_parameter: TypeParameterSlot,
    declared_container_class: Option<ClassName>,
    declared_type_parameter_index: Option<usize>,
    cascading: bool,
    group_conversions: GroupConversions,
    container_elements: Vec<ContainerCascadingMetaData>,
    has_container_elements_marked_for_cascading: bool,
    value_extractor_candidates: Vec<Descriptor>,
}

impl ContainerCascadingMetaData {
    pub(crate) fn from_builder(
        manager: &ValueExtractorManager,
        builder: &CascadingMetaDataBuilder,
    ) -> ConfigResult<Self> {
        let container_elements = builder
            .container_elements()
            .values()
            .map(|element| Self::from_builder(manager, element))
            .collect::<ConfigResult<Vec<_>>>()?;

        let enclosing_type = builder
            .enclosing_type()
            .cloned()
            .unwrap_or_else(GenericType::object);
        let type_parameter = builder.slot().clone();
        let declared_container_class = match &type_parameter {
            TypeParameterSlot::Declared(parameter) => Some(parameter.declaring.clone()),
            TypeParameterSlot::ArrayElement => Some(enclosing_type.erasure()),
            TypeParameterSlot::AnnotatedObject => None,
        };

        let marked = builder.is_marked_for_cascading_on_annotated_object_or_container_elements();
        let value_extractor_candidates =
            if type_parameter == TypeParameterSlot::AnnotatedObject || !marked {
                Vec::new()
            } else {
                let candidates =
                    manager.candidates_for_cascaded_validation(&enclosing_type, &type_parameter);
                if candidates.is_empty() {
                    let container = declared_container_class
                        .clone()
                        .unwrap_or_else(|| enclosing_type.erasure());
                    return Err(ConfigurationError::no_value_extractor(&container, &type_parameter));
                }
                candidates
            };

        Ok(Self {
            declared_type_parameter_index: type_parameter.index(),
            enclosing_type,
            type_parameter,
            declared_container_class,
            cascading: builder.is_cascading(),
            group_conversions: builder.group_conversions().clone(),
            container_elements,
            has_container_elements_marked_for_cascading: builder
                .has_container_elements_marked_for_cascading(),
            value_extractor_candidates,
        })
    }

    /// Single-element container discovered from a runtime class
    pub(crate) fn runtime(
        runtime: &ClassName,
        extractor: Descriptor,
        group_conversions: &GroupConversions,
    ) -> Self {
        let enclosing_type = GenericType::class(runtime.clone());
        let type_parameter = extractor.extracted_type_parameter().clone();
        let element = Self {
            enclosing_type: enclosing_type.clone(),
            declared_container_class: Some(extractor.container_type().clone()),
            declared_type_parameter_index: type_parameter.index(),
            type_parameter,
            cascading: true,
            group_conversions: group_conversions.clone(),
            container_elements: Vec::new(),
            has_container_elements_marked_for_cascading: false,
            value_extractor_candidates: vec![extractor],
        };
        Self {
            enclosing_type,
            type_parameter: TypeParameterSlot::AnnotatedObject,
            declared_container_class: None,
            declared_type_parameter_index: None,
            cascading: true,
            group_conversions: group_conversions.clone(),
            container_elements: vec![element],
            has_container_elements_marked_for_cascading: true,
            value_extractor_candidates: Vec::new(),
        }
    }

    /// Container type declaring this slot
    pub fn enclosing_type(&self) -> &GenericType {
        &self.enclosing_type
    }

    pub fn type_parameter(&self) -> &TypeParameterSlot {
        &self.type_parameter
    }

    pub fn declared_container_class(&self) -> Option<&ClassName> {
        self.declared_container_class.as_ref()
    }

    pub fn declared_type_parameter_index(&self) -> Option<usize> {
        self.declared_type_parameter_index
    }

    pub fn is_cascading(&self) -> bool {
        self.cascading
    }

    pub fn group_conversions(&self) -> &GroupConversions {
        &self.group_conversions
    }

    pub fn convert_group(&self, group: &ClassName) -> ClassName {
        self.group_conversions.convert(group)
    }

    pub fn container_element_metadata(&self) -> &[ContainerCascadingMetaData] {
        &self.container_elements
    }

    pub fn container_element(&self, slot: &TypeParameterSlot) -> Option<&ContainerCascadingMetaData> {
        self.container_elements
            .iter()
            .find(|element| &element.type_parameter == slot)
    }

    pub fn has_container_elements_marked_for_cascading(&self) -> bool {
        self.has_container_elements_marked_for_cascading
    }

    pub fn is_marked_for_cascading_on_annotated_object_or_container_elements(&self) -> bool {
        self.cascading || self.has_container_elements_marked_for_cascading
    }

    /// Extractors that may read this slot; empty for the top-level entry
    pub fn value_extractor_candidates(&self) -> &[Descriptor] {
        &self.value_extractor_candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{ValueExtractor, ValueReceiver};
    use crate::reflect::{parse_type, ClassDef, TypeRegistry};
    use crate::types::Value;

    #[derive(Debug)]
    struct Noop;

    impl ValueExtractor for Noop {
        fn extract_values(&self, _container: &Value, _receiver: &mut dyn ValueReceiver) {}
    }

    fn registry_with_box() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry
            .define(ClassDef::builder("Box").type_param("T").field("content", "T"))
            .unwrap();
        registry
    }

    #[test]
    fn test_missing_extractor_only_matters_when_cascading() {
        let registry = Arc::new(registry_with_box());
        let manager = ValueExtractorManager::new(Arc::clone(&registry)).unwrap();
        let declared = parse_type("Box<String>", &[]).unwrap();

        let plain = CascadingMetaDataBuilder::annotated_object(declared.clone())
            .build(&manager, "Holder.box")
            .unwrap();
        assert!(matches!(plain, CascadingMetaData::NonContainer(_)));

        let err = CascadingMetaDataBuilder::annotated_object(declared.clone())
            .cascade_type_argument(&registry, &[0])
            .unwrap()
            .build(&manager, "Holder.box")
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::NoValueExtractorFound { .. }));

        let with_extractor = manager
            .with_overlay(vec![ValueExtractorDescriptor::new(
                "BoxExtractor",
                "Box",
                TypeParameterSlot::declared("Box", 0, "T"),
                Noop,
            )])
            .unwrap();
        let built = CascadingMetaDataBuilder::annotated_object(declared)
            .cascade_type_argument(&registry, &[0])
            .unwrap()
            .build(&with_extractor, "Holder.box")
            .unwrap();
        assert!(built.is_container());
        assert!(!built.is_cascading());
        assert!(built.is_marked_for_cascading_on_annotated_object_or_container_elements());
    }

    #[test]
    fn test_runtime_container_support() {
        let registry = Arc::new(TypeRegistry::new());
        let manager = ValueExtractorManager::new(Arc::clone(&registry)).unwrap();
        let potential = CascadingMetaDataBuilder::annotated_object(GenericType::object())
            .cascading(true)
            .build(&manager, "Holder.value")
            .unwrap();

        let list = potential
            .runtime_container(&manager, &ClassName::new("ArrayList"), false)
            .unwrap()
            .unwrap();
        let element = &list.container_element_metadata()[0];
        assert_eq!(element.value_extractor_candidates()[0].name(), "ListValueExtractor");
        assert_eq!(element.declared_type_parameter_index(), Some(0));

        let map = potential
            .runtime_container(&manager, &ClassName::new("HashMap"), false)
            .unwrap()
            .unwrap();
        assert_eq!(
            map.container_element_metadata()[0].value_extractor_candidates()[0].name(),
            "MapValueExtractor"
        );
        assert!(potential
            .runtime_container(&manager, &ClassName::new("String"), false)
            .unwrap()
            .is_none());

        let bean = CascadingMetaDataBuilder::annotated_object(GenericType::class("Iterable"))
            .cascading(true)
            .build(&manager, "Holder.items")
            .unwrap();
        assert!(bean.is_container());

        let plain = CascadingMetaData::NonContainer(NonContainerCascadingMetaData::new(
            true,
            GroupConversions::new(),
        ));
        assert!(plain
            .runtime_container(&manager, &ClassName::new("ArrayList"), false)
            .unwrap()
            .is_none());
        let legacy = plain
            .runtime_container(&manager, &ClassName::new("ArrayList"), true)
            .unwrap()
            .unwrap();
        assert_eq!(
            legacy.container_element_metadata()[0].value_extractor_candidates()[0].name(),
            "LegacyListValueExtractor"
        );
    }
}
