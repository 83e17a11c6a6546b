//! Value extractor registry and resolution
//!
//! The manager holds every extractor known to a factory, keyed by container
//! class and extracted slot. Registration order is preserved; registering a
//! key twice replaces the earlier descriptor in place.
//!
//! Resolution always narrows the type-compatible candidates down to the
//! maximally specific ones (an extractor for `List` beats one for `Iterable`
//! when both apply). Several maximally specific candidates are reported as
//! [`ConfigurationError::AmbiguousValueExtractors`], both for by-type and
//! by-type-and-parameter lookups.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::errors::{ConfigResult, ConfigurationError};
use crate::reflect::{names, ClassName, GenericType, TypeParameterSlot, TypeRegistry};

use super::builtin::{builtin_extractors, legacy_extractors};
use super::provider::ExtractorProvider;
use super::ValueExtractorDescriptor;

type Descriptor = Arc<ValueExtractorDescriptor>;
type RuntimeKey = (ClassName, ClassName, TypeParameterSlot);

/// Registry of value extractors for one validator factory
#[derive(Debug)]
pub struct ValueExtractorManager {
    registry: Arc<TypeRegistry>,
    extractors: Vec<Descriptor>,
    by_type_cache: DashMap<ClassName, Option<Descriptor>>,
    runtime_cache: DashMap<RuntimeKey, Option<Descriptor>>,
}

impl ValueExtractorManager {
    /// Manager holding the built-in extractors only
    pub fn new(registry: Arc<TypeRegistry>) -> ConfigResult<Self> {
        Self::with_extractors(registry, &[], Vec::new())
    }

    /// Built-ins, then available providers, then `custom` in order
    pub fn with_extractors(
        registry: Arc<TypeRegistry>,
        providers: &[Box<dyn ExtractorProvider>],
        custom: Vec<ValueExtractorDescriptor>,
    ) -> ConfigResult<Self> {
        let mut extractors: Vec<Descriptor> = builtin_extractors().to_vec();

        for provider in providers {
            if provider.is_available(&registry) {
                debug!(provider = provider.name(), "registering extractors from provider");
                for descriptor in provider.descriptors() {
                    insert(&mut extractors, &registry, Arc::new(descriptor))?;
                }
            } else {
                debug!(provider = provider.name(), "extractor provider not available");
            }
        }
        for descriptor in custom {
            insert(&mut extractors, &registry, Arc::new(descriptor))?;
        }

        info!(count = extractors.len(), "value extractor manager initialized");
        Ok(Self::from_parts(registry, extractors))
    }

    fn from_parts(registry: Arc<TypeRegistry>, extractors: Vec<Descriptor>) -> Self {
        Self {
            registry,
            extractors,
            by_type_cache: DashMap::new(),
            runtime_cache: DashMap::new(),
        }
    }

    /// Copy of this manager with `extra` registered on top
    pub fn with_overlay(
        &self,
        extra: impl IntoIterator<Item = ValueExtractorDescriptor>,
    ) -> ConfigResult<Self> {
        let mut extractors = self.extractors.clone();
        for descriptor in extra {
            insert(&mut extractors, &self.registry, Arc::new(descriptor))?;
        }
        Ok(Self::from_parts(Arc::clone(&self.registry), extractors))
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Registered extractors in registration order
    pub fn extractors(&self) -> &[Descriptor] {
        &self.extractors
    }

    pub fn get(&self, container: &ClassName, slot: &TypeParameterSlot) -> Option<&Descriptor> {
        self.extractors
            .iter()
            .find(|d| d.container_type() == container && d.extracted_type_parameter() == slot)
    }

    // ------------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------------

    /// Most specific extractor for all elements of a value of `value_type`
    ///
    /// Maps resolve to the map value extractor. `Ok(None)` means the type is
    /// not a container.
    pub fn resolve_by_type(&self, value_type: &ClassName) -> ConfigResult<Option<Descriptor>> {
        if let Some(cached) = self.by_type_cache.get(value_type) {
            return Ok(cached.value().clone());
        }
        let resolved = if self.is_map(value_type) {
            self.map_value_extractor()
        } else {
            let candidates = self
                .extractors
                .iter()
                .filter(|d| !is_annotated_object(d) && self.assignable(d.container_type(), value_type))
                .cloned()
                .collect();
            unique(value_type, self.maximally_specific(candidates))?
        };
        self.by_type_cache
            .insert(value_type.clone(), resolved.clone());
        Ok(resolved)
    }

    /// Most specific extractor for `slot` of a value declared as `declared`
    ///
    /// The slot is bound through the inheritance chain, so a slot of
    /// `ArrayList` matches an extractor registered for `List`. Sentinel slots
    /// only match extractors declared for the same sentinel.
    pub fn resolve_by_type_and_parameter(
        &self,
        declared: &GenericType,
        slot: &TypeParameterSlot,
    ) -> ConfigResult<Option<Descriptor>> {
        let erased = declared.erasure();
        let candidates = self
            .extractors
            .iter()
            .filter(|d| {
                self.assignable(d.container_type(), &erased) && self.is_compatible(&erased, slot, d)
            })
            .cloned()
            .collect();
        unique(&erased, self.maximally_specific(candidates))
    }

    /// Extractors that may serve `slot` of `declared` at validation time
    ///
    /// Union of the extractors compliant with the declared type and those
    /// compliant with any of its possible runtime subtypes.
    pub fn candidates_for_cascaded_validation(
        &self,
        declared: &GenericType,
        slot: &TypeParameterSlot,
    ) -> Vec<Descriptor> {
        let erased = declared.erasure();
        let compliant = self.maximally_specific(
            self.extractors
                .iter()
                .filter(|d| {
                    self.assignable(d.container_type(), &erased)
                        && self.is_compatible(&erased, slot, d)
                })
                .cloned()
                .collect(),
        );
        let potential = self.extractors.iter().filter(|d| {
            self.assignable(&erased, d.container_type()) && self.is_compatible(&erased, slot, d)
        });

        let mut result = compliant;
        for descriptor in potential {
            if !result.iter().any(|d| d.key() == descriptor.key()) {
                result.push(Arc::clone(descriptor));
            }
        }
        result
    }

    /// Pick among `candidates` once the runtime class of the container is known
    pub fn resolve_by_runtime_type_and_parameter(
        &self,
        declared: &GenericType,
        slot: &TypeParameterSlot,
        runtime: &ClassName,
        candidates: &[Descriptor],
    ) -> ConfigResult<Option<Descriptor>> {
        if let [only] = candidates {
            return Ok(Some(Arc::clone(only)));
        }
        let erased = declared.erasure();
        let key = (erased.clone(), runtime.clone(), slot.clone());
        if let Some(cached) = self.runtime_cache.get(&key) {
            return Ok(cached.value().clone());
        }
        let filtered = candidates
            .iter()
            .filter(|d| {
                self.assignable(d.container_type(), runtime) && self.is_compatible(&erased, slot, d)
            })
            .cloned()
            .collect();
        let resolved = unique(runtime, self.maximally_specific(filtered))?;
        self.runtime_cache.insert(key, resolved.clone());
        Ok(resolved)
    }

    /// Container detection for a cascade marker on a whole element
    ///
    /// Maximally specific extractors whose container is a supertype of
    /// `declared`, restricted to those a whole-element cascade implies.
    pub fn maximally_specific_container_extractors(&self, declared: &ClassName) -> Vec<Descriptor> {
        let candidates = self
            .extractors
            .iter()
            .filter(|d| !is_annotated_object(d) && self.assignable(d.container_type(), declared))
            .cloned()
            .collect();
        let mut specific = self.maximally_specific(candidates);
        specific.retain(|d| d.implicit_cascade());
        specific
    }

    /// Extractors whose container could be the runtime class of `declared`
    pub fn potential_container_extractors(&self, declared: &ClassName) -> Vec<Descriptor> {
        self.extractors
            .iter()
            .filter(|d| {
                !is_annotated_object(d)
                    && d.implicit_cascade()
                    && self.assignable(declared, d.container_type())
            })
            .cloned()
            .collect()
    }

    /// Extractor for every element of a runtime container among `candidates`
    pub fn resolve_for_all_container_elements(
        &self,
        runtime: &ClassName,
        candidates: &[Descriptor],
    ) -> ConfigResult<Option<Descriptor>> {
        if self.is_map(runtime) {
            return Ok(self.map_value_extractor());
        }
        let filtered = candidates
            .iter()
            .filter(|d| self.assignable(d.container_type(), runtime))
            .cloned()
            .collect();
        unique(runtime, self.maximally_specific(filtered))
    }

    /// Legacy extractor for a cascaded value that turns out to be a container
    pub fn legacy_extractor_for(&self, runtime: &ClassName) -> ConfigResult<Option<Descriptor>> {
        let legacy = legacy_extractors();
        if self.is_map(runtime) {
            let map = ClassName::new(names::MAP);
            return Ok(legacy
                .iter()
                .find(|d| d.container_type() == &map)
                .cloned());
        }
        let candidates = legacy
            .iter()
            .filter(|d| self.assignable(d.container_type(), runtime))
            .cloned()
            .collect();
        unique(runtime, self.maximally_specific(candidates))
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn assignable(&self, target: &ClassName, source: &ClassName) -> bool {
        self.registry.is_assignable(target, source)
    }

    fn is_map(&self, class: &ClassName) -> bool {
        self.assignable(&ClassName::new(names::MAP), class)
    }

    fn map_value_extractor(&self) -> Option<Descriptor> {
        self.get(
            &ClassName::new(names::MAP),
            &TypeParameterSlot::declared(names::MAP, 1, "V"),
        )
        .cloned()
    }

    /// Whether extractor `d` reads `slot` of `declared` (or of a subtype)
    fn is_compatible(&self, declared: &ClassName, slot: &TypeParameterSlot, d: &Descriptor) -> bool {
        let extracted = d.extracted_type_parameter();
        let parameter = match slot {
            TypeParameterSlot::Declared(parameter) => parameter,
            sentinel => return extracted == sentinel,
        };
        let Some(extracted) = extracted.as_declared() else {
            return false;
        };
        let container = d.container_type();
        // bind from whichever class declares the variable, so slots
        // synthesized from a supertype of the declared type still match
        let owner = if self.assignable(&parameter.declaring, declared) {
            &parameter.declaring
        } else {
            declared
        };

        if self.assignable(container, owner) {
            self.registry
                .type_variable_bindings(owner)
                .bind(container, parameter)
                == Some(extracted)
        } else {
            self.registry
                .type_variable_bindings(container)
                .bind(owner, extracted)
                == Some(parameter)
        }
    }

    /// Drop every candidate for which a strictly more specific one exists
    fn maximally_specific(&self, candidates: Vec<Descriptor>) -> Vec<Descriptor> {
        let mut result: Vec<Descriptor> = Vec::with_capacity(candidates.len());
        for descriptor in candidates {
            let mut is_new_root = true;
            let mut i = 0;
            while i < result.len() {
                let candidate = &result[i];
                // same container: both stay, ambiguity is reported later
                if candidate.container_type() == descriptor.container_type() {
                    i += 1;
                    continue;
                }
                if self.assignable(candidate.container_type(), descriptor.container_type()) {
                    result.remove(i);
                    continue;
                }
                if self.assignable(descriptor.container_type(), candidate.container_type()) {
                    is_new_root = false;
                }
                i += 1;
            }
            if is_new_root {
                result.push(descriptor);
            }
        }
        result
    }
}

fn is_annotated_object(descriptor: &Descriptor) -> bool {
    descriptor.extracted_type_parameter() == &TypeParameterSlot::AnnotatedObject
}

fn insert(
    extractors: &mut Vec<Descriptor>,
    registry: &TypeRegistry,
    descriptor: Descriptor,
) -> ConfigResult<()> {
    descriptor.validate(registry)?;
    match extractors.iter().position(|d| d.key() == descriptor.key()) {
        Some(position) => {
            let replaced = &extractors[position];
            if builtin_extractors().iter().any(|b| Arc::ptr_eq(b, replaced)) {
                warn!(
                    key = %descriptor.key(),
                    replaced = replaced.name(),
                    by = descriptor.name(),
                    "overriding built-in value extractor"
                );
            } else {
                debug!(key = %descriptor.key(), by = descriptor.name(), "overriding value extractor");
            }
            extractors[position] = descriptor;
        }
        None => extractors.push(descriptor),
    }
    Ok(())
}

fn unique(type_name: &ClassName, mut candidates: Vec<Descriptor>) -> ConfigResult<Option<Descriptor>> {
    match candidates.len() {
        0 => Ok(None),
        1 => Ok(candidates.pop()),
        _ => Err(ConfigurationError::ambiguous(
            type_name,
            candidates.iter().map(|d| d.name()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{ValueExtractor, ValueReceiver};
    use crate::reflect::ClassDef;
    use crate::types::Value;

    #[derive(Debug)]
    struct Noop;

    impl ValueExtractor for Noop {
        fn extract_values(&self, _container: &Value, _receiver: &mut dyn ValueReceiver) {}
    }

    fn manager() -> ValueExtractorManager {
        ValueExtractorManager::new(Arc::new(TypeRegistry::new())).unwrap()
    }

    fn name_of(resolved: ConfigResult<Option<Descriptor>>) -> Option<String> {
        resolved.unwrap().map(|d| d.name().to_string())
    }

    #[test]
    fn test_resolve_by_type_prefers_most_specific() {
        let manager = manager();
        let class = ClassName::new;
        assert_eq!(
            name_of(manager.resolve_by_type(&class("ArrayList"))).as_deref(),
            Some("ListValueExtractor")
        );
        assert_eq!(
            name_of(manager.resolve_by_type(&class("HashSet"))).as_deref(),
            Some("IterableValueExtractor")
        );
        assert_eq!(
            name_of(manager.resolve_by_type(&class("HashMap"))).as_deref(),
            Some("MapValueExtractor")
        );
        assert_eq!(
            name_of(manager.resolve_by_type(&class("Order[]"))).as_deref(),
            Some("ObjectArrayValueExtractor")
        );
        assert_eq!(name_of(manager.resolve_by_type(&class("String"))), None);
    }

    #[test]
    fn test_resolve_by_type_and_parameter_distinguishes_map_slots() {
        let manager = manager();
        let map = GenericType::parameterized(
            "HashMap",
            vec![GenericType::class("String"), GenericType::class("Integer")],
        );
        assert_eq!(
            name_of(manager.resolve_by_type_and_parameter(
                &map,
                &TypeParameterSlot::declared("HashMap", 0, "K")
            ))
            .as_deref(),
            Some("MapKeyExtractor")
        );
        assert_eq!(
            name_of(manager.resolve_by_type_and_parameter(
                &map,
                &TypeParameterSlot::declared("HashMap", 1, "V")
            ))
            .as_deref(),
            Some("MapValueExtractor")
        );
    }

    #[test]
    fn test_sentinel_slots_bypass_binding() {
        let manager = manager();
        let ints = GenericType::Array(Box::new(GenericType::Primitive(ClassName::new("int"))));
        assert_eq!(
            name_of(manager.resolve_by_type_and_parameter(&ints, &TypeParameterSlot::ArrayElement))
                .as_deref(),
            Some("IntArrayValueExtractor")
        );
        assert_eq!(
            name_of(manager.resolve_by_type_and_parameter(
                &GenericType::class("String"),
                &TypeParameterSlot::AnnotatedObject
            ))
            .as_deref(),
            Some("ObjectValueExtractor")
        );
    }

    #[test]
    fn test_subclass_binding() {
        let mut registry = TypeRegistry::new();
        registry
            .define(ClassDef::builder("Bag").type_param("X").extends("ArrayList<X>"))
            .unwrap();
        let manager = ValueExtractorManager::new(Arc::new(registry)).unwrap();
        let bag = GenericType::parameterized("Bag", vec![GenericType::class("String")]);
        assert_eq!(
            name_of(manager.resolve_by_type_and_parameter(
                &bag,
                &TypeParameterSlot::declared("Bag", 0, "X")
            ))
            .as_deref(),
            Some("ListValueExtractor")
        );
    }

    #[test]
    fn test_last_registration_wins_in_place() {
        let manager = manager();
        let position = manager
            .extractors()
            .iter()
            .position(|d| d.name() == "ListValueExtractor")
            .unwrap();
        let overlay = manager
            .with_overlay(vec![ValueExtractorDescriptor::new(
                "CustomList",
                "List",
                TypeParameterSlot::declared("List", 0, "E"),
                Noop,
            )])
            .unwrap();

        assert_eq!(overlay.extractors().len(), manager.extractors().len());
        assert_eq!(overlay.extractors()[position].name(), "CustomList");
        assert_eq!(manager.extractors()[position].name(), "ListValueExtractor");
    }

    #[test]
    fn test_container_detection_excludes_map_keys() {
        let manager = manager();
        let found = manager.maximally_specific_container_extractors(&ClassName::new("HashMap"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "MapValueExtractor");

        let potential = manager.potential_container_extractors(&ClassName::new("Object"));
        assert!(potential.iter().all(|d| d.name() != "MapKeyExtractor"));
        assert!(potential.iter().any(|d| d.name() == "ListValueExtractor"));
        assert!(manager
            .potential_container_extractors(&ClassName::new("String"))
            .is_empty());
    }

    #[test]
    fn test_ambiguous_resolution_is_an_error() {
        let mut registry = TypeRegistry::new();
        registry
            .define(ClassDef::interface("Tagged").type_param("T"))
            .unwrap();
        registry
            .define(
                ClassDef::builder("TaggedList")
                    .type_param("E")
                    .extends("ArrayList<E>")
                    .extends("Tagged<E>"),
            )
            .unwrap();
        let manager = ValueExtractorManager::with_extractors(
            Arc::new(registry),
            &[],
            vec![ValueExtractorDescriptor::new(
                "TaggedExtractor",
                "Tagged",
                TypeParameterSlot::declared("Tagged", 0, "T"),
                Noop,
            )],
        )
        .unwrap();

        let err = manager
            .resolve_by_type(&ClassName::new("TaggedList"))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::AmbiguousValueExtractors { .. }));

        let declared = GenericType::parameterized("TaggedList", vec![GenericType::class("String")]);
        assert!(manager
            .resolve_by_type_and_parameter(&declared, &TypeParameterSlot::declared("TaggedList", 0, "E"))
            .is_err());
    }

    #[test]
    fn test_runtime_resolution_and_legacy() {
        let manager = manager();
        let candidates = manager.candidates_for_cascaded_validation(
            &GenericType::parameterized("Iterable", vec![GenericType::class("String")]),
            &TypeParameterSlot::declared("Iterable", 0, "T"),
        );
        assert!(candidates.iter().any(|d| d.name() == "IterableValueExtractor"));
        assert!(candidates.iter().any(|d| d.name() == "ListValueExtractor"));

        let resolved = manager
            .resolve_by_runtime_type_and_parameter(
                &GenericType::class("Iterable"),
                &TypeParameterSlot::declared("Iterable", 0, "T"),
                &ClassName::new("ArrayList"),
                &candidates,
            )
            .unwrap()
            .unwrap();
        assert_eq!(resolved.name(), "ListValueExtractor");

        assert_eq!(
            name_of(manager.legacy_extractor_for(&ClassName::new("ArrayList"))).as_deref(),
            Some("LegacyListValueExtractor")
        );
        assert_eq!(
            name_of(manager.legacy_extractor_for(&ClassName::new("HashMap"))).as_deref(),
            Some("LegacyMapValueExtractor")
        );
    }
}
