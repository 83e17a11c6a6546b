//! Bean metadata aggregation
//!
//! Declarations arrive as [`ConstrainedElement`] records, one per annotated
//! member. [`BeanMetaDataManager::build`] resolves every record once into
//! locations and meta constraints, then assembles per class the constraints
//! and cascading metadata of the whole type hierarchy, supertypes first.
//! Cascading declarations of the same property found on several levels are
//! merged before they are built.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::{debug, info};

use crate::cascading::{CascadingMetaData, CascadingMetaDataBuilder, GroupConversions};
use crate::config::ValidationConfig;
use crate::constraints::ConstraintDescriptor;
use crate::errors::{ConfigResult, ConfigurationError};
use crate::extraction::ValueExtractorManager;
use crate::location::ConstraintLocation;
use crate::metaconstraint::MetaConstraint;
use crate::reflect::{ClassKind, ClassName, GenericType, MethodDef, TypeRegistry};

// ============================================================================
// Constrained Elements
// ============================================================================

/// Member a [`ConstrainedElement`] describes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstrainedElementKind {
    Type,
    Field(String),
    /// Accessor method, reported under its property name
    Getter(String),
    Parameter { method: String, index: usize },
    CrossParameter { method: String },
    ReturnValue { method: String },
}

/// A constraint declared on an element or on one of its type arguments
#[derive(Debug, Clone)]
pub struct RawConstraint {
    pub descriptor: ConstraintDescriptor,
    /// Type argument indices leading into the element's type, empty for the
    /// element itself
    pub type_argument_path: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
struct TypeArgumentCascade {
    cascade: bool,
    group_conversions: GroupConversions,
}

/// Declarations found on one member of one class
#[derive(Debug, Clone)]
pub struct ConstrainedElement {
    pub declaring_class: ClassName,
    pub kind: ConstrainedElementKind,
    pub constraints: Vec<RawConstraint>,
    cascade: bool,
    group_conversions: GroupConversions,
    type_arguments: BTreeMap<Vec<usize>, TypeArgumentCascade>,
}

impl ConstrainedElement {
    pub fn new(declaring_class: impl Into<ClassName>, kind: ConstrainedElementKind) -> Self {
        Self {
            declaring_class: declaring_class.into(),
            kind,
            constraints: Vec::new(),
            cascade: false,
            group_conversions: GroupConversions::new(),
            type_arguments: BTreeMap::new(),
        }
    }

    pub fn bean(class: impl Into<ClassName>) -> Self {
        Self::new(class, ConstrainedElementKind::Type)
    }

    pub fn field(class: impl Into<ClassName>, name: impl Into<String>) -> Self {
        Self::new(class, ConstrainedElementKind::Field(name.into()))
    }

    pub fn getter(class: impl Into<ClassName>, method: impl Into<String>) -> Self {
        Self::new(class, ConstrainedElementKind::Getter(method.into()))
    }

    pub fn parameter(class: impl Into<ClassName>, method: impl Into<String>, index: usize) -> Self {
        Self::new(
            class,
            ConstrainedElementKind::Parameter {
                method: method.into(),
                index,
            },
        )
    }

    pub fn cross_parameter(class: impl Into<ClassName>, method: impl Into<String>) -> Self {
        Self::new(
            class,
            ConstrainedElementKind::CrossParameter {
                method: method.into(),
            },
        )
    }

    pub fn return_value(class: impl Into<ClassName>, method: impl Into<String>) -> Self {
        Self::new(
            class,
            ConstrainedElementKind::ReturnValue {
                method: method.into(),
            },
        )
    }

    /// Constraint on the element itself
    pub fn constraint(self, descriptor: impl Into<ConstraintDescriptor>) -> Self {
        self.type_argument_constraint(&[], descriptor)
    }

    /// Constraint on the type argument reached by `path`
    pub fn type_argument_constraint(
        mut self,
        path: &[usize],
        descriptor: impl Into<ConstraintDescriptor>,
    ) -> Self {
        self.constraints.push(RawConstraint {
            descriptor: descriptor.into(),
            type_argument_path: path.to_vec(),
        });
        self
    }

    /// Cascade marker on the element itself
    pub fn cascade(mut self) -> Self {
        self.cascade = true;
        self
    }

    pub fn convert_group(mut self, from: impl Into<ClassName>, to: impl Into<ClassName>) -> Self {
        self.group_conversions.insert(from, to);
        self
    }

    /// Cascade marker on the type argument reached by `path`
    pub fn cascade_type_argument(mut self, path: &[usize]) -> Self {
        self.type_arguments.entry(path.to_vec()).or_default().cascade = true;
        self
    }

    pub fn convert_type_argument_group(
        mut self,
        path: &[usize],
        from: impl Into<ClassName>,
        to: impl Into<ClassName>,
    ) -> Self {
        self.type_arguments
            .entry(path.to_vec())
            .or_default()
            .group_conversions
            .insert(from, to);
        self
    }

    fn has_type_argument_constraints(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| !c.type_argument_path.is_empty())
    }

    fn declares_parameter_metadata(&self) -> bool {
        matches!(
            self.kind,
            ConstrainedElementKind::Parameter { .. } | ConstrainedElementKind::CrossParameter { .. }
        ) && (!self.constraints.is_empty()
            || self.cascade
            || self.type_arguments.values().any(|t| t.cascade))
    }

    fn method_name(&self) -> Option<&str> {
        match &self.kind {
            ConstrainedElementKind::Parameter { method, .. }
            | ConstrainedElementKind::CrossParameter { method }
            | ConstrainedElementKind::ReturnValue { method } => Some(method),
            _ => None,
        }
    }

    fn location(&self, registry: &TypeRegistry) -> ConfigResult<ConstraintLocation> {
        let class = &self.declaring_class;
        match &self.kind {
            ConstrainedElementKind::Type => ConstraintLocation::for_bean(registry, class),
            ConstrainedElementKind::Field(name) => ConstraintLocation::for_field(registry, class, name),
            ConstrainedElementKind::Getter(method) => {
                ConstraintLocation::for_getter(registry, class, method)
            }
            ConstrainedElementKind::Parameter { method, index } => {
                ConstraintLocation::for_parameter(registry, class, method, *index)
            }
            ConstrainedElementKind::CrossParameter { method } => {
                ConstraintLocation::for_cross_parameter(registry, class, method)
            }
            ConstrainedElementKind::ReturnValue { method } => {
                ConstraintLocation::for_return_value(registry, class, method)
            }
        }
    }

    fn cascading_builder(
        &self,
        registry: &TypeRegistry,
        declared: GenericType,
    ) -> ConfigResult<CascadingMetaDataBuilder> {
        let mut builder = CascadingMetaDataBuilder::annotated_object(declared)
            .cascading(self.cascade)
            .with_group_conversions(self.group_conversions.clone());
        for (path, declaration) in &self.type_arguments {
            let cascade = declaration.cascade;
            let conversions = declaration.group_conversions.clone();
            builder = builder.update_type_argument(registry, path, |element| {
                element
                    .cascading(cascade)
                    .with_group_conversions(conversions)
            })?;
        }
        Ok(builder)
    }
}

// ============================================================================
// Built Metadata
// ============================================================================

/// Constraints and cascading metadata of one bean property
#[derive(Debug, Clone)]
pub struct PropertyMetaData {
    name: String,
    constraints: Vec<MetaConstraint>,
    cascading: CascadingMetaData,
}

impl PropertyMetaData {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraints(&self) -> &[MetaConstraint] {
        &self.constraints
    }

    pub fn cascading(&self) -> &CascadingMetaData {
        &self.cascading
    }
}

#[derive(Debug, Clone)]
pub struct ParameterMetaData {
    index: usize,
    name: String,
    constraints: Vec<MetaConstraint>,
    cascading: CascadingMetaData,
}

impl ParameterMetaData {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraints(&self) -> &[MetaConstraint] {
        &self.constraints
    }

    pub fn cascading(&self) -> &CascadingMetaData {
        &self.cascading
    }
}

/// Parameter, cross-parameter and return value metadata of one method
#[derive(Debug, Clone)]
pub struct MethodMetaData {
    name: String,
    parameters: Vec<ParameterMetaData>,
    cross_parameter_constraints: Vec<MetaConstraint>,
    return_value_constraints: Vec<MetaConstraint>,
    return_value_cascading: CascadingMetaData,
}

impl MethodMetaData {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One entry per declared parameter, in order
    pub fn parameters(&self) -> &[ParameterMetaData] {
        &self.parameters
    }

    pub fn cross_parameter_constraints(&self) -> &[MetaConstraint] {
        &self.cross_parameter_constraints
    }

    pub fn return_value_constraints(&self) -> &[MetaConstraint] {
        &self.return_value_constraints
    }

    pub fn return_value_cascading(&self) -> &CascadingMetaData {
        &self.return_value_cascading
    }
}

/// Everything the engine needs to validate instances of one class
#[derive(Debug, Clone)]
pub struct BeanMetaData {
    class: ClassName,
    default_group_sequence: Option<Vec<ClassName>>,
    class_constraints: Vec<MetaConstraint>,
    properties: Vec<PropertyMetaData>,
    methods: Vec<MethodMetaData>,
}

impl BeanMetaData {
    pub fn class(&self) -> &ClassName {
        &self.class
    }

    /// Sequence replacing `Default` for this class, if it redefines it
    ///
    /// The class's own name in the sequence stands for its `Default`
    /// constraints.
    pub fn default_group_sequence(&self) -> Option<&[ClassName]> {
        self.default_group_sequence.as_deref()
    }

    pub fn class_constraints(&self) -> &[MetaConstraint] {
        &self.class_constraints
    }

    /// Properties in declaration order, inherited ones first
    pub fn properties(&self) -> &[PropertyMetaData] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyMetaData> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn methods(&self) -> &[MethodMetaData] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&MethodMetaData> {
        self.methods.iter().find(|m| m.name == name)
    }
}

// ============================================================================
// Metadata Manager
// ============================================================================

/// One declaration with its location and meta constraints resolved
#[derive(Debug, Clone)]
struct ResolvedElement {
    kind: ConstrainedElementKind,
    location: Arc<ConstraintLocation>,
    constraints: Vec<MetaConstraint>,
    cascading: CascadingMetaDataBuilder,
}

/// Built metadata for every class with constraints in its hierarchy
#[derive(Debug, Clone, Default)]
pub struct BeanMetaDataManager {
    beans: HashMap<ClassName, Arc<BeanMetaData>>,
}

impl BeanMetaDataManager {
    pub fn build(
        manager: &ValueExtractorManager,
        elements: &[ConstrainedElement],
        config: &ValidationConfig,
    ) -> ConfigResult<Self> {
        let registry = manager.registry();

        let mut declared: HashMap<ClassName, Vec<ResolvedElement>> = HashMap::new();
        for element in elements {
            let resolved = resolve_element(manager, element, config)?;
            declared
                .entry(element.declaring_class.clone())
                .or_default()
                .push(resolved);
        }

        let mut beans = HashMap::new();
        for def in registry.classes() {
            if matches!(def.kind, ClassKind::Primitive | ClassKind::Array) {
                continue;
            }
            let mut hierarchy = registry.all_supertypes(&def.name);
            hierarchy.reverse();
            if !hierarchy.iter().any(|class| declared.contains_key(class)) {
                continue;
            }
            let levels = hierarchy
                .iter()
                .filter_map(|class| declared.get(class))
                .flatten();
            let bean = assemble(manager, &def.name, levels)?;
            debug!(
                class = %def.name,
                properties = bean.properties.len(),
                methods = bean.methods.len(),
                "bean metadata built"
            );
            beans.insert(def.name.clone(), Arc::new(bean));
        }

        info!(
            elements = elements.len(),
            beans = beans.len(),
            "bean metadata initialized"
        );
        Ok(Self { beans })
    }

    pub fn get(&self, class: &ClassName) -> Option<&Arc<BeanMetaData>> {
        self.beans.get(class)
    }

    pub fn len(&self) -> usize {
        self.beans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }
}

fn resolve_element(
    manager: &ValueExtractorManager,
    element: &ConstrainedElement,
    config: &ValidationConfig,
) -> ConfigResult<ResolvedElement> {
    let registry = manager.registry();
    let location = Arc::new(element.location(registry)?);

    if element.declares_parameter_metadata() {
        if let Some(method) = element.method_name() {
            check_not_overriding(registry, &element.declaring_class, method)?;
        }
    }

    let cascading = element.cascading_builder(registry, location.generic_type())?;
    if config.require_cascade_for_type_argument_constraints
        && element.has_type_argument_constraints()
        && !cascading.is_marked_for_cascading_on_annotated_object_or_container_elements()
    {
        return Err(ConfigurationError::TypeArgumentConstraintWithoutCascade {
            element: location.to_string(),
        });
    }

    let constraints = element
        .constraints
        .iter()
        .map(|raw| {
            let mut target = Arc::clone(&location);
            for &index in &raw.type_argument_path {
                target = Arc::new(ConstraintLocation::for_type_argument(target, registry, index)?);
            }
            MetaConstraint::new(manager, raw.descriptor.clone(), target)
        })
        .collect::<ConfigResult<Vec<_>>>()?;

    Ok(ResolvedElement {
        kind: element.kind.clone(),
        location,
        constraints,
        cascading,
    })
}

/// Parameter metadata may only be declared on the topmost declaration
fn check_not_overriding(registry: &TypeRegistry, class: &ClassName, method: &str) -> ConfigResult<()> {
    let overrides = registry
        .all_supertypes(class)
        .iter()
        .skip(1)
        .filter_map(|supertype| registry.get(supertype))
        .any(|def| def.method(method).is_some());
    if overrides {
        return Err(ConfigurationError::ParameterConstraintsOnOverride {
            class: class.to_string(),
            method: method.to_string(),
        });
    }
    Ok(())
}

/// Method declaration visible from `class`, searching supertypes
fn find_method<'r>(registry: &'r TypeRegistry, class: &ClassName, name: &str) -> Option<&'r MethodDef> {
    registry
        .all_supertypes(class)
        .iter()
        .filter_map(|c| registry.get(c))
        .find_map(|def| def.method(name))
}

#[derive(Default)]
struct PropertyParts {
    constraints: Vec<MetaConstraint>,
    cascading: CascadingMetaDataBuilder,
}

impl PropertyParts {
    fn add(&mut self, element: &ResolvedElement) -> ConfigResult<()> {
        self.constraints.extend(element.constraints.iter().cloned());
        let cascading = std::mem::take(&mut self.cascading);
        self.cascading = cascading.merge(element.cascading.clone())?;
        Ok(())
    }

    fn build(self, manager: &ValueExtractorManager, element: &str) -> ConfigResult<(Vec<MetaConstraint>, CascadingMetaData)> {
        let cascading = self.cascading.build(manager, element)?;
        Ok((self.constraints, cascading))
    }
}

#[derive(Default)]
struct MethodParts {
    parameters: BTreeMap<usize, PropertyParts>,
    cross_parameter: Vec<MetaConstraint>,
    return_value: PropertyParts,
}

fn assemble<'a>(
    manager: &ValueExtractorManager,
    class: &ClassName,
    elements: impl Iterator<Item = &'a ResolvedElement>,
) -> ConfigResult<BeanMetaData> {
    let registry = manager.registry();
    let mut class_constraints = Vec::new();
    let mut properties: Vec<(String, PropertyParts)> = Vec::new();
    let mut methods: Vec<(String, MethodParts)> = Vec::new();

    for element in elements {
        match &element.kind {
            ConstrainedElementKind::Type => {
                class_constraints.extend(element.constraints.iter().cloned());
            }
            ConstrainedElementKind::Field(_) | ConstrainedElementKind::Getter(_) => {
                let name = property_name(&element.location);
                let index = match properties.iter().position(|(n, _)| *n == name) {
                    Some(index) => index,
                    None => {
                        properties.push((name, PropertyParts::default()));
                        properties.len() - 1
                    }
                };
                properties[index].1.add(element)?;
            }
            ConstrainedElementKind::Parameter { method, index } => {
                method_parts(&mut methods, method)
                    .parameters
                    .entry(*index)
                    .or_default()
                    .add(element)?;
            }
            ConstrainedElementKind::CrossParameter { method } => {
                method_parts(&mut methods, method)
                    .cross_parameter
                    .extend(element.constraints.iter().cloned());
            }
            ConstrainedElementKind::ReturnValue { method } => {
                method_parts(&mut methods, method).return_value.add(element)?;
            }
        }
    }

    let properties = properties
        .into_iter()
        .map(|(name, parts)| {
            let (constraints, cascading) = parts.build(manager, &format!("{}.{}", class, name))?;
            Ok(PropertyMetaData {
                name,
                constraints,
                cascading,
            })
        })
        .collect::<ConfigResult<Vec<_>>>()?;

    let methods = methods
        .into_iter()
        .map(|(name, mut parts)| {
            let def = find_method(registry, class, &name)
                .ok_or_else(|| ConfigurationError::member_not_found(class, name.as_str()))?;
            let parameters = def
                .parameters
                .iter()
                .enumerate()
                .map(|(index, parameter)| {
                    let parts = parts.parameters.remove(&index).unwrap_or_default();
                    let (constraints, cascading) =
                        parts.build(manager, &format!("{}.{}({})", class, name, parameter.name))?;
                    Ok(ParameterMetaData {
                        index,
                        name: parameter.name.clone(),
                        constraints,
                        cascading,
                    })
                })
                .collect::<ConfigResult<Vec<_>>>()?;
            let (return_value_constraints, return_value_cascading) = parts
                .return_value
                .build(manager, &format!("{}.{}()", class, name))?;
            Ok(MethodMetaData {
                name,
                parameters,
                cross_parameter_constraints: parts.cross_parameter,
                return_value_constraints,
                return_value_cascading,
            })
        })
        .collect::<ConfigResult<Vec<_>>>()?;

    let default_group_sequence = registry
        .group_sequence(class)
        .filter(|sequence| sequence.contains(class))
        .map(<[ClassName]>::to_vec);

    Ok(BeanMetaData {
        class: class.clone(),
        default_group_sequence,
        class_constraints,
        properties,
        methods,
    })
}

fn method_parts<'m>(methods: &'m mut Vec<(String, MethodParts)>, name: &str) -> &'m mut MethodParts {
    let index = match methods.iter().position(|(n, _)| n == name) {
        Some(index) => index,
        None => {
            methods.push((name.to_string(), MethodParts::default()));
            methods.len() - 1
        }
    };
    &mut methods[index].1
}

fn property_name(location: &ConstraintLocation) -> String {
    match location {
        ConstraintLocation::Field { name, .. } => name.clone(),
        ConstraintLocation::Getter { property, .. } => property.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintKind;
    use crate::reflect::ClassDef;

    fn not_null() -> ConstraintDescriptor {
        ConstraintDescriptor::new(ConstraintKind::NotNull)
    }

    fn manager(configure: impl FnOnce(&mut TypeRegistry)) -> ValueExtractorManager {
        let mut registry = TypeRegistry::new();
        registry
            .define(
                ClassDef::builder("Animal")
                    .field("name", "String")
                    .field("tags", "List<String>")
                    .getter("getName", "String")
                    .method("feed", ["String", "int"], Some("boolean")),
            )
            .unwrap();
        registry
            .define(
                ClassDef::builder("Dog")
                    .extends("Animal")
                    .field("owner", "Object")
                    .method("feed", ["String", "int"], Some("boolean")),
            )
            .unwrap();
        configure(&mut registry);
        ValueExtractorManager::new(Arc::new(registry)).unwrap()
    }

    fn build(manager: &ValueExtractorManager, elements: Vec<ConstrainedElement>) -> ConfigResult<BeanMetaDataManager> {
        BeanMetaDataManager::build(manager, &elements, &ValidationConfig::default())
    }

    #[test]
    fn test_hierarchy_aggregation() {
        let manager = manager(|_| {});
        let beans = build(
            &manager,
            vec![
                ConstrainedElement::field("Animal", "name").constraint(not_null()),
                ConstrainedElement::getter("Animal", "getName")
                    .constraint(ConstraintKind::NotBlank),
                ConstrainedElement::field("Dog", "owner").cascade(),
            ],
        )
        .unwrap();

        assert_eq!(beans.len(), 2);
        let animal = beans.get(&ClassName::new("Animal")).unwrap();
        assert_eq!(animal.properties().len(), 1);
        assert_eq!(animal.property("name").unwrap().constraints().len(), 2);

        let dog = beans.get(&ClassName::new("Dog")).unwrap();
        let names: Vec<&str> = dog.properties().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["name", "owner"]);
        assert!(matches!(
            dog.property("owner").unwrap().cascading(),
            CascadingMetaData::PotentiallyContainer(_)
        ));
        assert!(beans.get(&ClassName::new("String")).is_none());
    }

    #[test]
    fn test_cascading_merged_across_hierarchy() {
        let manager = manager(|_| {});
        let beans = build(
            &manager,
            vec![
                ConstrainedElement::field("Animal", "tags").convert_group("Default", "Basic"),
                ConstrainedElement::field("Animal", "tags").cascade(),
            ],
        )
        .unwrap();
        let tags = beans
            .get(&ClassName::new("Dog"))
            .unwrap()
            .property("tags")
            .unwrap()
            .cascading()
            .clone();
        assert!(tags.is_container());
        assert_eq!(tags.container_element_metadata().len(), 1);
        assert_eq!(
            tags.container_element_metadata()[0].convert_group(&ClassName::new("Default")),
            ClassName::new("Basic")
        );
    }

    #[test]
    fn test_parameter_constraints_on_override_rejected() {
        let manager = manager(|_| {});
        let err = build(
            &manager,
            vec![ConstrainedElement::parameter("Dog", "feed", 0).constraint(not_null())],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::ParameterConstraintsOnOverride {
                class: "Dog".to_string(),
                method: "feed".to_string(),
            }
        );

        let beans = build(
            &manager,
            vec![
                ConstrainedElement::parameter("Animal", "feed", 1).constraint(ConstraintKind::Positive),
                ConstrainedElement::return_value("Dog", "feed").constraint(ConstraintKind::AssertTrue),
            ],
        )
        .unwrap();
        let feed = beans.get(&ClassName::new("Dog")).unwrap().method("feed").unwrap();
        assert_eq!(feed.parameters().len(), 2);
        assert!(feed.parameters()[0].constraints().is_empty());
        assert_eq!(feed.parameters()[1].constraints().len(), 1);
        assert_eq!(feed.return_value_constraints().len(), 1);
    }

    #[test]
    fn test_require_cascade_for_type_argument_constraints() {
        let manager = manager(|_| {});
        let element = ConstrainedElement::field("Animal", "tags")
            .type_argument_constraint(&[0], ConstraintKind::NotBlank);
        let strict = ValidationConfig::new().require_cascade_for_type_argument_constraints(true);

        assert!(build(&manager, vec![element.clone()]).is_ok());
        assert!(matches!(
            BeanMetaDataManager::build(&manager, &[element.clone()], &strict),
            Err(ConfigurationError::TypeArgumentConstraintWithoutCascade { .. })
        ));
        assert!(BeanMetaDataManager::build(&manager, &[element.cascade()], &strict).is_ok());
    }

    #[test]
    fn test_unknown_member_and_default_sequence() {
        let manager = manager(|registry| {
            registry
                .define(
                    ClassDef::builder("Order")
                        .field("id", "String")
                        .group_sequence(["Order", "Strict"]),
                )
                .unwrap();
        });
        assert!(matches!(
            build(&manager, vec![ConstrainedElement::field("Animal", "wings")]),
            Err(ConfigurationError::MemberNotFound { .. })
        ));

        let beans = build(
            &manager,
            vec![ConstrainedElement::field("Order", "id").constraint(not_null())],
        )
        .unwrap();
        assert_eq!(
            beans
                .get(&ClassName::new("Order"))
                .unwrap()
                .default_group_sequence(),
            Some(&[ClassName::new("Order"), ClassName::new("Strict")][..])
        );
    }
}
