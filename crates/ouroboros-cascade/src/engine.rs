//! Validation engine
//!
//! A [`Validator`] walks a value tree along the metadata built by its
//! factory. Per requested group it checks class constraints, then property
//! constraints, then follows cascades, converting groups on the way. Group
//! sequences are expanded in order and stop after the first member that
//! produced violations.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::trace;

use crate::cascading::{CascadingMetaData, ContainerCascadingMetaData};
use crate::config::ValidationConfig;
use crate::errors::{ConfigurationError, ConstraintViolation, ConstraintViolations, Error, Result};
use crate::extraction::{ValueExtractorManager, ValueReceiver};
use crate::metaconstraint::MetaConstraint;
use crate::metadata::{BeanMetaData, BeanMetaDataManager, MethodMetaData, PropertyMetaData};
use crate::path::{PropertyPath, COLLECTION_ELEMENT_NODE_NAME};
use crate::reflect::{names, ClassName, MethodDef, TypeRegistry};
use crate::types::{BeanValue, Value, NULL};

// ============================================================================
// Validator
// ============================================================================

/// Immutable state shared by every validator of one factory
#[derive(Debug)]
pub(crate) struct ValidatorState {
    pub(crate) manager: ValueExtractorManager,
    pub(crate) beans: BeanMetaDataManager,
    pub(crate) config: ValidationConfig,
}

impl ValidatorState {
    fn registry(&self) -> &TypeRegistry {
        self.manager.registry()
    }
}

/// Entry point for validation calls; cheap to clone and share across threads
#[derive(Debug, Clone)]
pub struct Validator {
    state: Arc<ValidatorState>,
}

impl Validator {
    pub(crate) fn new(state: Arc<ValidatorState>) -> Self {
        Self { state }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.state.config
    }

    /// Metadata of `class`, if it or a supertype declares anything
    pub fn bean_metadata(&self, class: &ClassName) -> Option<&Arc<BeanMetaData>> {
        self.state.beans.get(class)
    }

    /// Validate a bean and everything reachable through cascades
    ///
    /// An empty `groups` slice means `Default`.
    pub fn validate(&self, object: &Value, groups: &[ClassName]) -> Result<ConstraintViolations> {
        let bean = as_bean(object)?;
        let mut ctx = ValidationContext::new(&self.state, Some(bean.class.clone()));
        let mut path = PropertyPath::root();
        ctx.for_groups(None, groups, &mut |ctx, group| {
            ctx.validate_bean(object, &mut path, group)
        })?;
        Ok(ctx.finish())
    }

    /// Check the constraints of one property, without cascading
    pub fn validate_property(
        &self,
        object: &Value,
        property: &str,
        groups: &[ClassName],
    ) -> Result<ConstraintViolations> {
        let bean = as_bean(object)?;
        let mut ctx = ValidationContext::new(&self.state, Some(bean.class.clone()));
        let Some((meta, property)) = self.property_metadata(&bean.class, property)? else {
            return Ok(ctx.finish());
        };
        ctx.for_groups(Some(meta), groups, &mut |ctx, group| {
            ctx.check_property(object, meta, property, &mut PropertyPath::root(), group);
            Ok(())
        })?;
        Ok(ctx.finish())
    }

    /// Check the constraints `property` of `class` would apply to `value`
    pub fn validate_value(
        &self,
        class: &ClassName,
        property: &str,
        value: &Value,
        groups: &[ClassName],
    ) -> Result<ConstraintViolations> {
        self.state.registry().class(class)?;
        let mut ctx = ValidationContext::new(&self.state, Some(class.clone()));
        let Some((meta, property)) = self.property_metadata(class, property)? else {
            return Ok(ctx.finish());
        };
        let holder = Value::Bean(BeanValue::new(class.clone()).with(property.name(), value.clone()));
        ctx.for_groups(Some(meta), groups, &mut |ctx, group| {
            ctx.check_property(&holder, meta, property, &mut PropertyPath::root(), group);
            Ok(())
        })?;
        Ok(ctx.finish())
    }

    /// Check parameter and cross-parameter constraints of a call, cascading
    /// into marked arguments
    pub fn validate_parameters(
        &self,
        object: &Value,
        method: &str,
        arguments: &[Value],
        groups: &[ClassName],
    ) -> Result<ConstraintViolations> {
        let bean = as_bean(object)?;
        let def = self.method_def(&bean.class, method)?;
        if def.parameters.len() != arguments.len() {
            return Err(Error::ParameterCountMismatch {
                method: format!("{}.{}", bean.class, method),
                expected: def.parameters.len(),
                actual: arguments.len(),
            });
        }

        let mut ctx = ValidationContext::new(&self.state, Some(bean.class.clone()));
        let Some((meta, executable)) = self.method_metadata(&bean.class, method) else {
            return Ok(ctx.finish());
        };
        let holder = Value::object_array(names::OBJECT, arguments.iter().cloned());
        ctx.for_groups(Some(meta), groups, &mut |ctx, group| {
            ctx.validate_arguments(&holder, arguments, meta, executable, group)
        })?;
        Ok(ctx.finish())
    }

    /// Check return value constraints of a call, cascading if marked
    pub fn validate_return_value(
        &self,
        object: &Value,
        method: &str,
        return_value: &Value,
        groups: &[ClassName],
    ) -> Result<ConstraintViolations> {
        let bean = as_bean(object)?;
        self.method_def(&bean.class, method)?;

        let mut ctx = ValidationContext::new(&self.state, Some(bean.class.clone()));
        let Some((meta, executable)) = self.method_metadata(&bean.class, method) else {
            return Ok(ctx.finish());
        };
        ctx.for_groups(Some(meta), groups, &mut |ctx, group| {
            ctx.validate_return_value(return_value, meta, executable, group)
        })?;
        Ok(ctx.finish())
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    fn property_metadata(
        &self,
        class: &ClassName,
        property: &str,
    ) -> Result<Option<(&BeanMetaData, &PropertyMetaData)>> {
        let found = self
            .state
            .beans
            .get(class)
            .and_then(|meta| meta.property(property).map(|p| (meta.as_ref(), p)));
        if found.is_none() && !has_property(self.state.registry(), class, property) {
            return Err(Error::UnknownProperty {
                class: class.to_string(),
                property: property.to_string(),
            });
        }
        Ok(found)
    }

    fn method_def(&self, class: &ClassName, method: &str) -> Result<&MethodDef> {
        let registry = self.state.registry();
        registry
            .all_supertypes(class)
            .iter()
            .filter_map(|c| registry.get(c))
            .find_map(|def| def.method(method))
            .ok_or_else(|| Error::UnknownMethod {
                class: class.to_string(),
                method: method.to_string(),
            })
    }

    fn method_metadata(&self, class: &ClassName, method: &str) -> Option<(&BeanMetaData, &MethodMetaData)> {
        self.state
            .beans
            .get(class)
            .and_then(|meta| meta.method(method).map(|m| (meta.as_ref(), m)))
    }
}

fn as_bean(object: &Value) -> Result<&BeanValue> {
    object
        .as_bean()
        .ok_or_else(|| Error::NotABean(object.type_name().to_string()))
}

fn has_property(registry: &TypeRegistry, class: &ClassName, property: &str) -> bool {
    registry
        .all_supertypes(class)
        .iter()
        .filter_map(|c| registry.get(c))
        .any(|def| {
            def.field(property).is_some()
                || def
                    .methods
                    .iter()
                    .any(|m| m.property_name().as_deref() == Some(property))
        })
}

// ============================================================================
// Validation Context
// ============================================================================

type GroupUnit<'u, 's> = dyn FnMut(&mut ValidationContext<'s>, &ClassName) -> Result<()> + 'u;

/// Per-call accumulator
struct ValidationContext<'s> {
    state: &'s ValidatorState,
    root_bean_class: Option<ClassName>,
    default_group: ClassName,
    violations: ConstraintViolations,
    reported: HashSet<(String, String, String)>,
}

impl<'s> ValidationContext<'s> {
    fn new(state: &'s ValidatorState, root_bean_class: Option<ClassName>) -> Self {
        Self {
            state,
            root_bean_class,
            default_group: ClassName::new(names::DEFAULT_GROUP),
            violations: ConstraintViolations::new(),
            reported: HashSet::new(),
        }
    }

    fn finish(self) -> ConstraintViolations {
        self.violations
    }

    fn is_done(&self) -> bool {
        self.state.config.fail_fast && !self.violations.is_empty()
    }

    // ------------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------------

    /// Run `unit` once per effective group of the requested `groups`
    fn for_groups(
        &mut self,
        meta: Option<&'s BeanMetaData>,
        groups: &[ClassName],
        unit: &mut GroupUnit<'_, 's>,
    ) -> Result<()> {
        if groups.is_empty() {
            let default = self.default_group.clone();
            return self.in_group(meta, &default, unit, &mut Vec::new());
        }
        for group in groups {
            if self.is_done() {
                break;
            }
            self.in_group(meta, group, unit, &mut Vec::new())?;
        }
        Ok(())
    }

    /// Expand `group` if it is a sequence, or the redefined `Default` of
    /// `meta`'s class
    fn in_group(
        &mut self,
        meta: Option<&'s BeanMetaData>,
        group: &ClassName,
        unit: &mut GroupUnit<'_, 's>,
        expanding: &mut Vec<ClassName>,
    ) -> Result<()> {
        if expanding.contains(group) {
            return unit(self, group);
        }
        let Some(members) = self.sequence_members(meta, group) else {
            return unit(self, group);
        };

        expanding.push(group.clone());
        for member in members {
            let before = self.violations.len();
            self.in_group(meta, &member, unit, expanding)?;
            if self.is_done() || self.violations.len() > before {
                trace!(sequence = %group, member = %member, "group sequence stopped");
                break;
            }
        }
        expanding.pop();
        Ok(())
    }

    fn sequence_members(&self, meta: Option<&BeanMetaData>, group: &ClassName) -> Option<Vec<ClassName>> {
        if *group == self.default_group {
            let meta = meta?;
            let sequence = meta.default_group_sequence()?;
            return Some(
                sequence
                    .iter()
                    .map(|member| {
                        if member == meta.class() {
                            self.default_group.clone()
                        } else {
                            member.clone()
                        }
                    })
                    .collect(),
            );
        }
        self.state
            .registry()
            .group_sequence(group)
            .map(<[ClassName]>::to_vec)
    }

    fn in_scope(&self, constraint: &MetaConstraint, group: &ClassName) -> bool {
        constraint.descriptor().is_in_group(self.state.registry(), group)
    }

    // ------------------------------------------------------------------------
    // Beans
    // ------------------------------------------------------------------------

    /// Validate a bean reached at `path`, applying its own group sequence
    fn validate_bean(&mut self, value: &Value, path: &mut PropertyPath, group: &ClassName) -> Result<()> {
        let Some(bean) = value.as_bean() else {
            return Ok(());
        };
        let state = self.state;
        let Some(meta) = state.beans.get(&bean.class) else {
            return Ok(());
        };
        let meta: &'s BeanMetaData = meta;
        self.in_group(
            Some(meta),
            group,
            &mut |ctx, group| ctx.validate_bean_in_group(value, meta, path, group),
            &mut Vec::new(),
        )
    }

    fn validate_bean_in_group(
        &mut self,
        value: &Value,
        meta: &'s BeanMetaData,
        path: &mut PropertyPath,
        group: &ClassName,
    ) -> Result<()> {
        for constraint in meta.class_constraints() {
            if self.is_done() {
                return Ok(());
            }
            if self.in_scope(constraint, group) {
                self.check(constraint, value, path, Some(meta.class()));
            }
        }
        for property in meta.properties() {
            self.check_property(value, meta, property, path, group);
        }
        for property in meta.properties() {
            let cascading = property.cascading();
            if self.is_done() {
                return Ok(());
            }
            if !cascading.is_marked_for_cascading_on_annotated_object_or_container_elements() {
                continue;
            }
            let element = value
                .as_bean()
                .and_then(|bean| bean.property(property.name()))
                .unwrap_or(&NULL);
            let checkpoint = path.checkpoint();
            path.add_property_node(property.name());
            let result = self.cascade(element, cascading, path, group);
            path.restore(&checkpoint);
            result?;
        }
        Ok(())
    }

    fn check_property(
        &mut self,
        holder: &Value,
        meta: &BeanMetaData,
        property: &PropertyMetaData,
        path: &mut PropertyPath,
        group: &ClassName,
    ) {
        for constraint in property.constraints() {
            if self.is_done() {
                break;
            }
            if self.in_scope(constraint, group) {
                self.check(constraint, holder, path, Some(meta.class()));
            }
        }
    }

    // ------------------------------------------------------------------------
    // Methods
    // ------------------------------------------------------------------------

    fn validate_arguments(
        &mut self,
        holder: &Value,
        arguments: &[Value],
        meta: &'s BeanMetaData,
        executable: &'s MethodMetaData,
        group: &ClassName,
    ) -> Result<()> {
        let mut path = PropertyPath::root();
        path.add_method_node(executable.name());

        let constraints = executable
            .parameters()
            .iter()
            .flat_map(|p| p.constraints())
            .chain(executable.cross_parameter_constraints());
        for constraint in constraints {
            if self.is_done() {
                return Ok(());
            }
            if self.in_scope(constraint, group) {
                self.check(constraint, holder, &mut path, Some(meta.class()));
            }
        }

        for parameter in executable.parameters() {
            let cascading = parameter.cascading();
            if self.is_done() {
                return Ok(());
            }
            if !cascading.is_marked_for_cascading_on_annotated_object_or_container_elements() {
                continue;
            }
            let argument = arguments.get(parameter.index()).unwrap_or(&NULL);
            let checkpoint = path.checkpoint();
            path.add_parameter_node(parameter.name(), parameter.index());
            let result = self.cascade(argument, cascading, &mut path, group);
            path.restore(&checkpoint);
            result?;
        }
        Ok(())
    }

    fn validate_return_value(
        &mut self,
        return_value: &Value,
        meta: &'s BeanMetaData,
        executable: &'s MethodMetaData,
        group: &ClassName,
    ) -> Result<()> {
        let mut path = PropertyPath::root();
        path.add_method_node(executable.name());

        for constraint in executable.return_value_constraints() {
            if self.is_done() {
                return Ok(());
            }
            if self.in_scope(constraint, group) {
                self.check(constraint, return_value, &mut path, Some(meta.class()));
            }
        }

        let cascading = executable.return_value_cascading();
        if !self.is_done()
            && cascading.is_marked_for_cascading_on_annotated_object_or_container_elements()
        {
            path.add_return_value_node();
            self.cascade(return_value, cascading, &mut path, group)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Constraint Checks
    // ------------------------------------------------------------------------

    /// Evaluate one constraint against every value it targets in `holder`
    fn check(
        &mut self,
        constraint: &MetaConstraint,
        holder: &Value,
        path: &mut PropertyPath,
        leaf_bean_class: Option<&ClassName>,
    ) {
        let location = constraint.location();
        let value = location.get_value(holder);
        let validator = constraint.validator();

        let checkpoint = path.checkpoint();
        location.append_to(path);
        let mut failures = Vec::new();
        constraint.for_each_target(value, path, &mut |target_path, target| {
            if !validator.is_valid(target) {
                failures.push((target_path.clone(), target.clone()));
            }
        });
        path.restore(&checkpoint);

        for (property_path, invalid_value) in failures {
            if self.is_done() {
                break;
            }
            self.report(constraint, property_path, invalid_value, leaf_bean_class);
        }
    }

    fn report(
        &mut self,
        constraint: &MetaConstraint,
        property_path: PropertyPath,
        invalid_value: Value,
        leaf_bean_class: Option<&ClassName>,
    ) {
        let message = constraint.descriptor().message();
        let name = constraint.descriptor().name().to_string();
        let key = (property_path.to_string(), name.clone(), message.clone());
        if !self.reported.insert(key) {
            return;
        }
        trace!(path = %property_path, constraint = %name, "constraint violated");
        self.violations.add(ConstraintViolation {
            message,
            constraint: name,
            property_path,
            invalid_value,
            root_bean_class: self.root_bean_class.clone(),
            leaf_bean_class: leaf_bean_class.cloned(),
        });
    }

    // ------------------------------------------------------------------------
    // Cascades
    // ------------------------------------------------------------------------

    /// Follow the cascade markers of an element holding `value`
    fn cascade(
        &mut self,
        value: &Value,
        cascading: &CascadingMetaData,
        path: &mut PropertyPath,
        group: &ClassName,
    ) -> Result<()> {
        let Some(runtime) = value.runtime_class() else {
            return Ok(());
        };
        if let CascadingMetaData::Container(container) = cascading {
            return self.cascade_container(value, container, path, group);
        }
        if !cascading.is_cascading() {
            return Ok(());
        }
        let state = self.state;
        let discovered =
            cascading.runtime_container(&state.manager, &runtime, state.config.legacy_runtime_containers)?;
        match discovered {
            Some(container) => {
                trace!(element = %path, container = %runtime, "cascading into runtime container");
                self.cascade_container(value, &container, path, group)
            }
            None => self.validate_bean(value, path, &cascading.convert_group(group)),
        }
    }

    fn cascade_container(
        &mut self,
        value: &Value,
        container: &ContainerCascadingMetaData,
        path: &mut PropertyPath,
        group: &ClassName,
    ) -> Result<()> {
        if container.is_cascading() {
            self.validate_bean(value, path, &container.convert_group(group))?;
        }
        for element in container.container_element_metadata() {
            if self.is_done() {
                break;
            }
            if element.is_marked_for_cascading_on_annotated_object_or_container_elements() {
                self.cascade_elements(value, element, path, group)?;
            }
        }
        Ok(())
    }

    /// Extract the elements in `element`'s slot of `container` and cascade
    /// into each
    fn cascade_elements(
        &mut self,
        container: &Value,
        element: &ContainerCascadingMetaData,
        path: &mut PropertyPath,
        group: &ClassName,
    ) -> Result<()> {
        let Some(runtime) = container.runtime_class() else {
            return Ok(());
        };
        let extractor = self
            .state
            .manager
            .resolve_by_runtime_type_and_parameter(
                element.enclosing_type(),
                element.type_parameter(),
                &runtime,
                element.value_extractor_candidates(),
            )?
            .ok_or_else(|| ConfigurationError::no_value_extractor(&runtime, element.type_parameter()))?;

        let mut receiver = CascadeReceiver {
            ctx: self,
            element,
            path,
            group,
            error: None,
        };
        extractor.extract_values(container, &mut receiver);
        match receiver.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Cascade Receiver
// ============================================================================

enum Position<'v> {
    Wrapped,
    Iterable,
    Indexed(usize),
    Keyed(&'v Value),
}

struct CascadeReceiver<'c, 's, 'p> {
    ctx: &'c mut ValidationContext<'s>,
    element: &'c ContainerCascadingMetaData,
    path: &'p mut PropertyPath,
    group: &'c ClassName,
    error: Option<Error>,
}

impl CascadeReceiver<'_, '_, '_> {
    fn descend(&mut self, position: Position<'_>, node_name: Option<&str>, value: &Value) {
        if self.error.is_some() || self.ctx.is_done() || value.is_null() {
            return;
        }
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

        if let Err(error) = self.visit(node_name, value) {
            self.error = Some(error);
        }
        self.path.restore(&checkpoint);
    }

    fn visit(&mut self, node_name: Option<&str>, value: &Value) -> Result<()> {
        if self.element.is_cascading() {
            let group = self.element.convert_group(self.group);
            self.ctx.validate_bean(value, self.path, &group)?;
        }
        if !self.element.has_container_elements_marked_for_cascading() {
            return Ok(());
        }
        if let Some(name) = node_name {
            self.path.add_container_element_node(name);
        }
        for nested in self.element.container_element_metadata() {
            if nested.is_marked_for_cascading_on_annotated_object_or_container_elements() {
                self.ctx.cascade_elements(value, nested, self.path, self.group)?;
            }
        }
        Ok(())
    }
}

impl ValueReceiver for CascadeReceiver<'_, '_, '_> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{ConstraintDescriptor, ConstraintKind};
    use crate::factory::ValidatorFactory;
    use crate::metadata::ConstrainedElement;
    use crate::reflect::ClassDef;

    fn validator() -> Validator {
        let mut registry = TypeRegistry::new();
        registry.define(ClassDef::interface("Strict")).unwrap();
        registry.define(ClassDef::interface("Extra")).unwrap();
        registry
            .define(ClassDef::interface("Checks").group_sequence(["Default", "Strict"]))
            .unwrap();
        registry
            .define(ClassDef::interface("AllChecks").group_sequence(["Checks", "Extra"]))
            .unwrap();
        registry
            .define(
                ClassDef::builder("Account")
                    .field("id", "String")
                    .group_sequence(["Account", "Strict"]),
            )
            .unwrap();
        ValidatorFactory::builder(registry)
            .element(ConstrainedElement::field("Account", "id").constraint(
                ConstraintDescriptor::new(ConstraintKind::NotNull).with_groups(["Strict"]),
            ))
            .build()
            .unwrap()
            .validator()
    }

    fn violation(path: &str) -> ConstraintViolation {
        let mut property_path = PropertyPath::root();
        property_path.add_property_node(path);
        ConstraintViolation {
            message: "must not be null".to_string(),
            constraint: "NotNull".to_string(),
            property_path,
            invalid_value: Value::Null,
            root_bean_class: None,
            leaf_bean_class: None,
        }
    }

    /// Groups `unit` ran for, failing in the groups named by `failing`
    fn expand(
        validator: &Validator,
        meta: Option<&BeanMetaData>,
        groups: &[&str],
        failing: &[&str],
    ) -> Vec<String> {
        let groups: Vec<ClassName> = groups.iter().map(|g| ClassName::new(*g)).collect();
        let mut ctx = ValidationContext::new(&validator.state, None);
        let mut visited = Vec::new();
        ctx.for_groups(meta, &groups, &mut |ctx, group| {
            visited.push(group.to_string());
            if failing.contains(&group.as_str()) {
                ctx.violations.add(violation(group.as_str()));
            }
            Ok(())
        })
        .unwrap();
        visited
    }

    #[test]
    fn test_plain_groups_run_once_each() {
        let validator = validator();
        assert_eq!(expand(&validator, None, &[], &[]), vec!["Default"]);
        assert_eq!(
            expand(&validator, None, &["Strict", "Extra"], &["Strict"]),
            vec!["Strict", "Extra"]
        );
    }

    #[test]
    fn test_sequence_expands_nested_sequences_in_order() {
        let validator = validator();
        assert_eq!(
            expand(&validator, None, &["AllChecks"], &[]),
            vec!["Default", "Strict", "Extra"]
        );
    }

    #[test]
    fn test_sequence_stops_after_failing_member() {
        let validator = validator();
        assert_eq!(
            expand(&validator, None, &["Checks"], &["Default"]),
            vec!["Default"]
        );
        assert_eq!(
            expand(&validator, None, &["AllChecks"], &["Strict"]),
            vec!["Default", "Strict"]
        );
    }

    #[test]
    fn test_redefined_default_maps_class_to_default() {
        let validator = validator();
        let account = ClassName::new("Account");
        let meta = validator.bean_metadata(&account).unwrap().as_ref();

        assert_eq!(
            expand(&validator, Some(meta), &[], &[]),
            vec!["Default", "Strict"]
        );
        assert_eq!(
            expand(&validator, Some(meta), &["Default"], &["Default"]),
            vec!["Default"]
        );
        // Without bean metadata Default is a plain group
        assert_eq!(expand(&validator, None, &["Default"], &[]), vec!["Default"]);
    }

    #[test]
    fn test_redefined_default_end_to_end() {
        let validator = validator();
        let account = Value::from(BeanValue::new("Account"));
        let violations = validator.validate(&account, &[]).unwrap();
        assert_eq!(violations.paths(), vec!["id".to_string()]);
        assert_eq!(violations.as_slice()[0].root_bean_class, Some(ClassName::new("Account")));
    }
}
