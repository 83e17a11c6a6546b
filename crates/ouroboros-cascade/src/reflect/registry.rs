//! Class registry, assignability and type-variable bindings

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::errors::{ConfigResult, ConfigurationError};

use super::class::{
    names, ClassDef, ClassDefBuilder, ClassKind, ClassName, GenericType, TypeParameter,
    TypeParameterSlot,
};

// ============================================================================
// Built-in Classes
// ============================================================================

static BUILTIN_CLASSES: Lazy<Vec<Arc<ClassDef>>> = Lazy::new(|| {
    let interface = ClassDef::interface;
    let class = ClassDef::builder;
    let mut builders: Vec<ClassDefBuilder> = vec![
        class(names::OBJECT),
        interface(names::ITERABLE).type_param("T"),
        interface(names::COLLECTION)
            .type_param("E")
            .extends("Iterable<E>"),
        interface(names::LIST).type_param("E").extends("Collection<E>"),
        class(names::ARRAY_LIST).type_param("E").extends("List<E>"),
        interface(names::SET).type_param("E").extends("Collection<E>"),
        class(names::HASH_SET).type_param("E").extends("Set<E>"),
        interface(names::MAP).type_param("K").type_param("V"),
        class(names::HASH_MAP)
            .type_param("K")
            .type_param("V")
            .extends("Map<K, V>"),
        class(names::OPTIONAL).type_param("T"),
        interface(names::CHAR_SEQUENCE),
        class(names::STRING).extends(names::CHAR_SEQUENCE),
        class(names::NUMBER),
        class(names::BOOLEAN),
        class(names::CHARACTER),
        interface(names::DEFAULT_GROUP),
    ];
    for number in [
        names::BYTE,
        names::SHORT,
        names::INTEGER,
        names::LONG,
        names::FLOAT,
        names::DOUBLE,
    ] {
        builders.push(class(number).extends(names::NUMBER));
    }

    let mut classes: Vec<Arc<ClassDef>> = builders
        .into_iter()
        .map(|builder| {
            Arc::new(
                builder
                    .build()
                    .expect("built-in class declarations are well formed"),
            )
        })
        .collect();

    for (primitive, _) in names::PRIMITIVES {
        classes.push(Arc::new(ClassDef {
            name: ClassName::new(primitive),
            kind: ClassKind::Primitive,
            type_params: Vec::new(),
            supertypes: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            group_sequence: None,
        }));
    }
    classes
});

// ============================================================================
// Type Variable Bindings
// ============================================================================

/// For one class, how its own type variables map onto each supertype's
///
/// For `ArrayList<E>` the entry for `List` maps `ArrayList<E>` to `List<E>`.
/// Variables bound to concrete types along the way have no entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeVariableBindings {
    by_supertype: HashMap<ClassName, HashMap<TypeParameter, TypeParameter>>,
}

impl TypeVariableBindings {
    pub fn get(&self, supertype: &ClassName) -> Option<&HashMap<TypeParameter, TypeParameter>> {
        self.by_supertype.get(supertype)
    }

    /// Variable of `supertype` that `parameter` is bound to
    pub fn bind(&self, supertype: &ClassName, parameter: &TypeParameter) -> Option<&TypeParameter> {
        self.by_supertype
            .get(supertype)
            .and_then(|bindings| bindings.get(parameter))
    }

    /// Variable of the root class bound to `parameter` of `supertype`
    pub fn reverse_bind(
        &self,
        supertype: &ClassName,
        parameter: &TypeParameter,
    ) -> Option<&TypeParameter> {
        self.by_supertype.get(supertype).and_then(|bindings| {
            bindings
                .iter()
                .filter(|(_, bound)| *bound == parameter)
                .map(|(own, _)| own)
                .min()
        })
    }
}

// ============================================================================
// Type Registry
// ============================================================================

/// All classes known to a validator factory
///
/// Starts with the built-in collection, wrapper and boxed scalar classes.
/// Immutable once handed to a factory; binding tables are computed lazily
/// and cached.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    classes: HashMap<ClassName, Arc<ClassDef>>,
    order: Vec<ClassName>,
    bindings: DashMap<ClassName, Arc<TypeVariableBindings>>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            classes: HashMap::new(),
            order: Vec::new(),
            bindings: DashMap::new(),
        };
        for def in BUILTIN_CLASSES.iter() {
            registry.order.push(def.name.clone());
            registry.classes.insert(def.name.clone(), Arc::clone(def));
        }
        registry
    }

    /// Register a class; its supertypes must already be known
    pub fn register(&mut self, def: ClassDef) -> ConfigResult<()> {
        for supertype in &def.supertypes {
            let erased = supertype.erasure();
            if erased != def.name && !self.contains(&erased) {
                return Err(ConfigurationError::UnknownType(erased.to_string()));
            }
        }
        debug!(class = %def.name, "registering class");
        if !self.classes.contains_key(&def.name) {
            self.order.push(def.name.clone());
        }
        self.classes.insert(def.name.clone(), Arc::new(def));
        self.bindings.clear();
        Ok(())
    }

    /// Build and register in one step
    pub fn define(&mut self, builder: ClassDefBuilder) -> ConfigResult<()> {
        self.register(builder.build()?)
    }

    pub fn get(&self, name: &ClassName) -> Option<&Arc<ClassDef>> {
        self.classes.get(name)
    }

    pub fn class(&self, name: &ClassName) -> ConfigResult<&Arc<ClassDef>> {
        self.get(name)
            .ok_or_else(|| ConfigurationError::UnknownType(name.to_string()))
    }

    /// Known class, or an array of a known class
    pub fn contains(&self, name: &ClassName) -> bool {
        match name.component() {
            Some(component) => self.contains(&component),
            None => self.classes.contains_key(name),
        }
    }

    /// Classes in registration order
    pub fn classes(&self) -> impl Iterator<Item = &Arc<ClassDef>> {
        self.order.iter().filter_map(|name| self.classes.get(name))
    }

    pub fn is_primitive(&self, name: &ClassName) -> bool {
        self.get(name)
            .map(|def| def.kind == ClassKind::Primitive)
            .unwrap_or(false)
    }

    pub fn group_sequence(&self, name: &ClassName) -> Option<&[ClassName]> {
        self.get(name).and_then(|def| def.group_sequence.as_deref())
    }

    pub fn is_group_sequence(&self, name: &ClassName) -> bool {
        self.group_sequence(name).is_some()
    }

    /// The class itself followed by every supertype, breadth first
    pub fn all_supertypes(&self, name: &ClassName) -> Vec<ClassName> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        let mut queue = VecDeque::from([name.clone()]);
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(def) = self.get(&current) {
                queue.extend(def.supertypes.iter().map(GenericType::erasure));
            }
            result.push(current);
        }
        result
    }

    /// Whether a value of class `source` can be used where `target` is declared
    pub fn is_assignable(&self, target: &ClassName, source: &ClassName) -> bool {
        if target == source {
            return true;
        }
        if self.is_primitive(target) || self.is_primitive(source) {
            return false;
        }
        let object = target.as_str() == names::OBJECT;
        match (target.component(), source.component()) {
            (_, Some(_)) if object => true,
            (Some(target_component), Some(source_component)) => {
                !self.is_primitive(&target_component)
                    && !self.is_primitive(&source_component)
                    && self.is_assignable(&target_component, &source_component)
            }
            (Some(_), None) | (None, Some(_)) => false,
            (None, None) => object || self.all_supertypes(source).contains(target),
        }
    }

    /// Cached binding table of `name`'s type variables onto its supertypes
    pub fn type_variable_bindings(&self, name: &ClassName) -> Arc<TypeVariableBindings> {
        if let Some(cached) = self.bindings.get(name) {
            return cached.value().clone();
        }
        let computed = Arc::new(self.compute_bindings(name));
        self.bindings.insert(name.clone(), Arc::clone(&computed));
        computed
    }

    fn compute_bindings(&self, name: &ClassName) -> TypeVariableBindings {
        let mut bindings = TypeVariableBindings::default();
        let Some(root) = self.get(name) else {
            return bindings;
        };

        let identity: HashMap<TypeParameter, GenericType> = root
            .type_params
            .iter()
            .map(|p| (p.clone(), GenericType::Var(p.clone())))
            .collect();
        let mut queue = VecDeque::from([(Arc::clone(root), identity)]);

        while let Some((def, substitution)) = queue.pop_front() {
            if bindings.by_supertype.contains_key(&def.name) {
                continue;
            }
            let own: HashMap<TypeParameter, TypeParameter> = def
                .type_params
                .iter()
                .filter_map(|p| match substitution.get(p) {
                    Some(GenericType::Var(root_var)) => Some((root_var.clone(), p.clone())),
                    _ => None,
                })
                .collect();
            bindings.by_supertype.insert(def.name.clone(), own);

            for supertype in &def.supertypes {
                let Some(super_def) = self.get(&supertype.erasure()) else {
                    continue;
                };
                let resolved = supertype.substitute(&|p| substitution.get(p).cloned());
                let next: HashMap<TypeParameter, GenericType> = super_def
                    .type_params
                    .iter()
                    .zip(resolved.type_arguments().iter())
                    .map(|(p, arg)| (p.clone(), arg.clone()))
                    .collect();
                queue.push_back((Arc::clone(super_def), next));
            }
        }
        bindings
    }

    /// `ty` viewed as its supertype `target`, with arguments substituted
    pub fn as_supertype(&self, ty: &GenericType, target: &ClassName) -> Option<GenericType> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([ty.clone()]);
        while let Some(current) = queue.pop_front() {
            let erased = current.erasure();
            if &erased == target {
                return Some(current);
            }
            if !seen.insert(erased.clone()) {
                continue;
            }
            let Some(def) = self.get(&erased) else {
                continue;
            };
            let args = current.type_arguments();
            let substitution: HashMap<&TypeParameter, &GenericType> =
                def.type_params.iter().zip(args.iter()).collect();
            for supertype in &def.supertypes {
                queue.push_back(supertype.substitute(&|p| substitution.get(p).map(|t| (*t).clone())));
            }
        }
        None
    }

    /// Slot and declared type of the `index`-th type argument of `ty`
    pub fn resolve_type_argument(
        &self,
        ty: &GenericType,
        index: usize,
    ) -> ConfigResult<(TypeParameterSlot, GenericType)> {
        let out_of_bounds = || ConfigurationError::TypeArgumentOutOfBounds {
            type_name: ty.to_string(),
            index,
        };
        match ty {
            GenericType::Array(component) if index == 0 => {
                Ok((TypeParameterSlot::ArrayElement, (**component).clone()))
            }
            GenericType::Class { name, args } => {
                let def = self.class(name)?;
                let parameter = def.type_params.get(index).ok_or_else(out_of_bounds)?;
                let argument = args
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| GenericType::Var(parameter.clone()));
                Ok((TypeParameterSlot::Declared(parameter.clone()), argument))
            }
            _ => Err(out_of_bounds()),
        }
    }

    /// Declared type held in `slot` of a value declared as `ty`
    pub fn type_argument_for_slot(&self, ty: &GenericType, slot: &TypeParameterSlot) -> GenericType {
        match slot {
            TypeParameterSlot::AnnotatedObject => ty.clone(),
            TypeParameterSlot::ArrayElement => match ty {
                GenericType::Array(component) => (**component).clone(),
                _ => GenericType::object(),
            },
            TypeParameterSlot::Declared(parameter) => self
                .as_supertype(ty, &parameter.declaring)
                .and_then(|view| view.type_arguments().get(parameter.index).cloned())
                .unwrap_or_else(GenericType::object),
        }
    }
}
