//! Class, type parameter and generic type descriptions

use std::fmt;
use std::sync::Arc;

use crate::errors::ConfigResult;

use super::parse::parse_type;

// ============================================================================
// Class Names
// ============================================================================

/// Interned name of a registered class
///
/// Array classes are written with a `[]` suffix (`int[]`, `Order[]`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName(Arc<str>);

impl ClassName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_array(&self) -> bool {
        self.0.ends_with("[]")
    }

    /// Component class of an array class
    pub fn component(&self) -> Option<ClassName> {
        self.0.strip_suffix("[]").map(ClassName::new)
    }

    pub fn array_of(component: &ClassName) -> Self {
        Self::new(format!("{}[]", component))
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl From<&str> for ClassName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ClassName {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&ClassName> for ClassName {
    fn from(name: &ClassName) -> Self {
        name.clone()
    }
}

/// Well-known class names used by the built-in registry
pub mod names {
    pub const OBJECT: &str = "Object";
    pub const OBJECT_ARRAY: &str = "Object[]";
    pub const ITERABLE: &str = "Iterable";
    pub const COLLECTION: &str = "Collection";
    pub const LIST: &str = "List";
    pub const ARRAY_LIST: &str = "ArrayList";
    pub const SET: &str = "Set";
    pub const HASH_SET: &str = "HashSet";
    pub const MAP: &str = "Map";
    pub const HASH_MAP: &str = "HashMap";
    pub const OPTIONAL: &str = "Optional";
    pub const CHAR_SEQUENCE: &str = "CharSequence";
    pub const STRING: &str = "String";
    pub const NUMBER: &str = "Number";
    pub const BOOLEAN: &str = "Boolean";
    pub const BYTE: &str = "Byte";
    pub const SHORT: &str = "Short";
    pub const INTEGER: &str = "Integer";
    pub const LONG: &str = "Long";
    pub const FLOAT: &str = "Float";
    pub const DOUBLE: &str = "Double";
    pub const CHARACTER: &str = "Character";
    pub const DEFAULT_GROUP: &str = "Default";

    /// Primitive names paired with their boxed class
    pub const PRIMITIVES: &[(&str, &str)] = &[
        ("boolean", BOOLEAN),
        ("byte", BYTE),
        ("short", SHORT),
        ("int", INTEGER),
        ("long", LONG),
        ("float", FLOAT),
        ("double", DOUBLE),
        ("char", CHARACTER),
    ];
}

/// Boxed class for a primitive name, `None` for reference types
pub fn boxed(name: &str) -> Option<&'static str> {
    names::PRIMITIVES
        .iter()
        .find(|(primitive, _)| *primitive == name)
        .map(|(_, boxed)| *boxed)
}

// ============================================================================
// Type Parameters and Slots
// ============================================================================

/// A type variable declared by a generic class (e.g. `E` of `List<E>`)
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeParameter {
    pub declaring: ClassName,
    pub index: usize,
    pub name: Arc<str>,
}

impl TypeParameter {
    pub fn new(declaring: impl Into<ClassName>, index: usize, name: impl AsRef<str>) -> Self {
        Self {
            declaring: declaring.into(),
            index,
            name: Arc::from(name.as_ref()),
        }
    }
}

impl fmt::Display for TypeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}>", self.declaring, self.name)
    }
}

impl fmt::Debug for TypeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Which generic position a piece of metadata applies to
///
/// The two sentinels stand for "the annotated value itself" and "the
/// component of an array"; neither is bound through inheritance.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeParameterSlot {
    AnnotatedObject,
    ArrayElement,
    Declared(TypeParameter),
}

impl TypeParameterSlot {
    pub fn declared(declaring: impl Into<ClassName>, index: usize, name: impl AsRef<str>) -> Self {
        Self::Declared(TypeParameter::new(declaring, index, name))
    }

    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Self::Declared(_))
    }

    pub fn as_declared(&self) -> Option<&TypeParameter> {
        match self {
            Self::Declared(parameter) => Some(parameter),
            _ => None,
        }
    }

    /// Position of the slot within its declaring class
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Declared(parameter) => Some(parameter.index),
            Self::ArrayElement => Some(0),
            Self::AnnotatedObject => None,
        }
    }
}

impl fmt::Display for TypeParameterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnnotatedObject => f.write_str("<annotated object>"),
            Self::ArrayElement => f.write_str("<array element>"),
            Self::Declared(parameter) => write!(f, "{}", parameter),
        }
    }
}

impl fmt::Debug for TypeParameterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

// ============================================================================
// Generic Types
// ============================================================================

/// A possibly parameterized type as written in a declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenericType {
    Primitive(ClassName),
    Class {
        name: ClassName,
        args: Vec<GenericType>,
    },
    Array(Box<GenericType>),
    Var(TypeParameter),
    Wildcard(Option<Box<GenericType>>),
}

impl GenericType {
    /// Raw (unparameterized) class type
    pub fn class(name: impl Into<ClassName>) -> Self {
        Self::Class {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn parameterized(name: impl Into<ClassName>, args: Vec<GenericType>) -> Self {
        Self::Class {
            name: name.into(),
            args,
        }
    }

    pub fn object() -> Self {
        Self::class(names::OBJECT)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Erased class of this type
    pub fn erasure(&self) -> ClassName {
        match self {
            Self::Primitive(name) | Self::Class { name, .. } => name.clone(),
            Self::Array(component) => ClassName::array_of(&component.erasure()),
            Self::Var(_) => ClassName::new(names::OBJECT),
            Self::Wildcard(upper) => upper
                .as_ref()
                .map(|bound| bound.erasure())
                .unwrap_or_else(|| ClassName::new(names::OBJECT)),
        }
    }

    /// Erased class with primitives replaced by their box
    pub fn boxed_erasure(&self) -> ClassName {
        match self {
            Self::Primitive(name) => boxed(name.as_str())
                .map(ClassName::new)
                .unwrap_or_else(|| name.clone()),
            other => other.erasure(),
        }
    }

    pub fn type_arguments(&self) -> &[GenericType] {
        match self {
            Self::Class { args, .. } => args,
            _ => &[],
        }
    }

    /// Replace type variables using `lookup`
    pub(crate) fn substitute(&self, lookup: &dyn Fn(&TypeParameter) -> Option<GenericType>) -> Self {
        match self {
            Self::Var(parameter) => lookup(parameter).unwrap_or_else(|| self.clone()),
            Self::Class { name, args } => Self::Class {
                name: name.clone(),
                args: args.iter().map(|arg| arg.substitute(lookup)).collect(),
            },
            Self::Array(component) => Self::Array(Box::new(component.substitute(lookup))),
            Self::Wildcard(Some(bound)) => Self::Wildcard(Some(Box::new(bound.substitute(lookup)))),
            Self::Primitive(_) | Self::Wildcard(None) => self.clone(),
        }
    }
}

impl fmt::Display for GenericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(name) => write!(f, "{}", name),
            Self::Class { name, args } if args.is_empty() => write!(f, "{}", name),
            Self::Class { name, args } => {
                write!(f, "{}<", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(">")
            }
            Self::Array(component) => write!(f, "{}[]", component),
            Self::Var(parameter) => write!(f, "{}", parameter.name),
            Self::Wildcard(None) => f.write_str("?"),
            Self::Wildcard(Some(bound)) => write!(f, "? extends {}", bound),
        }
    }
}

// ============================================================================
// Class Definitions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    Primitive,
    Array,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub ty: GenericType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDef {
    pub name: String,
    pub ty: GenericType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    pub name: String,
    pub parameters: Vec<ParameterDef>,
    /// `None` for methods without a return value
    pub return_type: Option<GenericType>,
}

impl MethodDef {
    /// Property name for `getX` / `isX` accessors without parameters
    pub fn property_name(&self) -> Option<String> {
        if !self.parameters.is_empty() || self.return_type.is_none() {
            return None;
        }
        let rest = self
            .name
            .strip_prefix("get")
            .or_else(|| self.name.strip_prefix("is"))?;
        let mut chars = rest.chars();
        let first = chars.next()?;
        if !first.is_uppercase() {
            return None;
        }
        Some(first.to_lowercase().chain(chars).collect())
    }
}

/// Registry entry describing one class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: ClassName,
    pub kind: ClassKind,
    pub type_params: Vec<TypeParameter>,
    /// Parameterized direct supertypes, in declaration order
    pub supertypes: Vec<GenericType>,
    pub fields: Vec<FieldDef>,
    pub methods: Vec<MethodDef>,
    /// Members of a group sequence, when this class is one
    pub group_sequence: Option<Vec<ClassName>>,
}

impl ClassDef {
    pub fn builder(name: impl Into<ClassName>) -> ClassDefBuilder {
        ClassDefBuilder::new(name.into(), ClassKind::Class)
    }

    pub fn interface(name: impl Into<ClassName>) -> ClassDefBuilder {
        ClassDefBuilder::new(name.into(), ClassKind::Interface)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodDef> {
        self.methods.iter().find(|method| method.name == name)
    }

    pub fn is_group_sequence(&self) -> bool {
        self.group_sequence.is_some()
    }

    /// The class seen as a type, with its own variables as arguments
    pub fn as_generic_type(&self) -> GenericType {
        GenericType::Class {
            name: self.name.clone(),
            args: self
                .type_params
                .iter()
                .cloned()
                .map(GenericType::Var)
                .collect(),
        }
    }
}

/// Builds a [`ClassDef`] from type expressions
///
/// Expressions are parsed on [`ClassDefBuilder::build`] so that they may
/// reference the class's own type variables.
#[derive(Debug, Clone)]
pub struct ClassDefBuilder {
    name: ClassName,
    kind: ClassKind,
    type_params: Vec<String>,
    supertypes: Vec<String>,
    fields: Vec<(String, String)>,
    methods: Vec<(String, Vec<String>, Option<String>)>,
    group_sequence: Option<Vec<ClassName>>,
}

impl ClassDefBuilder {
    fn new(name: ClassName, kind: ClassKind) -> Self {
        Self {
            name,
            kind,
            type_params: Vec::new(),
            supertypes: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            group_sequence: None,
        }
    }

    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    /// Add a direct supertype, e.g. `extends("ArrayList<T>")`
    pub fn extends(mut self, supertype: impl Into<String>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.fields.push((name.into(), ty.into()));
        self
    }

    /// Add an accessor method, e.g. `getter("getName", "String")`
    pub fn getter(mut self, name: impl Into<String>, return_type: impl Into<String>) -> Self {
        self.methods
            .push((name.into(), Vec::new(), Some(return_type.into())));
        self
    }

    /// Add a method; parameters are named `arg0`, `arg1`, ...
    pub fn method<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        parameters: impl IntoIterator<Item = S>,
        return_type: Option<&str>,
    ) -> Self {
        self.methods.push((
            name.into(),
            parameters.into_iter().map(Into::into).collect(),
            return_type.map(str::to_string),
        ));
        self
    }

    /// Mark this type as a group sequence
    ///
    /// On a bean class whose sequence contains the class itself, the
    /// sequence redefines the class's `Default` group.
    pub fn group_sequence<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ClassName>,
    {
        self.group_sequence = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> ConfigResult<ClassDef> {
        let type_params: Vec<TypeParameter> = self
            .type_params
            .iter()
            .enumerate()
            .map(|(index, name)| TypeParameter::new(self.name.clone(), index, name))
            .collect();

        let parse = |expression: &str| parse_type(expression, &type_params);

        let supertypes = self
            .supertypes
            .iter()
            .map(|s| parse(s))
            .collect::<ConfigResult<Vec<_>>>()?;

        let fields = self
            .fields
            .iter()
            .map(|(name, ty)| {
                Ok(FieldDef {
                    name: name.clone(),
                    ty: parse(ty)?,
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        let methods = self
            .methods
            .iter()
            .map(|(name, parameters, return_type)| {
                let parameters = parameters
                    .iter()
                    .enumerate()
                    .map(|(i, ty)| {
                        Ok(ParameterDef {
                            name: format!("arg{}", i),
                            ty: parse(ty)?,
                        })
                    })
                    .collect::<ConfigResult<Vec<_>>>()?;
                let return_type = return_type.as_deref().map(|ty| parse(ty)).transpose()?;
                Ok(MethodDef {
                    name: name.clone(),
                    parameters,
                    return_type,
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(ClassDef {
            name: self.name,
            kind: self.kind,
            type_params,
            supertypes,
            fields,
            methods,
            group_sequence: self.group_sequence,
        })
    }
}
