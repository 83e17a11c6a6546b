//! Type model
//!
//! An explicit registry of classes replaces runtime reflection: generic
//! declarations, parameterized supertypes, fields and methods are described
//! once and queried by the metadata and extraction layers.

mod class;
mod parse;
mod registry;

pub use class::{
    boxed, names, ClassDef, ClassDefBuilder, ClassKind, ClassName, FieldDef, GenericType,
    MethodDef, ParameterDef, TypeParameter, TypeParameterSlot,
};
pub use parse::parse_type;
pub use registry::{TypeRegistry, TypeVariableBindings};
