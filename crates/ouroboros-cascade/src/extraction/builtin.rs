//! Built-in value extractors
//!
//! Current extractors leave the node name empty where the element has no
//! natural name; the legacy set reports every element as
//! `<collection element>`. Legacy extractors are not registered in the
//! manager's main table and are only used for runtime collection support.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::path::{COLLECTION_ELEMENT_NODE_NAME, MAP_KEY_NODE_NAME};
use crate::reflect::{names, TypeParameterSlot};
use crate::types::{ArrayValue, Value, NULL};

use super::{ValueExtractor, ValueExtractorDescriptor, ValueReceiver};

// ============================================================================
// Arrays
// ============================================================================

macro_rules! primitive_array_extractor {
    ($extractor:ident, $variant:ident, $element:path) => {
        #[derive(Debug)]
        struct $extractor;

        impl ValueExtractor for $extractor {
            fn extract_values(&self, container: &Value, receiver: &mut dyn ValueReceiver) {
                if let Value::Array(ArrayValue::$variant(items)) = container {
                    for (index, item) in items.iter().enumerate() {
                        receiver.indexed_value(
                            Some(COLLECTION_ELEMENT_NODE_NAME),
                            index,
                            &$element(*item),
                        );
                    }
                }
            }
        }
    };
}

primitive_array_extractor!(BooleanArrayValueExtractor, Boolean, Value::Bool);
primitive_array_extractor!(ByteArrayValueExtractor, Byte, Value::Byte);
primitive_array_extractor!(ShortArrayValueExtractor, Short, Value::Short);
primitive_array_extractor!(IntArrayValueExtractor, Int, Value::Int);
primitive_array_extractor!(LongArrayValueExtractor, Long, Value::Long);
primitive_array_extractor!(FloatArrayValueExtractor, Float, Value::Float);
primitive_array_extractor!(DoubleArrayValueExtractor, Double, Value::Double);
primitive_array_extractor!(CharArrayValueExtractor, Char, Value::Char);

#[derive(Debug)]
struct ObjectArrayValueExtractor {
    node_name: Option<&'static str>,
}

impl ValueExtractor for ObjectArrayValueExtractor {
    fn extract_values(&self, container: &Value, receiver: &mut dyn ValueReceiver) {
        if let Value::Array(ArrayValue::Object { items, .. }) = container {
            for (index, item) in items.iter().enumerate() {
                receiver.indexed_value(self.node_name, index, item);
            }
        }
    }
}

// ============================================================================
// Collections
// ============================================================================

#[derive(Debug)]
struct ListValueExtractor {
    node_name: Option<&'static str>,
}

impl ValueExtractor for ListValueExtractor {
    fn extract_values(&self, container: &Value, receiver: &mut dyn ValueReceiver) {
        if let Value::List { items, .. } = container {
            for (index, item) in items.iter().enumerate() {
                receiver.indexed_value(self.node_name, index, item);
            }
        }
    }
}

#[derive(Debug)]
struct IterableValueExtractor {
    node_name: Option<&'static str>,
}

impl ValueExtractor for IterableValueExtractor {
    fn extract_values(&self, container: &Value, receiver: &mut dyn ValueReceiver) {
        if let Value::List { items, .. } | Value::Set { items, .. } = container {
            for item in items {
                receiver.iterable_value(self.node_name, item);
            }
        }
    }
}

#[derive(Debug)]
struct MapValueExtractor;

impl ValueExtractor for MapValueExtractor {
    fn extract_values(&self, container: &Value, receiver: &mut dyn ValueReceiver) {
        if let Value::Map { entries, .. } = container {
            for (key, value) in entries {
                receiver.keyed_value(Some(COLLECTION_ELEMENT_NODE_NAME), key, value);
            }
        }
    }
}

#[derive(Debug)]
struct MapKeyExtractor;

impl ValueExtractor for MapKeyExtractor {
    fn extract_values(&self, container: &Value, receiver: &mut dyn ValueReceiver) {
        if let Value::Map { entries, .. } = container {
            for (key, _) in entries {
                receiver.keyed_value(Some(MAP_KEY_NODE_NAME), key, key);
            }
        }
    }
}

// ============================================================================
// Wrappers
// ============================================================================

#[derive(Debug)]
struct OptionalValueExtractor;

impl ValueExtractor for OptionalValueExtractor {
    fn extract_values(&self, container: &Value, receiver: &mut dyn ValueReceiver) {
        if let Value::Optional(inner) = container {
            receiver.value(None, inner.as_deref().unwrap_or(&NULL));
        }
    }
}

/// Passes the annotated value through unchanged
#[derive(Debug)]
struct ObjectValueExtractor;

impl ValueExtractor for ObjectValueExtractor {
    fn extract_values(&self, container: &Value, receiver: &mut dyn ValueReceiver) {
        receiver.value(None, container);
    }
}

// ============================================================================
// Descriptor Tables
// ============================================================================

fn slot(container: &str, index: usize, name: &str) -> TypeParameterSlot {
    TypeParameterSlot::declared(container, index, name)
}

fn array(name: &str, container: &str, extractor: impl ValueExtractor + 'static) -> Arc<ValueExtractorDescriptor> {
    Arc::new(ValueExtractorDescriptor::new(
        name,
        container,
        TypeParameterSlot::ArrayElement,
        extractor,
    ))
}

static BUILTIN_EXTRACTORS: Lazy<Vec<Arc<ValueExtractorDescriptor>>> = Lazy::new(|| {
    vec![
        Arc::new(ValueExtractorDescriptor::new(
            "ListValueExtractor",
            names::LIST,
            slot(names::LIST, 0, "E"),
            ListValueExtractor { node_name: None },
        )),
        array("ByteArrayValueExtractor", "byte[]", ByteArrayValueExtractor),
        array("ShortArrayValueExtractor", "short[]", ShortArrayValueExtractor),
        array("IntArrayValueExtractor", "int[]", IntArrayValueExtractor),
        array("LongArrayValueExtractor", "long[]", LongArrayValueExtractor),
        array("FloatArrayValueExtractor", "float[]", FloatArrayValueExtractor),
        array("DoubleArrayValueExtractor", "double[]", DoubleArrayValueExtractor),
        array("CharArrayValueExtractor", "char[]", CharArrayValueExtractor),
        array("BooleanArrayValueExtractor", "boolean[]", BooleanArrayValueExtractor),
        array(
            "ObjectArrayValueExtractor",
            names::OBJECT_ARRAY,
            ObjectArrayValueExtractor { node_name: None },
        ),
        Arc::new(ValueExtractorDescriptor::new(
            "MapValueExtractor",
            names::MAP,
            slot(names::MAP, 1, "V"),
            MapValueExtractor,
        )),
        Arc::new(
            ValueExtractorDescriptor::new(
                "MapKeyExtractor",
                names::MAP,
                slot(names::MAP, 0, "K"),
                MapKeyExtractor,
            )
            .with_implicit_cascade(false),
        ),
        Arc::new(ValueExtractorDescriptor::new(
            "IterableValueExtractor",
            names::ITERABLE,
            slot(names::ITERABLE, 0, "T"),
            IterableValueExtractor { node_name: None },
        )),
        Arc::new(
            ValueExtractorDescriptor::new(
                "OptionalValueExtractor",
                names::OPTIONAL,
                slot(names::OPTIONAL, 0, "T"),
                OptionalValueExtractor,
            )
            .with_unwrap_by_default(true),
        ),
        Arc::new(ValueExtractorDescriptor::new(
            "ObjectValueExtractor",
            names::OBJECT,
            TypeParameterSlot::AnnotatedObject,
            ObjectValueExtractor,
        )),
    ]
});

static LEGACY_EXTRACTORS: Lazy<Vec<Arc<ValueExtractorDescriptor>>> = Lazy::new(|| {
    let element = Some(COLLECTION_ELEMENT_NODE_NAME);
    vec![
        Arc::new(ValueExtractorDescriptor::new(
            "LegacyListValueExtractor",
            names::LIST,
            slot(names::LIST, 0, "E"),
            ListValueExtractor { node_name: element },
        )),
        array(
            "LegacyObjectArrayValueExtractor",
            names::OBJECT_ARRAY,
            ObjectArrayValueExtractor { node_name: element },
        ),
        Arc::new(ValueExtractorDescriptor::new(
            "LegacyMapValueExtractor",
            names::MAP,
            slot(names::MAP, 1, "V"),
            MapValueExtractor,
        )),
        Arc::new(ValueExtractorDescriptor::new(
            "LegacyIterableValueExtractor",
            names::ITERABLE,
            slot(names::ITERABLE, 0, "T"),
            IterableValueExtractor { node_name: element },
        )),
        Arc::new(
            ValueExtractorDescriptor::new(
                "LegacyOptionalValueExtractor",
                names::OPTIONAL,
                slot(names::OPTIONAL, 0, "T"),
                OptionalValueExtractor,
            )
            .with_unwrap_by_default(true),
        ),
    ]
});

/// Extractors registered in every manager, in registration order
pub fn builtin_extractors() -> &'static [Arc<ValueExtractorDescriptor>] {
    &BUILTIN_EXTRACTORS
}

/// Pre-generics collection support, consulted for runtime containers only
pub fn legacy_extractors() -> &'static [Arc<ValueExtractorDescriptor>] {
    &LEGACY_EXTRACTORS
}
