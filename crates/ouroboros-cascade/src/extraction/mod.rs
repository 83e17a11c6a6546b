//! Value extraction
//!
//! A [`ValueExtractor`] decomposes a container into its elements and reports
//! each one to a [`ValueReceiver`], together with the node name, index or key
//! that identifies it in a property path. The [`ValueExtractorManager`] picks
//! the extractor to use for a declared or runtime type.

use std::fmt;

use crate::types::Value;

mod builtin;
mod descriptor;
mod manager;
mod provider;

pub use builtin::{builtin_extractors, legacy_extractors};
pub use descriptor::{ExtractorKey, ValueExtractorDescriptor};
pub use manager::ValueExtractorManager;
pub use provider::{ExtractorProvider, ObservableValueExtractorProvider};

/// Callbacks invoked once per extracted element
///
/// `node_name` is the path segment the element contributes, if any.
pub trait ValueReceiver {
    /// Single wrapped value
    fn value(&mut self, node_name: Option<&str>, value: &Value);

    /// Element of an unordered iterable
    fn iterable_value(&mut self, node_name: Option<&str>, value: &Value);

    /// Element of an indexed container
    fn indexed_value(&mut self, node_name: Option<&str>, index: usize, value: &Value);

    /// Element of a keyed container
    fn keyed_value(&mut self, node_name: Option<&str>, key: &Value, value: &Value);
}

/// Strategy decomposing a container into its elements
///
/// Implementations must be pure: extracting the same container twice yields
/// the same calls in the same order. A container of an unexpected shape
/// produces no calls.
pub trait ValueExtractor: Send + Sync + fmt::Debug {
    fn extract_values(&self, container: &Value, receiver: &mut dyn ValueReceiver);
}

/// Receiver recording every call, useful for inspecting extractors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectingReceiver {
    pub calls: Vec<ReceivedValue>,
}

/// One call recorded by [`CollectingReceiver`]
#[derive(Debug, Clone, PartialEq)]
pub enum ReceivedValue {
    Value {
        node_name: Option<String>,
        value: Value,
    },
    Iterable {
        node_name: Option<String>,
        value: Value,
    },
    Indexed {
        node_name: Option<String>,
        index: usize,
        value: Value,
    },
    Keyed {
        node_name: Option<String>,
        key: Value,
        value: Value,
    },
}

impl ValueReceiver for CollectingReceiver {
    fn value(&mut self, node_name: Option<&str>, value: &Value) {
        self.calls.push(ReceivedValue::Value {
            node_name: node_name.map(str::to_string),
            value: value.clone(),
        });
    }

    fn iterable_value(&mut self, node_name: Option<&str>, value: &Value) {
        self.calls.push(ReceivedValue::Iterable {
            node_name: node_name.map(str::to_string),
            value: value.clone(),
        });
    }

    fn indexed_value(&mut self, node_name: Option<&str>, index: usize, value: &Value) {
        self.calls.push(ReceivedValue::Indexed {
            node_name: node_name.map(str::to_string),
            index,
            value: value.clone(),
        });
    }

    fn keyed_value(&mut self, node_name: Option<&str>, key: &Value, value: &Value) {
        self.calls.push(ReceivedValue::Keyed {
            node_name: node_name.map(str::to_string),
            key: key.clone(),
            value: value.clone(),
        });
    }
}
