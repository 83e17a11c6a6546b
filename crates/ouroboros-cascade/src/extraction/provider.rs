//! Optional extractor bundles
//!
//! A provider contributes extractors for container types that only exist
//! in some deployments. The manager consults it at bootstrap and skips it
//! when its types are not registered.

use crate::reflect::{ClassName, TypeParameterSlot, TypeRegistry};
use crate::types::Value;

use super::{ValueExtractor, ValueExtractorDescriptor, ValueReceiver};

/// Source of extractors registered between the built-ins and user extractors
pub trait ExtractorProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the container types this provider serves are registered
    fn is_available(&self, registry: &TypeRegistry) -> bool;

    fn descriptors(&self) -> Vec<ValueExtractorDescriptor>;
}

/// Class served by [`ObservableValueExtractorProvider`]
pub const OBSERVABLE_VALUE: &str = "ObservableValue";

/// Unwraps `ObservableValue<T>` beans through their `value` property
#[derive(Debug, Default, Clone, Copy)]
pub struct ObservableValueExtractorProvider;

#[derive(Debug)]
struct ObservableValueExtractor;

impl ValueExtractor for ObservableValueExtractor {
    fn extract_values(&self, container: &Value, receiver: &mut dyn ValueReceiver) {
        if let Some(bean) = container.as_bean() {
            let value = bean.property("value").unwrap_or(&crate::types::NULL);
            receiver.value(None, value);
        }
    }
}

impl ExtractorProvider for ObservableValueExtractorProvider {
    fn name(&self) -> &str {
        "observable-value"
    }

    fn is_available(&self, registry: &TypeRegistry) -> bool {
        registry
            .get(&ClassName::new(OBSERVABLE_VALUE))
            .map(|def| def.type_params.len() == 1)
            .unwrap_or(false)
    }

    fn descriptors(&self) -> Vec<ValueExtractorDescriptor> {
        vec![ValueExtractorDescriptor::new(
            "ObservableValueValueExtractor",
            OBSERVABLE_VALUE,
            TypeParameterSlot::declared(OBSERVABLE_VALUE, 0, "T"),
            ObservableValueExtractor,
        )
        .with_unwrap_by_default(true)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{CollectingReceiver, ReceivedValue};
    use crate::reflect::ClassDef;
    use crate::types::BeanValue;

    #[test]
    fn test_availability_follows_registry() {
        let provider = ObservableValueExtractorProvider;
        let mut registry = TypeRegistry::new();
        assert!(!provider.is_available(&registry));

        registry
            .define(ClassDef::interface(OBSERVABLE_VALUE).type_param("T").getter("getValue", "T"))
            .unwrap();
        assert!(provider.is_available(&registry));
        assert!(provider
            .descriptors()
            .iter()
            .all(|d| d.validate(&registry).is_ok()));
    }

    #[test]
    fn test_extracts_wrapped_value() {
        let provider = ObservableValueExtractorProvider;
        let descriptor = provider.descriptors().remove(0);
        assert!(descriptor.unwrap_by_default());

        let observable = Value::from(BeanValue::new(OBSERVABLE_VALUE).with("value", "x"));
        let mut receiver = CollectingReceiver::default();
        descriptor.extract_values(&observable, &mut receiver);
        assert_eq!(
            receiver.calls,
            vec![ReceivedValue::Value {
                node_name: None,
                value: Value::from("x")
            }]
        );
    }
}
