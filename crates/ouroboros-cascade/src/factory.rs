//! Validator factory bootstrap
//!
//! [`ValidatorFactoryBuilder`] gathers the type registry, configuration,
//! extractors and constrained elements. [`ValidatorFactoryBuilder::build`]
//! resolves everything once; configuration defects surface there and never
//! during validation.

use std::sync::Arc;

use tracing::info;

use crate::config::ValidationConfig;
use crate::engine::{Validator, ValidatorState};
use crate::errors::Result;
use crate::extraction::{
    ExtractorProvider, ObservableValueExtractorProvider, ValueExtractorDescriptor,
    ValueExtractorManager,
};
use crate::metadata::{BeanMetaDataManager, ConstrainedElement};
use crate::reflect::TypeRegistry;

// ============================================================================
// Builder
// ============================================================================

/// Collects everything a [`ValidatorFactory`] needs
pub struct ValidatorFactoryBuilder {
    registry: TypeRegistry,
    config: ValidationConfig,
    providers: Vec<Box<dyn ExtractorProvider>>,
    extractors: Vec<ValueExtractorDescriptor>,
    elements: Vec<ConstrainedElement>,
}

impl ValidatorFactoryBuilder {
    /// Builder over `registry` with the default providers
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            registry,
            config: ValidationConfig::default(),
            providers: vec![Box::new(ObservableValueExtractorProvider)],
            extractors: Vec::new(),
            elements: Vec::new(),
        }
    }

    pub fn config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a custom extractor; a later one for the same key wins
    pub fn add_value_extractor(mut self, descriptor: ValueExtractorDescriptor) -> Self {
        self.extractors.push(descriptor);
        self
    }

    /// Add a provider, consulted after those already present
    pub fn extractor_provider(mut self, provider: Box<dyn ExtractorProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Drop all providers, including the default ones
    pub fn without_extractor_providers(mut self) -> Self {
        self.providers.clear();
        self
    }

    pub fn element(mut self, element: ConstrainedElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn elements(mut self, elements: impl IntoIterator<Item = ConstrainedElement>) -> Self {
        self.elements.extend(elements);
        self
    }

    /// Resolve extractors and metadata
    pub fn build(self) -> Result<ValidatorFactory> {
        let registry = Arc::new(self.registry);
        let manager = ValueExtractorManager::with_extractors(
            Arc::clone(&registry),
            &self.providers,
            self.extractors,
        )?;
        let beans = BeanMetaDataManager::build(&manager, &self.elements, &self.config)?;

        info!(
            classes = registry.classes().count(),
            extractors = manager.extractors().len(),
            beans = beans.len(),
            fail_fast = self.config.fail_fast,
            "validator factory built"
        );

        Ok(ValidatorFactory {
            state: Arc::new(ValidatorState {
                manager,
                beans,
                config: self.config,
            }),
            elements: Arc::new(self.elements),
        })
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Immutable, thread-safe source of validators
#[derive(Debug, Clone)]
pub struct ValidatorFactory {
    state: Arc<ValidatorState>,
    elements: Arc<Vec<ConstrainedElement>>,
}

impl ValidatorFactory {
    pub fn builder(registry: TypeRegistry) -> ValidatorFactoryBuilder {
        ValidatorFactoryBuilder::new(registry)
    }

    pub fn validator(&self) -> Validator {
        Validator::new(Arc::clone(&self.state))
    }

    /// Validator using `extra` extractors on top of this factory's
    ///
    /// Metadata is rebuilt against the extended extractor set, so overlay
    /// defects are reported here. The factory itself is left unchanged.
    pub fn validator_with_value_extractors(
        &self,
        extra: impl IntoIterator<Item = ValueExtractorDescriptor>,
    ) -> Result<Validator> {
        let manager = self.state.manager.with_overlay(extra)?;
        let beans = BeanMetaDataManager::build(&manager, &self.elements, &self.state.config)?;
        info!(
            extractors = manager.extractors().len(),
            "validator built with additional value extractors"
        );
        Ok(Validator::new(Arc::new(ValidatorState {
            manager,
            beans,
            config: self.state.config.clone(),
        })))
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.state.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        self.state.manager.registry()
    }

    pub fn value_extractor_manager(&self) -> &ValueExtractorManager {
        &self.state.manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintKind;
    use crate::errors::{ConfigurationError, Error};
    use crate::reflect::{ClassDef, ClassName};
    use crate::types::{BeanValue, Value};

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry
            .define(ClassDef::builder("User").field("name", "String"))
            .unwrap();
        registry
    }

    #[test]
    fn test_build_and_validate() {
        let factory = ValidatorFactory::builder(registry())
            .element(ConstrainedElement::field("User", "name").constraint(ConstraintKind::NotBlank))
            .build()
            .unwrap();

        let validator = factory.validator();
        let user = Value::from(BeanValue::new("User").with("name", " "));
        let violations = validator.validate(&user, &[]).unwrap();
        assert_eq!(violations.paths(), vec!["name".to_string()]);
        assert!(validator
            .bean_metadata(&ClassName::new("User"))
            .is_some());
    }

    #[test]
    fn test_configuration_errors_surface_at_build() {
        let err = ValidatorFactory::builder(registry())
            .element(ConstrainedElement::field("User", "name").constraint(ConstraintKind::Positive))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration(ConfigurationError::NoValidatorForType { .. })
        ));
    }

    #[test]
    fn test_factory_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValidatorFactory>();
        assert_send_sync::<Validator>();
    }
}
