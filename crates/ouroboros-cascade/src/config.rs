//! Configuration options for validation behavior

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Validation Config
// ============================================================================

/// Options fixed when a validator factory is built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValidationConfig {
    /// Stop a validation call at the first violation
    pub fail_fast: bool,

    /// Reject constraints on type arguments of elements that carry no
    /// cascade marker at all
    pub require_cascade_for_type_argument_constraints: bool,

    /// Walk cascaded plain elements holding a collection at runtime with the
    /// legacy extractors
    pub legacy_runtime_containers: bool,
}

impl ValidationConfig {
    /// Create a new validation config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn require_cascade_for_type_argument_constraints(mut self, require: bool) -> Self {
        self.require_cascade_for_type_argument_constraints = require;
        self
    }

    pub fn legacy_runtime_containers(mut self, legacy: bool) -> Self {
        self.legacy_runtime_containers = legacy;
        self
    }

    /// Parse a JSON document; absent keys keep their defaults
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert!(!config.fail_fast);
        assert!(!config.require_cascade_for_type_argument_constraints);
        assert!(!config.legacy_runtime_containers);
    }

    #[test]
    fn test_config_builder() {
        let config = ValidationConfig::new()
            .fail_fast(true)
            .legacy_runtime_containers(true);

        assert!(config.fail_fast);
        assert!(config.legacy_runtime_containers);
        assert!(!config.require_cascade_for_type_argument_constraints);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_from_json() {
        let config = ValidationConfig::from_json(r#"{"fail_fast": true}"#).unwrap();
        assert_eq!(config, ValidationConfig::new().fail_fast(true));
        assert!(ValidationConfig::from_json("[1]").is_err());
    }
}
