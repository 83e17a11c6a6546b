//! Group conversions applied when cascading

use std::collections::BTreeMap;

use crate::errors::{ConfigResult, ConfigurationError};
use crate::reflect::{ClassName, TypeRegistry};

/// Source group to target group remapping of one cascaded element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupConversions {
    conversions: BTreeMap<ClassName, ClassName>,
}

impl GroupConversions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    pub fn get(&self, from: &ClassName) -> Option<&ClassName> {
        self.conversions.get(from)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ClassName, &ClassName)> {
        self.conversions.iter()
    }

    /// Declare a conversion; a later declaration for the same source replaces it
    pub fn insert(&mut self, from: impl Into<ClassName>, to: impl Into<ClassName>) {
        self.conversions.insert(from.into(), to.into());
    }

    /// Group to validate the cascaded element with
    pub fn convert(&self, group: &ClassName) -> ClassName {
        self.conversions
            .get(group)
            .cloned()
            .unwrap_or_else(|| group.clone())
    }

    /// Union of two declarations of the same element
    ///
    /// A source group mapped to different targets on each side is a
    /// configuration error, whichever side is merged into the other.
    pub fn merge(&self, other: &GroupConversions) -> ConfigResult<GroupConversions> {
        let mut merged = self.conversions.clone();
        for (from, to) in &other.conversions {
            match merged.get(from) {
                Some(existing) if existing != to => {
                    let mut targets = vec![existing.to_string(), to.to_string()];
                    targets.sort();
                    return Err(ConfigurationError::MultipleGroupConversionsForSameSource {
                        source_group: from.to_string(),
                        targets,
                    });
                }
                Some(_) => {}
                None => {
                    merged.insert(from.clone(), to.clone());
                }
            }
        }
        Ok(Self { conversions: merged })
    }

    /// Reject conversions on a non-cascading element and sequence sources
    pub(crate) fn validate(
        &self,
        registry: &TypeRegistry,
        cascading: bool,
        element: &str,
    ) -> ConfigResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        if !cascading {
            return Err(ConfigurationError::GroupConversionOnNonCascadingElement {
                element: element.to_string(),
            });
        }
        for from in self.conversions.keys() {
            if registry.is_group_sequence(from) {
                return Err(ConfigurationError::GroupConversionForSequence {
                    group: from.to_string(),
                    element: element.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl<F, T> FromIterator<(F, T)> for GroupConversions
where
    F: Into<ClassName>,
    T: Into<ClassName>,
{
    fn from_iter<I: IntoIterator<Item = (F, T)>>(iter: I) -> Self {
        let mut conversions = Self::new();
        for (from, to) in iter {
            conversions.insert(from, to);
        }
        conversions
    }
}
