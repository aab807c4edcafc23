//! The DOM-set rule registry.

use indexmap::IndexMap;

use crate::error::ConfigError;

use super::builtin::default_rules;
use super::rule::{ClassificationId, ClassificationRule};

/// Ordered mapping from DOM-set id to its rule.
///
/// Iteration order is insertion order: the defaults ascending by id, then
/// extra rules in the order the caller supplied them. The classifier appends
/// labels in this order, so it is also the label order of a fresh
/// [`ClassificationMap`](super::ClassificationMap).
///
/// An id can only ever be registered once.
#[derive(Debug, Clone, Default)]
pub struct ClassificationRegistry {
    rules: IndexMap<ClassificationId, ClassificationRule>,
}

impl ClassificationRegistry {
    /// A registry containing no rules at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry containing only the default rules.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            rules: default_rules().into_iter().collect(),
        }
    }

    /// Build a registry from the defaults plus `extra_rules`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateClassification` for the first extra id
    /// that is already a default or was already supplied earlier in
    /// `extra_rules`.
    pub fn build<I>(extra_rules: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (ClassificationId, ClassificationRule)>,
    {
        let mut registry = Self::with_defaults();
        for (id, rule) in extra_rules {
            registry.register(id, rule)?;
        }
        Ok(registry)
    }

    /// Register one rule.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateClassification` if `id` is taken; the
    /// registry is left unchanged.
    pub fn register(&mut self, id: ClassificationId, rule: ClassificationRule) -> Result<(), ConfigError> {
        if self.rules.contains_key(&id) {
            return Err(ConfigError::DuplicateClassification { id });
        }
        self.rules.insert(id, rule);
        Ok(())
    }

    /// Returns true if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: ClassificationId) -> bool {
        self.rules.contains_key(&id)
    }

    /// Rule registered under `id`.
    #[must_use]
    pub fn get(&self, id: ClassificationId) -> Option<&ClassificationRule> {
        self.rules.get(&id)
    }

    /// Registered ids in registry order.
    pub fn ids(&self) -> impl Iterator<Item = ClassificationId> + '_ {
        self.rules.keys().copied()
    }

    /// Rules in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (ClassificationId, &ClassificationRule)> {
        self.rules.iter().map(|(id, rule)| (*id, rule))
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Build a registry from the defaults plus `extra_rules`.
///
/// See [`ClassificationRegistry::build`].
///
/// # Errors
///
/// Returns `ConfigError::DuplicateClassification` on an id collision.
pub fn build_registry<I>(extra_rules: I) -> Result<ClassificationRegistry, ConfigError>
where
    I: IntoIterator<Item = (ClassificationId, ClassificationRule)>,
{
    ClassificationRegistry::build(extra_rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{ChannelDescriptor, ChannelId};

    fn never() -> ClassificationRule {
        ClassificationRule::new("never", |_: ChannelId, _: &ChannelDescriptor| false)
    }

    #[test]
    fn test_defaults() {
        let registry = ClassificationRegistry::with_defaults();
        assert_eq!(registry.len(), 10);
        assert!(registry.contains(ClassificationId::new(2)));
        assert!(registry.contains(ClassificationId::new(11)));
        assert!(!registry.contains(ClassificationId::new(1)));
        assert_eq!(registry.get(ClassificationId::new(9)).map(ClassificationRule::name), Some("IceACT"));
    }

    #[test]
    fn test_build_with_extras_keeps_caller_order() {
        let registry = build_registry(vec![
            (ClassificationId::new(1002), never()),
            (ClassificationId::new(1000), never()),
        ])
        .unwrap();

        let ids: Vec<u32> = registry.ids().map(ClassificationId::get).collect();
        assert_eq!(ids, vec![2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 1002, 1000]);
    }

    #[test]
    fn test_build_rejects_default_id() {
        let err = build_registry(vec![(ClassificationId::new(2), never())]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateClassification {
                id: ClassificationId::new(2)
            }
        );

        // A fresh default table is unaffected by the failed build.
        let defaults = ClassificationRegistry::with_defaults();
        assert_eq!(defaults.get(ClassificationId::new(2)).map(ClassificationRule::name), Some("InIce"));
    }

    #[test]
    fn test_build_rejects_repeated_extra() {
        let err = build_registry(vec![
            (ClassificationId::new(1000), never()),
            (ClassificationId::new(1000), never()),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateClassification { id } if id.get() == 1000));
    }

    #[test]
    fn test_register_failure_leaves_registry_unchanged() {
        let mut registry = ClassificationRegistry::with_defaults();
        assert!(registry.register(ClassificationId::new(7), never()).is_err());
        assert_eq!(registry.len(), 10);
        assert_eq!(registry.get(ClassificationId::new(7)).map(ClassificationRule::name), Some("Scintillators"));
    }
}
