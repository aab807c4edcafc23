//! The per-configuration build step.
//!
//! Runs once whenever the detector configuration changes: new triggers are
//! added to the ones recorded in the snapshot, the DOM-set registry is built
//! from the defaults plus extra rules, every trigger reference is checked,
//! and the DOM-set map is (re)computed on top of whatever the snapshot
//! already recorded. The input snapshot is never modified; the caller writes
//! the returned one back.

use serde::{Deserialize, Serialize};

use crate::classification::{classify, ClassificationId, ClassificationRegistry, ClassificationRule, FULL_IN_ICE};
use crate::error::ConfigError;
use crate::extensions::extension_definitions;
use crate::geometry::GeometrySource;
use crate::snapshot::DetectorSnapshot;
use crate::trigger::{merge_into_existing, TriggerConfigRegistry};
use crate::validation::check_references_with_fallback;

/// Options for [`ConfigurationStep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigureOptions {
    /// DOM-set assumed for snapshot triggers that name none.
    pub fallback_classification: ClassificationId,
    /// Classify channels in parallel. Only honoured when the crate is built
    /// with the `parallel` feature; the result is identical either way.
    pub parallel_classification: bool,
}

impl Default for ConfigureOptions {
    fn default() -> Self {
        Self {
            fallback_classification: FULL_IN_ICE,
            parallel_classification: false,
        }
    }
}

/// Output of a successful [`ConfigurationStep::apply`].
#[derive(Debug, Clone)]
pub struct ConfiguredDetector {
    /// The validated DOM-set registry backing the run.
    pub registry: ClassificationRegistry,
    /// Snapshot to write back: merged triggers plus the DOM-set map.
    pub snapshot: DetectorSnapshot,
}

/// Extra DOM-set rules and triggers to install into a detector configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationStep {
    options: ConfigureOptions,
    extra_rules: Vec<(ClassificationId, ClassificationRule)>,
    triggers: TriggerConfigRegistry,
}

impl ConfigurationStep {
    /// A step that adds nothing.
    #[must_use]
    pub fn new(options: ConfigureOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// A step installing the Upgrade and Gen2 extension definitions.
    #[must_use]
    pub fn with_extensions(options: ConfigureOptions) -> Self {
        let (rules, triggers) = extension_definitions();
        Self::new(options).with_rules(rules).with_triggers(triggers)
    }

    /// Queue one extra DOM-set rule. Collisions surface in [`apply`](Self::apply).
    #[must_use]
    pub fn with_rule(mut self, id: ClassificationId, rule: ClassificationRule) -> Self {
        self.extra_rules.push((id, rule));
        self
    }

    /// Queue several extra DOM-set rules, keeping their order.
    #[must_use]
    pub fn with_rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = (ClassificationId, ClassificationRule)>,
    {
        self.extra_rules.extend(rules);
        self
    }

    /// Add new triggers. Later definitions of the same key replace earlier ones.
    #[must_use]
    pub fn with_triggers(mut self, triggers: TriggerConfigRegistry) -> Self {
        for (key, config) in triggers.iter() {
            self.triggers.insert(*key, config.clone());
        }
        self
    }

    /// Options in effect.
    #[must_use]
    pub const fn options(&self) -> &ConfigureOptions {
        &self.options
    }

    /// Build and validate the configuration for `geometry`.
    ///
    /// # Errors
    ///
    /// - `DuplicateClassification` if an extra rule reuses a taken id.
    /// - `MissingClassification` / `InvalidSetting` if any trigger, old or
    ///   new, references a DOM-set that is not registered.
    pub fn apply<G>(&self, snapshot: &DetectorSnapshot, geometry: &G) -> Result<ConfiguredDetector, ConfigError>
    where
        G: GeometrySource + Sync + ?Sized,
    {
        let trigger_configs = merge_into_existing(&snapshot.trigger_configs, &self.triggers);
        let registry = ClassificationRegistry::build(self.extra_rules.iter().cloned())?;
        check_references_with_fallback(&trigger_configs, &registry, self.options.fallback_classification)?;

        let base = snapshot.classifications.as_ref();
        if base.is_some() {
            tracing::warn!(
                domain = "configure",
                "snapshot already holds a DOM-set map; new DOM-sets will be appended to it",
            );
        }
        let classifications = self.classify(&registry, geometry, base);

        tracing::info!(
            domain = "configure",
            triggers = trigger_configs.len(),
            domsets = registry.len(),
            channels = classifications.len(),
            fingerprint = %classifications.fingerprint(),
            "detector configuration built",
        );

        Ok(ConfiguredDetector {
            registry,
            snapshot: DetectorSnapshot {
                trigger_configs,
                classifications: Some(classifications),
            },
        })
    }

    #[cfg(feature = "parallel")]
    fn classify<G>(
        &self,
        registry: &ClassificationRegistry,
        geometry: &G,
        base: Option<&crate::classification::ClassificationMap>,
    ) -> crate::classification::ClassificationMap
    where
        G: GeometrySource + Sync + ?Sized,
    {
        if self.options.parallel_classification {
            crate::classification::classify_parallel(registry, geometry, base)
        } else {
            classify(registry, geometry, base)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn classify<G>(
        &self,
        registry: &ClassificationRegistry,
        geometry: &G,
        base: Option<&crate::classification::ClassificationMap>,
    ) -> crate::classification::ClassificationMap
    where
        G: GeometrySource + Sync + ?Sized,
    {
        if self.options.parallel_classification {
            tracing::debug!(
                domain = "configure",
                "parallel classification requested without the `parallel` feature; running sequentially",
            );
        }
        classify(registry, geometry, base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{ChannelDescriptor, ChannelId, ChannelType, Position};
    use crate::geometry::InMemoryGeometry;
    use crate::trigger::{SimpleMultiplicityParams, TriggerSourceId};

    fn geometry() -> InMemoryGeometry {
        InMemoryGeometry::new()
            .with_channel(ChannelId::new(36, 50), ChannelDescriptor::of_type(ChannelType::InIce))
            .with_channel(
                ChannelId::new(88, 40),
                ChannelDescriptor::new(Position::new(0.0, 0.0, -350.0), ChannelType::InIce),
            )
            .with_channel(ChannelId::new(1004, 1), ChannelDescriptor::of_type(ChannelType::InIce))
    }

    #[test]
    fn test_default_options() {
        let options = ConfigureOptions::default();
        assert_eq!(options.fallback_classification, ClassificationId::new(11));
        assert!(!options.parallel_classification);

        let parsed: ConfigureOptions = serde_json::from_str(r#"{"parallel_classification": true}"#).unwrap();
        assert_eq!(parsed.fallback_classification, FULL_IN_ICE);
        assert!(parsed.parallel_classification);
    }

    #[test]
    fn test_apply_with_extensions() {
        let step = ConfigurationStep::with_extensions(ConfigureOptions::default());
        let configured = step.apply(&DetectorSnapshot::default(), &geometry()).unwrap();

        let map = configured.snapshot.classifications.as_ref().unwrap();
        assert!(map.contains(ChannelId::new(88, 40), ClassificationId::new(1000)));
        assert!(map.contains(ChannelId::new(1004, 1), ClassificationId::new(1002)));
        assert!(map.contains(ChannelId::new(36, 50), ClassificationId::new(6)));
        assert_eq!(configured.snapshot.trigger_configs.len(), 2);
        assert_eq!(configured.registry.len(), 12);
    }

    #[test]
    fn test_apply_does_not_touch_input_snapshot() {
        let mut existing = TriggerConfigRegistry::new();
        existing.define_smt(
            TriggerSourceId::InIce,
            1006,
            SimpleMultiplicityParams {
                classification: ClassificationId::new(2),
                time_window: 5000.0,
                threshold: 8,
            },
            None,
        );
        let snapshot = DetectorSnapshot::new(existing);
        let before = snapshot.clone();

        let configured = ConfigurationStep::with_extensions(ConfigureOptions::default())
            .apply(&snapshot, &geometry())
            .unwrap();

        assert_eq!(snapshot, before);
        assert_eq!(configured.snapshot.trigger_configs.len(), 3);
    }

    #[test]
    fn test_apply_rejects_duplicate_rule() {
        let step = ConfigurationStep::new(ConfigureOptions::default()).with_rule(
            ClassificationId::new(2),
            ClassificationRule::new("shadow", |_: ChannelId, _: &ChannelDescriptor| true),
        );
        let err = step.apply(&DetectorSnapshot::default(), &geometry()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateClassification {
                id: ClassificationId::new(2)
            }
        );
    }
}
