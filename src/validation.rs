//! Cross-registry reference checks.
//!
//! Every trigger reads hits from one DOM-set. A trigger pointing at a DOM-set
//! nobody defined would silently see no channels at decision time, so the
//! check runs once, after all extra rules are registered and before anything
//! consumes the registries.

use crate::classification::{ClassificationId, ClassificationRegistry, FULL_IN_ICE};
use crate::error::ConfigError;
use crate::trigger::{ClassificationRef, TriggerConfigRegistry, DOMSET_SETTING};

/// Verify that every trigger's DOM-set is registered.
///
/// Triggers loaded from a snapshot without any DOM-set are assumed to read the
/// full in-ice array (DOM-set 11).
///
/// # Errors
///
/// Returns the first violation in key order; see
/// [`check_references_with_fallback`].
pub fn check_references(
    trigger_configs: &TriggerConfigRegistry,
    registry: &ClassificationRegistry,
) -> Result<(), ConfigError> {
    check_references_with_fallback(trigger_configs, registry, FULL_IN_ICE)
}

/// Verify that every trigger's DOM-set is registered, assuming `fallback` for
/// triggers that carry none.
///
/// # Errors
///
/// - `MissingClassification` if a referenced (or fallback) DOM-set is not in
///   `registry`.
/// - `InvalidSetting` if an opaque trigger's `domSet` setting is not an id.
pub fn check_references_with_fallback(
    trigger_configs: &TriggerConfigRegistry,
    registry: &ClassificationRegistry,
    fallback: ClassificationId,
) -> Result<(), ConfigError> {
    for (key, config) in trigger_configs.iter() {
        let classification = match config.classification() {
            ClassificationRef::Declared(id) => id,
            ClassificationRef::Absent => {
                tracing::warn!(
                    domain = "validation",
                    trigger = %key,
                    fallback = %fallback,
                    "trigger has no DOM-set; defaulting to fallback",
                );
                fallback
            }
            ClassificationRef::Unparseable(value) => {
                return Err(ConfigError::InvalidSetting {
                    key: *key,
                    setting: DOMSET_SETTING.to_string(),
                    value,
                });
            }
        };

        if !registry.contains(classification) {
            return Err(ConfigError::MissingClassification {
                key: *key,
                classification,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::channel::{ChannelDescriptor, ChannelId};
    use crate::classification::{build_registry, ClassificationRule};
    use crate::trigger::{
        ReadoutWindow, SimpleMultiplicityParams, Subdetector, TriggerConfig, TriggerKey, TriggerKind, TriggerParams,
        TriggerSourceId, VolumeParams,
    };

    fn smt_registry(classification: u32) -> TriggerConfigRegistry {
        let mut triggers = TriggerConfigRegistry::new();
        triggers.define_smt(
            TriggerSourceId::InIcePulses,
            42,
            SimpleMultiplicityParams {
                classification: ClassificationId::new(classification),
                time_window: 100.0,
                threshold: 8,
            },
            None,
        );
        triggers
    }

    fn slop(settings: &[(&str, &str)]) -> TriggerConfigRegistry {
        let settings: BTreeMap<String, String> = settings
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        [(
            TriggerKey::new(TriggerSourceId::InIce, TriggerKind::SlowParticle, 24002),
            TriggerConfig::new(
                "SlowMonopoleTrigger",
                TriggerParams::Settings { settings },
                Subdetector::InIce,
                ReadoutWindow::default(),
            ),
        )]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_unregistered_reference_fails() {
        let err = check_references(&smt_registry(42), &ClassificationRegistry::with_defaults()).unwrap_err();
        let ConfigError::MissingClassification { key, classification } = err else {
            panic!("expected MissingClassification");
        };
        assert_eq!(classification, ClassificationId::new(42));
        assert_eq!(key.config_id, 42);
    }

    #[test]
    fn test_registered_references_pass() {
        assert!(check_references(&smt_registry(6), &ClassificationRegistry::with_defaults()).is_ok());
        assert!(check_references(&TriggerConfigRegistry::new(), &ClassificationRegistry::empty()).is_ok());
    }

    #[test]
    fn test_volume_trigger_needs_extra_rule() {
        let mut triggers = TriggerConfigRegistry::new();
        let key = triggers.define_volume_trigger(
            TriggerSourceId::InIcePulses,
            1018,
            VolumeParams {
                classification: ClassificationId::new(1000),
                time_window: 1750.0,
                multiplicity: 8,
                simple_multiplicity: 8,
                radius: 60_000.0,
                height: 60_000.0,
            },
            None,
        );

        let err = check_references(&triggers, &ClassificationRegistry::with_defaults()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingClassification {
                key,
                classification: ClassificationId::new(1000)
            }
        );

        let registry = build_registry(vec![(
            ClassificationId::new(1000),
            ClassificationRule::new("upgrade", |c: ChannelId, _: &ChannelDescriptor| c.string >= 87),
        )])
        .unwrap();
        assert!(check_references(&triggers, &registry).is_ok());
    }

    #[test]
    fn test_settings_without_domset_use_fallback() {
        let triggers = slop(&[("t_proximity", "2500")]);
        assert!(check_references(&triggers, &ClassificationRegistry::with_defaults()).is_ok());

        let err = check_references(&triggers, &ClassificationRegistry::empty()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingClassification { classification, .. } if classification == FULL_IN_ICE));
    }

    #[test]
    fn test_settings_domset_is_checked() {
        assert!(check_references(&slop(&[("domSet", "11")]), &ClassificationRegistry::with_defaults()).is_ok());
        assert!(check_references(&slop(&[("domSet", "77")]), &ClassificationRegistry::with_defaults()).is_err());

        let err = check_references(&slop(&[("domSet", "x")]), &ClassificationRegistry::with_defaults()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { ref value, .. } if value == "x"));
    }
}
