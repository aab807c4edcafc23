//! Trigger configuration registry and merge.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::config::{
    ReadoutWindow, SimpleMultiplicityParams, StringParams, Subdetector, TriggerConfig, TriggerParams,
    VolumeParams,
};
use super::key::{TriggerConfigId, TriggerKey, TriggerKind, TriggerSourceId};

/// Algorithm name recorded for SMT configs.
pub const SMT_NAME: &str = "SimpleMajorityTrigger";
/// Algorithm name recorded for string configs.
pub const STRING_NAME: &str = "ClusterTrigger";
/// Algorithm name recorded for volume configs.
pub const VOLUME_NAME: &str = "CylinderTrigger";

/// Mapping from trigger key to its configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TriggerConfigEntry>", into = "Vec<TriggerConfigEntry>")]
pub struct TriggerConfigRegistry {
    configs: BTreeMap<TriggerKey, TriggerConfig>,
}

/// Serialized form of one registry entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfigEntry {
    /// Trigger key.
    pub key: TriggerKey,
    /// Its configuration.
    pub config: TriggerConfig,
}

impl From<Vec<TriggerConfigEntry>> for TriggerConfigRegistry {
    fn from(entries: Vec<TriggerConfigEntry>) -> Self {
        Self {
            configs: entries.into_iter().map(|e| (e.key, e.config)).collect(),
        }
    }
}

impl From<TriggerConfigRegistry> for Vec<TriggerConfigEntry> {
    fn from(registry: TriggerConfigRegistry) -> Self {
        registry
            .configs
            .into_iter()
            .map(|(key, config)| TriggerConfigEntry { key, config })
            .collect()
    }
}

impl FromIterator<(TriggerKey, TriggerConfig)> for TriggerConfigRegistry {
    fn from_iter<I: IntoIterator<Item = (TriggerKey, TriggerConfig)>>(iter: I) -> Self {
        Self {
            configs: iter.into_iter().collect(),
        }
    }
}

impl TriggerConfigRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a config, replacing and returning any previous one at `key`.
    pub fn insert(&mut self, key: TriggerKey, config: TriggerConfig) -> Option<TriggerConfig> {
        self.configs.insert(key, config)
    }

    /// Config stored at `key`.
    #[must_use]
    pub fn get(&self, key: &TriggerKey) -> Option<&TriggerConfig> {
        self.configs.get(key)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &TriggerKey) -> bool {
        self.configs.contains_key(key)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &TriggerKey> {
        self.configs.keys()
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&TriggerKey, &TriggerConfig)> {
        self.configs.iter()
    }

    /// Number of configs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Returns true if there are no configs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    fn define(
        &mut self,
        source: TriggerSourceId,
        kind: TriggerKind,
        config_id: TriggerConfigId,
        name: &str,
        params: TriggerParams,
        readout: Option<ReadoutWindow>,
    ) -> TriggerKey {
        let key = TriggerKey::new(source, kind, config_id);
        let config = TriggerConfig::new(name, params, Subdetector::from(source), readout.unwrap_or_default());
        self.configs.insert(key, config);
        key
    }

    /// Define a simple multiplicity trigger and return its key.
    ///
    /// Without `readout`, the window is ±5000 ns with no offset. An existing
    /// config at the same key is replaced.
    pub fn define_smt(
        &mut self,
        source: TriggerSourceId,
        config_id: TriggerConfigId,
        params: SimpleMultiplicityParams,
        readout: Option<ReadoutWindow>,
    ) -> TriggerKey {
        self.define(
            source,
            TriggerKind::SimpleMultiplicity,
            config_id,
            SMT_NAME,
            TriggerParams::SimpleMultiplicity(params),
            readout,
        )
    }

    /// Define a string (cluster) trigger and return its key.
    pub fn define_string_trigger(
        &mut self,
        source: TriggerSourceId,
        config_id: TriggerConfigId,
        params: StringParams,
        readout: Option<ReadoutWindow>,
    ) -> TriggerKey {
        self.define(
            source,
            TriggerKind::String,
            config_id,
            STRING_NAME,
            TriggerParams::String(params),
            readout,
        )
    }

    /// Define a volume (cylinder) trigger and return its key.
    pub fn define_volume_trigger(
        &mut self,
        source: TriggerSourceId,
        config_id: TriggerConfigId,
        params: VolumeParams,
        readout: Option<ReadoutWindow>,
    ) -> TriggerKey {
        self.define(
            source,
            TriggerKind::Volume,
            config_id,
            VOLUME_NAME,
            TriggerParams::Volume(params),
            readout,
        )
    }
}

/// Add the configs of `additions` to `existing` without touching any key
/// `existing` already has.
///
/// The result holds every entry of `existing` unchanged plus the entries of
/// `additions` whose keys are new. Neither input is modified.
#[must_use]
pub fn merge_into_existing(
    existing: &TriggerConfigRegistry,
    additions: &TriggerConfigRegistry,
) -> TriggerConfigRegistry {
    if additions.is_empty() {
        tracing::warn!(
            domain = "trigger_config",
            existing = existing.len(),
            "no triggers provided; merge leaves the existing configuration unchanged",
        );
        return existing.clone();
    }

    // Existing values win on overlap before anything reaches the output.
    let mut working = additions.clone();
    for (key, config) in existing.iter() {
        working.insert(*key, config.clone());
    }

    let mut merged = existing.clone();
    let mut added = 0usize;
    for (key, config) in working.configs {
        if !merged.contains_key(&key) {
            merged.insert(key, config);
            added += 1;
        }
    }

    tracing::debug!(
        domain = "trigger_config",
        existing = existing.len(),
        offered = additions.len(),
        added,
        "merged trigger configurations",
    );
    merged
}
