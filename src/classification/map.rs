//! Channel to DOM-set membership maps and the classifier.

use std::collections::BTreeMap;

use blake3::Hasher;
use serde::{Deserialize, Serialize};

use crate::channel::{ChannelDescriptor, ChannelId};
use crate::geometry::{legacy_grid, GeometrySource};

use super::registry::ClassificationRegistry;
use super::rule::ClassificationId;

/// Membership of every channel in the DOM-sets of a registry.
///
/// A channel can belong to any number of sets. Channels known to the geometry
/// but matching no rule still have an (empty) entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ClassificationEntry>", into = "Vec<ClassificationEntry>")]
pub struct ClassificationMap {
    sets: BTreeMap<ChannelId, Vec<ClassificationId>>,
}

/// Serialized form of one map entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationEntry {
    /// The channel.
    pub channel: ChannelId,
    /// Its DOM-sets.
    pub sets: Vec<ClassificationId>,
}

impl From<Vec<ClassificationEntry>> for ClassificationMap {
    fn from(entries: Vec<ClassificationEntry>) -> Self {
        Self {
            sets: entries.into_iter().map(|e| (e.channel, e.sets)).collect(),
        }
    }
}

impl From<ClassificationMap> for Vec<ClassificationEntry> {
    fn from(map: ClassificationMap) -> Self {
        map.sets
            .into_iter()
            .map(|(channel, sets)| ClassificationEntry { channel, sets })
            .collect()
    }
}

impl ClassificationMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// DOM-sets of `channel`, or `None` if the channel has no entry.
    #[must_use]
    pub fn get(&self, channel: ChannelId) -> Option<&[ClassificationId]> {
        self.sets.get(&channel).map(Vec::as_slice)
    }

    /// Returns true if `channel` belongs to DOM-set `id`.
    ///
    /// Channels without an entry belong to no set.
    #[must_use]
    pub fn contains(&self, channel: ChannelId, id: ClassificationId) -> bool {
        self.sets.get(&channel).is_some_and(|ids| ids.contains(&id))
    }

    /// Replace the DOM-sets of one channel.
    pub fn insert(&mut self, channel: ChannelId, sets: Vec<ClassificationId>) {
        self.sets.insert(channel, sets);
    }

    /// Channels that belong to DOM-set `id`, ascending.
    pub fn members(&self, id: ClassificationId) -> impl Iterator<Item = ChannelId> + '_ {
        self.sets
            .iter()
            .filter(move |(_, ids)| ids.contains(&id))
            .map(|(channel, _)| *channel)
    }

    /// Iterate entries in ascending channel order.
    pub fn iter(&self) -> impl Iterator<Item = (ChannelId, &[ClassificationId])> {
        self.sets.iter().map(|(c, ids)| (*c, ids.as_slice()))
    }

    /// Number of channels with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns true if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Stable digest of the map contents, including label order.
    ///
    /// Two runs over the same registry and geometry produce the same digest.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut h = Hasher::new();
        for (channel, ids) in &self.sets {
            h.update(&channel.string.to_le_bytes());
            h.update(&channel.om.to_le_bytes());
            h.update(&(ids.len() as u64).to_le_bytes());
            for id in ids {
                h.update(&id.get().to_le_bytes());
            }
        }
        h.finalize().to_hex().to_string()
    }
}

/// Append every matching rule not already present in `current`.
fn label_channel(
    registry: &ClassificationRegistry,
    channel: ChannelId,
    descriptor: Option<&ChannelDescriptor>,
    mut current: Vec<ClassificationId>,
) -> Vec<ClassificationId> {
    let Some(descriptor) = descriptor else {
        tracing::warn!(
            domain = "classification",
            %channel,
            "geometry lists channel without a descriptor; no DOM-sets assigned",
        );
        return current;
    };

    for (id, rule) in registry.iter() {
        if rule.matches(channel, descriptor) && !current.contains(&id) {
            current.push(id);
        }
    }
    current
}

/// Evaluate every rule in `registry` against every channel in `geometry`.
///
/// With a `base`, the result starts as an independent copy of it (including
/// entries for channels the geometry does not know) and newly matching labels
/// are appended after the existing ones. `base` itself is never modified.
#[must_use]
pub fn classify<G>(registry: &ClassificationRegistry, geometry: &G, base: Option<&ClassificationMap>) -> ClassificationMap
where
    G: GeometrySource + ?Sized,
{
    let mut out = base.cloned().unwrap_or_default();
    let channels = geometry.all_channels();
    let n_channels = channels.len();

    for channel in channels {
        let current = out.sets.remove(&channel).unwrap_or_default();
        let labels = label_channel(registry, channel, geometry.lookup(channel), current);
        out.sets.insert(channel, labels);
    }

    tracing::debug!(
        domain = "classification",
        channels = n_channels,
        rules = registry.len(),
        labelled = out.sets.values().filter(|ids| !ids.is_empty()).count(),
        "classified geometry",
    );
    out
}

/// Parallel version of [`classify`]; produces an identical map.
#[cfg(feature = "parallel")]
#[must_use]
pub fn classify_parallel<G>(
    registry: &ClassificationRegistry,
    geometry: &G,
    base: Option<&ClassificationMap>,
) -> ClassificationMap
where
    G: GeometrySource + Sync + ?Sized,
{
    use rayon::prelude::*;

    let mut out = base.cloned().unwrap_or_default();
    let channels: Vec<ChannelId> = geometry.all_channels().into_iter().collect();
    let seeds: Vec<(ChannelId, Vec<ClassificationId>)> = channels
        .into_iter()
        .map(|c| (c, out.sets.remove(&c).unwrap_or_default()))
        .collect();

    let labelled: Vec<(ChannelId, Vec<ClassificationId>)> = seeds
        .into_par_iter()
        .map(|(channel, current)| {
            let labels = label_channel(registry, channel, geometry.lookup(channel), current);
            (channel, labels)
        })
        .collect();

    out.sets.extend(labelled);
    out
}

/// Membership test that treats a channel missing from `map` as an error in
/// the upstream configuration.
///
/// Logs at error level and returns false for unknown channels.
#[must_use]
pub fn in_classification(map: &ClassificationMap, channel: ChannelId, id: ClassificationId) -> bool {
    match map.get(channel) {
        Some(ids) => ids.contains(&id),
        None => {
            tracing::error!(
                domain = "classification",
                %channel,
                domset = %id,
                "channel is not in the configured DOM-set map",
            );
            false
        }
    }
}

/// The default DOM-sets tabulated over the legacy IC86 channel grid.
#[must_use]
pub fn default_classification_map() -> ClassificationMap {
    classify(&ClassificationRegistry::with_defaults(), &legacy_grid(), None)
}
