//! Channel geometry sources.
//!
//! The geometry is supplied by the surrounding pipeline from a calibration
//! snapshot. This crate only ever reads it, through the [`GeometrySource`]
//! trait, so any backing representation can be plugged in.

use std::collections::{BTreeMap, BTreeSet};

use crate::channel::{ChannelDescriptor, ChannelId, ChannelType};

/// Read-only lookup from channel identifier to physical descriptor.
pub trait GeometrySource {
    /// Descriptor for `channel`, or `None` if the geometry does not know it.
    fn lookup(&self, channel: ChannelId) -> Option<&ChannelDescriptor>;

    /// Every channel this geometry knows, in ascending order.
    fn all_channels(&self) -> BTreeSet<ChannelId>;

    /// Number of channels.
    fn len(&self) -> usize {
        self.all_channels().len()
    }

    /// Returns true if the geometry has no channels.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Map-backed geometry for embedded use and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryGeometry {
    channels: BTreeMap<ChannelId, ChannelDescriptor>,
}

impl InMemoryGeometry {
    /// Create an empty geometry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a channel.
    pub fn insert(&mut self, channel: ChannelId, descriptor: ChannelDescriptor) {
        self.channels.insert(channel, descriptor);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with_channel(mut self, channel: ChannelId, descriptor: ChannelDescriptor) -> Self {
        self.insert(channel, descriptor);
        self
    }

    /// Iterate channels with their descriptors in ascending channel order.
    pub fn iter(&self) -> impl Iterator<Item = (&ChannelId, &ChannelDescriptor)> {
        self.channels.iter()
    }
}

impl FromIterator<(ChannelId, ChannelDescriptor)> for InMemoryGeometry {
    fn from_iter<I: IntoIterator<Item = (ChannelId, ChannelDescriptor)>>(iter: I) -> Self {
        Self {
            channels: iter.into_iter().collect(),
        }
    }
}

impl GeometrySource for InMemoryGeometry {
    fn lookup(&self, channel: ChannelId) -> Option<&ChannelDescriptor> {
        self.channels.get(&channel)
    }

    fn all_channels(&self) -> BTreeSet<ChannelId> {
        self.channels.keys().copied().collect()
    }

    fn len(&self) -> usize {
        self.channels.len()
    }
}

/// Highest string number of the IC86 array.
pub const LEGACY_LAST_STRING: i32 = 86;

/// Highest per-string index of the IC86 array (60 in-ice + 4 IceTop).
pub const LEGACY_LAST_OM: u32 = 64;

/// The channel grid used to tabulate the legacy default DOM-sets:
/// strings 1–86 with indices 1–64 each.
///
/// Indices 1–60 are in-ice optical modules and 61–64 IceTop tank modules.
/// Positions are not part of the legacy definitions and are left at zero.
#[must_use]
pub fn legacy_grid() -> InMemoryGeometry {
    (1..=LEGACY_LAST_STRING)
        .flat_map(|string| (1..=LEGACY_LAST_OM).map(move |om| ChannelId::new(string, om)))
        .map(|id| {
            let channel_type = if id.om <= 60 {
                ChannelType::InIce
            } else {
                ChannelType::IceTop
            };
            (id, ChannelDescriptor::of_type(channel_type))
        })
        .collect()
}
