//! Trigger identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Subsystem a trigger reads its hits from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerSourceId {
    /// In-ice launches.
    InIce,
    /// IceTop launches.
    IceTop,
    /// In-ice reco pulses, used by Upgrade and Gen2 triggers.
    InIcePulses,
    /// Global trigger (merged/throughput records).
    Global,
}

impl TriggerSourceId {
    /// Returns true for the IceTop subdetector.
    #[must_use]
    pub const fn is_icetop(&self) -> bool {
        matches!(self, Self::IceTop)
    }
}

impl fmt::Display for TriggerSourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InIce => "IN_ICE",
            Self::IceTop => "ICE_TOP",
            Self::InIcePulses => "IN_ICE_PULSES",
            Self::Global => "GLOBAL",
        };
        f.write_str(s)
    }
}

/// Trigger algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerKind {
    /// N hits within a sliding time window.
    SimpleMultiplicity,
    /// N hits within a coherence length on one string.
    String,
    /// N hits inside a cylinder.
    Volume,
    /// Slow particle (SLOP).
    SlowParticle,
    /// Faint particle.
    FaintParticle,
    /// Global trigger folding overlapping sub-triggers.
    Merged,
    /// Global throughput record.
    Throughput,
}

impl TriggerKind {
    /// Returns true for the kinds authored by the registry constructors.
    #[must_use]
    pub const fn is_authored(&self) -> bool {
        matches!(self, Self::SimpleMultiplicity | Self::String | Self::Volume)
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::SimpleMultiplicity => "SIMPLE_MULTIPLICITY",
            Self::String => "STRING",
            Self::Volume => "VOLUME",
            Self::SlowParticle => "SLOW_PARTICLE",
            Self::FaintParticle => "FAINT_PARTICLE",
            Self::Merged => "MERGED",
            Self::Throughput => "THROUGHPUT",
        };
        f.write_str(s)
    }
}

/// Disambiguates configurations sharing a source and kind.
pub type TriggerConfigId = i32;

/// Globally unique identifier of one trigger configuration.
///
/// # Examples
///
/// ```
/// use domset_registry::{TriggerKey, TriggerKind, TriggerSourceId};
///
/// let key = TriggerKey::new(TriggerSourceId::InIce, TriggerKind::SimpleMultiplicity, 1006);
/// assert_eq!(key.to_string(), "[IN_ICE:SIMPLE_MULTIPLICITY:1006]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TriggerKey {
    /// Source subsystem.
    pub source: TriggerSourceId,
    /// Algorithm family.
    pub kind: TriggerKind,
    /// Configuration id.
    pub config_id: TriggerConfigId,
}

impl TriggerKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(source: TriggerSourceId, kind: TriggerKind, config_id: TriggerConfigId) -> Self {
        Self {
            source,
            kind,
            config_id,
        }
    }
}

impl fmt::Display for TriggerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}:{}]", self.source, self.kind, self.config_id)
    }
}
