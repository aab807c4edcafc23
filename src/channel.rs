//! Channel identity and physical descriptors.
//!
//! A channel is one readout unit of the detector: an optical module on an
//! in-ice string, an IceTop tank module, a scintillator panel, or one of the
//! auxiliary single-channel detectors that live on string 0.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a single detector channel.
///
/// Ordering is by string first, then by position along the string, which is
/// the order every map keyed by `ChannelId` iterates in.
///
/// # Examples
///
/// ```
/// use domset_registry::ChannelId;
///
/// let a = ChannelId::new(26, 41);
/// let b = ChannelId::new(26, 42);
/// assert!(a < b);
/// assert_eq!(a.to_string(), "OMKey(26,41)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChannelId {
    /// String (or IceTop station) number.
    pub string: i32,
    /// Sequence index along the string.
    pub om: u32,
}

impl ChannelId {
    /// Creates a channel id.
    #[must_use]
    pub const fn new(string: i32, om: u32) -> Self {
        Self { string, om }
    }

    /// Returns true if this channel sits on one of the given strings.
    #[must_use]
    pub fn on_any_string(&self, strings: &[i32]) -> bool {
        strings.contains(&self.string)
    }

    /// Returns true if the sequence index lies in `low..=high`.
    #[must_use]
    pub const fn om_between(&self, low: u32, high: u32) -> bool {
        self.om >= low && self.om <= high
    }

    /// Returns true if the string number lies in `low..=high`.
    #[must_use]
    pub const fn string_between(&self, low: i32, high: i32) -> bool {
        self.string >= low && self.string <= high
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OMKey({},{})", self.string, self.om)
    }
}

impl From<(i32, u32)> for ChannelId {
    fn from((string, om): (i32, u32)) -> Self {
        Self::new(string, om)
    }
}

/// Kind of hardware behind a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    /// Optical module deployed in the ice.
    InIce,
    /// Module inside an IceTop tank.
    IceTop,
    /// Surface scintillator panel.
    Scintillator,
    /// Anything else (air Cherenkov telescope, DM-Ice, test hardware).
    #[default]
    Other,
}

impl ChannelType {
    /// Returns true for in-ice optical modules.
    #[must_use]
    pub const fn is_in_ice(&self) -> bool {
        matches!(self, Self::InIce)
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InIce => write!(f, "in_ice"),
            Self::IceTop => write!(f, "ice_top"),
            Self::Scintillator => write!(f, "scintillator"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Cartesian position in detector coordinates, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[allow(missing_docs)]
    pub x: f64,
    #[allow(missing_docs)]
    pub y: f64,
    #[allow(missing_docs)]
    pub z: f64,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Physical attributes of a channel, owned by the geometry source.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChannelDescriptor {
    /// Position of the channel.
    pub position: Position,
    /// Hardware kind.
    pub channel_type: ChannelType,
}

impl ChannelDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub const fn new(position: Position, channel_type: ChannelType) -> Self {
        Self {
            position,
            channel_type,
        }
    }

    /// Descriptor with a zero position; useful where only the type matters.
    #[must_use]
    pub const fn of_type(channel_type: ChannelType) -> Self {
        Self {
            position: Position::new(0.0, 0.0, 0.0),
            channel_type,
        }
    }
}
