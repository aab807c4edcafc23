//! Trigger configuration records.
//!
//! Triggers are authored per detector configuration, keyed by
//! (source, kind, config id), and merged into the configuration already
//! recorded in the detector snapshot without ever overwriting it.

/// Parameter records and readout windows.
pub mod config;
/// Keys and enumerations.
pub mod key;
/// The registry, its constructors, and the additive merge.
pub mod registry;

pub use config::{
    ClassificationRef, ReadoutWindow, SimpleMultiplicityParams, StringParams, Subdetector, TriggerConfig,
    TriggerParams, VolumeParams, DEFAULT_READOUT_NS, DOMSET_SETTING,
};
pub use key::{TriggerConfigId, TriggerKey, TriggerKind, TriggerSourceId};
pub use registry::{merge_into_existing, TriggerConfigEntry, TriggerConfigRegistry};
