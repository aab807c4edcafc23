//! # domset-registry - DOM-set classification and trigger configuration
//!
//! Builds, validates, and queries the configuration that trigger simulation
//! runs against. It runs once per detector-configuration change, before any
//! event is processed.
//!
//! ## Core Concepts
//!
//! - **DOM-set**: a group of channels selected by a positional predicate
//! - **ClassificationRegistry**: DOM-set id to rule; ids can never be redefined
//! - **ClassificationMap**: each channel's DOM-sets for a given geometry
//! - **TriggerConfigRegistry**: trigger key to parameters; merges are additive
//! - **TriggerHierarchy**: the per-event forest of trigger firings
//!
//! ## Usage
//!
//! ```rust
//! use domset_registry::{
//!     check_references, classify, build_registry, legacy_grid, ClassificationId,
//!     SimpleMultiplicityParams, TriggerConfigRegistry, TriggerSourceId,
//! };
//!
//! let registry = build_registry(Vec::new())?;
//!
//! let mut triggers = TriggerConfigRegistry::new();
//! triggers.define_smt(
//!     TriggerSourceId::InIce,
//!     1006,
//!     SimpleMultiplicityParams {
//!         classification: ClassificationId::new(2),
//!         time_window: 5000.0,
//!         threshold: 8,
//!     },
//!     None,
//! );
//! check_references(&triggers, &registry)?;
//!
//! let map = classify(&registry, &legacy_grid(), None);
//! assert_eq!(map.len(), 86 * 64);
//! # Ok::<(), domset_registry::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod channel;
pub mod classification;
pub mod configure;
pub mod error;
pub mod extensions;
pub mod geometry;
pub mod hierarchy;
pub mod snapshot;
pub mod trigger;
pub mod validation;

// Re-export primary types at crate root for convenience
pub use channel::{ChannelDescriptor, ChannelId, ChannelType, Position};
pub use classification::{
    build_registry, classify, default_classification_map, in_classification, ClassificationId, ClassificationMap,
    ClassificationRegistry, ClassificationRule,
};
pub use configure::{ConfigurationStep, ConfigureOptions, ConfiguredDetector};
pub use error::{ConfigError, HierarchyError, RegistryError, RegistryResult, SnapshotError};
pub use geometry::{legacy_grid, GeometrySource, InMemoryGeometry};
pub use hierarchy::{
    count_triggers, find_triggers, trigger_lengths, NodeId, TriggerFilter, TriggerHierarchy, TriggerRecord,
};
pub use snapshot::DetectorSnapshot;
pub use trigger::{
    merge_into_existing, ReadoutWindow, SimpleMultiplicityParams, StringParams, Subdetector, TriggerConfig,
    TriggerConfigId, TriggerConfigRegistry, TriggerKey, TriggerKind, TriggerParams, TriggerSourceId, VolumeParams,
};
pub use validation::{check_references, check_references_with_fallback};
