//! Detector-configuration snapshot slot.
//!
//! The surrounding pipeline owns the persisted encoding of the detector
//! status. This module only needs a faithful round-trip of the two entities
//! this crate reads and writes back, so it uses plain serde JSON with stable,
//! key-ordered output.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classification::ClassificationMap;
use crate::error::SnapshotError;
use crate::trigger::TriggerConfigRegistry;

/// The trigger configuration and DOM-set map recorded for one detector
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectorSnapshot {
    /// Configured triggers.
    #[serde(default)]
    pub trigger_configs: TriggerConfigRegistry,

    /// DOM-set membership, if one was ever recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifications: Option<ClassificationMap>,
}

impl DetectorSnapshot {
    /// Creates a snapshot holding only trigger configs.
    #[must_use]
    pub fn new(trigger_configs: TriggerConfigRegistry) -> Self {
        Self {
            trigger_configs,
            classifications: None,
        }
    }

    /// Sets the DOM-set map.
    #[must_use]
    pub fn with_classifications(mut self, classifications: ClassificationMap) -> Self {
        self.classifications = Some(classifications);
        self
    }

    /// Read a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// `SnapshotError::Io` if the file cannot be read, `Serialization` if it
    /// is not a valid snapshot.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        from_json(&raw)
    }

    /// Write this snapshot to a JSON file, replacing any previous content.
    ///
    /// # Errors
    ///
    /// `SnapshotError::Io` if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let json = to_json_pretty(self)?;
        fs::write(path, json).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Serialize a snapshot to pretty JSON.
///
/// # Errors
///
/// `SnapshotError::Serialization` if a value cannot be encoded (e.g. a
/// non-finite float).
pub fn to_json_pretty(snapshot: &DetectorSnapshot) -> Result<String, SnapshotError> {
    serde_json::to_string_pretty(snapshot).map_err(|e| SnapshotError::Serialization {
        message: format!("serialize snapshot: {e}"),
    })
}

/// Deserialize a snapshot from JSON.
///
/// # Errors
///
/// `SnapshotError::Serialization` on malformed input.
pub fn from_json(s: &str) -> Result<DetectorSnapshot, SnapshotError> {
    serde_json::from_str::<DetectorSnapshot>(s).map_err(|e| SnapshotError::Serialization {
        message: format!("deserialize snapshot: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::default_classification_map;
    use crate::trigger::{SimpleMultiplicityParams, TriggerSourceId};
    use crate::ClassificationId;

    fn sample() -> DetectorSnapshot {
        let mut triggers = TriggerConfigRegistry::new();
        triggers.define_smt(
            TriggerSourceId::InIce,
            1006,
            SimpleMultiplicityParams {
                classification: ClassificationId::new(2),
                time_window: 5000.0,
                threshold: 8,
            },
            None,
        );
        DetectorSnapshot::new(triggers).with_classifications(default_classification_map())
    }

    #[test]
    fn json_roundtrip_works() {
        let snapshot = sample();
        let json = to_json_pretty(&snapshot).unwrap();
        let decoded = from_json(&json).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn missing_fields_default() {
        let decoded = from_json("{}").unwrap();
        assert!(decoded.trigger_configs.is_empty());
        assert!(decoded.classifications.is_none());
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = from_json("{\"trigger_configs\": 3}").unwrap_err();
        assert!(matches!(err, SnapshotError::Serialization { .. }));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DetectorSnapshot::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }
}
