//! Trigger parameter records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classification::ClassificationId;

use super::key::TriggerSourceId;

/// Default half-width of the readout window, in ns.
pub const DEFAULT_READOUT_NS: f64 = 5000.0;

/// Settings key naming the DOM-set of an opaque trigger.
pub const DOMSET_SETTING: &str = "domSet";

/// Subdetector a readout window applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subdetector {
    #[allow(missing_docs)]
    InIce,
    #[allow(missing_docs)]
    IceTop,
}

impl From<TriggerSourceId> for Subdetector {
    fn from(source: TriggerSourceId) -> Self {
        if source.is_icetop() {
            Self::IceTop
        } else {
            Self::InIce
        }
    }
}

/// Time margins read out around a trigger, in ns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadoutWindow {
    /// Read out this long before the trigger start.
    pub minus: f64,
    /// Read out this long after the trigger end.
    pub plus: f64,
    /// Shift applied to the whole window.
    pub offset: f64,
}

impl ReadoutWindow {
    /// Creates a window.
    #[must_use]
    pub const fn new(minus: f64, plus: f64, offset: f64) -> Self {
        Self { minus, plus, offset }
    }
}

impl Default for ReadoutWindow {
    fn default() -> Self {
        Self::new(DEFAULT_READOUT_NS, DEFAULT_READOUT_NS, 0.0)
    }
}

/// Simple multiplicity (SMT) parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpleMultiplicityParams {
    /// DOM-set the trigger reads from.
    pub classification: ClassificationId,
    /// Sliding window length, in ns.
    pub time_window: f64,
    /// Hits required within the window.
    pub threshold: u32,
}

/// String (cluster) trigger parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StringParams {
    /// DOM-set the trigger reads from.
    pub classification: ClassificationId,
    /// Sliding window length, in ns.
    pub time_window: f64,
    /// Hits required within the coherence length.
    pub multiplicity: u32,
    /// Span of neighbouring modules counted together.
    pub coherence_length: u32,
}

/// Volume (cylinder) trigger parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeParams {
    /// DOM-set the trigger reads from.
    pub classification: ClassificationId,
    /// Sliding window length, in ns.
    pub time_window: f64,
    /// Hits required inside the cylinder.
    pub multiplicity: u32,
    /// Simple multiplicity that fires regardless of topology.
    pub simple_multiplicity: u32,
    /// Cylinder radius, in m.
    pub radius: f64,
    /// Cylinder height, in m.
    pub height: f64,
}

/// Kind-specific trigger parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerParams {
    #[allow(missing_docs)]
    SimpleMultiplicity(SimpleMultiplicityParams),
    #[allow(missing_docs)]
    String(StringParams),
    #[allow(missing_docs)]
    Volume(VolumeParams),
    /// Free-form settings of a kind this crate does not author (slow
    /// particle, faint particle, ...), kept as found in the snapshot.
    Settings {
        #[allow(missing_docs)]
        settings: BTreeMap<String, String>,
    },
}

/// How a trigger refers to its DOM-set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationRef {
    /// References this DOM-set.
    Declared(ClassificationId),
    /// Carries no DOM-set.
    Absent,
    /// Carries a `domSet` setting that is not a valid id.
    Unparseable(String),
}

impl TriggerParams {
    /// The DOM-set this trigger reads from.
    #[must_use]
    pub fn classification(&self) -> ClassificationRef {
        match self {
            Self::SimpleMultiplicity(p) => ClassificationRef::Declared(p.classification),
            Self::String(p) => ClassificationRef::Declared(p.classification),
            Self::Volume(p) => ClassificationRef::Declared(p.classification),
            Self::Settings { settings } => match settings.get(DOMSET_SETTING) {
                None => ClassificationRef::Absent,
                Some(raw) => raw
                    .trim()
                    .parse::<u32>()
                    .map(|id| ClassificationRef::Declared(ClassificationId::new(id)))
                    .unwrap_or_else(|_| ClassificationRef::Unparseable(raw.clone())),
            },
        }
    }
}

/// One configured trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Algorithm name, e.g. `SimpleMajorityTrigger`.
    pub name: String,
    /// Kind-specific parameters.
    pub params: TriggerParams,
    /// Readout window per touched subdetector.
    pub readout: BTreeMap<Subdetector, ReadoutWindow>,
}

impl TriggerConfig {
    /// Creates a config reading out one subdetector.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        params: TriggerParams,
        subdetector: Subdetector,
        window: ReadoutWindow,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            readout: BTreeMap::from([(subdetector, window)]),
        }
    }

    /// Adds (or replaces) the readout window of another subdetector.
    #[must_use]
    pub fn with_readout(mut self, subdetector: Subdetector, window: ReadoutWindow) -> Self {
        self.readout.insert(subdetector, window);
        self
    }

    /// Readout window of `subdetector`, if this trigger touches it.
    #[must_use]
    pub fn readout_for(&self, subdetector: Subdetector) -> Option<&ReadoutWindow> {
        self.readout.get(&subdetector)
    }

    /// Shorthand for `self.params.classification()`.
    #[must_use]
    pub fn classification(&self) -> ClassificationRef {
        self.params.classification()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(settings: &[(&str, &str)]) -> TriggerParams {
        TriggerParams::Settings {
            settings: settings
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_default_readout() {
        let w = ReadoutWindow::default();
        assert_eq!(w.minus, 5000.0);
        assert_eq!(w.plus, 5000.0);
        assert_eq!(w.offset, 0.0);
    }

    #[test]
    fn test_subdetector_from_source() {
        assert_eq!(Subdetector::from(TriggerSourceId::IceTop), Subdetector::IceTop);
        assert_eq!(Subdetector::from(TriggerSourceId::InIce), Subdetector::InIce);
        assert_eq!(Subdetector::from(TriggerSourceId::InIcePulses), Subdetector::InIce);
    }

    #[test]
    fn test_classification_of_opaque_settings() {
        assert_eq!(
            opaque(&[("domSet", "11"), ("t_proximity", "2500")]).classification(),
            ClassificationRef::Declared(ClassificationId::new(11))
        );
        assert_eq!(opaque(&[("t_proximity", "2500")]).classification(), ClassificationRef::Absent);
        assert_eq!(
            opaque(&[("domSet", "eleven")]).classification(),
            ClassificationRef::Unparseable("eleven".to_string())
        );
    }

    #[test]
    fn test_config_readout_slots() {
        let config = TriggerConfig::new(
            "SimpleMajorityTrigger",
            TriggerParams::SimpleMultiplicity(SimpleMultiplicityParams {
                classification: ClassificationId::new(3),
                time_window: 6000.0,
                threshold: 6,
            }),
            Subdetector::IceTop,
            ReadoutWindow::new(10_000.0, 10_000.0, 0.0),
        );
        assert!(config.readout_for(Subdetector::InIce).is_none());
        assert_eq!(config.readout_for(Subdetector::IceTop).map(|w| w.minus), Some(10_000.0));

        let both = config.with_readout(Subdetector::InIce, ReadoutWindow::default());
        assert_eq!(both.readout.len(), 2);
    }

    #[test]
    fn test_config_serialization() {
        let config = TriggerConfig::new(
            "CylinderTrigger",
            TriggerParams::Volume(VolumeParams {
                classification: ClassificationId::new(1000),
                time_window: 1750.0,
                multiplicity: 8,
                simple_multiplicity: 8,
                radius: 60_000.0,
                height: 60_000.0,
            }),
            Subdetector::InIce,
            ReadoutWindow::default(),
        );
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"type\":\"volume\""));
        assert!(json.contains("\"in_ice\""));
        let back: TriggerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
