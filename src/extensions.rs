//! DOM-sets and triggers for detector extensions.
//!
//! Upgrade and Gen2 modules are not covered by the default DOM-sets, so their
//! triggers come with their own set definitions. Adding them to an IC86-only
//! configuration is harmless: no IC86 channel falls into these sets.

use crate::channel::{ChannelDescriptor, ChannelId};
use crate::classification::{ClassificationId, ClassificationRule};
use crate::trigger::{TriggerConfigRegistry, TriggerSourceId, VolumeParams};

/// DOM-set of the Upgrade physics region.
pub const UPGRADE_PHYSICS_REGION: ClassificationId = ClassificationId::new(1000);

/// DOM-set of all Gen2 strings.
pub const GEN2_ARRAY: ClassificationId = ClassificationId::new(1002);

/// Config id of the Upgrade volume trigger.
pub const UPGRADE_VOLUME_CONFIG: i32 = 1018;

/// Config id of the Gen2 volume trigger.
pub const GEN2_VOLUME_CONFIG: i32 = 1023;

/// Depth of the detector centre below the surface, in m.
const DETECTOR_CENTRE_DEPTH: f64 = 1948.07;

/// Depth range of the Upgrade physics region, in m below the surface.
const UPGRADE_TOP_DEPTH: f64 = 2163.0;
const UPGRADE_BOTTOM_DEPTH: f64 = 2430.0;

const UPGRADE_FIRST_STRING: i32 = 87;
const UPGRADE_LAST_STRING: i32 = 93;
const GEN2_FIRST_STRING: i32 = 1000;

fn upgrade_physics_region(c: ChannelId, d: &ChannelDescriptor) -> bool {
    if !c.string_between(UPGRADE_FIRST_STRING, UPGRADE_LAST_STRING) || !d.channel_type.is_in_ice() {
        return false;
    }
    let top = DETECTOR_CENTRE_DEPTH - UPGRADE_TOP_DEPTH;
    let bottom = DETECTOR_CENTRE_DEPTH - UPGRADE_BOTTOM_DEPTH;
    (bottom..=top).contains(&d.position.z)
}

fn gen2_array(c: ChannelId, _: &ChannelDescriptor) -> bool {
    c.string >= GEN2_FIRST_STRING
}

/// Extra rules and triggers for the Upgrade and Gen2 detectors.
///
/// Returns the rules in registration order together with a freshly authored
/// trigger registry referencing them.
#[must_use]
pub fn extension_definitions() -> (Vec<(ClassificationId, ClassificationRule)>, TriggerConfigRegistry) {
    let rules = vec![
        (
            UPGRADE_PHYSICS_REGION,
            ClassificationRule::new("UpgradePhysicsRegion", upgrade_physics_region),
        ),
        (GEN2_ARRAY, ClassificationRule::new("Gen2Array", gen2_array)),
    ];

    let mut triggers = TriggerConfigRegistry::new();
    triggers.define_volume_trigger(
        TriggerSourceId::InIcePulses,
        UPGRADE_VOLUME_CONFIG,
        VolumeParams {
            classification: UPGRADE_PHYSICS_REGION,
            time_window: 1750.0,
            multiplicity: 8,
            simple_multiplicity: 8,
            radius: 60_000.0,
            height: 60_000.0,
        },
        None,
    );
    triggers.define_volume_trigger(
        TriggerSourceId::InIcePulses,
        GEN2_VOLUME_CONFIG,
        VolumeParams {
            classification: GEN2_ARRAY,
            time_window: 1750.0,
            multiplicity: 20,
            simple_multiplicity: 20,
            radius: 60_000.0,
            height: 60_000.0,
        },
        None,
    );

    (rules, triggers)
}
