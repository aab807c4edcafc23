//! Default DOM-set definitions.
//!
//! These are the DOM-sets the IC86 trigger configuration has always used.
//! They are keyed purely on channel position (string and sequence index);
//! detector extensions register their own sets under new ids instead of
//! editing this table.

use crate::channel::{ChannelDescriptor, ChannelId};

use super::rule::{ClassificationId, ClassificationRule};

/// DeepCore strings.
const DEEPCORE_STRINGS: [i32; 8] = [79, 80, 81, 82, 83, 84, 85, 86];

/// In-ice strings surrounding DeepCore used by sets 4 and 5.
const CORE_7_STRINGS: [i32; 7] = [26, 27, 35, 36, 37, 45, 46];

/// In-ice strings surrounding DeepCore used by set 6.
const CORE_12_STRINGS: [i32; 12] = [25, 26, 27, 34, 35, 36, 37, 44, 45, 46, 47, 54];

/// Stations carrying scintillator panels.
const SCINTILLATOR_STATIONS: [i32; 2] = [12, 62];

/// Stations taking part in the IceTop two-station (volume) trigger.
const ICETOP_2_STATIONS: [i32; 6] = [26, 36, 46, 79, 80, 81];

/// First sequence index of the DeepCore fiducial region.
const DEEPCORE_LOW_OM: u32 = 11;

/// Lowest id used by the default table.
pub const FIRST_DEFAULT_ID: u32 = 2;

/// Highest id used by the default table.
pub const LAST_DEFAULT_ID: u32 = 11;

/// DOM-set 11: the full IC86 in-ice array.
pub const FULL_IN_ICE: ClassificationId = ClassificationId::new(11);

fn deepcore_fiducial(c: ChannelId) -> bool {
    c.on_any_string(&DEEPCORE_STRINGS) && c.om_between(DEEPCORE_LOW_OM, 60)
}

// 2: in-ice strings 1-78
fn in_ice_78(c: ChannelId, _: &ChannelDescriptor) -> bool {
    c.string_between(1, 78) && c.om_between(1, 60)
}

// 3: IceTop IT-81
fn icetop_81(c: ChannelId, _: &ChannelDescriptor) -> bool {
    c.string_between(1, 81) && c.om_between(61, 64)
}

fn deepcore_7_from_41(c: ChannelId, _: &ChannelDescriptor) -> bool {
    deepcore_fiducial(c) || (c.on_any_string(&CORE_7_STRINGS) && c.om_between(41, 60))
}

fn deepcore_7_from_39(c: ChannelId, _: &ChannelDescriptor) -> bool {
    deepcore_fiducial(c) || (c.on_any_string(&CORE_7_STRINGS) && c.om_between(39, 60))
}

fn deepcore_12_from_39(c: ChannelId, _: &ChannelDescriptor) -> bool {
    deepcore_fiducial(c) || (c.on_any_string(&CORE_12_STRINGS) && c.om_between(39, 60))
}

fn scintillators(c: ChannelId, _: &ChannelDescriptor) -> bool {
    c.on_any_string(&SCINTILLATOR_STATIONS) && c.om_between(65, 66)
}

// High-gain tank modules only. Station 26 has the gains of one tank swapped,
// so its high-gain module sits at 62 instead of 61.
fn icetop_2_station(c: ChannelId, _: &ChannelDescriptor) -> bool {
    let first_hg = if c.string == 26 { 62 } else { 61 };
    c.on_any_string(&ICETOP_2_STATIONS) && (c.om == first_hg || c.om == 63)
}

fn ice_act(c: ChannelId, _: &ChannelDescriptor) -> bool {
    c.string == 0 && c.om == 1
}

fn dm_ice(c: ChannelId, _: &ChannelDescriptor) -> bool {
    c.string == 0 && c.om_between(2, 5)
}

// Added so SMT8 and SLOP can exclude DM-Ice explicitly.
fn in_ice_86(c: ChannelId, _: &ChannelDescriptor) -> bool {
    c.string_between(1, 86) && c.om_between(1, 60)
}

/// The default rules in ascending id order.
#[must_use]
pub fn default_rules() -> Vec<(ClassificationId, ClassificationRule)> {
    vec![
        (ClassificationId::new(2), ClassificationRule::new("InIce", in_ice_78)),
        (ClassificationId::new(3), ClassificationRule::new("IceTop", icetop_81)),
        (ClassificationId::new(4), ClassificationRule::new("DeepCoreFiducial7From41", deepcore_7_from_41)),
        (ClassificationId::new(5), ClassificationRule::new("DeepCoreFiducial7From39", deepcore_7_from_39)),
        (ClassificationId::new(6), ClassificationRule::new("DeepCoreFiducial12From39", deepcore_12_from_39)),
        (ClassificationId::new(7), ClassificationRule::new("Scintillators", scintillators)),
        (ClassificationId::new(8), ClassificationRule::new("IceTopTwoStation", icetop_2_station)),
        (ClassificationId::new(9), ClassificationRule::new("IceACT", ice_act)),
        (ClassificationId::new(10), ClassificationRule::new("DMIce", dm_ice)),
        (FULL_IN_ICE, ClassificationRule::new("InIceIC86", in_ice_86)),
    ]
}
