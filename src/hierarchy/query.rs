//! Queries over a trigger hierarchy.
//!
//! All queries test every record individually, at any depth, and report
//! results in preorder. No match yields an empty result.

use crate::trigger::{TriggerConfigId, TriggerKey, TriggerKind, TriggerSourceId};

use super::{TriggerHierarchy, TriggerRecord};

/// Conjunction of optional key filters. An unset field matches anything.
///
/// # Examples
///
/// ```
/// use domset_registry::{TriggerFilter, TriggerKey, TriggerKind, TriggerSourceId};
///
/// let filter = TriggerFilter::any().source(TriggerSourceId::InIce).config_id(1008);
/// assert!(filter.matches(&TriggerKey::new(TriggerSourceId::InIce, TriggerKind::SimpleMultiplicity, 1008)));
/// assert!(!filter.matches(&TriggerKey::new(TriggerSourceId::InIce, TriggerKind::SimpleMultiplicity, 1010)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerFilter {
    /// Required source.
    pub source: Option<TriggerSourceId>,
    /// Required kind.
    pub kind: Option<TriggerKind>,
    /// Required configuration id.
    pub config_id: Option<TriggerConfigId>,
}

impl TriggerFilter {
    /// A filter matching every record.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            source: None,
            kind: None,
            config_id: None,
        }
    }

    /// Require `source`.
    #[must_use]
    pub const fn source(mut self, source: TriggerSourceId) -> Self {
        self.source = Some(source);
        self
    }

    /// Require `kind`.
    #[must_use]
    pub const fn kind(mut self, kind: TriggerKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Require `config_id`.
    #[must_use]
    pub const fn config_id(mut self, config_id: TriggerConfigId) -> Self {
        self.config_id = Some(config_id);
        self
    }

    /// Returns true if `key` passes every set filter.
    #[must_use]
    pub fn matches(&self, key: &TriggerKey) -> bool {
        self.source.map_or(true, |s| s == key.source)
            && self.kind.map_or(true, |k| k == key.kind)
            && self.config_id.map_or(true, |c| c == key.config_id)
    }
}

impl From<TriggerKey> for TriggerFilter {
    fn from(key: TriggerKey) -> Self {
        Self::any().source(key.source).kind(key.kind).config_id(key.config_id)
    }
}

/// Records whose key equals `key`.
///
/// The iterator is lazy; clone it to traverse again.
pub fn find_triggers(forest: &TriggerHierarchy, key: TriggerKey) -> impl Iterator<Item = &TriggerRecord> + Clone {
    forest.iter().filter(move |r| r.key == key)
}

/// Records passing `filter`.
pub fn find_matching(forest: &TriggerHierarchy, filter: TriggerFilter) -> impl Iterator<Item = &TriggerRecord> + Clone {
    forest.iter().filter(move |r| filter.matches(&r.key))
}

/// Number of records passing `filter`.
#[must_use]
pub fn count_triggers(forest: &TriggerHierarchy, filter: TriggerFilter) -> usize {
    find_matching(forest, filter).count()
}

/// Interval lengths of the records passing `filter`.
#[must_use]
pub fn trigger_lengths(forest: &TriggerHierarchy, filter: TriggerFilter) -> Vec<f64> {
    find_matching(forest, filter).map(TriggerRecord::duration).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMT_1008: TriggerKey = TriggerKey::new(TriggerSourceId::InIce, TriggerKind::SimpleMultiplicity, 1008);
    const SMT_1010: TriggerKey = TriggerKey::new(TriggerSourceId::InIce, TriggerKind::SimpleMultiplicity, 1010);

    fn two_smts() -> TriggerHierarchy {
        let mut h = TriggerHierarchy::new();
        h.insert_root(TriggerRecord::new(SMT_1008, 0.0, 1000.0));
        h.insert_root(TriggerRecord::new(SMT_1010, 500.0, 2500.0));
        h
    }

    #[test]
    fn test_find_triggers_exact_key() {
        let h = two_smts();
        assert_eq!(find_triggers(&h, SMT_1008).count(), 1);
        assert_eq!(find_triggers(&h, SMT_1010).count(), 1);
        let other = TriggerKey::new(TriggerSourceId::IceTop, TriggerKind::SimpleMultiplicity, 102);
        assert_eq!(find_triggers(&h, other).count(), 0);
    }

    #[test]
    fn test_count_filters() {
        let h = two_smts();
        let in_ice = TriggerFilter::any().source(TriggerSourceId::InIce);
        assert_eq!(count_triggers(&h, in_ice), 2);
        assert_eq!(count_triggers(&h, in_ice.config_id(1008)), 1);
        assert_eq!(count_triggers(&h, TriggerFilter::any().kind(TriggerKind::SimpleMultiplicity)), 2);
        assert_eq!(count_triggers(&h, TriggerFilter::any().kind(TriggerKind::Volume)), 0);
        assert_eq!(count_triggers(&h, TriggerFilter::any()), 2);
        assert_eq!(count_triggers(&h, TriggerFilter::from(SMT_1010)), 1);
    }

    #[test]
    fn test_lengths() {
        let h = two_smts();
        let in_ice = TriggerFilter::any().source(TriggerSourceId::InIce);
        assert_eq!(trigger_lengths(&h, in_ice), vec![1000.0, 2500.0]);
        assert_eq!(trigger_lengths(&h, in_ice.config_id(1010)), vec![2500.0]);
        assert!(trigger_lengths(&h, TriggerFilter::any().source(TriggerSourceId::IceTop)).is_empty());
    }

    #[test]
    fn test_empty_forest() {
        let h = TriggerHierarchy::new();
        assert_eq!(count_triggers(&h, TriggerFilter::any()), 0);
        assert!(trigger_lengths(&h, TriggerFilter::any()).is_empty());
        assert_eq!(find_triggers(&h, SMT_1008).count(), 0);
    }
}
