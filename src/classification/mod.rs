//! DOM-set classification.
//!
//! A DOM-set is a group of channels selected by a positional predicate. The
//! registry holds the predicates, and the classifier evaluates them over a
//! geometry to produce the per-channel membership map triggers read from.

/// Default DOM-set table.
pub mod builtin;
/// Membership maps and the classifier.
pub mod map;
/// DOM-set rule registry.
pub mod registry;
/// Ids and predicate rules.
pub mod rule;

pub use builtin::{default_rules, FULL_IN_ICE};
#[cfg(feature = "parallel")]
pub use map::classify_parallel;
pub use map::{classify, default_classification_map, in_classification, ClassificationEntry, ClassificationMap};
pub use registry::{build_registry, ClassificationRegistry};
pub use rule::{ClassificationId, ClassificationRule, Predicate};
