//! Classification ids and predicate rules.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::channel::{ChannelDescriptor, ChannelId};

/// Identifier of a DOM-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationId(u32);

impl ClassificationId {
    /// Wrap a raw id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ClassificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ClassificationId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Signature every classification predicate satisfies.
pub type Predicate = dyn Fn(ChannelId, &ChannelDescriptor) -> bool + Send + Sync;

/// A named, pure predicate deciding DOM-set membership of one channel.
///
/// Predicates must be deterministic and free of side effects; the classifier
/// may evaluate them in any order and from several threads.
#[derive(Clone)]
pub struct ClassificationRule {
    name: String,
    predicate: Arc<Predicate>,
}

impl ClassificationRule {
    /// Creates a rule from a name and a predicate.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(ChannelId, &ChannelDescriptor) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Human-readable rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the predicate for one channel.
    #[must_use]
    pub fn matches(&self, channel: ChannelId, descriptor: &ChannelDescriptor) -> bool {
        (self.predicate)(channel, descriptor)
    }
}

impl fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
