//! Error types for the registry.
//!
//! Configuration errors are authoring mistakes in the trigger or detector
//! configuration. They are detected while the registries are built, are never
//! retried, and must abort the run: substituting a guessed classification
//! would silently change which channels a trigger looks at.

use std::path::PathBuf;

use thiserror::Error;

use crate::classification::ClassificationId;
use crate::trigger::TriggerKey;

/// Fatal errors in detector or trigger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("DOM-set {id} is already defined; redefining an existing DOM-set is not allowed, choose a new id")]
    DuplicateClassification {
        id: ClassificationId,
    },

    #[error("Trigger {key} references DOM-set {classification}, which is neither a default definition nor a registered extra rule")]
    MissingClassification {
        key: TriggerKey,
        classification: ClassificationId,
    },

    #[error("Trigger {key} has setting '{setting}' with unparseable value '{value}'")]
    InvalidSetting {
        key: TriggerKey,
        setting: String,
        value: String,
    },
}

/// Errors reading or writing a detector-configuration snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot serialization failed: {message}")]
    Serialization {
        message: String,
    },
}

/// Errors raised while building the trigger hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("Parent node {index} does not exist in this hierarchy")]
    UnknownParent {
        index: usize,
    },
}

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),
}

impl RegistryError {
    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if this is a snapshot error.
    #[must_use]
    pub const fn is_snapshot(&self) -> bool {
        matches!(self, Self::Snapshot(_))
    }

    /// Returns true if retrying the same call could succeed.
    ///
    /// Only snapshot I/O qualifies; configuration errors won't change on retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Snapshot(SnapshotError::Io { .. }))
    }
}

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
