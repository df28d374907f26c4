//! Build-graph error types
//!
//! All errors are build-configuration failures: resolution is deterministic
//! over static input, so none of these are retryable.

use std::fmt;
use thiserror::Error;

use crate::context::TargetPlatform;

/// One unresolved reference: the missing name and the module that names it
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MissingDependency {
    /// Name that did not resolve against the known module set
    pub name: String,
    /// Module whose dependency list names it
    pub referenced_by: String,
}

impl MissingDependency {
    pub fn new(name: impl Into<String>, referenced_by: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            referenced_by: referenced_by.into(),
        }
    }
}

impl fmt::Display for MissingDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (referenced by {})", self.name, self.referenced_by)
    }
}

fn join_missing(missing: &[MissingDependency]) -> String {
    missing
        .iter()
        .map(MissingDependency::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while loading manifests or resolving the build graph
#[derive(Debug, Error)]
pub enum GraphError {
    /// One or more dependency names did not resolve against the known
    /// module set. `missing` is sorted and deduplicated across the whole
    /// graph so a single resolution pass reports every unresolved name
    /// along with the module that references it.
    #[error("unknown dependency module(s): {}", join_missing(missing))]
    UnknownModule { missing: Vec<MissingDependency> },

    #[error("module '{0}' lists itself as a dependency")]
    SelfDependency(String),

    #[error("duplicate module name in graph: {0}")]
    DuplicateModule(String),

    #[error("circular dependency among modules: {0}")]
    CircularDependency(String),

    #[error("module '{module}' does not support target platform {platform}")]
    PlatformUnsupported {
        module: String,
        platform: TargetPlatform,
    },

    #[error("invalid module manifest: {0}")]
    InvalidManifest(String),

    #[error("module not found: {0}")]
    ModuleNotFound(String),

    #[error("operation failed: {0}")]
    OperationError(String),
}
