//! Module manifest parsing
//!
//! Handles parsing module.toml manifests into immutable module descriptors.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::context::TargetPlatform;
use crate::error::GraphError;

/// Module manifest (module.toml structure)
///
/// Field names follow the orchestrator's wire format (camelCase). Absent
/// list fields are empty sequences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleManifest {
    /// Module name (unique identifier)
    pub name: String,
    /// Include path fragments exposed to dependents
    #[serde(default)]
    pub public_include_paths: Vec<String>,
    /// Include path fragments visible only within this module
    #[serde(default)]
    pub private_include_paths: Vec<String>,
    /// Modules whose public interface this module re-exposes transitively
    #[serde(default)]
    pub public_dependency_modules: Vec<String>,
    /// Modules statically linked but not re-exposed
    #[serde(default)]
    pub private_dependency_modules: Vec<String>,
    /// Modules loaded at runtime rather than link time
    #[serde(default)]
    pub dynamically_loaded_modules: Vec<String>,
    /// Platforms the module may be built for (absent = all platforms)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_platforms: Option<Vec<TargetPlatform>>,
}

impl ModuleManifest {
    /// Load manifest from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GraphError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            GraphError::InvalidManifest(format!("failed to read manifest file: {}", e))
        })?;
        Self::from_str(&contents)
    }

    /// Parse manifest from TOML text
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(contents: &str) -> Result<Self, GraphError> {
        let manifest: ModuleManifest = toml::from_str(contents).map_err(|e| {
            GraphError::InvalidManifest(format!("failed to parse manifest TOML: {}", e))
        })?;

        if manifest.name.is_empty() {
            return Err(GraphError::InvalidManifest(
                "module name cannot be empty".to_string(),
            ));
        }

        Ok(manifest)
    }

    /// Convert to an immutable descriptor
    ///
    /// Self-references in any dependency set are rejected here, before the
    /// descriptor can enter a build graph.
    pub fn to_descriptor(&self) -> Result<ModuleDescriptor, GraphError> {
        let refers_to_self = self
            .public_dependency_modules
            .iter()
            .chain(&self.private_dependency_modules)
            .chain(&self.dynamically_loaded_modules)
            .any(|dep| dep == &self.name);
        if refers_to_self {
            return Err(GraphError::SelfDependency(self.name.clone()));
        }

        Ok(ModuleDescriptor {
            name: self.name.clone(),
            public_include_paths: self.public_include_paths.clone(),
            private_include_paths: self.private_include_paths.clone(),
            public_dependencies: self.public_dependency_modules.clone(),
            private_dependencies: self.private_dependency_modules.clone(),
            dynamic_dependencies: self.dynamically_loaded_modules.clone(),
            supported_platforms: self.supported_platforms.clone(),
        })
    }
}

impl TryFrom<ModuleManifest> for ModuleDescriptor {
    type Error = GraphError;

    fn try_from(manifest: ModuleManifest) -> Result<Self, Self::Error> {
        manifest.to_descriptor()
    }
}

/// One module's build-time identity and its edges in the dependency graph
///
/// Constructed once when the build graph is assembled and immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Module name (unique identifier)
    pub name: String,
    /// Include path fragments exposed to dependents
    pub public_include_paths: Vec<String>,
    /// Include path fragments visible only within this module
    pub private_include_paths: Vec<String>,
    /// Modules whose public interface is re-exposed to dependents
    pub public_dependencies: Vec<String>,
    /// Modules statically linked but not re-exposed
    pub private_dependencies: Vec<String>,
    /// Modules loaded at runtime rather than link time
    pub dynamic_dependencies: Vec<String>,
    /// Platforms the module may be built for (absent = all platforms)
    pub supported_platforms: Option<Vec<TargetPlatform>>,
}

impl ModuleDescriptor {
    /// Whether this module may be built for `platform`
    pub fn supports(&self, platform: TargetPlatform) -> bool {
        match &self.supported_platforms {
            Some(platforms) => platforms.contains(&platform),
            None => true,
        }
    }

    /// Dependencies that form link-time edges (public, then private)
    pub fn link_dependencies(&self) -> impl Iterator<Item = &str> {
        self.public_dependencies
            .iter()
            .chain(&self.private_dependencies)
            .map(String::as_str)
    }

    /// Every referenced module name, including dynamically loaded ones
    pub fn referenced_modules(&self) -> impl Iterator<Item = &str> {
        self.public_dependencies
            .iter()
            .chain(&self.private_dependencies)
            .chain(&self.dynamic_dependencies)
            .map(String::as_str)
    }
}
