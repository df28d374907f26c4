//! Module discovery
//!
//! Scans a plugin source tree for module.toml manifests. Module directories
//! can nest several levels deep (`Plugins/<Plugin>/Source/<Module>/`), so
//! the scan recurses with a depth cap.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::descriptor::validator::{DescriptorValidator, ValidationResult};
use crate::descriptor::ModuleManifest;
use crate::error::GraphError;
use crate::graph::BuildGraph;

/// Manifest file name looked for in each directory
pub const MANIFEST_FILE: &str = "module.toml";

/// Discovered module information
#[derive(Debug, Clone)]
pub struct DiscoveredModule {
    /// Directory the manifest was found in
    pub directory: PathBuf,
    /// Parsed manifest
    pub manifest: ModuleManifest,
}

/// Module discovery scanner
pub struct ModuleDiscovery {
    /// Root directory to scan for modules
    root: PathBuf,
    /// Recursion depth cap
    max_depth: usize,
}

impl ModuleDiscovery {
    /// Create a new scanner over `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            max_depth: 8,
        }
    }

    /// Discover all modules under the root directory
    ///
    /// Directories without a manifest are descended into; unparsable
    /// manifests are logged and skipped so one broken module does not hide
    /// the rest of the tree. Results are sorted by module name.
    pub fn discover_modules(&self) -> Result<Vec<DiscoveredModule>, GraphError> {
        info!(root = %self.root.display(), "discovering modules");

        if !self.root.is_dir() {
            return Err(GraphError::OperationError(format!(
                "module root is not a directory: {}",
                self.root.display()
            )));
        }

        let mut modules = Vec::new();
        self.scan_dir(&self.root, 0, &mut modules)?;
        modules.sort_by(|a, b| a.manifest.name.cmp(&b.manifest.name));

        info!("discovered {} modules", modules.len());
        Ok(modules)
    }

    fn scan_dir(
        &self,
        dir: &Path,
        depth: usize,
        out: &mut Vec<DiscoveredModule>,
    ) -> Result<(), GraphError> {
        if depth > self.max_depth {
            debug!(dir = %dir.display(), "depth cap reached, not descending");
            return Ok(());
        }

        let manifest_path = dir.join(MANIFEST_FILE);
        if manifest_path.is_file() {
            match ModuleManifest::from_file(&manifest_path) {
                Ok(manifest) => {
                    debug!(module = %manifest.name, dir = %dir.display(), "found manifest");
                    out.push(DiscoveredModule {
                        directory: dir.to_path_buf(),
                        manifest,
                    });
                }
                Err(e) => {
                    warn!(path = %manifest_path.display(), %e, "skipping unparsable manifest");
                }
            }
            // A module directory does not nest further modules
            return Ok(());
        }

        let entries = fs::read_dir(dir).map_err(|e| {
            GraphError::OperationError(format!(
                "failed to read directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| {
                GraphError::OperationError(format!("failed to read directory entry: {}", e))
            })?;
            let path = entry.path();
            if path.is_dir() {
                self.scan_dir(&path, depth + 1, out)?;
            }
        }
        Ok(())
    }

    /// Discover a specific module by name
    pub fn discover_module(&self, name: &str) -> Result<DiscoveredModule, GraphError> {
        self.discover_modules()?
            .into_iter()
            .find(|m| m.manifest.name == name)
            .ok_or_else(|| GraphError::ModuleNotFound(name.to_string()))
    }

    /// Discover, validate, and assemble a build graph
    ///
    /// Structurally invalid descriptors fail the load; the orchestrator
    /// treats a bad manifest as a build-configuration error, not a warning.
    pub fn load_graph(&self) -> Result<BuildGraph, GraphError> {
        let discovered = self.discover_modules()?;
        let validator = DescriptorValidator::new();

        let mut graph = BuildGraph::new();
        for module in discovered {
            let descriptor = module.manifest.to_descriptor()?;
            if let ValidationResult::Invalid(errors) = validator.validate(&descriptor) {
                return Err(GraphError::InvalidManifest(format!(
                    "module {} ({}): {}",
                    descriptor.name,
                    module.directory.display(),
                    errors.join("; ")
                )));
            }
            graph.insert(descriptor)?;
        }
        Ok(graph)
    }
}
