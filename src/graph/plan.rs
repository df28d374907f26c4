//! Compilation plan emitted for the external build orchestrator
//!
//! Flattens a resolved graph into one ordered record per module: the full
//! include search path, the modules to link against, and the modules to
//! load dynamically at runtime. Include paths are qualified as
//! `<Module>/<fragment>` relative to the orchestrator's source root.

use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::context::{BuildConfiguration, BuildContext, TargetPlatform};
use crate::error::GraphError;
use crate::graph::BuildGraph;

/// Everything the orchestrator needs to compile one module
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileUnit {
    /// Module name
    pub module: String,
    /// Include directories, own paths first, then the transitive public
    /// interface of every direct dependency
    pub include_search_paths: Vec<String>,
    /// Modules to link against (direct public and private dependencies)
    pub link_dependencies: Vec<String>,
    /// Modules loaded at runtime rather than link time
    pub dynamic_modules: Vec<String>,
}

/// Ordered compilation plan for one build context
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationPlan {
    /// Platform the plan was resolved for
    pub platform: TargetPlatform,
    /// Configuration the plan was resolved for
    pub configuration: BuildConfiguration,
    /// Compile units in build order (dependencies first)
    pub units: Vec<CompileUnit>,
}

impl CompilationPlan {
    /// Serialize the plan for machine consumption
    pub fn to_json(&self) -> Result<String, GraphError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GraphError::OperationError(format!("failed to serialize plan: {}", e)))
    }
}

impl BuildGraph {
    /// Resolve the graph and flatten it into a compilation plan
    pub fn compilation_plan(&self, context: &BuildContext) -> Result<CompilationPlan, GraphError> {
        let resolved = self.resolve(context)?;

        let mut units = Vec::with_capacity(resolved.build_order.len());
        for name in &resolved.build_order {
            let descriptor = self
                .get(name)
                .ok_or_else(|| GraphError::ModuleNotFound(name.clone()))?;

            let mut include_search_paths = Vec::new();
            let mut seen: HashSet<String> = HashSet::new();
            let push = |paths: &mut Vec<String>, seen: &mut HashSet<String>, p: String| {
                if seen.insert(p.clone()) {
                    paths.push(p);
                }
            };

            // Own paths first: public, then private
            for fragment in descriptor
                .public_include_paths
                .iter()
                .chain(&descriptor.private_include_paths)
            {
                push(
                    &mut include_search_paths,
                    &mut seen,
                    format!("{}/{}", name, fragment),
                );
            }

            // Each direct link dependency contributes its transitive
            // public interface; private paths of dependencies never leak.
            let mut link_dependencies = Vec::new();
            let mut linked: HashSet<&str> = HashSet::new();
            for dep in resolved.link_dependencies.get(name).into_iter().flatten() {
                if !linked.insert(dep.as_str()) {
                    continue;
                }
                link_dependencies.push(dep.clone());
                let interface = self.transitive_public_interface(dep)?;
                for path in interface.include_paths {
                    push(&mut include_search_paths, &mut seen, path);
                }
            }

            units.push(CompileUnit {
                module: name.clone(),
                include_search_paths,
                link_dependencies,
                dynamic_modules: descriptor.dynamic_dependencies.clone(),
            });
        }

        debug!(
            platform = %context.platform,
            configuration = %context.configuration,
            units = units.len(),
            "compilation plan assembled"
        );

        Ok(CompilationPlan {
            platform: context.platform,
            configuration: context.configuration,
            units,
        })
    }
}
