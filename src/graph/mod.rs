//! Build graph assembly and resolution
//!
//! Collects module descriptors, validates every cross-module reference, and
//! produces a deterministic build order via topological sort.

pub mod plan;

pub use plan::{CompilationPlan, CompileUnit};

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::debug;

use crate::context::BuildContext;
use crate::descriptor::ModuleDescriptor;
use crate::error::{GraphError, MissingDependency};

/// The set of known module descriptors, keyed by module name
///
/// Descriptors are inserted once while the graph is assembled; resolution
/// never mutates the graph.
#[derive(Debug, Clone, Default)]
pub struct BuildGraph {
    modules: BTreeMap<String, ModuleDescriptor>,
}

/// Outcome of resolving a build graph against a context
#[derive(Debug, Clone)]
pub struct ResolvedGraph {
    /// Context the graph was resolved for
    pub context: BuildContext,
    /// Modules in build order (dependencies first)
    pub build_order: Vec<String>,
    /// Link-time dependencies per module (public then private)
    pub link_dependencies: HashMap<String, Vec<String>>,
}

impl ResolvedGraph {
    /// Position of a module in the build order
    pub fn position(&self, name: &str) -> Option<usize> {
        self.build_order.iter().position(|m| m == name)
    }
}

/// Closure of modules and include paths visible to dependents of one module
///
/// Include paths are qualified as `<Module>/<fragment>` so the orchestrator
/// can join them against its source root. Both collections are sorted, so
/// recomputing the interface always yields the same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitiveInterface {
    /// Modules whose symbols are visible (the module itself plus the
    /// closure of its public dependencies)
    pub modules: BTreeSet<String>,
    /// Qualified public include paths of every module in the closure
    pub include_paths: Vec<String>,
}

impl BuildGraph {
    /// Create an empty build graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a graph from descriptors, rejecting duplicate names
    pub fn from_descriptors<I>(descriptors: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = ModuleDescriptor>,
    {
        let mut graph = Self::new();
        for descriptor in descriptors {
            graph.insert(descriptor)?;
        }
        Ok(graph)
    }

    /// Insert one descriptor
    pub fn insert(&mut self, descriptor: ModuleDescriptor) -> Result<(), GraphError> {
        if self.modules.contains_key(&descriptor.name) {
            return Err(GraphError::DuplicateModule(descriptor.name));
        }
        self.modules.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Look up a descriptor by name
    pub fn get(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.get(name)
    }

    /// Iterate descriptors in name order
    pub fn modules(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.values()
    }

    /// Number of modules in the graph
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the graph holds no modules
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Resolve the graph against a build context
    ///
    /// Validates that every referenced name (including dynamically loaded
    /// modules) is known, that every module supports the target platform,
    /// and that the link-time edge set is acyclic. Unresolved names are
    /// collected across the whole graph before failing, so one pass reports
    /// every missing module.
    pub fn resolve(&self, context: &BuildContext) -> Result<ResolvedGraph, GraphError> {
        let mut missing: BTreeSet<MissingDependency> = BTreeSet::new();
        for descriptor in self.modules.values() {
            for dep in descriptor.referenced_modules() {
                if !self.modules.contains_key(dep) {
                    debug!(
                        module = %descriptor.name,
                        dependency = %dep,
                        "unresolved module reference"
                    );
                    missing.insert(MissingDependency::new(dep, &descriptor.name));
                }
            }
        }
        if !missing.is_empty() {
            return Err(GraphError::UnknownModule {
                missing: missing.into_iter().collect(),
            });
        }

        for descriptor in self.modules.values() {
            if !descriptor.supports(context.platform) {
                return Err(GraphError::PlatformUnsupported {
                    module: descriptor.name.clone(),
                    platform: context.platform,
                });
            }
        }

        let build_order = self.topological_order()?;
        debug!(?build_order, "graph resolution complete");

        let link_dependencies = self
            .modules
            .values()
            .map(|d| {
                (
                    d.name.clone(),
                    d.link_dependencies().map(str::to_string).collect(),
                )
            })
            .collect();

        Ok(ResolvedGraph {
            context: *context,
            build_order,
            link_dependencies,
        })
    }

    /// Topological sort over link-time edges (Kahn's algorithm)
    ///
    /// Ready modules are drained in name order, so the result is
    /// deterministic. Dynamic dependencies carry no link-time edge and do
    /// not constrain the order.
    fn topological_order(&self) -> Result<Vec<String>, GraphError> {
        let mut in_degree: BTreeMap<&str, usize> = BTreeMap::new();
        let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();

        for name in self.modules.keys() {
            in_degree.insert(name.as_str(), 0);
        }
        for descriptor in self.modules.values() {
            // Duplicate listings count once as an edge
            let deps: BTreeSet<&str> = descriptor.link_dependencies().collect();
            for dep in deps {
                dependents
                    .entry(dep)
                    .or_default()
                    .push(descriptor.name.as_str());
                *in_degree
                    .get_mut(descriptor.name.as_str())
                    .ok_or_else(|| GraphError::ModuleNotFound(descriptor.name.clone()))? += 1;
            }
        }

        let mut ready: BTreeSet<&str> = in_degree
            .iter()
            .filter(|(_, &degree)| degree == 0)
            .map(|(&name, _)| name)
            .collect();

        let mut order = Vec::with_capacity(self.modules.len());
        while let Some(name) = ready.pop_first() {
            order.push(name.to_string());

            if let Some(deps) = dependents.get(name) {
                for &dependent in deps {
                    let degree = in_degree
                        .get_mut(dependent)
                        .ok_or_else(|| GraphError::ModuleNotFound(dependent.to_string()))?;
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(dependent);
                    }
                }
            }
        }

        if order.len() != self.modules.len() {
            let remaining: Vec<&str> = in_degree
                .iter()
                .filter(|(_, &degree)| degree > 0)
                .map(|(&name, _)| name)
                .collect();
            return Err(GraphError::CircularDependency(remaining.join(", ")));
        }

        Ok(order)
    }

    /// Compute the transitive public interface of one module
    ///
    /// Walks `public_dependencies` recursively; private dependencies never
    /// contribute to any dependent's interface. The result is a pure
    /// function of the graph, so repeated calls yield the same value.
    pub fn transitive_public_interface(
        &self,
        name: &str,
    ) -> Result<TransitiveInterface, GraphError> {
        if !self.modules.contains_key(name) {
            return Err(GraphError::ModuleNotFound(name.to_string()));
        }

        let mut visited: BTreeSet<String> = BTreeSet::new();
        let mut stack = vec![name.to_string()];
        let mut missing: BTreeSet<MissingDependency> = BTreeSet::new();

        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            if let Some(descriptor) = self.modules.get(&current) {
                for dep in &descriptor.public_dependencies {
                    if self.modules.contains_key(dep) {
                        if !visited.contains(dep) {
                            stack.push(dep.clone());
                        }
                    } else {
                        missing.insert(MissingDependency::new(dep, &current));
                    }
                }
            }
        }

        if !missing.is_empty() {
            return Err(GraphError::UnknownModule {
                missing: missing.into_iter().collect(),
            });
        }

        let mut include_paths = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for module in &visited {
            if let Some(descriptor) = self.modules.get(module) {
                for fragment in &descriptor.public_include_paths {
                    let qualified = format!("{}/{}", module, fragment);
                    if seen.insert(qualified.clone()) {
                        include_paths.push(qualified);
                    }
                }
            }
        }

        Ok(TransitiveInterface {
            modules: visited,
            include_paths,
        })
    }
}
