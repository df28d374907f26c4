//! modgraph - module descriptors and build-graph resolution
//!
//! This crate models the build-time wiring of a plugin-style module system:
//! each module ships a declarative `module.toml` manifest listing its include
//! paths, its public and private dependency modules, and the modules it loads
//! dynamically at runtime. modgraph assembles those manifests into a build
//! graph, validates it, and turns it into a compilation plan an external
//! build orchestrator can execute.
//!
//! ## Design Principles
//!
//! 1. **Plain data over inheritance**: a descriptor is an immutable record
//!    plus pure validation functions, not a rules base class to derive from
//! 2. **Explicit build context**: target platform and configuration are
//!    passed as parameters to resolution, never held as ambient state
//! 3. **Deterministic resolution**: resolution over the same manifest set
//!    always yields the same build order and the same errors
//!
//! ## Pipeline
//!
//! - [`ModuleDiscovery`] scans a source tree for manifests
//! - [`ModuleManifest`] parses the wire format into a [`ModuleDescriptor`]
//! - [`BuildGraph`] resolves references, rejects cycles, orders modules
//! - [`CompilationPlan`] flattens the resolved graph for the orchestrator

pub mod context;
pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod logging;

pub use context::{BuildConfiguration, BuildContext, TargetPlatform};
pub use descriptor::{DescriptorValidator, ModuleDescriptor, ModuleManifest, ValidationResult};
pub use discovery::{DiscoveredModule, ModuleDiscovery};
pub use error::{GraphError, MissingDependency};
pub use graph::{
    BuildGraph, CompilationPlan, CompileUnit, ResolvedGraph, TransitiveInterface,
};
