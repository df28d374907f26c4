//! Module descriptors and manifest loading
//!
//! Handles parsing `module.toml` manifests and validating the resulting
//! descriptors before they enter the build graph.

pub mod manifest;
pub mod validator;

pub use manifest::{ModuleDescriptor, ModuleManifest};
pub use validator::{DescriptorValidator, ValidationResult};
