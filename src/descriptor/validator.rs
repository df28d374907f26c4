//! Descriptor validation framework
//!
//! Validates module descriptors for structure before graph assembly:
//! name format, include-path sanity, and dependency-set consistency.
//! Cross-module checks (unknown references, cycles) belong to the graph.

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::descriptor::manifest::ModuleDescriptor;

/// Validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Descriptor is valid
    Valid,
    /// Descriptor is invalid with specific errors
    Invalid(Vec<String>),
}

/// Descriptor validator
pub struct DescriptorValidator {
    /// Maximum module name length
    max_name_len: usize,
}

impl DescriptorValidator {
    /// Create a new descriptor validator
    pub fn new() -> Self {
        Self { max_name_len: 64 }
    }

    /// Validate a single module descriptor
    pub fn validate(&self, descriptor: &ModuleDescriptor) -> ValidationResult {
        let mut errors = Vec::new();

        if descriptor.name.is_empty() {
            errors.push("module name cannot be empty".to_string());
        } else if !self.is_valid_name(&descriptor.name) {
            errors.push(format!(
                "invalid module name: {} (must be alphanumeric with dashes/underscores)",
                descriptor.name
            ));
        }

        for path in descriptor
            .public_include_paths
            .iter()
            .chain(&descriptor.private_include_paths)
        {
            if let Err(e) = self.check_include_path(path) {
                errors.push(e);
            }
        }

        self.check_dependency_sets(descriptor, &mut errors);

        if errors.is_empty() {
            debug!(module = %descriptor.name, "descriptor validation passed");
            ValidationResult::Valid
        } else {
            warn!(module = %descriptor.name, ?errors, "descriptor validation failed");
            ValidationResult::Invalid(errors)
        }
    }

    /// Validate module name format
    #[inline]
    fn is_valid_name(&self, name: &str) -> bool {
        if name.is_empty() || name.len() > self.max_name_len {
            return false;
        }

        // Must start with alphanumeric
        if !name.chars().next().is_some_and(|c| c.is_alphanumeric()) {
            return false;
        }

        name.chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    }

    /// Include paths are fragments relative to the module root
    fn check_include_path(&self, path: &str) -> Result<(), String> {
        if path.is_empty() {
            return Err("include path cannot be empty".to_string());
        }
        if path.starts_with('/') || path.starts_with('\\') || path.contains(':') {
            return Err(format!("include path must be relative: {}", path));
        }
        if path.split(['/', '\\']).any(|component| component == "..") {
            return Err(format!(
                "include path may not escape the module root: {}",
                path
            ));
        }
        Ok(())
    }

    /// Dependency sets must be internally duplicate-free and disjoint
    /// between public and private (a module is either re-exposed or not).
    fn check_dependency_sets(&self, descriptor: &ModuleDescriptor, errors: &mut Vec<String>) {
        for (label, deps) in [
            ("publicDependencyModules", &descriptor.public_dependencies),
            ("privateDependencyModules", &descriptor.private_dependencies),
            ("dynamicallyLoadedModules", &descriptor.dynamic_dependencies),
        ] {
            let mut seen = HashSet::new();
            for dep in deps {
                if !self.is_valid_name(dep) {
                    errors.push(format!("invalid dependency name in {}: {}", label, dep));
                }
                if !seen.insert(dep.as_str()) {
                    errors.push(format!("duplicate entry in {}: {}", label, dep));
                }
            }
        }

        let public: HashSet<&str> = descriptor
            .public_dependencies
            .iter()
            .map(String::as_str)
            .collect();
        for dep in &descriptor.private_dependencies {
            if public.contains(dep.as_str()) {
                errors.push(format!(
                    "module {} listed as both public and private dependency",
                    dep
                ));
            }
        }
    }
}

impl Default for DescriptorValidator {
    fn default() -> Self {
        Self::new()
    }
}
