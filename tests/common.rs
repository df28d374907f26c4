//! Shared test helpers
#![allow(dead_code)]

use modgraph::ModuleDescriptor;

/// Descriptor with conventional Public/Private include paths
pub fn descriptor(name: &str, public: &[&str], private: &[&str]) -> ModuleDescriptor {
    ModuleDescriptor {
        name: name.to_string(),
        public_include_paths: vec!["Public".to_string()],
        private_include_paths: vec!["Private".to_string()],
        public_dependencies: public.iter().map(|s| s.to_string()).collect(),
        private_dependencies: private.iter().map(|s| s.to_string()).collect(),
        dynamic_dependencies: Vec::new(),
        supported_platforms: None,
    }
}
