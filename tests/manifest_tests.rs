//! Manifest wire-format tests
//!
//! The orchestrator contract fixes camelCase field names and treats absent
//! fields as empty sequences.

use modgraph::{DescriptorValidator, GraphError, ModuleManifest, TargetPlatform, ValidationResult};

#[test]
fn parses_full_wire_format() {
    let manifest = ModuleManifest::from_str(
        r#"
        name = "SDFCut"
        publicIncludePaths = ["Public"]
        privateIncludePaths = ["Private"]
        publicDependencyModules = ["Core", "GeometryCore"]
        privateDependencyModules = ["Engine"]
        dynamicallyLoadedModules = ["HotReloadable"]
        "#,
    )
    .unwrap();

    assert_eq!(manifest.name, "SDFCut");
    assert_eq!(manifest.public_include_paths, vec!["Public"]);
    assert_eq!(manifest.private_include_paths, vec!["Private"]);
    assert_eq!(
        manifest.public_dependency_modules,
        vec!["Core", "GeometryCore"]
    );
    assert_eq!(manifest.private_dependency_modules, vec!["Engine"]);
    assert_eq!(manifest.dynamically_loaded_modules, vec!["HotReloadable"]);
    assert!(manifest.supported_platforms.is_none());
}

#[test]
fn absent_fields_are_empty_sequences() {
    let manifest = ModuleManifest::from_str(r#"name = "Core""#).unwrap();
    assert!(manifest.public_include_paths.is_empty());
    assert!(manifest.private_include_paths.is_empty());
    assert!(manifest.public_dependency_modules.is_empty());
    assert!(manifest.private_dependency_modules.is_empty());
    assert!(manifest.dynamically_loaded_modules.is_empty());
}

#[test]
fn empty_name_is_invalid() {
    let err = ModuleManifest::from_str(r#"name = """#).unwrap_err();
    assert!(matches!(err, GraphError::InvalidManifest(_)));
}

#[test]
fn malformed_toml_is_invalid() {
    let err = ModuleManifest::from_str("name = [not toml").unwrap_err();
    assert!(matches!(err, GraphError::InvalidManifest(_)));
}

#[test]
fn self_dependency_is_rejected_at_construction() {
    for field in [
        "publicDependencyModules",
        "privateDependencyModules",
        "dynamicallyLoadedModules",
    ] {
        let manifest = ModuleManifest::from_str(&format!(
            r#"
            name = "A"
            {field} = ["A"]
            "#
        ))
        .unwrap();
        let err = manifest.to_descriptor().unwrap_err();
        assert!(
            matches!(err, GraphError::SelfDependency(ref name) if name == "A"),
            "field {field}: got {err:?}"
        );
    }
}

#[test]
fn supported_platforms_parse_and_restrict() {
    let manifest = ModuleManifest::from_str(
        r#"
        name = "D3DBackend"
        supportedPlatforms = ["Win64"]
        "#,
    )
    .unwrap();
    let descriptor = manifest.to_descriptor().unwrap();
    assert!(descriptor.supports(TargetPlatform::Win64));
    assert!(!descriptor.supports(TargetPlatform::Linux));

    // Absent list means every platform
    let open = ModuleManifest::from_str(r#"name = "Core""#)
        .unwrap()
        .to_descriptor()
        .unwrap();
    for platform in TargetPlatform::ALL {
        assert!(open.supports(platform));
    }
}

#[test]
fn validator_accepts_conventional_descriptor() {
    let descriptor = ModuleManifest::from_str(
        r#"
        name = "GeometryFramework"
        publicIncludePaths = ["Public"]
        privateIncludePaths = ["Private"]
        publicDependencyModules = ["Core"]
        "#,
    )
    .unwrap()
    .to_descriptor()
    .unwrap();

    assert_eq!(
        DescriptorValidator::new().validate(&descriptor),
        ValidationResult::Valid
    );
}

#[test]
fn validator_flags_bad_names_paths_and_overlap() {
    let descriptor = ModuleManifest::from_str(
        r#"
        name = "My Module!"
        publicIncludePaths = ["/abs/path", "../escape"]
        publicDependencyModules = ["Core", "Core"]
        privateDependencyModules = ["Core"]
        "#,
    )
    .unwrap()
    .to_descriptor()
    .unwrap();

    let errors = match DescriptorValidator::new().validate(&descriptor) {
        ValidationResult::Invalid(errors) => errors,
        ValidationResult::Valid => panic!("expected invalid"),
    };
    assert!(errors.iter().any(|e| e.contains("invalid module name")));
    assert!(errors.iter().any(|e| e.contains("must be relative")));
    assert!(errors.iter().any(|e| e.contains("escape the module root")));
    assert!(errors.iter().any(|e| e.contains("duplicate entry")));
    assert!(errors
        .iter()
        .any(|e| e.contains("both public and private")));
}
