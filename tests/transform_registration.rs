//! Transform registration through the public API.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use mooring::core::{NormalizationSpec, Normalizer, PathSensitivity, TypeMarker};
use mooring::introspect::{PropertyDefinition, TypeDefinition};
use mooring::transform::{
    InputFingerprinter, SnapshotIsolation, TransformInput, TransformInvocationFactory,
    Transformer,
};
use mooring::validation::problem::ProblemKind;
use mooring::{
    AttributeSet, InspectionScheme, MarkerKind, PropertyCapabilityStore, RegistrationError,
    TransformRegistrationFactory, TransformRegistry, TypeCatalog, TypeName, ValueType,
};

/// Fingerprints by normalizer name so tests can see which one was used.
struct NamingFingerprinter;

impl InputFingerprinter for NamingFingerprinter {
    fn fingerprint(&self, files: &[PathBuf], normalization: &NormalizationSpec) -> Result<String> {
        Ok(format!("{}:{}", normalization.normalizer, files.len()))
    }
}

#[derive(Default)]
struct CapturingInvocation {
    inputs: Mutex<Vec<TransformInput>>,
}

impl TransformInvocationFactory for CapturingInvocation {
    fn invoke(&self, _transformer: &Transformer, input: &TransformInput) -> Result<Vec<PathBuf>> {
        self.inputs.lock().unwrap().push(input.clone());
        Ok(vec![input.artifact.with_extension("out")])
    }
}

fn artifact(name: &str) -> PropertyDefinition {
    PropertyDefinition::new(name, ValueType::provider(ValueType::FileSystemLocation))
        .marker(MarkerKind::InputArtifact)
}

fn factory(catalog: TypeCatalog, invocation: Arc<CapturingInvocation>) -> TransformRegistrationFactory {
    let actions = Arc::new(PropertyCapabilityStore::new(
        Arc::new(catalog),
        InspectionScheme::transform_actions(),
    ));
    TransformRegistrationFactory::new(
        actions,
        Arc::new(SnapshotIsolation),
        invocation,
        Arc::new(NamingFingerprinter),
    )
}

fn jar() -> AttributeSet {
    AttributeSet::of([("artifactType", "jar")])
}

fn classes() -> AttributeSet {
    AttributeSet::of([("artifactType", "classes")])
}

#[test]
fn test_problems_aggregated_into_one_error() {
    let catalog = TypeCatalog::new()
        .with(
            TypeDefinition::new("Unzip")
                .type_marker(TypeMarker::CacheableTransform)
                .property(artifact("input").path_sensitivity(PathSensitivity::Absolute))
                .property(artifact("extra")),
        )
        .unwrap();

    let err = factory(catalog, Arc::default())
        .create(jar(), classes(), &TypeName::from("Unzip"), None)
        .unwrap_err();

    assert!(matches!(err, RegistrationError::InvalidAction { .. }));
    assert_eq!(err.implementation(), &TypeName::from("Unzip"));
    assert_eq!(
        err.to_string(),
        "Some problems were found with the configuration of transform action 'Unzip' (2 problems)."
    );
    assert_eq!(
        err.causes(),
        vec![
            "Property 'extra' is marked with InputArtifact but property 'input' is already marked with it.",
            "Property 'input' is declared to be sensitive to absolute paths.",
        ]
    );

    let mut kinds: Vec<_> = err.problems().iter().map(|p| p.kind).collect();
    kinds.sort();
    let mut expected = vec![
        ProblemKind::IncorrectCapabilityUsage,
        ProblemKind::CacheabilityViolation,
    ];
    expected.sort();
    assert_eq!(kinds, expected);
}

#[test]
fn test_absolute_paths_only_rejected_when_cacheable() {
    let cacheable = TypeCatalog::new()
        .with(
            TypeDefinition::new("Unzip")
                .type_marker(TypeMarker::CacheableTransform)
                .property(artifact("input").path_sensitivity(PathSensitivity::Absolute)),
        )
        .unwrap();
    let err = factory(cacheable, Arc::default())
        .create(jar(), classes(), &TypeName::from("Unzip"), None)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "A problem was found with the configuration of transform action 'Unzip'."
    );
    assert_eq!(err.problems()[0].kind, ProblemKind::CacheabilityViolation);

    let uncached = TypeCatalog::new()
        .with(
            TypeDefinition::new("Unzip")
                .property(artifact("input").path_sensitivity(PathSensitivity::Absolute)),
        )
        .unwrap();
    let registration = factory(uncached, Arc::default())
        .create(jar(), classes(), &TypeName::from("Unzip"), None)
        .unwrap();
    assert!(!registration.transformer().is_cacheable());
    assert_eq!(
        registration.transformer().input_artifact_normalization().normalizer,
        Normalizer::AbsolutePath
    );
}

#[test]
fn test_registered_step_fingerprints_with_declared_normalization() {
    let catalog = TypeCatalog::new()
        .with(
            TypeDefinition::new("Link")
                .type_marker(TypeMarker::CacheableTransform)
                .property(artifact("input").path_sensitivity(PathSensitivity::NameOnly))
                .property(
                    PropertyDefinition::new("dependencies", ValueType::FileCollection)
                        .marker(MarkerKind::InputArtifactDependencies)
                        .marker(MarkerKind::CompileClasspath),
                ),
        )
        .unwrap();
    let invocation = Arc::new(CapturingInvocation::default());

    let registration = factory(catalog, invocation.clone())
        .create(jar(), classes(), &TypeName::from("Link"), None)
        .unwrap();
    assert!(registration.transformer().requires_dependencies());

    let outputs = registration
        .step()
        .run(Path::new("lib/a.jar"), &[PathBuf::from("lib/b.jar"), PathBuf::from("lib/c.jar")])
        .unwrap();
    assert_eq!(outputs, vec![PathBuf::from("lib/a.out")]);

    let inputs = invocation.inputs.lock().unwrap();
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].artifact_fingerprint, "name-only:1");
    assert_eq!(
        inputs[0].dependencies_fingerprint.as_deref(),
        Some("compile-classpath:2")
    );
}

#[test]
fn test_registry_finds_registrations_by_attributes() {
    let catalog = TypeCatalog::new()
        .with(TypeDefinition::new("Unzip").property(artifact("input")))
        .unwrap();
    let factory = factory(catalog, Arc::default());

    let mut registry = TransformRegistry::new();
    registry.register(
        factory
            .create(jar(), classes(), &TypeName::from("Unzip"), None)
            .unwrap(),
    );
    registry.register(
        factory
            .create_legacy(classes(), jar(), &TypeName::from("Rezip"), &[])
            .unwrap(),
    );

    assert_eq!(registry.len(), 2);
    let found = registry.find(&jar(), &classes());
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].transformer().implementation(),
        &TypeName::from("Unzip")
    );
    assert!(registry.find(&classes(), &classes()).is_empty());
}
