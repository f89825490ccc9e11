//! Transform registration: validating an action type and building its step.

use std::sync::Arc;

use serde_json::Value;

use crate::capability::visitor::{InputFileKind, InputFileProperty, PropertyVisitor};
use crate::core::attributes::AttributeSet;
use crate::core::marker::MarkerKind;
use crate::core::property::{TypeMarker, TypeName};
use crate::store::PropertyCapabilityStore;
use crate::transform::descriptor::{LegacyTransformDescriptor, TransformDescriptor, Transformer};
use crate::transform::error::RegistrationError;
use crate::transform::isolation::{IsolationService, TransformParameters};
use crate::transform::step::{InputFingerprinter, TransformInvocationFactory, TransformStep};
use crate::validation::context::ProblemCollector;
use crate::validation::log::ValidationLog;
use crate::validation::problem::ProblemKind;

/// Owner path under which parameter problems are reported.
pub const PARAMETERS_OWNER: &str = "parameters";

/// A transform from one attribute set to another.
#[derive(Debug, Clone)]
pub struct TransformRegistration {
    from: AttributeSet,
    to: AttributeSet,
    step: TransformStep,
}

impl TransformRegistration {
    pub fn from_attributes(&self) -> &AttributeSet {
        &self.from
    }

    pub fn to_attributes(&self) -> &AttributeSet {
        &self.to
    }

    pub fn step(&self) -> &TransformStep {
        &self.step
    }

    pub fn transformer(&self) -> &Transformer {
        self.step.transformer()
    }
}

/// Collects the artifact properties of a transform action.
#[derive(Debug, Default)]
struct NormalizerCollector {
    artifacts: Vec<InputFileProperty>,
    dependencies: Vec<InputFileProperty>,
}

impl PropertyVisitor for NormalizerCollector {
    fn visit_input_file_property(&mut self, property: InputFileProperty) {
        match property.kind {
            InputFileKind::Artifact => self.artifacts.push(property),
            InputFileKind::ArtifactDependencies => self.dependencies.push(property),
            _ => {}
        }
    }
}

/// Creates transform registrations from action types.
pub struct TransformRegistrationFactory {
    actions: Arc<PropertyCapabilityStore>,
    parameters: Option<Arc<PropertyCapabilityStore>>,
    isolation: Arc<dyn IsolationService>,
    invocation: Arc<dyn TransformInvocationFactory>,
    fingerprinter: Arc<dyn InputFingerprinter>,
}

impl TransformRegistrationFactory {
    pub fn new(
        actions: Arc<PropertyCapabilityStore>,
        isolation: Arc<dyn IsolationService>,
        invocation: Arc<dyn TransformInvocationFactory>,
        fingerprinter: Arc<dyn InputFingerprinter>,
    ) -> Self {
        TransformRegistrationFactory {
            actions,
            parameters: None,
            isolation,
            invocation,
            fingerprinter,
        }
    }

    /// Also validate parameters objects against `store`.
    pub fn with_parameter_store(mut self, store: Arc<PropertyCapabilityStore>) -> Self {
        self.parameters = Some(store);
        self
    }

    /// Validate `implementation` and build a registration for it.
    ///
    /// Every problem found is aggregated into a single error.
    pub fn create(
        &self,
        from: AttributeSet,
        to: AttributeSet,
        implementation: &TypeName,
        parameters: Option<&TransformParameters>,
    ) -> Result<TransformRegistration, RegistrationError> {
        let metadata = self.actions.metadata(implementation);
        let implementation = metadata.type_name();
        let cacheable = self
            .actions
            .introspector()
            .type_markers(implementation)
            .contains(&TypeMarker::CacheableTransform);

        let mut context = ProblemCollector::without_root_type();
        metadata.replay_problems(None, &mut context);
        if let (Some(parameters), Some(store)) = (parameters, &self.parameters) {
            store
                .metadata(parameters.type_name())
                .replay_problems(Some(PARAMETERS_OWNER), &mut context);
        }

        let mut collector = NormalizerCollector::default();
        for property in metadata.properties() {
            if matches!(
                property.role(),
                MarkerKind::InputArtifact | MarkerKind::InputArtifactDependencies
            ) {
                property.visit(&mut collector);
            }
        }

        let mut log = ValidationLog::new();
        report_duplicates(MarkerKind::InputArtifact, &collector.artifacts, &mut log);
        report_duplicates(
            MarkerKind::InputArtifactDependencies,
            &collector.dependencies,
            &mut log,
        );
        if cacheable {
            for property in collector.artifacts.iter().chain(&collector.dependencies) {
                validate_cacheable_normalizer(property, &mut log);
            }
        }
        log.replay(None, &mut context);

        if !context.is_empty() {
            let causes = context.sorted_summaries();
            tracing::debug!(
                implementation = %implementation,
                problems = causes.len(),
                "rejected transform action"
            );
            return Err(RegistrationError::invalid_action(
                implementation,
                context.into_problems(),
                causes,
            ));
        }

        let isolated = parameters
            .map(|parameters| self.isolation.isolate_parameters(parameters))
            .transpose()
            .map_err(|source| RegistrationError::Isolation {
                implementation: implementation.clone(),
                source,
            })?;

        let artifact = collector.artifacts.first();
        let dependencies = collector.dependencies.first();
        let descriptor = TransformDescriptor::new(
            implementation.clone(),
            isolated,
            from.clone(),
            artifact.map(InputFileProperty::normalization).unwrap_or_default(),
            dependencies
                .map(InputFileProperty::normalization)
                .unwrap_or_default(),
            cacheable,
            dependencies.is_some(),
        );

        tracing::debug!(
            implementation = %implementation,
            from = %from,
            to = %to,
            cacheable,
            "registered transform action"
        );

        Ok(self.registration(from, to, Transformer::Action(Arc::new(descriptor))))
    }

    /// Register a legacy transform, which is not classified.
    pub fn create_legacy(
        &self,
        from: AttributeSet,
        to: AttributeSet,
        implementation: &TypeName,
        args: &[Value],
    ) -> Result<TransformRegistration, RegistrationError> {
        let args = self
            .isolation
            .isolate_args(args)
            .map_err(|source| RegistrationError::Isolation {
                implementation: implementation.clone(),
                source,
            })?;
        let descriptor = LegacyTransformDescriptor::new(implementation.clone(), args, from.clone());

        tracing::debug!(
            implementation = %implementation,
            from = %from,
            to = %to,
            "registered legacy transform"
        );

        Ok(self.registration(from, to, Transformer::Legacy(Arc::new(descriptor))))
    }

    fn registration(
        &self,
        from: AttributeSet,
        to: AttributeSet,
        transformer: Transformer,
    ) -> TransformRegistration {
        TransformRegistration {
            from,
            to,
            step: TransformStep::new(
                transformer,
                self.invocation.clone(),
                self.fingerprinter.clone(),
            ),
        }
    }
}

fn report_duplicates(role: MarkerKind, properties: &[InputFileProperty], log: &mut ValidationLog) {
    let Some((first, rest)) = properties.split_first() else {
        return;
    };
    for property in rest {
        log.report(ProblemKind::IncorrectCapabilityUsage, |p| {
            p.property(&property.name)
                .description(format!(
                    "is marked with {} but property '{}' is already marked with it",
                    role, first.name
                ))
                .reason(format!(
                    "A transform action can only declare one property marked with {}",
                    role
                ))
                .solution(format!("Remove the {} marker from one of the properties", role))
        });
    }
}

fn validate_cacheable_normalizer(property: &InputFileProperty, log: &mut ValidationLog) {
    // An unspecified normalizer is accepted here even though it defaults to absolute paths
    if property.normalizer.map_or(true, |n| n.is_relocatable()) {
        return;
    }
    log.report(ProblemKind::CacheabilityViolation, |p| {
        p.property(&property.name)
            .description("is declared to be sensitive to absolute paths")
            .reason("This is not allowed for cacheable transforms")
            .solution("Use a different normalization strategy via PathSensitive, Classpath or CompileClasspath")
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::scheme::InspectionScheme;
    use crate::core::marker::PathSensitivity;
    use crate::core::normalization::{NormalizationSpec, Normalizer};
    use crate::core::value_type::ValueType;
    use crate::introspect::{PropertyDefinition, TypeCatalog, TypeDefinition};
    use crate::test_support::{RecordingFingerprinter, RecordingInvocation};
    use crate::transform::isolation::SnapshotIsolation;

    fn artifact(name: &str) -> PropertyDefinition {
        PropertyDefinition::new(name, ValueType::provider(ValueType::FileSystemLocation))
            .marker(MarkerKind::InputArtifact)
    }

    fn factory(catalog: TypeCatalog) -> TransformRegistrationFactory {
        let catalog = Arc::new(catalog);
        let actions = Arc::new(PropertyCapabilityStore::new(
            catalog.clone(),
            InspectionScheme::transform_actions(),
        ));
        let parameters = Arc::new(PropertyCapabilityStore::new(
            catalog,
            InspectionScheme::transform_parameters(),
        ));
        TransformRegistrationFactory::new(
            actions,
            Arc::new(SnapshotIsolation),
            Arc::new(RecordingInvocation::default()),
            Arc::new(RecordingFingerprinter::default()),
        )
        .with_parameter_store(parameters)
    }

    fn jar() -> AttributeSet {
        AttributeSet::of([("artifactType", "jar")])
    }

    fn classes() -> AttributeSet {
        AttributeSet::of([("artifactType", "classes")])
    }

    #[test]
    fn test_valid_action_registers() {
        let catalog = TypeCatalog::new()
            .with(
                TypeDefinition::new("Unzip")
                    .type_marker(TypeMarker::CacheableTransform)
                    .property(artifact("input").path_sensitivity(PathSensitivity::NameOnly)),
            )
            .unwrap();

        let registration = factory(catalog)
            .create(jar(), classes(), &TypeName::from("Unzip"), None)
            .unwrap();

        let Transformer::Action(descriptor) = registration.transformer() else {
            panic!("expected an action transformer");
        };
        assert!(descriptor.is_cacheable());
        assert!(!descriptor.requires_dependencies());
        assert_eq!(
            descriptor.input_artifact_normalization().normalizer,
            Normalizer::NameOnly
        );
        assert_eq!(registration.from_attributes(), &jar());
        assert_eq!(registration.to_attributes(), &classes());
    }

    #[test]
    fn test_unspecified_normalizer_passes_cacheable_check() {
        let catalog = TypeCatalog::new()
            .with(
                TypeDefinition::new("Unzip")
                    .type_marker(TypeMarker::CacheableTransform)
                    .property(artifact("input")),
            )
            .unwrap();

        let registration = factory(catalog)
            .create(jar(), classes(), &TypeName::from("Unzip"), None)
            .unwrap();
        assert_eq!(
            registration.transformer().input_artifact_normalization(),
            NormalizationSpec::default()
        );
    }

    #[test]
    fn test_cacheable_action_rejects_absolute_dependencies() {
        let catalog = TypeCatalog::new()
            .with(
                TypeDefinition::new("Link")
                    .type_marker(TypeMarker::CacheableTransform)
                    .property(artifact("input").path_sensitivity(PathSensitivity::Relative))
                    .property(
                        PropertyDefinition::new("dependencies", ValueType::FileCollection)
                            .marker(MarkerKind::InputArtifactDependencies)
                            .path_sensitivity(PathSensitivity::Absolute),
                    ),
            )
            .unwrap();

        let err = factory(catalog)
            .create(jar(), classes(), &TypeName::from("Link"), None)
            .unwrap_err();
        assert_eq!(
            err.causes(),
            vec!["Property 'dependencies' is declared to be sensitive to absolute paths."]
        );
        assert_eq!(err.problems()[0].kind, ProblemKind::CacheabilityViolation);
    }

    #[test]
    fn test_duplicate_artifact_properties() {
        let catalog = TypeCatalog::new()
            .with(
                TypeDefinition::new("Merge")
                    .property(artifact("left"))
                    .property(artifact("right")),
            )
            .unwrap();

        let err = factory(catalog)
            .create(jar(), classes(), &TypeName::from("Merge"), None)
            .unwrap_err();
        assert_eq!(
            err.causes(),
            vec!["Property 'right' is marked with InputArtifact but property 'left' is already marked with it."]
        );
    }

    #[test]
    fn test_parameter_problems_reported_under_owner_path() {
        let catalog = TypeCatalog::new()
            .with(TypeDefinition::new("Minify").property(artifact("input")))
            .unwrap()
            .with(
                TypeDefinition::new("MinifyParameters")
                    .property(PropertyDefinition::new("keep", ValueType::String)),
            )
            .unwrap();

        let parameters = TransformParameters::new("MinifyParameters").with("keep", "Main");
        let err = factory(catalog)
            .create(jar(), classes(), &TypeName::from("Minify"), Some(&parameters))
            .unwrap_err();

        assert_eq!(err.problems().len(), 1);
        assert_eq!(err.problems()[0].property.as_deref(), Some("parameters.keep"));
        assert_eq!(
            err.causes(),
            vec!["Property 'parameters.keep' is missing an input marker."]
        );
    }

    #[test]
    fn test_isolation_failure() {
        let catalog = TypeCatalog::new()
            .with(TypeDefinition::new("Minify").property(artifact("input")))
            .unwrap()
            .with(TypeDefinition::new("MinifyParameters").property(
                PropertyDefinition::new("keep", ValueType::String).marker(MarkerKind::Input),
            ))
            .unwrap();

        let parameters = TransformParameters::new("MinifyParameters")
            .with_deferred("keep", || Err(anyhow::anyhow!("not configured yet")));
        let err = factory(catalog)
            .create(jar(), classes(), &TypeName::from("Minify"), Some(&parameters))
            .unwrap_err();

        assert!(matches!(err, RegistrationError::Isolation { .. }));
        assert!(err.causes().is_empty());
    }

    #[test]
    fn test_legacy_path_skips_classification() {
        // The type is unknown to the catalog; legacy registration never looks it up
        let registration = factory(TypeCatalog::new())
            .create_legacy(
                jar(),
                classes(),
                &TypeName::from("LegacyUnzip"),
                &[Value::from("--strip")],
            )
            .unwrap();

        let Transformer::Legacy(descriptor) = registration.transformer() else {
            panic!("expected a legacy transformer");
        };
        assert_eq!(descriptor.args().values(), &[Value::from("--strip")]);
        assert!(!registration.transformer().is_cacheable());
    }
}
