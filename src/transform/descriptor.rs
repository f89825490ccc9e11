//! Immutable descriptions of registered transforms.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::core::attributes::AttributeSet;
use crate::core::normalization::NormalizationSpec;
use crate::core::property::TypeName;
use crate::transform::isolation::{IsolatedArgs, IsolatedParameters};
use crate::util::hash::Fingerprint;

/// A validated transform action with its isolated parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformDescriptor {
    implementation: TypeName,
    parameters: Option<IsolatedParameters>,
    from: AttributeSet,
    input_artifact_normalization: NormalizationSpec,
    dependencies_normalization: NormalizationSpec,
    cacheable: bool,
    requires_dependencies: bool,
    fingerprint: String,
}

impl TransformDescriptor {
    pub(crate) fn new(
        implementation: TypeName,
        parameters: Option<IsolatedParameters>,
        from: AttributeSet,
        input_artifact_normalization: NormalizationSpec,
        dependencies_normalization: NormalizationSpec,
        cacheable: bool,
        requires_dependencies: bool,
    ) -> Self {
        let mut fp = Fingerprint::new();
        fp.update_str(implementation.as_str())
            .update_opt(parameters.as_ref().map(IsolatedParameters::fingerprint))
            .update_attributes(&from)
            .update_normalization(&input_artifact_normalization)
            .update_normalization(&dependencies_normalization)
            .update_bool(cacheable)
            .update_bool(requires_dependencies);

        TransformDescriptor {
            implementation,
            parameters,
            from,
            input_artifact_normalization,
            dependencies_normalization,
            cacheable,
            requires_dependencies,
            fingerprint: fp.finish(),
        }
    }

    pub fn implementation(&self) -> &TypeName {
        &self.implementation
    }

    pub fn parameters(&self) -> Option<&IsolatedParameters> {
        self.parameters.as_ref()
    }

    pub fn from_attributes(&self) -> &AttributeSet {
        &self.from
    }

    pub fn input_artifact_normalization(&self) -> NormalizationSpec {
        self.input_artifact_normalization
    }

    pub fn dependencies_normalization(&self) -> NormalizationSpec {
        self.dependencies_normalization
    }

    pub fn is_cacheable(&self) -> bool {
        self.cacheable
    }

    /// Whether the action declared an `InputArtifactDependencies` property.
    pub fn requires_dependencies(&self) -> bool {
        self.requires_dependencies
    }

    /// SHA-256 over everything that identifies this transform.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

/// A legacy transform: an implementation type plus constructor arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegacyTransformDescriptor {
    implementation: TypeName,
    args: IsolatedArgs,
    from: AttributeSet,
    fingerprint: String,
}

impl LegacyTransformDescriptor {
    pub(crate) fn new(implementation: TypeName, args: IsolatedArgs, from: AttributeSet) -> Self {
        let mut fp = Fingerprint::new();
        fp.update_str("legacy")
            .update_str(implementation.as_str())
            .update_str(args.fingerprint())
            .update_attributes(&from);
        LegacyTransformDescriptor {
            implementation,
            args,
            from,
            fingerprint: fp.finish(),
        }
    }

    pub fn implementation(&self) -> &TypeName {
        &self.implementation
    }

    pub fn args(&self) -> &IsolatedArgs {
        &self.args
    }

    pub fn from_attributes(&self) -> &AttributeSet {
        &self.from
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

/// The two ways a transform can be implemented.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformer {
    Action(Arc<TransformDescriptor>),
    Legacy(Arc<LegacyTransformDescriptor>),
}

impl Transformer {
    pub fn implementation(&self) -> &TypeName {
        match self {
            Transformer::Action(descriptor) => descriptor.implementation(),
            Transformer::Legacy(descriptor) => descriptor.implementation(),
        }
    }

    pub fn from_attributes(&self) -> &AttributeSet {
        match self {
            Transformer::Action(descriptor) => descriptor.from_attributes(),
            Transformer::Legacy(descriptor) => descriptor.from_attributes(),
        }
    }

    /// Legacy transforms are never cacheable.
    pub fn is_cacheable(&self) -> bool {
        match self {
            Transformer::Action(descriptor) => descriptor.is_cacheable(),
            Transformer::Legacy(_) => false,
        }
    }

    pub fn requires_dependencies(&self) -> bool {
        match self {
            Transformer::Action(descriptor) => descriptor.requires_dependencies(),
            Transformer::Legacy(_) => false,
        }
    }

    /// Normalization of the primary artifact; legacy transforms use the default.
    pub fn input_artifact_normalization(&self) -> NormalizationSpec {
        match self {
            Transformer::Action(descriptor) => descriptor.input_artifact_normalization(),
            Transformer::Legacy(_) => NormalizationSpec::default(),
        }
    }

    pub fn dependencies_normalization(&self) -> NormalizationSpec {
        match self {
            Transformer::Action(descriptor) => descriptor.dependencies_normalization(),
            Transformer::Legacy(_) => NormalizationSpec::default(),
        }
    }

    pub fn fingerprint(&self) -> &str {
        match self {
            Transformer::Action(descriptor) => descriptor.fingerprint(),
            Transformer::Legacy(descriptor) => descriptor.fingerprint(),
        }
    }
}

impl fmt::Display for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transformer::Action(descriptor) => {
                write!(f, "transform action '{}'", descriptor.implementation())
            }
            Transformer::Legacy(descriptor) => {
                write!(f, "legacy transform '{}'", descriptor.implementation())
            }
        }
    }
}
