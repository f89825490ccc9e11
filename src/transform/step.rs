//! Transform execution step.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::core::normalization::NormalizationSpec;
use crate::transform::descriptor::Transformer;

/// Fingerprints file inputs according to their normalization.
pub trait InputFingerprinter: Send + Sync {
    fn fingerprint(&self, files: &[PathBuf], normalization: &NormalizationSpec) -> Result<String>;
}

/// Runs a transformer over one fingerprinted input.
pub trait TransformInvocationFactory: Send + Sync {
    fn invoke(&self, transformer: &Transformer, input: &TransformInput) -> Result<Vec<PathBuf>>;
}

/// The input of one transform execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformInput {
    pub artifact: PathBuf,
    pub artifact_fingerprint: String,
    pub dependencies: Vec<PathBuf>,
    /// Present only when the transformer requires its dependencies
    pub dependencies_fingerprint: Option<String>,
}

/// A transformer wired to the services that execute it.
#[derive(Clone)]
pub struct TransformStep {
    transformer: Transformer,
    invocation: Arc<dyn TransformInvocationFactory>,
    fingerprinter: Arc<dyn InputFingerprinter>,
}

impl TransformStep {
    pub fn new(
        transformer: Transformer,
        invocation: Arc<dyn TransformInvocationFactory>,
        fingerprinter: Arc<dyn InputFingerprinter>,
    ) -> Self {
        TransformStep {
            transformer,
            invocation,
            fingerprinter,
        }
    }

    pub fn transformer(&self) -> &Transformer {
        &self.transformer
    }

    /// Fingerprint the inputs, then invoke the transformer.
    pub fn run(&self, artifact: &Path, dependencies: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let artifact_fingerprint = self
            .fingerprinter
            .fingerprint(
                &[artifact.to_path_buf()],
                &self.transformer.input_artifact_normalization(),
            )
            .with_context(|| format!("failed to fingerprint {}", artifact.display()))?;

        let dependencies_fingerprint = if self.transformer.requires_dependencies() {
            let fingerprint = self
                .fingerprinter
                .fingerprint(dependencies, &self.transformer.dependencies_normalization())
                .with_context(|| {
                    format!("failed to fingerprint dependencies of {}", artifact.display())
                })?;
            Some(fingerprint)
        } else {
            None
        };

        tracing::debug!(
            transformer = %self.transformer,
            artifact = %artifact.display(),
            "running transform"
        );

        let input = TransformInput {
            artifact: artifact.to_path_buf(),
            artifact_fingerprint,
            dependencies: dependencies.to_vec(),
            dependencies_fingerprint,
        };
        self.invocation
            .invoke(&self.transformer, &input)
            .with_context(|| format!("{} failed for {}", self.transformer, artifact.display()))
    }
}

impl fmt::Debug for TransformStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformStep")
            .field("transformer", &self.transformer)
            .finish()
    }
}
