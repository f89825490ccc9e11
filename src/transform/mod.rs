//! Transformation registration pipeline.
//!
//! A transform action type is classified by an action store, its artifact
//! normalization is extracted and checked against its cacheability, and the
//! result is frozen into a [`TransformDescriptor`] wrapped in a
//! [`TransformStep`].

pub mod descriptor;
pub mod error;
pub mod isolation;
pub mod registration;
pub mod registry;
pub mod step;

pub use descriptor::{LegacyTransformDescriptor, TransformDescriptor, Transformer};
pub use error::{ProblemCause, RegistrationError};
pub use isolation::{
    IsolatedArgs, IsolatedParameters, IsolationError, IsolationService, ParameterValue,
    SnapshotIsolation, TransformParameters,
};
pub use registration::{TransformRegistration, TransformRegistrationFactory, PARAMETERS_OWNER};
pub use registry::TransformRegistry;
pub use step::{InputFingerprinter, TransformInput, TransformInvocationFactory, TransformStep};
