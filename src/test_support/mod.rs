//! Test utilities and mocks for mooring unit tests.
//!
//! This module provides mock implementations for the collaborators the engine
//! consumes: a type introspector that counts enumerations, and transform
//! services that record what they were asked to do.
//!
//! # Example
//!
//! ```rust,ignore
//! use mooring::test_support::{sample_task_catalog, CountingIntrospector};
//!
//! #[test]
//! fn test_example() {
//!     let introspector = Arc::new(CountingIntrospector::new(sample_task_catalog()));
//!     let store = PropertyCapabilityStore::new(introspector.clone(), InspectionScheme::tasks());
//!     store.metadata(&TypeName::from("CompileTask"));
//!     assert_eq!(introspector.property_calls(), 1);
//! }
//! ```

pub mod fixtures;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};

use crate::core::normalization::NormalizationSpec;
use crate::core::property::{PropertyDescriptor, TypeMarker, TypeName};
use crate::introspect::{TypeCatalog, TypeIntrospector};
use crate::transform::{InputFingerprinter, TransformInput, TransformInvocationFactory, Transformer};
use crate::validation::log::ValidationLog;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Introspector that counts how often properties are enumerated.
#[derive(Debug)]
pub struct CountingIntrospector {
    inner: TypeCatalog,
    property_calls: AtomicUsize,
}

impl CountingIntrospector {
    pub fn new(inner: TypeCatalog) -> Self {
        CountingIntrospector {
            inner,
            property_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `properties` calls so far.
    pub fn property_calls(&self) -> usize {
        self.property_calls.load(Ordering::SeqCst)
    }
}

impl TypeIntrospector for CountingIntrospector {
    fn canonicalize(&self, ty: &TypeName) -> TypeName {
        self.inner.canonicalize(ty)
    }

    fn properties(&self, ty: &TypeName) -> Vec<PropertyDescriptor> {
        self.property_calls.fetch_add(1, Ordering::SeqCst);
        // Widen the window in which concurrent callers could race
        std::thread::sleep(std::time::Duration::from_millis(5));
        self.inner.properties(ty)
    }

    fn type_markers(&self, ty: &TypeName) -> BTreeSet<TypeMarker> {
        self.inner.type_markers(ty)
    }

    fn validate_type(&self, ty: &TypeName, log: &mut ValidationLog) {
        self.inner.validate_type(ty, log);
    }
}

/// Fingerprinter that records its calls and hashes nothing.
#[derive(Debug, Default)]
pub struct RecordingFingerprinter {
    calls: Mutex<Vec<(Vec<PathBuf>, NormalizationSpec)>>,
    fail: bool,
}

impl RecordingFingerprinter {
    /// A fingerprinter whose every call fails.
    pub fn failing() -> Self {
        RecordingFingerprinter {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<(Vec<PathBuf>, NormalizationSpec)> {
        self.calls.lock().unwrap().clone()
    }
}

impl InputFingerprinter for RecordingFingerprinter {
    fn fingerprint(&self, files: &[PathBuf], normalization: &NormalizationSpec) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((files.to_vec(), *normalization));
        if self.fail {
            bail!("fingerprinting is disabled");
        }
        Ok(format!("{}:{}", normalization.normalizer.as_str(), files.len()))
    }
}

/// Invocation factory that records its inputs and returns the input artifact.
#[derive(Debug, Default)]
pub struct RecordingInvocation {
    inputs: Mutex<Vec<TransformInput>>,
}

impl RecordingInvocation {
    pub fn inputs(&self) -> Vec<TransformInput> {
        self.inputs.lock().unwrap().clone()
    }
}

impl TransformInvocationFactory for RecordingInvocation {
    fn invoke(&self, _transformer: &Transformer, input: &TransformInput) -> Result<Vec<PathBuf>> {
        self.inputs.lock().unwrap().push(input.clone());
        Ok(vec![input.artifact.clone()])
    }
}
