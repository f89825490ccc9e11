//! Test fixtures for common test scenarios.
//!
//! This module provides pre-built catalogs and wired-up factories for the
//! common testing patterns in mooring.

use std::sync::Arc;

use crate::capability::scheme::InspectionScheme;
use crate::core::marker::{MarkerKind, PathSensitivity};
use crate::core::value_type::{PrimitiveKind, ValueType};
use crate::introspect::{PropertyDefinition, TypeCatalog, TypeDefinition};
use crate::store::PropertyCapabilityStore;
use crate::test_support::{RecordingFingerprinter, RecordingInvocation};
use crate::transform::{SnapshotIsolation, TransformRegistrationFactory};

/// A catalog with two valid task types.
///
/// `CompileTask` is also reachable through the generated alias
/// `CompileTask_Decorated`.
pub fn sample_task_catalog() -> TypeCatalog {
    let compile = TypeDefinition::new("CompileTask")
        .alias("CompileTask_Decorated")
        .property(
            PropertyDefinition::new("sources", ValueType::FileCollection)
                .marker(MarkerKind::InputFiles)
                .marker(MarkerKind::SkipWhenEmpty)
                .path_sensitivity(PathSensitivity::Relative),
        )
        .property(
            PropertyDefinition::new("classpath", ValueType::FileCollection)
                .marker(MarkerKind::Classpath),
        )
        .property(
            PropertyDefinition::new("level", ValueType::provider(ValueType::Primitive(PrimitiveKind::Int)))
                .marker(MarkerKind::Input)
                .marker(MarkerKind::Optional),
        )
        .property(
            PropertyDefinition::new("destination", ValueType::Directory)
                .marker(MarkerKind::OutputDirectory),
        )
        .property(
            PropertyDefinition::new("workerCache", ValueType::Directory)
                .marker(MarkerKind::Internal),
        );

    let package = TypeDefinition::new("PackageTask")
        .property(
            PropertyDefinition::new("archive", ValueType::RegularFile)
                .marker(MarkerKind::OutputFile),
        )
        .property(
            PropertyDefinition::new("stale", ValueType::FileCollection)
                .marker(MarkerKind::Destroys),
        );

    TypeCatalog::new()
        .with(compile)
        .and_then(|catalog| catalog.with(package))
        .unwrap()
}

/// A registration factory over an empty catalog, for legacy registrations.
pub fn legacy_factory() -> TransformRegistrationFactory {
    let actions = PropertyCapabilityStore::new(
        Arc::new(TypeCatalog::new()),
        InspectionScheme::transform_actions(),
    );
    TransformRegistrationFactory::new(
        Arc::new(actions),
        Arc::new(SnapshotIsolation),
        Arc::new(RecordingInvocation::default()),
        Arc::new(RecordingFingerprinter::default()),
    )
}
