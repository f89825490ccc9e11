//! Command implementations

pub mod describe;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use mooring::capability::SchemeKind;
use mooring::TypeCatalog;

/// Parse the `--scheme` argument.
pub fn parse_scheme(scheme: &str) -> Result<SchemeKind> {
    scheme
        .parse()
        .with_context(|| format!("invalid scheme: {}", scheme))
}

/// Load a type catalog from disk.
pub fn load_catalog(path: &Path) -> Result<TypeCatalog> {
    TypeCatalog::load(path)
        .with_context(|| format!("failed to load type catalog: {}", path.display()))
}
