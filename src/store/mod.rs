//! Property capability store - cached, validated type metadata.
//!
//! The store classifies each canonical type once and hands out the shared
//! [`TypeMetadata`] afterwards. Classification is a pure function of the
//! introspector's answers, so the cache never needs invalidation.

mod classify;
mod metadata;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::capability::scheme::InspectionScheme;
use crate::core::property::TypeName;
use crate::introspect::TypeIntrospector;

pub use classify::effective_role;
pub use metadata::{ClassifiedProperty, TypeMetadata};

/// How concurrent first requests for one type are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Memoization {
    /// One caller classifies, concurrent callers wait for its result.
    #[default]
    SingleFlight,
    /// Concurrent callers may classify redundantly; the last result is kept.
    LastWriteWins,
}

type Slot = Arc<OnceLock<Arc<TypeMetadata>>>;

/// Maps component types to their classified metadata.
pub struct PropertyCapabilityStore {
    introspector: Arc<dyn TypeIntrospector>,
    scheme: InspectionScheme,
    expected_marker: &'static str,
    memoization: Memoization,
    cache: RwLock<HashMap<TypeName, Slot>>,
}

impl PropertyCapabilityStore {
    pub fn new(introspector: Arc<dyn TypeIntrospector>, scheme: InspectionScheme) -> Self {
        let expected_marker = if scheme.handlers().has_output_roles() {
            "an input or output marker"
        } else {
            "an input marker"
        };
        PropertyCapabilityStore {
            introspector,
            scheme,
            expected_marker,
            memoization: Memoization::default(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_memoization(mut self, memoization: Memoization) -> Self {
        self.memoization = memoization;
        self
    }

    pub fn scheme(&self) -> &InspectionScheme {
        &self.scheme
    }

    pub fn introspector(&self) -> &dyn TypeIntrospector {
        self.introspector.as_ref()
    }

    /// Wording used when a property carries no role marker.
    pub fn expected_marker(&self) -> &'static str {
        self.expected_marker
    }

    pub fn memoization(&self) -> Memoization {
        self.memoization
    }

    /// Classified metadata for `ty`, computed on first request.
    pub fn metadata(&self, ty: &TypeName) -> Arc<TypeMetadata> {
        let key = self.introspector.canonicalize(ty);

        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(metadata) = cached.as_ref().and_then(|slot| slot.get()) {
            tracing::trace!(type_name = %key, "metadata cache hit");
            return metadata.clone();
        }

        match self.memoization {
            Memoization::SingleFlight => {
                let slot = match cached {
                    Some(slot) => slot,
                    None => self
                        .cache
                        .write()
                        .unwrap_or_else(PoisonError::into_inner)
                        .entry(key.clone())
                        .or_default()
                        .clone(),
                };
                slot.get_or_init(|| Arc::new(self.classify(&key))).clone()
            }
            Memoization::LastWriteWins => {
                let metadata = Arc::new(self.classify(&key));
                let slot = OnceLock::new();
                let _ = slot.set(metadata.clone());
                self.cache
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(key, Arc::new(slot));
                metadata
            }
        }
    }

    /// Classify a batch of types in parallel, populating the cache.
    pub fn warm(&self, types: &[TypeName]) -> Vec<Arc<TypeMetadata>> {
        tracing::debug!(types = types.len(), "warming metadata cache");
        types.par_iter().map(|ty| self.metadata(ty)).collect()
    }

    /// Number of types with cached metadata.
    pub fn cached_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    fn classify(&self, ty: &TypeName) -> TypeMetadata {
        classify::classify(
            self.introspector.as_ref(),
            &self.scheme,
            self.expected_marker,
            ty,
        )
    }
}

impl fmt::Debug for PropertyCapabilityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyCapabilityStore")
            .field("scheme", &self.scheme.kind())
            .field("memoization", &self.memoization)
            .field("cached", &self.cached_len())
            .finish()
    }
}
