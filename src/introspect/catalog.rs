//! Data-driven type catalog.
//!
//! A catalog describes component types as plain data, typically loaded from a
//! TOML file:
//!
//! ```toml
//! [[types]]
//! name = "CompileTask"
//! aliases = ["CompileTask_Decorated"]
//! markers = ["cacheable-transform"]
//!
//! [[types.properties]]
//! name = "sources"
//! type = "FileCollection"
//! markers = ["InputFiles", "SkipWhenEmpty"]
//! path-sensitivity = "relative"
//! ```

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::marker::{Marker, MarkerCategory, MarkerKind, PathSensitivity};
use crate::core::property::{PropertyDescriptor, TypeMarker, TypeName};
use crate::core::value_type::ValueType;
use crate::introspect::TypeIntrospector;
use crate::validation::log::ValidationLog;
use crate::validation::problem::ProblemKind;

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read type catalog {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse type catalog")]
    Parse(#[from] toml::de::Error),

    #[error("type `{0}` is declared more than once")]
    DuplicateType(TypeName),

    #[error("alias `{alias}` of `{target}` is already used by `{existing}`")]
    DuplicateAlias {
        alias: TypeName,
        target: TypeName,
        existing: TypeName,
    },

    #[error("alias `{alias}` of `{target}` collides with a declared type name")]
    AliasShadowsType { alias: TypeName, target: TypeName },

    #[error("type `{ty}` declares property `{property}` more than once")]
    DuplicateProperty { ty: TypeName, property: String },
}

/// A property as written in a catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PropertyDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default)]
    pub markers: Vec<MarkerKind>,
    /// Argument of the `PathSensitive` marker; implies the marker when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_sensitivity: Option<PathSensitivity>,
}

/// Markers of one category that had to be dropped from a property.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MarkerConflict {
    category: MarkerCategory,
    kinds: Vec<MarkerKind>,
}

impl PropertyDefinition {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        PropertyDefinition {
            name: name.into(),
            value_type,
            markers: Vec::new(),
            path_sensitivity: None,
        }
    }

    pub fn marker(mut self, kind: MarkerKind) -> Self {
        self.markers.push(kind);
        self
    }

    pub fn path_sensitivity(mut self, sensitivity: PathSensitivity) -> Self {
        self.path_sensitivity = Some(sensitivity);
        self
    }

    /// Build the descriptor. The first marker of each category wins.
    fn to_descriptor(&self) -> (PropertyDescriptor, Vec<MarkerConflict>) {
        let mut kinds = self.markers.clone();
        if self.path_sensitivity.is_some() && !kinds.contains(&MarkerKind::PathSensitive) {
            kinds.push(MarkerKind::PathSensitive);
        }

        let mut descriptor = PropertyDescriptor::new(&self.name, self.value_type.clone());
        let mut conflicts: Vec<MarkerConflict> = Vec::new();
        for kind in kinds {
            let marker = if kind == MarkerKind::PathSensitive {
                Marker::path_sensitive(self.path_sensitivity.unwrap_or(PathSensitivity::Absolute))
            } else {
                Marker::new(kind)
            };

            match descriptor.marker(marker.category()) {
                Some(existing) if existing.kind() == kind => {}
                Some(existing) => {
                    let category = marker.category();
                    match conflicts.iter_mut().find(|c| c.category == category) {
                        Some(conflict) => conflict.kinds.push(kind),
                        None => conflicts.push(MarkerConflict {
                            category,
                            kinds: vec![existing.kind(), kind],
                        }),
                    }
                }
                None => {
                    descriptor.insert_marker(marker);
                }
            }
        }
        (descriptor, conflicts)
    }
}

/// A type as written in a catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TypeDefinition {
    pub name: TypeName,
    /// Generated wrapper names that resolve to this type
    #[serde(default)]
    pub aliases: Vec<TypeName>,
    #[serde(default)]
    pub markers: BTreeSet<TypeMarker>,
    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,
}

impl TypeDefinition {
    pub fn new(name: impl Into<TypeName>) -> Self {
        TypeDefinition {
            name: name.into(),
            aliases: Vec::new(),
            markers: BTreeSet::new(),
            properties: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<TypeName>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn type_marker(mut self, marker: TypeMarker) -> Self {
        self.markers.insert(marker);
        self
    }

    pub fn property(mut self, property: PropertyDefinition) -> Self {
        self.properties.push(property);
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    types: Vec<TypeDefinition>,
}

/// In-memory introspector over a set of type definitions.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<TypeName, TypeDefinition>,
    aliases: HashMap<TypeName, TypeName>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        TypeCatalog::default()
    }

    /// Parse a catalog from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(contents)?;
        let mut catalog = TypeCatalog::new();
        for definition in file.types {
            catalog.insert(definition)?;
        }
        Ok(catalog)
    }

    /// Load a catalog from a TOML file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Add a type definition.
    ///
    /// Type names and aliases share one namespace, and property names are
    /// unique within a type.
    pub fn insert(&mut self, definition: TypeDefinition) -> Result<(), CatalogError> {
        let name = &definition.name;
        if self.types.contains_key(name) {
            return Err(CatalogError::DuplicateType(definition.name));
        }
        if let Some(target) = self.aliases.get(name) {
            return Err(CatalogError::AliasShadowsType {
                alias: name.clone(),
                target: target.clone(),
            });
        }

        let mut own_aliases = HashSet::new();
        for alias in &definition.aliases {
            if alias == name || self.types.contains_key(alias) {
                return Err(CatalogError::AliasShadowsType {
                    alias: alias.clone(),
                    target: name.clone(),
                });
            }
            let existing = match self.aliases.get(alias) {
                Some(existing) => Some(existing),
                None => (!own_aliases.insert(alias)).then_some(name),
            };
            if let Some(existing) = existing {
                return Err(CatalogError::DuplicateAlias {
                    alias: alias.clone(),
                    target: name.clone(),
                    existing: existing.clone(),
                });
            }
        }

        let mut property_names = HashSet::new();
        for property in &definition.properties {
            if !property_names.insert(property.name.as_str()) {
                return Err(CatalogError::DuplicateProperty {
                    ty: name.clone(),
                    property: property.name.clone(),
                });
            }
        }

        for alias in &definition.aliases {
            self.aliases.insert(alias.clone(), definition.name.clone());
        }
        self.types.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert) for fixtures.
    pub fn with(mut self, definition: TypeDefinition) -> Result<Self, CatalogError> {
        self.insert(definition)?;
        Ok(self)
    }

    /// Public type names, sorted.
    pub fn type_names(&self) -> Vec<TypeName> {
        let mut names: Vec<TypeName> = self.types.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn contains(&self, ty: &TypeName) -> bool {
        self.types.contains_key(&self.canonicalize(ty))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn definition(&self, ty: &TypeName) -> Option<&TypeDefinition> {
        let definition = self.types.get(&self.canonicalize(ty));
        if definition.is_none() {
            tracing::warn!("type `{}` is not declared in the catalog", ty);
        }
        definition
    }
}

impl TypeIntrospector for TypeCatalog {
    fn canonicalize(&self, ty: &TypeName) -> TypeName {
        self.aliases.get(ty).cloned().unwrap_or_else(|| ty.clone())
    }

    fn properties(&self, ty: &TypeName) -> Vec<PropertyDescriptor> {
        self.definition(ty)
            .map(|definition| {
                definition
                    .properties
                    .iter()
                    .map(|property| property.to_descriptor().0)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn type_markers(&self, ty: &TypeName) -> BTreeSet<TypeMarker> {
        self.types
            .get(&self.canonicalize(ty))
            .map(|definition| definition.markers.clone())
            .unwrap_or_default()
    }

    fn validate_type(&self, ty: &TypeName, log: &mut ValidationLog) {
        let Some(definition) = self.types.get(&self.canonicalize(ty)) else {
            return;
        };
        for property in &definition.properties {
            for conflict in property.to_descriptor().1 {
                let kept = conflict.kinds[0];
                log.report(ProblemKind::ConflictingMarkers, |p| {
                    p.property(&property.name)
                        .description(format!(
                            "has conflicting {} markers: {}",
                            conflict.category,
                            conflict
                                .kinds
                                .iter()
                                .map(MarkerKind::as_str)
                                .collect::<Vec<_>>()
                                .join(", ")
                        ))
                        .reason(format!(
                            "Markers of the {} category are mutually exclusive and only '{}' is kept",
                            conflict.category, kept
                        ))
                        .solution(format!("Keep only one {} marker", conflict.category))
                });
            }
        }
    }
}
