//! Configuration file support for mooring.
//!
//! Two configuration file locations are read:
//! - Global: `<user config dir>/config.toml` - User-wide defaults
//! - Project: `.mooring/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::store::Memoization;
use crate::validation::problem::DEFAULT_DOCUMENTATION_BASE;

/// mooring configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Metadata store settings
    pub store: StoreConfig,

    /// Problem reporting settings
    pub validation: ValidationConfig,
}

/// Metadata store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// How concurrent first requests for one type are resolved
    pub memoization: Option<Memoization>,
}

/// Problem reporting configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ValidationConfig {
    /// Prefix of documentation locators (`<base>#<anchor>`)
    pub documentation_base: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.store.memoization.is_some() {
            self.store.memoization = other.store.memoization;
        }
        if other.validation.documentation_base.is_some() {
            self.validation.documentation_base = other.validation.documentation_base;
        }
    }

    pub fn memoization(&self) -> Memoization {
        self.store.memoization.unwrap_or_default()
    }

    pub fn documentation_base(&self) -> &str {
        self.validation
            .documentation_base
            .as_deref()
            .unwrap_or(DEFAULT_DOCUMENTATION_BASE)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.mooring/config.toml)
/// 2. Global config
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config path, inside the platform's user config directory.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "mooring", "mooring").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Get the project config path (.mooring/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".mooring").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.memoization(), Memoization::SingleFlight);
        assert_eq!(config.documentation_base(), DEFAULT_DOCUMENTATION_BASE);
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[store]
memoization = "last-write-wins"

[validation]
documentation-base = "https://docs.example.com/validation"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.memoization(), Memoization::LastWriteWins);
        assert_eq!(
            config.documentation_base(),
            "https://docs.example.com/validation"
        );
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.store.memoization = Some(Memoization::LastWriteWins);
        base.validation.documentation_base = Some("global".to_string());

        let mut override_cfg = Config::default();
        override_cfg.validation.documentation_base = Some("project".to_string());

        base.merge(override_cfg);
        assert_eq!(base.memoization(), Memoization::LastWriteWins);
        assert_eq!(base.documentation_base(), "project");
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[store]\nmemoization = \"sometimes\"\n").unwrap();

        assert!(Config::load(&config_path).is_err());
        let config = Config::load_or_default(&config_path);
        assert_eq!(config.memoization(), Memoization::SingleFlight);
    }

    #[test]
    fn test_load_config_project_wins() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        std::fs::write(&global, "[validation]\ndocumentation-base = \"global\"\n").unwrap();

        let project = project_config_path(tmp.path());
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();
        std::fs::write(&project, "[store]\nmemoization = \"last-write-wins\"\n").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.documentation_base(), "global");
        assert_eq!(config.memoization(), Memoization::LastWriteWins);
    }
}
