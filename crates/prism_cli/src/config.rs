//! Prism configuration file handling

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use prism_theme::{ThemeMode, ThemeRegistry};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "prism.toml";

/// Top-level Prism configuration (prism.toml)
///
/// `[themes.<name>]` tables are read by
/// [`ThemeRegistry::extend_from_toml`] from the same document.
#[derive(Debug, Default, Deserialize)]
pub struct PrismConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(skip)]
    source: String,
    #[serde(skip)]
    origin: Option<PathBuf>,
}

/// Used when nothing has been persisted yet
#[derive(Debug, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub mode: ThemeMode,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    "default".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mode: ThemeMode::default(),
            theme: default_theme(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    /// State file; defaults to the user config directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl PrismConfig {
    /// Load an explicit config file, or `./prism.toml` if it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file {} does not exist", path.display());
                }
                Self::load_file(path)
            }
            None => {
                let implicit = Path::new(CONFIG_FILE);
                if implicit.is_file() {
                    Self::load_file(implicit)
                } else {
                    tracing::debug!("no {CONFIG_FILE} found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config = Self::parse(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.origin = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: PrismConfig = toml::from_str(content)?;
        config.source = content.to_string();
        Ok(config)
    }

    /// Built-in presets plus the palettes declared in this file
    pub fn registry(&self) -> Result<ThemeRegistry> {
        let mut registry = ThemeRegistry::builtin();
        let added = registry.extend_from_toml(&self.source).with_context(|| {
            match &self.origin {
                Some(path) => format!("Invalid theme palette in {}", path.display()),
                None => "Invalid theme palette".to_string(),
            }
        })?;
        if added > 0 {
            tracing::debug!(added, "loaded configured palettes");
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = PrismConfig::parse("").unwrap();
        assert_eq!(config.defaults.mode, ThemeMode::System);
        assert_eq!(config.defaults.theme, "default");
        assert!(config.storage.path.is_none());
        assert_eq!(config.registry().unwrap().len(), 5);
    }

    #[test]
    fn reads_defaults_storage_and_palettes() {
        let config = PrismConfig::parse(
            r##"
[defaults]
mode = "dark"
theme = "midnight"

[storage]
path = "/tmp/prism-state.json"

[themes.midnight]
extends = "default"
dark = { primary = "#818cf8" }
"##,
        )
        .unwrap();
        assert_eq!(config.defaults.mode, ThemeMode::Dark);
        assert_eq!(config.defaults.theme, "midnight");
        assert_eq!(
            config.storage.path.as_deref(),
            Some(Path::new("/tmp/prism-state.json"))
        );
        assert!(config.registry().unwrap().contains("midnight"));
    }

    #[test]
    fn invalid_mode_is_rejected() {
        assert!(PrismConfig::parse("[defaults]\nmode = \"sepia\"\n").is_err());
    }

    #[test]
    fn bad_palette_surfaces_on_registry() {
        let config = PrismConfig::parse("[themes.x.light]\nprimary = \"nope\"\n").unwrap();
        let err = config.registry().unwrap_err();
        assert!(format!("{err:#}").contains("Invalid theme palette"));
    }

    #[test]
    fn load_file_and_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[defaults]\ntheme = \"ocean\"\n").unwrap();

        let config = PrismConfig::load(Some(&path)).unwrap();
        assert_eq!(config.defaults.theme, "ocean");

        assert!(PrismConfig::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
