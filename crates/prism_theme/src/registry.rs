//! Named palette registry
//!
//! The registry is the static table the controller resolves theme names
//! against. It is never empty, so there is always a palette to fall back to.

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, ThemeError};
use crate::presets::ThemePreset;
use crate::theme::{ColorScheme, ThemeBundle};
use crate::tokens::ColorTokens;

/// Insertion-ordered table of theme name -> light/dark bundle
#[derive(Clone, Debug)]
pub struct ThemeRegistry {
    bundles: IndexMap<String, ThemeBundle>,
}

impl ThemeRegistry {
    /// Create a registry whose fallback palette is `first`
    pub fn new(first: ThemeBundle) -> Self {
        let mut bundles = IndexMap::new();
        bundles.insert(first.name().to_string(), first);
        Self { bundles }
    }

    /// Registry holding every built-in preset, `default` first
    pub fn builtin() -> Self {
        let mut registry = Self::new(ThemePreset::Default.bundle());
        for preset in ThemePreset::all() {
            if *preset != ThemePreset::Default {
                registry.insert(preset.bundle());
            }
        }
        registry
    }

    /// Add or replace a palette; returns the replaced bundle, if any.
    ///
    /// Replacing keeps the original position, so the fallback palette stays
    /// first even when overridden.
    pub fn insert(&mut self, bundle: ThemeBundle) -> Option<ThemeBundle> {
        self.bundles.insert(bundle.name().to_string(), bundle)
    }

    pub fn get(&self, name: &str) -> Option<&ThemeBundle> {
        self.bundles.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bundles.contains_key(name)
    }

    /// Theme names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// Never true: the fallback palette is always present
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// The color set in effect for `(name, scheme)`
    pub fn color_set(&self, name: &str, scheme: ColorScheme) -> Option<&ColorTokens> {
        self.get(name).map(|bundle| bundle.for_scheme(scheme))
    }

    /// The first registered palette
    pub fn fallback(&self) -> &ThemeBundle {
        // Seeded by `new`; bundles are never removed.
        &self.bundles[0]
    }

    pub fn fallback_name(&self) -> &str {
        self.fallback().name()
    }

    /// Color set for `(name, scheme)`, or the fallback palette's if `name`
    /// is not registered
    pub fn color_set_or_fallback(&self, name: &str, scheme: ColorScheme) -> &ColorTokens {
        self.get(name)
            .unwrap_or_else(|| self.fallback())
            .for_scheme(scheme)
    }

    /// Register palettes from the `[themes.<name>]` tables of a TOML document.
    ///
    /// ```toml
    /// [themes.midnight]
    /// extends = "default"
    ///
    /// [themes.midnight.dark]
    /// primary = "#818cf8"
    /// "background.primary" = "#020617"
    /// ```
    ///
    /// Without `extends` both schemes must list every role. With `extends`,
    /// unlisted roles are taken from the base theme's matching scheme. The
    /// document is validated as a whole before anything is registered.
    /// Returns the number of palettes added or replaced.
    pub fn extend_from_toml(&mut self, src: &str) -> Result<usize> {
        let doc: PaletteDocument = toml::from_str(src)?;

        let mut staged: Vec<ThemeBundle> = Vec::with_capacity(doc.themes.len());
        for (name, palette) in &doc.themes {
            let base = match &palette.extends {
                Some(base_name) => {
                    let found = staged
                        .iter()
                        .find(|b| b.name() == base_name)
                        .or_else(|| self.get(base_name));
                    match found {
                        Some(bundle) => Some(bundle.clone()),
                        None => {
                            return Err(ThemeError::UnknownBase {
                                theme: name.clone(),
                                base: base_name.clone(),
                            })
                        }
                    }
                }
                None => None,
            };

            let build = |scheme: ColorScheme, roles: &IndexMap<String, String>| {
                ColorTokens::from_map(
                    roles.iter().map(|(k, v)| (k.as_str(), v.as_str())),
                    base.as_ref().map(|b| b.for_scheme(scheme)),
                )
                .map_err(|source| ThemeError::Palette {
                    theme: name.clone(),
                    scheme,
                    source,
                })
            };

            let light = build(ColorScheme::Light, &palette.light)?;
            let dark = build(ColorScheme::Dark, &palette.dark)?;
            staged.push(ThemeBundle::new(name.clone(), light, dark));
        }

        let count = staged.len();
        for bundle in staged {
            debug!(theme = bundle.name(), "registered configured palette");
            self.insert(bundle);
        }
        Ok(count)
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Default, Deserialize)]
struct PaletteDocument {
    #[serde(default)]
    themes: IndexMap<String, PaletteTable>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PaletteTable {
    #[serde(default)]
    extends: Option<String>,
    #[serde(default)]
    light: IndexMap<String, String>,
    #[serde(default)]
    dark: IndexMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaletteError;
    use crate::tokens::ColorToken;
    use prism_core::Color;

    #[test]
    fn builtin_lists_presets_in_order() {
        let registry = ThemeRegistry::builtin();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["default", "ocean", "forest", "sunset", "rose"]);
        assert_eq!(registry.fallback_name(), "default");
    }

    #[test]
    fn color_set_lookup() {
        let registry = ThemeRegistry::builtin();
        let light = registry.color_set("ocean", ColorScheme::Light).unwrap();
        let dark = registry.color_set("ocean", ColorScheme::Dark).unwrap();
        assert_eq!(light.primary, Color::from_hex(0x0891B2));
        assert_eq!(dark.primary, Color::from_hex(0x22D3EE));
        assert!(registry.color_set("nope", ColorScheme::Light).is_none());
    }

    #[test]
    fn replacing_keeps_fallback_first() {
        let mut registry = ThemeRegistry::builtin();
        let ocean = registry.get("ocean").cloned().unwrap();
        let replacement = ThemeBundle::new("default", ocean.light().clone(), ocean.dark().clone());
        assert!(registry.insert(replacement).is_some());
        assert_eq!(registry.fallback_name(), "default");
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn extends_fills_unlisted_roles() {
        let mut registry = ThemeRegistry::builtin();
        let added = registry
            .extend_from_toml(
                r##"
[defaults]
mode = "dark"

[themes.midnight]
extends = "default"

[themes.midnight.dark]
primary = "#818cf8"
"background.primary" = "#020617"
"##,
            )
            .unwrap();
        assert_eq!(added, 1);

        let default = registry.get("default").cloned().unwrap();
        let midnight = registry.get("midnight").unwrap();
        assert_eq!(midnight.dark().primary, Color::from_hex(0x818CF8));
        assert_eq!(
            midnight.dark().get(ColorToken::BackgroundPrimary),
            Color::from_hex(0x020617)
        );
        assert_eq!(midnight.dark().danger, default.dark().danger);
        assert_eq!(midnight.light(), default.light());
    }

    #[test]
    fn standalone_palette_must_be_complete() {
        let mut registry = ThemeRegistry::builtin();
        let err = registry
            .extend_from_toml(
                r##"
[themes.partial.light]
primary = "#000000"
"##,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ThemeError::Palette {
                scheme: ColorScheme::Light,
                source: PaletteError::MissingRole(_),
                ..
            }
        ));
        assert!(!registry.contains("partial"));
    }

    #[test]
    fn unknown_base_is_rejected_and_nothing_registered() {
        let mut registry = ThemeRegistry::builtin();
        let err = registry
            .extend_from_toml(
                r##"
[themes.good]
extends = "ocean"

[themes.bad]
extends = "missing"
"##,
            )
            .unwrap_err();
        assert!(matches!(err, ThemeError::UnknownBase { .. }));
        assert!(!registry.contains("good"));
    }

    #[test]
    fn palettes_may_extend_earlier_palettes_in_same_document() {
        let mut registry = ThemeRegistry::builtin();
        registry
            .extend_from_toml(
                r##"
[themes.teal]
extends = "ocean"
light = { primary = "#0d9488" }

[themes.teal-dim]
extends = "teal"
dark = { primary = "#115e59" }
"##,
            )
            .unwrap();
        let dim = registry.get("teal-dim").unwrap();
        assert_eq!(dim.light().primary, Color::from_hex(0x0D9488));
        assert_eq!(dim.dark().primary, Color::from_hex(0x115E59));
    }

    #[test]
    fn malformed_document_is_a_config_error() {
        let mut registry = ThemeRegistry::builtin();
        assert!(matches!(
            registry.extend_from_toml("[themes.x]\nshade = 3\n"),
            Err(ThemeError::Config(_))
        ));
    }
}
