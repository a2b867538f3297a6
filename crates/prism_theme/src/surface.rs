//! Published color variables
//!
//! A [`VariableSet`] is the complete, ordered set of `color.*` channels for
//! one palette and scheme. The controller builds the whole set first and
//! hands it to a [`VariableSurface`] in a single `apply` call, so readers
//! never observe a half-written palette.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use indexmap::IndexMap;
use prism_core::Color;
use serde_json::{json, Value};

use crate::tokens::{ColorToken, ColorTokens};

/// Version of the published channel set
pub const SURFACE_VERSION: u32 = 1;

/// Every `color.*` channel with its rendered value
#[derive(Clone, Debug, PartialEq)]
pub struct VariableSet {
    tokens: ColorTokens,
    values: IndexMap<&'static str, String>,
}

impl VariableSet {
    pub fn new(tokens: &ColorTokens) -> Self {
        let values = tokens
            .iter()
            .map(|(token, color)| (token.name(), color.to_string()))
            .collect();
        Self {
            tokens: tokens.clone(),
            values,
        }
    }

    /// Rendered value of a channel.
    ///
    /// Accepts any spelling [`ColorToken::from_name`] does.
    pub fn get(&self, name: &str) -> Option<&str> {
        let token = ColorToken::from_name(name)?;
        self.values.get(token.name()).map(String::as_str)
    }

    pub fn get_token(&self, token: ColorToken) -> Color {
        self.tokens.get(token)
    }

    pub fn tokens(&self) -> &ColorTokens {
        &self.tokens
    }

    /// `(channel, value)` pairs in publication order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.values.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn version(&self) -> u32 {
        SURFACE_VERSION
    }

    /// Render as a CSS rule of custom properties
    ///
    /// ```text
    /// :root {
    ///   --color-primary: #0891b2;
    ///   ...
    /// }
    /// ```
    pub fn to_css(&self, selector: &str) -> String {
        let mut css = String::with_capacity(48 * self.values.len());
        let _ = writeln!(css, "{selector} {{");
        for token in ColorToken::ALL {
            let _ = writeln!(css, "  {}: {};", token.css_property(), self.tokens.get(*token));
        }
        css.push_str("}\n");
        css
    }

    /// `{"version": 1, "variables": {"color.primary": "#…", …}}`
    pub fn to_json(&self) -> Value {
        let variables: serde_json::Map<String, Value> = self
            .iter()
            .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
            .collect();
        json!({
            "version": SURFACE_VERSION,
            "variables": variables,
        })
    }
}

/// Destination for published variables
pub trait VariableSurface {
    /// Replace every channel with the values in `vars`
    fn apply(&mut self, vars: &VariableSet);
}

#[derive(Debug, Default)]
struct SurfaceInner {
    current: Option<VariableSet>,
    generation: u64,
}

/// In-process surface with cheap read handles
///
/// Clones share the same storage: hand one clone to the controller and keep
/// the others wherever colors are read.
#[derive(Clone, Debug, Default)]
pub struct SharedSurface {
    inner: Rc<RefCell<SurfaceInner>>,
}

impl SharedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a channel; `None` before the first publish
    pub fn get(&self, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .current
            .as_ref()
            .and_then(|vars| vars.get(name))
            .map(str::to_string)
    }

    pub fn snapshot(&self) -> Option<VariableSet> {
        self.inner.borrow().current.clone()
    }

    /// Number of publishes seen
    pub fn generation(&self) -> u64 {
        self.inner.borrow().generation
    }
}

impl VariableSurface for SharedSurface {
    fn apply(&mut self, vars: &VariableSet) {
        let mut inner = self.inner.borrow_mut();
        inner.current = Some(vars.clone());
        inner.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::ThemePreset;
    use crate::theme::ColorScheme;
    use pretty_assertions::assert_eq;

    fn ocean(scheme: ColorScheme) -> VariableSet {
        VariableSet::new(ThemePreset::Ocean.bundle().for_scheme(scheme))
    }

    #[test]
    fn variable_set_covers_every_role() {
        let vars = ocean(ColorScheme::Light);
        assert_eq!(vars.len(), ColorToken::ALL.len());
        assert_eq!(vars.version(), 1);
        let names: Vec<&str> = vars.iter().map(|(name, _)| name).collect();
        let expected: Vec<&str> = ColorToken::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn get_accepts_published_and_css_names() {
        let vars = ocean(ColorScheme::Light);
        assert_eq!(vars.get("color.primary"), Some("#0891b2"));
        assert_eq!(vars.get("--color-primary"), Some("#0891b2"));
        assert_eq!(vars.get("color.nope"), None);
        assert_eq!(ocean(ColorScheme::Dark).get("color.primary"), Some("#22d3ee"));
    }

    #[test]
    fn css_block_lists_custom_properties() {
        let css = ocean(ColorScheme::Light).to_css(":root");
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --color-primary: #0891b2;\n"));
        assert!(css.contains("--color-border-tertiary:"));
        assert!(css.ends_with("}\n"));
        assert_eq!(css.matches(';').count(), 31);
    }

    #[test]
    fn json_carries_version_and_variables() {
        let json = ocean(ColorScheme::Dark).to_json();
        assert_eq!(json["version"], 1);
        assert_eq!(json["variables"]["color.primary"], "#22d3ee");
        assert_eq!(json["variables"].as_object().map(|m| m.len()), Some(31));
    }

    #[test]
    fn shared_surface_clones_see_applies() {
        let reader = SharedSurface::new();
        let mut writer = reader.clone();
        assert_eq!(reader.get("color.primary"), None);
        assert_eq!(reader.generation(), 0);

        writer.apply(&ocean(ColorScheme::Light));
        writer.apply(&ocean(ColorScheme::Dark));

        assert_eq!(reader.get("color.primary").as_deref(), Some("#22d3ee"));
        assert_eq!(reader.generation(), 2);
        assert_eq!(reader.snapshot(), Some(ocean(ColorScheme::Dark)));
    }
}
