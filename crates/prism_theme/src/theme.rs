//! Theme modes, resolved color schemes and light/dark palette bundles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::tokens::ColorTokens;

/// Concrete light/dark value actually in effect
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// Get the opposite scheme
    pub fn toggle(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            _ => Err(ThemeError::InvalidScheme(s.to_string())),
        }
    }
}

/// User preference: a fixed scheme, or follow the operating system
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// Resolve against the OS preference.
    ///
    /// `system` with no known preference resolves to light.
    pub fn resolve(self, system: Option<ColorScheme>) -> ColorScheme {
        match self {
            ThemeMode::Light => ColorScheme::Light,
            ThemeMode::Dark => ColorScheme::Dark,
            ThemeMode::System => system.unwrap_or(ColorScheme::Light),
        }
    }
}

impl From<ColorScheme> for ThemeMode {
    fn from(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => ThemeMode::Light,
            ColorScheme::Dark => ThemeMode::Dark,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            _ => Err(ThemeError::InvalidMode(s.to_string())),
        }
    }
}

/// A named palette: one color set per scheme
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeBundle {
    name: String,
    light: ColorTokens,
    dark: ColorTokens,
}

impl ThemeBundle {
    pub fn new(name: impl Into<String>, light: ColorTokens, dark: ColorTokens) -> Self {
        Self {
            name: name.into(),
            light,
            dark,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn light(&self) -> &ColorTokens {
        &self.light
    }

    pub fn dark(&self) -> &ColorTokens {
        &self.dark
    }

    /// Get the color set for a scheme
    pub fn for_scheme(&self, scheme: ColorScheme) -> &ColorTokens {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_modes_ignore_system_preference() {
        for system in [None, Some(ColorScheme::Light), Some(ColorScheme::Dark)] {
            assert_eq!(ThemeMode::Light.resolve(system), ColorScheme::Light);
            assert_eq!(ThemeMode::Dark.resolve(system), ColorScheme::Dark);
        }
    }

    #[test]
    fn system_mode_follows_preference_and_defaults_to_light() {
        assert_eq!(ThemeMode::System.resolve(None), ColorScheme::Light);
        assert_eq!(
            ThemeMode::System.resolve(Some(ColorScheme::Dark)),
            ColorScheme::Dark
        );
    }

    #[test]
    fn parse_round_trips_and_rejects_unknown() {
        for mode in ThemeMode::ALL {
            assert_eq!(mode.as_str().parse::<ThemeMode>().unwrap(), mode);
        }
        assert_eq!(" DARK ".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert!(matches!(
            "auto".parse::<ThemeMode>(),
            Err(ThemeError::InvalidMode(_))
        ));
        assert!(matches!(
            "system".parse::<ColorScheme>(),
            Err(ThemeError::InvalidScheme(_))
        ));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(
            serde_json::to_string(&ThemeMode::System).unwrap(),
            "\"system\""
        );
        assert_eq!(
            serde_json::from_str::<ColorScheme>("\"dark\"").unwrap(),
            ColorScheme::Dark
        );
    }

    #[test]
    fn toggle_flips() {
        assert_eq!(ColorScheme::Light.toggle(), ColorScheme::Dark);
        assert_eq!(ColorScheme::Dark.toggle(), ColorScheme::Light);
    }
}
