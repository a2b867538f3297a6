//! Theme error types

use prism_core::ColorParseError;
use thiserror::Error;

use crate::theme::ColorScheme;

/// Problems with a single light or dark color set
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("unknown color role `{0}`")]
    UnknownRole(String),

    #[error("missing color role `{0}`")]
    MissingRole(&'static str),

    #[error("color role `{0}` given more than once")]
    DuplicateRole(&'static str),

    #[error("invalid color for `{role}`: {source}")]
    InvalidColor {
        role: String,
        #[source]
        source: ColorParseError,
    },
}

/// Theme-related errors
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Mode string is not one of `light`, `dark`, `system`
    #[error("invalid theme mode `{0}` (expected light, dark or system)")]
    InvalidMode(String),

    /// Scheme string is not one of `light`, `dark`
    #[error("invalid color scheme `{0}` (expected light or dark)")]
    InvalidScheme(String),

    /// A configured palette failed validation
    #[error("theme `{theme}`, {scheme} palette: {source}")]
    Palette {
        theme: String,
        scheme: ColorScheme,
        #[source]
        source: PaletteError,
    },

    /// A configured palette extends a theme that does not exist
    #[error("theme `{theme}` extends unknown theme `{base}`")]
    UnknownBase { theme: String, base: String },

    /// Configuration document could not be parsed
    #[error("failed to parse theme config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
