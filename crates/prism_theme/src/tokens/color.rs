//! Color tokens for theming
//!
//! Every palette fills the same fixed set of semantic roles. The role set is
//! declared once below; the token enum, the [`ColorTokens`] struct and the
//! name table are all generated from it so they cannot drift apart.

use prism_core::Color;
use rustc_hash::FxHashMap;

use crate::error::PaletteError;

macro_rules! color_roles {
    ($( $(#[$meta:meta])* $variant:ident => $field:ident, $name:literal; )*) => {
        /// Semantic color token keys for dynamic access
        #[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
        pub enum ColorToken {
            $( $(#[$meta])* $variant, )*
        }

        impl ColorToken {
            /// Every role, in publication order
            pub const ALL: &'static [ColorToken] = &[ $( ColorToken::$variant, )* ];

            /// Published variable name, e.g. `color.primary.hover`
            pub const fn name(self) -> &'static str {
                match self {
                    $( ColorToken::$variant => $name, )*
                }
            }
        }

        /// Complete set of semantic color tokens for one scheme of a palette
        #[derive(Clone, Debug, PartialEq)]
        pub struct ColorTokens {
            $( pub $field: Color, )*
        }

        impl ColorTokens {
            /// Get a color by token key
            pub fn get(&self, token: ColorToken) -> Color {
                match token {
                    $( ColorToken::$variant => self.$field, )*
                }
            }

            /// Linear interpolation between two color token sets
            pub fn lerp(from: &Self, to: &Self, t: f32) -> Self {
                Self {
                    $( $field: Color::lerp(&from.$field, &to.$field, t), )*
                }
            }

            fn from_fn(mut f: impl FnMut(ColorToken) -> Color) -> Self {
                Self {
                    $( $field: f(ColorToken::$variant), )*
                }
            }
        }
    };
}

color_roles! {
    // Brand colors
    Primary => primary, "color.primary";
    PrimaryHover => primary_hover, "color.primary.hover";
    PrimaryForeground => primary_foreground, "color.primary.foreground";
    Secondary => secondary, "color.secondary";
    SecondaryHover => secondary_hover, "color.secondary.hover";
    SecondaryForeground => secondary_foreground, "color.secondary.foreground";

    // Status colors
    Success => success, "color.success";
    SuccessHover => success_hover, "color.success.hover";
    SuccessForeground => success_foreground, "color.success.foreground";
    Warning => warning, "color.warning";
    WarningHover => warning_hover, "color.warning.hover";
    WarningForeground => warning_foreground, "color.warning.foreground";
    Danger => danger, "color.danger";
    DangerHover => danger_hover, "color.danger.hover";
    DangerForeground => danger_foreground, "color.danger.foreground";
    Info => info, "color.info";
    InfoHover => info_hover, "color.info.hover";
    InfoForeground => info_foreground, "color.info.foreground";

    // Background tiers
    BackgroundPrimary => background_primary, "color.background.primary";
    BackgroundSecondary => background_secondary, "color.background.secondary";
    BackgroundTertiary => background_tertiary, "color.background.tertiary";
    BackgroundElevated => background_elevated, "color.background.elevated";
    /// Scrim behind modal surfaces
    BackgroundOverlay => background_overlay, "color.background.overlay";
    BackgroundInverse => background_inverse, "color.background.inverse";

    // Foreground tiers
    ForegroundPrimary => foreground_primary, "color.foreground.primary";
    ForegroundSecondary => foreground_secondary, "color.foreground.secondary";
    ForegroundTertiary => foreground_tertiary, "color.foreground.tertiary";
    ForegroundInverse => foreground_inverse, "color.foreground.inverse";

    // Border tiers
    BorderPrimary => border_primary, "color.border.primary";
    BorderSecondary => border_secondary, "color.border.secondary";
    BorderTertiary => border_tertiary, "color.border.tertiary";
}

impl ColorToken {
    /// CSS custom property spelling, e.g. `--color-primary-hover`
    pub fn css_property(self) -> String {
        format!("--{}", self.name().replace('.', "-"))
    }

    /// Look up a role by name.
    ///
    /// Accepts the published form (`color.primary.hover`), the CSS form
    /// (`--color-primary-hover`) and config-friendly spellings without the
    /// `color` prefix (`primary-hover`, `primary_hover`).
    pub fn from_name(name: &str) -> Option<ColorToken> {
        let normalized = name
            .trim()
            .trim_start_matches("--")
            .to_ascii_lowercase()
            .replace(['-', '_'], ".");
        let short = normalized
            .strip_prefix("color.")
            .unwrap_or(normalized.as_str());

        ColorToken::ALL
            .iter()
            .copied()
            .find(|token| token.name().strip_prefix("color.") == Some(short))
    }
}

impl ColorTokens {
    /// Iterate `(token, color)` pairs in publication order
    pub fn iter(&self) -> impl Iterator<Item = (ColorToken, Color)> + '_ {
        ColorToken::ALL.iter().map(move |token| (*token, self.get(*token)))
    }

    /// Build a complete token set from `role -> hex` pairs.
    ///
    /// Every role must be present exactly once (after name normalization),
    /// unless `base` supplies it. Unknown role names are rejected.
    pub fn from_map<'a, I>(entries: I, base: Option<&ColorTokens>) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut parsed: FxHashMap<ColorToken, Color> = FxHashMap::default();
        for (role, value) in entries {
            let token = ColorToken::from_name(role)
                .ok_or_else(|| PaletteError::UnknownRole(role.to_string()))?;
            let color = value
                .parse::<Color>()
                .map_err(|source| PaletteError::InvalidColor {
                    role: role.to_string(),
                    source,
                })?;
            if parsed.insert(token, color).is_some() {
                return Err(PaletteError::DuplicateRole(token.name()));
            }
        }

        if base.is_none() {
            if let Some(missing) = ColorToken::ALL
                .iter()
                .find(|token| !parsed.contains_key(*token))
            {
                return Err(PaletteError::MissingRole(missing.name()));
            }
        }

        Ok(Self::from_fn(|token| match parsed.get(&token) {
            Some(color) => *color,
            // Only reachable with a base set, checked above.
            None => base.map(|b| b.get(token)).unwrap_or_default(),
        }))
    }
}
