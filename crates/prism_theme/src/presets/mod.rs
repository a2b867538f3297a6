//! Built-in palette presets.
//!
//! Each preset is described by a compact base palette per scheme. Hover and
//! foreground-on roles, the extra background tiers and the border tiers are
//! derived from it, so every preset fills the full role set.

use crate::theme::{ColorScheme, ThemeBundle};
use crate::tokens::ColorTokens;
use prism_core::Color;
use std::fmt::{Display, Formatter};

/// Built-in theme preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// Neutral slate surfaces with a blue accent.
    Default,
    /// Cyan accent on cool blue surfaces.
    Ocean,
    /// Green accent on deep green surfaces.
    Forest,
    /// Orange accent on warm stone surfaces.
    Sunset,
    /// Rose accent on wine surfaces.
    Rose,
}

impl ThemePreset {
    /// Stable preset id, used as the theme name.
    pub fn id(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Ocean => "ocean",
            Self::Forest => "forest",
            Self::Sunset => "sunset",
            Self::Rose => "rose",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Ocean => "Ocean",
            Self::Forest => "Forest",
            Self::Sunset => "Sunset",
            Self::Rose => "Rose",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 5] = [
            ThemePreset::Default,
            ThemePreset::Ocean,
            ThemePreset::Forest,
            ThemePreset::Sunset,
            ThemePreset::Rose,
        ];
        &PRESETS
    }

    /// Find a preset by id.
    pub fn from_id(id: &str) -> Option<ThemePreset> {
        Self::all().iter().copied().find(|p| p.id() == id)
    }

    /// Build a light/dark theme bundle for this preset.
    pub fn bundle(self) -> ThemeBundle {
        let (light, dark) = match self {
            Self::Default => (default_light(), default_dark()),
            Self::Ocean => (ocean_light(), ocean_dark()),
            Self::Forest => (forest_light(), forest_dark()),
            Self::Sunset => (sunset_light(), sunset_dark()),
            Self::Rose => (rose_light(), rose_dark()),
        };
        ThemeBundle::new(
            self.id(),
            build_colors(light, ColorScheme::Light),
            build_colors(dark, ColorScheme::Dark),
        )
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Convenience free function for ergonomic imports.
pub fn preset_bundle(preset: ThemePreset) -> ThemeBundle {
    preset.bundle()
}

#[derive(Clone, Copy)]
struct BasePalette {
    primary: Color,
    secondary: Color,
    background: Color,
    surface: Color,
    muted: Color,
    foreground: Color,
    muted_foreground: Color,
    border: Color,
}

/// Status colors shared by every preset.
struct StatusPalette {
    success: Color,
    warning: Color,
    danger: Color,
    info: Color,
}

fn status_palette(scheme: ColorScheme) -> StatusPalette {
    match scheme {
        ColorScheme::Light => StatusPalette {
            success: Color::from_hex(0x16A34A),
            warning: Color::from_hex(0xD97706),
            danger: Color::from_hex(0xDC2626),
            info: Color::from_hex(0x0284C7),
        },
        ColorScheme::Dark => StatusPalette {
            success: Color::from_hex(0x22C55E),
            warning: Color::from_hex(0xF59E0B),
            danger: Color::from_hex(0xEF4444),
            info: Color::from_hex(0x38BDF8),
        },
    }
}

const ON_DARK: Color = Color::WHITE;
const ON_LIGHT: Color = Color::rgb(10.0 / 255.0, 10.0 / 255.0, 10.0 / 255.0);

fn build_colors(base: BasePalette, scheme: ColorScheme) -> ColorTokens {
    let (hover_mix, state_target) = match scheme {
        ColorScheme::Light => (0.12, Color::BLACK),
        ColorScheme::Dark => (0.10, Color::WHITE),
    };
    let overlay_alpha = match scheme {
        ColorScheme::Light => 0.4,
        ColorScheme::Dark => 0.6,
    };
    let elevated = match scheme {
        ColorScheme::Light => blend(base.surface, Color::WHITE, 0.6),
        ColorScheme::Dark => blend(base.surface, Color::WHITE, 0.06),
    };
    let status = status_palette(scheme);
    let hover = |c: Color| blend(c, state_target, hover_mix);

    ColorTokens {
        primary: base.primary,
        primary_hover: hover(base.primary),
        primary_foreground: readable_on(base.primary),
        secondary: base.secondary,
        secondary_hover: hover(base.secondary),
        secondary_foreground: readable_on(base.secondary),
        success: status.success,
        success_hover: hover(status.success),
        success_foreground: readable_on(status.success),
        warning: status.warning,
        warning_hover: hover(status.warning),
        warning_foreground: readable_on(status.warning),
        danger: status.danger,
        danger_hover: hover(status.danger),
        danger_foreground: readable_on(status.danger),
        info: status.info,
        info_hover: hover(status.info),
        info_foreground: readable_on(status.info),
        background_primary: base.background,
        background_secondary: base.surface,
        background_tertiary: base.muted,
        background_elevated: elevated,
        background_overlay: Color::BLACK.with_alpha(overlay_alpha),
        background_inverse: base.foreground,
        foreground_primary: base.foreground,
        foreground_secondary: base.muted_foreground,
        foreground_tertiary: blend(base.muted_foreground, base.background, 0.35),
        foreground_inverse: base.background,
        border_primary: base.border,
        border_secondary: blend(base.border, state_target, 0.08),
        border_tertiary: blend(base.border, base.background, 0.5),
    }
}

fn readable_on(fill: Color) -> Color {
    if fill.is_dark() {
        ON_DARK
    } else {
        ON_LIGHT
    }
}

fn blend(a: Color, b: Color, t: f32) -> Color {
    Color::lerp(&a, &b, t)
}

fn default_light() -> BasePalette {
    BasePalette {
        primary: Color::from_hex(0x2563EB),
        secondary: Color::from_hex(0x7C3AED),
        background: Color::from_hex(0xFFFFFF),
        surface: Color::from_hex(0xF8FAFC),
        muted: Color::from_hex(0xF1F5F9),
        foreground: Color::from_hex(0x0F172A),
        muted_foreground: Color::from_hex(0x475569),
        border: Color::from_hex(0xE2E8F0),
    }
}

fn default_dark() -> BasePalette {
    BasePalette {
        primary: Color::from_hex(0x3B82F6),
        secondary: Color::from_hex(0xA78BFA),
        background: Color::from_hex(0x0F172A),
        surface: Color::from_hex(0x1E293B),
        muted: Color::from_hex(0x334155),
        foreground: Color::from_hex(0xF8FAFC),
        muted_foreground: Color::from_hex(0xCBD5E1),
        border: Color::from_hex(0x334155),
    }
}

fn ocean_light() -> BasePalette {
    BasePalette {
        primary: Color::from_hex(0x0891B2),
        secondary: Color::from_hex(0x2563EB),
        background: Color::from_hex(0xFFFFFF),
        surface: Color::from_hex(0xECFEFF),
        muted: Color::from_hex(0xCFFAFE),
        foreground: Color::from_hex(0x083344),
        muted_foreground: Color::from_hex(0x155E75),
        border: Color::from_hex(0xA5F3FC),
    }
}

fn ocean_dark() -> BasePalette {
    BasePalette {
        primary: Color::from_hex(0x22D3EE),
        secondary: Color::from_hex(0x60A5FA),
        background: Color::from_hex(0x082F49),
        surface: Color::from_hex(0x0C4A6E),
        muted: Color::from_hex(0x075985),
        foreground: Color::from_hex(0xECFEFF),
        muted_foreground: Color::from_hex(0xA5F3FC),
        border: Color::from_hex(0x155E75),
    }
}

fn forest_light() -> BasePalette {
    BasePalette {
        primary: Color::from_hex(0x15803D),
        secondary: Color::from_hex(0xA16207),
        background: Color::from_hex(0xFFFFFF),
        surface: Color::from_hex(0xF0FDF4),
        muted: Color::from_hex(0xDCFCE7),
        foreground: Color::from_hex(0x052E16),
        muted_foreground: Color::from_hex(0x166534),
        border: Color::from_hex(0xBBF7D0),
    }
}

fn forest_dark() -> BasePalette {
    BasePalette {
        primary: Color::from_hex(0x4ADE80),
        secondary: Color::from_hex(0xFACC15),
        background: Color::from_hex(0x052E16),
        surface: Color::from_hex(0x14532D),
        muted: Color::from_hex(0x166534),
        foreground: Color::from_hex(0xF0FDF4),
        muted_foreground: Color::from_hex(0xBBF7D0),
        border: Color::from_hex(0x166534),
    }
}

fn sunset_light() -> BasePalette {
    BasePalette {
        primary: Color::from_hex(0xEA580C),
        secondary: Color::from_hex(0xDB2777),
        background: Color::from_hex(0xFFFFFF),
        surface: Color::from_hex(0xFFF7ED),
        muted: Color::from_hex(0xFFEDD5),
        foreground: Color::from_hex(0x431407),
        muted_foreground: Color::from_hex(0x9A3412),
        border: Color::from_hex(0xFED7AA),
    }
}

fn sunset_dark() -> BasePalette {
    BasePalette {
        primary: Color::from_hex(0xFB923C),
        secondary: Color::from_hex(0xF472B6),
        background: Color::from_hex(0x1C1917),
        surface: Color::from_hex(0x292524),
        muted: Color::from_hex(0x44403C),
        foreground: Color::from_hex(0xFFF7ED),
        muted_foreground: Color::from_hex(0xFDBA74),
        border: Color::from_hex(0x57534E),
    }
}

fn rose_light() -> BasePalette {
    BasePalette {
        primary: Color::from_hex(0xE11D48),
        secondary: Color::from_hex(0x9333EA),
        background: Color::from_hex(0xFFFFFF),
        surface: Color::from_hex(0xFFF1F2),
        muted: Color::from_hex(0xFFE4E6),
        foreground: Color::from_hex(0x4C0519),
        muted_foreground: Color::from_hex(0x9F1239),
        border: Color::from_hex(0xFECDD3),
    }
}

fn rose_dark() -> BasePalette {
    BasePalette {
        primary: Color::from_hex(0xFB7185),
        secondary: Color::from_hex(0xC084FC),
        background: Color::from_hex(0x1F0A12),
        surface: Color::from_hex(0x4C0519),
        muted: Color::from_hex(0x881337),
        foreground: Color::from_hex(0xFFF1F2),
        muted_foreground: Color::from_hex(0xFDA4AF),
        border: Color::from_hex(0x881337),
    }
}
