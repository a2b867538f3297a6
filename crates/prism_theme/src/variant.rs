//! Component style variants
//!
//! Styles are selected from a closed `(Variant, Intent, Size)` space. Every
//! combination maps to a [`StyleDescriptor`] that names color roles rather
//! than concrete colors, so the same descriptor works under any palette.

use std::fmt::Write as _;

use prism_core::Color;

use crate::surface::VariableSet;
use crate::tokens::ColorToken;

/// Visual treatment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Filled with the intent color
    #[default]
    Solid,
    /// Tinted background, intent-colored text
    Soft,
    /// Transparent with an intent-colored border
    Outline,
    /// Transparent until hovered
    Ghost,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Solid,
        Variant::Soft,
        Variant::Outline,
        Variant::Ghost,
    ];
}

/// Semantic color family
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Intent {
    #[default]
    Primary,
    Secondary,
    Success,
    Warning,
    Danger,
    Info,
}

impl Intent {
    pub const ALL: [Intent; 6] = [
        Intent::Primary,
        Intent::Secondary,
        Intent::Success,
        Intent::Warning,
        Intent::Danger,
        Intent::Info,
    ];

    /// `(base, hover, foreground-on)` roles
    fn roles(self) -> (ColorToken, ColorToken, ColorToken) {
        use ColorToken::*;
        match self {
            Intent::Primary => (Primary, PrimaryHover, PrimaryForeground),
            Intent::Secondary => (Secondary, SecondaryHover, SecondaryForeground),
            Intent::Success => (Success, SuccessHover, SuccessForeground),
            Intent::Warning => (Warning, WarningHover, WarningForeground),
            Intent::Danger => (Danger, DangerHover, DangerForeground),
            Intent::Info => (Info, InfoHover, InfoForeground),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Size {
    Sm,
    #[default]
    Md,
    Lg,
}

impl Size {
    pub const ALL: [Size; 3] = [Size::Sm, Size::Md, Size::Lg];

    pub fn metrics(self) -> SizeMetrics {
        match self {
            Size::Sm => SizeMetrics {
                height: 32.0,
                padding_x: 12.0,
                font_size: 14.0,
                radius: 6.0,
            },
            Size::Md => SizeMetrics {
                height: 40.0,
                padding_x: 16.0,
                font_size: 14.0,
                radius: 8.0,
            },
            Size::Lg => SizeMetrics {
                height: 48.0,
                padding_x: 24.0,
                font_size: 16.0,
                radius: 10.0,
            },
        }
    }
}

/// Dimensions in logical pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeMetrics {
    pub height: f32,
    pub padding_x: f32,
    pub font_size: f32,
    pub radius: f32,
}

/// A color role, optionally at reduced opacity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorRef {
    pub token: ColorToken,
    pub alpha: f32,
}

impl ColorRef {
    pub const fn opaque(token: ColorToken) -> Self {
        Self { token, alpha: 1.0 }
    }

    pub const fn tinted(token: ColorToken, alpha: f32) -> Self {
        Self { token, alpha }
    }

    pub fn resolve(&self, vars: &VariableSet) -> Color {
        let color = vars.get_token(self.token);
        color.with_alpha(color.a * self.alpha)
    }

    /// CSS value referencing the published custom property
    pub fn to_css(&self) -> String {
        let property = self.token.css_property();
        if self.alpha >= 1.0 {
            format!("var({property})")
        } else {
            let percent = (self.alpha * 100.0).round();
            format!("color-mix(in srgb, var({property}) {percent}%, transparent)")
        }
    }
}

/// Roles and metrics for one `(variant, intent, size)` combination
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleDescriptor {
    pub background: Option<ColorRef>,
    pub hover_background: ColorRef,
    pub foreground: ColorRef,
    pub border: Option<ColorRef>,
    pub metrics: SizeMetrics,
}

impl StyleDescriptor {
    pub fn of(variant: Variant, intent: Intent, size: Size) -> Self {
        let (base, hover, on_base) = intent.roles();
        let metrics = size.metrics();
        match variant {
            Variant::Solid => Self {
                background: Some(ColorRef::opaque(base)),
                hover_background: ColorRef::opaque(hover),
                foreground: ColorRef::opaque(on_base),
                border: None,
                metrics,
            },
            Variant::Soft => Self {
                background: Some(ColorRef::tinted(base, 0.12)),
                hover_background: ColorRef::tinted(base, 0.2),
                foreground: ColorRef::opaque(base),
                border: None,
                metrics,
            },
            Variant::Outline => Self {
                background: None,
                hover_background: ColorRef::tinted(base, 0.08),
                foreground: ColorRef::opaque(base),
                border: Some(ColorRef::opaque(base)),
                metrics,
            },
            Variant::Ghost => Self {
                background: None,
                hover_background: ColorRef::tinted(base, 0.08),
                foreground: ColorRef::opaque(base),
                border: None,
                metrics,
            },
        }
    }

    /// Concrete colors under the given variable set
    pub fn resolve(&self, vars: &VariableSet) -> ResolvedStyle {
        ResolvedStyle {
            background: self
                .background
                .map(|c| c.resolve(vars))
                .unwrap_or(Color::TRANSPARENT),
            hover_background: self.hover_background.resolve(vars),
            foreground: self.foreground.resolve(vars),
            border: self.border.map(|c| c.resolve(vars)),
            metrics: self.metrics,
        }
    }

    /// CSS declarations for the resting state
    pub fn to_css_declarations(&self) -> String {
        let mut css = String::new();
        let background = self
            .background
            .map(|c| c.to_css())
            .unwrap_or_else(|| "transparent".to_string());
        let _ = writeln!(css, "background-color: {background};");
        let _ = writeln!(css, "color: {};", self.foreground.to_css());
        match self.border {
            Some(border) => {
                let _ = writeln!(css, "border: 1px solid {};", border.to_css());
            }
            None => css.push_str("border: none;\n"),
        }
        let m = self.metrics;
        let _ = writeln!(css, "height: {}px;", m.height);
        let _ = writeln!(css, "padding: 0 {}px;", m.padding_x);
        let _ = writeln!(css, "font-size: {}px;", m.font_size);
        let _ = writeln!(css, "border-radius: {}px;", m.radius);
        css
    }
}

/// A [`StyleDescriptor`] with its roles replaced by concrete colors
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedStyle {
    pub background: Color,
    pub hover_background: Color,
    pub foreground: Color,
    pub border: Option<Color>,
    pub metrics: SizeMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::ThemePreset;
    use crate::theme::ColorScheme;

    fn ocean_light() -> VariableSet {
        VariableSet::new(ThemePreset::Ocean.bundle().for_scheme(ColorScheme::Light))
    }

    #[test]
    fn every_combination_is_styled() {
        let vars = ocean_light();
        for variant in Variant::ALL {
            for intent in Intent::ALL {
                for size in Size::ALL {
                    let style = StyleDescriptor::of(variant, intent, size);
                    let resolved = style.resolve(&vars);
                    assert!(resolved.foreground.a > 0.0, "{variant:?}/{intent:?}/{size:?}");
                    assert!(resolved.hover_background.a > 0.0);
                }
            }
        }
    }

    #[test]
    fn solid_uses_intent_roles() {
        let style = StyleDescriptor::of(Variant::Solid, Intent::Danger, Size::Md);
        assert_eq!(style.background, Some(ColorRef::opaque(ColorToken::Danger)));
        assert_eq!(style.hover_background, ColorRef::opaque(ColorToken::DangerHover));
        assert_eq!(style.foreground, ColorRef::opaque(ColorToken::DangerForeground));
        assert_eq!(style.border, None);
    }

    #[test]
    fn solid_primary_resolves_to_palette_color() {
        let vars = ocean_light();
        let resolved = StyleDescriptor::of(Variant::Solid, Intent::Primary, Size::Sm).resolve(&vars);
        assert_eq!(resolved.background, Color::from_hex(0x0891B2));
        assert_eq!(resolved.metrics.height, 32.0);
    }

    #[test]
    fn outline_has_border_and_transparent_background() {
        let vars = ocean_light();
        let style = StyleDescriptor::of(Variant::Outline, Intent::Info, Size::Lg);
        let resolved = style.resolve(&vars);
        assert_eq!(resolved.background, Color::TRANSPARENT);
        assert_eq!(resolved.border, Some(vars.get_token(ColorToken::Info)));

        let ghost = StyleDescriptor::of(Variant::Ghost, Intent::Info, Size::Lg);
        assert_eq!(ghost.border, None);
    }

    #[test]
    fn soft_background_is_tinted() {
        let vars = ocean_light();
        let resolved = StyleDescriptor::of(Variant::Soft, Intent::Primary, Size::Md).resolve(&vars);
        assert!((resolved.background.a - 0.12).abs() < 1e-6);
    }

    #[test]
    fn css_declarations_reference_custom_properties() {
        let css = StyleDescriptor::of(Variant::Soft, Intent::Success, Size::Md).to_css_declarations();
        assert!(css.contains(
            "background-color: color-mix(in srgb, var(--color-success) 12%, transparent);"
        ));
        assert!(css.contains("color: var(--color-success);"));
        assert!(css.contains("border: none;"));
        assert!(css.contains("height: 40px;"));
    }
}
