use prism_core::Color;
use prism_theme::{preset_bundle, ColorScheme, ColorToken, ThemePreset, ThemeRegistry};

#[test]
fn preset_catalog_contains_expected_presets() {
    let mut ids: Vec<&str> = ThemePreset::all().iter().map(|p| p.id()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["default", "forest", "ocean", "rose", "sunset"]);

    for preset in ThemePreset::all() {
        assert_eq!(ThemePreset::from_id(preset.id()), Some(*preset));
    }
}

#[test]
fn presets_have_distinct_light_and_dark_primary() {
    for preset in ThemePreset::all() {
        let bundle = preset.bundle();
        assert_ne!(
            bundle.for_scheme(ColorScheme::Light).get(ColorToken::Primary),
            bundle.for_scheme(ColorScheme::Dark).get(ColorToken::Primary),
            "Preset {:?} should have distinct light/dark primary colors",
            preset
        );
    }
}

#[test]
fn every_registered_theme_fills_every_role_in_both_schemes() {
    let registry = ThemeRegistry::builtin();
    for name in registry.names() {
        for scheme in [ColorScheme::Light, ColorScheme::Dark] {
            let set = registry.color_set(name, scheme).unwrap();
            let roles: Vec<ColorToken> = set.iter().map(|(token, _)| token).collect();
            assert_eq!(roles, ColorToken::ALL.to_vec(), "theme={name} scheme={scheme}");
        }
    }
}

#[test]
fn ocean_primary_values() {
    let bundle = preset_bundle(ThemePreset::Ocean);
    assert_eq!(bundle.name(), "ocean");
    assert_eq!(bundle.light().primary, Color::from_hex(0x0891B2));
    assert_eq!(bundle.dark().primary, Color::from_hex(0x22D3EE));
}

#[test]
fn foreground_on_intent_is_readable() {
    for preset in ThemePreset::all() {
        let bundle = preset.bundle();
        for scheme in [ColorScheme::Light, ColorScheme::Dark] {
            let colors = bundle.for_scheme(scheme);
            assert_ne!(
                colors.primary.is_dark(),
                colors.primary_foreground.is_dark(),
                "preset={preset:?} scheme={scheme:?}"
            );
        }
    }
}

#[test]
fn overlay_is_translucent() {
    for preset in ThemePreset::all() {
        let bundle = preset.bundle();
        for scheme in [ColorScheme::Light, ColorScheme::Dark] {
            let overlay = bundle.for_scheme(scheme).get(ColorToken::BackgroundOverlay);
            assert!(overlay.a > 0.0 && overlay.a < 1.0, "preset={preset:?}");
        }
    }
}
