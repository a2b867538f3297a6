//! OS color scheme detection
//!
//! Detection shells out to the platform's own settings tool. Every probe is
//! best-effort: a missing tool, a failed command or unrecognized output all
//! mean "unknown", which callers resolve to light.

use tracing::trace;

use crate::theme::ColorScheme;

/// Environment variable that overrides detection (`light` or `dark`)
pub const SCHEME_ENV: &str = "PRISM_COLOR_SCHEME";

/// Detect the current OS color scheme preference
pub fn detect_system_color_scheme() -> Option<ColorScheme> {
    if let Some(value) = std::env::var_os(SCHEME_ENV) {
        match value.to_string_lossy().parse::<ColorScheme>() {
            Ok(scheme) => return Some(scheme),
            Err(err) => trace!(%err, "ignoring {SCHEME_ENV}"),
        }
    }
    let detected = detect_platform();
    trace!(?detected, "probed system color scheme");
    detected
}

#[cfg(target_os = "macos")]
fn detect_platform() -> Option<ColorScheme> {
    // The key is absent (and `defaults` exits non-zero) in light mode.
    let output = std::process::Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .ok()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    if output.status.success() && stdout.trim().eq_ignore_ascii_case("dark") {
        Some(ColorScheme::Dark)
    } else {
        Some(ColorScheme::Light)
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn detect_platform() -> Option<ColorScheme> {
    let gsettings = std::process::Command::new("gsettings")
        .args(["get", "org.gnome.desktop.interface", "color-scheme"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| {
            parse_gsettings_color_scheme(&String::from_utf8_lossy(&output.stdout))
        });
    if gsettings.is_some() {
        return gsettings;
    }

    std::env::var("GTK_THEME")
        .ok()
        .and_then(|name| scheme_from_theme_name(&name))
}

#[cfg(windows)]
fn detect_platform() -> Option<ColorScheme> {
    let output = std::process::Command::new("reg")
        .args([
            "query",
            r"HKCU\Software\Microsoft\Windows\CurrentVersion\Themes\Personalize",
            "/v",
            "AppsUseLightTheme",
        ])
        .output()
        .ok()
        .filter(|output| output.status.success())?;
    parse_reg_apps_use_light_theme(&String::from_utf8_lossy(&output.stdout))
}

#[cfg(not(any(unix, windows)))]
fn detect_platform() -> Option<ColorScheme> {
    None
}

/// Parse `gsettings get org.gnome.desktop.interface color-scheme` output.
///
/// `'default'` carries no preference and yields `None`.
#[cfg_attr(not(all(unix, not(target_os = "macos"))), allow(dead_code))]
pub(crate) fn parse_gsettings_color_scheme(output: &str) -> Option<ColorScheme> {
    match output.trim().trim_matches('\'') {
        "prefer-dark" => Some(ColorScheme::Dark),
        "prefer-light" => Some(ColorScheme::Light),
        _ => None,
    }
}

/// Infer a scheme from a GTK theme name such as `Adwaita:dark` or `Yaru-light`
#[cfg_attr(not(all(unix, not(target_os = "macos"))), allow(dead_code))]
pub(crate) fn scheme_from_theme_name(name: &str) -> Option<ColorScheme> {
    let normalized = name.trim().to_ascii_lowercase();
    if normalized.contains("dark") {
        Some(ColorScheme::Dark)
    } else if normalized.contains("light") {
        Some(ColorScheme::Light)
    } else {
        None
    }
}

/// Parse `reg query ... /v AppsUseLightTheme` output (`REG_DWORD 0x0` = dark)
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn parse_reg_apps_use_light_theme(output: &str) -> Option<ColorScheme> {
    let line = output
        .lines()
        .find(|line| line.contains("AppsUseLightTheme"))?;
    let value = line.split_whitespace().last()?;
    let value = value.trim_start_matches("0x");
    match u32::from_str_radix(value, 16).ok()? {
        0 => Some(ColorScheme::Dark),
        _ => Some(ColorScheme::Light),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gsettings_values() {
        assert_eq!(
            parse_gsettings_color_scheme("'prefer-dark'\n"),
            Some(ColorScheme::Dark)
        );
        assert_eq!(
            parse_gsettings_color_scheme("'prefer-light'"),
            Some(ColorScheme::Light)
        );
        assert_eq!(parse_gsettings_color_scheme("'default'"), None);
        assert_eq!(parse_gsettings_color_scheme(""), None);
    }

    #[test]
    fn gtk_theme_names() {
        assert_eq!(scheme_from_theme_name("Adwaita:dark"), Some(ColorScheme::Dark));
        assert_eq!(scheme_from_theme_name("Yaru-Light"), Some(ColorScheme::Light));
        assert_eq!(scheme_from_theme_name("Adwaita"), None);
    }

    #[test]
    fn windows_registry_output() {
        let dark = "\r\nHKEY_CURRENT_USER\\Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize\r\n    AppsUseLightTheme    REG_DWORD    0x0\r\n";
        let light = "    AppsUseLightTheme    REG_DWORD    0x1\r\n";
        assert_eq!(parse_reg_apps_use_light_theme(dark), Some(ColorScheme::Dark));
        assert_eq!(parse_reg_apps_use_light_theme(light), Some(ColorScheme::Light));
        assert_eq!(parse_reg_apps_use_light_theme("ERROR"), None);
    }
}
