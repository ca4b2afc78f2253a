//! Theme resolution.
//!
//! The effective theme is a pure function of three inputs: the user's
//! [`ThemeMode`], the selected [`ColorSchemeId`], and the platform's reported
//! appearance. The color scheme only replaces the primary color trio of the
//! light or dark base palette; it never affects whether the theme is dark.

use serde::Serialize;

use shopfront_core::{ColorSchemeId, ThemeMode};

/// Appearance reported by the platform. `None` at call sites means the
/// platform gave no signal, which resolves as light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Appearance {
    Light,
    Dark,
}

/// Color tokens consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeColors {
    pub primary: &'static str,
    pub primary_light: &'static str,
    pub primary_dark: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
    pub error: &'static str,
    pub success: &'static str,
}

const LIGHT_BASE: ThemeColors = ThemeColors {
    primary: "#2563EB",
    primary_light: "#60A5FA",
    primary_dark: "#1D4ED8",
    background: "#FFFFFF",
    surface: "#F8FAFC",
    text: "#0F172A",
    text_secondary: "#64748B",
    border: "#E2E8F0",
    error: "#DC2626",
    success: "#16A34A",
};

const DARK_BASE: ThemeColors = ThemeColors {
    primary: "#3B82F6",
    primary_light: "#93C5FD",
    primary_dark: "#1E40AF",
    background: "#0F172A",
    surface: "#1E293B",
    text: "#F8FAFC",
    text_secondary: "#94A3B8",
    border: "#334155",
    error: "#F87171",
    success: "#4ADE80",
};

/// Primary color trio of an accent scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemePalette {
    pub primary: &'static str,
    pub primary_light: &'static str,
    pub primary_dark: &'static str,
}

/// Palette for an accent scheme.
#[must_use]
pub const fn scheme_palette(scheme: ColorSchemeId) -> SchemePalette {
    let (primary, primary_light, primary_dark) = match scheme {
        ColorSchemeId::Blue => ("#2563EB", "#60A5FA", "#1D4ED8"),
        ColorSchemeId::Purple => ("#7C3AED", "#A78BFA", "#5B21B6"),
        ColorSchemeId::Green => ("#059669", "#34D399", "#047857"),
        ColorSchemeId::Orange => ("#EA580C", "#FB923C", "#C2410C"),
        ColorSchemeId::Pink => ("#DB2777", "#F472B6", "#BE185D"),
    };
    SchemePalette {
        primary,
        primary_light,
        primary_dark,
    }
}

/// Resolve the dark flag for a mode and platform signal.
///
/// `System` tracks the platform; `Light` and `Dark` ignore it.
#[must_use]
pub fn is_dark(mode: ThemeMode, platform: Option<Appearance>) -> bool {
    match mode {
        ThemeMode::Light => false,
        ThemeMode::Dark => true,
        ThemeMode::System => platform == Some(Appearance::Dark),
    }
}

/// The resolved theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub mode: ThemeMode,
    pub color_scheme: ColorSchemeId,
    pub dark: bool,
    pub colors: ThemeColors,
}

impl Theme {
    /// Resolve the effective theme.
    #[must_use]
    pub fn resolve(
        mode: ThemeMode,
        color_scheme: ColorSchemeId,
        platform: Option<Appearance>,
    ) -> Self {
        let dark = is_dark(mode, platform);
        let base = if dark { DARK_BASE } else { LIGHT_BASE };
        let accent = scheme_palette(color_scheme);
        Self {
            mode,
            color_scheme,
            dark,
            colors: ThemeColors {
                primary: accent.primary,
                primary_light: accent.primary_light,
                primary_dark: accent.primary_dark,
                ..base
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_tracks_platform() {
        assert!(is_dark(ThemeMode::System, Some(Appearance::Dark)));
        assert!(!is_dark(ThemeMode::System, Some(Appearance::Light)));
        assert!(!is_dark(ThemeMode::System, None));
    }

    #[test]
    fn test_fixed_modes_ignore_platform() {
        for platform in [None, Some(Appearance::Light), Some(Appearance::Dark)] {
            assert!(!is_dark(ThemeMode::Light, platform));
            assert!(is_dark(ThemeMode::Dark, platform));
        }
    }

    #[test]
    fn test_scheme_replaces_only_primary_trio() {
        let blue = Theme::resolve(ThemeMode::Dark, ColorSchemeId::Blue, None);
        let pink = Theme::resolve(ThemeMode::Dark, ColorSchemeId::Pink, None);
        assert_eq!(pink.colors.primary, "#DB2777");
        assert_eq!(pink.colors.background, blue.colors.background);
        assert_eq!(pink.dark, blue.dark);
    }

    #[test]
    fn test_base_palette_follows_dark_flag() {
        let light = Theme::resolve(
            ThemeMode::System,
            ColorSchemeId::Green,
            Some(Appearance::Light),
        );
        let dark = Theme::resolve(
            ThemeMode::System,
            ColorSchemeId::Green,
            Some(Appearance::Dark),
        );
        assert_eq!(light.colors.background, "#FFFFFF");
        assert_eq!(dark.colors.background, "#0F172A");
        assert_eq!(light.colors.primary, dark.colors.primary);
    }
}
