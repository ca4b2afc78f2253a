//! Preference commands.

use clap::{Subcommand, ValueEnum};

use shopfront_core::{ColorSchemeId, Language, ThemeMode};
use shopfront_storefront::error::Result;
use shopfront_storefront::models::Appearance;
use shopfront_storefront::state::AppState;
use shopfront_storefront::storage::KeyValueStore;

use crate::output;

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Show current preferences and the resolved theme
    Show {
        /// Appearance reported by the OS, used by the `system` theme
        #[arg(long, value_enum)]
        platform: Option<PlatformArg>,
    },
    /// Set the theme mode: light, dark or system
    Theme { mode: ThemeMode },
    /// Set the accent color: blue, purple, green, orange or pink
    Color { scheme: ColorSchemeId },
    /// Set the interface language: en, es, fr or de
    Language { language: Language },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PlatformArg {
    Light,
    Dark,
}

impl From<PlatformArg> for Appearance {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Light => Self::Light,
            PlatformArg::Dark => Self::Dark,
        }
    }
}

pub async fn run<S: KeyValueStore + Clone>(
    state: &mut AppState<S>,
    action: PrefsAction,
) -> Result<()> {
    let prefs = state.preferences_mut();
    match action {
        PrefsAction::Show { platform } => {
            prefs.set_platform_appearance(platform.map(Appearance::from));
        }
        PrefsAction::Theme { mode } => {
            if prefs.set_mode(mode).await {
                output::done(format!("Theme set to {mode}"));
            }
        }
        PrefsAction::Color { scheme } => {
            if prefs.set_color_scheme(scheme).await {
                output::done(format!("Color scheme set to {scheme}"));
            }
        }
        PrefsAction::Language { language } => {
            if prefs.set_language(language).await {
                output::done(format!("Language set to {}", language.native_name()));
            }
        }
    }
    show(state);
    Ok(())
}

fn show<S: KeyValueStore + Clone>(state: &AppState<S>) {
    let prefs = state.preferences();
    let theme = prefs.theme();
    output::line(format!("Theme:    {}", prefs.mode()));
    output::line(format!("Color:    {}", prefs.color_scheme()));
    output::line(format!(
        "Language: {} ({})",
        prefs.language().native_name(),
        prefs.language()
    ));
    output::line(format!(
        "Resolved: {} / primary {} on {}",
        if theme.dark { "dark" } else { "light" },
        theme.colors.primary,
        theme.colors.background
    ));
}
