//! Theme and language preferences.
//!
//! Each setter writes the new value to storage before updating in-memory
//! state. A failed write leaves the current value in place and returns
//! `false`, so memory never runs ahead of what a restart would restore.

use std::str::FromStr;

use tracing::instrument;

use shopfront_core::{ColorSchemeId, Language, ThemeMode};

use crate::models::theme::is_dark;
use crate::models::{Appearance, Theme};
use crate::storage::{KeyValueStore, keys};

/// Persisted display preferences plus the platform appearance signal.
#[derive(Debug)]
pub struct PreferenceService<S> {
    storage: S,
    mode: ThemeMode,
    color_scheme: ColorSchemeId,
    language: Language,
    platform: Option<Appearance>,
}

impl<S: KeyValueStore> PreferenceService<S> {
    /// Defaults only, nothing read from storage.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            mode: ThemeMode::default(),
            color_scheme: ColorSchemeId::default(),
            language: Language::default(),
            platform: None,
        }
    }

    /// Load stored preferences. Missing or unrecognized values fall back to
    /// their defaults.
    pub async fn load(storage: S) -> Self {
        let mode = load_value(&storage, keys::THEME_MODE).await;
        let color_scheme = load_value(&storage, keys::COLOR_SCHEME).await;
        let language = load_value(&storage, keys::LANGUAGE).await;
        tracing::debug!(%mode, %color_scheme, %language, "Preferences loaded");
        Self {
            storage,
            mode,
            color_scheme,
            language,
            platform: None,
        }
    }

    pub const fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub const fn color_scheme(&self) -> ColorSchemeId {
        self.color_scheme
    }

    pub const fn language(&self) -> Language {
        self.language
    }

    /// Record the OS-level appearance. Only affects `ThemeMode::System`.
    pub const fn set_platform_appearance(&mut self, appearance: Option<Appearance>) {
        self.platform = appearance;
    }

    pub fn is_dark(&self) -> bool {
        is_dark(self.mode, self.platform)
    }

    /// The fully resolved theme.
    pub fn theme(&self) -> Theme {
        Theme::resolve(self.mode, self.color_scheme, self.platform)
    }

    #[instrument(skip(self))]
    pub async fn set_mode(&mut self, mode: ThemeMode) -> bool {
        let saved = self.storage.set(keys::THEME_MODE, mode.as_str()).await;
        if saved {
            self.mode = mode;
        } else {
            tracing::warn!("Theme mode not saved; keeping {}", self.mode);
        }
        saved
    }

    #[instrument(skip(self))]
    pub async fn set_color_scheme(&mut self, color_scheme: ColorSchemeId) -> bool {
        let saved = self
            .storage
            .set(keys::COLOR_SCHEME, color_scheme.as_str())
            .await;
        if saved {
            self.color_scheme = color_scheme;
        } else {
            tracing::warn!("Color scheme not saved; keeping {}", self.color_scheme);
        }
        saved
    }

    #[instrument(skip(self))]
    pub async fn set_language(&mut self, language: Language) -> bool {
        let saved = self.storage.set(keys::LANGUAGE, language.code()).await;
        if saved {
            self.language = language;
        } else {
            tracing::warn!("Language not saved; keeping {}", self.language);
        }
        saved
    }

    /// Forget all stored preferences and return to defaults.
    pub async fn reset(&mut self) {
        for key in [keys::THEME_MODE, keys::COLOR_SCHEME, keys::LANGUAGE] {
            self.storage.remove(key).await;
        }
        self.mode = ThemeMode::default();
        self.color_scheme = ColorSchemeId::default();
        self.language = Language::default();
    }
}

async fn load_value<S, T>(storage: &S, key: &str) -> T
where
    S: KeyValueStore,
    T: FromStr + Default,
    T::Err: std::fmt::Display,
{
    let Some(raw) = storage.get(key).await else {
        return T::default();
    };
    raw.parse().unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "Ignoring stored preference");
        T::default()
    })
}
