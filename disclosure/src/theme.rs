//! Light/dark theme switch.
//!
//! Reads the stored preference once at start-up, mirrors it into a
//! `data-theme` attribute on `<html>` and `<body>`, and writes it back to the
//! store on every toggle. Presentation rules in the stylesheet key off that
//! attribute.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::selector::Selector;
use crate::surface::{KeyValueStore, Surface};

/// Default storage key for the theme preference.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Attribute mirrored onto `<html>` and `<body>`.
pub const THEME_ATTRIBUTE: &str = "data-theme";

const TOGGLE_ICON: &str = ".theme-toggle-icon";
const TOGGLE_ACTIVE_CLASS: &str = "active";

/// Stored as its lowercase name, see [`Theme::as_str`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored value. Anything other than `light` or `dark` is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon shown in the toggle: the theme a click switches to.
    #[must_use]
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀️",
        }
    }
}

/// Current theme plus the toggle buttons that reflect it.
#[derive(Debug, Clone)]
pub struct ThemeSwitch {
    theme: Theme,
    key: String,
    toggles: Vec<Selector>,
}

impl ThemeSwitch {
    /// Load the stored theme (default light) and apply it to the page.
    pub fn init<K, S>(store: &K, surface: &S, key: &str, toggles: Vec<Selector>) -> Self
    where
        K: KeyValueStore + ?Sized,
        S: Surface + ?Sized,
    {
        let stored = store.get(key);
        let theme = stored.as_deref().and_then(Theme::parse).unwrap_or_default();
        if let Some(raw) = stored.filter(|raw| Theme::parse(raw).is_none()) {
            log::warn!("theme: ignoring unrecognised stored value {raw:?}");
        }
        let switch = Self { theme, key: key.to_owned(), toggles };
        switch.apply(surface);
        switch
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme, apply it and persist it.
    pub fn toggle<K, S>(&mut self, store: &K, surface: &S) -> Theme
    where
        K: KeyValueStore + ?Sized,
        S: Surface + ?Sized,
    {
        self.theme = self.theme.toggled();
        self.apply(surface);
        store.set(&self.key, self.theme.as_str());
        log::debug!("theme: {}", self.theme.as_str());
        self.theme
    }

    fn apply<S: Surface + ?Sized>(&self, surface: &S) {
        surface.set_document_attribute(THEME_ATTRIBUTE, self.theme.as_str());
        for toggle in &self.toggles {
            let icon = toggle.descendant(TOGGLE_ICON);
            if !surface.exists(&icon) {
                continue;
            }
            match self.theme {
                Theme::Dark => surface.add_class(toggle, TOGGLE_ACTIVE_CLASS),
                Theme::Light => surface.remove_class(toggle, TOGGLE_ACTIVE_CLASS),
            }
            surface.set_text(&icon, self.theme.toggle_icon());
        }
    }
}
