//! Page configuration: breakpoints, storage key, hover delay, log level.
//!
//! Defaults match the site's stylesheet breakpoints. A page may override any
//! field with a JSON blob in `<script type="application/json" id="site-ui-config">`;
//! missing fields keep their defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::MountError;

/// Element id of the optional JSON override.
pub const CONFIG_ELEMENT_ID: &str = "site-ui-config";

pub const DEFAULT_MOBILE_NAV_BREAKPOINT: u32 = 900;
pub const DEFAULT_DROPDOWN_BREAKPOINT: u32 = 900;
pub const DEFAULT_TAB_MENU_BREAKPOINT: u32 = 900;
pub const DEFAULT_SIDEBAR_BREAKPOINT: u32 = 1024;
pub const DEFAULT_FILTER_BREAKPOINT: u32 = 768;
pub const DEFAULT_HOVER_CLOSE_DELAY_MS: u32 = 150;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Below this width the mobile navigation drawer is in use.
    pub mobile_nav_breakpoint: u32,
    /// Dropdowns close whenever the viewport crosses this width.
    pub dropdown_breakpoint: u32,
    pub tab_menu_breakpoint: u32,
    /// At and above this width the sidebar is pinned by the stylesheet.
    pub sidebar_breakpoint: u32,
    /// Below this width filter panels collapse behind a toggle.
    pub filter_breakpoint: u32,
    pub theme_storage_key: String,
    pub hover_close_delay_ms: u32,
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            mobile_nav_breakpoint: DEFAULT_MOBILE_NAV_BREAKPOINT,
            dropdown_breakpoint: DEFAULT_DROPDOWN_BREAKPOINT,
            tab_menu_breakpoint: DEFAULT_TAB_MENU_BREAKPOINT,
            sidebar_breakpoint: DEFAULT_SIDEBAR_BREAKPOINT,
            filter_breakpoint: DEFAULT_FILTER_BREAKPOINT,
            theme_storage_key: disclosure::theme::THEME_STORAGE_KEY.to_owned(),
            hover_close_delay_ms: DEFAULT_HOVER_CLOSE_DELAY_MS,
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl SiteConfig {
    /// Parse a JSON override. Blank input yields the defaults.
    pub fn from_json(raw: &str) -> Result<Self, MountError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// Parsed log level, `Info` when unrecognised.
    #[must_use]
    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}
