//! The site's markup conventions, expressed as panel configurations.
//!
//! Each builder describes one page component by the ids and classes the
//! templates use. Whether the component is actually on the current page is
//! decided at registration time by the disclosure controller.

#[cfg(test)]
#[path = "markup_test.rs"]
mod markup_test;

use disclosure::panel::{BreakpointPolicy, PanelConfig, PanelId, Presentation};
use disclosure::selector::Selector;
use disclosure::tabs::TabEntry;

use crate::config::SiteConfig;

pub const MOBILE_NAV: &str = "mobile-nav";
pub const TAB_MENU: &str = "tab-menu";
pub const SIDEBAR: &str = "sidebar";
pub const FILTERS: &str = "filters";
pub const SERVICE_FILTERS: &str = "service-filters";
pub const DROPDOWN_GROUP: &str = "nav-dropdown";

/// Attribute stamped onto dropdown items so each one is addressable.
pub const DROPDOWN_ATTRIBUTE: &str = "data-disclosure";

/// Dropdown items in the main navigation.
pub const DROPDOWN_ITEMS: &str = ".nav-item-dropdown";
pub const DROPDOWN_TRIGGER: &str = ".nav-link.has-dropdown";
pub const DROPDOWN_MENU: &str = ".nav-dropdown";

/// Tab triggers: desktop buttons and their compact-menu twins.
pub const TAB_TRIGGERS: &str = "button.tab-btn[data-tab], button.tab-menu-item[data-tab]";
pub const TAB_CONTENT: &str = ".tab-content";

/// Links checked against the current page.
pub const NAV_LINKS: &str = ".nav-link, .nav-dropdown-link";

pub const THEME_TOGGLES: [&str; 2] = ["themeToggle", "themeToggleMobile"];

pub fn mobile_nav(config: &SiteConfig) -> PanelConfig {
    let panel = Selector::id("mobileMenu");
    PanelConfig::new(MOBILE_NAV, panel.clone())
        .trigger(Selector::id("mobileMenuButton"))
        .dismiss(Selector::id("mobileMenuClose"))
        .dismiss(panel.descendant("a:not(.has-dropdown)"))
        .backdrop()
        .modal()
        .compact_only(config.mobile_nav_breakpoint)
}

pub fn tab_menu(config: &SiteConfig) -> PanelConfig {
    let panel = Selector::id("mobileTabMenu");
    let line = |n: u8| Selector::new(format!("#hamburgerIcon span:nth-child({n})"));
    let presentation = Presentation::hidden_when_closed()
        .with_trigger_class("active")
        .with_style(Selector::id("toggleIcon"), "transform", "rotate(180deg)", "rotate(0deg)")
        .with_style(line(1), "transform", "rotate(45deg) translateY(0.375rem)", "rotate(0deg) translateY(0)")
        .with_style(line(2), "opacity", "0", "1")
        .with_style(line(3), "transform", "rotate(-45deg) translateY(-0.375rem)", "rotate(0deg) translateY(0)");
    PanelConfig::new(TAB_MENU, panel.clone())
        .trigger(Selector::id("tabMenuToggle"))
        .dismiss(panel.descendant("a"))
        .compact_only(config.tab_menu_breakpoint)
        .presentation(presentation)
}

pub fn sidebar(config: &SiteConfig) -> PanelConfig {
    let panel = Selector::id("dashboardSidebar");
    let overlay = Selector::id("sidebarOverlay");
    PanelConfig::new(SIDEBAR, panel.clone())
        .trigger(Selector::id("sidebarToggle"))
        .dismiss(Selector::id("sidebarClose"))
        .dismiss(overlay.clone())
        .dismiss(panel.descendant(".dashboard-nav-item"))
        .overlay(overlay)
        .modal()
        .compact_only(config.sidebar_breakpoint)
        .presentation(Presentation::off_canvas())
}

/// Collapsible filter drawer: toggled on compact viewports, always shown on wide ones.
fn filter_drawer(id: &str, prefix: &str, config: &SiteConfig) -> PanelConfig {
    let presentation = Presentation::hidden_when_closed().with_style(
        Selector::id(&format!("{prefix}ToggleIcon")),
        "transform",
        "rotate(180deg)",
        "rotate(0deg)",
    );
    PanelConfig::new(id, Selector::id(&format!("{prefix}Container")))
        .trigger(Selector::id(&format!("{prefix}Toggle")))
        .breakpoint(config.filter_breakpoint, BreakpointPolicy::RevealOnWide)
        .compact_interactive()
        .keep_on_escape()
        .presentation(presentation)
}

pub fn filters(config: &SiteConfig) -> PanelConfig {
    filter_drawer(FILTERS, "filter", config)
}

pub fn service_filters(config: &SiteConfig) -> PanelConfig {
    filter_drawer(SERVICE_FILTERS, "serviceFilter", config)
}

/// Value stamped into [`DROPDOWN_ATTRIBUTE`] on the `index`th dropdown item.
pub fn dropdown_key(index: usize) -> String {
    format!("{DROPDOWN_GROUP}-{index}")
}

pub fn dropdown(index: usize, config: &SiteConfig) -> PanelConfig {
    let key = dropdown_key(index);
    let panel = Selector::attribute(DROPDOWN_ATTRIBUTE, &key);
    PanelConfig::new(key, panel.clone())
        .trigger(panel.descendant(DROPDOWN_TRIGGER))
        .group(DROPDOWN_GROUP)
        .breakpoint(config.dropdown_breakpoint, BreakpointPolicy::CloseOnFlip)
        .hover()
        .start_closed()
        .presentation(Presentation::active_when_open())
}

/// Every fixed-id panel, in registration order. Dropdowns are discovered separately.
pub fn fixed_panels(config: &SiteConfig) -> Vec<PanelConfig> {
    vec![mobile_nav(config), tab_menu(config), sidebar(config), filters(config), service_filters(config)]
}

pub fn tab_menu_id() -> PanelId {
    PanelId::from(TAB_MENU)
}

/// Tab entries from `(data-tab, has active class)` pairs in document order.
/// Triggers without a usable id are skipped.
pub fn tab_entries<I>(triggers: I) -> Vec<TabEntry>
where
    I: IntoIterator<Item = (Option<String>, bool)>,
{
    triggers
        .into_iter()
        .filter_map(|(id, active)| {
            let id = id?.trim().to_owned();
            (!id.is_empty()).then(|| TabEntry::new(id, active))
        })
        .collect()
}

pub fn theme_toggles() -> Vec<Selector> {
    THEME_TOGGLES.iter().map(|id| Selector::id(id)).collect()
}
