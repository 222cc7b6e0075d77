use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::breakpoint::Breakpoints;
use crate::panel::Presentation;
use crate::selector::Selector;
use crate::testkit::{Click, MemorySurface};

// =============================================================
// Helpers
// =============================================================

const WIDE: f64 = 1280.0;
const NARROW: f64 = 500.0;

fn id(raw: &str) -> PanelId {
    PanelId::from(raw)
}

fn mobile_nav() -> PanelConfig {
    PanelConfig::new("mobile-nav", Selector::id("mobileMenu"))
        .trigger(Selector::id("mobileMenuButton"))
        .dismiss(Selector::id("mobileMenuClose"))
        .backdrop()
        .modal()
        .compact_only(900)
}

fn sidebar() -> PanelConfig {
    PanelConfig::new("sidebar", Selector::id("dashboardSidebar"))
        .trigger(Selector::id("sidebarToggle"))
        .dismiss(Selector::id("sidebarClose"))
        .dismiss(Selector::id("sidebarOverlay"))
        .overlay(Selector::id("sidebarOverlay"))
        .modal()
        .compact_only(1024)
        .presentation(Presentation::off_canvas())
}

fn dropdown(n: usize) -> PanelConfig {
    let panel = Selector::new(format!("#dd-{n}"));
    PanelConfig::new(format!("dropdown-{n}"), panel.clone())
        .trigger(panel.descendant(".has-dropdown"))
        .group("nav-dropdown")
        .breakpoint(900, BreakpointPolicy::CloseOnFlip)
        .hover()
        .presentation(Presentation::active_when_open())
}

fn filters() -> PanelConfig {
    PanelConfig::new("filters", Selector::id("filterContainer"))
        .trigger(Selector::id("filterToggle"))
        .breakpoint(768, BreakpointPolicy::RevealOnWide)
        .compact_interactive()
        .keep_on_escape()
}

fn page() -> MemorySurface {
    MemorySurface::new()
        .with("#mobileMenu", &["hidden"])
        .with("#mobileMenuButton", &[])
        .with("#mobileMenuClose", &[])
        .with("#dashboardSidebar", &["-translate-x-full"])
        .with("#sidebarToggle", &[])
        .with("#sidebarClose", &[])
        .with("#sidebarOverlay", &[])
        .with("#dd-0", &[])
        .with("#dd-0 .has-dropdown", &[])
        .with("#dd-1", &[])
        .with("#dd-1 .has-dropdown", &[])
        .with("#dd-2", &[])
        .with("#dd-2 .has-dropdown", &[])
        .with("#filterContainer", &["hidden"])
        .with("#filterToggle", &[])
}

fn controller(surface: &MemorySurface, width: f64) -> DisclosureController {
    let mut ctl = DisclosureController::new();
    for config in [mobile_nav(), sidebar(), dropdown(0), dropdown(1), dropdown(2), filters()] {
        assert!(ctl.register(config, surface, width));
    }
    ctl
}

fn open_dropdowns(ctl: &DisclosureController) -> usize {
    (0..3).filter(|n| ctl.is_open(&id(&format!("dropdown-{n}")))).count()
}

// =============================================================
// Registration
// =============================================================

#[test]
fn register_skips_absent_panel() {
    let surface = MemorySurface::new();
    let mut ctl = DisclosureController::new();
    assert!(!ctl.register(mobile_nav(), &surface, NARROW));
    assert!(ctl.panel_ids().is_empty());
}

#[test]
fn register_rejects_duplicate_id() {
    let surface = page();
    let mut ctl = DisclosureController::new();
    assert!(ctl.register(mobile_nav(), &surface, NARROW));
    assert!(!ctl.register(mobile_nav(), &surface, NARROW));
    assert_eq!(ctl.panel_ids(), vec![id("mobile-nav")]);
}

#[test]
fn register_reads_initial_state_from_markup() {
    let surface = page();
    surface.insert("#mobileMenu", &[]);
    let mut ctl = DisclosureController::new();
    ctl.register(mobile_nav(), &surface, NARROW);
    assert!(ctl.is_open(&id("mobile-nav")));
    assert!(surface.scroll_locked());
    assert_eq!(surface.attr("#mobileMenuButton", "aria-expanded").as_deref(), Some("true"));
}

#[test]
fn register_closes_second_open_member_of_group() {
    let surface = page();
    surface.insert("#dd-0", &["active"]);
    surface.insert("#dd-1", &["active"]);
    let mut ctl = DisclosureController::new();
    ctl.register(dropdown(0), &surface, WIDE);
    ctl.register(dropdown(1), &surface, WIDE);
    assert!(ctl.is_open(&id("dropdown-0")));
    assert!(!ctl.is_open(&id("dropdown-1")));
    assert!(!surface.has("#dd-1", "active"));
}

#[test]
fn start_closed_panel_ignores_open_markup() {
    let surface = page();
    surface.insert("#dd-0", &["active"]);
    let mut ctl = DisclosureController::new();
    ctl.register(dropdown(0).start_closed(), &surface, WIDE);
    assert_eq!(ctl.state(&id("dropdown-0")), Some(PanelState::Closed));
    assert!(!surface.has("#dd-0", "active"));
    assert_eq!(surface.attr("#dd-0 .has-dropdown", "aria-expanded").as_deref(), Some("false"));
}

#[test]
fn thresholds_are_deduplicated() {
    let surface = page();
    let ctl = controller(&surface, WIDE);
    assert_eq!(ctl.thresholds(), vec![768, 900, 1024]);
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn open_shows_panel_and_marks_trigger_expanded() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    assert!(ctl.open(&id("mobile-nav"), &surface));
    assert!(!surface.has("#mobileMenu", "hidden"));
    assert_eq!(surface.attr("#mobileMenuButton", "aria-expanded").as_deref(), Some("true"));
    assert!(surface.scroll_locked());
}

#[test]
fn open_is_idempotent() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    assert!(ctl.open(&id("mobile-nav"), &surface));
    assert!(!ctl.open(&id("mobile-nav"), &surface));
    assert_eq!(ctl.state(&id("mobile-nav")), Some(PanelState::Open));
}

#[test]
fn close_is_idempotent_and_reverses_side_effects() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.open(&id("mobile-nav"), &surface);
    assert!(ctl.close(&id("mobile-nav"), &surface));
    assert!(!ctl.close(&id("mobile-nav"), &surface));
    assert!(surface.has("#mobileMenu", "hidden"));
    assert_eq!(surface.attr("#mobileMenuButton", "aria-expanded").as_deref(), Some("false"));
    assert!(!surface.scroll_locked());
}

#[test]
fn toggle_twice_restores_original_state() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    for panel in ["mobile-nav", "sidebar", "dropdown-1", "filters"] {
        let before = ctl.state(&id(panel));
        ctl.toggle(&id(panel), &surface);
        assert_ne!(ctl.state(&id(panel)), before);
        ctl.toggle(&id(panel), &surface);
        assert_eq!(ctl.state(&id(panel)), before, "{panel}");
    }
    assert!(!surface.scroll_locked());
}

#[test]
fn toggle_unknown_panel_returns_none() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    assert_eq!(ctl.toggle(&id("nope"), &surface), None);
}

#[test]
fn operations_on_removed_panel_are_noops() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    surface.remove("#mobileMenu");
    assert!(!ctl.open(&id("mobile-nav"), &surface));
    assert_eq!(ctl.toggle(&id("mobile-nav"), &surface), None);
    assert_eq!(ctl.state(&id("mobile-nav")), Some(PanelState::Closed));
    assert!(!surface.scroll_locked());
}

#[test]
fn sidebar_open_shows_overlay() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.open(&id("sidebar"), &surface);
    assert!(surface.has("#dashboardSidebar", "show"));
    assert!(!surface.has("#dashboardSidebar", "-translate-x-full"));
    assert!(surface.has("#sidebarOverlay", "show"));

    ctl.close(&id("sidebar"), &surface);
    assert!(!surface.has("#sidebarOverlay", "show"));
}

#[test]
fn close_all_closes_everything() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.open(&id("mobile-nav"), &surface);
    ctl.open(&id("dropdown-0"), &surface);
    ctl.open(&id("filters"), &surface);
    ctl.close_all(&surface);
    assert!(ctl.open_panels().is_empty());
    assert!(!surface.scroll_locked());
}

// =============================================================
// Exclusive groups
// =============================================================

#[test]
fn opening_any_group_member_leaves_exactly_one_open() {
    let surface = page();
    let mut ctl = controller(&surface, WIDE);
    for n in [0, 2, 1, 1, 0] {
        ctl.open(&id(&format!("dropdown-{n}")), &surface);
        assert_eq!(open_dropdowns(&ctl), 1);
        assert!(ctl.is_open(&id(&format!("dropdown-{n}"))));
        assert!(surface.has(&format!("#dd-{n}"), "active"));
    }
}

#[test]
fn group_does_not_touch_ungrouped_panels() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.open(&id("mobile-nav"), &surface);
    ctl.open(&id("dropdown-0"), &surface);
    ctl.open(&id("dropdown-1"), &surface);
    assert!(ctl.is_open(&id("mobile-nav")));
    assert_eq!(ctl.open_panels(), vec![id("mobile-nav"), id("dropdown-1")]);
}

// =============================================================
// Scroll lock
// =============================================================

#[test]
fn scroll_lock_held_while_any_modal_open() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.open(&id("mobile-nav"), &surface);
    ctl.open(&id("sidebar"), &surface);
    ctl.close(&id("mobile-nav"), &surface);
    assert!(surface.scroll_locked());
    ctl.close(&id("sidebar"), &surface);
    assert!(!surface.scroll_locked());
}

#[test]
fn non_modal_panels_never_lock() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.open(&id("dropdown-0"), &surface);
    ctl.open(&id("filters"), &surface);
    assert!(!surface.scroll_locked());
}

// =============================================================
// Escape
// =============================================================

#[test]
fn escape_closes_mobile_nav_and_releases_scroll() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.open(&id("mobile-nav"), &surface);
    assert!(surface.scroll_locked());

    assert!(ctl.on_key(ESCAPE_KEY, &surface));
    assert_eq!(ctl.state(&id("mobile-nav")), Some(PanelState::Closed));
    assert!(!surface.scroll_locked());
}

#[test]
fn escape_respects_keep_on_escape() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.open(&id("filters"), &surface);
    assert!(!ctl.on_key(ESCAPE_KEY, &surface));
    assert!(ctl.is_open(&id("filters")));
}

#[test]
fn other_keys_are_ignored() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.open(&id("mobile-nav"), &surface);
    assert!(!ctl.on_key("Enter", &surface));
    assert!(ctl.is_open(&id("mobile-nav")));
}

// =============================================================
// Clicks
// =============================================================

#[test]
fn trigger_click_toggles_panel() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    let click = Click::on(&["#mobileMenuButton"]);
    assert_eq!(ctl.on_click(&click, &surface), Some(id("mobile-nav")));
    assert!(ctl.is_open(&id("mobile-nav")));
    ctl.on_click(&click, &surface);
    assert!(!ctl.is_open(&id("mobile-nav")));
}

#[test]
fn trigger_click_on_removed_panel_reports_nothing() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    surface.remove("#mobileMenu");
    assert_eq!(ctl.on_click(&Click::on(&["#mobileMenuButton"]), &surface), None);
    assert_eq!(ctl.state(&id("mobile-nav")), Some(PanelState::Closed));
}

#[test]
fn outside_click_closes_open_panels() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.open(&id("dropdown-0"), &surface);
    ctl.open(&id("mobile-nav"), &surface);
    assert_eq!(ctl.on_click(&Click::elsewhere(), &surface), None);
    assert!(ctl.open_panels().is_empty());
    assert!(!surface.scroll_locked());
}

#[test]
fn click_inside_panel_keeps_it_open() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.open(&id("sidebar"), &surface);
    ctl.on_click(&Click::on(&[".dashboard-card", "#dashboardSidebar"]), &surface);
    assert!(ctl.is_open(&id("sidebar")));
}

#[test]
fn dismiss_handle_closes_panel() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.open(&id("mobile-nav"), &surface);
    ctl.on_click(&Click::on(&["#mobileMenuClose", "#mobileMenu"]), &surface);
    assert!(!ctl.is_open(&id("mobile-nav")));
}

#[test]
fn overlay_click_closes_sidebar() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.open(&id("sidebar"), &surface);
    ctl.on_click(&Click::on(&["#sidebarOverlay"]), &surface);
    assert!(!ctl.is_open(&id("sidebar")));
    assert!(!surface.has("#sidebarOverlay", "show"));
}

#[test]
fn backdrop_click_closes_only_when_target_is_panel() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.open(&id("mobile-nav"), &surface);
    ctl.on_click(&Click::on(&[".menu-heading", "#mobileMenu"]), &surface);
    assert!(ctl.is_open(&id("mobile-nav")));
    ctl.on_click(&Click::on(&["#mobileMenu"]), &surface);
    assert!(!ctl.is_open(&id("mobile-nav")));
}

#[test]
fn clicking_second_dropdown_trigger_switches_open_member() {
    let surface = page();
    let mut ctl = controller(&surface, WIDE);
    ctl.on_click(&Click::on(&["#dd-0 .has-dropdown", "#dd-0"]), &surface);
    ctl.on_click(&Click::on(&["#dd-2 .has-dropdown", "#dd-2"]), &surface);
    assert_eq!(ctl.open_panels(), vec![id("dropdown-2")]);
}

#[test]
fn compact_interactive_panel_ignores_clicks_when_wide() {
    let surface = page();
    let mut ctl = controller(&surface, WIDE);
    assert_eq!(ctl.on_click(&Click::on(&["#filterToggle"]), &surface), None);
    assert!(!ctl.is_open(&id("filters")));

    ctl.open(&id("filters"), &surface);
    ctl.on_click(&Click::elsewhere(), &surface);
    assert!(ctl.is_open(&id("filters")));
}

#[test]
fn compact_interactive_panel_responds_when_compact() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.on_click(&Click::on(&["#filterToggle"]), &surface);
    assert!(ctl.is_open(&id("filters")));
    ctl.on_click(&Click::elsewhere(), &surface);
    assert!(!ctl.is_open(&id("filters")));
}

// =============================================================
// Breakpoints
// =============================================================

#[test]
fn compact_only_panel_closes_when_viewport_widens() {
    let surface = Rc::new(page());
    let ctl = Rc::new(RefCell::new(controller(&surface, NARROW)));
    let mut points = Breakpoints::new(NARROW);
    let thresholds = ctl.borrow().thresholds();
    for threshold in thresholds {
        let ctl = Rc::clone(&ctl);
        let surface = Rc::clone(&surface);
        points.on_breakpoint_change(
            threshold,
            "disclosure",
            Box::new(move |compact| ctl.borrow_mut().on_breakpoint_change(threshold, compact, surface.as_ref())),
        );
    }

    ctl.borrow_mut().open(&id("mobile-nav"), surface.as_ref());
    assert!(surface.scroll_locked());

    points.resize(1200.0);
    assert_eq!(ctl.borrow().state(&id("mobile-nav")), Some(PanelState::Closed));
    assert!(surface.has("#mobileMenu", "hidden"));
    assert!(!surface.scroll_locked());
}

#[test]
fn compact_only_panel_survives_resize_within_compact() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.open(&id("sidebar"), &surface);
    ctl.on_breakpoint_change(1024, true, &surface);
    assert!(ctl.is_open(&id("sidebar")));
}

#[test]
fn close_on_flip_closes_in_both_directions() {
    let surface = page();
    let mut ctl = controller(&surface, WIDE);
    ctl.open(&id("dropdown-0"), &surface);
    ctl.on_breakpoint_change(900, true, &surface);
    assert!(!ctl.is_open(&id("dropdown-0")));

    ctl.open(&id("dropdown-1"), &surface);
    ctl.on_breakpoint_change(900, false, &surface);
    assert!(!ctl.is_open(&id("dropdown-1")));
}

#[test]
fn reveal_on_wide_opens_filters() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.on_breakpoint_change(768, false, &surface);
    assert!(ctl.is_open(&id("filters")));
    assert!(!surface.has("#filterContainer", "hidden"));
}

#[test]
fn breakpoint_for_other_threshold_is_ignored() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    ctl.open(&id("mobile-nav"), &surface);
    ctl.on_breakpoint_change(1024, false, &surface);
    assert!(ctl.is_open(&id("mobile-nav")));
}

// =============================================================
// Hover
// =============================================================

#[test]
fn hover_opens_and_closes_dropdown_when_wide() {
    let surface = page();
    let mut ctl = controller(&surface, WIDE);
    assert!(ctl.on_hover_enter(&id("dropdown-1"), &surface));
    assert!(ctl.is_open(&id("dropdown-1")));
    assert!(ctl.on_hover_leave(&id("dropdown-1"), &surface));
    assert!(!ctl.is_open(&id("dropdown-1")));
}

#[test]
fn hover_is_inert_when_compact_or_not_configured() {
    let surface = page();
    let mut ctl = controller(&surface, NARROW);
    assert!(!ctl.on_hover_enter(&id("dropdown-1"), &surface));
    assert!(!ctl.on_hover_enter(&id("mobile-nav"), &surface));
    assert!(ctl.open_panels().is_empty());
}
