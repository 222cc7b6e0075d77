//! Page start-up: discover components in the markup and wire DOM events to controllers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Controllers are constructed once, shared between listener closures through
//! `Rc<RefCell<_>>`, and live until the page unloads. Four document/window
//! listeners drive everything:
//!
//! - `click` → theme toggles, tab triggers, then disclosure routing
//! - `keydown` → Escape dismissal
//! - `resize` → breakpoint observers → disclosure breakpoint policies
//! - `pagehide` → close every panel, so a page restored from the
//!   back/forward cache shows no stale drawer or scroll lock
//!
//! Dropdown items additionally get `mouseenter`/`mouseleave` listeners for
//! hover opening with a delayed close.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use disclosure::breakpoint::Breakpoints;
use disclosure::disclosure::DisclosureController;
use disclosure::nav::{current_page, link_matches};
use disclosure::panel::PanelId;
use disclosure::selector::Selector;
use disclosure::surface::PointerTarget;
use disclosure::tabs::{SELECTED_CLASS, TabSwitchController};
use disclosure::theme::ThemeSwitch;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent, Window};

use crate::config::{CONFIG_ELEMENT_ID, SiteConfig};
use crate::dom::{DomSurface, ElementTarget, LocalStore};
use crate::error::MountError;
use crate::markup;

thread_local! {
    static MOUNTED: Cell<bool> = const { Cell::new(false) };
}

/// Read the page's JSON override, if any.
///
/// Returns the defaults alongside the parse error when the override is
/// malformed, so the caller can log it once logging is up.
pub fn load_config() -> (SiteConfig, Option<MountError>) {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    match raw.as_deref().map(SiteConfig::from_json) {
        None => (SiteConfig::default(), None),
        Some(Ok(config)) => (config, None),
        Some(Err(err)) => (SiteConfig::default(), Some(err)),
    }
}

/// Mount now, or on `DOMContentLoaded` while the document is still parsing.
pub fn run(config: SiteConfig) -> Result<(), MountError> {
    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let document = window.document().ok_or(MountError::NoDocument)?;
    if document.ready_state() != "loading" {
        return mount(&window, &document, config);
    }

    let pending = RefCell::new(Some(config));
    let on_ready = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        let Some(config) = pending.borrow_mut().take() else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        if let Err(err) = mount(&window, &document, config) {
            log::warn!("site-ui: {err}");
        }
    });
    listen(&document, "DOMContentLoaded", on_ready)
}

/// Everything one page needs, shared between listener closures.
struct Page {
    config: SiteConfig,
    surface: Rc<DomSurface>,
    store: Rc<LocalStore>,
    disclosure: Rc<RefCell<DisclosureController>>,
    tabs: Rc<RefCell<Option<TabSwitchController>>>,
    theme: Rc<RefCell<ThemeSwitch>>,
    breakpoints: Rc<RefCell<Breakpoints>>,
    dropdowns: Vec<PanelId>,
}

fn mount(window: &Window, document: &Document, config: SiteConfig) -> Result<(), MountError> {
    if MOUNTED.with(|m| m.replace(true)) {
        log::debug!("site-ui: already mounted");
        return Ok(());
    }

    // Unknown width: every breakpoint reads as compact.
    let width = viewport_width(window).unwrap_or(0.0);
    let surface = Rc::new(DomSurface::new(document.clone()));
    let store = Rc::new(LocalStore::new());
    let theme = ThemeSwitch::init(store.as_ref(), surface.as_ref(), &config.theme_storage_key, markup::theme_toggles());

    let mut disclosure = DisclosureController::new();
    for panel in markup::fixed_panels(&config) {
        disclosure.register(panel, surface.as_ref(), width);
    }
    let dropdowns = register_dropdowns(document, &config, &mut disclosure, surface.as_ref(), width);

    let tabs = discover_tabs(document, &disclosure, surface.as_ref());
    mark_current_links(window, document);

    let page = Rc::new(Page {
        config,
        surface,
        store,
        disclosure: Rc::new(RefCell::new(disclosure)),
        tabs: Rc::new(RefCell::new(tabs)),
        theme: Rc::new(RefCell::new(theme)),
        breakpoints: Rc::new(RefCell::new(Breakpoints::new(width))),
        dropdowns,
    });

    // Each listener is independent; a failure leaves the others working.
    for result in [
        install_click(document, &page),
        install_keydown(document, &page),
        install_resize(window, &page),
        install_hover(document, &page),
        install_pagehide(window, &page),
    ] {
        if let Err(err) = result {
            log::warn!("site-ui: {err}");
        }
    }

    let tab_ids = page.tabs.borrow().as_ref().map(TabSwitchController::tab_ids).map(|ids| ids.join(","));
    log::info!(
        "site-ui: mounted panels {:?}, tabs [{}], theme={}",
        page.disclosure.borrow().panel_ids().iter().map(PanelId::as_str).collect::<Vec<_>>(),
        tab_ids.unwrap_or_default(),
        page.theme.borrow().theme().as_str()
    );
    Ok(())
}

/// `window.innerWidth`, or `None` (logged) when the browser does not report it.
fn viewport_width(window: &Window) -> Option<f64> {
    let width = window.inner_width().ok().and_then(|w| w.as_f64());
    if width.is_none() {
        log::warn!("site-ui: viewport width unavailable");
    }
    width
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Stamp each complete dropdown item with an addressable key and register it.
fn register_dropdowns(
    document: &Document,
    config: &SiteConfig,
    disclosure: &mut DisclosureController,
    surface: &DomSurface,
    width: f64,
) -> Vec<PanelId> {
    let mut ids = Vec::new();
    for (index, item) in query_all(document, markup::DROPDOWN_ITEMS).iter().enumerate() {
        let complete = matches!(item.query_selector(markup::DROPDOWN_TRIGGER), Ok(Some(_)))
            && matches!(item.query_selector(markup::DROPDOWN_MENU), Ok(Some(_)));
        if !complete {
            continue;
        }
        let _ = item.set_attribute(markup::DROPDOWN_ATTRIBUTE, &markup::dropdown_key(index));
        let panel = markup::dropdown(index, config);
        let id = panel.id.clone();
        if disclosure.register(panel, surface, width) {
            ids.push(id);
        }
    }
    ids
}

fn discover_tabs(
    document: &Document,
    disclosure: &DisclosureController,
    surface: &DomSurface,
) -> Option<TabSwitchController> {
    if query_all(document, markup::TAB_CONTENT).is_empty() {
        return None;
    }
    let triggers = query_all(document, markup::TAB_TRIGGERS)
        .into_iter()
        .map(|el| (el.get_attribute("data-tab"), el.class_list().contains(SELECTED_CLASS)));
    let menu = markup::tab_menu_id();
    let menu = disclosure.state(&menu).is_some().then_some(menu);
    TabSwitchController::new(markup::tab_entries(triggers), menu, surface)
}

/// Highlight navigation links pointing at the current page. Dropdown parents
/// are marked too, without opening the dropdown.
fn mark_current_links(window: &Window, document: &Document) {
    let Ok(pathname) = window.location().pathname() else {
        return;
    };
    let current = current_page(&pathname);
    for link in query_all(document, markup::NAV_LINKS) {
        let href = link.get_attribute("href").unwrap_or_default();
        if !link_matches(&href, current) {
            continue;
        }
        let _ = link.class_list().add_1("active");
        if let Ok(Some(item)) = link.closest(markup::DROPDOWN_ITEMS)
            && let Ok(Some(parent)) = item.query_selector(markup::DROPDOWN_TRIGGER)
        {
            let _ = parent.class_list().add_1("active");
        }
    }
}

fn listen(target: &EventTarget, event: &'static str, callback: Closure<dyn FnMut(Event)>) -> Result<(), MountError> {
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(|err| MountError::listener(event, &err))?;
    callback.forget();
    Ok(())
}

fn install_click(document: &Document, page: &Rc<Page>) -> Result<(), MountError> {
    let page = Rc::clone(page);
    let toggles = markup::theme_toggles();
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(target) = ElementTarget::from_event(&event) else {
            return;
        };
        let surface = page.surface.as_ref();

        if toggles.iter().any(|t| target.is_within(t)) {
            page.theme.borrow_mut().toggle(page.store.as_ref(), surface);
        }

        let mut disclosure = page.disclosure.borrow_mut();
        let selected = page
            .tabs
            .borrow_mut()
            .as_mut()
            .is_some_and(|tabs| tabs.on_click(&target, surface, &mut disclosure));
        let toggled = disclosure.on_click(&target, surface);
        if selected || toggled.is_some() {
            event.prevent_default();
        }
    });
    listen(document, "click", on_click)
}

fn install_keydown(document: &Document, page: &Rc<Page>) -> Result<(), MountError> {
    let page = Rc::clone(page);
    let on_key = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        page.disclosure.borrow_mut().on_key(&key, page.surface.as_ref());
    });
    listen(document, "keydown", on_key)
}

fn install_resize(window: &Window, page: &Rc<Page>) -> Result<(), MountError> {
    let thresholds = page.disclosure.borrow().thresholds();
    {
        let mut breakpoints = page.breakpoints.borrow_mut();
        for threshold in thresholds {
            let disclosure = Rc::clone(&page.disclosure);
            let surface = Rc::clone(&page.surface);
            breakpoints.on_breakpoint_change(
                threshold,
                "disclosure",
                Box::new(move |compact| {
                    disclosure.borrow_mut().on_breakpoint_change(threshold, compact, surface.as_ref());
                }),
            );
        }
        log::debug!("site-ui: watching breakpoints {:?}", breakpoints.thresholds());
    }

    let page = Rc::clone(page);
    let on_resize = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(width) = viewport_width(&window) {
            page.breakpoints.borrow_mut().resize(width);
        }
    });
    listen(window, "resize", on_resize)
}

fn install_pagehide(window: &Window, page: &Rc<Page>) -> Result<(), MountError> {
    let page = Rc::clone(page);
    let on_hide = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        page.disclosure.borrow_mut().close_all(page.surface.as_ref());
    });
    listen(window, "pagehide", on_hide)
}

fn install_hover(document: &Document, page: &Rc<Page>) -> Result<(), MountError> {
    let pending: Rc<RefCell<HashMap<PanelId, Timeout>>> = Rc::new(RefCell::new(HashMap::new()));
    for id in &page.dropdowns {
        let Some(panel) = page.disclosure.borrow().config(id).map(|c| c.panel.clone()) else {
            continue;
        };
        let Some(item) = first(document, &panel) else {
            continue;
        };

        let enter = {
            let page = Rc::clone(page);
            let pending = Rc::clone(&pending);
            let id = id.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                pending.borrow_mut().remove(&id);
                page.disclosure.borrow_mut().on_hover_enter(&id, page.surface.as_ref());
            })
        };
        listen(&item, "mouseenter", enter)?;

        let leave = {
            let page = Rc::clone(page);
            let pending = Rc::clone(&pending);
            let id = id.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                let page = Rc::clone(&page);
                let target = id.clone();
                let timeout = Timeout::new(page.config.hover_close_delay_ms, move || {
                    page.disclosure.borrow_mut().on_hover_leave(&target, page.surface.as_ref());
                });
                // Replacing an earlier timeout drops and cancels it.
                pending.borrow_mut().insert(id.clone(), timeout);
            })
        };
        listen(&item, "mouseleave", leave)?;
    }
    Ok(())
}

fn first(document: &Document, selector: &Selector) -> Option<Element> {
    document.query_selector(selector.as_str()).ok().flatten()
}
