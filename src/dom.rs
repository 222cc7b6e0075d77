//! `web-sys` implementations of the controller capability traits.

use disclosure::selector::Selector;
use disclosure::surface::{KeyValueStore, PointerTarget, Surface};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Storage};

/// The live document as a [`Surface`].
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn first(&self, selector: &Selector) -> Option<Element> {
        match self.document.query_selector(selector.as_str()) {
            Ok(found) => found,
            Err(_) => {
                log::warn!("invalid selector {selector}");
                None
            }
        }
    }

    fn each(&self, selector: &Selector, mut f: impl FnMut(&Element)) {
        let Ok(list) = self.document.query_selector_all(selector.as_str()) else {
            log::warn!("invalid selector {selector}");
            return;
        };
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
                f(&el);
            }
        }
    }

    fn body(&self) -> Option<HtmlElement> {
        self.document.body()
    }
}

impl Surface for DomSurface {
    fn exists(&self, selector: &Selector) -> bool {
        self.first(selector).is_some()
    }

    fn has_class(&self, selector: &Selector, class: &str) -> bool {
        self.first(selector).is_some_and(|el| el.class_list().contains(class))
    }

    fn add_class(&self, selector: &Selector, class: &str) {
        self.each(selector, |el| {
            let _ = el.class_list().add_1(class);
        });
    }

    fn remove_class(&self, selector: &Selector, class: &str) {
        self.each(selector, |el| {
            let _ = el.class_list().remove_1(class);
        });
    }

    fn set_attribute(&self, selector: &Selector, name: &str, value: &str) {
        self.each(selector, |el| {
            let _ = el.set_attribute(name, value);
        });
    }

    fn set_style(&self, selector: &Selector, property: &str, value: &str) {
        self.each(selector, |el| {
            if let Some(html) = el.dyn_ref::<HtmlElement>() {
                let _ = html.style().set_property(property, value);
            }
        });
    }

    fn set_text(&self, selector: &Selector, text: &str) {
        self.each(selector, |el| el.set_text_content(Some(text)));
    }

    fn set_document_attribute(&self, name: &str, value: &str) {
        if let Some(root) = self.document.document_element() {
            let _ = root.set_attribute(name, value);
        }
        if let Some(body) = self.body() {
            let _ = body.set_attribute(name, value);
        }
    }

    fn set_scroll_locked(&self, locked: bool) {
        let Some(body) = self.body() else {
            return;
        };
        let style = body.style();
        if locked {
            let _ = style.set_property("overflow", "hidden");
        } else {
            let _ = style.remove_property("overflow");
        }
    }
}

/// The element an event was dispatched to.
pub struct ElementTarget(Element);

impl ElementTarget {
    /// Wrap the event's target when it is an element.
    #[must_use]
    pub fn from_event(event: &Event) -> Option<Self> {
        event.target()?.dyn_into::<Element>().ok().map(Self)
    }
}

impl PointerTarget for ElementTarget {
    fn is_within(&self, selector: &Selector) -> bool {
        matches!(self.0.closest(selector.as_str()), Ok(Some(_)))
    }

    fn is(&self, selector: &Selector) -> bool {
        self.0.matches(selector.as_str()).unwrap_or(false)
    }
}

/// `window.localStorage`, or nothing when storage is blocked.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    #[must_use]
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable; theme preference will not persist");
        }
        Self { storage }
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(key, value);
        }
    }
}
