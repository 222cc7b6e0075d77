//! Errors raised while wiring controllers to the page.
//!
//! None of these reach the user. Each page component mounts independently and
//! a failure is logged and skipped, which looks the same as the component
//! being absent from the page.

use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("failed to register {event} listener: {message}")]
    Listener { event: &'static str, message: String },
    #[error("invalid site-ui config: {0}")]
    Config(#[from] serde_json::Error),
}

impl MountError {
    /// Wrap a JS exception thrown by `addEventListener`.
    pub fn listener(event: &'static str, err: &JsValue) -> Self {
        let message = err
            .dyn_ref::<js_sys::Error>()
            .map(|e| String::from(e.message()))
            .or_else(|| err.as_string())
            .unwrap_or_else(|| format!("{err:?}"));
        Self::Listener { event, message }
    }
}
