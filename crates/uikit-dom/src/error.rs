//! Error types for DOM helpers
//!
//! Backend failures are surfaced as `DomError` values; nothing in this crate
//! panics on a misbehaving DOM.

/// Errors that can occur while talking to the DOM
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// No window object (not running in a browser context)
    #[error("window is not available")]
    WindowUnavailable,

    /// No document object
    #[error("document is not available")]
    DocumentUnavailable,

    /// The document has no scrolling element
    #[error("document has no scrolling element")]
    NoScrollingElement,

    /// The element exposes no style declaration
    #[error("style declaration unavailable for <{0}>")]
    StyleUnavailable(String),

    /// A JavaScript call threw
    #[error("javascript error: {0}")]
    Js(String),

    /// The element cannot report a path length
    #[error("path length unavailable: {0}")]
    Measure(String),

    /// Binding or removing an event listener failed
    #[error("event listener failed: {0}")]
    Listener(String),

    /// The configuration is unusable
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DomError {
    /// Wrap a thrown JavaScript value
    #[must_use]
    pub fn js(value: &wasm_bindgen::JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

/// Result type alias for DOM operations
pub type Result<T> = std::result::Result<T, DomError>;
