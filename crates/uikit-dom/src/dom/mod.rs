//! DOM capabilities the helpers are written against
//!
//! The helpers never touch `web-sys` directly. They are generic over
//! [`DomNode`] and [`Document`], which name exactly the primitives they need.
//! Two backends implement them:
//!
//! - [`web`]: the browser, over `web_sys::Element` and `web_sys::Window`
//! - [`memory`]: an in-memory tree for tests and headless callers

pub mod memory;
pub mod traverse;
pub mod web;

use std::fmt;

use crate::error::Result;
use crate::teardown::Teardown;

pub use traverse::{descendants, filter_children, is_within, scroll_parent};

/// Vertical scroll state of an element, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top
    pub scroll_top: f64,
    /// Height of the whole scrollable content
    pub scroll_height: f64,
    /// Height of the visible box
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Content fits inside the visible box
    #[must_use]
    pub fn fits(&self) -> bool {
        self.client_height >= self.scroll_height
    }

    /// Scrolled all the way up
    #[must_use]
    pub fn at_top(&self) -> bool {
        self.scroll_top <= 0.0
    }

    /// Scrolled all the way down
    #[must_use]
    pub fn at_bottom(&self) -> bool {
        self.scroll_height - self.scroll_top <= self.client_height
    }
}

/// Touch event phases the helpers listen to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// `touchstart`
    Start,
    /// `touchmove`
    Move,
}

impl TouchPhase {
    /// DOM event type name
    #[must_use]
    pub const fn event_type(self) -> &'static str {
        match self {
            Self::Start => "touchstart",
            Self::Move => "touchmove",
        }
    }
}

/// Backend-neutral view of a touch event
///
/// Handlers call [`TouchInput::prevent_default`]; the backend forwards the
/// cancellation to the real event after the handler returns.
#[derive(Debug, Clone)]
pub struct TouchInput<N> {
    /// Node the touch started on
    pub target: Option<N>,
    /// Client Y coordinate of every touch on the target
    pub touches: Vec<f64>,
    /// Whether the default action may be cancelled
    pub cancelable: bool,
    default_prevented: bool,
}

impl<N> TouchInput<N> {
    /// Create an input that has not been cancelled yet
    #[must_use]
    pub fn new(target: Option<N>, touches: Vec<f64>, cancelable: bool) -> Self {
        Self {
            target,
            touches,
            cancelable,
            default_prevented: false,
        }
    }

    /// Client Y of the only active touch, if exactly one is active
    #[must_use]
    pub fn single_touch_y(&self) -> Option<f64> {
        match self.touches.as_slice() {
            [y] => Some(*y),
            _ => None,
        }
    }

    /// Cancel the default browser action; ignored for non-cancelable events
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Whether a handler cancelled the default action
    #[must_use]
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Callback bound to a touch event
pub type TouchHandler<N> = Box<dyn FnMut(&mut TouchInput<N>)>;

/// An element handle
///
/// Handles are cheap to clone and compare by node identity.
pub trait DomNode: Clone + PartialEq + fmt::Debug + 'static {
    /// Element children in document order
    fn children(&self) -> Vec<Self>;

    /// Parent element, if any
    fn parent(&self) -> Option<Self>;

    /// Value of the `id` attribute (empty when unset)
    fn id(&self) -> String;

    /// Whether the attribute is present
    fn has_attribute(&self, name: &str) -> bool;

    /// Fully resolved `href`, for anchors
    fn href(&self) -> Option<String>;

    /// Computed value of a CSS property (kebab-case name)
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot compute styles for the node.
    fn computed_style(&self, property: &str) -> Result<String>;

    /// Inline value of a CSS property (empty when unset)
    ///
    /// # Errors
    ///
    /// Returns an error if the node has no style declaration.
    fn inline_style(&self, property: &str) -> Result<String>;

    /// Write an inline CSS property; an empty value removes it
    ///
    /// # Errors
    ///
    /// Returns an error if the node has no style declaration or the write
    /// is rejected.
    fn set_style(&self, property: &str, value: &str) -> Result<()>;

    /// Total length of the node's SVG geometry
    ///
    /// # Errors
    ///
    /// Returns `DomError::Measure` if the node cannot be measured.
    fn total_length(&self) -> Result<f64>;

    /// Current vertical scroll state
    fn scroll_metrics(&self) -> ScrollMetrics;

    /// Inner width excluding a vertical scrollbar
    fn client_width(&self) -> f64;

    /// Whether `other` is this node or one of its descendants
    fn contains(&self, other: &Self) -> bool;

    /// Bind a touch handler; the returned handle unbinds it
    ///
    /// # Errors
    ///
    /// Returns `DomError::Listener` if the backend refuses the listener.
    fn on_touch(
        &self,
        phase: TouchPhase,
        passive: bool,
        handler: TouchHandler<Self>,
    ) -> Result<Teardown>;
}

/// Page-level capabilities
pub trait Document: Clone + 'static {
    /// Element handle type of this backend
    type Node: DomNode;

    /// Element with the given id, if attached to the document
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// The element that scrolls the page
    fn scrolling_element(&self) -> Option<Self::Node>;

    /// Viewport width including a vertical scrollbar
    ///
    /// # Errors
    ///
    /// Returns an error if the viewport cannot be queried.
    fn viewport_width(&self) -> Result<f64>;

    /// CSS feature detection, `CSS.supports(property, value)`
    fn supports_css(&self, property: &str, value: &str) -> bool;

    /// Absolute URL of the current page
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be read.
    fn location(&self) -> Result<String>;
}
