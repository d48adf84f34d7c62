//! Browser backend over `web-sys`
//!
//! Provides functional, panic-free access to the live DOM. Every JS call
//! that can throw is mapped into a [`DomError`].

use js_sys::{Function, Reflect};
use url::Url;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, CssStyleDeclaration, Element, HtmlAnchorElement, HtmlElement,
    SvgElement, TouchEvent, Window,
};

use super::{DomNode, Document, ScrollMetrics, TouchHandler, TouchInput, TouchPhase};
use crate::error::{DomError, Result};
use crate::teardown::Teardown;

/// The live browser document
#[derive(Debug, Clone)]
pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
}

impl WebDocument {
    /// Bind to the global window and its document
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No window object is available (not in browser context)
    /// - No document object is available
    pub fn current() -> Result<Self> {
        let window = web_sys::window().ok_or(DomError::WindowUnavailable)?;
        let document = window.document().ok_or(DomError::DocumentUnavailable)?;
        Ok(Self { window, document })
    }

    /// Underlying `web_sys::Document`
    #[must_use]
    pub const fn raw(&self) -> &web_sys::Document {
        &self.document
    }
}

impl Document for WebDocument {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn scrolling_element(&self) -> Option<Element> {
        self.document.scrolling_element()
    }

    fn viewport_width(&self) -> Result<f64> {
        self.window
            .inner_width()
            .map_err(|e| DomError::js(&e))?
            .as_f64()
            .ok_or_else(|| DomError::Js("innerWidth is not a number".to_string()))
    }

    fn supports_css(&self, property: &str, value: &str) -> bool {
        web_sys::css::supports_with_value(property, value).unwrap_or(false)
    }

    fn location(&self) -> Result<String> {
        self.window.location().href().map_err(|e| DomError::js(&e))
    }
}

/// Inline style declaration of an HTML or SVG element
fn style_of(element: &Element) -> Result<CssStyleDeclaration> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        return Ok(html.style());
    }
    if let Some(svg) = element.dyn_ref::<SvgElement>() {
        return Ok(svg.style());
    }
    Err(DomError::StyleUnavailable(element.tag_name().to_lowercase()))
}

/// Convert a DOM `TouchEvent` into a backend-neutral input
fn touch_input(event: &TouchEvent) -> TouchInput<Element> {
    let list = event.target_touches();
    let touches = (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|touch| f64::from(touch.client_y()))
        .collect();
    let target = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    TouchInput::new(target, touches, event.cancelable())
}

impl DomNode for Element {
    fn children(&self) -> Vec<Self> {
        let collection = Element::children(self);
        (0..collection.length())
            .filter_map(|i| collection.item(i))
            .collect()
    }

    fn parent(&self) -> Option<Self> {
        self.parent_element()
    }

    fn id(&self) -> String {
        Element::id(self)
    }

    fn has_attribute(&self, name: &str) -> bool {
        Element::has_attribute(self, name)
    }

    fn href(&self) -> Option<String> {
        if let Some(anchor) = self.dyn_ref::<HtmlAnchorElement>() {
            return Some(anchor.href());
        }
        // SVG anchors and other elements: resolve the attribute by hand.
        let href = self.get_attribute("href")?;
        let base = self.base_uri().ok().flatten()?;
        Url::parse(&base)
            .and_then(|base| base.join(&href))
            .map(String::from)
            .ok()
    }

    fn computed_style(&self, property: &str) -> Result<String> {
        let window = web_sys::window().ok_or(DomError::WindowUnavailable)?;
        window
            .get_computed_style(self)
            .map_err(|e| DomError::js(&e))?
            .ok_or_else(|| DomError::StyleUnavailable(self.tag_name().to_lowercase()))?
            .get_property_value(property)
            .map_err(|e| DomError::js(&e))
    }

    fn inline_style(&self, property: &str) -> Result<String> {
        style_of(self)?
            .get_property_value(property)
            .map_err(|e| DomError::js(&e))
    }

    fn set_style(&self, property: &str, value: &str) -> Result<()> {
        style_of(self)?
            .set_property(property, value)
            .map_err(|e| DomError::js(&e))
    }

    fn total_length(&self) -> Result<f64> {
        // Looked up dynamically: only geometry elements expose it, and it
        // may throw for elements that are not rendered.
        let method = Reflect::get(self, &JsValue::from_str("getTotalLength"))
            .map_err(|e| DomError::Measure(format!("{e:?}")))?
            .dyn_into::<Function>()
            .map_err(|_| {
                DomError::Measure(format!(
                    "<{}> is not a geometry element",
                    self.tag_name().to_lowercase()
                ))
            })?;
        method
            .call0(self)
            .map_err(|e| DomError::Measure(format!("{e:?}")))?
            .as_f64()
            .ok_or_else(|| DomError::Measure("getTotalLength returned a non-number".to_string()))
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: f64::from(self.scroll_top()),
            scroll_height: f64::from(self.scroll_height()),
            client_height: f64::from(self.client_height()),
        }
    }

    fn client_width(&self) -> f64 {
        f64::from(Element::client_width(self))
    }

    fn contains(&self, other: &Self) -> bool {
        let other: &web_sys::Node = other;
        web_sys::Node::contains(self, Some(other))
    }

    fn on_touch(
        &self,
        phase: TouchPhase,
        passive: bool,
        mut handler: TouchHandler<Self>,
    ) -> Result<Teardown> {
        let closure = Closure::wrap(Box::new(move |event: TouchEvent| {
            let mut input = touch_input(&event);
            handler(&mut input);
            if input.default_prevented() {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(TouchEvent)>);

        let options = AddEventListenerOptions::new();
        options.set_passive(passive);

        self.add_event_listener_with_callback_and_add_event_listener_options(
            phase.event_type(),
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| DomError::Listener(format!("{}: {e:?}", phase.event_type())))?;

        let target = self.clone();
        Ok(Teardown::new(phase.event_type(), move || {
            if let Err(e) = target.remove_event_listener_with_callback(
                phase.event_type(),
                closure.as_ref().unchecked_ref(),
            ) {
                tracing::warn!(event = phase.event_type(), error = ?e, "failed to remove listener");
            }
        }))
    }
}
