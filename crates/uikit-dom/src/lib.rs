//! DOM helpers for UI components
//!
//! Small, independent helpers a component library reaches for when it
//! renders overlays, icons and in-page navigation:
//!
//! - measuring SVG stroke lengths for draw-in animations
//! - stopping overscroll and background scrolling behind modals
//! - recognising same-page anchors and resolving their targets
//! - generating collision-free element ids per component instance
//!
//! ## Module Structure
//! - `dom`: the DOM capabilities the helpers need, with a `web-sys` backend
//!   and an in-memory backend
//! - `utils`: the helpers themselves
//! - `teardown`: release handles for installed side effects
//! - `config`: tunables
//! - `error`: error types
//!
//! Helpers that install styles or listeners return a [`Teardown`]. Dropping
//! it, or calling [`Teardown::release`], undoes exactly what was installed.

#![forbid(unsafe_code)]

pub mod config;
pub mod dom;
pub mod error;
pub mod teardown;
pub mod utils;

pub use config::MixinConfig;
pub use error::{DomError, Result};
pub use teardown::Teardown;
pub use utils::{
    BackgroundScrollLock, Component, ComponentMeta, generate_id, is_same_site_anchor,
    max_path_length, prevent_background_scroll, prevent_overscroll, target_element,
};

use dom::Document;

/// A document bundled with its configuration
///
/// Exposes every helper as a method so components only carry one value.
///
/// ```
/// use uikit_dom::Mixin;
/// use uikit_dom::dom::memory::MemoryDocument;
///
/// let doc = MemoryDocument::new("https://example.com/guide");
/// let mixin = Mixin::new(doc.clone());
///
/// let link = doc.append_element("a");
/// link.set_attribute("href", "#install");
/// assert!(mixin.is_same_site_anchor(&link));
/// assert_eq!(mixin.target_element(&link), None);
/// ```
#[derive(Debug, Clone)]
pub struct Mixin<D> {
    document: D,
    config: MixinConfig,
}

impl<D: Document> Mixin<D> {
    /// Use the default configuration
    #[must_use]
    pub fn new(document: D) -> Self {
        Self {
            document,
            config: MixinConfig::default(),
        }
    }

    /// Use a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `DomError::Config` if the configuration fails validation.
    pub fn with_config(document: D, config: MixinConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { document, config })
    }

    /// The wrapped document
    #[must_use]
    pub const fn document(&self) -> &D {
        &self.document
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> &MixinConfig {
        &self.config
    }

    /// See [`max_path_length`]
    #[must_use]
    pub fn max_path_length(&self, element: &D::Node) -> u32 {
        utils::max_path_length(element)
    }

    /// See [`prevent_overscroll`]
    ///
    /// # Errors
    ///
    /// Returns an error if a style write or listener binding fails.
    pub fn prevent_overscroll(&self, element: &D::Node) -> Result<Teardown> {
        utils::prevent_overscroll(&self.document, element, &self.config)
    }

    /// See [`prevent_background_scroll`]
    ///
    /// # Errors
    ///
    /// Returns an error if the scrolling element cannot be locked.
    pub fn prevent_background_scroll(&self) -> Result<Teardown> {
        utils::prevent_background_scroll(&self.document)
    }

    /// A reference-counted background scroll lock for this document
    #[must_use]
    pub fn background_scroll_lock(&self) -> BackgroundScrollLock<D> {
        BackgroundScrollLock::new(self.document.clone())
    }

    /// See [`is_same_site_anchor`]
    #[must_use]
    pub fn is_same_site_anchor(&self, anchor: &D::Node) -> bool {
        utils::is_same_site_anchor(&self.document, anchor)
    }

    /// See [`target_element`]
    #[must_use]
    pub fn target_element(&self, anchor: &D::Node) -> Option<D::Node> {
        utils::target_element(&self.document, anchor)
    }

    /// Id for the component's root element; see [`generate_id`]
    #[must_use]
    pub fn generate_id<C>(&self, component: &C) -> String
    where
        C: Component<Node = D::Node>,
    {
        utils::generate_id(&self.document, component, None, "", &self.config)
    }

    /// Id for an element inside the component; see [`generate_id`]
    #[must_use]
    pub fn generate_id_for<C>(&self, component: &C, element: &D::Node, suffix: &str) -> String
    where
        C: Component<Node = D::Node>,
    {
        utils::generate_id(&self.document, component, Some(element), suffix, &self.config)
    }
}

#[cfg(test)]
mod tests;
