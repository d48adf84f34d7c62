//! In-memory DOM backend
//!
//! A small element tree that implements [`DomNode`] and [`Document`] without
//! a browser. Layout is not computed: scroll metrics, computed styles, path
//! lengths and widths are whatever the caller sets. Touch events dispatched
//! with [`MemoryNode::dispatch_touch`] bubble from the target to the root
//! like real DOM events.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::{Rc, Weak};

use url::Url;

use super::{DomNode, Document, ScrollMetrics, TouchHandler, TouchInput, TouchPhase};
use crate::error::{DomError, Result};
use crate::teardown::Teardown;

const DOCUMENT_ELEMENT: usize = 0;

type SharedHandler = Rc<RefCell<TouchHandler<MemoryNode>>>;

struct NodeData {
    tag: String,
    parent: Option<usize>,
    children: Vec<usize>,
    attributes: BTreeMap<String, String>,
    inline: BTreeMap<String, String>,
    computed: BTreeMap<String, String>,
    total_length: std::result::Result<f64, String>,
    scroll: ScrollMetrics,
    client_width: f64,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            parent: None,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            inline: BTreeMap::new(),
            computed: BTreeMap::new(),
            total_length: Err(format!("<{tag}> is not a geometry element")),
            scroll: ScrollMetrics::default(),
            client_width: 0.0,
        }
    }
}

struct Listener {
    id: u64,
    node: usize,
    phase: TouchPhase,
    passive: bool,
    handler: SharedHandler,
}

struct Tree {
    nodes: Vec<NodeData>,
    listeners: Vec<Listener>,
    next_listener: u64,
    location: String,
    viewport_width: f64,
    supported_css: BTreeSet<(String, String)>,
}

impl Tree {
    fn node(&self, index: usize) -> Option<&NodeData> {
        self.nodes.get(index)
    }

    fn node_mut(&mut self, index: usize) -> Option<&mut NodeData> {
        self.nodes.get_mut(index)
    }

    fn detach(&mut self, index: usize) {
        let parent = self.node_mut(index).and_then(|n| n.parent.take());
        if let Some(parent) = parent.and_then(|p| self.node_mut(p)) {
            parent.children.retain(|&child| child != index);
        }
    }
}

/// An in-memory document
///
/// The document element (`<html>`) is created up front and acts as the
/// scrolling element.
#[derive(Clone)]
pub struct MemoryDocument {
    tree: Rc<RefCell<Tree>>,
}

impl MemoryDocument {
    /// Create an empty document at the given location
    #[must_use]
    pub fn new(location: &str) -> Self {
        let tree = Tree {
            nodes: vec![NodeData::new("html")],
            listeners: Vec::new(),
            next_listener: 0,
            location: location.to_string(),
            viewport_width: 0.0,
            supported_css: BTreeSet::new(),
        };
        Self {
            tree: Rc::new(RefCell::new(tree)),
        }
    }

    /// Create a detached element
    #[must_use]
    pub fn create_element(&self, tag: &str) -> MemoryNode {
        let index = {
            let mut tree = self.tree.borrow_mut();
            tree.nodes.push(NodeData::new(tag));
            tree.nodes.len().saturating_sub(1)
        };
        MemoryNode {
            index,
            tree: Rc::clone(&self.tree),
        }
    }

    /// The `<html>` element
    #[must_use]
    pub fn document_element(&self) -> MemoryNode {
        MemoryNode {
            index: DOCUMENT_ELEMENT,
            tree: Rc::clone(&self.tree),
        }
    }

    /// Create an element and append it to the document element
    #[must_use]
    pub fn append_element(&self, tag: &str) -> MemoryNode {
        let node = self.create_element(tag);
        self.document_element().append_child(&node);
        node
    }

    /// Replace the current page URL
    pub fn set_location(&self, location: &str) {
        self.tree.borrow_mut().location = location.to_string();
    }

    /// Set the viewport width reported to the helpers
    pub fn set_viewport_width(&self, width: f64) {
        self.tree.borrow_mut().viewport_width = width;
    }

    /// Declare a CSS property/value pair as supported
    pub fn support_css(&self, property: &str, value: &str) {
        self.tree
            .borrow_mut()
            .supported_css
            .insert((property.to_string(), value.to_string()));
    }

    /// Number of touch listeners currently bound anywhere in the document
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.tree.borrow().listeners.len()
    }
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.tree.borrow();
        f.debug_struct("MemoryDocument")
            .field("location", &tree.location)
            .field("nodes", &tree.nodes.len())
            .finish()
    }
}

impl Document for MemoryDocument {
    type Node = MemoryNode;

    fn element_by_id(&self, id: &str) -> Option<MemoryNode> {
        if id.is_empty() {
            return None;
        }
        super::filter_children(&self.document_element(), |node| node.id() == id)
            .into_iter()
            .next()
    }

    fn scrolling_element(&self) -> Option<MemoryNode> {
        Some(self.document_element())
    }

    fn viewport_width(&self) -> Result<f64> {
        Ok(self.tree.borrow().viewport_width)
    }

    fn supports_css(&self, property: &str, value: &str) -> bool {
        self.tree
            .borrow()
            .supported_css
            .contains(&(property.to_string(), value.to_string()))
    }

    fn location(&self) -> Result<String> {
        Ok(self.tree.borrow().location.clone())
    }
}

/// Handle to an element of a [`MemoryDocument`]
#[derive(Clone)]
pub struct MemoryNode {
    index: usize,
    tree: Rc<RefCell<Tree>>,
}

impl MemoryNode {
    fn read<T>(&self, f: impl FnOnce(&NodeData) -> T) -> Option<T> {
        self.tree.borrow().node(self.index).map(f)
    }

    fn write(&self, f: impl FnOnce(&mut NodeData)) {
        if let Some(node) = self.tree.borrow_mut().node_mut(self.index) {
            f(node);
        }
    }

    fn handle(&self, index: usize) -> Self {
        Self {
            index,
            tree: Rc::clone(&self.tree),
        }
    }

    /// Tag name
    #[must_use]
    pub fn tag(&self) -> String {
        self.read(|n| n.tag.clone()).unwrap_or_default()
    }

    /// Move `child` under this node, after existing children
    pub fn append_child(&self, child: &Self) {
        let mut tree = self.tree.borrow_mut();
        tree.detach(child.index);
        if let Some(parent) = tree.node_mut(self.index) {
            parent.children.push(child.index);
        }
        if let Some(node) = tree.node_mut(child.index) {
            node.parent = Some(self.index);
        }
    }

    /// Detach this node from its parent
    pub fn remove(&self) {
        self.tree.borrow_mut().detach(self.index);
    }

    /// Set an attribute
    pub fn set_attribute(&self, name: &str, value: &str) {
        self.write(|n| {
            n.attributes.insert(name.to_string(), value.to_string());
        });
    }

    /// Set the `id` attribute
    pub fn set_id(&self, id: &str) {
        self.set_attribute("id", id);
    }

    /// Set the value returned by `computed_style` when no inline value exists
    pub fn set_computed_style(&self, property: &str, value: &str) {
        self.write(|n| {
            n.computed.insert(property.to_string(), value.to_string());
        });
    }

    /// Make the node measurable with the given path length
    pub fn set_total_length(&self, length: f64) {
        self.write(|n| n.total_length = Ok(length));
    }

    /// Make path measurement fail with the given message
    pub fn fail_total_length(&self, message: &str) {
        self.write(|n| n.total_length = Err(message.to_string()));
    }

    /// Set the scroll state
    pub fn set_scroll_metrics(&self, metrics: ScrollMetrics) {
        self.write(|n| n.scroll = metrics);
    }

    /// Set the inner width
    pub fn set_client_width(&self, width: f64) {
        self.write(|n| n.client_width = width);
    }

    /// Number of touch listeners bound on this node
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.tree
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.node == self.index)
            .count()
    }

    /// Dispatch a touch event with this node as target
    ///
    /// Handlers run on the target first, then on each ancestor. Cancellation
    /// from passive listeners is ignored, as browsers do.
    pub fn dispatch_touch(
        &self,
        phase: TouchPhase,
        touches: Vec<f64>,
        cancelable: bool,
    ) -> TouchInput<Self> {
        let mut path = vec![self.clone()];
        let mut current = self.parent();
        while let Some(node) = current {
            current = node.parent();
            path.push(node);
        }

        let handlers: Vec<(bool, SharedHandler)> = {
            let tree = self.tree.borrow();
            path.iter()
                .flat_map(|node| {
                    tree.listeners
                        .iter()
                        .filter(move |l| l.node == node.index && l.phase == phase)
                        .map(|l| (l.passive, Rc::clone(&l.handler)))
                })
                .collect()
        };

        let mut input = TouchInput::new(Some(self.clone()), touches, cancelable);
        for (passive, handler) in handlers {
            let prevented = input.default_prevented;
            (*handler.borrow_mut())(&mut input);
            if passive {
                input.default_prevented = prevented;
            }
        }
        input
    }
}

impl PartialEq for MemoryNode {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && Rc::ptr_eq(&self.tree, &other.tree)
    }
}

impl fmt::Debug for MemoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (tag, id) = self
            .tree
            .try_borrow()
            .ok()
            .and_then(|tree| {
                tree.node(self.index).map(|n| {
                    (
                        n.tag.clone(),
                        n.attributes.get("id").cloned().unwrap_or_default(),
                    )
                })
            })
            .unwrap_or_default();
        f.debug_struct("MemoryNode")
            .field("index", &self.index)
            .field("tag", &tag)
            .field("id", &id)
            .finish()
    }
}

impl DomNode for MemoryNode {
    fn children(&self) -> Vec<Self> {
        self.read(|n| n.children.clone())
            .unwrap_or_default()
            .into_iter()
            .map(|index| self.handle(index))
            .collect()
    }

    fn parent(&self) -> Option<Self> {
        self.read(|n| n.parent)
            .flatten()
            .map(|index| self.handle(index))
    }

    fn id(&self) -> String {
        self.read(|n| n.attributes.get("id").cloned())
            .flatten()
            .unwrap_or_default()
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.read(|n| n.attributes.contains_key(name))
            .unwrap_or(false)
    }

    fn href(&self) -> Option<String> {
        let href = self.read(|n| n.attributes.get("href").cloned()).flatten()?;
        let base = self.tree.borrow().location.clone();
        Url::parse(&base)
            .and_then(|base| base.join(&href))
            .map(String::from)
            .ok()
    }

    fn computed_style(&self, property: &str) -> Result<String> {
        self.read(|n| {
            n.inline
                .get(property)
                .or_else(|| n.computed.get(property))
                .cloned()
                .unwrap_or_default()
        })
        .ok_or_else(|| DomError::StyleUnavailable(self.tag()))
    }

    fn inline_style(&self, property: &str) -> Result<String> {
        self.read(|n| n.inline.get(property).cloned().unwrap_or_default())
            .ok_or_else(|| DomError::StyleUnavailable(self.tag()))
    }

    fn set_style(&self, property: &str, value: &str) -> Result<()> {
        self.write(|n| {
            if value.is_empty() {
                n.inline.remove(property);
            } else {
                n.inline.insert(property.to_string(), value.to_string());
            }
        });
        Ok(())
    }

    fn total_length(&self) -> Result<f64> {
        self.read(|n| n.total_length.clone())
            .unwrap_or_else(|| Err("detached handle".to_string()))
            .map_err(DomError::Measure)
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        self.read(|n| n.scroll).unwrap_or_default()
    }

    fn client_width(&self) -> f64 {
        self.read(|n| n.client_width).unwrap_or_default()
    }

    fn contains(&self, other: &Self) -> bool {
        if !Rc::ptr_eq(&self.tree, &other.tree) {
            return false;
        }
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node.index == self.index {
                return true;
            }
            current = node.parent();
        }
        false
    }

    fn on_touch(
        &self,
        phase: TouchPhase,
        passive: bool,
        handler: TouchHandler<Self>,
    ) -> Result<Teardown> {
        let id = {
            let mut tree = self.tree.borrow_mut();
            let id = tree.next_listener;
            tree.next_listener = tree.next_listener.wrapping_add(1);
            tree.listeners.push(Listener {
                id,
                node: self.index,
                phase,
                passive,
                handler: Rc::new(RefCell::new(handler)),
            });
            id
        };

        let tree: Weak<RefCell<Tree>> = Rc::downgrade(&self.tree);
        Ok(Teardown::new(phase.event_type(), move || {
            if let Some(tree) = tree.upgrade() {
                tree.borrow_mut().listeners.retain(|l| l.id != id);
            }
        }))
    }
}
