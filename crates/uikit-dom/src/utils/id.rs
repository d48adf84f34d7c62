//! Stable DOM ids for component instances

use crate::config::{DEFAULT_COLLISION_SUFFIX, MixinConfig};
use crate::dom::{DomNode, Document};

/// What id generation needs to know about a component instance
pub trait Component {
    /// Element handle type
    type Node: DomNode;

    /// Configured id prefix, e.g. `"modal"`
    fn id_prefix(&self) -> &str;

    /// Unique instance number
    fn uid(&self) -> u64;

    /// Root element of the rendered component
    fn root(&self) -> Self::Node;
}

/// Plain component description
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentMeta<N> {
    /// Configured id prefix
    pub prefix: String,
    /// Unique instance number
    pub uid: u64,
    /// Root element
    pub root: N,
}

impl<N> ComponentMeta<N> {
    /// Describe a component instance
    pub fn new(prefix: impl Into<String>, uid: u64, root: N) -> Self {
        Self {
            prefix: prefix.into(),
            uid,
            root,
        }
    }
}

impl<N: DomNode> Component for ComponentMeta<N> {
    type Node = N;

    fn id_prefix(&self) -> &str {
        &self.prefix
    }

    fn uid(&self) -> u64 {
        self.uid
    }

    fn root(&self) -> N {
        self.root.clone()
    }
}

/// Id for `element`, or for the component root when `element` is `None`
///
/// An element that already has an id keeps it. Otherwise the candidate is
/// `{prefix}-{uid}{suffix}`; while another element in the document owns the
/// candidate, `config.collision_suffix` is appended and the lookup repeated.
/// An empty collision suffix is replaced by `"-2"`.
/// The id is returned, not assigned.
///
/// There is no retry bound: a document holding every extension of the
/// candidate keeps this looping.
///
/// # Example
///
/// ```
/// use uikit_dom::dom::memory::MemoryDocument;
/// use uikit_dom::{ComponentMeta, MixinConfig, generate_id};
///
/// let doc = MemoryDocument::new("https://example.com/");
/// let root = doc.append_element("div");
/// let modal = ComponentMeta::new("modal", 7, root);
///
/// assert_eq!(generate_id(&doc, &modal, None, "", &MixinConfig::default()), "modal-7");
/// ```
pub fn generate_id<D, C>(
    document: &D,
    component: &C,
    element: Option<&D::Node>,
    suffix: &str,
    config: &MixinConfig,
) -> String
where
    D: Document,
    C: Component<Node = D::Node>,
{
    let existing = element.map_or_else(|| component.root().id(), DomNode::id);
    if !existing.is_empty() {
        return existing;
    }

    let collision_suffix = if config.collision_suffix.is_empty() {
        tracing::warn!("empty collision suffix, using {DEFAULT_COLLISION_SUFFIX}");
        DEFAULT_COLLISION_SUFFIX
    } else {
        config.collision_suffix.as_str()
    };

    let mut suffix = suffix.to_string();
    loop {
        let candidate = format!("{}-{}{}", component.id_prefix(), component.uid(), suffix);
        if document.element_by_id(&candidate).is_none() {
            return candidate;
        }
        tracing::trace!(%candidate, "generated id already taken");
        suffix.push_str(collision_suffix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::{MemoryDocument, MemoryNode};

    fn modal(doc: &MemoryDocument) -> ComponentMeta<MemoryNode> {
        ComponentMeta::new("modal", 7, doc.append_element("div"))
    }

    fn generate(doc: &MemoryDocument, component: &ComponentMeta<MemoryNode>) -> String {
        generate_id(doc, component, None, "", &MixinConfig::default())
    }

    #[test]
    fn test_existing_id_kept() {
        let doc = MemoryDocument::new("https://example.com/");
        let component = modal(&doc);
        component.root.set_id("existing");
        assert_eq!(generate(&doc, &component), "existing");
    }

    #[test]
    fn test_fresh_id() {
        let doc = MemoryDocument::new("https://example.com/");
        assert_eq!(generate(&doc, &modal(&doc)), "modal-7");
    }

    #[test]
    fn test_collision_appends_suffix() {
        let doc = MemoryDocument::new("https://example.com/");
        doc.append_element("div").set_id("modal-7");
        assert_eq!(generate(&doc, &modal(&doc)), "modal-7-2");
    }

    #[test]
    fn test_repeated_collisions_accumulate_suffix() {
        let doc = MemoryDocument::new("https://example.com/");
        for taken in ["modal-7", "modal-7-2", "modal-7-2-2"] {
            doc.append_element("div").set_id(taken);
        }
        assert_eq!(generate(&doc, &modal(&doc)), "modal-7-2-2-2");
    }

    #[test]
    fn test_detached_duplicate_does_not_collide() {
        let doc = MemoryDocument::new("https://example.com/");
        doc.create_element("div").set_id("modal-7");
        assert_eq!(generate(&doc, &modal(&doc)), "modal-7");
    }

    #[test]
    fn test_explicit_element_and_suffix() {
        let doc = MemoryDocument::new("https://example.com/");
        let component = modal(&doc);
        let title = doc.create_element("h2");
        component.root.append_child(&title);

        let id = generate_id(&doc, &component, Some(&title), "-title", &MixinConfig::default());
        assert_eq!(id, "modal-7-title");

        title.set_id("heading");
        let id = generate_id(&doc, &component, Some(&title), "-title", &MixinConfig::default());
        assert_eq!(id, "heading");
    }

    #[test]
    fn test_custom_collision_suffix() {
        let doc = MemoryDocument::new("https://example.com/");
        doc.append_element("div").set_id("modal-7");
        let config = MixinConfig {
            collision_suffix: "-x".to_string(),
            ..MixinConfig::default()
        };
        assert_eq!(generate_id(&doc, &modal(&doc), None, "", &config), "modal-7-x");
    }

    #[test]
    fn test_empty_collision_suffix_falls_back_to_default() {
        let doc = MemoryDocument::new("https://example.com/");
        doc.append_element("div").set_id("modal-7");
        doc.append_element("div").set_id("modal-7-2");
        let config = MixinConfig {
            collision_suffix: String::new(),
            ..MixinConfig::default()
        };
        assert_eq!(generate_id(&doc, &modal(&doc), None, "", &config), "modal-7-2-2");
    }

    #[test]
    fn test_deterministic() {
        let doc = MemoryDocument::new("https://example.com/");
        let component = modal(&doc);
        assert_eq!(generate(&doc, &component), generate(&doc, &component));
    }
}
