//! Tree walks over any [`DomNode`]

use super::DomNode;
use crate::config::MixinConfig;

/// Collect `root` and every descendant matching `predicate`
///
/// Depth-first, pre-order; the root is visited first.
pub fn filter_children<N, F>(root: &N, mut predicate: F) -> Vec<N>
where
    N: DomNode,
    F: FnMut(&N) -> bool,
{
    let mut matches = Vec::new();
    let mut stack = vec![root.clone()];

    while let Some(node) = stack.pop() {
        if predicate(&node) {
            matches.push(node.clone());
        }
        // Reversed so the first child is popped next.
        stack.extend(node.children().into_iter().rev());
    }

    matches
}

/// Every descendant of `root` matching `predicate`, root excluded
///
/// Same order as a descendant selector query.
pub fn descendants<N, F>(root: &N, mut predicate: F) -> Vec<N>
where
    N: DomNode,
    F: FnMut(&N) -> bool,
{
    filter_children(root, |node| node != root && predicate(node))
}

/// Nearest strict ancestor of `node` whose computed overflow scrolls
pub fn scroll_parent<N: DomNode>(node: &N, config: &MixinConfig) -> Option<N> {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        let overflow = ancestor.computed_style("overflow").unwrap_or_default();
        if config.is_scrollable_overflow(&overflow) {
            return Some(ancestor);
        }
        current = ancestor.parent();
    }
    None
}

/// Whether `node` is `container` or lies inside it
pub fn is_within<N: DomNode>(node: &N, container: &N) -> bool {
    container.contains(node)
}
