//! SVG stroke measurement

use crate::dom::{DomNode, descendants};

/// Longest stroke path below `element`, rounded up
///
/// Every descendant carrying a `stroke` attribute is measured. A node that
/// cannot be measured counts as 0 and never aborts the scan. Returns 0 when
/// there are no strokes.
///
/// # Example
///
/// ```
/// use uikit_dom::dom::memory::MemoryDocument;
/// use uikit_dom::max_path_length;
///
/// let doc = MemoryDocument::new("https://example.com/");
/// let svg = doc.append_element("svg");
/// let path = doc.create_element("path");
/// path.set_attribute("stroke", "currentColor");
/// path.set_total_length(41.2);
/// svg.append_child(&path);
///
/// assert_eq!(max_path_length(&svg), 42);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn max_path_length<N: DomNode>(element: &N) -> u32 {
    let longest = descendants(element, |node| node.has_attribute("stroke"))
        .iter()
        .map(|stroke| match stroke.total_length() {
            Ok(length) if length.is_finite() => length,
            Ok(length) => {
                tracing::debug!(?stroke, length, "ignoring non-finite path length");
                0.0
            }
            Err(e) => {
                tracing::debug!(?stroke, error = %e, "stroke not measurable");
                0.0
            }
        })
        .fold(0.0_f64, f64::max);

    // Non-negative and finite here; `as` saturates above u32::MAX.
    longest.ceil() as u32
}
