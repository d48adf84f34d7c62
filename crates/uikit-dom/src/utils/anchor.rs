//! Same-page anchor helpers

use url::Url;

use crate::dom::{DomNode, Document};

/// Components of a URL compared for same-page navigation
#[derive(Debug, PartialEq, Eq)]
struct PageKey {
    origin: String,
    path: String,
    search: String,
}

impl PageKey {
    fn parse(href: &str) -> Option<Self> {
        let url = Url::parse(href)
            .map_err(|e| tracing::debug!(href, error = %e, "unparseable url"))
            .ok()?;
        Some(Self {
            origin: url.origin().ascii_serialization(),
            path: url.path().to_string(),
            // A bare `?` has an empty search string, as in `location.search`.
            search: url.query().unwrap_or_default().to_string(),
        })
    }
}

/// Whether `anchor` points at the current page
///
/// True iff origin, path and query string all match the document location.
/// The fragment is ignored. Anchors without `href` are never same-site.
pub fn is_same_site_anchor<D: Document>(document: &D, anchor: &D::Node) -> bool {
    let Some(target) = anchor.href().and_then(|href| PageKey::parse(&href)) else {
        return false;
    };
    document
        .location()
        .ok()
        .and_then(|location| PageKey::parse(&location))
        .is_some_and(|current| current == target)
}

/// Element referenced by the anchor's fragment
///
/// The fragment is percent-decoded before the id lookup, so `#%20foo`
/// resolves to the element with id `" foo"`.
pub fn target_element<D: Document>(document: &D, anchor: &D::Node) -> Option<D::Node> {
    let href = anchor.href()?;
    let url = Url::parse(&href).ok()?;
    let fragment = url.fragment().filter(|f| !f.is_empty())?;
    let id = urlencoding::decode(fragment)
        .map_err(|e| tracing::debug!(fragment, error = %e, "undecodable fragment"))
        .ok()?;
    document.element_by_id(&id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::{MemoryDocument, MemoryNode};

    fn anchor(doc: &MemoryDocument, href: &str) -> MemoryNode {
        let a = doc.append_element("a");
        a.set_attribute("href", href);
        a
    }

    #[test]
    fn test_same_page_anchor() {
        let doc = MemoryDocument::new("https://example.com/docs/?page=2");
        assert!(is_same_site_anchor(&doc, &anchor(&doc, "#section")));
        assert!(is_same_site_anchor(
            &doc,
            &anchor(&doc, "https://example.com/docs/?page=2#top")
        ));
    }

    #[test]
    fn test_different_search_is_not_same_site() {
        let doc = MemoryDocument::new("https://example.com/docs/?page=2");
        assert!(!is_same_site_anchor(&doc, &anchor(&doc, "?page=3#section")));
        assert!(!is_same_site_anchor(&doc, &anchor(&doc, "/docs/#section")));
    }

    #[test]
    fn test_different_path_or_origin() {
        let doc = MemoryDocument::new("https://example.com/docs/");
        assert!(!is_same_site_anchor(&doc, &anchor(&doc, "/blog/")));
        assert!(!is_same_site_anchor(
            &doc,
            &anchor(&doc, "http://example.com/docs/")
        ));
        assert!(!is_same_site_anchor(
            &doc,
            &anchor(&doc, "https://example.org/docs/")
        ));
    }

    #[test]
    fn test_empty_query_matches_no_query() {
        let doc = MemoryDocument::new("https://example.com/docs/");
        assert!(is_same_site_anchor(
            &doc,
            &anchor(&doc, "https://example.com/docs/?")
        ));
    }

    #[test]
    fn test_anchor_without_href() {
        let doc = MemoryDocument::new("https://example.com/");
        let a = doc.append_element("a");
        assert!(!is_same_site_anchor(&doc, &a));
        assert_eq!(target_element(&doc, &a), None);
    }

    #[test]
    fn test_target_element_decodes_fragment() {
        let doc = MemoryDocument::new("https://example.com/");
        let target = doc.append_element("section");
        target.set_id(" foo");

        assert_eq!(
            target_element(&doc, &anchor(&doc, "#%20foo")),
            Some(target)
        );
    }

    #[test]
    fn test_target_element_missing() {
        let doc = MemoryDocument::new("https://example.com/");
        assert_eq!(target_element(&doc, &anchor(&doc, "#%20foo")), None);
        assert_eq!(target_element(&doc, &anchor(&doc, "#")), None);
        assert_eq!(target_element(&doc, &anchor(&doc, "/page")), None);
    }

    #[test]
    fn test_target_element_unicode_fragment() {
        let doc = MemoryDocument::new("https://example.com/");
        let target = doc.append_element("h2");
        target.set_id("überblick");

        assert_eq!(
            target_element(&doc, &anchor(&doc, "#%C3%BCberblick")),
            Some(target)
        );
    }
}
