//! Behavioral tests for the `Mixin` facade

use crate::dom::memory::{MemoryDocument, MemoryNode};
use crate::dom::{DomNode, Document};
use crate::error::{DomError, Result};
use crate::{ComponentMeta, Mixin, MixinConfig};

fn page() -> MemoryDocument {
    let doc = MemoryDocument::new("https://example.com/components/modal?theme=dark");
    doc.set_viewport_width(1280.0);
    doc.document_element().set_client_width(1263.0);
    doc
}

fn link(doc: &MemoryDocument, href: &str) -> MemoryNode {
    let a = doc.append_element("a");
    a.set_attribute("href", href);
    a
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn given_invalid_config_when_building_mixin_then_rejected() {
    let config = MixinConfig {
        collision_suffix: String::new(),
        ..MixinConfig::default()
    };
    let result = Mixin::with_config(page(), config);
    assert!(matches!(result, Err(DomError::Config(_))));
}

#[test]
fn given_default_mixin_then_default_config() {
    let mixin = Mixin::new(page());
    assert_eq!(mixin.config(), &MixinConfig::default());
    assert!(mixin.document().scrolling_element().is_some());
}

// ============================================================================
// ANCHORS
// ============================================================================

#[test]
fn given_hash_link_when_checked_then_same_site_and_target_resolved() {
    let doc = page();
    let mixin = Mixin::new(doc.clone());
    let section = doc.append_element("section");
    section.set_id("usage");

    let anchor = link(&doc, "#usage");
    assert!(mixin.is_same_site_anchor(&anchor));
    assert_eq!(mixin.target_element(&anchor), Some(section));
}

#[test]
fn given_link_to_other_theme_when_checked_then_not_same_site() {
    let doc = page();
    let mixin = Mixin::new(doc.clone());

    assert!(!mixin.is_same_site_anchor(&link(&doc, "?theme=light#usage")));
}

#[test]
fn given_location_change_when_checked_then_new_location_used() {
    let doc = page();
    let mixin = Mixin::new(doc.clone());
    let anchor = link(&doc, "https://example.com/components/drop#usage");
    assert!(!mixin.is_same_site_anchor(&anchor));

    doc.set_location("https://example.com/components/drop");
    assert!(mixin.is_same_site_anchor(&anchor));
}

// ============================================================================
// IDS
// ============================================================================

#[test]
fn given_two_instances_when_generating_then_ids_differ() {
    let doc = page();
    let mixin = Mixin::new(doc.clone());
    let first = ComponentMeta::new("tooltip", 1, doc.append_element("div"));
    let second = ComponentMeta::new("tooltip", 2, doc.append_element("div"));

    assert_eq!(mixin.generate_id(&first), "tooltip-1");
    assert_eq!(mixin.generate_id(&second), "tooltip-2");
}

#[test]
fn given_generated_id_assigned_when_generating_again_then_id_kept() {
    let doc = page();
    let mixin = Mixin::new(doc.clone());
    let component = ComponentMeta::new("modal", 7, doc.append_element("div"));

    let id = mixin.generate_id(&component);
    component.root.set_id(&id);

    assert_eq!(mixin.generate_id(&component), "modal-7");
}

#[test]
fn given_child_element_when_generating_then_suffix_used() {
    let doc = page();
    let mixin = Mixin::new(doc.clone());
    let component = ComponentMeta::new("accordion", 3, doc.append_element("ul"));
    let panel = doc.create_element("div");
    component.root.append_child(&panel);

    assert_eq!(
        mixin.generate_id_for(&component, &panel, "-content"),
        "accordion-3-content"
    );
}

// ============================================================================
// SCROLL LOCKS
// ============================================================================

#[test]
fn given_open_modal_when_background_locked_then_scrollbar_compensated() -> Result<()> {
    let doc = page();
    let mixin = Mixin::new(doc.clone());

    let mut lock = mixin.prevent_background_scroll()?;
    let html = doc.document_element();
    assert_eq!(html.inline_style("padding-right")?, "17px");

    lock.release();
    assert_eq!(html.inline_style("padding-right")?, "");
    Ok(())
}

#[test]
fn given_nested_modals_when_sharing_lock_then_unlocked_after_both_close() -> Result<()> {
    let doc = page();
    let mixin = Mixin::new(doc.clone());
    let lock = mixin.background_scroll_lock();
    let html = doc.document_element();

    let outer = lock.acquire()?;
    let inner = lock.acquire()?;
    drop(outer);
    assert_eq!(html.inline_style("overflow-y")?, "hidden");

    drop(inner);
    assert_eq!(html.inline_style("overflow-y")?, "");
    Ok(())
}

#[test]
fn given_svg_icon_when_measuring_then_longest_stroke_rounded_up() {
    let doc = page();
    let mixin = Mixin::new(doc.clone());
    let svg = doc.append_element("svg");
    for length in [12.1, 30.01] {
        let path = doc.create_element("path");
        path.set_attribute("stroke", "#000");
        path.set_total_length(length);
        svg.append_child(&path);
    }

    assert_eq!(mixin.max_path_length(&svg), 31);
}
