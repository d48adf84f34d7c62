//! Overscroll suppression for scrollable overlays
//!
//! Stops a scroll gesture inside an element from chaining to the page
//! behind it. Platforms that support `overscroll-behavior` get the CSS
//! property on every scroll container in the subtree; the others get a pair
//! of touch listeners that cancel moves pushing past a scroll boundary.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::MixinConfig;
use crate::dom::{
    DomNode, Document, ScrollMetrics, TouchInput, TouchPhase, filter_children, is_within,
    scroll_parent,
};
use crate::error::Result;
use crate::teardown::Teardown;

const OVERSCROLL_PROPERTY: &str = "overscroll-behavior";

/// Whether a vertical move of `delta_y` would overscroll `boundary`
///
/// `delta_y` is the finger travel since touch start (positive = downwards,
/// i.e. scrolling up). Without a recorded start only content that already
/// fits blocks the gesture.
#[must_use]
pub fn blocks_overscroll(boundary: &ScrollMetrics, delta_y: Option<f64>) -> bool {
    if boundary.fits() {
        return true;
    }
    delta_y.is_some_and(|delta| {
        (boundary.at_top() && delta > 0.0) || (boundary.at_bottom() && delta < 0.0)
    })
}

/// Install an overscroll lock on `element`
///
/// Releasing the returned handle restores exactly the styles or listeners
/// this call installed.
///
/// # Errors
///
/// Returns an error if a style write or listener binding fails. Styles
/// already written are restored before the error is returned.
pub fn prevent_overscroll<D: Document>(
    document: &D,
    element: &D::Node,
    config: &MixinConfig,
) -> Result<Teardown> {
    if document.supports_css(OVERSCROLL_PROPERTY, &config.overscroll_containment) {
        contain_overscroll(element, config)
    } else {
        block_touch_overscroll(element, config)
    }
}

/// Declarative path: `overscroll-behavior` on every scroll container
fn contain_overscroll<N: DomNode>(element: &N, config: &MixinConfig) -> Result<Teardown> {
    let containers = filter_children(element, |node| {
        node.computed_style("overflow")
            .is_ok_and(|overflow| config.is_scrollable_overflow(&overflow))
    });

    let mut applied: Vec<(N, String)> = Vec::with_capacity(containers.len());
    for node in containers {
        let previous = match node.inline_style(OVERSCROLL_PROPERTY) {
            Ok(previous) => previous,
            Err(e) => {
                restore(&applied);
                return Err(e);
            }
        };
        if let Err(e) = node.set_style(OVERSCROLL_PROPERTY, &config.overscroll_containment) {
            restore(&applied);
            return Err(e);
        }
        applied.push((node, previous));
    }

    tracing::debug!(containers = applied.len(), "overscroll contained via css");
    Ok(Teardown::new("overscroll-css", move || restore(&applied)))
}

fn restore<N: DomNode>(applied: &[(N, String)]) {
    for (node, previous) in applied {
        if let Err(e) = node.set_style(OVERSCROLL_PROPERTY, previous) {
            tracing::warn!(?node, error = %e, "failed to restore overscroll-behavior");
        }
    }
}

/// Fallback path: cancel touch moves that would overscroll
fn block_touch_overscroll<N: DomNode>(element: &N, config: &MixinConfig) -> Result<Teardown> {
    let start_y: Rc<Cell<Option<f64>>> = Rc::new(Cell::new(None));

    let on_start = {
        let start_y = Rc::clone(&start_y);
        element.on_touch(
            TouchPhase::Start,
            true,
            Box::new(move |input: &mut TouchInput<N>| {
                if let Some(y) = input.single_touch_y() {
                    start_y.set(Some(y));
                }
            }),
        )?
    };

    let on_move = {
        let root = element.clone();
        let config = config.clone();
        element.on_touch(
            TouchPhase::Move,
            false,
            Box::new(move |input: &mut TouchInput<N>| {
                let Some(y) = input.single_touch_y() else {
                    return;
                };

                let boundary = input
                    .target
                    .as_ref()
                    .and_then(|target| scroll_parent(target, &config))
                    .filter(|parent| is_within(parent, &root))
                    .unwrap_or_else(|| root.clone());

                let delta_y = start_y.get().map(|start| y - start);
                if blocks_overscroll(&boundary.scroll_metrics(), delta_y) {
                    tracing::trace!(?delta_y, "cancelling overscrolling touch move");
                    input.prevent_default();
                }
            }),
        )?
    };

    tracing::debug!("overscroll blocked via touch listeners");
    Ok(Teardown::all("overscroll-touch", vec![on_start, on_move]))
}
