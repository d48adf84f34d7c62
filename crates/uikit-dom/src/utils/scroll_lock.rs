//! Background scroll locking for modal overlays

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dom::{DomNode, Document};
use crate::error::{DomError, Result};
use crate::teardown::Teardown;

/// Inline properties written by the lock, in write order
const LOCK_PROPERTIES: [&str; 3] = ["overflow-y", "touch-action", "padding-right"];

/// Lock scrolling of the page behind an overlay
///
/// If the scrolling element already has `overflow-y: hidden` inline, the page
/// is considered locked by someone else and a no-op handle is returned.
/// Otherwise vertical overflow is hidden, touch panning disabled and the
/// right padding grown by the scrollbar width so content does not shift.
/// Releasing restores the three properties to their previous inline values.
///
/// # Errors
///
/// Returns an error if:
/// - The document has no scrolling element
/// - The viewport width cannot be read
/// - A style read or write fails (earlier writes are rolled back)
pub fn prevent_background_scroll<D: Document>(document: &D) -> Result<Teardown> {
    let scrolling = document
        .scrolling_element()
        .ok_or(DomError::NoScrollingElement)?;

    if scrolling.inline_style("overflow-y")? == "hidden" {
        tracing::debug!("background scroll already locked");
        return Ok(Teardown::noop("background-scroll"));
    }

    let scrollbar = document.viewport_width()? - scrolling.client_width();
    let values = ["hidden".to_string(), "none".to_string(), format!("{scrollbar}px")];

    let mut saved: Vec<(&'static str, String)> = Vec::with_capacity(LOCK_PROPERTIES.len());
    for (property, value) in LOCK_PROPERTIES.into_iter().zip(values) {
        let written = scrolling
            .inline_style(property)
            .and_then(|previous| {
                scrolling.set_style(property, &value)?;
                Ok(previous)
            });
        match written {
            Ok(previous) => saved.push((property, previous)),
            Err(e) => {
                restore(&scrolling, &saved);
                return Err(e);
            }
        }
    }

    tracing::debug!(scrollbar, "background scroll locked");
    Ok(Teardown::new("background-scroll", move || {
        restore(&scrolling, &saved);
        tracing::debug!("background scroll unlocked");
    }))
}

fn restore<N: DomNode>(scrolling: &N, saved: &[(&'static str, String)]) {
    for (property, previous) in saved {
        if let Err(e) = scrolling.set_style(property, previous) {
            tracing::warn!(property, error = %e, "failed to restore scroll lock style");
        }
    }
}

/// Reference-counted owner of the background scroll lock
///
/// Nested overlays each [`acquire`](Self::acquire) the lock. The page is
/// locked by the first acquisition and unlocked when the last handle is
/// released, independent of release order.
///
/// ```
/// use uikit_dom::BackgroundScrollLock;
/// use uikit_dom::dom::memory::MemoryDocument;
///
/// let doc = MemoryDocument::new("https://example.com/");
/// let lock = BackgroundScrollLock::new(doc.clone());
///
/// let mut outer = lock.acquire()?;
/// let mut inner = lock.acquire()?;
/// outer.release();
/// assert!(lock.is_locked());
/// inner.release();
/// assert!(!lock.is_locked());
/// # Ok::<(), uikit_dom::DomError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BackgroundScrollLock<D> {
    document: D,
    state: Rc<LockState>,
}

#[derive(Debug, Default)]
struct LockState {
    holders: Cell<usize>,
    guard: RefCell<Option<Teardown>>,
}

impl LockState {
    fn release_one(&self) {
        let holders = self.holders.get().saturating_sub(1);
        self.holders.set(holders);
        if holders == 0 {
            // Taken out first so the restore runs without the cell borrowed.
            let guard = self.guard.borrow_mut().take();
            drop(guard);
        }
    }
}

impl<D: Document> BackgroundScrollLock<D> {
    /// Create an unlocked lock for `document`
    #[must_use]
    pub fn new(document: D) -> Self {
        Self {
            document,
            state: Rc::new(LockState::default()),
        }
    }

    /// Take a share of the lock, locking the page if nobody holds it yet
    ///
    /// # Errors
    ///
    /// Returns an error if locking the page fails; the holder count is left
    /// unchanged.
    pub fn acquire(&self) -> Result<Teardown> {
        if self.state.holders.get() == 0 {
            let guard = prevent_background_scroll(&self.document)?;
            *self.state.guard.borrow_mut() = Some(guard);
        }
        self.state
            .holders
            .set(self.state.holders.get().saturating_add(1));
        tracing::trace!(holders = self.state.holders.get(), "scroll lock acquired");

        let state = Rc::clone(&self.state);
        Ok(Teardown::new("background-scroll-share", move || {
            state.release_one();
        }))
    }

    /// Number of outstanding handles
    #[must_use]
    pub fn holders(&self) -> usize {
        self.state.holders.get()
    }

    /// Whether at least one handle is outstanding
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.holders() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDocument;

    fn page() -> MemoryDocument {
        let doc = MemoryDocument::new("https://example.com/");
        doc.set_viewport_width(1024.0);
        doc.document_element().set_client_width(1009.0);
        doc
    }

    fn styles(doc: &MemoryDocument) -> Result<Vec<String>> {
        let html = doc.document_element();
        LOCK_PROPERTIES
            .iter()
            .map(|property| html.inline_style(property))
            .collect()
    }

    #[test]
    fn test_lock_applies_styles() -> Result<()> {
        let doc = page();
        let _lock = prevent_background_scroll(&doc)?;
        assert_eq!(styles(&doc)?, vec!["hidden", "none", "15px"]);
        Ok(())
    }

    #[test]
    fn test_release_restores_previous_state() -> Result<()> {
        let doc = page();
        let before = styles(&doc)?;

        let mut lock = prevent_background_scroll(&doc)?;
        lock.release();

        assert_eq!(styles(&doc)?, before);
        Ok(())
    }

    #[test]
    fn test_release_restores_previous_inline_values() -> Result<()> {
        let doc = page();
        let html = doc.document_element();
        html.set_style("padding-right", "4px")?;

        let mut lock = prevent_background_scroll(&doc)?;
        assert_eq!(html.inline_style("padding-right")?, "15px");
        lock.release();

        assert_eq!(html.inline_style("padding-right")?, "4px");
        assert_eq!(html.inline_style("overflow-y")?, "");
        Ok(())
    }

    #[test]
    fn test_second_lock_is_noop() -> Result<()> {
        let doc = page();
        let mut first = prevent_background_scroll(&doc)?;
        let mut second = prevent_background_scroll(&doc)?;
        assert!(second.is_released());

        second.release();
        assert_eq!(styles(&doc)?, vec!["hidden", "none", "15px"]);

        first.release();
        assert_eq!(styles(&doc)?, vec!["", "", ""]);
        Ok(())
    }

    #[test]
    fn test_refcounted_lock_unlocks_on_last_release() -> Result<()> {
        let doc = page();
        let lock = BackgroundScrollLock::new(doc.clone());

        let mut first = lock.acquire()?;
        let mut second = lock.acquire()?;
        assert_eq!(lock.holders(), 2);

        first.release();
        assert!(lock.is_locked());
        assert_eq!(styles(&doc)?, vec!["hidden", "none", "15px"]);

        second.release();
        second.release();
        assert!(!lock.is_locked());
        assert_eq!(styles(&doc)?, vec!["", "", ""]);
        Ok(())
    }

    #[test]
    fn test_refcounted_lock_relocks_after_unlock() -> Result<()> {
        let doc = page();
        let lock = BackgroundScrollLock::new(doc.clone());

        drop(lock.acquire()?);
        assert_eq!(styles(&doc)?, vec!["", "", ""]);

        let _again = lock.acquire()?;
        assert_eq!(styles(&doc)?, vec!["hidden", "none", "15px"]);
        Ok(())
    }
}
