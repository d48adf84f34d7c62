//! Release handles for installed DOM side effects

use std::fmt;

/// Handle undoing the side effects of one acquisition
///
/// Returned by every helper that mutates styles or binds listeners. The
/// release runs at most once: on [`Teardown::release`] or when the handle is
/// dropped, whichever comes first.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use uikit_dom::Teardown;
///
/// let released = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&released);
/// let mut teardown = Teardown::new("example", move || counter.set(counter.get() + 1));
///
/// teardown.release();
/// teardown.release();
/// drop(teardown);
/// assert_eq!(released.get(), 1);
/// ```
#[must_use = "dropping a Teardown releases it immediately"]
pub struct Teardown {
    label: &'static str,
    release: Option<Box<dyn FnOnce()>>,
}

impl Teardown {
    /// Wrap a release callback
    pub fn new<F>(label: &'static str, release: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            label,
            release: Some(Box::new(release)),
        }
    }

    /// A handle with nothing to release
    pub const fn noop(label: &'static str) -> Self {
        Self {
            label,
            release: None,
        }
    }

    /// Combine several handles; releasing runs them in order
    pub fn all(label: &'static str, parts: Vec<Self>) -> Self {
        Self::new(label, move || {
            for mut part in parts {
                part.release();
            }
        })
    }

    /// Undo the side effects. Later calls do nothing.
    pub fn release(&mut self) {
        if let Some(release) = self.release.take() {
            tracing::trace!(label = self.label, "releasing");
            release();
        }
    }

    /// Whether there is nothing left to release
    #[must_use]
    pub const fn is_released(&self) -> bool {
        self.release.is_none()
    }

    /// Keep the side effects installed for the rest of the page lifetime
    ///
    /// The release callback is leaked, not dropped: it may own the JS
    /// closure a still-registered listener calls into.
    pub fn persist(mut self) {
        if let Some(release) = self.release.take() {
            tracing::trace!(label = self.label, "persisting");
            std::mem::forget(release);
        }
    }

    /// Name given at acquisition, for diagnostics
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Teardown")
            .field("label", &self.label)
            .field("released", &self.is_released())
            .finish()
    }
}
