use std::{cell::Cell, rc::Rc};

/// Document-level scroll lock shared by everything on one UI thread.
///
/// Holding is expressed by a [`ScrollGuard`]; the lock is released when the guard drops, so a
/// curtain torn down mid-transition (or unwound by a panicking hook) never leaves the page
/// frozen. Not reentrant: a second acquire while held yields an inert guard.
#[derive(Clone, Debug, Default)]
pub struct ScrollLock {
    held: Rc<Cell<bool>>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.held.get()
    }

    pub fn acquire(&self) -> ScrollGuard {
        if self.held.replace(true) {
            tracing::warn!("scroll lock already held; nested curtains share one lock");
            return ScrollGuard { held: None };
        }
        tracing::debug!("scroll locked");
        ScrollGuard {
            held: Some(Rc::clone(&self.held)),
        }
    }
}

#[derive(Debug)]
#[must_use = "dropping the guard releases the scroll lock"]
pub struct ScrollGuard {
    held: Option<Rc<Cell<bool>>>,
}

impl ScrollGuard {
    /// Whether this guard owns the lock (false for a nested acquire).
    pub fn is_owner(&self) -> bool {
        self.held.is_some()
    }
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        if let Some(held) = self.held.take() {
            held.set(false);
            tracing::debug!("scroll released");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curtain/scroll.rs"]
mod tests;
