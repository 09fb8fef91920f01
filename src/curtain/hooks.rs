/// Lifecycle notifications from a [`Curtain`](crate::Curtain).
///
/// Each method fires at most once per transition. All default to no-ops.
pub trait CurtainHooks {
    /// The cover finished; the viewport is hidden and heavy content may mount.
    fn on_revealed(&mut self) {}
    /// A close was accepted; content must unmount before the reveal starts.
    fn on_unmount(&mut self) {}
    /// The reveal after a close finished; control returns to the caller.
    fn on_closed(&mut self) {}
    /// A round trip or entrance reveal finished.
    fn on_finished(&mut self) {}
}

/// No notifications.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl CurtainHooks for NoHooks {}

type Callback = Box<dyn FnMut()>;

/// Closure-backed hooks.
///
/// ```
/// use std::{cell::Cell, rc::Rc};
/// use wavecurtain::FnHooks;
///
/// let closed = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&closed);
/// let hooks = FnHooks::new().on_closed(move || flag.set(true));
/// # let _ = hooks;
/// ```
#[derive(Default)]
pub struct FnHooks {
    revealed: Option<Callback>,
    unmount: Option<Callback>,
    closed: Option<Callback>,
    finished: Option<Callback>,
}

impl FnHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_revealed(mut self, f: impl FnMut() + 'static) -> Self {
        self.revealed = Some(Box::new(f));
        self
    }

    pub fn on_unmount(mut self, f: impl FnMut() + 'static) -> Self {
        self.unmount = Some(Box::new(f));
        self
    }

    pub fn on_closed(mut self, f: impl FnMut() + 'static) -> Self {
        self.closed = Some(Box::new(f));
        self
    }

    pub fn on_finished(mut self, f: impl FnMut() + 'static) -> Self {
        self.finished = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for FnHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnHooks")
            .field("revealed", &self.revealed.is_some())
            .field("unmount", &self.unmount.is_some())
            .field("closed", &self.closed.is_some())
            .field("finished", &self.finished.is_some())
            .finish()
    }
}

impl CurtainHooks for FnHooks {
    fn on_revealed(&mut self) {
        if let Some(f) = self.revealed.as_mut() {
            f();
        }
    }

    fn on_unmount(&mut self) {
        if let Some(f) = self.unmount.as_mut() {
            f();
        }
    }

    fn on_closed(&mut self) {
        if let Some(f) = self.closed.as_mut() {
            f();
        }
    }

    fn on_finished(&mut self) {
        if let Some(f) = self.finished.as_mut() {
            f();
        }
    }
}
