use crate::{
    curtain::{
        config::CurtainConfig,
        orchestrator::{Curtain, Phase},
        scroll::ScrollLock,
    },
    foundation::error::CurtainResult,
    overlay::content::{ContentFade, ContentStyle},
    surface::RenderSurface,
};

type CloseCallback = Box<dyn FnMut()>;

/// A full-screen panel behind a wave curtain, with a second curtain for a selected item.
///
/// Content is mounted only once a curtain is fully covering and is unmounted before the reveal
/// starts. The main curtain refuses to close while either curtain is moving.
pub struct Overlay {
    main: Curtain,
    detail: Curtain,
    content: ContentFade,
    detail_content: ContentFade,
    selected: Option<usize>,
    on_close: Option<CloseCallback>,
}

impl std::fmt::Debug for Overlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overlay")
            .field("main", &self.main.phase())
            .field("detail", &self.detail.phase())
            .field("selected", &self.selected)
            .field("content_mounted", &self.content.is_mounted())
            .finish_non_exhaustive()
    }
}

impl Overlay {
    pub fn new(main: CurtainConfig, detail: CurtainConfig) -> CurtainResult<Self> {
        Ok(Self {
            main: Curtain::new(main)?,
            detail: Curtain::new(detail)?,
            content: ContentFade::default(),
            detail_content: ContentFade::default(),
            selected: None,
            on_close: None,
        })
    }

    /// Lock scrolling while the main curtain is up.
    pub fn with_scroll_lock(self, lock: ScrollLock) -> Self {
        Self {
            main: self.main.with_scroll_lock(lock),
            ..self
        }
    }

    /// Called once each time the main curtain has fully revealed after a close.
    pub fn on_close(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }

    pub fn main(&self) -> &Curtain {
        &self.main
    }

    pub fn detail(&self) -> &Curtain {
        &self.detail
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_open(&self) -> bool {
        self.main.is_open()
    }

    pub fn is_animating(&self) -> bool {
        self.main.is_animating() || self.detail.is_animating()
    }

    pub fn content_style(&self) -> Option<ContentStyle> {
        self.content.style()
    }

    pub fn detail_content_style(&self) -> Option<ContentStyle> {
        self.detail_content.style()
    }

    pub fn open(&mut self) -> bool {
        self.main.open()
    }

    /// Close the whole overlay. A shown detail is dropped without its own reveal.
    pub fn close(&mut self) -> bool {
        if self.is_animating() || self.main.phase() != Phase::Covered {
            tracing::trace!(
                main = ?self.main.phase(),
                detail = ?self.detail.phase(),
                "overlay close ignored"
            );
            return false;
        }
        self.detail.kill();
        self.detail_content.unmount();
        self.selected = None;
        self.content.unmount();
        self.main.close()
    }

    /// Cover the panel with the detail curtain for item `index`.
    pub fn open_detail(&mut self, index: usize) -> bool {
        if self.main.phase() != Phase::Covered || self.is_animating() {
            return false;
        }
        if !self.detail.open() {
            return false;
        }
        tracing::debug!(index, "detail opening");
        self.selected = Some(index);
        true
    }

    pub fn close_detail(&mut self) -> bool {
        if self.detail.phase() != Phase::Covered || self.detail.is_animating() {
            return false;
        }
        self.detail_content.unmount();
        self.detail.close()
    }

    /// Escape key: back out of the detail first, then out of the overlay.
    pub fn escape(&mut self) -> bool {
        if self.detail.phase() == Phase::Covered {
            self.close_detail()
        } else if self.detail.phase() == Phase::Idle && self.main.phase() == Phase::Covered {
            self.close()
        } else {
            false
        }
    }

    /// Advance both curtains and the content fades, mounting and unmounting content at the
    /// phase boundaries. Returns the main curtain's phase.
    pub fn tick(
        &mut self,
        dt: f64,
        main_surface: &mut dyn RenderSurface,
        detail_surface: &mut dyn RenderSurface,
    ) -> Phase {
        let main_before = self.main.phase();
        let main_after = self.main.tick(dt, main_surface);
        let detail_before = self.detail.phase();
        let detail_after = self.detail.tick(dt, detail_surface);

        self.content.tick(dt);
        self.detail_content.tick(dt);

        match (main_before, main_after) {
            (Phase::Covering, Phase::Covered) => self.content.mount(),
            (Phase::Revealing, Phase::Idle) => {
                if let Some(f) = self.on_close.as_mut() {
                    f();
                }
            }
            _ => {}
        }
        match (detail_before, detail_after) {
            (Phase::Covering, Phase::Covered) => self.detail_content.mount(),
            (Phase::Revealing, Phase::Idle) => self.selected = None,
            _ => {}
        }
        main_after
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/panel.rs"]
mod tests;
