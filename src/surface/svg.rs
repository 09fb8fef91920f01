use std::fmt::Write as _;

use crate::{curtain::state::LAYERS, foundation::core::Canvas, surface::RenderSurface};

/// In-memory stand-in for an `<svg>` with two `<path>` children.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgSurface {
    fills: [String; LAYERS],
    attached: [bool; LAYERS],
    paths: [Option<String>; LAYERS],
}

impl SvgSurface {
    /// Both layers attached.
    pub fn new(fills: [String; LAYERS]) -> Self {
        Self {
            fills,
            attached: [true; LAYERS],
            paths: Default::default(),
        }
    }

    /// No layer attached yet; writes are skipped until [`SvgSurface::attach`].
    pub fn detached(fills: [String; LAYERS]) -> Self {
        Self {
            attached: [false; LAYERS],
            ..Self::new(fills)
        }
    }

    /// Out-of-range layers are ignored.
    pub fn attach(&mut self, layer: usize) {
        if let Some(slot) = self.attached.get_mut(layer) {
            *slot = true;
        }
    }

    pub fn detach(&mut self, layer: usize) {
        if let Some(slot) = self.attached.get_mut(layer) {
            *slot = false;
        }
    }

    /// Last geometry written to `layer`. `None` for unwritten or out-of-range layers.
    pub fn path(&self, layer: usize) -> Option<&str> {
        self.paths.get(layer).and_then(Option::as_deref)
    }

    pub fn fills(&self) -> &[String; LAYERS] {
        &self.fills
    }

    /// Standalone SVG document sized to `canvas`, stretching the 0..100 view box.
    pub fn to_svg_document(&self, canvas: Canvas) -> String {
        let mut out = String::with_capacity(512);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 100 100" preserveAspectRatio="none">"#,
            canvas.width, canvas.height
        );
        for (d, fill) in self.paths.iter().zip(&self.fills) {
            if let Some(d) = d {
                let _ = write!(out, r#"<path d="{d}" fill="{fill}"/>"#);
            }
        }
        out.push_str("</svg>");
        out
    }
}

impl RenderSurface for SvgSurface {
    fn is_attached(&self, layer: usize) -> bool {
        self.attached.get(layer).copied().unwrap_or(false)
    }

    fn set_path(&mut self, layer: usize, d: &str) {
        let Some(path) = self.paths.get_mut(layer) else {
            return;
        };
        let slot = path.get_or_insert_with(String::new);
        slot.clear();
        slot.push_str(d);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/svg.rs"]
mod tests;
