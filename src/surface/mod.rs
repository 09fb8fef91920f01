pub(crate) mod raster;
pub(crate) mod svg;

/// Where a curtain writes its two path geometries every tick.
///
/// Layer 0 is painted first. A layer whose target is not attached yet is skipped for that tick
/// and picked up again on the next one.
pub trait RenderSurface {
    fn is_attached(&self, _layer: usize) -> bool {
        true
    }

    fn set_path(&mut self, layer: usize, d: &str);
}
