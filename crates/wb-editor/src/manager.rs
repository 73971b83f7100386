//! Surface manager: sizing, density scaling, and background.

use wb_core::background::{BackgroundStyle, render_background};
use wb_core::metrics::SurfaceMetrics;
use wb_core::model::Background;
use wb_core::surface::Surface;

#[derive(Debug, Clone, Default)]
pub struct SurfaceManager {
    metrics: SurfaceMetrics,
    style: BackgroundStyle,
}

impl SurfaceManager {
    pub fn new(style: BackgroundStyle) -> Self {
        Self {
            metrics: SurfaceMetrics::default(),
            style,
        }
    }

    pub fn metrics(&self) -> &SurfaceMetrics {
        &self.metrics
    }

    pub fn style(&self) -> &BackgroundStyle {
        &self.style
    }

    /// Apply a new container size.
    ///
    /// Backing resolution becomes `floor(layout × density)`, the context is
    /// scaled by `density` so drawing stays in logical units, and the surface
    /// is repainted white with `background` on top. The host is responsible
    /// for setting the displayed (CSS) size to
    /// [`SurfaceMetrics::display_size`].
    pub fn resize<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        width: f64,
        height: f64,
        density: f64,
        background: Background,
    ) -> SurfaceMetrics {
        self.metrics = SurfaceMetrics::from_layout(width, height, density);
        log::debug!(
            "surface resize: layout {width}x{height} @{} -> backing {}x{}",
            self.metrics.density,
            self.metrics.backing_width,
            self.metrics.backing_height
        );
        surface.resize_backing(self.metrics.backing_width, self.metrics.backing_height);
        surface.set_scale(self.metrics.density);
        self.redraw_background(surface, background);
        self.metrics
    }

    /// Wipe the whole logical area and redraw `background`.
    pub fn redraw_background<S: Surface + ?Sized>(&self, surface: &mut S, background: Background) {
        let (w, h) = self.metrics.logical_size();
        render_background(surface, background, w, h, &self.style);
    }
}
