//! Viewport size and pixel density bookkeeping.

/// Window size and device pixel ratio as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Window size in physical pixels (what the surface is configured with)
    pub physical_width: u32,
    pub physical_height: u32,

    /// System device pixel ratio (physical / logical pixels)
    pub scale_factor: f64,

    /// Upper bound applied to `scale_factor` for the scene render target
    pub max_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(physical_width: u32, physical_height: u32, scale_factor: f64, max_pixel_ratio: f64) -> Self {
        Self {
            physical_width,
            physical_height,
            scale_factor: sanitize_scale(scale_factor),
            max_pixel_ratio,
        }
    }

    /// Apply a window resize (physical pixels)
    pub fn resize(&mut self, physical_width: u32, physical_height: u32) {
        self.physical_width = physical_width;
        self.physical_height = physical_height;
    }

    /// Apply a change of the system pixel ratio (monitor switch, zoom)
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = sanitize_scale(scale_factor);
    }

    /// Window size in logical pixels
    pub fn logical_size(&self) -> (f64, f64) {
        (
            self.physical_width as f64 / self.scale_factor,
            self.physical_height as f64 / self.scale_factor,
        )
    }

    /// Camera aspect ratio (logical width / logical height)
    pub fn aspect_ratio(&self) -> f32 {
        if self.physical_height == 0 {
            return 1.0;
        }
        // The scale factor cancels out; physical sizes keep the ratio exact
        self.physical_width as f32 / self.physical_height as f32
    }

    /// Pixel ratio used for the scene target: `min(system ratio, cap)`
    pub fn pixel_ratio(&self) -> f64 {
        self.scale_factor.min(self.max_pixel_ratio)
    }

    /// Scene render target size in pixels, never zero
    pub fn render_size(&self) -> (u32, u32) {
        let (width, height) = self.logical_size();
        let ratio = self.pixel_ratio();
        (
            ((width * ratio).round() as u32).max(1),
            ((height * ratio).round() as u32).max(1),
        )
    }

    /// Whether the window has a drawable area (minimized windows report 0x0)
    pub fn is_drawable(&self) -> bool {
        self.physical_width > 0 && self.physical_height > 0
    }
}

fn sanitize_scale(scale_factor: f64) -> f64 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    }
}
