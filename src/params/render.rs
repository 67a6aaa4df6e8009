//! Window, mesh and offline preview configuration.

use crate::rendering::DebugView;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Initial window width (logical pixels)
    pub window_width: u32,

    /// Initial window height (logical pixels)
    pub window_height: u32,

    /// Upper bound on the device pixel ratio used for the scene target.
    /// Caps fragment shading cost on high-density displays.
    pub max_pixel_ratio: f64,

    /// Side length of the water plane (world units)
    pub plane_size: f32,

    /// Grid subdivisions per side (512 = 263,169 vertices)
    pub subdivisions: u32,

    /// Background clear color (linear RGB)
    pub clear_color: [f64; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            max_pixel_ratio: 2.0,
            plane_size: 2.0,
            subdivisions: 512,
            clear_color: [0.0, 0.0, 0.0],
        }
    }
}

/// Offline preview configuration (CPU render of the surface to a PNG)
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Output file path
    pub output_path: String,

    /// Image size in pixels (width = height)
    pub size: u32,

    /// Time to sample the surface at (seconds)
    pub time_s: f32,

    /// Shade with the color gradient or show normals
    pub view: DebugView,
}

impl PreviewConfig {
    pub fn new(output_path: impl Into<String>) -> Self {
        Self {
            output_path: output_path.into(),
            size: 512,
            time_s: 0.0,
            view: DebugView::Gradient,
        }
    }
}
