//! Command-line argument parsing.

use clap::Parser;
use tracing::warn;

use crate::params::{PreviewConfig, RenderConfig, Rgb, WaveParameters};
use crate::rendering::DebugView;
use crate::water::MAX_SUBDIVISIONS;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "raging-sea")]
#[command(about = "Animated water surface with live parameter tuning", long_about = None)]
pub struct Args {
    /// Initial window width (logical pixels)
    #[arg(long, value_name = "PX", default_value = "1280")]
    pub width: u32,

    /// Initial window height (logical pixels)
    #[arg(long, value_name = "PX", default_value = "720")]
    pub height: u32,

    /// Water plane subdivisions per side (1 to 2048)
    #[arg(
        long,
        value_name = "N",
        default_value = "512",
        value_parser = clap::value_parser!(u32).range(1..=MAX_SUBDIVISIONS as i64)
    )]
    pub subdivisions: u32,

    /// Color at the troughs (#rrggbb)
    #[arg(long, value_name = "HEX")]
    pub depth_color: Option<Rgb>,

    /// Color at the crests (#rrggbb)
    #[arg(long, value_name = "HEX")]
    pub surface_color: Option<Rgb>,

    /// Big wave amplitude, clamped to [0, 1]
    #[arg(long, value_name = "F", allow_negative_numbers = true)]
    pub big_waves_elevation: Option<f32>,

    /// Small wave depth per octave, clamped to [0, 1]
    #[arg(long, value_name = "F", allow_negative_numbers = true)]
    pub small_waves_elevation: Option<f32>,

    /// Small wave octave count, clamped to [0, 5]
    #[arg(long, value_name = "N")]
    pub small_waves_iterations: Option<u32>,

    /// Render a top-down PNG on the CPU and exit instead of opening a window
    #[arg(long, value_name = "PATH")]
    pub preview: Option<String>,

    /// Preview image size (pixels per side)
    #[arg(long, value_name = "PX", default_value = "512", requires = "preview")]
    pub preview_size: u32,

    /// Time to sample the preview at (seconds)
    #[arg(long, value_name = "S", default_value = "0", requires = "preview")]
    pub preview_time: f32,

    /// Show surface normals in the preview instead of the color gradient
    #[arg(long, requires = "preview")]
    pub preview_normals: bool,
}

impl Args {
    /// Window and mesh configuration
    pub fn render_config(&self) -> RenderConfig {
        let mut config = RenderConfig::default();
        config.window_width = self.width.max(1);
        config.window_height = self.height.max(1);
        config.subdivisions = self.subdivisions.clamp(1, MAX_SUBDIVISIONS);
        config
    }

    /// Defaults with command-line overrides, clamped to the panel ranges
    pub fn wave_parameters(&self) -> WaveParameters {
        let mut params = WaveParameters::default();

        if let Some(color) = self.depth_color {
            params.depth_color = color;
        }
        if let Some(color) = self.surface_color {
            params.surface_color = color;
        }
        if let Some(elevation) = self.big_waves_elevation {
            params.big_waves_elevation = elevation;
        }
        if let Some(elevation) = self.small_waves_elevation {
            params.small_waves_elevation = elevation;
        }
        if let Some(iterations) = self.small_waves_iterations {
            params.small_waves_iterations = iterations;
        }

        let clamped = params.clamped();
        if clamped != params {
            warn!("Some wave parameters were out of range and have been clamped");
        }
        clamped
    }

    /// Create preview configuration if preview mode is enabled
    pub fn preview_config(&self) -> Option<PreviewConfig> {
        self.preview.as_ref().map(|path| {
            let mut config = PreviewConfig::new(path.clone());
            config.size = self.preview_size;
            config.time_s = if self.preview_time.is_finite() {
                self.preview_time.max(0.0)
            } else {
                0.0
            };
            if self.preview_normals {
                config.view = DebugView::Normals;
            }
            config
        })
    }
}
