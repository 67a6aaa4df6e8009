//! Offline preview: a top-down CPU render of the water surface to a PNG.
//!
//! Uses the same evaluator the shader mirrors, so a parameter set can be
//! inspected without a window or a GPU.

use std::path::Path;

use glam::{Vec2, Vec3};
use image::RgbImage;
use thiserror::Error;
use tracing::info;

use crate::params::{PreviewConfig, Rgb, WaveParameters};
use crate::rendering::DebugView;
use crate::water::waves;

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("preview size must be at least 1 pixel")]
    EmptyImage,

    #[error("failed to write preview image: {0}")]
    Image(#[from] image::ImageError),
}

/// Render the surface as seen from straight above.
///
/// Pixel (0, 0) is the corner at (-plane/2, -plane/2); +X runs right and +Z
/// runs down the image. Pixel centres sit on an evenly spaced grid covering
/// the whole plane, edges included.
pub fn preview_image(
    params: &WaveParameters,
    plane_size: f32,
    size: u32,
    view: DebugView,
) -> Result<RgbImage, PreviewError> {
    if size == 0 {
        return Err(PreviewError::EmptyImage);
    }

    let half = plane_size * 0.5;
    let step = if size > 1 {
        plane_size / (size - 1) as f32
    } else {
        0.0
    };

    Ok(RgbImage::from_fn(size, size, |px, py| {
        let position = Vec2::new(-half + px as f32 * step, -half + py as f32 * step);
        let color = match view {
            DebugView::Gradient => {
                let h = waves::elevation(params, position);
                Rgb::from_linear(waves::surface_color(params, h))
            }
            DebugView::Normals => {
                let n = waves::surface_normal(params, position);
                Rgb::from_array((n * 0.5 + Vec3::splat(0.5)).to_array())
            }
        };
        image::Rgb(to_rgb8(color))
    }))
}

/// Render and save the preview described by `config`
pub fn write_preview(
    params: &WaveParameters,
    plane_size: f32,
    config: &PreviewConfig,
) -> Result<(), PreviewError> {
    let sampled = WaveParameters {
        elapsed_time: config.time_s,
        ..params.clone()
    };

    let img = preview_image(&sampled, plane_size, config.size, config.view)?;
    img.save(Path::new(&config.output_path))?;

    info!(
        path = %config.output_path,
        size = config.size,
        time_s = config.time_s,
        "Preview written"
    );
    Ok(())
}

fn to_rgb8(color: Rgb) -> [u8; 3] {
    color
        .to_array()
        .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}
