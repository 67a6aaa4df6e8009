//! Parameter definitions with units, ranges and documented semantics.
//!
//! All magic numbers live here with:
//! - Their default values
//! - Documented ranges and meanings
//! - Type safety where possible (colors, iteration counts)

mod camera;
mod render;
mod water;

// Re-export all types
pub use camera::OrbitParams;
pub use render::{PreviewConfig, RenderConfig};
pub use water::{ranges, ColorParseError, Rgb, WaveParameters};
