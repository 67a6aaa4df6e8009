//! Water surface parameters: wave layers, color gradient and their ranges.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use thiserror::Error;

/// Declared ranges for every numeric field of [`WaveParameters`].
///
/// The panel bindings and the CLI overrides both clamp against these, so
/// the evaluator never sees an out-of-range value.
pub mod ranges {
    use std::ops::RangeInclusive;

    /// Big wave amplitude (world units)
    pub const BIG_WAVES_ELEVATION: RangeInclusive<f32> = 0.0..=1.0;

    /// Big wave spatial frequency, per axis (radians per world unit)
    pub const BIG_WAVES_FREQUENCY: RangeInclusive<f32> = 0.0..=10.0;

    /// Big wave temporal speed (radians per second)
    pub const BIG_WAVES_SPEED: RangeInclusive<f32> = 0.0..=10.0;

    /// Amplitude carved out by each small wave octave (world units)
    pub const SMALL_WAVES_ELEVATION: RangeInclusive<f32> = 0.0..=1.0;

    /// Base frequency of the small wave noise (lattice cells per world unit)
    pub const SMALL_WAVES_FREQUENCY: RangeInclusive<f32> = 0.0..=30.0;

    /// Small wave noise scroll speed (lattice cells per second)
    pub const SMALL_WAVES_SPEED: RangeInclusive<f32> = 0.0..=10.0;

    /// Number of noise octaves
    pub const SMALL_WAVES_ITERATIONS: RangeInclusive<u32> = 0..=5;

    /// Gradient bias added to the elevation
    pub const COLOR_OFFSET: RangeInclusive<f32> = 0.0..=1.0;

    /// Gradient contrast
    pub const COLOR_MULTIPLIER: RangeInclusive<f32> = 0.0..=10.0;

    /// Clamp `value` into `range`. NaN maps to the lower bound.
    pub fn clamp(value: f32, range: &RangeInclusive<f32>) -> f32 {
        if value.is_nan() {
            return *range.start();
        }
        value.clamp(*range.start(), *range.end())
    }
}

/// Error returned when a `#rrggbb` color string cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color must look like #rrggbb, got {0:?}")]
    Format(String),

    #[error("invalid hex digits in color {0:?}")]
    Digits(String),
}

/// Display-space (sRGB encoded) color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorParseError::Format(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| ColorParseError::Digits(hex.to_string()))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Format as lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_array().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Build from a color picker value, clamping every channel to [0, 1]
    pub fn from_array(rgb: [f32; 3]) -> Self {
        let [r, g, b] = rgb.map(|c| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) });
        Self { r, g, b }
    }

    /// Decode to linear light for shading
    pub fn to_linear(self) -> Vec3 {
        Vec3::new(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        )
    }

    /// Encode a linear-light color back to display space
    pub fn from_linear(linear: Vec3) -> Self {
        Self::from_array([
            linear_to_srgb(linear.x),
            linear_to_srgb(linear.y),
            linear_to_srgb(linear.z),
        ])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Water shading parameters (the shader's uniform set)
#[derive(Debug, Clone, PartialEq)]
pub struct WaveParameters {
    /// Seconds since the render loop started, written once per frame
    pub elapsed_time: f32,

    // === Big waves (two crossed sines) ===
    /// Big wave amplitude (world units)
    pub big_waves_elevation: f32,

    /// Spatial frequency along X and Z
    pub big_waves_frequency: [f32; 2],

    /// Temporal speed shared by both axes
    pub big_waves_speed: f32,

    // === Small waves (noise octaves carved into the big waves) ===
    /// Depth carved by each octave (world units)
    pub small_waves_elevation: f32,

    /// Base noise frequency, multiplied by the octave index
    pub small_waves_frequency: f32,

    /// Noise scroll speed along the time axis
    pub small_waves_speed: f32,

    /// Octave count, 0 disables the small wave layer
    pub small_waves_iterations: u32,

    // === Color gradient ===
    /// Color at the troughs
    pub depth_color: Rgb,

    /// Color at the crests
    pub surface_color: Rgb,

    /// Shifts the gradient up or down
    pub color_offset: f32,

    /// Sharpens the gradient
    pub color_multiplier: f32,
}

impl Default for WaveParameters {
    fn default() -> Self {
        Self {
            elapsed_time: 0.0,

            big_waves_elevation: 0.2,
            big_waves_frequency: [4.0, 1.5],
            big_waves_speed: 0.75,

            small_waves_elevation: 0.15,
            small_waves_frequency: 3.0,
            small_waves_speed: 0.2,
            small_waves_iterations: 4,

            depth_color: Rgb::new(14.0 / 255.0, 101.0 / 255.0, 144.0 / 255.0), // #0e6590
            surface_color: Rgb::new(52.0 / 255.0, 160.0 / 255.0, 213.0 / 255.0), // #34a0d5

            color_offset: 0.2,
            color_multiplier: 7.0,
        }
    }
}

impl WaveParameters {
    /// Return a copy with every numeric field clamped into its declared range
    pub fn clamped(&self) -> Self {
        let [fx, fz] = self.big_waves_frequency;
        Self {
            elapsed_time: if self.elapsed_time.is_finite() {
                self.elapsed_time.max(0.0)
            } else {
                0.0
            },
            big_waves_elevation: ranges::clamp(self.big_waves_elevation, &ranges::BIG_WAVES_ELEVATION),
            big_waves_frequency: [
                ranges::clamp(fx, &ranges::BIG_WAVES_FREQUENCY),
                ranges::clamp(fz, &ranges::BIG_WAVES_FREQUENCY),
            ],
            big_waves_speed: ranges::clamp(self.big_waves_speed, &ranges::BIG_WAVES_SPEED),
            small_waves_elevation: ranges::clamp(
                self.small_waves_elevation,
                &ranges::SMALL_WAVES_ELEVATION,
            ),
            small_waves_frequency: ranges::clamp(
                self.small_waves_frequency,
                &ranges::SMALL_WAVES_FREQUENCY,
            ),
            small_waves_speed: ranges::clamp(self.small_waves_speed, &ranges::SMALL_WAVES_SPEED),
            small_waves_iterations: self.small_waves_iterations.clamp(
                *ranges::SMALL_WAVES_ITERATIONS.start(),
                *ranges::SMALL_WAVES_ITERATIONS.end(),
            ),
            depth_color: Rgb::from_array(self.depth_color.to_array()),
            surface_color: Rgb::from_array(self.surface_color.to_array()),
            color_offset: ranges::clamp(self.color_offset, &ranges::COLOR_OFFSET),
            color_multiplier: ranges::clamp(self.color_multiplier, &ranges::COLOR_MULTIPLIER),
        }
    }

    /// Reset every tunable field to its default, keeping the clock running
    pub fn reset_tunables(&mut self) {
        *self = Self {
            elapsed_time: self.elapsed_time,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_range() {
        let params = WaveParameters::default();
        assert_eq!(params.clamped(), params);
    }

    #[test]
    fn test_default_colors_match_hex() {
        let params = WaveParameters::default();
        assert_eq!(params.depth_color.to_hex(), "#0e6590");
        assert_eq!(params.surface_color.to_hex(), "#34a0d5");
    }

    #[test]
    fn test_clamped_pulls_fields_into_range() {
        let params = WaveParameters {
            big_waves_elevation: 3.0,
            big_waves_frequency: [-1.0, 42.0],
            small_waves_frequency: f32::NAN,
            small_waves_iterations: 12,
            color_multiplier: -5.0,
            ..WaveParameters::default()
        }
        .clamped();

        assert_eq!(params.big_waves_elevation, 1.0);
        assert_eq!(params.big_waves_frequency, [0.0, 10.0]);
        assert_eq!(params.small_waves_frequency, 0.0);
        assert_eq!(params.small_waves_iterations, 5);
        assert_eq!(params.color_multiplier, 0.0);
    }

    #[test]
    fn test_reset_keeps_elapsed_time() {
        let mut params = WaveParameters {
            elapsed_time: 12.5,
            big_waves_speed: 9.0,
            ..WaveParameters::default()
        };
        params.reset_tunables();

        assert_eq!(params.elapsed_time, 12.5);
        assert_eq!(params.big_waves_speed, 0.75);
    }

    #[test]
    fn test_hex_parsing() {
        let color: Rgb = "#ff8000".parse().unwrap();
        assert_eq!(color, Rgb::new(1.0, 128.0 / 255.0, 0.0));
        assert_eq!(Rgb::from_hex("34a0d5").unwrap().to_hex(), "#34a0d5");

        assert!(matches!(Rgb::from_hex("#fff"), Err(ColorParseError::Format(_))));
        assert!(matches!(Rgb::from_hex("#gg0000"), Err(ColorParseError::Digits(_))));
        // Exactly one optional leading '#'
        assert!(matches!(Rgb::from_hex("##0e6590"), Err(ColorParseError::Format(_))));
        assert!("##34a0d5".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_linear_round_trip_is_close() {
        let color = WaveParameters::default().surface_color;
        let back = Rgb::from_linear(color.to_linear());

        for (a, b) in color.to_array().iter().zip(back.to_array()) {
            assert!((a - b).abs() < 1e-5, "{a} vs {b}");
        }
    }

    #[test]
    fn test_linear_endpoints() {
        assert_eq!(Rgb::BLACK.to_linear(), Vec3::ZERO);
        let white = Rgb::new(1.0, 1.0, 1.0).to_linear();
        assert!((white - Vec3::ONE).abs().max_element() < 1e-6);
    }
}
