//! Wave and shading evaluator (CPU reference of `water.wgsl`).
//!
//! Every function is a pure function of a rest position on the plane and the
//! current [`WaveParameters`]. Positions are given as `Vec2(x, z)`.
//!
//! The height is built from two layers:
//! - big waves: two crossed sines, one per horizontal axis
//! - small waves: `|noise|` octaves *subtracted* from the big waves, so the
//!   ripples carve troughs into the swell instead of raising it

use glam::{Vec2, Vec3};

use super::noise::classic_noise;
use crate::params::WaveParameters;

/// Finite-difference step used to rebuild the surface normal (world units)
pub const NEIGHBOUR_OFFSET: f32 = 0.01;

/// Height of the big wave layer at `position`
pub fn big_wave_elevation(params: &WaveParameters, position: Vec2) -> f32 {
    let [freq_x, freq_z] = params.big_waves_frequency;
    let phase = params.elapsed_time * params.big_waves_speed;

    (position.x * freq_x + phase).sin() * (position.y * freq_z + phase).sin() * params.big_waves_elevation
}

/// Total depth carved out by the small wave octaves at `position` (>= 0)
pub fn small_wave_carving(params: &WaveParameters, position: Vec2) -> f32 {
    let z = params.elapsed_time * params.small_waves_speed;

    (1..=params.small_waves_iterations)
        .map(|i| {
            let scaled = position * params.small_waves_frequency * i as f32;
            classic_noise(Vec3::new(scaled.x, scaled.y, z)).abs() * params.small_waves_elevation
        })
        .sum()
}

/// Surface height at `position`
pub fn elevation(params: &WaveParameters, position: Vec2) -> f32 {
    big_wave_elevation(params, position) - small_wave_carving(params, position)
}

/// Move a rest vertex along the up axis by the surface height
pub fn displace(params: &WaveParameters, rest: Vec3) -> Vec3 {
    rest + Vec3::Y * elevation(params, Vec2::new(rest.x, rest.z))
}

/// Unit surface normal at `position`, rebuilt from two displaced neighbours
/// (one step along +X, one along -Z). Always points to +Y.
pub fn surface_normal(params: &WaveParameters, position: Vec2) -> Vec3 {
    let here = Vec3::new(position.x, elevation(params, position), position.y);

    let a = position + Vec2::new(NEIGHBOUR_OFFSET, 0.0);
    let b = position + Vec2::new(0.0, -NEIGHBOUR_OFFSET);
    let neighbour_a = Vec3::new(a.x, elevation(params, a), a.y);
    let neighbour_b = Vec3::new(b.x, elevation(params, b), b.y);

    let to_a = neighbour_a - here;
    let to_b = neighbour_b - here;
    to_a.cross(to_b).normalize()
}

/// Gradient position for a surface height, clamped to [0, 1]
pub fn color_mix(params: &WaveParameters, elevation: f32) -> f32 {
    ((elevation + params.color_offset) * params.color_multiplier).clamp(0.0, 1.0)
}

/// Linear-light surface color for a surface height
pub fn surface_color(params: &WaveParameters, elevation: f32) -> Vec3 {
    let depth = params.depth_color.to_linear();
    let surface = params.surface_color.to_linear();
    let t = color_mix(params, elevation);
    depth * (1.0 - t) + surface * t
}
