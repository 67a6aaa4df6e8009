//! Orbit camera configuration.

/// Orbit camera parameters (perspective lens + damped orbit controls)
#[derive(Debug, Clone)]
pub struct OrbitParams {
    /// Initial eye position (world units)
    pub position: [f32; 3],

    /// Orbit pivot (world units)
    pub target: [f32; 3],

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Fraction of the pending orbit applied per frame (0 = frozen, 1 = no inertia)
    pub damping_factor: f32,

    /// Orbit speed multiplier (one full viewport-height drag = one full turn)
    pub rotate_speed: f32,

    /// Zoom speed multiplier (per scroll line)
    pub zoom_speed: f32,

    /// Closest allowed distance to the target
    pub min_distance: f32,

    /// Farthest allowed distance to the target
    pub max_distance: f32,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            position: [1.0, 1.0, 1.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 100.0,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.2,
            max_distance: 20.0,
        }
    }
}
