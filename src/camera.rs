//! Perspective camera with damped orbit controls.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec3};

use crate::params::OrbitParams;

/// Keeps the polar angle away from the poles so `look_at` never degenerates
const POLAR_EPSILON: f32 = 1e-4;

/// Base zoom ratio per scroll line
const ZOOM_STEP: f32 = 0.95;

/// Orbit camera circling a target point.
///
/// Input accumulates into pending spherical deltas; every [`update`](Self::update)
/// applies `damping_factor` of what is pending and keeps the rest, so motion
/// eases out after the mouse is released.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    params: OrbitParams,
    target: Vec3,
    radius: f32,
    /// Azimuth around +Y, measured from +Z towards +X (radians)
    theta: f32,
    /// Polar angle from +Y (radians)
    phi: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
    aspect: f32,
}

impl OrbitCamera {
    /// Create camera from its parameters and the initial viewport aspect ratio
    pub fn new(params: OrbitParams, aspect: f32) -> Self {
        let target = Vec3::from_array(params.target);
        let offset = Vec3::from_array(params.position) - target;
        let radius = offset.length().max(f32::EPSILON);

        let theta = offset.x.atan2(offset.z);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        Self {
            target,
            radius: radius.clamp(params.min_distance, params.max_distance),
            theta,
            phi: phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON),
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            aspect: sanitize_aspect(aspect),
            params,
        }
    }

    /// Queue an orbit from a pointer drag.
    ///
    /// # Arguments
    /// * `dx_px`, `dy_px` - Pointer movement in pixels
    /// * `viewport_height_px` - Height of the viewport the drag happened in
    pub fn rotate(&mut self, dx_px: f32, dy_px: f32, viewport_height_px: f32) {
        if viewport_height_px <= 0.0 {
            return;
        }
        let scale = TAU / viewport_height_px * self.params.rotate_speed;
        self.pending_theta -= dx_px * scale;
        self.pending_phi -= dy_px * scale;
    }

    /// Queue a zoom; positive `lines` moves towards the target
    pub fn zoom(&mut self, lines: f32) {
        if lines.is_finite() {
            self.pending_scale *= ZOOM_STEP.powf(self.params.zoom_speed * lines);
        }
    }

    /// Advance damped motion by one frame. Returns true while still moving.
    pub fn update(&mut self) -> bool {
        let damping = self.params.damping_factor.clamp(f32::EPSILON, 1.0);

        self.theta = (self.theta + self.pending_theta * damping).rem_euclid(TAU);
        self.phi = (self.phi + self.pending_phi * damping).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.radius = (self.radius * self.pending_scale)
            .clamp(self.params.min_distance, self.params.max_distance);

        self.pending_theta *= 1.0 - damping;
        self.pending_phi *= 1.0 - damping;
        self.pending_scale = 1.0;

        const SETTLED: f32 = 1e-6;
        self.pending_theta.abs() > SETTLED || self.pending_phi.abs() > SETTLED
    }

    /// Update the projection after a viewport resize
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = sanitize_aspect(aspect);
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    /// Current eye position
    pub fn eye(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target + self.radius * Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn view_proj(&self) -> (Mat4, Vec3) {
        let eye = self.eye();

        // Y is always up (the orbit never rolls)
        let view = Mat4::look_at_rh(eye, self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            self.params.fov_degrees.to_radians(),
            self.aspect,
            self.params.near_plane,
            self.params.far_plane,
        );

        (proj * view, eye)
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(camera: &mut OrbitCamera) {
        for _ in 0..1000 {
            camera.update();
        }
    }

    #[test]
    fn test_initial_eye_matches_params() {
        let camera = OrbitCamera::new(OrbitParams::default(), 16.0 / 9.0);
        let eye = camera.eye();

        assert!((eye - Vec3::ONE).length() < 1e-5, "eye = {eye}");
        assert!((camera.distance() - 3.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_update_without_input_is_stationary() {
        let mut camera = OrbitCamera::new(OrbitParams::default(), 1.0);
        let before = camera.eye();

        assert!(!camera.update());
        assert!((camera.eye() - before).length() < 1e-6);
    }

    #[test]
    fn test_damped_rotation_eases_out() {
        let mut camera = OrbitCamera::new(OrbitParams::default(), 1.0);
        let start_theta = camera.theta;

        // Drag a quarter of the viewport height: a quarter turn
        camera.rotate(-250.0, 0.0, 1000.0);

        // First frame only applies the damping fraction
        assert!(camera.update());
        let first_step = camera.theta - start_theta;
        assert!((first_step - 0.05 * TAU / 4.0).abs() < 1e-5);

        settle(&mut camera);
        let total = (camera.theta - start_theta).rem_euclid(TAU);
        assert!((total - TAU / 4.0).abs() < 1e-3, "total = {total}");
        assert!(!camera.update());
    }

    #[test]
    fn test_no_damping_moves_immediately() {
        let params = OrbitParams {
            damping_factor: 1.0,
            ..OrbitParams::default()
        };
        let mut camera = OrbitCamera::new(params, 1.0);
        let start_theta = camera.theta;

        camera.rotate(-100.0, 0.0, 400.0);
        assert!(!camera.update());
        assert!(((camera.theta - start_theta) - TAU / 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_polar_angle_is_clamped() {
        let mut camera = OrbitCamera::new(OrbitParams::default(), 1.0);

        // Drag far upwards and downwards
        camera.rotate(0.0, 10_000.0, 100.0);
        settle(&mut camera);
        assert!(camera.phi >= POLAR_EPSILON);
        assert!(camera.eye().is_finite());

        camera.rotate(0.0, -20_000.0, 100.0);
        settle(&mut camera);
        assert!(camera.phi <= PI - POLAR_EPSILON);
        assert!(camera.eye().is_finite());
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = OrbitCamera::new(OrbitParams::default(), 1.0);
        let start = camera.distance();

        camera.zoom(1.0);
        camera.update();
        assert!(camera.distance() < start);

        camera.zoom(500.0);
        camera.update();
        assert_eq!(camera.distance(), OrbitParams::default().min_distance);

        camera.zoom(-500.0);
        camera.update();
        assert_eq!(camera.distance(), OrbitParams::default().max_distance);
    }

    #[test]
    fn test_aspect_follows_resize() {
        let mut camera = OrbitCamera::new(OrbitParams::default(), 800.0 / 600.0);
        camera.set_aspect(1920.0 / 1080.0);
        assert_eq!(camera.aspect(), 1920.0 / 1080.0);

        camera.set_aspect(f32::NAN);
        assert_eq!(camera.aspect(), 1.0);
    }

    #[test]
    fn test_view_proj_matrix_generation() {
        let camera = OrbitCamera::new(OrbitParams::default(), 16.0 / 9.0);
        let (view_proj, eye) = camera.view_proj();

        // Matrix should not be identity or zero
        assert_ne!(view_proj, Mat4::IDENTITY);
        assert_ne!(view_proj, Mat4::ZERO);
        assert!(eye.is_finite());

        // The target projects to the centre of the screen
        let clip = view_proj * camera.target().extend(1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }
}
