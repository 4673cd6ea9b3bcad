//! Orbit controls: rotate around, pan and dolly toward a target point.
//!
//! Input gestures only accumulate pending motion; [`OrbitControls::update`]
//! applies it to a [`Camera`] once per frame. With damping enabled each
//! update applies `damping_factor` of the pending rotation and pan and
//! keeps the rest, which decays geometrically and gives the camera
//! inertia after the pointer is released.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use super::core::Camera;
use crate::options::ControlsOptions;

/// Polar angles are kept this far away from the poles so the view
/// direction never becomes parallel to `up`.
const POLE_EPSILON: f32 = 1e-6;

/// Base multiplier of one dolly step (`0.95` per 100 wheel pixels).
const ZOOM_BASE: f32 = 0.95;

/// Radius, azimuth (`theta`, around +Y from +Z) and polar angle (`phi`,
/// from +Y) of an offset vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let ring = self.phi.sin() * self.radius;
        Vec3::new(
            ring * self.theta.sin(),
            self.phi.cos() * self.radius,
            ring * self.theta.cos(),
        )
    }
}

/// Camera orbit controller with optional inertia.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Point the camera orbits around and looks at.
    pub target: Vec3,
    enable_damping: bool,
    damping_factor: f32,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,

    pending: Spherical,
    pan_offset: Vec3,
    scale: f32,

    saved_target: Vec3,
    saved_eye: Vec3,
}

impl OrbitControls {
    /// Controls orbiting around the camera's current target.
    #[must_use]
    pub fn new(camera: &Camera, options: &ControlsOptions) -> Self {
        let mut controls = Self {
            target: camera.target,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            pending: Spherical::default(),
            pan_offset: Vec3::ZERO,
            scale: 1.0,
            saved_target: camera.target,
            saved_eye: camera.eye,
        };
        controls.apply_options(options);
        controls
    }

    /// Adopt new tuning parameters. Pending motion is kept.
    pub fn apply_options(&mut self, options: &ControlsOptions) {
        self.enable_damping = options.enable_damping;
        self.damping_factor = options.damping_factor.clamp(0.0, 1.0);
        self.rotate_speed = options.rotate_speed;
        self.pan_speed = options.pan_speed;
        self.zoom_speed = options.zoom_speed;
        self.min_distance = options.min_distance.max(0.0);
        self.max_distance = options.max_distance.max(self.min_distance);
    }

    /// Queue a rotation for a pointer drag of `delta` pixels on a viewport
    /// `viewport_height` pixels tall. A drag across the full height turns
    /// the camera once around the target.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        self.pending.theta -= TAU * delta.x / height * self.rotate_speed;
        self.pending.phi -= TAU * delta.y / height * self.rotate_speed;
    }

    /// Queue a pan for a pointer drag of `delta` pixels. The scene point
    /// under the target follows the pointer.
    pub fn pan(&mut self, delta: Vec2, viewport_height: f32, camera: &Camera) {
        let height = viewport_height.max(1.0);
        let half_fov = (camera.fovy.to_radians() / 2.0).tan();
        let target_distance = (camera.eye - self.target).length() * half_fov;
        let (right, up) = camera.right_and_up();
        let scale = 2.0 * target_distance / height * self.pan_speed;
        self.pan_offset += -right * (delta.x * scale) + up * (delta.y * scale);
    }

    /// Queue a dolly for a wheel movement of `delta_y` pixels. Negative
    /// values (wheel forward) move the camera toward the target.
    pub fn dolly(&mut self, delta_y: f32) {
        if delta_y == 0.0 {
            return;
        }
        let step = ZOOM_BASE.powf(self.zoom_speed * (delta_y * 0.01).abs());
        if delta_y < 0.0 {
            self.scale *= step;
        } else {
            self.scale /= step;
        }
    }

    /// Apply pending motion to `camera`. Returns `true` if the camera moved.
    ///
    /// Call once per frame; with damping enabled the camera keeps gliding
    /// for a while after input stops.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let factor = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        let mut spherical = Spherical::from_offset(camera.eye - self.target);
        spherical.theta += self.pending.theta * factor;
        spherical.phi = (spherical.phi + self.pending.phi * factor)
            .clamp(POLE_EPSILON, std::f32::consts::PI - POLE_EPSILON);
        spherical.radius = (spherical.radius * self.scale)
            .clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * factor;

        let eye = self.target + spherical.to_offset();
        let moved = eye.distance_squared(camera.eye) > f32::EPSILON
            || camera.target != self.target;
        camera.eye = eye;
        camera.target = self.target;

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.pending.theta *= keep;
            self.pending.phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.pending = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        moved
    }

    /// Replace the pose [`reset`](Self::reset) returns to. Returns `false`
    /// if it already was `eye` looking at `target`.
    pub fn set_home(&mut self, eye: Vec3, target: Vec3) -> bool {
        if self.saved_eye == eye && self.saved_target == target {
            return false;
        }
        self.saved_eye = eye;
        self.saved_target = target;
        true
    }

    /// Drop pending motion and put the camera back at its home pose (where
    /// the controls were created, unless [`set_home`](Self::set_home)
    /// moved it).
    pub fn reset(&mut self, camera: &mut Camera) {
        self.target = self.saved_target;
        self.pending = Spherical::default();
        self.pan_offset = Vec3::ZERO;
        self.scale = 1.0;
        camera.eye = self.saved_eye;
        camera.target = self.saved_target;
    }

    /// Whether rotation or pan is still pending.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.pending.theta.abs() > 1e-6
            || self.pending.phi.abs() > 1e-6
            || self.pan_offset.length_squared() > 1e-12
            || self.scale != 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CameraOptions;

    fn setup(damping: bool) -> (Camera, OrbitControls) {
        let camera = Camera::from_options(&CameraOptions::default(), 1.0);
        let options = ControlsOptions {
            enable_damping: damping,
            ..ControlsOptions::default()
        };
        let controls = OrbitControls::new(&camera, &options);
        (camera, controls)
    }

    fn azimuth(camera: &Camera) -> f32 {
        Spherical::from_offset(camera.eye - camera.target).theta
    }

    #[test]
    fn spherical_round_trips() {
        let offset = Vec3::new(3.0, -4.0, 12.0);
        let back = Spherical::from_offset(offset).to_offset();
        assert!((back - offset).length() < 1e-5);
    }

    #[test]
    fn damped_rotation_converges_to_the_requested_angle() {
        let (mut camera, mut controls) = setup(true);
        let start_distance = camera.eye.length();
        // a quarter of the viewport height is a quarter turn
        controls.rotate(Vec2::new(-100.0, 0.0), 400.0);

        assert!(controls.update(&mut camera));
        let first = azimuth(&camera);
        assert!((first - 0.05 * std::f32::consts::FRAC_PI_2).abs() < 1e-4);

        for _ in 0..600 {
            let _ = controls.update(&mut camera);
        }
        assert!((azimuth(&camera) - std::f32::consts::FRAC_PI_2).abs() < 1e-3);
        assert!((camera.eye.length() - start_distance).abs() < 1e-3);
        assert!(!controls.is_moving());
    }

    #[test]
    fn undamped_rotation_applies_at_once() {
        let (mut camera, mut controls) = setup(false);
        controls.rotate(Vec2::new(-100.0, 0.0), 400.0);
        assert!(controls.update(&mut camera));
        assert!((azimuth(&camera) - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn polar_angle_stays_off_the_pole() {
        let (mut camera, mut controls) = setup(false);
        controls.rotate(Vec2::new(0.0, 10_000.0), 100.0);
        let _ = controls.update(&mut camera);
        let offset = camera.eye - camera.target;
        assert!(offset.y > 0.0);
        assert!((offset.length() - 25.5).abs() < 0.01);
        assert!(camera.view_matrix().is_finite());
    }

    #[test]
    fn dolly_scales_distance_within_limits() {
        let (mut camera, mut controls) = setup(false);
        let before = camera.eye.length();
        controls.dolly(-100.0);
        let _ = controls.update(&mut camera);
        assert!((camera.eye.length() - before * 0.95).abs() < 1e-3);

        for _ in 0..500 {
            controls.dolly(-1000.0);
            let _ = controls.update(&mut camera);
        }
        assert!((camera.eye.length() - 0.5).abs() < 1e-4);

        for _ in 0..500 {
            controls.dolly(1000.0);
            let _ = controls.update(&mut camera);
        }
        assert!((camera.eye.length() - 500.0).abs() < 1e-2);
    }

    #[test]
    fn pan_moves_target_and_eye_together() {
        let (mut camera, mut controls) = setup(false);
        let offset = camera.eye - camera.target;
        controls.pan(Vec2::new(50.0, 0.0), 500.0, &camera);
        let _ = controls.update(&mut camera);
        assert!(camera.target.x < 0.0);
        assert!(camera.target.y.abs() < 1e-5);
        assert!(((camera.eye - camera.target) - offset).length() < 1e-4);
    }

    #[test]
    fn reset_restores_initial_view() {
        let (mut camera, mut controls) = setup(true);
        controls.rotate(Vec2::new(40.0, 25.0), 300.0);
        controls.pan(Vec2::new(10.0, 10.0), 300.0, &camera);
        for _ in 0..20 {
            let _ = controls.update(&mut camera);
        }
        controls.reset(&mut camera);
        assert_eq!(camera.eye, Vec3::new(0.0, 5.0, 25.0));
        assert_eq!(camera.target, Vec3::ZERO);
        assert!(!controls.is_moving());
    }
}
