use glam::{Vec2, Vec3};

use crate::camera::controls::OrbitControls;
use crate::camera::core::Camera;
use crate::options::{CameraOptions, ControlsOptions};

/// The perspective camera and the orbit controls steering it.
#[derive(Debug, Clone)]
pub struct CameraController {
    /// The perspective camera.
    pub camera: Camera,
    /// Orbit controls steering [`Self::camera`].
    pub controls: OrbitControls,
}

impl CameraController {
    /// Camera placed per `camera_options`, controls tuned per
    /// `controls_options`.
    #[must_use]
    pub fn new(
        camera_options: &CameraOptions,
        controls_options: &ControlsOptions,
        aspect: f32,
    ) -> Self {
        let camera = Camera::from_options(camera_options, aspect);
        let controls = OrbitControls::new(&camera, controls_options);
        Self { camera, controls }
    }

    /// Step the orbit controls (damping) once. Returns `true` if the
    /// camera moved.
    pub fn update(&mut self) -> bool {
        self.controls.update(&mut self.camera)
    }

    /// Set the projection aspect ratio (width / height).
    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = aspect;
    }

    /// Queue an orbit for a drag of `delta` logical pixels.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        self.controls.rotate(delta, viewport_height);
    }

    /// Queue a pan for a drag of `delta` logical pixels.
    pub fn pan(&mut self, delta: Vec2, viewport_height: f32) {
        self.controls.pan(delta, viewport_height, &self.camera);
    }

    /// Queue a dolly for `delta_y` wheel pixels.
    pub fn zoom(&mut self, delta_y: f32) {
        self.controls.dolly(delta_y);
    }

    /// Back to the initial view.
    pub fn reset(&mut self) {
        self.controls.reset(&mut self.camera);
    }

    /// Apply projection and control tuning. The current view is kept
    /// unless the configured position or target changed, in which case the
    /// camera jumps to the new pose and resets return there.
    pub fn apply_options(
        &mut self,
        camera_options: &CameraOptions,
        controls_options: &ControlsOptions,
    ) {
        self.camera.fovy = camera_options.fovy;
        self.camera.znear = camera_options.znear;
        self.camera.zfar = camera_options.zfar;
        self.controls.apply_options(controls_options);

        let eye = Vec3::from_array(camera_options.position);
        let target = Vec3::from_array(camera_options.target);
        if self.controls.set_home(eye, target) {
            self.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_change_projection_but_not_placement() {
        let mut controller = CameraController::new(
            &CameraOptions::default(),
            &ControlsOptions::default(),
            1.0,
        );
        let eye = controller.camera.eye;
        let wide = CameraOptions {
            fovy: 90.0,
            ..CameraOptions::default()
        };
        controller.apply_options(&wide, &ControlsOptions::default());
        assert_eq!(controller.camera.fovy, 90.0);
        assert_eq!(controller.camera.eye, eye);
    }

    #[test]
    fn new_placement_moves_camera_and_reset_pose() {
        let mut controller = CameraController::new(
            &CameraOptions::default(),
            &ControlsOptions::default(),
            1.0,
        );
        controller.rotate(Vec2::new(120.0, 0.0), 600.0);
        let _ = controller.update();

        let moved = CameraOptions {
            position: [0.0, 40.0, 60.0],
            target: [15.0, 0.0, 0.0],
            ..CameraOptions::default()
        };
        controller.apply_options(&moved, &ControlsOptions::default());
        assert_eq!(controller.camera.eye, Vec3::new(0.0, 40.0, 60.0));
        assert_eq!(controller.camera.target, Vec3::new(15.0, 0.0, 0.0));

        controller.rotate(Vec2::new(-80.0, 30.0), 600.0);
        for _ in 0..20 {
            let _ = controller.update();
        }
        controller.reset();
        assert_eq!(controller.camera.eye, Vec3::new(0.0, 40.0, 60.0));
        assert_eq!(controller.camera.target, Vec3::new(15.0, 0.0, 0.0));
    }
}
