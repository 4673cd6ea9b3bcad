//! GPU-free frame state: the simulation, the camera and the viewport.
//!
//! [`OrreryEngine`](super::OrreryEngine) owns one of these and mirrors it
//! to the GPU after every tick. Keeping it separate lets the frame logic
//! run under plain unit tests.

use web_time::Instant;

use super::command::Command;
use crate::camera::controller::CameraController;
use crate::gpu::viewport::Viewport;
use crate::options::Options;
use crate::scene::{same_layout, SolarSystem};
use crate::util::clock::Clock;

/// Everything one animation tick reads or writes, minus GPU resources.
pub struct FrameState {
    /// The sun, earth, orbit ring and stars.
    pub system: SolarSystem,
    /// Camera and orbit controls.
    pub camera: CameraController,
    /// Logical output size and pixel ratio.
    pub viewport: Viewport,
    clock: Clock,
    /// The camera changed outside the controls' damping step.
    camera_dirty: bool,
}

/// What a [`FrameState::apply_options`] call changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionsDelta {
    /// The scene was rebuilt and meshes must be regenerated.
    pub rebuilt: bool,
    /// The pixel ratio changed and the surface must be resized.
    pub resized: bool,
}

impl FrameState {
    /// Populate the scene and place the camera for a `width x height`
    /// logical viewport.
    #[must_use]
    pub fn new(
        options: &Options,
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
    ) -> Self {
        let viewport = Viewport::new(
            width,
            height,
            device_pixel_ratio,
            options.render.max_pixel_ratio,
        );
        let camera = CameraController::new(
            &options.camera,
            &options.controls,
            viewport.aspect(),
        );

        Self {
            system: SolarSystem::new(&options.scene, &options.lighting),
            camera,
            viewport,
            clock: Clock::new(),
            camera_dirty: true,
        }
    }

    /// One animation tick at `now`: damped controls first, then the scene
    /// (skipped while paused). Returns `true` if the camera uniform is
    /// stale: the controls moved the camera, or a resize, reset or options
    /// change touched it since the last tick.
    pub fn tick(&mut self, now: Instant) -> bool {
        let moved = self.camera.update();
        if !self.clock.is_paused() {
            self.system.advance(self.clock.elapsed_at(now));
        }
        moved || std::mem::take(&mut self.camera_dirty)
    }

    /// Adopt a new logical size and device pixel ratio. Returns `false`
    /// when the size was rejected (zero width or height).
    pub fn resize(
        &mut self,
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
    ) -> bool {
        if !self.viewport.resize(width, height, device_pixel_ratio) {
            return false;
        }
        self.camera.set_aspect(self.viewport.aspect());
        self.camera_dirty = true;
        true
    }

    /// Run `command` at `now`.
    pub fn execute(&mut self, command: Command, now: Instant) {
        let height = self.viewport.height() as f32;
        match command {
            Command::RotateCamera { delta } => {
                self.camera.rotate(delta, height);
            }
            Command::PanCamera { delta } => self.camera.pan(delta, height),
            Command::Zoom { delta } => self.camera.zoom(delta),
            Command::ResetCamera => {
                self.camera.reset();
                self.camera_dirty = true;
            }
            Command::TogglePause => {
                if self.clock.toggle_at(now) {
                    log::info!("simulation paused");
                } else {
                    log::info!("simulation resumed");
                }
            }
            Command::ToggleOrbitRing => {
                let visible = self.system.toggle_orbit_ring();
                log::debug!("orbit ring visible: {visible}");
            }
        }
    }

    /// Move from `old` to `new` options. The scene is rebuilt only when
    /// its layout changed; otherwise speeds and visibility are patched in
    /// place.
    pub fn apply_options(
        &mut self,
        old: &Options,
        new: &Options,
    ) -> OptionsDelta {
        let rebuilt = !same_layout(&old.scene, &new.scene);
        if rebuilt {
            self.system = SolarSystem::new(&new.scene, &new.lighting);
        } else {
            self.system.apply_motion(&new.scene);
            self.system.set_lighting(&new.lighting);
        }

        self.camera.apply_options(&new.camera, &new.controls);
        self.camera_dirty = true;

        let before = self.viewport.physical_size();
        self.viewport.set_max_pixel_ratio(new.render.max_pixel_ratio);

        OptionsDelta {
            rebuilt,
            resized: self.viewport.physical_size() != before,
        }
    }

    /// Whether the simulation clock is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use web_time::Duration;

    use super::*;

    fn seeded_options() -> Options {
        let mut options = Options::default();
        options.scene.stars.seed = Some(7);
        options
    }

    fn orbit_angle(state: &FrameState) -> f32 {
        state
            .system
            .graph()
            .node(state.system.earth_orbit())
            .transform
            .rotation
            .y
    }

    #[test]
    fn tick_reports_stale_camera_only_when_it_changed() {
        let mut state = FrameState::new(&seeded_options(), 800.0, 600.0, 1.0);
        let now = Instant::now();
        assert!(state.tick(now));
        assert!(!state.tick(now));

        assert!(state.resize(1024.0, 768.0, 1.0));
        assert!(state.tick(now));
        assert!(!state.tick(now));

        state.execute(Command::Zoom { delta: 100.0 }, now);
        assert!(state.tick(now));

        state.execute(Command::ResetCamera, now);
        assert!(state.tick(now));
        assert!(!state.tick(now));
    }

    #[test]
    fn resize_sets_aspect_and_size() {
        let mut state = FrameState::new(&seeded_options(), 800.0, 600.0, 1.0);
        assert!(state.resize(1920.0, 1080.0, 1.0));
        assert!((state.camera.camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(state.viewport.width(), 1920.0);
        assert_eq!(state.viewport.height(), 1080.0);
        assert_eq!(state.viewport.physical_size(), (1920, 1080));
    }

    #[test]
    fn resize_caps_pixel_ratio() {
        let mut state = FrameState::new(&seeded_options(), 800.0, 600.0, 1.0);
        assert!(state.resize(400.0, 300.0, 3.0));
        assert_eq!(state.viewport.pixel_ratio(), 2.0);
        assert_eq!(state.viewport.physical_size(), (800, 600));
    }

    #[test]
    fn zero_resize_is_ignored() {
        let mut state = FrameState::new(&seeded_options(), 800.0, 600.0, 1.0);
        let aspect = state.camera.camera.aspect;
        assert!(!state.resize(0.0, 600.0, 1.0));
        assert_eq!(state.camera.camera.aspect, aspect);
        assert_eq!(state.viewport.width(), 800.0);
    }

    #[test]
    fn tick_advances_orbit_with_time() {
        let mut state = FrameState::new(&seeded_options(), 800.0, 600.0, 1.0);
        let t0 = Instant::now();
        let _ = state.tick(t0);
        let _ = state.tick(t0 + Duration::from_secs(2));
        assert!((orbit_angle(&state) - 1.0).abs() < 1e-5);
        assert_eq!(state.system.frame_count(), 2);
    }

    #[test]
    fn pause_freezes_scene() {
        let mut state = FrameState::new(&seeded_options(), 800.0, 600.0, 1.0);
        let t0 = Instant::now();
        let _ = state.tick(t0);
        state.execute(Command::TogglePause, t0 + Duration::from_secs(1));
        assert!(state.is_paused());

        let _ = state.tick(t0 + Duration::from_secs(5));
        assert_eq!(state.system.frame_count(), 1);

        state.execute(Command::TogglePause, t0 + Duration::from_secs(5));
        let _ = state.tick(t0 + Duration::from_secs(6));
        // 1 s before the pause plus 1 s after it.
        assert!((orbit_angle(&state) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn toggle_orbit_ring_hides_ring() {
        let mut state = FrameState::new(&seeded_options(), 800.0, 600.0, 1.0);
        let ring = state.system.orbit_ring();
        assert!(state.system.graph().is_visible(ring));
        state.execute(Command::ToggleOrbitRing, Instant::now());
        assert!(!state.system.graph().is_visible(ring));
    }

    #[test]
    fn reset_restores_camera() {
        let mut state = FrameState::new(&seeded_options(), 800.0, 600.0, 1.0);
        let eye = state.camera.camera.eye;
        let now = Instant::now();
        state.execute(
            Command::RotateCamera {
                delta: Vec2::new(200.0, 50.0),
            },
            now,
        );
        for _ in 0..50 {
            let _ = state.tick(now);
        }
        assert!(state.camera.camera.eye.distance(eye) > 1.0);

        state.execute(Command::ResetCamera, now);
        assert!(state.camera.camera.eye.distance(eye) < 1e-4);
    }

    #[test]
    fn motion_options_patch_without_rebuild() {
        let old = seeded_options();
        let mut new = old.clone();
        new.scene.earth.orbit_speed = 1.0;
        new.scene.orbit_ring.visible = false;

        let mut state = FrameState::new(&old, 800.0, 600.0, 1.0);
        let stars: Vec<_> = state
            .system
            .stars()
            .iter()
            .map(|&id| state.system.graph().world_position(id))
            .collect();

        let delta = state.apply_options(&old, &new);
        assert!(!delta.rebuilt);
        assert!(!delta.resized);
        assert!(!state.system.graph().is_visible(state.system.orbit_ring()));
        let after: Vec<_> = state
            .system
            .stars()
            .iter()
            .map(|&id| state.system.graph().world_position(id))
            .collect();
        assert_eq!(stars, after);
    }

    #[test]
    fn layout_options_rebuild_scene() {
        let old = seeded_options();
        let mut new = old.clone();
        new.scene.stars.count = 10;
        new.render.max_pixel_ratio = 1.0;

        let mut state = FrameState::new(&old, 800.0, 600.0, 2.0);
        let delta = state.apply_options(&old, &new);
        assert!(delta.rebuilt);
        assert!(delta.resized);
        assert_eq!(state.system.stars().len(), 10);
        assert_eq!(state.viewport.physical_size(), (800, 600));
    }
}
