//! Standalone window backed by winit.
//!
//! ```no_run
//! # use orrery::Viewer;
//! Viewer::builder()
//!     .with_title("Orrery")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    error::OrreryError, options::Options, InputEvent, MouseButton,
    OrreryEngine,
};

/// Pixels per wheel line, matching what browsers report for `deltaY`.
const LINE_HEIGHT_PX: f32 = 100.0;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: "Orrery".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the solar system.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`OrreryError::Viewer`] if the event loop cannot be created
    /// or exits abnormally, or the engine error that prevented startup.
    pub fn run(self) -> Result<(), OrreryError> {
        let event_loop =
            EventLoop::new().map_err(|e| OrreryError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: Some(self.options),
            title: self.title,
            startup_error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| OrreryError::Viewer(e.to_string()))?;

        app.startup_error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<OrreryEngine>,
    options: Option<Options>,
    title: String,
    startup_error: Option<OrreryError>,
}

/// Logical size of a physical window size, unrounded.
fn logical_size(inner: PhysicalSize<u32>, scale_factor: f64) -> (f64, f64) {
    let logical: LogicalSize<f64> = inner.to_logical(scale_factor);
    (logical.width, logical.height)
}

/// Logical position of a physical cursor position.
fn logical_position(
    position: PhysicalPosition<f64>,
    scale_factor: f64,
) -> (f32, f32) {
    let logical = position.to_logical::<f64>(scale_factor);
    (logical.x as f32, logical.y as f32)
}

/// Wheel delta in the DOM `deltaY` convention (positive = scroll down).
fn wheel_delta_y(delta: MouseScrollDelta, scale_factor: f64) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT_PX,
        MouseScrollDelta::PixelDelta(pos) => (-pos.y / scale_factor) as f32,
    }
}

impl ViewerApp {
    fn resize_to_window(&mut self) {
        if let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        {
            let scale = window.scale_factor();
            let (width, height) = logical_size(window.inner_size(), scale);
            engine.resize(width, height, scale);
        }
    }

    fn scale_factor(&self) -> f64 {
        self.window.as_ref().map_or(1.0, |w| w.scale_factor())
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(LogicalSize::new(logical_w, logical_h))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                self.startup_error = Some(OrreryError::Viewer(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        let scale = window.scale_factor();
        let size = logical_size(window.inner_size(), scale);
        let options = self.options.take().unwrap_or_default();

        let engine = match pollster::block_on(OrreryEngine::new(
            window.clone(),
            size,
            scale,
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                self.startup_error = Some(e);
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }
        let scale = self.scale_factor();

        match event {
            WindowEvent::Resized(_)
            | WindowEvent::ScaleFactorChanged { .. } => {
                self.resize_to_window();
            }

            WindowEvent::RedrawRequested => {
                if let Some(engine) = &mut self.engine {
                    match engine.frame() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => engine.reconfigure(),
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(engine) = &mut self.engine {
                    let _ = engine.handle_input(InputEvent::MouseButton {
                        button: MouseButton::from(button),
                        pressed: state == ElementState::Pressed,
                    });
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = logical_position(position, scale);
                if let Some(engine) = &mut self.engine {
                    let _ =
                        engine.handle_input(InputEvent::CursorMoved { x, y });
                }
            }

            WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) => {
                if let Some(engine) = &mut self.engine {
                    let _ = engine.handle_input(InputEvent::CursorLeft);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(engine) = &mut self.engine {
                    let _ = engine.handle_input(InputEvent::Scroll {
                        delta_y: wheel_delta_y(delta, scale),
                    });
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                if let Some(engine) = &mut self.engine {
                    let _ = engine.handle_input(InputEvent::ModifiersChanged {
                        shift: modifiers.state().shift_key(),
                    });
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key_str = format!("{code:?}");
                if let Some(engine) = &mut self.engine {
                    let _ = engine.handle_key(&key_str);
                }
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::viewport::Viewport;

    #[test]
    fn wheel_lines_follow_dom_convention() {
        // Wheel forward reports +1 line in winit and -100 px in the DOM.
        let delta = wheel_delta_y(MouseScrollDelta::LineDelta(0.0, 1.0), 1.0);
        assert_eq!(delta, -100.0);
    }

    #[test]
    fn pixel_deltas_are_logical() {
        let delta = wheel_delta_y(
            MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -60.0)),
            2.0,
        );
        assert_eq!(delta, 30.0);
    }

    #[test]
    fn physical_sizes_map_to_logical() {
        assert_eq!(
            logical_size(PhysicalSize::new(2560, 1440), 2.0),
            (1280.0, 720.0)
        );
        assert_eq!(
            logical_position(PhysicalPosition::new(300.0, 150.0), 1.5),
            (200.0, 100.0)
        );
    }

    #[test]
    fn surface_matches_odd_window_sizes() {
        for (width, height, scale) in
            [(1001, 777, 2.0), (1921, 1081, 2.0), (1001, 333, 1.5)]
        {
            let (w, h) = logical_size(PhysicalSize::new(width, height), scale);
            let viewport = Viewport::new(w, h, scale, 2.0);
            assert_eq!(viewport.physical_size(), (width, height));
        }
    }
}
