//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a mouse
//! gesture or a programmatic call, is represented as a `Command`.
//! Consumers construct commands and pass them to
//! [`OrreryEngine::execute`](super::OrreryEngine::execute).

use glam::Vec2;

/// A discrete or parameterized operation the engine can perform.
///
/// ```ignore
/// engine.execute(Command::TogglePause);
/// engine.execute(Command::Zoom { delta: -100.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    // ── Camera ──────────────────────────────────────────────────────
    /// Orbit the camera by `delta` logical pixels of mouse movement.
    RotateCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Pan the camera by `delta` logical pixels of mouse movement.
    PanCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Dolly the camera (negative = toward the target).
    Zoom {
        /// Wheel pixels, `WheelEvent.deltaY` convention.
        delta: f32,
    },

    /// Return the camera to its initial position and target.
    ResetCamera,

    // ── Simulation ──────────────────────────────────────────────────
    /// Freeze or resume the clock and the per-frame spins.
    TogglePause,

    // ── Display ─────────────────────────────────────────────────────
    /// Show or hide the orbit ring.
    ToggleOrbitRing,
}
