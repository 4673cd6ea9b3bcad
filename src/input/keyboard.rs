use serde::{Deserialize, Serialize};

/// Engine-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// reset_camera = "KeyQ"
/// toggle_pause = "Space"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Put the camera back at its initial position and target.
    ResetCamera,
    /// Freeze or resume the simulation clock and spins.
    TogglePause,
    /// Show or hide the orbit ring.
    ToggleOrbitRing,
}
