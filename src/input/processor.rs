//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! held buttons, modifier keys) and the key-binding map. It is the only
//! thing that sits between raw window events and the engine's
//! [`execute`](crate::engine::OrreryEngine::execute) method.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use super::keyboard::KeyAction;
use crate::engine::Command;
use crate::options::KeybindingOptions;

/// What a drag does, decided when the button goes down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Rotate,
    Pan,
    Dolly,
}

/// Converts raw window events into [`Command`]s.
///
/// Left drag orbits, right drag (or shift + left drag) pans, middle drag
/// and the wheel dolly.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// if let Some(cmd) = input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
///
/// if let Some(cmd) = input_processor.handle_key_press("KeyQ") {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    /// Last cursor position, if known.
    cursor: Option<Vec2>,
    /// Active drag, if a button is held.
    drag: Option<DragMode>,
    /// Whether the shift modifier is currently held.
    shift_pressed: bool,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            key_bindings,
            ..Self::new()
        }
    }

    /// Replace the key bindings.
    pub fn set_key_bindings(&mut self, key_bindings: KeybindingOptions) {
        self.key_bindings = key_bindings;
    }

    /// Whether a drag gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Look up a key press (a `KeyboardEvent.code` / winit `KeyCode` debug
    /// string such as `"KeyQ"`) and return the bound command.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<Command> {
        self.key_bindings.lookup(key).map(|action| match action {
            KeyAction::ResetCamera => Command::ResetCamera,
            KeyAction::TogglePause => Command::TogglePause,
            KeyAction::ToggleOrbitRing => Command::ToggleOrbitRing,
        })
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed);
                None
            }
            InputEvent::Scroll { delta_y } => {
                (delta_y != 0.0).then_some(Command::Zoom { delta: delta_y })
            }
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
            InputEvent::CursorLeft => {
                self.drag = None;
                self.cursor = None;
                None
            }
        }
    }

    /// Cursor moved — compute delta, possibly produce a camera command.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<Command> {
        let position = Vec2::new(x, y);
        let delta = self.cursor.replace(position).map(|last| position - last)?;
        if delta == Vec2::ZERO {
            return None;
        }
        match self.drag? {
            DragMode::Rotate => Some(Command::RotateCamera { delta }),
            DragMode::Pan => Some(Command::PanCamera { delta }),
            DragMode::Dolly => Some(Command::Zoom { delta: delta.y }),
        }
    }

    /// Button press starts a drag; release of any button ends it.
    fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if !pressed {
            self.drag = None;
            return;
        }
        self.drag = Some(match button {
            MouseButton::Left if self.shift_pressed => DragMode::Pan,
            MouseButton::Left => DragMode::Rotate,
            MouseButton::Right => DragMode::Pan,
            MouseButton::Middle => DragMode::Dolly,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    fn press(button: MouseButton, pressed: bool) -> InputEvent {
        InputEvent::MouseButton { button, pressed }
    }

    #[test]
    fn hover_without_buttons_does_nothing() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(moved(10.0, 10.0)), None);
        assert_eq!(input.handle_event(moved(20.0, 15.0)), None);
    }

    #[test]
    fn left_drag_rotates() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(10.0, 10.0));
        assert_eq!(input.handle_event(press(MouseButton::Left, true)), None);
        assert_eq!(
            input.handle_event(moved(14.0, 7.0)),
            Some(Command::RotateCamera {
                delta: Vec2::new(4.0, -3.0)
            })
        );
        let _ = input.handle_event(press(MouseButton::Left, false));
        assert!(!input.is_dragging());
        assert_eq!(input.handle_event(moved(20.0, 7.0)), None);
    }

    #[test]
    fn right_or_shift_left_drag_pans() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(0.0, 0.0));
        let _ = input.handle_event(press(MouseButton::Right, true));
        assert!(matches!(
            input.handle_event(moved(1.0, 0.0)),
            Some(Command::PanCamera { .. })
        ));
        let _ = input.handle_event(press(MouseButton::Right, false));

        let shift = InputEvent::ModifiersChanged { shift: true };
        let _ = input.handle_event(shift);
        let _ = input.handle_event(press(MouseButton::Left, true));
        assert!(matches!(
            input.handle_event(moved(2.0, 0.0)),
            Some(Command::PanCamera { .. })
        ));
    }

    #[test]
    fn wheel_and_middle_drag_dolly() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(InputEvent::Scroll { delta_y: -100.0 }),
            Some(Command::Zoom { delta: -100.0 })
        );
        assert_eq!(
            input.handle_event(InputEvent::Scroll { delta_y: 0.0 }),
            None
        );

        let _ = input.handle_event(moved(0.0, 0.0));
        let _ = input.handle_event(press(MouseButton::Middle, true));
        assert_eq!(
            input.handle_event(moved(0.0, 12.0)),
            Some(Command::Zoom { delta: 12.0 })
        );
    }

    #[test]
    fn leaving_the_surface_ends_the_drag() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(0.0, 0.0));
        let _ = input.handle_event(press(MouseButton::Left, true));
        let _ = input.handle_event(InputEvent::CursorLeft);
        assert!(!input.is_dragging());
        assert_eq!(input.handle_event(moved(50.0, 50.0)), None);
    }

    #[test]
    fn bound_keys_produce_commands() {
        let input = InputProcessor::new();
        assert_eq!(input.handle_key_press("KeyQ"), Some(Command::ResetCamera));
        assert_eq!(input.handle_key_press("Space"), Some(Command::TogglePause));
        assert_eq!(
            input.handle_key_press("KeyO"),
            Some(Command::ToggleOrbitRing)
        );
        assert_eq!(input.handle_key_press("KeyX"), None);
    }
}
