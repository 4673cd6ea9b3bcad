//! Input and command dispatch for OrreryEngine

use web_time::Instant;

use super::{Command, OrreryEngine};
use crate::input::InputEvent;

impl OrreryEngine {
    /// Run a single command.
    pub fn execute(&mut self, command: Command) {
        log::trace!("execute {command:?}");
        self.state.execute(command, Instant::now());
    }

    /// Process a platform-agnostic input event. Returns `true` if it
    /// produced a command.
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::CursorMoved { x, y });
    /// engine.handle_input(InputEvent::Scroll { delta_y: 100.0 });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.input.handle_event(event).is_some_and(|command| {
            self.execute(command);
            true
        })
    }

    /// Process a key press named by its physical key code (`"KeyQ"`,
    /// `"Space"`). Returns `true` if the key is bound.
    pub fn handle_key(&mut self, key: &str) -> bool {
        self.input.handle_key_press(key).is_some_and(|command| {
            self.execute(command);
            true
        })
    }

    /// Whether a mouse drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }
}
