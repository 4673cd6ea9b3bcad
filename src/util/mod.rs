//! Shared utilities: colors, the simulation clock, and frame timing.

pub mod clock;
pub mod color;
/// Smoothed FPS tracking and optional frame limiting.
pub mod frame_timing;
