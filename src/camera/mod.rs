//! Camera system for 3D scene viewing.
//!
//! Provides a perspective camera, inertial orbit controls, and the GPU
//! binding that uploads the camera uniform.

/// Camera uniform buffer and bind group.
pub mod binding;
/// Camera paired with its orbit controls.
pub mod controller;
/// Orbit, pan and dolly with damping.
pub mod controls;
/// Core camera struct and GPU uniform types.
pub mod core;
