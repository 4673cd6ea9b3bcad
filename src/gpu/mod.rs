//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, dynamic buffer management,
//! the point-light uniform, attachment textures, and shader composition.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// GPU point-light uniform and bind group management.
pub mod lighting;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Depth and multisample attachment textures.
pub mod texture;
/// Logical output size and pixel ratio.
pub mod viewport;
