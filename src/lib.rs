// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! A small 3D solar system rendered with wgpu, in the browser or a native
//! window.
//!
//! A glowing sun carries a point light; an earth orbits it on a pivot node
//! while spinning, an orbit ring marks its path, and 200 stars are
//! scattered around. Orbit controls with damping steer the camera.
//!
//! # Key entry points
//!
//! - [`OrreryEngine`] - GPU context, frame loop, resize and input
//! - [`scene::SolarSystem`] - the scene graph and its per-frame update
//! - [`camera::controls::OrbitControls`] - rotate, pan and dolly with
//!   damping
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Hosts
//!
//! The `viewer` feature provides [`Viewer`], a winit window (the `orrery`
//! binary). The `web` feature on `wasm32` exports `run`, which appends a
//! canvas to the page and drives it with `requestAnimationFrame`.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use engine::{Command, OrreryEngine};
pub use error::OrreryError;
pub use input::{InputEvent, MouseButton};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
