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
// Complexity limits (thresholds in clippy.toml)
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

//! Single-model glTF viewer built on wgpu.
//!
//! orbitview loads one glTF scene, paints every mesh with a single override
//! texture under an ambient light, frames the camera on the model's bounding
//! box, and lets the user orbit at eye level or drag the model up and down.
//!
//! # Key entry points
//!
//! - `Viewer` - window + event loop (feature `viewer`)
//! - [`engine::ViewerEngine`] - GPU context, scene state and renderer for
//!   one surface
//! - [`scene::SceneState`] - the camera, orbit controller, drag handler and
//!   loaded model; all input lands here
//! - [`loader::load_model`] - asynchronous glTF + texture loading from any
//!   [`loader::AssetSource`]
//! - [`options::Options`] - runtime configuration, loadable from TOML
//!
//! # Architecture
//!
//! Loading runs off the UI thread and hands back a `Result<Model, _>`
//! through the event loop. Input events mutate [`scene::SceneState`]; each
//! frame reads it into uniforms and draws. Nothing but the load result
//! crosses threads.

#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
compile_error!("building for wasm32 requires the `web` feature");

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod loader;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(feature = "web")]
mod web;

pub use error::OrbitViewError;
pub use input::{InputEvent, MouseButton};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
