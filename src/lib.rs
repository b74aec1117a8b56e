//! Cube Inspector: pick randomly placed boxes with the mouse and inspect
//! their properties.
//!
//! The core ([`scene`], [`picking`], [`selection`], [`animation`],
//! [`rotation`]) is window-free and owned by a single [`Stage`]. The
//! [`renderer`] drives it from a winit event loop and draws it with wgpu.

pub mod animation;
pub mod camera;
pub mod color;
pub mod error;
pub mod math;
pub mod options;
pub mod panel;
pub mod picking;
pub mod renderer;
pub mod rotation;
pub mod scene;
pub mod selection;
pub mod stage;

pub use error::CubeError;
pub use options::Options;
pub use stage::{PointerOutcome, Stage};
