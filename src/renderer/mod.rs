//! Rendering boundary
//!
//! The core hands out `RenderSnapshot`s and flat `QuadInstance` lists; a GPU
//! or canvas backend draws them without reaching into the simulation.

pub mod snapshot;
pub mod vertex;

pub use snapshot::{AvatarView, ObstacleView, RenderSnapshot, Viewport};
pub use vertex::{QuadInstance, QuadShape, colors};
