//! 2D gravity toy
//!
//! Point particles fall toward user-placed black holes under a
//! deliberately simple force law. This is a small educational toy, not a
//! physics engine: there is no time step, no collision and no interaction
//! between black holes.
//!
//! The crate is split so that everything except the window and GPU lives
//! here and can be driven headless:
//! - [`vector`]: Vec2 helpers with a zero-safe unit vector
//! - [`body`]: particles and black holes
//! - [`physics`]: one forward-Euler step for every particle
//! - [`scene`]: bounded body collections and display flags
//! - [`canvas`]: retained drawing surface, palette and tessellation
//! - [`simulation`]: the per-tick update/draw cycle and user actions
//! - [`driver`]: tick clock and particle spawning

pub mod body;
pub mod canvas;
pub mod config;
pub mod driver;
pub mod physics;
pub mod scene;
pub mod simulation;
pub mod vector;

pub use body::Body;
pub use canvas::{Canvas, Color, ColorCycle, DisplayList, ItemId};
pub use physics::{ForceLaw, TrailSegment};
pub use scene::Scene;
pub use simulation::Simulation;
