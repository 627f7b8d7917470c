//! Common utilities for the canvas-based simulations
//!
//! This crate provides the window and GPU setup, the pixel-space camera,
//! and the vertex type shared by the gravity toy's renderer.

pub mod graphics;
pub mod camera;
pub mod error;

pub use graphics::*;
pub use camera::*;
pub use error::GraphicsError;
