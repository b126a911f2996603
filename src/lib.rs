//! Orrery - textured solar system viewer
//!
//! Application layer: configuration, input mapping and the systems that
//! drive the window, the simulation clock and the renderer.

pub mod config;
pub mod input;
pub mod systems;
