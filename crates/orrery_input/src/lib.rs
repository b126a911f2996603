//! Orbit camera input
//!
//! Turns keyboard and mouse state into orbit/zoom deltas for any camera
//! implementing [`CameraControl`].

mod camera_controller;

pub use camera_controller::{CameraControl, CameraController};
