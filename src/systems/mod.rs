//! Application systems
//!
//! Window, simulation clock and GPU rendering, kept out of main.rs so each can be tested alone.

mod render;
mod simulation;
mod window;

pub use render::{RenderError, RenderSystem};
pub use simulation::{SimulationResult, SimulationSystem};
pub use window::{format_title, TitleStats, WindowError, WindowSystem};
