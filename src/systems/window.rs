//! Window management system
//!
//! Owns the viewer window: creation from config, fullscreen toggle, and a
//! title line that reports the simulation clock.

use std::sync::Arc;
use winit::{
    dpi::LogicalSize,
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use crate::config::WindowConfig;

/// Smallest window the viewer allows, in logical pixels
const MIN_WINDOW_SIZE: (u32, u32) = (320, 240);

/// Simulation state shown in the window title
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleStats {
    pub time_scale: f32,
    pub paused: bool,
    /// Global scene rotation about +Y, in degrees
    pub scene_rotation: f32,
}

/// Manages the viewer window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
    vsync: bool,
    last_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let (min_w, min_h) = MIN_WINDOW_SIZE;
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(
                config.width.max(min_w),
                config.height.max(min_h),
            ))
            .with_min_inner_size(LogicalSize::new(min_w, min_h));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        let size = window.inner_size();
        log::info!(
            "Opened viewer window {}x{} (vsync {})",
            size.width,
            size.height,
            if config.vsync { "on" } else { "off" }
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
            vsync: config.vsync,
            last_title: config.title.clone(),
        })
    }

    /// Shared handle for the render surface
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Whether the surface should present with vsync
    pub fn vsync(&self) -> bool {
        self.vsync
    }

    /// Toggle borderless fullscreen
    pub fn toggle_fullscreen(&self) {
        let fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(fullscreen);
    }

    /// Show the simulation clock in the title; unchanged titles are not re-sent
    pub fn update_title(&mut self, stats: TitleStats) {
        let title = format_title(&self.base_title, stats);
        if title != self.last_title {
            self.window.set_title(&title);
            self.last_title = title;
        }
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Title text for the current simulation state
pub fn format_title(base: &str, stats: TitleStats) -> String {
    let rotation = if stats.scene_rotation.abs() > f32::EPSILON {
        format!(" rot {:.0}°", stats.scene_rotation)
    } else {
        String::new()
    };

    if stats.paused {
        format!("{} - paused{} [Space to resume]", base, rotation)
    } else {
        format!("{} - {}x{} [Click to reset]", base, stats.time_scale, rotation)
    }
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(time_scale: f32, paused: bool, scene_rotation: f32) -> TitleStats {
        TitleStats {
            time_scale,
            paused,
            scene_rotation,
        }
    }

    #[test]
    fn test_title_running() {
        let title = format_title("Orrery", stats(2.0, false, 0.0));
        assert_eq!(title, "Orrery - 2x [Click to reset]");
    }

    #[test]
    fn test_title_fractional_speed() {
        let title = format_title("Orrery", stats(0.25, false, 0.0));
        assert!(title.contains("0.25x"));
    }

    #[test]
    fn test_title_paused() {
        let title = format_title("Orrery", stats(1.0, true, 0.0));
        assert_eq!(title, "Orrery - paused [Space to resume]");
    }

    #[test]
    fn test_title_shows_scene_rotation() {
        let title = format_title("Orrery", stats(1.0, false, 45.0));
        assert_eq!(title, "Orrery - 1x rot 45° [Click to reset]");
        let paused = format_title("Orrery", stats(1.0, true, 350.0));
        assert!(paused.contains("rot 350°"));
    }

    #[test]
    fn test_window_error_display() {
        let err = WindowError::CreationFailed("no display".to_string());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
