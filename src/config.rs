//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ORRERY_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Simulation clock configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Asset locations
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`ORRERY_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // ORRERY_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("ORRERY_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Orrery".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Starting eye position [x, y, z]
    pub eye: [f32; 3],
    /// Point the camera looks at
    pub target: [f32; 3],
    /// Up direction
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Closest zoom distance to the target
    pub min_distance: f32,
    /// Farthest zoom distance from the target
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [20.0, 50.0, 80.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov: 110.0,
            near: 0.1,
            far: 500.0,
            min_distance: 5.0,
            max_distance: 400.0,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Keyboard orbit speed (degrees per second)
    pub orbit_speed: f32,
    /// Keyboard zoom speed (fraction of distance per second)
    pub zoom_speed: f32,
    /// Right-drag orbit sensitivity (degrees per pixel)
    pub mouse_sensitivity: f32,
    /// Zoom per scroll line (fraction of distance)
    pub scroll_zoom_step: f32,
    /// Degrees added to the global scene rotation per `[`/`]` press
    pub scene_rotate_step: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            orbit_speed: 60.0,
            zoom_speed: 1.0,
            mouse_sensitivity: 0.25,
            scroll_zoom_step: 0.1,
            scene_rotate_step: 5.0,
        }
    }
}

/// Simulation clock configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Multiplier on orbital speeds
    pub time_scale: f32,
    /// Rate at which body speeds (degrees per frame) are defined
    pub reference_fps: f32,
    /// Longest frame delta fed to the simulation, in seconds
    pub max_frame_time: f32,
    /// Start with the simulation paused
    pub start_paused: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            reference_fps: 60.0,
            max_frame_time: 0.25,
            start_paused: false,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Segments of the high-detail sphere mesh
    pub high_detail_segments: u32,
    /// Segments of the low-detail sphere mesh
    pub low_detail_segments: u32,
    /// Optional WGSL file replacing the built-in shader
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shader_path: Option<PathBuf>,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.0, 1.0],
            high_detail_segments: orrery_core::HIGH_DETAIL_SEGMENTS,
            low_detail_segments: orrery_core::LOW_DETAIL_SEGMENTS,
            shader_path: None,
        }
    }
}

/// Asset locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory holding body textures
    pub texture_dir: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("assets/textures"),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Show simulation speed in the window title
    pub show_title_stats: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_title_stats: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.camera.eye, [20.0, 50.0, 80.0]);
        assert_eq!(config.camera.fov, 110.0);
        assert_eq!(config.rendering.background_color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(config.rendering.high_detail_segments, 64);
        assert_eq!(config.rendering.low_detail_segments, 32);
        assert!(config.rendering.shader_path.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("time_scale"));
        assert!(toml.contains("texture_dir"));
        assert!(!toml.contains("shader_path"));
    }

    #[test]
    fn test_partial_toml_uses_section_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [window]
            title = "Partial"
            width = 800
            height = 600
            fullscreen = false
            vsync = false
            "#,
        )
        .unwrap();
        assert_eq!(config.window.title, "Partial");
        assert_eq!(config.camera.far, 500.0);
        assert_eq!(config.simulation.reference_fps, 60.0);
    }

    #[test]
    fn test_missing_config_dir_gives_defaults() {
        let config = AppConfig::load_from("does/not/exist").unwrap();
        assert_eq!(config.window.width, 1280);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError { message: "bad".to_string() };
        assert_eq!(err.to_string(), "Configuration error: bad");
    }
}
