//! Simulation system
//!
//! Manages the per-frame update:
//! - Delta time calculation
//! - Converting wall-clock time into reference frames
//! - Advancing orbits
//! - Applying camera input

use std::time::Instant;

use orrery_core::SolarSystem;
use orrery_input::CameraController;
use orrery_render::Camera;

use crate::config::SimulationConfig;

const MIN_TIME_SCALE: f32 = 1.0 / 16.0;
const MAX_TIME_SCALE: f32 = 16.0;

/// Result of a simulation update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationResult {
    /// Capped wall-clock delta in seconds
    pub dt: f32,
    /// Reference frames the bodies were advanced by
    pub frames: f32,
}

/// Drives orbits and camera once per redraw
pub struct SimulationSystem {
    last_frame: Instant,
    time_scale: f32,
    reference_fps: f32,
    max_frame_time: f32,
    paused: bool,
}

impl SimulationSystem {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            last_frame: Instant::now(),
            time_scale: config.time_scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE),
            reference_fps: config.reference_fps.max(1.0),
            max_frame_time: config.max_frame_time.max(0.0),
            paused: config.start_paused,
        }
    }

    /// Reference frames that `dt` seconds amount to at the current speed
    pub fn frames_for(&self, dt: f32) -> f32 {
        if self.paused {
            0.0
        } else {
            dt.min(self.max_frame_time) * self.reference_fps * self.time_scale
        }
    }

    /// Run one simulation frame
    pub fn update(
        &mut self,
        system: &mut SolarSystem,
        camera: &mut Camera,
        controller: &mut CameraController,
    ) -> SimulationResult {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        // Cap dt so a stall (first frame, window drag) doesn't jump the orbits
        let dt = raw_dt.min(self.max_frame_time);
        self.last_frame = now;

        let frames = self.frames_for(dt);
        if frames > 0.0 {
            system.advance(frames);
        }

        // Camera input keeps working while paused
        controller.update(camera, dt);

        SimulationResult { dt, frames }
    }

    /// Pause or resume; returns true when now paused
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Double the speed, up to 16x
    pub fn speed_up(&mut self) -> f32 {
        self.time_scale = (self.time_scale * 2.0).min(MAX_TIME_SCALE);
        self.time_scale
    }

    /// Halve the speed, down to 1/16x
    pub fn slow_down(&mut self) -> f32 {
        self.time_scale = (self.time_scale * 0.5).max(MIN_TIME_SCALE);
        self.time_scale
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_reference_frame_per_tick() {
        let sim = SimulationSystem::default();
        assert!((sim.frames_for(1.0 / 60.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_delta_time_capped() {
        let sim = SimulationSystem::default();
        // A 2 second stall counts as 0.25s = 15 frames
        assert!((sim.frames_for(2.0) - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_paused_advances_nothing() {
        let mut sim = SimulationSystem::default();
        assert!(sim.toggle_pause());
        assert_eq!(sim.frames_for(0.1), 0.0);
        assert!(!sim.toggle_pause());
        assert!(sim.frames_for(0.1) > 0.0);
    }

    #[test]
    fn test_speed_limits() {
        let mut sim = SimulationSystem::default();
        for _ in 0..10 {
            sim.speed_up();
        }
        assert_eq!(sim.time_scale(), MAX_TIME_SCALE);
        for _ in 0..20 {
            sim.slow_down();
        }
        assert_eq!(sim.time_scale(), MIN_TIME_SCALE);
    }

    #[test]
    fn test_time_scale_multiplies_frames() {
        let mut sim = SimulationSystem::default();
        sim.speed_up();
        assert!((sim.frames_for(1.0 / 60.0) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_start_paused_from_config() {
        let config = SimulationConfig {
            start_paused: true,
            ..Default::default()
        };
        assert!(SimulationSystem::new(&config).is_paused());
    }

    #[test]
    fn test_update_advances_bodies() {
        let mut sim = SimulationSystem::default();
        let mut system = SolarSystem::standard();
        let mut camera = Camera::default();
        let mut controller = CameraController::new();
        std::thread::sleep(std::time::Duration::from_millis(20));
        let result = sim.update(&mut system, &mut camera, &mut controller);
        assert!(result.frames > 0.0);
        let (_, sun) = system.by_name("Sun").unwrap();
        assert!(sun.spin_angle() > 0.0);
    }
}
