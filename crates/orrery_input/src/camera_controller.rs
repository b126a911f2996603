//! Orbit camera controller
//!
//! Controls:
//! - A/D or Left/Right: Orbit around the target (yaw)
//! - W/S or Up/Down: Orbit over/under the target (pitch)
//! - Q/E: Zoom in/out
//! - Mouse wheel: Zoom
//! - Right-click + drag: Free orbit

use glam::Vec3;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

/// Orbit camera controller
pub struct CameraController {
    // Key state
    yaw_left: bool,
    yaw_right: bool,
    pitch_up: bool,
    pitch_down: bool,
    zoom_in: bool,
    zoom_out: bool,

    // Mouse state
    dragging: bool,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_scroll: f32,

    // Configuration
    /// Keyboard orbit speed in degrees per second
    pub orbit_speed: f32,
    /// Keyboard zoom rate, fraction of the current distance per second
    pub zoom_speed: f32,
    /// Degrees of orbit per pixel of mouse drag
    pub mouse_sensitivity: f32,
    /// Fraction of the current distance per scroll line
    pub scroll_zoom_step: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            yaw_left: false,
            yaw_right: false,
            pitch_up: false,
            pitch_down: false,
            zoom_in: false,
            zoom_out: false,

            dragging: false,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_scroll: 0.0,

            orbit_speed: 60.0,
            zoom_speed: 1.0,
            mouse_sensitivity: 0.25,
            scroll_zoom_step: 0.1,
        }
    }

    /// Process keyboard input
    ///
    /// Returns true if the key is one the controller handles.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::KeyA | KeyCode::ArrowLeft => { self.yaw_left = pressed; true }
            KeyCode::KeyD | KeyCode::ArrowRight => { self.yaw_right = pressed; true }
            KeyCode::KeyW | KeyCode::ArrowUp => { self.pitch_up = pressed; true }
            KeyCode::KeyS | KeyCode::ArrowDown => { self.pitch_down = pressed; true }
            KeyCode::KeyQ => { self.zoom_in = pressed; true }
            KeyCode::KeyE => { self.zoom_out = pressed; true }
            _ => false,
        }
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Right {
            self.dragging = state == ElementState::Pressed;
        }
    }

    /// Process raw mouse movement; only applied while dragging
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        if self.dragging {
            self.pending_yaw += delta_x as f32;
            self.pending_pitch += delta_y as f32;
        }
    }

    /// Process mouse wheel input
    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        self.pending_scroll += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
        };
    }

    /// Apply accumulated input to the camera
    ///
    /// Returns the camera eye position for debug display.
    pub fn update<C: CameraControl>(&mut self, camera: &mut C, dt: f32) -> Vec3 {
        let yaw_keys = (self.yaw_right as i32 - self.yaw_left as i32) as f32;
        let pitch_keys = (self.pitch_up as i32 - self.pitch_down as i32) as f32;

        // Mouse right (positive delta_x) swings the eye right, mouse down lowers it
        let delta_yaw =
            yaw_keys * self.orbit_speed * dt + self.pending_yaw * self.mouse_sensitivity;
        let delta_pitch =
            pitch_keys * self.orbit_speed * dt - self.pending_pitch * self.mouse_sensitivity;
        if delta_yaw != 0.0 || delta_pitch != 0.0 {
            camera.orbit(delta_yaw, delta_pitch);
        }

        // Scroll up zooms in; factor < 1 moves closer
        let zoom_keys = (self.zoom_out as i32 - self.zoom_in as i32) as f32;
        let factor = (1.0 + zoom_keys * self.zoom_speed * dt)
            * (1.0 - self.scroll_zoom_step).powf(self.pending_scroll);
        if factor != 1.0 {
            camera.zoom(factor);
        }

        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
        self.pending_scroll = 0.0;

        camera.eye()
    }

    /// Check if any orbit or zoom key is held
    pub fn is_moving(&self) -> bool {
        self.yaw_left || self.yaw_right || self.pitch_up || self.pitch_down
            || self.zoom_in || self.zoom_out
    }

    /// Check if a right-drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Builder: set keyboard orbit speed (degrees per second)
    pub fn with_orbit_speed(mut self, speed: f32) -> Self {
        self.orbit_speed = speed;
        self
    }

    /// Builder: set keyboard zoom speed
    pub fn with_zoom_speed(mut self, speed: f32) -> Self {
        self.zoom_speed = speed;
        self
    }

    /// Builder: set mouse drag sensitivity (degrees per pixel)
    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Builder: set scroll zoom step
    pub fn with_scroll_zoom_step(mut self, step: f32) -> Self {
        self.scroll_zoom_step = step.clamp(0.0, 0.9);
        self
    }
}

/// Trait for camera control
/// Allows the controller to work with different camera implementations
pub trait CameraControl {
    /// Swing the eye around the target, in degrees
    fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32);
    /// Multiply the eye-to-target distance by `factor`
    fn zoom(&mut self, factor: f32);
    fn eye(&self) -> Vec3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockCamera {
        yaw: f32,
        pitch: f32,
        distance: f32,
        orbit_calls: u32,
    }

    impl CameraControl for MockCamera {
        fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
            self.yaw += delta_yaw;
            self.pitch += delta_pitch;
            self.orbit_calls += 1;
        }

        fn zoom(&mut self, factor: f32) {
            self.distance *= factor;
        }

        fn eye(&self) -> Vec3 {
            Vec3::new(self.yaw, self.pitch, self.distance)
        }
    }

    fn camera() -> MockCamera {
        MockCamera { distance: 100.0, ..Default::default() }
    }

    #[test]
    fn test_keyboard_orbit() {
        let mut controller = CameraController::new().with_orbit_speed(90.0);
        let mut cam = camera();
        controller.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        controller.process_keyboard(KeyCode::ArrowUp, ElementState::Pressed);
        controller.update(&mut cam, 0.5);
        assert_eq!(cam.yaw, 45.0);
        assert_eq!(cam.pitch, 45.0);
    }

    #[test]
    fn test_key_release_stops_orbit() {
        let mut controller = CameraController::new();
        let mut cam = camera();
        controller.process_keyboard(KeyCode::KeyA, ElementState::Pressed);
        assert!(controller.is_moving());
        controller.process_keyboard(KeyCode::KeyA, ElementState::Released);
        assert!(!controller.is_moving());
        controller.update(&mut cam, 1.0);
        assert_eq!(cam.orbit_calls, 0);
    }

    #[test]
    fn test_unhandled_key() {
        let mut controller = CameraController::new();
        assert!(!controller.process_keyboard(KeyCode::KeyR, ElementState::Pressed));
        assert!(controller.process_keyboard(KeyCode::KeyQ, ElementState::Pressed));
    }

    #[test]
    fn test_mouse_motion_requires_drag() {
        let mut controller = CameraController::new().with_mouse_sensitivity(1.0);
        let mut cam = camera();
        controller.process_mouse_motion(10.0, 0.0);
        controller.update(&mut cam, 0.016);
        assert_eq!(cam.yaw, 0.0);

        controller.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        assert!(controller.is_dragging());
        controller.process_mouse_motion(10.0, 4.0);
        controller.update(&mut cam, 0.016);
        assert_eq!(cam.yaw, 10.0);
        assert_eq!(cam.pitch, -4.0);
    }

    #[test]
    fn test_pending_motion_consumed() {
        let mut controller = CameraController::new().with_mouse_sensitivity(1.0);
        let mut cam = camera();
        controller.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        controller.process_mouse_motion(5.0, 0.0);
        controller.update(&mut cam, 0.016);
        controller.update(&mut cam, 0.016);
        assert_eq!(cam.yaw, 5.0);
    }

    #[test]
    fn test_scroll_zooms_in() {
        let mut controller = CameraController::new().with_scroll_zoom_step(0.5);
        let mut cam = camera();
        controller.process_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        controller.update(&mut cam, 0.016);
        assert!((cam.distance - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_keys() {
        let mut controller = CameraController::new().with_zoom_speed(0.5);
        let mut cam = camera();
        controller.process_keyboard(KeyCode::KeyE, ElementState::Pressed);
        controller.update(&mut cam, 1.0);
        assert!((cam.distance - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_scroll_step_clamped() {
        let controller = CameraController::new().with_scroll_zoom_step(2.0);
        assert_eq!(controller.scroll_zoom_step, 0.9);
    }
}
