//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard and mouse input to high-level actions like ResetScene, Exit, etc.
//! Orbit and zoom keys are NOT mapped here - they go directly to CameraController.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Actions triggered by special input (not camera movement)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Zero every orbit, the scene transform and the camera (left click or R)
    ResetScene,
    /// Exit application (Escape)
    Exit,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Pause or resume orbits (Space)
    TogglePause,
    /// Double simulation speed (= or numpad +)
    SpeedUp,
    /// Halve simulation speed (- or numpad -)
    SlowDown,
    /// Spin the whole system about +Y by the given degrees ([ and ])
    RotateScene(f32),
}

/// Maps raw input events to semantic actions
///
/// Orbit/zoom keys (WASD, arrows, QE) are NOT mapped here - they go directly
/// to the CameraController. This mapper handles "special" keys only.
pub struct InputMapper {
    rotate_step: f32,
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl InputMapper {
    /// Create a mapper; `rotate_step` is the degrees per scene-rotate press
    pub fn new(rotate_step: f32) -> Self {
        Self { rotate_step }
    }

    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for special keys, `None` for camera keys
    pub fn map_keyboard(&self, key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyR => Some(InputAction::ResetScene),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::Space => Some(InputAction::TogglePause),
            KeyCode::Equal | KeyCode::NumpadAdd => Some(InputAction::SpeedUp),
            KeyCode::Minus | KeyCode::NumpadSubtract => Some(InputAction::SlowDown),
            KeyCode::BracketLeft => Some(InputAction::RotateScene(-self.rotate_step)),
            KeyCode::BracketRight => Some(InputAction::RotateScene(self.rotate_step)),
            _ => None,
        }
    }

    /// Map mouse button to an action
    ///
    /// A left-button press resets the scene; right-drag belongs to the camera.
    pub fn map_mouse_button(
        &self,
        button: MouseButton,
        state: ElementState,
    ) -> Option<InputAction> {
        if button == MouseButton::Left && state == ElementState::Pressed {
            Some(InputAction::ResetScene)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_exits() {
        let mapper = InputMapper::default();
        assert_eq!(
            mapper.map_keyboard(KeyCode::Escape, ElementState::Pressed),
            Some(InputAction::Exit)
        );
    }

    #[test]
    fn test_camera_keys_not_mapped() {
        let mapper = InputMapper::default();
        for key in [
            KeyCode::KeyW,
            KeyCode::KeyA,
            KeyCode::KeyS,
            KeyCode::KeyD,
            KeyCode::KeyQ,
            KeyCode::KeyE,
            KeyCode::ArrowLeft,
        ] {
            let action = mapper.map_keyboard(key, ElementState::Pressed);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
    }

    #[test]
    fn test_key_release_ignored() {
        let mapper = InputMapper::default();
        assert_eq!(mapper.map_keyboard(KeyCode::KeyR, ElementState::Released), None);
    }

    #[test]
    fn test_left_click_resets() {
        let mapper = InputMapper::default();
        assert_eq!(
            mapper.map_mouse_button(MouseButton::Left, ElementState::Pressed),
            Some(InputAction::ResetScene)
        );
        assert_eq!(mapper.map_mouse_button(MouseButton::Left, ElementState::Released), None);
        assert_eq!(mapper.map_mouse_button(MouseButton::Right, ElementState::Pressed), None);
    }

    #[test]
    fn test_special_keys() {
        let mapper = InputMapper::default();
        assert_eq!(
            mapper.map_keyboard(KeyCode::KeyR, ElementState::Pressed),
            Some(InputAction::ResetScene)
        );
        assert_eq!(
            mapper.map_keyboard(KeyCode::KeyF, ElementState::Pressed),
            Some(InputAction::ToggleFullscreen)
        );
        assert_eq!(
            mapper.map_keyboard(KeyCode::Space, ElementState::Pressed),
            Some(InputAction::TogglePause)
        );
        assert_eq!(
            mapper.map_keyboard(KeyCode::Equal, ElementState::Pressed),
            Some(InputAction::SpeedUp)
        );
        assert_eq!(
            mapper.map_keyboard(KeyCode::Minus, ElementState::Pressed),
            Some(InputAction::SlowDown)
        );
    }

    #[test]
    fn test_scene_rotation_step() {
        let mapper = InputMapper::new(7.5);
        assert_eq!(
            mapper.map_keyboard(KeyCode::BracketRight, ElementState::Pressed),
            Some(InputAction::RotateScene(7.5))
        );
        assert_eq!(
            mapper.map_keyboard(KeyCode::BracketLeft, ElementState::Pressed),
            Some(InputAction::RotateScene(-7.5))
        );
    }
}
