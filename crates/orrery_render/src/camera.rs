//! Look-at camera and perspective projection
//!
//! The camera orbits its target: yaw swings the eye around +Y, pitch lifts it
//! over or under the target, zoom scales the eye-to-target distance.

use glam::{Mat4, Vec3};
use orrery_input::CameraControl;

/// Pitch stays short of straight up/down so the up vector never aligns with the view
const MAX_PITCH_DEG: f32 = 89.0;

/// Look-at camera
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    min_distance: f32,
    max_distance: f32,
    start: (Vec3, Vec3, Vec3),
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(20.0, 50.0, 80.0), Vec3::ZERO, Vec3::Y)
    }
}

impl Camera {
    /// Create a camera; the given pose is also the one [`reset`](Self::reset) returns to
    pub fn new(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            eye,
            target,
            up,
            min_distance: 1.0,
            max_distance: 400.0,
            start: (eye, target, up),
        }
    }

    /// Builder: limit how close and how far zoom may go
    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min.max(f32::EPSILON);
        self.max_distance = max.max(self.min_distance);
        self
    }

    /// Point the camera
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.eye = eye;
        self.target = target;
        self.up = up;
    }

    /// Back to the start pose
    pub fn reset(&mut self) {
        let (eye, target, up) = self.start;
        self.look_at(eye, target, up);
    }

    /// Right-handed view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn distance(&self) -> f32 {
        (self.eye - self.target).length()
    }
}

impl CameraControl for Camera {
    fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        let offset = self.eye - self.target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return;
        }

        let yaw = offset.x.atan2(offset.z) + delta_yaw.to_radians();
        let max_pitch = MAX_PITCH_DEG.to_radians();
        let pitch = ((offset.y / distance).clamp(-1.0, 1.0).asin() + delta_pitch.to_radians())
            .clamp(-max_pitch, max_pitch);

        self.eye = self.target
            + distance * Vec3::new(pitch.cos() * yaw.sin(), pitch.sin(), pitch.cos() * yaw.cos());
    }

    fn zoom(&mut self, factor: f32) {
        let offset = self.eye - self.target;
        let distance = offset.length();
        if distance <= f32::EPSILON || factor <= 0.0 {
            return;
        }
        let new_distance = (distance * factor).clamp(self.min_distance, self.max_distance);
        self.eye = self.target + offset * (new_distance / distance);
    }

    fn eye(&self) -> Vec3 {
        self.eye
    }
}

/// Perspective projection
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_deg: 110.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 500.0,
        }
    }
}

impl Projection {
    pub fn new(fov_y_deg: f32, width: u32, height: u32, near: f32, far: f32) -> Self {
        let mut projection = Self {
            fov_y_deg,
            near,
            far,
            ..Default::default()
        };
        projection.resize(width, height);
        projection
    }

    /// Replace every parameter at once
    pub fn perspective(&mut self, fov_y_deg: f32, aspect: f32, near: f32, far: f32) {
        self.fov_y_deg = fov_y_deg;
        self.aspect = aspect;
        self.near = near;
        self.far = far;
    }

    /// Track a new viewport size; a zero dimension keeps the previous aspect
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring projection resize to {}x{}", width, height);
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// Right-handed perspective with a 0..1 depth range
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }
}
