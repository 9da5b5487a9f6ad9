//! Scroll-linked camera rig.

use crate::constants::*;
use crate::input::InputTargets;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

/// One step of exponential smoothing: move `current` a fraction `k` of the
/// way toward `target`.
#[inline]
pub fn smooth_toward(current: f32, target: f32, k: f32) -> f32 {
    current + (target - current) * k
}

/// Perspective camera positioned by translation + Euler XYZ rotation.
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, CAMERA_BASE_Z),
            rotation: Vec3::ZERO,
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// World to view: inverse of the camera's world transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position).inverse()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CameraRigParams {
    pub base_z: f32,
    pub scroll_depth: f32,
    pub vertical_drift: f32,
    pub scroll_tilt: f32,
    pub pointer_tilt: f32,
    pub pointer_yaw: f32,
    pub pointer_smoothing: f32,
    pub scroll_smoothing: f32,
}

impl Default for CameraRigParams {
    fn default() -> Self {
        Self {
            base_z: CAMERA_BASE_Z,
            scroll_depth: SCROLL_DEPTH,
            vertical_drift: SCROLL_VERTICAL_DRIFT,
            scroll_tilt: SCROLL_TILT,
            pointer_tilt: POINTER_TILT,
            pointer_yaw: POINTER_YAW,
            pointer_smoothing: POINTER_SMOOTHING,
            scroll_smoothing: SCROLL_SMOOTHING,
        }
    }
}

/// Smoothed pointer and scroll state, and the camera pose derived from it.
#[derive(Clone, Debug, Default)]
pub struct CameraRig {
    pub params: CameraRigParams,
    pointer: Vec2,
    scroll_progress: f32,
}

impl CameraRig {
    pub fn new(params: CameraRigParams) -> Self {
        Self {
            params,
            pointer: Vec2::ZERO,
            scroll_progress: 0.0,
        }
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn scroll_progress(&self) -> f32 {
        self.scroll_progress
    }

    /// Advance both filters by one tick.
    pub fn tick(&mut self, targets: &InputTargets) {
        let kp = self.params.pointer_smoothing;
        self.pointer = Vec2::new(
            smooth_toward(self.pointer.x, targets.pointer.x, kp),
            smooth_toward(self.pointer.y, targets.pointer.y, kp),
        );
        self.scroll_progress = smooth_toward(
            self.scroll_progress,
            targets.scroll.clamp(0.0, 1.0),
            self.params.scroll_smoothing,
        );
    }

    pub fn position(&self) -> Vec3 {
        let p = &self.params;
        Vec3::new(
            0.0,
            -self.scroll_progress * p.vertical_drift,
            p.base_z - self.scroll_progress * p.scroll_depth,
        )
    }

    pub fn rotation(&self) -> Vec3 {
        let p = &self.params;
        Vec3::new(
            -self.scroll_progress * p.scroll_tilt + self.pointer.y * p.pointer_tilt,
            self.pointer.x * p.pointer_yaw,
            0.0,
        )
    }

    pub fn apply(&self, camera: &mut Camera) {
        camera.position = self.position();
        camera.rotation = self.rotation();
    }
}
