//! Input targets written by event handlers and read once per tick.

use crate::constants::MAX_PIXEL_RATIO;
use glam::Vec2;

/// Raw targets. Handlers only ever write these; the smoothed state lives in
/// [`crate::camera::CameraRig`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputTargets {
    /// Pointer in normalised device coordinates, y up.
    pub pointer: Vec2,
    /// Scroll progress in `[0, 1]`.
    pub scroll: f32,
}

/// Client-space pointer position to NDC. A degenerate viewport maps to the
/// centre.
#[inline]
pub fn pointer_ndc(client_x: f32, client_y: f32, viewport_w: f32, viewport_h: f32) -> Vec2 {
    if !(viewport_w > 0.0 && viewport_h > 0.0) {
        return Vec2::ZERO;
    }
    Vec2::new(
        (client_x / viewport_w) * 2.0 - 1.0,
        -(client_y / viewport_h) * 2.0 + 1.0,
    )
}

/// Fraction of the scrollable range covered, clamped to `[0, 1]`. Pages that
/// do not scroll report 0.
#[inline]
pub fn scroll_fraction(scroll_y: f32, document_height: f32, viewport_height: f32) -> f32 {
    let range = document_height - viewport_height;
    if range > 0.0 {
        (scroll_y / range).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// CSS pixels.
    pub width: f32,
    pub height: f32,
    /// Device pixel ratio after clamping.
    pub pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self::with_max_ratio(width, height, device_pixel_ratio, MAX_PIXEL_RATIO)
    }

    pub fn with_max_ratio(
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
        max_ratio: f32,
    ) -> Self {
        let pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(max_ratio)
        } else {
            1.0
        };
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            pixel_ratio,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Backing-store size in physical pixels, at least 1x1.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            ((self.width * self.pixel_ratio) as u32).max(1),
            ((self.height * self.pixel_ratio) as u32).max(1),
        )
    }
}
