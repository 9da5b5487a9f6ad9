//! Runtime scene configuration.
//!
//! Defaults come from [`crate::constants`]. The host page may pass a JSON
//! object with any subset of the fields (camelCase) to override them.

use crate::constants::*;
use crate::decorations::DecorationStyle;
use crate::error::BackdropError;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    pub particle_count: usize,
    pub field_radius: f32,
    pub max_connection_distance: f32,
    pub connection_capacity: usize,
    pub connection_stride: usize,
    pub decoration_count: usize,
    pub decoration_style: DecorationStyle,
    pub nebula_count: usize,
    pub camera_base_z: f32,
    pub scroll_depth: f32,
    pub pointer_smoothing: f32,
    pub scroll_smoothing: f32,
    pub max_pixel_ratio: f32,
    /// Fixed sampling seed; `None` draws one at init.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            field_radius: FIELD_RADIUS,
            max_connection_distance: MAX_CONNECTION_DISTANCE,
            connection_capacity: CONNECTION_CAPACITY,
            connection_stride: CONNECTION_STRIDE,
            decoration_count: DECORATION_COUNT,
            decoration_style: DecorationStyle::default(),
            nebula_count: NEBULA_COUNT,
            camera_base_z: CAMERA_BASE_Z,
            scroll_depth: SCROLL_DEPTH,
            pointer_smoothing: POINTER_SMOOTHING,
            scroll_smoothing: SCROLL_SMOOTHING,
            max_pixel_ratio: MAX_PIXEL_RATIO,
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Parse overrides from JSON and validate the merged result.
    pub fn from_json(json: &str) -> Result<Self, BackdropError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BackdropError> {
        let invalid = |msg: &str| Err(BackdropError::InvalidConfig(msg.to_string()));
        if self.particle_count == 0 {
            return invalid("particleCount must be > 0");
        }
        if !(self.field_radius > 0.0) {
            return invalid("fieldRadius must be > 0");
        }
        if !(self.max_connection_distance > 0.0) {
            return invalid("maxConnectionDistance must be > 0");
        }
        if self.connection_capacity == 0 {
            return invalid("connectionCapacity must be > 0");
        }
        if self.connection_stride == 0 {
            return invalid("connectionStride must be >= 1");
        }
        if !(self.scroll_depth >= 0.0) {
            return invalid("scrollDepth must be >= 0");
        }
        if !(self.pointer_smoothing > 0.0 && self.pointer_smoothing <= 1.0) {
            return invalid("pointerSmoothing must be in (0, 1]");
        }
        if !(self.scroll_smoothing > 0.0 && self.scroll_smoothing <= 1.0) {
            return invalid("scrollSmoothing must be in (0, 1]");
        }
        if !(self.max_pixel_ratio >= 1.0) {
            return invalid("maxPixelRatio must be >= 1");
        }
        Ok(())
    }
}
