/// Host-page contract for the web front-end.
///
/// Kept free of `web_sys` so the host tests can `include!` this file.
// Element id of the backdrop canvas when `Backdrop.init` gets no id
pub const DEFAULT_CANVAS_ID: &str = "bg3d";

// Attribute on <html> carrying the page theme ("light" or anything else)
pub const THEME_ATTRIBUTE: &str = "data-theme";

// Navigator property whose presence means WebGPU is available
pub const WEBGPU_NAVIGATOR_KEY: &str = "gpu";

// Frame deltas above this are clamped so a stalled tab does not jump the
// animation forward in one step
pub const MAX_FRAME_DELTA_SEC: f32 = 0.1;

// Surface configuration
pub const FRAME_LATENCY: u32 = 2;

// Clear colour of the canvas; the page background shows through
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 0.0];

/// Clamp a raw frame delta to `[0, MAX_FRAME_DELTA_SEC]`.
#[inline]
pub fn clamp_frame_delta(dt_sec: f32) -> f32 {
    if dt_sec.is_finite() {
        dt_sec.clamp(0.0, MAX_FRAME_DELTA_SEC)
    } else {
        0.0
    }
}

// Depth buffer cleared to the far plane every frame
pub const DEPTH_CLEAR: f32 = 1.0;

/// One draw inside the scene pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawStep {
    Nebula,
    Ring,
    Blocks,
    Connections,
    Particles,
}

/// Glow layers behind the blocks come first, then the blocks, then the
/// additive lines and points that the blocks may hide.
pub const DRAW_ORDER: [DrawStep; 5] = [
    DrawStep::Nebula,
    DrawStep::Ring,
    DrawStep::Blocks,
    DrawStep::Connections,
    DrawStep::Particles,
];

impl DrawStep {
    /// Every step depth-tests; only the blocks occlude.
    pub const fn writes_depth(self) -> bool {
        matches!(self, DrawStep::Blocks)
    }
}
