// Shared tuning constants for the backdrop scene. `SceneConfig::default()`
// is built from these; the web front-end may override them at init.

// Particle field
pub const PARTICLE_COUNT: usize = 600;
pub const FIELD_RADIUS: f32 = 50.0;
pub const RADIUS_EXPONENT: f32 = 0.5; // < 1 biases samples toward the surface
pub const ACCENT_WEIGHTS: [f32; 3] = [0.5, 0.3, 0.2];
pub const PARTICLE_SPEED_MIN: f32 = 0.2;
pub const PARTICLE_SPEED_SPAN: f32 = 0.8;
pub const PARTICLE_SIZE_MIN: f32 = 0.5;
pub const PARTICLE_SIZE_SPAN: f32 = 2.5;

// Per-vertex motion (mirrored in shaders/particles.wgsl)
pub const ORBIT_RATE: f32 = 0.1;
pub const ORBIT_RADIAL_RATE: f32 = 0.02;
pub const ORBIT_RADIUS: f32 = 0.5;
pub const WAVE_RATE: f32 = 0.15;
pub const WAVE_SPATIAL_RATE: f32 = 0.05;
pub const WAVE_AMPLITUDE: f32 = 1.5;
pub const POINTER_INFLUENCE_RADIUS: f32 = 30.0;
pub const POINTER_INFLUENCE_GAIN: f32 = 0.15;
pub const POINT_SIZE_SCALE: f32 = 80.0;
pub const POINT_SIZE_MIN_PX: f32 = 1.0;
pub const DEPTH_FADE_NEAR: f32 = 20.0;
pub const DEPTH_FADE_FAR: f32 = 100.0;
pub const POINT_MASK_RADIUS: f32 = 0.5;
pub const POINT_SOFT_EDGE: f32 = 0.1;
pub const POINT_GLOW_FALLOFF: f32 = 4.0;
pub const POINT_GLOW_GAIN: f32 = 0.5;

// Whole-field rotation
pub const FIELD_YAW_RATE: f32 = 0.02;
pub const FIELD_YAW_POINTER: f32 = 0.3;
pub const FIELD_PITCH_RATE: f32 = 0.01;
pub const FIELD_PITCH_AMPLITUDE: f32 = 0.1;
pub const FIELD_PITCH_POINTER: f32 = 0.2;

// Connection graph
pub const MAX_CONNECTION_DISTANCE: f32 = 8.0;
pub const CONNECTION_CAPACITY: usize = 200;
pub const CONNECTION_STRIDE: usize = 12;
pub const CONNECTION_THROTTLE_HZ: f32 = 10.0;
pub const CONNECTION_THROTTLE_MODULUS: u64 = 3;

// Decorations
pub const DECORATION_COUNT: usize = 5;
pub const DECORATION_RING_OFFSET: f32 = 0.3;
pub const DECORATION_RADIUS_MIN: f32 = 12.0;
pub const DECORATION_RADIUS_SPAN: f32 = 15.0;
pub const DECORATION_Y_SPAN: f32 = 15.0;
pub const DECORATION_Z_NEAR: f32 = -5.0;
pub const DECORATION_Z_SPAN: f32 = 35.0;
pub const BLOCK_SIZE_MIN: f32 = 3.0;
pub const BLOCK_SIZE_SPAN: f32 = 1.5;
pub const BLOCK_DEPTH_RATIO: f32 = 0.4;
pub const SPRITE_DEPTH_RATIO: f32 = 0.02;
pub const BLOCK_SPIN: [f32; 3] = [0.004, 0.006, 0.002]; // full span per axis, per tick
pub const BLOCK_TILT: [f32; 3] = [0.3, 0.5, 0.15];
pub const FLOAT_SPEED_MIN: f32 = 0.3;
pub const FLOAT_SPEED_SPAN: f32 = 0.4;
pub const FLOAT_AMPLITUDE_MIN: f32 = 1.5;
pub const FLOAT_AMPLITUDE_SPAN: f32 = 2.5;
pub const BREATHE_RATE: f32 = 0.5;
pub const BREATHE_FACTOR: f32 = 0.05;

// Glow ring
pub const RING_RADIUS: f32 = 18.0;
pub const RING_SEGMENTS: usize = 100;
pub const RING_Z: f32 = -10.0;
pub const RING_TILT: f32 = std::f32::consts::PI * 0.4;
pub const RING_WOBBLE_RATE: f32 = 0.2;
pub const RING_WOBBLE: f32 = 0.1;
pub const RING_SPIN_RATE: f32 = 0.05;
pub const RING_PULSE_RATE: f32 = 0.8;
pub const RING_PULSE: f32 = 0.03;

// Nebula planes
pub const NEBULA_COUNT: usize = 5;
pub const NEBULA_SIZE_MIN: f32 = 40.0;
pub const NEBULA_SIZE_SPAN: f32 = 30.0;
pub const NEBULA_X_SPAN: f32 = 40.0;
pub const NEBULA_Y_SPAN: f32 = 30.0;
pub const NEBULA_Z_NEAR: f32 = -20.0;
pub const NEBULA_Z_SPAN: f32 = 40.0;
pub const NEBULA_SPIN: f32 = 0.002;
pub const NEBULA_PULSE_RATE: f32 = 0.3;
pub const NEBULA_PEAK_OPACITY: f32 = 0.025;

// Camera
pub const CAMERA_FOVY_DEG: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;
pub const CAMERA_BASE_Z: f32 = 30.0;
pub const SCROLL_DEPTH: f32 = 30.0;
pub const SCROLL_VERTICAL_DRIFT: f32 = 5.0;
pub const SCROLL_TILT: f32 = 0.15;
pub const POINTER_TILT: f32 = 0.08;
pub const POINTER_YAW: f32 = 0.12;

// Smoothing coefficients, applied once per tick
pub const POINTER_SMOOTHING: f32 = 0.05;
pub const SCROLL_SMOOTHING: f32 = 0.03;

// Viewport
pub const MAX_PIXEL_RATIO: f32 = 2.0;
