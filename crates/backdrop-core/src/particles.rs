//! Particle field: static CPU-side samples plus a CPU mirror of the
//! per-vertex motion in `shaders/particles.wgsl`.
//!
//! Positions are sampled once and never written again. Everything that moves
//! on screen is derived at draw time from elapsed time, the particle's own
//! attributes and the smoothed pointer.

use crate::constants::*;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub phase: f32,
    pub speed: f32,
    pub size: f32,
    /// Index into the accent table the colour was drawn from.
    pub accent: usize,
    pub color: Vec3,
}

/// Per-instance vertex data, laid out for the particle pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
    pub phase: f32,
    pub speed: f32,
}

impl From<&Particle> for ParticleInstance {
    fn from(p: &Particle) -> Self {
        Self {
            position: p.position.to_array(),
            size: p.size,
            color: p.color.to_array(),
            phase: p.phase,
            speed: p.speed,
        }
    }
}

/// Fixed-size particle set. There is no mutable access to the particles, so
/// neither the count nor any position can change after construction.
#[derive(Clone, Debug)]
pub struct ParticleSet {
    particles: Vec<Particle>,
    radius: f32,
}

impl ParticleSet {
    /// Sample `count` particles inside a sphere of `radius`.
    pub fn init<R: Rng>(
        count: usize,
        radius: f32,
        accents: &[Vec3; 3],
        rng: &mut R,
    ) -> Self {
        let particles = (0..count)
            .map(|_| {
                let position = sample_in_sphere(radius, rng);
                let speed = PARTICLE_SPEED_MIN + rng.gen::<f32>() * PARTICLE_SPEED_SPAN;
                let phase = rng.gen::<f32>() * TAU;
                let size = PARTICLE_SIZE_MIN + rng.gen::<f32>() * PARTICLE_SIZE_SPAN;
                let accent = pick_accent(rng.gen::<f32>());
                Particle {
                    position,
                    phase,
                    speed,
                    size,
                    accent,
                    color: accents[accent],
                }
            })
            .collect();
        Self { particles, radius }
    }

    /// Wrap hand-placed particles. The bounding radius is taken from the
    /// farthest one.
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        let radius = particles
            .iter()
            .map(|p| p.position.length())
            .fold(0.0_f32, f32::max);
        Self { particles, radius }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.particles.iter().map(ParticleInstance::from).collect()
    }
}

/// Uniform-on-sphere direction with a power-law radius (`u^0.5 * radius`),
/// which pushes samples toward the surface.
pub fn sample_in_sphere<R: Rng>(radius: f32, rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    let r = rng.gen::<f32>().powf(RADIUS_EXPONENT) * radius;
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Map a uniform variate to an accent index using [`ACCENT_WEIGHTS`].
pub fn pick_accent(u: f32) -> usize {
    let mut acc = 0.0;
    for (i, w) in ACCENT_WEIGHTS.iter().enumerate() {
        acc += w;
        if u < acc {
            return i;
        }
    }
    ACCENT_WEIGHTS.len() - 1
}

#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Object-space displacement applied per vertex: orbital offset, wave, then
/// pointer attraction that weakens away from the field's axis.
pub fn displace(position: Vec3, time: f32, phase: f32, speed: f32, pointer: Vec2) -> Vec3 {
    let mut pos = position;
    let angle = time * ORBIT_RATE + pos.truncate().length() * ORBIT_RADIAL_RATE;
    pos.x += angle.sin() * ORBIT_RADIUS;
    pos.y += angle.cos() * ORBIT_RADIUS;
    pos.z += (time * WAVE_RATE * speed + phase + pos.x * WAVE_SPATIAL_RATE).sin() * WAVE_AMPLITUDE;
    let reach = POINTER_INFLUENCE_RADIUS - pos.truncate().length().min(POINTER_INFLUENCE_RADIUS);
    pos.x += pointer.x * reach * POINTER_INFLUENCE_GAIN;
    pos.y += pointer.y * reach * POINTER_INFLUENCE_GAIN;
    pos
}

/// Clip-space position of a particle for the given matrices.
pub fn screen_position(
    particle: &Particle,
    time: f32,
    pointer: Vec2,
    model_view: Mat4,
    projection: Mat4,
) -> Vec4 {
    let pos = displace(particle.position, time, particle.phase, particle.speed, pointer);
    projection * model_view * pos.extend(1.0)
}

/// On-screen point diameter in pixels for a point `view_depth` units in
/// front of the camera.
pub fn point_size_px(size: f32, pixel_ratio: f32, view_depth: f32) -> f32 {
    let depth = view_depth.max(1e-3);
    (size * pixel_ratio * (POINT_SIZE_SCALE / depth)).max(POINT_SIZE_MIN_PX)
}

/// 1 near the camera, 0 beyond [`DEPTH_FADE_FAR`].
pub fn depth_fade(view_depth: f32) -> f32 {
    1.0 - smoothstep(DEPTH_FADE_NEAR, DEPTH_FADE_FAR, view_depth)
}

/// Fragment alpha at distance `d` from the footprint centre (footprint spans
/// -0.5..0.5). `None` means the fragment is discarded.
pub fn fragment_alpha(d: f32, opacity: f32, fade: f32) -> Option<f32> {
    if d > POINT_MASK_RADIUS {
        return None;
    }
    Some((1.0 - smoothstep(POINT_SOFT_EDGE, POINT_MASK_RADIUS, d)) * opacity * fade)
}

/// Additive glow term added to the particle colour.
pub fn glow(d: f32) -> f32 {
    (-d * POINT_GLOW_FALLOFF).exp() * POINT_GLOW_GAIN
}

/// Euler (XYZ) rotation of the whole field.
pub fn field_rotation(time: f32, pointer: Vec2) -> Vec3 {
    Vec3::new(
        (time * FIELD_PITCH_RATE).sin() * FIELD_PITCH_AMPLITUDE + pointer.y * FIELD_PITCH_POINTER,
        time * FIELD_YAW_RATE + pointer.x * FIELD_YAW_POINTER,
        0.0,
    )
}

pub fn field_model(time: f32, pointer: Vec2) -> Mat4 {
    let r = field_rotation(time, pointer);
    Mat4::from_quat(Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z))
}
