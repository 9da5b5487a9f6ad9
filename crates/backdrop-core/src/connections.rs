//! Proximity graph between particles, written into a fixed-capacity buffer.
//!
//! Only every `stride`-th particle takes part, which bounds a rebuild to about
//! `(N / stride)^2 / 2` distance tests. Distances use the static sampled
//! positions, not the animated on-screen ones.

use crate::constants::{CONNECTION_THROTTLE_HZ, CONNECTION_THROTTLE_MODULUS};
use crate::particles::ParticleSet;
use glam::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
    pub start_color: Vec3,
    pub end_color: Vec3,
    /// `1 - distance / max_distance`.
    pub opacity: f32,
}

impl Segment {
    /// Degenerate, invisible segment used for unused slots.
    pub const ZERO: Segment = Segment {
        start: Vec3::ZERO,
        end: Vec3::ZERO,
        start_color: Vec3::ZERO,
        end_color: Vec3::ZERO,
        opacity: 0.0,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

#[derive(Clone, Debug)]
pub struct ConnectionBuffer {
    slots: Vec<Segment>,
    active: usize,
    revision: u64,
}

impl ConnectionBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Segment::ZERO; capacity],
            active: 0,
            revision: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of segments written by the last rebuild.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Bumped on every rebuild so the renderer knows when to re-upload.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn slots(&self) -> &[Segment] {
        &self.slots
    }

    pub fn active_segments(&self) -> &[Segment] {
        &self.slots[..self.active]
    }

    /// Rebuild the graph. Pairs `(i, j)` with `i < j`, both multiples of
    /// `stride`, closer than `max_distance` are written in scan order until
    /// the buffer is full; all remaining slots are zeroed. Endpoint colours
    /// are `colors[0]` and `colors[1]` scaled by the segment opacity.
    pub fn recompute(
        &mut self,
        particles: &ParticleSet,
        max_distance: f32,
        stride: usize,
        colors: [Vec3; 2],
    ) -> usize {
        let stride = stride.max(1);
        let capacity = self.slots.len();
        let ps = particles.as_slice();
        let mut written = 0;

        'outer: for i in (0..ps.len()).step_by(stride) {
            for j in (i + stride..ps.len()).step_by(stride) {
                if written >= capacity {
                    break 'outer;
                }
                let a = ps[i].position;
                let b = ps[j].position;
                let dist = a.distance(b);
                if dist < max_distance {
                    let opacity = 1.0 - dist / max_distance;
                    self.slots[written] = Segment {
                        start: a,
                        end: b,
                        start_color: colors[0] * opacity,
                        end_color: colors[1] * opacity,
                        opacity,
                    };
                    written += 1;
                }
            }
        }

        for slot in &mut self.slots[written..] {
            *slot = Segment::ZERO;
        }
        self.active = written;
        self.revision = self.revision.wrapping_add(1);
        written
    }

    /// Two vertices per slot, `capacity * 2` in total.
    pub fn write_vertices(&self, out: &mut Vec<LineVertex>) {
        out.clear();
        out.reserve(self.slots.len() * 2);
        for s in &self.slots {
            out.push(LineVertex {
                position: s.start.to_array(),
                color: s.start_color.to_array(),
            });
            out.push(LineVertex {
                position: s.end.to_array(),
                color: s.end_color.to_array(),
            });
        }
    }
}

/// Time-based gate for rebuilds: due whenever `floor(elapsed * rate_hz)` is a
/// multiple of `modulus`, i.e. during 1 of every `modulus` windows.
#[derive(Clone, Copy, Debug)]
pub struct ConnectionThrottle {
    pub rate_hz: f32,
    pub modulus: u64,
}

impl Default for ConnectionThrottle {
    fn default() -> Self {
        Self {
            rate_hz: CONNECTION_THROTTLE_HZ,
            modulus: CONNECTION_THROTTLE_MODULUS,
        }
    }
}

impl ConnectionThrottle {
    pub fn is_due(&self, elapsed_sec: f32) -> bool {
        let window = (elapsed_sec.max(0.0) * self.rate_hz).floor() as u64;
        window % self.modulus.max(1) == 0
    }
}
