//! Floating decorative objects along the dolly path, plus the glow ring and
//! the nebula planes behind them.

use crate::constants::*;
use crate::icons::{self, IconStyle, ICONS};
use crate::palette::rgb_hex;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use rand::Rng;
use serde::Deserialize;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecorationStyle {
    /// Spinning slabs.
    #[default]
    Blocks,
    /// Flat tiles that always face the camera.
    Sprites,
    /// Alternate blocks and sprites.
    Mixed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DecorationKind {
    /// Mesh rotated by `spin` (radians per tick, per axis).
    Block { spin: Vec3 },
    Sprite,
}

#[derive(Clone, Debug)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub icon: usize,
    pub position: Vec3,
    /// Euler XYZ. Unused for sprites.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub base_y: f32,
    pub float_amplitude: f32,
    pub float_speed: f32,
    pub phase: f32,
    base_scale: Option<Vec3>,
}

impl Decoration {
    /// Scale captured on the first update; `None` before that.
    pub fn base_scale(&self) -> Option<Vec3> {
        self.base_scale
    }

    pub fn update(&mut self, time: f32) {
        if let DecorationKind::Block { spin } = self.kind {
            self.rotation += spin;
        }
        let bob = (time * self.float_speed + self.phase).sin();
        self.position.y = self.base_y + bob * self.float_amplitude;
        let base = *self.base_scale.get_or_insert(self.scale);
        self.scale = base * (1.0 + (time * BREATHE_RATE + self.phase).sin() * BREATHE_FACTOR);
    }

    /// Model matrix. Sprites take the camera orientation so they face it.
    pub fn model_matrix(&self, camera_orientation: Quat) -> Mat4 {
        let rotation = match self.kind {
            DecorationKind::Block { .. } => {
                Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
            }
            DecorationKind::Sprite => camera_orientation,
        };
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }

    pub fn style(&self) -> &'static IconStyle {
        &ICONS[self.icon % ICONS.len()]
    }

    /// Flat fallback colours for the face and sides, used under the tiles.
    pub fn colors(&self) -> (Vec3, Vec3) {
        let icon = self.style();
        (rgb_hex(icon.background), rgb_hex(icon.accent))
    }

    /// Face and side layers in the icon texture array.
    pub fn layers(&self) -> (u32, u32) {
        (icons::face_layer(self.icon), icons::side_layer(self.icon))
    }
}

#[derive(Clone, Debug, Default)]
pub struct DecorationSet {
    items: Vec<Decoration>,
}

impl DecorationSet {
    /// Place `n` objects on a ring around the Z axis at random depths in
    /// `[DECORATION_Z_NEAR - DECORATION_Z_SPAN, DECORATION_Z_NEAR)`.
    pub fn init<R: Rng>(n: usize, style: DecorationStyle, rng: &mut R) -> Self {
        let items = (0..n)
            .map(|i| {
                let sprite = match style {
                    DecorationStyle::Blocks => false,
                    DecorationStyle::Sprites => true,
                    DecorationStyle::Mixed => i % 2 == 1,
                };
                let size = BLOCK_SIZE_MIN + rng.gen::<f32>() * BLOCK_SIZE_SPAN;
                let angle = (i as f32 / n as f32) * TAU + DECORATION_RING_OFFSET;
                let radius = DECORATION_RADIUS_MIN + rng.gen::<f32>() * DECORATION_RADIUS_SPAN;
                let position = Vec3::new(
                    angle.cos() * radius,
                    (rng.gen::<f32>() - 0.5) * DECORATION_Y_SPAN,
                    DECORATION_Z_NEAR - rng.gen::<f32>() * DECORATION_Z_SPAN,
                );
                let (kind, rotation, depth_ratio) = if sprite {
                    (DecorationKind::Sprite, Vec3::ZERO, SPRITE_DEPTH_RATIO)
                } else {
                    let rotation = Vec3::new(
                        (rng.gen::<f32>() - 0.5) * BLOCK_TILT[0],
                        (rng.gen::<f32>() - 0.5) * BLOCK_TILT[1],
                        (rng.gen::<f32>() - 0.5) * BLOCK_TILT[2],
                    );
                    let spin = Vec3::new(
                        (rng.gen::<f32>() - 0.5) * BLOCK_SPIN[0],
                        (rng.gen::<f32>() - 0.5) * BLOCK_SPIN[1],
                        (rng.gen::<f32>() - 0.5) * BLOCK_SPIN[2],
                    );
                    (DecorationKind::Block { spin }, rotation, BLOCK_DEPTH_RATIO)
                };
                Decoration {
                    kind,
                    icon: i % ICONS.len(),
                    position,
                    rotation,
                    scale: Vec3::new(size, size, size * depth_ratio),
                    base_y: position.y,
                    float_amplitude: FLOAT_AMPLITUDE_MIN + rng.gen::<f32>() * FLOAT_AMPLITUDE_SPAN,
                    float_speed: FLOAT_SPEED_MIN + rng.gen::<f32>() * FLOAT_SPEED_SPAN,
                    phase: rng.gen::<f32>() * TAU,
                    base_scale: None,
                }
            })
            .collect();
        Self { items }
    }

    pub fn update(&mut self, time: f32) {
        for d in &mut self.items {
            d.update(time);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decoration> {
        self.items.iter()
    }
}

/// Accent ring behind the first decorations. Drawn as a closed line loop of
/// unit radius scaled by [`RING_RADIUS`].
#[derive(Clone, Debug)]
pub struct GlowRing {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for GlowRing {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, RING_Z),
            rotation: Vec3::new(RING_TILT, 0.0, 0.0),
            scale: RING_RADIUS,
        }
    }
}

impl GlowRing {
    pub fn update(&mut self, time: f32) {
        self.rotation.x = RING_TILT + (time * RING_WOBBLE_RATE).sin() * RING_WOBBLE;
        self.rotation.z = time * RING_SPIN_RATE;
        self.scale = RING_RADIUS * (1.0 + (time * RING_PULSE_RATE).sin() * RING_PULSE);
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z),
            self.position,
        )
    }
}

#[derive(Clone, Debug)]
pub struct NebulaPlane {
    pub position: Vec3,
    pub rotation: Vec3,
    pub size: Vec2,
    /// Accent index (cycles 0, 1, 2).
    pub accent: usize,
    pub spin: f32,
    pub phase: f32,
    pub opacity: f32,
}

impl NebulaPlane {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.size.extend(1.0),
            Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z),
            self.position,
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct NebulaField {
    planes: Vec<NebulaPlane>,
}

impl NebulaField {
    pub fn init<R: Rng>(n: usize, rng: &mut R) -> Self {
        let planes = (0..n)
            .map(|i| NebulaPlane {
                size: Vec2::new(
                    NEBULA_SIZE_MIN + rng.gen::<f32>() * NEBULA_SIZE_SPAN,
                    NEBULA_SIZE_MIN + rng.gen::<f32>() * NEBULA_SIZE_SPAN,
                ),
                position: Vec3::new(
                    (rng.gen::<f32>() - 0.5) * NEBULA_X_SPAN,
                    (rng.gen::<f32>() - 0.5) * NEBULA_Y_SPAN,
                    NEBULA_Z_NEAR - rng.gen::<f32>() * NEBULA_Z_SPAN,
                ),
                rotation: Vec3::new(
                    rng.gen::<f32>() * PI,
                    rng.gen::<f32>() * PI,
                    rng.gen::<f32>() * PI,
                ),
                accent: i % 3,
                spin: (rng.gen::<f32>() - 0.5) * NEBULA_SPIN,
                phase: rng.gen::<f32>() * TAU,
                opacity: 0.0,
            })
            .collect();
        Self { planes }
    }

    /// Spin each plane about its normal and pulse its opacity; `gain` comes
    /// from the palette.
    pub fn update(&mut self, time: f32, gain: f32) {
        for p in &mut self.planes {
            p.rotation.z += p.spin;
            let pulse = (time * NEBULA_PULSE_RATE + p.phase).sin() * 0.5 + 0.5;
            p.opacity = pulse * NEBULA_PEAK_OPACITY * gain;
        }
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NebulaPlane> {
        self.planes.iter()
    }
}
