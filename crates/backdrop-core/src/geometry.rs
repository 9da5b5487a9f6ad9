//! Static vertex data for the decoration meshes and the glow ring.

use crate::connections::LineVertex;
use glam::Vec3;
use std::f32::consts::TAU;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    /// Flat brightness for the face.
    pub shade: f32,
    /// 0 for front/back faces, 1 for the four sides.
    pub side: f32,
    /// Texture coordinate, v pointing down the tile.
    pub uv: [f32; 2],
}

// (normal, u, v) with u x v == normal, so each face winds counter-clockwise
// seen from outside.
const CUBE_FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
];

fn face_shade(normal: Vec3) -> (f32, f32) {
    if normal.z != 0.0 {
        (1.0, 0.0)
    } else if normal.y != 0.0 {
        (0.9, 1.0)
    } else {
        (0.8, 1.0)
    }
}

fn push_face(out: &mut Vec<MeshVertex>, normal: Vec3, u: Vec3, v: Vec3, shade: f32, side: f32) {
    let center = normal * 0.5;
    let corners = [
        center + (-u - v) * 0.5,
        center + (u - v) * 0.5,
        center + (u + v) * 0.5,
        center + (-u + v) * 0.5,
    ];
    let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
    for idx in [0, 1, 2, 0, 2, 3] {
        out.push(MeshVertex {
            position: corners[idx].to_array(),
            shade,
            side,
            uv: uvs[idx],
        });
    }
}

/// Unit cube centred on the origin, 36 non-indexed vertices.
pub fn unit_cube() -> Vec<MeshVertex> {
    let mut out = Vec::with_capacity(36);
    for (n, u, v) in CUBE_FACES {
        let (shade, side) = face_shade(n);
        push_face(&mut out, n, u, v, shade, side);
    }
    out
}

/// Unit quad in the XY plane facing +Z, 6 vertices.
pub fn unit_quad() -> Vec<MeshVertex> {
    let mut out = Vec::with_capacity(6);
    let (_, u, v) = CUBE_FACES[4];
    push_face(&mut out, Vec3::ZERO, u, v, 1.0, 0.0);
    out
}

/// Closed unit circle in the XY plane as `segments` line-list pairs.
pub fn ring_line_list(segments: usize) -> Vec<LineVertex> {
    let segments = segments.max(3);
    let point = |i: usize| {
        let a = (i % segments) as f32 / segments as f32 * TAU;
        [a.cos(), a.sin(), 0.0]
    };
    (0..segments)
        .flat_map(|i| {
            [
                LineVertex { position: point(i), color: [1.0; 3] },
                LineVertex { position: point(i + 1), color: [1.0; 3] },
            ]
        })
        .collect()
}
