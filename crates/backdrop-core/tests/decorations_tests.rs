use backdrop_core::constants::*;
use backdrop_core::decorations::*;
use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn set(n: usize, style: DecorationStyle) -> DecorationSet {
    let mut rng = StdRng::seed_from_u64(21);
    DecorationSet::init(n, style, &mut rng)
}

#[test]
fn objects_sit_on_ring_along_forward_axis() {
    let s = set(5, DecorationStyle::Blocks);
    assert_eq!(s.len(), 5);
    for d in s.iter() {
        let xz_radius = d.position.x.abs();
        assert!(xz_radius <= DECORATION_RADIUS_MIN + DECORATION_RADIUS_SPAN);
        assert!(d.position.z <= DECORATION_Z_NEAR);
        assert!(d.position.z >= DECORATION_Z_NEAR - DECORATION_Z_SPAN);
        assert!(d.position.y.abs() <= DECORATION_Y_SPAN / 2.0);
    }
}

#[test]
fn base_scale_is_captured_from_construction_scale() {
    let mut s = set(3, DecorationStyle::Blocks);
    let initial: Vec<Vec3> = s.iter().map(|d| d.scale).collect();
    assert!(s.iter().all(|d| d.base_scale().is_none()));

    s.update(1.25);
    for (d, scale0) in s.iter().zip(&initial) {
        assert_eq!(d.base_scale(), Some(*scale0));
        let factor = 1.0 + (1.25 * BREATHE_RATE + d.phase).sin() * BREATHE_FACTOR;
        assert!((d.scale - *scale0 * factor).length() < 1e-5);
    }

    // Later ticks keep breathing around the same base.
    s.update(7.0);
    for (d, scale0) in s.iter().zip(&initial) {
        assert_eq!(d.base_scale(), Some(*scale0));
    }
}

#[test]
fn bobbing_follows_float_parameters() {
    let mut s = set(4, DecorationStyle::Mixed);
    let t = 3.3;
    s.update(t);
    for d in s.iter() {
        let expected = d.base_y + (t * d.float_speed + d.phase).sin() * d.float_amplitude;
        assert!((d.position.y - expected).abs() < 1e-5);
    }
}

#[test]
fn blocks_spin_and_sprites_do_not() {
    let mut s = set(4, DecorationStyle::Mixed);
    let before: Vec<Vec3> = s.iter().map(|d| d.rotation).collect();
    for i in 0..10 {
        s.update(i as f32 * 0.016);
    }
    for (d, r0) in s.iter().zip(&before) {
        match d.kind {
            DecorationKind::Block { spin } => {
                assert!((d.rotation - (*r0 + spin * 10.0)).length() < 1e-5);
            }
            DecorationKind::Sprite => assert_eq!(d.rotation, *r0),
        }
    }
}

#[test]
fn mixed_style_alternates_kinds() {
    let s = set(4, DecorationStyle::Mixed);
    let kinds: Vec<bool> = s
        .iter()
        .map(|d| matches!(d.kind, DecorationKind::Sprite))
        .collect();
    assert_eq!(kinds, vec![false, true, false, true]);
}

#[test]
fn sprite_model_uses_camera_orientation() {
    let s = set(1, DecorationStyle::Sprites);
    let d = s.iter().next().cloned();
    let Some(d) = d else {
        panic!("expected one decoration");
    };
    let q = Quat::from_rotation_y(0.7);
    let m = d.model_matrix(q);
    let (_, rotation, translation) = m.to_scale_rotation_translation();
    // acos near 1 is too coarse in f32; compare the quaternions directly
    assert!(rotation.dot(q).abs() > 1.0 - 1e-5);
    assert!((translation - d.position).length() < 1e-4);
}

#[test]
fn ring_pulses_around_radius() {
    let mut ring = GlowRing::default();
    for i in 0..200 {
        ring.update(i as f32 * 0.1);
        assert!(ring.scale >= RING_RADIUS * (1.0 - RING_PULSE) - 1e-4);
        assert!(ring.scale <= RING_RADIUS * (1.0 + RING_PULSE) + 1e-4);
        assert!((ring.rotation.x - RING_TILT).abs() <= RING_WOBBLE + 1e-5);
    }
}

#[test]
fn nebula_opacity_respects_gain() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut field = NebulaField::init(5, &mut rng);
    assert_eq!(field.len(), 5);
    field.update(2.0, 1.0);
    let full: Vec<f32> = field.iter().map(|p| p.opacity).collect();
    field.update(2.0, 0.5);
    for (p, o) in field.iter().zip(&full) {
        assert!(p.opacity <= NEBULA_PEAK_OPACITY);
        assert!((p.opacity - o * 0.5).abs() < 1e-6);
    }
}

#[test]
fn cube_faces_wind_outward() {
    use backdrop_core::geometry::unit_cube;
    let verts = unit_cube();
    assert_eq!(verts.len(), 36);
    for tri in verts.chunks(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|v| Vec3::from(v.position));
        let normal = (b - a).cross(c - a);
        let centroid = (a + b + c) / 3.0;
        assert!(normal.dot(centroid) > 0.0, "triangle winds inward");
    }
    let sides = verts.iter().filter(|v| v.side == 1.0).count();
    assert_eq!(sides, 24);
}

#[test]
fn ring_is_closed_loop() {
    use backdrop_core::geometry::ring_line_list;
    let ring = ring_line_list(RING_SEGMENTS);
    assert_eq!(ring.len(), RING_SEGMENTS * 2);
    let first = Vec3::from(ring[0].position);
    let last = Vec3::from(ring[ring.len() - 1].position);
    assert!((first - last).length() < 1e-5);
    assert!(ring
        .iter()
        .all(|v| (Vec3::from(v.position).length() - 1.0).abs() < 1e-5));
}
