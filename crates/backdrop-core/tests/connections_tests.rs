use backdrop_core::connections::*;
use backdrop_core::palette::Palette;
use backdrop_core::particles::{Particle, ParticleSet};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn particle_at(position: Vec3) -> Particle {
    Particle {
        position,
        phase: 0.0,
        speed: 1.0,
        size: 1.0,
        accent: 0,
        color: Vec3::ONE,
    }
}

fn colors() -> [Vec3; 2] {
    let a = Palette::dark().accents;
    [a[0], a[1]]
}

/// `n` particles, far apart from each other except the ones overridden.
fn sparse_set(n: usize, overrides: &[(usize, Vec3)]) -> ParticleSet {
    let mut ps: Vec<Particle> = (0..n)
        .map(|i| particle_at(Vec3::new(0.0, 100.0 * (i as f32 + 1.0), 0.0)))
        .collect();
    for (i, pos) in overrides {
        ps[*i] = particle_at(*pos);
    }
    ParticleSet::from_particles(ps)
}

#[test]
fn near_pair_on_stride_gets_linear_opacity() {
    let set = sparse_set(13, &[(0, Vec3::ZERO), (12, Vec3::new(5.0, 0.0, 0.0))]);
    let mut buf = ConnectionBuffer::with_capacity(200);
    let written = buf.recompute(&set, 8.0, 12, colors());
    assert_eq!(written, 1);
    let seg = buf.slots()[0];
    assert!((seg.opacity - 0.375).abs() < 1e-6);
    assert_eq!(seg.start, Vec3::ZERO);
    assert_eq!(seg.end, Vec3::new(5.0, 0.0, 0.0));
    assert!((seg.start_color - colors()[0] * 0.375).length() < 1e-6);
    assert!((seg.end_color - colors()[1] * 0.375).length() < 1e-6);
}

#[test]
fn off_stride_particles_are_never_connected() {
    let set = sparse_set(13, &[(0, Vec3::ZERO), (5, Vec3::new(1.0, 0.0, 0.0))]);
    let mut buf = ConnectionBuffer::with_capacity(10);
    assert_eq!(buf.recompute(&set, 8.0, 12, colors()), 0);
    assert!(buf.slots().iter().all(Segment::is_zero));
}

#[test]
fn writes_never_exceed_capacity_and_tail_is_zeroed() {
    // Everything clustered: every sampled pair is in range.
    let mut rng = StdRng::seed_from_u64(1);
    let dense = ParticleSet::init(600, 2.0, &Palette::dark().accents, &mut rng);
    let mut buf = ConnectionBuffer::with_capacity(200);
    let written = buf.recompute(&dense, 8.0, 12, colors());
    assert_eq!(written, 200);
    assert_eq!(buf.active(), 200);
    assert_eq!(buf.slots().len(), 200);

    // A sparse rebuild afterwards must clear the stale slots.
    let sparse = sparse_set(25, &[(0, Vec3::ZERO), (12, Vec3::new(1.0, 0.0, 0.0))]);
    let written = buf.recompute(&sparse, 8.0, 12, colors());
    assert_eq!(written, 1);
    assert_eq!(buf.capacity(), 200);
    assert!(buf.slots()[written..].iter().all(Segment::is_zero));
}

#[test]
fn empty_graph_is_valid() {
    let set = sparse_set(48, &[]);
    let mut buf = ConnectionBuffer::with_capacity(16);
    assert_eq!(buf.recompute(&set, 8.0, 12, colors()), 0);
    assert!(buf.active_segments().is_empty());
    assert!(buf.slots().iter().all(|s| s.start == Vec3::ZERO && s.end == Vec3::ZERO));
}

#[test]
fn rebuild_bumps_revision() {
    let set = sparse_set(13, &[]);
    let mut buf = ConnectionBuffer::with_capacity(4);
    let r0 = buf.revision();
    buf.recompute(&set, 8.0, 12, colors());
    assert_eq!(buf.revision(), r0 + 1);
}

#[test]
fn vertices_cover_every_slot() {
    let set = sparse_set(13, &[(0, Vec3::ZERO), (12, Vec3::new(4.0, 0.0, 0.0))]);
    let mut buf = ConnectionBuffer::with_capacity(8);
    buf.recompute(&set, 8.0, 12, colors());
    let mut verts = Vec::new();
    buf.write_vertices(&mut verts);
    assert_eq!(verts.len(), 16);
    assert_eq!(verts[1].position, [4.0, 0.0, 0.0]);
    assert!(verts[2..].iter().all(|v| *v == LineVertex::default()));
}

#[test]
fn fading_segments_contribute_no_light() {
    // Additive lines add `color` to the target, so opacity lives in the
    // colour itself: an edge at the range limit and every unused slot
    // must carry black vertices.
    let set = sparse_set(
        25,
        &[
            (0, Vec3::ZERO),
            (12, Vec3::new(7.999, 0.0, 0.0)),
            (24, Vec3::new(0.0, 2.0, 0.0)),
        ],
    );
    let mut buf = ConnectionBuffer::with_capacity(6);
    assert_eq!(buf.recompute(&set, 8.0, 12, colors()), 2);

    let mut verts = Vec::new();
    buf.write_vertices(&mut verts);
    let brightness = |v: &LineVertex| v.color.iter().map(|c| c.abs()).sum::<f32>();

    // (0, 12) is almost exactly max_distance apart.
    assert!(buf.slots()[0].opacity < 1e-3);
    assert!(brightness(&verts[0]) < 1e-3 && brightness(&verts[1]) < 1e-3);
    // (0, 24) is close and visibly lit.
    assert!(brightness(&verts[2]) > 0.1);
    // Zeroed tail adds nothing at all.
    assert!(verts[4..].iter().all(|v| brightness(v) == 0.0));
}

#[test]
fn throttle_is_due_one_window_in_three() {
    let t = ConnectionThrottle::default();
    assert!(t.is_due(0.0));
    assert!(t.is_due(0.05));
    assert!(!t.is_due(0.1));
    assert!(!t.is_due(0.25));
    assert!(t.is_due(0.3));
    assert!(t.is_due(0.6));

    // Over one simulated second at 60 ticks, about a third are due.
    let due = (0..60).filter(|i| t.is_due(*i as f32 / 60.0)).count();
    assert!((18..=26).contains(&due), "due {}", due);
}
