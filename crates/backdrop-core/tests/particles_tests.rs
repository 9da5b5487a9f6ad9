use backdrop_core::constants::*;
use backdrop_core::palette::Palette;
use backdrop_core::particles::*;
use glam::{Mat4, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sample_set(count: usize, radius: f32, seed: u64) -> ParticleSet {
    let mut rng = StdRng::seed_from_u64(seed);
    ParticleSet::init(count, radius, &Palette::dark().accents, &mut rng)
}

#[test]
fn init_produces_requested_count_inside_radius() {
    let set = sample_set(600, 50.0, 7);
    assert_eq!(set.len(), 600);
    for p in set.as_slice() {
        assert!(p.position.length() <= 50.0 + 1e-3, "{:?}", p.position);
    }
}

#[test]
fn attributes_stay_in_range() {
    let set = sample_set(500, 10.0, 11);
    for p in set.as_slice() {
        let speed_max = PARTICLE_SPEED_MIN + PARTICLE_SPEED_SPAN;
        assert!(p.speed >= PARTICLE_SPEED_MIN && p.speed < speed_max);
        assert!(p.size >= PARTICLE_SIZE_MIN && p.size < PARTICLE_SIZE_MIN + PARTICLE_SIZE_SPAN);
        assert!(p.phase >= 0.0 && p.phase < std::f32::consts::TAU);
        assert!(p.accent < 3);
        assert_eq!(p.color, Palette::dark().accents[p.accent]);
    }
}

#[test]
fn radius_distribution_is_biased_toward_surface() {
    // u^0.5 puts the median radius at R * sqrt(0.5) ~ 0.707 R,
    // well above the 0.5 R a uniform radius would give.
    let set = sample_set(4000, 1.0, 3);
    let mut radii: Vec<f32> = set.as_slice().iter().map(|p| p.position.length()).collect();
    radii.sort_by(|a, b| a.total_cmp(b));
    let median = radii[radii.len() / 2];
    assert!(median > 0.65 && median < 0.76, "median {}", median);
}

#[test]
fn pick_accent_uses_fixed_weights() {
    assert_eq!(pick_accent(0.0), 0);
    assert_eq!(pick_accent(0.49), 0);
    assert_eq!(pick_accent(0.5), 1);
    assert_eq!(pick_accent(0.79), 1);
    assert_eq!(pick_accent(0.8), 2);
    assert_eq!(pick_accent(0.999), 2);
}

#[test]
fn accent_shares_roughly_match_weights() {
    let set = sample_set(6000, 5.0, 99);
    let mut counts = [0usize; 3];
    for p in set.as_slice() {
        counts[p.accent] += 1;
    }
    let share = |i: usize| counts[i] as f32 / set.len() as f32;
    assert!((share(0) - 0.5).abs() < 0.03);
    assert!((share(1) - 0.3).abs() < 0.03);
    assert!((share(2) - 0.2).abs() < 0.03);
}

#[test]
fn same_seed_gives_same_field() {
    let a = sample_set(50, 20.0, 42);
    let b = sample_set(50, 20.0, 42);
    assert_eq!(a.as_slice(), b.as_slice());
}

#[test]
fn displace_at_rest_only_orbits_and_waves() {
    let p = Vec3::new(0.0, 0.0, 0.0);
    let out = displace(p, 0.0, 0.0, 1.0, Vec2::ZERO);
    // angle = 0 -> (sin 0, cos 0) * 0.5; wave sin(0) = 0.
    assert!((out - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-6);
}

#[test]
fn pointer_attraction_fades_out_at_influence_radius() {
    let far = Vec3::new(40.0, 0.0, 0.0);
    let a = displace(far, 1.0, 0.3, 0.5, Vec2::ZERO);
    let b = displace(far, 1.0, 0.3, 0.5, Vec2::new(1.0, 1.0));
    assert!((a - b).length() < 1e-5);

    let near = Vec3::ZERO;
    let c = displace(near, 0.0, 0.0, 1.0, Vec2::ZERO);
    let d = displace(near, 0.0, 0.0, 1.0, Vec2::new(1.0, 0.0));
    assert!(d.x > c.x + 3.0);
}

#[test]
fn point_size_scales_with_pixel_ratio_and_depth() {
    let s1 = point_size_px(2.0, 1.0, 40.0);
    let s2 = point_size_px(2.0, 2.0, 40.0);
    let s3 = point_size_px(2.0, 1.0, 80.0);
    assert!((s1 - 4.0).abs() < 1e-5);
    assert!((s2 - 2.0 * s1).abs() < 1e-5);
    assert!((s3 - s1 / 2.0).abs() < 1e-5);
    assert_eq!(point_size_px(0.5, 1.0, 1000.0), POINT_SIZE_MIN_PX);
}

#[test]
fn fragment_mask_is_circular() {
    assert!(fragment_alpha(0.51, 1.0, 1.0).is_none());
    let centre = fragment_alpha(0.0, 0.7, 1.0).unwrap_or(0.0);
    assert!((centre - 0.7).abs() < 1e-6);
    let edge = fragment_alpha(0.5, 1.0, 1.0).unwrap_or(1.0);
    assert!(edge.abs() < 1e-6);
    assert!(glow(0.0) > glow(0.4));
}

#[test]
fn depth_fade_goes_from_one_to_zero() {
    assert_eq!(depth_fade(10.0), 1.0);
    assert_eq!(depth_fade(150.0), 0.0);
    let mid = depth_fade(60.0);
    assert!(mid > 0.0 && mid < 1.0);
}

#[test]
fn screen_position_matches_manual_transform() {
    let set = sample_set(1, 5.0, 5);
    let p = set.as_slice()[0];
    let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -30.0));
    let proj = Mat4::perspective_rh(1.0, 1.5, 0.1, 200.0);
    let clip = screen_position(&p, 2.0, Vec2::new(0.2, -0.1), view, proj);
    let moved = displace(p.position, 2.0, p.phase, p.speed, Vec2::new(0.2, -0.1));
    let manual = proj * view * moved.extend(1.0);
    assert!((clip - manual).length() < 1e-4);
}

#[test]
fn field_rotation_follows_pointer() {
    let r0 = field_rotation(0.0, Vec2::ZERO);
    assert_eq!(r0, Vec3::ZERO);
    let r1 = field_rotation(0.0, Vec2::new(1.0, 1.0));
    assert!((r1.y - FIELD_YAW_POINTER).abs() < 1e-6);
    assert!((r1.x - FIELD_PITCH_POINTER).abs() < 1e-6);
}
