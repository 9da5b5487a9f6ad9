use backdrop_core::camera::*;
use backdrop_core::constants::*;
use backdrop_core::input::*;
use glam::{Vec2, Vec3};

fn scroll_targets(scroll: f32) -> InputTargets {
    InputTargets {
        pointer: Vec2::ZERO,
        scroll,
    }
}

#[test]
fn smoothing_converges_geometrically() {
    let mut rig = CameraRig::default();
    let target = 1.0_f32;
    let k = rig.params.scroll_smoothing;
    for n in 1..=120 {
        rig.tick(&scroll_targets(target));
        let expected = (1.0 - k).powi(n);
        let err = (rig.scroll_progress() - target).abs();
        assert!((err - expected).abs() < 1e-4, "tick {}: {} vs {}", n, err, expected);
    }
}

#[test]
fn ninety_five_percent_in_about_a_hundred_ticks() {
    let mut rig = CameraRig::default();
    let mut ticks = 0;
    while rig.scroll_progress() < 0.95 {
        rig.tick(&scroll_targets(1.0));
        ticks += 1;
    }
    assert!((95..=105).contains(&ticks), "ticks {}", ticks);
}

#[test]
fn zero_target_from_rest_stays_exactly_zero() {
    let mut rig = CameraRig::default();
    for _ in 0..50 {
        rig.tick(&scroll_targets(0.0));
        assert_eq!(rig.scroll_progress(), 0.0);
        assert_eq!(rig.pointer(), Vec2::ZERO);
    }
}

#[test]
fn pointer_smooths_faster_than_scroll() {
    let mut rig = CameraRig::default();
    rig.tick(&InputTargets {
        pointer: Vec2::new(1.0, -1.0),
        scroll: 1.0,
    });
    assert!((rig.pointer().x - POINTER_SMOOTHING).abs() < 1e-6);
    assert!((rig.pointer().y + POINTER_SMOOTHING).abs() < 1e-6);
    assert!((rig.scroll_progress() - SCROLL_SMOOTHING).abs() < 1e-6);
}

#[test]
fn camera_z_stays_within_dolly_range() {
    let mut rig = CameraRig::default();
    let p = rig.params;
    for step in 0..400 {
        let target = if step < 200 { 1.0 } else { 0.0 };
        rig.tick(&scroll_targets(target));
        let z = rig.position().z;
        assert!(z >= p.base_z - p.scroll_depth - 1e-4 && z <= p.base_z + 1e-4, "z {}", z);
    }
}

#[test]
fn scrolled_to_bottom_dollies_to_origin() {
    let mut rig = CameraRig::new(CameraRigParams {
        base_z: 30.0,
        scroll_depth: 30.0,
        ..CameraRigParams::default()
    });
    for _ in 0..1000 {
        rig.tick(&scroll_targets(1.0));
    }
    let pos = rig.position();
    assert!(pos.z.abs() < 1e-3, "z {}", pos.z);
    assert!((pos.y + SCROLL_VERTICAL_DRIFT).abs() < 1e-3);
    let rot = rig.rotation();
    assert!((rot.x + SCROLL_TILT).abs() < 1e-3);
    assert_eq!(rot.y, 0.0);
}

#[test]
fn out_of_range_scroll_target_is_clamped() {
    let mut rig = CameraRig::default();
    for _ in 0..2000 {
        rig.tick(&scroll_targets(3.0));
    }
    assert!(rig.scroll_progress() <= 1.0);
}

#[test]
fn apply_copies_pose_into_camera() {
    let mut rig = CameraRig::default();
    rig.tick(&InputTargets {
        pointer: Vec2::new(0.5, 0.5),
        scroll: 0.5,
    });
    let mut cam = Camera::default();
    rig.apply(&mut cam);
    assert_eq!(cam.position, rig.position());
    assert_eq!(cam.rotation, rig.rotation());
}

#[test]
fn view_matrix_moves_camera_to_origin() {
    let cam = Camera {
        position: Vec3::new(0.0, -2.0, 12.0),
        ..Camera::default()
    };
    let eye_in_view = cam.view_matrix().transform_point3(cam.position);
    assert!(eye_in_view.length() < 1e-4);
    // With no rotation the camera looks down -Z.
    let ahead = cam.view_matrix().transform_point3(Vec3::new(0.0, -2.0, 0.0));
    assert!(ahead.z < 0.0);
}

#[test]
fn scroll_fraction_handles_short_pages() {
    assert_eq!(scroll_fraction(100.0, 800.0, 800.0), 0.0);
    assert_eq!(scroll_fraction(100.0, 600.0, 800.0), 0.0);
    assert!((scroll_fraction(500.0, 1800.0, 800.0) - 0.5).abs() < 1e-6);
    assert_eq!(scroll_fraction(5000.0, 1800.0, 800.0), 1.0);
    assert_eq!(scroll_fraction(-20.0, 1800.0, 800.0), 0.0);
}

#[test]
fn pointer_ndc_maps_corners() {
    assert_eq!(pointer_ndc(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    assert_eq!(pointer_ndc(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
    assert_eq!(pointer_ndc(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
    assert_eq!(pointer_ndc(10.0, 10.0, 0.0, 600.0), Vec2::ZERO);
}

#[test]
fn viewport_caps_pixel_ratio() {
    let v = Viewport::new(1000.0, 500.0, 3.0);
    assert_eq!(v.pixel_ratio, MAX_PIXEL_RATIO);
    assert_eq!(v.backing_size(), (2000, 1000));
    assert!((v.aspect() - 2.0).abs() < 1e-6);
    assert_eq!(Viewport::new(0.0, 0.0, f32::NAN).backing_size(), (1, 1));
}
