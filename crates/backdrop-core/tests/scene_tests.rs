use backdrop_core::config::SceneConfig;
use backdrop_core::decorations::DecorationStyle;
use backdrop_core::error::BackdropError;
use backdrop_core::input::{InputTargets, Viewport};
use backdrop_core::palette::{Palette, Theme};
use backdrop_core::scene::Scene;
use backdrop_core::scheduler::{LoopControl, LoopState};
use glam::Vec2;
use std::time::Duration;

const FRAME: Duration = Duration::from_micros(16_667);

fn scene_with(config: SceneConfig) -> Scene {
    match Scene::init(config, Theme::Dark, Viewport::new(1280.0, 720.0, 1.0)) {
        Ok(s) => s,
        Err(e) => panic!("scene init failed: {e}"),
    }
}

fn seeded() -> SceneConfig {
    SceneConfig {
        seed: Some(1234),
        ..SceneConfig::default()
    }
}

#[test]
fn particle_count_and_positions_survive_ticks() {
    let mut scene = scene_with(seeded());
    let before = scene.particles().as_slice().to_vec();
    let targets = InputTargets {
        pointer: Vec2::new(0.4, -0.2),
        scroll: 0.6,
    };
    for _ in 0..300 {
        scene.tick(FRAME, &targets);
    }
    assert_eq!(scene.particles().len(), 600);
    assert_eq!(scene.particles().as_slice(), before.as_slice());
}

#[test]
fn default_field_fits_in_radius() {
    let scene = scene_with(seeded());
    assert!(scene
        .particles()
        .as_slice()
        .iter()
        .all(|p| p.position.length() <= 50.0 + 1e-3));
}

#[test]
fn connections_never_exceed_capacity_across_ticks() {
    let mut scene = scene_with(seeded());
    let mut rebuilds = 0;
    for _ in 0..120 {
        if scene.tick(FRAME, &InputTargets::default()).connections_rebuilt {
            rebuilds += 1;
        }
        let c = scene.connections();
        assert!(c.active() <= c.capacity());
        assert_eq!(c.capacity(), 200);
        assert!(c.slots()[c.active()..].iter().all(|s| s.is_zero()));
    }
    assert!(rebuilds > 0 && rebuilds < 120);
}

#[test]
fn theme_toggle_changes_uniforms_not_counts() {
    let mut scene = scene_with(seeded());
    let counts = (
        scene.particles().len(),
        scene.connections().capacity(),
        scene.decorations().len(),
        scene.nebula().len(),
    );
    let dark_opacity = scene.particle_uniforms().opacity;
    let dark_lines = scene.connection_uniforms().tint[3];
    let dark_ring = scene.ring_uniforms().tint;

    assert!(scene.on_theme_change(Theme::Light));
    assert!(!scene.on_theme_change(Theme::Light));

    assert_eq!(scene.theme(), Theme::Light);
    assert_eq!(scene.particle_uniforms().opacity, Palette::light().particle_opacity);
    assert_ne!(scene.particle_uniforms().opacity, dark_opacity);
    assert_ne!(scene.connection_uniforms().tint[3], dark_lines);
    assert_ne!(scene.ring_uniforms().tint, dark_ring);
    let after = (
        scene.particles().len(),
        scene.connections().capacity(),
        scene.decorations().len(),
        scene.nebula().len(),
    );
    assert_eq!(counts, after);

    let instances = scene.decoration_instances();
    assert_eq!(instances.len(), counts.2);
    assert!(instances.iter().all(|i| i.face_color[3] == Palette::light().block_face_opacity));
}

#[test]
fn initial_theme_is_applied_at_init() {
    let scene = match Scene::init(seeded(), Theme::Light, Viewport::default()) {
        Ok(s) => s,
        Err(e) => panic!("{e}"),
    };
    assert_eq!(scene.particle_uniforms().opacity, Palette::light().particle_opacity);
}

#[test]
fn tick_advances_time_and_camera() {
    let mut scene = scene_with(seeded());
    let z0 = scene.camera().position.z;
    let targets = InputTargets {
        pointer: Vec2::ZERO,
        scroll: 1.0,
    };
    for _ in 0..60 {
        scene.tick(FRAME, &targets);
    }
    assert!((scene.elapsed() - 1.0).abs() < 1e-3);
    assert_eq!(scene.ticks(), 60);
    assert!(scene.camera().position.z < z0);
    let u = scene.particle_uniforms();
    assert_eq!(u.time, scene.elapsed());
}

#[test]
fn resize_updates_aspect_and_pixel_ratio() {
    let mut scene = scene_with(seeded());
    scene.on_resize(Viewport::new(500.0, 1000.0, 3.0));
    assert!((scene.camera().aspect - 0.5).abs() < 1e-6);
    let u = scene.particle_uniforms();
    assert_eq!(u.pixel_ratio, 2.0);
    assert_eq!(u.resolution, [1000.0, 2000.0]);
}

#[test]
fn decoration_instances_are_sorted_far_to_near() {
    let scene = scene_with(seeded());
    let view = scene.camera().view_matrix();
    let depths: Vec<f32> = scene
        .decoration_instances()
        .iter()
        .map(|i| view.transform_point3(glam::Vec3::from_slice(&i.model[3][..3])).z)
        .collect();
    assert!(depths.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn config_overrides_parse_from_json() {
    let cfg = match SceneConfig::from_json(
        r#"{"particleCount": 120, "decorationStyle": "sprites", "seed": 9}"#,
    ) {
        Ok(c) => c,
        Err(e) => panic!("{e}"),
    };
    assert_eq!(cfg.particle_count, 120);
    assert_eq!(cfg.decoration_style, DecorationStyle::Sprites);
    assert_eq!(cfg.seed, Some(9));
    assert_eq!(cfg.connection_capacity, 200);
    let scene = scene_with(cfg);
    assert_eq!(scene.particles().len(), 120);
}

#[test]
fn invalid_config_is_rejected() {
    assert!(matches!(
        SceneConfig::from_json(r#"{"particleCount": 0}"#),
        Err(BackdropError::InvalidConfig(_))
    ));
    assert!(matches!(
        SceneConfig::from_json(r#"{"scrollSmoothing": 1.5}"#),
        Err(BackdropError::InvalidConfig(_))
    ));
    assert!(matches!(
        SceneConfig::from_json("not json"),
        Err(BackdropError::Config(_))
    ));
    let bad = SceneConfig {
        connection_stride: 0,
        ..SceneConfig::default()
    };
    assert!(Scene::init(bad, Theme::Dark, Viewport::default()).is_err());
}

#[test]
fn theme_attribute_parsing() {
    assert_eq!(Theme::from_attribute(Some("light")), Theme::Light);
    assert_eq!(Theme::from_attribute(Some("dark")), Theme::Dark);
    assert_eq!(Theme::from_attribute(Some("sepia")), Theme::Dark);
    assert_eq!(Theme::from_attribute(None), Theme::Dark);
    assert_eq!(Theme::from_is_dark(false), Theme::Light);
}

#[test]
fn loop_control_transitions() {
    let mut ctl = LoopControl::default();
    assert_eq!(ctl.state(), LoopState::Stopped);
    assert!(ctl.start());
    assert!(!ctl.start());
    assert!(ctl.is_running());
    assert!(ctl.stop());
    assert!(!ctl.stop());
    assert_eq!(ctl.state(), LoopState::Stopped);
    assert!(ctl.start());
}

#[test]
fn hidden_tab_pauses_and_restores_running_loop() {
    let mut ctl = LoopControl::default();
    assert!(!ctl.suspend(), "a stopped loop is not suspended");
    assert!(!ctl.resume());
    assert_eq!(ctl.state(), LoopState::Stopped);

    ctl.start();
    assert!(ctl.suspend());
    assert_eq!(ctl.state(), LoopState::Suspended);
    assert!(!ctl.is_running());
    assert!(!ctl.suspend());
    assert!(ctl.resume());
    assert!(ctl.is_running());
}

#[test]
fn host_stop_while_hidden_keeps_loop_stopped() {
    let mut ctl = LoopControl::default();
    ctl.start();
    assert!(ctl.suspend());
    assert!(ctl.stop(), "host stop must take effect while hidden");
    assert_eq!(ctl.state(), LoopState::Stopped);
    assert!(!ctl.resume());
    assert_eq!(ctl.state(), LoopState::Stopped);
    assert!(!ctl.is_running());
}

#[test]
fn host_start_while_hidden_runs() {
    let mut ctl = LoopControl::default();
    ctl.start();
    ctl.suspend();
    assert!(ctl.start());
    assert!(ctl.is_running());
    assert!(!ctl.resume());
}

#[test]
fn uniform_layouts_match_shader_structs() {
    use backdrop_core::uniforms::*;
    use std::mem::size_of;
    assert_eq!(size_of::<ParticleUniforms>(), 160);
    assert_eq!(size_of::<LineUniforms>(), 144);
    assert_eq!(size_of::<MeshUniforms>(), 64);
    assert_eq!(size_of::<MeshInstance>(), 112);
}
