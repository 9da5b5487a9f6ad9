//! The engine aggregate: owns every piece of scene state and advances it one
//! tick at a time. Platform code feeds it input targets and time deltas and
//! reads back uniforms and instance data for drawing.

use crate::camera::{Camera, CameraRig, CameraRigParams};
use crate::config::SceneConfig;
use crate::connections::{ConnectionBuffer, ConnectionThrottle, LineVertex};
use crate::decorations::{DecorationSet, GlowRing, NebulaField};
use crate::error::BackdropError;
use crate::input::{InputTargets, Viewport};
use crate::palette::{Palette, Theme, ThemeState};
use crate::particles::{field_model, ParticleInstance, ParticleSet};
use crate::uniforms::{LineUniforms, MeshInstance, MeshUniforms, ParticleUniforms};
use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub connections_rebuilt: bool,
}

pub struct Scene {
    config: SceneConfig,
    particles: ParticleSet,
    connections: ConnectionBuffer,
    throttle: ConnectionThrottle,
    decorations: DecorationSet,
    ring: GlowRing,
    nebula: NebulaField,
    rig: CameraRig,
    camera: Camera,
    theme: ThemeState,
    accents: [Vec3; 3],
    viewport: Viewport,
    elapsed: f32,
    ticks: u64,
}

impl Scene {
    /// Build every entity once. The theme is applied immediately so the
    /// first frame already uses the right palette.
    pub fn init(
        config: SceneConfig,
        theme: Theme,
        viewport: Viewport,
    ) -> Result<Self, BackdropError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        // Vertex colours (particles, connections, nebula) come from the dark
        // accents and are kept for the page's lifetime; theme switches only
        // touch opacities and the ring.
        let accents = Palette::dark().accents;
        let particles =
            ParticleSet::init(config.particle_count, config.field_radius, &accents, &mut rng);
        let decorations =
            DecorationSet::init(config.decoration_count, config.decoration_style, &mut rng);
        let nebula = NebulaField::init(config.nebula_count, &mut rng);

        let rig = CameraRig::new(CameraRigParams {
            base_z: config.camera_base_z,
            scroll_depth: config.scroll_depth,
            pointer_smoothing: config.pointer_smoothing,
            scroll_smoothing: config.scroll_smoothing,
            ..CameraRigParams::default()
        });
        let mut camera = Camera::default();
        rig.apply(&mut camera);

        let mut scene = Self {
            connections: ConnectionBuffer::with_capacity(config.connection_capacity),
            throttle: ConnectionThrottle::default(),
            particles,
            decorations,
            ring: GlowRing::default(),
            nebula,
            rig,
            camera,
            theme: ThemeState::new(theme),
            accents,
            viewport: Viewport::default(),
            elapsed: 0.0,
            ticks: 0,
            config,
        };
        scene.on_resize(viewport);
        scene.rebuild_connections();
        log::info!(
            "[backdrop] scene ready: particles={} connections={}/{} decorations={} \
             theme={:?} seed={}",
            scene.particles.len(),
            scene.connections.active(),
            scene.connections.capacity(),
            scene.decorations.len(),
            theme,
            seed
        );
        Ok(scene)
    }

    /// Advance one tick: smoothing and camera, then decorations, then the
    /// throttled connection rebuild. Particle motion needs no CPU work; it is
    /// derived from `elapsed` and the smoothed pointer in the uniforms.
    pub fn tick(&mut self, dt: Duration, targets: &InputTargets) -> TickReport {
        self.elapsed += dt.as_secs_f32();
        self.ticks += 1;
        let t = self.elapsed;

        self.rig.tick(targets);
        self.rig.apply(&mut self.camera);

        self.decorations.update(t);
        self.ring.update(t);
        self.nebula.update(t, self.theme.palette().nebula_gain);

        let connections_rebuilt = self.throttle.is_due(t);
        if connections_rebuilt {
            self.rebuild_connections();
        }
        TickReport { connections_rebuilt }
    }

    pub fn on_resize(&mut self, viewport: Viewport) {
        self.viewport = Viewport::with_max_ratio(
            viewport.width,
            viewport.height,
            viewport.pixel_ratio,
            self.config.max_pixel_ratio,
        );
        self.camera.aspect = self.viewport.aspect();
    }

    /// Repaint for a new theme. Geometry and counts are untouched. Returns
    /// `false` when the theme did not change.
    pub fn on_theme_change(&mut self, theme: Theme) -> bool {
        let changed = self.theme.apply(theme);
        if changed {
            log::info!("[theme] switched to {:?}", theme);
        }
        changed
    }

    fn rebuild_connections(&mut self) {
        let accents = self.accents;
        self.connections.recompute(
            &self.particles,
            self.config.max_connection_distance,
            self.config.connection_stride,
            [accents[0], accents[1]],
        );
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn connections(&self) -> &ConnectionBuffer {
        &self.connections
    }

    pub fn decorations(&self) -> &DecorationSet {
        &self.decorations
    }

    pub fn nebula(&self) -> &NebulaField {
        &self.nebula
    }

    pub fn ring(&self) -> &GlowRing {
        &self.ring
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn palette(&self) -> &Palette {
        self.theme.palette()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn particle_instances(&self) -> Vec<ParticleInstance> {
        self.particles.instances()
    }

    pub fn particle_uniforms(&self) -> ParticleUniforms {
        let pointer = self.rig.pointer();
        let model_view = self.camera.view_matrix() * field_model(self.elapsed, pointer);
        let (w, h) = self.viewport.backing_size();
        ParticleUniforms {
            projection: self.camera.projection_matrix().to_cols_array_2d(),
            model_view: model_view.to_cols_array_2d(),
            pointer: pointer.to_array(),
            time: self.elapsed,
            opacity: self.palette().particle_opacity,
            pixel_ratio: self.viewport.pixel_ratio,
            _pad: 0.0,
            resolution: [w as f32, h as f32],
        }
    }

    pub fn connection_vertices(&self, out: &mut Vec<LineVertex>) {
        self.connections.write_vertices(out);
    }

    pub fn connection_uniforms(&self) -> LineUniforms {
        LineUniforms {
            view_proj: self.camera.view_projection().to_cols_array_2d(),
            model: Mat4::IDENTITY.to_cols_array_2d(),
            tint: Vec3::ONE.extend(self.palette().line_opacity).to_array(),
        }
    }

    pub fn ring_uniforms(&self) -> LineUniforms {
        let palette = self.palette();
        LineUniforms {
            view_proj: self.camera.view_projection().to_cols_array_2d(),
            model: self.ring.model_matrix().to_cols_array_2d(),
            tint: palette.ring_color.extend(palette.ring_opacity).to_array(),
        }
    }

    pub fn mesh_uniforms(&self) -> MeshUniforms {
        MeshUniforms {
            view_proj: self.camera.view_projection().to_cols_array_2d(),
        }
    }

    /// Decoration instances sorted far to near, for blending without a depth
    /// buffer.
    pub fn decoration_instances(&self) -> Vec<MeshInstance> {
        let palette = self.palette();
        let view = self.camera.view_matrix();
        let orientation = self.camera.orientation();
        let mut keyed: Vec<(f32, MeshInstance)> = self
            .decorations
            .iter()
            .map(|d| {
                let (face, side) = d.colors();
                let (face_layer, side_layer) = d.layers();
                let depth = view.transform_point3(d.position).z;
                let instance = MeshInstance {
                    model: d.model_matrix(orientation).to_cols_array_2d(),
                    face_color: face.extend(palette.block_face_opacity).to_array(),
                    side_color: side.extend(palette.block_side_opacity).to_array(),
                    layers: [face_layer as f32, side_layer as f32, 1.0, 0.0],
                };
                (depth, instance)
            })
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        keyed.into_iter().map(|(_, i)| i).collect()
    }

    pub fn nebula_instances(&self) -> Vec<MeshInstance> {
        let accents = self.accents;
        self.nebula
            .iter()
            .map(|p| {
                let color = accents[p.accent % accents.len()].extend(p.opacity).to_array();
                MeshInstance {
                    model: p.model_matrix().to_cols_array_2d(),
                    face_color: color,
                    side_color: color,
                    layers: [0.0; 4],
                }
            })
            .collect()
    }
}
