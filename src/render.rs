use crate::constants::{DrawStep, CLEAR_COLOR, DEPTH_CLEAR, DRAW_ORDER, FRAME_LATENCY};
use backdrop_core::{LineVertex, Scene};
use web_sys as web;

mod helpers;
mod icons;
mod lines;
mod meshes;
mod particles;

use icons::IconAtlas;
use lines::LinePass;
use meshes::MeshPass;
use particles::ParticlePass;

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    particles: ParticlePass,
    lines: LinePass,
    meshes: MeshPass,
    depth_view: wgpu::TextureView,
    _icons: IconAtlas,
    line_scratch: Vec<LineVertex>,
    uploaded_revision: Option<u64>,
    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        document: &web::Document,
        scene: &Scene,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("backdrop_device"),
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        // Colours are authored in display space, so skip the sRGB encode
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: FRAME_LATENCY,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] surface {}x{} format={:?} alpha={:?}",
            width,
            height,
            format,
            alpha_mode
        );

        let cfg = scene.config();
        let particles = ParticlePass::new(&device, format, &scene.particle_instances());
        let lines = LinePass::new(&device, format, scene.connections().capacity());
        let atlas = IconAtlas::paint(&device, &queue, document)?;
        let meshes = MeshPass::new(
            &device,
            format,
            &atlas,
            cfg.decoration_count,
            cfg.nebula_count,
        );
        let depth_view = helpers::create_depth_view(&device, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            particles,
            lines,
            meshes,
            depth_view,
            _icons: atlas,
            line_scratch: Vec::with_capacity(scene.connections().capacity() * 2),
            uploaded_revision: None,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = helpers::create_depth_view(&self.device, width, height);
        }
    }

    /// Re-apply the current configuration after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn upload(&mut self, scene: &Scene) {
        self.particles.write(&self.queue, &scene.particle_uniforms());
        self.lines
            .write_uniforms(&self.queue, &scene.connection_uniforms(), &scene.ring_uniforms());
        self.meshes.write(
            &self.queue,
            &scene.mesh_uniforms(),
            &scene.decoration_instances(),
            &scene.nebula_instances(),
        );

        let revision = scene.connections().revision();
        if self.uploaded_revision != Some(revision) {
            scene.connection_vertices(&mut self.line_scratch);
            self.lines
                .upload_connections(&self.queue, &self.line_scratch, scene.connections().active());
            self.uploaded_revision = Some(revision);
        }
    }

    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        self.upload(scene);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let [r, g, b, a] = CLEAR_COLOR;
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(DEPTH_CLEAR),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            for step in DRAW_ORDER {
                match step {
                    DrawStep::Nebula => self.meshes.draw_nebula(&mut rpass),
                    DrawStep::Ring => self.lines.draw_ring(&mut rpass),
                    DrawStep::Blocks => self.meshes.draw_blocks(&mut rpass),
                    DrawStep::Connections => self.lines.draw_connections(&mut rpass),
                    DrawStep::Particles => self.particles.draw(&mut rpass),
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
