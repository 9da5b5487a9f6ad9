use crate::constants::DrawStep;
use super::helpers::{self, PipelineSpec, UniformBinding, ADDITIVE_BLENDING};
use backdrop_core::constants::RING_SEGMENTS;
use backdrop_core::geometry::ring_line_list;
use backdrop_core::{LineUniforms, LineVertex, LINES_WGSL};
use wgpu::util::DeviceExt;

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
];

/// Connection segments and the glow ring. Both are line lists drawn with
/// the same additive pipeline and their own uniforms; segment colours are
/// pre-scaled by opacity, so a fading segment adds less light and a zero
/// segment adds none.
pub(crate) struct LinePass {
    pipeline: wgpu::RenderPipeline,
    connection_uniforms: UniformBinding,
    ring_uniforms: UniformBinding,
    connection_vertices: wgpu::Buffer,
    connection_vertex_count: u32,
    ring_vertices: wgpu::Buffer,
    ring_vertex_count: u32,
}

impl LinePass {
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        connection_capacity: usize,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lines_shader"),
            source: wgpu::ShaderSource::Wgsl(LINES_WGSL.into()),
        });
        let bgl = helpers::uniform_layout(device, "lines_bgl");
        let layout = helpers::pipeline_layout(device, "lines_pl", &bgl);
        let buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRS,
        }];
        let pipeline = helpers::make_pipeline(
            device,
            PipelineSpec {
                label: "lines_pipeline",
                layout: &layout,
                shader: &shader,
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
                color_format: format,
                blend: ADDITIVE_BLENDING,
                depth_write: DrawStep::Connections.writes_depth(),
            },
        );
        let ring = ring_line_list(RING_SEGMENTS);
        let ring_vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ring_vertices"),
            contents: bytemuck::cast_slice(&ring),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            pipeline,
            connection_uniforms: UniformBinding::new::<LineUniforms>(
                device,
                &bgl,
                "connection_uniforms",
            ),
            ring_uniforms: UniformBinding::new::<LineUniforms>(device, &bgl, "ring_uniforms"),
            connection_vertices: helpers::dynamic_vertex_buffer::<LineVertex>(
                device,
                "connection_vertices",
                connection_capacity * 2,
            ),
            connection_vertex_count: 0,
            ring_vertices,
            ring_vertex_count: ring.len() as u32,
        }
    }

    pub(crate) fn write_uniforms(
        &self,
        queue: &wgpu::Queue,
        connections: &LineUniforms,
        ring: &LineUniforms,
    ) {
        self.connection_uniforms.write(queue, connections);
        self.ring_uniforms.write(queue, ring);
    }

    /// Upload the whole slot buffer; only the first `active` segments are
    /// drawn.
    pub(crate) fn upload_connections(
        &mut self,
        queue: &wgpu::Queue,
        vertices: &[LineVertex],
        active: usize,
    ) {
        queue.write_buffer(&self.connection_vertices, 0, bytemuck::cast_slice(vertices));
        self.connection_vertex_count = (active * 2).min(vertices.len()) as u32;
    }

    pub(crate) fn draw_ring(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.ring_uniforms.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.ring_vertices.slice(..));
        rpass.draw(0..self.ring_vertex_count, 0..1);
    }

    pub(crate) fn draw_connections(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.connection_vertex_count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.connection_uniforms.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.connection_vertices.slice(..));
        rpass.draw(0..self.connection_vertex_count, 0..1);
    }
}
