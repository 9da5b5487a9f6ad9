use crate::constants::DrawStep;
use super::helpers::{self, PipelineSpec, UniformBinding, ADDITIVE_BLENDING};
use backdrop_core::{ParticleInstance, ParticleUniforms, PARTICLES_WGSL};
use wgpu::util::DeviceExt;

const INSTANCE_ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32,
    2 => Float32x3,
    3 => Float32,
    4 => Float32,
];

pub(crate) struct ParticlePass {
    pipeline: wgpu::RenderPipeline,
    uniforms: UniformBinding,
    instances: wgpu::Buffer,
    count: u32,
}

impl ParticlePass {
    /// Instance data is uploaded once: particle base positions never change,
    /// motion happens in the vertex shader.
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        instances: &[ParticleInstance],
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particles_shader"),
            source: wgpu::ShaderSource::Wgsl(PARTICLES_WGSL.into()),
        });
        let bgl = helpers::uniform_layout(device, "particles_bgl");
        let layout = helpers::pipeline_layout(device, "particles_pl", &bgl);
        let buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRS,
        }];
        let pipeline = helpers::make_pipeline(
            device,
            PipelineSpec {
                label: "particles_pipeline",
                layout: &layout,
                shader: &shader,
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                color_format: format,
                blend: ADDITIVE_BLENDING,
                depth_write: DrawStep::Particles.writes_depth(),
            },
        );
        let uniforms = UniformBinding::new::<ParticleUniforms>(device, &bgl, "particles_uniforms");
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particles_instances"),
            contents: bytemuck::cast_slice(instances),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            pipeline,
            uniforms,
            instances: instance_buffer,
            count: instances.len() as u32,
        }
    }

    pub(crate) fn write(&self, queue: &wgpu::Queue, uniforms: &ParticleUniforms) {
        self.uniforms.write(queue, uniforms);
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.uniforms.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.instances.slice(..));
        rpass.draw(0..6, 0..self.count);
    }
}
