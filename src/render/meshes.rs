use crate::constants::DrawStep;
use super::helpers::{self, PipelineSpec, ADDITIVE_BLENDING};
use super::icons::IconAtlas;
use backdrop_core::geometry::{unit_cube, unit_quad};
use backdrop_core::{MeshInstance, MeshUniforms, MeshVertex, MESHES_WGSL};
use wgpu::util::DeviceExt;

const VERTEX_ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32,
    2 => Float32,
    9 => Float32x2,
];

const INSTANCE_ATTRS: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4,
    7 => Float32x4,
    8 => Float32x4,
    10 => Float32x4,
];

/// Uniforms at binding 0, the icon tiles and their sampler at 1 and 2.
fn textured_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("meshes_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2Array,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

struct Batch {
    mesh: wgpu::Buffer,
    mesh_vertex_count: u32,
    instances: wgpu::Buffer,
    capacity: usize,
    count: u32,
}

impl Batch {
    fn new(device: &wgpu::Device, label: &str, mesh: &[MeshVertex], capacity: usize) -> Self {
        Self {
            mesh: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(mesh),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            mesh_vertex_count: mesh.len() as u32,
            instances: helpers::dynamic_vertex_buffer::<MeshInstance>(device, label, capacity),
            capacity,
            count: 0,
        }
    }

    fn write(&mut self, queue: &wgpu::Queue, instances: &[MeshInstance]) {
        let n = instances.len().min(self.capacity);
        if n > 0 {
            queue.write_buffer(&self.instances, 0, bytemuck::cast_slice(&instances[..n]));
        }
        self.count = n as u32;
    }

    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.mesh.slice(..));
        rpass.set_vertex_buffer(1, self.instances.slice(..));
        rpass.draw(0..self.mesh_vertex_count, 0..self.count);
    }
}

/// Decoration blocks/sprites (alpha blended, back faces culled, depth
/// writing) and the nebula planes (additive, double sided).
pub(crate) struct MeshPass {
    block_pipeline: wgpu::RenderPipeline,
    nebula_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    blocks: Batch,
    nebula: Batch,
}

impl MeshPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        atlas: &IconAtlas,
        block_capacity: usize,
        nebula_capacity: usize,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("meshes_shader"),
            source: wgpu::ShaderSource::Wgsl(MESHES_WGSL.into()),
        });
        let bgl = textured_layout(device);
        let layout = helpers::pipeline_layout(device, "meshes_pl", &bgl);
        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MeshVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &VERTEX_ATTRS,
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MeshInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &INSTANCE_ATTRS,
            },
        ];
        let block_pipeline = helpers::make_pipeline(
            device,
            PipelineSpec {
                label: "blocks_pipeline",
                layout: &layout,
                shader: &shader,
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                color_format: format,
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_write: DrawStep::Blocks.writes_depth(),
            },
        );
        let nebula_pipeline = helpers::make_pipeline(
            device,
            PipelineSpec {
                label: "nebula_pipeline",
                layout: &layout,
                shader: &shader,
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                color_format: format,
                blend: ADDITIVE_BLENDING,
                depth_write: DrawStep::Nebula.writes_depth(),
            },
        );
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("meshes_uniforms"),
            size: std::mem::size_of::<MeshUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("meshes_bg"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&atlas.sampler),
                },
            ],
        });
        Self {
            block_pipeline,
            nebula_pipeline,
            uniform_buffer,
            bind_group,
            blocks: Batch::new(device, "block_instances", &unit_cube(), block_capacity),
            nebula: Batch::new(device, "nebula_instances", &unit_quad(), nebula_capacity),
        }
    }

    pub(crate) fn write(
        &mut self,
        queue: &wgpu::Queue,
        uniforms: &MeshUniforms,
        blocks: &[MeshInstance],
        nebula: &[MeshInstance],
    ) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        self.blocks.write(queue, blocks);
        self.nebula.write(queue, nebula);
    }

    pub(crate) fn draw_nebula(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.nebula.count == 0 {
            return;
        }
        rpass.set_pipeline(&self.nebula_pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        self.nebula.draw(rpass);
    }

    /// Instances must already be sorted far to near.
    pub(crate) fn draw_blocks(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.blocks.count == 0 {
            return;
        }
        rpass.set_pipeline(&self.block_pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        self.blocks.draw(rpass);
    }
}
