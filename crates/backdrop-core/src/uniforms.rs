//! GPU-facing uniform and instance layouts. Field order and padding match the
//! WGSL structs in `shaders/`.

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleUniforms {
    pub projection: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
    pub pointer: [f32; 2],
    pub time: f32,
    pub opacity: f32,
    pub pixel_ratio: f32,
    pub _pad: f32,
    /// Render target size in physical pixels.
    pub resolution: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// rgb multiplies the vertex colour, a is the overall opacity.
    pub tint: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniforms {
    pub view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshInstance {
    pub model: [[f32; 4]; 4],
    /// Front/back faces, rgb + opacity.
    pub face_color: [f32; 4],
    /// Side faces, rgb + opacity.
    pub side_color: [f32; 4],
    /// (face layer, side layer, textured, unused). Untextured instances
    /// draw the flat colours only.
    pub layers: [f32; 4],
}
