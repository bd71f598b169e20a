//! GPU-side mesh storage: interleaved vertices, indices and the per-mesh
//! material uniform.

use wgpu::util::DeviceExt;

use crate::gpu::pipeline_helpers::create_uniform_buffer;
use crate::scene::MeshData;

/// Interleaved vertex: model-space position and texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in model space.
    pub position: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    /// Vertex buffer layout matching `VertexInput` in the shader.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-mesh material factors.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    /// Multiplied with the sampled texture.
    pub base_color: [f32; 4],
}

/// Zip positions and texture coordinates into interleaved vertices.
///
/// Missing coordinates are zeroed.
pub fn interleave(mesh: &MeshData) -> Vec<Vertex> {
    mesh.positions
        .iter()
        .enumerate()
        .map(|(i, &position)| Vertex {
            position,
            uv: mesh.uvs.get(i).copied().unwrap_or([0.0, 0.0]),
        })
        .collect()
}

/// One uploaded mesh, ready to draw.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    material_bind_group: wgpu::BindGroup,
}

impl GpuMesh {
    /// Upload `mesh` and bind its material to `material_layout`.
    pub fn new(
        device: &wgpu::Device,
        material_layout: &wgpu::BindGroupLayout,
        mesh: &MeshData,
    ) -> Self {
        let vertices = interleave(mesh);
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Vertices", mesh.name)),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Indices", mesh.name)),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let material = MaterialUniform {
            base_color: mesh.base_color,
        };
        let material_buffer = create_uniform_buffer(
            device,
            &format!("{} Material", mesh.name),
            &material,
        );
        let material_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("{} Material Bind Group", mesh.name)),
                layout: material_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: material_buffer.as_entire_binding(),
                }],
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            material_bind_group,
        }
    }

    /// Bind the material at `material_group`, then draw.
    ///
    /// Caller must set the pipeline and the shared bind groups first.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        material_group: u32,
    ) {
        if self.index_count == 0 {
            return;
        }
        render_pass.set_bind_group(material_group, &self.material_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
