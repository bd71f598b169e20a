//! Textured mesh renderer for the loaded model.
//!
//! Bind groups:
//! - group 0: camera, model transform and ambient light uniforms
//! - group 1: the override texture and its sampler
//! - group 2: per-mesh material factors

use super::mesh::GpuMesh;
use super::pipeline_util;
use crate::camera::CameraUniform;
use crate::gpu::pipeline_helpers::{
    create_uniform_buffer, filtering_sampler, texture_2d, uniform_buffer,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::SampledTexture;
use crate::loader::{fit_within, mip_chain};
use crate::options::LightingOptions;
use crate::renderer::mesh::Vertex;
use crate::scene::{FrameUniforms, Model, ModelUniform};

const MATERIAL_GROUP: u32 = 2;

/// Ambient light, laid out for a uniform buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Linear RGB light color.
    pub color: [f32; 3],
    /// Scalar applied to `color`.
    pub intensity: f32,
}

impl From<&LightingOptions> for LightingUniform {
    fn from(options: &LightingOptions) -> Self {
        Self {
            color: options.ambient_color,
            intensity: options.ambient_intensity,
        }
    }
}

/// The uploaded model: one GPU mesh per source mesh plus the shared
/// texture.
struct GpuModel {
    meshes: Vec<GpuMesh>,
    texture_bind_group: wgpu::BindGroup,
    _texture: SampledTexture,
}

/// Draws every mesh of the loaded model with the shared texture under the
/// ambient light.
pub struct ModelRenderer {
    pipeline: wgpu::RenderPipeline,
    texture_layout: wgpu::BindGroupLayout,
    material_layout: wgpu::BindGroupLayout,
    camera_buffer: wgpu::Buffer,
    model_buffer: wgpu::Buffer,
    _lighting_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    model: Option<GpuModel>,
}

impl ModelRenderer {
    /// Build the pipeline and the per-frame uniforms. No model is uploaded
    /// yet.
    pub fn new(context: &RenderContext, lighting: &LightingOptions) -> Self {
        let device = &context.device;

        let frame_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Frame Layout"),
                entries: &[
                    uniform_buffer(
                        0,
                        wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ),
                    uniform_buffer(1, wgpu::ShaderStages::VERTEX),
                    uniform_buffer(2, wgpu::ShaderStages::FRAGMENT),
                ],
            });
        let texture_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Layout"),
                entries: &[texture_2d(0), filtering_sampler(1)],
            });
        let material_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Material Layout"),
                entries: &[uniform_buffer(0, wgpu::ShaderStages::FRAGMENT)],
            });

        let camera_buffer =
            create_uniform_buffer(device, "Camera Uniform", &CameraUniform::new());
        let model_buffer = create_uniform_buffer(
            device,
            "Model Uniform",
            &ModelUniform::from_transform(glam::Mat4::IDENTITY),
        );
        let lighting_buffer = create_uniform_buffer(
            device,
            "Lighting Uniform",
            &LightingUniform::from(lighting),
        );
        let frame_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Frame Bind Group"),
                layout: &frame_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: camera_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: model_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: lighting_buffer.as_entire_binding(),
                    },
                ],
            });

        let shader = device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/textured_mesh.wgsl"
        ));
        let pipeline = pipeline_util::create_mesh_pipeline(
            device,
            "Textured Mesh",
            &shader,
            context.format(),
            &[&frame_layout, &texture_layout, &material_layout],
            Vertex::layout(),
        );

        Self {
            pipeline,
            texture_layout,
            material_layout,
            camera_buffer,
            model_buffer,
            _lighting_buffer: lighting_buffer,
            frame_bind_group,
            model: None,
        }
    }

    /// Upload the model's meshes and texture, replacing any previous one.
    /// Textures larger than the device allows are downscaled first.
    pub fn upload_model(&mut self, context: &RenderContext, model: &Model) {
        let device = &context.device;
        let image = fit_within(model.texture(), device.limits().max_texture_dimension_2d);
        let levels = mip_chain(&image);
        let texture = SampledTexture::from_mip_levels(
            device,
            &context.queue,
            "Model Texture",
            &levels,
        );
        let texture_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Model Texture Bind Group"),
                layout: &self.texture_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&texture.sampler),
                    },
                ],
            });
        let meshes = model
            .meshes()
            .iter()
            .filter(|mesh| !mesh.indices.is_empty())
            .map(|mesh| GpuMesh::new(device, &self.material_layout, mesh))
            .collect::<Vec<_>>();

        log::debug!(
            "uploaded {} meshes, {}x{} texture with {} mip levels",
            meshes.len(),
            image.width,
            image.height,
            levels.len()
        );
        self.model = Some(GpuModel {
            meshes,
            texture_bind_group,
            _texture: texture,
        });
    }

    /// Write this frame's camera and model uniforms.
    pub fn write_uniforms(&self, queue: &wgpu::Queue, uniforms: &FrameUniforms) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&uniforms.camera),
        );
        queue.write_buffer(&self.model_buffer, 0, bytemuck::bytes_of(&uniforms.model));
    }

    /// Record draw calls for every mesh. Does nothing before a model is
    /// uploaded.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        let Some(model) = &self.model else {
            return;
        };
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
        render_pass.set_bind_group(1, &model.texture_bind_group, &[]);
        for mesh in &model.meshes {
            mesh.draw(render_pass, MATERIAL_GROUP);
        }
    }
}
