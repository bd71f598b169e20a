//! The per-window engine: GPU context, scene state and the model renderer.
//!
//! Input and load results mutate the [`SceneState`]; [`ViewerEngine::render`]
//! only reads it.

use crate::camera::Framing;
use crate::error::OrbitViewError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTexture;
use crate::input::InputEvent;
use crate::options::Options;
use crate::renderer::ModelRenderer;
use crate::scene::{Model, SceneState};
use crate::util::frame_timing::FrameTiming;

/// Convert a linear RGB background to a wgpu clear color.
fn clear_color(background: [f32; 3]) -> wgpu::Color {
    wgpu::Color {
        r: f64::from(background[0]),
        g: f64::from(background[1]),
        b: f64::from(background[2]),
        a: 1.0,
    }
}

/// Renders the scene into a window surface.
pub struct ViewerEngine {
    context: RenderContext,
    scene: SceneState,
    renderer: ModelRenderer,
    depth: DepthTexture,
    clear_color: wgpu::Color,
    frame_timing: FrameTiming,
}

impl ViewerEngine {
    /// Create the GPU context for `window` and an empty scene.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitViewError::Gpu`] if no adapter, device or surface
    /// configuration is available.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: &Options,
    ) -> Result<Self, OrbitViewError> {
        let context = RenderContext::new(window, size).await?;
        let (width, height) = context.size();
        let depth = DepthTexture::new(&context.device, width, height);
        let renderer = ModelRenderer::new(&context, &options.lighting);
        let scene = SceneState::new(options, (width, height));

        Ok(Self {
            context,
            scene,
            renderer,
            depth,
            clear_color: clear_color(options.display.background_color),
            frame_timing: FrameTiming::new(),
        })
    }

    /// Scene state, for inspection.
    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    /// Upload the model, install it in the scene and frame the camera.
    pub fn attach_model(&mut self, model: Model) -> Option<Framing> {
        self.renderer.upload_model(&self.context, &model);
        self.scene.attach_model(model)
    }

    /// Handle the outcome of the background load. Failures are logged and
    /// leave the scene empty.
    pub fn on_model_loaded(&mut self, result: Result<Model, OrbitViewError>) {
        match result {
            Ok(model) => {
                if let Some(framing) = self.attach_model(model) {
                    log::info!(
                        "camera framed at distance {:.3} around {}",
                        framing.distance,
                        framing.center
                    );
                }
            }
            Err(e) => log::error!("failed to load model: {e}"),
        }
    }

    /// Forward an input event to the scene. Returns `true` when a redraw
    /// is warranted.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.scene.handle_input(event)
    }

    /// Resize the surface, depth buffer and camera aspect. Zero dimensions
    /// are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.depth = DepthTexture::new(&self.context.device, width, height);
        self.scene.resize(width, height);
    }

    /// Re-apply the current surface size, after the surface was lost or
    /// became outdated.
    pub fn reconfigure(&mut self) {
        let (width, height) = self.context.size();
        self.resize(width, height);
    }

    /// Upload this frame's uniforms, draw, and present.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let uniforms = self.scene.frame_uniforms();
        self.renderer
            .write_uniforms(&self.context.queue, &uniforms);

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                ..Default::default()
            });
            self.renderer.draw(&mut rp);
        }
        self.context.submit(encoder);
        frame.present();

        self.frame_timing.end_frame();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_color_is_opaque() {
        let color = clear_color([0.25, 0.5, 1.0]);
        assert_eq!((color.r, color.g, color.b, color.a), (0.25, 0.5, 1.0, 1.0));
    }
}
