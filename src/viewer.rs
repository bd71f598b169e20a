//! Standalone viewer window backed by winit.
//!
//! The model loads in the background (a worker thread natively, a local
//! future in the browser) and arrives as an [`AppEvent`] on the event loop.
//!
//! ```no_run
//! # use orbitview::Viewer;
//! Viewer::builder()
//!     .with_scene("wellblender/scene.gltf")
//!     .with_texture("perfil2.png")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    engine::ViewerEngine,
    error::OrbitViewError,
    input::{InputEvent, MouseButton},
    options::Options,
    scene::Model,
};

/// Pixel-precise wheel deltas are scaled to roughly one line per 100 px.
const PIXEL_SCROLL_SCALE: f32 = 0.01;

/// Events delivered to the event loop from background work.
pub enum AppEvent {
    /// The startup load finished.
    ModelLoaded(Result<Model, OrbitViewError>),
    /// The GPU context finished initializing (browser only; native builds
    /// initialize synchronously).
    #[cfg(target_arch = "wasm32")]
    EngineReady(Result<ViewerEngine, OrbitViewError>),
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Options,
    scene: Option<String>,
    texture: Option<String>,
    title: Option<String>,
    asset_root: String,
}

impl ViewerBuilder {
    /// Create a builder with default options, loading assets relative to
    /// the working directory (or the page URL in the browser).
    fn new() -> Self {
        Self {
            options: Options::default(),
            scene: None,
            texture: None,
            title: None,
            asset_root: String::new(),
        }
    }

    /// Set the glTF scene (`.gltf` or `.glb`).
    #[must_use]
    pub fn with_scene(mut self, scene: impl Into<String>) -> Self {
        self.scene = Some(scene.into());
        self
    }

    /// Set the image applied to every mesh.
    #[must_use]
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    /// Override the default options. Scene, texture and title set on the
    /// builder take precedence over the ones in `options`.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Directory (native) or URL prefix (browser) that asset paths are
    /// relative to.
    #[must_use]
    pub fn with_asset_root(mut self, root: impl Into<String>) -> Self {
        self.asset_root = root.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let mut options = self.options;
        if let Some(scene) = self.scene {
            options.assets.scene = scene;
        }
        if let Some(texture) = self.texture {
            options.assets.texture = texture;
        }
        if let Some(title) = self.title {
            options.display.title = title;
        }
        Viewer {
            options,
            asset_root: self.asset_root,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window that displays one glTF model.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    asset_root: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Effective options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Open the window and run the event loop. Natively this blocks until
    /// the window is closed; in the browser it returns immediately and the
    /// loop keeps running on the page.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitViewError::Viewer`] if the event loop cannot be
    /// created or exits abnormally.
    pub fn run(self) -> Result<(), OrbitViewError> {
        let event_loop = EventLoop::<AppEvent>::with_user_event()
            .build()
            .map_err(|e| OrbitViewError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let app = ViewerApp {
            window: None,
            engine: None,
            pending_model: None,
            proxy: event_loop.create_proxy(),
            options: self.options,
            asset_root: self.asset_root,
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut app = app;
            event_loop
                .run_app(&mut app)
                .map_err(|e| OrbitViewError::Viewer(e.to_string()))
        }
        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::EventLoopExtWebSys;
            event_loop.spawn_app(app);
            Ok(())
        }
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<ViewerEngine>,
    /// A load result that arrived before the engine existed.
    pending_model: Option<Result<Model, OrbitViewError>>,
    proxy: EventLoopProxy<AppEvent>,
    options: Options,
    asset_root: String,
}

/// The wgpu surface always covers the full window. A minimized window
/// reports 0x0, which the engine ignores.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width, inner.height)
}

/// Normalize a wheel event to lines, positive toward the scene.
fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * PIXEL_SCROLL_SCALE,
    }
}

impl ViewerApp {
    #[cfg(not(target_arch = "wasm32"))]
    fn window_attributes(&self, event_loop: &ActiveEventLoop) -> WindowAttributes {
        let attrs = Window::default_attributes().with_title(&self.options.display.title);
        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        match monitor {
            Some(mon) => {
                let mon_size = mon.size();
                let scale = mon.scale_factor();
                let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
                let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
                attrs.with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
            }
            None => attrs,
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn window_attributes(&self, _event_loop: &ActiveEventLoop) -> WindowAttributes {
        use winit::platform::web::WindowAttributesExtWebSys;
        Window::default_attributes()
            .with_title(&self.options.display.title)
            .with_append(true)
    }

    /// Start loading the configured assets on a worker thread.
    #[cfg(not(target_arch = "wasm32"))]
    fn start_load(&self) -> Result<(), OrbitViewError> {
        let proxy = self.proxy.clone();
        let assets = self.options.assets.clone();
        let source = crate::loader::FsSource::new(&self.asset_root);
        let _ = std::thread::Builder::new()
            .name("orbitview-loader".into())
            .spawn(move || {
                let result =
                    pollster::block_on(crate::loader::load_model(&source, &assets));
                if proxy.send_event(AppEvent::ModelLoaded(result)).is_err() {
                    log::debug!("event loop closed before the model loaded");
                }
            })
            .map_err(OrbitViewError::ThreadSpawn)?;
        Ok(())
    }

    /// Start loading the configured assets as a local future.
    #[cfg(target_arch = "wasm32")]
    fn start_load(&self) -> Result<(), OrbitViewError> {
        let proxy = self.proxy.clone();
        let assets = self.options.assets.clone();
        let source = crate::loader::FetchSource::new(self.asset_root.clone());
        wasm_bindgen_futures::spawn_local(async move {
            let result = crate::loader::load_model(&source, &assets).await;
            if proxy.send_event(AppEvent::ModelLoaded(result)).is_err() {
                log::debug!("event loop closed before the model loaded");
            }
        });
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn create_engine(&mut self, event_loop: &ActiveEventLoop, window: Arc<Window>) {
        let size = viewport_size(window.inner_size());
        match pollster::block_on(ViewerEngine::new(window, size, &self.options)) {
            Ok(engine) => self.install_engine(engine),
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn create_engine(&mut self, _event_loop: &ActiveEventLoop, window: Arc<Window>) {
        let size = viewport_size(window.inner_size());
        let proxy = self.proxy.clone();
        let options = self.options.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = ViewerEngine::new(window, size, &options).await;
            if proxy.send_event(AppEvent::EngineReady(result)).is_err() {
                log::debug!("event loop closed before the engine was ready");
            }
        });
    }

    fn install_engine(&mut self, mut engine: ViewerEngine) {
        if let Some(result) = self.pending_model.take() {
            engine.on_model_loaded(result);
        }
        self.engine = Some(engine);
        self.request_redraw();
    }

    fn request_redraw(&self) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn dispatch(&mut self, event: InputEvent) {
        if let Some(engine) = &mut self.engine {
            if engine.handle_input(event) {
                self.request_redraw();
            }
        }
    }

    fn redraw(&mut self) {
        if let Some(engine) = &mut self.engine {
            match engine.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                    engine.reconfigure();
                }
                Err(e) => {
                    log::error!("render error: {e:?}");
                }
            }
        }
        self.request_redraw();
    }
}

impl ApplicationHandler<AppEvent> for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = self.window_attributes(event_loop);
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(Arc::clone(&window));

        if let Err(e) = self.start_load() {
            log::error!("failed to start loading: {e}");
        }
        self.create_engine(event_loop, window);
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::ModelLoaded(result) => match &mut self.engine {
                Some(engine) => {
                    engine.on_model_loaded(result);
                    self.request_redraw();
                }
                None => self.pending_model = Some(result),
            },
            #[cfg(target_arch = "wasm32")]
            AppEvent::EngineReady(result) => match result {
                Ok(engine) => self.install_engine(engine),
                Err(e) => {
                    log::error!("Failed to initialize engine: {e}");
                    event_loop.exit();
                }
            },
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
                self.request_redraw();
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(button) = MouseButton::from_winit(button) {
                    self.dispatch(InputEvent::MouseButton {
                        button,
                        pressed: state == ElementState::Pressed,
                    });
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.dispatch(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) => {
                self.dispatch(InputEvent::PointerCancel);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.dispatch(InputEvent::Scroll {
                    delta: scroll_lines(delta),
                });
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_options() {
        let mut options = Options::default();
        options.assets.scene = "from-options.glb".into();
        options.lighting.ambient_intensity = 1.0;

        let viewer = Viewer::builder()
            .with_options(options)
            .with_texture("skin.jpg")
            .with_title("demo")
            .build();

        assert_eq!(viewer.options().assets.scene, "from-options.glb");
        assert_eq!(viewer.options().assets.texture, "skin.jpg");
        assert_eq!(viewer.options().display.title, "demo");
        assert_eq!(viewer.options().lighting.ambient_intensity, 1.0);
    }

    #[test]
    fn builder_defaults() {
        let viewer = Viewer::builder().build();
        assert_eq!(*viewer.options(), Options::default());
    }

    #[test]
    fn minimized_window_keeps_zero_size() {
        let minimized = winit::dpi::PhysicalSize::new(0, 0);
        assert_eq!(viewport_size(minimized), (0, 0));
        let size = winit::dpi::PhysicalSize::new(800, 600);
        assert_eq!(viewport_size(size), (800, 600));
    }

    #[test]
    fn wheel_deltas_normalize_to_lines() {
        assert_eq!(scroll_lines(MouseScrollDelta::LineDelta(0.0, 2.0)), 2.0);
        let pixels = winit::dpi::PhysicalPosition::new(0.0, -150.0);
        assert!((scroll_lines(MouseScrollDelta::PixelDelta(pixels)) - -1.5).abs() < 1e-6);
    }
}
