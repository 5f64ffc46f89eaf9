//! The host side: a winit window that drives a [`Scene`] once per redraw.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::SceneConfig;
use crate::error::RunError;
use crate::gpu::GpuState;
use crate::input::{InputAction, PointerInput};
use crate::scene::Scene;
use crate::time::Time;

/// Open a window and run the effect until it is closed.
///
/// Fails if the render target (window, surface or GPU device) cannot be created.
pub fn run(config: SceneConfig) -> Result<(), RunError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    config: SceneConfig,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    scene: Option<Scene>,
    input: PointerInput,
    time: Time,
    error: Option<RunError>,
}

impl App {
    fn new(config: SceneConfig) -> Self {
        Self {
            config,
            window: None,
            gpu_state: None,
            scene: None,
            input: PointerInput::default(),
            time: Time::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let view = &self.config.view;
        let window_attrs = Window::default_attributes()
            .with_title(view.title.clone())
            .with_inner_size(LogicalSize::new(view.width, view.height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let size = window.inner_size();
        log::info!("window created at {}x{}", size.width, size.height);

        let scene = Scene::with_viewport(self.config.clone(), size.width, size.height);
        let gpu_state = pollster::block_on(GpuState::new(window.clone(), &scene))?;

        self.input.set_viewport(size.width, size.height);
        self.time = Time::new();
        self.scene = Some(scene);
        self.gpu_state = Some(gpu_state);
        window.request_redraw();
        self.window = Some(window);

        Ok(())
    }

    /// One frame: advance the scene, draw it, schedule the next frame.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(scene), Some(gpu_state)) = (self.scene.as_mut(), self.gpu_state.as_mut()) else {
            return;
        };

        self.time.update();
        scene.tick(self.time.elapsed());

        match gpu_state.render(scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu_state.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("render error: {:?}", e),
        }

        if let Some(window) = &self.window {
            if self.time.fps_refreshed() {
                window.set_title(&format!("{} - {:.0} FPS", self.config.view.title, self.time.fps()));
                log::trace!(
                    "frame {}: {:.1} fps, last delta {:.4}s",
                    self.time.frame(),
                    self.time.fps(),
                    self.time.delta()
                );
            }
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            log::error!("initialization failed: {}", err);
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.input.set_viewport(physical_size.width, physical_size.height);
                if let Some(scene) = &mut self.scene {
                    scene.resize(physical_size.width, physical_size.height);
                }
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                let action = self.input.handle_event(&other);
                let Some(scene) = &mut self.scene else {
                    return;
                };
                match action {
                    InputAction::Trigger => scene.trigger(),
                    InputAction::PointerMoved => scene.set_pointer_offset(self.input.offset()),
                    InputAction::None => {}
                }
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.gpu_state = None;
        if let Some(scene) = self.scene.take() {
            scene.dispose();
        }
    }
}
