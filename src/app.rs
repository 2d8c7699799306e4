use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::camera::Camera;
use crate::config::AppConfig;
use crate::controls::Controls;
use crate::error::ViewerError;
use crate::fractal_pass::FractalPass;
use crate::gpu::GpuContext;
use crate::input::Input;
use crate::scene::{FractalMode, SceneParams};
use crate::shader::ShaderSource;
use crate::uniforms::FractalUniforms;

/// Open the viewer window and run until it is closed.
///
/// # Example
/// ```no_run
/// let config = fractal_generator::AppConfig::new().title("Fractals").size(1280, 720);
/// fractal_generator::run(config).unwrap();
/// ```
pub fn run(config: AppConfig) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::Pending { config };
    event_loop.run_app(&mut app)?;

    match app {
        ViewerApp::Exited(Some(err)) => Err(err),
        _ => Ok(()),
    }
}

enum ViewerApp {
    Pending { config: AppConfig },
    Running(Box<Viewer>),
    Exited(Option<ViewerError>),
}

enum Status {
    Continue,
    Exit,
}

struct Viewer {
    window: Arc<Window>,
    gpu: GpuContext,
    pass: FractalPass,
    camera: Camera,
    scene: SceneParams,
    input: Input,
    controls: Controls,
    title: String,
    hot_reload: bool,
    last_frame: Instant,
}

impl Viewer {
    fn new(event_loop: &ActiveEventLoop, config: &AppConfig) -> Result<Self, ViewerError> {
        let window_attrs = WindowAttributes::default()
            .with_title(&config.window.title)
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let gpu = GpuContext::new(window.clone())?;

        let shader = match &config.shader.path {
            Some(path) => ShaderSource::from_file(path)?,
            None => ShaderSource::embedded(),
        };
        let hot_reload = config.shader.hot_reload && shader.path().is_some();
        let pass = FractalPass::new(&gpu, shader)?;

        let mut camera = Camera::new().with_fov(config.scene.fov);
        let mut scene = SceneParams::new();
        scene.set_main_color(config.scene.main_color);
        scene.repeat = config.scene.repeat;
        scene.set_light_intensity(config.scene.light_intensity);
        scene.select_mode(config.scene.mode, &mut camera);

        let viewer = Self {
            window,
            gpu,
            pass,
            camera,
            scene,
            input: Input::new(),
            controls: Controls::new(config.controls.clone()),
            title: config.window.title.clone(),
            hot_reload,
            last_frame: Instant::now(),
        };
        viewer.update_title(config.scene.mode);
        viewer.window.request_redraw();
        Ok(viewer)
    }

    fn update_title(&self, mode: FractalMode) {
        self.window
            .set_title(&format!("{} - {}", self.title, mode.label()));
    }

    fn handle_window_event(&mut self, event: WindowEvent) -> Result<Status, ViewerError> {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => return Ok(Status::Exit),
            WindowEvent::Resized(size) => {
                self.gpu.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => return self.redraw(),
            _ => {}
        }
        Ok(Status::Continue)
    }

    fn redraw(&mut self) -> Result<Status, ViewerError> {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let effects = self
            .controls
            .apply(&self.input, dt, &mut self.camera, &mut self.scene);
        if effects.exit_requested {
            return Ok(Status::Exit);
        }
        if let Some(mode) = effects.mode_changed {
            self.update_title(mode);
        }

        self.scene.advance(dt);
        if self.hot_reload {
            self.pass.check_reload(&self.gpu);
        }

        let uniforms = FractalUniforms::new(
            &self.camera,
            &self.scene,
            self.gpu.width(),
            self.gpu.height(),
        );
        self.render(&uniforms)?;

        self.input.begin_frame();
        self.window.request_redraw();
        Ok(Status::Continue)
    }

    fn render(&self, uniforms: &FractalUniforms) -> Result<(), ViewerError> {
        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.gpu.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(ViewerError::OutOfMemory),
            Err(e) => {
                log::warn!("Skipping frame: {e}");
                return Ok(());
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Fractal Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Fractal Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.pass.render(&self.gpu, &mut render_pass, uniforms);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let ViewerApp::Pending { config } = self else {
            return;
        };

        match Viewer::new(event_loop, config) {
            Ok(viewer) => *self = ViewerApp::Running(Box::new(viewer)),
            Err(e) => {
                log::error!("{e}");
                *self = ViewerApp::Exited(Some(e));
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let ViewerApp::Running(viewer) = self else {
            return;
        };

        match viewer.handle_window_event(event) {
            Ok(Status::Continue) => {}
            Ok(Status::Exit) => {
                log::info!("Shutting down");
                *self = ViewerApp::Exited(None);
                event_loop.exit();
            }
            Err(e) => {
                log::error!("{e}");
                *self = ViewerApp::Exited(Some(e));
                event_loop.exit();
            }
        }
    }
}
