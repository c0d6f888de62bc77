//! Minimal viewer hosting the axis gizmo.
//!
//! - Left mouse drag: orbit the camera
//! - R: reset the camera
//! - Escape: quit
//!
//! An optional first argument names a JSON `GizmoConfig` file.

use std::error::Error;
use std::ffi::CString;
use std::num::NonZeroU32;

use glow::HasContext;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version };
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{ Surface, SurfaceAttributesBuilder, WindowSurface };
use glutin_winit::DisplayBuilder;
use log::{ error, info };
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
use winit::event::{ ElementState, KeyEvent, MouseButton, WindowEvent };
use winit::event_loop::{ ActiveEventLoop, EventLoop };
use winit::keyboard::{ KeyCode, PhysicalKey };
use winit::window::{ Window, WindowId };

use axis_gizmo::{ overlay_projection, GizmoConfig, GizmoOverlay, OrbitCamera };

const WIDTH: u32 = 1024;
const HEIGHT: u32 = 768;
const ORBIT_SENSITIVITY: f32 = 0.005;

struct Graphics {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    gl: glow::Context,
    gizmo: GizmoOverlay<glow::Context>,
}

struct App {
    config: GizmoConfig,
    camera: OrbitCamera,
    graphics: Option<Graphics>,
    dragging: bool,
    last_cursor: Option<PhysicalPosition<f64>>,
    exit_error: Option<Box<dyn Error>>,
}

impl App {
    fn new(config: GizmoConfig) -> Self {
        Self {
            config,
            camera: OrbitCamera::default(),
            graphics: None,
            dragging: false,
            last_cursor: None,
            exit_error: None,
        }
    }

    fn create_graphics(&self, event_loop: &ActiveEventLoop) -> Result<Graphics, Box<dyn Error>> {
        let window = event_loop.create_window(
            Window::default_attributes()
                .with_title("Axis gizmo")
                .with_inner_size(winit::dpi::PhysicalSize::new(WIDTH, HEIGHT))
        )?;

        let (_, gl_config) = DisplayBuilder::new().build(
            event_loop,
            ConfigTemplateBuilder::new().with_depth_size(24),
            |configs| {
                configs
                    .reduce(|best, c| if c.num_samples() > best.num_samples() { c } else { best })
                    .expect("display offers no GL configs")
            }
        )?;

        let raw_handle = window.window_handle()?.as_raw();
        let display = gl_config.display();
        let ctx_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(raw_handle));
        let not_current = unsafe { display.create_context(&gl_config, &ctx_attrs)? };

        let size = window.inner_size();
        let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_handle,
            NonZeroU32::new(size.width.max(1)).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(size.height.max(1)).unwrap_or(NonZeroU32::MIN)
        );
        let gl_surface = unsafe { display.create_window_surface(&gl_config, &surface_attrs)? };
        let gl_context = not_current.make_current(&gl_surface)?;

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                match CString::new(s) {
                    Ok(symbol) => display.get_proc_address(&symbol) as *const _,
                    Err(_) => std::ptr::null(),
                }
            })
        };

        let mut gizmo = GizmoOverlay::new();
        gizmo.init_with_config(&gl, &self.config)?;

        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);
        }

        info!("viewer ready ({}x{})", size.width, size.height);
        Ok(Graphics { window, gl_context, gl_surface, gl, gizmo })
    }

    fn render(&self) -> Result<(), Box<dyn Error>> {
        let Some(graphics) = &self.graphics else {
            return Ok(());
        };

        let size = graphics.window.inner_size();
        unsafe {
            let gl = &graphics.gl;
            gl.viewport(0, 0, size.width as i32, size.height as i32);
            gl.depth_mask(true);
            gl.clear_color(0.12, 0.12, 0.14, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        graphics.gizmo.draw_overlay(&graphics.gl, self.camera.rotation(), overlay_projection())?;
        graphics.gl_surface.swap_buffers(&graphics.gl_context)?;
        graphics.window.request_redraw();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Box<dyn Error>) {
        error!("{err}");
        self.exit_error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }
        match self.create_graphics(event_loop) {
            Ok(graphics) => {
                graphics.window.request_redraw();
                self.graphics = Some(graphics);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    self.fail(event_loop, e);
                }
            }

            WindowEvent::Resized(size) => {
                if let Some(graphics) = &self.graphics {
                    if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
                        graphics.gl_surface.resize(&graphics.gl_context, w, h);
                    }
                    graphics.window.request_redraw();
                }
            }

            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                self.dragging = state == ElementState::Pressed;
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let (true, Some(last)) = (self.dragging, self.last_cursor) {
                    let dx = (position.x - last.x) as f32;
                    let dy = (position.y - last.y) as f32;
                    self.camera.add_rotation_delta(-dy * ORBIT_SENSITIVITY, -dx * ORBIT_SENSITIVITY);
                }
                self.last_cursor = Some(position);
            }

            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key: PhysicalKey::Code(code), state: ElementState::Pressed, .. },
                ..
            } => {
                match code {
                    KeyCode::Escape => event_loop.exit(),
                    KeyCode::KeyR => self.camera.reset(),
                    _ => {}
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut graphics) = self.graphics.take() {
            graphics.gizmo.release(&graphics.gl);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("loading gizmo config from {path}");
            GizmoConfig::load(&path)?
        }
        None => GizmoConfig::default(),
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.exit_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
