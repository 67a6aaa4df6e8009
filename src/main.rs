//! raging-sea - An animated water surface with live parameter tuning
//!
//! Big swells from crossed sines, small ripples carved in by noise octaves,
//! and a height-driven color gradient. Drag to orbit, scroll to zoom.

use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use raging_sea::camera::OrbitCamera;
use raging_sea::cli::Args;
use raging_sea::clock::FrameClock;
use raging_sea::overlay::Overlay;
use raging_sea::panel::{FrameStats, ParameterPanel};
use raging_sea::params::{OrbitParams, RenderConfig, WaveParameters};
use raging_sea::preview;
use raging_sea::rendering::{RenderSystem, WaterUniforms};
use raging_sea::viewport::Viewport;
use raging_sea::water::WaterMesh;

/// Scroll distance treated as one wheel line for touchpads (physical pixels)
const PIXELS_PER_LINE: f32 = 40.0;

/// Left-button orbit drag
#[derive(Default)]
struct Drag {
    active: bool,
    last: Option<PhysicalPosition<f64>>,
}

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    overlay: Option<Overlay>,
    viewport: Viewport,

    // Scene state
    params: WaveParameters,
    mesh: WaterMesh,
    camera: OrbitCamera,
    panel: ParameterPanel,
    clock: FrameClock,
    drag: Drag,

    // Configuration
    render_config: RenderConfig,

    /// Fatal startup failure, reported by `main` after the loop exits
    init_error: Option<anyhow::Error>,
}

impl App {
    fn new(render_config: RenderConfig, params: WaveParameters) -> Self {
        let mesh = WaterMesh::new(render_config.plane_size, render_config.subdivisions);
        info!(
            vertices = mesh.vertices.len(),
            triangles = mesh.indices.len() / 3,
            "Water mesh built"
        );

        let viewport = Viewport::new(
            render_config.window_width,
            render_config.window_height,
            1.0,
            render_config.max_pixel_ratio,
        );
        let camera = OrbitCamera::new(OrbitParams::default(), viewport.aspect_ratio());

        Self {
            window: None,
            render_system: None,
            overlay: None,
            viewport,
            params,
            mesh,
            camera,
            panel: ParameterPanel::new(),
            clock: FrameClock::new(),
            drag: Drag::default(),
            render_config,
            init_error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        // Create window
        let window_attributes = Window::default_attributes()
            .with_title("Raging Sea")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        self.viewport = Viewport::new(
            size.width,
            size.height,
            window.scale_factor(),
            self.render_config.max_pixel_ratio,
        );
        self.camera.set_aspect(self.viewport.aspect_ratio());

        // Initialize rendering system
        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.mesh,
            &self.viewport,
            &self.render_config,
        ))
        .context("failed to initialize renderer")?;

        info!(
            width = size.width,
            height = size.height,
            scale_factor = window.scale_factor(),
            pixel_ratio = self.viewport.pixel_ratio(),
            "Raging Sea is running (drag to orbit, scroll to zoom, ESC to quit)"
        );

        self.overlay = Some(Overlay::new(&window));
        self.render_system = Some(render_system);
        self.window = Some(window);

        // Animation time starts with the first frame on screen
        self.clock = FrameClock::new();
        Ok(())
    }

    fn apply_viewport(&mut self) {
        self.camera.set_aspect(self.viewport.aspect_ratio());
        if let Some(render_system) = &mut self.render_system {
            render_system.resize(&self.viewport);
        }
    }

    /// Camera controls for events the panel did not consume
    fn handle_camera_input(&mut self, event: &WindowEvent, consumed: bool) {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed if !consumed => self.drag.active = true,
                ElementState::Released => self.drag.active = false,
                _ => {}
            },
            WindowEvent::CursorMoved { position, .. } => {
                if self.drag.active {
                    if let Some(last) = self.drag.last {
                        self.camera.rotate(
                            (position.x - last.x) as f32,
                            (position.y - last.y) as f32,
                            self.viewport.physical_height as f32,
                        );
                    }
                }
                self.drag.last = Some(*position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.drag.last = None;
            }
            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                self.camera.zoom(lines);
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init(event_loop) {
            error!("{e:#}");
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let consumed = match (&mut self.overlay, &self.window) {
            (Some(overlay), Some(window)) => overlay.on_window_event(window, &event),
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } if !consumed => event_loop.exit(),
            WindowEvent::Resized(size) => {
                self.viewport.resize(size.width, size.height);
                self.apply_viewport();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                // A Resized event with the new physical size follows
                self.viewport.set_scale_factor(scale_factor);
                self.apply_viewport();
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            other => self.handle_camera_input(&other, consumed),
        }
    }
}

impl App {
    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(render_system), Some(overlay)) =
            (&self.window, &mut self.render_system, &mut self.overlay)
        else {
            return;
        };

        if !self.viewport.is_drawable() {
            return; // Minimized
        }

        // Advance time
        self.params.elapsed_time = self.clock.tick();

        // Panel edits land before this frame's uniforms are built
        let stats = FrameStats {
            elapsed_s: self.clock.elapsed_s(),
            fps: self.clock.fps(),
            render_size: render_system.scene_size(),
            pixel_ratio: self.viewport.pixel_ratio(),
        };
        let panel = &mut self.panel;
        let params = &mut self.params;
        let frame = overlay.run(window, |ctx| {
            if panel.show(ctx, params, &stats) {
                debug!("Wave parameters edited");
            }
        });

        // Damped orbit
        self.camera.update();
        let (view_proj, _eye) = self.camera.view_proj();

        let uniforms = WaterUniforms::new(&self.params, view_proj, self.panel.debug_view);
        render_system.update_uniforms(&uniforms);

        match render_system.render(frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated, reconfiguring");
                render_system.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                debug!("Surface timeout, skipping frame");
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                self.init_error = Some(anyhow::anyhow!("GPU out of memory"));
                event_loop.exit();
            }
            #[allow(unreachable_patterns)]
            Err(e) => {
                warn!("Render error: {e:?}");
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,wgpu_core=warn,wgpu_hal=warn,naga=warn")),
        )
        .init();

    let args = Args::parse();
    let render_config = args.render_config();
    let params = args.wave_parameters();

    if let Some(preview_config) = args.preview_config() {
        return preview::write_preview(&params, render_config.plane_size, &preview_config)
            .context("failed to write preview");
    }

    info!("Raging Sea - animated water surface");

    let mut app = App::new(render_config, params);
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.run_app(&mut app).context("event loop failed")?;

    match app.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
