use anyhow::{Context as _, Result, anyhow};
use clap::Parser;
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use terrainview_common::AppConfig;
use terrainview_heightmap::Heightmap;
use terrainview_input::{Action, InputState};
use terrainview_mesh::{GridLayout, TerrainMesh};
use terrainview_render::RenderView;
use terrainview_render_wgpu::TerrainRenderer;
use terrainview_scene::Scene;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

mod hud;

use hud::{FrameTimer, HudStats};

/// Longest frame step fed to the scene, in seconds.
const MAX_FRAME_DT: f32 = 0.1;
/// Pixel scroll deltas (touchpads) per equivalent wheel line.
const PIXELS_PER_LINE: f32 = 20.0;

#[derive(Parser)]
#[command(name = "terrainview-desktop", about = "Heightmap terrain viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON config file; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Raw heightmap file (width * width bytes)
    #[arg(long)]
    heightmap: Option<PathBuf>,

    /// Grid width of the heightmap in samples
    #[arg(short, long)]
    width: Option<u32>,

    /// Let the scroll wheel change the field of view
    #[arg(long)]
    scroll_zoom: bool,

    /// Spin the terrain using the accumulated rotation angle
    #[arg(long)]
    spin: bool,
}

impl Cli {
    fn app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => AppConfig::default(),
        };
        if let Some(path) = &self.heightmap {
            config.terrain.heightmap = path.clone();
        }
        if let Some(width) = self.width {
            config.terrain.width = width;
        }
        config.controls.scroll_zoom |= self.scroll_zoom;
        config.controls.spin |= self.spin;
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn action_for_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::KeyW => Some(Action::MoveForward),
        KeyCode::KeyS => Some(Action::MoveBackward),
        KeyCode::KeyA => Some(Action::StrafeLeft),
        KeyCode::KeyD => Some(Action::StrafeRight),
        KeyCode::KeyZ => Some(Action::Descend),
        KeyCode::KeyX => Some(Action::Ascend),
        KeyCode::Escape => Some(Action::Exit),
        _ => None,
    }
}

/// Load the heightmap and mesh it with the single configured width.
fn build_terrain(config: &AppConfig) -> Result<TerrainMesh> {
    let terrain = &config.terrain;
    let heightmap = Heightmap::load(&terrain.heightmap, terrain.width, terrain.height_scale)
        .with_context(|| format!("failed to load heightmap {}", terrain.heightmap.display()))?;
    tracing::info!(
        "loaded {}x{} heightmap from {} (heights {:.2}..{:.2})",
        heightmap.width(),
        heightmap.width(),
        terrain.heightmap.display(),
        heightmap.min_height(),
        heightmap.max_height()
    );
    let mesh = TerrainMesh::build(&heightmap, &GridLayout::from(terrain))?;
    Ok(mesh)
}

/// Viewer state that exists before and independently of the GPU.
struct AppState {
    scene: Scene,
    input: InputState,
    timer: FrameTimer,
    show_hud: bool,
    last_frame: Instant,
}

impl AppState {
    fn new(config: &AppConfig) -> Self {
        Self {
            scene: Scene::new(config),
            input: InputState::new(),
            timer: FrameTimer::default(),
            show_hud: true,
            last_frame: Instant::now(),
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(action) = action_for_key(key) {
            self.input.set(action, pressed);
        } else if key == KeyCode::F1 && pressed {
            self.show_hud = !self.show_hud;
        }
    }

    /// Snapshot input and advance the scene. Returns false once exit was requested.
    fn step(&mut self) -> bool {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_DT);
        self.last_frame = now;
        self.timer.record(dt);

        let snapshot = self.input.snapshot();
        self.scene.update(dt, &snapshot);
        !snapshot.exit_requested()
    }
}

/// Surface, device and queue for the viewer window.
struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    adapter_name: String,
}

impl Gpu {
    fn new(window: Arc<Window>) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow!("no compatible graphics adapter found"))?;

        let info = adapter.get_info();
        tracing::info!("adapter: {} ({:?})", info.name, info.device_type);
        tracing::info!("backend: {}", info.backend.to_str());
        tracing::info!("driver: {} {}", info.driver, info.driver_info);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("terrainview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create device")?;

        // Validation errors are reported and the frame loop carries on.
        device.on_uncaptured_error(Box::new(|err: wgpu::Error| {
            tracing::error!("GPU error: {err}");
        }));

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("surface reports no supported formats"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            adapter_name: info.name,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
    }
}

/// Everything created once the window exists.
struct Graphics {
    window: Arc<Window>,
    gpu: Gpu,
    renderer: TerrainRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    config: AppConfig,
    state: AppState,
    mesh: TerrainMesh,
    graphics: Option<Graphics>,
    egui_ctx: EguiContext,
    fatal: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(config: AppConfig, mesh: TerrainMesh) -> Self {
        Self {
            state: AppState::new(&config),
            config,
            mesh,
            graphics: None,
            egui_ctx: EguiContext::default(),
            fatal: None,
        }
    }

    fn init_graphics(&self, event_loop: &ActiveEventLoop) -> Result<Graphics> {
        let win = &self.config.window;
        let attrs = Window::default_attributes()
            .with_title(win.title.clone())
            .with_inner_size(PhysicalSize::new(win.width, win.height))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let gpu = Gpu::new(window.clone())?;
        let renderer = TerrainRenderer::new(
            &gpu.device,
            gpu.config.format,
            gpu.config.width,
            gpu.config.height,
            &self.mesh,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        grab_cursor(&window, true);

        Ok(Graphics {
            window,
            gpu,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        tracing::error!("{err:#}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.state.step() {
            tracing::info!("exit requested");
            event_loop.exit();
            return;
        }

        let Some(gfx) = &mut self.graphics else {
            return;
        };
        let gpu = &gfx.gpu;

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow!("surface out of memory"));
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let render_view = RenderView::from_scene(&self.state.scene);
        gfx.renderer
            .render(&gpu.device, &gpu.queue, &view, &render_view);

        // egui consumes its pending input every frame, even with the HUD hidden.
        let raw_input = gfx.egui_winit.take_egui_input(&gfx.window);
        let stats = HudStats {
            adapter: &gpu.adapter_name,
            frame_time: self.state.timer.average(),
            fps: self.state.timer.fps(),
            vertices: gfx.renderer.vertex_count(),
            indices: gfx.renderer.index_count(),
        };
        let full_output = hud::run_hud(
            &self.egui_ctx,
            raw_input,
            &self.state.scene,
            &stats,
            self.state.show_hud,
        );

        gfx.egui_winit
            .handle_platform_output(&gfx.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gfx.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gfx.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gfx.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gfx.egui_renderer.free_texture(id);
        }

        output.present();
        gfx.window.request_redraw();
    }
}

fn grab_cursor(window: &Window, grab: bool) {
    if grab {
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grabbed {
            tracing::warn!("cursor grab unavailable: {e}");
        }
    } else if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
        tracing::warn!("cursor release failed: {e}");
    }
    window.set_cursor_visible(!grab);
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        match self.init_graphics(event_loop) {
            Ok(graphics) => {
                self.state.scene.camera.set_aspect_ratio(
                    graphics.gpu.config.width as f32 / graphics.gpu.config.height as f32,
                );
                self.state.last_frame = Instant::now();
                self.graphics = Some(graphics);
                tracing::info!("graphics initialized");
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gfx) = &mut self.graphics {
            let response = gfx.egui_winit.on_window_event(&gfx.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gfx) = &mut self.graphics {
                    gfx.gpu.resize(new_size.width, new_size.height);
                    let (w, h) = (gfx.gpu.config.width, gfx.gpu.config.height);
                    gfx.renderer.resize(&gfx.gpu.device, w, h);
                    self.state.scene.camera.set_aspect_ratio(w as f32 / h as f32);
                }
            }
            WindowEvent::Focused(focused) => {
                if !focused {
                    self.state.input.release_all();
                }
                if let Some(gfx) = &self.graphics {
                    grab_cursor(&gfx.window, focused);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
                self.state.input.add_scroll(lines);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state
                .input
                .add_mouse_delta(delta.0 as f32, delta.1 as f32);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gfx) = &self.graphics {
            gfx.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("terrainview-desktop starting");

    let config = cli.app_config()?;
    let mesh = build_terrain(&config)?;

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(config, mesh);
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.fatal.take() {
        return Err(err);
    }
    tracing::info!("terrainview-desktop exiting");
    Ok(())
}
