use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use voxglobe_common::{ConfigArgs, GlobeConfig, MaterialHandle, PointerButton, SurfaceMaterials};
use voxglobe_input::PointerTracker;
use voxglobe_kernel::Globe;
use voxglobe_render::PrimitiveList;
use voxglobe_render_wgpu::{MaterialPalette, OrbitCamera, WgpuRenderer};
use voxglobe_tools::GlobeInspector;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const LAND: MaterialHandle = MaterialHandle(1);
const WATER: MaterialHandle = MaterialHandle(2);

#[derive(Parser)]
#[command(name = "voxglobe-desktop", about = "Voxel globe desktop viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

/// Application state.
struct AppState {
    globe: Globe,
    primitives: PrimitiveList,
    pointer: PointerTracker,
    camera: OrbitCamera,
    palette: MaterialPalette,
    /// Terrain settings being edited in the panel; applied on regenerate.
    draft: GlobeConfig,
    show_inspector: bool,
    last_frame: Instant,
}

impl AppState {
    fn new(config: GlobeConfig) -> Self {
        let materials = SurfaceMaterials {
            land: Some(LAND),
            water: Some(WATER),
        };
        let mut primitives = PrimitiveList::new();
        let globe = Globe::start(config, materials, &mut primitives);

        let mut palette = MaterialPalette::new();
        palette.insert(LAND, [0.22, 0.62, 0.25, 1.0]);
        palette.insert(WATER, [0.16, 0.38, 0.82, 1.0]);

        Self {
            globe,
            primitives,
            pointer: PointerTracker::new(config.spin.drag_button),
            camera: OrbitCamera::framing(config.terrain.center, config.terrain.radius),
            palette,
            draft: config,
            show_inspector: true,
            last_frame: Instant::now(),
        }
    }

    fn update(&mut self, dt: f32) {
        let input = self.pointer.take_frame();
        self.globe.tick(&input, dt);
    }

    fn regenerate(&mut self) {
        let config = self.draft;
        self.globe.reconfigure(config, &mut self.primitives);
        let aspect = self.camera.aspect;
        self.camera = OrbitCamera::framing(config.terrain.center, config.terrain.radius);
        self.camera.aspect = aspect;
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::F1 => self.show_inspector = !self.show_inspector,
            KeyCode::KeyR => self.regenerate(),
            _ => {}
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_inspector {
            return;
        }

        let summary = GlobeInspector::summary(&self.globe);
        let mut regenerate = false;

        egui::SidePanel::left("inspector")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Voxel Globe");
                ui.separator();
                ui.label(format!("Tick: {}  Seed: {}", summary.tick, summary.seed));
                ui.label(format!(
                    "Voxels: {}  (land {}, water {})",
                    summary.voxel_count, summary.land_count, summary.water_count
                ));
                match summary.cube_size {
                    Some(size) => ui.label(format!("Cube size: {size:.3}")),
                    None => ui.label("Cube size: degenerate"),
                };
                ui.label(format!("Phase: {}", summary.phase));
                let [x, y, z] = summary.angular_velocity;
                ui.label(format!("Spin: ({x:.1}, {y:.1}, {z:.1}) deg/s"));
                ui.separator();

                ui.heading("Terrain");
                let terrain = &mut self.draft.terrain;
                ui.add(egui::Slider::new(&mut terrain.resolution, 1..=40).text("resolution"));
                ui.add(egui::Slider::new(&mut terrain.radius, 0.5..=20.0).text("radius"));
                ui.add(egui::DragValue::new(&mut terrain.noise_seed).prefix("seed: "));
                ui.add(
                    egui::Slider::new(&mut terrain.land_threshold, 0.0..=1.0).text("land threshold"),
                );
                ui.separator();

                ui.heading("Spin");
                let spin = &mut self.draft.spin;
                ui.add(egui::Slider::new(&mut spin.rotation_speed, 1.0..=240.0).text("speed"));
                ui.add(egui::Slider::new(&mut spin.inertia_duration, 0.0..=5.0).text("inertia (s)"));
                ui.add(egui::Slider::new(&mut spin.inertia_damping, 0.5..=6.0).text("damping"));

                if ui.button("Regenerate (R)").clicked() {
                    regenerate = true;
                }

                ui.separator();
                ui.small("F1: Toggle Panel | Drag: Spin | Wheel: Zoom");
            });

        if regenerate {
            self.regenerate();
        }
    }
}

/// GPU resources, created once the window exists.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Voxel Globe")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

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
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("voxglobe_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height);
        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn draw(&mut self, state: &mut AppState, egui_ctx: &EguiContext) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
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

        self.renderer.render(
            &self.device,
            &self.queue,
            &view,
            &state.camera,
            state.globe.transform(),
            &state.primitives,
            &state.palette,
        );

        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| state.draw_ui(ctx));
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
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
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(config: GlobeConfig) -> Self {
        Self {
            state: AppState::new(config),
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::new(event_loop, &self.egui_ctx) {
            Ok(gpu) => {
                self.state.camera.aspect = gpu.aspect();
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize GPU: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let consumed = gpu.egui_winit.on_window_event(&gpu.window, &event).consumed;
        // A release over the panel must still end the drag.
        let is_release = matches!(
            event,
            WindowEvent::MouseInput {
                state: ElementState::Released,
                ..
            }
        );
        if consumed && !is_release {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                gpu.resize(new_size);
                self.state.camera.aspect = gpu.aspect();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.state.handle_key(key);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(button) = pointer_button(button) {
                    self.state
                        .pointer
                        .on_button(button, state == ElementState::Pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state
                    .pointer
                    .on_cursor_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.pointer.on_cursor_left();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 40.0,
                };
                self.state.camera.zoom(lines);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
                self.state.last_frame = now;
                self.state.update(dt);

                gpu.draw(&mut self.state, &self.egui_ctx);
                gpu.window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = cli.config.resolve()?;
    tracing::info!(
        resolution = config.terrain.resolution,
        radius = config.terrain.radius,
        seed = config.terrain.noise_seed,
        "voxglobe-desktop starting"
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
