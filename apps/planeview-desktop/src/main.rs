use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use planeview_assets::TextureData;
use planeview_camera::{OrbitCamera, Projection};
use planeview_mesh::GridMesh;
use planeview_render_wgpu::PlaneRenderer;

/// Radius change per scroll line.
const ZOOM_STEP: f32 = 0.1;

#[derive(Parser)]
#[command(name = "planeview-desktop", about = "Textured grid plane viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Lattice points along X (minimum 2)
    #[arg(long, default_value = "32")]
    resolution_x: u32,

    /// Lattice points along Y (minimum 2)
    #[arg(long, default_value = "32")]
    resolution_y: u32,

    /// Texture image to drape over the plane (checkerboard if omitted)
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Vertical field of view in degrees
    #[arg(long, default_value = "45.0")]
    fov: f32,

    /// Closest allowed camera distance
    #[arg(long, default_value = "0.1")]
    min_radius: f32,

    /// Farthest allowed camera distance
    #[arg(long, default_value = "10.0")]
    max_radius: f32,
}

/// Application state: the mesh/texture built once at startup and the
/// camera mutated by input events.
struct AppState {
    mesh: GridMesh,
    texture: TextureData,
    camera: OrbitCamera,
    projection: Projection,
    cursor: (f32, f32),
    show_panel: bool,
}

impl AppState {
    fn new(cli: &Cli) -> Result<Self> {
        let mesh = GridMesh::build(cli.resolution_x, cli.resolution_y)?;
        tracing::info!(
            "built {}x{} lattice: {} vertices, {} triangles",
            mesh.resolution_x(),
            mesh.resolution_y(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        // Decode once here; the pixels are reused for the whole session.
        let texture = match &cli.texture {
            Some(path) => match TextureData::load(path) {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!("failed to load {}: {e}; using checkerboard", path.display());
                    TextureData::checkerboard(256, 256)
                }
            },
            None => TextureData::checkerboard(256, 256),
        };

        let camera = OrbitCamera::new(cli.min_radius, cli.max_radius);
        let projection = Projection {
            fov_y_degrees: cli.fov,
            ..Projection::default()
        };

        Ok(Self {
            mesh,
            texture,
            camera,
            projection,
            cursor: (0.0, 0.0),
            show_panel: true,
        })
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_panel {
            return;
        }

        egui::SidePanel::left("scene_panel")
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("planeview");
                ui.separator();
                ui.label(format!(
                    "Lattice: {}x{} ({} triangles)",
                    self.mesh.resolution_x(),
                    self.mesh.resolution_y(),
                    self.mesh.triangle_count()
                ));
                ui.label(format!(
                    "Texture: {}x{}",
                    self.texture.width(),
                    self.texture.height()
                ));
                ui.separator();
                ui.label(format!("Azimuth: {:.1}", self.camera.azimuth));
                ui.label(format!("Elevation: {:.1}", self.camera.elevation));
                ui.label(format!("Radius: {:.2}", self.camera.radius));
                ui.separator();
                ui.small("F1: Toggle panel | LMB drag: Rotate | Wheel: Zoom");
            });
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<PlaneRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("planeview")
            .with_inner_size(PhysicalSize::new(800u32, 800));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("planeview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = PlaneRenderer::new(
            &device,
            &queue,
            surface_format,
            config.width,
            config.height,
            &self.state.mesh,
            &self.state.texture,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        window.request_redraw();

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(egui_winit) = &mut self.egui_winit {
            let response = egui_winit.on_window_event(self.window.as_ref().unwrap(), &event);
            if response.repaint {
                self.request_redraw();
            }
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
                self.request_redraw();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state.cursor = (position.x as f32, position.y as f32);
                if let Some(config) = &self.config {
                    let (x, y) = self.state.cursor;
                    if self
                        .state
                        .camera
                        .update_drag(x, y, config.width, config.height)
                    {
                        self.request_redraw();
                    }
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                let (x, y) = self.state.cursor;
                match btn_state {
                    ElementState::Pressed => self.state.camera.begin_drag(x, y),
                    ElementState::Released => self.state.camera.end_drag(),
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y * ZOOM_STEP,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 120.0 * ZOOM_STEP,
                };
                if self.state.camera.zoom(amount) {
                    self.request_redraw();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Released,
                        ..
                    },
                ..
            } => match key {
                KeyCode::F1 => {
                    self.state.show_panel = !self.state.show_panel;
                    self.request_redraw();
                }
                KeyCode::Escape => {
                    event_loop.exit();
                }
                _ => {}
            },
            WindowEvent::RedrawRequested => {
                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        self.request_redraw();
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

                let config = self.config.as_ref().unwrap();
                let transform = self.state.projection.compose(
                    self.state.camera.view_matrix(),
                    config.width,
                    config.height,
                );

                if let Some(renderer) = &self.renderer {
                    renderer.render(device, queue, &view, transform);
                }

                let raw_input = self
                    .egui_winit
                    .as_mut()
                    .unwrap()
                    .take_egui_input(self.window.as_ref().unwrap());
                let full_output = self.egui_ctx.run(raw_input, |ctx| {
                    self.state.draw_ui(ctx);
                });

                self.egui_winit.as_mut().unwrap().handle_platform_output(
                    self.window.as_ref().unwrap(),
                    full_output.platform_output,
                );

                let paint_jobs = self
                    .egui_ctx
                    .tessellate(full_output.shapes, full_output.pixels_per_point);

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [
                        self.config.as_ref().unwrap().width,
                        self.config.as_ref().unwrap().height,
                    ],
                    pixels_per_point: full_output.pixels_per_point,
                };

                {
                    let egui_renderer = self.egui_renderer.as_mut().unwrap();
                    for (id, image_delta) in &full_output.textures_delta.set {
                        egui_renderer.update_texture(device, queue, *id, image_delta);
                    }
                    let mut encoder =
                        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("egui_encoder"),
                        });
                    egui_renderer.update_buffers(
                        device,
                        queue,
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
                        egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
                    }
                    queue.submit(std::iter::once(encoder.finish()));
                    for id in &full_output.textures_delta.free {
                        egui_renderer.free_texture(id);
                    }
                }

                output.present();
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("planeview-desktop starting");

    let state = AppState::new(&cli)?;

    let event_loop = EventLoop::new()?;
    // Redraws are driven by camera dirty flags, not a continuous loop.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = GpuApp::new(state);
    event_loop.run_app(&mut app)?;

    Ok(())
}
