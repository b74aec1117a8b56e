// Renderer module for the cube inspector

use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};
use wgpu::{Buffer, RenderPipeline};
use wgpu::util::DeviceExt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use glam::{Mat4, Vec3};

use crate::camera::{cursor_to_ndc, OrbitCamera};
use crate::color::Color;
use crate::error::CubeError;
use crate::panel::{InfoPanel, APP_TITLE};
use crate::stage::{PointerOutcome, Stage};

const BACKGROUND: Color = Color::from_rgb_hex(0x0a0a1a);
const FLOOR_COLOR: Color = Color::from_rgb_hex(0x1a1a2e);
const FLOOR_EXTENT: f32 = 100.0;
const FLOOR_THICKNESS: f32 = 0.02;
const LIGHT_POSITION: Vec3 = Vec3::new(10.0, 20.0, 10.0);
const LIGHT_INTENSITY: f32 = 0.8;
const AMBIENT_INTENSITY: f32 = 0.4;
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
/// Pixels of trackpad scroll that count as one wheel line.
const PIXELS_PER_LINE: f32 = 50.0;

pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    window: Arc<Window>,
    pipeline: RenderPipeline,
    vertex_buffer: Buffer,
    index_buffer: Buffer,
    instance_buffer: Buffer,
    instance_capacity: usize,
    instance_count: u32,
    uniform_buffer: Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    stage: Stage,
    orbit: OrbitCamera,
    panel: InfoPanel,
    cursor: Option<PhysicalPosition<f64>>,
    title: String,
    last_frame: Instant,
    keys_pressed: KeyboardState,
}

#[derive(Default)]
struct KeyboardState {
    w: bool,
    a: bool,
    s: bool,
    d: bool,
}

// Vertex of the unit box
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

// Per-box data: model matrix columns plus colors in linear space
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct InstanceRaw {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    emissive: [f32; 4],
}

impl InstanceRaw {
    const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
    ];

    fn new(model: Mat4, color: Color, emissive: Color) -> Self {
        let [r, g, b] = color.to_linear();
        let [er, eg, eb] = emissive.to_linear();
        Self {
            model: model.to_cols_array_2d(),
            color: [r, g, b, 1.0],
            emissive: [er, eg, eb, 1.0],
        }
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

// Uniform buffer structure for camera and lighting
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    light: [f32; 4],
    ambient: [f32; 4],
}

impl Uniforms {
    fn new() -> Self {
        let to_light = LIGHT_POSITION.normalize();
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            light: [to_light.x, to_light.y, to_light.z, LIGHT_INTENSITY],
            ambient: [AMBIENT_INTENSITY, 0.0, 0.0, 0.0],
        }
    }

    fn update_view_proj(&mut self, view_proj: Mat4) {
        self.view_proj = view_proj.to_cols_array_2d();
    }
}

impl Renderer {
    pub async fn new(event_loop: &EventLoop<()>, stage: Stage) -> Result<Self, CubeError> {
        // Create window with Arc for shared ownership
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(APP_TITLE)
                .build(event_loop)
                .map_err(|e| CubeError::Window(e.to_string()))?,
        );

        // Initialize wgpu
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        // Get surface from window
        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| CubeError::Gpu(e.to_string()))?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| CubeError::Gpu("no compatible GPU adapter".to_owned()))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Renderer Device"),
                    required_features: wgpu::Features::default(),
                    required_limits: wgpu::Limits::default(),
                },
                None, // Trace path
            )
            .await
            .map_err(|e| CubeError::Gpu(e.to_string()))?;

        // Get surface capabilities
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| CubeError::Gpu("surface reports no formats".to_owned()))?;

        // Configure surface
        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, config.width, config.height);

        // Load shader
        let shader_code = include_str!("shader.wgsl");
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_code.into()),
        });

        // Define vertex buffer layout
        let vertex_buffer_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        };

        // Create bind group layout for uniforms
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Uniform Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        // Create render pipeline
        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vs_main",
                buffers: &[vertex_buffer_layout, InstanceRaw::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        // Unit box centered on the origin, one normal per face
        let vertices = [
            // Front face (+Z)
            Vertex { position: [-0.5, -0.5,  0.5], normal: [0.0, 0.0, 1.0] },
            Vertex { position: [ 0.5, -0.5,  0.5], normal: [0.0, 0.0, 1.0] },
            Vertex { position: [ 0.5,  0.5,  0.5], normal: [0.0, 0.0, 1.0] },
            Vertex { position: [-0.5,  0.5,  0.5], normal: [0.0, 0.0, 1.0] },

            // Back face (-Z)
            Vertex { position: [-0.5, -0.5, -0.5], normal: [0.0, 0.0, -1.0] },
            Vertex { position: [-0.5,  0.5, -0.5], normal: [0.0, 0.0, -1.0] },
            Vertex { position: [ 0.5,  0.5, -0.5], normal: [0.0, 0.0, -1.0] },
            Vertex { position: [ 0.5, -0.5, -0.5], normal: [0.0, 0.0, -1.0] },

            // Top face (+Y)
            Vertex { position: [-0.5,  0.5, -0.5], normal: [0.0, 1.0, 0.0] },
            Vertex { position: [-0.5,  0.5,  0.5], normal: [0.0, 1.0, 0.0] },
            Vertex { position: [ 0.5,  0.5,  0.5], normal: [0.0, 1.0, 0.0] },
            Vertex { position: [ 0.5,  0.5, -0.5], normal: [0.0, 1.0, 0.0] },

            // Bottom face (-Y)
            Vertex { position: [-0.5, -0.5, -0.5], normal: [0.0, -1.0, 0.0] },
            Vertex { position: [ 0.5, -0.5, -0.5], normal: [0.0, -1.0, 0.0] },
            Vertex { position: [ 0.5, -0.5,  0.5], normal: [0.0, -1.0, 0.0] },
            Vertex { position: [-0.5, -0.5,  0.5], normal: [0.0, -1.0, 0.0] },

            // Right face (+X)
            Vertex { position: [ 0.5, -0.5, -0.5], normal: [1.0, 0.0, 0.0] },
            Vertex { position: [ 0.5,  0.5, -0.5], normal: [1.0, 0.0, 0.0] },
            Vertex { position: [ 0.5,  0.5,  0.5], normal: [1.0, 0.0, 0.0] },
            Vertex { position: [ 0.5, -0.5,  0.5], normal: [1.0, 0.0, 0.0] },

            // Left face (-X)
            Vertex { position: [-0.5, -0.5, -0.5], normal: [-1.0, 0.0, 0.0] },
            Vertex { position: [-0.5, -0.5,  0.5], normal: [-1.0, 0.0, 0.0] },
            Vertex { position: [-0.5,  0.5,  0.5], normal: [-1.0, 0.0, 0.0] },
            Vertex { position: [-0.5,  0.5, -0.5], normal: [-1.0, 0.0, 0.0] },
        ];

        // Create indices for the box
        #[rustfmt::skip]
        let indices: &[u16] = &[
            0,  1,  2,  2,  3,  0,  // front
            4,  5,  6,  6,  7,  4,  // back
            8,  9,  10, 10, 11, 8,  // top
            12, 13, 14, 14, 15, 12, // bottom
            16, 17, 18, 18, 19, 16, // right
            20, 21, 22, 22, 23, 20, // left
        ];

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        // Floor plus one slot per cube, grown on demand
        let instance_capacity = (stage.registry().len() + 1).next_power_of_two();
        let instance_buffer = create_instance_buffer(&device, instance_capacity);

        // Create uniform buffer
        let uniform_data = Uniforms::new();
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniform_data]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Create bind group
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let orbit = OrbitCamera::new(&stage.options().camera);
        let panel = InfoPanel::new(Duration::from_secs_f32(
            stage.options().panel.notice_secs.max(0.0),
        ));

        log::info!("renderer ready ({:?}, {}x{})", surface_format, config.width, config.height);

        Ok(Self {
            device,
            queue,
            surface,
            config,
            window,
            pipeline,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            instance_capacity,
            instance_count: 0,
            uniform_buffer,
            uniform_bind_group,
            depth_view,
            stage,
            orbit,
            panel,
            cursor: None,
            title: String::new(),
            last_frame: Instant::now(),
            keys_pressed: KeyboardState::default(),
        })
    }

    pub fn run(mut self, event_loop: EventLoop<()>) -> Result<(), CubeError> {
        self.sync_panel();
        event_loop
            .run(move |event, target| {
                target.set_control_flow(ControlFlow::Poll);

                match event {
                    Event::AboutToWait => self.window.request_redraw(),
                    Event::WindowEvent { window_id, event } if window_id == self.window.id() => {
                        self.handle_window_event(event, target);
                    }
                    _ => {}
                }
            })
            .map_err(|e| CubeError::Window(e.to_string()))
    }

    fn handle_window_event(&mut self, event: WindowEvent, target: &EventLoopWindowTarget<()>) {
        match event {
            WindowEvent::CloseRequested => target.exit(),
            WindowEvent::Resized(physical_size) => self.resize(physical_size),
            WindowEvent::RedrawRequested => self.update_and_render(),
            WindowEvent::KeyboardInput { event, .. } => self.handle_keyboard_input(event),
            WindowEvent::CursorMoved { position, .. } => self.cursor = Some(position),
            WindowEvent::CursorLeft { .. } => self.cursor = None,
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.handle_click(),
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
                self.orbit.zoom(lines);
            }
            _ => {}
        }
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, new_size.width, new_size.height);
        log::debug!("resized to {}x{}", new_size.width, new_size.height);
    }

    fn handle_keyboard_input(&mut self, event: KeyEvent) {
        let PhysicalKey::Code(keycode) = event.physical_key else {
            return;
        };
        let is_pressed = event.state == ElementState::Pressed;
        match keycode {
            KeyCode::KeyW => self.keys_pressed.w = is_pressed,
            KeyCode::KeyA => self.keys_pressed.a = is_pressed,
            KeyCode::KeyS => self.keys_pressed.s = is_pressed,
            KeyCode::KeyD => self.keys_pressed.d = is_pressed,
            _ => {}
        }
        if !is_pressed || event.repeat {
            return;
        }
        match keycode {
            KeyCode::Escape => self.stage.request_clear(),
            KeyCode::KeyR => {
                if let Err(e) = self.stage.request_reset() {
                    log::error!("randomize failed: {e}");
                }
            }
            KeyCode::KeyH => {
                let _ = self.panel.toggle_help();
            }
            _ => return,
        }
        self.sync_panel();
    }

    fn handle_click(&mut self) {
        let Some(cursor) = self.cursor else {
            return;
        };
        let Some(ndc) = cursor_to_ndc(
            cursor.x as f32,
            cursor.y as f32,
            self.config.width as f32,
            self.config.height as f32,
        ) else {
            return;
        };

        let camera = self.orbit.camera(self.aspect_ratio());
        match self.stage.pointer_click(ndc, &camera) {
            Ok(PointerOutcome::Picked(_)) => {}
            Ok(PointerOutcome::NoHit) => self.panel.show_notice("No cube selected"),
            Err(e) => log::warn!("pick failed: {e}"),
        }
        self.sync_panel();
    }

    /// Feed selection events to the panel and refresh the title.
    fn sync_panel(&mut self) {
        for event in self.stage.drain_events() {
            self.panel.apply(&event);
        }
        let title = self.panel.title();
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }
    }

    fn aspect_ratio(&self) -> f32 {
        self.config.width as f32 / self.config.height as f32
    }

    fn update_and_render(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame);
        self.last_frame = now;

        // Orbit the camera while WASD is held
        let step = self.orbit.orbit_speed() * dt.as_secs_f32();
        let mut d_yaw = 0.0;
        let mut d_pitch = 0.0;
        if self.keys_pressed.a {
            d_yaw -= step;
        }
        if self.keys_pressed.d {
            d_yaw += step;
        }
        if self.keys_pressed.w {
            d_pitch += step;
        }
        if self.keys_pressed.s {
            d_pitch -= step;
        }
        self.orbit.rotate(d_yaw, d_pitch);

        self.stage.tick();
        self.panel.advance(dt);
        self.sync_panel();

        let camera = self.orbit.camera(self.aspect_ratio());
        let mut uniforms = Uniforms::new();
        uniforms.update_view_proj(camera.build_matrix());
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[uniforms]),
        );

        self.upload_instances();
        self.render();
    }

    fn upload_instances(&mut self) {
        let floor = Mat4::from_scale_rotation_translation(
            Vec3::new(FLOOR_EXTENT, FLOOR_THICKNESS, FLOOR_EXTENT),
            glam::Quat::IDENTITY,
            Vec3::new(0.0, -0.5 * FLOOR_THICKNESS, 0.0),
        );
        let instances: Vec<InstanceRaw> = std::iter::once(InstanceRaw::new(
            floor,
            FLOOR_COLOR,
            Color::BLACK,
        ))
        .chain(
            self.stage
                .registry()
                .all()
                .map(|obj| InstanceRaw::new(obj.model_matrix(), obj.color, obj.emissive)),
        )
        .collect();

        if instances.len() > self.instance_capacity {
            self.instance_capacity = instances.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(&self.device, self.instance_capacity);
            log::debug!("instance buffer grown to {}", self.instance_capacity);
        }
        self.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        self.instance_count = instances.len() as u32;
    }

    fn render(&mut self) {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory, skipping frame");
                return;
            }
            Err(e) => {
                log::debug!("surface unavailable ({e}), reconfiguring");
                self.resize(self.window.inner_size());
                return;
            }
        };

        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        {
            let [r, g, b] = BACKGROUND.to_linear();
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            render_pass.draw_indexed(0..36, 0, 0..self.instance_count);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Instance Buffer"),
        size: (capacity * std::mem::size_of::<InstanceRaw>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
