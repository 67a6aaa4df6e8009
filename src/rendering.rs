//! Rendering system with wgpu pipelines and shader management.
//!
//! Each frame the water is drawn into an offscreen scene target sized to the
//! capped pixel ratio, then copied onto the window surface with a full-screen
//! triangle, and the parameter panel is painted on top.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use thiserror::Error;
use tracing::{debug, info};
use wgpu::util::DeviceExt;

use crate::params::{RenderConfig, WaveParameters};
use crate::viewport::Viewport;
use crate::water::{Vertex, WaterMesh};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Fatal errors while bringing up the GPU backend
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats for this adapter")]
    NoSurfaceFormat,
}

/// What the water fragment shader outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugView {
    /// Height-driven color gradient
    #[default]
    Gradient,
    /// Surface normals mapped to RGB
    Normals,
}

impl DebugView {
    fn shader_id(self) -> u32 {
        match self {
            DebugView::Gradient => 0,
            DebugView::Normals => 1,
        }
    }
}

/// Uniform buffer for the water shader (matches `WaterUniforms` in water.wgsl)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct WaterUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub depth_color: [f32; 3],
    pub color_offset: f32,
    pub surface_color: [f32; 3],
    pub color_multiplier: f32,
    pub big_waves_frequency: [f32; 2],
    pub big_waves_elevation: f32,
    pub big_waves_speed: f32,
    pub small_waves_elevation: f32,
    pub small_waves_frequency: f32,
    pub small_waves_speed: f32,
    pub small_waves_iterations: u32,
    pub time: f32,
    pub debug_view: u32,
    pub _padding: [f32; 2], // Pad to a 16-byte multiple
}

impl WaterUniforms {
    /// Snapshot the parameters for one frame. Colors are uploaded in linear light.
    pub fn new(params: &WaveParameters, view_proj: Mat4, debug_view: DebugView) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            depth_color: params.depth_color.to_linear().to_array(),
            color_offset: params.color_offset,
            surface_color: params.surface_color.to_linear().to_array(),
            color_multiplier: params.color_multiplier,
            big_waves_frequency: params.big_waves_frequency,
            big_waves_elevation: params.big_waves_elevation,
            big_waves_speed: params.big_waves_speed,
            small_waves_elevation: params.small_waves_elevation,
            small_waves_frequency: params.small_waves_frequency,
            small_waves_speed: params.small_waves_speed,
            small_waves_iterations: params.small_waves_iterations,
            time: params.elapsed_time,
            debug_view: debug_view.shader_id(),
            _padding: [0.0; 2],
        }
    }
}

/// Format egui paints with, plus the extra surface view formats needed for it.
///
/// egui-wgpu blends in gamma space and expects a non-sRGB target, so on an
/// sRGB surface the panel is drawn through a linear-format view of the same
/// texture.
fn panel_formats(surface_format: wgpu::TextureFormat) -> (wgpu::TextureFormat, Vec<wgpu::TextureFormat>) {
    let format = surface_format.remove_srgb_suffix();
    if format == surface_format {
        (format, vec![])
    } else {
        (format, vec![format])
    }
}

/// Tessellated panel output ready for the GPU
pub struct PanelFrame {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

/// Offscreen color + depth targets the water is rendered into
struct SceneTarget {
    color_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    blit_bind_group: wgpu::BindGroup,
    size: (u32, u32),
}

impl SceneTarget {
    fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: (u32, u32),
        blit_layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let extent = wgpu::Extent3d {
            width: size.0,
            height: size.1,
            depth_or_array_layers: 1,
        };

        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Scene Color Target"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Scene Depth Target"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = depth.create_view(&wgpu::TextureViewDescriptor::default());

        let blit_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Blit Bind Group"),
            layout: blit_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self {
            color_view,
            depth_view,
            blit_bind_group,
            size,
        }
    }
}

/// Rendering system managing wgpu device, pipelines, and buffers
pub struct RenderSystem {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,
    water_pipeline: wgpu::RenderPipeline,
    blit_pipeline: wgpu::RenderPipeline,
    blit_bind_group_layout: wgpu::BindGroupLayout,
    scene_sampler: wgpu::Sampler,
    scene: SceneTarget,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    index_count: u32,
    clear_color: wgpu::Color,
    panel_format: wgpu::TextureFormat,
    egui_renderer: egui_wgpu::Renderer,
}

impl RenderSystem {
    /// Create new rendering system
    pub async fn new(
        window: Arc<winit::window::Window>,
        mesh: &WaterMesh,
        viewport: &Viewport,
        config: &RenderConfig,
    ) -> Result<Self, RenderError> {
        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface (window must have 'static lifetime via Arc)
        let surface = instance.create_surface(window)?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        let adapter_info = adapter.get_info();
        info!(
            adapter = %adapter_info.name,
            backend = ?adapter_info.backend,
            "GPU adapter selected"
        );

        // Request device
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;

        let (panel_format, view_formats) = panel_formats(surface_format);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: viewport.physical_width.max(1),
            height: viewport.physical_height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats,
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        // Load shaders
        let water_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Water Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("water.wgsl").into()),
        });

        let blit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("blit.wgsl").into()),
        });

        // Create buffers (topology is static, displacement happens in the shader)
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniforms = WaterUniforms::new(
            &WaveParameters::default(),
            Mat4::IDENTITY,
            DebugView::Gradient,
        );

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Create water bind group
        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        // Create water render pipeline
        let water_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Water Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout],
                push_constant_ranges: &[],
            });

        let water_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Water Render Pipeline"),
            layout: Some(&water_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &water_shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
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
                            format: wgpu::VertexFormat::Float32x2,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &water_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        // Create blit bind group layout and sampler
        let blit_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Blit Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let scene_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Scene Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // Create blit pipeline
        let blit_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Blit Pipeline Layout"),
            bind_group_layouts: &[&blit_bind_group_layout],
            push_constant_ranges: &[],
        });

        let blit_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Blit Pipeline"),
            layout: Some(&blit_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &blit_shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &blit_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let scene = SceneTarget::new(
            &device,
            surface_format,
            viewport.render_size(),
            &blit_bind_group_layout,
            &scene_sampler,
        );

        let egui_renderer = egui_wgpu::Renderer::new(&device, panel_format, None, 1, false);

        let [r, g, b] = config.clear_color;

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            water_pipeline,
            blit_pipeline,
            blit_bind_group_layout,
            scene_sampler,
            scene,
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            uniform_bind_group,
            index_count: mesh.index_count(),
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
            panel_format,
            egui_renderer,
        })
    }

    /// Resize the surface to the window and the scene target to the capped
    /// render resolution
    pub fn resize(&mut self, viewport: &Viewport) {
        if !viewport.is_drawable() {
            return;
        }

        self.surface_config.width = viewport.physical_width;
        self.surface_config.height = viewport.physical_height;
        self.surface.configure(&self.device, &self.surface_config);

        let render_size = viewport.render_size();
        if render_size != self.scene.size {
            self.scene = SceneTarget::new(
                &self.device,
                self.surface_config.format,
                render_size,
                &self.blit_bind_group_layout,
                &self.scene_sampler,
            );
        }

        debug!(
            surface = ?(viewport.physical_width, viewport.physical_height),
            scene = ?render_size,
            pixel_ratio = viewport.pixel_ratio(),
            "Render targets resized"
        );
    }

    /// Reconfigure the surface after it was lost or became outdated
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Current scene target size in pixels
    pub fn scene_size(&self) -> (u32, u32) {
        self.scene.size
    }

    /// Update water uniforms
    pub fn update_uniforms(&self, uniforms: &WaterUniforms) {
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[*uniforms]));
    }

    /// Render a frame: water into the scene target, scene onto the surface,
    /// panel on top
    pub fn render(&mut self, panel: PanelFrame) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let panel_view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.panel_format),
            ..Default::default()
        });

        for (id, image_delta) in &panel.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: panel.pixels_per_point,
        };
        let panel_commands = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &panel.paint_jobs,
            &screen,
        );

        {
            let mut water_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Water Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.scene.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.scene.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            water_pass.set_pipeline(&self.water_pipeline);
            water_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            water_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            water_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            water_pass.draw_indexed(0..self.index_count, 0, 0..1);
        }

        {
            let mut blit_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Blit Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Fullscreen triangle
            blit_pass.set_pipeline(&self.blit_pipeline);
            blit_pass.set_bind_group(0, &self.scene.blit_bind_group, &[]);
            blit_pass.draw(0..3, 0..1);
        }

        {
            let mut panel_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Panel Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &panel_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut panel_pass, &panel.paint_jobs, &screen);
        }

        self.queue
            .submit(panel_commands.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();

        for id in &panel.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Rgb;
    use naga::valid::{Capabilities, ValidationFlags, Validator};

    fn parse_and_validate(source: &str) -> naga::Module {
        let module = naga::front::wgsl::parse_str(source).unwrap();
        Validator::new(ValidationFlags::all(), Capabilities::empty())
            .validate(&module)
            .unwrap();
        module
    }

    fn entry_point_names(module: &naga::Module) -> Vec<&str> {
        module.entry_points.iter().map(|ep| ep.name.as_str()).collect()
    }

    #[test]
    fn test_shaders_validate() {
        let water = parse_and_validate(include_str!("water.wgsl"));
        let blit = parse_and_validate(include_str!("blit.wgsl"));

        for module in [&water, &blit] {
            let names = entry_point_names(module);
            assert!(names.contains(&"vs_main"), "entry points: {names:?}");
            assert!(names.contains(&"fs_main"), "entry points: {names:?}");
        }
    }

    #[test]
    fn test_shader_uniform_block_matches_rust() {
        let module = parse_and_validate(include_str!("water.wgsl"));
        let (_, ty) = module
            .types
            .iter()
            .find(|(_, ty)| ty.name.as_deref() == Some("WaterUniforms"))
            .unwrap();

        assert_eq!(
            ty.inner.size(module.to_ctx()) as usize,
            std::mem::size_of::<WaterUniforms>()
        );

        let naga::TypeInner::Struct { members, .. } = &ty.inner else {
            panic!("WaterUniforms is not a struct");
        };
        let offset = |name: &str| {
            members
                .iter()
                .find(|m| m.name.as_deref() == Some(name))
                .map(|m| m.offset as usize)
                .unwrap()
        };

        assert_eq!(offset("view_proj"), std::mem::offset_of!(WaterUniforms, view_proj));
        assert_eq!(offset("depth_color"), std::mem::offset_of!(WaterUniforms, depth_color));
        assert_eq!(offset("color_offset"), std::mem::offset_of!(WaterUniforms, color_offset));
        assert_eq!(offset("surface_color"), std::mem::offset_of!(WaterUniforms, surface_color));
        assert_eq!(
            offset("big_waves_frequency"),
            std::mem::offset_of!(WaterUniforms, big_waves_frequency)
        );
        assert_eq!(
            offset("small_waves_iterations"),
            std::mem::offset_of!(WaterUniforms, small_waves_iterations)
        );
        assert_eq!(offset("time"), std::mem::offset_of!(WaterUniforms, time));
        assert_eq!(offset("debug_view"), std::mem::offset_of!(WaterUniforms, debug_view));
    }

    #[test]
    fn test_panel_draws_through_linear_view() {
        let (format, extra) = panel_formats(wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!(format, wgpu::TextureFormat::Bgra8Unorm);
        assert!(!format.is_srgb());
        assert_eq!(extra, vec![wgpu::TextureFormat::Bgra8Unorm]);

        // Already linear: no extra view format
        let (format, extra) = panel_formats(wgpu::TextureFormat::Rgba8Unorm);
        assert_eq!(format, wgpu::TextureFormat::Rgba8Unorm);
        assert!(extra.is_empty());
    }

    #[test]
    fn test_uniform_layout_matches_shader() {
        // 64 (matrix) + 2 * 16 (color + scalar) + 48 (wave scalars) = 144
        assert_eq!(std::mem::size_of::<WaterUniforms>(), 144);
        assert_eq!(std::mem::size_of::<WaterUniforms>() % 16, 0);
    }

    #[test]
    fn test_uniforms_snapshot_parameters() {
        let params = WaveParameters {
            elapsed_time: 4.5,
            small_waves_iterations: 3,
            depth_color: Rgb::BLACK,
            ..WaveParameters::default()
        };
        let uniforms = WaterUniforms::new(&params, Mat4::IDENTITY, DebugView::Normals);

        assert_eq!(uniforms.time, 4.5);
        assert_eq!(uniforms.small_waves_iterations, 3);
        assert_eq!(uniforms.big_waves_frequency, [4.0, 1.5]);
        assert_eq!(uniforms.depth_color, [0.0, 0.0, 0.0]);
        assert_eq!(uniforms.debug_view, 1);
        assert_eq!(uniforms.view_proj, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn test_uniform_colors_are_linear() {
        let params = WaveParameters::default();
        let uniforms = WaterUniforms::new(&params, Mat4::IDENTITY, DebugView::Gradient);

        assert_eq!(uniforms.surface_color, params.surface_color.to_linear().to_array());
        // Linear values are darker than their sRGB encoding for mid tones
        assert!(uniforms.surface_color[0] < params.surface_color.r);
    }
}
