use std::path::{Path, PathBuf};
use std::time::Instant;

use wgpu::util::DeviceExt;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::{CursorIcon, WindowBuilder},
};

use app_core::{
    narration_for, picking, Camera, CameraPose, FlyTo, HoverTracker, OrbitController,
    PanoramaConfig, SceneController, SceneError, TransitionStep, CUBE_FACE_COUNT,
    MARKER_BASE_SCALE, MARKER_CLICK_BOUNCE_AMPLITUDE, MARKER_CLICK_BOUNCE_SEC,
    MARKER_HOVER_PULSE_AMPLITUDE, MARKER_HOVER_PULSE_HZ, MARKER_HOVER_SCALE, SKY_FALLBACK_COLOR,
};
use glam::Vec3;

const DRAG_CLICK_THRESHOLD_PX: f32 = 4.0;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SkyUniforms {
    inv_sky_view_proj: [[f32; 4]; 4],
    fallback: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MarkerUniforms {
    view_proj: [[f32; 4]; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct OverlayUniforms {
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MarkerInstance {
    pos: [f32; 3],
    scale: f32,
    color: [f32; 4],
}

const MAX_MARKERS: usize = 32;

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    sky_pipeline: wgpu::RenderPipeline,
    sky_uniform_buffer: wgpu::Buffer,
    sky_bgl: wgpu::BindGroupLayout,
    sky_bind_group: wgpu::BindGroup,
    sky_sampler: wgpu::Sampler,
    cube_texture: wgpu::Texture,
    fallback_sky: bool,

    marker_pipeline: wgpu::RenderPipeline,
    marker_uniform_buffer: wgpu::Buffer,
    marker_bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,

    overlay_pipeline: wgpu::RenderPipeline,
    overlay_uniform_buffer: wgpu::Buffer,
    overlay_bind_group: wgpu::BindGroup,

    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(SceneError::AdapterUnavailable)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        // Sky pass
        let sky_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sky_shader"),
            source: wgpu::ShaderSource::Wgsl(app_core::SKYBOX_WGSL.into()),
        });
        let sky_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sky_uniforms"),
            size: std::mem::size_of::<SkyUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let sky_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sky_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let sky_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sky_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::Cube,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let cube_texture = create_placeholder_cube(&device, &queue);
        let sky_bind_group = create_sky_bind_group(
            &device,
            &sky_bgl,
            &sky_uniform_buffer,
            &cube_texture,
            &sky_sampler,
        );
        let sky_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sky_pl"),
            bind_group_layouts: &[&sky_bgl],
            push_constant_ranges: &[],
        });
        let sky_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sky_pipeline"),
            layout: Some(&sky_pl),
            vertex: wgpu::VertexState {
                module: &sky_shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &sky_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        // Marker pass
        let marker_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("marker_shader"),
            source: wgpu::ShaderSource::Wgsl(app_core::MARKER_WGSL.into()),
        });
        let marker_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("marker_uniforms"),
            size: std::mem::size_of::<MarkerUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<MarkerInstance>() * MAX_MARKERS) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let marker_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("marker_bgl"),
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
        let marker_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("marker_bg"),
            layout: &marker_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: marker_uniform_buffer.as_entire_binding(),
            }],
        });
        let marker_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("marker_pl"),
            bind_group_layouts: &[&marker_bgl],
            push_constant_ranges: &[],
        });
        let marker_vertex_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MarkerInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 12,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 3,
                    },
                ],
            },
        ];
        let marker_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("marker_pipeline"),
            layout: Some(&marker_pl),
            vertex: wgpu::VertexState {
                module: &marker_shader,
                entry_point: Some("vs_main"),
                buffers: &marker_vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &marker_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        // Fade overlay pass
        let overlay_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("overlay_shader"),
            source: wgpu::ShaderSource::Wgsl(app_core::OVERLAY_WGSL.into()),
        });
        let overlay_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("overlay_uniforms"),
            size: std::mem::size_of::<OverlayUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let overlay_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("overlay_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let overlay_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("overlay_bg"),
            layout: &overlay_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: overlay_uniform_buffer.as_entire_binding(),
            }],
        });
        let overlay_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("overlay_pl"),
            bind_group_layouts: &[&overlay_bgl],
            push_constant_ranges: &[],
        });
        let overlay_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("overlay_pipeline"),
            layout: Some(&overlay_pl),
            vertex: wgpu::VertexState {
                module: &overlay_shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &overlay_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            sky_pipeline,
            sky_uniform_buffer,
            sky_bgl,
            sky_bind_group,
            sky_sampler,
            cube_texture,
            fallback_sky: true,
            marker_pipeline,
            marker_uniform_buffer,
            marker_bind_group,
            quad_vb,
            instance_vb,
            overlay_pipeline,
            overlay_uniform_buffer,
            overlay_bind_group,
            width: size.width.max(1),
            height: size.height.max(1),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    fn set_cube_texture(&mut self, name: &str, faces: &[image::RgbaImage]) -> Result<(), SceneError> {
        if faces.len() != CUBE_FACE_COUNT {
            return Err(SceneError::FaceDimensions { name: name.into() });
        }
        let side = faces[0].width();
        if side == 0 || faces.iter().any(|f| f.width() != side || f.height() != side) {
            return Err(SceneError::FaceDimensions { name: name.into() });
        }
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("sky_cube"),
            size: wgpu::Extent3d {
                width: side,
                height: side,
                depth_or_array_layers: CUBE_FACE_COUNT as u32,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        for (layer, face) in faces.iter().enumerate() {
            self.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: layer as u32,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                face.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * side),
                    rows_per_image: Some(side),
                },
                wgpu::Extent3d {
                    width: side,
                    height: side,
                    depth_or_array_layers: 1,
                },
            );
        }
        let old = std::mem::replace(&mut self.cube_texture, texture);
        self.sky_bind_group = create_sky_bind_group(
            &self.device,
            &self.sky_bgl,
            &self.sky_uniform_buffer,
            &self.cube_texture,
            &self.sky_sampler,
        );
        old.destroy();
        self.fallback_sky = false;
        Ok(())
    }

    fn render(
        &mut self,
        camera: &Camera,
        markers: &[MarkerInstance],
        overlay_opacity: Option<f32>,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let fallback_flag = if self.fallback_sky { 1.0 } else { 0.0 };
        self.queue.write_buffer(
            &self.sky_uniform_buffer,
            0,
            bytemuck::bytes_of(&SkyUniforms {
                inv_sky_view_proj: camera.sky_view_proj().inverse().to_cols_array_2d(),
                fallback: [
                    SKY_FALLBACK_COLOR[0],
                    SKY_FALLBACK_COLOR[1],
                    SKY_FALLBACK_COLOR[2],
                    fallback_flag,
                ],
            }),
        );

        let view_mat = camera.view_matrix();
        let right = Vec3::new(view_mat.x_axis.x, view_mat.y_axis.x, view_mat.z_axis.x);
        let up = Vec3::new(view_mat.x_axis.y, view_mat.y_axis.y, view_mat.z_axis.y);
        self.queue.write_buffer(
            &self.marker_uniform_buffer,
            0,
            bytemuck::bytes_of(&MarkerUniforms {
                view_proj: camera.view_proj().to_cols_array_2d(),
                cam_right: [right.x, right.y, right.z, 0.0],
                cam_up: [up.x, up.y, up.z, 0.0],
            }),
        );
        let marker_count = markers.len().min(MAX_MARKERS);
        if marker_count > 0 {
            self.queue.write_buffer(
                &self.instance_vb,
                0,
                bytemuck::cast_slice(&markers[..marker_count]),
            );
        }
        if let Some(opacity) = overlay_opacity {
            self.queue.write_buffer(
                &self.overlay_uniform_buffer,
                0,
                bytemuck::bytes_of(&OverlayUniforms {
                    color: [0.0, 0.0, 0.0, opacity.clamp(0.0, 1.0)],
                }),
            );
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.02,
                            g: 0.02,
                            b: 0.04,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.sky_pipeline);
            rpass.set_bind_group(0, &self.sky_bind_group, &[]);
            rpass.draw(0..3, 0..1);

            if marker_count > 0 {
                rpass.set_pipeline(&self.marker_pipeline);
                rpass.set_bind_group(0, &self.marker_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
                rpass.draw(0..6, 0..marker_count as u32);
            }

            if overlay_opacity.is_some() {
                rpass.set_pipeline(&self.overlay_pipeline);
                rpass.set_bind_group(0, &self.overlay_bind_group, &[]);
                rpass.draw(0..3, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_sky_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniforms: &wgpu::Buffer,
    cube: &wgpu::Texture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    let view = cube.create_view(&wgpu::TextureViewDescriptor {
        label: Some("sky_cube_view"),
        dimension: Some(wgpu::TextureViewDimension::Cube),
        array_layer_count: Some(CUBE_FACE_COUNT as u32),
        ..Default::default()
    });
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("sky_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

fn create_placeholder_cube(device: &wgpu::Device, queue: &wgpu::Queue) -> wgpu::Texture {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("sky_cube_placeholder"),
        size: wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: CUBE_FACE_COUNT as u32,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    let texel = [
        (SKY_FALLBACK_COLOR[0] * 255.0) as u8,
        (SKY_FALLBACK_COLOR[1] * 255.0) as u8,
        (SKY_FALLBACK_COLOR[2] * 255.0) as u8,
        255,
    ];
    for layer in 0..CUBE_FACE_COUNT as u32 {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x: 0, y: 0, z: layer },
                aspect: wgpu::TextureAspect::All,
            },
            &texel,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4),
                rows_per_image: Some(1),
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
    }
    texture
}

// ---------------- disk loading ----------------

fn load_cube_faces(config: &PanoramaConfig) -> Result<Vec<image::RgbaImage>, SceneError> {
    let mut faces = Vec::with_capacity(config.images.len());
    for path in &config.images {
        let decoded = image::open(path).map_err(|e| SceneError::TextureLoad {
            name: config.name.clone(),
            reason: format!("{path}: {e}"),
        })?;
        faces.push(decoded.to_rgba8());
    }
    Ok(faces)
}

/// Panoramas are subdirectories of `base` containing the conventional face
/// files. Falls back to the built-in configs when nothing is found, which
/// keeps the fallback-sky path reachable from a bare checkout.
fn discover_panoramas(base: &Path) -> Vec<PanoramaConfig> {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(base)
        .into_iter()
        .flatten()
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_dir() && p.join("posx.jpg").is_file())
        .collect();
    dirs.sort();
    if dirs.is_empty() {
        log::warn!(
            "no panorama directories under {}, using built-in configs",
            base.display()
        );
        return app_core::builtin_panoramas();
    }
    dirs.into_iter()
        .map(|dir| {
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "panorama".into());
            PanoramaConfig::from_dir(name, &dir.to_string_lossy())
        })
        .collect()
}

// ---------------- interaction state ----------------

#[derive(Default)]
struct PointerState {
    x: f32,
    y: f32,
    down: bool,
    drag_dist: f32,
}

struct TourState {
    controller: SceneController,
    camera: Camera,
    orbit: OrbitController,
    fly_to: Option<FlyTo>,
    overview_pose: Option<CameraPose>,
    focused: Option<usize>,
    hover: HoverTracker,
    hover_elapsed: f32,
    click_bounce: Option<(usize, f32)>,
}

impl TourState {
    fn new(configs: Vec<PanoramaConfig>) -> Self {
        Self {
            controller: SceneController::new(configs),
            camera: Camera::new(1.0),
            orbit: OrbitController::new(),
            fly_to: None,
            overview_pose: None,
            focused: None,
            hover: HoverTracker::new(),
            hover_elapsed: 0.0,
            click_bounce: None,
        }
    }

    fn camera_locked(&self) -> bool {
        self.fly_to.is_some() || self.focused.is_some()
    }

    fn begin_focus(&mut self, index: usize) -> bool {
        let pose = match self
            .controller
            .annotations()
            .get(index)
            .and_then(|a| a.camera_pose)
        {
            Some(p) => p,
            None => return false,
        };
        if self.overview_pose.is_none() {
            self.overview_pose = Some(self.camera.pose());
        }
        self.fly_to = Some(FlyTo::new(self.camera.pose(), pose));
        self.focused = Some(index);
        true
    }

    fn return_to_overview(&mut self) {
        if let Some(overview) = self.overview_pose.take() {
            self.fly_to = Some(FlyTo::new(self.camera.pose(), overview));
        }
        self.focused = None;
    }

    fn step_animations(&mut self, dt_sec: f32) {
        if let Some(fly) = &mut self.fly_to {
            let pose = fly.advance(dt_sec);
            self.camera.apply_pose(&pose);
            if fly.finished() {
                self.fly_to = None;
            }
        } else if !self.camera_locked() {
            self.orbit.update(dt_sec);
            self.orbit.apply_to(&mut self.camera);
        }
        if self.hover.hovered().is_some() {
            self.hover_elapsed += dt_sec;
        } else {
            self.hover_elapsed = 0.0;
        }
        if let Some((_, elapsed)) = &mut self.click_bounce {
            *elapsed += dt_sec;
            if *elapsed >= MARKER_CLICK_BOUNCE_SEC {
                self.click_bounce = None;
            }
        }
    }

    fn marker_instances(&self) -> Vec<MarkerInstance> {
        let hovered = self.hover.hovered();
        self.controller
            .annotations()
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let mut scale = MARKER_BASE_SCALE;
                if hovered == Some(i) {
                    scale = MARKER_HOVER_SCALE
                        + (self.hover_elapsed * std::f32::consts::TAU * MARKER_HOVER_PULSE_HZ)
                            .sin()
                            * MARKER_HOVER_PULSE_AMPLITUDE;
                }
                if let Some((bi, elapsed)) = self.click_bounce {
                    if bi == i {
                        let progress = (elapsed / MARKER_CLICK_BOUNCE_SEC).min(1.0);
                        scale += (progress * std::f32::consts::PI).sin()
                            * MARKER_CLICK_BOUNCE_AMPLITUDE;
                    }
                }
                let p = a.marker_position();
                MarkerInstance {
                    pos: p.to_array(),
                    scale,
                    color: [a.color[0], a.color[1], a.color[2], 1.0],
                }
            })
            .collect()
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let base = std::env::args().nth(1).unwrap_or_else(|| "assets".into());
    let configs = discover_panoramas(Path::new(&base));

    let event_loop = EventLoop::new().expect("event loop");
    let window = WindowBuilder::new()
        .with_title("Campus Tour (native)")
        .build(&event_loop)
        .expect("window");

    let mut gpu = match pollster::block_on(GpuState::new(&window)) {
        Ok(g) => g,
        Err(e) => {
            log::error!("GPU init failed: {e}");
            return;
        }
    };

    let mut state = TourState::new(configs);
    let mut pointer = PointerState::default();
    let mut pending_load: Option<usize> = None;
    let mut last_frame = Instant::now();

    // Initial panorama; on failure the flat fallback sky stays up.
    match load_cube_faces(state.controller.current_config()) {
        Ok(faces) => {
            let name = state.controller.current_config().name.clone();
            if let Err(e) = gpu.set_cube_texture(&name, &faces) {
                log::error!("[texture] {e}");
            }
        }
        Err(e) => log::warn!("[texture] initial load failed, using fallback sky: {e}"),
    }

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => gpu.resize(size),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => elwt.exit(),
            Event::WindowEvent {
                event: WindowEvent::CursorMoved { position, .. },
                ..
            } => {
                let (dx, dy) = (
                    position.x as f32 - pointer.x,
                    position.y as f32 - pointer.y,
                );
                pointer.x = position.x as f32;
                pointer.y = position.y as f32;
                if pointer.down {
                    pointer.drag_dist += (dx * dx + dy * dy).sqrt();
                    if !state.camera_locked() {
                        state.orbit.rotate(dx, dy);
                    }
                    return;
                }
                let (ro, rd) = picking::screen_to_world_ray(
                    &state.camera,
                    pointer.x,
                    pointer.y,
                    gpu.width as f32,
                    gpu.height as f32,
                );
                let hit =
                    picking::pick_annotation(state.controller.annotations(), ro, rd).map(|(i, _)| i);
                let change = state.hover.update(hit);
                if !change.is_noop() {
                    state.hover_elapsed = 0.0;
                    match change.hovered {
                        Some(i) => {
                            let title = &state.controller.annotations()[i].title;
                            gpu.window.set_cursor_icon(CursorIcon::Pointer);
                            gpu.window
                                .set_title(&format!("Campus Tour (native) - {title}"));
                        }
                        None => {
                            gpu.window.set_cursor_icon(CursorIcon::Default);
                            gpu.window.set_title("Campus Tour (native)");
                        }
                    }
                }
            }
            Event::WindowEvent {
                event:
                    WindowEvent::MouseInput {
                        state: button_state,
                        button: MouseButton::Left,
                        ..
                    },
                ..
            } => match button_state {
                ElementState::Pressed => {
                    pointer.down = true;
                    pointer.drag_dist = 0.0;
                }
                ElementState::Released => {
                    pointer.down = false;
                    if pointer.drag_dist < DRAG_CLICK_THRESHOLD_PX {
                        if let Some(i) = state.hover.hovered() {
                            state.click_bounce = Some((i, 0.0));
                            let a = &state.controller.annotations()[i];
                            log::info!("[click] {}: {}", a.title, a.description);
                            state.begin_focus(i);
                        }
                    }
                }
            },
            Event::WindowEvent {
                event: WindowEvent::MouseWheel { delta, .. },
                ..
            } => {
                if !state.camera_locked() {
                    let amount = match delta {
                        MouseScrollDelta::LineDelta(_, y) => -y,
                        MouseScrollDelta::PixelDelta(p) => -(p.y as f32) * 0.05,
                    };
                    state.orbit.zoom(amount);
                }
            }
            Event::WindowEvent {
                event:
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                logical_key,
                                state: ElementState::Pressed,
                                ..
                            },
                        ..
                    },
                ..
            } => match logical_key {
                Key::Named(NamedKey::ArrowRight) => {
                    state.controller.transition_step(true);
                }
                Key::Named(NamedKey::ArrowLeft) => {
                    state.controller.transition_step(false);
                }
                Key::Named(NamedKey::Escape) => {
                    if state.focused.is_some() {
                        state.return_to_overview();
                    } else {
                        elwt.exit();
                    }
                }
                Key::Character(c) if c == "n" || c == "N" => {
                    let name = &state.controller.current_config().name;
                    match narration_for(name) {
                        Some(script) => log::info!("[narration] {script}"),
                        None => log::info!("[narration] none for '{name}'"),
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                let now = Instant::now();
                let dt = now - last_frame;
                last_frame = now;

                state.step_animations(dt.as_secs_f32());
                match state.controller.tick(dt) {
                    TransitionStep::BeginLoading { target } => pending_load = Some(target),
                    TransitionStep::Completed { .. } => {}
                    TransitionStep::None => {}
                }

                // Disk loads are fast enough to run inline between frames.
                if let Some(target) = pending_load.take() {
                    let config = state.controller.configs()[target].clone();
                    match load_cube_faces(&config).and_then(|faces| {
                        gpu.set_cube_texture(&config.name, &faces)
                    }) {
                        Ok(()) => {
                            log::info!("[texture] loaded '{}'", config.name);
                            state.controller.texture_ready();
                        }
                        Err(e) => {
                            log::error!("[texture] {e}");
                            state.controller.texture_failed();
                        }
                    }
                }

                state.camera.aspect = gpu.aspect();
                let markers = state.marker_instances();
                let overlay = state.controller.overlay_opacity();
                match gpu.render(&state.camera, &markers, overlay) {
                    Ok(_) => gpu.window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(_) => {}
                }
            }
            _ => {}
        })
        .unwrap();
}
