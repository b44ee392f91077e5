//! WGPU-based rendering engine for the stage.
//!
//! Owns the surface, device, and a single unlit pipeline. Per-drawable GPU
//! state lives on the drawables themselves as [`DrawableGpu`], created
//! lazily the first time [`RenderEngine::sync_scene`] sees a drawable and
//! refreshed whenever its material revision moves.

use wgpu::util::DeviceExt;

use crate::error::VitrineError;
use crate::gfx::camera::CameraUniform;
use crate::gfx::resources::{Material, TextureResource};
use crate::gfx::scene::{Drawable, Scene, Vertex3D};
use crate::wgpu_utils::{binding_types, UniformBuffer};

/// Per-object data in the layout the shader expects.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub colour: [f32; 4],
}

impl ObjectUniform {
    fn from_drawable(drawable: &Drawable) -> Self {
        ObjectUniform {
            model: drawable.model_matrix().into(),
            colour: drawable.material().colour.rgba_array(),
        }
    }
}

/// GPU-side state for one drawable: mesh buffers, the object uniform, and
/// the texture binding for its current material.
pub struct DrawableGpu {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    object_ubo: UniformBuffer<ObjectUniform>,
    object_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    seen_revision: u64,
}

/// Core rendering engine managing GPU resources and draw calls.
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    format: wgpu::TextureFormat,
    depth_texture: TextureResource,
    pipeline: wgpu::RenderPipeline,
    camera_ubo: UniformBuffer<CameraUniform>,
    camera_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    white_texture: TextureResource,
}

impl RenderEngine {
    /// Creates a new render engine for the given window.
    ///
    /// Initializes wgpu, configures the surface, and builds the unlit
    /// pipeline. Surface, adapter, and device failures are returned to the
    /// caller rather than panicking.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<RenderEngine, VitrineError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 8192,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        // Group 0: camera, group 1: per-object uniform, group 2: material texture
        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Camera Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: binding_types::uniform(),
                count: None,
            }],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: binding_types::uniform(),
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: binding_types::texture_2d(),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: binding_types::sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let camera_ubo = UniformBuffer::new_with_data(&device, &CameraUniform::new());
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.binding_resource(),
            }],
        });

        let white_texture = TextureResource::white_pixel(&device, &queue);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Stage Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Stage Pipeline Layout"),
            bind_group_layouts: &[&camera_layout, &object_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Stage Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex3D::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
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
                format: TextureResource::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        log::info!(
            "render engine ready ({:?}, {}x{})",
            format,
            config.width,
            config.height
        );

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            format,
            depth_texture,
            pipeline,
            camera_ubo,
            camera_bind_group,
            object_layout,
            texture_layout,
            white_texture,
        })
    }

    /// Creates or refreshes GPU state for every drawable in the scene.
    ///
    /// Mesh buffers are built once. The object uniform is rewritten each
    /// call (the buffer wrapper skips the write when nothing moved). The
    /// texture bind group is rebuilt only when the material revision moved.
    pub fn sync_scene(&mut self, scene: &mut Scene) {
        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update(&scene.camera);
        self.camera_ubo.update_content(&self.queue, camera_uniform);

        for drawable in scene.drawables.iter_mut() {
            let revision = drawable.material_revision();
            let up_to_date = drawable
                .gpu
                .as_ref()
                .is_some_and(|gpu| gpu.seen_revision == revision);

            if !up_to_date {
                log::debug!("uploading material for '{}' (revision {})", drawable.name, revision);
                let texture_bind_group =
                    self.material_bind_group(drawable.material(), &drawable.name);
                match drawable.gpu.take() {
                    Some(mut gpu) => {
                        gpu.texture_bind_group = texture_bind_group;
                        gpu.seen_revision = revision;
                        drawable.gpu = Some(gpu);
                    }
                    None => {
                        drawable.gpu =
                            Some(self.create_drawable_gpu(drawable, texture_bind_group, revision));
                    }
                }
            }

            let uniform = ObjectUniform::from_drawable(drawable);
            if let Some(gpu) = drawable.gpu.as_mut() {
                gpu.object_ubo.update_content(&self.queue, uniform);
            }
        }
    }

    fn create_drawable_gpu(
        &self,
        drawable: &Drawable,
        texture_bind_group: wgpu::BindGroup,
        revision: u64,
    ) -> DrawableGpu {
        let vertices = drawable.geometry.to_vertices();
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Vertex Buffer", drawable.name)),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Index Buffer", drawable.name)),
                contents: bytemuck::cast_slice(&drawable.geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let object_ubo =
            UniformBuffer::new_with_data(&self.device, &ObjectUniform::from_drawable(drawable));
        let object_bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Object Bind Group", drawable.name)),
            layout: &self.object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: object_ubo.binding_resource(),
            }],
        });

        DrawableGpu {
            vertex_buffer,
            index_buffer,
            index_count: drawable.geometry.indices.len() as u32,
            object_ubo,
            object_bind_group,
            texture_bind_group,
            seen_revision: revision,
        }
    }

    /// Builds the texture binding for a material. Textured materials upload
    /// their pixels; solid ones bind the shared white pixel.
    fn material_bind_group(&self, material: &Material, name: &str) -> wgpu::BindGroup {
        let uploaded;
        let (view, sampler) = match material.pixels.as_ref() {
            Some(pixels) => {
                uploaded = TextureResource::from_pixels(&self.device, &self.queue, pixels, name);
                (&uploaded.view, &uploaded.sampler)
            }
            None => (&self.white_texture.view, &self.white_texture.sampler),
        };

        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Texture Bind Group", name)),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    /// Renders the scene and the UI overlay in one submit.
    ///
    /// Returns the surface error untouched; the caller reconfigures on
    /// `Lost`/`Outdated` and exits on `OutOfMemory`.
    pub fn render_frame_with_ui<F>(
        &mut self,
        scene: &Scene,
        ui_callback: F,
    ) -> Result<(), wgpu::SurfaceError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = self.surface.get_current_texture()?;
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Stage Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(scene.background.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
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
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

            for drawable in scene.drawables.iter() {
                if let Some(gpu) = drawable.gpu.as_ref() {
                    render_pass.set_bind_group(1, &gpu.object_bind_group, &[]);
                    render_pass.set_bind_group(2, &gpu.texture_bind_group, &[]);
                    render_pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                    render_pass
                        .set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..gpu.index_count, 0, 0..1);
                }
            }
        }

        ui_callback(&self.device, &self.queue, &mut encoder, &surface_view);

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        Ok(())
    }

    /// Resizes the surface and recreates the depth buffer.
    ///
    /// Zero-sized resizes (minimized window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Reconfigures the surface at its current size after a lost or
    /// outdated frame.
    pub fn reconfigure(&mut self) {
        let (width, height) = self.get_surface_size();
        self.resize(width, height);
    }

    /// Returns current surface dimensions.
    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}
