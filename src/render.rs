use crate::core::fluid::{sim_extent, FluidError, FluidUniforms, PingPong};
use crate::core::{FLUID_RENDER_WGSL, FLUID_SIM_WGSL};
use web_sys as web;

mod helpers;
mod targets;
use targets::{FieldTargets, FIELD_FORMAT};

// ===================== WebGPU fluid background =====================

pub struct FluidGpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    field: FieldTargets,
    ping: PingPong,
    sim_divisor: u32,

    sim_pipeline: wgpu::RenderPipeline,
    render_pipeline: wgpu::RenderPipeline,
    sim_bgl: wgpu::BindGroupLayout,
    render_bgl: wgpu::BindGroupLayout,
    // Indexed by the field buffer each group reads from.
    sim_groups: [wgpu::BindGroup; 2],
    render_groups: [wgpu::BindGroup; 2],

    background_view: wgpu::TextureView,
    linear_sampler: wgpu::Sampler,
    uniform_buffer: wgpu::Buffer,
    uniforms: FluidUniforms,
}

fn upload_background(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    image: &web::HtmlImageElement,
) -> Result<wgpu::TextureView, FluidError> {
    let width = image.natural_width();
    let height = image.natural_height();
    if width == 0 || height == 0 {
        return Err(FluidError::Background("image has no pixels".into()));
    }
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("fluid_background"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_DST
            | wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    queue.copy_external_image_to_texture(
        &wgpu::CopyExternalImageSourceInfo {
            source: wgpu::ExternalImageSource::HTMLImageElement(image.clone()),
            origin: wgpu::Origin2d::ZERO,
            flip_y: false,
        },
        wgpu::CopyExternalImageDestInfo {
            texture: &tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
            color_space: wgpu::PredefinedColorSpace::Srgb,
            premultiplied_alpha: false,
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    Ok(tex.create_view(&wgpu::TextureViewDescriptor::default()))
}

impl FluidGpu {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        background: &web::HtmlImageElement,
        sim_divisor: u32,
    ) -> Result<Self, FluidError> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| FluidError::Surface(format!("{:?}", e)))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(FluidError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| FluidError::Device(format!("{:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| FluidError::Surface("no surface formats".into()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let background_view = upload_background(&device, &queue, background)?;

        let (sim_w, sim_h) = sim_extent(width, height, sim_divisor);
        let field = FieldTargets::new(&device, sim_w, sim_h);

        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let uniforms = FluidUniforms::new(sim_w, sim_h);
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fluid_uniforms"),
            size: std::mem::size_of::<FluidUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let sim_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("fluid_sim_bgl"),
            entries: &[helpers::texture_entry(0), helpers::uniform_entry(1)],
        });
        let render_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("fluid_render_bgl"),
            entries: &[
                helpers::texture_entry(0),
                helpers::texture_entry(1),
                helpers::sampler_entry(2),
                helpers::uniform_entry(3),
            ],
        });

        let sim_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fluid_sim_shader"),
            source: wgpu::ShaderSource::Wgsl(FLUID_SIM_WGSL.into()),
        });
        let render_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fluid_render_shader"),
            source: wgpu::ShaderSource::Wgsl(FLUID_RENDER_WGSL.into()),
        });
        let sim_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("fluid_sim_pl"),
            bind_group_layouts: &[&sim_bgl],
            push_constant_ranges: &[],
        });
        let render_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("fluid_render_pl"),
            bind_group_layouts: &[&render_bgl],
            push_constant_ranges: &[],
        });
        let sim_pipeline = helpers::make_fullscreen_pipeline(
            &device,
            "fluid_sim_pipeline",
            &sim_pl,
            &sim_shader,
            "fs_simulate",
            FIELD_FORMAT,
        );
        let render_pipeline = helpers::make_fullscreen_pipeline(
            &device,
            "fluid_render_pipeline",
            &render_pl,
            &render_shader,
            "fs_render",
            format,
        );

        let (sim_groups, render_groups) = build_groups(
            &device,
            &sim_bgl,
            &render_bgl,
            &field,
            &background_view,
            &linear_sampler,
            &uniform_buffer,
        );

        log::info!(
            "[fluid] ready canvas={}x{} field={}x{}",
            width,
            height,
            sim_w,
            sim_h
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            field,
            ping: PingPong::default(),
            sim_divisor,
            sim_pipeline,
            render_pipeline,
            sim_bgl,
            render_bgl,
            sim_groups,
            render_groups,
            background_view,
            linear_sampler,
            uniform_buffer,
            uniforms,
        })
    }

    pub fn set_pointer(&mut self, x: f32, y: f32, css_width: f32, css_height: f32) {
        self.uniforms.set_pointer(x, y, css_width, css_height);
    }

    pub fn clear_pointer(&mut self) {
        self.uniforms.clear_pointer();
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        let (sim_w, sim_h) = sim_extent(width, height, self.sim_divisor);
        if !self.field.recreate(&self.device, sim_w, sim_h) {
            return;
        }
        log::debug!("[fluid] field resized to {}x{}", sim_w, sim_h);
        self.uniforms.resolution = [sim_w as f32, sim_h as f32];
        self.ping = PingPong::default();
        (self.sim_groups, self.render_groups) = build_groups(
            &self.device,
            &self.sim_bgl,
            &self.render_bgl,
            &self.field,
            &self.background_view,
            &self.linear_sampler,
            &self.uniform_buffer,
        );
    }

    /// One simulate pass into the write buffer, one render pass sampling it,
    /// then the buffers swap roles.
    pub fn render(&mut self, dt_sec: f32) -> Result<(), FluidError> {
        self.uniforms.time += dt_sec.max(0.0);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));

        let frame = self
            .surface
            .get_current_texture()
            .map_err(|e| FluidError::Surface(format!("{:?}", e)))?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("fluid_encoder"),
            });

        let read = self.ping.read();
        let write = self.ping.write();
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("fluid_simulate"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.field.views[write],
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.sim_pipeline);
            rpass.set_bind_group(0, &self.sim_groups[read], &[]);
            rpass.draw(0..3, 0..1);
        }
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("fluid_render"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.render_pipeline);
            rpass.set_bind_group(0, &self.render_groups[write], &[]);
            rpass.draw(0..3, 0..1);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        self.ping.swap();
        Ok(())
    }
}

fn build_groups(
    device: &wgpu::Device,
    sim_bgl: &wgpu::BindGroupLayout,
    render_bgl: &wgpu::BindGroupLayout,
    field: &FieldTargets,
    background_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    uniform_buffer: &wgpu::Buffer,
) -> ([wgpu::BindGroup; 2], [wgpu::BindGroup; 2]) {
    let sim = |i: usize| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("fluid_sim_bg"),
            layout: sim_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&field.views[i]),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        })
    };
    let render = |i: usize| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("fluid_render_bg"),
            layout: render_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&field.views[i]),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(background_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        })
    };
    ([sim(0), sim(1)], [render(0), render(1)])
}
