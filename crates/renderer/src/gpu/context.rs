use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::compile::{compile_library, parse_library, EntryPoint, SCENE_LIBRARY_WGSL};
use crate::types::{AdapterProfile, GpuPowerPreference, Scene, OUTPUT_FORMAT};

use super::layer::{GpuError, GpuLayer};
use super::pipeline::{create_render_pipeline, uniform_layout, ShaderFunction};
use super::uniforms::SceneUniforms;

/// [`GpuLayer`] backed by `wgpu`.
pub struct WgpuLayer {
    instance: wgpu::Instance,
    power_preference: GpuPowerPreference,
}

/// Adapter, logical device and the layout every scene pipeline shares.
pub struct GpuDevice {
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    uniform_layout: wgpu::BindGroupLayout,
    profile: AdapterProfile,
}

impl GpuDevice {
    pub fn profile(&self) -> &AdapterProfile {
        &self.profile
    }
}

/// Submission side of the device plus the per-frame uniform buffer.
pub struct CommandQueue {
    device: wgpu::Device,
    queue: wgpu::Queue,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
}

/// Compiled shader module and the entry points it exports.
pub struct ShaderLibrary {
    module: wgpu::ShaderModule,
    entry_points: Vec<EntryPoint>,
}

/// Window-backed presentation surface, always configured for [`OUTPUT_FORMAT`].
pub struct WindowSurface {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl WindowSurface {
    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    pub fn resize(&mut self, device: &GpuDevice, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&device.device, &self.config);
    }

    fn reconfigure(&self, device: &GpuDevice) {
        self.surface.configure(&device.device, &self.config);
    }
}

impl WgpuLayer {
    pub fn new(power_preference: GpuPowerPreference) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            flags: wgpu::InstanceFlags::default(),
            memory_budget_thresholds: wgpu::MemoryBudgetThresholds::default(),
            backend_options: wgpu::BackendOptions::default(),
        });
        Self {
            instance,
            power_preference,
        }
    }

    /// Creates and configures the presentation surface for `window`.
    ///
    /// Fails if the adapter cannot present [`OUTPUT_FORMAT`] to it.
    pub fn create_surface(
        &self,
        device: &GpuDevice,
        window: Arc<Window>,
    ) -> Result<WindowSurface, GpuError> {
        let size = window.inner_size();
        let surface = self
            .instance
            .create_surface(window)
            .map_err(|err| GpuError::Surface(err.to_string()))?;

        let caps = surface.get_capabilities(&device.adapter);
        if !caps.formats.contains(&OUTPUT_FORMAT) {
            tracing::debug!(formats = ?caps.formats, "surface formats offered by adapter");
            return Err(GpuError::UnsupportedSurface {
                format: OUTPUT_FORMAT,
            });
        }
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|mode| *mode == wgpu::CompositeAlphaMode::Opaque)
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: OUTPUT_FORMAT,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device.device, &config);
        tracing::debug!(
            width = config.width,
            height = config.height,
            format = ?config.format,
            "configured window surface"
        );

        Ok(WindowSurface { surface, config })
    }
}

impl GpuLayer for WgpuLayer {
    type Device = GpuDevice;
    type Queue = CommandQueue;
    type Library = ShaderLibrary;
    type Function = ShaderFunction;
    type Pipeline = wgpu::RenderPipeline;
    type Surface = WindowSurface;
    type Drawable = wgpu::SurfaceTexture;

    fn default_device(&self) -> Result<GpuDevice, GpuError> {
        let adapter = pollster::block_on(self.instance.request_adapter(
            &wgpu::RequestAdapterOptions {
                power_preference: self.power_preference.to_wgpu(),
                compatible_surface: None,
                force_fallback_adapter: false,
            },
        ))
        .map_err(|err| GpuError::NoDevice(err.to_string()))?;

        let profile = AdapterProfile::from_wgpu(&adapter.get_info());
        tracing::debug!(
            name = %profile.name,
            backend = ?profile.backend,
            device_type = ?profile.device_type,
            is_software = profile.is_software(),
            "selected GPU adapter"
        );
        if profile.is_software() {
            tracing::warn!(adapter = %profile.name, "running on a software rasterizer");
        }

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("shadercycle device"),
            required_features: wgpu::Features::empty(),
            required_limits: adapter.limits(),
            memory_hints: wgpu::MemoryHints::MemoryUsage,
            trace: wgpu::Trace::default(),
        }))
        .map_err(|err| GpuError::NoDevice(err.to_string()))?;

        let uniform_layout = uniform_layout(&device);

        Ok(GpuDevice {
            adapter,
            device,
            queue,
            uniform_layout,
            profile,
        })
    }

    fn create_queue(&self, device: &GpuDevice) -> Result<CommandQueue, GpuError> {
        let gpu = &device.device;
        gpu.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let uniform_buffer = gpu.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniform buffer"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_bind_group = gpu.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform bind group"),
            layout: &device.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        if let Some(err) = pollster::block_on(gpu.pop_error_scope()) {
            return Err(GpuError::NoQueue(err.to_string()));
        }

        Ok(CommandQueue {
            device: gpu.clone(),
            queue: device.queue.clone(),
            uniform_buffer,
            uniform_bind_group,
        })
    }

    fn load_library(&self, device: &GpuDevice) -> Result<ShaderLibrary, GpuError> {
        let entry_points = parse_library(SCENE_LIBRARY_WGSL)?;
        device.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = compile_library(&device.device, SCENE_LIBRARY_WGSL);
        if let Some(err) = pollster::block_on(device.device.pop_error_scope()) {
            return Err(GpuError::ShaderLibrary(err.to_string()));
        }
        tracing::debug!(entry_points = entry_points.len(), "loaded shader library");
        Ok(ShaderLibrary {
            module,
            entry_points,
        })
    }

    fn function(&self, library: &ShaderLibrary, name: &str) -> Option<ShaderFunction> {
        library
            .entry_points
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| ShaderFunction {
                module: library.module.clone(),
                name: entry.name.clone(),
            })
    }

    fn compile_pipeline(
        &self,
        device: &GpuDevice,
        scene: Scene,
        vertex: &ShaderFunction,
        fragment: &ShaderFunction,
        format: wgpu::TextureFormat,
    ) -> Result<wgpu::RenderPipeline, GpuError> {
        device.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = create_render_pipeline(
            &device.device,
            &device.uniform_layout,
            vertex,
            fragment,
            format,
        );
        match pollster::block_on(device.device.pop_error_scope()) {
            Some(err) => Err(GpuError::PipelineCompile {
                scene,
                message: err.to_string(),
            }),
            None => Ok(pipeline),
        }
    }

    fn next_drawable(
        &self,
        device: &GpuDevice,
        surface: &mut WindowSurface,
    ) -> Result<Option<wgpu::SurfaceTexture>, GpuError> {
        match surface.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                surface.reconfigure(device);
                Ok(None)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(GpuError::SurfaceOutOfMemory),
            Err(_) => Ok(None),
        }
    }

    fn submit_frame(
        &self,
        queue: &CommandQueue,
        pipeline: &wgpu::RenderPipeline,
        drawable: wgpu::SurfaceTexture,
        uniforms: &SceneUniforms,
    ) {
        queue
            .queue
            .write_buffer(&queue.uniform_buffer, 0, uniforms.as_bytes());

        let view = drawable
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = queue
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(0, &queue.uniform_bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }

        queue.queue.submit(std::iter::once(encoder.finish()));
        drawable.present();
    }
}
