use crate::types::{Scene, OUTPUT_FORMAT};

use super::layer::{GpuError, GpuLayer};

/// Compiled pipeline together with the scene it renders.
///
/// Keeping both in one value means the driver can never draw a scene with
/// another scene's pipeline.
pub(crate) struct ScenePipeline<P> {
    scene: Scene,
    pipeline: P,
}

impl<P> ScenePipeline<P> {
    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }
}

/// Entry point resolved from a compiled shader module.
#[derive(Debug, Clone)]
pub struct ShaderFunction {
    pub(crate) module: wgpu::ShaderModule,
    pub(crate) name: String,
}

/// Resolves `scene`'s entry points in `library` and compiles its pipeline.
pub(crate) fn build_pipeline<G: GpuLayer>(
    gpu: &G,
    device: &G::Device,
    library: &G::Library,
    scene: Scene,
) -> Result<ScenePipeline<G::Pipeline>, GpuError> {
    let entries = scene.entry_points();
    let vertex = gpu
        .function(library, entries.vertex)
        .ok_or(GpuError::MissingEntryPoint {
            scene,
            entry: entries.vertex,
        })?;
    let fragment = gpu
        .function(library, entries.fragment)
        .ok_or(GpuError::MissingEntryPoint {
            scene,
            entry: entries.fragment,
        })?;
    let pipeline = gpu.compile_pipeline(device, scene, &vertex, &fragment, OUTPUT_FORMAT)?;
    tracing::debug!(
        %scene,
        vertex = entries.vertex,
        fragment = entries.fragment,
        "compiled scene pipeline"
    );
    Ok(ScenePipeline { scene, pipeline })
}

/// Bind group layout for the uniform block shared by both stages.
pub(crate) fn uniform_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("uniform layout"),
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
    })
}

/// Describes a full-screen triangle pipeline over one vertex/fragment pair.
pub(crate) fn create_render_pipeline(
    device: &wgpu::Device,
    uniform_layout: &wgpu::BindGroupLayout,
    vertex: &ShaderFunction,
    fragment: &ShaderFunction,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene pipeline layout"),
        bind_group_layouts: &[uniform_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(fragment.name.as_str()),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &vertex.module,
            entry_point: Some(vertex.name.as_str()),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
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
        fragment: Some(wgpu::FragmentState {
            module: &fragment.module,
            entry_point: Some(fragment.name.as_str()),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview: None,
        cache: None,
    })
}
