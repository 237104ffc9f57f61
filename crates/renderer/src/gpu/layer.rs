use crate::gpu::uniforms::SceneUniforms;
use crate::types::Scene;

/// Fatal conditions raised while setting up or rebuilding GPU state.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("no compatible GPU adapter or device is available: {0}")]
    NoDevice(String),
    #[error("failed to create command queue: {0}")]
    NoQueue(String),
    #[error("failed to load shader library: {0}")]
    ShaderLibrary(String),
    #[error("shader library has no entry point '{entry}' required by the {scene} scene")]
    MissingEntryPoint { scene: Scene, entry: &'static str },
    #[error("failed to compile pipeline for the {scene} scene: {message}")]
    PipelineCompile { scene: Scene, message: String },
    #[error("failed to create window surface: {0}")]
    Surface(String),
    #[error("window surface cannot present {format:?}")]
    UnsupportedSurface { format: wgpu::TextureFormat },
    #[error("out of memory while acquiring the next surface texture")]
    SurfaceOutOfMemory,
}

/// Narrow view of the GPU that the frame driver depends on.
///
/// Handles are opaque to the driver: it stores them, passes them back in and
/// drops them when replaced. The production implementation is
/// [`WgpuLayer`](crate::gpu::WgpuLayer); tests use a recording stub.
pub trait GpuLayer {
    type Device;
    type Queue;
    type Library;
    type Function;
    type Pipeline;
    type Surface;
    type Drawable;

    /// Acquires the default GPU device.
    fn default_device(&self) -> Result<Self::Device, GpuError>;

    /// Creates the command queue used for every submission.
    fn create_queue(&self, device: &Self::Device) -> Result<Self::Queue, GpuError>;

    /// Loads the shader library holding every scene's entry points.
    fn load_library(&self, device: &Self::Device) -> Result<Self::Library, GpuError>;

    /// Looks up a named entry point, `None` if the library does not export it.
    fn function(&self, library: &Self::Library, name: &str) -> Option<Self::Function>;

    /// Compiles a render pipeline writing to `format`.
    fn compile_pipeline(
        &self,
        device: &Self::Device,
        scene: Scene,
        vertex: &Self::Function,
        fragment: &Self::Function,
        format: wgpu::TextureFormat,
    ) -> Result<Self::Pipeline, GpuError>;

    /// Next drawable from the surface, `Ok(None)` when the surface is not
    /// ready. Only unrecoverable surface failures are errors.
    fn next_drawable(
        &self,
        device: &Self::Device,
        surface: &mut Self::Surface,
    ) -> Result<Option<Self::Drawable>, GpuError>;

    /// Encodes one full-screen draw into `drawable`, submits it and presents.
    fn submit_frame(
        &self,
        queue: &Self::Queue,
        pipeline: &Self::Pipeline,
        drawable: Self::Drawable,
        uniforms: &SceneUniforms,
    );
}
