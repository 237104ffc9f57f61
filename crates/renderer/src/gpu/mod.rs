//! GPU side of the scene cycler.
//!
//! - `layer` is the seam between the driver and the GPU: an opaque-handle
//!   trait plus the fatal error taxonomy.
//! - `context` implements that seam on top of `wgpu` and owns adapter,
//!   device, queue, shader library and window surface wiring.
//! - `pipeline` resolves a scene's entry points and compiles its pipeline.
//! - `uniforms` is the block shared with both shader stages.
//! - `timeline` decides which scene should be on screen.
//! - `state` glues everything together as the `FrameDriver`.

mod context;
mod layer;
mod pipeline;
mod state;
mod timeline;
mod uniforms;

#[cfg(test)]
mod stub;

pub use context::{CommandQueue, GpuDevice, ShaderLibrary, WgpuLayer, WindowSurface};
pub use layer::{GpuError, GpuLayer};
pub use pipeline::ShaderFunction;
pub use state::{FrameDriver, FrameStatus};
pub use timeline::{scene_at, MOIRE_CIRCLES_AT, SCROLLING_COLORS_AT};
pub use uniforms::SceneUniforms;
