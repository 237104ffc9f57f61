//! Renderer crate for shadercycle.
//!
//! Draws three full-screen shader effects one after another, switching on a
//! fixed timer. The overall flow is:
//!
//! ```text
//!   shadercycle CLI
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ FrameDriver::setup ──▶ winit event loop ──▶ on_frame()
//!                                                                   │
//!            scene timeline ─▶ pipeline rebuild ─▶ uniforms ─▶ draw ┘
//! ```
//!
//! `FrameDriver` owns every GPU object and the scene state. It talks to the
//! GPU through the [`GpuLayer`] trait, implemented for real hardware by
//! [`WgpuLayer`].

mod compile;
mod gpu;
mod runtime;
mod types;
mod window;

use anyhow::Result;

pub use gpu::{
    scene_at, CommandQueue, FrameDriver, FrameStatus, GpuDevice, GpuError, GpuLayer,
    SceneUniforms, ShaderFunction, ShaderLibrary, WgpuLayer, WindowSurface, MOIRE_CIRCLES_AT,
    SCROLLING_COLORS_AT,
};
pub use runtime::{BoxedTimeSource, SystemTimeSource, TimeSample, TimeSource};
pub use types::{
    AdapterProfile, GpuPowerPreference, RendererConfig, Scene, ShaderEntryPoints, OUTPUT_FORMAT,
    VERTEX_ENTRY,
};

/// Entry point used by the binary.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Opens the window and renders until it is closed or a fatal error occurs.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!(
            width = self.config.surface_size.0,
            height = self.config.surface_size.1,
            gpu_power = ?self.config.gpu_power,
            "starting scene cycle"
        );
        window::run_window(&self.config)
    }
}
