use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tracing::{error, info};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::gpu::{FrameDriver, WgpuLayer};
use crate::runtime::SystemTimeSource;
use crate::types::RendererConfig;

/// Opens the demo window and drives frames until it is closed.
///
/// GPU bootstrap happens after the window exists but before the event loop
/// starts; any failure there is returned without a single frame being drawn.
pub(crate) fn run_window(config: &RendererConfig) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;
    let window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(PhysicalSize::new(config.surface_size.0, config.surface_size.1))
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create window: {err}"))?;
    let window = Arc::new(window);

    let layer = WgpuLayer::new(config.gpu_power);
    let mut driver = FrameDriver::setup(layer, Box::new(SystemTimeSource::new()))
        .context("failed to initialise GPU")?;
    let mut surface = driver
        .gpu()
        .create_surface(driver.device(), window.clone())
        .context("failed to initialise window surface")?;
    info!(
        adapter = %driver.device().profile().name,
        width = surface.size().width,
        height = surface.size().height,
        "window ready"
    );

    let mut fatal = None;
    event_loop
        .run(|event, elwt| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => elwt.exit(),
                WindowEvent::Resized(new_size) => surface.resize(driver.device(), new_size),
                WindowEvent::RedrawRequested => {
                    if let Err(err) = driver.on_frame(&mut surface) {
                        error!(error = %err, "frame failed; shutting down");
                        fatal = Some(err);
                        elwt.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                elwt.set_control_flow(ControlFlow::Wait);
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|err| anyhow!("window event loop error: {err}"))?;

    match fatal {
        Some(err) => Err(err).context("render loop stopped"),
        None => Ok(()),
    }
}
