use tracing::{debug, info};

use crate::runtime::{BoxedTimeSource, TimeSample};
use crate::types::Scene;

use super::layer::{GpuError, GpuLayer};
use super::pipeline::{build_pipeline, ScenePipeline};
use super::timeline::SceneTimeline;
use super::uniforms::SceneUniforms;

/// Seconds of elapsed time between two frame statistics reports.
const STATS_INTERVAL: f32 = 1.0;

/// Outcome of a single [`FrameDriver::on_frame`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Work was submitted and the drawable queued for presentation.
    Presented,
    /// No drawable was available; nothing was submitted.
    Skipped,
}

#[derive(Debug, Default)]
struct FrameStats {
    presented: u64,
    skipped: u64,
    last_report: f32,
}

impl FrameStats {
    fn record(&mut self, status: FrameStatus, sample: TimeSample) {
        match status {
            FrameStatus::Presented => self.presented += 1,
            FrameStatus::Skipped => self.skipped += 1,
        }
        if sample.seconds - self.last_report >= STATS_INTERVAL {
            debug!(
                frame = sample.frame_index,
                presented = self.presented,
                skipped = self.skipped,
                elapsed = sample.seconds,
                "frame stats"
            );
            self.last_report = sample.seconds;
        }
    }
}

/// Owns the GPU objects and scene state for the render loop.
///
/// Built once by [`FrameDriver::setup`], then driven by the event loop through
/// [`FrameDriver::on_frame`].
pub struct FrameDriver<G: GpuLayer> {
    gpu: G,
    device: G::Device,
    queue: G::Queue,
    library: G::Library,
    current: ScenePipeline<G::Pipeline>,
    timeline: SceneTimeline,
    clock: BoxedTimeSource,
    stats: FrameStats,
}

impl<G: GpuLayer> FrameDriver<G> {
    /// Acquires device, queue and shader library, compiles the opening scene
    /// and starts the clock, in that order. The first failure is returned and
    /// nothing else is attempted.
    pub fn setup(gpu: G, mut clock: BoxedTimeSource) -> Result<Self, GpuError> {
        let device = gpu.default_device()?;
        let queue = gpu.create_queue(&device)?;
        let library = gpu.load_library(&device)?;
        let timeline = SceneTimeline::new();
        let current = build_pipeline(&gpu, &device, &library, timeline.scene())?;
        clock.start();
        info!(scene = %timeline.scene(), "renderer ready");

        Ok(Self {
            gpu,
            device,
            queue,
            library,
            current,
            timeline,
            clock,
            stats: FrameStats::default(),
        })
    }

    pub fn gpu(&self) -> &G {
        &self.gpu
    }

    pub fn device(&self) -> &G::Device {
        &self.device
    }

    /// Scene whose pipeline is currently installed.
    pub fn scene(&self) -> Scene {
        self.current.scene()
    }

    /// Renders one frame into `surface`.
    ///
    /// Errors are fatal: a scene change whose pipeline fails to build, or a
    /// surface that cannot hand out textures any more. A busy surface is not
    /// an error and yields [`FrameStatus::Skipped`].
    pub fn on_frame(&mut self, surface: &mut G::Surface) -> Result<FrameStatus, GpuError> {
        let sample = self.clock.sample();
        let elapsed = sample.seconds;

        if let Some(next) = self.timeline.transition_at(elapsed) {
            let rebuilt = build_pipeline(&self.gpu, &self.device, &self.library, next)?;
            info!(from = %self.current.scene(), to = %next, elapsed, "switching scene");
            self.current = rebuilt;
            self.timeline.commit(next);
        }
        debug_assert_eq!(self.current.scene(), self.timeline.scene());

        let uniforms = SceneUniforms::new(elapsed, self.current.scene());

        let status = match self.gpu.next_drawable(&self.device, surface)? {
            Some(drawable) => {
                self.gpu
                    .submit_frame(&self.queue, self.current.pipeline(), drawable, &uniforms);
                FrameStatus::Presented
            }
            None => FrameStatus::Skipped,
        };
        self.stats.record(status, sample);
        Ok(status)
    }
}
