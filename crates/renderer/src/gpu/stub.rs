//! Recording GPU layer used by the unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::gpu::layer::{GpuError, GpuLayer};
use crate::gpu::uniforms::SceneUniforms;
use crate::types::Scene;

const LIBRARY_FUNCTIONS: [&str; 4] = [
    "vertex_main",
    "fragment_plasma",
    "fragment_scrolling_colors",
    "fragment_moire_circles",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StubStep {
    Device,
    Queue,
    Library,
    Pipeline,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StubPipeline {
    pub scene: Scene,
    pub vertex: String,
    pub fragment: String,
    pub format: wgpu::TextureFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Submission {
    pub scene: Scene,
    pub uniforms: SceneUniforms,
}

#[derive(Debug, Default)]
pub(crate) struct StubSurface {
    pub busy: bool,
    pub out_of_memory: bool,
    pub acquired: usize,
}

/// Everything the stub observed. Shared so tests can inspect it after the
/// stub itself has been moved into (or dropped by) the driver.
#[derive(Debug, Default)]
pub(crate) struct StubLog {
    calls: RefCell<Vec<StubStep>>,
    pipelines: Cell<usize>,
    submissions: RefCell<Vec<Submission>>,
}

impl StubLog {
    pub fn calls(&self) -> Vec<StubStep> {
        self.calls.borrow().clone()
    }

    pub fn pipelines_built(&self) -> usize {
        self.pipelines.get()
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.borrow().clone()
    }
}

#[derive(Default)]
pub(crate) struct StubGpu {
    fail_at: Option<StubStep>,
    pipeline_budget: Option<usize>,
    missing_function: Option<&'static str>,
    log: Rc<StubLog>,
}

impl StubGpu {
    pub fn failing_at(step: StubStep) -> Self {
        Self {
            fail_at: Some(step),
            ..Self::default()
        }
    }

    /// Compiles `budget` pipelines successfully, then fails every later build.
    pub fn with_pipeline_budget(budget: usize) -> Self {
        Self {
            pipeline_budget: Some(budget),
            ..Self::default()
        }
    }

    pub fn without_function(name: &'static str) -> Self {
        Self {
            missing_function: Some(name),
            ..Self::default()
        }
    }

    pub fn log(&self) -> Rc<StubLog> {
        Rc::clone(&self.log)
    }

    pub fn pipelines_built(&self) -> usize {
        self.log.pipelines_built()
    }

    fn enter(&self, step: StubStep) -> bool {
        self.log.calls.borrow_mut().push(step);
        self.fail_at == Some(step)
    }
}

impl GpuLayer for StubGpu {
    type Device = ();
    type Queue = ();
    type Library = Vec<&'static str>;
    type Function = String;
    type Pipeline = StubPipeline;
    type Surface = StubSurface;
    type Drawable = ();

    fn default_device(&self) -> Result<(), GpuError> {
        if self.enter(StubStep::Device) {
            return Err(GpuError::NoDevice("stub has no device".into()));
        }
        Ok(())
    }

    fn create_queue(&self, _device: &()) -> Result<(), GpuError> {
        if self.enter(StubStep::Queue) {
            return Err(GpuError::NoQueue("stub has no queue".into()));
        }
        Ok(())
    }

    fn load_library(&self, _device: &()) -> Result<Vec<&'static str>, GpuError> {
        if self.enter(StubStep::Library) {
            return Err(GpuError::ShaderLibrary("stub has no library".into()));
        }
        Ok(LIBRARY_FUNCTIONS
            .into_iter()
            .filter(|name| Some(*name) != self.missing_function)
            .collect())
    }

    fn function(&self, library: &Vec<&'static str>, name: &str) -> Option<String> {
        library
            .iter()
            .find(|candidate| **candidate == name)
            .map(|found| found.to_string())
    }

    fn compile_pipeline(
        &self,
        _device: &(),
        scene: Scene,
        vertex: &String,
        fragment: &String,
        format: wgpu::TextureFormat,
    ) -> Result<StubPipeline, GpuError> {
        let over_budget = self
            .pipeline_budget
            .is_some_and(|budget| self.log.pipelines.get() >= budget);
        if self.enter(StubStep::Pipeline) || over_budget {
            return Err(GpuError::PipelineCompile {
                scene,
                message: "stub rejected descriptor".into(),
            });
        }
        self.log.pipelines.set(self.log.pipelines.get() + 1);
        Ok(StubPipeline {
            scene,
            vertex: vertex.clone(),
            fragment: fragment.clone(),
            format,
        })
    }

    fn next_drawable(
        &self,
        _device: &(),
        surface: &mut StubSurface,
    ) -> Result<Option<()>, GpuError> {
        if surface.out_of_memory {
            return Err(GpuError::SurfaceOutOfMemory);
        }
        if surface.busy {
            return Ok(None);
        }
        surface.acquired += 1;
        Ok(Some(()))
    }

    fn submit_frame(
        &self,
        _queue: &(),
        pipeline: &StubPipeline,
        _drawable: (),
        uniforms: &SceneUniforms,
    ) {
        self.log.submissions.borrow_mut().push(Submission {
            scene: pipeline.scene,
            uniforms: *uniforms,
        });
    }
}
