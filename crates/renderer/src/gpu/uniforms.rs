use bytemuck::{Pod, Zeroable};

use crate::types::Scene;

/// Per-frame data bound at `@group(0) @binding(0)` for both shader stages.
///
/// Mirrors `struct Uniforms` in `shaders/scenes.wgsl`: two 4-byte scalars,
/// no padding.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub elapsed_time: f32,
    pub scene: u32,
}

const _: () = assert!(std::mem::size_of::<SceneUniforms>() == 8);

impl SceneUniforms {
    pub fn new(elapsed_time: f32, scene: Scene) -> Self {
        Self {
            elapsed_time,
            scene: scene.id(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
