use std::borrow::Cow;

use wgpu::naga::{self, ShaderStage};

use crate::gpu::GpuError;

/// WGSL source of the bundled shader library.
pub(crate) const SCENE_LIBRARY_WGSL: &str = include_str!("shaders/scenes.wgsl");

/// Entry point exported by a parsed shader library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EntryPoint {
    pub name: String,
    pub stage: ShaderStage,
}

/// Parses WGSL with naga and lists its entry points.
///
/// Parse errors are rendered with source context so the fatal diagnostic
/// points at the offending line.
pub(crate) fn parse_library(source: &str) -> Result<Vec<EntryPoint>, GpuError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|err| GpuError::ShaderLibrary(err.emit_to_string(source)))?;
    Ok(module
        .entry_points
        .iter()
        .map(|entry| EntryPoint {
            name: entry.name.clone(),
            stage: entry.stage,
        })
        .collect())
}

/// Creates the GPU shader module for the bundled library.
pub(crate) fn compile_library(device: &wgpu::Device, source: &str) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene library"),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(source)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Scene, VERTEX_ENTRY};

    fn has_entry(entries: &[EntryPoint], name: &str, stage: ShaderStage) -> bool {
        entries
            .iter()
            .any(|entry| entry.name == name && entry.stage == stage)
    }

    #[test]
    fn bundled_library_exports_every_scene_entry() {
        let entries = parse_library(SCENE_LIBRARY_WGSL).expect("bundled WGSL parses");
        assert!(has_entry(&entries, VERTEX_ENTRY, ShaderStage::Vertex));
        for scene in Scene::SEQUENCE {
            let fragment = scene.entry_points().fragment;
            assert!(
                has_entry(&entries, fragment, ShaderStage::Fragment),
                "missing {fragment}"
            );
        }
    }

    #[test]
    fn bundled_library_validates() {
        let module = naga::front::wgsl::parse_str(SCENE_LIBRARY_WGSL).expect("parse");
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        );
        validator.validate(&module).expect("bundled WGSL validates");
    }

    #[test]
    fn parse_errors_surface_as_shader_library_errors() {
        let err = parse_library("fn broken( {").unwrap_err();
        assert!(matches!(err, GpuError::ShaderLibrary(_)));
    }
}
