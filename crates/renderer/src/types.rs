use std::fmt;

/// Colour target format shared by every scene pipeline and the window surface.
pub const OUTPUT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8Unorm;

/// Vertex entry point shared by all scenes; it emits a single oversized
/// triangle that covers the whole viewport.
pub const VERTEX_ENTRY: &str = "vertex_main";

/// One of the full-screen effects the demo cycles through.
///
/// The discriminants are the values written into [`SceneUniforms::scene`] and
/// must stay in sync with the `SCENE_*` constants in `shaders/scenes.wgsl`.
///
/// [`SceneUniforms::scene`]: crate::SceneUniforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Scene {
    Plasma = 0,
    ScrollingColors = 1,
    MoireCircles = 2,
}

impl Scene {
    /// Scenes in the order the timeline visits them.
    pub const SEQUENCE: [Scene; 3] = [Scene::Plasma, Scene::ScrollingColors, Scene::MoireCircles];

    /// Integer encoding handed to the shader stages.
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Vertex and fragment entry points compiled for this scene.
    pub fn entry_points(self) -> ShaderEntryPoints {
        let fragment = match self {
            Scene::Plasma => "fragment_plasma",
            Scene::ScrollingColors => "fragment_scrolling_colors",
            Scene::MoireCircles => "fragment_moire_circles",
        };
        ShaderEntryPoints {
            vertex: VERTEX_ENTRY,
            fragment,
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scene::Plasma => f.write_str("plasma"),
            Scene::ScrollingColors => f.write_str("scrolling-colors"),
            Scene::MoireCircles => f.write_str("moire-circles"),
        }
    }
}

/// Named entry points a scene pipeline is compiled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderEntryPoints {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

/// Adapter power preference requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpuPowerPreference {
    /// Prefer integrated / low-power adapters.
    Low,
    /// Prefer discrete / high-performance adapters.
    #[default]
    High,
}

impl GpuPowerPreference {
    pub(crate) fn to_wgpu(self) -> wgpu::PowerPreference {
        match self {
            GpuPowerPreference::Low => wgpu::PowerPreference::LowPower,
            GpuPowerPreference::High => wgpu::PowerPreference::HighPerformance,
        }
    }
}

/// Summary of the adapter picked during bootstrap, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct AdapterProfile {
    pub name: String,
    pub backend: wgpu::Backend,
    pub device_type: wgpu::DeviceType,
}

impl AdapterProfile {
    pub(crate) fn from_wgpu(info: &wgpu::AdapterInfo) -> Self {
        Self {
            name: info.name.clone(),
            backend: info.backend,
            device_type: info.device_type,
        }
    }

    pub fn is_software(&self) -> bool {
        matches!(self.device_type, wgpu::DeviceType::Cpu)
    }
}

/// Immutable configuration passed to the renderer at start-up.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Initial window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Window title.
    pub title: String,
    /// Adapter selection hint.
    pub gpu_power: GpuPowerPreference,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            surface_size: (1280, 720),
            title: "shadercycle".to_string(),
            gpu_power: GpuPowerPreference::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenes_share_the_vertex_entry() {
        for scene in Scene::SEQUENCE {
            assert_eq!(scene.entry_points().vertex, VERTEX_ENTRY);
        }
    }

    #[test]
    fn fragment_entries_are_distinct() {
        let fragments: Vec<_> = Scene::SEQUENCE
            .iter()
            .map(|scene| scene.entry_points().fragment)
            .collect();
        assert_eq!(
            fragments,
            [
                "fragment_plasma",
                "fragment_scrolling_colors",
                "fragment_moire_circles"
            ]
        );
    }

    #[test]
    fn scene_ids_follow_sequence_order() {
        let ids: Vec<u32> = Scene::SEQUENCE.iter().map(|scene| scene.id()).collect();
        assert_eq!(ids, [0, 1, 2]);
    }
}
