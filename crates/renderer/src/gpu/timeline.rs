use crate::types::Scene;

/// Elapsed seconds at which plasma hands over to the scrolling colours.
pub const SCROLLING_COLORS_AT: f32 = 10.0;
/// Elapsed seconds at which the scrolling colours hand over to the moiré circles.
pub const MOIRE_CIRCLES_AT: f32 = 20.0;

/// Scene that should be on screen at `elapsed` seconds, ignoring how the
/// timeline got there.
pub fn scene_at(elapsed: f32) -> Scene {
    if elapsed >= MOIRE_CIRCLES_AT {
        Scene::MoireCircles
    } else if elapsed >= SCROLLING_COLORS_AT {
        Scene::ScrollingColors
    } else {
        Scene::Plasma
    }
}

/// One-way scene state machine driven by elapsed time.
///
/// The timeline moves at most one step per [`SceneTimeline::transition_at`]
/// check. A frame that arrives after both thresholds while still showing
/// plasma only advances to the scrolling colours; the moiré circles follow on
/// the next check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SceneTimeline {
    scene: Scene,
}

impl SceneTimeline {
    pub fn new() -> Self {
        Self {
            scene: Scene::Plasma,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    /// Returns the scene to switch to at `elapsed`, if any, without committing it.
    pub fn transition_at(&self, elapsed: f32) -> Option<Scene> {
        match self.scene {
            Scene::Plasma if elapsed >= SCROLLING_COLORS_AT => Some(Scene::ScrollingColors),
            Scene::ScrollingColors if elapsed >= MOIRE_CIRCLES_AT => Some(Scene::MoireCircles),
            _ => None,
        }
    }

    /// Records that `scene` is now on screen.
    pub fn commit(&mut self, scene: Scene) {
        debug_assert_eq!(
            self.transition_at(f32::INFINITY),
            Some(scene),
            "scene timeline only moves forward one step at a time"
        );
        self.scene = scene;
    }
}
