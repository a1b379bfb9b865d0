//! Events delivered to the trail engine by its host

use serde::{Deserialize, Serialize};
use wisp_core::{ParticleId, Theme, Vec2};

/// One input to the trail engine. Events are processed strictly in the
/// order they were pushed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrailEvent {
    /// Pointer moved to a viewport position
    PointerMoved { x: f32, y: f32 },
    /// The theme toggle was clicked
    ThemeToggled,
    /// The theme was set explicitly
    ThemeSet { theme: Theme },
    /// The render layer finished animating a particle
    AnimationComplete { id: ParticleId },
}

impl TrailEvent {
    pub fn pointer(position: Vec2) -> Self {
        TrailEvent::PointerMoved {
            x: position.x,
            y: position.y,
        }
    }
}
