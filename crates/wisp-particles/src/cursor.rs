//! Cursor follower state

use serde::Serialize;
use wisp_core::{Color, Vec2};

/// Where the follower ring sits before the pointer first moves
pub const CURSOR_START: Vec2 = Vec2::new(-100.0, -100.0);
/// Follower ring diameter in pixels
pub const CURSOR_DIAMETER: f32 = 32.0;
/// Alpha of the ring's filled halo
pub const HALO_ALPHA: f32 = 0.15;

/// The ring that tracks the raw pointer. Position follows every move;
/// color follows the palette only when a move emits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CursorState {
    pub position: Vec2,
    /// Ring color, always fully opaque
    pub color: Color,
}

impl CursorState {
    pub fn new(color: Color) -> Self {
        Self {
            position: CURSOR_START,
            color: color.with_alpha(1.0),
        }
    }

    /// Fill color of the ring
    pub fn halo(&self) -> Color {
        self.color.with_alpha(HALO_ALPHA)
    }

    /// Top-left corner of the ring's bounding box
    pub fn top_left(&self) -> Vec2 {
        let half = CURSOR_DIAMETER / 2.0;
        Vec2::new(self.position.x - half, self.position.y - half)
    }
}
