//! Start → end interpolation and CSS-style cubic-bezier easing

use wisp_core::Vec2;

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two points
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    Vec2::new(lerp_f32(a.x, b.x, t), lerp_f32(a.y, b.y, t))
}

/// A `cubic-bezier(x1, y1, x2, y2)` timing function with fixed endpoints
/// (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    /// Ease-out curve the smoke puffs use
    pub const SMOKE: Self = Self::new(0.25, 0.46, 0.45, 0.94);
    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Map normalized time `t` to eased progress
    pub fn ease(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let s = self.solve_x(t);
        bezier(s, self.y1, self.y2)
    }

    /// Find the curve parameter whose x equals `x`
    fn solve_x(&self, x: f32) -> f32 {
        // Newton-Raphson first, bisection if the slope flattens out
        let mut s = x;
        for _ in 0..8 {
            let err = bezier(s, self.x1, self.x2) - x;
            if err.abs() < 1e-6 {
                return s;
            }
            let slope = bezier_slope(s, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= err / slope;
        }

        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        s = x;
        for _ in 0..32 {
            let value = bezier(s, self.x1, self.x2);
            if (value - x).abs() < 1e-6 {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) * 0.5;
        }
        s
    }
}

/// One axis of the cubic bezier with control values `p1`, `p2`
fn bezier(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}
