//! Render-side animation of smoke puffs
//!
//! Particles never change after spawn. Everything visible over time is
//! sampled here from a particle's fixed start and end states:
//! - opacity 0.95 → 0
//! - scale 0.3 → 4
//! - top-left offset `origin - size/2` → `origin - size/2 + drift`
//!
//! The [`Animator`] ages each tracked particle and reports completion once.

use crate::curves::{lerp_f32, lerp_vec2, CubicBezier};
use crate::particle::{Particle, ParticleInstance};
use serde::Serialize;
use wisp_core::{Color, ParticleId, Vec2};

pub const INITIAL_OPACITY: f32 = 0.95;
pub const FINAL_OPACITY: f32 = 0.0;
pub const INITIAL_SCALE: f32 = 0.3;
pub const FINAL_SCALE: f32 = 4.0;
/// Gaussian blur applied to every puff, in pixels
pub const BLUR_RADIUS: f32 = 10.0;

/// Visual state of one particle at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleFrame {
    pub id: ParticleId,
    /// Top-left translation of the unscaled box
    pub offset: Vec2,
    /// Center of the puff
    pub center: Vec2,
    pub size: f32,
    pub scale: f32,
    pub opacity: f32,
    pub blur: f32,
    pub color: Color,
    /// Normalized, un-eased time in [0, 1]
    pub progress: f32,
}

impl ParticleFrame {
    /// Sample `particle` at normalized time `t` along `curve`
    pub fn sample(particle: &Particle, t: f32, curve: &CubicBezier) -> Self {
        let t = t.clamp(0.0, 1.0);
        let eased = curve.ease(t);

        let half = particle.size / 2.0;
        let start = Vec2::new(particle.origin.x - half, particle.origin.y - half);
        let offset = lerp_vec2(start, start + particle.drift, eased);

        Self {
            id: particle.id,
            offset,
            center: Vec2::new(offset.x + half, offset.y + half),
            size: particle.size,
            scale: lerp_f32(INITIAL_SCALE, FINAL_SCALE, eased),
            opacity: lerp_f32(INITIAL_OPACITY, FINAL_OPACITY, eased),
            blur: BLUR_RADIUS,
            color: particle.color,
            progress: t,
        }
    }

    /// Pack for an instanced draw
    pub fn to_instance(&self) -> ParticleInstance {
        ParticleInstance {
            center_size: [
                self.center.x,
                self.center.y,
                self.size * self.scale,
                self.size,
            ],
            color: [
                self.color.r,
                self.color.g,
                self.color.b,
                self.color.a * self.opacity,
            ],
            params: [self.opacity, self.scale, self.blur, self.progress],
        }
    }
}

struct Track {
    id: ParticleId,
    age: f32,
}

/// Ages tracked particles and reports each one's completion exactly once
pub struct Animator {
    lifetime: f32,
    curve: CubicBezier,
    tracks: Vec<Track>,
}

impl Animator {
    pub fn new(lifetime: f32) -> Self {
        Self::with_curve(lifetime, CubicBezier::SMOKE)
    }

    pub fn with_curve(lifetime: f32, curve: CubicBezier) -> Self {
        Self {
            lifetime,
            curve,
            tracks: Vec::new(),
        }
    }

    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    /// Start animating `id` from age zero
    pub fn track(&mut self, id: ParticleId) {
        if !self.is_tracking(id) {
            self.tracks.push(Track { id, age: 0.0 });
        }
    }

    /// Stop animating `id` without a completion. Returns whether it was tracked.
    pub fn forget(&mut self, id: ParticleId) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.id != id);
        self.tracks.len() != before
    }

    pub fn is_tracking(&self, id: ParticleId) -> bool {
        self.tracks.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Age every track by `dt` seconds. Returns the ids that finished, in
    /// the order they started; finished ids are no longer tracked.
    pub fn advance(&mut self, dt: f32) -> Vec<ParticleId> {
        let lifetime = self.lifetime;
        let mut completed = Vec::new();
        self.tracks.retain_mut(|track| {
            track.age += dt;
            if track.age >= lifetime {
                completed.push(track.id);
                false
            } else {
                true
            }
        });
        completed
    }

    /// Normalized time for `id`, if tracked
    pub fn progress(&self, id: ParticleId) -> Option<f32> {
        self.tracks
            .iter()
            .find(|t| t.id == id)
            .map(|t| (t.age / self.lifetime).min(1.0))
    }

    /// Frames for every tracked particle in `particles`, in their order
    pub fn frames(&self, particles: &[Particle]) -> Vec<ParticleFrame> {
        particles
            .iter()
            .filter_map(|p| {
                self.progress(p.id)
                    .map(|t| ParticleFrame::sample(p, t, &self.curve))
            })
            .collect()
    }

    /// Pack tracked particles into `buffer`, replacing its contents
    pub fn pack_instances(&self, particles: &[Particle], buffer: &mut Vec<ParticleInstance>) {
        buffer.clear();
        buffer.extend(self.frames(particles).iter().map(ParticleFrame::to_instance));
    }
}
