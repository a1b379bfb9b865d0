//! Particle values, the live particle store, and GPU instance data

use bytemuck::{Pod, Zeroable};
use serde::Serialize;
use wisp_core::{Color, ParticleId, Vec2};

/// One smoke puff. Never mutated after creation; the render layer
/// interpolates between its fixed start and end states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Particle {
    pub id: ParticleId,
    /// Spawn center in viewport pixels
    pub origin: Vec2,
    /// Diameter in pixels
    pub size: f32,
    pub color: Color,
    /// Displacement reached at the end of the animation. `drift.y < 0`.
    pub drift: Vec2,
}

/// Ordered sequence of live particles with a retention cap.
///
/// Arrival order is preserved; the cap evicts from the front.
pub struct ParticleStore {
    particles: Vec<Particle>,
    cap: usize,
}

impl ParticleStore {
    pub fn new(cap: usize) -> Self {
        Self {
            particles: Vec::with_capacity(cap + 4),
            cap,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Append in order, then drop the oldest entries beyond the cap.
    /// Returns the ids that were evicted.
    pub fn append<I>(&mut self, new_particles: I) -> Vec<ParticleId>
    where
        I: IntoIterator<Item = Particle>,
    {
        self.particles.extend(new_particles);

        let excess = self.particles.len().saturating_sub(self.cap);
        if excess == 0 {
            return Vec::new();
        }
        let evicted: Vec<ParticleId> = self.particles.drain(..excess).map(|p| p.id).collect();
        log::debug!(
            "[particles] Cap {} reached, evicted {} oldest",
            self.cap,
            evicted.len()
        );
        evicted
    }

    /// Remove the particle with `id`. Absent ids are ignored; returns
    /// whether anything was removed.
    pub fn remove(&mut self, id: ParticleId) -> bool {
        match self.particles.iter().position(|p| p.id == id) {
            Some(index) => {
                self.particles.remove(index);
                true
            }
            None => {
                log::trace!("[particles] Remove of absent id {id} ignored");
                false
            }
        }
    }

    /// Live particles in arrival order. Only valid until the next mutation.
    pub fn current(&self) -> &[Particle] {
        &self.particles
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.get(id).is_some()
    }

    /// Drop every live particle
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

/// Instance data for an instanced blurred-disc draw.
/// 48 bytes, three rows of vec4.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleInstance {
    pub center_size: [f32; 4], // xy = current center, z = scaled diameter, w = base size
    pub color: [f32; 4],       // rgba, alpha already multiplied by opacity
    pub params: [f32; 4],      // x = opacity, y = scale, z = blur radius, w = progress
}
