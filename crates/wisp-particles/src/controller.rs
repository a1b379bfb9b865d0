//! Emission controller: pointer sampling gate and particle generation

use crate::config::TrailConfig;
use crate::cursor::CursorState;
use crate::palette::PaletteCursor;
use crate::particle::{Particle, ParticleStore};
use crate::rand::ParticleRng;
use wisp_core::{IdAllocator, ParticleId, Theme, Vec2};

/// Reference position before anything has been accepted. Far enough outside
/// any viewport that the first real move always clears the gate.
pub const GATE_SENTINEL: Vec2 = Vec2::new(-1.0e6, -1.0e6);

/// What a single pointer move did
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    /// Too close to the last accepted position; nothing spawned
    Gated { distance: f32 },
    /// Particles spawned and appended, possibly evicting old ones
    Emitted {
        spawned: Vec<ParticleId>,
        evicted: Vec<ParticleId>,
    },
}

impl Emission {
    pub fn is_gated(&self) -> bool {
        matches!(self, Emission::Gated { .. })
    }

    pub fn spawned(&self) -> &[ParticleId] {
        match self {
            Emission::Gated { .. } => &[],
            Emission::Emitted { spawned, .. } => spawned,
        }
    }

    pub fn evicted(&self) -> &[ParticleId] {
        match self {
            Emission::Gated { .. } => &[],
            Emission::Emitted { evicted, .. } => evicted,
        }
    }
}

/// Turns raw pointer moves into smoke particles.
///
/// Owns the particle store and every piece of emission state (last accepted
/// position, id counter, rotating palette index, RNG), so two controllers
/// never share anything.
pub struct EmissionController {
    config: TrailConfig,
    store: ParticleStore,
    ids: IdAllocator,
    rng: ParticleRng,
    palette: PaletteCursor,
    last_accepted: Vec2,
    cursor: CursorState,
}

impl EmissionController {
    pub fn new(config: TrailConfig) -> Self {
        let palette = PaletteCursor::new();
        let cursor = CursorState::new(palette.peek(config.theme));
        Self {
            store: ParticleStore::new(config.retention_cap),
            ids: IdAllocator::new(),
            rng: ParticleRng::new(config.seed),
            palette,
            last_accepted: GATE_SENTINEL,
            cursor,
            config,
        }
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    /// Handle one raw pointer move under the theme active right now
    pub fn on_pointer_move(&mut self, position: Vec2, theme: Theme) -> Emission {
        self.cursor.position = position;

        let distance = self.last_accepted.distance(position);
        if distance < self.config.gate_threshold {
            log::trace!(
                "[particles] Move to ({:.1}, {:.1}) gated at {:.2}px",
                position.x,
                position.y,
                distance
            );
            return Emission::Gated { distance };
        }
        self.last_accepted = position;

        let count = self
            .rng
            .range_inclusive(self.config.min_particles, self.config.max_particles);
        let batch: Vec<Particle> = (0..count).map(|_| self.spawn(position, theme)).collect();
        let spawned: Vec<ParticleId> = batch.iter().map(|p| p.id).collect();

        self.cursor.color = self.palette.peek(theme).with_alpha(1.0);

        let evicted = self.store.append(batch);
        log::debug!(
            "[particles] Emitted {} at ({:.1}, {:.1}) [{theme}], {} live",
            spawned.len(),
            position.x,
            position.y,
            self.store.len()
        );
        Emission::Emitted { spawned, evicted }
    }

    /// The render layer finished animating `id`. Late or repeated calls,
    /// including for ids the cap already evicted, are ignored.
    pub fn on_animation_complete(&mut self, id: ParticleId) -> bool {
        self.store.remove(id)
    }

    fn spawn(&mut self, position: Vec2, theme: Theme) -> Particle {
        let cfg = &self.config;
        let origin = Vec2::new(
            position.x + self.rng.symmetric(cfg.jitter),
            position.y + self.rng.symmetric(cfg.jitter),
        );
        let size = self.rng.range(cfg.size_min, cfg.size_max);
        let drift = Vec2::new(
            self.rng.symmetric(cfg.drift_x),
            -self.rng.range(cfg.drift_y_min, cfg.drift_y_max),
        );
        Particle {
            id: self.ids.allocate(),
            origin,
            size,
            color: self.palette.next_color(theme),
            drift,
        }
    }

    /// Live particles in arrival order
    pub fn particles(&self) -> &[Particle] {
        self.store.current()
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    /// Reference point for the gate; [`GATE_SENTINEL`] until the first accept
    pub fn last_accepted(&self) -> Vec2 {
        self.last_accepted
    }

    /// Total particles ever spawned
    pub fn spawned_total(&self) -> u64 {
        self.ids.issued()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;

    fn controller() -> EmissionController {
        EmissionController::new(TrailConfig::default())
    }

    /// Controller whose last accepted position is `at`
    fn primed(at: Vec2) -> EmissionController {
        let mut ctl = controller();
        assert!(!ctl.on_pointer_move(at, Theme::Dark).is_gated());
        ctl
    }

    #[test]
    fn first_move_always_passes_gate() {
        let mut ctl = controller();
        assert_eq!(ctl.last_accepted(), GATE_SENTINEL);
        let emission = ctl.on_pointer_move(Vec2::ZERO, Theme::Dark);
        assert!(!emission.is_gated());
        assert_eq!(ctl.last_accepted(), Vec2::ZERO);
    }

    #[test]
    fn gate_scenario() {
        let start = Vec2::new(100.0, 100.0);
        let mut ctl = primed(start);
        let live = ctl.particles().len();

        let near = ctl.on_pointer_move(Vec2::new(103.0, 101.0), Theme::Dark);
        assert!(near.is_gated());
        assert!(near.spawned().is_empty());
        assert_eq!(ctl.last_accepted(), start);
        assert_eq!(ctl.particles().len(), live);

        let far = ctl.on_pointer_move(Vec2::new(110.0, 112.0), Theme::Dark);
        assert!((2..=3).contains(&far.spawned().len()));
        assert_eq!(ctl.last_accepted(), Vec2::new(110.0, 112.0));
    }

    #[test]
    fn gate_measures_from_last_accepted_not_last_raw() {
        let mut ctl = primed(Vec2::new(0.0, 0.0));
        // Creep in 5px steps: each is gated against (0,0) until travel reaches 8
        assert!(ctl.on_pointer_move(Vec2::new(5.0, 0.0), Theme::Dark).is_gated());
        assert!(!ctl.on_pointer_move(Vec2::new(10.0, 0.0), Theme::Dark).is_gated());
    }

    #[test]
    fn two_near_moves_emit_nothing() {
        let mut ctl = primed(Vec2::new(200.0, 200.0));
        let before = ctl.spawned_total();
        ctl.on_pointer_move(Vec2::new(203.0, 202.0), Theme::Dark);
        ctl.on_pointer_move(Vec2::new(198.0, 205.0), Theme::Dark);
        assert_eq!(ctl.spawned_total(), before);
    }

    #[test]
    fn gated_move_still_moves_cursor() {
        let mut ctl = primed(Vec2::new(50.0, 50.0));
        ctl.on_pointer_move(Vec2::new(52.0, 51.0), Theme::Dark);
        assert_eq!(ctl.cursor().position, Vec2::new(52.0, 51.0));
    }

    #[test]
    fn spawned_particles_respect_ranges() {
        let config = TrailConfig::default();
        let mut ctl = EmissionController::new(config.clone());
        for i in 0..200 {
            let pos = Vec2::new((i * 20) as f32 % 1000.0, (i * 13) as f32);
            let emission = ctl.on_pointer_move(pos, Theme::Dark);
            let spawned = emission.spawned();
            assert!((2..=3).contains(&spawned.len()));
            for id in spawned {
                let p = ctl.store().get(*id).unwrap();
                assert!(p.size >= config.size_min && p.size <= config.size_max);
                assert!(p.drift.y < 0.0);
                assert!(p.drift.x.abs() <= config.drift_x);
                assert!((p.origin.x - pos.x).abs() <= config.jitter + 1e-3);
                assert!((p.origin.y - pos.y).abs() <= config.jitter + 1e-3);
            }
        }
    }

    #[test]
    fn ids_strictly_increase() {
        let mut ctl = controller();
        let mut all = Vec::new();
        for i in 0..100 {
            let e = ctl.on_pointer_move(Vec2::new(i as f32 * 10.0, 0.0), Theme::Dark);
            all.extend_from_slice(e.spawned());
        }
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn live_count_never_exceeds_cap() {
        let mut ctl = controller();
        for i in 0..500 {
            ctl.on_pointer_move(Vec2::new((i % 50) as f32 * 9.0, (i / 50) as f32 * 9.0), Theme::Dark);
            assert!(ctl.particles().len() <= 60);
        }
        assert_eq!(ctl.particles().len(), 60);
    }

    #[test]
    fn completion_after_eviction_is_tolerated() {
        let mut ctl = controller();
        let first = ctl.on_pointer_move(Vec2::ZERO, Theme::Dark).spawned()[0];
        for i in 1..40 {
            ctl.on_pointer_move(Vec2::new(i as f32 * 10.0, 0.0), Theme::Dark);
        }
        assert!(!ctl.store().contains(first));
        let live = ctl.particles().len();
        assert!(!ctl.on_animation_complete(first));
        assert!(!ctl.on_animation_complete(first));
        assert_eq!(ctl.particles().len(), live);
    }

    #[test]
    fn consecutive_particles_differ_in_color() {
        let mut ctl = controller();
        for i in 0..10 {
            ctl.on_pointer_move(Vec2::new(i as f32 * 10.0, 0.0), Theme::Dark);
        }
        let colors: Vec<_> = ctl.particles().iter().map(|p| p.color).collect();
        assert!(colors.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn theme_flip_only_affects_later_particles() {
        let mut ctl = controller();
        let before = ctl.on_pointer_move(Vec2::ZERO, Theme::Dark).spawned().to_vec();
        let before_colors: Vec<_> = before
            .iter()
            .map(|id| ctl.store().get(*id).unwrap().color)
            .collect();

        let after = ctl
            .on_pointer_move(Vec2::new(100.0, 0.0), Theme::Light)
            .spawned()
            .to_vec();

        let dark = Palette::for_theme(Theme::Dark);
        let light = Palette::for_theme(Theme::Light);
        for (id, color) in before.iter().zip(&before_colors) {
            let p = ctl.store().get(*id).unwrap();
            assert_eq!(p.color, *color);
            assert!(dark.contains(p.color));
        }
        for id in &after {
            assert!(light.contains(ctl.store().get(*id).unwrap().color));
        }
    }

    #[test]
    fn cursor_color_tracks_next_palette_entry() {
        let mut ctl = controller();
        assert_eq!(ctl.cursor().color.to_css(), "rgba(139,92,246,1)");

        let n = ctl.on_pointer_move(Vec2::ZERO, Theme::Light).spawned().len();
        let expected = Palette::for_theme(Theme::Light).color(n).with_alpha(1.0);
        assert_eq!(ctl.cursor().color, expected);
    }

    #[test]
    fn cursor_starts_in_configured_theme() {
        let ctl = EmissionController::new(TrailConfig {
            theme: Theme::Light,
            ..TrailConfig::default()
        });
        assert_eq!(ctl.cursor().color.to_css(), "rgba(251,191,36,1)");
        assert_eq!(controller().cursor().color.to_css(), "rgba(139,92,246,1)");
    }

    #[test]
    fn same_seed_same_trail() {
        let moves: Vec<Vec2> = (0..30).map(|i| Vec2::new(i as f32 * 12.0, 40.0)).collect();
        let run = || {
            let mut ctl = controller();
            for m in &moves {
                ctl.on_pointer_move(*m, Theme::Dark);
            }
            ctl.particles().to_vec()
        };
        assert_eq!(run(), run());
    }
}
