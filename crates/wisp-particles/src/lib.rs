//! Wisp Particles - cursor smoke-trail engine
//!
//! Provides the particle trail behind a moving pointer:
//! - Distance-gated sampling of raw pointer moves
//! - 2–3 jittered, drifting puffs per accepted move, colored from a rotating per-theme palette
//! - A capped, append-ordered live store with idempotent removal
//! - Eased start → end animation sampling and instance packing for renderers
//! - Scripted replays for headless runs

pub mod animation;
pub mod config;
pub mod controller;
pub mod curves;
pub mod cursor;
pub mod palette;
pub mod particle;
pub mod rand;
pub mod replay;

use serde::Serialize;
use wisp_core::{ParticleId, Result, Theme, Vec2};
use wisp_runtime::{EventBus, RuntimeSystem, TrailEvent};

pub use animation::{Animator, ParticleFrame};
pub use config::TrailConfig;
pub use controller::{Emission, EmissionController};
pub use cursor::CursorState;
pub use palette::{Palette, PaletteCursor};
pub use particle::{Particle, ParticleInstance, ParticleStore};
pub use replay::{FrameReport, ReplayScript};

/// Running totals for one trail
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrailStats {
    pub accepted_moves: u64,
    pub gated_moves: u64,
    pub spawned: u64,
    pub evicted: u64,
    pub completed: u64,
    pub peak_live: usize,
    pub theme_changes: u64,
}

/// The trail engine as a runtime system: emission controller, animator,
/// and the current theme, all driven from one owner.
pub struct TrailSystem {
    controller: EmissionController,
    animator: Animator,
    theme: Theme,
    stats: TrailStats,
    instance_buffer: Vec<ParticleInstance>,
}

impl TrailSystem {
    /// Build a trail from a validated config
    pub fn new(config: TrailConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            animator: Animator::new(config.lifetime),
            theme: config.theme,
            controller: EmissionController::new(config),
            stats: TrailStats::default(),
            instance_buffer: Vec::new(),
        })
    }

    /// Apply one event immediately
    pub fn handle_event(&mut self, event: TrailEvent) {
        match event {
            TrailEvent::PointerMoved { x, y } => self.pointer_moved(Vec2::new(x, y)),
            TrailEvent::ThemeToggled => self.set_theme(self.theme.toggled()),
            TrailEvent::ThemeSet { theme } => self.set_theme(theme),
            TrailEvent::AnimationComplete { id } => self.complete(id),
        }
    }

    fn pointer_moved(&mut self, position: Vec2) {
        let emission = self.controller.on_pointer_move(position, self.theme);
        match &emission {
            Emission::Gated { .. } => self.stats.gated_moves += 1,
            Emission::Emitted { spawned, evicted } => {
                self.stats.accepted_moves += 1;
                self.stats.spawned += spawned.len() as u64;
                self.stats.evicted += evicted.len() as u64;
                for id in evicted {
                    self.animator.forget(*id);
                }
                for id in spawned {
                    self.animator.track(*id);
                }
                self.stats.peak_live = self.stats.peak_live.max(self.live_count());
            }
        }
    }

    /// Switch palettes for future emissions. Live particles keep their colors.
    pub fn set_theme(&mut self, theme: Theme) {
        if theme != self.theme {
            log::info!("[particles] Theme {} -> {}", self.theme, theme);
            self.theme = theme;
            self.stats.theme_changes += 1;
        }
    }

    /// Completion reported for `id`, from the animator or an external renderer
    fn complete(&mut self, id: ParticleId) {
        self.animator.forget(id);
        if self.controller.on_animation_complete(id) {
            self.stats.completed += 1;
        }
    }

    /// Age animations by `dt` seconds and retire the ones that finished.
    /// Returns the retired ids.
    pub fn advance(&mut self, dt: f32) -> Vec<ParticleId> {
        let finished = self.animator.advance(dt);
        for id in &finished {
            self.complete(*id);
        }
        finished
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn particles(&self) -> &[Particle] {
        self.controller.particles()
    }

    pub fn live_count(&self) -> usize {
        self.controller.particles().len()
    }

    pub fn cursor(&self) -> &CursorState {
        self.controller.cursor()
    }

    pub fn controller(&self) -> &EmissionController {
        &self.controller
    }

    pub fn stats(&self) -> TrailStats {
        self.stats
    }

    /// Current visual state of every live particle
    pub fn frames(&self) -> Vec<ParticleFrame> {
        self.animator.frames(self.controller.particles())
    }

    /// Instance data for the current frame
    pub fn instances(&self) -> &[ParticleInstance] {
        &self.instance_buffer
    }

    /// Repack the instance buffer from the live particles
    pub fn pack_instances(&mut self) {
        self.animator
            .pack_instances(self.controller.particles(), &mut self.instance_buffer);
    }
}

impl RuntimeSystem for TrailSystem {
    fn initialize(&mut self) -> Result<()> {
        let config = self.controller.config();
        log::info!(
            "[particles] Trail ready: gate {}px, cap {}, lifetime {}s, theme {}",
            config.gate_threshold,
            config.retention_cap,
            config.lifetime,
            self.theme
        );
        Ok(())
    }

    fn update(&mut self, events: &mut EventBus, dt: f64) -> Result<()> {
        for event in events.drain() {
            self.handle_event(event);
        }
        self.advance(dt as f32);
        self.pack_instances();
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        log::info!(
            "[particles] Trail shut down: {} spawned, {} completed, {} evicted",
            self.stats.spawned,
            self.stats.completed,
            self.stats.evicted
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}
