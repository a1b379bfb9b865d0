//! Scripted pointer traces for headless runs
//!
//! A script is TOML with `[[event]]` and `[[stroke]]` tables:
//!
//! ```toml
//! [[event]]
//! at = 0.0
//! move = [120, 340]
//!
//! [[event]]
//! at = 0.4
//! toggle_theme = true
//!
//! [[stroke]]
//! from = [120, 340]
//! to = [600, 300]
//! start = 0.5
//! duration = 0.6
//! steps = 24
//! ```
//!
//! Events fire once simulated time reaches `at`; ties keep file order, with
//! all `[[event]]` tables ahead of `[[stroke]]` moves.

use crate::animation::ParticleFrame;
use crate::curves::lerp_vec2;
use crate::cursor::CursorState;
use crate::{TrailStats, TrailSystem};
use serde::{Deserialize, Serialize};
use std::path::Path;
use wisp_core::{ParticleId, Result, Theme, Vec2, WispError};
use wisp_runtime::{EventBus, FrameClock, RuntimeSystem, TrailEvent};

/// Frames allowed past the last event plus one lifetime before giving up
const SETTLE_MARGIN_FRAMES: u64 = 8;

#[derive(Debug, Default, Deserialize)]
struct ScriptFile {
    #[serde(default)]
    event: Vec<EventEntry>,
    #[serde(default)]
    stroke: Vec<StrokeEntry>,
}

#[derive(Debug, Deserialize)]
struct EventEntry {
    at: f64,
    #[serde(rename = "move")]
    move_to: Option<[f32; 2]>,
    #[serde(default)]
    toggle_theme: bool,
    theme: Option<Theme>,
    complete: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct StrokeEntry {
    from: [f32; 2],
    to: [f32; 2],
    start: f64,
    duration: f64,
    #[serde(default = "default_steps")]
    steps: u32,
}

fn default_steps() -> u32 {
    16
}

/// An event scheduled at a point in simulated time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEvent {
    pub at: f64,
    pub event: TrailEvent,
}

/// What the trail looked like at the end of one replay frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    pub time: f64,
    pub theme: Theme,
    pub live: usize,
    pub cursor: CursorState,
    pub particles: Vec<ParticleFrame>,
}

/// A time-ordered list of trail events
#[derive(Debug, Clone, Default)]
pub struct ReplayScript {
    events: Vec<TimedEvent>,
}

impl ReplayScript {
    pub fn from_events(mut events: Vec<TimedEvent>) -> Self {
        events.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { events }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ScriptFile = toml::from_str(content)?;
        let mut events = Vec::with_capacity(file.event.len());

        for (index, entry) in file.event.iter().enumerate() {
            check_time(entry.at, &format!("event #{}", index + 1))?;
            events.push(TimedEvent {
                at: entry.at,
                event: entry_event(entry, index)?,
            });
        }
        for (index, stroke) in file.stroke.iter().enumerate() {
            events.extend(expand_stroke(stroke, index)?);
        }

        Ok(Self::from_events(events))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| {
            WispError::ScriptError(format!("Failed to load replay {}: {}", path.display(), e))
        })
    }

    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Time of the last scheduled event
    pub fn duration(&self) -> f64 {
        self.events.last().map(|e| e.at).unwrap_or(0.0)
    }

    /// Drive `system` at `fps` until every event has fired and every
    /// particle has expired. `on_frame` sees the state after each frame.
    pub fn play<F>(&self, system: &mut TrailSystem, fps: f64, mut on_frame: F) -> Result<TrailStats>
    where
        F: FnMut(&FrameReport),
    {
        if !(fps.is_finite() && fps > 0.0 && fps <= 1000.0) {
            return Err(WispError::ValueOutOfRange {
                field: "fps".into(),
                min: 0.0,
                max: 1000.0,
                value: fps,
            });
        }

        let mut clock = FrameClock::with_fixed_timestep(fps);
        let step = clock.fixed_timestep;
        let lifetime = system.controller().config().lifetime as f64;
        let frame_limit = ((self.duration() + lifetime) * fps).ceil() as u64 + SETTLE_MARGIN_FRAMES;

        let mut bus = EventBus::new();
        let mut next = 0;
        let mut sim_time = 0.0;

        system.initialize()?;
        while next < self.events.len() || system.live_count() > 0 {
            if clock.frame_count >= frame_limit {
                return Err(WispError::RuntimeError(format!(
                    "replay did not settle within {frame_limit} frames"
                )));
            }

            clock.advance(step);
            while clock.should_fixed_update() {
                clock.consume_fixed_step();
                sim_time += step;
                while next < self.events.len() && self.events[next].at <= sim_time + 1e-9 {
                    bus.push(self.events[next].event);
                    next += 1;
                }
                system.update(&mut bus, step)?;
            }

            on_frame(&FrameReport {
                frame: clock.frame_count,
                time: sim_time,
                theme: system.theme(),
                live: system.live_count(),
                cursor: *system.cursor(),
                particles: system.frames(),
            });
        }
        system.shutdown()?;

        Ok(system.stats())
    }
}

fn check_time(at: f64, what: &str) -> Result<()> {
    if at.is_finite() && at >= 0.0 {
        Ok(())
    } else {
        Err(WispError::ScriptError(format!(
            "{what}: time must be a non-negative number, got {at}"
        )))
    }
}

fn entry_event(entry: &EventEntry, index: usize) -> Result<TrailEvent> {
    let mut actions = Vec::new();
    if let Some([x, y]) = entry.move_to {
        actions.push(TrailEvent::PointerMoved { x, y });
    }
    if entry.toggle_theme {
        actions.push(TrailEvent::ThemeToggled);
    }
    if let Some(theme) = entry.theme {
        actions.push(TrailEvent::ThemeSet { theme });
    }
    if let Some(id) = entry.complete {
        actions.push(TrailEvent::AnimationComplete {
            id: ParticleId::from_raw(id),
        });
    }

    match actions.as_slice() {
        [event] => Ok(*event),
        [] => Err(WispError::ScriptError(format!(
            "event #{} has no action (move, toggle_theme, theme, complete)",
            index + 1
        ))),
        _ => Err(WispError::ScriptError(format!(
            "event #{} has {} actions; use one table per action",
            index + 1,
            actions.len()
        ))),
    }
}

fn expand_stroke(stroke: &StrokeEntry, index: usize) -> Result<Vec<TimedEvent>> {
    let what = format!("stroke #{}", index + 1);
    check_time(stroke.start, &what)?;
    if !(stroke.duration.is_finite() && stroke.duration >= 0.0) {
        return Err(WispError::ScriptError(format!(
            "{what}: duration must be non-negative"
        )));
    }
    if stroke.steps == 0 {
        return Err(WispError::ScriptError(format!("{what}: steps must be at least 1")));
    }

    let from = Vec2::from_array(stroke.from);
    let to = Vec2::from_array(stroke.to);
    Ok((0..=stroke.steps)
        .map(|i| {
            let t = i as f64 / stroke.steps as f64;
            TimedEvent {
                at: stroke.start + stroke.duration * t,
                event: TrailEvent::pointer(lerp_vec2(from, to, t as f32)),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrailConfig;
    use crate::palette::Palette;
    use std::io::Write;

    const SCRIPT: &str = r#"
[[event]]
at = 0.0
move = [100, 100]

[[event]]
at = 0.05
move = [103, 101]

[[event]]
at = 0.1
move = [110, 112]

[[event]]
at = 0.2
toggle_theme = true

[[event]]
at = 0.3
move = [200, 112]
"#;

    fn system() -> TrailSystem {
        TrailSystem::new(TrailConfig::default()).unwrap()
    }

    #[test]
    fn parses_events_in_time_order() {
        let script = ReplayScript::from_toml_str(SCRIPT).unwrap();
        assert_eq!(script.events().len(), 5);
        assert_eq!(script.events()[3].event, TrailEvent::ThemeToggled);
        assert!((script.duration() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn stroke_expands_to_evenly_spaced_moves() {
        let script = ReplayScript::from_toml_str(
            r#"
[[stroke]]
from = [0, 0]
to = [100, 0]
start = 1.0
duration = 1.0
steps = 4
"#,
        )
        .unwrap();
        let events = script.events();
        assert_eq!(events.len(), 5);
        assert_eq!(events[0].at, 1.0);
        assert_eq!(events[4].at, 2.0);
        assert_eq!(events[2].event, TrailEvent::PointerMoved { x: 50.0, y: 0.0 });
    }

    #[test]
    fn event_without_action_is_rejected() {
        let err = ReplayScript::from_toml_str("[[event]]\nat = 1.0").unwrap_err();
        assert!(matches!(err, WispError::ScriptError(_)));
    }

    #[test]
    fn event_with_two_actions_is_rejected() {
        let err = ReplayScript::from_toml_str("[[event]]\nat = 1.0\nmove = [1, 1]\ntoggle_theme = true")
            .unwrap_err();
        assert!(matches!(err, WispError::ScriptError(_)));
    }

    #[test]
    fn negative_time_is_rejected() {
        let err = ReplayScript::from_toml_str("[[event]]\nat = -1.0\nmove = [1, 1]").unwrap_err();
        assert!(matches!(err, WispError::ScriptError(_)));
    }

    #[test]
    fn play_runs_until_all_particles_expire() {
        let script = ReplayScript::from_toml_str(SCRIPT).unwrap();
        let mut sys = system();
        let mut frames = 0;
        let mut max_live = 0;
        let stats = script
            .play(&mut sys, 60.0, |report| {
                frames += 1;
                max_live = max_live.max(report.live);
                assert!(report.live <= 60);
            })
            .unwrap();

        assert_eq!(stats.accepted_moves, 3);
        assert_eq!(stats.gated_moves, 1);
        assert_eq!(stats.completed, stats.spawned);
        assert_eq!(stats.theme_changes, 1);
        assert_eq!(sys.live_count(), 0);
        assert_eq!(max_live, stats.peak_live);
        // Last move at 0.3s plus a 1.5s lifetime
        assert!(frames >= 100);
    }

    #[test]
    fn theme_toggle_mid_replay_switches_palette() {
        let script = ReplayScript::from_toml_str(SCRIPT).unwrap();
        let mut sys = system();
        let light = Palette::for_theme(Theme::Light);
        let dark = Palette::for_theme(Theme::Dark);
        let mut checked = false;
        script
            .play(&mut sys, 30.0, |report| {
                if (report.time - 0.4).abs() < 0.02 {
                    let last = report.particles.last().unwrap();
                    let first = report.particles.first().unwrap();
                    assert!(light.contains(last.color));
                    assert!(dark.contains(first.color));
                    checked = true;
                }
            })
            .unwrap();
        assert!(checked);
    }

    #[test]
    fn low_fps_replay_settles() {
        let script = ReplayScript::from_toml_str(
            "[[event]]\nat = 0.0\nmove = [10, 10]\n\n[[event]]\nat = 10.0\nmove = [200, 10]",
        )
        .unwrap();
        let mut sys = system();
        let mut frames = 0;
        let stats = script
            .play(&mut sys, 2.0, |report| {
                frames += 1;
                assert!((report.time - frames as f64 * 0.5).abs() < 1e-9);
            })
            .unwrap();

        assert_eq!(stats.accepted_moves, 2);
        assert_eq!(stats.completed, stats.spawned);
        assert_eq!(sys.live_count(), 0);
        // Last move lands on frame 20 and its puffs retire three steps in
        assert_eq!(frames, 22);
    }

    #[test]
    fn empty_script_plays_no_frames() {
        let mut sys = system();
        let stats = ReplayScript::default()
            .play(&mut sys, 60.0, |_| panic!("no frames expected"))
            .unwrap();
        assert_eq!(stats, TrailStats::default());
    }

    #[test]
    fn rejects_bad_fps() {
        let mut sys = system();
        let err = ReplayScript::default().play(&mut sys, 0.0, |_| {}).unwrap_err();
        assert!(matches!(err, WispError::ValueOutOfRange { .. }));
    }

    #[test]
    fn load_reports_path_on_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[event]]\nat = 0.0").unwrap();
        let err = ReplayScript::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to load replay"));
    }

    #[test]
    fn frame_report_serializes_to_json() {
        let script = ReplayScript::from_toml_str("[[event]]\nat = 0.0\nmove = [10, 10]").unwrap();
        let mut sys = system();
        let mut first = None;
        script
            .play(&mut sys, 60.0, |report| {
                if first.is_none() {
                    first = Some(serde_json::to_value(report).unwrap());
                }
            })
            .unwrap();
        let json = first.unwrap();
        assert_eq!(json["theme"], "dark");
        assert!(json["particles"].as_array().unwrap().len() >= 2);
    }
}
