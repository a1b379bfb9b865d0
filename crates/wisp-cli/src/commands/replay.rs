//! Replay command - drive the trail engine from a pointer script

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use wisp_particles::{ReplayScript, TrailStats, TrailSystem};

pub struct ReplayArgs {
    pub script: String,
    pub config: Option<String>,
    pub frames: bool,
    pub fps: f64,
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let config = super::config::load(args.config.as_deref())?;
    let script = ReplayScript::load(Path::new(&args.script)).context("Failed to load replay")?;
    log::info!(
        "Loaded replay {} ({} events over {:.2}s)",
        args.script,
        script.events().len(),
        script.duration()
    );

    let mut system = TrailSystem::new(config).context("Invalid trail configuration")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut write_error = None;

    let stats = script
        .play(&mut system, args.fps, |report| {
            if !args.frames || write_error.is_some() {
                return;
            }
            let line = serde_json::to_string(report)
                .map_err(anyhow::Error::from)
                .and_then(|json| writeln!(out, "{json}").map_err(anyhow::Error::from));
            if let Err(e) = line {
                write_error = Some(e);
            }
        })
        .context("Replay failed")?;

    if let Some(e) = write_error {
        return Err(e.context("Failed to write frame"));
    }

    if !args.frames {
        write!(out, "{}", summary(&args.script, &stats))?;
    }
    Ok(())
}

fn summary(script: &str, stats: &TrailStats) -> String {
    format!(
        "Replayed: {script}\n\
         Accepted moves: {}\n\
         Gated moves:    {}\n\
         Spawned:        {}\n\
         Evicted:        {}\n\
         Completed:      {}\n\
         Peak live:      {}\n\
         Theme changes:  {}\n",
        stats.accepted_moves,
        stats.gated_moves,
        stats.spawned,
        stats.evicted,
        stats.completed,
        stats.peak_live,
        stats.theme_changes,
    )
}
