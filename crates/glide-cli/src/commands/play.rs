use std::time::Instant;

use anyhow::Result;
use tracing::info;

use glide_core::GlideConfig;
use glide_hosts::{FramePump, TracePlugin};

use super::Rig;
use crate::ViewportArgs;

const BAR_WIDTH: usize = 50;

pub async fn run(config: &GlideConfig, viewport: &ViewportArgs, to: f64, trace: bool) -> Result<()> {
    let rig = Rig::new(config, viewport)?;
    let mut builder = rig.builder(config, viewport);
    if trace {
        builder = builder.plugin(TracePlugin::new("play"));
    }
    let engine = builder.build();

    engine.seed_initial_position(viewport.from);
    engine.init();

    let domain = rig.domain;
    let started = Instant::now();
    let printer = engine.on_change(move |position, origin| {
        let filled = (domain.progress(position) * BAR_WIDTH as f64).round() as usize;
        println!(
            "{:>8.1} ms  {:>10.2}  [{}{}] {:?}",
            started.elapsed().as_secs_f64() * 1000.0,
            position,
            "#".repeat(filled),
            " ".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
            origin
        );
    });

    engine.scroll_to(to, false);
    let pump = FramePump::with_frame_rate(rig.clock.clone(), config.animator.frame_rate);
    let frames = pump.run_until_idle().await;

    printer.unsubscribe();
    info!(
        frames,
        position = engine.position(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "playback finished"
    );
    engine.destroy();
    Ok(())
}
