use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Result};
use serde::Serialize;
use tracing::{info, warn};

use glide_core::animator::AnimatorConfigExt;
use glide_core::domain::Domain;
use glide_core::host::ManualScheduler;
use glide_core::plugin::{FrameInfo, Plugin, SettleInfo};
use glide_core::GlideConfig;

use super::{OutputFormat, Rig};
use crate::ViewportArgs;

#[derive(Debug, Serialize)]
struct FrameRecord {
    index: usize,
    time_ms: f64,
    #[serde(flatten)]
    info: FrameInfo,
}

#[derive(Debug, Serialize)]
struct SettleRecord {
    time_ms: f64,
    #[serde(flatten)]
    info: SettleInfo,
}

#[derive(Debug, Serialize)]
struct Report {
    domain: Domain,
    start: f64,
    targets: Vec<f64>,
    frames: Vec<FrameRecord>,
    settles: Vec<SettleRecord>,
    final_position: f64,
    ticks: usize,
    settled: bool,
}

/// Collects frames and settles with the virtual time they happened at
struct Collector {
    clock: ManualScheduler,
    targets: RefCell<Vec<f64>>,
    frames: RefCell<Vec<FrameRecord>>,
    settles: RefCell<Vec<SettleRecord>>,
}

impl Collector {
    fn new(clock: ManualScheduler) -> Self {
        Self {
            clock,
            targets: RefCell::new(Vec::new()),
            frames: RefCell::new(Vec::new()),
            settles: RefCell::new(Vec::new()),
        }
    }
}

impl Plugin for Collector {
    fn name(&self) -> &str {
        "collector"
    }

    fn on_target_change(&self, target: f64) {
        self.targets.borrow_mut().push(target);
    }

    fn on_frame(&self, info: FrameInfo) {
        let mut frames = self.frames.borrow_mut();
        let index = frames.len();
        frames.push(FrameRecord {
            index,
            time_ms: self.clock.now(),
            info,
        });
    }

    fn on_settle(&self, info: SettleInfo) {
        self.settles.borrow_mut().push(SettleRecord {
            time_ms: self.clock.now(),
            info,
        });
    }
}

pub fn run(
    config: &GlideConfig,
    viewport: &ViewportArgs,
    to: Option<f64>,
    impulses: &[f64],
    format: OutputFormat,
    max_frames: usize,
) -> Result<()> {
    if to.is_none() && impulses.is_empty() {
        bail!("Nothing to simulate.\nPass a target with --to or impulses with --impulse.");
    }

    let rig = Rig::new(config, viewport)?;
    let collector = Rc::new(Collector::new(rig.clock.clone()));
    let engine = rig
        .builder(config, viewport)
        .shared_plugin(collector.clone())
        .build();

    engine.seed_initial_position(viewport.from);
    engine.init();
    let start = engine.position();

    if let Some(to) = to {
        engine.scroll_to(to, false);
    }
    for &impulse in impulses {
        engine.apply_impulse(impulse);
    }

    let dt = config.animator.frame_interval().as_secs_f64() * 1000.0;
    let ticks = rig.clock.run_until_idle(dt, max_frames);
    let settled = !engine.is_running();
    if !settled {
        warn!(ticks, "motion still running after the frame limit");
    }
    info!(ticks, position = engine.position(), "simulation finished");
    engine.destroy();

    let report = Report {
        domain: rig.domain,
        start,
        targets: collector.targets.take(),
        frames: collector.frames.take(),
        settles: collector.settles.take(),
        final_position: engine.position(),
        ticks,
        settled,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text(&report),
    }
    Ok(())
}

fn print_text(report: &Report) {
    println!("Domain: {:?}", report.domain);
    println!("Start:  {:.2}", report.start);
    for target in &report.targets {
        println!("Target: {:.2}", target);
    }
    println!();
    println!(
        "{:>6} {:>10} {:>10} {:>10} {:>9} {:>8}",
        "frame", "time(ms)", "position", "target", "velocity", "progress"
    );
    for frame in &report.frames {
        println!(
            "{:>6} {:>10.2} {:>10.2} {:>10.2} {:>9.2} {:>7.1}%",
            frame.index,
            frame.time_ms,
            frame.info.current,
            frame.info.target,
            frame.info.velocity,
            frame.info.progress * 100.0
        );
    }
    println!();
    for settle in &report.settles {
        println!(
            "Settled at {:.2} (target {:.2}) after {:.1} ms",
            settle.info.position, settle.info.target, settle.time_ms
        );
    }
    if !report.settled {
        println!("Still moving after {} ticks", report.ticks);
    }
}
