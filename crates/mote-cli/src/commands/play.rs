//! Play command: real-time simulation loop

use super::{readout_lines, Tuning};
use anyhow::{bail, Result};
use mote_particles::RenderFrame;
use mote_runtime::{MonotonicTime, SimCommand, TimeSource};
use mote_scene::ScenarioKind;
use std::time::Duration;

const FRAME_BUDGET: Duration = Duration::from_micros(16_667);
const STATUS_INTERVAL: f64 = 1.0;

pub struct PlayArgs {
    pub seconds: f64,
    pub scenario: Option<ScenarioKind>,
    pub record_fps: bool,
    pub fullscreen: bool,
    pub tuning: Tuning,
}

pub fn run(args: PlayArgs) -> Result<()> {
    if !(args.seconds.is_finite() && args.seconds >= 0.0) {
        bail!("--seconds must be a finite value >= 0, got {}", args.seconds);
    }
    if args.fullscreen {
        tracing::info!("no window backend; --fullscreen has no effect");
    }

    let time = MonotonicTime::new();
    let mut state = args.tuning.build_state(time.now(), args.scenario)?;
    state.push(SimCommand::TriggerScenario);
    if args.record_fps {
        state.stats.start_recording(time.now());
    }

    println!("Playing for {:.1}s (scenario: {})", args.seconds, state.scene.current());

    let mut frame = RenderFrame::new();
    let mut next_status = STATUS_INTERVAL;
    loop {
        let frame_start = time.now();
        if frame_start >= args.seconds {
            break;
        }

        let report = state.step(frame_start);
        state.render_into(&mut frame);

        if frame_start >= next_status {
            next_status += STATUS_INTERVAL;
            tracing::info!(
                sim_time = format_args!("{:.2}", state.clock.total_time),
                dt = format_args!("{:.4}", report.dt),
                emitters = state.registry.len(),
                particles = frame.instances.len(),
                batches = frame.batches.len(),
                fps = format_args!("{:.1}", state.stats.fps()),
                "status"
            );
        }

        let spent = Duration::from_secs_f64((time.now() - frame_start).max(0.0));
        if let Some(rest) = FRAME_BUDGET.checked_sub(spent) {
            std::thread::sleep(rest);
        }
    }

    println!();
    println!("Simulated {:.2}s over {} frames", state.clock.total_time, state.stats.frames);
    println!("Particles: {}", state.registry.particle_count());
    match state.stats.average_fps() {
        Some(avg) => println!("10 second FPS avg: {avg:.2} fps"),
        None if state.stats.is_recording() => println!("FPS recording did not finish"),
        None => {}
    }
    for line in readout_lines(&state.readout()) {
        println!("{line}");
    }
    Ok(())
}
