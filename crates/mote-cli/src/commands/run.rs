//! Run command: fixed-timestep headless simulation

use super::{readout_lines, Tuning};
use anyhow::{bail, Result};
use mote_runtime::SimCommand;
use mote_scene::{ScenarioEvent, ScenarioKind};

pub struct RunArgs {
    pub scenario: Option<ScenarioKind>,
    pub dt: f64,
    pub steps: u32,
    pub report_every: u32,
    pub tuning: Tuning,
}

pub fn run(args: RunArgs) -> Result<()> {
    if !(args.dt.is_finite() && args.dt >= 0.0) {
        bail!("--dt must be a finite value >= 0, got {}", args.dt);
    }

    let mut state = args.tuning.build_state(0.0, args.scenario)?;
    state.push(SimCommand::TriggerScenario);

    println!("Scenario: {}", state.scene.current());
    println!("Timestep: {}s x {} steps", args.dt, args.steps);
    println!();

    for step in 1..=args.steps {
        let report = state.step_fixed(args.dt);
        if let Some(ScenarioEvent::GroundImpact { time }) = report.event {
            println!("[step {step}] ground impact at {time:.3}s");
        }
        if args.report_every > 0 && step % args.report_every == 0 {
            println!(
                "[step {step}] t={:.2}s emitters={} particles={}",
                state.clock.total_time,
                state.registry.len(),
                state.registry.particle_count()
            );
            for line in readout_lines(&state.readout()) {
                println!("    {line}");
            }
        }
    }

    println!();
    println!("Simulated {:.2}s", state.clock.total_time);
    println!("Emitters: {}", state.registry.len());
    println!("Particles: {}", state.registry.particle_count());
    for line in readout_lines(&state.readout()) {
        println!("{line}");
    }

    Ok(())
}
