//! Check command: validate a settings file without running it

use anyhow::{Context, Result};
use mote_particles::EmitterConfig;
use mote_runtime::SimulationSettings;

pub fn run(path: &str) -> Result<()> {
    let settings =
        SimulationSettings::load(path).with_context(|| format!("Failed to load {path}"))?;
    let configs = settings
        .emitter_configs()
        .with_context(|| format!("Invalid emitter in {path}"))?;
    let scenario = settings
        .scenario_kind()
        .with_context(|| format!("Invalid scenario in {path}"))?;

    println!("Settings: {path}");
    println!(
        "  gravity={} wind={:?} wind_strength={} speed={}",
        settings.gravity, settings.wind_direction, settings.wind_strength, settings.speed
    );
    if let Some(kind) = scenario {
        println!("  scenario: {kind}");
    }
    println!("  {} emitter(s)", configs.len());
    for config in &configs {
        println!("    {}", describe_emitter(config));
    }
    println!("OK");
    Ok(())
}

/// One-line summary of an emitter for the check listing
fn describe_emitter(config: &EmitterConfig) -> String {
    format!(
        "{}: {} at {}, {:?}, lifetime {}s, capacity {}",
        config.name,
        config.kind.name(),
        super::format_vec3(config.origin),
        config.spawn,
        config.lifetime,
        config.capacity
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mote_particles::SpawnMode;

    #[test]
    fn emitter_summary_line() {
        let config = EmitterConfig {
            name: "burst".to_string(),
            spawn: SpawnMode::OneShot { count: 5, rate: 0.0 },
            capacity: 5,
            ..Default::default()
        };
        assert_eq!(
            describe_emitter(&config),
            "burst: point at (0.00, 0.00, 0.00), OneShot { count: 5, rate: 0.0 }, lifetime 4s, capacity 5"
        );
    }
}
