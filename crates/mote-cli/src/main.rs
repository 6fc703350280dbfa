//! Mote CLI - Command-line interface for the mote particle simulator

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, play, run};
use mote_scene::ScenarioKind;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mote")]
#[command(about = "Particle physics simulator with gravity and wind", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Overrides applied on top of the settings file
#[derive(clap::Args)]
struct TuningArgs {
    /// Path to a settings TOML file
    #[arg(long)]
    config: Option<String>,

    /// Vertical acceleration
    #[arg(long, allow_hyphen_values = true)]
    gravity: Option<f32>,

    /// Wind direction (comma-separated x,y,z)
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    wind: Option<[f32; 3]>,

    /// Wind strength
    #[arg(long)]
    wind_strength: Option<f32>,

    /// Simulation speed multiplier
    #[arg(long, allow_hyphen_values = true)]
    speed: Option<f32>,

    /// Add this many default emitters at the origin
    #[arg(long, default_value = "0")]
    emitters: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario headlessly with a fixed timestep
    Run {
        /// Scenario to select (none, motion); defaults to the settings file's
        #[arg(long)]
        scenario: Option<ScenarioKind>,

        /// Fixed timestep in seconds
        #[arg(long, default_value = "0.1")]
        dt: f64,

        /// Number of steps to simulate
        #[arg(long, default_value = "60")]
        steps: u32,

        /// Print the scenario readout every N steps (0 = only at the end)
        #[arg(long, default_value = "0")]
        report_every: u32,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Run the simulation in real time
    Play {
        /// Stop after this many seconds
        #[arg(long, default_value = "10")]
        seconds: f64,

        /// Scenario to select on startup
        #[arg(long)]
        scenario: Option<ScenarioKind>,

        /// Record a 10 second average frame rate on startup
        #[arg(long)]
        record_fps: bool,

        /// Launch in fullscreen mode
        #[arg(long)]
        fullscreen: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Validate a settings file
    Check {
        /// Path to settings TOML file
        config: String,
    },
}

fn parse_vec3(s: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected 3 comma-separated values, got {}", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let y: f32 = parts[1].trim().parse().map_err(|e| format!("invalid y: {}", e))?;
    let z: f32 = parts[2].trim().parse().map_err(|e| format!("invalid z: {}", e))?;
    Ok([x, y, z])
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario,
            dt,
            steps,
            report_every,
            tuning,
        } => run::run(run::RunArgs {
            scenario,
            dt,
            steps,
            report_every,
            tuning: tuning.into(),
        }),
        Commands::Play {
            seconds,
            scenario,
            record_fps,
            fullscreen,
            tuning,
        } => play::run(play::PlayArgs {
            seconds,
            scenario,
            record_fps,
            fullscreen,
            tuning: tuning.into(),
        }),
        Commands::Check { config } => check::run(&config),
    }
}

impl From<TuningArgs> for commands::Tuning {
    fn from(args: TuningArgs) -> Self {
        Self {
            config: args.config,
            gravity: args.gravity,
            wind: args.wind,
            wind_strength: args.wind_strength,
            speed: args.speed,
            emitters: args.emitters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vec3_accepts_spaces() {
        assert_eq!(parse_vec3("1, -2.5,3").unwrap(), [1.0, -2.5, 3.0]);
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("a,b,c").is_err());
    }

    #[test]
    fn cli_parses_run() {
        let cli = Cli::try_parse_from([
            "mote", "run", "--scenario", "motion", "--dt", "0.05", "--gravity", "-3",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                scenario,
                dt,
                tuning,
                ..
            } => {
                assert_eq!(scenario, Some(ScenarioKind::Motion));
                assert_eq!(dt, 0.05);
                assert_eq!(tuning.gravity, Some(-3.0));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn cli_rejects_unknown_scenario() {
        assert!(Cli::try_parse_from(["mote", "run", "--scenario", "tornado"]).is_err());
    }
}
