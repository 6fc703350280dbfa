//! Mote Runtime - per-tick simulation driver
//!
//! Provides the building blocks of the frame loop:
//! - `SimulationClock` / `TimeSource`: scaled delta time from a monotonic clock
//! - `SimCommand` / `CommandQueue`: UI intents applied between ticks
//! - `SimulationSettings`: TOML-loaded tunables and startup emitters
//! - `FrameStats`: frame time, FPS and the 10 second average
//! - `SimulationState`: owns everything and runs one tick at a time

mod clock;
mod command;
mod settings;
mod state;
mod stats;

pub use clock::{ManualTime, MonotonicTime, SimulationClock, TimeSource};
pub use command::{CommandQueue, SimCommand};
pub use settings::SimulationSettings;
pub use state::{SimulationState, StepReport};
pub use stats::FrameStats;
