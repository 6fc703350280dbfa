//! Queue of simulation intents from the UI

use mote_core::{EmitterId, Vec3};
use mote_particles::EmitterConfig;
use mote_scene::ScenarioKind;

/// A mutation requested between ticks
#[derive(Debug, Clone, PartialEq)]
pub enum SimCommand {
    CreateEmitter(EmitterConfig),
    RemoveEmitter(EmitterId),
    ClearAll,
    SetGravity(f32),
    SetWindDirection(Vec3),
    SetWindStrength(f32),
    SetSpeed(f32),
    SetDrawAxis(bool),
    SelectScenario(ScenarioKind),
    /// The active scenario's manual start action
    TriggerScenario,
    Emit { emitter: EmitterId, count: usize },
}

/// Commands waiting for the next tick, held in arrival order
pub struct CommandQueue {
    commands: Vec<SimCommand>,
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Queue `command` behind everything already waiting
    pub fn push(&mut self, command: SimCommand) {
        self.commands.push(command);
    }

    /// Take every waiting command, oldest first, leaving the queue empty
    pub fn drain(&mut self) -> Vec<SimCommand> {
        std::mem::take(&mut self.commands)
    }

    /// True when the next tick has nothing to apply
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_drain() {
        let mut queue = CommandQueue::new();
        assert!(queue.is_empty());

        queue.push(SimCommand::SetGravity(-1.0));
        queue.push(SimCommand::ClearAll);

        assert_eq!(queue.len(), 2);
        assert!(!queue.is_empty());

        let commands = queue.drain();
        assert_eq!(
            commands,
            vec![SimCommand::SetGravity(-1.0), SimCommand::ClearAll]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drain_clears() {
        let mut queue = CommandQueue::new();
        queue.push(SimCommand::TriggerScenario);

        let _ = queue.drain();
        let commands = queue.drain();
        assert!(commands.is_empty());
    }
}
