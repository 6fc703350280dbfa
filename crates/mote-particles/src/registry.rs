//! The set of live emitters in one simulation

use crate::emitter::{Emitter, EmitterConfig};
use crate::field::AmbientField;
use crate::rand::ParticleRng;
use crate::render::{DrawBatch, RenderFrame};
use mote_core::{EmitterId, Result};

/// Insertion-ordered collection of emitters. Insertion order is update and render order.
pub struct EmitterRegistry {
    emitters: Vec<Emitter>,
    next_id: u64,
    seed: u32,
}

impl EmitterRegistry {
    pub fn new() -> Self {
        Self::with_seed(0x5EED_F00D)
    }

    /// Registry whose emitters draw from deterministic per-emitter random streams
    pub fn with_seed(seed: u32) -> Self {
        Self {
            emitters: Vec::new(),
            next_id: 1,
            seed,
        }
    }

    /// Validate `config` and append a new emitter. On error nothing is added.
    pub fn create(&mut self, config: EmitterConfig) -> Result<EmitterId> {
        let id = EmitterId::from_raw(self.next_id);
        let rng = ParticleRng::for_stream(self.seed, id.raw());
        let emitter = Emitter::new(id, config, rng)?;
        self.next_id += 1;

        tracing::debug!(
            emitter = %id,
            name = %emitter.config().name,
            capacity = emitter.config().capacity,
            "created emitter"
        );
        self.emitters.push(emitter);
        Ok(id)
    }

    /// Remove one emitter and its particles. Returns false for an unknown handle.
    pub fn remove(&mut self, id: EmitterId) -> bool {
        let Some(index) = self.emitters.iter().position(|e| e.id() == id) else {
            return false;
        };
        self.emitters.remove(index);
        tracing::debug!(emitter = %id, "removed emitter");
        true
    }

    /// Drop every emitter. All outstanding handles stop resolving.
    pub fn remove_all(&mut self) {
        if !self.emitters.is_empty() {
            tracing::debug!(count = self.emitters.len(), "removing all emitters");
        }
        self.emitters.clear();
    }

    pub fn get(&self, id: EmitterId) -> Option<&Emitter> {
        self.emitters.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: EmitterId) -> Option<&mut Emitter> {
        self.emitters.iter_mut().find(|e| e.id() == id)
    }

    /// Step every emitter in insertion order
    pub fn update_all(&mut self, dt: f32, field: &AmbientField) {
        for emitter in &mut self.emitters {
            emitter.update(dt, field);
        }
    }

    /// Pack all live particles into a fresh frame
    pub fn render_all(&self) -> RenderFrame {
        let mut frame = RenderFrame::new();
        self.render_into(&mut frame);
        frame
    }

    /// Pack all live particles into `frame`, one batch per non-empty emitter.
    /// Existing particle data in `frame` is replaced.
    pub fn render_into(&self, frame: &mut RenderFrame) {
        frame.instances.clear();
        frame.batches.clear();

        for emitter in &self.emitters {
            let start = frame.instances.len();
            emitter.render(&mut frame.instances);
            let count = frame.instances.len() - start;
            if count == 0 {
                continue;
            }
            frame.batches.push(DrawBatch {
                emitter: emitter.id(),
                kind: emitter.config().kind,
                texture: emitter.config().texture.clone(),
                start,
                count,
            });
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Emitter> {
        self.emitters.iter()
    }

    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }

    /// Total live particles across all emitters
    pub fn particle_count(&self) -> usize {
        self.emitters.iter().map(|e| e.alive_count()).sum()
    }
}

impl Default for EmitterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::SpawnMode;
    use crate::particle::ParticleKind;
    use mote_core::{MoteError, Vec3};

    fn manual(capacity: usize) -> EmitterConfig {
        EmitterConfig {
            spawn: SpawnMode::Continuous { rate: 0.0 },
            lifetime: 10.0,
            capacity,
            ..Default::default()
        }
    }

    #[test]
    fn create_returns_distinct_handles() {
        let mut registry = EmitterRegistry::new();
        let a = registry.create(manual(4)).unwrap();
        let b = registry.create(manual(4)).unwrap();
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(a).map(|e| e.id()), Some(a));
    }

    #[test]
    fn invalid_config_has_no_side_effects() {
        let mut registry = EmitterRegistry::new();
        let bad = EmitterConfig {
            velocity_min: Vec3::new(2.0, 0.0, 0.0),
            velocity_max: Vec3::new(1.0, 0.0, 0.0),
            ..Default::default()
        };
        let err = registry.create(bad).unwrap_err();
        assert!(matches!(err, MoteError::InvalidConfig(_)));
        assert!(registry.is_empty());

        // The failed attempt does not consume a handle
        let id = registry.create(manual(1)).unwrap();
        assert_eq!(id.raw(), 1);
    }

    #[test]
    fn update_all_in_insertion_order() {
        let mut registry = EmitterRegistry::new();
        let ids: Vec<_> = (0..3).map(|_| registry.create(manual(8)).unwrap()).collect();
        for (i, id) in ids.iter().enumerate() {
            registry.get_mut(*id).unwrap().emit(i + 1);
        }
        registry.update_all(0.1, &AmbientField::default());

        let order: Vec<_> = registry.iter().map(|e| e.id()).collect();
        assert_eq!(order, ids);
        assert_eq!(registry.particle_count(), 6);
    }

    #[test]
    fn render_all_batches_per_emitter() {
        let mut registry = EmitterRegistry::new();
        let a = registry.create(manual(8)).unwrap();
        let _empty = registry.create(manual(8)).unwrap();
        let c = registry
            .create(EmitterConfig {
                kind: ParticleKind::Sprite,
                texture: "fire_01".into(),
                ..manual(8)
            })
            .unwrap();
        registry.get_mut(a).unwrap().emit(2);
        registry.get_mut(c).unwrap().emit(3);

        let frame = registry.render_all();
        assert_eq!(frame.instances.len(), 5);
        assert_eq!(frame.batches.len(), 2);
        assert_eq!(frame.batches[0].emitter, a);
        assert_eq!(frame.batches[1].emitter, c);
        assert_eq!(frame.batches[1].start, 2);
        assert_eq!(frame.batches[1].texture, "fire_01");
        assert_eq!(frame.batch_instances(&frame.batches[1]).len(), 3);
    }

    #[test]
    fn remove_all_leaves_nothing_to_do() {
        let mut registry = EmitterRegistry::new();
        let ids: Vec<_> = (0..4).map(|_| registry.create(manual(8)).unwrap()).collect();
        for id in &ids {
            registry.get_mut(*id).unwrap().emit(2);
        }
        assert_eq!(registry.particle_count(), 8);

        registry.remove_all();
        registry.update_all(0.1, &AmbientField::default());
        let frame = registry.render_all();

        assert_eq!(registry.iter().count(), 0);
        assert!(frame.instances.is_empty());
        assert!(frame.batches.is_empty());
        assert!(ids.iter().all(|id| registry.get(*id).is_none()));

        // Handles are never reissued after a clear
        let fresh = registry.create(manual(1)).unwrap();
        assert!(!ids.contains(&fresh));
    }

    #[test]
    fn remove_single_emitter() {
        let mut registry = EmitterRegistry::new();
        let a = registry.create(manual(1)).unwrap();
        let b = registry.create(manual(1)).unwrap();
        assert!(registry.remove(a));
        assert!(!registry.remove(a));
        assert_eq!(registry.len(), 1);
        assert!(registry.get(b).is_some());
    }

    #[test]
    fn same_seed_same_particles() {
        let run = || {
            let mut registry = EmitterRegistry::with_seed(7);
            let id = registry.create(EmitterConfig::default()).unwrap();
            registry.update_all(0.05, &AmbientField::default());
            registry
                .get(id)
                .unwrap()
                .particles()
                .iter()
                .map(|p| p.position)
                .collect::<Vec<_>>()
        };
        let first = run();
        assert!(!first.is_empty());
        assert_eq!(first, run());
    }
}
