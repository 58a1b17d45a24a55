use generational_arena::{Arena, Index};
use log::{debug, info};

use crate::emitter_engine::emitter::ParticleEmitter;
use crate::emitter_engine::types::Vec2;

/// Compteurs cumulés d'un appel à [`EmitterSet::update_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetUpdateStats {
    pub spawned: usize,
    pub removed: usize,
    pub live: usize,
}

/// Registre d'émetteurs indépendants.
///
/// Les émetteurs sont stockés dans une `Arena` générationnelle : un `Index`
/// obtenu avant la suppression d'un émetteur ne désigne jamais l'émetteur qui
/// réutilise son slot.
///
/// `order` garde l'ordre d'insertion pour `next_emitter`, qui fait défiler les
/// émetteurs un par un (comme une scène de démo qui passe au preset suivant).
#[derive(Debug, Default)]
pub struct EmitterSet {
    emitters: Arena<ParticleEmitter>,
    order: Vec<Index>,
    current: Option<usize>,
}

impl EmitterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            emitters: Arena::with_capacity(n),
            order: Vec::with_capacity(n),
            current: None,
        }
    }

    pub fn insert(&mut self, emitter: ParticleEmitter) -> Index {
        let idx = self.emitters.insert(emitter);
        self.order.push(idx);
        debug!("Emitter {:?} registered ({} total)", idx, self.order.len());
        idx
    }

    pub fn remove(&mut self, idx: Index) -> Option<ParticleEmitter> {
        let emitter = self.emitters.remove(idx)?;

        if let Some(pos) = self.order.iter().position(|&i| i == idx) {
            self.order.remove(pos);
            // garde `current` sur le même émetteur, ou l'invalide
            self.current = match self.current {
                Some(c) if c == pos => None,
                Some(c) if c > pos => Some(c - 1),
                other => other,
            };
        }
        Some(emitter)
    }

    #[inline]
    pub fn get(&self, idx: Index) -> Option<&ParticleEmitter> {
        self.emitters.get(idx)
    }

    #[inline]
    pub fn get_mut(&mut self, idx: Index) -> Option<&mut ParticleEmitter> {
        self.emitters.get_mut(idx)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }

    /// Émetteurs dans l'ordre d'insertion.
    pub fn iter(&self) -> impl Iterator<Item = (Index, &ParticleEmitter)> + '_ {
        self.order
            .iter()
            .filter_map(move |&idx| self.emitters.get(idx).map(|e| (idx, e)))
    }

    /// Met à jour tous les émetteurs (sans render sink).
    pub fn update_all(&mut self, dt: f32) -> SetUpdateStats {
        self.emitters
            .iter_mut()
            .fold(SetUpdateStats::default(), |mut stats, (_, emitter)| {
                let result = emitter.update(dt);
                stats.spawned += result.spawned;
                stats.removed += result.removed;
                stats.live += result.live_count();
                stats
            })
    }

    pub fn reset_all(&mut self) {
        for (_, emitter) in self.emitters.iter_mut() {
            emitter.reset();
        }
    }

    pub fn stop_all(&mut self) {
        for (_, emitter) in self.emitters.iter_mut() {
            emitter.stop();
        }
    }

    pub fn total_particles(&self) -> usize {
        self.emitters.iter().map(|(_, e)| e.particle_count()).sum()
    }

    /// Émetteur actuellement sélectionné par `next_emitter`.
    pub fn current(&self) -> Option<Index> {
        self.current.and_then(|pos| self.order.get(pos).copied())
    }

    /// Sélectionne l'émetteur suivant (en bouclant), le réinitialise et le
    /// recentre sur `source`.
    pub fn next_emitter(&mut self, source: Vec2) -> Option<Index> {
        if self.order.is_empty() {
            self.current = None;
            return None;
        }

        let pos = self.current.map_or(0, |c| (c + 1) % self.order.len());
        self.current = Some(pos);

        let idx = self.order[pos];
        if let Some(emitter) = self.emitters.get_mut(idx) {
            emitter.reset();
            emitter.set_source_position(source);
            info!("▶️ Showing emitter {}/{}", pos + 1, self.order.len());
        }
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter_engine::config::EmitterConfigBuilder;

    fn emitter(max_particles: usize, seed: u64) -> ParticleEmitter {
        let config = EmitterConfigBuilder::default()
            .max_particles(max_particles)
            .particle_lifespan(1.0)
            .particle_lifespan_variance(0.0)
            .build()
            .unwrap();
        ParticleEmitter::with_seed(config, seed)
    }

    #[test]
    fn test_update_all_aggregates() {
        let mut set = EmitterSet::new();
        set.insert(emitter(10, 1));
        set.insert(emitter(20, 2));

        let mut total = SetUpdateStats::default();
        for _ in 0..8 {
            let stats = set.update_all(0.125);
            total.spawned += stats.spawned;
            total.live = stats.live;
        }

        assert!(total.spawned > 0);
        assert_eq!(total.live, set.total_particles());
        assert!(set.total_particles() <= 30);
    }

    #[test]
    fn test_removed_index_is_stale() {
        let mut set = EmitterSet::new();
        let a = set.insert(emitter(5, 1));
        let b = set.insert(emitter(5, 2));

        assert!(set.remove(a).is_some());
        assert!(set.get(a).is_none());
        assert!(set.remove(a).is_none());

        let c = set.insert(emitter(5, 3));
        assert_ne!(a, c);
        assert!(set.get(a).is_none());
        assert_eq!(set.len(), 2);

        let order: Vec<Index> = set.iter().map(|(i, _)| i).collect();
        assert_eq!(order, vec![b, c]);
    }

    #[test]
    fn test_next_emitter_cycles_and_resets() {
        let mut set = EmitterSet::new();
        let a = set.insert(emitter(5, 1));
        let b = set.insert(emitter(5, 2));

        set.stop_all();
        assert!(set.iter().all(|(_, e)| !e.is_active()));

        let center = Vec2::new(320.0, 240.0);
        assert_eq!(set.next_emitter(center), Some(a));
        assert_eq!(set.next_emitter(center), Some(b));
        assert_eq!(set.next_emitter(center), Some(a));
        assert_eq!(set.current(), Some(a));

        let shown = set.get(a).unwrap();
        assert!(shown.is_active());
        assert_eq!(shown.source_position(), center);
    }

    #[test]
    fn test_remove_keeps_current_selection() {
        let mut set = EmitterSet::new();
        let a = set.insert(emitter(5, 1));
        let b = set.insert(emitter(5, 2));
        let _c = set.insert(emitter(5, 3));

        set.next_emitter(Vec2::ZERO);
        set.next_emitter(Vec2::ZERO);
        assert_eq!(set.current(), Some(b));

        set.remove(a);
        assert_eq!(set.current(), Some(b));

        set.remove(b);
        assert_eq!(set.current(), None);
    }

    #[test]
    fn test_next_emitter_on_empty_set() {
        let mut set = EmitterSet::with_capacity(4);
        assert!(set.is_empty());
        assert_eq!(set.next_emitter(Vec2::ZERO), None);
        assert_eq!(set.current(), None);
    }
}
