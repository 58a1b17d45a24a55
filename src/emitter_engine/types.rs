use crate::emitter_engine::particle::Particle;

pub use glam::{Vec2, Vec4 as Color};

// ------------------------
// UpdateResult
// ------------------------

/// Ce qui s'est passé pendant un tick d'émetteur.
#[derive(Debug, Clone, Copy)]
pub struct UpdateResult<'a> {
    /// Particules créées par l'ordonnanceur pendant ce tick
    pub spawned: usize,
    /// Particules recyclées (durée de vie écoulée ou mort radiale)
    pub removed: usize,
    /// Particules vivantes après compaction, dans l'ordre des slots
    pub particles: &'a [Particle],
}

impl UpdateResult<'_> {
    #[inline]
    pub fn live_count(&self) -> usize {
        self.particles.len()
    }
}
