#[cfg(debug_assertions)]
use log::debug;

use crate::emitter_engine::particle::Particle;

/// Pool de particules à capacité fixe.
///
/// # Rôle
/// Un seul `Vec<Particle>` alloué une fois pour toutes, plus un curseur
/// `count` : les slots `[0, count)` sont vivants et contigus, les suivants
/// sont périmés et seront écrasés au prochain spawn.
///
/// La suppression recopie la dernière particule vivante dans le slot libéré
/// (swap-remove) : **O(1)**, mais l'ordre des particules n'est pas conservé.
/// Les particules n'ont donc aucune identité stable en dehors de leur index.
#[derive(Debug, Clone)]
pub struct ParticlesPool {
    particles: Vec<Particle>,
    count: usize,
}

impl ParticlesPool {
    pub fn new(capacity: usize) -> Self {
        #[cfg(debug_assertions)]
        debug!(
            "ParticlesPool initialized with {} slots ({} bytes)",
            capacity,
            capacity * std::mem::size_of::<Particle>()
        );

        Self {
            particles: vec![Particle::default(); capacity],
            count: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.particles.len()
    }

    #[inline]
    pub fn free_slots(&self) -> usize {
        self.particles.len() - self.count
    }

    /// Octets réservés par le pool, slots vivants ou non.
    pub fn memory_footprint(&self) -> usize {
        self.particles.len() * std::mem::size_of::<Particle>()
    }

    /// Initialise le slot `count` avec `init` puis l'ajoute aux particules vivantes.
    ///
    /// Retourne `false` (sans rien faire) si le pool est plein.
    pub fn spawn_with<F>(&mut self, init: F) -> bool
    where
        F: FnOnce(&mut Particle),
    {
        if self.is_full() {
            return false;
        }

        init(&mut self.particles[self.count]);
        self.count += 1;
        true
    }

    /// Retire la particule `index` en recopiant la dernière particule vivante à sa place.
    ///
    /// # Panics
    /// Si `index` n'est pas un slot vivant : c'est un bug de l'appelant.
    pub fn recycle(&mut self, index: usize) {
        assert!(
            index < self.count,
            "recycle({index}) outside live range [0, {})",
            self.count
        );

        let last = self.count - 1;
        if index != last {
            self.particles[index] = self.particles[last];
        }
        self.count = last;
    }

    /// Marque toutes les particules vivantes comme mortes.
    ///
    /// Elles restent dans le pool jusqu'au prochain passage du tick driver,
    /// qui les recycle (et notifie le render sink) normalement.
    pub fn kill_all(&mut self) {
        self.live_mut().iter_mut().for_each(Particle::kill);
    }

    /// Vide le pool sans notifier personne : le curseur repasse à 0.
    ///
    /// Réservé à la fermeture de l'émetteur ; l'appelant se charge du render sink.
    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Accès immuable aux particules vivantes.
    #[inline]
    pub fn live(&self) -> &[Particle] {
        &self.particles[..self.count]
    }

    /// Accès mutable aux particules vivantes.
    #[inline]
    pub fn live_mut(&mut self) -> &mut [Particle] {
        &mut self.particles[..self.count]
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.live().get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.live_mut().get_mut(index)
    }
}
