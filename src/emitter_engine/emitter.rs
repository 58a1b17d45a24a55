use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::emitter_engine::{
    config::EmitterConfig,
    motion::{self, MotionContext},
    particle::Particle,
    particles_pool::ParticlesPool,
    scheduler::{EmissionScheduler, EmitterState},
    spawn::init_particle,
    types::{UpdateResult, Vec2},
    EmitterEngine,
};
use crate::render_sink::RenderSink;

/// Moteur d'un émetteur de particules.
///
/// Possède son pool (capacité = `max_particles`), l'ordonnanceur d'émission et
/// son propre générateur aléatoire : deux émetteurs ne partagent rien et peuvent
/// être mis à jour dans n'importe quel ordre.
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    config: EmitterConfig,
    source_position: Vec2,
    pool: ParticlesPool,
    scheduler: EmissionScheduler,
    rng: StdRng,
}

impl ParticleEmitter {
    /// Construit un émetteur à partir d'une config déjà validée par le chargeur.
    pub fn new(config: EmitterConfig) -> Self {
        Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
    }

    /// Émetteur reproductible, surtout pour les tests et benchmarks.
    pub fn with_seed(config: EmitterConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: EmitterConfig, rng: StdRng) -> Self {
        let scheduler = EmissionScheduler::new(config.emission_rate(), config.duration_limit());

        info!(
            "✨ Emitter created: {:?}, {} particles max, {:.2} particles/s, duration {}",
            config.kind,
            config.max_particles,
            scheduler.emission_rate(),
            config
                .duration_limit()
                .map_or_else(|| "infinite".to_string(), |d| format!("{d:.2}s")),
        );

        Self {
            source_position: config.source_position,
            pool: ParticlesPool::new(config.max_particles),
            scheduler,
            config,
            rng,
        }
    }

    /// Tick sans render sink.
    pub fn update(&mut self, dt: f32) -> UpdateResult<'_> {
        self.update_with_sink(dt, &mut ())
    }

    /// Avance l'émetteur de `dt` secondes.
    ///
    /// 1. l'ordonnanceur décide combien de particules émettre ;
    /// 2. les slots vivants sont parcourus depuis 0 : chaque particule perd `dt`
    ///    de vie, puis est intégrée ou recyclée. Un slot recyclé reçoit l'ancienne
    ///    dernière particule : l'index n'avance *pas* et cette particule est
    ///    traitée dans la même passe. Chaque particule est visitée une fois.
    pub fn update_with_sink<S>(&mut self, dt: f32, sink: &mut S) -> UpdateResult<'_>
    where
        S: RenderSink + ?Sized,
    {
        let emission = self.scheduler.tick(dt, self.pool.free_slots());

        let mut spawned = 0;
        for _ in 0..emission.due {
            if self.spawn_particle() {
                sink.particle_spawned();
                spawned += 1;
            }
        }

        if emission.expired {
            info!(
                "⏹️ Emitter duration of {:.2}s elapsed, emission stopped ({} particles still alive)",
                self.config.duration,
                self.pool.len()
            );
        }

        let ctx = MotionContext::new(&self.config, self.source_position);
        let mut removed = 0;
        let mut index = 0;

        while index < self.pool.len() {
            let particle = &mut self.pool.live_mut()[index];
            particle.time_to_live -= dt;

            if particle.time_to_live > 0.0 {
                motion::integrate(particle, &ctx, dt);
                index += 1;
            } else {
                // on ne fait pas avancer l'index : le slot contient maintenant l'ancienne dernière particule
                self.pool.recycle(index);
                sink.particle_removed(index);
                removed += 1;
            }
        }

        debug_assert!(self.pool.len() <= self.pool.capacity());

        UpdateResult {
            spawned,
            removed,
            particles: self.pool.live(),
        }
    }

    fn spawn_particle(&mut self) -> bool {
        let config = &self.config;
        let source = self.source_position;
        let rng = &mut self.rng;
        self.pool
            .spawn_with(|particle| init_particle(particle, config, source, rng))
    }

    /// Arrête l'émission. Les particules vivantes continuent jusqu'à leur mort.
    pub fn stop(&mut self) {
        self.scheduler.stop();
        debug!("Emitter stopped with {} live particles", self.pool.len());
    }

    /// Relance l'émission de zéro : compteurs remis à 0, particules tuées.
    ///
    /// Les particules tuées sont recyclées (et signalées au render sink) par le
    /// prochain `update`.
    pub fn reset(&mut self) {
        self.scheduler.reset(self.config.emission_rate());
        self.pool.kill_all();
        info!(
            "🔄 Emitter reset ({} particles pending removal)",
            self.pool.len()
        );
    }

    // ---------------------------
    // Accesseurs
    // ---------------------------

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        self.pool.live()
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.pool.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.scheduler.is_active()
    }

    #[inline]
    pub fn state(&self) -> EmitterState {
        self.scheduler.state()
    }

    #[inline]
    pub fn elapsed_time(&self) -> f32 {
        self.scheduler.elapsed_time()
    }

    #[inline]
    pub fn emission_rate(&self) -> f32 {
        self.scheduler.emission_rate()
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub fn memory_footprint(&self) -> usize {
        self.pool.memory_footprint()
    }

    pub fn source_position(&self) -> Vec2 {
        self.source_position
    }

    /// Déplace l'émetteur. Les nouvelles particules naissent autour de la
    /// nouvelle source et les particules radiales l'orbitent dès le tick suivant ;
    /// les particules gravité déjà en vie gardent leur position de départ.
    pub fn set_source_position(&mut self, position: Vec2) {
        self.source_position = position;
    }
}

// ==================================
// Trait EmitterEngine
// ==================================
impl EmitterEngine for ParticleEmitter {
    fn update_with_sink(&mut self, dt: f32, sink: &mut dyn RenderSink) -> UpdateResult<'_> {
        ParticleEmitter::update_with_sink(self, dt, sink)
    }

    fn reset(&mut self) {
        self.reset()
    }

    fn stop(&mut self) {
        self.stop()
    }

    fn is_active(&self) -> bool {
        self.is_active()
    }

    fn particles(&self) -> &[Particle] {
        self.particles()
    }

    fn capacity(&self) -> usize {
        self.capacity()
    }

    fn close(&mut self) {
        self.scheduler.stop();
        self.pool.clear();
        debug!("ParticleEmitter closed.");
    }
}

// ==================================
// Helpers pour tests
// ==================================
#[cfg(any(test, feature = "test_helpers"))]
pub trait EmitterTestHelpers {
    /// Émet une particule tout de suite, sans passer par l'ordonnanceur.
    fn force_spawn(&mut self) -> bool;
    fn particle_mut(&mut self, index: usize) -> Option<&mut Particle>;
    fn emit_counter(&self) -> f32;
    fn set_emit_counter(&mut self, value: f32);
}

#[cfg(any(test, feature = "test_helpers"))]
impl EmitterTestHelpers for ParticleEmitter {
    fn force_spawn(&mut self) -> bool {
        self.spawn_particle()
    }

    fn particle_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.pool.get_mut(index)
    }

    fn emit_counter(&self) -> f32 {
        self.scheduler.emit_counter()
    }

    fn set_emit_counter(&mut self, value: f32) {
        self.scheduler.set_emit_counter(value);
    }
}
