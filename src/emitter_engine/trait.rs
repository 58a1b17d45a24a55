use crate::emitter_engine::particle::Particle;
use crate::emitter_engine::types::UpdateResult;
use crate::render_sink::RenderSink;

/// 🔧 Trait `EmitterEngine`
///
/// Interface commune aux moteurs d'émission, pour que le simulateur pilote un
/// émetteur sans connaître son implémentation concrète.
///
/// Le render sink est passé en `&mut dyn RenderSink`.
pub trait EmitterEngine {
    /// Met à jour l'émetteur sur un intervalle `dt`, en notifiant `sink`.
    fn update_with_sink(&mut self, dt: f32, sink: &mut dyn RenderSink) -> UpdateResult<'_>;

    /// Met à jour l'émetteur sans render sink.
    fn update(&mut self, dt: f32) -> UpdateResult<'_> {
        self.update_with_sink(dt, &mut ())
    }

    fn reset(&mut self);

    fn stop(&mut self);

    fn is_active(&self) -> bool;

    /// Particules vivantes, `particles()[0..particle_count)`.
    fn particles(&self) -> &[Particle];

    fn capacity(&self) -> usize;

    /// Ferme / libère l'émetteur.
    fn close(&mut self) {} // Par défaut, fait rien.
}
