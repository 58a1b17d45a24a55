/// Récepteur des notifications de cycle de vie du pool.
///
/// Les deux méthodes sont appelées de façon synchrone, pendant le tick de
/// l'émetteur : elles doivent rester peu coûteuses.
///
/// - `particle_spawned` : une particule vient d'être ajoutée au dernier index vivant.
/// - `particle_removed` : le slot `index` contient désormais une autre particule,
///   ou n'est plus vivant si `index` est égal au nouveau nombre de particules.
pub trait RenderSink {
    fn particle_spawned(&mut self);
    fn particle_removed(&mut self, index: usize);
}

/// Null sink: ignore toutes les notifications.
impl RenderSink for () {
    #[inline(always)]
    fn particle_spawned(&mut self) {}

    #[inline(always)]
    fn particle_removed(&mut self, _index: usize) {}
}

/// Adapte une paire de closures en [`RenderSink`].
pub struct CallbackSink<S, R>
where
    S: FnMut(),
    R: FnMut(usize),
{
    on_spawned: S,
    on_removed: R,
}

impl<S, R> CallbackSink<S, R>
where
    S: FnMut(),
    R: FnMut(usize),
{
    pub fn new(on_spawned: S, on_removed: R) -> Self {
        Self {
            on_spawned,
            on_removed,
        }
    }
}

impl<S, R> RenderSink for CallbackSink<S, R>
where
    S: FnMut(),
    R: FnMut(usize),
{
    #[inline]
    fn particle_spawned(&mut self) {
        (self.on_spawned)();
    }

    #[inline]
    fn particle_removed(&mut self, index: usize) {
        (self.on_removed)(index);
    }
}
