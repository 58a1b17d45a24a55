/// État de l'émission.
///
/// `Stopped` est atteint par un arrêt explicite ou à l'expiration de la
/// durée configurée ; seul un `reset` ramène à `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitterState {
    #[default]
    Active,
    Stopped,
}

/// Résultat d'un tick de l'ordonnanceur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Emission {
    /// Particules à émettre ce tick, jamais plus que les slots libres
    pub due: usize,
    /// La durée configurée a expiré pendant ce tick
    pub expired: bool,
}

/// Accumulateur du taux d'émission et horloge de l'émetteur.
///
/// # Rôle
/// L'accumulateur fractionnaire garde une cadence d'émission indépendante des
/// variations de frame rate ; la capacité du pool la borne.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionScheduler {
    state: EmitterState,
    elapsed_time: f32,
    emit_counter: f32,
    emission_rate: f32,
    duration: Option<f32>,
}

impl EmissionScheduler {
    /// `emission_rate` en particules par seconde, `duration` en secondes (`None` = sans fin).
    pub fn new(emission_rate: f32, duration: Option<f32>) -> Self {
        Self {
            state: EmitterState::Active,
            elapsed_time: 0.0,
            emit_counter: 0.0,
            emission_rate,
            duration,
        }
    }

    pub fn tick(&mut self, dt: f32, free_slots: usize) -> Emission {
        let mut emission = Emission::default();
        if self.state != EmitterState::Active || self.emission_rate <= 0.0 {
            return emission;
        }

        let rate = self.emission_rate.recip();

        // Pas d'accumulation tant que le pool est plein
        if free_slots > 0 {
            self.emit_counter += dt;
        }

        while emission.due < free_slots && self.emit_counter > rate {
            emission.due += 1;
            self.emit_counter -= rate;
        }

        self.elapsed_time += dt;

        if let Some(duration) = self.duration {
            if duration < self.elapsed_time {
                self.stop();
                emission.expired = true;
            }
        }

        emission
    }

    pub fn stop(&mut self) {
        self.state = EmitterState::Stopped;
        self.elapsed_time = 0.0;
        self.emit_counter = 0.0;
    }

    pub fn reset(&mut self, emission_rate: f32) {
        self.state = EmitterState::Active;
        self.elapsed_time = 0.0;
        self.emit_counter = 0.0;
        self.emission_rate = emission_rate;
    }

    #[inline]
    pub fn state(&self) -> EmitterState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == EmitterState::Active
    }

    #[inline]
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    #[inline]
    pub fn emit_counter(&self) -> f32 {
        self.emit_counter
    }

    #[inline]
    pub fn emission_rate(&self) -> f32 {
        self.emission_rate
    }

    #[cfg(any(test, feature = "test_helpers"))]
    pub(crate) fn set_emit_counter(&mut self, value: f32) {
        self.emit_counter = value;
    }
}
