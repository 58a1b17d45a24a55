use crate::emitter_engine::types::{Color, Vec2};

/// Une particule simulée.
///
/// # Rôle
/// Pas d'identité en dehors du slot du pool qu'elle occupe : le recyclage
/// recopie la dernière particule vivante sur la morte. Chaque champ `*_delta`
/// est un taux par seconde calculé une fois au spawn, pour que le champ
/// atteigne sa valeur finale quand `time_to_live` arrive à zéro.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Vitesse (émetteurs gravité uniquement)
    pub direction: Vec2,
    /// Point de référence du modèle gravité
    pub start_pos: Vec2,

    pub color: Color,
    pub delta_color: Color,

    /// Degrés
    pub rotation: f32,
    pub rotation_delta: f32,

    pub radial_acceleration: f32,
    pub tangential_acceleration: f32,

    // Émetteurs radiaux
    pub radius: f32,
    pub radius_delta: f32,
    /// Radians
    pub angle: f32,
    /// Vitesse angulaire, en radians par seconde malgré le nom
    pub degrees_per_second: f32,

    pub size: f32,
    pub size_delta: f32,

    /// Secondes restantes avant recyclage
    pub time_to_live: f32,
}

impl Particle {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.time_to_live > 0.0
    }

    /// Force la mort de la particule au prochain passage du tick driver.
    #[inline]
    pub fn kill(&mut self) {
        self.time_to_live = 0.0;
    }
}
