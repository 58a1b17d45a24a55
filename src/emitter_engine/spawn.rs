//! Initialisation d'une particule au moment du spawn.
//!
//! Chaque champ stochastique vaut `base + variance × U(-1, 1)`. Les taux
//! (`*_delta`) sont calculés une seule fois ici, l'intégration n'a plus qu'à
//! les accumuler.

use rand::Rng;

use crate::emitter_engine::config::EmitterConfig;
use crate::emitter_engine::particle::Particle;
use crate::emitter_engine::types::{Color, Vec2};

/// Tirage uniforme dans `[-1, 1]`.
#[inline(always)]
pub fn random_minus1_to_1(rng: &mut impl Rng) -> f32 {
    rng.random_range(-1.0..=1.0)
}

#[inline(always)]
fn vary(rng: &mut impl Rng, base: f32, variance: f32) -> f32 {
    base + variance * random_minus1_to_1(rng)
}

#[inline(always)]
fn vary_color(rng: &mut impl Rng, base: Color, variance: Color) -> Color {
    Color::new(
        vary(rng, base.x, variance.x),
        vary(rng, base.y, variance.y),
        vary(rng, base.z, variance.z),
        vary(rng, base.w, variance.w),
    )
}

/// Écrase `particle` avec une particule neuve émise depuis `source`.
///
/// Un tirage de durée de vie non positif est ramené à zéro : la particule
/// reçoit des taux nuls (pas de division par zéro) et meurt à son premier tick.
pub fn init_particle(
    particle: &mut Particle,
    config: &EmitterConfig,
    source: Vec2,
    rng: &mut impl Rng,
) {
    let position = Vec2::new(
        vary(rng, source.x, config.source_position_variance.x),
        vary(rng, source.y, config.source_position_variance.y),
    );

    let direction_angle = vary(rng, config.angle, config.angle_variance).to_radians();
    let speed = vary(rng, config.speed, config.speed_variance);
    let direction = Vec2::from_angle(direction_angle) * speed;

    let time_to_live = vary(
        rng,
        config.particle_lifespan,
        config.particle_lifespan_variance,
    )
    .max(0.0);
    // Taux par seconde ; nul si la particule naît morte
    let inv_life = if time_to_live > 0.0 {
        time_to_live.recip()
    } else {
        0.0
    };

    let radius = vary(rng, config.max_radius, config.max_radius_variance);
    let orbit_angle = vary(rng, config.angle, config.angle_variance).to_radians();
    let degrees_per_second = vary(
        rng,
        config.rotate_per_second,
        config.rotate_per_second_variance,
    )
    .to_radians();

    let radial_acceleration = vary(
        rng,
        config.radial_acceleration,
        config.radial_accel_variance,
    );
    let tangential_acceleration = vary(
        rng,
        config.tangential_acceleration,
        config.tangential_accel_variance,
    );

    let start_size = vary(
        rng,
        config.start_particle_size,
        config.start_particle_size_variance,
    );
    let finish_size = vary(
        rng,
        config.finish_particle_size,
        config.finish_particle_size_variance,
    );

    let start_color = vary_color(rng, config.start_color, config.start_color_variance);
    let finish_color = vary_color(rng, config.finish_color, config.finish_color_variance);

    let start_rotation = vary(rng, config.rotation_start, config.rotation_start_variance);
    let end_rotation = vary(rng, config.rotation_end, config.rotation_end_variance);

    *particle = Particle {
        position,
        direction,
        start_pos: source,
        color: start_color,
        delta_color: (finish_color - start_color) * inv_life,
        rotation: start_rotation,
        rotation_delta: (end_rotation - start_rotation) * inv_life,
        radial_acceleration,
        tangential_acceleration,
        radius,
        // Le rayon décroît de max_radius sur toute la vie, quel que soit le tirage
        radius_delta: config.max_radius * inv_life,
        angle: orbit_angle,
        degrees_per_second,
        size: start_size.max(0.0),
        size_delta: (finish_size - start_size) * inv_life,
        time_to_live,
    };
}
