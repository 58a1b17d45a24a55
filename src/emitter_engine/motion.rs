//! Intégration d'une particule vivante, à chaque tick.
//!
//! Deux modèles de mouvement, choisis par [`EmitterKind`]. Les deux intègrent
//! en Euler explicite avec le delta de la frame.

use crate::emitter_engine::config::{EmitterConfig, EmitterKind};
use crate::emitter_engine::particle::Particle;
use crate::emitter_engine::types::Vec2;

/// Valeurs de l'émetteur lues par les intégrateurs à chaque tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionContext {
    pub kind: EmitterKind,
    pub source: Vec2,
    pub gravity: Vec2,
    pub min_radius: f32,
}

impl MotionContext {
    pub fn new(config: &EmitterConfig, source: Vec2) -> Self {
        Self {
            kind: config.kind,
            source,
            gravity: config.gravity,
            min_radius: config.min_radius,
        }
    }
}

/// Avance une particule vivante de `dt` secondes.
#[inline]
pub fn integrate(particle: &mut Particle, ctx: &MotionContext, dt: f32) {
    match ctx.kind {
        EmitterKind::Radial => integrate_radial(particle, ctx.source, ctx.min_radius, dt),
        EmitterKind::Gravity => integrate_gravity(particle, ctx.gravity, dt),
    }
    advance_appearance(particle, dt);
}

/// Orbite autour de `source`, rayon décroissant.
///
/// Passer sous `min_radius` tue la particule ; le tick driver la recycle à
/// son prochain passage.
#[inline(always)]
pub fn integrate_radial(particle: &mut Particle, source: Vec2, min_radius: f32, dt: f32) {
    particle.angle += particle.degrees_per_second * dt;
    particle.radius -= particle.radius_delta * dt;

    particle.position = source - Vec2::from_angle(particle.angle) * particle.radius;

    if particle.radius < min_radius {
        particle.kill();
    }
}

/// Intégration de la vitesse : gravité plus accélérations radiale et
/// tangentielle, relatives à la position de départ de la particule.
#[inline(always)]
pub fn integrate_gravity(particle: &mut Particle, gravity: Vec2, dt: f32) {
    let offset = particle.start_pos;
    let relative = particle.position - offset;

    // Vecteur radial nul à l'origine
    let radial = relative.normalize_or_zero();
    let tangential = radial.perp() * particle.tangential_acceleration;
    let radial = radial * particle.radial_acceleration;

    particle.direction += (radial + tangential + gravity) * dt;
    particle.position = relative + particle.direction * dt + offset;
}

/// Couleur, taille et rotation suivent leurs taux précalculés.
///
/// La couleur n'est pas bornée ; la taille ne descend jamais sous zéro.
#[inline(always)]
pub fn advance_appearance(particle: &mut Particle, dt: f32) {
    particle.color += particle.delta_color * dt;
    particle.size = (particle.size + particle.size_delta * dt).max(0.0);
    particle.rotation += particle.rotation_delta * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter_engine::types::Color;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_gravity_only_is_forward_euler() {
        let mut p = Particle {
            position: Vec2::new(5.0, 5.0),
            start_pos: Vec2::new(5.0, 5.0),
            direction: Vec2::new(1.0, 0.0),
            time_to_live: 1.0,
            ..Default::default()
        };

        integrate_gravity(&mut p, Vec2::new(0.0, -10.0), 0.5);

        // v = (1, -5), x = (5.5, 2.5)
        assert!((p.direction - Vec2::new(1.0, -5.0)).length() < EPS);
        assert!((p.position - Vec2::new(5.5, 2.5)).length() < EPS);
    }

    #[test]
    fn test_radial_acceleration_pushes_away_from_start() {
        let mut p = Particle {
            position: Vec2::new(12.0, 10.0),
            start_pos: Vec2::new(10.0, 10.0),
            radial_acceleration: 4.0,
            ..Default::default()
        };

        integrate_gravity(&mut p, Vec2::ZERO, 1.0);

        assert!((p.direction - Vec2::new(4.0, 0.0)).length() < EPS);
        assert!((p.position - Vec2::new(16.0, 10.0)).length() < EPS);
    }

    #[test]
    fn test_tangential_acceleration_is_perpendicular() {
        let mut p = Particle {
            position: Vec2::new(1.0, 0.0),
            start_pos: Vec2::ZERO,
            tangential_acceleration: 2.0,
            ..Default::default()
        };

        integrate_gravity(&mut p, Vec2::ZERO, 1.0);

        // radial (1, 0) tourné de 90° -> (0, 1)
        assert!((p.direction - Vec2::new(0.0, 2.0)).length() < EPS);
    }

    #[test]
    fn test_accelerations_vanish_at_start_position() {
        let mut p = Particle {
            position: Vec2::new(3.0, 3.0),
            start_pos: Vec2::new(3.0, 3.0),
            radial_acceleration: 100.0,
            tangential_acceleration: 100.0,
            ..Default::default()
        };

        integrate_gravity(&mut p, Vec2::ZERO, 0.1);

        assert_eq!(p.direction, Vec2::ZERO);
        assert_eq!(p.position, Vec2::new(3.0, 3.0));
        assert!(p.position.is_finite());
    }

    #[test]
    fn test_radial_orbit_position() {
        let source = Vec2::new(100.0, 100.0);
        let mut p = Particle {
            radius: 50.0,
            radius_delta: 10.0,
            angle: 0.0,
            degrees_per_second: std::f32::consts::FRAC_PI_2,
            time_to_live: 5.0,
            ..Default::default()
        };

        integrate_radial(&mut p, source, 0.0, 1.0);

        assert!((p.angle - std::f32::consts::FRAC_PI_2).abs() < EPS);
        assert!((p.radius - 40.0).abs() < EPS);
        // source - 40 * (cos 90°, sin 90°)
        assert!((p.position - Vec2::new(100.0, 60.0)).length() < EPS);
        assert!(p.is_alive());
    }

    #[test]
    fn test_radial_death_below_min_radius() {
        let mut p = Particle {
            radius: 10.0,
            radius_delta: 8.0,
            time_to_live: 5.0,
            ..Default::default()
        };

        integrate_radial(&mut p, Vec2::ZERO, 5.0, 0.5);
        assert!(p.is_alive(), "radius 6 is still above 5");

        integrate_radial(&mut p, Vec2::ZERO, 5.0, 0.5);
        assert!(!p.is_alive(), "radius 2 crossed below 5");
        assert_eq!(p.time_to_live, 0.0);
    }

    #[test]
    fn test_appearance_rates_and_size_clamp() {
        let mut p = Particle {
            color: Color::new(0.5, 0.5, 0.5, 1.0),
            delta_color: Color::new(1.0, -1.0, 0.0, -2.0),
            size: 1.0,
            size_delta: -4.0,
            rotation: 10.0,
            rotation_delta: 20.0,
            ..Default::default()
        };

        advance_appearance(&mut p, 0.5);

        // Couleur non bornée : r dépasse 1, a devient négatif
        assert!((p.color - Color::new(1.0, 0.0, 0.5, 0.0)).length() < EPS);
        assert_eq!(p.size, 0.0);
        assert_eq!(p.rotation, 20.0);

        advance_appearance(&mut p, 0.5);
        assert!(p.color.x > 1.0);
        assert!(p.color.w < 0.0);
    }

    #[test]
    fn test_integrate_dispatches_on_kind() {
        let base = Particle {
            position: Vec2::new(1.0, 1.0),
            start_pos: Vec2::new(1.0, 1.0),
            radius: 10.0,
            time_to_live: 1.0,
            ..Default::default()
        };
        let mut ctx = MotionContext {
            kind: EmitterKind::Gravity,
            source: Vec2::ZERO,
            gravity: Vec2::new(0.0, -1.0),
            min_radius: 0.0,
        };

        let mut gravity = base;
        integrate(&mut gravity, &ctx, 1.0);
        assert_eq!(gravity.direction, Vec2::new(0.0, -1.0));

        ctx.kind = EmitterKind::Radial;
        let mut radial = base;
        integrate(&mut radial, &ctx, 1.0);
        assert_eq!(radial.direction, Vec2::ZERO);
        assert!((radial.position - Vec2::new(-10.0, 0.0)).length() < EPS);
    }
}
