//! Configuration d'un émetteur.
//!
//! Le moteur consomme un [`EmitterConfig`] déjà décodé. Le décodage TOML et la
//! validation côté chargeur vivent ici ; le cœur de simulation ne revalide rien.

use anyhow::{ensure, Context};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::emitter_engine::types::{Color, Vec2};

/// Durée sentinelle : émission sans fin.
pub const DURATION_INFINITE: f32 = -1.0;

/// Modèle de mouvement utilisé pour intégrer les particules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "EmitterKindRepr")]
pub enum EmitterKind {
    /// Vitesse, gravité et accélérations radiale/tangentielle
    #[default]
    Gravity = 0,
    /// Orbite autour de la source, rayon décroissant
    Radial = 1,
}

/// Les fichiers d'origine encodent le type d'émetteur en entier (0/1),
/// les presets TOML utilisent le nom.
#[derive(Deserialize)]
#[serde(untagged)]
enum EmitterKindRepr {
    Code(i64),
    Name(String),
}

impl TryFrom<EmitterKindRepr> for EmitterKind {
    type Error = String;

    fn try_from(repr: EmitterKindRepr) -> Result<Self, Self::Error> {
        match repr {
            EmitterKindRepr::Code(0) => Ok(EmitterKind::Gravity),
            EmitterKindRepr::Code(1) => Ok(EmitterKind::Radial),
            EmitterKindRepr::Code(code) => Err(format!("unknown emitter kind code {code}")),
            EmitterKindRepr::Name(name) => match name.to_ascii_lowercase().as_str() {
                "gravity" => Ok(EmitterKind::Gravity),
                "radial" => Ok(EmitterKind::Radial),
                _ => Err(format!("unknown emitter kind '{name}'")),
            },
        }
    }
}

/// Tous les paramètres réglables d'un émetteur.
///
/// # Unités
/// Angles et rotations en degrés, temps en secondes, couleurs RGBA dans
/// `[0, 1]` (non imposé). Chaque champ `*_variance` est la demi-largeur de
/// l'intervalle uniforme tiré autour de la valeur de base au spawn.
///
/// Construction via [`EmitterConfigBuilder`] : les champs non renseignés
/// prennent les valeurs de [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(pattern = "owned", default, build_fn(error = "anyhow::Error"))]
#[serde(default)]
pub struct EmitterConfig {
    pub kind: EmitterKind,

    #[builder(setter(into))]
    pub source_position: Vec2,
    #[builder(setter(into))]
    pub source_position_variance: Vec2,

    pub angle: f32,
    pub angle_variance: f32,
    pub speed: f32,
    pub speed_variance: f32,

    pub radial_acceleration: f32,
    pub radial_accel_variance: f32,
    pub tangential_acceleration: f32,
    pub tangential_accel_variance: f32,
    #[builder(setter(into))]
    pub gravity: Vec2,

    pub particle_lifespan: f32,
    pub particle_lifespan_variance: f32,

    #[builder(setter(into))]
    pub start_color: Color,
    #[builder(setter(into))]
    pub start_color_variance: Color,
    #[builder(setter(into))]
    pub finish_color: Color,
    #[builder(setter(into))]
    pub finish_color_variance: Color,

    pub start_particle_size: f32,
    pub start_particle_size_variance: f32,
    pub finish_particle_size: f32,
    pub finish_particle_size_variance: f32,

    /// Capacité du pool, fixe pour toute la vie de l'émetteur
    pub max_particles: usize,
    /// Secondes d'émission, ou [`DURATION_INFINITE`]
    pub duration: f32,

    pub rotation_start: f32,
    pub rotation_start_variance: f32,
    pub rotation_end: f32,
    pub rotation_end_variance: f32,

    // Émetteurs radiaux (style "portal")
    pub max_radius: f32,
    pub max_radius_variance: f32,
    /// En dessous de ce rayon, la particule meurt aussitôt
    pub min_radius: f32,
    pub rotate_per_second: f32,
    pub rotate_per_second_variance: f32,

    /// Facteurs de blend GL, lus uniquement par le render sink
    pub blend_func_source: u32,
    pub blend_func_destination: u32,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            kind: EmitterKind::Gravity,
            source_position: Vec2::new(160.0, 240.0),
            source_position_variance: Vec2::new(7.0, 7.0),
            angle: 90.0,
            angle_variance: 10.0,
            speed: 60.0,
            speed_variance: 20.0,
            radial_acceleration: 0.0,
            radial_accel_variance: 0.0,
            tangential_acceleration: 0.0,
            tangential_accel_variance: 0.0,
            gravity: Vec2::ZERO,
            particle_lifespan: 1.0,
            particle_lifespan_variance: 0.25,
            start_color: Color::new(1.0, 0.31, 0.0, 0.62),
            start_color_variance: Color::ZERO,
            finish_color: Color::new(1.0, 0.0, 0.0, 0.0),
            finish_color_variance: Color::ZERO,
            start_particle_size: 54.0,
            start_particle_size_variance: 10.0,
            finish_particle_size: 12.0,
            finish_particle_size_variance: 5.0,
            max_particles: 200,
            duration: DURATION_INFINITE,
            rotation_start: 0.0,
            rotation_start_variance: 0.0,
            rotation_end: 0.0,
            rotation_end_variance: 0.0,
            max_radius: 100.0,
            max_radius_variance: 0.0,
            min_radius: 0.0,
            rotate_per_second: 0.0,
            rotate_per_second_variance: 0.0,
            blend_func_source: 770,  // GL_SRC_ALPHA
            blend_func_destination: 1, // GL_ONE
        }
    }
}

impl EmitterConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading emitter config '{}'", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("decoding emitter config '{}'", path.display()))
    }

    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml_string()?)
            .with_context(|| format!("writing emitter config '{}'", path.display()))?;
        Ok(())
    }

    /// Particules par seconde pour garder, en moyenne, un pool plein.
    ///
    /// Zéro si la durée de vie n'est pas positive : l'émission est coupée.
    pub fn emission_rate(&self) -> f32 {
        if self.particle_lifespan > 0.0 {
            self.max_particles as f32 / self.particle_lifespan
        } else {
            0.0
        }
    }

    /// `None` si l'émetteur tourne sans fin (toute durée négative).
    pub fn duration_limit(&self) -> Option<f32> {
        (self.duration >= 0.0).then_some(self.duration)
    }

    /// Vérifications côté chargeur. Le cœur de simulation les suppose faites.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.max_particles > 0, "max_particles must be > 0");
        ensure!(
            self.particle_lifespan.is_finite() && self.particle_lifespan > 0.0,
            "particle_lifespan must be a finite value > 0 (got {})",
            self.particle_lifespan
        );
        ensure!(
            self.min_radius >= 0.0,
            "min_radius must be >= 0 (got {})",
            self.min_radius
        );

        for (name, value) in self.scalar_fields() {
            ensure!(value.is_finite(), "{name} must be finite (got {value})");
        }
        for (name, value) in self.vector_fields() {
            ensure!(value.is_finite(), "{name} must be finite (got {value:?})");
        }
        Ok(())
    }

    fn scalar_fields(&self) -> [(&'static str, f32); 26] {
        [
            ("angle", self.angle),
            ("angle_variance", self.angle_variance),
            ("speed", self.speed),
            ("speed_variance", self.speed_variance),
            ("radial_acceleration", self.radial_acceleration),
            ("radial_accel_variance", self.radial_accel_variance),
            ("tangential_acceleration", self.tangential_acceleration),
            ("tangential_accel_variance", self.tangential_accel_variance),
            ("particle_lifespan", self.particle_lifespan),
            ("particle_lifespan_variance", self.particle_lifespan_variance),
            ("start_particle_size", self.start_particle_size),
            ("start_particle_size_variance", self.start_particle_size_variance),
            ("finish_particle_size", self.finish_particle_size),
            ("finish_particle_size_variance", self.finish_particle_size_variance),
            ("duration", self.duration),
            ("rotation_start", self.rotation_start),
            ("rotation_start_variance", self.rotation_start_variance),
            ("rotation_end", self.rotation_end),
            ("rotation_end_variance", self.rotation_end_variance),
            ("max_radius", self.max_radius),
            ("max_radius_variance", self.max_radius_variance),
            ("min_radius", self.min_radius),
            ("rotate_per_second", self.rotate_per_second),
            ("rotate_per_second_variance", self.rotate_per_second_variance),
            ("source_position.x", self.source_position.x),
            ("source_position.y", self.source_position.y),
        ]
    }

    fn vector_fields(&self) -> [(&'static str, Color); 6] {
        [
            (
                "source_position_variance",
                self.source_position_variance.extend(0.0).extend(0.0),
            ),
            ("gravity", self.gravity.extend(0.0).extend(0.0)),
            ("start_color", self.start_color),
            ("finish_color", self.finish_color),
            ("start_color_variance", self.start_color_variance),
            ("finish_color_variance", self.finish_color_variance),
        ]
    }
}
