use emitter_sim::emitter_engine::{EmitterConfig, EmitterConfigBuilder, Vec2};
use std::path::PathBuf;

#[allow(unused)]
pub fn asset_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[allow(unused)]
pub fn load_preset(name: &str) -> EmitterConfig {
    let path = asset_path(&format!("assets/emitters/{name}.toml"));
    EmitterConfig::from_file(&path).unwrap_or_else(|e| panic!("{e:#}"))
}

/// Builder sans aucune variance : chaque particule est identique.
#[allow(unused)]
pub fn fixed_config(max_particles: usize, lifespan: f32) -> EmitterConfigBuilder {
    EmitterConfigBuilder::default()
        .max_particles(max_particles)
        .particle_lifespan(lifespan)
        .particle_lifespan_variance(0.0)
        .source_position(Vec2::new(100.0, 100.0))
        .source_position_variance(Vec2::ZERO)
        .angle_variance(0.0)
        .speed_variance(0.0)
        .start_particle_size_variance(0.0)
        .finish_particle_size_variance(0.0)
}
