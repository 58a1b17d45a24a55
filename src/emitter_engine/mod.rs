pub mod r#trait;
pub use r#trait::EmitterEngine;

pub mod types;
pub use self::types::{Color, UpdateResult, Vec2};

pub mod particle;
pub use self::particle::Particle;

pub mod config;
pub use self::config::{EmitterConfig, EmitterConfigBuilder, EmitterKind, DURATION_INFINITE};

pub mod particles_pool;
pub use self::particles_pool::ParticlesPool;

pub mod motion;
pub mod scheduler;
pub use self::scheduler::{EmissionScheduler, EmitterState};
pub mod spawn;

pub mod emitter;
pub use self::emitter::ParticleEmitter;
#[cfg(any(test, feature = "test_helpers"))]
pub use self::emitter::EmitterTestHelpers;

pub mod emitter_set;
pub use self::emitter_set::{EmitterSet, SetUpdateStats};
