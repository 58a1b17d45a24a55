pub mod simulator;
pub use simulator::{RunSummary, Simulator, SimulatorConfig};
// Emitter engine
pub mod emitter_engine;
pub use emitter_engine::{EmitterConfig, EmitterEngine, EmitterSet, ParticleEmitter};
// Render sink
pub mod render_sink;
pub use render_sink::{RenderSink, SpriteBank};

// Profiler
pub mod profiler;
// Utilities
pub mod utils;
