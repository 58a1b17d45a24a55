use anyhow::{ensure, Context};
use itertools::{Itertools, MinMaxResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::emitter_engine::EmitterEngine;
use crate::render_sink::{SpriteBank, SpriteInstance};
use crate::{log_metrics_and_fps, profiler::Profiler};

/// Pas de temps fixe de la scène de démo.
pub const DEFAULT_FRAME_TIME: f32 = 0.016;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Nombre de pas simulés par `run`
    pub frames: u64,
    /// Secondes par pas
    pub frame_time: f32,
    /// Log des métriques toutes les N frames (0 = jamais)
    pub metrics_period: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_time: DEFAULT_FRAME_TIME,
            metrics_period: 120,
        }
    }
}

impl SimulatorConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading simulator config '{}'", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("decoding simulator config '{}'", path.display()))
    }
}

/// Bilan d'un `run`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunSummary {
    pub frames: u64,
    pub simulated_time: f32,
    pub spawned: usize,
    pub removed: usize,
    pub min_live: usize,
    pub max_live: usize,
    pub final_live: usize,
}

/// Boucle headless à pas fixe : un moteur d'émission, un render sink.
pub struct Simulator<E>
where
    E: EmitterEngine,
{
    engine: E,
    sink: SpriteBank,
    config: SimulatorConfig,
    profiler: Profiler,
    instances: Vec<SpriteInstance>,

    frames: u64,
    spawned: usize,
    removed: usize,
    live_history: Vec<usize>,
    first_frame: bool,
}

impl<E> Simulator<E>
where
    E: EmitterEngine,
{
    pub fn new(engine: E, sink: SpriteBank, config: SimulatorConfig) -> Self {
        let instances = vec![SpriteInstance::default(); sink.sprites().len()];
        Self {
            engine,
            sink,
            config,
            profiler: Profiler::new(200),
            instances,
            frames: 0,
            spawned: 0,
            removed: 0,
            live_history: Vec::new(),
            first_frame: true,
        }
    }

    /// Un pas de `frame_time` : update de l'émetteur, sync du sink, remplissage
    /// du buffer d'instances. Retourne le nombre de particules vivantes.
    pub fn step(&mut self) -> usize {
        let _frame_guard = self.profiler.frame(); // RAII: mesure totale de la frame

        let dt = self.config.frame_time;
        let engine = &mut self.engine;
        let sink = &mut self.sink;
        let (spawned, removed, live) = self.profiler.profile_block("emitter - update", || {
            let result = engine.update_with_sink(dt, sink);
            (result.spawned, result.removed, result.live_count())
        });

        let uploaded = self.profiler.profile_block("sink - sync", || {
            self.sink.sync(self.engine.particles());
            let n = self.sink.fill_instance_slice(&mut self.instances);
            bytemuck::cast_slice::<SpriteInstance, u8>(&self.instances[..n]).len()
        });

        self.profiler.record_metric("particles - live", live);
        self.profiler.record_metric("particles - spawned", spawned);
        self.profiler.record_metric("particles - removed", removed);
        self.profiler.record_metric("instances - bytes", uploaded);

        self.frames += 1;
        self.spawned += spawned;
        self.removed += removed;
        self.live_history.push(live);

        if self.config.metrics_period > 0 && self.frames % self.config.metrics_period == 0 {
            log_metrics_and_fps!(&self.profiler);
        }

        if self.first_frame {
            info!("🚀 First frame simulated ({} particles spawned)", spawned);
            self.first_frame = false;
        }

        live
    }

    /// Simule `config.frames` pas et retourne le bilan.
    pub fn run(&mut self) -> anyhow::Result<RunSummary> {
        ensure!(
            self.config.frame_time.is_finite() && self.config.frame_time > 0.0,
            "frame_time must be a positive number of seconds (got {})",
            self.config.frame_time
        );

        info!(
            "▶️ Running {} frames of {:.3}s",
            self.config.frames, self.config.frame_time
        );
        for _ in 0..self.config.frames {
            self.step();
        }

        let summary = self.summary();
        info!(
            "🏁 {} frames, {} spawned, {} removed, live particles in [{}, {}]",
            summary.frames, summary.spawned, summary.removed, summary.min_live, summary.max_live
        );
        Ok(summary)
    }

    pub fn summary(&self) -> RunSummary {
        let (min_live, max_live) = match self.live_history.iter().copied().minmax() {
            MinMaxResult::NoElements => (0, 0),
            MinMaxResult::OneElement(n) => (n, n),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        RunSummary {
            frames: self.frames,
            simulated_time: self.frames as f32 * self.config.frame_time,
            spawned: self.spawned,
            removed: self.removed,
            min_live,
            max_live,
            final_live: self.engine.particles().len(),
        }
    }

    pub fn close(&mut self) {
        self.engine.close();
        self.sink.hide_all();
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn sink(&self) -> &SpriteBank {
        &self.sink
    }

    pub fn profiler(&self) -> &Profiler {
        &self.profiler
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }
}
