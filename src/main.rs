// Ici on importe depuis la crate lib complète
use anyhow::{Context, Result};
use log::{info, warn};
use std::{
    env,
    path::{Path, PathBuf},
};

use emitter_sim::emitter_engine::{EmitterConfig, EmitterSet, ParticleEmitter, Vec2};
use emitter_sim::render_sink::{blend, SpriteBank};
use emitter_sim::utils::{show_rust_core_dependencies, HumanBytes};
use emitter_sim::{Simulator, SimulatorConfig};

const SIMULATOR_CONFIG_PATH: &str = "assets/config/simulator.toml";
const DEFAULT_EMITTER_PATH: &str = "assets/emitters/winner_stars.toml";

/// Entry point: `emitter_sim [emitter.toml | presets_dir]`.
fn main() -> Result<()> {
    env_logger::init();

    info!("🚀 Starting Emitter Simulator...");

    show_rust_core_dependencies();

    let sim_config = SimulatorConfig::from_file(SIMULATOR_CONFIG_PATH).unwrap_or_default();
    info!("Simulator config loaded:\n{:#?}", sim_config);

    // --------------------------
    // Chemin de la config émetteur
    // --------------------------
    let emitter_path = env::args()
        .nth(1) // priorité à l'argument CLI
        .map(PathBuf::from)
        .or_else(|| env::var("EMITTER_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EMITTER_PATH));

    if emitter_path.is_dir() {
        return run_presets(&emitter_path, &sim_config);
    }

    let emitter_config = match EmitterConfig::from_file(&emitter_path) {
        Ok(config) => config,
        Err(e) => {
            warn!("⚠️ {e:#}, falling back to the default emitter");
            EmitterConfig::default()
        }
    };
    emitter_config.validate()?;
    info!("Emitter config loaded:\n{:#?}", emitter_config);

    // Les textures de la démo ne sont pas prémultipliées
    let blend_settings = blend::resolve(
        emitter_config.blend_func_source,
        emitter_config.blend_func_destination,
        false,
    );

    let emitter = ParticleEmitter::new(emitter_config);
    let sink = SpriteBank::with_blend(emitter.capacity(), blend_settings);
    let footprint = emitter.memory_footprint();

    let mut simulator = Simulator::new(emitter, sink, sim_config);
    let summary = simulator.run()?;

    info!("📊 Summary");
    info!(
        "  simulated      : {} frames ({:.2}s)",
        summary.frames, summary.simulated_time
    );
    info!(
        "  particles      : {} spawned, {} removed, {} alive",
        summary.spawned, summary.removed, summary.final_live
    );
    info!(
        "  live range     : [{}, {}]",
        summary.min_live, summary.max_live
    );
    info!("  pool memory    : {}", footprint.human_bytes());

    simulator.close();

    Ok(())
}

/// Scène de démo : chaque preset du dossier joue à tour de rôle, recentré.
fn run_presets(dir: &Path, sim_config: &SimulatorConfig) -> Result<()> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("listing presets in '{}'", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    let mut set = EmitterSet::with_capacity(paths.len());
    for path in &paths {
        let config = EmitterConfig::from_file(path)?;
        config
            .validate()
            .with_context(|| format!("invalid preset '{}'", path.display()))?;
        set.insert(ParticleEmitter::new(config));
    }
    anyhow::ensure!(!set.is_empty(), "no preset found in '{}'", dir.display());

    let center = Vec2::new(160.0, 240.0);
    let frames_per_preset = (sim_config.frames / set.len() as u64).max(1);

    for _ in 0..set.len() {
        let Some(idx) = set.next_emitter(center) else {
            break;
        };
        let mut peak = 0;
        for _ in 0..frames_per_preset {
            if let Some(emitter) = set.get_mut(idx) {
                peak = peak.max(emitter.update(sim_config.frame_time).live_count());
            }
        }
        info!(
            "  preset {:?}: peak {} particles",
            set.get(idx).map(|e| e.config().kind),
            peak
        );
    }

    set.stop_all();
    info!("🏁 {} presets played", set.len());
    Ok(())
}
