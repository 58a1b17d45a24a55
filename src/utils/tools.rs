use log::info;

/// Versions injectées par `build.rs` (via `cargo_metadata`).
pub fn core_dependency_versions() -> [(&'static str, &'static str); 3] {
    [
        ("glam", option_env!("EMITTER_DEP_GLAM").unwrap_or("Unknown")),
        ("rand", option_env!("EMITTER_DEP_RAND").unwrap_or("Unknown")),
        ("toml", option_env!("EMITTER_DEP_TOML").unwrap_or("Unknown")),
    ]
}

/// Affiche les informations Rust et les dépendances principales de la compilation.
pub fn show_rust_core_dependencies() {
    // Info système (Rust version, OS)
    info!(
        "Rust compiler version: {}",
        rustc_version_runtime::version()
    );
    info!("  Platform    : {}", std::env::consts::OS);
    info!("  Arch        : {}", std::env::consts::ARCH);

    info!("Rust core dependencies");
    for (name, version) in core_dependency_versions() {
        info!("  {:<4} version: {}", name, version);
    }
}
