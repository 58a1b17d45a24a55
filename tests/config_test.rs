mod helpers;

use emitter_sim::emitter_engine::{
    Color, EmitterConfig, EmitterConfigBuilder, EmitterKind, Vec2,
};
use helpers::{asset_path, load_preset};

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portal.toml");

    let config = EmitterConfigBuilder::default()
        .kind(EmitterKind::Radial)
        .source_position(Vec2::new(12.5, -3.0))
        .start_color(Color::new(0.2, 0.4, 0.6, 0.8))
        .max_particles(321)
        .max_radius(75.0)
        .min_radius(4.0)
        .duration(3.5)
        .blend_func_source(1)
        .blend_func_destination(771)
        .build()
        .unwrap();

    config.save_to_file(&path).unwrap();
    let loaded = EmitterConfig::from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_file_reports_path() {
    let err = EmitterConfig::from_file("does/not/exist.toml").unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("does/not/exist.toml"), "{message}");
}

#[test]
fn test_every_preset_loads_and_validates() {
    let dir = asset_path("assets/emitters");
    let mut count = 0;
    for entry in std::fs::read_dir(&dir).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            let config = EmitterConfig::from_file(&path).unwrap();
            config
                .validate()
                .unwrap_or_else(|e| panic!("{}: {e:#}", path.display()));
            count += 1;
        }
    }
    assert!(count >= 3);
}

#[test]
fn test_winner_stars_preset_values() {
    let c = load_preset("winner_stars");

    assert_eq!(c.kind, EmitterKind::Gravity);
    assert_eq!(c.source_position, Vec2::new(150.0, 50.0));
    assert_eq!(c.speed, 348.68);
    assert_eq!(c.particle_lifespan, 1.3816);
    assert_eq!(c.angle, 360.0);
    assert_eq!(c.angle_variance, 310.26);
    assert_eq!(c.radial_acceleration, -1000.0);
    assert_eq!(c.tangential_acceleration, -302.63);
    assert_eq!(c.start_color, Color::new(1.0, 0.4, 0.76, 0.48));
    assert_eq!(c.finish_color, Color::new(0.0, 0.6, 0.46, 0.85));
    assert_eq!(c.max_particles, 486);
    assert_eq!(c.start_particle_size, 3.37);
    assert_eq!(c.start_particle_size_variance, 64.0);
    assert_eq!(c.duration, -1.0);
    assert_eq!(c.min_radius, 300.0);
    assert_eq!(c.rotate_per_second, 360.0);
    assert_eq!(c.rotation_start, 142.11);
    assert_eq!(c.rotation_start_variance, -236.84);
    assert_eq!((c.blend_func_source, c.blend_func_destination), (770, 1));

    assert!(c.duration_limit().is_none());
    assert!((c.emission_rate() - 486.0 / 1.3816).abs() < 1e-3);
}

#[test]
fn test_comet_preset_values() {
    let c = load_preset("comet");
    assert_eq!(c.kind, EmitterKind::Gravity);
    assert_eq!(c.particle_lifespan, 0.1974);
    assert_eq!(c.start_color.x, 0.83);
    assert_eq!(c.start_particle_size, 41.68);
    assert_eq!(c.blend_func_source, 770);
    assert_eq!(c.duration, -1.0);
}
