use std::fs;
use std::path::PathBuf;
use threebody::{Error, ForceLaw, GlyphKind, SimulationConfig, SimulationLoop};

fn scenario(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("threebody-config-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn three_body_scenario_is_the_default_demo() {
    let cfg = SimulationConfig::from_json_file(scenario("three_body.json")).unwrap();
    assert_eq!(cfg, SimulationConfig::default());
}

#[test]
fn ship_pair_scenario_loads_and_runs() {
    let cfg = SimulationConfig::from_json_file(scenario("ship_pair.json")).unwrap();
    assert_eq!(cfg.glyph, GlyphKind::Ship);
    assert_eq!(cfg.force_law, ForceLaw::Newtonian);
    assert_eq!(cfg.body_count, 2);
    assert_eq!(cfg.seed, Some(7));
    assert!(cfg.orientation.thrust);

    let mut sim = SimulationLoop::new(cfg).unwrap();
    sim.initialize().unwrap();
    sim.tick();
    assert_eq!(sim.bodies().len(), 2);
    assert!(sim
        .bodies()
        .iter()
        .all(|b| b.orientation().is_some_and(|o| o.thrust)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = SimulationConfig::from_json_file(scenario("no_such_scenario.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "got {:?}", err);
}

#[test]
fn malformed_json_is_a_json_error() {
    let path = scratch_file("malformed.json", r#"{ "body_count": 3, "G": }"#);
    let err = SimulationConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, Error::Json(_)), "got {:?}", err);
    let _ = fs::remove_file(path);
}

#[test]
fn out_of_range_values_are_a_config_error() {
    let path = scratch_file("negative_mass.json", r#"{ "mass": -2.0 }"#);
    let err = SimulationConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "got {:?}", err);
    let _ = fs::remove_file(path);
}
