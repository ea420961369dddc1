use std::path::PathBuf;

use tempfile::tempdir;
use tinytown::engine::{EngineBuilder, EngineSettings};
use tinytown::scenario::ScenarioLoader;
use tinytown::snapshot::SnapshotRecord;

fn scenario_loader() -> ScenarioLoader {
    ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
}

fn settings(name: &str, seed: u64, interval: u64, dir: PathBuf) -> EngineSettings {
    EngineSettings {
        scenario_name: name.into(),
        seed,
        snapshot_interval_ticks: interval,
        snapshot_dir: dir,
    }
}

#[test]
fn engine_runs_hook_each_tick() {
    let scenario = scenario_loader().load("scenarios/riverside.yaml").unwrap();
    let mut world = scenario.build_world().unwrap();
    let temp = tempdir().unwrap();
    let mut engine = EngineBuilder::new(settings(
        &scenario.name,
        scenario.seed,
        0,
        temp.path().to_path_buf(),
    ))
    .with_standard_systems()
    .build();

    let mut ticks = Vec::new();
    engine
        .run_with_hook(&mut world, 6, |snapshot| ticks.push(snapshot.tick))
        .expect("run succeeds");

    assert_eq!(ticks, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn engine_runs_deterministically() {
    let scenario = scenario_loader().load("scenarios/riverside.yaml").unwrap();
    let ticks = 40;

    let mut world_a = scenario.build_world().unwrap();
    let mut engine_a =
        EngineBuilder::new(settings(&scenario.name, scenario.seed, 0, "a".into()))
            .with_standard_systems()
            .build();
    engine_a.run(&mut world_a, ticks).unwrap();

    let mut world_b = scenario.build_world().unwrap();
    let mut engine_b =
        EngineBuilder::new(settings(&scenario.name, scenario.seed, 0, "b".into()))
            .with_standard_systems()
            .build();
    engine_b.run(&mut world_b, ticks).unwrap();

    assert_eq!(
        world_a.snapshot(&scenario.name),
        world_b.snapshot(&scenario.name)
    );
}

#[test]
fn different_seeds_diverge() {
    let scenario = scenario_loader().load("scenarios/riverside.yaml").unwrap();

    let mut world_a = scenario.build_world().unwrap();
    let mut engine_a = EngineBuilder::new(settings(&scenario.name, scenario.seed, 0, "a".into()))
        .with_standard_systems()
        .build();
    engine_a.run(&mut world_a, 40).unwrap();

    let mut world_b = scenario.build_world().unwrap();
    let mut engine_b =
        EngineBuilder::new(settings(&scenario.name, scenario.seed + 1, 0, "b".into()))
            .with_standard_systems()
            .build();
    engine_b.run(&mut world_b, 40).unwrap();

    // same starting town, different walk seeds
    assert_ne!(world_a.agents(), world_b.agents());
}

#[test]
fn engine_emits_snapshots() {
    let scenario = scenario_loader().load("scenarios/riverside.yaml").unwrap();
    let mut world = scenario.build_world().unwrap();
    let temp = tempdir().unwrap();
    let snapshot_dir = temp.path().join("snaps");

    let mut engine = EngineBuilder::new(settings(
        &scenario.name,
        scenario.seed,
        10,
        snapshot_dir.clone(),
    ))
    .with_standard_systems()
    .build();
    engine.run(&mut world, 30).unwrap();

    let expected = snapshot_dir.join("riverside").join("tick_000010.json");
    assert!(
        expected.exists(),
        "expected snapshot {} to exist",
        expected.display()
    );

    let data = std::fs::read_to_string(expected).unwrap();
    let record: SnapshotRecord = serde_json::from_str(&data).unwrap();
    assert_eq!(record.world.scenario, "riverside");
    assert_eq!(record.world.tick, 10);
    assert_eq!(record.world.agents.len(), 5);
}
