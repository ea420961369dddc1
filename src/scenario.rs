//! Scenario configuration: YAML files describing the board, the population,
//! and the tick cadence, loaded and validated before the world is built.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buildings::BuildingKind;
use crate::rng::RngManager;
use crate::world::World;

fn default_grid_size() -> usize {
    10
}

fn default_cell_size_px() -> u32 {
    60
}

fn default_agents() -> usize {
    5
}

fn default_tick_interval_ms() -> u64 {
    2000
}

fn default_snapshot_dir() -> PathBuf {
    PathBuf::from("snapshots")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    #[serde(default = "default_cell_size_px")]
    pub cell_size_px: u32,
    #[serde(default = "default_agents")]
    pub agents: usize,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub ticks: Option<u64>,
    #[serde(default)]
    pub snapshot: SnapshotSettings,
    #[serde(default)]
    pub buildings: Vec<BuildingPlan>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotSettings {
    #[serde(default)]
    pub interval: u64,
    #[serde(default = "default_snapshot_dir")]
    pub output_dir: PathBuf,
}

impl Default for SnapshotSettings {
    fn default() -> Self {
        Self {
            interval: 0,
            output_dir: default_snapshot_dir(),
        }
    }
}

/// A building placed before the first tick, through the same one-way door
/// as any click placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingPlan {
    pub x: i32,
    pub y: i32,
    pub kind: BuildingKind,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario validation error: {0}")]
    Validation(String),
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        scenario.validate()?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.grid_size == 0 {
            return Err(ScenarioError::Validation(
                "grid_size must be at least 1".into(),
            ));
        }
        if self.cell_size_px == 0 {
            return Err(ScenarioError::Validation(
                "cell_size_px must be at least 1".into(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(ScenarioError::Validation(
                "tick_interval_ms must be at least 1".into(),
            ));
        }
        let size = self.grid_size as i32;
        let mut seen = Vec::new();
        for plan in &self.buildings {
            if plan.x < 0 || plan.y < 0 || plan.x >= size || plan.y >= size {
                return Err(ScenarioError::Validation(format!(
                    "building {} at ({}, {}) is outside the {}x{} grid",
                    plan.kind, plan.x, plan.y, self.grid_size, self.grid_size
                )));
            }
            if seen.contains(&(plan.x, plan.y)) {
                return Err(ScenarioError::Validation(format!(
                    "cell ({}, {}) is assigned more than one building",
                    plan.x, plan.y
                )));
            }
            seen.push((plan.x, plan.y));
        }
        let open_cells = self.grid_size * self.grid_size - self.buildings.len();
        if self.agents > 0 && open_cells == 0 {
            return Err(ScenarioError::Validation(
                "no open cells left for agents to spawn on".into(),
            ));
        }
        Ok(())
    }

    /// Tick count for headless runs: CLI override, then the scenario value,
    /// then 120.
    pub fn ticks(&self, override_ticks: Option<u64>) -> u64 {
        override_ticks.or(self.ticks).unwrap_or(120)
    }

    /// Build the starting world: an empty grid, any pre-planned buildings,
    /// then agents spawned on random open cells.
    pub fn build_world(&self) -> Result<World, ScenarioError> {
        let mut world = World::new(self.grid_size);
        for plan in &self.buildings {
            let outcome = world.place(plan.x, plan.y, plan.kind);
            if !outcome.is_placed() {
                return Err(ScenarioError::Validation(format!(
                    "cannot pre-place {} at ({}, {}): {:?}",
                    plan.kind, plan.x, plan.y, outcome
                )));
            }
        }
        let manager = RngManager::new(self.seed);
        let mut rng = manager.stream("spawn", 0);
        world.populate(self.agents, &mut rng);
        world.refresh_wellbeing();
        Ok(world)
    }
}
