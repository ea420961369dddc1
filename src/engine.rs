//! The simulation clock: ordered systems run once per tick, snapshots are
//! written on the configured cadence.

use std::path::PathBuf;

use anyhow::Result;

use crate::rng::{RngManager, SystemRng};
use crate::snapshot::SnapshotWriter;
use crate::systems::{BookkeepingSystem, MovementSystem, WellbeingSystem};
use crate::world::{World, WorldSnapshot};

pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
    pub snapshot_interval_ticks: u64,
    pub snapshot_dir: PathBuf,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    /// The canonical tick order: agents move, happiness is recomputed from
    /// the post-move grid, then the total is re-summed.
    pub fn with_standard_systems(self) -> Self {
        self.with_system(MovementSystem::new())
            .with_system(WellbeingSystem::new())
            .with_system(BookkeepingSystem::new())
    }

    pub fn build(self) -> Engine {
        Engine {
            rng: RngManager::new(self.settings.seed),
            snapshot_writer: SnapshotWriter::new(
                &self.settings.snapshot_dir,
                self.settings.snapshot_interval_ticks,
            ),
            systems: self.systems,
            settings: self.settings,
        }
    }
}

pub struct Engine {
    rng: RngManager,
    systems: Vec<Box<dyn System>>,
    snapshot_writer: SnapshotWriter,
    settings: EngineSettings,
}

impl Engine {
    /// One full simulation step. Timer-driven callers get exactly one step
    /// per firing; there is no catch-up for late ticks.
    pub fn step(&mut self, world: &mut World) -> Result<WorldSnapshot> {
        world.advance_tick();
        let tick = world.tick();
        for system in &mut self.systems {
            let mut rng = self.rng.stream(system.name(), tick);
            let ctx = SystemContext {
                tick,
                scenario_name: &self.settings.scenario_name,
            };
            system.run(&ctx, world, &mut rng)?;
        }
        let snapshot = world.snapshot(&self.settings.scenario_name);
        self.snapshot_writer.maybe_write(&snapshot)?;
        Ok(snapshot)
    }

    pub fn run(&mut self, world: &mut World, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.step(world)?;
        }
        Ok(())
    }

    /// Run `ticks` steps, handing each post-tick snapshot to `hook`.
    pub fn run_with_hook(
        &mut self,
        world: &mut World,
        ticks: u64,
        mut hook: impl FnMut(WorldSnapshot),
    ) -> Result<()> {
        for _ in 0..ticks {
            hook(self.step(world)?);
        }
        Ok(())
    }

    pub fn scenario_name(&self) -> &str {
        &self.settings.scenario_name
    }
}

pub struct SystemContext<'a> {
    pub tick: u64,
    pub scenario_name: &'a str,
}

pub trait System: Send {
    fn name(&self) -> &str;
    fn run(&mut self, ctx: &SystemContext, world: &mut World, rng: &mut SystemRng) -> Result<()>;
}
