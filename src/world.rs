//! The whole simulation state in one struct: grid, agents, and the running
//! happiness total. Owned by a single engine; nothing here is global.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::buildings::BuildingKind;
use crate::grid::{Grid, PlaceOutcome};
use crate::rng::SystemRng;

#[derive(Debug, Clone)]
pub struct World {
    pub(crate) grid: Grid,
    pub(crate) agents: Vec<Agent>,
    pub(crate) total_happiness: i64,
    pub(crate) tick: u64,
}

impl World {
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid: Grid::new(grid_size),
            agents: Vec::new(),
            total_happiness: 0,
            tick: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn total_happiness(&self) -> i64 {
        self.total_happiness
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub(crate) fn advance_tick(&mut self) {
        self.tick += 1;
    }

    /// The one mutation door for buildings. Rejections leave the grid
    /// untouched and are silent; there is no removal counterpart.
    pub fn place(&mut self, x: i32, y: i32, kind: BuildingKind) -> PlaceOutcome {
        self.grid.place(x, y, kind)
    }

    pub fn add_agent(&mut self, x: i32, y: i32) {
        self.agents.push(Agent::new(x, y));
    }

    /// Spawn `count` agents on random open cells, rejection-sampling against
    /// occupied cells at creation time only. Later placements never evict or
    /// relocate anyone.
    pub fn populate(&mut self, count: usize, rng: &mut SystemRng) {
        let size = self.grid.size() as i32;
        for _ in 0..count {
            loop {
                let x = rng.gen_range(0..size);
                let y = rng.gen_range(0..size);
                if self.grid.is_open(x, y) {
                    self.agents.push(Agent::new(x, y));
                    break;
                }
            }
        }
    }

    pub(crate) fn recompute_agent_happiness(&mut self) {
        let Self { grid, agents, .. } = self;
        for agent in agents.iter_mut() {
            agent.refresh_happiness(grid);
        }
    }

    pub(crate) fn tally_happiness(&mut self) {
        self.total_happiness = self
            .agents
            .iter()
            .map(|agent| i64::from(agent.happiness))
            .sum();
    }

    /// Recompute every agent's happiness and the aggregate in one go. Used
    /// by the per-tick systems and immediately after a successful placement,
    /// so a new building is felt before the next tick.
    pub fn refresh_wellbeing(&mut self) {
        self.recompute_agent_happiness();
        self.tally_happiness();
    }

    pub fn snapshot(&self, scenario: &str) -> WorldSnapshot {
        let buildings = self
            .grid
            .buildings()
            .map(|(x, y, kind)| BuildingSnapshot {
                x,
                y,
                kind,
                glyph: kind.glyph().to_string(),
                color: kind.color().to_string(),
                effect: kind.happiness_effect(),
            })
            .collect();
        let agents = self
            .agents
            .iter()
            .map(|agent| AgentSnapshot {
                x: agent.x,
                y: agent.y,
                happiness: agent.happiness,
            })
            .collect();
        WorldSnapshot {
            scenario: scenario.to_string(),
            tick: self.tick,
            grid_size: self.grid.size(),
            total_happiness: self.total_happiness,
            buildings,
            agents,
        }
    }
}

/// Read-only view handed to the renderer, the snapshot writer, and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub scenario: String,
    pub tick: u64,
    pub grid_size: usize,
    pub total_happiness: i64,
    pub buildings: Vec<BuildingSnapshot>,
    pub agents: Vec<AgentSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSnapshot {
    pub x: i32,
    pub y: i32,
    pub kind: BuildingKind,
    pub glyph: String,
    pub color: String,
    pub effect: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub x: i32,
    pub y: i32,
    pub happiness: i32,
}
