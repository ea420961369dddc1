use anyhow::Result;

use crate::engine::{System, SystemContext};
use crate::rng::SystemRng;
use crate::world::World;

/// Advances every agent by one random-walk step. Runs first in the tick so
/// wellbeing is always computed from post-move positions. No agent's move
/// depends on another agent's move within the same tick.
pub struct MovementSystem;

impl MovementSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MovementSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }

    fn run(&mut self, _ctx: &SystemContext, world: &mut World, rng: &mut SystemRng) -> Result<()> {
        let World { grid, agents, .. } = world;
        for agent in agents.iter_mut() {
            agent.step(grid, rng);
        }
        Ok(())
    }
}
