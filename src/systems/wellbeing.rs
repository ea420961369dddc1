use anyhow::Result;

use crate::engine::{System, SystemContext};
use crate::rng::SystemRng;
use crate::world::World;

/// Recomputes every agent's happiness from its 3×3 neighborhood on the
/// already-moved grid.
pub struct WellbeingSystem;

impl WellbeingSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WellbeingSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for WellbeingSystem {
    fn name(&self) -> &str {
        "wellbeing"
    }

    fn run(&mut self, _ctx: &SystemContext, world: &mut World, _rng: &mut SystemRng) -> Result<()> {
        world.recompute_agent_happiness();
        Ok(())
    }
}
