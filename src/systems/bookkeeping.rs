use anyhow::Result;

use crate::engine::{System, SystemContext};
use crate::rng::SystemRng;
use crate::world::World;

/// Last in the tick order: folds the agents' happiness into the running
/// aggregate.
pub struct BookkeepingSystem;

impl BookkeepingSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BookkeepingSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for BookkeepingSystem {
    fn name(&self) -> &str {
        "bookkeeping"
    }

    fn run(&mut self, ctx: &SystemContext, world: &mut World, _rng: &mut SystemRng) -> Result<()> {
        world.tally_happiness();
        tracing::trace!(
            tick = ctx.tick,
            total_happiness = world.total_happiness(),
            "tick tallied"
        );
        Ok(())
    }
}
