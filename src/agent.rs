//! Wandering townsfolk. Plain data plus a couple of methods, so the core
//! simulates and tests without any rendering context.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::rng::SystemRng;

const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub x: i32,
    pub y: i32,
    pub happiness: i32,
}

impl Agent {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y, happiness: 0 }
    }

    /// One random-walk step: a uniformly chosen cardinal direction, taken
    /// only if the destination is in bounds and free of buildings. A blocked
    /// step is a silent stay-in-place, not an error. Other agents never
    /// block; several may share a cell.
    pub fn step(&mut self, grid: &Grid, rng: &mut SystemRng) {
        let (dx, dy) = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];
        let nx = self.x + dx;
        let ny = self.y + dy;
        if grid.is_open(nx, ny) {
            self.x = nx;
            self.y = ny;
        }
    }

    /// Recompute happiness from the current neighborhood. Always a fresh
    /// sum, never accumulated across ticks.
    pub fn refresh_happiness(&mut self, grid: &Grid) {
        self.happiness = grid.happiness_around(self.x, self.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::BuildingKind;
    use crate::rng::RngManager;

    #[test]
    fn fully_blocked_agent_never_moves() {
        // 2x2 board, both neighbors built over: every direction is either
        // out of bounds or occupied.
        let mut grid = Grid::new(2);
        grid.place(0, 1, BuildingKind::House);
        grid.place(1, 0, BuildingKind::House);
        let manager = RngManager::new(9);
        let mut agent = Agent::new(0, 0);
        for tick in 1..=50 {
            let mut rng = manager.stream("movement", tick);
            agent.step(&grid, &mut rng);
            assert_eq!((agent.x, agent.y), (0, 0));
        }
    }

    #[test]
    fn steps_are_single_cardinal_moves() {
        let grid = Grid::new(10);
        let manager = RngManager::new(11);
        let mut agent = Agent::new(5, 5);
        for tick in 1..=100 {
            let (px, py) = (agent.x, agent.y);
            let mut rng = manager.stream("movement", tick);
            agent.step(&grid, &mut rng);
            let moved = (agent.x - px).abs() + (agent.y - py).abs();
            assert!(moved <= 1, "diagonal or multi-cell move at tick {tick}");
            assert!(grid.in_bounds(agent.x, agent.y));
        }
    }

    #[test]
    fn happiness_is_recomputed_not_accumulated() {
        let mut grid = Grid::new(10);
        grid.place(5, 6, BuildingKind::Park);
        let mut agent = Agent::new(5, 5);
        agent.refresh_happiness(&grid);
        agent.refresh_happiness(&grid);
        assert_eq!(agent.happiness, 3);
    }
}
