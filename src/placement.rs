//! Click-to-build. A two-state controller replaces the original's one-shot
//! reassignable click handler: arming selects a building kind, the next
//! successful click places it and disarms.

use crate::buildings::BuildingKind;
use crate::grid::PlaceOutcome;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementState {
    Idle,
    Armed(BuildingKind),
}

/// Result of feeding one click into the controller. Rejections are silent
/// by contract: the controller stays armed and nothing is surfaced to the
/// player beyond the absence of a new building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Placed { x: i32, y: i32, kind: BuildingKind },
    Rejected(PlaceOutcome),
    NotArmed,
}

#[derive(Debug, Clone)]
pub struct PlacementController {
    state: PlacementState,
    cell_size_px: u32,
}

impl PlacementController {
    pub fn new(cell_size_px: u32) -> Self {
        Self {
            state: PlacementState::Idle,
            cell_size_px,
        }
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    pub fn armed_kind(&self) -> Option<BuildingKind> {
        match self.state {
            PlacementState::Armed(kind) => Some(kind),
            PlacementState::Idle => None,
        }
    }

    /// Arm placement of `kind`. Arming from any state discards whatever was
    /// armed before; only one placement is pending at a time.
    pub fn arm(&mut self, kind: BuildingKind) {
        self.state = PlacementState::Armed(kind);
    }

    /// Feed a click at pixel coordinates relative to the grid surface. The
    /// grid cell is the pixel offset floor-divided by the cell size. On
    /// success the world's wellbeing is refreshed immediately, before the
    /// next tick, and the controller disarms; on rejection it stays armed
    /// and waits for the next click.
    pub fn click(&mut self, world: &mut World, px: i32, py: i32) -> ClickOutcome {
        let PlacementState::Armed(kind) = self.state else {
            return ClickOutcome::NotArmed;
        };
        let x = px.div_euclid(self.cell_size_px as i32);
        let y = py.div_euclid(self.cell_size_px as i32);
        match world.place(x, y, kind) {
            PlaceOutcome::Placed => {
                world.refresh_wellbeing();
                self.state = PlacementState::Idle;
                ClickOutcome::Placed { x, y, kind }
            }
            rejected => ClickOutcome::Rejected(rejected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> PlacementController {
        PlacementController::new(60)
    }

    #[test]
    fn click_while_idle_is_ignored() {
        let mut world = World::new(10);
        let mut placement = controller();
        assert_eq!(placement.click(&mut world, 90, 90), ClickOutcome::NotArmed);
        assert_eq!(world.grid().building_count(), 0);
    }

    #[test]
    fn arming_a_new_kind_replaces_the_old() {
        let mut placement = controller();
        placement.arm(BuildingKind::House);
        placement.arm(BuildingKind::Park);
        assert_eq!(placement.state(), PlacementState::Armed(BuildingKind::Park));
    }

    #[test]
    fn pixel_offsets_floor_to_cells() {
        let mut world = World::new(10);
        let mut placement = controller();
        placement.arm(BuildingKind::House);
        let outcome = placement.click(&mut world, 130, 70);
        assert_eq!(
            outcome,
            ClickOutcome::Placed {
                x: 2,
                y: 1,
                kind: BuildingKind::House
            }
        );
        assert_eq!(world.grid().get(2, 1), Some(BuildingKind::House));
        assert_eq!(placement.state(), PlacementState::Idle);
    }

    #[test]
    fn out_of_bounds_click_stays_armed() {
        let mut world = World::new(10);
        let mut placement = controller();
        placement.arm(BuildingKind::Factory);
        // beyond the far edge, and into negative offsets
        for (px, py) in [(700, 30), (30, 700), (-10, 30)] {
            let outcome = placement.click(&mut world, px, py);
            assert_eq!(outcome, ClickOutcome::Rejected(PlaceOutcome::OutOfBounds));
        }
        assert_eq!(world.grid().building_count(), 0);
        assert_eq!(
            placement.state(),
            PlacementState::Armed(BuildingKind::Factory)
        );
    }

    #[test]
    fn occupied_click_stays_armed_and_keeps_original() {
        let mut world = World::new(10);
        world.place(5, 6, BuildingKind::Park);
        let mut placement = controller();
        placement.arm(BuildingKind::House);
        let outcome = placement.click(&mut world, 5 * 60 + 10, 6 * 60 + 10);
        assert_eq!(outcome, ClickOutcome::Rejected(PlaceOutcome::Occupied));
        assert_eq!(world.grid().get(5, 6), Some(BuildingKind::Park));
        assert_eq!(placement.state(), PlacementState::Armed(BuildingKind::House));
    }

    #[test]
    fn successful_placement_refreshes_wellbeing_immediately() {
        let mut world = World::new(10);
        world.add_agent(5, 5);
        let mut placement = controller();
        placement.arm(BuildingKind::Park);
        placement.click(&mut world, 5 * 60 + 1, 6 * 60 + 1);
        // felt before any tick runs
        assert_eq!(world.agents()[0].happiness, 3);
        assert_eq!(world.total_happiness(), 3);
    }
}
