pub mod agent;
pub mod buildings;
pub mod engine;
pub mod grid;
pub mod placement;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod systems;
pub mod web;
pub mod world;

pub use buildings::BuildingKind;
pub use engine::{Engine, EngineBuilder, EngineSettings};
pub use placement::{ClickOutcome, PlacementController, PlacementState};
pub use scenario::{Scenario, ScenarioLoader};
pub use world::{World, WorldSnapshot};
