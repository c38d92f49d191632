pub mod actuation;
pub mod ground_station;
pub mod spacecraft;
pub mod state;

pub use spacecraft::{Spacecraft, SpacecraftProperties};
pub use state::State;
