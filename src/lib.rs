//! Six-degree-of-freedom simulation of rigid spacecraft in low Earth orbit.
//!
//! The crate propagates one or more spacecraft under point-mass gravity,
//! exponential-atmosphere drag and pluggable actuation torques with a
//! fixed-step RK4 integrator, while a world-level clock tracks Julian date,
//! Greenwich mean sidereal time and each body's geodetic footprint.

pub mod constants;
pub mod error;
pub mod gnc;
pub mod integrators;
pub mod models;
pub mod numerics;
pub mod physics;
pub mod recorder;
pub mod world;

pub use error::{SimError, SimResult};
pub use models::state::State;
pub use numerics::quaternion::Quaternion;
pub use numerics::{Matrix3, Vector3};
pub use world::World;
