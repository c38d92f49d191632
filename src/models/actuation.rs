use crate::models::spacecraft::Spacecraft;
use crate::numerics::Vector3;
use crate::world::World;

/// Pure function backing an actuation unit. Evaluated once per step against
/// the owning body and the read-only world snapshot; `params` is the unit's
/// fixed parameter list bound at registration.
///
/// The world's body table is detached while a step is in flight, so unit
/// functions must reach their own body through the first argument only;
/// `World::get`/`find`/`list_spacecraft` see an empty table from inside the
/// actuation pass. Environment state (clock, Sun, field model, `mu`,
/// `radius`) remains readable.
pub type UnitFn = fn(&Spacecraft, &World, &[f64]) -> Vector3;

/// Category of an actuation unit. Per step the world evaluates a body's
/// units category by category in this order, registration order within a
/// category, so later stages can read earlier stages' same-step outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Sensor,
    Controller,
    Actuator,
    TorqueSource,
}

/// Named sensor/controller/actuator/torque-source attached to one body.
#[derive(Debug, Clone)]
pub struct ActuationUnit {
    pub name: String,
    pub kind: UnitKind,
    pub func: UnitFn,
    pub params: Vec<f64>,
    /// Output of the most recent evaluation, exposed for recording and for
    /// downstream units.
    pub output: Vector3,
}

impl ActuationUnit {
    pub fn new(name: &str, kind: UnitKind, func: UnitFn, params: Vec<f64>) -> Self {
        ActuationUnit {
            name: name.to_string(),
            kind,
            func,
            params,
            output: Vector3::zeros(),
        }
    }
}
