//! Ready-made actuation units: sensor, controller and actuator functions
//! with the `UnitFn` signature, wired together by the unit names they look
//! up on their body. A magnetic detumbling chain registers as
//!
//! ```text
//! body.add_sensor("Magnetometer", gnc::sensors::magnetometer, vec![]);
//! body.add_controller("Bdot", gnc::control::bdot, vec![gain]);
//! body.add_actuator("Magnetorquer", gnc::actuators::magnetorquer, vec![]);
//! ```

pub mod actuators;
pub mod control;
pub mod sensors;

/// Unit names the cross-stage lookups are keyed on.
pub const MAGNETOMETER: &str = "Magnetometer";
pub const BDOT: &str = "Bdot";
