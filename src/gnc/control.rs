use crate::gnc::MAGNETOMETER;
use crate::models::spacecraft::Spacecraft;
use crate::numerics::Vector3;
use crate::world::World;

/// Proportional rate damping: commanded torque τ = -k·ω (N·m), gain in
/// `params[0]`. Registers as an actuator when the torque is applied
/// directly, or as a controller feeding a torque-producing actuator.
pub fn rate_damping(body: &Spacecraft, _world: &World, params: &[f64]) -> Vector3 {
    let gain = params.first().copied().unwrap_or(0.0);
    -gain * body.state.angular_velocity
}

/// B-dot detumbling law: commanded magnetic dipole m = k·(ω × B) (A·m²),
/// equivalent to m = -k·Ḃ for a field that is quasi-static in the inertial
/// frame. Gain in `params[0]`; reads the same-step output of the sensor
/// named "Magnetometer".
pub fn bdot(body: &Spacecraft, _world: &World, params: &[f64]) -> Vector3 {
    let gain = params.first().copied().unwrap_or(0.0);
    let field = match body.output(MAGNETOMETER) {
        Some(b) => b,
        None => return Vector3::zeros(),
    };
    gain * body.state.angular_velocity.cross(&field)
}
