use crate::numerics::Vector3;

/// Point-mass gravitational force: F = -(μ·m/|r|³)·r.
pub fn gravity_force(mu: f64, mass: f64, position: &Vector3) -> Vector3 {
    if mu == 0.0 {
        return Vector3::zeros();
    }
    let r = position.magnitude();
    -(mu * mass / (r * r * r)) * position
}

/// Specific mechanical energy ξ = v²/2 − μ/r (J/kg).
pub fn specific_energy(mu: f64, position: &Vector3, velocity: &Vector3) -> f64 {
    let r = position.magnitude();
    let v = velocity.magnitude();
    v * v / 2.0 - mu / r
}

/// Specific angular momentum h = r × v (m²/s).
pub fn specific_angular_momentum(position: &Vector3, velocity: &Vector3) -> Vector3 {
    position.cross(velocity)
}
