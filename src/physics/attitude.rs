use crate::error::{SimError, SimResult};
use crate::numerics::quaternion::Quaternion;
use crate::numerics::{Matrix3, Vector3};

/// Euler's rigid-body equation solved for the body angular acceleration:
/// dω/dt = I⁻¹·(τ − ω×(I·ω)).
pub fn angular_acceleration(
    inertia: &Matrix3,
    angular_velocity: &Vector3,
    torque: &Vector3,
) -> SimResult<Vector3> {
    let w = *angular_velocity;
    let gyro = w.cross(&(inertia * w));
    let inverse = inertia.try_inverse().ok_or(SimError::SingularInertia)?;
    Ok(inverse * (torque - gyro))
}

/// Gravity-gradient torque on a body at inertial position `r`:
/// τ = (3μ/|r|³) · ẑ_b × (I·ẑ_b), with ẑ_b the nadir direction expressed in
/// the body frame. Usable directly as a torque contributor.
pub fn gravity_gradient_torque(
    mu: f64,
    inertia: &Matrix3,
    position: &Vector3,
    quaternion: &Quaternion,
) -> Vector3 {
    let r_mag = position.magnitude();
    if r_mag == 0.0 || mu == 0.0 {
        return Vector3::zeros();
    }
    let nadir_inertial = -position / r_mag;
    let nadir_body = quaternion.to_matrix() * nadir_inertial;
    (3.0 * mu / (r_mag * r_mag * r_mag)) * nadir_body.cross(&(inertia * nadir_body))
}
