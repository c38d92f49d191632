use crate::gnc::{BDOT, MAGNETOMETER};
use crate::models::spacecraft::Spacecraft;
use crate::numerics::Vector3;
use crate::physics::attitude::gravity_gradient_torque;
use crate::world::World;

/// Magnetorquer torque τ = m × B (N·m): the dipole commanded by the
/// controller named "Bdot" crossed with the field measured by the sensor
/// named "Magnetometer", both from this same step.
pub fn magnetorquer(body: &Spacecraft, _world: &World, _params: &[f64]) -> Vector3 {
    let dipole = match body.output(BDOT) {
        Some(m) => m,
        None => return Vector3::zeros(),
    };
    let field = match body.output(MAGNETOMETER) {
        Some(b) => b,
        None => return Vector3::zeros(),
    };
    dipole.cross(&field)
}

/// Gravity-gradient torque as a registrable torque source; re-evaluated at
/// every derivative sub-step.
pub fn gravity_gradient(body: &Spacecraft, world: &World, _params: &[f64]) -> Vector3 {
    gravity_gradient_torque(
        world.mu,
        &body.inertia_tensor(),
        &body.state.position,
        &body.state.quaternion,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gnc::control::bdot;
    use crate::gnc::sensors::magnetometer;
    use approx::assert_abs_diff_eq;

    #[test]
    fn magnetorquer_torque_damps_the_measured_rate() {
        let mut world = World::new();
        let idx = world.add_spacecraft("sat");
        {
            let radius = world.radius;
            let sc = world.get_mut(idx).unwrap();
            sc.set_mass(4.0).unwrap();
            sc.set_size(Vector3::new(0.1, 0.1, 0.1));
            sc.set_position(Vector3::new(radius + 500e3, 0.0, 0.0));
            sc.set_velocity(Vector3::new(0.0, 7.6e3, 0.0));
            sc.set_angular_velocity(Vector3::new(0.05, 0.02, 0.01));
            sc.add_sensor(MAGNETOMETER, magnetometer, vec![]);
            sc.add_controller(BDOT, bdot, vec![5e3]);
            sc.add_actuator("Magnetorquer", magnetorquer, vec![]);
        }
        world.advance(0.1).unwrap();

        let body = world.get(idx).unwrap();
        let torque = body.output("Magnetorquer").unwrap();
        let rate = Vector3::new(0.05, 0.02, 0.01);
        // τ = k·(ω×B)×B never has a positive component along ω.
        assert!(torque.dot(&rate) <= 1e-18);
        assert!(torque.magnitude() > 0.0);
    }

    #[test]
    fn gravity_gradient_torquer_tracks_the_attitude_tilt() {
        use crate::numerics::quaternion::Quaternion;

        let mut world = World::new();
        let idx = world.add_spacecraft("tilted");
        {
            let radius = world.radius;
            let sc = world.get_mut(idx).unwrap();
            sc.set_mass(4.0).unwrap();
            sc.set_size(Vector3::new(0.1, 0.1, 0.3));
            sc.set_position(Vector3::new(radius + 500e3, 0.0, 0.0));
            let tilt =
                Quaternion::from_axis_angle(&Vector3::new(0.0, 1.0, 0.0), 0.3).unwrap();
            sc.set_orientation(tilt).unwrap();
        }
        let body = world.get(idx).unwrap();
        let torque = gravity_gradient(body, &world, &[]);
        assert!(torque.magnitude() > 0.0);

        // An axisymmetric body aligned with nadir feels none.
        let aligned = {
            let sc = world.get_mut(idx).unwrap();
            sc.set_orientation(Quaternion::identity()).unwrap();
            world.get(idx).unwrap().clone()
        };
        let balanced = gravity_gradient(&aligned, &world, &[]);
        assert_abs_diff_eq!(balanced.magnitude(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn missing_upstream_units_command_no_torque() {
        let mut world = World::new();
        let idx = world.add_spacecraft("bare");
        world.get_mut(idx).unwrap().set_mass(4.0).unwrap();
        let body = world.get(idx).unwrap();
        assert_abs_diff_eq!(magnetorquer(body, &world, &[]), Vector3::zeros());
    }
}
