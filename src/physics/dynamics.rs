use crate::constants::EARTH_ANGULAR_VELOCITY;
use crate::models::spacecraft::Spacecraft;
use crate::models::state::State;
use crate::numerics::Vector3;
use crate::physics::atmosphere::drag_force;
use crate::physics::attitude::angular_acceleration;
use crate::physics::gravity::gravity_force;
use crate::world::{PropagationMode, World};

/// A first-order ODE right-hand side the integrator can drive. Takes `&mut
/// self` so an implementation may carry per-evaluation accumulators.
pub trait EquationsOfMotion {
    type State;

    fn compute_derivative(&mut self, state: &Self::State, time: f64) -> Self::State;
}

/// Derivative function for one spacecraft, closed over the read-only world.
///
/// The force/torque accumulators are cleared at the start of every
/// evaluation; their values after `RK4::integrate` returns are those of the
/// final sub-step and are copied back onto the body for recording.
pub struct SpacecraftDynamics<'a> {
    world: &'a World,
    body: &'a Spacecraft,
    pub net_force: Vector3,
    pub net_torque: Vector3,
}

impl<'a> SpacecraftDynamics<'a> {
    pub fn new(world: &'a World, body: &'a Spacecraft) -> Self {
        SpacecraftDynamics {
            world,
            body,
            net_force: Vector3::zeros(),
            net_torque: Vector3::zeros(),
        }
    }
}

impl EquationsOfMotion for SpacecraftDynamics<'_> {
    type State = State;

    fn compute_derivative(&mut self, state: &State, _time: f64) -> State {
        self.net_force = Vector3::zeros();
        self.net_torque = Vector3::zeros();

        self.net_force += gravity_force(self.world.mu, state.mass, &state.position);
        self.net_force += drag_force(
            self.body,
            &state.position,
            &state.velocity,
            self.world.radius,
            EARTH_ANGULAR_VELOCITY,
        );

        let mut derivative = State::zero();
        derivative.position = state.velocity;
        derivative.velocity = self.net_force / state.mass;

        if self.world.mode() == PropagationMode::SixDof {
            // Actuator torques were computed for this step before
            // integration began; torque sources re-evaluate here.
            for unit in self.body.actuator_units() {
                self.net_torque += unit.output;
            }
            for unit in self.body.torquer_units() {
                self.net_torque += (unit.func)(self.body, self.world, &unit.params);
            }

            let inertia = self.body.inertia_tensor();
            // A zero-size body has a singular inertia; its angular state
            // stays frozen.
            if let Ok(alpha) = angular_acceleration(
                &inertia,
                &state.angular_velocity,
                &self.net_torque,
            ) {
                derivative.angular_velocity = alpha;
                derivative.quaternion = state.quaternion.derivative(&state.angular_velocity);
            }
        }

        derivative
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MU_EARTH;
    use crate::integrators::rk4::RK4;
    use approx::assert_abs_diff_eq;

    fn leo_world() -> World {
        let mut world = World::new();
        world.add_spacecraft("probe");
        let sc = world.get_mut(0).unwrap();
        sc.set_mass(4.0).unwrap();
        sc.set_position(Vector3::new(6778.137e3, 0.0, 0.0));
        sc.set_velocity(Vector3::new(0.0, 7.67e3, 0.0));
        world
    }

    #[test]
    fn accumulators_are_cleared_every_evaluation() {
        let world = leo_world();
        let body = world.get(0).unwrap();
        let mut dynamics = SpacecraftDynamics::new(&world, body);

        let first = dynamics.compute_derivative(&body.state, 0.0);
        let force_after_first = dynamics.net_force;
        let second = dynamics.compute_derivative(&body.state, 0.0);

        assert_abs_diff_eq!(dynamics.net_force, force_after_first, epsilon = 1e-9);
        assert_abs_diff_eq!(first.velocity, second.velocity, epsilon = 1e-12);
    }

    #[test]
    fn derivative_follows_two_body_acceleration() {
        let world = leo_world();
        let body = world.get(0).unwrap();
        let mut dynamics = SpacecraftDynamics::new(&world, body);

        let d = dynamics.compute_derivative(&body.state, 0.0);
        assert_abs_diff_eq!(d.position, body.state.velocity, epsilon = 1e-12);
        let expected = gravity_force(MU_EARTH, 4.0, &body.state.position) / 4.0;
        assert_abs_diff_eq!(d.velocity, expected, epsilon = 1e-12);
        // Orbit-only mode freezes the angular state.
        assert_abs_diff_eq!(d.angular_velocity, Vector3::zeros());
        assert_abs_diff_eq!(d.quaternion.data.magnitude(), 0.0);
    }

    #[test]
    fn rk4_step_matches_closed_form_in_zero_gravity() {
        let mut world = World::new();
        world.mu = 0.0;
        world.add_spacecraft("free");
        let sc = world.get_mut(0).unwrap();
        sc.set_mass(1.0).unwrap();
        sc.set_position(Vector3::new(100.0, 60.0, 80.0));
        sc.set_velocity(Vector3::new(5.0, 3.0, 4.0));

        let body = world.get(0).unwrap();
        let mut integrator = RK4::new(SpacecraftDynamics::new(&world, body));
        let next = integrator.integrate(&body.state, 0.0, 1.0);

        assert_abs_diff_eq!(next.position, Vector3::new(105.0, 63.0, 84.0), epsilon = 1e-9);
        assert_abs_diff_eq!(next.velocity, Vector3::new(5.0, 3.0, 4.0), epsilon = 1e-12);
    }
}
