pub mod clock;
pub mod geodesy;

use std::mem;

use hifitime::Epoch;

use crate::constants::{E2_EARTH, MU_EARTH, R_EARTH};
use crate::error::{SimError, SimResult};
use crate::integrators::rk4::RK4;
use crate::models::spacecraft::Spacecraft;
use crate::physics::dynamics::SpacecraftDynamics;
use crate::physics::geomagnetic::{dipole_field, GeomagneticModel};
use crate::physics::sun::{sun_state, SunState};
use crate::world::clock::Clock;
use crate::world::geodesy::{geodetic_from_inertial, Geodetic};

/// Orbit-only propagation freezes each body's angular state; six-DOF also
/// integrates the attitude kinematics and Euler's equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationMode {
    OrbitOnly,
    SixDof,
}

/// Owns every spacecraft, the global clock and the shared environment, and
/// drives the per-step update loop. One `World` per simulation run.
pub struct World {
    bodies: Vec<Spacecraft>,
    /// Gravitational parameter of the central body (m³/s²).
    pub mu: f64,
    /// Equatorial radius of the central body (m).
    pub radius: f64,
    /// Geomagnetic field collaborator used by magnetometer sensors.
    pub geomagnetic: GeomagneticModel,
    clock: Clock,
    sun: SunState,
    mode: PropagationMode,
    time: f64,
}

impl World {
    pub fn new() -> Self {
        World {
            bodies: Vec::new(),
            mu: MU_EARTH,
            radius: R_EARTH,
            geomagnetic: dipole_field,
            clock: Clock::default(),
            sun: SunState::default(),
            mode: PropagationMode::OrbitOnly,
            time: 0.0,
        }
    }

    /// Set the calendar reference instant of simulation time zero and
    /// recompute the Julian-date/GMST bookkeeping.
    #[allow(clippy::too_many_arguments)]
    pub fn epoch(
        &mut self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
    ) -> SimResult<()> {
        self.clock = Clock::from_calendar(year, month, day, hour, minute, second, microsecond)?;
        self.sun = sun_state(self.clock.julian_date_at(self.time));
        Ok(())
    }

    pub fn set_mode(&mut self, mode: PropagationMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> PropagationMode {
        self.mode
    }

    /// Create a named spacecraft owned by this world; returns its index in
    /// the body table, the handle used for all later access.
    pub fn add_spacecraft(&mut self, name: &str) -> usize {
        self.bodies.push(Spacecraft::new(name));
        self.bodies.len() - 1
    }

    pub fn num_spacecraft(&self) -> usize {
        self.bodies.len()
    }

    pub fn list_spacecraft(&self) -> Vec<String> {
        self.bodies.iter().map(|b| b.name.clone()).collect()
    }

    pub fn get(&self, index: usize) -> SimResult<&Spacecraft> {
        self.bodies.get(index).ok_or(SimError::BodyIndexOutOfRange {
            index,
            len: self.bodies.len(),
        })
    }

    pub fn get_mut(&mut self, index: usize) -> SimResult<&mut Spacecraft> {
        let len = self.bodies.len();
        self.bodies
            .get_mut(index)
            .ok_or(SimError::BodyIndexOutOfRange { index, len })
    }

    pub fn find(&self, name: &str) -> Option<&Spacecraft> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Spacecraft> {
        self.bodies.iter_mut().find(|b| b.name == name)
    }

    /// Elapsed simulation time (s).
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Calendar instant of the current simulation time.
    pub fn datenow(&self) -> Epoch {
        self.clock.datetime_at(self.time)
    }

    pub fn julian_date(&self) -> f64 {
        self.clock.julian_date_at(self.time)
    }

    /// GMST at the current simulation time (deg).
    pub fn gmst_now(&self) -> f64 {
        self.clock.gmst_at(self.time)
    }

    pub fn decimal_year(&self) -> f64 {
        self.clock.decimal_year_at(self.time)
    }

    /// Sun geometry computed at the top of the current step.
    pub fn sun(&self) -> &SunState {
        &self.sun
    }

    /// Geodetic footprint of an inertial position at elapsed time `t`.
    pub fn locate(&self, position: &crate::numerics::Vector3, t: f64) -> Geodetic {
        geodetic_from_inertial(position, self.clock.gmst_at(t), self.radius, E2_EARTH)
    }

    /// Advance the whole simulation by one fixed step: refresh the Sun,
    /// then for every body recompute its footprint, run its actuation graph,
    /// integrate its state and record; finally move the clock. An error
    /// aborts the step without advancing the clock.
    pub fn advance(&mut self, dt: f64) -> SimResult<()> {
        self.sun = sun_state(self.clock.julian_date_at(self.time));

        // The body table is detached during the step so each body can be
        // stepped mutably against the read-only world.
        let mut bodies = mem::take(&mut self.bodies);
        let result = self.step_bodies(&mut bodies, dt);
        self.bodies = bodies;
        result?;

        self.time += dt;
        Ok(())
    }

    fn step_bodies(&self, bodies: &mut [Spacecraft], dt: f64) -> SimResult<()> {
        for body in bodies.iter_mut() {
            if body.state.mass <= 0.0 {
                return Err(SimError::NonPositiveMass(body.state.mass));
            }

            body.location = self.locate(&body.state.position, self.time);
            body.run_actuation(self);

            let mut integrator = RK4::new(SpacecraftDynamics::new(self, &*body));
            let next = integrator.integrate(&body.state, self.time, dt);
            let dynamics = integrator.into_inner();
            let (net_force, net_torque) = (dynamics.net_force, dynamics.net_torque);

            body.state = next;
            body.state.quaternion = body.state.quaternion.normalize()?;
            body.net_force = net_force;
            body.net_torque = net_torque;
            body.net_momentum = body.inertia_tensor() * body.state.angular_velocity;

            let stamp = self.clock.datetime_at(self.time + dt).to_string();
            body.record(&stamp)?;
        }
        Ok(())
    }

    /// Bounded drive loop: advance in fixed steps until `t_end`.
    pub fn run(&mut self, t_end: f64, dt: f64) -> SimResult<()> {
        while self.time < t_end {
            self.advance(dt)?;
        }
        Ok(())
    }
}

impl Default for World {
    fn default() -> Self {
        World::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerics::Vector3;
    use approx::assert_abs_diff_eq;

    #[test]
    fn body_table_bookkeeping() {
        let mut world = World::new();
        world.add_spacecraft("DIWATA-1");
        world.add_spacecraft("DIWATA-2");

        assert_eq!(world.num_spacecraft(), 2);
        assert_eq!(
            world.list_spacecraft(),
            vec!["DIWATA-1".to_string(), "DIWATA-2".to_string()]
        );
        assert!(world.get(1).is_ok());
        assert!(matches!(
            world.get(2),
            Err(SimError::BodyIndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(world.find("DIWATA-1").is_some());
        assert!(world.find("DIWATA-3").is_none());
    }

    #[test]
    fn advance_rejects_unset_mass() {
        let mut world = World::new();
        world.add_spacecraft("ghost");
        let before = world.time();
        assert!(matches!(
            world.advance(1.0),
            Err(SimError::NonPositiveMass(_))
        ));
        // The failed step must not advance the clock.
        assert_abs_diff_eq!(world.time(), before);
    }

    #[test]
    fn zero_gravity_step_translates_in_a_straight_line() {
        let mut world = World::new();
        world.mu = 0.0;
        let idx = world.add_spacecraft("free");
        {
            let sc = world.get_mut(idx).unwrap();
            sc.set_mass(1.0).unwrap();
            sc.set_position(Vector3::new(100.0, 60.0, 80.0));
            sc.set_velocity(Vector3::new(5.0, 3.0, 4.0));
        }
        world.advance(1.0).unwrap();

        let sc = world.get(idx).unwrap();
        assert_abs_diff_eq!(
            sc.state.position,
            Vector3::new(105.0, 63.0, 84.0),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(sc.state.velocity, Vector3::new(5.0, 3.0, 4.0), epsilon = 1e-12);
        assert_abs_diff_eq!(world.time(), 1.0);
    }

    #[test]
    fn body_table_is_detached_while_units_run() {
        fn table_size(_: &Spacecraft, world: &World, _: &[f64]) -> Vector3 {
            Vector3::new(world.num_spacecraft() as f64, world.mu, world.radius)
        }

        let mut world = World::new();
        world.mu = 0.0;
        let idx = world.add_spacecraft("introspect");
        {
            let sc = world.get_mut(idx).unwrap();
            sc.set_mass(1.0).unwrap();
            sc.add_sensor("TableSize", table_size, vec![]);
        }
        world.advance(1.0).unwrap();

        let reading = world.get(idx).unwrap().output("TableSize").unwrap();
        // Units cannot see the body table mid-step; the environment stays
        // readable.
        assert_abs_diff_eq!(reading[0], 0.0);
        assert_abs_diff_eq!(reading[2], R_EARTH);
    }

    #[test]
    fn step_copies_net_force_back_onto_the_body() {
        let mut world = World::new();
        let idx = world.add_spacecraft("probe");
        {
            let sc = world.get_mut(idx).unwrap();
            sc.set_mass(4.0).unwrap();
            sc.set_position(Vector3::new(6778.137e3, 0.0, 0.0));
            sc.set_velocity(Vector3::new(0.0, 7.67e3, 0.0));
        }
        world.advance(1.0).unwrap();

        let sc = world.get(idx).unwrap();
        // Gravity from the final derivative evaluation, pointing inward.
        assert!(sc.net_force.magnitude() > 0.0);
        assert!(sc.net_force.dot(&sc.state.position) < 0.0);
    }

    #[test]
    fn run_reaches_the_end_time_in_fixed_steps() {
        let mut world = World::new();
        world.mu = 0.0;
        let idx = world.add_spacecraft("free");
        world.get_mut(idx).unwrap().set_mass(1.0).unwrap();
        world.run(2.0, 0.5).unwrap();
        assert_abs_diff_eq!(world.time(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn epoch_updates_sun_and_sidereal_state() {
        let mut world = World::new();
        world.epoch(2004, 3, 3, 4, 30, 0, 0).unwrap();
        assert_abs_diff_eq!(world.gmst_now(), 228.79354253524252, epsilon = 1e-9);
        assert_abs_diff_eq!(world.sun().direction.magnitude(), 1.0, epsilon = 1e-12);
        // Early March: Sun south of the equator, moving north.
        assert!(world.sun().direction[2] < 0.0);
    }
}
