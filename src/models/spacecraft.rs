use crate::constants::DRAG_COEFFICIENT;
use crate::error::{SimError, SimResult};
use crate::models::actuation::{ActuationUnit, UnitFn, UnitKind};
use crate::models::state::State;
use crate::numerics::quaternion::Quaternion;
use crate::numerics::{Matrix3, Vector3};
use crate::recorder::Recorder;
use crate::world::geodesy::Geodetic;
use crate::world::World;

/// Mass and aerodynamic properties the drag model needs from a vehicle.
pub trait SpacecraftProperties {
    fn mass(&self) -> f64;
    fn drag_coefficient(&self) -> f64;
    fn reference_area(&self) -> f64;
}

/// A rigid body owned by the `World`. Created through
/// `World::add_spacecraft`, mutated every step, never destroyed during a run.
#[derive(Debug, Clone)]
pub struct Spacecraft {
    pub name: String,
    /// Rectangular extents (m); all-zero disables drag and attitude dynamics.
    pub size: Vector3,
    pub state: State,
    /// Net force (N) from the most recent derivative evaluation.
    pub net_force: Vector3,
    /// Net torque (N·m) from the most recent derivative evaluation.
    pub net_torque: Vector3,
    /// Body angular momentum I·ω (N·m·s) after the most recent step.
    pub net_momentum: Vector3,
    /// Geodetic footprint, refreshed at the start of every step.
    pub location: Geodetic,
    sensors: Vec<ActuationUnit>,
    controllers: Vec<ActuationUnit>,
    actuators: Vec<ActuationUnit>,
    torquers: Vec<ActuationUnit>,
    recorder: Option<Recorder>,
}

impl Spacecraft {
    pub(crate) fn new(name: &str) -> Self {
        Spacecraft {
            name: name.to_string(),
            size: Vector3::zeros(),
            state: State::default(),
            net_force: Vector3::zeros(),
            net_torque: Vector3::zeros(),
            net_momentum: Vector3::zeros(),
            location: Geodetic::default(),
            sensors: Vec::new(),
            controllers: Vec::new(),
            actuators: Vec::new(),
            torquers: Vec::new(),
            recorder: None,
        }
    }

    pub fn set_mass(&mut self, mass: f64) -> SimResult<()> {
        if mass <= 0.0 {
            return Err(SimError::NonPositiveMass(mass));
        }
        self.state.mass = mass;
        Ok(())
    }

    pub fn set_size(&mut self, size: Vector3) {
        self.size = size;
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.state.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vector3) {
        self.state.velocity = velocity;
    }

    pub fn set_orientation(&mut self, quaternion: Quaternion) -> SimResult<()> {
        self.state.quaternion = quaternion.normalize()?;
        Ok(())
    }

    pub fn set_angular_velocity(&mut self, rate: Vector3) {
        self.state.angular_velocity = rate;
    }

    /// Instantaneous rectangular-prism inertia tensor from the current mass
    /// and the fixed extents: (m/12)·diag(Ly²+Lz², Lx²+Lz², Lx²+Ly²).
    pub fn inertia_tensor(&self) -> Matrix3 {
        let m = self.state.mass;
        let lx2 = self.size[0] * self.size[0];
        let ly2 = self.size[1] * self.size[1];
        let lz2 = self.size[2] * self.size[2];
        Matrix3::from_diagonal(&Vector3::new(
            m / 12.0 * (ly2 + lz2),
            m / 12.0 * (lx2 + lz2),
            m / 12.0 * (lx2 + ly2),
        ))
    }

    pub fn add_sensor(&mut self, name: &str, func: UnitFn, params: Vec<f64>) {
        self.sensors
            .push(ActuationUnit::new(name, UnitKind::Sensor, func, params));
    }

    pub fn add_controller(&mut self, name: &str, func: UnitFn, params: Vec<f64>) {
        self.controllers
            .push(ActuationUnit::new(name, UnitKind::Controller, func, params));
    }

    pub fn add_actuator(&mut self, name: &str, func: UnitFn, params: Vec<f64>) {
        self.actuators
            .push(ActuationUnit::new(name, UnitKind::Actuator, func, params));
    }

    pub fn add_torquer(&mut self, name: &str, func: UnitFn, params: Vec<f64>) {
        self.torquers
            .push(ActuationUnit::new(name, UnitKind::TorqueSource, func, params));
    }

    pub(crate) fn actuator_units(&self) -> &[ActuationUnit] {
        &self.actuators
    }

    pub(crate) fn torquer_units(&self) -> &[ActuationUnit] {
        &self.torquers
    }

    /// Last-computed output of a named unit, searched across all categories.
    pub fn output(&self, name: &str) -> Option<Vector3> {
        self.sensors
            .iter()
            .chain(self.controllers.iter())
            .chain(self.actuators.iter())
            .chain(self.torquers.iter())
            .find(|unit| unit.name == name)
            .map(|unit| unit.output)
    }

    /// Evaluate the body's actuation graph for this step: sensors, then
    /// controllers, then actuators, then torque sources; registration order
    /// within each category. Each unit sees the outputs every earlier unit
    /// computed this same step.
    pub(crate) fn run_actuation(&mut self, world: &World) {
        for i in 0..self.sensors.len() {
            let func = self.sensors[i].func;
            let out = func(&*self, world, &self.sensors[i].params);
            self.sensors[i].output = out;
        }
        for i in 0..self.controllers.len() {
            let func = self.controllers[i].func;
            let out = func(&*self, world, &self.controllers[i].params);
            self.controllers[i].output = out;
        }
        for i in 0..self.actuators.len() {
            let func = self.actuators[i].func;
            let out = func(&*self, world, &self.actuators[i].params);
            self.actuators[i].output = out;
        }
        for i in 0..self.torquers.len() {
            let func = self.torquers[i].func;
            let out = func(&*self, world, &self.torquers[i].params);
            self.torquers[i].output = out;
        }
    }

    /// Attach a recorder tracking the given observables. "Datetime" is
    /// implicit and always the first column.
    pub fn track(&mut self, observables: &[&str]) {
        self.recorder = Some(Recorder::new(observables));
    }

    pub fn recorder(&self) -> Option<&Recorder> {
        self.recorder.as_ref()
    }

    pub(crate) fn record(&mut self, datetime: &str) -> SimResult<()> {
        if let Some(mut recorder) = self.recorder.take() {
            let result = recorder.update(datetime, self);
            self.recorder = Some(recorder);
            result?;
        }
        Ok(())
    }

    /// Resolve a named observable to flattened (column, value) pairs.
    /// Actuation unit outputs are addressable by their unit name.
    pub fn observable(&self, name: &str) -> Option<Vec<(String, f64)>> {
        let vector = |label: &str, v: &Vector3| {
            vec![
                (format!("{} X", label), v[0]),
                (format!("{} Y", label), v[1]),
                (format!("{} Z", label), v[2]),
            ]
        };

        match name {
            "Mass" => Some(vec![("Mass".to_string(), self.state.mass)]),
            "Position" => Some(vector("Position", &self.state.position)),
            "Velocity" => Some(vector("Velocity", &self.state.velocity)),
            "Quaternion" => Some(vec![
                ("Quaternion W".to_string(), self.state.quaternion.data[0]),
                ("Quaternion X".to_string(), self.state.quaternion.data[1]),
                ("Quaternion Y".to_string(), self.state.quaternion.data[2]),
                ("Quaternion Z".to_string(), self.state.quaternion.data[3]),
            ]),
            "AngularRate" => Some(vector("AngularRate", &self.state.angular_velocity)),
            "Latitude" => Some(vec![("Latitude".to_string(), self.location.latitude)]),
            "Longitude" => Some(vec![("Longitude".to_string(), self.location.longitude)]),
            "Altitude" => Some(vec![("Altitude".to_string(), self.location.altitude)]),
            "NetForce" => Some(vector("NetForce", &self.net_force)),
            "NetTorque" => Some(vector("NetTorque", &self.net_torque)),
            "NetMomentum" => Some(vector("NetMomentum", &self.net_momentum)),
            _ => self.output(name).map(|v| vector(name, &v)),
        }
    }
}

impl SpacecraftProperties for Spacecraft {
    fn mass(&self) -> f64 {
        self.state.mass
    }

    fn drag_coefficient(&self) -> f64 {
        DRAG_COEFFICIENT
    }

    /// Mean cross-sectional area of the rectangular extents.
    fn reference_area(&self) -> f64 {
        let (lx, ly, lz) = (self.size[0], self.size[1], self.size[2]);
        (lx * ly + lx * lz + ly * lz) / 3.0
    }
}
