use crate::numerics::quaternion::Quaternion;
use crate::numerics::Vector3;

/// The five state variables, in propagation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateField {
    Mass,
    Position,
    Velocity,
    Orientation,
    AngularRate,
}

impl StateField {
    pub const ALL: [StateField; 5] = [
        StateField::Mass,
        StateField::Position,
        StateField::Velocity,
        StateField::Orientation,
        StateField::AngularRate,
    ];
}

/// A single state variable pulled out by `State::element`.
#[derive(Debug, Clone, Copy)]
pub enum StateElement {
    Scalar(f64),
    Vector(Vector3),
    Orientation(Quaternion),
}

/// Point in the integration vector space: mass, translational state,
/// orientation and body angular rate.
///
/// The arithmetic operators combine every field element-wise, treating the
/// quaternion as a plain 4-tuple. That is the reducer the RK4 weighted sum
/// needs; semantic orientation composition lives on `Quaternion::compose`.
/// The integrated orientation is renormalized by the caller after each step.
#[derive(Debug, Clone, Copy)]
pub struct State {
    pub mass: f64,
    pub position: Vector3,
    pub velocity: Vector3,
    pub quaternion: Quaternion,
    pub angular_velocity: Vector3,
}

impl State {
    pub fn new(
        mass: f64,
        position: Vector3,
        velocity: Vector3,
        quaternion: Quaternion,
        angular_velocity: Vector3,
    ) -> Self {
        State {
            mass,
            position,
            velocity,
            quaternion,
            angular_velocity,
        }
    }

    /// Additive identity: every component zero, including the quaternion.
    /// Derivative states start from here, so a frozen orientation
    /// contributes nothing to the weighted sum.
    pub fn zero() -> Self {
        State {
            mass: 0.0,
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            quaternion: Quaternion::new(0.0, 0.0, 0.0, 0.0),
            angular_velocity: Vector3::zeros(),
        }
    }

    pub fn element(&self, field: StateField) -> StateElement {
        match field {
            StateField::Mass => StateElement::Scalar(self.mass),
            StateField::Position => StateElement::Vector(self.position),
            StateField::Velocity => StateElement::Vector(self.velocity),
            StateField::Orientation => StateElement::Orientation(self.quaternion),
            StateField::AngularRate => StateElement::Vector(self.angular_velocity),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        State {
            mass: 0.0,
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            quaternion: Quaternion::identity(),
            angular_velocity: Vector3::zeros(),
        }
    }
}

impl std::ops::Add for State {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        State {
            mass: self.mass + other.mass,
            position: self.position + other.position,
            velocity: self.velocity + other.velocity,
            quaternion: Quaternion {
                data: self.quaternion.data + other.quaternion.data,
            },
            angular_velocity: self.angular_velocity + other.angular_velocity,
        }
    }
}

impl std::ops::Sub for State {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        State {
            mass: self.mass - other.mass,
            position: self.position - other.position,
            velocity: self.velocity - other.velocity,
            quaternion: Quaternion {
                data: self.quaternion.data - other.quaternion.data,
            },
            angular_velocity: self.angular_velocity - other.angular_velocity,
        }
    }
}

impl std::ops::Mul<f64> for State {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        State {
            mass: self.mass * scalar,
            position: self.position * scalar,
            velocity: self.velocity * scalar,
            quaternion: Quaternion {
                data: self.quaternion.data * scalar,
            },
            angular_velocity: self.angular_velocity * scalar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> State {
        State::new(
            4.0,
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-1.0, 0.5, 0.25),
            Quaternion::new(0.5, 0.5, 0.5, 0.5),
            Vector3::new(0.1, 0.2, 0.3),
        )
    }

    #[test]
    fn add_and_scale_are_elementwise() {
        let s = sample();
        let doubled = s + s;
        let scaled = s * 2.0;
        assert_abs_diff_eq!(doubled.mass, scaled.mass);
        assert_abs_diff_eq!(doubled.position, scaled.position);
        assert_abs_diff_eq!(doubled.velocity, scaled.velocity);
        assert_abs_diff_eq!(doubled.quaternion.data, scaled.quaternion.data);
        assert_abs_diff_eq!(doubled.angular_velocity, scaled.angular_velocity);
    }

    #[test]
    fn sub_inverts_add() {
        let s = sample();
        let back = (s + s) - s;
        assert_abs_diff_eq!(back.position, s.position);
        assert_abs_diff_eq!(back.quaternion.data, s.quaternion.data);
    }

    #[test]
    fn zero_is_additive_identity() {
        let s = sample();
        let same = s + State::zero();
        assert_abs_diff_eq!(same.mass, s.mass);
        assert_abs_diff_eq!(same.quaternion.data, s.quaternion.data);
    }

    #[test]
    fn element_access_follows_declaration_order() {
        let s = sample();
        match s.element(StateField::ALL[0]) {
            StateElement::Scalar(m) => assert_abs_diff_eq!(m, 4.0),
            other => panic!("expected scalar mass, got {:?}", other),
        }
        match s.element(StateField::ALL[3]) {
            StateElement::Orientation(q) => assert_abs_diff_eq!(q.norm(), 1.0),
            other => panic!("expected orientation, got {:?}", other),
        }
    }
}
