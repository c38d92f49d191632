use nalgebra as na;

use crate::error::{SimError, SimResult};
use crate::numerics::{Matrix3, Vector3};

const ZERO_NORM_TOLERANCE: f64 = 1e-12;
const ORTHOGONALITY_TOLERANCE: f64 = 1e-3;
/// Two orientations closer than this angle (rad, ≈ 1e-8 degrees) compare equal.
const EQUALITY_ANGLE: f64 = 1e-8 * std::f64::consts::PI / 180.0;

/// Scalar-first attitude quaternion: q = [q0; q1; q2; q3] = [w; x; y; z],
/// mapping the inertial frame to the body frame.
///
/// `new` is a raw component constructor so that integrator arithmetic can
/// carry non-unit quaternion rates; orientation values go through `unit` or
/// `normalize`, which reject zero magnitude.
#[derive(Debug, Clone, Copy)]
pub struct Quaternion {
    pub data: na::Vector4<f64>,
}

impl Quaternion {
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Quaternion {
            data: na::Vector4::new(w, x, y, z),
        }
    }

    pub fn identity() -> Self {
        Quaternion::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Normalized constructor for orientation values.
    pub fn unit(w: f64, x: f64, y: f64, z: f64) -> SimResult<Self> {
        Quaternion::new(w, x, y, z).normalize()
    }

    pub fn from_axis_angle(axis: &Vector3, angle: f64) -> SimResult<Self> {
        let n = axis.magnitude();
        if n < ZERO_NORM_TOLERANCE {
            return Err(SimError::ZeroMagnitude);
        }
        let half = angle / 2.0;
        let s = half.sin() / n;
        Ok(Quaternion::new(
            half.cos(),
            axis[0] * s,
            axis[1] * s,
            axis[2] * s,
        ))
    }

    pub fn scalar(&self) -> f64 {
        self.data[0]
    }

    pub fn vector(&self) -> Vector3 {
        Vector3::new(self.data[1], self.data[2], self.data[3])
    }

    pub fn norm(&self) -> f64 {
        self.data.magnitude()
    }

    pub fn normalize(&self) -> SimResult<Self> {
        let n = self.norm();
        if n < ZERO_NORM_TOLERANCE {
            return Err(SimError::ZeroMagnitude);
        }
        Ok(Quaternion { data: self.data / n })
    }

    pub fn conjugate(&self) -> Self {
        Quaternion::new(self.data[0], -self.data[1], -self.data[2], -self.data[3])
    }

    /// Multiplicative inverse; for unit quaternions this equals the conjugate.
    pub fn inverse(&self) -> SimResult<Self> {
        let n2 = self.data.magnitude_squared();
        if n2 < ZERO_NORM_TOLERANCE * ZERO_NORM_TOLERANCE {
            return Err(SimError::ZeroMagnitude);
        }
        let c = self.conjugate();
        Ok(Quaternion { data: c.data / n2 })
    }

    /// Raw Hamilton product, no renormalization.
    fn hamilton(&self, other: &Quaternion) -> Quaternion {
        let (w1, v1) = (self.scalar(), self.vector());
        let (w2, v2) = (other.scalar(), other.vector());
        let w = w1 * w2 - v1.dot(&v2);
        let v = w1 * v2 + w2 * v1 + v1.cross(&v2);
        Quaternion::new(w, v[0], v[1], v[2])
    }

    /// Orientation composition: Hamilton product followed by renormalization.
    pub fn compose(&self, other: &Quaternion) -> SimResult<Quaternion> {
        self.hamilton(other).normalize()
    }

    /// Relative orientation `self ∘ other⁻¹`.
    pub fn difference(&self, other: &Quaternion) -> SimResult<Quaternion> {
        self.hamilton(&other.inverse()?).normalize()
    }

    /// Rotation angle (rad) between two orientations, insensitive to the
    /// quaternion double cover. Computed from the chordal distance to the
    /// nearer of `other` and its antipode; unlike `acos` of the dot product
    /// this stays exact near zero.
    pub fn angle_to(&self, other: &Quaternion) -> SimResult<f64> {
        let a = self.normalize()?;
        let b = other.normalize()?;
        let chord = (a.data - b.data)
            .magnitude()
            .min((a.data + b.data).magnitude());
        Ok(4.0 * (chord / 2.0).min(1.0).asin())
    }

    /// Equality up to the antipodal twin, within 1e-8 degrees.
    pub fn approx_eq(&self, other: &Quaternion) -> bool {
        matches!(self.angle_to(other), Ok(angle) if angle < EQUALITY_ANGLE)
    }

    /// Sandwich product `q v q⁻¹`: expresses a body-frame vector in the
    /// inertial frame. Equals `to_matrix().transpose() * v` for unit `q`.
    pub fn rotate(&self, v: &Vector3) -> Vector3 {
        let p = Quaternion::new(0.0, v[0], v[1], v[2]);
        self.hamilton(&p).hamilton(&self.conjugate()).vector()
    }

    /// Direction cosine matrix of the inertial→body rotation.
    pub fn to_matrix(&self) -> Matrix3 {
        let q0 = self.data[0];
        let q1 = self.data[1];
        let q2 = self.data[2];
        let q3 = self.data[3];

        Matrix3::new(
            1.0 - 2.0 * (q2 * q2 + q3 * q3),
            2.0 * (q1 * q2 + q0 * q3),
            2.0 * (q1 * q3 - q0 * q2),
            2.0 * (q1 * q2 - q0 * q3),
            1.0 - 2.0 * (q1 * q1 + q3 * q3),
            2.0 * (q2 * q3 + q0 * q1),
            2.0 * (q1 * q3 + q0 * q2),
            2.0 * (q2 * q3 - q0 * q1),
            1.0 - 2.0 * (q1 * q1 + q2 * q2),
        )
    }

    /// Quaternion from a direction cosine matrix using Shepherd's method:
    /// of the four candidate components, take the square root of the largest
    /// and divide it into the off-diagonal sums, which keeps the division
    /// away from near-zero terms.
    pub fn from_matrix(m: &Matrix3) -> SimResult<Quaternion> {
        let trace_error = ((m * m.transpose()).trace() - 3.0).abs();
        if trace_error > ORTHOGONALITY_TOLERANCE {
            return Err(SimError::NonOrthogonalMatrix { trace_error });
        }

        let tr = m.trace();
        let w2 = (1.0 + tr) / 4.0;
        let x2 = (1.0 + 2.0 * m[(0, 0)] - tr) / 4.0;
        let y2 = (1.0 + 2.0 * m[(1, 1)] - tr) / 4.0;
        let z2 = (1.0 + 2.0 * m[(2, 2)] - tr) / 4.0;

        let candidates = [w2, x2, y2, z2];
        let mut branch = 0;
        for (i, c) in candidates.iter().enumerate() {
            if *c > candidates[branch] {
                branch = i;
            }
        }

        let q = match branch {
            0 => {
                let w = w2.max(0.0).sqrt();
                Quaternion::new(
                    w,
                    (m[(1, 2)] - m[(2, 1)]) / (4.0 * w),
                    (m[(2, 0)] - m[(0, 2)]) / (4.0 * w),
                    (m[(0, 1)] - m[(1, 0)]) / (4.0 * w),
                )
            }
            1 => {
                let x = x2.max(0.0).sqrt();
                Quaternion::new(
                    (m[(1, 2)] - m[(2, 1)]) / (4.0 * x),
                    x,
                    (m[(0, 1)] + m[(1, 0)]) / (4.0 * x),
                    (m[(0, 2)] + m[(2, 0)]) / (4.0 * x),
                )
            }
            2 => {
                let y = y2.max(0.0).sqrt();
                Quaternion::new(
                    (m[(2, 0)] - m[(0, 2)]) / (4.0 * y),
                    (m[(0, 1)] + m[(1, 0)]) / (4.0 * y),
                    y,
                    (m[(1, 2)] + m[(2, 1)]) / (4.0 * y),
                )
            }
            _ => {
                let z = z2.max(0.0).sqrt();
                Quaternion::new(
                    (m[(0, 1)] - m[(1, 0)]) / (4.0 * z),
                    (m[(0, 2)] + m[(2, 0)]) / (4.0 * z),
                    (m[(1, 2)] + m[(2, 1)]) / (4.0 * z),
                    z,
                )
            }
        };

        q.normalize()
    }

    /// Kinematic quaternion rate for a body angular velocity:
    /// dq/dt = ½ · q ⊗ (0, ω). The result is not a unit quaternion.
    pub fn derivative(&self, w: &Vector3) -> Quaternion {
        let wx = w[0];
        let wy = w[1];
        let wz = w[2];

        Quaternion::new(
            -0.5 * (self.data[1] * wx + self.data[2] * wy + self.data[3] * wz),
            0.5 * (self.data[0] * wx + self.data[2] * wz - self.data[3] * wy),
            0.5 * (self.data[0] * wy + self.data[3] * wx - self.data[1] * wz),
            0.5 * (self.data[0] * wz + self.data[1] * wy - self.data[2] * wx),
        )
    }
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}
