use crate::constants::{AU, J2000_JD, JULIAN_CENTURY_DAYS};
use crate::numerics::Vector3;

/// Sun geometry refreshed once per step, before any body updates.
#[derive(Debug, Clone, Copy)]
pub struct SunState {
    /// Unit vector from Earth's center toward the Sun, inertial frame.
    pub direction: Vector3,
    /// Sun position (m), inertial frame.
    pub position: Vector3,
    /// Earth-Sun distance (AU).
    pub distance_au: f64,
}

impl Default for SunState {
    fn default() -> Self {
        sun_state(J2000_JD)
    }
}

/// Low-fidelity solar ephemeris from mean orbital elements, good to about
/// 0.01° over a few decades around J2000.
pub fn sun_state(julian_date: f64) -> SunState {
    let t = (julian_date - J2000_JD) / JULIAN_CENTURY_DAYS;

    // Mean longitude and mean anomaly (deg).
    let mean_longitude = 280.460 + 36000.771 * t;
    let mean_anomaly = (357.5291092 + 35999.05034 * t).to_radians();

    // Ecliptic longitude via the equation of center (deg).
    let ecliptic_longitude = (mean_longitude
        + 1.914666471 * mean_anomaly.sin()
        + 0.019994643 * (2.0 * mean_anomaly).sin())
    .to_radians();

    let distance_au = 1.000140612
        - 0.016708617 * mean_anomaly.cos()
        - 0.000139589 * (2.0 * mean_anomaly).cos();

    let obliquity = (23.439291 - 0.0130042 * t).to_radians();

    let direction = Vector3::new(
        ecliptic_longitude.cos(),
        obliquity.cos() * ecliptic_longitude.sin(),
        obliquity.sin() * ecliptic_longitude.sin(),
    );

    SunState {
        direction,
        position: direction * (distance_au * AU),
        distance_au,
    }
}
