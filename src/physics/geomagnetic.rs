use crate::constants::{DIPOLE_B0, R_EARTH};
use crate::numerics::Vector3;

/// Contract for the geomagnetic field collaborator: geodetic latitude (deg),
/// longitude (deg), altitude (m) and decimal year in, field vector (T) out
/// in local North-East-Down components. The core only requires this
/// signature; higher-fidelity models plug in unchanged.
pub type GeomagneticModel = fn(f64, f64, f64, f64) -> Vector3;

/// Centered axial dipole field in NED components. Longitude and year are
/// part of the collaborator contract but do not enter this model.
pub fn dipole_field(latitude_deg: f64, _longitude_deg: f64, altitude_m: f64, _year: f64) -> Vector3 {
    let lat = latitude_deg.to_radians();
    let r = R_EARTH + altitude_m;
    let scale = DIPOLE_B0 * (R_EARTH / r).powi(3);

    Vector3::new(scale * lat.cos(), 0.0, 2.0 * scale * lat.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test_case(0.0; "equator")]
    #[test_case(45.0; "mid latitude")]
    #[test_case(90.0; "pole")]
    fn field_magnitude_decays_with_altitude(latitude: f64) {
        let low = dipole_field(latitude, 0.0, 0.0, 2024.0).magnitude();
        let high = dipole_field(latitude, 0.0, 500e3, 2024.0).magnitude();
        assert!(high < low);
    }

    #[test]
    fn equatorial_field_is_horizontal() {
        let b = dipole_field(0.0, 0.0, 0.0, 2024.0);
        assert_abs_diff_eq!(b[0], DIPOLE_B0, epsilon = 1e-12);
        assert_abs_diff_eq!(b[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn polar_field_is_vertical_and_twice_equatorial() {
        let b = dipole_field(90.0, 0.0, 0.0, 2024.0);
        assert_abs_diff_eq!(b[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b[2], 2.0 * DIPOLE_B0, epsilon = 1e-12);
    }
}
