use serde::{Deserialize, Serialize};

use crate::numerics::Vector3;

/// Geodetic footprint: latitude/longitude in degrees (longitude in
/// (-180, 180], positive east), altitude in meters above the ellipsoid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Geodetic {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

/// Convergence threshold for the geodetic latitude iteration (rad).
const LATITUDE_TOLERANCE: f64 = 1e-6;
const MAX_ITERATIONS: usize = 32;

pub fn wrap_longitude_deg(mut longitude: f64) -> f64 {
    while longitude <= -180.0 {
        longitude += 360.0;
    }
    while longitude > 180.0 {
        longitude -= 360.0;
    }
    longitude
}

/// Rotate an inertial position into the Earth-fixed frame at sidereal angle
/// `gmst_deg`.
pub fn ecef_from_inertial(position: &Vector3, gmst_deg: f64) -> Vector3 {
    let theta = gmst_deg.to_radians();
    let (sin_t, cos_t) = theta.sin_cos();
    Vector3::new(
        cos_t * position[0] + sin_t * position[1],
        -sin_t * position[0] + cos_t * position[1],
        position[2],
    )
}

pub fn inertial_from_ecef(position: &Vector3, gmst_deg: f64) -> Vector3 {
    ecef_from_inertial(position, -gmst_deg)
}

/// Express a local North-East-Down vector at a geodetic site in the
/// Earth-fixed frame.
pub fn ecef_from_ned(ned: &Vector3, latitude_deg: f64, longitude_deg: f64) -> Vector3 {
    let lat = latitude_deg.to_radians();
    let lon = longitude_deg.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    let north = Vector3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
    let east = Vector3::new(-sin_lon, cos_lon, 0.0);
    let down = Vector3::new(-cos_lat * cos_lon, -cos_lat * sin_lon, -sin_lat);

    north * ned[0] + east * ned[1] + down * ned[2]
}

/// Earth-fixed Cartesian position of a geodetic point on an ellipsoid with
/// equatorial radius `a` (m) and first eccentricity squared `e2`.
pub fn ecef_from_geodetic(geo: &Geodetic, a: f64, e2: f64) -> Vector3 {
    let lat = geo.latitude.to_radians();
    let lon = geo.longitude.to_radians();
    let sin_lat = lat.sin();
    let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();

    Vector3::new(
        (n + geo.altitude) * lat.cos() * lon.cos(),
        (n + geo.altitude) * lat.cos() * lon.sin(),
        (n * (1.0 - e2) + geo.altitude) * sin_lat,
    )
}

/// Geodetic coordinates of an Earth-fixed position by iterative
/// oblate-spheroid correction: the geodetic latitude starts from the
/// geocentric value and is refined until successive iterates agree to
/// `LATITUDE_TOLERANCE` radians.
pub fn geodetic_from_ecef(position: &Vector3, a: f64, e2: f64) -> Geodetic {
    let x = position[0];
    let y = position[1];
    let z = position[2];
    let p = (x * x + y * y).sqrt();

    // On the polar axis the longitude is undefined and the iteration's
    // atan2 arguments both vanish.
    if p < 1e-6 {
        let b = a * (1.0 - e2).sqrt();
        return Geodetic {
            latitude: if z < 0.0 { -90.0 } else { 90.0 },
            longitude: 0.0,
            altitude: z.abs() - b,
        };
    }

    let longitude = wrap_longitude_deg(y.atan2(x).to_degrees());

    let mut latitude = z.atan2(p);
    let mut c = a;
    for _ in 0..MAX_ITERATIONS {
        let sin_lat = latitude.sin();
        c = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let next = (z + c * e2 * sin_lat).atan2(p);
        let done = (next - latitude).abs() < LATITUDE_TOLERANCE;
        latitude = next;
        if done {
            break;
        }
    }

    Geodetic {
        latitude: latitude.to_degrees(),
        longitude,
        altitude: p / latitude.cos() - c,
    }
}

/// Geodetic footprint of an inertial position at sidereal angle `gmst_deg`;
/// the longitude is corrected for Earth rotation and wrapped to (-180, 180].
pub fn geodetic_from_inertial(position: &Vector3, gmst_deg: f64, a: f64, e2: f64) -> Geodetic {
    geodetic_from_ecef(&ecef_from_inertial(position, gmst_deg), a, e2)
}
