use serde::{Deserialize, Serialize};

use crate::numerics::Vector3;
use crate::world::geodesy::{ecef_from_geodetic, Geodetic};

/// A ground site consumed by elevation-angle sensor functions. Plain data;
/// pass prediction itself is outside the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundStation {
    pub name: String,
    /// Geodetic latitude (deg).
    pub latitude: f64,
    /// Longitude (deg), positive east.
    pub longitude: f64,
    /// Height above the reference ellipsoid (m).
    pub altitude: f64,
    /// Minimum usable elevation (deg).
    pub min_elevation: f64,
}

impl GroundStation {
    pub fn new(name: &str, latitude: f64, longitude: f64, altitude: f64, min_elevation: f64) -> Self {
        GroundStation {
            name: name.to_string(),
            latitude,
            longitude,
            altitude,
            min_elevation,
        }
    }

    /// Elevation angle (deg) of an Earth-fixed target position as seen from
    /// the station, measured from the local geodetic horizon.
    pub fn elevation_deg(&self, target_ecef: &Vector3, a: f64, e2: f64) -> f64 {
        let site = Geodetic {
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
        };
        let site_ecef = ecef_from_geodetic(&site, a, e2);
        let range = target_ecef - site_ecef;
        let rho = range.magnitude();
        if rho == 0.0 {
            return 90.0;
        }

        let lat = self.latitude.to_radians();
        let lon = self.longitude.to_radians();
        let up = Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin());

        (range.dot(&up) / rho).clamp(-1.0, 1.0).asin().to_degrees()
    }

    /// True when the target clears the station's elevation mask.
    pub fn is_visible(&self, target_ecef: &Vector3, a: f64, e2: f64) -> bool {
        self.elevation_deg(target_ecef, a, e2) >= self.min_elevation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{E2_EARTH, R_EARTH};
    use approx::assert_abs_diff_eq;

    #[test]
    fn target_at_zenith_has_90_degree_elevation() {
        let station = GroundStation::new("EQX", 0.0, 0.0, 0.0, 5.0);
        let overhead = Geodetic {
            latitude: 0.0,
            longitude: 0.0,
            altitude: 400e3,
        };
        let target = ecef_from_geodetic(&overhead, R_EARTH, E2_EARTH);
        assert_abs_diff_eq!(
            station.elevation_deg(&target, R_EARTH, E2_EARTH),
            90.0,
            epsilon = 1e-6
        );
        assert!(station.is_visible(&target, R_EARTH, E2_EARTH));
    }

    #[test]
    fn target_past_horizon_is_not_visible() {
        let station = GroundStation::new("EQX", 0.0, 0.0, 0.0, 5.0);
        let far_side = Geodetic {
            latitude: 0.0,
            longitude: 120.0,
            altitude: 400e3,
        };
        let target = ecef_from_geodetic(&far_side, R_EARTH, E2_EARTH);
        assert!(station.elevation_deg(&target, R_EARTH, E2_EARTH) < 0.0);
        assert!(!station.is_visible(&target, R_EARTH, E2_EARTH));
    }
}
