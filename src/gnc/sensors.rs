use crate::constants::E2_EARTH;
use crate::models::ground_station::GroundStation;
use crate::models::spacecraft::Spacecraft;
use crate::numerics::Vector3;
use crate::world::geodesy::{
    ecef_from_geodetic, ecef_from_inertial, ecef_from_ned, inertial_from_ecef, Geodetic,
};
use crate::world::World;

/// Body-frame geomagnetic field (T) at the body's current footprint,
/// obtained from the world's geomagnetic collaborator and rotated
/// NED → ECEF → inertial → body.
pub fn magnetometer(body: &Spacecraft, world: &World, _params: &[f64]) -> Vector3 {
    let geo = body.location;
    let field_ned = (world.geomagnetic)(
        geo.latitude,
        geo.longitude,
        geo.altitude,
        world.decimal_year(),
    );
    let field_ecef = ecef_from_ned(&field_ned, geo.latitude, geo.longitude);
    let field_inertial = inertial_from_ecef(&field_ecef, world.gmst_now());
    body.state.quaternion.to_matrix() * field_inertial
}

/// Unit vector toward the Sun in the body frame.
pub fn sun_sensor(body: &Spacecraft, world: &World, _params: &[f64]) -> Vector3 {
    body.state.quaternion.to_matrix() * world.sun().direction
}

/// Body angular velocity as measured by an ideal rate gyro (rad/s).
pub fn rate_gyro(body: &Spacecraft, _world: &World, _params: &[f64]) -> Vector3 {
    body.state.angular_velocity
}

/// Elevation geometry to a ground station bound through `params` as
/// `[latitude_deg, longitude_deg, altitude_m, min_elevation_deg]`. Returns
/// `(elevation_deg, visible, range_m)` with `visible` 1.0 above the mask.
pub fn station_elevation(body: &Spacecraft, world: &World, params: &[f64]) -> Vector3 {
    let station = GroundStation::new(
        "station",
        params.first().copied().unwrap_or(0.0),
        params.get(1).copied().unwrap_or(0.0),
        params.get(2).copied().unwrap_or(0.0),
        params.get(3).copied().unwrap_or(0.0),
    );
    let target_ecef = ecef_from_inertial(&body.state.position, world.gmst_now());
    let elevation = station.elevation_deg(&target_ecef, world.radius, E2_EARTH);
    let site = ecef_from_geodetic(
        &Geodetic {
            latitude: station.latitude,
            longitude: station.longitude,
            altitude: station.altitude,
        },
        world.radius,
        E2_EARTH,
    );
    let range = (target_ecef - site).magnitude();
    let visible = if elevation >= station.min_elevation {
        1.0
    } else {
        0.0
    };
    Vector3::new(elevation, visible, range)
}
