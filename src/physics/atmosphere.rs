use crate::models::spacecraft::SpacecraftProperties;
use crate::numerics::Vector3;

/// One band of the exponential atmosphere table: base altitude (km),
/// nominal density at the base (kg/m³), scale height (km).
#[derive(Debug, Clone, Copy)]
pub struct AtmosphereBand {
    pub base_km: f64,
    pub density: f64,
    pub scale_height_km: f64,
}

const fn band(base_km: f64, density: f64, scale_height_km: f64) -> AtmosphereBand {
    AtmosphereBand {
        base_km,
        density,
        scale_height_km,
    }
}

/// Piecewise-exponential density table, 0–1000 km.
pub const ATMOSPHERE_TABLE: [AtmosphereBand; 28] = [
    band(0.0, 1.225, 7.249),
    band(25.0, 3.899e-2, 6.349),
    band(30.0, 1.774e-2, 6.682),
    band(40.0, 3.972e-3, 7.554),
    band(50.0, 1.057e-3, 8.382),
    band(60.0, 3.206e-4, 7.714),
    band(70.0, 8.770e-5, 6.549),
    band(80.0, 1.905e-5, 5.799),
    band(90.0, 3.396e-6, 5.382),
    band(100.0, 5.297e-7, 5.877),
    band(110.0, 9.661e-8, 7.263),
    band(120.0, 2.438e-8, 9.473),
    band(130.0, 8.484e-9, 12.636),
    band(140.0, 3.845e-9, 16.149),
    band(150.0, 2.070e-9, 22.523),
    band(180.0, 5.464e-10, 29.740),
    band(200.0, 2.789e-10, 37.105),
    band(250.0, 7.248e-11, 45.546),
    band(300.0, 2.418e-11, 53.628),
    band(350.0, 9.518e-12, 53.298),
    band(400.0, 3.725e-12, 58.515),
    band(450.0, 1.585e-12, 60.828),
    band(500.0, 6.967e-13, 63.822),
    band(600.0, 1.454e-13, 71.835),
    band(700.0, 3.614e-14, 88.667),
    band(800.0, 1.170e-14, 124.64),
    band(900.0, 5.245e-15, 181.05),
    band(1000.0, 3.019e-15, 268.00),
];

/// Atmospheric density (kg/m³) at a given altitude. The altitude is clamped
/// to [0, 1000] km and interpolated exponentially within the band whose
/// lower bound it clears: ρ = ρ₀·exp(-(z - h₀)/H).
pub fn density(altitude_km: f64) -> f64 {
    let z = altitude_km.clamp(0.0, 1000.0);
    let mut selected = ATMOSPHERE_TABLE[0];
    for row in ATMOSPHERE_TABLE.iter() {
        if z >= row.base_km {
            selected = *row;
        }
    }
    selected.density * (-(z - selected.base_km) / selected.scale_height_km).exp()
}

/// Aerodynamic drag on a body moving through the co-rotating atmosphere:
/// F = -½·ρ·C_d·A·|v_rel|·v_rel with v_rel = v − ω⊕ × r.
///
/// A zero relative velocity yields zero drag rather than an error; a
/// zero-size body (zero reference area) disables drag entirely.
pub fn drag_force<T: SpacecraftProperties>(
    spacecraft: &T,
    position: &Vector3,
    velocity: &Vector3,
    planet_radius: f64,
    planet_rotation_rate: f64,
) -> Vector3 {
    let area = spacecraft.reference_area();
    if area == 0.0 {
        return Vector3::zeros();
    }

    let omega = Vector3::new(0.0, 0.0, planet_rotation_rate);
    let v_rel = velocity - omega.cross(position);
    let speed = v_rel.magnitude();
    if speed == 0.0 {
        return Vector3::zeros();
    }

    let altitude_km = (position.magnitude() - planet_radius) / 1000.0;
    let rho = density(altitude_km);

    -0.5 * rho * spacecraft.drag_coefficient() * area * speed * v_rel
}
