pub const MU_EARTH: f64 = 398600.4418e9; // Gravitational parameter (m³/s²)
pub const R_EARTH: f64 = 6378.137e3; // Equatorial radius (m)
pub const E2_EARTH: f64 = 0.006694385; // First eccentricity squared of the reference ellipsoid
pub const EARTH_ANGULAR_VELOCITY: f64 = 7.2921150e-5; // Earth's rotation rate (rad/s)
pub const EARTH_ROTATION_DEG_PER_DAY: f64 = 360.98564724; // Sidereal rotation (deg per solar day)

// Drag
pub const DRAG_COEFFICIENT: f64 = 2.2;

// Time
pub const J2000_JD: f64 = 2451545.0; // Julian date of J2000.0
pub const JULIAN_CENTURY_DAYS: f64 = 36525.0;
pub const SECONDS_PER_DAY: f64 = 86400.0;

// Sun
pub const AU: f64 = 1.495978707e11; // Astronomical unit (m)

// Geomagnetic dipole
pub const DIPOLE_B0: f64 = 3.12e-5; // Mean equatorial surface field (T)

// Math
pub const PI: f64 = std::f64::consts::PI;
