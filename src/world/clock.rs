use hifitime::{Duration, Epoch};

use crate::constants::{
    EARTH_ROTATION_DEG_PER_DAY, J2000_JD, JULIAN_CENTURY_DAYS, SECONDS_PER_DAY,
};
use crate::error::SimResult;

/// Julian date at 0h UT of a calendar day, valid 1900–2100.
pub fn julian_date_0h(year: i32, month: u32, day: u32) -> f64 {
    let y = year as i64;
    let m = month as i64;
    let d = day as i64;
    let term = 367 * y - (7 * (y + (m + 9) / 12)) / 4 + (275 * m) / 9 + d;
    term as f64 + 1721013.5
}

/// Greenwich mean sidereal time at 0h UT (deg, [0, 360)), IAU polynomial in
/// Julian centuries from J2000.
pub fn gmst_0h_deg(jdate_0h: f64) -> f64 {
    let t0 = (jdate_0h - J2000_JD) / JULIAN_CENTURY_DAYS;
    let gmst = 100.4606184 + 36000.77004 * t0 + 0.000387933 * t0 * t0 - 2.583e-8 * t0 * t0 * t0;
    gmst.rem_euclid(360.0)
}

/// Calendar reference instant plus the derived Julian-date and sidereal-time
/// bookkeeping for a simulation run.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    /// Calendar instant of simulation time zero.
    pub epoch: Epoch,
    /// Julian date at 0h UT of the epoch day.
    pub jdate0: f64,
    /// Fraction of a day elapsed from 0h to the epoch instant.
    pub day_fraction: f64,
    /// GMST at 0h UT of the epoch day (deg).
    pub gmst0: f64,
    /// GMST at the epoch instant (deg).
    pub gmst: f64,
}

impl Clock {
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
    ) -> SimResult<Self> {
        let epoch = Epoch::maybe_from_gregorian_utc(
            year,
            month as u8,
            day as u8,
            hour as u8,
            minute as u8,
            second as u8,
            microsecond * 1000,
        )?;

        let jdate0 = julian_date_0h(year, month, day);
        let hours = hour as f64
            + minute as f64 / 60.0
            + second as f64 / 3600.0
            + microsecond as f64 / 3_600_000_000.0;
        let gmst0 = gmst_0h_deg(jdate0);
        let gmst = gmst0 + EARTH_ROTATION_DEG_PER_DAY * hours / 24.0;

        Ok(Clock {
            epoch,
            jdate0,
            day_fraction: hours / 24.0,
            gmst0,
            gmst,
        })
    }

    /// Calendar instant after `elapsed` simulated seconds.
    pub fn datetime_at(&self, elapsed: f64) -> Epoch {
        self.epoch + Duration::from_seconds(elapsed)
    }

    pub fn julian_date_at(&self, elapsed: f64) -> f64 {
        self.jdate0 + self.day_fraction + elapsed / SECONDS_PER_DAY
    }

    /// Sidereal time after `elapsed` simulated seconds (deg, [0, 360)).
    pub fn gmst_at(&self, elapsed: f64) -> f64 {
        (self.gmst + EARTH_ROTATION_DEG_PER_DAY * elapsed / SECONDS_PER_DAY).rem_euclid(360.0)
    }

    /// Decimal year of the instant `elapsed` seconds past the epoch, for
    /// collaborators parameterized by epoch year.
    pub fn decimal_year_at(&self, elapsed: f64) -> f64 {
        let (year, ..) = self.datetime_at(elapsed).to_gregorian_utc();
        let jan1 = julian_date_0h(year, 1, 1);
        year as f64 + (self.julian_date_at(elapsed) - jan1) / 365.25
    }
}

impl Default for Clock {
    fn default() -> Self {
        // J2000.0 reference instant; infallible inputs.
        match Clock::from_calendar(2000, 1, 1, 12, 0, 0, 0) {
            Ok(clock) => clock,
            Err(_) => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test]
    fn reference_epoch_bookkeeping() {
        let clock = Clock::from_calendar(2004, 3, 3, 4, 30, 0, 0).unwrap();
        assert_abs_diff_eq!(clock.jdate0, 2453067.5, epsilon = 1e-9);
        assert_abs_diff_eq!(clock.gmst0, 161.10873367774252, epsilon = 1e-9);
        assert_abs_diff_eq!(clock.gmst, 228.79354253524252, epsilon = 1e-9);
    }

    #[test_case(2000, 1, 1, 2451544.5; "start of 2000")]
    #[test_case(2023, 9, 26, 2460213.5; "late september 2023")]
    #[test_case(1996, 10, 26, 2450382.5; "mid nineties")]
    fn julian_dates_at_0h(year: i32, month: u32, day: u32, expected: f64) {
        assert_abs_diff_eq!(julian_date_0h(year, month, day), expected, epsilon = 1e-9);
    }

    #[test]
    fn elapsed_time_advances_sidereal_angle() {
        let clock = Clock::from_calendar(2004, 3, 3, 4, 30, 0, 0).unwrap();
        assert_abs_diff_eq!(clock.gmst_at(0.0), clock.gmst.rem_euclid(360.0), epsilon = 1e-12);
        // One solar day advances GMST by slightly less than a full turn plus
        // the sidereal excess of about 0.9856 degrees.
        let after_day = clock.gmst_at(SECONDS_PER_DAY);
        let expected = (clock.gmst + EARTH_ROTATION_DEG_PER_DAY).rem_euclid(360.0);
        assert_abs_diff_eq!(after_day, expected, epsilon = 1e-9);
    }

    #[test]
    fn datetime_offsets_follow_the_epoch() {
        let clock = Clock::from_calendar(2023, 9, 26, 3, 11, 18, 0).unwrap();
        let later = clock.datetime_at(42.0);
        assert_abs_diff_eq!(
            (later - clock.epoch).to_seconds(),
            42.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn invalid_calendar_is_rejected() {
        assert!(Clock::from_calendar(2023, 13, 1, 0, 0, 0, 0).is_err());
    }

    #[test]
    fn decimal_year_mid_year() {
        let clock = Clock::from_calendar(2023, 7, 2, 12, 0, 0, 0).unwrap();
        let year = clock.decimal_year_at(0.0);
        assert!(year > 2023.49 && year < 2023.51, "{}", year);
    }
}
