//! Sunrise-anchored nakshatra end times.
//!
//! The traditional almanac lists, for a civil day, when the nakshatra in
//! effect at sunrise ends (and when the one after it ends), in local hours
//! past midnight. The Moon's longitude is sampled on a quarter-day grid
//! from sunrise, unwrapped into a continuous sequence, extended to cover a
//! full circle, and the boundary instants are read off by inverse-Lagrange
//! interpolation in the longitude domain.

use kala_ephem::{Body, EphemerisOracle, Provider};
use kala_math::{extend_range, inverse_lagrange, normalize_range, unwrap_sequence};

use crate::error::SearchError;
use crate::temporal::{ONE_STAR_DEG, nakshatra_pada_from_longitude};

/// Sample offsets past sunrise, in days.
const OFFSETS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Hours per day.
const HOURS_PER_DAY: f64 = 24.0;

/// Nakshatra picture of one civil day, anchored at sunrise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NakshatraDay {
    /// Nakshatra in effect at sunrise (1-27).
    pub nakshatra_no: u8,
    /// Pada in effect at sunrise (1-4).
    pub pada_no: u8,
    /// End of that nakshatra, local hours past local midnight.
    pub end_hours: f64,
    /// The following nakshatra (1-27).
    pub next_nakshatra_no: u8,
    /// End of the following nakshatra, local hours past local midnight.
    pub next_end_hours: f64,
    /// The anchoring sunrise, as a UT Julian Day.
    pub sunrise_jd: f64,
}

/// Compute the sunrise-anchored nakshatra end times for a civil day.
///
/// `jd_local_midnight` is the Julian Day of local midnight opening the
/// day; `tz_hours` is the place's offset from UT in hours (east positive).
/// Sunrise comes from the provider under the session's sunrise policy, and
/// Moon longitudes follow the session's zodiac.
pub fn nakshatra_at_sunrise<O: EphemerisOracle>(
    provider: &mut Provider<'_, O>,
    jd_local_midnight: f64,
    tz_hours: f64,
) -> Result<NakshatraDay, SearchError> {
    let jd_utc = jd_local_midnight - tz_hours / HOURS_PER_DAY;
    let (rise, _status) = provider.rise_set(jd_utc, Body::Sun, true, None, None)?;

    let mut longitudes = [0.0; OFFSETS.len()];
    for (lon, offset) in longitudes.iter_mut().zip(OFFSETS) {
        let (l, _) = provider.planet_lon_speed(rise + offset, Body::Moon)?;
        *lon = l;
    }

    let unwrapped = unwrap_sequence(&longitudes, 360.0);
    let extended = extend_range(&unwrapped, 360.0, 360.0);
    // Each appended +360 copy reuses the base offsets as abscissae.
    let mut offsets_ext = Vec::with_capacity(extended.len());
    while offsets_ext.len() < extended.len() {
        offsets_ext.extend_from_slice(&OFFSETS);
    }

    let at_rise = nakshatra_pada_from_longitude(longitudes[0]);
    let nak_no = at_rise.nakshatra_no;
    let next_nak = nak_no % 27 + 1;

    let floor = extended.iter().copied().fold(f64::INFINITY, f64::min);
    let y_end = normalize_range(nak_no as f64 * ONE_STAR_DEG, floor, 360.0);
    let y_next_end = normalize_range(next_nak as f64 * ONE_STAR_DEG, floor, 360.0);

    let approx_end = inverse_lagrange(&offsets_ext, &extended, y_end)?;
    let approx_next = inverse_lagrange(&offsets_ext, &extended, y_next_end)?;

    let to_local_hours =
        |approx: f64| (rise - jd_utc + approx) * HOURS_PER_DAY + tz_hours;

    Ok(NakshatraDay {
        nakshatra_no: nak_no,
        pada_no: at_rise.pada_no,
        end_hours: to_local_hours(approx_end),
        next_nakshatra_no: next_nak,
        next_end_hours: to_local_hours(approx_next),
        sunrise_jd: rise,
    })
}
