//! Continuous Panchanga index functions.
//!
//! Pure maps from Sun/Moon longitudes and speeds to a continuous cycle
//! index and its time derivative. The finder drives the root solver over
//! these; nothing here touches an ephemeris.
//!
//! - Tithi: 30 divisions of (Moon - Sun) elongation, 12 deg each
//! - Nakshatra: 27 divisions of Moon longitude, 13 deg 20' each
//! - Yoga: 27 divisions of (Moon + Sun) mod 360

use kala_math::normalize_360;

/// Span of one nakshatra: 360/27 degrees.
pub const ONE_STAR_DEG: f64 = 360.0 / 27.0;

/// Span of one pada: 360/108 degrees.
pub const ONE_PADA_DEG: f64 = 360.0 / 108.0;

/// Degrees of elongation per tithi.
const TITHI_SEGMENT_DEG: f64 = 12.0;

/// Index scale for the 27-fold cycles.
const STAR_SCALE: f64 = 27.0 / 360.0;

/// Continuous tithi index in [0, 30) and its speed in tithis/day.
pub fn tithi_continuous(
    moon_lon: f64,
    moon_speed: f64,
    sun_lon: f64,
    sun_speed: f64,
) -> (f64, f64) {
    let elongation = normalize_360(moon_lon - sun_lon);
    (
        elongation / TITHI_SEGMENT_DEG,
        (moon_speed - sun_speed) / TITHI_SEGMENT_DEG,
    )
}

/// Continuous nakshatra index in [0, 27) and its speed in nakshatras/day.
pub fn nakshatra_continuous(moon_lon: f64, moon_speed: f64) -> (f64, f64) {
    (normalize_360(moon_lon) * STAR_SCALE, moon_speed * STAR_SCALE)
}

/// Continuous yoga index in [0, 27) and its speed in yogas/day.
pub fn yoga_continuous(moon_lon: f64, moon_speed: f64, sun_lon: f64, sun_speed: f64) -> (f64, f64) {
    let sum = normalize_360(moon_lon + sun_lon);
    (sum * STAR_SCALE, (moon_speed + sun_speed) * STAR_SCALE)
}

/// The 27 nakshatra names, indexed by `nakshatra_no - 1`.
pub const NAKSHATRA_NAMES: [&str; 27] = [
    "Ashwini",
    "Bharani",
    "Krittika",
    "Rohini",
    "Mrigashira",
    "Ardra",
    "Punarvasu",
    "Pushya",
    "Ashlesha",
    "Magha",
    "Purva Phalguni",
    "Uttara Phalguni",
    "Hasta",
    "Chitra",
    "Swati",
    "Vishakha",
    "Anuradha",
    "Jyeshtha",
    "Mula",
    "Purva Ashadha",
    "Uttara Ashadha",
    "Shravana",
    "Dhanishtha",
    "Shatabhisha",
    "Purva Bhadrapada",
    "Uttara Bhadrapada",
    "Revati",
];

/// Nakshatra/pada position of a sidereal longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NakshatraPada {
    /// 1-based nakshatra number (1 = Ashwini, 27 = Revati).
    pub nakshatra_no: u8,
    /// 1-based pada within the nakshatra (1-4).
    pub pada_no: u8,
    /// Degrees into the current nakshatra [0, 360/27).
    pub remainder_deg: f64,
}

impl NakshatraPada {
    /// Name of the nakshatra.
    pub const fn name(self) -> &'static str {
        NAKSHATRA_NAMES[(self.nakshatra_no - 1) as usize]
    }
}

/// Split a sidereal longitude into nakshatra, pada, and remainder.
pub fn nakshatra_pada_from_longitude(lon_deg: f64) -> NakshatraPada {
    let lon = normalize_360(lon_deg);
    let nak_idx = ((lon / ONE_STAR_DEG).floor() as u8).min(26);
    let pada_idx = ((lon / ONE_PADA_DEG).floor() as u8).min(107) % 4;
    NakshatraPada {
        nakshatra_no: nak_idx + 1,
        pada_no: pada_idx + 1,
        remainder_deg: lon - nak_idx as f64 * ONE_STAR_DEG,
    }
}
