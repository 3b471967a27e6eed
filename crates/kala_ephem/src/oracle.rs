//! The ephemeris oracle contract.
//!
//! The native astronomical engine is treated as a black box behind a small
//! capability trait. Flag words and sidereal-mode ids are opaque integers
//! owned by the oracle and surfaced through accessor structs, so the
//! provider composes them symbolically without hard-coding any engine's
//! constants.

use std::path::Path;

use crate::error::OracleError;

/// Bodies addressed by this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
    MeanNode,
    TrueNode,
}

impl Body {
    /// Engine body id.
    pub const fn code(self) -> i32 {
        match self {
            Self::Sun => 0,
            Self::Moon => 1,
            Self::MeanNode => 10,
            Self::TrueNode => 11,
        }
    }

    /// Whether this body is a lunar node (subject to the node convention).
    pub const fn is_node(self) -> bool {
        matches!(self, Self::MeanNode | Self::TrueNode)
    }
}

/// Geographic site: longitude east-positive, latitude north-positive,
/// altitude in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPos {
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub alt_m: f64,
}

/// Full ecliptic state for one body at one instant.
///
/// The core reads `lon_deg` and `lon_speed`; the remaining components are
/// part of the oracle's return contract and flow through untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticState {
    /// Ecliptic longitude in degrees, normalized to [0, 360).
    pub lon_deg: f64,
    /// Ecliptic latitude in degrees.
    pub lat_deg: f64,
    /// Distance in AU.
    pub dist_au: f64,
    /// Longitude speed in degrees/day; negative when retrograde.
    pub lon_speed: f64,
    /// Latitude speed in degrees/day.
    pub lat_speed: f64,
    /// Distance speed in AU/day.
    pub dist_speed: f64,
}

/// Raw house computation output: twelve cusps plus the ascendant/MC block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HousesRaw {
    pub cusps: [f64; 12],
    pub ascmc: [f64; 8],
}

/// Opaque engine flag words, OR-combinable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OracleFlags {
    /// Base ephemeris-source flag, always set on calc queries.
    pub ephemeris: i32,
    pub speed: i32,
    pub truepos: i32,
    pub sidereal: i32,
    pub topoctr: i32,
    pub calc_rise: i32,
    pub calc_set: i32,
    pub hindu_rising: i32,
    pub disc_center: i32,
    pub disc_bottom: i32,
    pub no_refraction: i32,
}

/// Opaque sidereal-mode ids for [`EphemerisOracle::set_sid_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidModes {
    pub lahiri: i32,
    pub true_citra: i32,
    pub krishnamurti: i32,
    pub raman: i32,
    /// User-defined mode; `t0` / `ayan_t0` become meaningful.
    pub user: i32,
}

/// Capability contract for the native ephemeris engine.
///
/// Installation methods (`set_*`) mutate engine-global state and are only
/// called under the session lock. Query methods are read-only with respect
/// to this contract; their failures propagate verbatim as [`OracleError`].
pub trait EphemerisOracle {
    /// Engine flag constants.
    fn flags(&self) -> OracleFlags;

    /// Engine sidereal-mode ids.
    fn sid_modes(&self) -> SidModes;

    /// Point the engine at a directory of ephemeris tables.
    fn set_ephe_path(&mut self, path: &Path);

    /// Install a sidereal mode. `t0` / `ayan_t0` are read for the
    /// user-defined mode id only.
    fn set_sid_mode(&mut self, mode_id: i32, t0: f64, ayan_t0: f64);

    /// Install a topocentric origin.
    fn set_topo(&mut self, lon_deg: f64, lat_deg: f64, alt_m: f64);

    /// Body state at a UT Julian Day under the given flag word.
    fn calc_ut(&self, jd_ut: f64, body: i32, flags: i32) -> Result<EclipticState, OracleError>;

    /// Ayanamsa in degrees at a UT Julian Day.
    fn ayanamsa_ut(&self, jd_ut: f64, flags: i32) -> Result<f64, OracleError>;

    /// House cusps and angles for a site.
    fn houses_ex(
        &self,
        jd_ut: f64,
        lat_deg: f64,
        lon_deg: f64,
        hsys: u8,
        flags: i32,
    ) -> Result<HousesRaw, OracleError>;

    /// Next rise/set transit after `jd_ut`. Returns the event Julian Day and
    /// the engine status word (negative when the event never occurs).
    #[allow(clippy::too_many_arguments)]
    fn rise_trans(
        &self,
        jd_ut: f64,
        body: i32,
        ephe_flags: i32,
        rsmi: i32,
        geo: GeoPos,
        atpress: Option<f64>,
        attemp: Option<f64>,
    ) -> Result<(f64, i32), OracleError>;

    /// Raw Delta-T reading at a UT Julian Day (seconds or days; see
    /// `kala_time::delta_t_days_from_raw`).
    fn delta_t(&self, jd_ut: f64) -> f64;
}
