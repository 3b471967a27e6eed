//! Deterministic mock oracle for provider and session tests.
//!
//! Linear mean motions for Sun/Moon/nodes, a linearly drifting ayanamsa,
//! and a rise model whose instant shifts with the requested disc and
//! refraction bits. Shared interior state lets tests observe install and
//! teardown calls after the session consumed the oracle.
#![allow(dead_code)] // each test binary uses a different slice of the mock

use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;

use kala_ephem::{
    EclipticState, EphemerisOracle, GeoPos, HousesRaw, OracleError, OracleFlags, SidModes,
};

/// Reference epoch for the linear model (~2024-01-01 00:00 UT).
pub const J0: f64 = 2_460_310.5;

/// Ayanamsa at `J0` and its daily drift, degrees.
pub const AYAN0: f64 = 24.16;
pub const AYAN_RATE: f64 = 3.82e-5;

/// Mean tropical longitudes at `J0` and rates, degrees and degrees/day.
const SUN_L0: f64 = 280.46;
const SUN_RATE: f64 = 0.985_647_3;
const MOON_L0: f64 = 134.68;
const MOON_RATE: f64 = 13.176_396_6;
const NODE_L0: f64 = 52.0;
const NODE_RATE: f64 = -0.052_953_9;

#[derive(Default)]
pub struct SkyState {
    pub calc_calls: Cell<u32>,
    pub rise_calls: Cell<u32>,
    pub topo_log: RefCell<Vec<(f64, f64, f64)>>,
    pub sid_log: RefCell<Vec<(i32, f64, f64)>>,
    pub ephe_paths: RefCell<Vec<String>>,
}

/// Analytic sky with linear motions; cloning shares the observation state.
#[derive(Clone, Default)]
pub struct LinearSky {
    pub state: Rc<SkyState>,
}

impl LinearSky {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EphemerisOracle for LinearSky {
    fn flags(&self) -> OracleFlags {
        OracleFlags {
            ephemeris: 2,
            speed: 256,
            truepos: 16,
            sidereal: 65_536,
            topoctr: 32_768,
            calc_rise: 1,
            calc_set: 2,
            hindu_rising: 1_024,
            disc_center: 4_096,
            disc_bottom: 8_192,
            no_refraction: 512,
        }
    }

    fn sid_modes(&self) -> SidModes {
        SidModes {
            lahiri: 1,
            true_citra: 27,
            krishnamurti: 5,
            raman: 3,
            user: 255,
        }
    }

    fn set_ephe_path(&mut self, path: &Path) {
        self.state
            .ephe_paths
            .borrow_mut()
            .push(path.display().to_string());
    }

    fn set_sid_mode(&mut self, mode_id: i32, t0: f64, ayan_t0: f64) {
        self.state.sid_log.borrow_mut().push((mode_id, t0, ayan_t0));
    }

    fn set_topo(&mut self, lon_deg: f64, lat_deg: f64, alt_m: f64) {
        self.state.topo_log.borrow_mut().push((lon_deg, lat_deg, alt_m));
    }

    fn calc_ut(&self, jd_ut: f64, body: i32, flags: i32) -> Result<EclipticState, OracleError> {
        self.state.calc_calls.set(self.state.calc_calls.get() + 1);
        let d = jd_ut - J0;
        let (l0, rate) = match body {
            0 => (SUN_L0, SUN_RATE),
            1 => (MOON_L0, MOON_RATE),
            10 => (NODE_L0, NODE_RATE),
            11 => (NODE_L0 + 1.2, NODE_RATE),
            other => return Err(OracleError::Compute(format!("unknown body {other}"))),
        };
        let mut lon = l0 + rate * d;
        let mut speed = rate;
        if flags & self.flags().sidereal != 0 {
            lon -= AYAN0 + AYAN_RATE * d;
            speed -= AYAN_RATE;
        }
        Ok(EclipticState {
            lon_deg: lon.rem_euclid(360.0),
            lat_deg: 0.0,
            dist_au: 1.0,
            lon_speed: speed,
            lat_speed: 0.0,
            dist_speed: 0.0,
        })
    }

    fn ayanamsa_ut(&self, jd_ut: f64, _flags: i32) -> Result<f64, OracleError> {
        Ok(AYAN0 + AYAN_RATE * (jd_ut - J0))
    }

    fn houses_ex(
        &self,
        jd_ut: f64,
        _lat_deg: f64,
        lon_deg: f64,
        _hsys: u8,
        flags: i32,
    ) -> Result<HousesRaw, OracleError> {
        // Ascendant advancing at the sidereal-day rate; equal cusps.
        let mut asc = 100.0 + 360.985_647 * (jd_ut - J0) + lon_deg;
        if flags & self.flags().sidereal != 0 {
            asc -= AYAN0 + AYAN_RATE * (jd_ut - J0);
        }
        let mut cusps = [0.0; 12];
        for (i, c) in cusps.iter_mut().enumerate() {
            *c = (asc + 30.0 * i as f64).rem_euclid(360.0);
        }
        let mut ascmc = [0.0; 8];
        ascmc[0] = asc.rem_euclid(360.0);
        ascmc[1] = (asc + 270.0).rem_euclid(360.0);
        Ok(HousesRaw { cusps, ascmc })
    }

    fn rise_trans(
        &self,
        jd_ut: f64,
        _body: i32,
        _ephe_flags: i32,
        rsmi: i32,
        geo: GeoPos,
        _atpress: Option<f64>,
        _attemp: Option<f64>,
    ) -> Result<(f64, i32), OracleError> {
        self.state.rise_calls.set(self.state.rise_calls.get() + 1);
        let f = self.flags();
        // Next 06:00 local mean solar time after jd_ut.
        let midnight_ut = (jd_ut + 0.5).floor() - 0.5;
        let mut rise = midnight_ut + 0.25 - geo.lon_deg / 360.0;
        while rise <= jd_ut {
            rise += 1.0;
        }
        let minute = 1.0 / 1440.0;
        if rsmi & f.disc_center != 0 {
            rise += 1.0 * minute;
        }
        if rsmi & f.disc_bottom != 0 {
            rise -= 1.1 * minute;
        }
        let refraction_applies = rsmi & f.hindu_rising == 0 && rsmi & f.no_refraction == 0;
        if refraction_applies {
            rise -= 2.3 * minute;
        }
        Ok((rise, 0))
    }

    fn delta_t(&self, _jd_ut: f64) -> f64 {
        69.2
    }
}
