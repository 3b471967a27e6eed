//! Session-local ephemeris provider with a deterministic result cache.
//!
//! Every query is keyed by the calibration signature plus quantized
//! operands, so physically identical probes collide in the cache and repeat
//! calls return bitwise-identical floats. The cache never evicts and dies
//! with the provider; nothing leaks across sessions.

use std::collections::HashMap;

use kala_time::{DeltaTSource, delta_t_days_from_raw};

use crate::calibration::{
    Calibration, HouseMode, NodeMode, Perspective, RiseStyle, Signature, SunriseDisc, Zodiac,
};
use crate::error::OracleError;
use crate::oracle::{Body, EphemerisOracle, GeoPos, HousesRaw};

/// Quantization scales. These resolutions are part of the caching contract:
/// jd to 1e-9 d (~86 us), geography to 1e-6 deg (~11 cm), altitude to
/// 0.1 m, pressure/temperature to 0.01.
const JD_SCALE: f64 = 1e9;
const GEO_SCALE: f64 = 1e6;
const ALT_SCALE: f64 = 10.0;
const ATM_SCALE: f64 = 100.0;

fn quantize(v: f64, scale: f64) -> i64 {
    (v * scale).round() as i64
}

/// One cache slot: the calibration signature namespaces the operation key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    sig: Signature,
    op: OpKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum OpKey {
    CalcUt {
        jd_q: i64,
        body: i32,
        flags: i32,
    },
    Ayanamsa {
        jd_q: i64,
        flags: i32,
    },
    HousesTropical {
        jd_q: i64,
        lat_q: i64,
        lon_q: i64,
        hsys: u8,
    },
    HousesSidereal {
        jd_q: i64,
        lat_q: i64,
        lon_q: i64,
        hsys: u8,
        flags: i32,
    },
    RiseSet {
        jd_q: i64,
        body: i32,
        rise: bool,
        ephe_flags: i32,
        rsmi: i32,
        lon_q: i64,
        lat_q: i64,
        alt_q: i64,
        press_q: i64,
        temp_q: i64,
    },
}

#[derive(Debug, Clone, Copy)]
enum CacheValue {
    LonSpeed(f64, f64),
    Scalar(f64),
    Houses(HousesRaw),
    Rise(f64, i32),
}

/// Cached view of one oracle under one calibration, bound to a session.
pub struct Provider<'s, O: EphemerisOracle> {
    oracle: &'s O,
    calibration: &'s Calibration,
    sig: Signature,
    site: GeoPos,
    cache: HashMap<CacheKey, CacheValue>,
}

impl<'s, O: EphemerisOracle> Provider<'s, O> {
    pub(crate) fn new(oracle: &'s O, calibration: &'s Calibration, site: GeoPos) -> Self {
        Self {
            oracle,
            calibration,
            sig: calibration.signature(),
            site,
            cache: HashMap::new(),
        }
    }

    /// The calibration this provider computes under.
    pub fn calibration(&self) -> &Calibration {
        self.calibration
    }

    /// The session site.
    pub fn site(&self) -> GeoPos {
        self.site
    }

    /// Flag word for body calculations, derived from the calibration.
    fn calc_flags(&self) -> i32 {
        let f = self.oracle.flags();
        let mut flags = f.ephemeris;
        if self.calibration.use_speed {
            flags |= f.speed;
        }
        if self.calibration.use_truepos {
            flags |= f.truepos;
        }
        if self.calibration.zodiac == Zodiac::Sidereal {
            flags |= f.sidereal;
        }
        if self.calibration.perspective == Perspective::Topocentric && self.calibration.topo.enabled
        {
            flags |= f.topoctr;
        }
        flags
    }

    /// Resolve the active node variant for node bodies.
    fn map_node(&self, body: Body) -> Body {
        if body.is_node() {
            match self.calibration.nodes {
                NodeMode::True => Body::TrueNode,
                NodeMode::Mean => Body::MeanNode,
            }
        } else {
            body
        }
    }

    /// Ecliptic longitude and longitude speed of a body at a UT Julian Day.
    pub fn planet_lon_speed(&mut self, jd_ut: f64, body: Body) -> Result<(f64, f64), OracleError> {
        let body = self.map_node(body);
        let flags = self.calc_flags();
        let key = CacheKey {
            sig: self.sig.clone(),
            op: OpKey::CalcUt {
                jd_q: quantize(jd_ut, JD_SCALE),
                body: body.code(),
                flags,
            },
        };
        if let Some(CacheValue::LonSpeed(lon, speed)) = self.cache.get(&key) {
            return Ok((*lon, *speed));
        }
        let state = self.oracle.calc_ut(jd_ut, body.code(), flags)?;
        let out = (state.lon_deg, state.lon_speed);
        self.cache.insert(key, CacheValue::LonSpeed(out.0, out.1));
        Ok(out)
    }

    /// Ayanamsa in degrees at a UT Julian Day.
    pub fn ayanamsa(&mut self, jd_ut: f64) -> Result<f64, OracleError> {
        let flags = self.oracle.flags().ephemeris;
        let key = CacheKey {
            sig: self.sig.clone(),
            op: OpKey::Ayanamsa {
                jd_q: quantize(jd_ut, JD_SCALE),
                flags,
            },
        };
        if let Some(CacheValue::Scalar(ay)) = self.cache.get(&key) {
            return Ok(*ay);
        }
        let ay = self.oracle.ayanamsa_ut(jd_ut, flags)?;
        self.cache.insert(key, CacheValue::Scalar(ay));
        Ok(ay)
    }

    /// House cusps and angles under the calibration's house mode.
    pub fn houses(&mut self, jd_ut: f64) -> Result<HousesRaw, OracleError> {
        let hsys = self.calibration.house_system.hsys_byte();
        match self.calibration.houses {
            HouseMode::TropicalDerived => {
                let key = CacheKey {
                    sig: self.sig.clone(),
                    op: OpKey::HousesTropical {
                        jd_q: quantize(jd_ut, JD_SCALE),
                        lat_q: quantize(self.site.lat_deg, GEO_SCALE),
                        lon_q: quantize(self.site.lon_deg, GEO_SCALE),
                        hsys,
                    },
                };
                let cached = match self.cache.get(&key) {
                    Some(CacheValue::Houses(h)) => Some(*h),
                    _ => None,
                };
                let raw = match cached {
                    Some(h) => h,
                    None => {
                        let flags = self.oracle.flags().ephemeris;
                        let h = self.oracle.houses_ex(
                            jd_ut,
                            self.site.lat_deg,
                            self.site.lon_deg,
                            hsys,
                            flags,
                        )?;
                        self.cache.insert(key, CacheValue::Houses(h));
                        h
                    }
                };
                let ay = self.ayanamsa(jd_ut)?;
                let mut derived = raw;
                for c in &mut derived.cusps {
                    *c = (*c - ay).rem_euclid(360.0);
                }
                for a in &mut derived.ascmc {
                    *a = (*a - ay).rem_euclid(360.0);
                }
                Ok(derived)
            }
            HouseMode::SiderealNative => {
                let f = self.oracle.flags();
                let flags = f.ephemeris | f.sidereal;
                let key = CacheKey {
                    sig: self.sig.clone(),
                    op: OpKey::HousesSidereal {
                        jd_q: quantize(jd_ut, JD_SCALE),
                        lat_q: quantize(self.site.lat_deg, GEO_SCALE),
                        lon_q: quantize(self.site.lon_deg, GEO_SCALE),
                        hsys,
                        flags,
                    },
                };
                if let Some(CacheValue::Houses(h)) = self.cache.get(&key) {
                    return Ok(*h);
                }
                let h = self
                    .oracle
                    .houses_ex(jd_ut, self.site.lat_deg, self.site.lon_deg, hsys, flags)?;
                self.cache.insert(key, CacheValue::Houses(h));
                Ok(h)
            }
        }
    }

    /// Next rise (or set) of a body after `jd_ut`, under the calibration's
    /// sunrise policy. Returns the event Julian Day and the engine status.
    pub fn rise_set(
        &mut self,
        jd_ut: f64,
        body: Body,
        rise: bool,
        atpress: Option<f64>,
        attemp: Option<f64>,
    ) -> Result<(f64, i32), OracleError> {
        let f = self.oracle.flags();
        let base_rsmi = if rise { f.calc_rise } else { f.calc_set };

        match self.calibration.sunrise.style {
            RiseStyle::HinduDrik => {
                // True-position upper limb on the refraction-free horizon;
                // altitude forced to sea level, atmosphere ignored.
                let ephe_flags = 0;
                let rsmi = base_rsmi | f.hindu_rising | f.truepos | f.speed;
                let geo = GeoPos {
                    lon_deg: self.site.lon_deg,
                    lat_deg: self.site.lat_deg,
                    alt_m: 0.0,
                };
                let key = CacheKey {
                    sig: self.sig.clone(),
                    op: OpKey::RiseSet {
                        jd_q: quantize(jd_ut, JD_SCALE),
                        body: body.code(),
                        rise,
                        ephe_flags,
                        rsmi,
                        lon_q: quantize(geo.lon_deg, GEO_SCALE),
                        lat_q: quantize(geo.lat_deg, GEO_SCALE),
                        alt_q: 0,
                        press_q: 0,
                        temp_q: 0,
                    },
                };
                if let Some(CacheValue::Rise(jd, status)) = self.cache.get(&key) {
                    return Ok((*jd, *status));
                }
                let out = self
                    .oracle
                    .rise_trans(jd_ut, body.code(), ephe_flags, rsmi, geo, None, None)?;
                self.cache.insert(key, CacheValue::Rise(out.0, out.1));
                Ok(out)
            }
            RiseStyle::DiscPolicy => {
                let ephe_flags = f.ephemeris;
                let mut rsmi = base_rsmi;
                rsmi |= match self.calibration.sunrise.disc {
                    SunriseDisc::Center => f.disc_center,
                    // Edge means upper limb: the engine's disc-bottom bit.
                    SunriseDisc::Edge => f.disc_bottom,
                };
                if !self.calibration.sunrise.use_refraction {
                    rsmi |= f.no_refraction;
                }
                let atm = self.calibration.sunrise.atmosphere;
                let press = atpress.unwrap_or(atm.pressure_mbar);
                let temp = attemp.unwrap_or(atm.temperature_c);
                let geo = self.site;
                let key = CacheKey {
                    sig: self.sig.clone(),
                    op: OpKey::RiseSet {
                        jd_q: quantize(jd_ut, JD_SCALE),
                        body: body.code(),
                        rise,
                        ephe_flags,
                        rsmi,
                        lon_q: quantize(geo.lon_deg, GEO_SCALE),
                        lat_q: quantize(geo.lat_deg, GEO_SCALE),
                        alt_q: quantize(geo.alt_m, ALT_SCALE),
                        press_q: quantize(press, ATM_SCALE),
                        temp_q: quantize(temp, ATM_SCALE),
                    },
                };
                if let Some(CacheValue::Rise(jd, status)) = self.cache.get(&key) {
                    return Ok((*jd, *status));
                }
                let out = self.oracle.rise_trans(
                    jd_ut,
                    body.code(),
                    ephe_flags,
                    rsmi,
                    geo,
                    Some(press),
                    Some(temp),
                )?;
                self.cache.insert(key, CacheValue::Rise(out.0, out.1));
                Ok(out)
            }
        }
    }
}

impl<O: EphemerisOracle> DeltaTSource for Provider<'_, O> {
    fn delta_t_days(&self, jd_ut: f64) -> f64 {
        delta_t_days_from_raw(self.oracle.delta_t(jd_ut))
    }
}
