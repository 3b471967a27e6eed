//! Event finder: next tithi/nakshatra/yoga boundary crossing.
//!
//! For each quantity the finder reads the current continuous index, targets
//! the next integer boundary, and drives the hybrid solver over a residual
//! that asks the provider for fresh Sun/Moon states at every probe. The
//! provider's cache absorbs repeated probes. Solver diagnostics are part of
//! the returned contract and flow through untouched.

use kala_ephem::{Body, EphemerisOracle, Provider};

use crate::error::SearchError;
use crate::solver::{SolveResult, SolverConfig, solve_root};
use crate::temporal::{nakshatra_continuous, tithi_continuous, yoga_continuous};

/// Cycle length of the tithi index.
const TITHI_PERIOD: f64 = 30.0;

/// Cycle length of the nakshatra and yoga indices.
const STAR_PERIOD: f64 = 27.0;

/// Search tuning for one boundary query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Absolute time accuracy in seconds.
    pub accuracy_seconds: f64,
    /// Coarse bracketing scan step in days.
    pub scan_step_days: f64,
    /// Forward search window in days.
    pub max_days_ahead: f64,
}

impl SearchParams {
    /// Defaults for a tithi-end search (a tithi runs ~19-26 h).
    pub fn tithi() -> Self {
        Self {
            accuracy_seconds: 0.1,
            scan_step_days: 1.0 / 12.0,
            max_days_ahead: 1.5,
        }
    }

    /// Defaults for a nakshatra-end search.
    pub fn nakshatra() -> Self {
        Self {
            accuracy_seconds: 0.1,
            scan_step_days: 1.0 / 12.0,
            max_days_ahead: 1.3,
        }
    }

    /// Defaults for a yoga-end search.
    pub fn yoga() -> Self {
        Self {
            accuracy_seconds: 0.1,
            scan_step_days: 1.0 / 12.0,
            max_days_ahead: 1.3,
        }
    }

    /// Validate the parameters.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.accuracy_seconds.is_finite() || self.accuracy_seconds <= 0.0 {
            return Err("accuracy_seconds must be positive");
        }
        if !self.scan_step_days.is_finite() || self.scan_step_days <= 0.0 {
            return Err("scan_step_days must be positive");
        }
        if !self.max_days_ahead.is_finite() || self.max_days_ahead <= 0.0 {
            return Err("max_days_ahead must be positive");
        }
        Ok(())
    }

    fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            accuracy_seconds: self.accuracy_seconds,
            scan_step_days: self.scan_step_days,
            ..SolverConfig::default()
        }
    }
}

/// Keep the residual continuous across the cycle wrap.
///
/// When the integer target sits at/past the cycle end, probes that have
/// already wrapped into the early half are lifted by one period.
fn unwrap_cycle(val: f64, target: f64, period: f64) -> f64 {
    if target >= period && val < period / 2.0 {
        val + period
    } else {
        val
    }
}

/// Boundary-event finder over a session provider.
pub struct PanchangaFinder<'p, 's, O: EphemerisOracle> {
    provider: &'p mut Provider<'s, O>,
}

impl<'p, 's, O: EphemerisOracle> PanchangaFinder<'p, 's, O> {
    pub fn new(provider: &'p mut Provider<'s, O>) -> Self {
        Self { provider }
    }

    /// Find the end of the tithi in progress at `start_jd`.
    pub fn next_tithi_end(&mut self, start_jd: f64) -> Result<SolveResult, SearchError> {
        self.next_tithi_end_with(start_jd, &SearchParams::tithi())
    }

    /// Tithi-end search with explicit parameters.
    pub fn next_tithi_end_with(
        &mut self,
        start_jd: f64,
        params: &SearchParams,
    ) -> Result<SolveResult, SearchError> {
        params.validate().map_err(SearchError::InvalidConfig)?;

        let (sun0, sun_spd0) = self.provider.planet_lon_speed(start_jd, Body::Sun)?;
        let (moon0, moon_spd0) = self.provider.planet_lon_speed(start_jd, Body::Moon)?;
        let (curr, _) = tithi_continuous(moon0, moon_spd0, sun0, sun_spd0);
        let target = curr.floor() + 1.0;

        let provider = &mut *self.provider;
        let mut residual = |jd: f64| -> Result<(f64, f64), SearchError> {
            let (sun, sun_spd) = provider.planet_lon_speed(jd, Body::Sun)?;
            let (moon, moon_spd) = provider.planet_lon_speed(jd, Body::Moon)?;
            let (val, speed) = tithi_continuous(moon, moon_spd, sun, sun_spd);
            Ok((unwrap_cycle(val, target, TITHI_PERIOD) - target, speed))
        };

        solve_root(
            &mut residual,
            start_jd,
            start_jd + params.max_days_ahead,
            &params.solver_config(),
        )
    }

    /// Find the end of the nakshatra in progress at `start_jd`.
    pub fn next_nakshatra_end(&mut self, start_jd: f64) -> Result<SolveResult, SearchError> {
        self.next_nakshatra_end_with(start_jd, &SearchParams::nakshatra())
    }

    /// Nakshatra-end search with explicit parameters.
    pub fn next_nakshatra_end_with(
        &mut self,
        start_jd: f64,
        params: &SearchParams,
    ) -> Result<SolveResult, SearchError> {
        params.validate().map_err(SearchError::InvalidConfig)?;

        let (moon0, moon_spd0) = self.provider.planet_lon_speed(start_jd, Body::Moon)?;
        let (curr, _) = nakshatra_continuous(moon0, moon_spd0);
        let target = curr.floor() + 1.0;

        let provider = &mut *self.provider;
        let mut residual = |jd: f64| -> Result<(f64, f64), SearchError> {
            let (moon, moon_spd) = provider.planet_lon_speed(jd, Body::Moon)?;
            let (val, speed) = nakshatra_continuous(moon, moon_spd);
            Ok((unwrap_cycle(val, target, STAR_PERIOD) - target, speed))
        };

        solve_root(
            &mut residual,
            start_jd,
            start_jd + params.max_days_ahead,
            &params.solver_config(),
        )
    }

    /// Find the end of the yoga in progress at `start_jd`.
    pub fn next_yoga_end(&mut self, start_jd: f64) -> Result<SolveResult, SearchError> {
        self.next_yoga_end_with(start_jd, &SearchParams::yoga())
    }

    /// Yoga-end search with explicit parameters.
    pub fn next_yoga_end_with(
        &mut self,
        start_jd: f64,
        params: &SearchParams,
    ) -> Result<SolveResult, SearchError> {
        params.validate().map_err(SearchError::InvalidConfig)?;

        let (sun0, sun_spd0) = self.provider.planet_lon_speed(start_jd, Body::Sun)?;
        let (moon0, moon_spd0) = self.provider.planet_lon_speed(start_jd, Body::Moon)?;
        let (curr, _) = yoga_continuous(moon0, moon_spd0, sun0, sun_spd0);
        let target = curr.floor() + 1.0;

        let provider = &mut *self.provider;
        let mut residual = |jd: f64| -> Result<(f64, f64), SearchError> {
            let (sun, sun_spd) = provider.planet_lon_speed(jd, Body::Sun)?;
            let (moon, moon_spd) = provider.planet_lon_speed(jd, Body::Moon)?;
            let (val, speed) = yoga_continuous(moon, moon_spd, sun, sun_spd);
            Ok((unwrap_cycle(val, target, STAR_PERIOD) - target, speed))
        };

        solve_root(
            &mut residual,
            start_jd,
            start_jd + params.max_days_ahead,
            &params.solver_config(),
        )
    }
}
