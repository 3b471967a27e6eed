//! Session scope: exclusive engine access with guaranteed teardown.
//!
//! The native engine keeps process-global mutable state (ephemeris path,
//! sidereal mode, topocentric origin), so sessions serialize through one
//! process-wide mutex and reinstall policy on entry. Teardown runs in
//! `Drop`, which covers every exit path including unwinds.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::calibration::{AyanamsaMode, Calibration, Perspective, Zodiac};
use crate::oracle::{EphemerisOracle, GeoPos, SidModes};
use crate::provider::Provider;

/// Serializes entire session scopes, not individual queries: global-state
/// installation and teardown are only correct at scope granularity.
static ENGINE_LOCK: Mutex<()> = Mutex::new(());

/// Default ephemeris data directory, relative to the working directory.
const DEFAULT_EPHE_DIR: &str = "ephe";

/// An active almanac-computation session.
///
/// Strictly one session is active per process at a time; constructing a
/// second blocks until the first is dropped.
pub struct Session<O: EphemerisOracle> {
    oracle: O,
    calibration: Calibration,
    site: GeoPos,
    topo_pushed: bool,
    guard: Option<MutexGuard<'static, ()>>,
}

impl<O: EphemerisOracle> Session<O> {
    /// Acquire the engine, install the calibration, and open a session.
    ///
    /// `ephe_path` points at a directory of `*.se1` ephemeris tables; when
    /// absent or empty the engine falls back to its built-in model and a
    /// warning is emitted, but construction never fails for that reason.
    pub fn enter(
        mut oracle: O,
        calibration: Calibration,
        site: GeoPos,
        ephe_path: Option<&Path>,
    ) -> Self {
        // A poisoned lock only means another session panicked; the engine
        // state it guards is fully reinstalled below.
        let guard = ENGINE_LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let path = ephe_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EPHE_DIR));
        if !has_ephemeris_tables(&path) {
            warn!(
                path = %path.display(),
                "no *.se1 ephemeris tables found; engine falls back to its built-in model"
            );
        }
        oracle.set_ephe_path(&path);

        if calibration.zodiac == Zodiac::Sidereal {
            let modes = oracle.sid_modes();
            let ay = calibration.ayanamsa;
            if ay.mode == AyanamsaMode::UserDefined {
                oracle.set_sid_mode(modes.user, ay.t0, ay.ayan_t0);
            } else {
                oracle.set_sid_mode(builtin_sid_mode(&modes, ay.mode), 0.0, 0.0);
            }
        }

        let mut topo_pushed = false;
        if calibration.perspective == Perspective::Topocentric && calibration.topo.enabled {
            oracle.set_topo(site.lon_deg, site.lat_deg, site.alt_m);
            topo_pushed = true;
        }

        debug!(topo_pushed, "session opened");
        Self {
            oracle,
            calibration,
            site,
            topo_pushed,
            guard: Some(guard),
        }
    }

    /// A fresh provider over this session's oracle and calibration.
    ///
    /// The provider's cache is empty at creation and dies with the provider;
    /// results never bleed between sessions with different policies.
    pub fn provider(&self) -> Provider<'_, O> {
        Provider::new(&self.oracle, &self.calibration, self.site)
    }

    /// The session calibration.
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// The session site.
    pub fn site(&self) -> GeoPos {
        self.site
    }
}

impl<O: EphemerisOracle> Drop for Session<O> {
    fn drop(&mut self) {
        if self.topo_pushed && self.calibration.reset_topo_on_exit {
            self.oracle.set_topo(0.0, 0.0, 0.0);
        }
        // Sidereal mode is deliberately left installed: the next session
        // overwrites it before any query runs.
        debug!("session closed");
        self.guard.take();
    }
}

/// Map a built-in ayanamsa mode to the oracle's sidereal-mode id.
fn builtin_sid_mode(modes: &SidModes, mode: AyanamsaMode) -> i32 {
    match mode {
        AyanamsaMode::LahiriClassic => modes.lahiri,
        AyanamsaMode::TrueCitra => modes.true_citra,
        AyanamsaMode::Krishnamurti => modes.krishnamurti,
        AyanamsaMode::Raman => modes.raman,
        AyanamsaMode::UserDefined => modes.user,
    }
}

/// True when the directory holds at least one `*.se1` ephemeris table.
fn has_ephemeris_tables(path: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(path) else {
        return false;
    };
    entries.filter_map(Result::ok).any(|e| {
        e.path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("se1"))
    })
}
