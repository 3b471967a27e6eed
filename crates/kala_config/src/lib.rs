//! Declarative calibration files resolved into typed session inputs.
//!
//! A calibration file (TOML or JSON, chosen by extension) carries optional
//! `[calibration]`, `[site]`, and `[search]` sections plus a top-level
//! `ephe_path`. Missing fields take the engine's literal defaults; unknown
//! fields and unknown enum tags are rejected. The resolver output bundles
//! everything a session and a finder need.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use kala_ephem::{
    AyanamsaMode, Calibration, GeoPos, HouseMode, HouseSystem, NodeMode, Perspective, RiseStyle,
    SunriseDisc, Zodiac,
};
use kala_search::SearchParams;

/// Errors from config loading and resolution.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// File could not be read.
    Io(String),
    /// File could not be parsed as TOML/JSON.
    Parse(String),
    /// A field value is outside the accepted vocabulary.
    Invalid(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "config I/O error: {msg}"),
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Invalid(msg) => write!(f, "invalid config value: {msg}"),
        }
    }
}

impl Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// File schema (everything optional; defaults are the engine's literals)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    ephe_path: Option<PathBuf>,
    calibration: CalibrationSection,
    site: SiteSection,
    search: SearchSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CalibrationSection {
    zodiac: Option<String>,
    perspective: Option<String>,
    nodes: Option<String>,
    houses: Option<String>,
    house_system: Option<String>,
    ayanamsa: AyanamsaSection,
    sunrise: SunriseSection,
    topo: TopoSection,
    use_microseconds: Option<bool>,
    use_speed: Option<bool>,
    use_truepos: Option<bool>,
    reset_topo_on_exit: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct AyanamsaSection {
    mode: Option<String>,
    t0: Option<f64>,
    ayan_t0: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SunriseSection {
    style: Option<String>,
    disc: Option<String>,
    use_refraction: Option<bool>,
    pressure_mbar: Option<f64>,
    temperature_c: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TopoSection {
    enabled: Option<bool>,
    altitude_m: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SiteSection {
    lon_deg: Option<f64>,
    lat_deg: Option<f64>,
    alt_m: Option<f64>,
    tz_hours: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SearchSection {
    accuracy_seconds: Option<f64>,
    scan_step_days: Option<f64>,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Fully-resolved session inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub calibration: Calibration,
    pub site: GeoPos,
    pub tz_hours: f64,
    pub ephe_path: Option<PathBuf>,
    accuracy_seconds: Option<f64>,
    scan_step_days: Option<f64>,
}

impl ResolvedConfig {
    /// Apply the file's `[search]` overrides onto per-event defaults.
    pub fn search_params(&self, base: SearchParams) -> SearchParams {
        SearchParams {
            accuracy_seconds: self.accuracy_seconds.unwrap_or(base.accuracy_seconds),
            scan_step_days: self.scan_step_days.unwrap_or(base.scan_step_days),
            ..base
        }
    }
}

/// Load and resolve a calibration file; format chosen by extension.
pub fn load(path: &Path) -> Result<ResolvedConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => from_toml_str(&content),
        Some("json") => from_json_str(&content),
        _ => Err(ConfigError::Invalid(
            "unsupported config extension (expected .toml or .json)",
        )),
    }
}

/// Resolve a TOML calibration document.
pub fn from_toml_str(content: &str) -> Result<ResolvedConfig, ConfigError> {
    let file: ConfigFile =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    resolve(file)
}

/// Resolve a JSON calibration document.
pub fn from_json_str(content: &str) -> Result<ResolvedConfig, ConfigError> {
    let file: ConfigFile =
        serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    resolve(file)
}

fn resolve(file: ConfigFile) -> Result<ResolvedConfig, ConfigError> {
    let mut calibration = Calibration::default();
    let c = file.calibration;

    if let Some(tag) = c.zodiac.as_deref() {
        calibration.zodiac = zodiac_from_tag(tag)?;
    }
    if let Some(tag) = c.perspective.as_deref() {
        calibration.perspective = perspective_from_tag(tag)?;
    }
    if let Some(tag) = c.nodes.as_deref() {
        calibration.nodes = nodes_from_tag(tag)?;
    }
    if let Some(tag) = c.houses.as_deref() {
        calibration.houses = houses_from_tag(tag)?;
    }
    if let Some(tag) = c.house_system.as_deref() {
        calibration.house_system = house_system_from_tag(tag)?;
    }
    if let Some(tag) = c.ayanamsa.mode.as_deref() {
        calibration.ayanamsa.mode = ayanamsa_from_tag(tag)?;
    }
    if let Some(t0) = c.ayanamsa.t0 {
        calibration.ayanamsa.t0 = t0;
    }
    if let Some(ayan_t0) = c.ayanamsa.ayan_t0 {
        calibration.ayanamsa.ayan_t0 = ayan_t0;
    }
    if let Some(tag) = c.sunrise.style.as_deref() {
        calibration.sunrise.style = rise_style_from_tag(tag)?;
    }
    if let Some(tag) = c.sunrise.disc.as_deref() {
        calibration.sunrise.disc = disc_from_tag(tag)?;
    }
    if let Some(v) = c.sunrise.use_refraction {
        calibration.sunrise.use_refraction = v;
    }
    if let Some(v) = c.sunrise.pressure_mbar {
        calibration.sunrise.atmosphere.pressure_mbar = v;
    }
    if let Some(v) = c.sunrise.temperature_c {
        calibration.sunrise.atmosphere.temperature_c = v;
    }
    if let Some(v) = c.topo.enabled {
        calibration.topo.enabled = v;
    }
    if let Some(v) = c.topo.altitude_m {
        calibration.topo.altitude_m = v;
    }
    if let Some(v) = c.use_microseconds {
        calibration.use_microseconds = v;
    }
    if let Some(v) = c.use_speed {
        calibration.use_speed = v;
    }
    if let Some(v) = c.use_truepos {
        calibration.use_truepos = v;
    }
    if let Some(v) = c.reset_topo_on_exit {
        calibration.reset_topo_on_exit = v;
    }

    let site = GeoPos {
        lon_deg: file.site.lon_deg.unwrap_or(0.0),
        lat_deg: file.site.lat_deg.unwrap_or(0.0),
        // A site without an altitude inherits the configured topo default.
        alt_m: file.site.alt_m.unwrap_or(calibration.topo.altitude_m),
    };

    Ok(ResolvedConfig {
        calibration,
        site,
        tz_hours: file.site.tz_hours.unwrap_or(0.0),
        ephe_path: file.ephe_path,
        accuracy_seconds: file.search.accuracy_seconds,
        scan_step_days: file.search.scan_step_days,
    })
}

fn zodiac_from_tag(tag: &str) -> Result<Zodiac, ConfigError> {
    match tag {
        "tropical" => Ok(Zodiac::Tropical),
        "sidereal" => Ok(Zodiac::Sidereal),
        _ => Err(ConfigError::Invalid("zodiac must be tropical|sidereal")),
    }
}

fn perspective_from_tag(tag: &str) -> Result<Perspective, ConfigError> {
    match tag {
        "true_geocentric" => Ok(Perspective::TrueGeocentric),
        "heliocentric" => Ok(Perspective::Heliocentric),
        "topocentric" => Ok(Perspective::Topocentric),
        _ => Err(ConfigError::Invalid(
            "perspective must be true_geocentric|heliocentric|topocentric",
        )),
    }
}

fn nodes_from_tag(tag: &str) -> Result<NodeMode, ConfigError> {
    match tag {
        "mean" => Ok(NodeMode::Mean),
        "true" => Ok(NodeMode::True),
        _ => Err(ConfigError::Invalid("nodes must be mean|true")),
    }
}

fn houses_from_tag(tag: &str) -> Result<HouseMode, ConfigError> {
    match tag {
        "sidereal_native" => Ok(HouseMode::SiderealNative),
        "tropical_derived" => Ok(HouseMode::TropicalDerived),
        _ => Err(ConfigError::Invalid(
            "houses must be sidereal_native|tropical_derived",
        )),
    }
}

fn house_system_from_tag(tag: &str) -> Result<HouseSystem, ConfigError> {
    match tag {
        "placidus" => Ok(HouseSystem::Placidus),
        "whole_sign" => Ok(HouseSystem::WholeSign),
        "equal" => Ok(HouseSystem::Equal),
        "porphyry" => Ok(HouseSystem::Porphyry),
        "koch" => Ok(HouseSystem::Koch),
        "campanus" => Ok(HouseSystem::Campanus),
        "regiomontanus" => Ok(HouseSystem::Regiomontanus),
        "equal_asc" => Ok(HouseSystem::EqualAsc),
        _ => Err(ConfigError::Invalid("unknown house_system")),
    }
}

fn ayanamsa_from_tag(tag: &str) -> Result<AyanamsaMode, ConfigError> {
    match tag {
        "lahiri_classic" => Ok(AyanamsaMode::LahiriClassic),
        "true_citra" => Ok(AyanamsaMode::TrueCitra),
        "krishnamurti" => Ok(AyanamsaMode::Krishnamurti),
        "raman" => Ok(AyanamsaMode::Raman),
        "user_defined" => Ok(AyanamsaMode::UserDefined),
        _ => Err(ConfigError::Invalid("unknown ayanamsa mode")),
    }
}

fn rise_style_from_tag(tag: &str) -> Result<RiseStyle, ConfigError> {
    match tag {
        "hindu_drik" => Ok(RiseStyle::HinduDrik),
        "disc_policy" => Ok(RiseStyle::DiscPolicy),
        _ => Err(ConfigError::Invalid("sunrise style must be hindu_drik|disc_policy")),
    }
}

fn disc_from_tag(tag: &str) -> Result<SunriseDisc, ConfigError> {
    match tag {
        "center" => Ok(SunriseDisc::Center),
        "edge" => Ok(SunriseDisc::Edge),
        _ => Err(ConfigError::Invalid("sunrise disc must be center|edge")),
    }
}
