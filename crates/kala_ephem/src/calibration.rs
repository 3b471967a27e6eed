//! Session calibration: the single source of truth for ephemeris policy.
//!
//! A [`Calibration`] pins every knob that changes what the engine computes:
//! zodiac, observation perspective, ayanamsa, node convention, house
//! derivation, sunrise disc policy, topocentric origin, and precision flags.
//! It is applied at session scope (one chart, one almanac unit) and never
//! mutated after construction; all nested records are value-owned.

/// Zodiac reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zodiac {
    Tropical,
    Sidereal,
}

/// Observation perspective for body positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Perspective {
    /// Geocentric with true (light-time uncorrected) positions.
    TrueGeocentric,
    Heliocentric,
    /// Observed from the session site; requires a topocentric push.
    Topocentric,
}

/// Ayanamsa reference system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AyanamsaMode {
    LahiriClassic,
    TrueCitra,
    Krishnamurti,
    Raman,
    /// Caller-supplied `t0` / `ayan_t0` anchor pair.
    UserDefined,
}

/// Lunar node convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeMode {
    Mean,
    True,
}

/// How sidereal house cusps are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HouseMode {
    /// Ask the engine directly with its sidereal flag set.
    SiderealNative,
    /// Compute tropical cusps, then subtract the ayanamsa and renormalize.
    TropicalDerived,
}

/// House system, identified by the engine's single-byte tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HouseSystem {
    Placidus,
    WholeSign,
    Equal,
    Porphyry,
    Koch,
    Campanus,
    Regiomontanus,
    EqualAsc,
}

impl HouseSystem {
    /// Engine house-system byte.
    pub const fn hsys_byte(self) -> u8 {
        match self {
            Self::Placidus => b'P',
            Self::WholeSign => b'W',
            Self::Equal => b'E',
            Self::Porphyry => b'O',
            Self::Koch => b'K',
            Self::Campanus => b'C',
            Self::Regiomontanus => b'R',
            Self::EqualAsc => b'A',
        }
    }
}

/// Sunrise computation style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiseStyle {
    /// Traditional Hindu rising: upper-limb contact with the true horizon,
    /// true positions, refraction-unadjusted, altitude forced to sea level.
    HinduDrik,
    /// Configurable disc/refraction/atmosphere policy.
    DiscPolicy,
}

/// Which part of the solar disc defines the rise instant under
/// [`RiseStyle::DiscPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SunriseDisc {
    Center,
    /// Upper limb.
    Edge,
}

/// Atmospheric inputs for refraction under [`RiseStyle::DiscPolicy`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    pub pressure_mbar: f64,
    pub temperature_c: f64,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            pressure_mbar: 1013.25,
            temperature_c: 15.0,
        }
    }
}

/// Ayanamsa configuration. `t0` / `ayan_t0` are read only for
/// [`AyanamsaMode::UserDefined`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AyanamsaConfig {
    pub mode: AyanamsaMode,
    pub t0: f64,
    pub ayan_t0: f64,
}

impl Default for AyanamsaConfig {
    fn default() -> Self {
        Self {
            mode: AyanamsaMode::TrueCitra,
            t0: 0.0,
            ayan_t0: 0.0,
        }
    }
}

/// Sunrise/sunset policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RisePolicy {
    pub style: RiseStyle,
    pub disc: SunriseDisc,
    pub use_refraction: bool,
    pub atmosphere: Atmosphere,
}

impl Default for RisePolicy {
    fn default() -> Self {
        Self {
            style: RiseStyle::HinduDrik,
            disc: SunriseDisc::Edge,
            use_refraction: true,
            atmosphere: Atmosphere::default(),
        }
    }
}

/// Topocentric origin policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopoConfig {
    pub enabled: bool,
    /// Default observer altitude, used when a site record carries none.
    pub altitude_m: f64,
}

impl Default for TopoConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            altitude_m: 0.0,
        }
    }
}

/// Immutable ephemeris calculation policy, applied at session scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    pub zodiac: Zodiac,
    pub perspective: Perspective,
    pub ayanamsa: AyanamsaConfig,
    pub nodes: NodeMode,
    pub houses: HouseMode,
    pub house_system: HouseSystem,
    pub sunrise: RisePolicy,
    pub topo: TopoConfig,
    pub use_microseconds: bool,
    pub use_speed: bool,
    pub use_truepos: bool,
    pub reset_topo_on_exit: bool,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            zodiac: Zodiac::Sidereal,
            perspective: Perspective::Topocentric,
            ayanamsa: AyanamsaConfig::default(),
            nodes: NodeMode::True,
            houses: HouseMode::TropicalDerived,
            house_system: HouseSystem::Placidus,
            sunrise: RisePolicy::default(),
            topo: TopoConfig::default(),
            use_microseconds: true,
            use_speed: true,
            use_truepos: true,
            reset_topo_on_exit: true,
        }
    }
}

impl Calibration {
    /// Canonical, order-stable scalar signature of this calibration.
    ///
    /// Two calibrations with equal signatures are interchangeable for
    /// caching; the signature namespaces every provider cache key.
    pub fn signature(&self) -> Signature {
        Signature {
            zodiac: self.zodiac,
            perspective: self.perspective,
            ayanamsa_mode: self.ayanamsa.mode,
            ayanamsa_t0: self.ayanamsa.t0.to_bits(),
            ayanamsa_ayan_t0: self.ayanamsa.ayan_t0.to_bits(),
            nodes: self.nodes,
            houses: self.houses,
            house_system: self.house_system,
            rise_style: self.sunrise.style,
            rise_disc: self.sunrise.disc,
            use_refraction: self.sunrise.use_refraction,
            pressure_mbar: self.sunrise.atmosphere.pressure_mbar.to_bits(),
            temperature_c: self.sunrise.atmosphere.temperature_c.to_bits(),
            topo_enabled: self.topo.enabled,
            topo_altitude_m: self.topo.altitude_m.to_bits(),
            use_microseconds: self.use_microseconds,
            use_speed: self.use_speed,
            use_truepos: self.use_truepos,
            reset_topo_on_exit: self.reset_topo_on_exit,
        }
    }
}

/// Structurally-hashable calibration signature. Float fields are carried as
/// raw bit patterns; the values come straight from the record, so equal
/// calibrations hash identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    zodiac: Zodiac,
    perspective: Perspective,
    ayanamsa_mode: AyanamsaMode,
    ayanamsa_t0: u64,
    ayanamsa_ayan_t0: u64,
    nodes: NodeMode,
    houses: HouseMode,
    house_system: HouseSystem,
    rise_style: RiseStyle,
    rise_disc: SunriseDisc,
    use_refraction: bool,
    pressure_mbar: u64,
    temperature_c: u64,
    topo_enabled: bool,
    topo_altitude_m: u64,
    use_microseconds: bool,
    use_speed: bool,
    use_truepos: bool,
    reset_topo_on_exit: bool,
}
