//! Calibration policy, ephemeris oracle contract, and session-scoped provider.
//!
//! This crate provides:
//! - An immutable [`Calibration`] record pinning zodiac, ayanamsa, frame,
//!   node, house, and sunrise policy, with a hashable [`Signature`]
//! - The [`EphemerisOracle`] capability trait the native engine plugs into
//! - A [`Session`] guard that serializes access to the engine's global
//!   state and guarantees teardown
//! - A [`Provider`] that answers longitude/speed, ayanamsa, house, and
//!   rise/set queries through a deterministic per-session result cache

pub mod calibration;
pub mod error;
pub mod oracle;
pub mod provider;
pub mod session;

pub use calibration::{
    Atmosphere, AyanamsaConfig, AyanamsaMode, Calibration, HouseMode, HouseSystem, NodeMode,
    Perspective, RisePolicy, RiseStyle, Signature, SunriseDisc, TopoConfig, Zodiac,
};
pub use error::OracleError;
pub use oracle::{Body, EclipticState, EphemerisOracle, GeoPos, HousesRaw, OracleFlags, SidModes};
pub use provider::Provider;
pub use session::Session;
