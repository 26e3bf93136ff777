//! Physical constants and units. Everything is SI: energies in joules,
//! lengths in metres.

/// Speed of light in vacuum, units of m/s
pub const SPEED_OF_LIGHT: f64 = 2.99792458e8;
/// Speed of light in vacuum, squared, units of m^2/s^2
pub const SPEED_OF_LIGHT_SQD: f64 = 89875517873681764.0;
/// The absolute value of the electron charge, units of C
pub const ELEMENTARY_CHARGE: f64 = 1.602176634e-19;
/// Electron mass, units of kg
pub const ELECTRON_MASS: f64 = 9.1093837015e-31;
/// Proton mass, units of kg
pub const PROTON_MASS: f64 = 1.67262192369e-27;
/// Neutron mass, units of kg
pub const NEUTRON_MASS: f64 = 1.67492749804e-27;

/// Units of J
pub const EV: f64 = ELEMENTARY_CHARGE;
pub const GEV: f64 = 1.0e9 * EV;
pub const EEV: f64 = 1.0e18 * EV;

/// Units of m
pub const PARSEC: f64 = 3.0856775807e16;
pub const KPC: f64 = 1.0e3 * PARSEC;
pub const MPC: f64 = 1.0e6 * PARSEC;

/// Fraction of its energy that a nucleon loses when it is excited to,
/// and decays from, the Delta(1232) resonance: 1 - m_p / m_Delta.
pub const DELTA_RESONANCE_INELASTICITY: f64 = 1.0 - 938.0 / 1232.0;

/// Above this redshift the background photon density is taken to vanish
pub const MAX_REDSHIFT: f64 = 100.0;
