//! Event generators for photon-nucleon collisions.
//!
//! A generator is handed the interacting nucleon and its energy and
//! returns the final-state particles. It is assumed to hold global state
//! and must not be called from more than one thread at a time.

use enum_dispatch::enum_dispatch;

use crate::photopion::Channel;

mod resonance;
mod replay;

pub use resonance::*;
pub use replay::*;

/// Particle codes used in the final states.
pub mod codes {
    pub const PHOTON: i32 = 1;
    pub const POSITRON: i32 = 2;
    pub const ELECTRON: i32 = 3;
    pub const PROTON: i32 = 13;
    pub const NEUTRON: i32 = 14;
    pub const ANTIPROTON: i32 = -13;
    pub const ANTINEUTRON: i32 = -14;
    pub const NU_E: i32 = 15;
    pub const ANTI_NU_E: i32 = 16;
    pub const NU_MU: i32 = 17;
    pub const ANTI_NU_MU: i32 = 18;
}

/// Specification of a single photon-nucleon collision
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct EventRequest {
    /// Which nucleon interacts
    pub channel: Channel,
    /// Energy of the nucleon, in GeV
    pub energy: f64,
    pub redshift: f64,
    /// Photon density is zero above this redshift
    pub max_redshift: f64,
    /// 1 for the CMB, 2 for an infrared background
    pub background: i32,
}

/// A final-state particle
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct Outgoing {
    pub code: i32,
    /// Energy, in GeV
    pub energy: f64,
}

impl Outgoing {
    pub fn new(code: i32, energy: f64) -> Self {
        Outgoing { code, energy }
    }
}

#[enum_dispatch]
pub trait EventGenerator {
    /// Simulates a photon-nucleon collision, returning all
    /// outgoing particles
    fn generate(&mut self, request: &EventRequest) -> Vec<Outgoing>;
}

/// The event generators available to the driver
#[enum_dispatch(EventGenerator)]
pub enum Generator {
    DeltaResonance,
    EventReplay,
}
