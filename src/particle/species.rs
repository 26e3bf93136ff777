//! Particle identities

use std::fmt;

/// What a particle is, up to its matter/antimatter polarity
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash,PartialOrd,Ord)]
pub enum Kind {
    Photon,
    Electron,
    ElectronNeutrino,
    MuonNeutrino,
    /// A bare nucleon (`a == 1`) or nucleus, with mass number
    /// `a` and charge number `z`
    Nucleus {
        a: u32,
        z: u32,
    },
}

/// Identity of a particle species.
///
/// The antiparticle flag is never set for the photon, which is its
/// own antiparticle. The positron is the anti-electron, following
/// the PDG convention that the electron has the positive code.
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash,PartialOrd,Ord)]
pub struct ParticleId {
    kind: Kind,
    anti: bool,
}

const NUCLEUS_OFFSET: i64 = 1_000_000_000;

impl ParticleId {
    pub fn photon() -> Self {
        Self { kind: Kind::Photon, anti: false }
    }

    pub fn electron() -> Self {
        Self { kind: Kind::Electron, anti: false }
    }

    pub fn positron() -> Self {
        Self::electron().conjugate()
    }

    pub fn electron_neutrino() -> Self {
        Self { kind: Kind::ElectronNeutrino, anti: false }
    }

    pub fn muon_neutrino() -> Self {
        Self { kind: Kind::MuonNeutrino, anti: false }
    }

    /// A nucleus with mass number `a` and charge number `z`.
    /// Panics unless `1 <= a` and `z <= a`.
    pub fn nucleus(a: u32, z: u32) -> Self {
        assert!(a >= 1 && z <= a, "invalid nucleus A = {}, Z = {}", a, z);
        Self { kind: Kind::Nucleus { a, z }, anti: false }
    }

    pub fn proton() -> Self {
        Self::nucleus(1, 1)
    }

    pub fn neutron() -> Self {
        Self::nucleus(1, 0)
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn is_nucleus(&self) -> bool {
        matches!(self.kind, Kind::Nucleus {..})
    }

    #[allow(unused)]
    pub fn is_antiparticle(&self) -> bool {
        self.anti
    }

    /// Number of nucleons, zero for everything that is not a nucleus
    pub fn mass_number(&self) -> u32 {
        match self.kind {
            Kind::Nucleus { a, .. } => a,
            _ => 0,
        }
    }

    /// Number of protons, zero for everything that is not a nucleus.
    /// An antinucleus reports the number of antiprotons.
    pub fn charge_number(&self) -> u32 {
        match self.kind {
            Kind::Nucleus { z, .. } => z,
            _ => 0,
        }
    }

    /// +1 for matter, -1 for antimatter
    pub fn sign(&self) -> i32 {
        if self.anti { -1 } else { 1 }
    }

    /// The antiparticle of this species
    pub fn conjugate(&self) -> Self {
        match self.kind {
            Kind::Photon => *self,
            kind => Self { kind, anti: !self.anti },
        }
    }

    /// Returns this species if `sign` is positive and its
    /// antiparticle otherwise
    pub fn with_sign(&self, sign: i32) -> Self {
        if sign < 0 { self.conjugate() } else { *self }
    }

    /// PDG Monte Carlo particle number, using the ±10LZZZAAAI
    /// scheme for nuclei (bare nucleons included).
    pub fn pdg(&self) -> i64 {
        let code = match self.kind {
            Kind::Photon => 22,
            Kind::Electron => 11,
            Kind::ElectronNeutrino => 12,
            Kind::MuonNeutrino => 14,
            Kind::Nucleus { a, z } => NUCLEUS_OFFSET + 10_000 * (z as i64) + 10 * (a as i64),
        };
        if self.anti { -code } else { code }
    }

    /// Inverse of [`pdg`](ParticleId::pdg), `None` for codes that do not
    /// correspond to a species known to this crate.
    #[allow(unused)]
    pub fn from_pdg(code: i64) -> Option<Self> {
        let sign = if code < 0 { -1 } else { 1 };
        let id = match code.abs() {
            22 if code > 0 => Self::photon(),
            11 => Self::electron(),
            12 => Self::electron_neutrino(),
            14 => Self::muon_neutrino(),
            c if c > NUCLEUS_OFFSET => {
                let a = ((c / 10) % 1000) as u32;
                let z = ((c / 10_000) % 1000) as u32;
                if a == 0 || z > a {
                    return None;
                }
                Self::nucleus(a, z)
            },
            _ => return None,
        };
        Some(id.with_sign(sign))
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let prefix = if self.anti { "anti-" } else { "" };
        match self.kind {
            Kind::Photon => write!(f, "photon"),
            Kind::Electron => if self.anti { write!(f, "positron") } else { write!(f, "electron") },
            Kind::ElectronNeutrino => write!(f, "{}nu_e", prefix),
            Kind::MuonNeutrino => write!(f, "{}nu_mu", prefix),
            Kind::Nucleus { a: 1, z: 1 } => write!(f, "{}proton", prefix),
            Kind::Nucleus { a: 1, z: 0 } => write!(f, "{}neutron", prefix),
            Kind::Nucleus { a, z } => write!(f, "{}nucleus (A = {}, Z = {})", prefix, a, z),
        }
    }
}
