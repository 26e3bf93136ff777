//! Particles

use crate::constants::*;

mod species;
mod builder;

pub use species::*;
pub use builder::*;

/// The interface through which an interaction process reads and
/// modifies the particle it acts on, and hands over the secondaries
/// it creates.
pub trait Candidate {
    fn id(&self) -> ParticleId;

    /// Total energy, in joules
    fn energy(&self) -> f64;

    fn lorentz_factor(&self) -> f64;

    fn redshift(&self) -> f64;

    /// Length of the step currently being taken, in metres
    fn current_step(&self) -> f64;

    fn set_energy(&mut self, energy: f64);

    fn set_id(&mut self, id: ParticleId);

    /// Creates a new particle with the given identity and energy
    /// (in joules) at the location of this one
    fn add_secondary(&mut self, id: ParticleId, energy: f64);

    /// Requests that the next step is no longer than `step`
    fn limit_next_step(&mut self, step: f64);
}

/// A particle travelling through an expanding universe, defined
/// by its species, energy and redshift
#[derive(Clone,Debug)]
pub struct Particle {
    id: ParticleId,
    energy: f64,
    redshift: f64,
    current_step: f64,
    next_step: f64,
    secondaries: Vec<Particle>,
}

/// A shower consists of the primary particle and all the
/// secondaries it produces
pub struct Shower {
    pub primary: Particle,
    pub secondaries: Vec<Particle>,
    pub interactions: usize,
}

/// Rest mass of the species, in kg. Nuclear binding energy is neglected.
pub fn mass(id: ParticleId) -> f64 {
    match id.kind() {
        Kind::Nucleus { a, z } => (z as f64) * PROTON_MASS + ((a - z) as f64) * NEUTRON_MASS,
        Kind::Electron => ELECTRON_MASS,
        Kind::Photon | Kind::ElectronNeutrino | Kind::MuonNeutrino => 0.0,
    }
}

impl Particle {
    /// Creates a new particle of the given species, with
    /// total energy `energy` (in joules), at zero redshift
    pub fn create(id: ParticleId, energy: f64) -> Self {
        Particle {
            id,
            energy,
            redshift: 0.0,
            current_step: 0.0,
            next_step: std::f64::INFINITY,
            secondaries: vec![],
        }
    }

    pub fn with_redshift(mut self, redshift: f64) -> Self {
        self.redshift = redshift;
        self
    }

    /// Sets the length of the step to be taken, and
    /// clears any limit on the following one
    #[allow(unused)]
    pub fn with_current_step(mut self, step: f64) -> Self {
        self.set_current_step(step);
        self
    }

    pub fn set_current_step(&mut self, step: f64) {
        self.current_step = step;
        self.next_step = std::f64::INFINITY;
    }

    /// The largest step the interaction processes have allowed so far
    pub fn next_step(&self) -> f64 {
        self.next_step
    }

    #[allow(unused)]
    pub fn secondaries(&self) -> &[Particle] {
        &self.secondaries
    }

    /// Removes and returns all secondaries accumulated so far
    pub fn take_secondaries(&mut self) -> Vec<Particle> {
        std::mem::take(&mut self.secondaries)
    }
}

impl Candidate for Particle {
    fn id(&self) -> ParticleId {
        self.id
    }

    fn energy(&self) -> f64 {
        self.energy
    }

    fn lorentz_factor(&self) -> f64 {
        self.energy / (mass(self.id) * SPEED_OF_LIGHT_SQD)
    }

    fn redshift(&self) -> f64 {
        self.redshift
    }

    fn current_step(&self) -> f64 {
        self.current_step
    }

    fn set_energy(&mut self, energy: f64) {
        self.energy = energy;
    }

    fn set_id(&mut self, id: ParticleId) {
        self.id = id;
    }

    fn add_secondary(&mut self, id: ParticleId, energy: f64) {
        let pt = Particle::create(id, energy).with_redshift(self.redshift);
        self.secondaries.push(pt);
    }

    fn limit_next_step(&mut self, step: f64) {
        self.next_step = self.next_step.min(step);
    }
}

impl Shower {
    pub fn multiplicity(&self) -> usize {
        self.secondaries.len()
    }
}
