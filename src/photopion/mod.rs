//! Photo-pion production: interactions of nucleons and nuclei
//! with background photons, N + γ -> N' + π + ...

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rand::prelude::*;
use rand::distributions::Open01;

use crate::constants::*;
use crate::generator::{codes, EventGenerator, EventRequest, Generator};
use crate::interpolation::{interpolate, interpolate2d};
use crate::particle::{Candidate, ParticleId};
use crate::photon_field::{PhotonField, photon_field_scaling};

mod error;
mod tables;

pub use error::*;
pub use tables::*;

/// The nucleon that interacts with the background photon
#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub enum Channel {
    Proton,
    Neutron,
}

impl Channel {
    /// Charge number of the target nucleon
    pub fn charge(&self) -> u32 {
        match self {
            Channel::Proton => 1,
            Channel::Neutron => 0,
        }
    }
}

/// Outcome of sampling the free path in one channel
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct ChannelDraw {
    pub channel: Channel,
    /// Distance to the interaction, in m
    pub distance: f64,
}

/// Settings of the photo-pion production module
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct PhotoPionConfig {
    pub field: PhotonField,
    /// Emit photons, electrons and positrons
    pub photons: bool,
    pub neutrinos: bool,
    pub antinucleons: bool,
    /// Steps are limited to this fraction of the mean free path
    pub limit: f64,
}

impl Default for PhotoPionConfig {
    fn default() -> Self {
        PhotoPionConfig {
            field: PhotonField::Cmb,
            photons: true,
            neutrinos: true,
            antinucleons: true,
            limit: 0.1,
        }
    }
}

impl PhotoPionConfig {
    pub fn with_field(self, field: PhotonField) -> Self {
        PhotoPionConfig { field, ..self }
    }

    pub fn with_photons(self, photons: bool) -> Self {
        PhotoPionConfig { photons, ..self }
    }

    pub fn with_neutrinos(self, neutrinos: bool) -> Self {
        PhotoPionConfig { neutrinos, ..self }
    }

    pub fn with_antinucleons(self, antinucleons: bool) -> Self {
        PhotoPionConfig { antinucleons, ..self }
    }

    pub fn with_limit(self, limit: f64) -> Self {
        PhotoPionConfig { limit, ..self }
    }
}

/// Empirical correction for the shadowing of nucleons in a nucleus:
/// the effective number of the `x` target nucleons, out of `a` in total,
/// that are exposed to the photon.
pub fn nuclear_modification(a: u32, x: u32) -> f64 {
    if a == 1 {
        1.0
    } else if a <= 8 {
        0.85 * (x as f64).powf(2.0 / 3.0)
    } else {
        0.85 * (x as f64)
    }
}

/// Samples an interaction distance `-ln(U) / rate` for every channel,
/// drawing one uniform deviate `U` per channel in the order given, and
/// returns the channel with the shortest distance and the total rate.
/// If two distances are equal, the later channel is chosen.
pub fn sample_channel<F>(rates: &[(Channel, f64)], mut uniform: F) -> Option<(ChannelDraw, f64)>
where F: FnMut() -> f64 {
    let total: f64 = rates.iter().map(|(_, rate)| rate).sum();
    rates.iter()
        .map(|&(channel, rate)| {
            let u: f64 = uniform();
            ChannelDraw { channel, distance: -u.ln() / rate }
        })
        .fold(None, |best: Option<ChannelDraw>, draw| match best {
            Some(b) if b.distance < draw.distance => Some(b),
            _ => Some(draw),
        })
        .map(|draw| (draw, total))
}

/// Stochastic photo-pion production for nucleons and nuclei.
///
/// The rate table is read-only once loaded, and the event generator
/// is serialized behind a lock, so a single instance can be shared by
/// any number of threads, each with its own random number generator.
pub struct PhotoPionProduction<G = Generator> {
    config: PhotoPionConfig,
    data_dir: PathBuf,
    table: RateTable,
    generator: Mutex<G>,
}

impl<G: EventGenerator> PhotoPionProduction<G> {
    /// Creates the module, loading the rate table that corresponds
    /// to the selected photon field from `data_dir`
    pub fn new<P: AsRef<Path>>(config: PhotoPionConfig, data_dir: P, generator: G) -> Result<Self, PhotoPionError> {
        let data_dir = data_dir.as_ref().to_owned();
        let table = RateTable::load(config.field, &data_dir)?;
        Ok(PhotoPionProduction {
            config,
            data_dir,
            table,
            generator: Mutex::new(generator),
        })
    }

    /// Creates the module using an already loaded rate table
    #[allow(unused)]
    pub fn with_table(config: PhotoPionConfig, table: RateTable, generator: G) -> Self {
        PhotoPionProduction {
            config,
            data_dir: PathBuf::new(),
            table,
            generator: Mutex::new(generator),
        }
    }

    #[allow(unused)]
    pub fn config(&self) -> &PhotoPionConfig {
        &self.config
    }

    #[allow(unused)]
    pub fn table(&self) -> &RateTable {
        &self.table
    }

    pub fn description(&self) -> String {
        format!("PhotoPionProduction: {}", self.config.field.description())
    }

    /// Switches to another photon field. The new rate table is loaded
    /// in full before it replaces the current one; on failure the
    /// module is left unchanged.
    #[allow(unused)]
    pub fn set_photon_field(&mut self, field: PhotonField) -> Result<(), PhotoPionError> {
        let table = RateTable::load(field, &self.data_dir)?;
        self.table = table;
        self.config.field = field;
        Ok(())
    }

    #[allow(unused)]
    pub fn set_have_photons(&mut self, photons: bool) {
        self.config.photons = photons;
    }

    #[allow(unused)]
    pub fn set_have_neutrinos(&mut self, neutrinos: bool) {
        self.config.neutrinos = neutrinos;
    }

    #[allow(unused)]
    pub fn set_have_antinucleons(&mut self, antinucleons: bool) {
        self.config.antinucleons = antinucleons;
    }

    #[allow(unused)]
    pub fn set_limit(&mut self, limit: f64) {
        self.config.limit = limit;
    }

    /// Interaction rate (in 1/m) of a single nucleon of the given type,
    /// at redshift `z`, with `gamma` already boosted by (1+z)
    fn nucleon_rate(&self, channel: Channel, z: f64, gamma: f64) -> f64 {
        let rates = self.table.rates(channel);
        if self.table.is_redshift_dependent() {
            interpolate2d(z, gamma, self.table.redshifts(), self.table.lorentz(), rates)
        } else {
            // comoving photon density
            let scaling = (1.0 + z).powi(2) * photon_field_scaling(self.config.field, z);
            scaling * interpolate(gamma, self.table.lorentz(), rates)
        }
    }

    /// Interaction rates of the nucleus `id` on its protons and on its neutrons,
    /// omitting a channel if there are no nucleons of that type
    fn channel_rates(&self, id: ParticleId, z: f64, gamma: f64) -> Vec<(Channel, f64)> {
        let a = id.mass_number();
        let n_protons = id.charge_number();
        let n_neutrons = a - n_protons;

        let mut rates = Vec::with_capacity(2);
        if n_protons > 0 {
            let rate = self.nucleon_rate(Channel::Proton, z, gamma) * nuclear_modification(a, n_protons);
            rates.push((Channel::Proton, rate));
        }
        if n_neutrons > 0 {
            let rate = self.nucleon_rate(Channel::Neutron, z, gamma) * nuclear_modification(a, n_neutrons);
            rates.push((Channel::Neutron, rate));
        }
        rates
    }

    /// Checks whether the `candidate` interacts during its current step.
    ///
    /// If it does, the interaction is performed and the remainder of the
    /// step is checked again, until the step is used up or no further
    /// interaction takes place. In the latter case, the next step is limited
    /// to a fraction `limit` of the mean free path.
    /// Returns the number of interactions that took place.
    pub fn process<C: Candidate, R: Rng>(&self, candidate: &mut C, rng: &mut R) -> Result<usize, PhotoPionError> {
        let mut step = candidate.current_step();
        let mut interactions = 0;

        // runs at least once, so that the next step is always limited
        loop {
            let id = candidate.id();
            if !id.is_nucleus() {
                break;
            }

            let z = candidate.redshift();
            let gamma = (1.0 + z) * candidate.lorentz_factor();
            if !self.table.contains(gamma) {
                break;
            }

            let rates = self.channel_rates(id, z, gamma);
            let (draw, total_rate) = match sample_channel(&rates, || rng.sample(Open01)) {
                Some(result) => result,
                None => break,
            };

            if step < draw.distance {
                candidate.limit_next_step(self.config.limit / total_rate);
                break;
            }

            self.perform_interaction(candidate, draw.channel)?;
            interactions += 1;

            step -= draw.distance;
            if step <= 0.0 {
                break;
            }
        }

        Ok(interactions)
    }

    /// Replaces the `candidate` by the products of its collision with
    /// a background photon, absorbed by one of its protons or neutrons
    /// as given by `channel`.
    pub fn perform_interaction<C: Candidate>(&self, candidate: &mut C, channel: Channel) -> Result<(), PhotoPionError> {
        let id = candidate.id();
        if !id.is_nucleus() {
            return Ok(());
        }

        let a = id.mass_number();
        let z = id.charge_number();
        let energy = candidate.energy();
        let energy_per_nucleon = energy / (a as f64);

        // Only matter is simulated: for antimatter, swap all
        // products for their antiparticles
        let sign = id.sign();

        let request = EventRequest {
            channel,
            energy: energy_per_nucleon / GEV,
            redshift: candidate.redshift(),
            max_redshift: MAX_REDSHIFT,
            background: self.config.field.generator_code(),
        };

        let products = {
            let mut generator = self.generator.lock()
                .map_err(|_| PhotoPionError::GeneratorUnavailable)?;
            generator.generate(&request)
        };

        for pt in products {
            let e_out = pt.energy * GEV;
            match pt.code {
                codes::PROTON | codes::NEUTRON => {
                    let nucleon = nucleon_from_code(pt.code).with_sign(sign);
                    if a == 1 {
                        candidate.set_energy(e_out);
                        candidate.set_id(nucleon);
                    } else {
                        // knocked out of the nucleus
                        let z_remnant = z.saturating_sub(channel.charge()).min(a - 1);
                        let remnant = ParticleId::nucleus(a - 1, z_remnant);
                        candidate.set_energy(energy - energy_per_nucleon);
                        candidate.set_id(remnant.with_sign(sign));
                        candidate.add_secondary(nucleon, e_out);
                    }
                },
                codes::ANTIPROTON | codes::ANTINEUTRON => if self.config.antinucleons {
                    let nucleon = nucleon_from_code(-pt.code).with_sign(-sign);
                    candidate.add_secondary(nucleon, e_out);
                },
                codes::PHOTON => if self.config.photons {
                    candidate.add_secondary(ParticleId::photon(), e_out);
                },
                codes::POSITRON => if self.config.photons {
                    candidate.add_secondary(ParticleId::positron().with_sign(sign), e_out);
                },
                codes::ELECTRON => if self.config.photons {
                    candidate.add_secondary(ParticleId::electron().with_sign(sign), e_out);
                },
                codes::NU_E | codes::ANTI_NU_E | codes::NU_MU | codes::ANTI_NU_MU => if self.config.neutrinos {
                    let neutrino = match pt.code {
                        codes::NU_E => ParticleId::electron_neutrino(),
                        codes::ANTI_NU_E => ParticleId::electron_neutrino().conjugate(),
                        codes::NU_MU => ParticleId::muon_neutrino(),
                        _ => ParticleId::muon_neutrino().conjugate(),
                    };
                    candidate.add_secondary(neutrino.with_sign(sign), e_out);
                },
                code => return Err(PhotoPionError::UnexpectedParticle(code)),
            }
        }

        Ok(())
    }

    /// Mean distance (in m) over which a particle of species `id` and
    /// Lorentz factor `gamma` loses its energy to photo-pion production
    /// at redshift `z`. Infinite if no interaction is possible.
    ///
    /// The rate on protons is used for both protons and neutrons, and
    /// for a redshift-dependent table, the rates at the first tabulated
    /// redshift are evolved as for the other fields.
    pub fn loss_length(&self, id: ParticleId, gamma: f64, z: f64) -> f64 {
        let gamma = (1.0 + z) * gamma;
        if !id.is_nucleus() || !self.table.contains(gamma) {
            return std::f64::INFINITY;
        }

        let a = id.mass_number();
        let n_protons = id.charge_number();
        let n_neutrons = a - n_protons;

        let lorentz = self.table.lorentz();
        let rates = &self.table.rates(Channel::Proton)[..lorentz.len()];
        let rate = interpolate(gamma, lorentz, rates);

        let mut loss_rate = 0.0;
        if n_protons > 0 {
            loss_rate += rate * nuclear_modification(a, n_protons);
        }
        if n_neutrons > 0 {
            loss_rate += rate * nuclear_modification(a, n_neutrons);
        }

        // Nucleons keep m_p / m_Delta of their energy, nuclei lose
        // roughly the energy of the nucleon that interacts
        let relative_energy_loss = if a == 1 {
            DELTA_RESONANCE_INELASTICITY
        } else {
            1.0 / (a as f64)
        };
        loss_rate *= relative_energy_loss;

        // cosmological scaling of photon density
        loss_rate *= (1.0 + z).powi(3) * photon_field_scaling(self.config.field, z);

        1.0 / loss_rate
    }
}

fn nucleon_from_code(code: i32) -> ParticleId {
    if code == codes::PROTON {
        ParticleId::proton()
    } else {
        ParticleId::neutron()
    }
}
