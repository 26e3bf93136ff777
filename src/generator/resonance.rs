//! Single-pion production through the Delta(1232) resonance

use rand::prelude::*;
use rand_xoshiro::Xoshiro256StarStar;

use crate::constants::*;
use crate::photopion::Channel;
use super::{codes::*, EventGenerator, EventRequest, Outgoing};

/// Probability that the excited nucleon decays with charge exchange,
/// e.g. Delta+ -> n pi+, from isospin Clebsch-Gordan coefficients
const CHARGE_EXCHANGE_PROBABILITY: f64 = 1.0 / 3.0;

/// Approximates every photon-nucleon collision as the formation and
/// decay of a Delta(1232) resonance, followed by the decay of the pion:
///
/// * p γ -> p π0 or n π+,
/// * n γ -> n π0 or p π-,
/// * π0 -> γ γ and π± -> e± + 3 neutrinos.
///
/// On average the nucleon keeps the fraction m_p / m_Delta of its
/// energy, the pion takes the rest.
pub struct DeltaResonance {
    rng: Xoshiro256StarStar,
}

impl DeltaResonance {
    pub fn new(seed: u64) -> Self {
        DeltaResonance {
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }
}

impl EventGenerator for DeltaResonance {
    fn generate(&mut self, request: &EventRequest) -> Vec<Outgoing> {
        let incoming = match request.channel {
            Channel::Proton => PROTON,
            Channel::Neutron => NEUTRON,
        };

        if request.redshift > request.max_redshift {
            return vec![Outgoing::new(incoming, request.energy)];
        }

        let inelasticity = DELTA_RESONANCE_INELASTICITY * (0.5 + self.rng.gen::<f64>());
        let e_pion = inelasticity * request.energy;
        let e_nucleon = request.energy - e_pion;
        let charge_exchange = self.rng.gen::<f64>() < CHARGE_EXCHANGE_PROBABILITY;

        match (request.channel, charge_exchange) {
            (_, false) => {
                let split = self.rng.gen::<f64>();
                vec![
                    Outgoing::new(incoming, e_nucleon),
                    Outgoing::new(PHOTON, split * e_pion),
                    Outgoing::new(PHOTON, (1.0 - split) * e_pion),
                ]
            },
            // pi+ -> mu+ nu_mu, mu+ -> e+ nu_e anti-nu_mu
            (Channel::Proton, true) => vec![
                Outgoing::new(NEUTRON, e_nucleon),
                Outgoing::new(POSITRON, 0.25 * e_pion),
                Outgoing::new(NU_E, 0.25 * e_pion),
                Outgoing::new(ANTI_NU_MU, 0.25 * e_pion),
                Outgoing::new(NU_MU, 0.25 * e_pion),
            ],
            // pi- -> mu- anti-nu_mu, mu- -> e- anti-nu_e nu_mu
            (Channel::Neutron, true) => vec![
                Outgoing::new(PROTON, e_nucleon),
                Outgoing::new(ELECTRON, 0.25 * e_pion),
                Outgoing::new(ANTI_NU_E, 0.25 * e_pion),
                Outgoing::new(NU_MU, 0.25 * e_pion),
                Outgoing::new(ANTI_NU_MU, 0.25 * e_pion),
            ],
        }
    }
}
