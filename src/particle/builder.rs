use rand::prelude::*;
use rand_distr::Pareto;
use super::{ParticleId, Particle};

/// Energy spectrum of the primaries
#[derive(Copy,Clone,Debug)]
pub enum EnergySpectrum {
    /// All primaries have the same energy
    Fixed(f64),
    /// dN/dE ∝ E^(-index), for min < E < max
    PowerLaw {
        min: f64,
        max: f64,
        index: f64,
    },
}

impl EnergySpectrum {
    /// A power law between `min` and `max`, `None` unless `0 < min < max`
    pub fn power_law(min: f64, max: f64, index: f64) -> Option<Self> {
        if min > 0.0 && max > min && index.is_finite() {
            Some(Self::PowerLaw { min, max, index })
        } else {
            None
        }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        match *self {
            Self::Fixed(energy) => energy,

            Self::PowerLaw { min, max, index } => {
                // Pareto distribution is the untruncated power law, only
                // normalizable for index > 1: reject anything above the cutoff
                if let Ok(dstr) = Pareto::new(min, index - 1.0) {
                    loop {
                        let energy = rng.sample(&dstr);
                        if energy <= max {
                            break energy;
                        }
                    }
                } else {
                    let u = rng.gen::<f64>();
                    if index == 1.0 {
                        min * (max / min).powf(u)
                    } else {
                        let s = 1.0 - index;
                        (min.powf(s) + u * (max.powf(s) - min.powf(s))).powf(1.0 / s)
                    }
                }
            },
        }
    }

    /// Energy that best represents the spectrum: the energy itself
    /// if fixed, otherwise the geometric mean of the bounds
    pub fn typical(&self) -> f64 {
        match *self {
            Self::Fixed(energy) => energy,
            Self::PowerLaw { min, max, .. } => (min * max).sqrt(),
        }
    }
}

/// Creates primary particles of a single species
#[derive(Copy,Clone,Debug)]
pub struct BeamBuilder {
    id: ParticleId,
    num: usize,
    spectrum: EnergySpectrum,
    redshift: f64,
}

impl BeamBuilder {
    pub fn new(id: ParticleId, num: usize, spectrum: EnergySpectrum) -> Self {
        BeamBuilder {
            id,
            num,
            spectrum,
            redshift: 0.0,
        }
    }

    pub fn with_redshift(&self, redshift: f64) -> Self {
        BeamBuilder {
            redshift,
            ..*self
        }
    }

    pub fn species(&self) -> ParticleId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.num
    }

    pub fn redshift(&self) -> f64 {
        self.redshift
    }

    pub fn spectrum(&self) -> EnergySpectrum {
        self.spectrum
    }

    /// Creates a single primary
    pub fn create<R: Rng>(&self, rng: &mut R) -> Particle {
        let energy = self.spectrum.sample(rng);
        Particle::create(self.id, energy).with_redshift(self.redshift)
    }
}

#[cfg(test)]
mod tests {
    use rand_xoshiro::*;
    use crate::particle::Candidate;
    use super::*;

    #[test]
    fn power_law_bounds() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        for &index in [0.5, 1.0, 2.2].iter() {
            let spectrum = EnergySpectrum::PowerLaw { min: 1.0, max: 100.0, index };
            let samples: Vec<f64> = (0..10_000).map(|_| spectrum.sample(&mut rng)).collect();
            assert!(samples.iter().all(|&e| e >= 1.0 && e <= 100.0));

            // fraction below 10 is analytically known
            let frac = samples.iter().filter(|&&e| e < 10.0).count() as f64 / 10_000.0;
            let target = if index == 1.0 {
                0.5
            } else {
                let s = 1.0 - index;
                (10f64.powf(s) - 1.0) / (100f64.powf(s) - 1.0)
            };
            println!("index = {}, P(E < 10) = {:.3} [expected {:.3}]", index, frac, target);
            assert!((frac - target).abs() < 0.02);
        }
    }

    #[test]
    fn fixed_energy_beam() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        let beam = BeamBuilder::new(ParticleId::nucleus(4, 2), 10, EnergySpectrum::Fixed(3.0))
            .with_redshift(0.5);
        let pt = beam.create(&mut rng);
        assert_eq!(pt.energy(), 3.0);
        assert_eq!(pt.redshift(), 0.5);
        assert_eq!(pt.id(), ParticleId::nucleus(4, 2));
    }
}
