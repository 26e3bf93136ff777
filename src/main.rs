use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};

use colored::Colorize;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rand::prelude::*;
use rand_xoshiro::*;
use rayon::prelude::*;

mod constants;
mod generator;
mod input;
mod interpolation;
mod particle;
mod photon_field;
mod photopion;

use constants::*;
use generator::*;
use input::*;
use particle::*;
use photon_field::*;
use photopion::*;

/// Steps are never shorter than this, in m
const MIN_STEP: f64 = 1.0e3 * PARSEC;

/// Moves the `incident` particle through a total comoving `distance`,
/// giving the photo-pion module the chance to act on every step.
/// Steps are as long as `max_step`, unless the module requests
/// a shorter one.
fn propagate<G, R>(module: &PhotoPionProduction<G>, incident: Particle, distance: f64, max_step: f64, rng: &mut R) -> Result<Shower, PhotoPionError>
where G: EventGenerator, R: Rng {
    let mut primary = incident;
    let mut secondaries: Vec<Particle> = Vec::new();
    let mut interactions = 0;
    let mut travelled = 0.0;
    let mut step = max_step;

    while travelled < distance {
        let step_now = step.min(distance - travelled);
        primary.set_current_step(step_now);

        interactions += module.process(&mut primary, rng)?;
        secondaries.append(&mut primary.take_secondaries());

        travelled += step_now;
        step = primary.next_step().min(max_step).max(MIN_STEP);
    }

    Ok(Shower {
        primary,
        secondaries,
        interactions,
    })
}

fn read_beam(input: &Config) -> Result<BeamBuilder, InputError> {
    let num: usize = input.read("beam:n")?;
    let a: u32 = input.read("beam:A")?;
    let z: u32 = input.read("beam:Z")?;

    if a == 0 {
        return Err(InputError::invalid("beam:A", "mass number must be positive"));
    }

    if z > a {
        return Err(InputError::invalid("beam:Z", "charge number cannot exceed mass number"));
    }

    let spectrum = if input.contains("beam:energy:min") {
        let min: f64 = input.read("beam:energy:min")?;
        let max: f64 = input.read("beam:energy:max")?;
        let index: f64 = input.read("beam:energy:index")?;
        EnergySpectrum::power_law(min, max, index)
            .ok_or_else(|| InputError::invalid("beam:energy", "require 0 < min < max"))?
    } else {
        let energy: f64 = input.read("beam:energy")?;
        if energy <= 0.0 {
            return Err(InputError::invalid("beam:energy", "energy must be positive"));
        }
        EnergySpectrum::Fixed(energy)
    };

    let redshift: f64 = input.read_or("beam:redshift", 0.0)?;
    if redshift < 0.0 {
        return Err(InputError::invalid("beam:redshift", "redshift cannot be negative"));
    }

    let beam = BeamBuilder::new(ParticleId::nucleus(a, z), num, spectrum)
        .with_redshift(redshift);

    Ok(beam)
}

fn read_photopion_config(input: &Config) -> Result<PhotoPionConfig, Box<dyn Error>> {
    let default = PhotoPionConfig::default();

    let field: String = input.read_or("photopion:field", default.field.to_string())?;
    let field: PhotonField = field.parse()?;

    let limit: f64 = input.read_or("photopion:limit", default.limit)?;
    if limit <= 0.0 {
        return Err(InputError::invalid("photopion:limit", "must be positive").into());
    }

    let config = default
        .with_field(field)
        .with_photons(input.read_or("photopion:photons", default.photons)?)
        .with_neutrinos(input.read_or("photopion:neutrinos", default.neutrinos)?)
        .with_antinucleons(input.read_or("photopion:antinucleons", default.antinucleons)?)
        .with_limit(limit);

    Ok(config)
}

/// Either the built-in resonance model, or a file of recorded events
fn read_generator(input: &Config, seed: u64) -> Result<Generator, Box<dyn Error>> {
    let name: String = input.read_or("control:generator", "resonance".to_owned())?;

    let generator: Generator = if name == "resonance" {
        DeltaResonance::new(seed).into()
    } else {
        let replay = EventReplay::from_file(Path::new(&name))?;
        if replay.len() == 0 {
            return Err(InputError::invalid("control:generator", "no events found").into());
        }
        println!("{} {} recorded events from {}.", "Read".bold().bright_green(), replay.len(), name.bold().blue());
        replay.into()
    };

    Ok(generator)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    let path = args.get(1).ok_or_else(InputError::file)?;
    let path = PathBuf::from(path);

    let mut input = Config::from_file(&path)?;
    input.with_context("constants")?;

    let data_dir: String = input.read_or("control:data", ".".to_owned())?;
    let seed: u64 = input.read_or("control:rng_seed", 0)?;

    let config = read_photopion_config(&input)?;
    let generator = read_generator(&input, seed)?;
    let beam = read_beam(&input)?;

    let distance: f64 = input.read("distance")?;
    let max_step: f64 = input.read_or("step", MPC)?;
    if distance <= 0.0 || max_step <= 0.0 {
        return Err(InputError::invalid("distance", "distance and step must be positive").into());
    }

    println!("{} configuration from {}.", "Loaded".bold().bright_green(), path.display().to_string().bold().blue());
    println!("\t* {} {}s, redshift {}, typical energy {:.3e} EeV", beam.len(), beam.species(), beam.redshift(), beam.spectrum().typical() / EEV);
    println!(
        "\t* photon field: {} [photons: {}, neutrinos: {}, antinucleons: {}, limit: {}]",
        config.field, config.photons, config.neutrinos, config.antinucleons, config.limit,
    );
    println!("\t* distance {:.3} Mpc, maximum step {:.3} Mpc", distance / MPC, max_step / MPC);

    let module = PhotoPionProduction::new(config, &data_dir, generator)?;
    println!("{} {}.", "Initialized".bold().bright_green(), module.description());

    let pb = ProgressBar::new(beam.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{prefix} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-")
    );
    pb.set_prefix(format!("{}", "Running".bold().cyan()));

    let showers: Result<Vec<Shower>, PhotoPionError> = (0..beam.len())
        .into_par_iter()
        .progress_with(pb)
        .map(|i| {
            let mut rng = Xoshiro256StarStar::seed_from_u64(seed.wrapping_add(i as u64));
            let primary = beam.create(&mut rng);
            propagate(&module, primary, distance, max_step, &mut rng)
        })
        .collect();

    let showers = showers?;

    let num = showers.len().max(1) as f64;
    let mean_energy = showers.iter().map(|s| s.primary.energy()).sum::<f64>() / num;
    let interactions: usize = showers.iter().map(|s| s.interactions).sum();
    let emitted: usize = showers.iter().map(Shower::multiplicity).sum();

    let mut by_species: BTreeMap<ParticleId, (usize, f64)> = BTreeMap::new();
    for pt in showers.iter().flat_map(|s| s.secondaries.iter()) {
        let entry = by_species.entry(pt.id()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += pt.energy();
    }

    let mut final_species: BTreeMap<ParticleId, usize> = BTreeMap::new();
    for s in showers.iter() {
        *final_species.entry(s.primary.id()).or_insert(0) += 1;
    }

    println!("{} {} primaries.", "Completed".bold().bright_green(), showers.len());
    println!("\t* mean final energy {:.4e} EeV (initial {:.4e} EeV)", mean_energy / EEV, beam.spectrum().typical() / EEV);
    println!("\t* {} interactions, {} secondaries", interactions, emitted);
    for (id, count) in final_species.iter() {
        println!("\t* {} primaries end as {}", count, id);
    }
    for (id, (count, energy)) in by_species.iter() {
        println!("\t* {:>8} x {:<24} [PDG {:>11}] mean energy {:.4e} EeV", count, id.to_string(), id.pdg(), energy / (*count as f64) / EEV);
    }

    let gamma = beam.spectrum().typical() / (mass(beam.species()) * SPEED_OF_LIGHT_SQD);
    let loss_length = module.loss_length(beam.species(), gamma, beam.redshift());
    if loss_length.is_finite() {
        println!("\t* energy loss length at the typical energy: {:.3} Mpc", loss_length / MPC);
    } else {
        println!("{} the typical energy is outside the tabulated range, no energy loss.", "Warning:".bold().yellow());
    }

    Ok(())
}
