//! Parse input configuration file

use std::path::Path;
use yaml_rust::{YamlLoader, yaml::Yaml};
use evalexpr::*;

use crate::constants::*;

mod error;
mod types;

pub use error::*;
pub use types::*;

/// Represents the input configuration, which defines values
/// for simulation parameters, and any automatic values
/// for those parameters.
pub struct Config {
    input: Yaml,
    ctx: HashMapContext,
}

impl Config {
    /// Loads a configuration file.
    /// Fails if the file cannot be opened or if it is not
    /// YAML-formatted.
    pub fn from_file(path: &Path) -> Result<Self, InputError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|_| InputError::file())?;
        Self::from_string(&contents)
    }

    /// Loads a YAML configuration from a string.
    /// Fails if the string is not formatted correctly.
    pub fn from_string(s: &str) -> Result<Self, InputError> {
        let input = YamlLoader::load_from_str(s)
            .map_err(|_| InputError::file())?;
        let input = input.first()
            .ok_or_else(InputError::file)?;

        Ok(Config {
            input: input.clone(),
            ctx: HashMapContext::new(),
        })
    }

    /// Loads units and mathematical constants, then evaluates
    /// the expressions given in the specified `section`, in order,
    /// so that each can refer to those before it.
    pub fn with_context(&mut self, section: &str) -> Result<&mut Self, InputError> {
        use helper::context_function;

        let mut ctx = context_map! {
            "c" => SPEED_OF_LIGHT,
            "mp" => PROTON_MASS,
            "mn" => NEUTRON_MASS,
            "me" => ELECTRON_MASS,
            "eV" => EV,
            "keV" => 1.0e3 * EV,
            "MeV" => 1.0e6 * EV,
            "GeV" => GEV,
            "TeV" => 1.0e12 * EV,
            "PeV" => 1.0e15 * EV,
            "EeV" => EEV,
            "ZeV" => 1.0e21 * EV,
            "pc" => PARSEC,
            "kpc" => KPC,
            "Mpc" => MPC,
            "Gpc" => 1.0e3 * MPC,
            "pi" => std::f64::consts::PI,
        }.map_err(|_| InputError::conversion(section, "context"))?;

        context_function!(ctx, "sqrt",  f64::sqrt);
        context_function!(ctx, "exp",   f64::exp);
        context_function!(ctx, "ln",    f64::ln);
        context_function!(ctx, "log10", f64::log10);
        context_function!(ctx, "pow",   f64::powf, 2);

        self.ctx = ctx;

        if self.input[section].is_badvalue() {
            return Ok(self);
        }

        let entries = self.input[section].as_hash()
            .ok_or_else(|| InputError::conversion(section, section))?;

        for (a, b) in entries {
            let key = match a {
                Yaml::String(k) => k,
                _ => return Err(InputError::conversion(section, "key")),
            };

            let value = match b {
                Yaml::Integer(i) => Some(*i as f64),
                Yaml::Real(s) => s.parse::<f64>().ok(),
                Yaml::String(s) => eval_number_with_context(s, &self.ctx).ok(),
                _ => None,
            };

            // insert it into the context so it's available for the next read
            let value = value.ok_or_else(|| InputError::conversion(section, key))?;
            self.ctx.set_value(key.clone(), Value::from(value))
                .map_err(|_| InputError::conversion(section, key))?;
        }

        Ok(self)
    }

    /// Locates a key-value pair in the configuration file and attempts
    /// to parse the value as the specified type.
    /// The path to the key-value pair is specified by a string of colon-separated
    /// sections, e.g. `'section:subsection:key'`.
    pub fn read<T, S>(&self, path: S) -> Result<T, InputError>
    where
        T: FromYaml,
        S: AsRef<str>,
    {
        let path = path.as_ref();
        let address: Vec<&str> = path.split(':').collect();
        let value = address.iter()
            .try_fold(&self.input, |y, s| {
                if y[*s].is_badvalue() {
                    Err(InputError::location(path, s))
                } else {
                    Ok(&y[*s])
                }
            })?;

        let last = address.last().copied().unwrap_or(path);
        T::from_yaml(value.clone(), &self.ctx)
            .map_err(|_| InputError::conversion(path, last))
    }

    /// Like `Config::read`, but falls back to `default` if the
    /// key is absent. A key that is present but cannot be converted
    /// is still an error.
    pub fn read_or<T, S>(&self, path: S, default: T) -> Result<T, InputError>
    where
        T: FromYaml,
        S: AsRef<str>,
    {
        match self.read(path) {
            Err(e) if e.kind() == InputErrorKind::Location => Ok(default),
            other => other,
        }
    }

    /// Does the configuration contain the given (colon-separated) path?
    pub fn contains<S: AsRef<str>>(&self, path: S) -> bool {
        path.as_ref()
            .split(':')
            .try_fold(&self.input, |y, s| if y[s].is_badvalue() { None } else { Some(&y[s]) })
            .is_some()
    }
}

mod helper {
    macro_rules! context_function {
        ($ctx:expr, $name:literal, $func:expr) => {
            $ctx.set_function(
                $name.to_string(),
                Function::new(|arg| {
                    let x = arg.as_number()?;
                    Ok(Value::Float($func(x)))
                })
            ).map_err(|_| InputError::conversion("context", $name))?
        };
        ($ctx:expr, $name:literal, $func:expr, 2) => {
            $ctx.set_function(
                $name.to_string(),
                Function::new(|arg| {
                    let arg = arg.as_fixed_len_tuple(2)?;
                    let x = arg[0].as_number()?;
                    let y = arg[1].as_number()?;
                    Ok(Value::Float($func(x, y)))
                })
            ).map_err(|_| InputError::conversion("context", $name))?
        };
    }

    pub(super) use context_function;
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "---
    control:
      data: ./data
      rng_seed: 7
      generator: resonance

    photopion:
      field: IRB_Kneiske04
      photons: false
      limit: 0.05

    beam:
      n: 100
      A: 4
      Z: 2
      energy:
        min: 10 * EeV
        max: emax
        index: 2

    constants:
      emax: 1000 * EeV
      d: 3 * Mpc

    distance: 10 * d
    step: pow(10, 2) * kpc
    ";

    #[test]
    fn config_parser() {
        let mut config = Config::from_string(INPUT).unwrap();
        config.with_context("constants").unwrap();

        let data: String = config.read("control:data").unwrap();
        assert_eq!(data, "./data");

        let seed: u64 = config.read("control:rng_seed").unwrap();
        assert_eq!(seed, 7);

        let photons: bool = config.read("photopion:photons").unwrap();
        assert!(!photons);

        let a: usize = config.read("beam:A").unwrap();
        assert_eq!(a, 4);

        // Evaluates math expr, using the constants block
        let emin: f64 = config.read("beam:energy:min").unwrap();
        assert_eq!(emin, 10.0 * EEV);
        let emax: f64 = config.read("beam:energy:max").unwrap();
        assert_eq!(emax, 1000.0 * EEV);

        // Implicit conversion from integer to f64
        let index: f64 = config.read("beam:energy:index").unwrap();
        assert_eq!(index, 2.0);

        let distance: f64 = config.read("distance").unwrap();
        assert!((distance - 30.0 * MPC).abs() < 1.0e-12 * distance);

        let step: f64 = config.read("step").unwrap();
        assert!((step - 100.0 * KPC).abs() < 1.0e-12 * step);
    }

    #[test]
    fn missing_and_malformed_fields() {
        let mut config = Config::from_string(INPUT).unwrap();
        config.with_context("constants").unwrap();

        let redshift: Result<f64, _> = config.read("beam:redshift");
        assert_eq!(redshift.unwrap_err().kind(), InputErrorKind::Location);
        assert_eq!(config.read_or("beam:redshift", 0.5).unwrap(), 0.5);

        // present, but not a number
        let limit: Result<f64, _> = config.read("photopion:field");
        assert_eq!(limit.unwrap_err().kind(), InputErrorKind::Conversion);
        assert!(config.read_or("photopion:field", 1.0).is_err());

        let seed: Result<u64, _> = config.read("beam:energy:min");
        assert!(seed.is_err());

        assert!(config.contains("beam:energy:index"));
        assert!(!config.contains("beam:energy:cutoff"));

        assert_eq!(Config::from_string("").err().map(|e| e.kind()), Some(InputErrorKind::File));
    }

    #[test]
    fn undefined_constant() {
        let text = "---
        constants:
          x: 2 * y
        ";
        let mut config = Config::from_string(text).unwrap();
        assert!(config.with_context("constants").is_err());
    }
}
