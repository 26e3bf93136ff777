//! Tabulated photo-pion interaction rates

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use colored::Colorize;

use crate::constants::*;
use crate::photon_field::PhotonField;
use super::{Channel, PhotoPionError};

/// Interaction rates of a nucleon with a background photon field,
/// as a function of its Lorentz factor and, if the field is
/// tabulated in redshift, the redshift.
///
/// Rates are in units of 1/m. For a redshift-dependent table, the
/// rate at (`redshifts[i]`, `lorentz[j]`) is the entry
/// `i * lorentz.len() + j`.
#[derive(Clone,Debug,Default,PartialEq)]
pub struct RateTable {
    redshifts: Vec<f64>,
    lorentz: Vec<f64>,
    proton: Vec<f64>,
    neutron: Vec<f64>,
}

impl RateTable {
    /// Loads the rate table for `field` from the directory `data_dir`
    pub fn load(field: PhotonField, data_dir: &Path) -> Result<Self, PhotoPionError> {
        let path = data_dir.join(field.resource());
        let file = File::open(&path)
            .map_err(|_| PhotoPionError::ResourceNotFound(path.clone()))?;

        let table = Self::parse(BufReader::new(file), field.is_redshift_dependent())?;

        let [nz, ng, np, nn] = table.lengths();
        println!(
            "{} {} rate table from {}: {} redshifts, {} Lorentz factors, {} proton rates, {} neutron rates.",
            "Read".bold().bright_green(), field.description(), path.display().to_string().bold().blue(),
            nz, ng, np, nn,
        );

        Ok(table)
    }

    /// Reads a rate table. Each line is a record of
    /// `log10(gamma) proton_rate neutron_rate`, or
    /// `z log10(gamma) proton_rate neutron_rate` if `redshift_dependent`,
    /// with the rates in units of 1/Mpc.
    /// Lines that start with `#` are ignored; reading stops at
    /// the first line that cannot be parsed. If that leaves the
    /// last redshift incomplete, it is dropped.
    pub fn parse<R: BufRead>(reader: R, redshift_dependent: bool) -> Result<Self, PhotoPionError> {
        let columns = if redshift_dependent { 4 } else { 3 };
        let mut table = Self::default();

        let mut last_z: Option<f64> = None;
        let mut last_log_gamma = std::f64::NEG_INFINITY;
        let mut lorentz_complete = false;
        // number of records read at each redshift
        let mut slice_lengths: Vec<usize> = vec![];

        for line in reader.lines().map_while(Result::ok) {
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }

            let record: Result<Vec<f64>, _> = line.split_whitespace()
                .take(columns)
                .map(str::parse::<f64>)
                .collect();

            let record = match record {
                Ok(v) if v.len() == columns => v,
                _ => break,
            };

            let (z, log_gamma, p, n) = if redshift_dependent {
                (record[0], record[1], record[2], record[3])
            } else {
                (0.0, record[0], record[1], record[2])
            };

            if redshift_dependent {
                if last_z != Some(z) {
                    table.redshifts.push(z);
                    slice_lengths.push(0);
                }
                if let Some(len) = slice_lengths.last_mut() {
                    *len += 1;
                }
            }

            // The Lorentz factor grid repeats for every redshift
            if log_gamma < last_log_gamma {
                lorentz_complete = true;
            }

            if !lorentz_complete {
                table.lorentz.push(10f64.powf(log_gamma));
            }

            table.proton.push(p / MPC);
            table.neutron.push(n / MPC);

            last_z = Some(z);
            last_log_gamma = log_gamma;
        }

        if redshift_dependent {
            table.drop_incomplete_slice(&slice_lengths)?;
        }

        table.validate()?;
        Ok(table)
    }

    /// Truncates the table before the first redshift that does not
    /// have a rate for every Lorentz factor, which must be the last.
    fn drop_incomplete_slice(&mut self, slice_lengths: &[usize]) -> Result<(), PhotoPionError> {
        let n = self.lorentz.len();
        let i = match slice_lengths.iter().position(|&len| len != n) {
            Some(i) => i,
            None => return Ok(()),
        };

        if i == 0 {
            return Err(PhotoPionError::InconsistentTable("no complete redshift slice".to_owned()));
        }

        if i + 1 < slice_lengths.len() {
            return Err(PhotoPionError::InconsistentTable(format!(
                "{} rates at redshift {}, expected {}",
                slice_lengths[i], self.redshifts[i], n
            )));
        }

        self.redshifts.truncate(i);
        self.proton.truncate(i * n);
        self.neutron.truncate(i * n);
        Ok(())
    }

    fn validate(&self) -> Result<(), PhotoPionError> {
        if self.lorentz.is_empty() {
            return Err(PhotoPionError::InconsistentTable("no records".to_owned()));
        }

        if self.lorentz.windows(2).any(|w| w[1] <= w[0]) {
            return Err(PhotoPionError::InconsistentTable("Lorentz factors are not strictly increasing".to_owned()));
        }

        let expected = self.lorentz.len() * self.redshifts.len().max(1);
        if self.proton.len() != expected || self.neutron.len() != expected {
            return Err(PhotoPionError::InconsistentTable(format!(
                "expected {} rates for {} redshifts and {} Lorentz factors, found {}",
                expected, self.redshifts.len(), self.lorentz.len(), self.proton.len()
            )));
        }

        Ok(())
    }

    pub fn is_redshift_dependent(&self) -> bool {
        !self.redshifts.is_empty()
    }

    /// Is `gamma` strictly within the tabulated range?
    pub fn contains(&self, gamma: f64) -> bool {
        match (self.lorentz.first(), self.lorentz.last()) {
            (Some(&min), Some(&max)) => gamma > min && gamma < max,
            _ => false,
        }
    }

    pub fn redshifts(&self) -> &[f64] {
        &self.redshifts
    }

    pub fn lorentz(&self) -> &[f64] {
        &self.lorentz
    }

    /// Interaction rates for the given target nucleon
    pub fn rates(&self, channel: Channel) -> &[f64] {
        match channel {
            Channel::Proton => &self.proton,
            Channel::Neutron => &self.neutron,
        }
    }

    /// Number of redshifts, Lorentz factors, proton rates and neutron rates
    pub fn lengths(&self) -> [usize; 4] {
        [self.redshifts.len(), self.lorentz.len(), self.proton.len(), self.neutron.len()]
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use super::*;

    const SIMPLE: &str = "\
# log10(gamma) proton rate [1/Mpc] neutron rate [1/Mpc]
8.0 0.0 0.0
9.0 1.0e-3 2.0e-3

10.0 0.1 0.12
11.0 0.2 0.25
";

    const WITH_REDSHIFT: &str = "\
# z log10(gamma) proton rate neutron rate
0.0 8.0 0.0 0.0
0.0 9.0 0.1 0.1
0.0 10.0 0.2 0.2
1.0 8.0 0.0 0.0
1.0 9.0 0.3 0.3
1.0 10.0 0.4 0.5
";

    #[test]
    fn read_simple_table() {
        let table = RateTable::parse(SIMPLE.as_bytes(), false).unwrap();
        assert_eq!(table.lengths(), [0, 4, 4, 4]);
        assert!(!table.is_redshift_dependent());
        assert!((table.lorentz()[2] - 1.0e10).abs() < 1.0);
        assert_eq!(table.rates(Channel::Proton)[3], 0.2 / MPC);
        assert_eq!(table.rates(Channel::Neutron)[3], 0.25 / MPC);
        assert!(table.lorentz().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn lorentz_grid_repeats_per_redshift() {
        let table = RateTable::parse(WITH_REDSHIFT.as_bytes(), true).unwrap();
        assert_eq!(table.lengths(), [2, 3, 6, 6]);
        assert_eq!(table.redshifts(), &[0.0, 1.0]);
        assert_eq!(table.rates(Channel::Neutron)[5], 0.5 / MPC);
        assert!(table.is_redshift_dependent());
    }

    #[test]
    fn stops_at_malformed_line() {
        let text = format!("{}12.0 0.3\ngarbage\n13.0 0.4 0.4\n", SIMPLE);
        let table = RateTable::parse(text.as_bytes(), false).unwrap();
        assert_eq!(table.lengths(), [0, 4, 4, 4]);
    }

    #[test]
    fn drops_incomplete_last_redshift() {
        let text = WITH_REDSHIFT.replace("1.0 10.0 0.4 0.5", "1.0 10.0 garbage");
        let table = RateTable::parse(text.as_bytes(), true).unwrap();
        assert_eq!(table.lengths(), [1, 3, 3, 3]);
        assert_eq!(table.redshifts(), &[0.0]);
        assert_eq!(table.rates(Channel::Proton)[2], 0.2 / MPC);

        // nothing beyond the first Lorentz factor of the second redshift
        let text = "0.0 8.0 0.0 0.0\n0.0 9.0 0.1 0.1\n1.0 8.0 0.0 0.0\n1.0 9.0\n";
        let table = RateTable::parse(text.as_bytes(), true).unwrap();
        assert_eq!(table.lengths(), [1, 2, 2, 2]);

        let complete = RateTable::parse(WITH_REDSHIFT.as_bytes(), true).unwrap();
        assert_eq!(complete.lengths(), [2, 3, 6, 6]);
    }

    #[test]
    fn rejects_empty_and_ragged_tables() {
        let empty = RateTable::parse("# nothing here\n".as_bytes(), false);
        assert!(matches!(empty, Err(PhotoPionError::InconsistentTable(_))));

        // an incomplete redshift slice followed by a complete one
        let ragged = "0.0 8.0 0.1 0.1\n0.0 9.0 0.1 0.1\n1.0 8.0 0.1 0.1\n2.0 8.0 0.1 0.1\n2.0 9.0 0.1 0.1\n";
        let ragged = RateTable::parse(ragged.as_bytes(), true);
        assert!(matches!(ragged, Err(PhotoPionError::InconsistentTable(_))));

        let repeated = RateTable::parse("8.0 0.1 0.1\n8.0 0.1 0.1\n".as_bytes(), false);
        assert!(matches!(repeated, Err(PhotoPionError::InconsistentTable(_))));
    }

    #[test]
    fn range() {
        let table = RateTable::parse(SIMPLE.as_bytes(), false).unwrap();
        assert!(table.contains(5.0e9));
        assert!(!table.contains(1.0e8));
        assert!(!table.contains(table.lorentz()[3]));
        assert!(!table.contains(1.0e12));
        assert!(!RateTable::default().contains(1.0));
    }

    #[test]
    fn load_from_directory() {
        let dir = std::env::temp_dir().join(format!("photopion-tables-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let missing = RateTable::load(PhotonField::IrbStecker05, &dir);
        assert!(matches!(missing, Err(PhotoPionError::ResourceNotFound(_))));

        let mut file = File::create(dir.join(PhotonField::Cmb.resource())).unwrap();
        file.write_all(SIMPLE.as_bytes()).unwrap();
        drop(file);

        let first = RateTable::load(PhotonField::Cmb, &dir).unwrap();
        let second = RateTable::load(PhotonField::Cmb, &dir).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, RateTable::parse(SIMPLE.as_bytes(), false).unwrap());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
