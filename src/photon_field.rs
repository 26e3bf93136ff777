//! Background photon fields

use std::fmt;
use std::str::FromStr;

use crate::interpolation::interpolate;
use crate::photopion::PhotoPionError;

/// Which model of the background photon field is in use
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash)]
pub enum PhotonField {
    /// Cosmic microwave background
    Cmb,
    /// Infrared background, Kneiske et al. 2004
    IrbKneiske04,
    /// Infrared background, lower limit of Kneiske and Dole 2010
    IrbKneiske10,
    /// Infrared background, Stecker et al. 2005
    IrbStecker05,
    /// Infrared background, Franceschini et al. 2008
    IrbFranceschini08,
    /// Kneiske 2004 infrared background, with interaction rates
    /// tabulated as a function of redshift
    IrbWithRedshiftKneiske04,
}

impl PhotonField {
    /// Name of the file that holds the interaction rates
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Cmb => "ppp_CMB.txt",
            Self::IrbKneiske04 => "ppp_IRB_Kneiske04.txt",
            Self::IrbKneiske10 => "ppp_IRB_Kneiske10.txt",
            Self::IrbStecker05 => "ppp_IRB_Stecker05.txt",
            Self::IrbFranceschini08 => "ppp_IRB_Franceschini08.txt",
            Self::IrbWithRedshiftKneiske04 => "ppp_IRBz_Kneiske04.txt",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Cmb => "CMB",
            Self::IrbKneiske04 => "IRB Kneiske '04",
            Self::IrbKneiske10 => "IRB Kneiske '10 (lower limit)",
            Self::IrbStecker05 => "IRB Stecker '05",
            Self::IrbFranceschini08 => "IRB Franceschini '08",
            Self::IrbWithRedshiftKneiske04 => "IRB with redshift Kneiske '04",
        }
    }

    /// Are the interaction rates tabulated as a function of redshift?
    pub fn is_redshift_dependent(&self) -> bool {
        *self == Self::IrbWithRedshiftKneiske04
    }

    /// The code by which the event generator identifies the
    /// background: 1 for the CMB, 2 for infrared backgrounds
    pub fn generator_code(&self) -> i32 {
        match self {
            Self::Cmb => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for PhotonField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Cmb => "CMB",
            Self::IrbKneiske04 => "IRB_Kneiske04",
            Self::IrbKneiske10 => "IRB_Kneiske10",
            Self::IrbStecker05 => "IRB_Stecker05",
            Self::IrbFranceschini08 => "IRB_Franceschini08",
            Self::IrbWithRedshiftKneiske04 => "IRB_withRedshift_Kneiske04",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for PhotonField {
    type Err = PhotoPionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cmb" => Ok(Self::Cmb),
            // default infrared background
            "irb" | "irb_kneiske04" => Ok(Self::IrbKneiske04),
            "irb_kneiske10" => Ok(Self::IrbKneiske10),
            "irb_stecker05" => Ok(Self::IrbStecker05),
            "irb_franceschini08" => Ok(Self::IrbFranceschini08),
            "irb_withredshift_kneiske04" | "irbz_kneiske04" => Ok(Self::IrbWithRedshiftKneiske04),
            _ => Err(PhotoPionError::UnknownPhotonField(s.to_owned())),
        }
    }
}

/// Redshifts at which the comoving number density of the
/// Kneiske '04 infrared background is tabulated
static IRB_SCALING_REDSHIFT: [f64; 9] = [0.0, 0.2, 0.4, 0.6, 1.0, 2.0, 3.0, 4.0, 5.0];

/// Comoving photon number density of the Kneiske '04 infrared
/// background, relative to its value at z = 0
static IRB_SCALING: [f64; 9] = [1.0, 1.6937, 2.5885, 3.6178, 5.1980, 7.3871, 8.5471, 7.8605, 0.0];

/// Evolution of the comoving photon number density of the given
/// field with redshift, normalized to unity at z = 0.
///
/// The CMB is not evolved, as its photons are only redshifted.
/// All infrared models share the Kneiske '04 evolution, which vanishes
/// beyond z = 5.
pub fn photon_field_scaling(field: PhotonField, z: f64) -> f64 {
    match field {
        PhotonField::Cmb => 1.0,
        _ if z >= IRB_SCALING_REDSHIFT[IRB_SCALING_REDSHIFT.len() - 1] => 0.0,
        _ => interpolate(z, &IRB_SCALING_REDSHIFT, &IRB_SCALING),
    }
}
