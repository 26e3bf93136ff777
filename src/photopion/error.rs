//! Photo-pion production errors

use std::fmt;
use std::error::Error;
use std::path::PathBuf;

pub enum PhotoPionError {
    /// The rate table (or recorded event file) could not be opened
    ResourceNotFound(PathBuf),
    UnknownPhotonField(String),
    /// The rate table was read, but is empty or its columns do not fit together
    InconsistentTable(String),
    /// The event generator produced a particle this module does not know
    UnexpectedParticle(i32),
    /// A recorded event file contains a line that cannot be parsed
    InvalidEventRecord(usize),
    /// Another thread panicked while holding the event generator
    GeneratorUnavailable,
}

impl fmt::Display for PhotoPionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhotoPionError::ResourceNotFound(path) => write!(f, "could not open file '{}'", path.display()),
            PhotoPionError::UnknownPhotonField(s) => write!(f, "'{}' is not a known photon background", s),
            PhotoPionError::InconsistentTable(cause) => write!(f, "malformed interaction rate table: {}", cause),
            PhotoPionError::UnexpectedParticle(code) => write!(f, "event generator returned unexpected particle {}", code),
            PhotoPionError::InvalidEventRecord(line) => write!(f, "could not parse event record on line {}", line),
            PhotoPionError::GeneratorUnavailable => write!(f, "event generator is unavailable after a panic in another thread"),
        }
    }
}

impl fmt::Debug for PhotoPionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PhotoPionProduction: {}", self)
    }
}

impl Error for PhotoPionError {}
