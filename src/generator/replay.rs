//! Replaying recorded events

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::photopion::PhotoPionError;
use super::{EventGenerator, EventRequest, Outgoing};

/// Returns a fixed sequence of final states, one per call, starting
/// again from the beginning once all have been used. The request
/// is ignored.
pub struct EventReplay {
    events: Vec<Vec<Outgoing>>,
    next: usize,
}

impl EventReplay {
    pub fn new(events: Vec<Vec<Outgoing>>) -> Self {
        EventReplay {
            events,
            next: 0,
        }
    }

    /// Loads recorded events from a file, see [`parse`](EventReplay::parse)
    pub fn from_file(path: &Path) -> Result<Self, PhotoPionError> {
        let file = File::open(path)
            .map_err(|_| PhotoPionError::ResourceNotFound(path.to_owned()))?;
        Self::parse(BufReader::new(file))
    }

    /// Reads events formatted as one `code energy` pair per line, energy
    /// in GeV. Events are separated by blank lines or by lines starting
    /// with `#`.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, PhotoPionError> {
        let mut events = vec![];
        let mut current: Vec<Outgoing> = vec![];

        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|_| PhotoPionError::InvalidEventRecord(i + 1))?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                if !current.is_empty() {
                    events.push(std::mem::take(&mut current));
                }
                continue;
            }

            let mut fields = line.split_whitespace();
            let code = fields.next().and_then(|s| s.parse::<i32>().ok());
            let energy = fields.next().and_then(|s| s.parse::<f64>().ok());
            match (code, energy, fields.next()) {
                (Some(code), Some(energy), None) => current.push(Outgoing::new(code, energy)),
                _ => return Err(PhotoPionError::InvalidEventRecord(i + 1)),
            }
        }

        if !current.is_empty() {
            events.push(current);
        }

        Ok(Self::new(events))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl EventGenerator for EventReplay {
    fn generate(&mut self, _request: &EventRequest) -> Vec<Outgoing> {
        if self.events.is_empty() {
            return vec![];
        }
        let event = self.events[self.next].clone();
        self.next = (self.next + 1) % self.events.len();
        event
    }
}

#[cfg(test)]
mod tests {
    use crate::generator::codes::*;
    use crate::photopion::Channel;
    use super::*;

    const RECORDED: &str = "\
# event 1
13 8.0e10
1 1.0e10
1 1.0e10

# event 2
14 7.5e10
2 0.5e10
15 0.5e10
18 0.5e10
17 0.5e10
";

    #[test]
    fn cycles_through_events() {
        let mut replay = EventReplay::parse(RECORDED.as_bytes()).unwrap();
        assert_eq!(replay.len(), 2);

        let request = EventRequest {
            channel: Channel::Proton,
            energy: 1.0e11,
            redshift: 0.0,
            max_redshift: 100.0,
            background: 1,
        };

        let first = replay.generate(&request);
        let second = replay.generate(&request);
        let third = replay.generate(&request);
        assert_eq!(first.len(), 3);
        assert_eq!(first[0], Outgoing::new(PROTON, 8.0e10));
        assert_eq!(second[4].code, NU_MU);
        assert_eq!(first, third);
    }

    #[test]
    fn malformed_record() {
        let text = "13 8.0e10\n1 1.0e10 extra\n";
        let err = EventReplay::parse(text.as_bytes());
        assert!(matches!(err, Err(PhotoPionError::InvalidEventRecord(2))));
    }
}
