//! Train schedules: ordered stops with arrival/departure times.
//!
//! Time fields are parsed leniently: a field that fails to parse becomes
//! `None` rather than failing the whole schedule, so the estimator can skip
//! exactly the affected stop pairs and keep evaluating the rest.

use tracing::warn;

use super::station::StationCode;
use super::time::{StopTime, TimeOfDay};

/// A single scheduled stop.
#[derive(Debug, Clone)]
pub struct Stop {
    /// Station label as printed in the timetable, e.g. "Gambir (GMR)".
    pub station: String,
    /// Arrival at this stop; `None` if the field was absent or malformed.
    pub arrival: Option<StopTime>,
    /// Departure from this stop; `None` if the field was absent or malformed.
    pub departure: Option<StopTime>,
}

impl Stop {
    /// Build a stop from raw timetable fields, parsing times leniently.
    ///
    /// Malformed fields are logged and recorded as `None`.
    pub fn from_raw(station: String, arrival: Option<&str>, departure: Option<&str>) -> Self {
        let arrival = arrival.and_then(|s| parse_lenient(s, &station, "arrival"));
        let departure = departure.and_then(|s| parse_lenient(s, &station, "departure"));
        Self {
            station,
            arrival,
            departure,
        }
    }

    /// The station code embedded in this stop's label, if any.
    pub fn station_code(&self) -> Option<StationCode> {
        StationCode::from_label(&self.station)
    }

    /// The departure time, if scheduled.
    ///
    /// A pass-through departure carries no time of its own.
    pub fn departure_time(&self) -> Option<TimeOfDay> {
        self.departure.and_then(|t| t.scheduled())
    }

    /// The effective arrival time at this stop.
    ///
    /// A pass-through arrival is replaced by this stop's own departure
    /// time: the train passes the station when the timetable says it
    /// leaves.
    pub fn effective_arrival(&self) -> Option<TimeOfDay> {
        match self.arrival {
            Some(StopTime::Scheduled(t)) => Some(t),
            Some(StopTime::PassThrough) => self.departure_time(),
            None => None,
        }
    }
}

fn parse_lenient(s: &str, station: &str, field: &str) -> Option<StopTime> {
    match StopTime::parse(s) {
        Ok(t) => Some(t),
        Err(e) => {
            warn!(station, field, value = s, error = %e, "unparsable timetable field");
            None
        }
    }
}

/// A train's schedule: identifier, display name, and ordered stops.
#[derive(Debug, Clone)]
pub struct TrainSchedule {
    /// Train number, e.g. "7A". Unique across the timetable.
    pub id: String,
    /// Display name, e.g. "Argo Bromo Anggrek".
    pub name: String,
    /// Ordered stops. A usable schedule has at least two.
    pub stops: Vec<Stop>,
}

impl TrainSchedule {
    /// The first stop's departure time, which anchors the trip's forward
    /// timeline.
    pub fn first_departure(&self) -> Option<TimeOfDay> {
        self.stops.first().and_then(Stop::departure_time)
    }

    /// The last stop's effective arrival, marking the end of the trip.
    pub fn last_arrival(&self) -> Option<TimeOfDay> {
        self.stops.last().and_then(Stop::effective_arrival)
    }
}
