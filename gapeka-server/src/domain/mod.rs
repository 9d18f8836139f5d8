//! Domain types for the train position estimator.
//!
//! This module contains the core domain model: timetable times, station
//! codes, coordinates, and train schedules. Types enforce their invariants
//! at construction time where possible; timetable fields that can be
//! malformed in real data are represented as `Option` so failures stay
//! local to the affected stop.

mod geo;
mod schedule;
mod station;
mod time;

pub use geo::{Coord, haversine_m};
pub use schedule::{Stop, TrainSchedule};
pub use station::{InvalidStationCode, StationCode};
pub use time::{MINUTES_PER_DAY, StopTime, TimeError, TimeOfDay};
