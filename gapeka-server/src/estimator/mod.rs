//! Live position estimation from schedule plus precomputed route.
//!
//! Positions are a deterministic function of the timetable and the
//! precomputed polyline; there is no live telemetry. All schedule times are
//! normalized onto one forward timeline anchored at the trip's first
//! departure, which handles midnight-crossing trips without per-segment
//! special cases.

mod polyline;

pub use polyline::point_along;

use crate::domain::{TimeOfDay, TrainSchedule};
use crate::store::{RoutePoint, RouteStore};

/// An estimated position for a train currently on its trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainPosition {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Estimate a train's position at `now`.
///
/// Returns `None` when the train is not on any segment at `now`, when no
/// route was precomputed for it, or when a required time field (first
/// departure, last arrival) is missing. Stop pairs with missing times are
/// skipped; the remaining pairs are still evaluated.
pub fn estimate_position(
    schedule: &TrainSchedule,
    route: Option<&[RoutePoint]>,
    now: TimeOfDay,
) -> Option<TrainPosition> {
    if schedule.stops.len() < 2 {
        return None;
    }

    // The first departure anchors the trip's forward timeline: every time
    // strictly earlier than it is treated as the next calendar day.
    let anchor = schedule.first_departure()?;
    let now_fwd = now.forward_of(anchor);

    // A segment [dep_i, arr_{i+1}) is active iff the normalized now falls
    // in that half-open interval.
    let active = schedule.stops.windows(2).any(|pair| {
        let (Some(dep), Some(arr)) = (pair[0].departure_time(), pair[1].effective_arrival())
        else {
            return false;
        };
        now_fwd >= dep.forward_of(anchor) && now_fwd < arr.forward_of(anchor)
    });
    if !active {
        return None;
    }

    let route = route?;
    let last_arrival = schedule.last_arrival()?;

    let total_duration = last_arrival.forward_of(anchor) - anchor.minutes();
    let elapsed = now_fwd - anchor.minutes();
    let progress = if total_duration == 0 {
        0.0
    } else {
        (elapsed as f64 / total_duration as f64).clamp(0.0, 1.0)
    };

    let position = point_along(route, progress)?;
    Some(TrainPosition {
        id: schedule.id.clone(),
        name: schedule.name.clone(),
        lat: position.lat,
        lon: position.lon,
    })
}

/// Estimate positions for every train currently on a trip.
pub fn active_trains(
    schedules: &[TrainSchedule],
    store: &RouteStore,
    now: TimeOfDay,
) -> Vec<TrainPosition> {
    schedules
        .iter()
        .filter_map(|schedule| estimate_position(schedule, store.get(&schedule.id), now))
        .collect()
}
