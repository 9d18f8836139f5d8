//! Sampling a point along a polyline by fractional progress.

use crate::domain::{Coord, haversine_m};
use crate::store::RoutePoint;

fn coord(p: RoutePoint) -> Coord {
    Coord::new(p[0], p[1])
}

/// Sample the point at `progress` (0..=1) of the polyline's total
/// great-circle length.
///
/// Walks the polyline accumulating pairwise haversine distance and linearly
/// interpolates inside the pair where the target distance falls. A polyline
/// of zero total length yields its first point. Returns `None` for
/// polylines with fewer than two points.
pub fn point_along(route: &[RoutePoint], progress: f64) -> Option<Coord> {
    if route.len() < 2 {
        return None;
    }

    let total: f64 = route
        .windows(2)
        .map(|pair| haversine_m(coord(pair[0]), coord(pair[1])))
        .sum();
    if total == 0.0 {
        return Some(coord(route[0]));
    }

    let target = total * progress;
    let mut travelled = 0.0;

    for pair in route.windows(2) {
        let (a, b) = (coord(pair[0]), coord(pair[1]));
        let segment = haversine_m(a, b);
        if travelled + segment >= target {
            let fraction = if segment == 0.0 {
                0.0
            } else {
                (target - travelled) / segment
            };
            return Some(Coord::new(
                a.lat + (b.lat - a.lat) * fraction,
                a.lon + (b.lon - a.lon) * fraction,
            ));
        }
        travelled += segment;
    }

    route.last().map(|&p| coord(p))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn route()(points in prop::collection::vec((-8.0f64..-5.0, 105.0f64..115.0), 2..12)) -> Vec<RoutePoint> {
            points.into_iter().map(|(lat, lon)| [lat, lon]).collect()
        }
    }

    proptest! {
        /// Endpoints: progress 0 and 1 hit the first and last points
        #[test]
        fn endpoints(route in route()) {
            let first = point_along(&route, 0.0).unwrap();
            prop_assert!((first.lat - route[0][0]).abs() < 1e-9);
            prop_assert!((first.lon - route[0][1]).abs() < 1e-9);

            let last_point = route[route.len() - 1];
            let last = point_along(&route, 1.0).unwrap();
            prop_assert!((last.lat - last_point[0]).abs() < 1e-9);
            prop_assert!((last.lon - last_point[1]).abs() < 1e-9);
        }

        /// Sampled points stay within the route's bounding box
        #[test]
        fn within_bounding_box(route in route(), progress in 0.0f64..=1.0) {
            let p = point_along(&route, progress).unwrap();
            let min_lat = route.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
            let max_lat = route.iter().map(|p| p[0]).fold(f64::NEG_INFINITY, f64::max);
            let min_lon = route.iter().map(|p| p[1]).fold(f64::INFINITY, f64::min);
            let max_lon = route.iter().map(|p| p[1]).fold(f64::NEG_INFINITY, f64::max);

            prop_assert!(p.lat >= min_lat - 1e-9 && p.lat <= max_lat + 1e-9);
            prop_assert!(p.lon >= min_lon - 1e-9 && p.lon <= max_lon + 1e-9);
        }
    }
}
