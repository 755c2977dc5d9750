use geo::{Distance, Euclidean};
use geo_types::{Coord, Point};

// Length of one degree of latitude; used as a flat-earth conversion, which
// is good enough at the latitudes fences are drawn at.
pub const METERS_PER_DEGREE: f64 = 111320.0;

pub fn meters_to_degrees(meters: f64, meters_per_degree: f64) -> f64 {
    meters / meters_per_degree
}

/// Plain Euclidean distance in degree space, not geodesic.
pub fn degree_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Euclidean.distance(Point::from(a), Point::from(b))
}

pub fn path_length(path: &[Coord<f64>]) -> f64 {
    path.windows(2)
        .map(|pair| degree_distance(pair[0], pair[1]))
        .sum()
}

/// The point `distance` along `path`, clamped to its ends. `None` only for an
/// empty path.
pub fn interpolate_along(path: &[Coord<f64>], distance: f64) -> Option<Coord<f64>> {
    let first = *path.first()?;
    if distance <= 0.0 {
        return Some(first);
    }
    let mut remaining = distance;
    for pair in path.windows(2) {
        let segment_length = degree_distance(pair[0], pair[1]);
        if segment_length > 0.0 && remaining <= segment_length {
            let ratio = remaining / segment_length;
            return Some(Coord {
                x: pair[0].x + (pair[1].x - pair[0].x) * ratio,
                y: pair[0].y + (pair[1].y - pair[0].y) * ratio,
            });
        }
        remaining -= segment_length;
    }
    path.last().copied()
}
