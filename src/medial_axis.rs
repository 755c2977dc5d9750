use geo_types::Coord;

use crate::fence::Fence;
use crate::utils::degree_distance;

// how far around the opposite cursor to look for a better partner
const CANDIDATE_RADIUS: usize = 3;

fn midpoint(a: Coord<f64>, b: Coord<f64>) -> Coord<f64> {
    Coord {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
    }
}

/// Among `candidates`, the point nearest to `from` whose midpoint with
/// `from` lies inside the fence. The first one wins on ties.
fn nearest_valid_candidate(
    from: Coord<f64>,
    candidates: &[Coord<f64>],
    fence: &Fence,
) -> Option<Coord<f64>> {
    let mut nearest = None;
    let mut min_distance = f64::INFINITY;
    for &candidate in candidates {
        if !fence.contains(midpoint(from, candidate)) {
            continue;
        }
        let distance = degree_distance(from, candidate);
        if distance < min_distance {
            min_distance = distance;
            nearest = Some(candidate);
        }
    }
    nearest
}

/// A rough centerline of the fence, built by pairing points from both ends
/// of the ring and keeping the midpoints that fall inside.
///
/// For rings with an odd number of points the middle ring point is appended
/// last as is. Being a ring vertex it sits on the boundary, so unlike the
/// other points it is not strictly inside the fence.
pub fn approximate_medial_axis(fence: &Fence) -> Vec<Coord<f64>> {
    let ring = fence.ring();
    let n = ring.len();
    let mut midpoints = Vec::new();
    if n == 0 {
        return midpoints;
    }

    let mut i = 0;
    let mut j = n - 1;
    while i < j {
        let window =
            &ring[j.saturating_sub(CANDIDATE_RADIUS)..(j + CANDIDATE_RADIUS + 1).min(n)];
        if let Some(candidate) = nearest_valid_candidate(ring[i], window, fence) {
            // first match in the whole ring, so a repeated closing point
            // resolves to the ring start
            j = ring.iter().position(|c| *c == candidate).unwrap_or(j);
            let mid = midpoint(ring[i], ring[j]);
            if fence.contains(mid) {
                midpoints.push(mid);
            }
        }
        i += 1;
        if j == 0 {
            break;
        }
        j -= 1;
    }

    if n % 2 == 1 {
        midpoints.push(ring[n / 2]);
    }
    debug!("medial axis approximated with {} points", midpoints.len());
    midpoints
}
