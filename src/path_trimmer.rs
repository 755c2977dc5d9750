use geo_types::Coord;

use crate::error::TrajectoryError;
use crate::utils::degree_distance;

/// Hard cap on steps a single walk may take before giving up.
pub const MAX_WALK_STEPS: usize = 1_000_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Walks `path` from `start_index`, bouncing off both ends, and returns the
/// points visited (the start point first) before the walked distance would
/// exceed `target_distance` degrees.
pub fn trim_path(
    path: &[Coord<f64>],
    target_distance: f64,
    mut direction: Direction,
    start_index: usize,
) -> Result<Vec<Coord<f64>>, TrajectoryError> {
    let n = path.len();
    if n < 2 {
        return Err(TrajectoryError::Generation(format!(
            "cannot walk a path with {n} point(s)"
        )));
    }
    if start_index >= n {
        return Err(TrajectoryError::Generation(format!(
            "start index {start_index} is outside a path of {n} points"
        )));
    }

    // a full round trip without gaining distance means the walk is stuck
    let stall_limit = 2 * n;
    let mut steps_without_progress = 0;
    let mut steps = 0;

    let mut trimmed = vec![path[start_index]];
    let mut walked = 0.0;
    let mut current_index = start_index;
    while walked < target_distance {
        steps += 1;
        if steps > MAX_WALK_STEPS {
            return Err(TrajectoryError::Generation(format!(
                "walk gave up after {MAX_WALK_STEPS} steps ({walked} of {target_distance} covered)"
            )));
        }

        let next_index = match direction {
            Direction::Forward if current_index + 1 < n => current_index + 1,
            Direction::Backward if current_index > 0 => current_index - 1,
            _ => {
                direction = direction.reverse();
                continue;
            }
        };

        let segment_length = degree_distance(path[current_index], path[next_index]);
        if walked + segment_length > target_distance {
            break;
        }
        if segment_length > 0.0 {
            steps_without_progress = 0;
        } else {
            steps_without_progress += 1;
            if steps_without_progress > stall_limit {
                return Err(TrajectoryError::Generation(
                    "path has no length to walk along".to_owned(),
                ));
            }
        }
        trimmed.push(path[next_index]);
        walked += segment_length;
        current_index = next_index;
    }

    if trimmed.len() < 2 {
        return Err(TrajectoryError::Generation(format!(
            "trimmed path has only {} point(s)",
            trimmed.len()
        )));
    }
    Ok(trimmed)
}
