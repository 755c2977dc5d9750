use geo_types::Coord;
use itertools::Itertools;

use crate::error::TrajectoryError;
use crate::fence::parse_coord_list;

/// Sampled vehicle positions (WGS-84), in driving order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    pub points: Vec<Coord<f64>>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `lon,lat;lon,lat;...;`, always with a trailing `;`.
    pub fn to_trajectory_string(&self) -> String {
        to_trajectory_string(&self.points)
    }
}

pub fn to_trajectory_string(points: &[Coord<f64>]) -> String {
    // `Display` for f64 prints the shortest string that parses back to the
    // same value, so this round trips exactly
    let joined = points
        .iter()
        .map(|coord| format!("{},{}", coord.x, coord.y))
        .join(";");
    joined + ";"
}

pub fn parse_trajectory(input: &str) -> Result<Trajectory, TrajectoryError> {
    if input.trim().trim_matches(';').is_empty() {
        return Ok(Trajectory::default());
    }
    Ok(Trajectory {
        points: parse_coord_list(input)?,
    })
}
