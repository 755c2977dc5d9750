use thiserror::Error;

/// Everything the trajectory pipeline can surface to a caller.
///
/// Road network failures never show up here: they are folded into
/// [`crate::road_network::RoadNetwork::Unavailable`] and recovered from.
#[derive(Error, Debug)]
pub enum TrajectoryError {
    /// Malformed fence/trajectory string or unknown coordinate system.
    #[error("invalid input: {0}")]
    Parse(String),

    /// The router ran out of attempts without finding a long enough route.
    #[error("unable to find a valid route inside the fence")]
    NoValidRoute,

    /// Degenerate geometry, e.g. a path too short to walk or resample.
    #[error("failed to generate trajectory: {0}")]
    Generation(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl TrajectoryError {
    pub fn status_code(&self) -> u16 {
        match self {
            TrajectoryError::Parse(_) => 400,
            TrajectoryError::NoValidRoute
            | TrajectoryError::Generation(_)
            | TrajectoryError::Internal(_) => 500,
        }
    }
}
