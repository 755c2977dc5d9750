use geo_types::Coord;
use rand::Rng;

use crate::config::GeneratorConfig;
use crate::coord_transform::CoordSystem;
use crate::error::TrajectoryError;
use crate::fence::Fence;
use crate::medial_axis::approximate_medial_axis;
use crate::path_trimmer::{trim_path, Direction};
use crate::resampler::resample_with_jitter;
use crate::road_network::{fetch_road_network, RoadNetwork, RoadNetworkProvider};
use crate::router::longest_route;
use crate::trajectory::Trajectory;
use crate::utils::meters_to_degrees;

#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryRequest {
    /// `lon,lat;...` ring in `coord_system`
    pub fence: String,
    pub num_points: usize,
    /// meters
    pub total_distance: u64,
    /// degrees
    pub error_margin: f64,
    pub coord_system: CoordSystem,
}

impl TrajectoryRequest {
    pub fn new(fence: impl Into<String>, config: &GeneratorConfig) -> Self {
        Self {
            fence: fence.into(),
            num_points: config.num_points,
            total_distance: config.total_distance,
            error_margin: config.error_margin,
            coord_system: CoordSystem::default(),
        }
    }
}

pub struct TrajectoryGenerator {
    config: GeneratorConfig,
    provider: Box<dyn RoadNetworkProvider>,
}

impl TrajectoryGenerator {
    pub fn new(config: GeneratorConfig, provider: impl RoadNetworkProvider + 'static) -> Self {
        Self {
            config,
            provider: Box::new(provider),
        }
    }

    /// A request for `fence` carrying this generator's defaults.
    pub fn request(&self, fence: impl Into<String>) -> TrajectoryRequest {
        TrajectoryRequest::new(fence, &self.config)
    }

    // The road route when there is one, otherwise the fence's medial axis.
    fn base_path<R: Rng + ?Sized>(
        &self,
        fence: &Fence,
        rng: &mut R,
    ) -> Result<Vec<Coord<f64>>, TrajectoryError> {
        let fallback_reason =
            match fetch_road_network(self.provider.as_ref(), fence, self.config.road_buffer_distance)
            {
                RoadNetwork::Available(graph) => {
                    match longest_route(&graph, self.config.min_route_distance, rng) {
                        Ok(route) => return Ok(route),
                        Err(TrajectoryError::NoValidRoute) => {
                            TrajectoryError::NoValidRoute.to_string()
                        }
                        Err(e) => return Err(e),
                    }
                }
                RoadNetwork::Unavailable(reason) => reason,
            };

        warn!("no road route ({fallback_reason}), following the fence instead");
        let axis = approximate_medial_axis(fence);
        if axis.len() < 2 {
            return Err(TrajectoryError::Generation(format!(
                "fence centerline has only {} point(s)",
                axis.len()
            )));
        }
        Ok(axis)
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        request: &TrajectoryRequest,
        rng: &mut R,
    ) -> Result<Trajectory, TrajectoryError> {
        if request.num_points > self.config.max_num_points {
            return Err(TrajectoryError::Parse(format!(
                "num_points must be at most {}, got {}",
                self.config.max_num_points, request.num_points
            )));
        }
        if !request.error_margin.is_finite() {
            return Err(TrajectoryError::Parse(format!(
                "error_margin must be a finite number, got {}",
                request.error_margin
            )));
        }

        let fence = Fence::parse(&request.fence, request.coord_system)?;
        debug!("fence parsed with {} points", fence.ring().len());

        let path = self.base_path(&fence, rng)?;
        let target_distance =
            meters_to_degrees(request.total_distance as f64, self.config.meters_per_degree);

        let direction = if rng.random_bool(0.5) {
            Direction::Backward
        } else {
            Direction::Forward
        };
        let start_index = rng.random_range(0..path.len());
        let trimmed = trim_path(&path, target_distance, direction, start_index)?;
        debug!(
            "trimmed path: {} of {} points, starting at {start_index} going {direction:?}",
            trimmed.len(),
            path.len()
        );

        let points = resample_with_jitter(
            &trimmed,
            target_distance,
            request.num_points,
            request.error_margin,
            &fence,
            &self.config.jitter,
            rng,
        );
        info!(
            "generated trajectory with {} of {} points",
            points.len(),
            request.num_points
        );
        Ok(Trajectory { points })
    }

    pub fn generate_string<R: Rng + ?Sized>(
        &self,
        request: &TrajectoryRequest,
        rng: &mut R,
    ) -> Result<String, TrajectoryError> {
        Ok(self.generate(request, rng)?.to_trajectory_string())
    }
}
