use geo_types::Coord;
use petgraph::algo::astar;
use petgraph::graph::NodeIndex;
use rand::Rng;

use crate::error::TrajectoryError;
use crate::road_network::RoadGraph;

pub const ROUTE_ATTEMPTS: usize = 10;

/// Looks for a long simple route by sampling node pairs and keeping the
/// shortest path with the most nodes. Finding the true longest path is
/// NP-hard; this is a heuristic and makes no attempt at optimality.
///
/// A candidate must be strictly longer than `min_route_distance` meters.
/// Ties on node count keep the earlier route.
pub fn longest_route<R: Rng + ?Sized>(
    graph: &RoadGraph,
    min_route_distance: f64,
    rng: &mut R,
) -> Result<Vec<Coord<f64>>, TrajectoryError> {
    let node_count = graph.node_count();
    if node_count == 0 {
        return Err(TrajectoryError::NoValidRoute);
    }

    let mut longest_route: Vec<NodeIndex> = Vec::new();
    for _ in 0..ROUTE_ATTEMPTS {
        let start = NodeIndex::new(rng.random_range(0..node_count));
        let end = NodeIndex::new(rng.random_range(0..node_count));
        if start == end {
            continue;
        }
        // no heuristic: A* degrades to Dijkstra but hands back the path
        let Some((length, route)) =
            astar(graph, start, |n| n == end, |e| *e.weight(), |_| 0.0)
        else {
            continue;
        };
        if length > min_route_distance && route.len() > longest_route.len() {
            longest_route = route;
        }
    }

    if longest_route.is_empty() {
        return Err(TrajectoryError::NoValidRoute);
    }
    debug!("picked route with {} nodes", longest_route.len());
    Ok(longest_route.into_iter().map(|n| graph[n]).collect())
}
