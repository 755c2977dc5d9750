use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Result;
use geo::{Contains, Distance, Haversine};
use geo_types::{Coord, LineString, MultiPolygon, Point};
use geojson::{GeoJson, Geometry, Value};
use petgraph::graph::{NodeIndex, UnGraph};

use crate::fence::Fence;

/// Drivable roads near a fence. Node weights are WGS-84 coordinates, edge
/// weights are road lengths in meters.
pub type RoadGraph = UnGraph<Coord<f64>, f64>;

/// What the pipeline got back from a provider. A failed fetch and an empty
/// graph are the same thing as far as generation is concerned.
#[derive(Debug)]
pub enum RoadNetwork {
    Available(RoadGraph),
    Unavailable(String),
}

pub trait RoadNetworkProvider: Send + Sync {
    fn fetch(&self, boundary: &MultiPolygon<f64>) -> Result<RoadGraph>;
}

impl<F> RoadNetworkProvider for F
where
    F: Fn(&MultiPolygon<f64>) -> Result<RoadGraph> + Send + Sync,
{
    fn fetch(&self, boundary: &MultiPolygon<f64>) -> Result<RoadGraph> {
        self(boundary)
    }
}

/// Buffers the fence by `buffer_distance` degrees and asks `provider` for the
/// roads inside.
pub fn fetch_road_network(
    provider: &dyn RoadNetworkProvider,
    fence: &Fence,
    buffer_distance: f64,
) -> RoadNetwork {
    let boundary = fence.buffered(buffer_distance);
    match provider.fetch(&boundary) {
        Ok(graph) if graph.node_count() == 0 => {
            RoadNetwork::Unavailable("road graph has no nodes".to_owned())
        }
        Ok(graph) => {
            debug!(
                "road graph: {} nodes, {} edges",
                graph.node_count(),
                graph.edge_count()
            );
            RoadNetwork::Available(graph)
        }
        Err(e) => RoadNetwork::Unavailable(format!("{e:#}")),
    }
}

/// Used when there is no road data at all; every trajectory then follows the
/// fence's approximated medial axis.
pub struct NoRoadNetwork;

impl RoadNetworkProvider for NoRoadNetwork {
    fn fetch(&self, _boundary: &MultiPolygon<f64>) -> Result<RoadGraph> {
        bail!("no road network configured")
    }
}

#[derive(Default)]
pub struct RoadGraphBuilder {
    graph: RoadGraph,
    // f64 is not `Hash`, so nodes are keyed by their bit patterns
    nodes: HashMap<(u64, u64), NodeIndex>,
}

impl RoadGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&mut self, coord: Coord<f64>) -> NodeIndex {
        let graph = &mut self.graph;
        *self
            .nodes
            .entry((coord.x.to_bits(), coord.y.to_bits()))
            .or_insert_with(|| graph.add_node(coord))
    }

    pub fn add_segment(&mut self, from: Coord<f64>, to: Coord<f64>) {
        if from == to {
            return;
        }
        let length = Haversine.distance(Point::from(from), Point::from(to));
        let a = self.node(from);
        let b = self.node(to);
        self.graph.add_edge(a, b, length);
    }

    pub fn build(self) -> RoadGraph {
        self.graph
    }
}

/// Road centerlines loaded from a GeoJSON file, clipped to the requested
/// boundary on every fetch.
pub struct GeoJsonRoadNetwork {
    lines: Vec<LineString<f64>>,
}

fn collect_lines(geometry: Geometry, lines: &mut Vec<LineString<f64>>) {
    let to_line = |positions: Vec<Vec<f64>>| {
        positions
            .into_iter()
            .filter(|p| p.len() >= 2)
            .map(|p| Coord { x: p[0], y: p[1] })
            .collect::<LineString<f64>>()
    };
    match geometry.value {
        Value::LineString(positions) => lines.push(to_line(positions)),
        Value::MultiLineString(parts) => lines.extend(parts.into_iter().map(to_line)),
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_lines(geometry, lines);
            }
        }
        _ => (),
    }
}

impl GeoJsonRoadNetwork {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let network = Self::from_geojson_str(&content)?;
        info!(
            "loaded {} road lines from {}",
            network.lines.len(),
            path.as_ref().display()
        );
        Ok(network)
    }

    pub fn from_geojson_str(content: &str) -> Result<Self> {
        let geometries = match content.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(collection) => collection
                .features
                .into_iter()
                .filter_map(|feature| feature.geometry)
                .collect(),
            GeoJson::Feature(feature) => feature.geometry.into_iter().collect(),
            GeoJson::Geometry(geometry) => vec![geometry],
        };
        let mut lines = Vec::new();
        for geometry in geometries {
            collect_lines(geometry, &mut lines);
        }
        if lines.is_empty() {
            bail!("no LineString geometry found in GeoJSON");
        }
        Ok(GeoJsonRoadNetwork { lines })
    }
}

impl RoadNetworkProvider for GeoJsonRoadNetwork {
    fn fetch(&self, boundary: &MultiPolygon<f64>) -> Result<RoadGraph> {
        let mut builder = RoadGraphBuilder::new();
        for line in &self.lines {
            for segment in line.lines() {
                if boundary.contains(&Point::from(segment.start))
                    && boundary.contains(&Point::from(segment.end))
                {
                    builder.add_segment(segment.start, segment.end);
                }
            }
        }
        Ok(builder.build())
    }
}
