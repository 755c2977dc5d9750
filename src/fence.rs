use geo::{BooleanOps, Buffer, Contains, Validation};
use geo_types::{Coord, LineString, MultiPolygon, Point, Polygon};

use crate::coord_transform::CoordSystem;
use crate::error::TrajectoryError;

const MIN_FENCE_POINTS: usize = 3;

fn parse_token(token: &str) -> Result<Coord<f64>, TrajectoryError> {
    let fields: Vec<&str> = token.split(',').map(str::trim).collect();
    let [lng, lat] = fields.as_slice() else {
        return Err(TrajectoryError::Parse(format!(
            "expect `lon,lat`, got `{token}`"
        )));
    };
    let parse_field = |field: &str| match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(TrajectoryError::Parse(format!(
            "`{field}` in `{token}` is not a number"
        ))),
    };
    Ok(Coord {
        x: parse_field(lng)?,
        y: parse_field(lat)?,
    })
}

/// Parses `"lon,lat;lon,lat;..."` (trailing `;` optional) without any
/// frame conversion or length requirement.
pub fn parse_coord_list(input: &str) -> Result<Vec<Coord<f64>>, TrajectoryError> {
    input
        .trim()
        .trim_matches(';')
        .split(';')
        .map(parse_token)
        .collect()
}

pub fn parse_fence(input: &str) -> Result<Vec<Coord<f64>>, TrajectoryError> {
    let coords = parse_coord_list(input)?;
    if coords.len() < MIN_FENCE_POINTS {
        return Err(TrajectoryError::Parse(format!(
            "a fence needs at least {MIN_FENCE_POINTS} points, got {}",
            coords.len()
        )));
    }
    Ok(coords)
}

/// The boundary a trajectory must stay in. `ring` keeps the points in the
/// order they were given (WGS-84); `polygon` is what containment is tested
/// against and is always valid.
#[derive(Clone, Debug)]
pub struct Fence {
    ring: Vec<Coord<f64>>,
    polygon: MultiPolygon<f64>,
}

impl Fence {
    pub fn parse(input: &str, coord_system: CoordSystem) -> Result<Self, TrajectoryError> {
        let ring = parse_fence(input)?
            .into_iter()
            .map(|coord| coord_system.to_wgs84(coord))
            .collect();
        Ok(Self::from_ring(ring))
    }

    pub fn from_ring(ring: Vec<Coord<f64>>) -> Self {
        let polygon = Polygon::new(LineString::from(ring.clone()), vec![]);
        let polygon = if polygon.is_valid() {
            MultiPolygon::new(vec![polygon])
        } else {
            debug!("fence polygon is self-intersecting, repairing");
            // a self union resolves crossings into separate valid rings
            polygon.union(&polygon)
        };
        Fence { ring, polygon }
    }

    pub fn ring(&self) -> &[Coord<f64>] {
        &self.ring
    }

    pub fn polygon(&self) -> &MultiPolygon<f64> {
        &self.polygon
    }

    pub fn contains(&self, coord: Coord<f64>) -> bool {
        self.polygon.contains(&Point::from(coord))
    }

    /// The fence grown outward by `distance` degrees.
    pub fn buffered(&self, distance: f64) -> MultiPolygon<f64> {
        self.polygon.buffer(distance)
    }
}
