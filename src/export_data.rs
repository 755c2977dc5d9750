use anyhow::Result;
use geo_types::{Coord, Point};
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};
use std::io::Write;

pub fn trajectory_to_gpx(points: &[Coord<f64>]) -> Result<Gpx> {
    let mut segment = TrackSegment::new();
    segment.points = points
        .iter()
        .map(|coord| Waypoint::new(Point::from(*coord)))
        .collect();

    let mut track = Track::new();
    track.name = Some("Generated trajectory".to_string());
    track.segments.push(segment);

    Ok(Gpx {
        version: GpxVersion::Gpx11,
        creator: Some("trajectory_builder".to_string()),
        tracks: vec![track],
        ..Default::default()
    })
}

pub fn trajectory_to_gpx_file<T: Write>(points: &[Coord<f64>], writer: &mut T) -> Result<()> {
    let gpx = trajectory_to_gpx(points)?;
    gpx::write(&gpx, writer)?;
    Ok(())
}
