use geo_types::Coord;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A closed square ring (`lon,lat;...;`, first point repeated at the end).
pub fn square_fence(min_lng: f64, min_lat: f64, size: f64) -> String {
    let corners = [
        (min_lng, min_lat),
        (min_lng + size, min_lat),
        (min_lng + size, min_lat + size),
        (min_lng, min_lat + size),
        (min_lng, min_lat),
    ];
    corners
        .iter()
        .map(|(lng, lat)| format!("{lng},{lat};"))
        .collect()
}

/// Roughly 550 m across, somewhere in Shanghai (BD-09).
pub fn shanghai_fence() -> String {
    square_fence(121.47, 31.23, 0.005)
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub const ROAD_ROWS: [f64; 3] = [31.201, 31.203, 31.205];
pub const ROAD_COLUMNS: [f64; 2] = [121.401, 121.409];

/// A zigzag of horizontal roads joined at alternating ends, all inside
/// `square_fence(121.40, 31.20, 0.01)` (WGS-84).
pub fn zigzag_roads_geojson() -> String {
    let [west, east] = ROAD_COLUMNS;
    let [r0, r1, r2] = ROAD_ROWS;
    let positions = [
        (west, r0),
        (east, r0),
        (east, r1),
        (west, r1),
        (west, r2),
        (east, r2),
    ]
    .iter()
    .map(|(x, y)| format!("[{x},{y}]"))
    .collect::<Vec<_>>()
    .join(",");
    format!(
        r#"{{
            "type": "FeatureCollection",
            "features": [{{
                "type": "Feature",
                "properties": {{ "highway": "residential" }},
                "geometry": {{ "type": "LineString", "coordinates": [{positions}] }}
            }}]
        }}"#
    )
}

/// Whether `coord` is within `margin` of one of the zigzag roads.
pub fn near_zigzag_road(coord: Coord<f64>, margin: f64) -> bool {
    let tolerance = margin + 1e-12;
    let [west, east] = ROAD_COLUMNS;
    let on_row = ROAD_ROWS.iter().any(|row| (coord.y - row).abs() <= tolerance)
        && coord.x >= west - tolerance
        && coord.x <= east + tolerance;
    let on_column = ROAD_COLUMNS
        .iter()
        .any(|column| (coord.x - column).abs() <= tolerance)
        && coord.y >= ROAD_ROWS[0] - tolerance
        && coord.y <= ROAD_ROWS[2] + tolerance;
    on_row || on_column
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
