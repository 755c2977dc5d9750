use assert_float_eq::assert_float_absolute_eq;
use geo_types::Coord;
use trajectory_builder::coord_transform::{self, CoordSystem};

// (bd09 input, gcj02 expected, wgs84 expected)
const REFERENCE_POINTS: [((f64, f64), (f64, f64), (f64, f64)); 3] = [
    (
        (116.404, 39.915),
        (116.39762729119315, 39.90865673957631),
        (116.3913836995125, 39.90724375683292),
    ),
    (
        (121.4737, 31.2304),
        (121.46719514053864, 31.22434200031416),
        (121.46265198434502, 31.22628282825222),
    ),
    (
        (114.0579, 22.5431),
        (114.05135740819178, 22.537411660098435),
        (114.04625230970768, 22.54015995831499),
    ),
];

const EPSILON: f64 = 1e-9;

#[test]
fn bd09_reference_points() {
    for ((bd_lng, bd_lat), (gcj_lng, gcj_lat), (wgs_lng, wgs_lat)) in REFERENCE_POINTS {
        let (lng, lat) = coord_transform::bd09_to_gcj02(bd_lng, bd_lat);
        assert_float_absolute_eq!(lng, gcj_lng, EPSILON);
        assert_float_absolute_eq!(lat, gcj_lat, EPSILON);

        let (lng, lat) = coord_transform::bd09_to_wgs84(bd_lng, bd_lat);
        assert_float_absolute_eq!(lng, wgs_lng, EPSILON);
        assert_float_absolute_eq!(lat, wgs_lat, EPSILON);
    }
}

#[test]
fn gcj02_reference_point() {
    let (lng, lat) = coord_transform::gcj02_to_wgs84(121.4737, 31.2304);
    assert_float_absolute_eq!(lng, 121.46917694072306, EPSILON);
    assert_float_absolute_eq!(lat, 31.232355350407428, EPSILON);
}

#[test]
fn composition_matches_direct() {
    for ((bd_lng, bd_lat), _, _) in REFERENCE_POINTS {
        let (gcj_lng, gcj_lat) = coord_transform::bd09_to_gcj02(bd_lng, bd_lat);
        let chained = coord_transform::gcj02_to_wgs84(gcj_lng, gcj_lat);
        let direct = coord_transform::bd09_to_wgs84(bd_lng, bd_lat);
        assert_eq!(chained, direct);

        let via_enum = CoordSystem::Bd09.to_wgs84(Coord {
            x: bd_lng,
            y: bd_lat,
        });
        assert_eq!((via_enum.x, via_enum.y), direct);
    }
}

#[test]
fn round_trip_through_bd09() {
    // the inverse is a single step approximation, good to a couple of meters
    const ROUND_TRIP_EPSILON: f64 = 5e-5;
    for (_, _, (wgs_lng, wgs_lat)) in REFERENCE_POINTS {
        let (bd_lng, bd_lat) = coord_transform::wgs84_to_bd09(wgs_lng, wgs_lat);
        let (lng, lat) = coord_transform::bd09_to_wgs84(bd_lng, bd_lat);
        assert_float_absolute_eq!(lng, wgs_lng, ROUND_TRIP_EPSILON);
        assert_float_absolute_eq!(lat, wgs_lat, ROUND_TRIP_EPSILON);

        let (gcj_lng, gcj_lat) = coord_transform::bd09_to_gcj02(bd_lng, bd_lat);
        let (back_lng, back_lat) = coord_transform::gcj02_to_bd09(gcj_lng, gcj_lat);
        assert_float_absolute_eq!(back_lng, bd_lng, 1e-5);
        assert_float_absolute_eq!(back_lat, bd_lat, 1e-5);
    }
}

#[test]
fn transforms_are_continuous() {
    let (lng_a, lat_a) = coord_transform::bd09_to_wgs84(116.404, 39.915);
    let (lng_b, lat_b) = coord_transform::bd09_to_wgs84(116.404 + 1e-7, 39.915 + 1e-7);
    assert!((lng_a - lng_b).abs() < 1e-6);
    assert!((lat_a - lat_b).abs() < 1e-6);
}
